//! The arena-backed document tree shared by the XML and HTML front ends.
//!
//! Nodes are stored in one `Vec` in document order: an element, then its
//! attributes, then its descendants. A node's index is therefore also its
//! document position, and every subtree occupies a contiguous range.

use crate::error::ParseError;
use crate::{DocumentType, ParseOptions, html, xml};
use scrapexpath_xpath1::{DataSourceNode, NodeType, QName};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExpandedName {
    pub prefix: Option<String>,
    pub namespace: Option<String>,
    pub local: String,
}

impl ExpandedName {
    pub fn local(local: impl Into<String>) -> Self {
        ExpandedName {
            prefix: None,
            namespace: None,
            local: local.into(),
        }
    }
}

#[derive(Debug)]
struct NodeData {
    node_type: NodeType,
    name: Option<ExpandedName>,
    /// Text, comment and attribute content, or processing-instruction data.
    value: String,
    parent: Option<usize>,
    attributes: Vec<usize>,
    children: Vec<usize>,
    /// One past the last node of this node's subtree.
    subtree_end: usize,
}

/// An immutable, parsed XML or HTML document.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<NodeData>,
}

impl Document {
    /// Parses `text` as `doc_type` with the default options.
    pub fn parse(text: &str, doc_type: DocumentType) -> Result<Self, ParseError> {
        Self::parse_with(text, doc_type, &ParseOptions::default())
    }

    pub fn parse_with(
        text: &str,
        doc_type: DocumentType,
        options: &ParseOptions,
    ) -> Result<Self, ParseError> {
        let document = match doc_type {
            DocumentType::Xml => xml::parse(text, options)?,
            DocumentType::Html => html::parse(text),
        };
        log::debug!(
            "Parsed {} document: {} bytes into {} nodes",
            doc_type,
            text.len(),
            document.len()
        );
        Ok(document)
    }

    /// The root node, parent of the document element.
    pub fn root(&self) -> Node<'_> {
        Node {
            document: self,
            id: 0,
        }
    }

    /// The number of nodes, attributes included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A document always has a root, so this is never true.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A cheap handle to one node of a [`Document`].
///
/// Ordering and hashing go by document position; handles from different
/// documents should not be compared.
#[derive(Clone, Copy)]
pub struct Node<'a> {
    document: &'a Document,
    id: usize,
}

impl<'a> Node<'a> {
    /// The node's position in document order. The root is 0.
    pub fn position(&self) -> usize {
        self.id
    }

    fn data(&self) -> &'a NodeData {
        &self.document.nodes[self.id]
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data();
        let mut s = f.debug_struct("Node");
        s.field("id", &self.id).field("type", &data.node_type);
        if let Some(name) = &data.name {
            s.field("name", &name.local);
        }
        s.finish()
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && std::ptr::eq(self.document, other.document)
    }
}

impl Eq for Node<'_> {}

impl PartialOrd for Node<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Hash for Node<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<'a> DataSourceNode<'a> for Node<'a> {
    fn node_type(&self) -> NodeType {
        self.data().node_type
    }

    fn name(&self) -> Option<QName<'a>> {
        self.data().name.as_ref().map(|name| QName {
            prefix: name.prefix.as_deref(),
            namespace: name.namespace.as_deref(),
            local_part: &name.local,
        })
    }

    fn string_value(&self) -> String {
        let data = self.data();
        match data.node_type {
            NodeType::Root | NodeType::Element => self.document.nodes
                [self.id + 1..data.subtree_end]
                .iter()
                .filter(|n| n.node_type == NodeType::Text)
                .map(|n| n.value.as_str())
                .collect(),
            _ => data.value.clone(),
        }
    }

    fn attributes(&self) -> Box<dyn Iterator<Item = Self> + 'a> {
        let document = self.document;
        Box::new(
            self.data()
                .attributes
                .iter()
                .map(move |&id| Node { document, id }),
        )
    }

    fn children(&self) -> Box<dyn Iterator<Item = Self> + 'a> {
        let document = self.document;
        Box::new(
            self.data()
                .children
                .iter()
                .map(move |&id| Node { document, id }),
        )
    }

    fn parent(&self) -> Option<Self> {
        self.data().parent.map(|id| Node {
            document: self.document,
            id,
        })
    }
}

/// Appends nodes in document order while a front end walks its own tree.
///
/// Adjacent text is merged and empty text is dropped, so the finished tree
/// never holds two neighbouring text nodes.
pub(crate) struct TreeBuilder {
    nodes: Vec<NodeData>,
    open: Vec<usize>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        let root = NodeData {
            node_type: NodeType::Root,
            name: None,
            value: String::new(),
            parent: None,
            attributes: Vec::new(),
            children: Vec::new(),
            subtree_end: 1,
        };
        TreeBuilder {
            nodes: vec![root],
            open: vec![0],
        }
    }

    fn current(&self) -> usize {
        self.open.last().copied().unwrap_or(0)
    }

    fn push(&mut self, node_type: NodeType, name: Option<ExpandedName>, value: String) -> usize {
        let id = self.nodes.len();
        let parent = self.current();
        self.nodes.push(NodeData {
            node_type,
            name,
            value,
            parent: Some(parent),
            attributes: Vec::new(),
            children: Vec::new(),
            subtree_end: id + 1,
        });
        if node_type == NodeType::Attribute {
            self.nodes[parent].attributes.push(id);
        } else {
            self.nodes[parent].children.push(id);
        }
        id
    }

    pub fn start_element(&mut self, name: ExpandedName) {
        let id = self.push(NodeType::Element, Some(name), String::new());
        self.open.push(id);
    }

    /// Adds an attribute to the element most recently started. Must be called
    /// before any of that element's children are added.
    pub fn attribute(&mut self, name: ExpandedName, value: &str) {
        self.push(NodeType::Attribute, Some(name), value.to_string());
    }

    pub fn end_element(&mut self) {
        // The root stays open until `finish`.
        if self.open.len() <= 1 {
            return;
        }
        if let Some(id) = self.open.pop() {
            self.nodes[id].subtree_end = self.nodes.len();
        }
    }

    pub fn text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let parent = self.current();
        let last_id = self.nodes.len() - 1;
        let previous = self.nodes[parent].children.last().copied();
        if previous == Some(last_id) && self.nodes[last_id].node_type == NodeType::Text {
            self.nodes[last_id].value.push_str(text);
            return;
        }
        self.push(NodeType::Text, None, text.to_string());
    }

    pub fn comment(&mut self, text: &str) {
        self.push(NodeType::Comment, None, text.to_string());
    }

    pub fn processing_instruction(&mut self, target: &str, data: &str) {
        self.push(
            NodeType::ProcessingInstruction,
            Some(ExpandedName::local(target)),
            data.to_string(),
        );
    }

    pub fn finish(mut self) -> Document {
        while self.open.len() > 1 {
            self.end_element();
        }
        let len = self.nodes.len();
        self.nodes[0].subtree_end = len;
        Document { nodes: self.nodes }
    }
}
