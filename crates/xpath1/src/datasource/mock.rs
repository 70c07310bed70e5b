//! A small in-memory tree for the evaluator's unit tests.

use super::{DataSourceNode, NodeType, QName};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

pub const SHAPES_NS: &str = "urn:example:shapes";

#[derive(Debug)]
struct MockNodeData {
    node_type: NodeType,
    name: Option<QName<'static>>,
    value: &'static str,
    parent: Option<usize>,
    children: Vec<usize>,
    attributes: Vec<usize>,
}

/// Nodes are stored in insertion order, which the fixtures keep equal to
/// document order, so a node's id doubles as its document position.
#[derive(Debug, Default)]
pub struct MockTree {
    nodes: Vec<MockNodeData>,
}

impl MockTree {
    fn add(
        &mut self,
        parent: Option<usize>,
        node_type: NodeType,
        name: Option<QName<'static>>,
        value: &'static str,
    ) -> usize {
        let id = self.nodes.len();
        self.nodes.push(MockNodeData {
            node_type,
            name,
            value,
            parent,
            children: vec![],
            attributes: vec![],
        });
        if let Some(parent) = parent {
            let owner = &mut self.nodes[parent];
            if node_type == NodeType::Attribute {
                owner.attributes.push(id);
            } else {
                owner.children.push(id);
            }
        }
        id
    }

    pub fn node(&self, id: usize) -> MockNode<'_> {
        MockNode { id, tree: self }
    }

    fn data(&self, id: usize) -> &MockNodeData {
        &self.nodes[id]
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MockNode<'a> {
    pub id: usize,
    tree: &'a MockTree,
}

impl PartialEq for MockNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MockNode<'_> {}

impl PartialOrd for MockNode<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MockNode<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Hash for MockNode<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<'a> DataSourceNode<'a> for MockNode<'a> {
    fn node_type(&self) -> NodeType {
        self.tree.data(self.id).node_type
    }

    fn name(&self) -> Option<QName<'a>> {
        self.tree.data(self.id).name
    }

    fn string_value(&self) -> String {
        self.tree.data(self.id).value.to_string()
    }

    fn attributes(&self) -> Box<dyn Iterator<Item = Self> + 'a> {
        let tree = self.tree;
        Box::new(tree.data(self.id).attributes.iter().map(move |&id| tree.node(id)))
    }

    fn children(&self) -> Box<dyn Iterator<Item = Self> + 'a> {
        let tree = self.tree;
        Box::new(tree.data(self.id).children.iter().map(move |&id| tree.node(id)))
    }

    fn parent(&self) -> Option<Self> {
        self.tree.data(self.id).parent.map(|id| self.tree.node(id))
    }
}

/// Builds:
///
/// ```text
/// 0  /
/// 1    <para id="p1" xml:lang="en">     attributes 2, 3
/// 4      "Hello"
/// 5    <!-- comment node -->
/// 6    <div/>
/// 7    <?pi-target pi-value?>
/// 8    <para>
/// 9      "World"
/// 10   <s:shape s:kind="round"/>        attribute 11, s = SHAPES_NS
/// ```
pub fn create_test_tree() -> MockTree {
    let shapes = |local_part| QName {
        prefix: Some("s"),
        namespace: Some(SHAPES_NS),
        local_part,
    };

    let mut tree = MockTree::default();
    let root = tree.add(None, NodeType::Root, None, "HelloWorld");

    let para = tree.add(Some(root), NodeType::Element, Some(QName::local("para")), "Hello");
    tree.add(Some(para), NodeType::Attribute, Some(QName::local("id")), "p1");
    let lang = QName {
        prefix: Some("xml"),
        namespace: Some(crate::XML_NAMESPACE),
        local_part: "lang",
    };
    tree.add(Some(para), NodeType::Attribute, Some(lang), "en");
    tree.add(Some(para), NodeType::Text, None, "Hello");

    tree.add(Some(root), NodeType::Comment, None, " comment node ");
    tree.add(Some(root), NodeType::Element, Some(QName::local("div")), "");
    tree.add(
        Some(root),
        NodeType::ProcessingInstruction,
        Some(QName::local("pi-target")),
        "pi-value",
    );

    let second = tree.add(Some(root), NodeType::Element, Some(QName::local("para")), "World");
    tree.add(Some(second), NodeType::Text, None, "World");

    let shape = tree.add(Some(root), NodeType::Element, Some(shapes("shape")), "");
    tree.add(Some(shape), NodeType::Attribute, Some(shapes("kind")), "round");

    tree
}
