//! The read-only tree interface the evaluator navigates.

use std::hash::Hash;

#[cfg(test)]
pub(crate) mod mock;

/// An expanded name plus the prefix it was written with.
///
/// Name tests compare `namespace` and `local_part` only; `prefix` exists so
/// `name()` can return the name as it appeared in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QName<'a> {
    pub prefix: Option<&'a str>,
    pub namespace: Option<&'a str>,
    pub local_part: &'a str,
}

impl<'a> QName<'a> {
    /// A name with no prefix and no namespace.
    pub fn local(local_part: &'a str) -> Self {
        QName {
            prefix: None,
            namespace: None,
            local_part,
        }
    }
}

/// The seven XPath 1.0 node kinds, minus namespace nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Root,
    Element,
    Attribute,
    Text,
    Comment,
    ProcessingInstruction,
}

/// A node handle in an immutable document whose storage lives for `'a`.
///
/// Handles are small and `Copy`. `Ord` is document order: an element sorts
/// before its attributes, its attributes before its children, and siblings
/// in source order.
pub trait DataSourceNode<'a>:
    std::fmt::Debug + Clone + Copy + PartialEq + Eq + Hash + PartialOrd + Ord
{
    fn node_type(&self) -> NodeType;

    /// `None` for root, text and comment nodes. A processing instruction is
    /// named by its target.
    fn name(&self) -> Option<QName<'a>>;

    /// The XPath string-value: concatenated descendant text for the root and
    /// elements, the value for attributes, and the content for every other kind.
    fn string_value(&self) -> String;

    /// Attribute nodes of an element, empty for everything else.
    fn attributes(&self) -> Box<dyn Iterator<Item = Self> + 'a>;

    /// Children in document order. Attributes are not children.
    fn children(&self) -> Box<dyn Iterator<Item = Self> + 'a>;

    /// `None` only for the root. An attribute's parent is its element.
    fn parent(&self) -> Option<Self>;
}
