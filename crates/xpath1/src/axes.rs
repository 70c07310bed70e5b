//! Contains pure functions for collecting nodes along each XPath axis.
//!
//! Every function returns nodes in axis order: document order for forward
//! axes, nearest-first for reverse axes.

use crate::ast::Axis;
use crate::datasource::{DataSourceNode, NodeType};

/// Collects the nodes reachable from `node` along `axis`, in axis order.
pub fn collect<'a, N: DataSourceNode<'a>>(axis: Axis, node: N) -> Vec<N> {
    match axis {
        Axis::Child => collect_child_nodes(node),
        Axis::Attribute => collect_attribute_nodes(node),
        Axis::Descendant => collect_descendant_nodes(node),
        Axis::DescendantOrSelf => collect_descendant_or_self_nodes(node),
        Axis::Parent => collect_parent_nodes(node),
        Axis::Ancestor => collect_ancestor_nodes(node),
        Axis::AncestorOrSelf => {
            let mut nodes = vec![node];
            nodes.extend(collect_ancestor_nodes(node));
            nodes
        }
        Axis::SelfAxis => vec![node],
        Axis::FollowingSibling => collect_following_sibling_nodes(node),
        Axis::PrecedingSibling => collect_preceding_sibling_nodes(node),
        Axis::Following => collect_following_nodes(node),
        Axis::Preceding => collect_preceding_nodes(node),
    }
}

fn is_attribute<'a, N: DataSourceNode<'a>>(node: N) -> bool {
    node.node_type() == NodeType::Attribute
}

pub fn collect_child_nodes<'a, N: DataSourceNode<'a>>(node: N) -> Vec<N> {
    node.children().collect()
}

pub fn collect_attribute_nodes<'a, N: DataSourceNode<'a>>(node: N) -> Vec<N> {
    if node.node_type() != NodeType::Element {
        return Vec::new();
    }
    node.attributes().collect()
}

fn push_subtree<'a, N: DataSourceNode<'a>>(node: N, results: &mut Vec<N>) {
    // Pre-order walk; the stack holds children in reverse so they pop in order.
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        results.push(current);
        let children: Vec<N> = current.children().collect();
        stack.extend(children.into_iter().rev());
    }
}

pub fn collect_descendant_nodes<'a, N: DataSourceNode<'a>>(node: N) -> Vec<N> {
    let mut results = Vec::new();
    for child in node.children() {
        push_subtree(child, &mut results);
    }
    results
}

pub fn collect_descendant_or_self_nodes<'a, N: DataSourceNode<'a>>(node: N) -> Vec<N> {
    let mut results = Vec::new();
    push_subtree(node, &mut results);
    results
}

pub fn collect_parent_nodes<'a, N: DataSourceNode<'a>>(node: N) -> Vec<N> {
    node.parent().into_iter().collect()
}

pub fn collect_ancestor_nodes<'a, N: DataSourceNode<'a>>(node: N) -> Vec<N> {
    let mut results = Vec::new();
    let mut current = node.parent();
    while let Some(p) = current {
        results.push(p);
        current = p.parent();
    }
    results
}

pub fn collect_following_sibling_nodes<'a, N: DataSourceNode<'a>>(node: N) -> Vec<N> {
    if is_attribute(node) {
        return Vec::new();
    }
    match node.parent() {
        Some(parent) => parent.children().skip_while(|s| *s != node).skip(1).collect(),
        None => Vec::new(),
    }
}

pub fn collect_preceding_sibling_nodes<'a, N: DataSourceNode<'a>>(node: N) -> Vec<N> {
    if is_attribute(node) {
        return Vec::new();
    }
    let Some(parent) = node.parent() else {
        return Vec::new();
    };
    let mut siblings: Vec<N> = parent.children().take_while(|s| *s != node).collect();
    siblings.reverse();
    siblings
}

pub fn collect_following_nodes<'a, N: DataSourceNode<'a>>(node: N) -> Vec<N> {
    let mut results = Vec::new();
    let mut current = node;
    if is_attribute(node) {
        // Everything inside the owning element follows its attributes.
        if let Some(owner) = node.parent() {
            results.extend(collect_descendant_nodes(owner));
            current = owner;
        }
    }
    let mut cursor = Some(current);
    while let Some(c) = cursor {
        for sibling in collect_following_sibling_nodes(c) {
            push_subtree(sibling, &mut results);
        }
        cursor = c.parent();
    }
    results
}

pub fn collect_preceding_nodes<'a, N: DataSourceNode<'a>>(node: N) -> Vec<N> {
    let start = if is_attribute(node) {
        node.parent().unwrap_or(node)
    } else {
        node
    };
    // Walk up the ancestor chain gathering the subtrees of earlier siblings;
    // ancestors themselves are excluded.
    let mut results = Vec::new();
    let mut cursor = Some(start);
    while let Some(c) = cursor {
        if let Some(parent) = c.parent() {
            for sibling in parent.children() {
                if sibling == c {
                    break;
                }
                push_subtree(sibling, &mut results);
            }
        }
        cursor = c.parent();
    }
    results.sort();
    results.reverse();
    results
}
