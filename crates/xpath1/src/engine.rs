//! Evaluates a parsed expression against any tree implementing [`DataSourceNode`].

use crate::ast::{
    Axis, BinaryOperator, Expression, LocationPath, NodeTest, NodeTypeTest, Step, UnaryOperator,
};
use crate::datasource::{DataSourceNode, NodeType};
use crate::error::XPathError;
use crate::functions::{self, FunctionRegistry};
use crate::value::{XPathValue, into_document_order};
use crate::{axes, operators};
use std::collections::HashMap;
use std::marker::PhantomData;

/// Everything an expression can see while it runs: the focus (node, position
/// and size), the function library and the variable and prefix bindings.
///
/// `'a` is the document's lifetime and `'d` that of the borrowed bindings.
pub struct EvaluationContext<'a, 'd, N: DataSourceNode<'a>> {
    pub context_node: N,
    pub root_node: N,
    pub functions: &'d FunctionRegistry,
    /// 1-based.
    pub context_position: usize,
    pub context_size: usize,
    pub variables: &'d HashMap<String, XPathValue<N>>,
    pub namespaces: &'d HashMap<String, String>,
    _document: PhantomData<&'a ()>,
}

impl<'a, 'd, N: DataSourceNode<'a>> EvaluationContext<'a, 'd, N> {
    /// A context focused on `context_node` at position 1 of 1.
    pub fn new(
        context_node: N,
        root_node: N,
        functions: &'d FunctionRegistry,
        variables: &'d HashMap<String, XPathValue<N>>,
        namespaces: &'d HashMap<String, String>,
    ) -> Self {
        Self {
            context_node,
            root_node,
            functions,
            context_position: 1,
            context_size: 1,
            variables,
            namespaces,
            _document: PhantomData,
        }
    }

    pub fn with_focus(&self, node: N, position: usize, size: usize) -> Self {
        Self {
            context_node: node,
            context_position: position,
            context_size: size,
            ..*self
        }
    }

    /// The namespace URI bound to `prefix`. `xml` is always bound.
    pub fn resolve_prefix(&self, prefix: &str) -> Result<&'d str, XPathError> {
        match prefix {
            "xml" => Ok(crate::XML_NAMESPACE),
            _ => self
                .namespaces
                .get(prefix)
                .map(String::as_str)
                .ok_or_else(|| XPathError::UndefinedPrefix(prefix.to_string())),
        }
    }
}

pub fn evaluate<'a, N>(
    expr: &Expression,
    e_ctx: &EvaluationContext<'a, '_, N>,
) -> Result<XPathValue<N>, XPathError>
where
    N: DataSourceNode<'a> + 'a,
{
    let value = match expr {
        Expression::Literal(s) => XPathValue::String(s.clone()),
        Expression::Number(n) => XPathValue::Number(*n),
        Expression::Variable(name) => e_ctx
            .variables
            .get(name)
            .cloned()
            .ok_or_else(|| XPathError::UnknownVariable(name.clone()))?,
        Expression::LocationPath(path) => XPathValue::NodeSet(select(path, e_ctx)?),
        Expression::FunctionCall { name, args } => {
            let args = args
                .iter()
                .map(|arg| evaluate(arg, e_ctx))
                .collect::<Result<Vec<_>, _>>()?;
            functions::evaluate_function(name, args, e_ctx)?
        }
        Expression::Filter {
            primary,
            predicates,
        } => {
            let nodes = evaluate(primary, e_ctx)?.into_node_set("a predicate")?;
            XPathValue::NodeSet(filter(into_document_order(nodes), predicates, e_ctx)?)
        }
        Expression::UnaryOp {
            op: UnaryOperator::Minus,
            expr,
        } => XPathValue::Number(-evaluate(expr, e_ctx)?.to_number()),
        Expression::BinaryOp { left, op, right } => {
            let left = evaluate(left, e_ctx)?;
            match (op, left.to_bool()) {
                (BinaryOperator::Or, true) => XPathValue::Boolean(true),
                (BinaryOperator::And, false) => XPathValue::Boolean(false),
                _ => operators::evaluate(*op, left, evaluate(right, e_ctx)?)?,
            }
        }
    };
    Ok(value)
}

fn select<'a, N>(
    path: &LocationPath,
    e_ctx: &EvaluationContext<'a, '_, N>,
) -> Result<Vec<N>, XPathError>
where
    N: DataSourceNode<'a> + 'a,
{
    let mut nodes = match &path.start_point {
        Some(start) => evaluate(start, e_ctx)?.into_node_set("a path")?,
        None if path.is_absolute => vec![e_ctx.root_node],
        None => vec![e_ctx.context_node],
    };
    for step in &path.steps {
        nodes = step_from(step, &nodes, e_ctx)?;
    }
    Ok(nodes)
}

/// Applies one step to each input node on its own, so predicate positions
/// count along that node's axis, then merges the results in document order.
fn step_from<'a, N>(
    step: &Step,
    inputs: &[N],
    e_ctx: &EvaluationContext<'a, '_, N>,
) -> Result<Vec<N>, XPathError>
where
    N: DataSourceNode<'a> + 'a,
{
    let matcher = Matcher::resolve(&step.node_test, step.axis, e_ctx)?;
    let mut selected = Vec::new();
    for &input in inputs {
        let candidates: Vec<N> = axes::collect(step.axis, input)
            .into_iter()
            .filter(|&node| matcher.accepts(node))
            .collect();
        selected.extend(filter(candidates, &step.predicates, e_ctx)?);
    }
    if inputs.len() > 1 || step.axis.is_reverse() {
        selected = into_document_order(selected);
    }
    Ok(selected)
}

/// A node test with its prefix resolved for one step.
#[derive(Debug)]
enum Matcher<'t, 'd> {
    /// `*`, or a name test, against the axis' principal node type.
    Named {
        principal: NodeType,
        namespace: Option<&'d str>,
        local_part: Option<&'t str>,
        any_namespace: bool,
    },
    Kind(&'t NodeTypeTest),
}

impl<'t, 'd> Matcher<'t, 'd> {
    fn resolve<'a, N: DataSourceNode<'a>>(
        test: &'t NodeTest,
        axis: Axis,
        e_ctx: &EvaluationContext<'a, 'd, N>,
    ) -> Result<Self, XPathError> {
        let principal = match axis {
            Axis::Attribute => NodeType::Attribute,
            _ => NodeType::Element,
        };
        let named = |namespace: Option<&'d str>, local_part: Option<&'t str>, any_namespace| {
            Matcher::Named {
                principal,
                namespace,
                local_part,
                any_namespace,
            }
        };
        Ok(match test {
            NodeTest::Wildcard => named(None, None, true),
            NodeTest::NamespaceWildcard(prefix) => {
                named(Some(e_ctx.resolve_prefix(prefix)?), None, false)
            }
            NodeTest::Name(name) => {
                let namespace = match &name.prefix {
                    Some(prefix) => Some(e_ctx.resolve_prefix(prefix)?),
                    None => None,
                };
                named(namespace, Some(name.local_part.as_str()), false)
            }
            NodeTest::NodeType(kind) => Matcher::Kind(kind),
        })
    }

    fn accepts<'a, N: DataSourceNode<'a>>(&self, node: N) -> bool {
        match *self {
            Matcher::Named {
                principal,
                namespace,
                local_part,
                any_namespace,
            } => {
                node.node_type() == principal
                    && (any_namespace
                        || node.name().is_some_and(|q| {
                            q.namespace == namespace
                                && local_part.is_none_or(|local| q.local_part == local)
                        }))
            }
            Matcher::Kind(NodeTypeTest::Node) => true,
            Matcher::Kind(NodeTypeTest::Text) => node.node_type() == NodeType::Text,
            Matcher::Kind(NodeTypeTest::Comment) => node.node_type() == NodeType::Comment,
            Matcher::Kind(NodeTypeTest::ProcessingInstruction(target)) => {
                node.node_type() == NodeType::ProcessingInstruction
                    && target
                        .as_deref()
                        .is_none_or(|t| node.name().is_some_and(|q| q.local_part == t))
            }
        }
    }
}

/// Keeps the nodes every predicate holds for, in turn. Positions count in
/// the order `nodes` arrive in.
fn filter<'a, N>(
    mut nodes: Vec<N>,
    predicates: &[Expression],
    e_ctx: &EvaluationContext<'a, '_, N>,
) -> Result<Vec<N>, XPathError>
where
    N: DataSourceNode<'a> + 'a,
{
    for predicate in predicates {
        let size = nodes.len();
        let mut kept = Vec::with_capacity(size);
        for (position, node) in (1..).zip(nodes) {
            let focus = e_ctx.with_focus(node, position, size);
            let holds = match evaluate(predicate, &focus)? {
                XPathValue::Number(n) => n == position as f64,
                other => other.to_bool(),
            };
            if holds {
                kept.push(node);
            }
        }
        nodes = kept;
    }
    Ok(nodes)
}
