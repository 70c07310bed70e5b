//! Binary operators: comparisons, arithmetic and node-set union.

use crate::ast::BinaryOperator;
use crate::datasource::DataSourceNode;
use crate::value::{XPathValue, into_document_order, parse_number};
use crate::error::XPathError;
use std::cmp::Ordering;

/// Applies a binary operator to two already-evaluated operands.
///
/// `or` and `and` are accepted here too, but the engine short-circuits them
/// before both operands are evaluated.
pub fn evaluate<'a, N: DataSourceNode<'a>>(
    op: BinaryOperator,
    left: XPathValue<N>,
    right: XPathValue<N>,
) -> Result<XPathValue<N>, XPathError> {
    match op {
        BinaryOperator::Or => Ok(XPathValue::Boolean(left.to_bool() || right.to_bool())),
        BinaryOperator::And => Ok(XPathValue::Boolean(left.to_bool() && right.to_bool())),
        BinaryOperator::Equals => Ok(XPathValue::Boolean(equality(&left, &right, true))),
        BinaryOperator::NotEquals => Ok(XPathValue::Boolean(equality(&left, &right, false))),
        BinaryOperator::LessThan => Ok(relational(&left, &right, |o| o == Ordering::Less)),
        BinaryOperator::LessThanOrEqual => {
            Ok(relational(&left, &right, |o| o != Ordering::Greater))
        }
        BinaryOperator::GreaterThan => Ok(relational(&left, &right, |o| o == Ordering::Greater)),
        BinaryOperator::GreaterThanOrEqual => {
            Ok(relational(&left, &right, |o| o != Ordering::Less))
        }
        BinaryOperator::Plus => Ok(arithmetic(&left, &right, |a, b| a + b)),
        BinaryOperator::Minus => Ok(arithmetic(&left, &right, |a, b| a - b)),
        BinaryOperator::Multiply => Ok(arithmetic(&left, &right, |a, b| a * b)),
        BinaryOperator::Divide => Ok(arithmetic(&left, &right, |a, b| a / b)),
        // Rust's `%` on f64 truncates toward zero, which is what XPath `mod` wants.
        BinaryOperator::Modulo => Ok(arithmetic(&left, &right, |a, b| a % b)),
        BinaryOperator::Union => union(left, right),
    }
}

fn arithmetic<'a, N, F>(left: &XPathValue<N>, right: &XPathValue<N>, op: F) -> XPathValue<N>
where
    N: DataSourceNode<'a>,
    F: Fn(f64, f64) -> f64,
{
    XPathValue::Number(op(left.to_number(), right.to_number()))
}

fn union<'a, N: DataSourceNode<'a>>(
    left: XPathValue<N>,
    right: XPathValue<N>,
) -> Result<XPathValue<N>, XPathError> {
    match (left, right) {
        (XPathValue::NodeSet(mut l), XPathValue::NodeSet(r)) => {
            l.extend(r);
            Ok(XPathValue::NodeSet(into_document_order(l)))
        }
        (l, r) => Err(XPathError::TypeError(format!(
            "the union operator '|' needs two node-sets, got a {} and a {}",
            l.type_name(),
            r.type_name()
        ))),
    }
}

/// `=` (when `want_equal`) or `!=` following the XPath 1.0 comparison rules.
fn equality<'a, N: DataSourceNode<'a>>(
    left: &XPathValue<N>,
    right: &XPathValue<N>,
    want_equal: bool,
) -> bool {
    let test = |eq: bool| eq == want_equal;
    match (left, right) {
        (XPathValue::NodeSet(l), XPathValue::NodeSet(r)) => {
            let right_strings: Vec<String> = r.iter().map(|n| n.string_value()).collect();
            l.iter().any(|ln| {
                let ls = ln.string_value();
                right_strings.iter().any(|rs| test(ls == *rs))
            })
        }
        (XPathValue::NodeSet(nodes), other) | (other, XPathValue::NodeSet(nodes)) => match other {
            XPathValue::Boolean(b) => test(!nodes.is_empty() == *b),
            XPathValue::Number(n) => nodes
                .iter()
                .any(|node| test(parse_number(&node.string_value()) == *n)),
            XPathValue::String(s) => nodes.iter().any(|node| test(node.string_value() == *s)),
            XPathValue::NodeSet(_) => false,
        },
        (XPathValue::Boolean(_), _) | (_, XPathValue::Boolean(_)) => {
            test(left.to_bool() == right.to_bool())
        }
        (XPathValue::Number(_), _) | (_, XPathValue::Number(_)) => {
            test(left.to_number() == right.to_number())
        }
        _ => test(left.to_string() == right.to_string()),
    }
}

/// `<`, `<=`, `>`, `>=`: both sides are compared as numbers. Node-sets compare
/// existentially, node by node.
fn relational<'a, N, F>(left: &XPathValue<N>, right: &XPathValue<N>, accept: F) -> XPathValue<N>
where
    N: DataSourceNode<'a>,
    F: Fn(Ordering) -> bool,
{
    let numbers = |value: &XPathValue<N>| -> Vec<f64> {
        match value {
            XPathValue::NodeSet(nodes) => nodes
                .iter()
                .map(|n| parse_number(&n.string_value()))
                .collect(),
            other => vec![other.to_number()],
        }
    };

    // A node-set compared with a boolean is converted to a boolean first.
    let (left_numbers, right_numbers) = match (left, right) {
        (XPathValue::NodeSet(nodes), XPathValue::Boolean(b)) => {
            (vec![bool_number(!nodes.is_empty())], vec![bool_number(*b)])
        }
        (XPathValue::Boolean(b), XPathValue::NodeSet(nodes)) => {
            (vec![bool_number(*b)], vec![bool_number(!nodes.is_empty())])
        }
        _ => (numbers(left), numbers(right)),
    };

    let result = left_numbers.iter().any(|l| {
        right_numbers
            .iter()
            .any(|r| l.partial_cmp(r).is_some_and(&accept))
    });
    XPathValue::Boolean(result)
}

fn bool_number(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}
