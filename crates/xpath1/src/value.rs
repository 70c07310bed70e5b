//! The four XPath 1.0 value types and the conversions between them.

use crate::datasource::DataSourceNode;
use crate::error::XPathError;
use std::fmt;

/// The result of evaluating an expression.
///
/// Node-sets built by the evaluator are in document order without duplicates.
#[derive(Debug, Clone)]
pub enum XPathValue<N> {
    NodeSet(Vec<N>),
    String(String),
    Number(f64),
    Boolean(bool),
}

impl<'a, N: DataSourceNode<'a>> XPathValue<N> {
    /// `boolean()`: non-empty node-sets and strings are true, and so is any
    /// number other than zero and NaN.
    pub fn to_bool(&self) -> bool {
        match self {
            XPathValue::Boolean(b) => *b,
            XPathValue::Number(n) => !(n.is_nan() || *n == 0.0),
            XPathValue::String(s) => !s.is_empty(),
            XPathValue::NodeSet(nodes) => !nodes.is_empty(),
        }
    }

    /// `number()`. A node-set goes through the string-value of its first node.
    pub fn to_number(&self) -> f64 {
        match self {
            XPathValue::Number(n) => *n,
            XPathValue::Boolean(true) => 1.0,
            XPathValue::Boolean(false) => 0.0,
            XPathValue::String(s) => parse_number(s),
            XPathValue::NodeSet(_) => parse_number(&self.to_string()),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            XPathValue::NodeSet(_) => "node-set",
            XPathValue::String(_) => "string",
            XPathValue::Number(_) => "number",
            XPathValue::Boolean(_) => "boolean",
        }
    }

    /// Unwraps a node-set. `what` names the construct that needed one.
    pub fn into_node_set(self, what: &str) -> Result<Vec<N>, XPathError> {
        match self {
            XPathValue::NodeSet(nodes) => Ok(nodes),
            other => Err(XPathError::TypeError(format!(
                "{} needs a node-set, got a {}",
                what,
                other.type_name()
            ))),
        }
    }
}

/// `string()`: an empty node-set is the empty string.
impl<'a, N: DataSourceNode<'a>> fmt::Display for XPathValue<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XPathValue::NodeSet(nodes) => match nodes.first() {
                Some(node) => f.write_str(&node.string_value()),
                None => Ok(()),
            },
            XPathValue::String(s) => f.write_str(s),
            XPathValue::Number(n) => f.write_str(&format_number(*n)),
            XPathValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// Sorts nodes into document order and drops duplicates.
pub fn into_document_order<'a, N: DataSourceNode<'a>>(mut nodes: Vec<N>) -> Vec<N> {
    nodes.sort_unstable();
    nodes.dedup();
    nodes
}

/// Reads a number using the XPath 1.0 `Number` grammar with an optional
/// leading minus. Exponents, a leading `+` and anything else give NaN.
pub fn parse_number(s: &str) -> f64 {
    let text = s.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\r' | '\n'));
    let digits = text.strip_prefix('-').unwrap_or(text);
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    let has_digits = !whole.is_empty() || !fraction.is_empty();
    let well_formed = has_digits
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit());
    if well_formed {
        text.parse().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

/// Writes a number the way `string()` does: plain decimal notation, integers
/// without a fractional part, negative zero as `0`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n < 0.0 { "-" } else { "" };
        format!("{sign}Infinity")
    } else if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}
