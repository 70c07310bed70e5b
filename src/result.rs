//! Converting XPath values into the values a query returns.

use scrapexpath_xpath1::{DataSourceNode, XPathValue, format_number};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One matched value. Serializes as a bare JSON string, number or boolean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultValue {
    Text(String),
    Number(f64),
    Boolean(bool),
}

impl ResultValue {
    /// Flattens an evaluation result into a list of values.
    ///
    /// A node-set gives the string-value of each node in document order.
    /// A string, number or boolean gives exactly one value.
    pub fn from_xpath<'a, N: DataSourceNode<'a>>(value: XPathValue<N>) -> Vec<Self> {
        match value {
            XPathValue::NodeSet(nodes) => nodes
                .iter()
                .map(|node| ResultValue::Text(node.string_value()))
                .collect(),
            XPathValue::String(s) => vec![ResultValue::Text(s)],
            XPathValue::Number(n) => vec![ResultValue::Number(n)],
            XPathValue::Boolean(b) => vec![ResultValue::Boolean(b)],
        }
    }

    /// The value as an XPath variable binding.
    pub fn to_xpath<'a, N: DataSourceNode<'a>>(&self) -> XPathValue<N> {
        match self {
            ResultValue::Text(s) => XPathValue::String(s.clone()),
            ResultValue::Number(n) => XPathValue::Number(*n),
            ResultValue::Boolean(b) => XPathValue::Boolean(*b),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResultValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ResultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultValue::Text(s) => f.write_str(s),
            ResultValue::Number(n) => f.write_str(&format_number(*n)),
            ResultValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for ResultValue {
    fn from(s: &str) -> Self {
        ResultValue::Text(s.to_string())
    }
}

impl From<String> for ResultValue {
    fn from(s: String) -> Self {
        ResultValue::Text(s)
    }
}

impl From<f64> for ResultValue {
    fn from(n: f64) -> Self {
        ResultValue::Number(n)
    }
}

impl From<bool> for ResultValue {
    fn from(b: bool) -> Self {
        ResultValue::Boolean(b)
    }
}
