//! An XPath 1.0 engine written against the [`DataSourceNode`] trait.
//!
//! Expressions are parsed once with [`parse_expression`], checked with
//! [`validate`], and evaluated any number of times with [`evaluate`].

pub mod ast;
pub mod axes;
pub mod datasource;
pub mod engine;
pub mod error;
pub mod functions;
pub mod operators;
pub mod parser;
pub mod validate;
pub mod value;

pub use ast::{Axis, BinaryOperator, Expression, LocationPath, NameTest, NodeTest, Step};
pub use datasource::{DataSourceNode, NodeType, QName};
pub use engine::{EvaluationContext, evaluate};
pub use functions::FunctionRegistry;

pub use error::XPathError;
pub use parser::parse_expression;
pub use validate::validate;
pub use value::{XPathValue, format_number, parse_number};

/// The namespace URI the `xml` prefix is permanently bound to.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";
