use thiserror::Error;

/// Errors raised while parsing, validating, or evaluating an expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum XPathError {
    /// The expression text and what went wrong where.
    #[error("Invalid XPath expression '{0}': {1}")]
    XPathParse(String, String),

    /// Unknown function, wrong arity, or a bad argument.
    #[error("Function '{function}': {message}")]
    FunctionError { function: String, message: String },

    #[error("Type error: {0}")]
    TypeError(String),

    #[error("Unbound variable '${0}'")]
    UnknownVariable(String),

    #[error("Undefined namespace prefix: {0}")]
    UndefinedPrefix(String),
}
