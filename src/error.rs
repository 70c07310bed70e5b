// src/error.rs
use scrapexpath_dom::ParseError as DocumentParseError;
use scrapexpath_xpath1::XPathError;
use thiserror::Error;

/// Why a query produced no results.
///
/// A query fails as a whole: there are no partial results.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum QueryError {
    /// The document text is not valid for its declared type.
    #[error("Parsing failed: {0}")]
    ParseError(#[from] DocumentParseError),

    /// The expression is malformed, refers to something undefined, or failed
    /// while being evaluated.
    #[error("XPath error: {0}")]
    ExpressionError(#[from] XPathError),
}
