use thiserror::Error;

/// The document text could not be parsed as the declared type.
///
/// Only XML parsing can fail. The HTML parser recovers from every error.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("XML parsing error: {0}")]
    Xml(#[from] roxmltree::Error),
}
