//! Parses XML and HTML text into one immutable tree model that the
//! `scrapexpath-xpath1` engine can query.

mod document;
mod error;
mod html;
mod xml;

pub use document::{Document, Node};
pub use error::ParseError;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Which parser to run over the document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DocumentType {
    /// Strict XML: malformed input is a [`ParseError`].
    #[default]
    Xml,
    /// HTML5 parsing with browser-style error recovery. Never fails.
    Html,
}

impl DocumentType {
    /// Picks the parser for an HTTP `Content-Type` value. Only `text/html`
    /// selects HTML; parameters such as `charset` are ignored.
    pub fn from_content_type(content_type: &str) -> Self {
        let mime = content_type.split(';').next().unwrap_or("").trim();
        if mime.eq_ignore_ascii_case("text/html") {
            DocumentType::Html
        } else {
            DocumentType::Xml
        }
    }

    /// Guesses from a file extension: `.html` and `.htm` are HTML.
    pub fn from_path(path: &Path) -> Self {
        let is_html = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"));
        if is_html {
            DocumentType::Html
        } else {
            DocumentType::Xml
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentType::Xml => f.write_str("xml"),
            DocumentType::Html => f.write_str("html"),
        }
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xml" => Ok(DocumentType::Xml),
            "html" => Ok(DocumentType::Html),
            other => Err(format!(
                "unknown document type '{}', expected 'xml' or 'html'",
                other
            )),
        }
    }
}

/// Parser settings. Only XML parsing looks at them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Accept a `<!DOCTYPE>` with an internal subset. External entities are
    /// never loaded either way.
    pub allow_dtd: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions { allow_dtd: true }
    }
}

impl ParseOptions {
    pub fn allow_dtd(mut self, allow: bool) -> Self {
        self.allow_dtd = allow;
        self
    }
}
