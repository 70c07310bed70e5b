//! Run XPath 1.0 expressions against XML and HTML documents.
//!
//! ```no_run
//! use scrapexpath::{DocumentType, query};
//!
//! let values = query("<a><b>1</b><b>2</b></a>", DocumentType::Xml, "//b/text()")?;
//! assert_eq!(values.len(), 2);
//! # Ok::<(), scrapexpath::QueryError>(())
//! ```

pub mod config;
pub mod error;
pub mod query;
pub mod result;

pub use config::{QueryOptions, SVG_NAMESPACE};
pub use error::QueryError;
pub use query::{DocumentQuery, Selector, parse_document, query};
pub use result::ResultValue;

pub use scrapexpath_dom::{Document, DocumentType, ParseError, ParseOptions};
pub use scrapexpath_xpath1::XPathError;
