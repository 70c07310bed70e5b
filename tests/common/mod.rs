pub mod fixtures;

use scrapexpath::{DocumentType, QueryError, ResultValue, query};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Runs a query and renders each value the way the command line prints it.
pub fn select(text: &str, doc_type: DocumentType, expression: &str) -> Result<Vec<String>, QueryError> {
    let _ = env_logger::builder().is_test(true).try_init();
    let values = query(text, doc_type, expression)?;
    Ok(values.iter().map(ResultValue::to_string).collect())
}

pub fn select_xml(text: &str, expression: &str) -> Result<Vec<String>, QueryError> {
    select(text, DocumentType::Xml, expression)
}

pub fn select_html(text: &str, expression: &str) -> Result<Vec<String>, QueryError> {
    select(text, DocumentType::Html, expression)
}
