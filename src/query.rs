// src/query.rs
use crate::config::QueryOptions;
use crate::error::QueryError;
use crate::result::ResultValue;
use scrapexpath_dom::{Document, DocumentType, Node};
use scrapexpath_xpath1::{
    EvaluationContext, Expression, FunctionRegistry, XPathValue, evaluate, parse_expression,
    validate,
};
use std::collections::HashMap;

/// A parsed and validated XPath expression, ready to run against any number
/// of documents.
#[derive(Debug, Clone)]
pub struct Selector {
    source: String,
    expression: Expression,
    functions: FunctionRegistry,
    namespaces: HashMap<String, String>,
    variables: HashMap<String, ResultValue>,
}

impl Selector {
    /// Compiles `expression` with the default options.
    pub fn new(expression: &str) -> Result<Self, QueryError> {
        Self::with_options(expression, &QueryOptions::default())
    }

    /// Compiles `expression`, checking its functions, namespace prefixes and
    /// variables against `options`.
    pub fn with_options(expression: &str, options: &QueryOptions) -> Result<Self, QueryError> {
        let parsed = parse_expression(expression)?;
        let functions = FunctionRegistry::default();
        validate(&parsed, &functions, &options.namespaces, |name| {
            options.variables.contains_key(name)
        })?;
        log::debug!("Compiled XPath expression '{}'", expression);
        Ok(Self {
            source: expression.to_string(),
            expression: parsed,
            functions,
            namespaces: options.namespaces.clone(),
            variables: options.variables.clone(),
        })
    }

    /// The expression text this selector was compiled from.
    pub fn expression(&self) -> &str {
        &self.source
    }

    /// Evaluates against `document` with its root as the context node.
    pub fn select(&self, document: &Document) -> Result<Vec<ResultValue>, QueryError> {
        let root = document.root();
        let variables: HashMap<String, XPathValue<Node<'_>>> = self
            .variables
            .iter()
            .map(|(name, value)| (name.clone(), value.to_xpath()))
            .collect();
        let e_ctx = EvaluationContext::new(
            root,
            root,
            &self.functions,
            &variables,
            &self.namespaces,
        );
        let value = evaluate(&self.expression, &e_ctx)?;
        log::trace!("'{}' evaluated to a {}", self.source, value.type_name());
        Ok(ResultValue::from_xpath(value))
    }
}

/// Runs queries with one set of options.
#[derive(Debug, Clone, Default)]
pub struct DocumentQuery {
    options: QueryOptions,
}

impl DocumentQuery {
    pub fn new(options: QueryOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    /// Parses `text` as `doc_type` and evaluates `expression` against it.
    ///
    /// The expression is compiled first, so an invalid expression is reported
    /// as an `ExpressionError` even when the document is malformed too.
    pub fn query(
        &self,
        text: &str,
        doc_type: DocumentType,
        expression: &str,
    ) -> Result<Vec<ResultValue>, QueryError> {
        let selector = Selector::with_options(expression, &self.options)?;
        let document = parse_document(text, doc_type, &self.options)?;
        let results = selector.select(&document)?;
        log::debug!(
            "'{}' matched {} value(s) in a {} document",
            expression,
            results.len(),
            doc_type
        );
        Ok(results)
    }
}

/// Parses `text` into a [`Document`] using the parse settings in `options`.
pub fn parse_document(
    text: &str,
    doc_type: DocumentType,
    options: &QueryOptions,
) -> Result<Document, QueryError> {
    Ok(Document::parse_with(text, doc_type, &options.parse)?)
}

/// Evaluates `expression` against `text` with the default options.
pub fn query(
    text: &str,
    doc_type: DocumentType,
    expression: &str,
) -> Result<Vec<ResultValue>, QueryError> {
    DocumentQuery::default().query(text, doc_type, expression)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(values: &[ResultValue]) -> Vec<&str> {
        values.iter().filter_map(ResultValue::as_text).collect()
    }

    #[test]
    fn test_query_types_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Selector>();
        assert_send_sync::<QueryOptions>();
        assert_send_sync::<DocumentQuery>();
        assert_send_sync::<Document>();
    }

    #[test]
    fn test_selector_is_reusable_across_documents() {
        let selector = Selector::new("//b").unwrap();
        assert_eq!(selector.expression(), "//b");

        let first = Document::parse("<a><b>1</b></a>", DocumentType::Xml).unwrap();
        let second = Document::parse("<b>x</b><b>y</b>", DocumentType::Html).unwrap();
        assert_eq!(texts(&selector.select(&first).unwrap()), vec!["1"]);
        assert_eq!(texts(&selector.select(&second).unwrap()), vec!["x", "y"]);
    }

    #[test]
    fn test_expression_is_checked_before_document() {
        let err = query("<a><b>", DocumentType::Xml, "//a[").unwrap_err();
        assert!(matches!(err, QueryError::ExpressionError(_)));

        let err = query("<a><b>", DocumentType::Xml, "//a").unwrap_err();
        assert!(matches!(err, QueryError::ParseError(_)));
    }

    #[test]
    fn test_variables_are_bound() {
        let options = QueryOptions::default().with_variable("want", "y");
        let results = DocumentQuery::new(options)
            .query("<a><b>x</b><b>y</b></a>", DocumentType::Xml, "//b[. = $want]")
            .unwrap();
        assert_eq!(texts(&results), vec!["y"]);

        let err = Selector::new("$want").unwrap_err();
        assert!(matches!(err, QueryError::ExpressionError(_)));
    }

    #[test]
    fn test_custom_namespace_binding() {
        let options = QueryOptions::default().with_namespace("f", "urn:feed");
        let results = DocumentQuery::new(options)
            .query(
                r#"<feed xmlns="urn:feed"><title>T</title></feed>"#,
                DocumentType::Xml,
                "/f:feed/f:title",
            )
            .unwrap();
        assert_eq!(texts(&results), vec!["T"]);
    }
}
