// src/config.rs
use crate::result::ResultValue;
use scrapexpath_dom::ParseOptions;
use std::collections::HashMap;

/// The SVG namespace, bound to `svg` by default so HTML pages with inline
/// SVG can be queried with `//svg:path`.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Settings shared by every query made with them.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOptions {
    /// Prefix to namespace URI bindings for name tests. `xml` is always bound.
    pub namespaces: HashMap<String, String>,
    /// Values for `$name` references.
    pub variables: HashMap<String, ResultValue>,
    pub parse: ParseOptions,
}

impl Default for QueryOptions {
    fn default() -> Self {
        let mut namespaces = HashMap::new();
        namespaces.insert("svg".to_string(), SVG_NAMESPACE.to_string());
        Self {
            namespaces,
            variables: HashMap::new(),
            parse: ParseOptions::default(),
        }
    }
}

impl QueryOptions {
    pub fn new() -> Self {
        Default::default()
    }

    /// Binds `prefix` to `uri`, replacing any earlier binding.
    pub fn with_namespace(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.namespaces.insert(prefix.into(), uri.into());
        self
    }

    /// Makes `value` available to expressions as `$name`.
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<ResultValue>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }

    /// Drops the default `svg` binding.
    pub fn without_default_namespaces(mut self) -> Self {
        self.namespaces.clear();
        self
    }
}
