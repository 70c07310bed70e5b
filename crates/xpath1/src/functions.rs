//! The XPath 1.0 core function library.

use crate::datasource::{DataSourceNode, NodeType, QName};
use crate::engine::EvaluationContext;
use crate::value::{XPathValue, into_document_order, parse_number};
use crate::error::XPathError;
use std::collections::{HashMap, HashSet};
use std::vec;

/// How many arguments a function accepts. `max` of `None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    pub min: usize,
    pub max: Option<usize>,
}

impl Arity {
    pub const fn exactly(n: usize) -> Self {
        Arity {
            min: n,
            max: Some(n),
        }
    }

    pub const fn between(min: usize, max: usize) -> Self {
        Arity {
            min,
            max: Some(max),
        }
    }

    pub const fn at_least(min: usize) -> Self {
        Arity { min, max: None }
    }

    pub fn accepts(&self, count: usize) -> bool {
        count >= self.min && self.max.is_none_or(|max| count <= max)
    }

    fn describe(&self) -> String {
        match self.max {
            Some(max) if max == self.min => format!("{} argument(s)", self.min),
            Some(max) => format!("{} to {} arguments", self.min, max),
            None => format!("at least {} arguments", self.min),
        }
    }
}

const CORE_FUNCTIONS: &[(&str, Arity)] = &[
    // node-set
    ("last", Arity::exactly(0)),
    ("position", Arity::exactly(0)),
    ("count", Arity::exactly(1)),
    ("id", Arity::exactly(1)),
    ("local-name", Arity::between(0, 1)),
    ("namespace-uri", Arity::between(0, 1)),
    ("name", Arity::between(0, 1)),
    // string
    ("string", Arity::between(0, 1)),
    ("concat", Arity::at_least(2)),
    ("starts-with", Arity::exactly(2)),
    ("contains", Arity::exactly(2)),
    ("substring-before", Arity::exactly(2)),
    ("substring-after", Arity::exactly(2)),
    ("substring", Arity::between(2, 3)),
    ("string-length", Arity::between(0, 1)),
    ("normalize-space", Arity::between(0, 1)),
    ("translate", Arity::exactly(3)),
    // boolean
    ("boolean", Arity::exactly(1)),
    ("not", Arity::exactly(1)),
    ("true", Arity::exactly(0)),
    ("false", Arity::exactly(0)),
    ("lang", Arity::exactly(1)),
    // number
    ("number", Arity::between(0, 1)),
    ("sum", Arity::exactly(1)),
    ("floor", Arity::exactly(1)),
    ("ceiling", Arity::exactly(1)),
    ("round", Arity::exactly(1)),
];

/// The names and arities of the functions an expression may call.
#[derive(Debug, Clone)]
pub struct FunctionRegistry {
    functions: HashMap<&'static str, Arity>,
}

impl FunctionRegistry {
    /// An empty registry. [`FunctionRegistry::default`] has the core library.
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    pub fn register(&mut self, name: &'static str, arity: Arity) {
        self.functions.insert(name, arity);
    }

    pub fn get(&self, name: &str) -> Option<Arity> {
        self.functions.get(name).copied()
    }

    /// Checks that `name` exists and accepts `arg_count` arguments.
    pub fn check_call(&self, name: &str, arg_count: usize) -> Result<(), XPathError> {
        let arity = self
            .get(name)
            .ok_or_else(|| function_error(name, "Unknown XPath function".to_string()))?;
        if arity.accepts(arg_count) {
            Ok(())
        } else {
            Err(function_error(
                &format!("{}()", name),
                format!("Expected {}, got {}", arity.describe(), arg_count),
            ))
        }
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        let mut registry = Self::new();
        for &(name, arity) in CORE_FUNCTIONS {
            registry.register(name, arity);
        }
        registry
    }
}

fn function_error(function: &str, message: String) -> XPathError {
    XPathError::FunctionError {
        function: function.to_string(),
        message,
    }
}

/// The evaluated arguments of one call, consumed left to right.
struct Call<'c, 'a, 'd, N: DataSourceNode<'a>> {
    name: &'c str,
    args: vec::IntoIter<XPathValue<N>>,
    e_ctx: &'c EvaluationContext<'a, 'd, N>,
}

impl<'c, 'a, 'd, N: DataSourceNode<'a>> Call<'c, 'a, 'd, N> {
    fn value(&mut self) -> Option<XPathValue<N>> {
        self.args.next()
    }

    fn string(&mut self) -> String {
        self.args.next().map(|v| v.to_string()).unwrap_or_default()
    }

    fn number(&mut self) -> f64 {
        self.args.next().map_or(f64::NAN, |v| v.to_number())
    }

    fn boolean(&mut self) -> bool {
        self.args.next().is_some_and(|v| v.to_bool())
    }

    /// The argument as a string, or the context node's string-value when omitted.
    fn string_or_context(&mut self) -> String {
        match self.args.next() {
            Some(v) => v.to_string(),
            None => self.e_ctx.context_node.string_value(),
        }
    }

    fn node_set(&mut self) -> Result<Vec<N>, XPathError> {
        match self.args.next() {
            Some(XPathValue::NodeSet(nodes)) => Ok(nodes),
            other => Err(self.not_a_node_set(other)),
        }
    }

    /// The first node of the argument in document order, or the context node
    /// when the argument is omitted. `None` for an empty node-set.
    fn node_or_context(&mut self) -> Result<Option<N>, XPathError> {
        match self.args.next() {
            None => Ok(Some(self.e_ctx.context_node)),
            Some(XPathValue::NodeSet(nodes)) => Ok(nodes.into_iter().min()),
            other => Err(self.not_a_node_set(other)),
        }
    }

    fn not_a_node_set(&self, got: Option<XPathValue<N>>) -> XPathError {
        XPathError::TypeError(format!(
            "{}() expects a node-set, got a {}",
            self.name,
            got.map_or("nothing", |v| v.type_name())
        ))
    }

    fn name_of_node(&mut self) -> Result<Option<QName<'a>>, XPathError> {
        Ok(self.node_or_context()?.and_then(|n| n.name()))
    }
}

/// Calls the core function `name`. The arity is checked against the
/// context's registry first.
pub fn evaluate_function<'a, 'd, N: DataSourceNode<'a>>(
    name: &str,
    args: Vec<XPathValue<N>>,
    e_ctx: &EvaluationContext<'a, 'd, N>,
) -> Result<XPathValue<N>, XPathError> {
    e_ctx.functions.check_call(name, args.len())?;
    let mut call = Call {
        name,
        args: args.into_iter(),
        e_ctx,
    };

    let value = match name {
        "last" => XPathValue::Number(e_ctx.context_size as f64),
        "position" => XPathValue::Number(e_ctx.context_position as f64),
        "count" => XPathValue::Number(call.node_set()?.len() as f64),
        "id" => XPathValue::NodeSet(elements_by_id(call.value(), e_ctx.root_node)),
        "local-name" => XPathValue::String(
            call.name_of_node()?
                .map(|q| q.local_part.to_string())
                .unwrap_or_default(),
        ),
        "namespace-uri" => XPathValue::String(
            call.name_of_node()?
                .and_then(|q| q.namespace)
                .unwrap_or_default()
                .to_string(),
        ),
        "name" => XPathValue::String(call.name_of_node()?.map(qualified_name).unwrap_or_default()),

        "string" => XPathValue::String(call.string_or_context()),
        "concat" => XPathValue::String(call.args.by_ref().map(|v| v.to_string()).collect()),
        "starts-with" => {
            let (s, prefix) = (call.string(), call.string());
            XPathValue::Boolean(s.starts_with(&prefix))
        }
        "contains" => {
            let (s, needle) = (call.string(), call.string());
            XPathValue::Boolean(s.contains(&needle))
        }
        "substring-before" => {
            let (s, separator) = (call.string(), call.string());
            let before = s.split_once(separator.as_str()).map(|(before, _)| before);
            XPathValue::String(before.unwrap_or_default().to_string())
        }
        "substring-after" => {
            let (s, separator) = (call.string(), call.string());
            let after = s.split_once(separator.as_str()).map(|(_, after)| after);
            XPathValue::String(after.unwrap_or_default().to_string())
        }
        "substring" => {
            let s = call.string();
            let start = call.number();
            let length = call.value().map(|v| v.to_number());
            XPathValue::String(substring(&s, start, length))
        }
        "string-length" => XPathValue::Number(call.string_or_context().chars().count() as f64),
        "normalize-space" => XPathValue::String(normalize_space(&call.string_or_context())),
        "translate" => {
            let (s, from, to) = (call.string(), call.string(), call.string());
            XPathValue::String(translate(&s, &from, &to))
        }

        "boolean" => XPathValue::Boolean(call.boolean()),
        "not" => XPathValue::Boolean(!call.boolean()),
        "true" => XPathValue::Boolean(true),
        "false" => XPathValue::Boolean(false),
        "lang" => XPathValue::Boolean(in_language(&call.string(), e_ctx.context_node)),

        "number" => XPathValue::Number(match call.value() {
            Some(v) => v.to_number(),
            None => parse_number(&e_ctx.context_node.string_value()),
        }),
        "sum" => XPathValue::Number(
            call.node_set()?
                .iter()
                .map(|n| parse_number(&n.string_value()))
                .sum(),
        ),
        "floor" => XPathValue::Number(call.number().floor()),
        "ceiling" => XPathValue::Number(call.number().ceil()),
        "round" => XPathValue::Number(round(call.number())),

        _ => {
            return Err(function_error(
                name,
                "Registered but not implemented".to_string(),
            ));
        }
    };
    Ok(value)
}

fn qualified_name(q: QName<'_>) -> String {
    match q.prefix {
        Some(prefix) => format!("{}:{}", prefix, q.local_part),
        None => q.local_part.to_string(),
    }
}

fn is_xml_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Characters at 1-based positions `p` with
/// `round(start) <= p < round(start) + round(length)`. NaN bounds select nothing.
fn substring(s: &str, start: f64, length: Option<f64>) -> String {
    let from = round(start);
    let to = length.map_or(f64::INFINITY, |len| from + round(len));
    s.chars()
        .zip(1u32..)
        .filter(|&(_, position)| {
            let position = f64::from(position);
            position >= from && position < to
        })
        .map(|(c, _)| c)
        .collect()
}

fn normalize_space(s: &str) -> String {
    let mut normalized = String::with_capacity(s.len());
    for word in s.split(is_xml_space).filter(|w| !w.is_empty()) {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(word);
    }
    normalized
}

/// Replaces each character of `from` with the one at the same index in `to`,
/// deleting it when `to` is shorter. A repeated `from` character keeps its
/// first mapping.
fn translate(s: &str, from: &str, to: &str) -> String {
    let mut replacements = to.chars();
    let mut mapping: HashMap<char, Option<char>> = HashMap::new();
    for c in from.chars() {
        let replacement = replacements.next();
        mapping.entry(c).or_insert(replacement);
    }
    s.chars()
        .filter_map(|c| mapping.get(&c).copied().unwrap_or(Some(c)))
        .collect()
}

/// Half-way values round toward positive infinity. NaN, the infinities and
/// zero come back unchanged.
fn round(n: f64) -> f64 {
    if n.is_finite() && n != 0.0 {
        (n + 0.5).floor()
    } else {
        n
    }
}

/// `id()`: elements carrying an `id` or `xml:id` attribute equal to one of
/// the whitespace-separated tokens. No DTD is read, so these two attribute
/// names are the only IDs.
fn elements_by_id<'a, N: DataSourceNode<'a>>(arg: Option<XPathValue<N>>, root: N) -> Vec<N> {
    let tokens = match arg {
        Some(XPathValue::NodeSet(nodes)) => nodes
            .iter()
            .map(|n| n.string_value())
            .collect::<Vec<_>>()
            .join(" "),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    let wanted: HashSet<&str> = tokens.split(is_xml_space).filter(|t| !t.is_empty()).collect();
    if wanted.is_empty() {
        return Vec::new();
    }

    let mut found = Vec::new();
    let mut pending: Vec<N> = root.children().collect();
    while let Some(node) = pending.pop() {
        if node.node_type() == NodeType::Element
            && node
                .attributes()
                .any(|attr| is_id_attribute(attr) && wanted.contains(attr.string_value().as_str()))
        {
            found.push(node);
        }
        pending.extend(node.children());
    }
    into_document_order(found)
}

fn is_id_attribute<'a, N: DataSourceNode<'a>>(attr: N) -> bool {
    attr.name().is_some_and(|q| {
        q.local_part == "id" && q.namespace.is_none_or(|ns| ns == crate::XML_NAMESPACE)
    })
}

/// `lang()`: the nearest `xml:lang` on the context node or its ancestors
/// equals `wanted`, or starts with it followed by `-`, ignoring case.
fn in_language<'a, N: DataSourceNode<'a>>(wanted: &str, context: N) -> bool {
    let wanted = wanted.to_lowercase();
    let mut current = Some(context);
    while let Some(node) = current {
        let declared = node.attributes().find(|attr| {
            attr.name().is_some_and(|q| {
                q.local_part == "lang" && q.namespace == Some(crate::XML_NAMESPACE)
            })
        });
        if let Some(attr) = declared {
            let declared = attr.string_value().to_lowercase();
            return declared
                .strip_prefix(wanted.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('-'));
        }
        current = node.parent();
    }
    false
}
