//! Static checks run once on a parsed expression, before any document is seen.
//!
//! Everything reported here would otherwise surface only when evaluation
//! happened to reach the offending sub-expression, which for a predicate over
//! an empty node-set is never.

use crate::ast::{Expression, LocationPath, NodeTest};
use crate::error::XPathError;
use crate::functions::FunctionRegistry;
use std::collections::HashMap;

/// Checks function names and arities, namespace prefixes and variable references.
///
/// `has_variable` answers whether a variable of the given name will be bound
/// at evaluation time. The `xml` prefix is always considered bound.
pub fn validate<F>(
    expr: &Expression,
    functions: &FunctionRegistry,
    namespaces: &HashMap<String, String>,
    has_variable: F,
) -> Result<(), XPathError>
where
    F: Fn(&str) -> bool,
{
    Validator {
        functions,
        namespaces,
        has_variable: &has_variable,
    }
    .expression(expr)
}

struct Validator<'v> {
    functions: &'v FunctionRegistry,
    namespaces: &'v HashMap<String, String>,
    has_variable: &'v dyn Fn(&str) -> bool,
}

impl Validator<'_> {
    fn expression(&self, expr: &Expression) -> Result<(), XPathError> {
        match expr {
            Expression::Literal(_) | Expression::Number(_) => Ok(()),
            Expression::Variable(name) => {
                if (self.has_variable)(name) {
                    Ok(())
                } else {
                    Err(XPathError::UnknownVariable(name.clone()))
                }
            }
            Expression::FunctionCall { name, args } => {
                if let Some((prefix, _)) = name.split_once(':') {
                    // No extension functions are registered under any prefix.
                    self.prefix(prefix)?;
                }
                self.functions.check_call(name, args.len())?;
                args.iter().try_for_each(|arg| self.expression(arg))
            }
            Expression::Filter {
                primary,
                predicates,
            } => {
                self.expression(primary)?;
                predicates.iter().try_for_each(|p| self.expression(p))
            }
            Expression::LocationPath(path) => self.location_path(path),
            Expression::BinaryOp { left, right, .. } => {
                self.expression(left)?;
                self.expression(right)
            }
            Expression::UnaryOp { expr, .. } => self.expression(expr),
        }
    }

    fn location_path(&self, path: &LocationPath) -> Result<(), XPathError> {
        if let Some(start) = &path.start_point {
            self.expression(start)?;
        }
        for step in &path.steps {
            match &step.node_test {
                NodeTest::Name(name) => {
                    if let Some(prefix) = &name.prefix {
                        self.prefix(prefix)?;
                    }
                }
                NodeTest::NamespaceWildcard(prefix) => self.prefix(prefix)?,
                NodeTest::Wildcard | NodeTest::NodeType(_) => {}
            }
            for predicate in &step.predicates {
                self.expression(predicate)?;
            }
        }
        Ok(())
    }

    fn prefix(&self, prefix: &str) -> Result<(), XPathError> {
        if prefix == "xml" || self.namespaces.contains_key(prefix) {
            Ok(())
        } else {
            Err(XPathError::UndefinedPrefix(prefix.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expression;

    fn check(xpath: &str) -> Result<(), XPathError> {
        let mut namespaces = HashMap::new();
        namespaces.insert("svg".to_string(), "http://www.w3.org/2000/svg".to_string());
        let expr = parse_expression(xpath).unwrap();
        validate(&expr, &FunctionRegistry::default(), &namespaces, |name| {
            name == "limit"
        })
    }

    #[test]
    fn test_accepts_well_formed_expressions() {
        assert!(check("//svg:path/@d").is_ok());
        assert!(check("//p[position() < $limit]").is_ok());
        assert!(check("concat('a', 'b', 'c')").is_ok());
        assert!(check("//@xml:lang").is_ok());
        assert!(check("svg:*").is_ok());
    }

    #[test]
    fn test_rejects_undefined_prefixes() {
        assert_eq!(
            check("//ns:a"),
            Err(XPathError::UndefinedPrefix("ns".to_string()))
        );
        assert_eq!(
            check("//a[b/foo:*]"),
            Err(XPathError::UndefinedPrefix("foo".to_string()))
        );
    }

    #[test]
    fn test_rejects_unknown_functions_and_bad_arity() {
        assert!(matches!(
            check("frobnicate(//a)"),
            Err(XPathError::FunctionError { .. })
        ));
        assert!(matches!(
            check("count()"),
            Err(XPathError::FunctionError { .. })
        ));
        // Checked even where evaluation would never reach it.
        assert!(matches!(
            check("//missing[substring('x')]"),
            Err(XPathError::FunctionError { .. })
        ));
    }

    #[test]
    fn test_rejects_unbound_variables() {
        assert_eq!(
            check("$nope + 1"),
            Err(XPathError::UnknownVariable("nope".to_string()))
        );
    }
}
