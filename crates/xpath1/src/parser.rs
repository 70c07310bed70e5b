//! A `nom` parser for XPath 1.0 expressions.
//!
//! Binary operators are handled by precedence climbing over
//! [`BinaryOperator::precedence`]; everything from unary minus down follows
//! the grammar productions directly. Once a construct is unambiguous (after
//! an operator, an opening bracket, or a quote) the parser commits with
//! `cut`, so errors point at the offending token instead of the start of
//! the expression.

use crate::ast::{
    Axis, BinaryOperator, Expression, LocationPath, NameTest, NodeTest, NodeTypeTest, Step,
    UnaryOperator,
};
use crate::error::XPathError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, multispace0, satisfy},
    combinator::{cut, map, map_opt, map_res, not, opt, recognize, value, verify},
    error::{Error, ErrorKind},
    multi::{many0, many0_count, separated_list0},
    sequence::{delimited, pair, preceded, terminated},
};

type ParseResult<'a, T> = IResult<&'a str, T>;

/// Deepest `(` and `[` nesting accepted. Each level costs several parser frames.
const MAX_NESTING: usize = 32;

/// Deepest expression tree accepted, and the longest operator chain on one level.
const MAX_DEPTH: usize = 256;

fn too_deep<'a, T>(input: &'a str) -> ParseResult<'a, T> {
    Err(nom::Err::Failure(Error::new(input, ErrorKind::TooLarge)))
}

/// Parses a complete XPath 1.0 expression. Trailing input is an error.
pub fn parse_expression(input: &str) -> Result<Expression, XPathError> {
    let fail = |rest: &str| XPathError::XPathParse(input.to_string(), describe_position(input, rest));
    let too_deep = || {
        XPathError::XPathParse(
            input.to_string(),
            format!("expression nests deeper than {} levels", MAX_DEPTH),
        )
    };
    check_nesting(input)?;
    match expr(input) {
        Ok((rest, _)) if !rest.trim().is_empty() => Err(fail(rest)),
        Ok((_, parsed)) if parsed.depth() > MAX_DEPTH => Err(too_deep()),
        Ok((_, parsed)) => Ok(parsed),
        Err(nom::Err::Failure(e)) if e.code == ErrorKind::TooLarge => Err(too_deep()),
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => Err(fail(e.input)),
        Err(nom::Err::Incomplete(_)) => Err(fail("")),
    }
}

/// Rejects bracket nesting past [`MAX_NESTING`] before the recursive parser sees it.
fn check_nesting(input: &str) -> Result<(), XPathError> {
    let mut depth = 0usize;
    let mut quote = None;
    for (offset, c) in input.char_indices() {
        match (quote, c) {
            (Some(open), _) if c == open => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, '(' | '[') => {
                depth += 1;
                if depth > MAX_NESTING {
                    return Err(XPathError::XPathParse(
                        input.to_string(),
                        format!("brackets nest deeper than {} levels at offset {}", MAX_NESTING, offset),
                    ));
                }
            }
            (None, ')' | ']') => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

fn describe_position(input: &str, rest: &str) -> String {
    let rest = rest.trim_start();
    if rest.is_empty() {
        return "unexpected end of expression".to_string();
    }
    let token: String = rest.chars().take(16).collect();
    format!("unexpected '{}' at offset {}", token, input.len() - rest.len())
}

fn ws<'a, P>(inner: P) -> impl Parser<&'a str, Output = P::Output, Error = Error<&'a str>>
where
    P: Parser<&'a str, Error = Error<&'a str>>,
{
    delimited(multispace0, inner, multispace0)
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.')
}

/// `or`, `and`, `div` and `mod` are only operators when no name character follows.
fn keyword<'a>(word: &'static str) -> impl Parser<&'a str, Output = &'a str, Error = Error<&'a str>> {
    terminated(tag(word), not(satisfy(is_name_char)))
}

// Expressions

fn expr(input: &str) -> ParseResult<'_, Expression> {
    binary_expr(input, 1)
}

fn binary_operator(input: &str) -> ParseResult<'_, BinaryOperator> {
    alt((
        value(BinaryOperator::Or, keyword("or")),
        value(BinaryOperator::And, keyword("and")),
        value(BinaryOperator::NotEquals, tag("!=")),
        value(BinaryOperator::Equals, char('=')),
        value(BinaryOperator::LessThanOrEqual, tag("<=")),
        value(BinaryOperator::LessThan, char('<')),
        value(BinaryOperator::GreaterThanOrEqual, tag(">=")),
        value(BinaryOperator::GreaterThan, char('>')),
        // Entity spellings, as written inside XML attribute values.
        value(BinaryOperator::LessThanOrEqual, tag("&lt;=")),
        value(BinaryOperator::LessThan, tag("&lt;")),
        value(BinaryOperator::GreaterThanOrEqual, tag("&gt;=")),
        value(BinaryOperator::GreaterThan, tag("&gt;")),
        value(BinaryOperator::Plus, char('+')),
        value(BinaryOperator::Minus, char('-')),
        value(BinaryOperator::Multiply, char('*')),
        value(BinaryOperator::Divide, keyword("div")),
        value(BinaryOperator::Modulo, keyword("mod")),
    ))
    .parse(input)
}

/// Parses operands joined by operators that bind at least as tightly as `min_precedence`.
fn binary_expr(input: &str, min_precedence: u8) -> ParseResult<'_, Expression> {
    let (mut input, mut left) = unary_expr(input)?;
    let mut operators = 0;
    loop {
        let Ok((after_op, op)) = ws(binary_operator).parse(input) else {
            break;
        };
        let precedence = op.precedence();
        if precedence < min_precedence {
            break;
        }
        operators += 1;
        if operators > MAX_DEPTH {
            return too_deep(input);
        }
        // An operator must be followed by an operand.
        let (rest, right) = match binary_expr(after_op, precedence + 1) {
            Err(nom::Err::Error(e)) => return Err(nom::Err::Failure(e)),
            other => other?,
        };
        left = Expression::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        };
        input = rest;
    }
    Ok((input, left))
}

fn unary_expr(input: &str) -> ParseResult<'_, Expression> {
    let (input, negations) = many0_count(ws(char('-'))).parse(input)?;
    if negations > MAX_DEPTH {
        return too_deep(input);
    }
    let (input, operand) = union_expr(input)?;
    let negated = (0..negations).fold(operand, |operand, _| Expression::UnaryOp {
        op: UnaryOperator::Minus,
        expr: Box::new(operand),
    });
    Ok((input, negated))
}

fn union_expr(input: &str) -> ParseResult<'_, Expression> {
    let (input, first) = path_expr(input)?;
    let (input, rest) = many0(preceded(ws(char('|')), cut(path_expr))).parse(input)?;
    if rest.len() > MAX_DEPTH {
        return too_deep(input);
    }
    let union = rest.into_iter().fold(first, |left, right| Expression::BinaryOp {
        left: Box::new(left),
        op: BinaryOperator::Union,
        right: Box::new(right),
    });
    Ok((input, union))
}

fn path_expr(input: &str) -> ParseResult<'_, Expression> {
    ws(alt((
        filter_path,
        map(location_path, Expression::LocationPath),
    )))
    .parse(input)
}

/// A primary expression with optional predicates and trailing steps:
/// `$v`, `(//a)[1]`, `id('x')//b`.
fn filter_path(input: &str) -> ParseResult<'_, Expression> {
    let (input, primary) = primary_expr(input)?;
    let (input, predicates) = many0(predicate).parse(input)?;
    let (input, steps) = relative_steps(input)?;

    let start = if predicates.is_empty() {
        primary
    } else {
        Expression::Filter {
            primary: Box::new(primary),
            predicates,
        }
    };
    if steps.is_empty() {
        return Ok((input, start));
    }
    Ok((
        input,
        Expression::LocationPath(LocationPath {
            start_point: Some(Box::new(start)),
            is_absolute: false,
            steps,
        }),
    ))
}

fn primary_expr(input: &str) -> ParseResult<'_, Expression> {
    alt((
        map(preceded(char('$'), q_name), Expression::Variable),
        map(number_literal, Expression::Number),
        map(string_literal, Expression::Literal),
        function_call,
        preceded(char('('), cut(terminated(expr, ws(char(')'))))),
    ))
    .parse(input)
}

fn function_call(input: &str) -> ParseResult<'_, Expression> {
    // `text()` and friends are node tests, left for the step parser.
    let (input, name) = verify(q_name, |name: &str| !NodeTypeTest::is_node_type_name(name))
        .parse(input)?;
    let (input, _) = ws(char('(')).parse(input)?;
    let (input, args) = cut(terminated(
        separated_list0(ws(char(',')), expr),
        ws(char(')')),
    ))
    .parse(input)?;
    Ok((input, Expression::FunctionCall { name, args }))
}

fn predicate(input: &str) -> ParseResult<'_, Expression> {
    preceded(ws(char('[')), cut(terminated(expr, ws(char(']'))))).parse(input)
}

// Literals and names

fn digits(input: &str) -> ParseResult<'_, &str> {
    take_while1(|c: char| c.is_ascii_digit()).parse(input)
}

/// `Digits ('.' Digits?)? | '.' Digits`. There is no sign or exponent.
fn number_literal(input: &str) -> ParseResult<'_, f64> {
    let fraction = take_while(|c: char| c.is_ascii_digit());
    map_res(
        alt((
            pair(digits, opt(preceded(char('.'), fraction))),
            map(preceded(char('.'), digits), |fraction| ("", Some(fraction))),
        )),
        |(whole, fraction): (&str, Option<&str>)| {
            format!("{}.{}", whole, fraction.unwrap_or("")).parse::<f64>()
        },
    )
    .parse(input)
}

fn quoted<'a>(quote: char) -> impl Parser<&'a str, Output = &'a str, Error = Error<&'a str>> {
    preceded(
        char(quote),
        cut(terminated(take_while(move |c| c != quote), char(quote))),
    )
}

fn string_literal(input: &str) -> ParseResult<'_, String> {
    map(alt((quoted('\''), quoted('"'))), str::to_string).parse(input)
}

fn nc_name(input: &str) -> ParseResult<'_, &str> {
    recognize((take_while1(is_name_start), take_while(is_name_char))).parse(input)
}

fn q_name(input: &str) -> ParseResult<'_, String> {
    map(recognize((nc_name, opt((char(':'), nc_name)))), str::to_string).parse(input)
}

// Location paths

/// `/` continues to a child step, `//` to a descendant step.
fn path_separator(input: &str) -> ParseResult<'_, bool> {
    alt((value(true, tag("//")), value(false, char('/')))).parse(input)
}

fn relative_steps(input: &str) -> ParseResult<'_, Vec<Step>> {
    let (input, parts) = many0(pair(ws(path_separator), cut(step))).parse(input)?;
    let mut steps = Vec::with_capacity(parts.len());
    for (descendants, next) in parts {
        if descendants {
            steps.push(Step::descendant_or_self());
        }
        steps.push(next);
    }
    Ok((input, steps))
}

fn location_path(input: &str) -> ParseResult<'_, LocationPath> {
    let (input, root) = opt(path_separator).parse(input)?;
    let (input, first) = match root {
        // A lone `/` selects the root node.
        Some(false) => opt(preceded(multispace0, step)).parse(input)?,
        Some(true) => map(cut(preceded(multispace0, step)), Some).parse(input)?,
        None => map(step, Some).parse(input)?,
    };

    let mut steps = Vec::new();
    if root == Some(true) {
        steps.push(Step::descendant_or_self());
    }
    let input = match first {
        Some(first) => {
            steps.push(first);
            let (input, more) = relative_steps(input)?;
            steps.extend(more);
            input
        }
        None => input,
    };

    Ok((
        input,
        LocationPath {
            start_point: None,
            is_absolute: root.is_some(),
            steps,
        },
    ))
}

fn step(input: &str) -> ParseResult<'_, Step> {
    alt((abbreviated_step, full_step)).parse(input)
}

/// `.` and `..` take no predicates.
fn abbreviated_step(input: &str) -> ParseResult<'_, Step> {
    let (input, axis) =
        alt((value(Axis::Parent, tag("..")), value(Axis::SelfAxis, char('.')))).parse(input)?;
    Ok((
        input,
        Step {
            axis,
            node_test: NodeTest::any(),
            predicates: vec![],
        },
    ))
}

fn full_step(input: &str) -> ParseResult<'_, Step> {
    let (input, (axis, node_test)) = alt((
        map(preceded(ws(char('@')), cut(node_test)), |test| {
            (Axis::Attribute, test)
        }),
        pair(axis_specifier, cut(node_test)),
        map(node_test, |test| (Axis::Child, test)),
    ))
    .parse(input)?;
    let (input, predicates) = many0(predicate).parse(input)?;
    Ok((
        input,
        Step {
            axis,
            node_test,
            predicates,
        },
    ))
}

fn axis_specifier(input: &str) -> ParseResult<'_, Axis> {
    terminated(map_opt(nc_name, Axis::from_name), ws(tag("::"))).parse(input)
}

fn node_test(input: &str) -> ParseResult<'_, NodeTest> {
    alt((
        map(node_type_test, NodeTest::NodeType),
        value(NodeTest::Wildcard, char('*')),
        map(terminated(nc_name, tag(":*")), |prefix: &str| {
            NodeTest::NamespaceWildcard(prefix.to_string())
        }),
        map(q_name, |name| NodeTest::Name(NameTest::from_qname(&name))),
    ))
    .parse(input)
}

fn node_type_test(input: &str) -> ParseResult<'_, NodeTypeTest> {
    let (rest, name) = terminated(nc_name, ws(char('('))).parse(input)?;
    let (rest, test) = match name {
        "text" => (rest, NodeTypeTest::Text),
        "node" => (rest, NodeTypeTest::Node),
        "comment" => (rest, NodeTypeTest::Comment),
        "processing-instruction" => map(opt(ws(string_literal)), |target| {
            NodeTypeTest::ProcessingInstruction(target)
        })
        .parse(rest)?,
        _ => return Err(nom::Err::Error(Error::new(input, ErrorKind::Tag))),
    };
    let (rest, _) = cut(char(')')).parse(rest)?;
    Ok((rest, test))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(expr: &str) -> Expression {
        parse_expression(expr).unwrap_or_else(|e| panic!("{}", e))
    }

    fn path(expr: &str) -> LocationPath {
        match parse(expr) {
            Expression::LocationPath(path) => path,
            other => panic!("expected a location path for {:?}, got {:?}", expr, other),
        }
    }

    fn name_step(axis: Axis, name: &str) -> Step {
        Step {
            axis,
            node_test: NodeTest::Name(NameTest::from_qname(name)),
            predicates: vec![],
        }
    }

    fn num(n: f64) -> Box<Expression> {
        Box::new(Expression::Number(n))
    }

    fn error_message(expr: &str) -> String {
        match parse_expression(expr) {
            Err(XPathError::XPathParse(source, message)) => {
                assert_eq!(source, expr);
                message
            }
            other => panic!("expected a parse error for {:?}, got {:?}", expr, other),
        }
    }

    #[test]
    fn test_relative_and_absolute_paths() {
        assert_eq!(
            path("a/b").steps,
            vec![name_step(Axis::Child, "a"), name_step(Axis::Child, "b")]
        );
        assert!(!path("a/b").is_absolute);

        let absolute = path("/a // b");
        assert!(absolute.is_absolute);
        assert_eq!(
            absolute.steps,
            vec![
                name_step(Axis::Child, "a"),
                Step::descendant_or_self(),
                name_step(Axis::Child, "b"),
            ]
        );

        let root = path("/");
        assert!(root.is_absolute);
        assert!(root.steps.is_empty());
    }

    #[test]
    fn test_explicit_and_abbreviated_axes() {
        assert_eq!(
            path("ancestor-or-self::div").steps[0],
            name_step(Axis::AncestorOrSelf, "div")
        );
        assert_eq!(path("preceding :: *").steps[0].node_test, NodeTest::Wildcard);
        assert_eq!(path("@ id").steps[0], name_step(Axis::Attribute, "id"));

        let steps = path("../.").steps;
        assert_eq!((steps[0].axis, &steps[0].node_test), (Axis::Parent, &NodeTest::any()));
        assert_eq!((steps[1].axis, &steps[1].node_test), (Axis::SelfAxis, &NodeTest::any()));
    }

    #[test]
    fn test_name_and_node_type_tests() {
        assert_eq!(
            path("svg:path").steps[0].node_test,
            NodeTest::Name(NameTest {
                prefix: Some("svg".into()),
                local_part: "path".into(),
            })
        );
        assert_eq!(
            path("svg:*").steps[0].node_test,
            NodeTest::NamespaceWildcard("svg".into())
        );
        assert_eq!(
            path("a/text( )").steps[1].node_test,
            NodeTest::NodeType(NodeTypeTest::Text)
        );
        assert_eq!(
            path("processing-instruction( 'php' )").steps[0].node_test,
            NodeTest::NodeType(NodeTypeTest::ProcessingInstruction(Some("php".into())))
        );
        // Without parentheses these are ordinary element names.
        assert_eq!(path("text/comment").steps[1], name_step(Axis::Child, "comment"));
    }

    #[test]
    fn test_operator_words_as_element_names() {
        assert_eq!(path("//order").steps[1], name_step(Axis::Child, "order"));
        assert_eq!(path("div/mod").steps[1], name_step(Axis::Child, "mod"));
        assert!(matches!(
            parse("modulus div 2"),
            Expression::BinaryOp { op: BinaryOperator::Divide, .. }
        ));
        assert_eq!(path("my-list.item").steps[0], name_step(Axis::Child, "my-list.item"));
    }

    #[test]
    fn test_number_literals() {
        assert_eq!(parse("1.5"), Expression::Number(1.5));
        assert_eq!(parse(".5"), Expression::Number(0.5));
        assert_eq!(parse("2."), Expression::Number(2.0));
        assert_eq!(parse("12.75"), Expression::Number(12.75));
        assert_eq!(
            parse("2 * 1.5"),
            Expression::BinaryOp {
                left: num(2.0),
                op: BinaryOperator::Multiply,
                right: num(1.5),
            }
        );
        assert_eq!(number_literal("1.5"), Ok(("", 1.5)));
        assert_eq!(number_literal("3.25]"), Ok(("]", 3.25)));
        assert_eq!(
            parse("- -3"),
            Expression::UnaryOp {
                op: UnaryOperator::Minus,
                expr: Box::new(Expression::UnaryOp {
                    op: UnaryOperator::Minus,
                    expr: num(3.0),
                }),
            }
        );
    }

    #[test]
    fn test_precedence_and_associativity() {
        assert_eq!(
            parse("1 + 2 * 3"),
            Expression::BinaryOp {
                left: num(1.0),
                op: BinaryOperator::Plus,
                right: Box::new(Expression::BinaryOp {
                    left: num(2.0),
                    op: BinaryOperator::Multiply,
                    right: num(3.0),
                }),
            }
        );
        assert_eq!(
            parse("8 - 4 - 2"),
            Expression::BinaryOp {
                left: Box::new(Expression::BinaryOp {
                    left: num(8.0),
                    op: BinaryOperator::Minus,
                    right: num(4.0),
                }),
                op: BinaryOperator::Minus,
                right: num(2.0),
            }
        );
        // `or` binds loosest, then `and`, then `=`.
        assert_eq!(
            parse("a = b or c = d and e = f").to_string(),
            "child::a = child::b or child::c = child::d and child::e = child::f"
        );
        assert!(matches!(
            parse("a = b or c = d and e = f"),
            Expression::BinaryOp { op: BinaryOperator::Or, .. }
        ));
        assert!(matches!(
            parse("1 < 2 = 2 > 1"),
            Expression::BinaryOp { op: BinaryOperator::Equals, .. }
        ));
    }

    #[test]
    fn test_abbreviated_steps_take_no_predicates() {
        assert!(parse_expression("//b/.[1]").is_err());
        assert!(parse_expression("..[1]").is_err());
        assert_eq!(path("../.").steps.len(), 2);
        assert!(parse_expression("(.)[1]").is_ok());
    }

    #[test]
    fn test_deep_nesting_is_rejected_not_overflowed() {
        let nested = |depth: usize| format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        assert!(parse_expression(&nested(MAX_NESTING)).is_ok());
        let message = error_message(&nested(5000));
        assert!(message.contains("brackets nest deeper"), "{}", message);

        let predicates = format!("a{}", "[b".repeat(100) + &"]".repeat(100));
        assert!(parse_expression(&predicates).is_err());

        let negations = format!("{}1", "-".repeat(5000));
        assert!(error_message(&negations).contains("nests deeper"));

        let sum = vec!["1"; 5000].join(" + ");
        assert!(error_message(&sum).contains("nests deeper"));

        let union = vec!["a"; 5000].join("|");
        assert!(error_message(&union).contains("nests deeper"));

        // Quoted brackets do not count.
        let literal = format!("'{}'", "(".repeat(100));
        assert_eq!(parse(&literal), Expression::Literal("(".repeat(100)));
        assert!(parse_expression(&vec!["1"; 200].join(" + ")).is_ok());
    }

    #[test]
    fn test_entity_spelled_relational_operators() {
        assert_eq!(parse("1 &lt;= 2"), parse("1 <= 2"));
        assert_eq!(parse("$a&gt;$b"), parse("$a > $b"));
        assert_eq!(parse("count(x) &lt; 3"), parse("count(x) < 3"));
        assert!(parse_expression("1 &amp; 2").is_err());
    }

    #[test]
    fn test_union_binds_tighter_than_unary_minus() {
        let Expression::UnaryOp { expr, .. } = parse("-a | b") else {
            panic!("expected a negation");
        };
        assert!(matches!(*expr, Expression::BinaryOp { op: BinaryOperator::Union, .. }));
    }

    #[test]
    fn test_variables_and_filters_start_paths() {
        assert_eq!(parse("$var"), Expression::Variable("var".into()));
        assert_eq!(
            path("$nodes/item").start_point,
            Some(Box::new(Expression::Variable("nodes".into())))
        );

        let filtered = path("(//a)[1]/b");
        let Some(start) = filtered.start_point else {
            panic!("missing start point");
        };
        assert!(matches!(
            *start,
            Expression::Filter { ref predicates, .. } if predicates == &vec![Expression::Number(1.0)]
        ));
        assert_eq!(filtered.steps, vec![name_step(Axis::Child, "b")]);

        let from_function = path("id('x')//b");
        assert!(matches!(
            from_function.start_point.as_deref(),
            Some(Expression::FunctionCall { name, .. }) if name == "id"
        ));
        assert_eq!(from_function.steps.len(), 2);
    }

    #[test]
    fn test_function_calls() {
        assert_eq!(
            parse("count( //d )").to_string(),
            "count(/descendant-or-self::node()/child::d)"
        );
        assert_eq!(
            parse("concat('a', \"b\", 3)"),
            Expression::FunctionCall {
                name: "concat".into(),
                args: vec![
                    Expression::Literal("a".into()),
                    Expression::Literal("b".into()),
                    Expression::Number(3.0),
                ],
            }
        );
        assert_eq!(
            parse("true()"),
            Expression::FunctionCall {
                name: "true".into(),
                args: vec![],
            }
        );
        assert_eq!(parse("para[position() = 1]").to_string(), "child::para[position() = 1]");
    }

    #[test]
    fn test_predicates() {
        let steps = path("foo[@id = 'a'][2]").steps;
        assert_eq!(steps[0].predicates.len(), 2);
        assert_eq!(steps[0].predicates[0].to_string(), "attribute::id = 'a'");
        assert_eq!(steps[0].predicates[1], Expression::Number(2.0));
    }

    #[test]
    fn test_rejects_malformed_expressions() {
        for bad in [
            "", "  ", "//", "a/", "foo[", "foo[]", "count(", "concat('a',)", "'unterminated",
            "1 +", "a b", "a || b", "1e3", "namespace::*", "text(1)", "$", "@",
        ] {
            assert!(
                matches!(parse_expression(bad), Err(XPathError::XPathParse(..))),
                "expected a parse error for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_error_messages_point_at_the_problem() {
        assert_eq!(error_message("1 +"), "unexpected end of expression");
        assert_eq!(error_message("a b"), "unexpected 'b' at offset 2");
        assert_eq!(error_message("//a[1]]"), "unexpected ']' at offset 6");
        assert_eq!(error_message("'abc"), "unexpected end of expression");
    }
}
