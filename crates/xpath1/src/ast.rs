//! Syntax tree produced by [`crate::parse_expression`].
//!
//! `Display` writes an expression back out in unabbreviated form
//! (`//a` becomes `/descendant-or-self::node()/child::a`), which parses to
//! the same tree.

use crate::value::format_number;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(String),
    Number(f64),
    LocationPath(LocationPath),
    Variable(String),
    FunctionCall {
        name: String,
        args: Vec<Expression>,
    },
    /// A primary expression followed by predicates, e.g. `(//a)[1]` or `$items[2]`.
    Filter {
        primary: Box<Expression>,
        predicates: Vec<Expression>,
    },
    BinaryOp {
        left: Box<Expression>,
        op: BinaryOperator,
        right: Box<Expression>,
    },
    UnaryOp {
        op: UnaryOperator,
        expr: Box<Expression>,
    },
}

/// Binding strength of unary minus: looser than `|`, tighter than `*`.
const UNARY_PRECEDENCE: u8 = 7;
const PRIMARY_PRECEDENCE: u8 = 9;

impl Expression {
    /// Levels in the tree, counting this expression as one. Predicates sit
    /// one level below the expression they filter.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending: Vec<(&Expression, usize)> = vec![(self, 1)];
        while let Some((expr, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            let below = depth + 1;
            match expr {
                Expression::Literal(_) | Expression::Number(_) | Expression::Variable(_) => {}
                Expression::FunctionCall { args, .. } => {
                    pending.extend(args.iter().map(|arg| (arg, below)));
                }
                Expression::Filter {
                    primary,
                    predicates,
                } => {
                    pending.push((&**primary, below));
                    pending.extend(predicates.iter().map(|p| (p, below)));
                }
                Expression::BinaryOp { left, right, .. } => {
                    pending.push((&**left, below));
                    pending.push((&**right, below));
                }
                Expression::UnaryOp { expr, .. } => pending.push((&**expr, below)),
                Expression::LocationPath(path) => {
                    pending.extend(path.start_point.iter().map(|start| (&**start, below)));
                    let predicates = path.steps.iter().flat_map(|step| &step.predicates);
                    pending.extend(predicates.map(|p| (p, below)));
                }
            }
        }
        deepest
    }

    fn precedence(&self) -> u8 {
        match self {
            Expression::BinaryOp { op, .. } => op.precedence(),
            Expression::UnaryOp { .. } => UNARY_PRECEDENCE,
            _ => PRIMARY_PRECEDENCE,
        }
    }

    /// Whether the expression can start a path or carry predicates without parentheses.
    fn is_primary(&self) -> bool {
        matches!(
            self,
            Expression::Literal(_)
                | Expression::Number(_)
                | Expression::Variable(_)
                | Expression::FunctionCall { .. }
                | Expression::Filter { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Or,
    And,
    Equals,
    NotEquals,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    Union,
}

impl BinaryOperator {
    /// Higher binds tighter. All binary operators are left-associative.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOperator::Or => 1,
            BinaryOperator::And => 2,
            BinaryOperator::Equals | BinaryOperator::NotEquals => 3,
            BinaryOperator::LessThan
            | BinaryOperator::LessThanOrEqual
            | BinaryOperator::GreaterThan
            | BinaryOperator::GreaterThanOrEqual => 4,
            BinaryOperator::Plus | BinaryOperator::Minus => 5,
            BinaryOperator::Multiply | BinaryOperator::Divide | BinaryOperator::Modulo => 6,
            BinaryOperator::Union => 8,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Or => "or",
            BinaryOperator::And => "and",
            BinaryOperator::Equals => "=",
            BinaryOperator::NotEquals => "!=",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanOrEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanOrEqual => ">=",
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "div",
            BinaryOperator::Modulo => "mod",
            BinaryOperator::Union => "|",
        }
    }
}

/// A path such as `/a/b`, `descendant::c[1]`, or `$nodes/d` (with a start point).
#[derive(Debug, Clone, PartialEq)]
pub struct LocationPath {
    /// Filter expression the steps are applied to, for `$var/foo` or `id('x')/foo`.
    pub start_point: Option<Box<Expression>>,
    /// Starts at the document root. Ignored when `start_point` is set.
    pub is_absolute: bool,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub axis: Axis,
    pub node_test: NodeTest,
    pub predicates: Vec<Expression>,
}

impl Step {
    /// `descendant-or-self::node()`, the step `//` stands for.
    pub fn descendant_or_self() -> Self {
        Step {
            axis: Axis::DescendantOrSelf,
            node_test: NodeTest::any(),
            predicates: vec![],
        }
    }
}

/// The twelve XPath 1.0 axes. The namespace axis is not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Child,
    Descendant,
    DescendantOrSelf,
    Attribute,
    Parent,
    Ancestor,
    AncestorOrSelf,
    SelfAxis,
    FollowingSibling,
    PrecedingSibling,
    Following,
    Preceding,
}

const AXIS_NAMES: [(&str, Axis); 12] = [
    ("child", Axis::Child),
    ("descendant", Axis::Descendant),
    ("descendant-or-self", Axis::DescendantOrSelf),
    ("attribute", Axis::Attribute),
    ("parent", Axis::Parent),
    ("ancestor", Axis::Ancestor),
    ("ancestor-or-self", Axis::AncestorOrSelf),
    ("self", Axis::SelfAxis),
    ("following-sibling", Axis::FollowingSibling),
    ("preceding-sibling", Axis::PrecedingSibling),
    ("following", Axis::Following),
    ("preceding", Axis::Preceding),
];

impl Axis {
    pub fn from_name(name: &str) -> Option<Axis> {
        AXIS_NAMES
            .iter()
            .find_map(|&(axis_name, axis)| (axis_name == name).then_some(axis))
    }

    pub fn name(self) -> &'static str {
        AXIS_NAMES
            .iter()
            .find_map(|&(name, axis)| (axis == self).then_some(name))
            .unwrap_or("child")
    }

    /// Reverse axes number their nodes outward from the context node.
    pub fn is_reverse(self) -> bool {
        matches!(
            self,
            Axis::Ancestor | Axis::AncestorOrSelf | Axis::Preceding | Axis::PrecedingSibling
        )
    }
}

/// A qualified name as written in an expression, e.g. `svg:path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTest {
    pub prefix: Option<String>,
    pub local_part: String,
}

impl NameTest {
    pub fn from_qname(qname: &str) -> Self {
        let (prefix, local_part) = match qname.split_once(':') {
            Some((prefix, local)) => (Some(prefix.to_string()), local),
            None => (None, qname),
        };
        NameTest {
            prefix,
            local_part: local_part.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeTest {
    Name(NameTest),
    /// `*`: any node of the axis' principal type.
    Wildcard,
    /// `prefix:*`
    NamespaceWildcard(String),
    NodeType(NodeTypeTest),
}

impl NodeTest {
    /// `node()`
    pub fn any() -> Self {
        NodeTest::NodeType(NodeTypeTest::Node)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeTypeTest {
    Text,
    Node,
    Comment,
    /// `processing-instruction()`, optionally restricted to one target.
    ProcessingInstruction(Option<String>),
}

impl NodeTypeTest {
    /// The node type test a name introduces when followed by `(`.
    pub fn is_node_type_name(name: &str) -> bool {
        matches!(name, "text" | "node" | "comment" | "processing-instruction")
    }
}

fn write_literal(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    if s.contains('\'') {
        write!(f, "\"{}\"", s)
    } else {
        write!(f, "'{}'", s)
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expression, parenthesize: bool) -> fmt::Result {
    if parenthesize {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

fn write_predicates(f: &mut fmt::Formatter<'_>, predicates: &[Expression]) -> fmt::Result {
    predicates.iter().try_for_each(|p| write!(f, "[{}]", p))
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(s) => write_literal(f, s),
            Expression::Number(n) => f.write_str(&format_number(*n)),
            Expression::Variable(name) => write!(f, "${}", name),
            Expression::LocationPath(path) => write!(f, "{}", path),
            Expression::FunctionCall { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
            Expression::Filter {
                primary,
                predicates,
            } => {
                write_operand(f, primary, !primary.is_primary())?;
                write_predicates(f, predicates)
            }
            Expression::BinaryOp { left, op, right } => {
                let precedence = op.precedence();
                write_operand(f, left, left.precedence() < precedence)?;
                write!(f, " {} ", op.symbol())?;
                write_operand(f, right, right.precedence() <= precedence)
            }
            Expression::UnaryOp {
                op: UnaryOperator::Minus,
                expr,
            } => {
                f.write_str("-")?;
                write_operand(f, expr, expr.precedence() < UNARY_PRECEDENCE)
            }
        }
    }
}

impl fmt::Display for LocationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.start_point {
            Some(start) => {
                write_operand(f, start, !start.is_primary())?;
                f.write_str("/")?;
            }
            None if self.is_absolute => f.write_str("/")?,
            None => {}
        }
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.axis.name(), self.node_test)?;
        write_predicates(f, &self.predicates)
    }
}

impl fmt::Display for NodeTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeTest::Name(NameTest {
                prefix: Some(prefix),
                local_part,
            }) => write!(f, "{}:{}", prefix, local_part),
            NodeTest::Name(NameTest { local_part, .. }) => f.write_str(local_part),
            NodeTest::Wildcard => f.write_str("*"),
            NodeTest::NamespaceWildcard(prefix) => write!(f, "{}:*", prefix),
            NodeTest::NodeType(NodeTypeTest::Text) => f.write_str("text()"),
            NodeTest::NodeType(NodeTypeTest::Node) => f.write_str("node()"),
            NodeTest::NodeType(NodeTypeTest::Comment) => f.write_str("comment()"),
            NodeTest::NodeType(NodeTypeTest::ProcessingInstruction(None)) => {
                f.write_str("processing-instruction()")
            }
            NodeTest::NodeType(NodeTypeTest::ProcessingInstruction(Some(target))) => {
                f.write_str("processing-instruction(")?;
                write_literal(f, target)?;
                f.write_str(")")
            }
        }
    }
}
