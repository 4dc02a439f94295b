//! Filter syntax tree.

use crate::error::EvaluationError;
use crate::path::ResolvedPath;
use chrono::{DateTime, FixedOffset};
use serde_json::Number;
use std::fmt;

/// Comparison operators of RFC 7644 §3.4.2.2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Equal,
    NotEqual,
    Contains,
    StartsWith,
    EndsWith,
    GreaterThan,
    GreaterOrEqual,
    LessThan,
    LessOrEqual,
}

impl CompareOp {
    /// Operator keyword, ignoring case.
    pub fn from_keyword(word: &str) -> Option<Self> {
        let op = match word.to_ascii_lowercase().as_str() {
            "eq" => Self::Equal,
            "ne" => Self::NotEqual,
            "co" => Self::Contains,
            "sw" => Self::StartsWith,
            "ew" => Self::EndsWith,
            "gt" => Self::GreaterThan,
            "ge" => Self::GreaterOrEqual,
            "lt" => Self::LessThan,
            "le" => Self::LessOrEqual,
            _ => return None,
        };
        Some(op)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "eq",
            Self::NotEqual => "ne",
            Self::Contains => "co",
            Self::StartsWith => "sw",
            Self::EndsWith => "ew",
            Self::GreaterThan => "gt",
            Self::GreaterOrEqual => "ge",
            Self::LessThan => "lt",
            Self::LessOrEqual => "le",
        }
    }

    /// `co`, `sw` or `ew`.
    pub fn is_substring(self) -> bool {
        matches!(self, Self::Contains | Self::StartsWith | Self::EndsWith)
    }

    /// `gt`, `ge`, `lt` or `le`.
    pub fn is_ordering(self) -> bool {
        matches!(
            self,
            Self::GreaterThan | Self::GreaterOrEqual | Self::LessThan | Self::LessOrEqual
        )
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Number(Number),
    Boolean(bool),
    Null,
}

impl Literal {
    /// Kind of literal, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string literal",
            Self::Number(_) => "number literal",
            Self::Boolean(_) => "boolean literal",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => {
                let quoted = serde_json::to_string(s).map_err(|_| fmt::Error)?;
                f.write_str(&quoted)
            }
            Self::Number(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Null => f.write_str("null"),
        }
    }
}

/// A literal converted to the type of the attribute it is compared with.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Profile-prepared string
    Text(String),
    Boolean(bool),
    Integer(i64),
    Decimal(f64),
    DateTime(DateTime<FixedOffset>),
    Binary(Vec<u8>),
    Null,
    /// A string the attribute's profile rejects, so no stored value equals it
    Unmatchable,
}

/// Parsed filter expression.
///
/// Borrows the schema it was parsed against; build once and evaluate as
/// often as needed.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterNode<'s> {
    /// `path op literal`
    Comparison {
        path: ResolvedPath<'s>,
        operator: CompareOp,
        value: Literal,
        /// `value` typed for `path`, or why the comparison is not supported
        operand: Result<Operand, EvaluationError>,
    },
    /// `path pr`
    Present(ResolvedPath<'s>),
    /// Bare `emails[type eq "work"]`: true when some element matches
    ValuePath(ResolvedPath<'s>),
    And(Box<FilterNode<'s>>, Box<FilterNode<'s>>),
    Or(Box<FilterNode<'s>>, Box<FilterNode<'s>>),
    Not(Box<FilterNode<'s>>),
    /// Parenthesized expression
    Grouping(Box<FilterNode<'s>>),
}

impl fmt::Display for FilterNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Comparison {
                path,
                operator,
                value,
                ..
            } => write!(f, "{path} {operator} {value}"),
            Self::Present(path) => write!(f, "{path} pr"),
            Self::ValuePath(path) => write!(f, "{path}"),
            Self::And(left, right) => write!(f, "{left} and {right}"),
            Self::Or(left, right) => write!(f, "{left} or {right}"),
            Self::Not(inner) => write!(f, "not {inner}"),
            Self::Grouping(inner) => write!(f, "({inner})"),
        }
    }
}
