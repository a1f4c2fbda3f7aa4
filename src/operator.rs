//! FILENAME: src/operator.rs
//! PURPOSE: The operator catalog for the formula language.
//! CONTEXT: Every operator node in the AST wraps one `Operator` value. The
//! catalog answers the questions the node constructors and the printer ask:
//! what is the symbol, how tightly does it bind, is it unary or binary, and
//! does it operate on references (ranges/unions/intersections) rather than
//! scalar values.

use serde::{Deserialize, Serialize};

/// Numeric precedence tiers. Higher values bind tighter.
///
/// `UNARY_POSTFIX` and `UNARY_PREFIX` are reserved tiers used as the
/// effective precedence of unary operator nodes when printing, regardless
/// of which unary operator is involved.
pub mod precedence {
    pub const COMPARISON: u8 = 1;
    pub const CONCATENATION: u8 = 2;
    pub const ADDITIVE: u8 = 3;
    pub const MULTIPLICATIVE: u8 = 4;
    pub const EXPONENTIATION: u8 = 5;
    pub const UNARY_POSTFIX: u8 = 6;
    pub const UNARY_PREFIX: u8 = 7;
    pub const UNION: u8 = 8;
    pub const INTERSECTION: u8 = 9;
    pub const RANGE: u8 = 10;
}

/// All operators of the formula language.
/// Listed in order of precedence groups (comparison is lowest).
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Operator {
    // Comparison operators (lowest precedence)
    Equal,        // =
    NotEqual,     // <>
    LessThan,     // <
    GreaterThan,  // >
    LessEqual,    // <=
    GreaterEqual, // >=

    // String concatenation
    Concat, // &

    // Arithmetic operators
    Add,      // +
    Subtract, // -
    Multiply, // *
    Divide,   // /
    Power,    // ^ (highest precedence among scalar binary ops)

    // Unary operators
    Negate,    // - (prefix)
    UnaryPlus, // + (prefix)
    Percent,   // % (postfix)

    // Reference operators (bind tighter than everything else)
    Union,     // , between references
    Intersect, // single space between references
    Range,     // : between references
}

impl Operator {
    /// The symbol as it appears in formula text.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "<>",
            Operator::LessThan => "<",
            Operator::GreaterThan => ">",
            Operator::LessEqual => "<=",
            Operator::GreaterEqual => ">=",
            Operator::Concat => "&",
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Power => "^",
            Operator::Negate => "-",
            Operator::UnaryPlus => "+",
            Operator::Percent => "%",
            Operator::Union => ",",
            Operator::Intersect => " ",
            Operator::Range => ":",
        }
    }

    /// The operator's own precedence tier. Note that unary operator *nodes*
    /// report the reserved unary tiers instead; see `AstNode::precedence`.
    pub fn precedence(&self) -> u8 {
        match self {
            Operator::Equal
            | Operator::NotEqual
            | Operator::LessThan
            | Operator::GreaterThan
            | Operator::LessEqual
            | Operator::GreaterEqual => precedence::COMPARISON,
            Operator::Concat => precedence::CONCATENATION,
            Operator::Add | Operator::Subtract => precedence::ADDITIVE,
            Operator::Multiply | Operator::Divide => precedence::MULTIPLICATIVE,
            Operator::Power => precedence::EXPONENTIATION,
            Operator::Percent => precedence::UNARY_POSTFIX,
            Operator::Negate | Operator::UnaryPlus => precedence::UNARY_PREFIX,
            Operator::Union => precedence::UNION,
            Operator::Intersect => precedence::INTERSECTION,
            Operator::Range => precedence::RANGE,
        }
    }

    /// Whether this operator takes exactly one operand.
    pub fn is_unary(&self) -> bool {
        matches!(
            self,
            Operator::Negate | Operator::UnaryPlus | Operator::Percent
        )
    }

    /// Whether this operator takes exactly two operands.
    /// Reference operators are binary.
    pub fn is_binary(&self) -> bool {
        !self.is_unary()
    }

    /// Whether this operator combines references (range, union, intersection)
    /// rather than scalar values.
    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            Operator::Union | Operator::Intersect | Operator::Range
        )
    }

    /// Whether this is a prefix unary operator (-x, +x).
    /// Returns false for binary operators.
    pub fn is_unary_prefix(&self) -> bool {
        matches!(self, Operator::Negate | Operator::UnaryPlus)
    }

    /// Whether this is a postfix unary operator (x%).
    /// Returns false for binary operators.
    pub fn is_unary_postfix(&self) -> bool {
        matches!(self, Operator::Percent)
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
