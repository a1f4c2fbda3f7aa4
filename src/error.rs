//! FILENAME: src/error.rs
//! PURPOSE: Error type for AST construction and visitor dispatch.
//! CONTEXT: All failures in this crate are shape errors raised synchronously
//! to the immediate caller: an operator that does not fit the node being
//! built, or a visitor with no handler for the variant it was given. Nothing
//! is recoverable or retried.

use thiserror::Error;

use crate::ast::NodeKind;
use crate::operator::Operator;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AstError {
    #[error("not a unary operator: {0}")]
    NotUnary(Operator),

    #[error("not a binary operator: {0}")]
    NotBinary(Operator),

    #[error("not a reference operator: {0}")]
    NotReference(Operator),

    #[error("{side} operand of reference operator {op} cannot produce a reference")]
    OperandNotReference { op: Operator, side: &'static str },

    #[error("visitor {visitor} cannot handle node kind {kind}")]
    Unhandled {
        visitor: &'static str,
        kind: NodeKind,
    },

    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
}
