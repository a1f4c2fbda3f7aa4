//! FILENAME: src/lib.rs
//! PURPOSE: Library root for the formula AST crate.
//! CONTEXT: This crate models parsed spreadsheet formulas as an immutable
//! syntax tree and serializes trees back to formula text. An external parser
//! builds the tree; an external evaluator consumes it. This crate owns the
//! layer in between.
//!
//! PIPELINE: Formula String --> (external parser) --> AstNode --> Printer --> Formula String
//!
//! SUPPORTED CONSTRUCTS:
//! - Constants: numbers, strings, booleans, error literals (#DIV/0! etc.)
//! - Built-in and user-defined function calls: SUM(A1:A10), MYFUNC(1,2)
//! - Unary operators: -x, +x, x%
//! - Binary operators: +, -, *, /, ^, &, =, <>, <, >, <=, >=
//! - Reference operators: range (:), union (,), intersection (space)
//! - Sheet/workbook-qualified references: Sheet1!A1, '[Book.xlsx]My Sheet'!A1
//! - Array formulas: {=...}

pub mod ast;
pub mod error;
pub mod operator;
pub mod printer;
pub mod visitor;

mod eq;


// Re-export commonly used types for convenience
pub use ast::{AstNode, CellRef, NodeKind, Prefix, ReferenceItem, Value};
pub use error::AstError;
pub use operator::{precedence, Operator};
pub use printer::{print, Dialect, Printer};
pub use visitor::{pre_order, ParamVisitor, Visitor, WalkVisitor};
