//! FILENAME: src/printer.rs
//! PURPOSE: Serializes an AST back into formula text.
//! CONTEXT: The printer is the crate's canonical `Visitor` implementation.
//! Output is a valid, equivalent formula but not guaranteed byte-identical
//! to the text the tree was parsed from: the AST keeps no superficial
//! formatting, so spacing and redundant parentheses are reconstructed from
//! operator precedence alone.
//!
//! RENDERING RULES:
//! - Root: "=expr", or "{=expr}" for array formulas, or bare expr when
//!   include_equals is off
//! - Calls: Name(arg1,arg2,...), no spaces around separators
//! - Unary ops: "-x" / "+x" prefix, "x%" postfix
//! - Binary scalar ops: "left op right" with single spaces
//! - Reference ops: "A1:B2", "A1,B2", "A1 B2" with no extra spaces
//! - Parentheses: only where precedence demands them, plus always around a
//!   union used as a call argument (otherwise the "," would read as an
//!   argument separator)

use serde::{Deserialize, Serialize};

use crate::ast::{AstNode, Prefix, ReferenceItem, Value};
use crate::error::AstError;
use crate::operator::Operator;
use crate::visitor::Visitor;

/// Formula language dialects. A single dialect exists today; the option is
/// reserved for future divergence (localized separators, new functions).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
pub enum Dialect {
    #[default]
    Excel2007,
}

/// Prints an AST to a formula string.
#[derive(Debug, Clone)]
pub struct Printer {
    /// Whether to emit the leading "=" (or "{=...}" for array formulas)
    /// at the root.
    pub include_equals: bool,

    /// Dialect to print for.
    pub dialect: Dialect,
}

impl Default for Printer {
    fn default() -> Self {
        Printer {
            include_equals: true,
            dialect: Dialect::default(),
        }
    }
}

impl Printer {
    pub fn new(include_equals: bool, dialect: Dialect) -> Self {
        Printer {
            include_equals,
            dialect,
        }
    }

    /// Renders one call argument or operand, wrapping it in parentheses
    /// when required in the given parent.
    fn parenthesize(&mut self, parent: &AstNode, child: &AstNode) -> Result<String, AstError> {
        let text = self.visit(child)?;
        if needs_parentheses(parent, child) {
            Ok(format!("({})", text))
        } else {
            Ok(text)
        }
    }

    fn render_call(
        &mut self,
        node: &AstNode,
        name: &str,
        args: &[AstNode],
    ) -> Result<String, AstError> {
        let rendered = args
            .iter()
            .map(|arg| self.parenthesize(node, arg))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("{}({})", name, rendered.join(",")))
    }
}

/// Whether `child` must be parenthesized as an argument of `parent`.
///
/// Only operator children inside call-like parents ever qualify: a union
/// argument of a named call always does (to disambiguate from the argument
/// separator), and otherwise an operator parent parenthesizes any child it
/// binds strictly tighter than. Equal precedence never parenthesizes;
/// same-precedence chains are taken as left-associative.
fn needs_parentheses(parent: &AstNode, child: &AstNode) -> bool {
    let Some(child_op) = child.operator() else {
        return false;
    };

    if child_op == Operator::Union
        && matches!(
            parent,
            AstNode::NamedFunctionCall { .. } | AstNode::NamedRefFunctionCall { .. }
        )
    {
        return true;
    }

    match (parent.precedence(), child.precedence()) {
        (Some(parent_prec), Some(child_prec)) => parent_prec > child_prec,
        _ => false,
    }
}

impl Visitor for Printer {
    type Output = String;

    fn visit_root(
        &mut self,
        _node: &AstNode,
        expr: &AstNode,
        is_array_formula: bool,
    ) -> Result<String, AstError> {
        let inner = self.visit(expr)?;
        if !self.include_equals {
            return Ok(inner);
        }
        if is_array_formula {
            Ok(format!("{{={}}}", inner))
        } else {
            Ok(format!("={}", inner))
        }
    }

    fn visit_empty_argument(&mut self, _node: &AstNode) -> Result<String, AstError> {
        Ok(String::new())
    }

    fn visit_constant(&mut self, _node: &AstNode, value: &Value) -> Result<String, AstError> {
        Ok(value.to_string())
    }

    fn visit_named_function_call(
        &mut self,
        node: &AstNode,
        name: &str,
        args: &[AstNode],
    ) -> Result<String, AstError> {
        self.render_call(node, name, args)
    }

    fn visit_named_ref_function_call(
        &mut self,
        node: &AstNode,
        name: &str,
        args: &[AstNode],
    ) -> Result<String, AstError> {
        self.render_call(node, name, args)
    }

    fn visit_ud_function_call(
        &mut self,
        node: &AstNode,
        name: &str,
        args: &[AstNode],
    ) -> Result<String, AstError> {
        self.render_call(node, name, args)
    }

    fn visit_un_op(
        &mut self,
        node: &AstNode,
        op: Operator,
        operand: &AstNode,
    ) -> Result<String, AstError> {
        let operand_text = self.parenthesize(node, operand)?;
        if op.is_unary_prefix() {
            Ok(format!("{}{}", op.symbol(), operand_text))
        } else {
            Ok(format!("{}{}", operand_text, op.symbol()))
        }
    }

    fn visit_bin_op(
        &mut self,
        node: &AstNode,
        op: Operator,
        left: &AstNode,
        right: &AstNode,
    ) -> Result<String, AstError> {
        let left_text = self.parenthesize(node, left)?;
        let right_text = self.parenthesize(node, right)?;
        if op.is_reference() {
            Ok(format!("{}{}{}", left_text, op.symbol(), right_text))
        } else {
            Ok(format!("{} {} {}", left_text, op.symbol(), right_text))
        }
    }

    fn visit_ref_op(
        &mut self,
        node: &AstNode,
        op: Operator,
        left: &AstNode,
        right: &AstNode,
    ) -> Result<String, AstError> {
        let left_text = self.parenthesize(node, left)?;
        let right_text = self.parenthesize(node, right)?;
        Ok(format!("{}{}{}", left_text, op.symbol(), right_text))
    }

    fn visit_reference(
        &mut self,
        _node: &AstNode,
        prefix: Option<&Prefix>,
        item: &ReferenceItem,
    ) -> Result<String, AstError> {
        match prefix {
            Some(prefix) => Ok(format!("{}{}", prefix, item)),
            None => Ok(item.to_string()),
        }
    }
}

/// Prints a tree with the default configuration: leading "=" included,
/// Excel2007 dialect.
pub fn print(node: &AstNode) -> Result<String, AstError> {
    Printer::default().visit(node)
}
