//! FILENAME: src/ast.rs
//! PURPOSE: Defines the Abstract Syntax Tree (AST) for formula expressions.
//! CONTEXT: An external parser builds this tree bottom-up from formula text;
//! the printer in this crate serializes it back. Nodes are immutable value
//! objects: child order is fixed at construction and never changes, so trees
//! can be shared read-only across threads.
//!
//! SUPPORTED EXPRESSIONS:
//! - Constants: 42, "text", TRUE, #DIV/0!
//! - Function calls: SUM(A1:A10), built-in or user-defined
//! - Unary operations: -5, +5, 50%
//! - Binary operations: +, -, *, /, ^, &, =, <>, <, >, <=, >=
//! - Reference operations: A1:B2 (range), A1,B2 (union), A1 B2 (intersection)
//! - Qualified references: Sheet1!A1, 'My Sheet'!A1, [1]Sheet1!A1

use serde::{Deserialize, Serialize};

use crate::error::AstError;
use crate::operator::{precedence, Operator};

/// Represents a parsed formula expression tree.
/// This is the core data structure the printer and external tools traverse.
///
/// Node shapes that carry invariants (operator arity and classification,
/// reference-capable operands) should be built through the checked
/// constructors (`un_op`, `bin_op`, `ref_op`) rather than variant literals.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum AstNode {
    /// The formula root. Wraps the top-level expression and records whether
    /// the formula is an array formula ({=...}).
    Root {
        expr: Box<AstNode>,
        is_array_formula: bool,
    },

    /// Dummy leaf for an omitted function argument, as in SUM(1,,2).
    EmptyArgument,

    /// A literal value: number, string, boolean, or error literal.
    Constant(Value),

    /// A call to a built-in function by name, like SUM(A1,A2).
    NamedFunctionCall { name: String, args: Vec<AstNode> },

    /// A call to a built-in function that can produce a reference,
    /// like OFFSET or INDEX.
    NamedRefFunctionCall { name: String, args: Vec<AstNode> },

    /// A call to a user-defined function. Never built-in and always treated
    /// as reference-capable, since the return shape is unknown.
    UDFunctionCall { name: String, args: Vec<AstNode> },

    /// A unary operation: op operand (e.g., -5) or operand op (e.g., 50%).
    UnOp {
        op: Operator,
        operand: Box<AstNode>,
    },

    /// A binary operation: left op right (e.g., 5 + 3, A1 > 10).
    BinOp {
        op: Operator,
        left: Box<AstNode>,
        right: Box<AstNode>,
    },

    /// A binary operation over references (range, union, intersection).
    /// Both operands must themselves be reference-capable.
    RefOp {
        op: Operator,
        left: Box<AstNode>,
        right: Box<AstNode>,
    },

    /// A cell/range/name reference with an optional sheet or workbook
    /// qualifier.
    Reference {
        prefix: Option<Prefix>,
        item: ReferenceItem,
    },
}

/// Literal values that can appear in formulas.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum Value {
    Number(f64),
    String(String),
    Boolean(bool),
    /// An error literal like #DIV/0! or #REF!, stored as its display text.
    Error(String),
}

/// Identifies the concrete variant of an `AstNode`.
/// Used by the visitor framework to name unhandled variants in errors.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum NodeKind {
    Root,
    EmptyArgument,
    Constant,
    NamedFunctionCall,
    NamedRefFunctionCall,
    UDFunctionCall,
    UnOp,
    BinOp,
    RefOp,
    Reference,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NodeKind::Root => "Root",
            NodeKind::EmptyArgument => "EmptyArgument",
            NodeKind::Constant => "Constant",
            NodeKind::NamedFunctionCall => "NamedFunctionCall",
            NodeKind::NamedRefFunctionCall => "NamedRefFunctionCall",
            NodeKind::UDFunctionCall => "UDFunctionCall",
            NodeKind::UnOp => "UnOp",
            NodeKind::BinOp => "BinOp",
            NodeKind::RefOp => "RefOp",
            NodeKind::Reference => "Reference",
        };
        write!(f, "{}", name)
    }
}

impl AstNode {
    // ========================================
    // CONSTRUCTORS
    // ========================================

    /// Wraps an expression as a formula root.
    pub fn root(expr: AstNode, is_array_formula: bool) -> AstNode {
        AstNode::Root {
            expr: Box::new(expr),
            is_array_formula,
        }
    }

    /// A number constant.
    pub fn num(n: f64) -> AstNode {
        AstNode::Constant(Value::Number(n))
    }

    /// A string constant.
    pub fn text(s: impl Into<String>) -> AstNode {
        AstNode::Constant(Value::String(s.into()))
    }

    /// A boolean constant.
    pub fn boolean(b: bool) -> AstNode {
        AstNode::Constant(Value::Boolean(b))
    }

    /// An error constant like #DIV/0!, stored as its display text.
    pub fn error(text: impl Into<String>) -> AstNode {
        AstNode::Constant(Value::Error(text.into()))
    }

    /// A built-in function call by name.
    pub fn named_call(name: impl Into<String>, args: Vec<AstNode>) -> AstNode {
        AstNode::NamedFunctionCall {
            name: name.into(),
            args,
        }
    }

    /// A built-in function call that can produce a reference (OFFSET, INDEX).
    pub fn named_ref_call(name: impl Into<String>, args: Vec<AstNode>) -> AstNode {
        AstNode::NamedRefFunctionCall {
            name: name.into(),
            args,
        }
    }

    /// A user-defined function call.
    pub fn ud_call(name: impl Into<String>, args: Vec<AstNode>) -> AstNode {
        AstNode::UDFunctionCall {
            name: name.into(),
            args,
        }
    }

    /// Builds a unary operation node.
    /// Fails with `AstError::NotUnary` if the operator is not unary.
    pub fn un_op(op: Operator, operand: AstNode) -> Result<AstNode, AstError> {
        if !op.is_unary() {
            return Err(AstError::NotUnary(op));
        }
        Ok(AstNode::UnOp {
            op,
            operand: Box::new(operand),
        })
    }

    /// Builds a binary operation node.
    /// Fails with `AstError::NotBinary` if the operator is not binary.
    pub fn bin_op(op: Operator, left: AstNode, right: AstNode) -> Result<AstNode, AstError> {
        if !op.is_binary() {
            return Err(AstError::NotBinary(op));
        }
        Ok(AstNode::BinOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Builds a reference operation node (range, union, intersection).
    /// Fails with `AstError::NotReference` if the operator is not
    /// reference-classified, or `AstError::OperandNotReference` if either
    /// operand cannot produce a reference.
    pub fn ref_op(op: Operator, left: AstNode, right: AstNode) -> Result<AstNode, AstError> {
        if !op.is_reference() {
            return Err(AstError::NotReference(op));
        }
        if !left.can_return_reference() {
            return Err(AstError::OperandNotReference { op, side: "left" });
        }
        if !right.can_return_reference() {
            return Err(AstError::OperandNotReference { op, side: "right" });
        }
        Ok(AstNode::RefOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// A reference with an optional sheet/workbook prefix.
    pub fn reference(prefix: Option<Prefix>, item: ReferenceItem) -> AstNode {
        AstNode::Reference { prefix, item }
    }

    /// An unqualified relative cell reference like A1.
    pub fn cell(col: impl Into<String>, row: u32) -> AstNode {
        AstNode::Reference {
            prefix: None,
            item: ReferenceItem::Cell(CellRef::new(col, row)),
        }
    }

    // ========================================
    // UNIFORM NODE SURFACE
    // ========================================

    /// The concrete variant of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            AstNode::Root { .. } => NodeKind::Root,
            AstNode::EmptyArgument => NodeKind::EmptyArgument,
            AstNode::Constant(_) => NodeKind::Constant,
            AstNode::NamedFunctionCall { .. } => NodeKind::NamedFunctionCall,
            AstNode::NamedRefFunctionCall { .. } => NodeKind::NamedRefFunctionCall,
            AstNode::UDFunctionCall { .. } => NodeKind::UDFunctionCall,
            AstNode::UnOp { .. } => NodeKind::UnOp,
            AstNode::BinOp { .. } => NodeKind::BinOp,
            AstNode::RefOp { .. } => NodeKind::RefOp,
            AstNode::Reference { .. } => NodeKind::Reference,
        }
    }

    /// All child nodes, in their semantically significant order.
    pub fn children(&self) -> Vec<&AstNode> {
        match self {
            AstNode::Root { expr, .. } => vec![expr.as_ref()],
            AstNode::EmptyArgument | AstNode::Constant(_) | AstNode::Reference { .. } => Vec::new(),
            AstNode::NamedFunctionCall { args, .. }
            | AstNode::NamedRefFunctionCall { args, .. }
            | AstNode::UDFunctionCall { args, .. } => args.iter().collect(),
            AstNode::UnOp { operand, .. } => vec![operand.as_ref()],
            AstNode::BinOp { left, right, .. } | AstNode::RefOp { left, right, .. } => {
                vec![left.as_ref(), right.as_ref()]
            }
        }
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }

    // ========================================
    // FUNCTION-CALL SURFACE
    // ========================================
    // Function calls and operator nodes share one capability surface:
    // operators are calls whose name is the operator symbol.

    /// The called function's name, for call-like nodes.
    /// For operator nodes this is the operator symbol.
    pub fn function_name(&self) -> Option<&str> {
        match self {
            AstNode::NamedFunctionCall { name, .. }
            | AstNode::NamedRefFunctionCall { name, .. }
            | AstNode::UDFunctionCall { name, .. } => Some(name),
            AstNode::UnOp { op, .. } | AstNode::BinOp { op, .. } | AstNode::RefOp { op, .. } => {
                Some(op.symbol())
            }
            _ => None,
        }
    }

    /// The call's ordered arguments, for call-like nodes.
    /// For operator nodes these are the operands.
    pub fn arguments(&self) -> Option<Vec<&AstNode>> {
        match self {
            AstNode::NamedFunctionCall { .. }
            | AstNode::NamedRefFunctionCall { .. }
            | AstNode::UDFunctionCall { .. }
            | AstNode::UnOp { .. }
            | AstNode::BinOp { .. }
            | AstNode::RefOp { .. } => Some(self.children()),
            _ => None,
        }
    }

    /// Whether this call-like node invokes a built-in function.
    /// `None` for nodes that are not call-like.
    pub fn is_built_in(&self) -> Option<bool> {
        match self {
            AstNode::NamedFunctionCall { .. }
            | AstNode::NamedRefFunctionCall { .. }
            | AstNode::UnOp { .. }
            | AstNode::BinOp { .. }
            | AstNode::RefOp { .. } => Some(true),
            AstNode::UDFunctionCall { .. } => Some(false),
            _ => None,
        }
    }

    /// Whether this call-like node is a conditional (IF-family) call.
    ///
    /// Placeholder: not implemented for built-in calls and operators, which
    /// always fail with `AstError::NotImplemented`. User-defined calls are
    /// never conditional and return `Ok(false)`.
    pub fn is_conditional(&self) -> Result<bool, AstError> {
        match self {
            AstNode::UDFunctionCall { .. } => Ok(false),
            _ => Err(AstError::NotImplemented("IsConditional")),
        }
    }

    /// Whether this expression can produce a cell/range reference.
    pub fn can_return_reference(&self) -> bool {
        matches!(
            self,
            AstNode::NamedRefFunctionCall { .. }
                | AstNode::UDFunctionCall { .. }
                | AstNode::RefOp { .. }
                | AstNode::Reference { .. }
        )
    }

    /// The wrapped operator, for operator nodes.
    pub fn operator(&self) -> Option<Operator> {
        match self {
            AstNode::UnOp { op, .. } | AstNode::BinOp { op, .. } | AstNode::RefOp { op, .. } => {
                Some(*op)
            }
            _ => None,
        }
    }

    /// The effective precedence of this node, for operator nodes.
    /// Unary nodes report the reserved prefix/postfix tier rather than the
    /// operator's own precedence.
    pub fn precedence(&self) -> Option<u8> {
        match self {
            AstNode::UnOp { op, .. } => Some(if op.is_unary_prefix() {
                precedence::UNARY_PREFIX
            } else {
                precedence::UNARY_POSTFIX
            }),
            AstNode::BinOp { op, .. } | AstNode::RefOp { op, .. } => Some(op.precedence()),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Value::Error(e) => write!(f, "{}", e),
        }
    }
}

/// The sheet/workbook-qualifying portion of a reference, e.g. the
/// `'[Budget.xlsx]Q1'!` in `'[Budget.xlsx]Q1'!A1`. All fields are optional;
/// whichever are present are rendered in order: file path, file number or
/// name in brackets, sheet or sheet range, closing quote, `!`.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Default, Serialize, Deserialize)]
pub struct Prefix {
    pub file_path: Option<String>,
    pub file_number: Option<u32>,
    pub file_name: Option<String>,
    pub sheet: Option<String>,
    /// A sheet range like `Sheet1:Sheet3` for 3-D references.
    pub multiple_sheets: Option<String>,
    /// Whether the prefix was quoted ('Sheet Name'!). Quoting is preserved,
    /// not derived from the content.
    pub is_quoted: bool,
}

impl Prefix {
    /// An unquoted single-sheet prefix.
    pub fn sheet(name: impl Into<String>) -> Prefix {
        Prefix {
            sheet: Some(name.into()),
            ..Prefix::default()
        }
    }

    /// A quoted single-sheet prefix, for sheet names with spaces.
    pub fn quoted_sheet(name: impl Into<String>) -> Prefix {
        Prefix {
            sheet: Some(name.into()),
            is_quoted: true,
            ..Prefix::default()
        }
    }

    pub fn has_file_path(&self) -> bool {
        self.file_path.is_some()
    }

    pub fn has_file_number(&self) -> bool {
        self.file_number.is_some()
    }

    pub fn has_file_name(&self) -> bool {
        self.file_name.is_some()
    }

    /// Whether the prefix names a workbook, by number or by name.
    pub fn has_file(&self) -> bool {
        self.has_file_number() || self.has_file_name()
    }

    pub fn has_sheet(&self) -> bool {
        self.sheet.is_some()
    }

    pub fn has_multiple_sheets(&self) -> bool {
        self.multiple_sheets.is_some()
    }
}

impl std::fmt::Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_quoted {
            write!(f, "'")?;
        }
        if let Some(path) = &self.file_path {
            write!(f, "{}", path)?;
        }
        if let Some(number) = self.file_number {
            write!(f, "[{}]", number)?;
        }
        if let Some(name) = &self.file_name {
            write!(f, "[{}]", name)?;
        }
        if let Some(sheet) = &self.sheet {
            write!(f, "{}", sheet)?;
        }
        if let Some(sheets) = &self.multiple_sheets {
            write!(f, "{}", sheets)?;
        }
        if self.is_quoted {
            write!(f, "'")?;
        }
        write!(f, "!")
    }
}

/// The unqualified part of a reference: a single cell, whole columns or
/// rows, or a defined name. Ranges, unions, and intersections between
/// references are expressed with `RefOp` nodes, not reference items.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Serialize, Deserialize)]
pub enum ReferenceItem {
    /// A single cell like A1 or $B$2.
    Cell(CellRef),

    /// Entire columns like A:B or $A:$B.
    Columns {
        start: String,
        end: String,
        start_absolute: bool,
        end_absolute: bool,
    },

    /// Entire rows like 1:5 or $1:$5.
    Rows {
        start: u32,
        end: u32,
        start_absolute: bool,
        end_absolute: bool,
    },

    /// A defined name like TaxRate.
    Name(String),
}

impl std::fmt::Display for ReferenceItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceItem::Cell(cell) => write!(f, "{}", cell),
            ReferenceItem::Columns {
                start,
                end,
                start_absolute,
                end_absolute,
            } => write!(
                f,
                "{}{}:{}{}",
                if *start_absolute { "$" } else { "" },
                start,
                if *end_absolute { "$" } else { "" },
                end
            ),
            ReferenceItem::Rows {
                start,
                end,
                start_absolute,
                end_absolute,
            } => write!(
                f,
                "{}{}:{}{}",
                if *start_absolute { "$" } else { "" },
                start,
                if *end_absolute { "$" } else { "" },
                end
            ),
            ReferenceItem::Name(name) => write!(f, "{}", name),
        }
    }
}

/// A single cell coordinate in A1 notation.
/// The column is stored as a string (e.g., "A", "AA") and row as 1-indexed
/// integer. The absolute flags record `$` markers.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Serialize, Deserialize)]
pub struct CellRef {
    pub col: String,
    pub row: u32,
    pub col_absolute: bool,
    pub row_absolute: bool,
}

impl CellRef {
    /// A relative cell reference like A1.
    pub fn new(col: impl Into<String>, row: u32) -> CellRef {
        CellRef {
            col: col.into(),
            row,
            col_absolute: false,
            row_absolute: false,
        }
    }

    /// A fully absolute cell reference like $A$1.
    pub fn absolute(col: impl Into<String>, row: u32) -> CellRef {
        CellRef {
            col: col.into(),
            row,
            col_absolute: true,
            row_absolute: true,
        }
    }
}

impl std::fmt::Display for CellRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            if self.col_absolute { "$" } else { "" },
            self.col,
            if self.row_absolute { "$" } else { "" },
            self.row
        )
    }
}
