//! FILENAME: src/visitor.rs
//! PURPOSE: Generic traversal over AST nodes, dispatched by node variant.
//! CONTEXT: External code implements per-variant behavior without the node
//! model knowing about it. Three trait shapes share one contract: a
//! zero-argument returning visitor, a visitor threading one caller-supplied
//! parameter, and a no-return side-effecting walker. Dispatch is an
//! exhaustive match on the variant, so adding a node variant is a compile
//! error in each dispatcher rather than a runtime surprise.
//!
//! Every per-variant handler defaults to the overridable unhandled hook,
//! which fails naming both the visitor's concrete type and the offending
//! variant. Implement the handlers you care about; override the hook if you
//! want a fallback instead of an error.
//!
//! Visitors hold no dispatch state of their own, so a visitor instance may
//! be reused across trees; recursion depth is bounded by tree depth only.

use crate::ast::{AstNode, Prefix, ReferenceItem, Value};
use crate::error::AstError;
use crate::operator::Operator;

/// Returning visitor: produces one `Output` per visited node.
/// The `Printer` is the canonical implementation.
pub trait Visitor {
    type Output;

    /// Dispatches `node` to the handler for its variant.
    fn visit(&mut self, node: &AstNode) -> Result<Self::Output, AstError> {
        match node {
            AstNode::Root {
                expr,
                is_array_formula,
            } => self.visit_root(node, expr, *is_array_formula),
            AstNode::EmptyArgument => self.visit_empty_argument(node),
            AstNode::Constant(value) => self.visit_constant(node, value),
            AstNode::NamedFunctionCall { name, args } => {
                self.visit_named_function_call(node, name, args)
            }
            AstNode::NamedRefFunctionCall { name, args } => {
                self.visit_named_ref_function_call(node, name, args)
            }
            AstNode::UDFunctionCall { name, args } => self.visit_ud_function_call(node, name, args),
            AstNode::UnOp { op, operand } => self.visit_un_op(node, *op, operand),
            AstNode::BinOp { op, left, right } => self.visit_bin_op(node, *op, left, right),
            AstNode::RefOp { op, left, right } => self.visit_ref_op(node, *op, left, right),
            AstNode::Reference { prefix, item } => {
                self.visit_reference(node, prefix.as_ref(), item)
            }
        }
    }

    /// Fallback for variants without an implemented handler.
    /// Unless overridden, fails naming the visitor type and the variant.
    fn visit_unhandled(&mut self, node: &AstNode) -> Result<Self::Output, AstError> {
        Err(AstError::Unhandled {
            visitor: std::any::type_name::<Self>(),
            kind: node.kind(),
        })
    }

    fn visit_root(
        &mut self,
        node: &AstNode,
        _expr: &AstNode,
        _is_array_formula: bool,
    ) -> Result<Self::Output, AstError> {
        self.visit_unhandled(node)
    }

    fn visit_empty_argument(&mut self, node: &AstNode) -> Result<Self::Output, AstError> {
        self.visit_unhandled(node)
    }

    fn visit_constant(&mut self, node: &AstNode, _value: &Value) -> Result<Self::Output, AstError> {
        self.visit_unhandled(node)
    }

    fn visit_named_function_call(
        &mut self,
        node: &AstNode,
        _name: &str,
        _args: &[AstNode],
    ) -> Result<Self::Output, AstError> {
        self.visit_unhandled(node)
    }

    fn visit_named_ref_function_call(
        &mut self,
        node: &AstNode,
        _name: &str,
        _args: &[AstNode],
    ) -> Result<Self::Output, AstError> {
        self.visit_unhandled(node)
    }

    fn visit_ud_function_call(
        &mut self,
        node: &AstNode,
        _name: &str,
        _args: &[AstNode],
    ) -> Result<Self::Output, AstError> {
        self.visit_unhandled(node)
    }

    fn visit_un_op(
        &mut self,
        node: &AstNode,
        _op: Operator,
        _operand: &AstNode,
    ) -> Result<Self::Output, AstError> {
        self.visit_unhandled(node)
    }

    fn visit_bin_op(
        &mut self,
        node: &AstNode,
        _op: Operator,
        _left: &AstNode,
        _right: &AstNode,
    ) -> Result<Self::Output, AstError> {
        self.visit_unhandled(node)
    }

    fn visit_ref_op(
        &mut self,
        node: &AstNode,
        _op: Operator,
        _left: &AstNode,
        _right: &AstNode,
    ) -> Result<Self::Output, AstError> {
        self.visit_unhandled(node)
    }

    fn visit_reference(
        &mut self,
        node: &AstNode,
        _prefix: Option<&Prefix>,
        _item: &ReferenceItem,
    ) -> Result<Self::Output, AstError> {
        self.visit_unhandled(node)
    }
}

/// Returning visitor that threads one caller-supplied parameter down to every
/// handler, e.g. indentation depth or an environment.
pub trait ParamVisitor<P> {
    type Output;

    /// Dispatches `node` to the handler for its variant, passing `param`.
    fn visit(&mut self, node: &AstNode, param: &P) -> Result<Self::Output, AstError> {
        match node {
            AstNode::Root {
                expr,
                is_array_formula,
            } => self.visit_root(node, expr, *is_array_formula, param),
            AstNode::EmptyArgument => self.visit_empty_argument(node, param),
            AstNode::Constant(value) => self.visit_constant(node, value, param),
            AstNode::NamedFunctionCall { name, args } => {
                self.visit_named_function_call(node, name, args, param)
            }
            AstNode::NamedRefFunctionCall { name, args } => {
                self.visit_named_ref_function_call(node, name, args, param)
            }
            AstNode::UDFunctionCall { name, args } => {
                self.visit_ud_function_call(node, name, args, param)
            }
            AstNode::UnOp { op, operand } => self.visit_un_op(node, *op, operand, param),
            AstNode::BinOp { op, left, right } => self.visit_bin_op(node, *op, left, right, param),
            AstNode::RefOp { op, left, right } => self.visit_ref_op(node, *op, left, right, param),
            AstNode::Reference { prefix, item } => {
                self.visit_reference(node, prefix.as_ref(), item, param)
            }
        }
    }

    /// Fallback for variants without an implemented handler.
    fn visit_unhandled(&mut self, node: &AstNode, _param: &P) -> Result<Self::Output, AstError> {
        Err(AstError::Unhandled {
            visitor: std::any::type_name::<Self>(),
            kind: node.kind(),
        })
    }

    fn visit_root(
        &mut self,
        node: &AstNode,
        _expr: &AstNode,
        _is_array_formula: bool,
        param: &P,
    ) -> Result<Self::Output, AstError> {
        self.visit_unhandled(node, param)
    }

    fn visit_empty_argument(&mut self, node: &AstNode, param: &P) -> Result<Self::Output, AstError> {
        self.visit_unhandled(node, param)
    }

    fn visit_constant(
        &mut self,
        node: &AstNode,
        _value: &Value,
        param: &P,
    ) -> Result<Self::Output, AstError> {
        self.visit_unhandled(node, param)
    }

    fn visit_named_function_call(
        &mut self,
        node: &AstNode,
        _name: &str,
        _args: &[AstNode],
        param: &P,
    ) -> Result<Self::Output, AstError> {
        self.visit_unhandled(node, param)
    }

    fn visit_named_ref_function_call(
        &mut self,
        node: &AstNode,
        _name: &str,
        _args: &[AstNode],
        param: &P,
    ) -> Result<Self::Output, AstError> {
        self.visit_unhandled(node, param)
    }

    fn visit_ud_function_call(
        &mut self,
        node: &AstNode,
        _name: &str,
        _args: &[AstNode],
        param: &P,
    ) -> Result<Self::Output, AstError> {
        self.visit_unhandled(node, param)
    }

    fn visit_un_op(
        &mut self,
        node: &AstNode,
        _op: Operator,
        _operand: &AstNode,
        param: &P,
    ) -> Result<Self::Output, AstError> {
        self.visit_unhandled(node, param)
    }

    fn visit_bin_op(
        &mut self,
        node: &AstNode,
        _op: Operator,
        _left: &AstNode,
        _right: &AstNode,
        param: &P,
    ) -> Result<Self::Output, AstError> {
        self.visit_unhandled(node, param)
    }

    fn visit_ref_op(
        &mut self,
        node: &AstNode,
        _op: Operator,
        _left: &AstNode,
        _right: &AstNode,
        param: &P,
    ) -> Result<Self::Output, AstError> {
        self.visit_unhandled(node, param)
    }

    fn visit_reference(
        &mut self,
        node: &AstNode,
        _prefix: Option<&Prefix>,
        _item: &ReferenceItem,
        param: &P,
    ) -> Result<Self::Output, AstError> {
        self.visit_unhandled(node, param)
    }
}

/// Side-effecting visitor: walks nodes for their effects only.
/// Override `walk_unhandled` to recurse into children of variants you do not
/// handle explicitly; by default, like the other shapes, it fails.
pub trait WalkVisitor {
    /// Dispatches `node` to the handler for its variant.
    fn walk(&mut self, node: &AstNode) -> Result<(), AstError> {
        match node {
            AstNode::Root {
                expr,
                is_array_formula,
            } => self.walk_root(node, expr, *is_array_formula),
            AstNode::EmptyArgument => self.walk_empty_argument(node),
            AstNode::Constant(value) => self.walk_constant(node, value),
            AstNode::NamedFunctionCall { name, args } => {
                self.walk_named_function_call(node, name, args)
            }
            AstNode::NamedRefFunctionCall { name, args } => {
                self.walk_named_ref_function_call(node, name, args)
            }
            AstNode::UDFunctionCall { name, args } => self.walk_ud_function_call(node, name, args),
            AstNode::UnOp { op, operand } => self.walk_un_op(node, *op, operand),
            AstNode::BinOp { op, left, right } => self.walk_bin_op(node, *op, left, right),
            AstNode::RefOp { op, left, right } => self.walk_ref_op(node, *op, left, right),
            AstNode::Reference { prefix, item } => self.walk_reference(node, prefix.as_ref(), item),
        }
    }

    /// Fallback for variants without an implemented handler.
    fn walk_unhandled(&mut self, node: &AstNode) -> Result<(), AstError> {
        Err(AstError::Unhandled {
            visitor: std::any::type_name::<Self>(),
            kind: node.kind(),
        })
    }

    fn walk_root(
        &mut self,
        node: &AstNode,
        _expr: &AstNode,
        _is_array_formula: bool,
    ) -> Result<(), AstError> {
        self.walk_unhandled(node)
    }

    fn walk_empty_argument(&mut self, node: &AstNode) -> Result<(), AstError> {
        self.walk_unhandled(node)
    }

    fn walk_constant(&mut self, node: &AstNode, _value: &Value) -> Result<(), AstError> {
        self.walk_unhandled(node)
    }

    fn walk_named_function_call(
        &mut self,
        node: &AstNode,
        _name: &str,
        _args: &[AstNode],
    ) -> Result<(), AstError> {
        self.walk_unhandled(node)
    }

    fn walk_named_ref_function_call(
        &mut self,
        node: &AstNode,
        _name: &str,
        _args: &[AstNode],
    ) -> Result<(), AstError> {
        self.walk_unhandled(node)
    }

    fn walk_ud_function_call(
        &mut self,
        node: &AstNode,
        _name: &str,
        _args: &[AstNode],
    ) -> Result<(), AstError> {
        self.walk_unhandled(node)
    }

    fn walk_un_op(
        &mut self,
        node: &AstNode,
        _op: Operator,
        _operand: &AstNode,
    ) -> Result<(), AstError> {
        self.walk_unhandled(node)
    }

    fn walk_bin_op(
        &mut self,
        node: &AstNode,
        _op: Operator,
        _left: &AstNode,
        _right: &AstNode,
    ) -> Result<(), AstError> {
        self.walk_unhandled(node)
    }

    fn walk_ref_op(
        &mut self,
        node: &AstNode,
        _op: Operator,
        _left: &AstNode,
        _right: &AstNode,
    ) -> Result<(), AstError> {
        self.walk_unhandled(node)
    }

    fn walk_reference(
        &mut self,
        node: &AstNode,
        _prefix: Option<&Prefix>,
        _item: &ReferenceItem,
    ) -> Result<(), AstError> {
        self.walk_unhandled(node)
    }
}

/// Iterates a tree in pre-order (node before its children, children in
/// their stored order) without needing a visitor implementation.
pub fn pre_order(root: &AstNode) -> PreOrder<'_> {
    PreOrder { stack: vec![root] }
}

/// Iterator returned by [`pre_order`].
pub struct PreOrder<'a> {
    stack: Vec<&'a AstNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a AstNode;

    fn next(&mut self) -> Option<&'a AstNode> {
        let node = self.stack.pop()?;
        // Push children reversed so the leftmost child pops first.
        let mut children = node.children();
        children.reverse();
        self.stack.extend(children);
        Some(node)
    }
}
