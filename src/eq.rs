//! FILENAME: src/eq.rs
//! PURPOSE: Hashing half of the structural equality contract.
//! CONTEXT: Equality on `AstNode` is the derived structural comparison over
//! the closed enum: same variant, same scalar fields, children pairwise
//! equal in order. The `Hash` impls here mirror that exactly, folding the
//! variant tag, then the variant's scalar fields, then each child
//! left-to-right into the hasher, so that equal trees always hash equal and
//! child order is reflected in the hash.
//!
//! `Value::Number` keeps `f64` (so `AstNode` is `PartialEq`, not `Eq`), and
//! the impls below are what make it hashable at all: the float is hashed by
//! bit pattern after normalizing zero, since 0.0 and -0.0 compare equal and
//! must hash equal.

use std::hash::{Hash, Hasher};

use crate::ast::{AstNode, Value};

impl Hash for AstNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Variant tag first, so equal shapes under different variants
        // (e.g. NamedFunctionCall vs NamedRefFunctionCall) diverge.
        (self.kind() as u8).hash(state);

        // Scalar fields declared by the variant.
        match self {
            AstNode::Root {
                is_array_formula, ..
            } => is_array_formula.hash(state),
            AstNode::EmptyArgument => {}
            AstNode::Constant(value) => value.hash(state),
            AstNode::NamedFunctionCall { name, .. }
            | AstNode::NamedRefFunctionCall { name, .. }
            | AstNode::UDFunctionCall { name, .. } => name.hash(state),
            AstNode::UnOp { op, .. } | AstNode::BinOp { op, .. } | AstNode::RefOp { op, .. } => {
                op.hash(state)
            }
            AstNode::Reference { prefix, item } => {
                prefix.hash(state);
                item.hash(state);
            }
        }

        // Children left-to-right; the hasher's stream position makes the
        // fold order-sensitive.
        for child in self.children() {
            child.hash(state);
        }
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Number(n) => {
                // 0.0 and -0.0 compare equal but differ in bits; normalize.
                // NaN never equals anything, so its bits may hash as-is.
                let bits = if *n == 0.0 { 0u64 } else { n.to_bits() };
                0u8.hash(state);
                bits.hash(state);
            }
            Value::String(s) => {
                1u8.hash(state);
                s.hash(state);
            }
            Value::Boolean(b) => {
                2u8.hash(state);
                b.hash(state);
            }
            Value::Error(e) => {
                3u8.hash(state);
                e.hash(state);
            }
        }
    }
}
