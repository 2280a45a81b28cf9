//! The enriched syntax tree (EST): a mutable tree cloned from a
//! tree-sitter-compatible concrete parse tree, augmented with AST/CST dual
//! linkage, comment re-anchoring, and `ERROR`-node isolation.
//!
//! [`builder::build_tree`] is the sole entry point; everything else in this
//! crate describes the tree shape it produces.

pub mod builder;
pub mod node;
pub mod parse_node;

pub use builder::build_tree;
pub use node::{CstKind, EstNode, NodeId, Tree};
pub use parse_node::{FakeNode, FakeNodeRef, ParseNode};
