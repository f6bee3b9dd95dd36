//! Abstract Syntax Tree (AST) for the `SyntaxFlow` language.
//!
//! # Design Principles
//!
//! - **Closed variant set**: [`NodeKind`] is an enum, so every traversal is
//!   checked for exhaustiveness at compile time
//! - **Single owner**: a [`Node`] cannot be cloned; each child belongs to
//!   exactly one parent and the structure is always a tree
//! - **Immutable**: once built, a node only hands out shared references
//! - **Stack-safe**: disposal and traversal use explicit work stacks, so tree
//!   depth is limited by memory, not by the call stack
//!
//! # Modules
//!
//! - [`node`] - Node, variant payloads and operators
//! - [`build`] - Constructors and the [`NodeFactory`]
//! - [`dispose`] - Post-order release of a tree
//! - [`visit`] - Read-only traversal

pub mod build;
pub mod dispose;
pub mod node;
pub mod visit;

// Re-exports for convenience
pub use build::{
    NodeFactory, make_assignment, make_binary_expr, make_constant, make_identifier,
    make_procedure_call,
};
pub use dispose::dispose;
pub use node::{BinaryOp, Name, Node, NodeKind};
pub use visit::Preorder;
