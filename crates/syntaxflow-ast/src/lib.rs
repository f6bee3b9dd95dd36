//! `SyntaxFlow` Syntax: the abstract syntax tree core
//!
//! This crate holds the tree that a future parser will produce and that
//! later passes will consume:
//!
//! - [`ast`] - Node data model, constructors, disposal and traversal
//! - [`pretty`] - Canonical, fully parenthesised rendering
//! - [`error`] - The error type returned by constructors
//!
//! # Ownership
//!
//! A [`Node`] is move-only. Constructors take their children by value, so a
//! child handed to a constructor can no longer be used by the caller, whether
//! construction succeeds or not. On failure the constructor has already
//! released the children. Dropping a root releases the whole tree once,
//! children before parents.
//!
//! # Examples
//!
//! ```
//! use syntaxflow_ast::{make_assignment, make_binary_expr, make_constant, make_identifier};
//! use syntaxflow_ast::{render, BinaryOp};
//!
//! # fn main() -> syntaxflow_ast::AstResult<()> {
//! let sum = make_binary_expr(BinaryOp::Add, make_constant(4)?, make_constant(3)?)?;
//! let tree = make_assignment(make_identifier("x")?, sum)?;
//!
//! assert_eq!(render(Some(&tree)), "x = (4 + 3)");
//! syntaxflow_ast::dispose(Some(tree));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod ast;
pub mod error;
pub mod pretty;

pub use ast::{
    BinaryOp, Name, Node, NodeFactory, NodeKind, Preorder, dispose, make_assignment,
    make_binary_expr, make_constant, make_identifier, make_procedure_call,
};
pub use error::{AstError, AstResult};
pub use pretty::{render, write_node};
