//! Node constructors.
//!
//! Every constructor takes ownership of its children at the call, not at
//! successful return. If construction fails, the children have already been
//! released by the time the error reaches the caller, so there is nothing
//! left for the caller to clean up.
//!
//! Allocation happens in the same order for every variant: the node, then
//! its text buffer (if any), then the boxed storage. Each step can fail.
//!
//! # Examples
//!
//! ```
//! use syntaxflow_ast::{BinaryOp, NodeFactory};
//!
//! # fn main() -> syntaxflow_ast::AstResult<()> {
//! let factory = NodeFactory::new();
//! let args = factory.binary_expr(
//!     BinaryOp::Add,
//!     factory.constant(1)?,
//!     factory.constant(5)?,
//! )?;
//! let call = factory.procedure_call("my_procedure", Some(args))?;
//! assert_eq!(call.to_string(), "my_procedure((1 + 5))");
//! # Ok(())
//! # }
//! ```

use crate::ast::node::{BinaryOp, Name, Node, NodeInner, NodeKind};
use crate::error::AstResult;
use std::fmt;
use syntaxflow_log::{trace, warn};
use syntaxflow_mem::{AllocError, AllocKind, Lease, SharedHeap, system_heap, try_box, try_copy_str};

/// Bytes accounted to each node.
const NODE_BYTES: usize = std::mem::size_of::<NodeInner>();

/// Builds nodes whose storage is accounted to one heap.
///
/// Cloning a factory is cheap; clones share the heap.
#[derive(Clone)]
pub struct NodeFactory {
    heap: SharedHeap,
}

impl NodeFactory {
    /// Creates a factory backed by the process-wide system heap.
    #[must_use]
    pub fn new() -> Self {
        Self::with_heap(system_heap())
    }

    /// Creates a factory backed by `heap`.
    #[must_use]
    pub fn with_heap(heap: SharedHeap) -> Self {
        Self { heap }
    }

    /// Builds an integer literal.
    pub fn constant(&self, value: i64) -> AstResult<Node> {
        let lease = self.node_lease("constant")?;
        self.finish(NodeKind::Constant { value }, lease)
    }

    /// Builds an identifier holding its own copy of `name`.
    pub fn identifier(&self, name: &str) -> AstResult<Node> {
        let lease = self.node_lease("identifier")?;
        let name = self.name(name)?;
        self.finish(NodeKind::Identifier { name }, lease)
    }

    /// Builds `left = right`, taking ownership of both sides.
    pub fn assignment(&self, left: Node, right: Node) -> AstResult<Node> {
        let lease = self.node_lease("assignment")?;
        self.finish(NodeKind::Assignment { left, right }, lease)
    }

    /// Builds `(left op right)`, taking ownership of both operands.
    pub fn binary_expr(&self, op: BinaryOp, left: Node, right: Node) -> AstResult<Node> {
        let lease = self.node_lease("binary expression")?;
        self.finish(NodeKind::BinaryExpr { op, left, right }, lease)
    }

    /// Builds `name(arguments)` holding its own copy of `name` and taking
    /// ownership of `arguments`.
    pub fn procedure_call(&self, name: &str, arguments: Option<Node>) -> AstResult<Node> {
        let lease = self.node_lease("procedure call")?;
        let name = self.name(name)?;
        self.finish(NodeKind::ProcedureCall { name, arguments }, lease)
    }

    fn node_lease(&self, what: &str) -> Result<Lease, AllocError> {
        Lease::acquire(&self.heap, AllocKind::Node, NODE_BYTES).inspect_err(|err| {
            warn!("refused {what} node: {err}");
        })
    }

    fn name(&self, text: &str) -> Result<Name, AllocError> {
        let lease = Lease::acquire(&self.heap, AllocKind::Text, text.len())
            .inspect_err(|err| warn!("refused buffer for '{text}': {err}"))?;
        let text = try_copy_str(text).inspect_err(|err| warn!("cannot copy name: {err}"))?;
        Ok(Name { text, lease })
    }

    fn finish(&self, kind: NodeKind, lease: Lease) -> AstResult<Node> {
        let label = kind.label();
        let inner = try_box(NodeInner { kind, lease }, AllocKind::Node)
            .inspect_err(|err| warn!("cannot box {label} node: {err}"))?;
        trace!("built {label} node");
        Ok(Node { inner })
    }
}

impl Default for NodeFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NodeFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeFactory").finish_non_exhaustive()
    }
}

/// Builds an integer literal on the system heap.
pub fn make_constant(value: i64) -> AstResult<Node> {
    NodeFactory::new().constant(value)
}

/// Builds an identifier on the system heap.
pub fn make_identifier(name: &str) -> AstResult<Node> {
    NodeFactory::new().identifier(name)
}

/// Builds an assignment on the system heap.
pub fn make_assignment(left: Node, right: Node) -> AstResult<Node> {
    NodeFactory::new().assignment(left, right)
}

/// Builds a binary expression on the system heap.
pub fn make_binary_expr(op: BinaryOp, left: Node, right: Node) -> AstResult<Node> {
    NodeFactory::new().binary_expr(op, left, right)
}

/// Builds a procedure call on the system heap.
pub fn make_procedure_call(name: &str, arguments: Option<Node>) -> AstResult<Node> {
    NodeFactory::new().procedure_call(name, arguments)
}
