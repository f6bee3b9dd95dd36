//! Node data model.
//!
//! A tree is made of heap-allocated [`Node`]s. Each node carries exactly one
//! [`NodeKind`] payload, fixed at construction. Owned text lives in [`Name`]s,
//! which are independent copies of whatever the caller passed in.

use std::fmt;
use syntaxflow_mem::Lease;

/// An owned node of the syntax tree.
///
/// Nodes are created by the constructors in [`crate::ast::build`] and are
/// released when dropped (see [`crate::ast::dispose`]). A node cannot be
/// cloned and never changes after construction.
///
/// `Display` writes the canonical text and `Debug` writes the variant
/// structure (see [`crate::pretty`]). Both walk the tree with an explicit
/// stack, so formatting any tree that could be built is safe.
pub struct Node {
    pub(crate) inner: Box<NodeInner>,
}

pub(crate) struct NodeInner {
    pub(crate) kind: NodeKind,
    /// Released after `kind`, which owns the children.
    pub(crate) lease: Lease,
}

impl Node {
    /// Returns the payload of this node.
    #[must_use]
    pub fn kind(&self) -> &NodeKind {
        &self.inner.kind
    }

    /// Returns true if this node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind().child_slots(), [None, None])
    }

    /// Returns the number of bytes accounted to this node, excluding text
    /// buffers and children.
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.inner.lease.bytes()
    }
}

/// The payload of a node, one variant per construct.
pub enum NodeKind {
    /// Arithmetic on two operands: `(left op right)`
    BinaryExpr {
        /// The operator
        op: BinaryOp,
        /// Left operand
        left: Node,
        /// Right operand
        right: Node,
    },

    /// A bare name: `x`
    Identifier {
        /// The name as written
        name: Name,
    },

    /// An integer literal: `42`
    Constant {
        /// The literal value
        value: i64,
    },

    /// A call: `name(arguments)`
    ///
    /// The argument list is a single expression. Several arguments are
    /// combined into one node (typically a [`NodeKind::BinaryExpr`]), and a
    /// call without arguments has `None`.
    ProcedureCall {
        /// The procedure being called
        name: Name,
        /// The argument expression, if any
        arguments: Option<Node>,
    },

    /// An assignment: `left = right`
    ///
    /// The target is conventionally an identifier, but any node is accepted.
    Assignment {
        /// The assignment target
        left: Node,
        /// The assigned value
        right: Node,
    },
}

impl NodeKind {
    /// Returns a short human-readable name for the variant.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::BinaryExpr { .. } => "binary expression",
            Self::Identifier { .. } => "identifier",
            Self::Constant { .. } => "constant",
            Self::ProcedureCall { .. } => "procedure call",
            Self::Assignment { .. } => "assignment",
        }
    }

    /// Returns the direct children in source order, padded with `None`.
    pub(crate) fn child_slots(&self) -> [Option<&Node>; 2] {
        match self {
            Self::BinaryExpr { left, right, .. } | Self::Assignment { left, right } => {
                [Some(left), Some(right)]
            }
            Self::ProcedureCall { arguments, .. } => [arguments.as_ref(), None],
            Self::Identifier { .. } | Self::Constant { .. } => [None, None],
        }
    }

    /// Moves the owned parts out of the payload.
    pub(crate) fn into_parts(self) -> (Option<Name>, [Option<Node>; 2]) {
        match self {
            Self::BinaryExpr { left, right, .. } | Self::Assignment { left, right } => {
                (None, [Some(left), Some(right)])
            }
            Self::ProcedureCall { name, arguments } => (Some(name), [arguments, None]),
            Self::Identifier { name } => (Some(name), [None, None]),
            Self::Constant { .. } => (None, [None, None]),
        }
    }
}

/// Arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// Addition: `+`
    Add,
    /// Subtraction: `-`
    Subtract,
    /// Multiplication: `*`
    Multiply,
    /// Division: `/`
    Divide,
}

impl BinaryOp {
    /// Returns the operator symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }

    /// Returns the symbol with one space on either side.
    pub(crate) const fn spaced(self) -> &'static str {
        match self {
            Self::Add => " + ",
            Self::Subtract => " - ",
            Self::Multiply => " * ",
            Self::Divide => " / ",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// An owned copy of an identifier or procedure name.
pub struct Name {
    pub(crate) text: String,
    pub(crate) lease: Lease,
}

impl Name {
    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the number of bytes accounted to this buffer.
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.lease.bytes()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.text, f)
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}
