//! Tree disposal.
//!
//! Dropping a [`Node`] releases the node and everything it owns, post-order:
//! children first (left to right), then the node's text buffer, then the node
//! itself. [`dispose`] is the explicit form of the same operation.
//!
//! The walk keeps its own stack instead of recursing, so a pathologically
//! deep tree (say, a hundred thousand nested additions) is released without
//! exhausting the thread's call stack. Each child is detached from its parent
//! before it is dropped, which means the `Drop` impl of a detached node finds
//! no children and never nests.

use crate::ast::node::{Name, Node, NodeKind};
use std::mem;
use syntaxflow_log::{Level, get_logger, trace};

/// Payload left in a node whose children have been moved out.
const DETACHED: NodeKind = NodeKind::Constant { value: 0 };

enum Frame {
    /// Detach this node's children and schedule them.
    Enter(Node),
    /// Children are gone; release the text buffer, then the node.
    Leave(Node, Option<Name>),
}

impl Node {
    fn detach(&mut self) -> (Option<Name>, [Option<Node>; 2]) {
        mem::replace(&mut self.inner.kind, DETACHED).into_parts()
    }
}

fn schedule(stack: &mut Vec<Frame>, children: [Option<Node>; 2]) {
    // Reversed so the left child is popped first.
    for child in children.into_iter().rev().flatten() {
        stack.push(Frame::Enter(child));
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let (name, children) = self.detach();

        let mut stack = Vec::new();
        schedule(&mut stack, children);

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(mut node) => {
                    let (name, children) = node.detach();
                    stack.push(Frame::Leave(node, name));
                    schedule(&mut stack, children);
                }
                Frame::Leave(node, name) => {
                    drop(name);
                    drop(node);
                }
            }
        }

        drop(name);
        // `self.inner` (and with it the node's own lease) goes next.
    }
}

/// Releases `tree` and everything it owns.
///
/// `None` is accepted and does nothing. The handle is consumed, so the same
/// tree cannot be disposed twice.
///
/// # Examples
///
/// ```
/// use syntaxflow_ast::{dispose, make_identifier};
///
/// dispose(None);
/// dispose(Some(make_identifier("x").unwrap()));
/// ```
pub fn dispose(tree: Option<Node>) {
    let Some(root) = tree else {
        return;
    };

    if get_logger().enabled(Level::Trace) {
        trace!(
            "disposing {} tree of {} nodes",
            root.kind().label(),
            root.node_count()
        );
    }
    drop(root);
}
