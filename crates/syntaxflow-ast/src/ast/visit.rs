//! Read-only traversal.
//!
//! This is the contract later passes (an evaluator, a code generator) use to
//! consume a tree: shared references only, no mutation, no ownership taken.
//! All walks use an explicit stack.

use crate::ast::node::Node;

impl Node {
    /// Returns the direct children in source order.
    ///
    /// Binary expressions and assignments yield `left` then `right`; a
    /// procedure call yields its argument expression, if any; identifiers and
    /// constants yield nothing.
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.kind().child_slots().into_iter().flatten()
    }

    /// Returns a pre-order iterator over this node and all its descendants.
    #[must_use]
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder { stack: vec![self] }
    }

    /// Returns the number of nodes in the tree rooted here.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.preorder().count()
    }

    /// Returns the length of the longest root-to-leaf path, counting nodes.
    /// A single leaf has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.children().map(|child| (child, depth + 1)));
        }
        deepest
    }
}

/// Pre-order iterator returned by [`Node::preorder`].
#[derive(Debug)]
pub struct Preorder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let [first, second] = node.kind().child_slots();
        self.stack.extend(second);
        self.stack.extend(first);
        Some(node)
    }
}
