// Shared fixtures for the integration tests.
//
// Every tree built through `tracked()` is accounted to a fresh
// `TrackingHeap`, so a test can check for leaks and double frees once the
// tree is gone.

#![allow(dead_code)]

use std::sync::Arc;
use syntaxflow_ast::{AstResult, BinaryOp, Node, NodeFactory};
use syntaxflow_mem::{SharedHeap, TrackingHeap};

/// Returns a tracker and a factory that allocates from it.
pub fn tracked() -> (Arc<TrackingHeap>, NodeFactory) {
    let tracker = Arc::new(TrackingHeap::new());
    let heap: SharedHeap = tracker.clone();
    (tracker, NodeFactory::with_heap(heap))
}

/// Asserts that nothing is live and nothing was released twice.
pub fn assert_balanced(tracker: &TrackingHeap) {
    let stats = tracker.stats();
    assert_eq!(stats.live(), 0, "leaked allocations: {stats:?}");
    assert_eq!(stats.double_releases(), 0, "double free: {stats:?}");
    assert_eq!(stats.acquired(), stats.released());
}

/// `my_var_x = (4 + 3)`
pub fn sample_assignment(factory: &NodeFactory) -> AstResult<Node> {
    let expression = factory.binary_expr(
        BinaryOp::Add,
        factory.constant(4)?,
        factory.constant(3)?,
    )?;
    let variable = factory.identifier("my_var_x")?;
    factory.assignment(variable, expression)
}

/// `my_procedure((1 + 5))`
pub fn sample_call(factory: &NodeFactory) -> AstResult<Node> {
    let args = factory.binary_expr(
        BinaryOp::Add,
        factory.constant(1)?,
        factory.constant(5)?,
    )?;
    factory.procedure_call("my_procedure", Some(args))
}

/// `(((0 + 1) + 2) + ... + (depth - 1))`, nested on the left.
pub fn left_nested_sum(factory: &NodeFactory, depth: i64) -> AstResult<Node> {
    let mut tree = factory.constant(0)?;
    for i in 1..depth {
        tree = factory.binary_expr(BinaryOp::Add, tree, factory.constant(i)?)?;
    }
    Ok(tree)
}
