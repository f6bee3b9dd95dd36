//! Rendering tests for complete trees.

mod common;

use common::{assert_balanced, sample_assignment, sample_call, tracked};
use syntaxflow_ast::{
    BinaryOp, dispose, make_assignment, make_binary_expr, make_constant, make_identifier,
    make_procedure_call, render, write_node,
};

#[test]
fn test_full_parenthesization() {
    let tree = make_binary_expr(
        BinaryOp::Add,
        make_binary_expr(BinaryOp::Multiply, make_constant(2).unwrap(), make_constant(3).unwrap())
            .unwrap(),
        make_constant(4).unwrap(),
    )
    .unwrap();

    assert_eq!(render(Some(&tree)), "((2 * 3) + 4)");
}

#[test]
fn test_assignment_scenario() {
    let tree = make_assignment(
        make_identifier("x").unwrap(),
        make_binary_expr(BinaryOp::Add, make_constant(4).unwrap(), make_constant(3).unwrap())
            .unwrap(),
    )
    .unwrap();

    assert_eq!(render(Some(&tree)), "x = (4 + 3)");
}

#[test]
fn test_procedure_call_with_expression_argument() {
    let tree = make_procedure_call(
        "my_procedure",
        Some(
            make_binary_expr(BinaryOp::Add, make_constant(1).unwrap(), make_constant(5).unwrap())
                .unwrap(),
        ),
    )
    .unwrap();

    assert_eq!(render(Some(&tree)), "my_procedure((1 + 5))");
}

#[test]
fn test_empty_argument_call() {
    let tree = make_procedure_call("f", None).unwrap();
    assert_eq!(render(Some(&tree)), "f()");
}

#[test]
fn test_empty_tree_renders_empty() {
    assert_eq!(render(None), "");
}

#[test]
fn test_render_is_deterministic_and_read_only() {
    let (tracker, f) = tracked();
    let tree = sample_assignment(&f).unwrap();
    let before = tracker.stats();

    let first = render(Some(&tree));
    let second = render(Some(&tree));
    let third = tree.to_string();

    assert_eq!(first, second);
    assert_eq!(first, third);
    assert_eq!(tracker.stats(), before);

    dispose(Some(tree));
    assert_balanced(&tracker);
}

#[test]
fn test_concurrent_rendering_of_shared_tree() {
    let (_tracker, f) = tracked();
    let tree = sample_call(&f).unwrap();

    let outputs: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| render(Some(&tree))))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(outputs.iter().all(|out| out == "my_procedure((1 + 5))"));
}

#[test]
fn test_write_node_appends_to_sink() {
    let (_tracker, f) = tracked();
    let assignment = sample_assignment(&f).unwrap();
    let call = sample_call(&f).unwrap();

    let mut out = String::new();
    out.push_str("Assignment AST: ");
    write_node(&mut out, &assignment).unwrap();
    out.push('\n');
    out.push_str("Procedure Call AST: ");
    write_node(&mut out, &call).unwrap();

    assert_eq!(
        out,
        "Assignment AST: my_var_x = (4 + 3)\nProcedure Call AST: my_procedure((1 + 5))"
    );
}
