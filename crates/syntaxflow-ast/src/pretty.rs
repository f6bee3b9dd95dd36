//! Pretty-printer for `SyntaxFlow` trees.
//!
//! Produces the canonical text of a tree:
//!
//! | Node | Text |
//! |---|---|
//! | constant | decimal value |
//! | identifier | the name |
//! | binary expression | `(left op right)` |
//! | procedure call | `name(arguments)` |
//! | assignment | `left = right` |
//!
//! Every binary expression is parenthesised, however it is nested, so the
//! output does not depend on operator precedence. Rendering only reads the
//! tree and walks it with an explicit stack.
//!
//! The `Debug` output of [`Node`] and [`NodeKind`] is produced here as well,
//! with the same explicit stack. It has the shape a derived impl would
//! print, always on one line; `{:#?}` is not expanded.

use crate::ast::{Node, NodeKind};
use std::fmt::{self, Write};

enum Piece<'a> {
    Kind(&'a NodeKind),
    Text(&'static str),
}

/// Writes the canonical text of `node` into `out`.
pub fn write_node<W: Write>(out: &mut W, node: &Node) -> fmt::Result {
    let mut stack = vec![Piece::Kind(node.kind())];

    while let Some(piece) = stack.pop() {
        let kind = match piece {
            Piece::Text(text) => {
                out.write_str(text)?;
                continue;
            }
            Piece::Kind(kind) => kind,
        };

        match kind {
            NodeKind::Constant { value } => write!(out, "{value}")?,

            NodeKind::Identifier { name } => out.write_str(name.as_str())?,

            NodeKind::BinaryExpr { op, left, right } => {
                out.write_char('(')?;
                stack.push(Piece::Text(")"));
                stack.push(Piece::Kind(right.kind()));
                stack.push(Piece::Text(op.spaced()));
                stack.push(Piece::Kind(left.kind()));
            }

            NodeKind::ProcedureCall { name, arguments } => {
                out.write_str(name.as_str())?;
                out.write_char('(')?;
                stack.push(Piece::Text(")"));
                if let Some(arguments) = arguments {
                    stack.push(Piece::Kind(arguments.kind()));
                }
            }

            NodeKind::Assignment { left, right } => {
                stack.push(Piece::Kind(right.kind()));
                stack.push(Piece::Text(" = "));
                stack.push(Piece::Kind(left.kind()));
            }
        }
    }

    Ok(())
}

/// Writes the variant structure of `kind`, e.g.
/// `BinaryExpr { op: Add, left: Constant { value: 4 }, right: .. }`.
fn write_structure<W: Write>(out: &mut W, kind: &NodeKind) -> fmt::Result {
    let mut stack = vec![Piece::Kind(kind)];

    while let Some(piece) = stack.pop() {
        let kind = match piece {
            Piece::Text(text) => {
                out.write_str(text)?;
                continue;
            }
            Piece::Kind(kind) => kind,
        };

        match kind {
            NodeKind::Constant { value } => write!(out, "Constant {{ value: {value} }}")?,

            NodeKind::Identifier { name } => write!(out, "Identifier {{ name: {name:?} }}")?,

            NodeKind::BinaryExpr { op, left, right } => {
                write!(out, "BinaryExpr {{ op: {op:?}, left: ")?;
                stack.push(Piece::Text(" }"));
                stack.push(Piece::Kind(right.kind()));
                stack.push(Piece::Text(", right: "));
                stack.push(Piece::Kind(left.kind()));
            }

            NodeKind::ProcedureCall { name, arguments } => {
                write!(out, "ProcedureCall {{ name: {name:?}, arguments: ")?;
                match arguments {
                    Some(arguments) => {
                        out.write_str("Some(")?;
                        stack.push(Piece::Text(") }"));
                        stack.push(Piece::Kind(arguments.kind()));
                    }
                    None => out.write_str("None }")?,
                }
            }

            NodeKind::Assignment { left, right } => {
                out.write_str("Assignment { left: ")?;
                stack.push(Piece::Text(" }"));
                stack.push(Piece::Kind(right.kind()));
                stack.push(Piece::Text(", right: "));
                stack.push(Piece::Kind(left.kind()));
            }
        }
    }

    Ok(())
}

/// Returns the canonical text of `tree`; `None` renders as an empty string.
///
/// # Examples
///
/// ```
/// use syntaxflow_ast::{make_binary_expr, make_constant, render, BinaryOp};
///
/// let product = make_binary_expr(
///     BinaryOp::Multiply,
///     make_constant(2).unwrap(),
///     make_constant(3).unwrap(),
/// )
/// .unwrap();
/// let sum = make_binary_expr(BinaryOp::Add, product, make_constant(4).unwrap()).unwrap();
///
/// assert_eq!(render(Some(&sum)), "((2 * 3) + 4)");
/// assert_eq!(render(None), "");
/// ```
#[must_use]
pub fn render(tree: Option<&Node>) -> String {
    let mut out = String::new();
    if let Some(node) = tree {
        // Writing into a String cannot fail.
        let _ = write_node(&mut out, node);
    }
    out
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_structure(f, self.kind())
    }
}

impl fmt::Debug for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_structure(f, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{
        BinaryOp, make_assignment, make_binary_expr, make_constant, make_identifier,
        make_procedure_call,
    };

    #[test]
    fn test_render_leaves() {
        assert_eq!(render(Some(&make_constant(0).unwrap())), "0");
        assert_eq!(render(Some(&make_constant(-42).unwrap())), "-42");
        assert_eq!(render(Some(&make_identifier("my_var_x").unwrap())), "my_var_x");
    }

    #[test]
    fn test_render_every_operator() {
        for (op, text) in [
            (BinaryOp::Add, "(1 + 2)"),
            (BinaryOp::Subtract, "(1 - 2)"),
            (BinaryOp::Multiply, "(1 * 2)"),
            (BinaryOp::Divide, "(1 / 2)"),
        ] {
            let node =
                make_binary_expr(op, make_constant(1).unwrap(), make_constant(2).unwrap()).unwrap();
            assert_eq!(node.to_string(), text);
        }
    }

    #[test]
    fn test_render_right_nested() {
        let inner = make_binary_expr(
            BinaryOp::Divide,
            make_identifier("b").unwrap(),
            make_constant(2).unwrap(),
        )
        .unwrap();
        let outer =
            make_binary_expr(BinaryOp::Subtract, make_identifier("a").unwrap(), inner).unwrap();
        assert_eq!(render(Some(&outer)), "(a - (b / 2))");
    }

    #[test]
    fn test_render_assignment_has_no_parens() {
        let tree =
            make_assignment(make_identifier("x").unwrap(), make_constant(1).unwrap()).unwrap();
        assert_eq!(render(Some(&tree)), "x = 1");
    }

    #[test]
    fn test_render_nested_call_and_assignment() {
        let call = make_procedure_call("g", Some(make_identifier("y").unwrap())).unwrap();
        let tree = make_assignment(make_identifier("x").unwrap(), call).unwrap();
        assert_eq!(tree.to_string(), "x = g(y)");
    }

    #[test]
    fn test_render_assignment_inside_call() {
        let assign =
            make_assignment(make_identifier("a").unwrap(), make_constant(1).unwrap()).unwrap();
        let call = make_procedure_call("h", Some(assign)).unwrap();
        assert_eq!(call.to_string(), "h(a = 1)");
    }

    #[test]
    fn test_write_node_into_sink() {
        let node = make_procedure_call("f", None).unwrap();
        let mut out = String::from("> ");
        write_node(&mut out, &node).unwrap();
        assert_eq!(out, "> f()");
    }

    #[test]
    fn test_debug_shows_structure() {
        let sum =
            make_binary_expr(BinaryOp::Add, make_constant(4).unwrap(), make_constant(3).unwrap())
                .unwrap();
        let tree = make_assignment(make_identifier("my_var_x").unwrap(), sum).unwrap();

        let expected = "Assignment { left: Identifier { name: \"my_var_x\" }, \
                        right: BinaryExpr { op: Add, left: Constant { value: 4 }, \
                        right: Constant { value: 3 } } }";
        assert_eq!(format!("{tree:?}"), expected);
        assert_eq!(format!("{:?}", tree.kind()), expected);
    }

    #[test]
    fn test_debug_procedure_call_arguments() {
        let bare = make_procedure_call("f", None).unwrap();
        assert_eq!(format!("{bare:?}"), "ProcedureCall { name: \"f\", arguments: None }");

        let call = make_procedure_call("g", Some(make_identifier("y").unwrap())).unwrap();
        assert_eq!(
            format!("{call:?}"),
            "ProcedureCall { name: \"g\", arguments: Some(Identifier { name: \"y\" }) }"
        );
    }
}
