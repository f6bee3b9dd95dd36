//! `SyntaxFlow` driver: builds, prints and releases two sample trees.
//!
//! ```text
//! $ syntaxflowc
//! Assignment AST: my_var_x = (4 + 3)
//! Procedure Call AST: my_procedure((1 + 5))
//! ```
//!
//! Set `SYNTAXFLOW_LOG=debug` (or `trace`) to see allocation accounting on
//! stderr. The driver exits with status 1 if construction fails or if any
//! allocation outlives its tree.

mod error;

use error::{DriverError, DriverResult};
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use syntaxflow_ast::{AstResult, BinaryOp, Node, NodeFactory, dispose};
use syntaxflow_log::{debug, error, info};
use syntaxflow_mem::{SharedHeap, TrackingHeap};

/// `my_var_x = (4 + 3)`
fn build_assignment(factory: &NodeFactory) -> AstResult<Node> {
    let expression = factory.binary_expr(
        BinaryOp::Add,
        factory.constant(4)?,
        factory.constant(3)?,
    )?;
    let variable = factory.identifier("my_var_x")?;
    factory.assignment(variable, expression)
}

/// `my_procedure((1 + 5))`
fn build_procedure_call(factory: &NodeFactory) -> AstResult<Node> {
    let args = factory.binary_expr(
        BinaryOp::Add,
        factory.constant(1)?,
        factory.constant(5)?,
    )?;
    factory.procedure_call("my_procedure", Some(args))
}

type Sample = (&'static str, fn(&NodeFactory) -> AstResult<Node>);

const SAMPLES: [Sample; 2] = [
    ("Assignment AST", build_assignment),
    ("Procedure Call AST", build_procedure_call),
];

fn run(out: &mut impl Write, tracker: &TrackingHeap, factory: &NodeFactory) -> DriverResult<()> {
    writeln!(out, "$ syntaxflowc")?;

    for (sample, build) in SAMPLES {
        let tree = build(factory).map_err(|source| DriverError::Build { sample, source })?;
        debug!(
            "{sample}: {} nodes, depth {}, {} live allocations",
            tree.node_count(),
            tree.depth(),
            tracker.stats().live()
        );

        writeln!(out, "{sample}: {tree}")?;
        dispose(Some(tree));

        let stats = tracker.stats();
        debug!("{sample}: released, {} live allocations", stats.live());
        if !stats.is_balanced() {
            return Err(DriverError::Leak { sample, stats });
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = syntaxflow_log::init_from_env() {
        eprintln!("syntaxflowc: {err}; keeping the default level");
    }

    let tracker = Arc::new(TrackingHeap::new());
    let heap: SharedHeap = tracker.clone();
    let factory = NodeFactory::with_heap(heap);

    let stdout = io::stdout();
    match run(&mut stdout.lock(), &tracker, &factory) {
        Ok(()) => {
            info!("{} allocations, all released", tracker.stats().acquired());
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syntaxflow_ast::AstError;
    use syntaxflow_mem::AllocKind;

    fn tracked() -> (Arc<TrackingHeap>, NodeFactory) {
        let tracker = Arc::new(TrackingHeap::new());
        let heap: SharedHeap = tracker.clone();
        (tracker, NodeFactory::with_heap(heap))
    }

    #[test]
    fn test_driver_output() {
        let (tracker, factory) = tracked();
        let mut out = Vec::new();

        run(&mut out, &tracker, &factory).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "$ syntaxflowc\n\
             Assignment AST: my_var_x = (4 + 3)\n\
             Procedure Call AST: my_procedure((1 + 5))\n"
        );
        assert!(tracker.stats().is_balanced());
    }

    #[test]
    fn test_driver_reports_allocation_failure() {
        let (tracker, factory) = tracked();
        tracker.fail_on(AllocKind::Text);
        let mut out = Vec::new();

        let err = run(&mut out, &tracker, &factory).unwrap_err();

        assert!(matches!(
            err,
            DriverError::Build { sample: "Assignment AST", source: AstError::Alloc(e) }
                if e.kind() == AllocKind::Text
        ));
        assert!(err.to_string().starts_with("Assignment AST: cannot build syntax tree"));
        assert!(tracker.stats().is_balanced());
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_driver_reports_write_failure() {
        let (tracker, factory) = tracked();

        let err = run(&mut ClosedPipe, &tracker, &factory).unwrap_err();

        assert!(matches!(err, DriverError::Io(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
        assert_eq!(tracker.stats().acquired(), 0);
    }
}
