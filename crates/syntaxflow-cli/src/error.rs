//! Errors reported by the driver.

use std::fmt;
use std::io;
use syntaxflow_ast::AstError;
use syntaxflow_mem::HeapStats;

/// Ways a driver run can fail.
#[derive(Debug)]
pub enum DriverError {
    /// Writing to the output stream failed.
    Io(io::Error),

    /// A sample tree could not be built.
    Build {
        /// Title of the sample
        sample: &'static str,

        /// Why construction failed
        source: AstError,
    },

    /// Allocations were still live after a sample tree was disposed.
    Leak {
        /// Title of the sample
        sample: &'static str,

        /// Heap counters at the time of the check
        stats: HeapStats,
    },
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "cannot write output: {err}"),
            Self::Build { sample, source } => write!(f, "{sample}: {source}"),
            Self::Leak { sample, stats } => {
                write!(f, "{sample}: allocations outlived the tree: {stats:?}")
            }
        }
    }
}

impl std::error::Error for DriverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Build { source, .. } => Some(source),
            Self::Leak { .. } => None,
        }
    }
}

impl From<io::Error> for DriverError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Result type for driver runs.
pub type DriverResult<T> = Result<T, DriverError>;
