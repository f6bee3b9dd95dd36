//! Error types for tree construction.
//!
//! Building a node can only fail for one reason: storage for the node or
//! for one of its text buffers could not be obtained. Malformed trees are
//! ruled out by the type system, and disposal or rendering of an empty tree
//! is a no-op rather than an error.

use std::fmt;
use syntaxflow_mem::AllocError;

/// Errors returned by node constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstError {
    /// Storage could not be obtained.
    ///
    /// Everything handed to the failing constructor has already been
    /// released; the caller must not (and cannot) release it again.
    Alloc(AllocError),
}

impl fmt::Display for AstError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alloc(err) => write!(f, "cannot build syntax tree: {err}"),
        }
    }
}

impl std::error::Error for AstError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Alloc(err) => Some(err),
        }
    }
}

impl From<AllocError> for AstError {
    fn from(err: AllocError) -> Self {
        Self::Alloc(err)
    }
}

/// Result type for tree construction.
pub type AstResult<T> = Result<T, AstError>;
