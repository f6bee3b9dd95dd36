//! Allocation that reports exhaustion instead of aborting.
//!
//! `Box::new` and `String::from` abort the process when the global allocator
//! returns null. The helpers here go to the allocator directly and hand the
//! failure back to the caller as an [`AllocError`], so a constructor can
//! unwind what it already owns and return an error.
//!
//! # Examples
//!
//! ```
//! use syntaxflow_mem::{try_box, try_copy_str, AllocKind};
//!
//! let boxed = try_box(42u64, AllocKind::Node).unwrap();
//! assert_eq!(*boxed, 42);
//!
//! let name = try_copy_str("my_var_x").unwrap();
//! assert_eq!(name, "my_var_x");
//! ```

use std::alloc::{self as sys, Layout};
use std::fmt;
use std::ptr::NonNull;

/// The kind of resource an allocation was made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AllocKind {
    /// A tree node
    Node,
    /// An owned text buffer (identifier or procedure name)
    Text,
}

impl fmt::Display for AllocKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node => write!(f, "node"),
            Self::Text => write!(f, "text buffer"),
        }
    }
}

/// Storage for a node or text buffer could not be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocError {
    kind: AllocKind,
    bytes: usize,
}

impl AllocError {
    /// Creates an error for a refused request of `bytes` bytes.
    #[must_use]
    pub const fn new(kind: AllocKind, bytes: usize) -> Self {
        Self { kind, bytes }
    }

    /// Returns the kind of resource that was requested.
    #[must_use]
    pub const fn kind(&self) -> AllocKind {
        self.kind
    }

    /// Returns the size of the refused request.
    #[must_use]
    pub const fn bytes(&self) -> usize {
        self.bytes
    }
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "allocation failed: out of memory for {} ({} bytes)",
            self.kind, self.bytes
        )
    }
}

impl std::error::Error for AllocError {}

/// Moves `value` into a fresh heap allocation.
///
/// On failure `value` is dropped before the error is returned, so anything
/// it owns is released rather than leaked.
pub fn try_box<T>(value: T, kind: AllocKind) -> Result<Box<T>, AllocError> {
    let layout = Layout::new::<T>();
    if layout.size() == 0 {
        return Ok(Box::new(value));
    }

    // SAFETY: layout has a non-zero size (checked above).
    let raw = unsafe { sys::alloc(layout) }.cast::<T>();
    let Some(ptr) = NonNull::new(raw) else {
        drop(value);
        return Err(AllocError::new(kind, layout.size()));
    };

    // SAFETY: ptr was just returned by the global allocator for
    // `Layout::new::<T>()`, is properly aligned and uninitialised, which is
    // exactly what `Box::from_raw` requires once the value is written.
    unsafe {
        ptr.as_ptr().write(value);
        Ok(Box::from_raw(ptr.as_ptr()))
    }
}

/// Copies `text` into an owned buffer of exactly its length.
pub fn try_copy_str(text: &str) -> Result<String, AllocError> {
    let mut owned = String::new();
    owned
        .try_reserve_exact(text.len())
        .map_err(|_| AllocError::new(AllocKind::Text, text.len()))?;
    owned.push_str(text);
    Ok(owned)
}
