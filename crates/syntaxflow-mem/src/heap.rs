//! Allocation accounting.
//!
//! A [`Heap`] decides whether a node or text buffer may be created and is told
//! when it goes away. Owners never talk to the heap directly: they hold a
//! [`Lease`], which acquires on creation and releases exactly once on drop.
//! Because a lease cannot be cloned, a resource cannot be released twice.
//!
//! # Examples
//!
//! ```
//! use syntaxflow_mem::{system_heap, AllocKind, Lease};
//!
//! let heap = system_heap();
//! let lease = Lease::acquire(&heap, AllocKind::Node, 32).unwrap();
//! assert_eq!(lease.kind(), AllocKind::Node);
//! // released here
//! ```

use crate::fallible::{AllocError, AllocKind};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Policy and bookkeeping for tree allocations.
pub trait Heap: Send + Sync {
    /// Asks for `bytes` bytes of `kind`. An error refuses the allocation.
    fn acquire(&self, kind: AllocKind, bytes: usize) -> Result<(), AllocError>;

    /// Returns an allocation previously granted by [`Heap::acquire`].
    fn release(&self, kind: AllocKind, bytes: usize);
}

/// Shared handle to a heap, held by every lease.
pub type SharedHeap = Arc<dyn Heap>;

/// Heap that grants every request and keeps no records.
///
/// The underlying allocation is still fallible; see [`crate::try_box`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHeap;

impl Heap for SystemHeap {
    #[inline]
    fn acquire(&self, _kind: AllocKind, _bytes: usize) -> Result<(), AllocError> {
        Ok(())
    }

    #[inline]
    fn release(&self, _kind: AllocKind, _bytes: usize) {}
}

/// Process-wide [`SystemHeap`] used by default constructors.
#[must_use]
pub fn system_heap() -> SharedHeap {
    static HEAP: OnceLock<SharedHeap> = OnceLock::new();
    Arc::clone(HEAP.get_or_init(|| Arc::new(SystemHeap)))
}

/// Proof that one resource was granted by a heap.
pub struct Lease {
    heap: SharedHeap,
    kind: AllocKind,
    bytes: usize,
}

impl Lease {
    /// Acquires `bytes` bytes of `kind` from `heap`.
    pub fn acquire(heap: &SharedHeap, kind: AllocKind, bytes: usize) -> Result<Self, AllocError> {
        heap.acquire(kind, bytes)?;
        Ok(Self {
            heap: Arc::clone(heap),
            kind,
            bytes,
        })
    }

    /// Returns the kind of resource this lease covers.
    #[must_use]
    pub fn kind(&self) -> AllocKind {
        self.kind
    }

    /// Returns the number of bytes this lease covers.
    #[must_use]
    pub fn bytes(&self) -> usize {
        self.bytes
    }
}

impl Drop for Lease {
    fn drop(&mut self) {
        self.heap.release(self.kind, self.bytes);
    }
}

impl fmt::Debug for Lease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lease")
            .field("kind", &self.kind)
            .field("bytes", &self.bytes)
            .finish_non_exhaustive()
    }
}
