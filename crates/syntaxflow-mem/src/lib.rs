//! `SyntaxFlow` memory management infrastructure
//!
//! This crate owns the allocation side of the syntax tree:
//!
//! - **Fallible allocation**: [`try_box`] and [`try_copy_str`] report
//!   exhaustion as an [`AllocError`] instead of aborting the process
//! - **Accounting**: every owned resource holds a [`Lease`] on a [`Heap`],
//!   acquired once on construction and released once on drop
//! - **Tracking**: [`TrackingHeap`] counts leases per kind and can be told to
//!   refuse allocations (requires the `tracking` feature)

pub mod fallible;
pub mod heap;

#[cfg(feature = "tracking")]
pub mod tracking;

pub use fallible::{AllocError, AllocKind, try_box, try_copy_str};
pub use heap::{Heap, Lease, SharedHeap, SystemHeap, system_heap};

#[cfg(feature = "tracking")]
pub use tracking::{HeapStats, KindStats, TrackingHeap};
