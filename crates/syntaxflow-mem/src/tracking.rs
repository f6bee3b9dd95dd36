//! Allocation-tracking heap with failure injection.
//!
//! [`TrackingHeap`] records every acquisition and release per [`AllocKind`].
//! A tree that was built and then dropped must leave the heap balanced
//! (`live == 0`) with no release that lacked a matching acquisition. It can
//! also be told to refuse allocations, which exercises the error paths of
//! code that would otherwise only fail when the machine runs out of memory.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use syntaxflow_mem::{AllocKind, Lease, SharedHeap, TrackingHeap};
//!
//! let tracker = Arc::new(TrackingHeap::new());
//! let heap: SharedHeap = tracker.clone();
//!
//! let lease = Lease::acquire(&heap, AllocKind::Node, 24).unwrap();
//! assert_eq!(tracker.stats().live(), 1);
//!
//! drop(lease);
//! assert!(tracker.stats().is_balanced());
//!
//! tracker.fail_after(0);
//! assert!(Lease::acquire(&heap, AllocKind::Node, 24).is_err());
//! ```

use crate::fallible::{AllocError, AllocKind};
use crate::heap::Heap;
use hashbrown::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Counters for one kind of allocation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct KindStats {
    /// Successful acquisitions.
    pub acquired: usize,
    /// Matched releases.
    pub released: usize,
    /// Acquired and not yet released.
    pub live: usize,
    /// Bytes held by live allocations.
    pub live_bytes: usize,
    /// Releases with no live allocation to match (double free).
    pub double_releases: usize,
    /// Acquisitions refused by failure injection.
    pub failures: usize,
}

/// Snapshot of a [`TrackingHeap`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HeapStats {
    kinds: HashMap<AllocKind, KindStats>,
}

impl HeapStats {
    /// Counters for one kind; all zero if the kind was never seen.
    #[must_use]
    pub fn kind(&self, kind: AllocKind) -> KindStats {
        self.kinds.get(&kind).copied().unwrap_or_default()
    }

    /// Live allocations across all kinds.
    #[must_use]
    pub fn live(&self) -> usize {
        self.kinds.values().map(|k| k.live).sum()
    }

    /// Successful acquisitions across all kinds.
    #[must_use]
    pub fn acquired(&self) -> usize {
        self.kinds.values().map(|k| k.acquired).sum()
    }

    /// Matched releases across all kinds.
    #[must_use]
    pub fn released(&self) -> usize {
        self.kinds.values().map(|k| k.released).sum()
    }

    /// Unmatched releases across all kinds.
    #[must_use]
    pub fn double_releases(&self) -> usize {
        self.kinds.values().map(|k| k.double_releases).sum()
    }

    /// Injected failures across all kinds.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.kinds.values().map(|k| k.failures).sum()
    }

    /// No leak and no double free.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.live() == 0 && self.double_releases() == 0
    }
}

#[derive(Debug, Default)]
struct State {
    stats: HeapStats,
    /// Acquisitions still allowed before the next one is refused.
    fail_after: Option<usize>,
    /// Kind whose acquisitions are always refused.
    fail_kind: Option<AllocKind>,
}

impl State {
    fn should_fail(&mut self, kind: AllocKind) -> bool {
        if self.fail_kind == Some(kind) {
            return true;
        }
        match self.fail_after {
            Some(0) => {
                self.fail_after = None;
                true
            }
            Some(n) => {
                self.fail_after = Some(n - 1);
                false
            }
            None => false,
        }
    }
}

/// Heap that counts leases and can refuse them on request.
#[derive(Debug, Default)]
pub struct TrackingHeap {
    state: Mutex<State>,
}

impl TrackingHeap {
    /// Creates an empty tracker that grants everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Grants the next `n` acquisitions, refuses the one after, then goes
    /// back to granting.
    pub fn fail_after(&self, n: usize) {
        self.lock().fail_after = Some(n);
    }

    /// Refuses every acquisition of `kind` until [`Self::clear_failures`].
    pub fn fail_on(&self, kind: AllocKind) {
        self.lock().fail_kind = Some(kind);
    }

    /// Cancels all pending failure injection.
    pub fn clear_failures(&self) {
        let mut state = self.lock();
        state.fail_after = None;
        state.fail_kind = None;
    }

    /// Returns a snapshot of the counters.
    #[must_use]
    pub fn stats(&self) -> HeapStats {
        self.lock().stats.clone()
    }
}

impl Heap for TrackingHeap {
    fn acquire(&self, kind: AllocKind, bytes: usize) -> Result<(), AllocError> {
        let mut state = self.lock();
        if state.should_fail(kind) {
            state.stats.kinds.entry(kind).or_default().failures += 1;
            return Err(AllocError::new(kind, bytes));
        }

        let entry = state.stats.kinds.entry(kind).or_default();
        entry.acquired += 1;
        entry.live += 1;
        entry.live_bytes += bytes;
        Ok(())
    }

    fn release(&self, kind: AllocKind, bytes: usize) {
        let mut state = self.lock();
        let entry = state.stats.kinds.entry(kind).or_default();
        if entry.live == 0 {
            entry.double_releases += 1;
            return;
        }
        entry.live -= 1;
        entry.live_bytes = entry.live_bytes.saturating_sub(bytes);
        entry.released += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_per_kind() {
        let heap = TrackingHeap::new();
        heap.acquire(AllocKind::Node, 32).unwrap();
        heap.acquire(AllocKind::Node, 32).unwrap();
        heap.acquire(AllocKind::Text, 5).unwrap();

        let stats = heap.stats();
        assert_eq!(stats.kind(AllocKind::Node).live, 2);
        assert_eq!(stats.kind(AllocKind::Node).live_bytes, 64);
        assert_eq!(stats.kind(AllocKind::Text).live, 1);
        assert_eq!(stats.live(), 3);

        heap.release(AllocKind::Node, 32);
        heap.release(AllocKind::Node, 32);
        heap.release(AllocKind::Text, 5);
        let stats = heap.stats();
        assert!(stats.is_balanced());
        assert_eq!(stats.released(), 3);
    }

    #[test]
    fn test_unmatched_release_is_double_free() {
        let heap = TrackingHeap::new();
        heap.acquire(AllocKind::Text, 3).unwrap();
        heap.release(AllocKind::Text, 3);
        heap.release(AllocKind::Text, 3);

        let stats = heap.stats();
        assert_eq!(stats.double_releases(), 1);
        assert!(!stats.is_balanced());
    }

    #[test]
    fn test_fail_after_is_one_shot() {
        let heap = TrackingHeap::new();
        heap.fail_after(2);

        assert!(heap.acquire(AllocKind::Node, 1).is_ok());
        assert!(heap.acquire(AllocKind::Node, 1).is_ok());
        let err = heap.acquire(AllocKind::Text, 4).unwrap_err();
        assert_eq!(err.kind(), AllocKind::Text);
        assert!(heap.acquire(AllocKind::Node, 1).is_ok());

        let stats = heap.stats();
        assert_eq!(stats.failures(), 1);
        assert_eq!(stats.kind(AllocKind::Node).acquired, 3);
    }

    #[test]
    fn test_fail_on_kind() {
        let heap = TrackingHeap::new();
        heap.fail_on(AllocKind::Text);

        assert!(heap.acquire(AllocKind::Node, 1).is_ok());
        assert!(heap.acquire(AllocKind::Text, 1).is_err());
        assert!(heap.acquire(AllocKind::Text, 1).is_err());

        heap.clear_failures();
        assert!(heap.acquire(AllocKind::Text, 1).is_ok());
        assert_eq!(heap.stats().kind(AllocKind::Text).failures, 2);
    }

    #[test]
    fn test_unseen_kind_is_zero() {
        let heap = TrackingHeap::new();
        assert_eq!(heap.stats().kind(AllocKind::Text), KindStats::default());
        assert!(heap.stats().is_balanced());
    }
}
