//! `Frontier`: min-priority queue of pending locations.
//!
//! # Lazy decrease-key
//!
//! The frontier never updates an entry in place.  When a search finds a
//! cheaper way to a location it inserts a second entry with the lower
//! priority; the older entry stays queued and surfaces later.  Recognising
//! and discarding such stale entries is the consumer's job (the engine checks
//! its finalized flags), not the frontier's.
//!
//! # Ordering
//!
//! Entries are ordered by `(priority, item)`.  Equal priorities therefore
//! extract the smaller item first, which keeps every search deterministic.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use kr_core::Cost;

/// A min-heap of `(priority, item)` entries.
#[derive(Debug, Clone)]
pub struct Frontier<T: Ord> {
    // Reverse makes BinaryHeap (max) behave as min-heap.
    heap: BinaryHeap<Reverse<(Cost, T)>>,
}

impl<T: Ord> Frontier<T> {
    pub fn new() -> Self {
        Self { heap: BinaryHeap::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { heap: BinaryHeap::with_capacity(capacity) }
    }

    /// Queue `item` at `priority`.  O(log n).
    ///
    /// The same item may be queued any number of times.
    pub fn insert(&mut self, item: T, priority: Cost) {
        self.heap.push(Reverse((priority, item)));
    }

    /// Remove and return the lowest-priority entry as `(item, priority)`.
    ///
    /// Returns `None` on an empty frontier; a search loop uses that as its
    /// termination condition.  O(log n).
    pub fn extract_min(&mut self) -> Option<(T, Cost)> {
        self.heap.pop().map(|Reverse((priority, item))| (item, priority))
    }

    /// Priority of the entry `extract_min` would return next.
    pub fn peek_priority(&self) -> Option<Cost> {
        self.heap.peek().map(|Reverse((priority, _))| *priority)
    }

    /// Number of queued entries, stale ones included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

impl<T: Ord> Default for Frontier<T> {
    fn default() -> Self {
        Self::new()
    }
}
