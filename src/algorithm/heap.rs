use crate::algorithm::wave::WaveState;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// A cell waiting to be collapsed, keyed by its noisy entropy
///
/// Entries are snapshots: a cell may appear several times with different
/// priorities, and stale entries are filtered when popped.
#[derive(Clone, Copy, Debug)]
pub struct EntropyEntry {
    /// Entropy plus jitter at the time of insertion
    pub priority: f64,
    /// Flat cell index
    pub cell: usize,
}

impl PartialEq for EntropyEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EntropyEntry {}

impl Ord for EntropyEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then_with(|| self.cell.cmp(&other.cell))
    }
}

impl PartialOrd for EntropyEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue of cells ordered by entropy, lowest cell index on ties
#[derive(Clone, Debug, Default)]
pub struct EntropyHeap {
    entries: BinaryHeap<Reverse<EntropyEntry>>,
}

impl EntropyHeap {
    /// Create an empty heap
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty heap with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: BinaryHeap::with_capacity(capacity),
        }
    }

    /// Queue a cell at the given priority
    pub fn push(&mut self, cell: usize, priority: f64) {
        self.entries.push(Reverse(EntropyEntry { priority, cell }));
    }

    /// Remove and return the lowest-priority entry
    pub fn pop(&mut self) -> Option<EntropyEntry> {
        self.entries.pop().map(|Reverse(entry)| entry)
    }

    /// Lowest-priority entry without removing it
    pub fn peek(&self) -> Option<EntropyEntry> {
        self.entries.peek().map(|Reverse(entry)| *entry)
    }

    /// Number of queued entries, stale ones included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are queued
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pop entries until one names a cell with at least one possible pattern
    ///
    /// Cells that are already resolved are still returned, collapsing them
    /// again is a no-op.
    pub fn pop_next_undetermined(&mut self, wave: &WaveState) -> Option<usize> {
        while let Some(entry) = self.pop() {
            if wave.remaining(entry.cell) >= 1 {
                return Some(entry.cell);
            }
        }
        None
    }
}
