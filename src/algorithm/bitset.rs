use bitvec::prelude::*;
use std::fmt;

/// Fixed-size set of pattern ids still possible at one cell
///
/// Ids are 0-based positions in the pattern catalog. Out-of-range ids are
/// never members and are ignored on insert or removal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternSet {
    bits: BitVec,
}

impl PatternSet {
    /// Create a set with no patterns present
    pub fn new(pattern_count: usize) -> Self {
        Self {
            bits: bitvec![0; pattern_count],
        }
    }

    /// Create a set containing every pattern
    pub fn all(pattern_count: usize) -> Self {
        Self {
            bits: bitvec![1; pattern_count],
        }
    }

    /// Number of ids the set can hold
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Insert a pattern id
    pub fn insert(&mut self, pattern: usize) {
        if pattern < self.bits.len() {
            self.bits.set(pattern, true);
        }
    }

    /// Remove a pattern id, returning whether it was present
    pub fn remove(&mut self, pattern: usize) -> bool {
        if !self.contains(pattern) {
            return false;
        }
        self.bits.set(pattern, false);
        true
    }

    /// Test pattern membership
    pub fn contains(&self, pattern: usize) -> bool {
        self.bits.get(pattern).as_deref() == Some(&true)
    }

    /// Test if no patterns are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count patterns in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Lowest pattern id present
    pub fn first(&self) -> Option<usize> {
        self.bits.first_one()
    }

    /// Iterate present pattern ids in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Collect present pattern ids in ascending order
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

impl fmt::Display for PatternSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PatternSet({} patterns: {:?})", self.count(), self.to_vec())
    }
}
