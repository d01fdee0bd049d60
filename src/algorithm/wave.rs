//! Per-cell solver state
//!
//! For every output cell the wave tracks which patterns are still possible,
//! how many compatible supports each possible pattern has in each direction,
//! and the running weight sums that make entropy updates cheap.

use crate::algorithm::bitset::PatternSet;
use crate::analysis::adjacency::AdjacencyRules;
use crate::analysis::weights::PatternWeights;
use crate::math::probability::shannon_entropy;
use crate::spatial::grid::Direction;

/// Possibility sets, support counters and entropy sums for every cell
#[derive(Clone, Debug)]
pub struct WaveState {
    pattern_count: usize,
    possible: Vec<PatternSet>,
    // Flattened [cell][pattern][direction]
    compatible: Vec<u32>,
    remaining: Vec<usize>,
    sums_of_weights: Vec<u64>,
    sums_of_weight_log_weights: Vec<f64>,
    resolved_count: usize,
}

impl WaveState {
    /// Fresh wave where every pattern is possible at every cell
    ///
    /// Support counters start at the size of each pattern's compatible list
    /// in that direction.
    pub fn new(cell_count: usize, adjacency: &AdjacencyRules, weights: &PatternWeights) -> Self {
        let pattern_count = weights.len();

        let mut initial_support = Vec::with_capacity(pattern_count * 4);
        for pattern in 0..pattern_count {
            for direction in Direction::ALL {
                let supports = adjacency.compatible(direction, pattern).len();
                initial_support.push(u32::try_from(supports).unwrap_or(u32::MAX));
            }
        }

        let mut compatible = Vec::with_capacity(cell_count * initial_support.len());
        for _ in 0..cell_count {
            compatible.extend_from_slice(&initial_support);
        }

        let resolved_count = if pattern_count == 1 { cell_count } else { 0 };

        Self {
            pattern_count,
            possible: vec![PatternSet::all(pattern_count); cell_count],
            compatible,
            remaining: vec![pattern_count; cell_count],
            sums_of_weights: vec![weights.total_weight(); cell_count],
            sums_of_weight_log_weights: vec![weights.total_weight_log_weight(); cell_count],
            resolved_count,
        }
    }

    /// Number of patterns in the catalog
    pub const fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    /// Number of cells
    pub fn cell_count(&self) -> usize {
        self.possible.len()
    }

    /// Whether `pattern` is still possible at `cell`
    pub fn is_possible(&self, cell: usize, pattern: usize) -> bool {
        self.possible
            .get(cell)
            .is_some_and(|set| set.contains(pattern))
    }

    /// Possibility set of a cell
    pub fn possible_patterns(&self, cell: usize) -> Option<&PatternSet> {
        self.possible.get(cell)
    }

    /// Number of patterns still possible at `cell`
    pub fn remaining(&self, cell: usize) -> usize {
        self.remaining.get(cell).copied().unwrap_or(0)
    }

    /// Sum of the weights of the patterns still possible at `cell`
    pub fn sum_of_weights(&self, cell: usize) -> u64 {
        self.sums_of_weights.get(cell).copied().unwrap_or(0)
    }

    /// Sum of `w·log2(w)` over the patterns still possible at `cell`
    pub fn sum_of_weight_log_weights(&self, cell: usize) -> f64 {
        self.sums_of_weight_log_weights
            .get(cell)
            .copied()
            .unwrap_or(0.0)
    }

    /// Shannon entropy of the remaining weighted choice at `cell`
    pub fn entropy(&self, cell: usize) -> f64 {
        shannon_entropy(
            self.sum_of_weights(cell) as f64,
            self.sum_of_weight_log_weights(cell),
        )
    }

    const fn counter_index(&self, cell: usize, pattern: usize, direction: Direction) -> usize {
        (cell * self.pattern_count + pattern) * 4 + direction.index()
    }

    /// Remaining supports of `pattern` at `cell` from the neighbour in `direction`
    pub fn compatible_count(&self, cell: usize, pattern: usize, direction: Direction) -> u32 {
        self.compatible
            .get(self.counter_index(cell, pattern, direction))
            .copied()
            .unwrap_or(0)
    }

    /// Drop one support and return the new count
    pub fn decrement_compatible(
        &mut self,
        cell: usize,
        pattern: usize,
        direction: Direction,
    ) -> u32 {
        let index = self.counter_index(cell, pattern, direction);
        self.compatible.get_mut(index).map_or(0, |count| {
            *count = count.saturating_sub(1);
            *count
        })
    }

    /// Remove `pattern` from `cell` and update its sums
    ///
    /// Returns false when the pattern was already gone, in which case nothing
    /// changes.
    pub fn remove(&mut self, cell: usize, pattern: usize, weights: &PatternWeights) -> bool {
        let Some(set) = self.possible.get_mut(cell) else {
            return false;
        };
        if !set.remove(pattern) {
            return false;
        }

        if let Some(remaining) = self.remaining.get_mut(cell) {
            *remaining -= 1;
            if *remaining == 1 {
                self.resolved_count += 1;
            } else if *remaining == 0 {
                self.resolved_count = self.resolved_count.saturating_sub(1);
            }
        }
        if let Some(sum) = self.sums_of_weights.get_mut(cell) {
            *sum = sum.saturating_sub(u64::from(weights.weight(pattern)));
        }
        if let Some(sum) = self.sums_of_weight_log_weights.get_mut(cell) {
            *sum -= weights.weight_log_weight(pattern);
        }
        true
    }

    /// The single pattern left at `cell`, if it is resolved
    pub fn resolved_pattern(&self, cell: usize) -> Option<usize> {
        if self.remaining(cell) != 1 {
            return None;
        }
        self.possible.get(cell).and_then(PatternSet::first)
    }

    /// Number of cells with exactly one possible pattern
    pub const fn resolved_count(&self) -> usize {
        self.resolved_count
    }

    /// Whether any cell has no possible pattern left
    pub fn has_contradiction(&self) -> bool {
        self.remaining.contains(&0)
    }
}
