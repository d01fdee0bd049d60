use crate::math::probability::{shannon_entropy, weight_log_weight};
use crate::spatial::tiles::PatternCatalog;

/// Per-pattern weights with the entropy terms they contribute
///
/// Every cell of a fresh wave starts from these totals, and each removal
/// subtracts the matching pattern's entries.
#[derive(Clone, Debug)]
pub struct PatternWeights {
    weights: Vec<u32>,
    weight_log_weights: Vec<f64>,
    total_weight: u64,
    total_weight_log_weight: f64,
}

impl PatternWeights {
    /// Precompute entropy terms for explicit weights
    pub fn new(weights: Vec<u32>) -> Self {
        let weight_log_weights: Vec<f64> = weights.iter().map(|&w| weight_log_weight(w)).collect();
        let total_weight = weights.iter().map(|&w| u64::from(w)).sum();
        let total_weight_log_weight = weight_log_weights.iter().sum();
        Self {
            weights,
            weight_log_weights,
            total_weight,
            total_weight_log_weight,
        }
    }

    /// Precompute entropy terms for a catalog's occurrence counts
    pub fn from_catalog(catalog: &PatternCatalog) -> Self {
        Self::new(catalog.weights().to_vec())
    }

    /// Number of patterns
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether there are no patterns
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Weight of one pattern, zero for unknown ids
    pub fn weight(&self, pattern: usize) -> u32 {
        self.weights.get(pattern).copied().unwrap_or(0)
    }

    /// `w·log2(w)` of one pattern, zero for unknown ids
    pub fn weight_log_weight(&self, pattern: usize) -> f64 {
        self.weight_log_weights.get(pattern).copied().unwrap_or(0.0)
    }

    /// All weights in pattern id order
    pub fn weights(&self) -> &[u32] {
        &self.weights
    }

    /// Sum of all weights
    pub const fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Sum of all `w·log2(w)` terms
    pub const fn total_weight_log_weight(&self) -> f64 {
        self.total_weight_log_weight
    }

    /// Entropy of a cell where every pattern is still possible
    pub fn starting_entropy(&self) -> f64 {
        shannon_entropy(self.total_weight as f64, self.total_weight_log_weight)
    }
}
