use crate::algorithm::bitset::PatternSet;
use crate::analysis::weights::PatternWeights;
use crate::io::configuration::ENTROPY_NOISE_MAX_RANGE;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Seeded random source shared by every stochastic choice of one run
///
/// Draw order is fixed: the initial cell pick, then per step the weighted
/// pattern draw and one jitter draw per entropy refresh.
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector; seed 0 draws entropy from the OS
    pub fn new(seed: u64) -> Self {
        let rng = if seed == 0 {
            StdRng::from_os_rng()
        } else {
            StdRng::seed_from_u64(seed)
        };
        Self { rng }
    }

    /// Uniform cell index in `[0, cell_count)`
    pub fn pick_cell(&mut self, cell_count: usize) -> usize {
        if cell_count == 0 {
            return 0;
        }
        self.rng.random_range(0..cell_count)
    }

    /// Uniform integer in `[0, total)`
    pub fn draw_weight(&mut self, total: u64) -> u64 {
        if total == 0 {
            return 0;
        }
        self.rng.random_range(0..total)
    }

    /// Jitter in `[0, ENTROPY_NOISE_MAX_RANGE)` added to entropy priorities
    pub fn entropy_noise(&mut self) -> f64 {
        self.rng.random::<f64>() * ENTROPY_NOISE_MAX_RANGE
    }

    /// Weighted choice among the patterns of `possible`
    ///
    /// Draws `r` in `[0, total)` and walks the set in ascending id order,
    /// subtracting weights until `r` falls inside one. Returns `None` for an
    /// empty set.
    pub fn choose_pattern(
        &mut self,
        possible: &PatternSet,
        weights: &PatternWeights,
        total: u64,
    ) -> Option<usize> {
        let mut remaining = self.draw_weight(total);
        let mut last = None;
        for pattern in possible.iter() {
            let weight = u64::from(weights.weight(pattern));
            if remaining < weight {
                return Some(pattern);
            }
            remaining -= weight;
            last = Some(pattern);
        }
        last
    }
}
