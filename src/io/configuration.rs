//! Solver constants and runtime configuration defaults

use crate::spatial::grid::Rgba;

/// Side length of the square patterns sampled from the exemplar
pub const PATTERN_SIZE: usize = 3;

// Pattern cells store color ids as u8
/// Maximum number of distinct exemplar colors
pub const MAX_PALETTE_SIZE: usize = 256;

// Must stay far below any real entropy gap between cells
/// Upper bound of the random jitter added to entropy priorities
pub const ENTROPY_NOISE_MAX_RANGE: f64 = 0.000_000_1;

/// Color written for cells left without any possible pattern
pub const MASK_COLOR: Rgba = [1, 2, 3, 255];

// Safety limit to prevent excessive memory allocation
/// Maximum allowed output dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

// Each entry costs four u32 support counters plus one possibility bit
/// Maximum number of cell-pattern pairs a wave may track
pub const MAX_WAVE_ENTRIES: usize = 50_000_000;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default output width in cells
pub const DEFAULT_OUTPUT_WIDTH: usize = 32;

/// Default output height in cells
pub const DEFAULT_OUTPUT_HEIGHT: usize = 32;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
