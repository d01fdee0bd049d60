//! Pattern extraction and deduplication
//!
//! Slides a square window over the exemplar's color ids, wrapping around the
//! edges, and merges identical samples into a weighted pattern catalog.
//! Optionally adds rotated and mirrored variants of every sample to increase
//! pattern variety from limited source data.

use crate::io::error::{Result, SolverError, invalid_parameter};
use ndarray::Array2;
use std::collections::HashMap;

/// A square window of color ids stored row-major (`x + y * size`)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pattern {
    size: usize,
    cells: Vec<u8>,
}

impl Pattern {
    /// Create a pattern from row-major color ids
    ///
    /// # Errors
    ///
    /// Returns an error if `cells` does not hold `size * size` values
    pub fn new(size: usize, cells: Vec<u8>) -> Result<Self> {
        if cells.len() != size * size {
            return Err(invalid_parameter(
                "cells",
                &cells.len(),
                &format!("a {size}x{size} pattern needs {} cells", size * size),
            ));
        }
        Ok(Self { size, cells })
    }

    /// Sample the window whose top-left corner is `(x, y)`, wrapping at the edges
    pub fn sample(ids: &Array2<u8>, x: usize, y: usize, size: usize) -> Self {
        let (rows, cols) = ids.dim();
        let mut cells = Vec::with_capacity(size * size);
        for dy in 0..size {
            for dx in 0..size {
                let row = (y + dy) % rows.max(1);
                let col = (x + dx) % cols.max(1);
                cells.push(ids.get((row, col)).copied().unwrap_or(0));
            }
        }
        Self { size, cells }
    }

    /// Side length
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Row-major color ids
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Color id at `(x, y)`
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.size || y >= self.size {
            return None;
        }
        self.cells.get(x + y * self.size).copied()
    }

    /// Color id rendered for a cell holding this pattern
    pub fn anchor(&self) -> u8 {
        self.cells.first().copied().unwrap_or(0)
    }

    fn remap<F>(&self, source: F) -> Self
    where
        F: Fn(usize, usize) -> (usize, usize),
    {
        let n = self.size;
        let mut cells = Vec::with_capacity(n * n);
        for y in 0..n {
            for x in 0..n {
                let (sx, sy) = source(x, y);
                cells.push(self.get(sx, sy).unwrap_or(0));
            }
        }
        Self { size: n, cells }
    }

    /// Quarter turn
    #[must_use]
    pub fn rotate_90(&self) -> Self {
        let n = self.size;
        self.remap(|x, y| (y, n - 1 - x))
    }

    /// Half turn
    #[must_use]
    pub fn rotate_180(&self) -> Self {
        let n = self.size;
        self.remap(|x, y| (n - 1 - x, n - 1 - y))
    }

    /// Three quarter turn
    #[must_use]
    pub fn rotate_270(&self) -> Self {
        let n = self.size;
        self.remap(|x, y| (n - 1 - y, x))
    }

    /// Mirror across the vertical axis
    #[must_use]
    pub fn flip_horizontal(&self) -> Self {
        let n = self.size;
        self.remap(|x, y| (n - 1 - x, y))
    }

    /// Mirror across the horizontal axis
    #[must_use]
    pub fn flip_vertical(&self) -> Self {
        let n = self.size;
        self.remap(|x, y| (x, n - 1 - y))
    }

    /// The original followed by its three rotations and two mirrors
    pub fn symmetry_variants(&self) -> [Self; 6] {
        [
            self.clone(),
            self.rotate_90(),
            self.rotate_180(),
            self.rotate_270(),
            self.flip_horizontal(),
            self.flip_vertical(),
        ]
    }
}

/// How patterns are sampled from the exemplar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SamplingOptions {
    /// Side length of the sampling window
    pub pattern_size: usize,
    /// Columns excluded from the right edge of the sampled region
    pub crop_x: usize,
    /// Rows excluded from the bottom edge of the sampled region
    pub crop_y: usize,
    /// Whether to add rotated and mirrored variants of every sample
    pub use_symmetry: bool,
}

/// Check that the exemplar can be sampled with the given options
///
/// # Errors
///
/// Returns an error if:
/// - The pattern size is zero
/// - The exemplar is narrower or shorter than the pattern size
/// - A crop margin leaves no sampling positions
pub fn validate_sampling(width: usize, height: usize, options: &SamplingOptions) -> Result<()> {
    if options.pattern_size == 0 {
        return Err(invalid_parameter(
            "pattern_size",
            &options.pattern_size,
            &"must be at least 1",
        ));
    }
    if width < options.pattern_size || height < options.pattern_size {
        return Err(SolverError::InputTooSmall {
            width,
            height,
            pattern_size: options.pattern_size,
        });
    }
    if options.crop_x >= width {
        return Err(invalid_parameter(
            "crop_x",
            &options.crop_x,
            &format!("must be smaller than the exemplar width {width}"),
        ));
    }
    if options.crop_y >= height {
        return Err(invalid_parameter(
            "crop_y",
            &options.crop_y,
            &format!("must be smaller than the exemplar height {height}"),
        ));
    }
    Ok(())
}

/// Collect one raw sample per top-left position, plus variants if requested
///
/// # Errors
///
/// Returns an error if the exemplar cannot be sampled with `options`
pub fn extract_patterns(ids: &Array2<u8>, options: &SamplingOptions) -> Result<Vec<Pattern>> {
    let (rows, cols) = ids.dim();
    validate_sampling(cols, rows, options)?;

    let positions = (cols - options.crop_x) * (rows - options.crop_y);
    let per_position = if options.use_symmetry { 6 } else { 1 };
    let mut samples = Vec::with_capacity(positions * per_position);

    for y in 0..rows - options.crop_y {
        for x in 0..cols - options.crop_x {
            let sample = Pattern::sample(ids, x, y, options.pattern_size);
            if options.use_symmetry {
                samples.extend(sample.symmetry_variants());
            } else {
                samples.push(sample);
            }
        }
    }

    Ok(samples)
}

/// Unique patterns with occurrence counts
///
/// Pattern ids are positions in this catalog and never change once assigned.
#[derive(Clone, Debug)]
pub struct PatternCatalog {
    pattern_size: usize,
    patterns: Vec<Pattern>,
    weights: Vec<u32>,
}

impl PatternCatalog {
    /// Merge identical samples, keeping first-occurrence order
    pub fn deduplicate(samples: Vec<Pattern>, pattern_size: usize) -> Self {
        let mut seen: HashMap<Pattern, usize> = HashMap::new();
        let mut patterns = Vec::new();
        let mut weights: Vec<u32> = Vec::new();

        for sample in samples {
            if let Some(&id) = seen.get(&sample) {
                if let Some(weight) = weights.get_mut(id) {
                    *weight += 1;
                }
            } else {
                seen.insert(sample.clone(), patterns.len());
                patterns.push(sample);
                weights.push(1);
            }
        }

        Self {
            pattern_size,
            patterns,
            weights,
        }
    }

    /// Extract and deduplicate patterns from an indexed exemplar
    ///
    /// # Errors
    ///
    /// Returns an error if the exemplar cannot be sampled with `options`
    pub fn from_exemplar(ids: &Array2<u8>, options: &SamplingOptions) -> Result<Self> {
        let samples = extract_patterns(ids, options)?;
        Ok(Self::deduplicate(samples, options.pattern_size))
    }

    /// Build a catalog from explicit patterns and weights
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The two lists differ in length
    /// - A weight is zero
    /// - A pattern does not match `pattern_size`
    pub fn from_parts(
        pattern_size: usize,
        patterns: Vec<Pattern>,
        weights: Vec<u32>,
    ) -> Result<Self> {
        if patterns.len() != weights.len() {
            return Err(invalid_parameter(
                "weights",
                &weights.len(),
                &format!("expected one weight per pattern ({})", patterns.len()),
            ));
        }
        if weights.contains(&0) {
            return Err(invalid_parameter(
                "weights",
                &0,
                &"pattern weights must be positive",
            ));
        }
        if let Some(pattern) = patterns.iter().find(|p| p.size() != pattern_size) {
            return Err(invalid_parameter(
                "patterns",
                &pattern.size(),
                &format!("expected {pattern_size}x{pattern_size} patterns"),
            ));
        }
        Ok(Self {
            pattern_size,
            patterns,
            weights,
        })
    }

    /// Side length of every pattern
    pub const fn pattern_size(&self) -> usize {
        self.pattern_size
    }

    /// Number of unique patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the catalog holds no patterns
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// All patterns in id order
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Occurrence counts in id order
    pub fn weights(&self) -> &[u32] {
        &self.weights
    }

    /// Pattern for an id
    pub fn pattern(&self, id: usize) -> Option<&Pattern> {
        self.patterns.get(id)
    }

    /// Occurrence count for an id
    pub fn weight(&self, id: usize) -> Option<u32> {
        self.weights.get(id).copied()
    }
}
