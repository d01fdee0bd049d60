//! Spatial data structures and pattern sampling
//!
//! This module contains spatial-related functionality including:
//! - Output grid geometry and cardinal directions
//! - Rendered cell storage
//! - Pattern extraction and deduplication

/// Grid dimensions, directions and rendered output
pub mod grid;
/// Pattern sampling, symmetry variants and the pattern catalog
pub mod tiles;

pub use grid::{Direction, GridSize, OutputGrid, RenderedCell, Rgba};
