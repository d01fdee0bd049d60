//! Overlapping-model wave function collapse for texture synthesis
//!
//! The solver samples every small square window of an exemplar image, learns
//! which windows may overlap one another, and fills an output grid by
//! repeatedly collapsing the lowest-entropy cell and propagating the
//! consequences until every cell is decided or a contradiction stops the run.

#![forbid(unsafe_code)]

/// Core solver: wave state, entropy heap, collapse, propagation and rendering
pub mod algorithm;
/// Exemplar indexing, adjacency rules and pattern weights
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Mathematical utilities for entropy calculations
pub mod math;
/// Spatial grid management and pattern extraction utilities
pub mod spatial;

pub use algorithm::executor::{Generation, GenerationArgs, RunStatus, Solver, generate};
pub use io::error::{Result, SolverError};
