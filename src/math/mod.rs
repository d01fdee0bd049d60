//! Mathematical utilities for the solver

/// Shannon entropy over weighted pattern distributions
pub mod probability;
