//! Analysis modules for exemplar indexing and pattern relationships

/// Overlap compatibility rules between patterns
pub mod adjacency;
/// Exemplar color indexing and palette handling
pub mod patterns;
/// Pattern weights and their entropy contributions
pub mod weights;
