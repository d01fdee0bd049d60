/// Fixed-size bitset for per-cell pattern possibility tracking
pub mod bitset;
/// Solver driver, run arguments and generation results
pub mod executor;
/// Entropy-ordered priority queue with lazy invalidation
pub mod heap;
/// Cell collapse and constraint propagation
pub mod propagation;
/// Conversion of the wave into output colors
pub mod render;
/// Seeded random choices shared across a run
pub mod selection;
/// Per-cell possibility sets, support counters and entropy sums
pub mod wave;
