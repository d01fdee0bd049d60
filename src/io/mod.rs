//! Input/output operations, configuration and error handling

/// Command-line interface and batch file processing
pub mod cli;
/// Solver constants and configuration defaults
pub mod configuration;
/// Error types and result alias
pub mod error;
/// PNG loading and export
pub mod image;
/// Progress display for batch runs
pub mod progress;
