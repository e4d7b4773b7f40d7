//! Input/output operations, configuration and error handling

/// Binary candidate catalog files
pub mod catalog;
/// Command-line interface and pipeline orchestration
pub mod cli;
/// Constants and runtime defaults
pub mod configuration;
/// Error types
pub mod error;
/// Source image loading and preview export
pub mod image;
/// Terminal progress display
pub mod progress;
