//! Image to tile grid conversion through a precomputed nearest-color palette
//!
//! Every 24-bit color is matched ahead of time against the enabled tile, wall
//! and paint candidates. Converting an image then only needs to resample it
//! onto the output grid and read one table entry per cell.

#![forbid(unsafe_code)]

/// Input/output operations and error handling
pub mod io;
/// Color cube indexing and resampling kernels
pub mod math;
/// Candidate catalog, palette builder and lookup store
pub mod palette;
/// Source image sampling and grid conversion
pub mod spatial;

pub use io::error::{Result, TileMapError};
