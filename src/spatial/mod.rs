//! Source image sampling and output grid conversion
//!
//! This module contains:
//! - Output grid dimensions and the conversion result
//! - Resolution-dependent source image sampling
//! - The grid converter tying sampling to palette lookups

/// Grid-wide conversion driver
pub mod converter;
/// Output grid dimensions and conversion results
pub mod grid;
/// Source image storage and resampling
pub mod sampling;

pub use converter::{GridConverter, convert};
pub use grid::{ConversionResult, GridDimensions};
pub use sampling::{SamplingMode, SourceImage};
