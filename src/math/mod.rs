//! Mathematical utilities for color indexing and resampling

/// Color cube packing between RGB triples and lookup indices
pub mod cube;
/// Sinc, Lanczos and Gaussian filter kernels
pub mod kernels;
