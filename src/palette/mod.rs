//! Color palette construction and lookup
//!
//! This module contains:
//! - The tile, wall and paint candidate catalog with enabled flags
//! - The parallel nearest-candidate builder
//! - The dense lookup store and its swappable shared handle

/// Parallel nearest-candidate search over the color cube
pub mod builder;
/// Candidate catalog and build snapshots
pub mod candidates;
/// Dense lookup tables and shared palette handle
pub mod store;

pub use builder::PaletteBuilder;
pub use candidates::{CandidateCatalog, CandidateKind};
pub use store::{PaletteEntry, PaletteLookup, PaletteStore, SharedPalette};
