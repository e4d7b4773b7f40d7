//! Palette constants and runtime configuration defaults

/// Number of distinct 24-bit RGB colors, and the length of every palette table
pub const COLOR_CUBE_SIZE: usize = 1 << 24;

/// Entries along one axis of the color cube
pub const CUBE_EDGE: usize = 256;

/// Entries in one red slab of the builder's raw output
pub const SLAB_SIZE: usize = CUBE_EDGE * CUBE_EDGE;

/// Sentinel id meaning no enabled tile or wall matched
pub const NONE_ID: u16 = u16::MAX;

/// Largest number of tile or wall candidates (ids below the sentinel)
pub const MAX_TILE_CANDIDATES: usize = NONE_ID as usize;

/// Largest number of paint candidates (paint ids are a single byte)
pub const MAX_PAINT_CANDIDATES: usize = 256;

// Resampling kernel parameters
/// Lanczos window size used for upscaling
pub const LANCZOS_FILTER_SIZE: f32 = 2.0;
/// Base standard deviation of the downscale Gaussian
pub const GAUSSIAN_BASE_DEVIATION: f32 = 1.8;
/// Downscale ratio at which the Gaussian deviation equals its base value
pub const GAUSSIAN_RATIO_DIVISOR: f32 = 5.0;

// Output grid limits mirror the interactive sliders
/// Default output grid width in tiles
pub const DEFAULT_GRID_WIDTH: usize = 32;
/// Default output grid height in tiles
pub const DEFAULT_GRID_HEIGHT: usize = 32;
/// Maximum allowed output grid dimension
pub const MAX_GRID_DIMENSION: usize = 2048;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Output settings
/// Suffix added to preview filenames
pub const OUTPUT_SUFFIX: &str = "_tiles";
/// Default tracing filter directive
pub const DEFAULT_LOG_DIRECTIVE: &str = "tilemapper=info";
