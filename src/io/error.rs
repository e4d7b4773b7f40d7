//! Error types for palette building, catalog loading and image conversion

use std::fmt;
use std::path::PathBuf;

/// Main error type for all tile mapping operations
#[derive(Debug)]
pub enum TileMapError {
    /// Failed to load source image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Source image doesn't meet conversion requirements
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Candidate catalog data is malformed or exceeds id limits
    InvalidCatalog {
        /// Description of what's wrong with the catalog
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Caller broke a documented precondition
    ///
    /// Covers out-of-range color keys, zero-sized grids and raw palette
    /// data of the wrong length. These indicate a programming error in the
    /// caller rather than a runtime condition.
    Precondition {
        /// Operation whose precondition was violated
        operation: &'static str,
        /// Description of the violation
        reason: String,
    },

    /// Failed to save a generated image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for TileMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidCatalog { reason } => {
                write!(f, "Invalid candidate catalog: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Precondition { operation, reason } => {
                write!(f, "Precondition violated in {operation}: {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for TileMapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for tile mapping results
pub type Result<T> = std::result::Result<T, TileMapError>;

impl From<image::ImageError> for TileMapError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for TileMapError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> TileMapError {
    TileMapError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a precondition violation error
pub fn precondition(operation: &'static str, reason: &impl ToString) -> TileMapError {
    TileMapError::Precondition {
        operation,
        reason: reason.to_string(),
    }
}

/// Create a catalog format error
pub fn invalid_catalog(reason: &impl ToString) -> TileMapError {
    TileMapError::InvalidCatalog {
        reason: reason.to_string(),
    }
}
