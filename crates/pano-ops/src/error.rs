//! Error types for projection operations.

use thiserror::Error;

/// Error type for projection operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Source image is unusable (empty, or not a panorama).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Projection parameter out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Buffer construction failed.
    #[error(transparent)]
    Core(#[from] pano_core::Error),
}

/// Result type for projection operations.
pub type OpsResult<T> = Result<T, OpsError>;
