//! Error types for pano-core.
//!
//! # Usage
//!
//! ```rust
//! use pano_core::{Error, Image};
//!
//! let err = Image::from_data(2, 2, 3, vec![0.0; 5]).unwrap_err();
//! assert!(matches!(err, Error::BufferSize { .. }));
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while constructing or viewing image buffers.
#[derive(Debug, Error)]
pub enum Error {
    /// Width, height or channel count is zero, or the sample count overflows.
    #[error("invalid dimensions: {width}x{height}x{channels} ({reason})")]
    InvalidDimensions {
        /// Image width
        width: u32,
        /// Image height
        height: u32,
        /// Channel count
        channels: u32,
        /// Why the dimensions were rejected
        reason: String,
    },

    /// Buffer length doesn't match `width * height * channels`.
    #[error("buffer holds {got} samples, expected {expected}")]
    BufferSize {
        /// Required sample count
        expected: usize,
        /// Provided sample count
        got: usize,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`].
    #[inline]
    pub fn invalid_dimensions(
        width: u32,
        height: u32,
        channels: u32,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            channels,
            reason: reason.into(),
        }
    }
}
