//! Error types for specfx-core.
//!
//! Covers the layout failures that can occur while building grids and
//! sample buffers: zero or overflowing dimensions, a row stride narrower
//! than the image, and buffers whose length does not match their declared
//! shape.
//!
//! # Usage
//!
//! ```rust
//! use specfx_core::{Error, Result};
//!
//! fn check(width: usize, height: usize) -> Result<()> {
//!     if width == 0 || height == 0 {
//!         return Err(Error::invalid_dimensions(width, height, "zero size"));
//!     }
//!     Ok(())
//! }
//! assert!(check(0, 4).is_err());
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while constructing or accessing core buffers.
#[derive(Debug, Error)]
pub enum Error {
    /// Width or height is zero, or `width * height` overflows `usize`.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Row stride is narrower than the logical row.
    #[error("stride {stride} is less than minimum {min_stride} for width {width}")]
    InvalidStride {
        /// Provided stride
        stride: usize,
        /// Minimum required stride
        min_stride: usize,
        /// Image width
        width: usize,
    },

    /// Buffer length does not match the declared shape.
    #[error("size mismatch: expected {expected} samples, got {actual}")]
    SizeMismatch {
        /// Samples implied by the shape
        expected: usize,
        /// Samples actually supplied
        actual: usize,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: usize, height: usize, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::SizeMismatch`] error.
    #[inline]
    pub fn size_mismatch(expected: usize, actual: usize) -> Self {
        Self::SizeMismatch { expected, actual }
    }
}

/// Returns `width * height`, rejecting zero sizes and overflow.
pub(crate) fn checked_area(width: usize, height: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(width, height, "width and height must be > 0"));
    }
    width
        .checked_mul(height)
        .ok_or_else(|| Error::invalid_dimensions(width, height, "sample count overflows"))
}
