//! Error types for raster I/O.

use std::io;
use thiserror::Error;

/// Raster I/O error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Not a raster of the supported container format, or a corrupted one.
    #[error("format error: {0}")]
    Format(String),

    /// Sample depth other than 8 bits.
    #[error("unsupported bit depth: {0} (only 8-bit indexed rasters are supported)")]
    UnsupportedBitDepth(u16),

    /// Compressed pixel data.
    #[error("unsupported compression: {0} (only uncompressed rasters are supported)")]
    UnsupportedCompression(u32),

    /// Sample buffer does not fit the raster.
    #[error(transparent)]
    Core(#[from] specfx_core::Error),
}

/// Result type for raster I/O.
pub type IoResult<T> = Result<T, IoError>;
