//! Error types for restoration operations.

use thiserror::Error;

/// Error type for restoration operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// The transform engine cannot process a grid of this shape.
    #[error("unsupported dimensions {width}x{height}: {reason}")]
    UnsupportedDimensions {
        /// Grid width (columns)
        width: usize,
        /// Grid height (rows)
        height: usize,
        /// Why the engine refused
        reason: String,
    },

    /// Filter or pipeline parameters out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Buffers of incompatible shape.
    #[error("size mismatch: {0}")]
    SizeMismatch(String),

    /// Malformed configuration document.
    #[error("config parse error: {0}")]
    Config(String),

    /// Reading a configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Core buffer construction failed.
    #[error(transparent)]
    Core(#[from] specfx_core::Error),
}

/// Result type for restoration operations.
pub type OpsResult<T> = Result<T, OpsError>;
