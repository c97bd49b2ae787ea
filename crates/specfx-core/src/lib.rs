//! # specfx-core
//!
//! Core types for frequency-domain restoration of 8-bit grayscale images.
//!
//! - [`ComplexGrid`] - Dense row-major grid of complex samples, the working
//!   buffer for every transform stage
//! - [`SampleBuffer`] - Flat 8-bit sample plane with a padded row stride, as
//!   stored by uncompressed raster formats
//! - [`Error`] - Dimension and layout errors shared by the other crates
//!
//! ## Crate Structure
//!
//! ```text
//! specfx-core (this crate)
//!    ^
//!    |
//!    +-- specfx-io  (BMP raster reader/writer)
//!    +-- specfx-ops (Fourier engine, filters, pipeline)
//!    +-- specfx-cli (specfx binary)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod grid;
pub mod raster;

pub use error::{Error, Result};
pub use grid::ComplexGrid;
pub use raster::{row_stride, SampleBuffer, ROW_ALIGNMENT};

/// Complex sample type used by every grid.
pub use num_complex::Complex64;
