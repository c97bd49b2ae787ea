//! # specfx-io
//!
//! Raster I/O for the specfx restoration tools.
//!
//! The only container in scope is the uncompressed, 8-bit, palette-indexed
//! BMP. Files are treated as opaque outside of the fields the filters need
//! (width, height, row stride, sample depth): everything in front of the
//! pixel array is carried through a read/write cycle byte for byte.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use specfx_io::bmp;
//!
//! let bitmap = bmp::read("moire.bmp")?;
//! let filtered = bitmap.with_samples(process(bitmap.samples())?)?;
//! bmp::write("clean.bmp", &filtered)?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod bmp;
mod error;
pub mod traits;

pub use bmp::{Bitmap, BmpHeader, BmpReader, BmpWriter};
pub use error::{IoError, IoResult};
pub use traits::{RasterReader, RasterWriter};
