//! Reader and writer traits for raster containers.
//!
//! The restoration core only ever sees a [`Bitmap`]: readers produce one,
//! writers consume one. Implement these to plug in another container.

use crate::{Bitmap, IoResult};
use std::path::Path;

/// Reads a raster container into a [`Bitmap`].
pub trait RasterReader {
    /// Format name for diagnostics.
    fn format_name(&self) -> &'static str;

    /// Returns `true` if `header` starts with this format's signature.
    fn can_read(&self, header: &[u8]) -> bool;

    /// Reads a raster from a file path.
    fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<Bitmap>;

    /// Reads a raster from memory.
    fn read_from_memory(&self, data: &[u8]) -> IoResult<Bitmap>;
}

/// Writes a [`Bitmap`] back to its container format.
pub trait RasterWriter {
    /// Format name for diagnostics.
    fn format_name(&self) -> &'static str;

    /// Writes a raster to a file path.
    fn write<P: AsRef<Path>>(&self, path: P, bitmap: &Bitmap) -> IoResult<()>;

    /// Writes a raster to memory.
    fn write_to_memory(&self, bitmap: &Bitmap) -> IoResult<Vec<u8>>;
}
