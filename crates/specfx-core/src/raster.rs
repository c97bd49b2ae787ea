//! 8-bit raster sample buffer.
//!
//! [`SampleBuffer`] mirrors how uncompressed indexed rasters store pixels:
//! one unsigned byte per sample, rows padded out to a 4-byte boundary. The
//! padding columns (`width <= col < stride`) carry no image content. Readers
//! ignore them; every writer in this workspace fills them with 0.
//!
//! # Example
//!
//! ```rust
//! use specfx_core::{row_stride, SampleBuffer};
//!
//! assert_eq!(row_stride(5), 8);
//!
//! let buf = SampleBuffer::from_pixels(5, 2, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]).unwrap();
//! assert_eq!(buf.stride(), 8);
//! assert_eq!(buf.get(1, 0), 6);
//! assert_eq!(buf.as_bytes().len(), 16);
//! ```

use crate::error::{checked_area, Error, Result};

/// Row alignment, in bytes, of the raster formats in scope.
pub const ROW_ALIGNMENT: usize = 4;

/// Row length rounded up to [`ROW_ALIGNMENT`].
#[inline]
pub fn row_stride(width: usize) -> usize {
    width.div_ceil(ROW_ALIGNMENT) * ROW_ALIGNMENT
}

/// Flat 8-bit sample plane with a padded row stride.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuffer {
    width: usize,
    height: usize,
    stride: usize,
    data: Vec<u8>,
}

impl SampleBuffer {
    /// Creates a zero-filled buffer with the aligned stride for `width`.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let stride = row_stride(width);
        let len = checked_area(stride, height)?;
        Ok(Self {
            width,
            height,
            stride,
            data: vec![0; len],
        })
    }

    /// Wraps a raw, already padded sample buffer.
    ///
    /// `data.len()` must equal `stride * height` and `stride >= width`.
    /// Padding bytes are kept as given.
    pub fn from_raw(width: usize, height: usize, stride: usize, data: Vec<u8>) -> Result<Self> {
        checked_area(width, height)?;
        if stride < width {
            return Err(Error::InvalidStride {
                stride,
                min_stride: width,
                width,
            });
        }
        let len = checked_area(stride, height)?;
        if data.len() != len {
            return Err(Error::size_mismatch(len, data.len()));
        }
        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    /// Builds a buffer from tightly packed pixels (`width * height` bytes),
    /// inserting zero padding at the end of every row.
    pub fn from_pixels(width: usize, height: usize, pixels: &[u8]) -> Result<Self> {
        let expected = checked_area(width, height)?;
        if pixels.len() != expected {
            return Err(Error::size_mismatch(expected, pixels.len()));
        }
        let mut buf = Self::new(width, height)?;
        for (row, src) in pixels.chunks_exact(width).enumerate() {
            buf.row_mut(row).copy_from_slice(src);
        }
        Ok(buf)
    }

    /// Logical image width in samples.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Padded row length in samples.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Raw padded buffer, `stride * height` bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Sample at `(row, col)`; `col` may address a padding column.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        assert!(row < self.height && col < self.stride);
        self.data[row * self.stride + col]
    }

    /// Writes the sample at `(row, col)`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        assert!(row < self.height && col < self.stride);
        self.data[row * self.stride + col] = value;
    }

    /// Logical samples of one row (padding excluded).
    #[inline]
    pub fn row(&self, row: usize) -> &[u8] {
        let start = row * self.stride;
        &self.data[start..start + self.width]
    }

    /// Mutable logical samples of one row (padding excluded).
    #[inline]
    pub fn row_mut(&mut self, row: usize) -> &mut [u8] {
        let start = row * self.stride;
        &mut self.data[start..start + self.width]
    }

    /// Tightly packed copy of the logical pixels.
    pub fn to_pixels(&self) -> Vec<u8> {
        (0..self.height).flat_map(|r| self.row(r).iter().copied()).collect()
    }

    /// Mean of the logical samples.
    pub fn mean(&self) -> f64 {
        let sum: u64 = (0..self.height)
            .map(|r| self.row(r).iter().map(|&v| v as u64).sum::<u64>())
            .sum();
        sum as f64 / (self.width * self.height) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_row_stride() {
        assert_eq!(row_stride(1), 4);
        assert_eq!(row_stride(4), 4);
        assert_eq!(row_stride(5), 8);
        assert_eq!(row_stride(127), 128);
    }

    #[test]
    fn test_from_raw_validation() {
        assert!(matches!(
            SampleBuffer::from_raw(6, 2, 4, vec![0; 8]),
            Err(Error::InvalidStride { stride: 4, min_stride: 6, .. })
        ));
        assert!(matches!(
            SampleBuffer::from_raw(6, 2, 8, vec![0; 15]),
            Err(Error::SizeMismatch { expected: 16, actual: 15 })
        ));
        assert!(SampleBuffer::from_raw(0, 2, 4, vec![0; 8]).is_err());
    }

    #[test]
    fn test_from_pixels_pads_rows() {
        let buf = SampleBuffer::from_pixels(3, 2, &[1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(buf.stride(), 4);
        assert_eq!(buf.as_bytes(), &[1, 2, 3, 0, 4, 5, 6, 0]);
        assert_eq!(buf.row(1), &[4, 5, 6]);
        assert_eq!(buf.to_pixels(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_mean_ignores_padding() {
        let buf = SampleBuffer::from_raw(2, 2, 4, vec![10, 20, 255, 255, 30, 40, 255, 255]).unwrap();
        assert_relative_eq!(buf.mean(), 25.0);
    }
}
