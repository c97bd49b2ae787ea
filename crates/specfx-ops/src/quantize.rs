//! Requantization back to 8-bit samples.

use crate::{OpsError, OpsResult};
use specfx_core::{row_stride, ComplexGrid, SampleBuffer};

/// Rounds to nearest (`floor(x + 0.5)`) and clamps to `0..=255`.
///
/// NaN maps to 0.
///
/// ```rust
/// use specfx_ops::quantize::quantize;
///
/// assert_eq!(quantize(-5.0), 0);
/// assert_eq!(quantize(260.0), 255);
/// assert_eq!(quantize(127.5), 128);
/// ```
#[inline]
pub fn quantize(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    (value + 0.5).floor().clamp(0.0, 255.0) as u8
}

/// Converts the real part of a decentered grid into a `width`-wide buffer.
///
/// The grid must span the buffer's row stride. Padding columns are written
/// as 0.
pub fn requantize(grid: &ComplexGrid, width: usize) -> OpsResult<SampleBuffer> {
    let stride = row_stride(width);
    if grid.width() != stride {
        return Err(OpsError::SizeMismatch(format!(
            "grid width {} does not match row stride {} of a {}-wide raster",
            grid.width(),
            stride,
            width
        )));
    }

    let mut out = SampleBuffer::new(width, grid.height())?;
    for (row, line) in grid.rows().enumerate() {
        for (dst, cell) in out.row_mut(row).iter_mut().zip(line) {
            *dst = quantize(cell.re);
        }
    }
    Ok(out)
}
