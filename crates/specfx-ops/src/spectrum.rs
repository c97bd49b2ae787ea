//! Log-magnitude spectrum view.
//!
//! Renders a centered spectrum as 8-bit samples so periodic interference
//! shows up as bright symmetric spots. Their offsets from the image center
//! are the `(uk, vk)` values a notch filter needs.

use crate::OpsResult;
use specfx_core::{ComplexGrid, SampleBuffer};

/// Maps `ln(1 + |F(u, v)|)` linearly onto `0..=255`.
///
/// The largest magnitude maps to 255. An all-zero spectrum maps to all 0.
/// The output is as wide as the grid.
pub fn log_magnitude(grid: &ComplexGrid) -> OpsResult<SampleBuffer> {
    let logs: Vec<f64> = grid.as_slice().iter().map(|c| c.norm().ln_1p()).collect();
    let peak = logs.iter().copied().fold(0.0f64, f64::max);

    let mut out = SampleBuffer::new(grid.width(), grid.height())?;
    if peak <= 0.0 {
        return Ok(out);
    }

    let scale = 255.0 / peak;
    for (row, line) in logs.chunks_exact(grid.width()).enumerate() {
        for (dst, &value) in out.row_mut(row).iter_mut().zip(line) {
            *dst = (value * scale).round().clamp(0.0, 255.0) as u8;
        }
    }
    Ok(out)
}
