//! Integration tests for the specfx crates.
//!
//! End-to-end scenarios run real BMP files through the restoration
//! pipeline: write a synthetic raster, read it back, filter, write the
//! result and inspect it.

use specfx_core::{Result, SampleBuffer};
use specfx_io::{bmp, Bitmap, IoResult};
use std::f64::consts::PI;
use std::path::Path;

/// Raster with every sample set to `value`.
pub fn constant(width: usize, height: usize, value: u8) -> Result<SampleBuffer> {
    generate(width, height, |_, _| value as f64)
}

/// Smooth vertical shading plus a horizontal cosine of `cycles` periods
/// across the row stride.
///
/// The interference lands on the spectrum cells `(0, ±cycles)` from the
/// center when the width is a multiple of 4.
pub fn with_interference(width: usize, height: usize, cycles: f64, amplitude: f64) -> Result<SampleBuffer> {
    generate(width, height, |y, x| {
        let shading = 20.0 * (2.0 * PI * y as f64 / height as f64).cos();
        let interference = amplitude * (2.0 * PI * cycles * x as f64 / width as f64).cos();
        100.0 + shading + interference
    })
}

/// Raster filled from `f(row, col)`, rounded and clamped to 8 bits.
pub fn generate(width: usize, height: usize, f: impl Fn(usize, usize) -> f64) -> Result<SampleBuffer> {
    let pixels: Vec<u8> = (0..height)
        .flat_map(|y| (0..width).map(move |x| (y, x)))
        .map(|(y, x)| specfx_ops::quantize(f(y, x)))
        .collect();
    SampleBuffer::from_pixels(width, height, &pixels)
}

/// Writes `samples` as a fresh grayscale BMP.
pub fn write_grayscale(path: &Path, samples: SampleBuffer) -> IoResult<()> {
    bmp::write(path, &Bitmap::new_grayscale(samples)?)
}
