//! Spectrum view command
//!
//! Writes `ln(1 + |F(u, v)|)` of the centered spectrum as a grayscale BMP.
//! The zero-frequency term sits at `(height / 2, stride / 2)`; bright spots
//! elsewhere are periodic interference.

use crate::SpectrumArgs;
use anyhow::{Context, Result};
use specfx_io::Bitmap;
use specfx_ops::pipeline::forward_spectrum;
use specfx_ops::spectrum::log_magnitude;
use specfx_ops::FftEngine;
use tracing::{info, trace};

pub fn run(args: SpectrumArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), "spectrum::run");

    let bitmap = super::load_bitmap(&args.input)?;
    let mut engine = FftEngine::new();
    let spectrum = forward_spectrum(&mut engine, bitmap.samples())
        .with_context(|| format!("Forward transform failed: {}", args.input.display()))?;

    let view = log_magnitude(&spectrum)?;
    let (rows, cols) = (view.height(), view.width());
    super::save_bitmap(&args.output, &Bitmap::new_grayscale(view)?)?;

    info!(w = cols, h = rows, "Spectrum written");
    if verbose > 0 {
        println!(
            "Spectrum {}x{} written to {} (DC at row {}, column {})",
            cols,
            rows,
            args.output.display(),
            rows / 2,
            cols / 2
        );
    }

    Ok(())
}
