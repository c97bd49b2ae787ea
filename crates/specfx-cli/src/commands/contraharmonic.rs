//! Contraharmonic mean command
//!
//! Spatial filter for impulse noise: positive `Q` removes pepper, negative
//! `Q` removes salt.

use crate::ContraharmonicArgs;
use anyhow::{Context, Result};
use specfx_ops::Contraharmonic;
use tracing::{info, trace};

pub fn run(args: ContraharmonicArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), q = args.q, radius = args.radius, "contraharmonic::run");

    let filter = Contraharmonic::with_radius(args.q, args.radius)?;
    let bitmap = super::load_bitmap(&args.input)?;

    info!(q = args.q, radius = args.radius, w = bitmap.width(), h = bitmap.height(), "Applying contraharmonic mean");

    if verbose > 0 {
        println!(
            "Applying contraharmonic mean (Q={}, {}x{}) to {}",
            args.q,
            2 * args.radius + 1,
            2 * args.radius + 1,
            args.input.display()
        );
    }

    let samples = filter
        .apply(bitmap.samples())
        .with_context(|| format!("Filtering failed: {}", args.input.display()))?;
    super::save_bitmap(&args.output, &bitmap.with_samples(samples)?)?;

    if verbose > 0 {
        println!("Done.");
    }

    Ok(())
}
