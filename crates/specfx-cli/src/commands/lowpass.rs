//! Ideal low-pass command

use crate::LowpassArgs;
use anyhow::Result;
use specfx_ops::{FilterConfig, PipelineConfig};
use tracing::trace;

pub fn run(args: LowpassArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), cutoff = args.cutoff, "lowpass::run");

    let filter = FilterConfig::ideal_low_pass(args.cutoff)?;
    let config = PipelineConfig::new(filter).with_engine(super::engine_options(args.power_of_two));

    super::restore_file(&args.input, &args.output, config, verbose)
}
