//! Butterworth notch-reject command
//!
//! Each `--notch u,v` adds a symmetric pair of notches at `(u, v)` and
//! `(-u, -v)` relative to the spectrum center. Run `specfx spectrum` first to
//! find the offsets of the interference peaks.

use crate::NotchArgs;
use anyhow::Result;
use specfx_ops::{FilterConfig, PipelineConfig};
use tracing::{debug, trace};

pub fn run(args: NotchArgs, verbose: u8) -> Result<()> {
    trace!(
        input = %args.input.display(),
        cutoff = args.cutoff,
        order = args.order,
        notches = args.notches.len(),
        "notch::run"
    );

    for notch in &args.notches {
        debug!(u = notch.u, v = notch.v, "Notch pair");
    }

    let filter = FilterConfig::butterworth_notch_reject(args.cutoff, args.order, args.notches)?;
    let config = PipelineConfig::new(filter).with_engine(super::engine_options(args.power_of_two));

    super::restore_file(&args.input, &args.output, config, verbose)
}
