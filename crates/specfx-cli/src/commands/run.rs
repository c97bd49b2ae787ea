//! Config-driven pipeline command

use crate::RunArgs;
use anyhow::{Context, Result};
use specfx_ops::PipelineConfig;
use tracing::{debug, trace};

pub fn run(args: RunArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), config = %args.config.display(), "run::run");

    let config = PipelineConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config: {}", args.config.display()))?;
    debug!(filter = config.filter.name(), policy = ?config.engine.length_policy, "Config loaded");

    super::restore_file(&args.input, &args.output, config, verbose)
}
