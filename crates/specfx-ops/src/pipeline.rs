//! Spectral filtering pipeline.
//!
//! One run takes a raster sample buffer through
//! center -> forward FFT -> filter -> inverse FFT -> decenter -> requantize.
//! The complex grid is created, owned and dropped inside [`SpectralPipeline::run`];
//! nothing else sees it. Any stage failure aborts the run before a result
//! exists, so callers never hold partially filtered samples.
//!
//! # Example
//!
//! ```rust
//! use specfx_core::SampleBuffer;
//! use specfx_ops::{FilterConfig, PipelineConfig, SpectralPipeline};
//!
//! let src = SampleBuffer::from_pixels(8, 8, &[100u8; 64]).unwrap();
//! let config = PipelineConfig::new(FilterConfig::ideal_low_pass(100.0).unwrap());
//!
//! let mut pipeline = SpectralPipeline::new(config).unwrap();
//! let out = pipeline.run(&src).unwrap();
//! assert_eq!(out, src);
//! ```

use crate::center::{center, decenter};
use crate::config::PipelineConfig;
use crate::fft::{Direction, FftEngine};
use crate::quantize::requantize;
use crate::OpsResult;
use specfx_core::{ComplexGrid, SampleBuffer};
use tracing::{debug, info, info_span, trace};

/// A validated filter configuration bound to a transform engine.
///
/// Reusing one pipeline across equal-size images reuses the engine's FFT
/// plans. Pipelines share nothing, so parallel batches run one per worker.
#[derive(Debug)]
pub struct SpectralPipeline {
    config: PipelineConfig,
    engine: FftEngine,
}

impl SpectralPipeline {
    /// Validates `config` and builds its engine.
    pub fn new(config: PipelineConfig) -> OpsResult<Self> {
        config.validate()?;
        let engine = FftEngine::with_options(config.engine);
        Ok(Self { config, engine })
    }

    /// Active configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Filters one raster.
    ///
    /// The transform spans the full row stride, padding included, and the
    /// result has the same width, height and stride as `samples`.
    pub fn run(&mut self, samples: &SampleBuffer) -> OpsResult<SampleBuffer> {
        let width = samples.width();
        let height = samples.height();
        let stride = samples.stride();
        let filter = &self.config.filter;

        let _span = info_span!("pipeline", filter = filter.name(), width, height).entered();
        trace!(stride, "SpectralPipeline::run");

        // Reject unsupported shapes before any work is done.
        self.engine.validate(stride, height)?;

        let mut grid = center(samples)?;
        self.engine.transform(&mut grid, Direction::Forward)?;
        debug!("forward transform done");

        filter.apply(&mut grid, self.engine.options().parallel);
        debug!("filter applied");

        self.engine.transform(&mut grid, Direction::Inverse)?;
        decenter(&mut grid);
        let out = requantize(&grid, width)?;

        info!(width, height, "spectral filter complete");
        Ok(out)
    }
}

/// Centered forward spectrum of a raster, as fed to the filter stage.
pub fn forward_spectrum(engine: &mut FftEngine, samples: &SampleBuffer) -> OpsResult<ComplexGrid> {
    engine.validate(samples.stride(), samples.height())?;
    let mut grid = center(samples)?;
    engine.transform(&mut grid, Direction::Forward)?;
    Ok(grid)
}

/// Runs a single image through a fresh pipeline.
pub fn restore(samples: &SampleBuffer, config: PipelineConfig) -> OpsResult<SampleBuffer> {
    SpectralPipeline::new(config)?.run(samples)
}
