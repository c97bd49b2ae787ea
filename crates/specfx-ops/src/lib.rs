//! # specfx-ops
//!
//! Frequency-domain restoration of 8-bit grayscale rasters.
//!
//! A restoration run centers the samples, transforms them with a 2D FFT,
//! multiplies the spectrum by a filter transfer function, transforms back,
//! undoes the centering and requantizes to 8 bits.
//!
//! # Modules
//!
//! - [`center`] - Checkerboard sign flip that moves DC to the grid center
//! - [`fft`] - 2D FFT engine built from 1D `rustfft` passes
//! - [`filter`] - Ideal low-pass and Butterworth notch-reject filters
//! - [`quantize`] - Rounding and clamping back to `u8`
//! - [`pipeline`] - The full restoration sequence
//! - [`config`] - YAML pipeline configuration
//! - [`spectrum`] - Log-magnitude spectrum view for locating interference
//! - [`contraharmonic`] - Spatial contraharmonic mean filter
//!
//! # Common Operations
//!
//! ## Remove periodic interference
//!
//! ```rust,ignore
//! use specfx_ops::{FilterConfig, Notch, PipelineConfig, SpectralPipeline};
//!
//! let filter = FilterConfig::butterworth_notch_reject(2.0, 2, vec![Notch::new(0.0, 10.0)])?;
//! let mut pipeline = SpectralPipeline::new(PipelineConfig::new(filter))?;
//! let clean = pipeline.run(bitmap.samples())?;
//! ```
//!
//! ## Load a pipeline from YAML
//!
//! ```rust,ignore
//! use specfx_ops::PipelineConfig;
//!
//! let config = PipelineConfig::from_file("notch.yaml")?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod center;
pub mod config;
pub mod contraharmonic;
pub mod fft;
pub mod filter;
pub mod pipeline;
pub mod quantize;
pub mod spectrum;

pub use config::PipelineConfig;
pub use contraharmonic::Contraharmonic;
pub use error::{OpsError, OpsResult};
pub use fft::{Direction, EngineOptions, FftEngine, LengthPolicy};
pub use filter::{FilterConfig, Notch};
pub use pipeline::SpectralPipeline;
pub use quantize::quantize;
