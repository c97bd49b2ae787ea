//! 2D discrete Fourier transform engine.
//!
//! The 2D transform is computed as two passes of 1D transforms: one over
//! every row, then one over every column. Columns are transposed into
//! contiguous lines first so both passes run over cache-friendly slices.
//!
//! # Normalization
//!
//! The forward transform is unnormalized (kernel `exp(-2πi·k·n/N)`). The
//! inverse transform uses `exp(+2πi·k·n/N)` and scales every cell by
//! `1 / (width * height)` exactly once, so `inverse(forward(x)) == x` up to
//! rounding.
//!
//! # Supported lengths
//!
//! 1D plans come from `rustfft`, which picks mixed-radix, Rader or
//! Bluestein algorithms as needed, so any non-zero length works under
//! [`LengthPolicy::Any`]. [`LengthPolicy::PowerOfTwo`] restricts the engine
//! to the classical radix-2 sizes. Either way an unsupported shape is
//! reported as [`OpsError::UnsupportedDimensions`] before the grid is
//! touched.
//!
//! # Example
//!
//! ```rust
//! use specfx_core::ComplexGrid;
//! use specfx_ops::fft::{Direction, FftEngine};
//!
//! let real: Vec<f64> = (0..24).map(|v| v as f64).collect();
//! let mut grid = ComplexGrid::from_real(6, 4, &real).unwrap();
//!
//! let mut engine = FftEngine::new();
//! engine.transform(&mut grid, Direction::Forward).unwrap();
//! engine.transform(&mut grid, Direction::Inverse).unwrap();
//!
//! assert!((grid.get(2, 3).re - 15.0).abs() < 1e-9);
//! ```

use crate::{OpsError, OpsResult};
use rustfft::{Fft, FftDirection, FftPlanner};
use serde::{Deserialize, Serialize};
use specfx_core::{Complex64, ComplexGrid};
use std::sync::Arc;
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Transform direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Spatial to frequency domain, unnormalized.
    Forward,
    /// Frequency to spatial domain, scaled by `1 / (width * height)`.
    Inverse,
}

impl From<Direction> for FftDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Forward => FftDirection::Forward,
            Direction::Inverse => FftDirection::Inverse,
        }
    }
}

/// Which grid dimensions the engine accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthPolicy {
    /// Any non-zero length.
    #[default]
    Any,
    /// Powers of two only (radix-2 sizes).
    PowerOfTwo,
}

impl LengthPolicy {
    /// Returns `true` if a 1D transform of length `n` is allowed.
    #[inline]
    pub fn supports(self, n: usize) -> bool {
        match self {
            LengthPolicy::Any => n > 0,
            LengthPolicy::PowerOfTwo => n.is_power_of_two(),
        }
    }
}

/// Engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Accepted transform lengths.
    pub length_policy: LengthPolicy,
    /// Run independent row/column transforms on the rayon pool. Ignored
    /// without the `parallel` feature; results are identical either way.
    pub parallel: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            length_policy: LengthPolicy::Any,
            parallel: true,
        }
    }
}

/// In-place 2D FFT over [`ComplexGrid`]s.
///
/// Holds a `rustfft` planner, so plans for a given length and direction are
/// built once and reused across calls on equal-size grids.
pub struct FftEngine {
    planner: FftPlanner<f64>,
    options: EngineOptions,
}

impl std::fmt::Debug for FftEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FftEngine").field("options", &self.options).finish()
    }
}

impl Default for FftEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FftEngine {
    /// Creates an engine with default options.
    pub fn new() -> Self {
        Self::with_options(EngineOptions::default())
    }

    /// Creates an engine with the given options.
    pub fn with_options(options: EngineOptions) -> Self {
        Self {
            planner: FftPlanner::new(),
            options,
        }
    }

    /// Engine settings.
    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Checks that a `width` x `height` grid can be transformed.
    pub fn validate(&self, width: usize, height: usize) -> OpsResult<()> {
        let policy = self.options.length_policy;
        for (name, n) in [("width", width), ("height", height)] {
            if n == 0 {
                return Err(OpsError::UnsupportedDimensions {
                    width,
                    height,
                    reason: format!("{name} is zero"),
                });
            }
            if !policy.supports(n) {
                return Err(OpsError::UnsupportedDimensions {
                    width,
                    height,
                    reason: format!("{name} {n} is not a power of two"),
                });
            }
        }
        Ok(())
    }

    /// Transforms `grid` in place.
    ///
    /// Fails without modifying the grid if its shape is not supported.
    pub fn transform(&mut self, grid: &mut ComplexGrid, direction: Direction) -> OpsResult<()> {
        let width = grid.width();
        let height = grid.height();
        trace!(width, height, ?direction, "FftEngine::transform");
        self.validate(width, height)?;

        let row_fft = self.planner.plan_fft(width, direction.into());
        let col_fft = self.planner.plan_fft(height, direction.into());

        self.process_lines(grid.as_mut_slice(), &row_fft);

        let mut columns = vec![Complex64::new(0.0, 0.0); grid.len()];
        transpose(grid.as_slice(), &mut columns, width, height);
        self.process_lines(&mut columns, &col_fft);
        transpose(&columns, grid.as_mut_slice(), height, width);

        if direction == Direction::Inverse {
            let scale = 1.0 / (width * height) as f64;
            for cell in grid.as_mut_slice() {
                *cell *= scale;
            }
        }

        debug!(width, height, ?direction, "2D FFT complete");
        Ok(())
    }

    /// Runs `fft` over consecutive lines of `fft.len()` samples.
    fn process_lines(&self, data: &mut [Complex64], fft: &Arc<dyn Fft<f64>>) {
        let len = fft.len();
        let scratch_len = fft.get_inplace_scratch_len();

        #[cfg(feature = "parallel")]
        if self.options.parallel {
            data.par_chunks_exact_mut(len).for_each_init(
                || vec![Complex64::new(0.0, 0.0); scratch_len],
                |scratch, line| fft.process_with_scratch(line, scratch),
            );
            return;
        }

        let mut scratch = vec![Complex64::new(0.0, 0.0); scratch_len];
        for line in data.chunks_exact_mut(len) {
            fft.process_with_scratch(line, &mut scratch);
        }
    }
}

/// Writes the transpose of the `width` x `height` row-major `src` into `dst`.
fn transpose(src: &[Complex64], dst: &mut [Complex64], width: usize, height: usize) {
    debug_assert_eq!(src.len(), width * height);
    debug_assert_eq!(dst.len(), width * height);
    for y in 0..height {
        for x in 0..width {
            dst[x * height + y] = src[y * width + x];
        }
    }
}
