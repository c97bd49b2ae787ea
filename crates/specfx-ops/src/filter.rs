//! Frequency-domain filters.
//!
//! Both filters are real-valued transfer functions `H(u, v)` evaluated over
//! a centered spectrum: the zero-frequency term sits at
//! `(u0, v0) = (height / 2, width / 2)` (integer division) and
//! `D(u, v) = sqrt((u - u0)^2 + (v - v0)^2)`. Applying a filter multiplies
//! the real and imaginary part of every cell by `H(u, v)`.
//!
//! # Filters
//!
//! | Variant | Transfer function |
//! |---------|-------------------|
//! | [`FilterConfig::IdealLowPass`] | `1` if `D <= D0`, else `0` |
//! | [`FilterConfig::ButterworthNotchReject`] | `Π_k 1/(1+(D0/D1k)^2n) · 1/(1+(D0/D2k)^2n)` |
//!
//! For the notch filter, `D1k` and `D2k` are distances to the symmetric pair
//! of notch centers `(u0 + uk, v0 + vk)` and `(u0 - uk, v0 - vk)`. A cell
//! exactly on a notch center gets `0` for that factor.
//!
//! The ideal low-pass is a brick-wall filter; the ringing it leaves after
//! the inverse transform is expected.
//!
//! # Example
//!
//! ```rust
//! use specfx_ops::filter::{FilterConfig, Notch};
//!
//! let notch = FilterConfig::butterworth_notch_reject(2.0, 2, vec![Notch::new(0.0, 10.0)]).unwrap();
//! // 64 rows x 64 columns: center (32, 32), notches at (32, 42) and (32, 22).
//! assert_eq!(notch.transfer(32, 42, 64, 64), 0.0);
//! assert!(notch.transfer(0, 0, 64, 64) > 0.999);
//! ```

use crate::{OpsError, OpsResult};
use serde::{Deserialize, Serialize};
use specfx_core::ComplexGrid;
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Offset of a notch from the spectrum center, in frequency-grid cells.
///
/// `u` runs along rows, `v` along columns. Serialized as `[u, v]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Notch {
    /// Row offset.
    pub u: f64,
    /// Column offset.
    pub v: f64,
}

impl Notch {
    /// Creates a notch offset.
    pub fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }
}

impl From<[f64; 2]> for Notch {
    fn from([u, v]: [f64; 2]) -> Self {
        Self { u, v }
    }
}

impl From<Notch> for [f64; 2] {
    fn from(n: Notch) -> Self {
        [n.u, n.v]
    }
}

/// Frequency-domain filter selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterConfig {
    /// Brick-wall low-pass: keep frequencies within `cutoff` of the center.
    IdealLowPass {
        /// Cutoff radius `D0`.
        cutoff: f64,
    },
    /// Butterworth band-reject around symmetric notch pairs.
    ButterworthNotchReject {
        /// Notch radius `D0`.
        cutoff: f64,
        /// Filter order `n`.
        order: u32,
        /// Notch offsets; each one rejects `+(uk, vk)` and `-(uk, vk)`.
        notches: Vec<Notch>,
    },
}

impl FilterConfig {
    /// Validated ideal low-pass filter.
    pub fn ideal_low_pass(cutoff: f64) -> OpsResult<Self> {
        let config = Self::IdealLowPass { cutoff };
        config.validate()?;
        Ok(config)
    }

    /// Validated Butterworth notch-reject filter.
    pub fn butterworth_notch_reject(cutoff: f64, order: u32, notches: Vec<Notch>) -> OpsResult<Self> {
        let config = Self::ButterworthNotchReject {
            cutoff,
            order,
            notches,
        };
        config.validate()?;
        Ok(config)
    }

    /// Short variant name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::IdealLowPass { .. } => "ideal_low_pass",
            Self::ButterworthNotchReject { .. } => "butterworth_notch_reject",
        }
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> OpsResult<()> {
        let cutoff = match self {
            Self::IdealLowPass { cutoff } => *cutoff,
            Self::ButterworthNotchReject { cutoff, .. } => *cutoff,
        };
        if !cutoff.is_finite() || cutoff < 0.0 {
            return Err(OpsError::InvalidConfig(format!(
                "cutoff must be a finite value >= 0, got {cutoff}"
            )));
        }

        if let Self::ButterworthNotchReject { order, notches, .. } = self {
            if *order == 0 {
                return Err(OpsError::InvalidConfig("order must be >= 1".into()));
            }
            if notches.is_empty() {
                return Err(OpsError::InvalidConfig(
                    "notch reject filter needs at least one notch".into(),
                ));
            }
            if let Some(n) = notches.iter().find(|n| !n.u.is_finite() || !n.v.is_finite()) {
                return Err(OpsError::InvalidConfig(format!(
                    "notch offset ({}, {}) is not finite",
                    n.u, n.v
                )));
            }
        }
        Ok(())
    }

    /// `H(u, v)` on a `height` x `width` centered spectrum.
    pub fn transfer(&self, u: usize, v: usize, height: usize, width: usize) -> f64 {
        let u0 = (height / 2) as f64;
        let v0 = (width / 2) as f64;
        let (u, v) = (u as f64, v as f64);

        match self {
            Self::IdealLowPass { cutoff } => {
                if distance(u - u0, v - v0) <= *cutoff {
                    1.0
                } else {
                    0.0
                }
            }
            Self::ButterworthNotchReject {
                cutoff,
                order,
                notches,
            } => notches
                .iter()
                .map(|n| {
                    let d1 = distance(u - (u0 + n.u), v - (v0 + n.v));
                    let d2 = distance(u - (u0 - n.u), v - (v0 - n.v));
                    butterworth_reject(*cutoff, *order, d1) * butterworth_reject(*cutoff, *order, d2)
                })
                .product(),
        }
    }

    /// Multiplies every cell of a centered spectrum by `H(u, v)`.
    ///
    /// Rows are processed on the rayon pool when `parallel` is set and the
    /// `parallel` feature is enabled.
    pub fn apply(&self, grid: &mut ComplexGrid, parallel: bool) {
        let width = grid.width();
        let height = grid.height();
        trace!(filter = self.name(), width, height, parallel, "FilterConfig::apply");

        let apply_row = |(u, line): (usize, &mut [specfx_core::Complex64])| {
            for (v, cell) in line.iter_mut().enumerate() {
                let h = self.transfer(u, v, height, width);
                if h == 0.0 {
                    cell.re = 0.0;
                    cell.im = 0.0;
                } else if h != 1.0 {
                    *cell *= h;
                }
            }
        };

        #[cfg(feature = "parallel")]
        if parallel {
            grid.as_mut_slice()
                .par_chunks_exact_mut(width)
                .enumerate()
                .for_each(apply_row);
            debug!(filter = self.name(), width, height, "Filter applied");
            return;
        }
        #[cfg(not(feature = "parallel"))]
        let _ = parallel;

        grid.as_mut_slice()
            .chunks_exact_mut(width)
            .enumerate()
            .for_each(apply_row);

        debug!(filter = self.name(), width, height, "Filter applied");
    }
}

#[inline]
fn distance(du: f64, dv: f64) -> f64 {
    (du * du + dv * dv).sqrt()
}

/// `1 / (1 + (D0 / d)^(2n))`, with 0 on the notch center itself.
#[inline]
fn butterworth_reject(cutoff: f64, order: u32, d: f64) -> f64 {
    if d == 0.0 {
        return 0.0;
    }
    1.0 / (1.0 + (cutoff / d).powf(2.0 * order as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use specfx_core::Complex64;

    fn notch(cutoff: f64, order: u32, offsets: &[(f64, f64)]) -> FilterConfig {
        let notches = offsets.iter().map(|&(u, v)| Notch::new(u, v)).collect();
        FilterConfig::butterworth_notch_reject(cutoff, order, notches).unwrap()
    }

    #[test]
    fn test_ideal_low_pass_disc() {
        let lp = FilterConfig::ideal_low_pass(2.0).unwrap();
        // 8x8: center (4, 4)
        assert_eq!(lp.transfer(4, 4, 8, 8), 1.0);
        assert_eq!(lp.transfer(4, 6, 8, 8), 1.0);
        assert_eq!(lp.transfer(6, 4, 8, 8), 1.0);
        assert_eq!(lp.transfer(5, 5, 8, 8), 1.0);
        assert_eq!(lp.transfer(6, 6, 8, 8), 0.0);
        assert_eq!(lp.transfer(0, 0, 8, 8), 0.0);
    }

    #[test]
    fn test_ideal_low_pass_zero_cutoff_keeps_center_only() {
        let lp = FilterConfig::ideal_low_pass(0.0).unwrap();
        let mut kept = 0;
        for u in 0..6 {
            for v in 0..12 {
                if lp.transfer(u, v, 6, 12) == 1.0 {
                    assert_eq!((u, v), (3, 6));
                    kept += 1;
                }
            }
        }
        assert_eq!(kept, 1);
    }

    #[test]
    fn test_notch_center_rejected() {
        let f = notch(2.0, 2, &[(0.0, 10.0)]);
        assert_eq!(f.transfer(32, 42, 64, 64), 0.0);
        assert_eq!(f.transfer(32, 22, 64, 64), 0.0);
        // DC is 10 cells from each notch: (2/10)^4 = 0.0016 per factor.
        let expected = (1.0 / 1.0016f64).powi(2);
        assert_relative_eq!(f.transfer(32, 32, 64, 64), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_notch_tends_to_one_far_away() {
        let f = notch(3.0, 1, &[(4.0, 4.0)]);
        let near = f.transfer(260, 260, 512, 512);
        let far = f.transfer(511, 0, 512, 512);
        assert!(near < 0.5);
        assert!(far > 0.999);
        assert!(far <= 1.0);
    }

    #[test]
    fn test_notch_order_sharpens_rolloff() {
        // One cutoff radius away from a notch every order gives 1/2 per factor;
        // inside it a higher order rejects more.
        let low = notch(4.0, 1, &[(0.0, 16.0)]);
        let high = notch(4.0, 4, &[(0.0, 16.0)]);
        let inside = (32, 32 + 16 + 2);
        assert!(high.transfer(inside.0, inside.1, 64, 64) < low.transfer(inside.0, inside.1, 64, 64));
    }

    #[test]
    fn test_notch_product_over_pairs() {
        let a = notch(2.0, 2, &[(0.0, 10.0)]);
        let b = notch(2.0, 2, &[(5.0, 0.0)]);
        let ab = notch(2.0, 2, &[(0.0, 10.0), (5.0, 0.0)]);
        for &(u, v) in &[(0, 0), (30, 40), (37, 32), (12, 50)] {
            assert_relative_eq!(
                ab.transfer(u, v, 64, 64),
                a.transfer(u, v, 64, 64) * b.transfer(u, v, 64, 64),
                epsilon = 1e-15
            );
        }
        assert_eq!(ab.transfer(37, 32, 64, 64), 0.0);
        assert_eq!(ab.transfer(27, 32, 64, 64), 0.0);
    }

    #[test]
    fn test_notch_zero_cutoff_passes_everything_but_centers() {
        let f = notch(0.0, 2, &[(1.0, 1.0)]);
        assert_eq!(f.transfer(0, 0, 4, 4), 1.0);
        assert_eq!(f.transfer(3, 3, 4, 4), 0.0);
    }

    #[test]
    fn test_apply_scales_both_parts() {
        let mut grid = ComplexGrid::from_vec(4, 4, vec![Complex64::new(2.0, -3.0); 16]).unwrap();
        let f = notch(1.0, 1, &[(0.0, 1.0)]);
        f.apply(&mut grid, false);
        for u in 0..4 {
            for v in 0..4 {
                let h = f.transfer(u, v, 4, 4);
                assert_relative_eq!(grid.get(u, v).re, 2.0 * h);
                assert_relative_eq!(grid.get(u, v).im, -3.0 * h);
            }
        }
        assert_eq!(grid.get(2, 3), Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_apply_sequential_matches_rows_in_parallel() {
        let data: Vec<Complex64> = (0..12 * 7).map(|i| Complex64::new(i as f64, 1.0 - i as f64)).collect();
        let f = notch(1.5, 2, &[(1.0, 3.0), (-2.0, 1.0)]);

        let mut seq = ComplexGrid::from_vec(12, 7, data.clone()).unwrap();
        let mut par = ComplexGrid::from_vec(12, 7, data).unwrap();
        f.apply(&mut seq, false);
        f.apply(&mut par, true);
        assert_eq!(seq.as_slice(), par.as_slice());
    }

    #[test]
    fn test_apply_ideal_zeroes_outside() {
        let mut grid = ComplexGrid::from_vec(8, 8, vec![Complex64::new(1.0, 1.0); 64]).unwrap();
        FilterConfig::ideal_low_pass(1.0).unwrap().apply(&mut grid, true);
        let kept = grid.as_slice().iter().filter(|c| c.re != 0.0).count();
        assert_eq!(kept, 5);
        assert_eq!(grid.get(4, 4), Complex64::new(1.0, 1.0));
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            FilterConfig::ideal_low_pass(-1.0),
            Err(OpsError::InvalidConfig(_))
        ));
        assert!(FilterConfig::ideal_low_pass(f64::NAN).is_err());
        assert!(FilterConfig::butterworth_notch_reject(2.0, 2, vec![]).is_err());
        assert!(FilterConfig::butterworth_notch_reject(2.0, 0, vec![Notch::new(0.0, 1.0)]).is_err());
        assert!(
            FilterConfig::butterworth_notch_reject(2.0, 1, vec![Notch::new(f64::INFINITY, 1.0)]).is_err()
        );
    }

    #[test]
    fn test_notch_serializes_as_pair() {
        let f = notch(2.0, 2, &[(0.0, 10.0)]);
        let yaml = serde_yaml::to_string(&f).unwrap();
        assert!(yaml.contains("type: butterworth_notch_reject"));
        let back: FilterConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, f);

        let parsed: FilterConfig =
            serde_yaml::from_str("type: butterworth_notch_reject\ncutoff: 3\norder: 1\nnotches: [[1, -2]]\n")
                .unwrap();
        assert_eq!(parsed, notch(3.0, 1, &[(1.0, -2.0)]));
    }
}
