//! Contraharmonic mean filter.
//!
//! A spatial order-statistic filter that needs no transform:
//!
//! ```text
//! f(x, y) = Σ g(s, t)^(Q+1) / Σ g(s, t)^Q
//! ```
//!
//! over a square neighborhood with edge-replicated borders. `Q > 0` removes
//! pepper noise, `Q < 0` removes salt noise, `Q = 0` is the arithmetic mean
//! and `Q = -1` the harmonic mean.
//!
//! # Example
//!
//! ```rust
//! use specfx_core::SampleBuffer;
//! use specfx_ops::contraharmonic::Contraharmonic;
//!
//! let mut pixels = vec![200u8; 25];
//! pixels[12] = 0; // pepper
//! let src = SampleBuffer::from_pixels(5, 5, &pixels).unwrap();
//!
//! let out = Contraharmonic::new(1.5).unwrap().apply(&src).unwrap();
//! assert_eq!(out.get(2, 2), 200);
//! ```

use crate::quantize::quantize;
use crate::{OpsError, OpsResult};
use specfx_core::SampleBuffer;
use tracing::{debug, trace};

/// Contraharmonic mean filter of order `Q`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contraharmonic {
    order: f64,
    radius: usize,
}

impl Contraharmonic {
    /// 3x3 filter of order `q`.
    pub fn new(q: f64) -> OpsResult<Self> {
        Self::with_radius(q, 1)
    }

    /// `(2 * radius + 1)`-square filter of order `q`.
    pub fn with_radius(q: f64, radius: usize) -> OpsResult<Self> {
        if !q.is_finite() {
            return Err(OpsError::InvalidConfig(format!("contraharmonic order must be finite, got {q}")));
        }
        if radius == 0 {
            return Err(OpsError::InvalidConfig("contraharmonic radius must be >= 1".into()));
        }
        Ok(Self { order: q, radius })
    }

    /// Filter order `Q`.
    pub fn order(&self) -> f64 {
        self.order
    }

    /// Neighborhood radius.
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Filters the logical image; padding columns of the result are 0.
    ///
    /// A zero denominator, or a ratio that is not finite (zero samples with
    /// negative `Q`), yields 0.
    pub fn apply(&self, src: &SampleBuffer) -> OpsResult<SampleBuffer> {
        let width = src.width();
        let height = src.height();
        trace!(width, height, q = self.order, radius = self.radius, "Contraharmonic::apply");

        // g^Q and g^(Q+1) for every possible sample value.
        let pow_q: Vec<f64> = (0..=255).map(|g| (g as f64).powf(self.order)).collect();
        let pow_q1: Vec<f64> = (0..=255).map(|g| (g as f64).powf(self.order + 1.0)).collect();

        let r = self.radius as isize;
        let mut dst = SampleBuffer::new(width, height)?;

        for y in 0..height {
            for x in 0..width {
                let mut num = 0.0;
                let mut den = 0.0;
                for dy in -r..=r {
                    let sy = (y as isize + dy).clamp(0, height as isize - 1) as usize;
                    let row = src.row(sy);
                    for dx in -r..=r {
                        let sx = (x as isize + dx).clamp(0, width as isize - 1) as usize;
                        let g = row[sx] as usize;
                        num += pow_q1[g];
                        den += pow_q[g];
                    }
                }

                let ratio = num / den;
                let value = if den == 0.0 || !ratio.is_finite() { 0.0 } else { ratio };
                dst.set(y, x, quantize(value));
            }
        }

        debug!(width, height, q = self.order, "Contraharmonic filter applied");
        Ok(dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(width: usize, height: usize, f: impl Fn(usize, usize) -> u8) -> SampleBuffer {
        let pixels: Vec<u8> = (0..height)
            .flat_map(|y| (0..width).map(move |x| (y, x)))
            .map(|(y, x)| f(y, x))
            .collect();
        SampleBuffer::from_pixels(width, height, &pixels).unwrap()
    }

    #[test]
    fn test_constant_image_unchanged() {
        let src = buffer(6, 5, |_, _| 120);
        for q in [-1.5, -1.0, 0.0, 1.5] {
            let out = Contraharmonic::new(q).unwrap().apply(&src).unwrap();
            assert_eq!(out, src, "q = {q}");
        }
    }

    #[test]
    fn test_zero_order_is_mean() {
        let src = buffer(3, 3, |y, x| (y * 3 + x) as u8 * 10);
        let out = Contraharmonic::new(0.0).unwrap().apply(&src).unwrap();
        // Center sees the whole 3x3: mean of 0..=80 step 10.
        assert_eq!(out.get(1, 1), 40);
        // Corner (0,0) replicates edges: 0,0,10,0,0,10,30,30,40 -> 120/9.
        assert_eq!(out.get(0, 0), 13);
    }

    #[test]
    fn test_positive_order_removes_pepper() {
        let src = buffer(5, 5, |y, x| if (y, x) == (2, 2) { 0 } else { 180 });
        let out = Contraharmonic::new(1.5).unwrap().apply(&src).unwrap();
        assert_eq!(out.get(2, 2), 180);
    }

    #[test]
    fn test_negative_order_removes_salt() {
        let src = buffer(5, 5, |y, x| if (y, x) == (2, 2) { 255 } else { 60 });
        let out = Contraharmonic::new(-1.5).unwrap().apply(&src).unwrap();
        // Arithmetic mean would give 82.
        assert!(out.get(2, 2) < 65, "got {}", out.get(2, 2));
    }

    #[test]
    fn test_negative_order_on_black_is_zero() {
        let src = buffer(4, 4, |_, _| 0);
        let out = Contraharmonic::new(-1.5).unwrap().apply(&src).unwrap();
        assert!(out.as_bytes().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_padding_written_as_zero() {
        let src = SampleBuffer::from_raw(3, 2, 4, vec![50, 50, 50, 9, 50, 50, 50, 9]).unwrap();
        let out = Contraharmonic::new(1.0).unwrap().apply(&src).unwrap();
        assert_eq!(out.as_bytes(), &[50, 50, 50, 0, 50, 50, 50, 0]);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(Contraharmonic::new(f64::NAN).is_err());
        assert!(Contraharmonic::with_radius(1.0, 0).is_err());
    }
}
