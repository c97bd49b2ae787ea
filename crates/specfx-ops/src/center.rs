//! Spatial centering.
//!
//! Multiplying sample `n` of a length-`N` axis by `exp(2πi·⌊N/2⌋·n/N)`
//! before the forward transform shifts the zero-frequency term to index
//! `N / 2`. Done on both axes it lands on grid cell
//! `(height / 2, width / 2)`, so filters can measure plain Euclidean
//! distance from that cell instead of from the four corners. For even `N`
//! the factor is the familiar `(-1)^n`; odd lengths get a true phase ramp.
//! Multiplying by the conjugate after the inverse transform undoes it.

use crate::OpsResult;
use specfx_core::{Complex64, ComplexGrid, SampleBuffer};
use std::f64::consts::TAU;
use tracing::trace;

/// Centering factor for index `n` on an axis of length `len`.
#[inline]
pub fn shift_phase(n: usize, len: usize) -> Complex64 {
    if len % 2 == 0 {
        return Complex64::new(if n % 2 == 0 { 1.0 } else { -1.0 }, 0.0);
    }
    let turns = ((len / 2) * n % len) as f64 / len as f64;
    Complex64::from_polar(1.0, TAU * turns)
}

fn axis_phases(len: usize) -> Vec<Complex64> {
    (0..len).map(|n| shift_phase(n, len)).collect()
}

/// Builds a centered grid from an 8-bit sample buffer.
///
/// The grid spans the full row stride. Padding columns enter as 0, whatever
/// bytes the buffer holds there.
pub fn center(samples: &SampleBuffer) -> OpsResult<ComplexGrid> {
    let width = samples.width();
    let stride = samples.stride();
    let height = samples.height();
    trace!(width, stride, height, "center");

    let mut grid = ComplexGrid::new(stride, height)?;
    let rows = axis_phases(height);
    let cols = axis_phases(stride);
    for (row, line) in grid.rows_mut().enumerate() {
        for (col, &value) in samples.row(row).iter().enumerate() {
            line[col] = rows[row] * cols[col] * value as f64;
        }
    }
    Ok(grid)
}

/// Undoes [`center`] on an inverse-transformed grid.
pub fn decenter(grid: &mut ComplexGrid) {
    trace!(width = grid.width(), height = grid.height(), "decenter");
    let rows = axis_phases(grid.height());
    let cols = axis_phases(grid.width());
    for (row, line) in grid.rows_mut().enumerate() {
        for (col, cell) in line.iter_mut().enumerate() {
            *cell *= (rows[row] * cols[col]).conj();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fft::{Direction, FftEngine};
    use crate::quantize::requantize;
    use approx::assert_relative_eq;

    #[test]
    fn test_even_length_is_sign_flip() {
        assert_eq!(shift_phase(0, 8), Complex64::new(1.0, 0.0));
        assert_eq!(shift_phase(1, 8), Complex64::new(-1.0, 0.0));
        assert_eq!(shift_phase(5, 4), Complex64::new(-1.0, 0.0));
    }

    #[test]
    fn test_odd_length_phase_ramp() {
        // len 5: ⌊5/2⌋ = 2, so index 3 turns 6/5 = 1/5 of a circle.
        let p = shift_phase(3, 5);
        assert_relative_eq!(p.arg(), TAU / 5.0, epsilon = 1e-12);
        assert_relative_eq!(p.norm(), 1.0, epsilon = 1e-12);
        assert_eq!(shift_phase(0, 5), Complex64::new(1.0, 0.0));
    }

    #[test]
    fn test_odd_height_centers_dc() {
        let samples = SampleBuffer::from_pixels(8, 5, &[40u8; 40]).unwrap();
        let mut grid = center(&samples).unwrap();
        FftEngine::new().transform(&mut grid, Direction::Forward).unwrap();

        assert_relative_eq!(grid.get(2, 4).re, 40.0 * 40.0, epsilon = 1e-9);
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                if (row, col) != (2, 4) {
                    assert!(grid.get(row, col).norm() < 1e-9, "({row}, {col}) = {}", grid.get(row, col));
                }
            }
        }
    }

    #[test]
    fn test_center_layout() {
        let samples = SampleBuffer::from_pixels(3, 2, &[10, 20, 30, 40, 50, 60]).unwrap();
        let grid = center(&samples).unwrap();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 2);
        assert_eq!(
            grid.real_part(),
            vec![10.0, -20.0, 30.0, 0.0, -40.0, 50.0, -60.0, 0.0]
        );
        assert!(grid.as_slice().iter().all(|c| c.im == 0.0));
    }

    #[test]
    fn test_padding_ignored_on_input() {
        let samples = SampleBuffer::from_raw(2, 1, 4, vec![1, 2, 99, 99]).unwrap();
        let grid = center(&samples).unwrap();
        assert_eq!(grid.real_part(), vec![1.0, -2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_decenter_is_inverse() {
        let pixels: Vec<u8> = (0..7 * 5).map(|i| (i * 53 % 256) as u8).collect();
        let samples = SampleBuffer::from_pixels(7, 5, &pixels).unwrap();

        let mut grid = center(&samples).unwrap();
        decenter(&mut grid);
        let restored = requantize(&grid, samples.width()).unwrap();
        assert_eq!(restored, samples);
    }
}
