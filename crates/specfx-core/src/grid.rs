//! Complex sample grid.
//!
//! [`ComplexGrid`] is the working buffer of the restoration pipeline: a
//! dense, row-major array of [`Complex64`] values. Spatial centering writes
//! it, the Fourier engine transforms it in place, frequency filters scale
//! it, and the requantizer reads its real part back out.
//!
//! The shape is fixed at construction. There is no way to resize a grid;
//! build a new one instead.
//!
//! # Example
//!
//! ```rust
//! use specfx_core::{ComplexGrid, Complex64};
//!
//! let mut grid = ComplexGrid::new(8, 4).unwrap();
//! grid[(1, 2)] = Complex64::new(3.0, -1.0);
//! assert_eq!(grid.get(1, 2).re, 3.0);
//! assert_eq!(grid.len(), 32);
//! ```

use crate::error::{checked_area, Error, Result};
use num_complex::Complex64;
use std::ops::{Index, IndexMut};

/// Dense row-major grid of complex samples.
///
/// Cell `(row, col)` lives at `row * width + col`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexGrid {
    width: usize,
    height: usize,
    data: Vec<Complex64>,
}

impl ComplexGrid {
    /// Creates a zero-filled grid of `width` columns and `height` rows.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let len = checked_area(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![Complex64::new(0.0, 0.0); len],
        })
    }

    /// Wraps an existing row-major buffer.
    ///
    /// Fails if `data.len() != width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<Complex64>) -> Result<Self> {
        let len = checked_area(width, height)?;
        if data.len() != len {
            return Err(Error::size_mismatch(len, data.len()));
        }
        Ok(Self { width, height, data })
    }

    /// Builds a grid from real values with zero imaginary parts.
    pub fn from_real(width: usize, height: usize, real: &[f64]) -> Result<Self> {
        let len = checked_area(width, height)?;
        if real.len() != len {
            return Err(Error::size_mismatch(len, real.len()));
        }
        let data = real.iter().map(|&re| Complex64::new(re, 0.0)).collect();
        Ok(Self { width, height, data })
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total cell count (`width * height`).
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`: a grid has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat index of `(row, col)`.
    #[inline]
    pub fn index_of(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.height && col < self.width);
        row * self.width + col
    }

    /// Returns the value at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the cell is out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self[(row, col)]
    }

    /// Overwrites the value at `(row, col)`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: Complex64) {
        self[(row, col)] = value;
    }

    /// Row-major view of all cells.
    #[inline]
    pub fn as_slice(&self) -> &[Complex64] {
        &self.data
    }

    /// Mutable row-major view of all cells.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Complex64] {
        &mut self.data
    }

    /// Iterates over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Complex64]> {
        self.data.chunks_exact(self.width)
    }

    /// Iterates over mutable rows.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [Complex64]> {
        self.data.chunks_exact_mut(self.width)
    }

    /// Copies out the real part of every cell, row-major.
    pub fn real_part(&self) -> Vec<f64> {
        self.data.iter().map(|c| c.re).collect()
    }
}

impl Index<(usize, usize)> for ComplexGrid {
    type Output = Complex64;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Complex64 {
        assert!(
            row < self.height && col < self.width,
            "cell ({row}, {col}) out of bounds for {}x{} grid",
            self.width,
            self.height
        );
        &self.data[row * self.width + col]
    }
}

impl IndexMut<(usize, usize)> for ComplexGrid {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Complex64 {
        assert!(
            row < self.height && col < self.width,
            "cell ({row}, {col}) out of bounds for {}x{} grid",
            self.width,
            self.height
        );
        &mut self.data[row * self.width + col]
    }
}
