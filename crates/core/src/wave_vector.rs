//! Discrete wave vectors on the simulation grid.
//!
//! Grid index `i` on an axis of `n` cells maps to the signed frequency
//! [`alias`]`(i, n)`, so the upper half of the grid holds negative
//! frequencies in the order an inverse FFT expects. The wave vector of cell
//! `(x, z)` is `2π / domain_size * (alias(x, nx), alias(z, nz))`.

use crate::error::SpectrumError;
use crate::vector::Vector2;
use std::f64::consts::TAU;

/// Signed frequency index for grid index `i` on an axis of `n` cells.
///
/// Indices above `n / 2` wrap to `i - n`.
pub fn alias(i: usize, n: usize) -> i64 {
    if i > n / 2 {
        i as i64 - n as i64
    } else {
        i as i64
    }
}

/// Frequency-domain grid: resolution plus the physical patch size it covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveGrid {
    width: usize,
    height: usize,
    domain_size: Vector2,
}

impl WaveGrid {
    /// Returns `InvalidDimensions` for a zero or overflowing resolution and
    /// `InvalidConfiguration` unless both domain extents are positive and finite.
    pub fn new(width: usize, height: usize, domain_size: Vector2) -> Result<Self, SpectrumError> {
        if width == 0 || height == 0 {
            return Err(SpectrumError::InvalidDimensions);
        }
        width
            .checked_mul(height)
            .ok_or(SpectrumError::InvalidDimensions)?;
        if !domain_size.is_finite() || domain_size.x <= 0.0 || domain_size.y <= 0.0 {
            return Err(SpectrumError::InvalidConfiguration(format!(
                "domain size must be positive, got ({}, {})",
                domain_size.x, domain_size.y
            )));
        }
        Ok(Self {
            width,
            height,
            domain_size,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn domain_size(&self) -> Vector2 {
        self.domain_size
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Spacing between adjacent wave vectors, `2π / domain_size`.
    pub fn frequency_step(&self) -> Vector2 {
        Vector2::splat(TAU).div_elements(self.domain_size)
    }

    /// Wave vector of cell `(x, z)`.
    pub fn wave_vector(&self, x: usize, z: usize) -> Vector2 {
        let index = Vector2::new(
            alias(x, self.width) as f64,
            alias(z, self.height) as f64,
        );
        self.frequency_step().mul_elements(index)
    }

    /// Cell holding `-k` for the wave vector at `(x, z)`.
    pub fn mirror_index(&self, x: usize, z: usize) -> (usize, usize) {
        (
            (self.width - x % self.width) % self.width,
            (self.height - z % self.height) % self.height,
        )
    }

    /// Iterates `(x, z, k)` in row-major order (`z` outer, `x` inner).
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Vector2)> + '_ {
        (0..self.height)
            .flat_map(move |z| (0..self.width).map(move |x| (x, z, self.wave_vector(x, z))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(w: usize, h: usize) -> WaveGrid {
        WaveGrid::new(w, h, Vector2::new(1000.0, 1000.0)).unwrap()
    }

    #[test]
    fn alias_wraps_upper_half() {
        let got: Vec<i64> = (0..8).map(|i| alias(i, 8)).collect();
        assert_eq!(got, vec![0, 1, 2, 3, 4, -3, -2, -1]);
    }

    #[test]
    fn alias_odd_length() {
        let got: Vec<i64> = (0..5).map(|i| alias(i, 5)).collect();
        assert_eq!(got, vec![0, 1, 2, -2, -1]);
    }

    #[test]
    fn origin_is_zero_wave_vector() {
        assert_eq!(grid(16, 16).wave_vector(0, 0), Vector2::ZERO);
    }

    #[test]
    fn wave_vector_scales_with_domain() {
        let g = WaveGrid::new(4, 4, Vector2::new(TAU, 2.0 * TAU)).unwrap();
        let k = g.wave_vector(1, 1);
        assert!((k.x - 1.0).abs() < 1e-12);
        assert!((k.y - 0.5).abs() < 1e-12);
        let neg = g.wave_vector(3, 3);
        assert!((neg.x + 1.0).abs() < 1e-12);
        assert!((neg.y + 0.5).abs() < 1e-12);
    }

    #[test]
    fn mirror_index_maps_k_to_minus_k() {
        let g = grid(8, 6);
        for z in 0..6 {
            for x in 0..8 {
                let (mx, mz) = g.mirror_index(x, z);
                let k = g.wave_vector(x, z);
                let mk = g.wave_vector(mx, mz);
                // Nyquist rows/columns alias to themselves.
                if x != 4 && z != 3 {
                    assert_eq!(mk, -k, "mirror of ({x}, {z})");
                }
            }
        }
    }

    #[test]
    fn iter_is_row_major() {
        let g = grid(3, 2);
        let cells: Vec<(usize, usize)> = g.iter().map(|(x, z, _)| (x, z)).collect();
        assert_eq!(cells, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn new_rejects_bad_inputs() {
        let d = Vector2::new(1.0, 1.0);
        assert!(matches!(
            WaveGrid::new(0, 4, d),
            Err(SpectrumError::InvalidDimensions)
        ));
        assert!(matches!(
            WaveGrid::new(usize::MAX, 2, d),
            Err(SpectrumError::InvalidDimensions)
        ));
        assert!(matches!(
            WaveGrid::new(4, 4, Vector2::new(0.0, 1.0)),
            Err(SpectrumError::InvalidConfiguration(_))
        ));
        assert!(WaveGrid::new(4, 4, Vector2::new(f64::NAN, 1.0)).is_err());
    }
}
