//! Spatial-domain height field and its surface normals.

use beamseas_core::error::SpectrumError;
use beamseas_core::vector::{Vector2, Vector3};

/// Row-major grid of surface heights (index `z * width + x`).
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl HeightField {
    /// Flat field at height zero.
    pub fn new(width: usize, height: usize) -> Result<Self, SpectrumError> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0.0; len],
        })
    }

    pub fn from_data(width: usize, height: usize, data: Vec<f64>) -> Result<Self, SpectrumError> {
        let expected = checked_len(width, height)?;
        if data.len() != expected {
            return Err(SpectrumError::DimensionMismatch {
                lhs_w: width,
                lhs_h: height,
                rhs_w: data.len(),
                rhs_h: 1,
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Height at `(x, z)`, wrapping toroidally.
    pub fn get(&self, x: isize, z: isize) -> f64 {
        let xi = x.rem_euclid(self.width as isize) as usize;
        let zi = z.rem_euclid(self.height as isize) as usize;
        self.data[zi * self.width + xi]
    }

    /// Lowest and highest height.
    pub fn min_max(&self) -> (f64, f64) {
        self.data
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &h| {
                (lo.min(h), hi.max(h))
            })
    }

    /// Unit normal per cell from toroidal central differences, `y` up.
    ///
    /// `domain` is the physical patch size, so the slope accounts for the
    /// cell spacing `domain / (width, height)`.
    pub fn normals(&self, domain: Vector2) -> Result<Vec<Vector3>, SpectrumError> {
        if !domain.is_finite() || domain.x <= 0.0 || domain.y <= 0.0 {
            return Err(SpectrumError::InvalidConfiguration(format!(
                "domain size must be positive, got ({}, {})",
                domain.x, domain.y
            )));
        }
        let dx = domain.x / self.width as f64;
        let dz = domain.y / self.height as f64;

        let mut normals = Vec::with_capacity(self.data.len());
        for z in 0..self.height as isize {
            for x in 0..self.width as isize {
                let along_x = Vector3::new(2.0 * dx, self.get(x + 1, z) - self.get(x - 1, z), 0.0);
                let along_z = Vector3::new(0.0, self.get(x, z + 1) - self.get(x, z - 1), 2.0 * dz);
                normals.push(along_z.cross(along_x).unit()?);
            }
        }
        Ok(normals)
    }
}

fn checked_len(width: usize, height: usize) -> Result<usize, SpectrumError> {
    if width == 0 || height == 0 {
        return Err(SpectrumError::InvalidDimensions);
    }
    width
        .checked_mul(height)
        .ok_or(SpectrumError::InvalidDimensions)
}
