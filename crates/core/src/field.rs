//! Row-major grid of complex Fourier amplitudes.
//!
//! A [`SpectrumField`] stores `width * height` [`ComplexAmplitude`] values,
//! index `z * width + x`. Coordinate access wraps toroidally, which matches
//! the periodicity of the frequency domain (`get(-x, -z)` is the `-k` cell).
//!
//! # GPU layout
//!
//! [`SpectrumField::to_gpu`] exports [`GpuComplex`] values: `#[repr(C)]`
//! pairs of `f32` (real then imaginary), contiguous in row-major order, i.e.
//! interleaved `[re0, im0, re1, im1, ...]`. The inverse-transform stage reads
//! this layout directly; changing it breaks the bit-exact contract.
//!
//! Arithmetic happens on [`Complex64`]; `ComplexAmplitude` converts to and
//! from it losslessly.

use crate::error::SpectrumError;
use bytemuck::{Pod, Zeroable};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// One Fourier-domain sample.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ComplexAmplitude {
    pub re: f64,
    pub im: f64,
}

impl ComplexAmplitude {
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };

    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Squared magnitude, the energy carried by this sample.
    pub fn norm_sqr(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    pub fn is_finite(self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }
}

impl From<Complex64> for ComplexAmplitude {
    fn from(c: Complex64) -> Self {
        Self::new(c.re, c.im)
    }
}

impl From<ComplexAmplitude> for Complex64 {
    fn from(c: ComplexAmplitude) -> Self {
        Complex64::new(c.re, c.im)
    }
}

/// GPU-facing complex sample: two `f32`, real first.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct GpuComplex {
    pub re: f32,
    pub im: f32,
}

impl From<ComplexAmplitude> for GpuComplex {
    fn from(c: ComplexAmplitude) -> Self {
        Self {
            re: c.re as f32,
            im: c.im as f32,
        }
    }
}

/// Dense row-major grid of complex amplitudes.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumField {
    width: usize,
    height: usize,
    data: Vec<ComplexAmplitude>,
}

impl SpectrumField {
    /// Zero-filled field.
    ///
    /// Returns `SpectrumError::InvalidDimensions` if either dimension is zero
    /// or `width * height` overflows.
    pub fn new(width: usize, height: usize) -> Result<Self, SpectrumError> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![ComplexAmplitude::ZERO; len],
        })
    }

    /// Wraps a pre-built row-major vector, checking its length.
    pub fn from_data(
        width: usize,
        height: usize,
        data: Vec<ComplexAmplitude>,
    ) -> Result<Self, SpectrumError> {
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

    pub fn data(&self) -> &[ComplexAmplitude] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [ComplexAmplitude] {
        &mut self.data
    }

    fn index(&self, x: isize, z: isize) -> usize {
        let xi = x.rem_euclid(self.width as isize) as usize;
        let zi = z.rem_euclid(self.height as isize) as usize;
        zi * self.width + xi
    }

    /// Amplitude at `(x, z)` with toroidal wrapping.
    pub fn get(&self, x: isize, z: isize) -> ComplexAmplitude {
        self.data[self.index(x, z)]
    }

    /// Sets the amplitude at `(x, z)` with toroidal wrapping.
    pub fn set(&mut self, x: isize, z: isize, value: ComplexAmplitude) {
        let idx = self.index(x, z);
        self.data[idx] = value;
    }

    /// Sum of squared magnitudes over the grid.
    pub fn total_energy(&self) -> f64 {
        self.data.iter().map(|c| c.norm_sqr()).sum()
    }

    /// Iterates `(x, z, amplitude)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, ComplexAmplitude)> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(|(i, &c)| (i % self.width, i / self.width, c))
    }

    /// Single-precision copy in the GPU layout described in the module docs.
    pub fn to_gpu(&self) -> Vec<GpuComplex> {
        self.data.iter().copied().map(GpuComplex::from).collect()
    }

    /// The GPU copy flattened to interleaved `f32`.
    pub fn to_interleaved_f32(&self) -> Vec<f32> {
        let gpu = self.to_gpu();
        bytemuck::cast_slice::<GpuComplex, f32>(&gpu).to_vec()
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
