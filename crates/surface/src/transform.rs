//! 2D inverse FFT from the frequency domain to a height field.

use crate::height::HeightField;
use beamseas_core::error::SpectrumError;
use beamseas_core::field::{ComplexAmplitude, SpectrumField};
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Inverse transforms `field` (rows, then columns) and keeps the real part,
/// normalised by `1 / (width·height)`.
///
/// A Hermitian input gives a real output; any imaginary residue is dropped.
pub fn inverse_fft(field: &SpectrumField) -> Result<HeightField, SpectrumError> {
    let complex = inverse_fft_complex(field);
    let heights = complex.iter().map(|c| c.re).collect();
    HeightField::from_data(field.width(), field.height(), heights)
}

/// Full complex inverse transform, row-major, normalised.
pub fn inverse_fft_complex(field: &SpectrumField) -> Vec<ComplexAmplitude> {
    let (width, height) = (field.width(), field.height());
    let _span = tracing::debug_span!("inverse_fft", width, height).entered();

    let mut planner = FftPlanner::<f64>::new();
    let mut buf: Vec<Complex<f64>> = field.data().iter().copied().map(Complex::from).collect();

    // Rows are contiguous; rustfft processes each `width` chunk in turn.
    planner.plan_fft_inverse(width).process(&mut buf);

    let column_fft = planner.plan_fft_inverse(height);
    let mut column = vec![Complex::new(0.0, 0.0); height];
    for x in 0..width {
        for (z, slot) in column.iter_mut().enumerate() {
            *slot = buf[z * width + x];
        }
        column_fft.process(&mut column);
        for (z, value) in column.iter().enumerate() {
            buf[z * width + x] = *value;
        }
    }

    let scale = 1.0 / (width * height) as f64;
    buf.into_iter()
        .map(|c| ComplexAmplitude::from(c * scale))
        .collect()
}
