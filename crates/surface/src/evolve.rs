//! Time evolution of an initial spectrum under the deep-water dispersion
//! relation `ω(k) = sqrt(g·|k|)`.

use beamseas_core::error::SpectrumError;
use beamseas_core::field::{ComplexAmplitude, SpectrumField};
use beamseas_core::wave_vector::WaveGrid;
use rustfft::num_complex::Complex64;

/// Spectrum at time `time` from the initial field `h0`.
///
/// `h(k, t) = h0(k)·e^{iωt} + conj(h0(-k))·e^{-iωt}`. The result is
/// Hermitian (`h(-k) = conj(h(k))`), so its inverse transform is real.
pub fn evolve(
    h0: &SpectrumField,
    time: f64,
    gravity: f64,
    grid: &WaveGrid,
) -> Result<SpectrumField, SpectrumError> {
    if h0.width() != grid.width() || h0.height() != grid.height() {
        return Err(SpectrumError::DimensionMismatch {
            lhs_w: h0.width(),
            lhs_h: h0.height(),
            rhs_w: grid.width(),
            rhs_h: grid.height(),
        });
    }
    if !time.is_finite() {
        return Err(SpectrumError::InvalidConfiguration(format!(
            "time must be finite, got {time}"
        )));
    }
    if !gravity.is_finite() || gravity <= 0.0 {
        return Err(SpectrumError::InvalidConfiguration(format!(
            "gravity must be positive, got {gravity}"
        )));
    }

    let data = grid
        .iter()
        .map(|(x, z, k)| {
            let omega = (gravity * k.length()).sqrt();
            let (mx, mz) = grid.mirror_index(x, z);
            let phase = Complex64::cis(omega * time);
            let forward = Complex64::from(h0.get(x as isize, z as isize)) * phase;
            let backward = Complex64::from(h0.get(mx as isize, mz as isize)).conj() * phase.conj();
            ComplexAmplitude::from(forward + backward)
        })
        .collect();
    SpectrumField::from_data(grid.width(), grid.height(), data)
}
