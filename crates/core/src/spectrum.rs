//! Ocean spectral-density models.
//!
//! A [`Spectrum`] maps a wave vector to the expected wave energy at that
//! frequency. Evaluation is a pure function of the wave vector and the
//! validated parameters captured at construction, so results can be cached
//! by key.
//!
//! Two models are available:
//!
//! - [`PhillipsSpectrum`] (`"phillips"`):
//!   `A · exp(-1/(k²L²)) / k⁴ · (k̂·ŵ)² · exp(-k²L²d²)` with `L = |w|²/g` and a
//!   fixed small-wave damping `d = 0.001`.
//! - [`ClassicPhillips`] (`"classic"`): the same shape with a tunable wind
//!   alignment exponent and an absolute minimum-wave-size cutoff instead of
//!   the damping ratio.

use crate::error::SpectrumError;
use crate::vector::Vector2;
use crate::wave_vector::WaveGrid;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Gravitational acceleration in m/s².
pub const GRAVITY: f64 = 9.81;

/// Wave vectors shorter than this carry zero energy. Below it `1/k⁴`
/// overflows and `exp(-1/(k²L²))` underflows, and the product is meaningless.
pub const DEGENERATE_EPSILON: f64 = 1e-12;

/// Ratio of the suppressed small-wave length to `L` in [`phillips`].
pub const SMALL_WAVE_DAMPING: f64 = 0.001;

/// Default alignment exponent for [`ClassicPhillips`]; squares `k̂·ŵ` once.
pub const DEFAULT_WIND_ALIGNMENT_EXPONENT: f64 = 1.0;

/// Default minimum wave size (metres) for [`ClassicPhillips`].
pub const DEFAULT_MIN_WAVE_SIZE: f64 = 0.02;

/// Physical inputs shared by every spectrum model.
///
/// Amplitude and wind have no defaults. The reference values used throughout
/// the tests (`A = 0.0005`, `w = (0, 32)`) are examples, not canon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectrumParameters {
    pub gravity: f64,
    pub amplitude: f64,
    pub wind: Vector2,
    pub epsilon: f64,
}

impl SpectrumParameters {
    /// Parameters with standard gravity and the default degenerate threshold.
    pub fn new(amplitude: f64, wind: Vector2) -> Result<Self, SpectrumError> {
        Self::with_gravity(GRAVITY, amplitude, wind)
    }

    pub fn with_gravity(gravity: f64, amplitude: f64, wind: Vector2) -> Result<Self, SpectrumError> {
        let params = Self {
            gravity,
            amplitude,
            wind,
            epsilon: DEGENERATE_EPSILON,
        };
        params.validate()?;
        Ok(params)
    }

    /// Rejects parameters that would make the formula produce NaN or Inf.
    pub fn validate(&self) -> Result<(), SpectrumError> {
        if !self.gravity.is_finite() || self.gravity <= 0.0 {
            return Err(SpectrumError::InvalidConfiguration(format!(
                "gravity must be positive, got {}",
                self.gravity
            )));
        }
        if !self.amplitude.is_finite() || self.amplitude < 0.0 {
            return Err(SpectrumError::InvalidConfiguration(format!(
                "amplitude must be non-negative, got {}",
                self.amplitude
            )));
        }
        let wind_length = self.wind.length();
        if !self.wind.is_finite() || wind_length == 0.0 || !wind_length.is_finite() {
            return Err(SpectrumError::InvalidConfiguration(format!(
                "wind must be a non-zero vector, got ({}, {})",
                self.wind.x, self.wind.y
            )));
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(SpectrumError::InvalidConfiguration(format!(
                "degenerate threshold must be positive, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }

    /// Largest wave arising from a continuous wind of this speed, `|w|² / g`.
    pub fn largest_wave(&self) -> f64 {
        self.wind.length_squared() / self.gravity
    }
}

/// Phillips spectrum at one wave vector.
///
/// Returns exactly `0.0` when `|k| < 1e-12`, when `|k|²` overflows (the
/// formula has underflowed long before), and also (legitimately) when `k` is
/// perpendicular to the wind. Fails with `InvalidConfiguration` for
/// non-positive gravity, negative amplitude, or a zero or overflowing wind.
pub fn phillips(
    k: Vector2,
    gravity: f64,
    amplitude: f64,
    wind: Vector2,
) -> Result<f64, SpectrumError> {
    let params = SpectrumParameters::with_gravity(gravity, amplitude, wind)?;
    phillips_density(k, &params)
}

fn phillips_density(k: Vector2, params: &SpectrumParameters) -> Result<f64, SpectrumError> {
    if k.length() < params.epsilon {
        return Ok(0.0);
    }
    let k2 = k.length_squared();
    if !k2.is_finite() {
        return Ok(0.0);
    }
    let k4 = k2 * k2;

    let k_dot_w = k.unit()?.dot(params.wind.unit()?);
    let k_dot_w2 = k_dot_w * k_dot_w;

    let l = params.largest_wave();
    let l2 = l * l;
    let small = l2 * SMALL_WAVE_DAMPING * SMALL_WAVE_DAMPING;

    Ok(params.amplitude * (-1.0 / (k2 * l2)).exp() / k4 * k_dot_w2 * (-k2 * small).exp())
}

/// Tunables specific to [`ClassicPhillips`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassicSettings {
    /// Power applied to `(k̂·ŵ)²`. Larger values narrow the spread around the wind.
    pub wind_alignment_exponent: f64,
    /// Waves shorter than roughly this length (metres) are suppressed.
    pub min_wave_size: f64,
}

impl Default for ClassicSettings {
    fn default() -> Self {
        Self {
            wind_alignment_exponent: DEFAULT_WIND_ALIGNMENT_EXPONENT,
            min_wave_size: DEFAULT_MIN_WAVE_SIZE,
        }
    }
}

impl ClassicSettings {
    pub fn validate(&self) -> Result<(), SpectrumError> {
        if !self.wind_alignment_exponent.is_finite() || self.wind_alignment_exponent < 0.0 {
            return Err(SpectrumError::InvalidConfiguration(format!(
                "wind alignment exponent must be non-negative, got {}",
                self.wind_alignment_exponent
            )));
        }
        if !self.min_wave_size.is_finite() || self.min_wave_size < 0.0 {
            return Err(SpectrumError::InvalidConfiguration(format!(
                "minimum wave size must be non-negative, got {}",
                self.min_wave_size
            )));
        }
        Ok(())
    }
}

/// Object-safe spectral density model.
pub trait Spectrum {
    /// Expected energy at wave vector `k`. Never negative.
    fn density(&self, k: Vector2) -> Result<f64, SpectrumError>;

    /// Model name as accepted by [`SpectrumKind::from_name`].
    fn name(&self) -> &'static str;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;
}

/// Phillips spectrum with the fixed damping ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhillipsSpectrum {
    params: SpectrumParameters,
}

impl PhillipsSpectrum {
    pub fn new(params: SpectrumParameters) -> Result<Self, SpectrumError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn parameters(&self) -> &SpectrumParameters {
        &self.params
    }
}

impl Spectrum for PhillipsSpectrum {
    fn density(&self, k: Vector2) -> Result<f64, SpectrumError> {
        phillips_density(k, &self.params)
    }

    fn name(&self) -> &'static str {
        SPECTRUM_NAMES[0]
    }

    fn params(&self) -> Value {
        json!({
            "gravity": self.params.gravity,
            "amplitude": self.params.amplitude,
            "wind": [self.params.wind.x, self.params.wind.y],
            "epsilon": self.params.epsilon,
            "damping": SMALL_WAVE_DAMPING,
        })
    }
}

/// Phillips spectrum with a wind alignment exponent and an absolute
/// small-wave cutoff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassicPhillips {
    params: SpectrumParameters,
    settings: ClassicSettings,
}

impl ClassicPhillips {
    pub fn new(params: SpectrumParameters, settings: ClassicSettings) -> Result<Self, SpectrumError> {
        params.validate()?;
        settings.validate()?;
        Ok(Self { params, settings })
    }

    pub fn settings(&self) -> &ClassicSettings {
        &self.settings
    }

    /// Density at grid cell `(x, z)`; the wave vector is derived from the
    /// grid's domain size and resolution.
    pub fn at_index(&self, grid: &WaveGrid, x: usize, z: usize) -> Result<f64, SpectrumError> {
        self.density(grid.wave_vector(x, z))
    }
}

impl Spectrum for ClassicPhillips {
    fn density(&self, k: Vector2) -> Result<f64, SpectrumError> {
        let k_len = k.length();
        if k_len < self.params.epsilon || !(k_len * k_len).is_finite() {
            return Ok(0.0);
        }
        let k_l = k_len * self.params.largest_wave();
        let kw = k.unit()?.dot(self.params.wind.unit()?);
        let cutoff = self.settings.min_wave_size;

        Ok(self.params.amplitude
            * (kw * kw).powf(self.settings.wind_alignment_exponent)
            * (-k_len * k_len * cutoff * cutoff).exp()
            * (-1.0 / (k_l * k_l)).exp()
            * k_len.powi(-4))
    }

    fn name(&self) -> &'static str {
        SPECTRUM_NAMES[1]
    }

    fn params(&self) -> Value {
        json!({
            "gravity": self.params.gravity,
            "amplitude": self.params.amplitude,
            "wind": [self.params.wind.x, self.params.wind.y],
            "epsilon": self.params.epsilon,
            "wind_alignment_exponent": self.settings.wind_alignment_exponent,
            "min_wave_size": self.settings.min_wave_size,
        })
    }
}

/// All spectrum model names.
const SPECTRUM_NAMES: &[&str] = &["phillips", "classic"];

/// Configurable choice of spectrum model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpectrumKind {
    #[default]
    Phillips,
    Classic,
}

impl SpectrumKind {
    /// Returns `SpectrumError::UnknownVariant` if the name is not recognised.
    pub fn from_name(name: &str) -> Result<Self, SpectrumError> {
        match name {
            "phillips" => Ok(Self::Phillips),
            "classic" => Ok(Self::Classic),
            _ => Err(SpectrumError::UnknownVariant(name.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Phillips => SPECTRUM_NAMES[0],
            Self::Classic => SPECTRUM_NAMES[1],
        }
    }

    pub fn list_names() -> &'static [&'static str] {
        SPECTRUM_NAMES
    }
}

/// A constructed spectrum model. Delegates [`Spectrum`] to the variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpectrumModel {
    Phillips(PhillipsSpectrum),
    Classic(ClassicPhillips),
}

impl SpectrumModel {
    pub fn new(
        kind: SpectrumKind,
        params: SpectrumParameters,
        classic: ClassicSettings,
    ) -> Result<Self, SpectrumError> {
        match kind {
            SpectrumKind::Phillips => Ok(Self::Phillips(PhillipsSpectrum::new(params)?)),
            SpectrumKind::Classic => Ok(Self::Classic(ClassicPhillips::new(params, classic)?)),
        }
    }

    pub fn kind(&self) -> SpectrumKind {
        match self {
            Self::Phillips(_) => SpectrumKind::Phillips,
            Self::Classic(_) => SpectrumKind::Classic,
        }
    }
}

impl Spectrum for SpectrumModel {
    fn density(&self, k: Vector2) -> Result<f64, SpectrumError> {
        match self {
            Self::Phillips(s) => s.density(k),
            Self::Classic(s) => s.density(k),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Phillips(s) => s.name(),
            Self::Classic(s) => s.name(),
        }
    }

    fn params(&self) -> Value {
        match self {
            Self::Phillips(s) => s.params(),
            Self::Classic(s) => s.params(),
        }
    }
}
