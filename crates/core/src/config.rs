//! Reproducible description of one ocean spectrum.
//!
//! An [`OceanConfig`] captures everything needed to regenerate a field bit for
//! bit: grid resolution, patch size, physical inputs, PRNG seed, and the
//! chosen spectrum and Gaussian strategies.

use crate::error::SpectrumError;
use crate::gaussian::GaussianKind;
use crate::params::{param_f64, param_string, param_u64, param_usize, require_f64, require_vec2};
use crate::spectrum::{
    ClassicSettings, SpectrumKind, SpectrumModel, SpectrumParameters, DEFAULT_MIN_WAVE_SIZE,
    DEFAULT_WIND_ALIGNMENT_EXPONENT, GRAVITY,
};
use crate::vector::Vector2;
use crate::wave_vector::WaveGrid;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_RESOLUTION: usize = 256;
pub const DEFAULT_DOMAIN_SIZE: f64 = 1000.0;
pub const DEFAULT_SEED: u64 = 42;

fn default_gravity() -> f64 {
    GRAVITY
}

/// Configuration for one spectrum generation pass.
///
/// `amplitude` and `wind` are required; the remaining fields default to a
/// 256×256 grid over a 1 km patch, seed 42, the Phillips model and uniform
/// Box-Muller sampling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OceanConfig {
    pub width: usize,
    pub height: usize,
    /// Physical patch size in metres along x and z.
    pub domain_size: Vector2,
    pub amplitude: f64,
    /// Wind direction scaled by speed (m/s).
    pub wind: Vector2,
    pub seed: u64,
    #[serde(default = "default_gravity")]
    pub gravity: f64,
    #[serde(default)]
    pub spectrum: SpectrumKind,
    #[serde(default)]
    pub gaussian: GaussianKind,
    #[serde(default)]
    pub classic: ClassicSettings,
    /// When set, a second normal-map spectrum is generated over
    /// `domain_size / normal_map_freq_mod`.
    #[serde(default)]
    pub normal_map_freq_mod: Option<Vector2>,
}

impl OceanConfig {
    /// Square-domain config with defaults for everything but the physical inputs.
    pub fn new(width: usize, height: usize, amplitude: f64, wind: Vector2) -> Self {
        Self {
            width,
            height,
            domain_size: Vector2::splat(DEFAULT_DOMAIN_SIZE),
            amplitude,
            wind,
            seed: DEFAULT_SEED,
            gravity: GRAVITY,
            spectrum: SpectrumKind::default(),
            gaussian: GaussianKind::default(),
            classic: ClassicSettings::default(),
            normal_map_freq_mod: None,
        }
    }

    /// Builds a config from a JSON object.
    ///
    /// `amplitude` (number) and `wind` (`[x, y]` or `{"x", "y"}`) are required.
    /// Optional keys: `width`, `height`, `domain_size` (number or pair),
    /// `seed`, `gravity`, `spectrum`, `gaussian`, `wind_alignment_exponent`,
    /// `min_wave_size`, `normal_map_freq_mod`.
    pub fn from_json(params: &Value) -> Result<Self, SpectrumError> {
        let amplitude = require_f64(params, "amplitude")?;
        let wind = require_vec2(params, "wind")?;
        let domain_size = match params.get("domain_size") {
            Some(Value::Number(n)) => Vector2::splat(n.as_f64().unwrap_or(DEFAULT_DOMAIN_SIZE)),
            Some(_) => require_vec2(params, "domain_size")?,
            None => Vector2::splat(DEFAULT_DOMAIN_SIZE),
        };
        let normal_map_freq_mod = match params.get("normal_map_freq_mod") {
            None | Some(Value::Null) => None,
            Some(_) => Some(require_vec2(params, "normal_map_freq_mod")?),
        };

        let config = Self {
            width: param_usize(params, "width", DEFAULT_RESOLUTION),
            height: param_usize(params, "height", DEFAULT_RESOLUTION),
            domain_size,
            amplitude,
            wind,
            seed: param_u64(params, "seed", DEFAULT_SEED),
            gravity: param_f64(params, "gravity", GRAVITY),
            spectrum: SpectrumKind::from_name(&param_string(params, "spectrum", "phillips"))?,
            gaussian: GaussianKind::from_name(&param_string(params, "gaussian", "box-muller"))?,
            classic: ClassicSettings {
                wind_alignment_exponent: param_f64(
                    params,
                    "wind_alignment_exponent",
                    DEFAULT_WIND_ALIGNMENT_EXPONENT,
                ),
                min_wave_size: param_f64(params, "min_wave_size", DEFAULT_MIN_WAVE_SIZE),
            },
            normal_map_freq_mod,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks dimensions, domain, physical parameters and strategy settings.
    pub fn validate(&self) -> Result<(), SpectrumError> {
        self.wave_grid()?;
        self.spectrum_model()?;
        if let Some(m) = self.normal_map_freq_mod {
            if !m.is_finite() || m.x <= 0.0 || m.y <= 0.0 {
                return Err(SpectrumError::InvalidConfiguration(format!(
                    "normal map frequency modifier must be positive, got ({}, {})",
                    m.x, m.y
                )));
            }
        }
        Ok(())
    }

    pub fn wave_grid(&self) -> Result<WaveGrid, SpectrumError> {
        WaveGrid::new(self.width, self.height, self.domain_size)
    }

    pub fn spectrum_parameters(&self) -> Result<SpectrumParameters, SpectrumError> {
        SpectrumParameters::with_gravity(self.gravity, self.amplitude, self.wind)
    }

    pub fn spectrum_model(&self) -> Result<SpectrumModel, SpectrumError> {
        SpectrumModel::new(self.spectrum, self.spectrum_parameters()?, self.classic)
    }

    /// Config for the normal-map spectrum, if one is configured.
    ///
    /// The patch shrinks by the frequency modifier. The amplitude sits under
    /// the square root of the energy, so it grows by `mod.x * mod.y` to lift
    /// generated heights by `sqrt(mod.x * mod.y)`.
    pub fn normal_map(&self) -> Option<Self> {
        let m = self.normal_map_freq_mod?;
        Some(Self {
            domain_size: self.domain_size.div_elements(m),
            amplitude: self.amplitude * m.x * m.y,
            normal_map_freq_mod: None,
            ..self.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reference() -> OceanConfig {
        OceanConfig::new(64, 64, 0.0005, Vector2::new(0.0, 32.0))
    }

    #[test]
    fn new_applies_defaults() {
        let c = reference();
        assert_eq!(c.seed, DEFAULT_SEED);
        assert_eq!(c.gravity, GRAVITY);
        assert_eq!(c.domain_size, Vector2::splat(DEFAULT_DOMAIN_SIZE));
        assert_eq!(c.spectrum, SpectrumKind::Phillips);
        assert_eq!(c.gaussian, GaussianKind::BoxMuller);
        assert!(c.normal_map_freq_mod.is_none());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn from_json_minimal() {
        let c = OceanConfig::from_json(&json!({"amplitude": 0.0005, "wind": [0, 32]})).unwrap();
        assert_eq!(c.width, DEFAULT_RESOLUTION);
        assert_eq!(c.height, DEFAULT_RESOLUTION);
        assert_eq!(c.wind, Vector2::new(0.0, 32.0));
    }

    #[test]
    fn from_json_full() {
        let c = OceanConfig::from_json(&json!({
            "amplitude": 300.0,
            "wind": {"x": 10.0, "y": -5.0},
            "width": 128,
            "height": 32,
            "domain_size": [500.0, 250.0],
            "seed": 7,
            "spectrum": "classic",
            "gaussian": "engine-normal",
            "wind_alignment_exponent": 3.0,
            "min_wave_size": 0.1,
            "normal_map_freq_mod": [7.3, 7.3]
        }))
        .unwrap();
        assert_eq!((c.width, c.height), (128, 32));
        assert_eq!(c.domain_size, Vector2::new(500.0, 250.0));
        assert_eq!(c.spectrum, SpectrumKind::Classic);
        assert_eq!(c.gaussian, GaussianKind::EngineNormal);
        assert_eq!(c.classic.wind_alignment_exponent, 3.0);
        assert_eq!(c.normal_map_freq_mod, Some(Vector2::new(7.3, 7.3)));
    }

    #[test]
    fn from_json_scalar_domain_size() {
        let c = OceanConfig::from_json(&json!({"amplitude": 1, "wind": [1, 0], "domain_size": 64}))
            .unwrap();
        assert_eq!(c.domain_size, Vector2::splat(64.0));
    }

    #[test]
    fn from_json_requires_amplitude_and_wind() {
        assert!(matches!(
            OceanConfig::from_json(&json!({"wind": [0, 32]})),
            Err(SpectrumError::ParamNotFound(_))
        ));
        assert!(matches!(
            OceanConfig::from_json(&json!({"amplitude": 1.0})),
            Err(SpectrumError::ParamNotFound(_))
        ));
    }

    #[test]
    fn from_json_rejects_unknown_strategy() {
        assert!(matches!(
            OceanConfig::from_json(&json!({"amplitude": 1, "wind": [1, 0], "spectrum": "jonswap"})),
            Err(SpectrumError::UnknownVariant(_))
        ));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut c = reference();
        c.width = 0;
        assert!(matches!(c.validate(), Err(SpectrumError::InvalidDimensions)));

        let mut c = reference();
        c.wind = Vector2::ZERO;
        assert!(matches!(
            c.validate(),
            Err(SpectrumError::InvalidConfiguration(_))
        ));

        let mut c = reference();
        c.gravity = 0.0;
        assert!(c.validate().is_err());

        let mut c = reference();
        c.domain_size = Vector2::new(-1.0, 10.0);
        assert!(c.validate().is_err());

        let mut c = reference();
        c.normal_map_freq_mod = Some(Vector2::new(0.0, 1.0));
        assert!(c.validate().is_err());
    }

    #[test]
    fn normal_map_scales_domain_and_amplitude() {
        let mut c = reference();
        assert!(c.normal_map().is_none());
        c.normal_map_freq_mod = Some(Vector2::new(4.0, 9.0));
        let n = c.normal_map().unwrap();
        assert_eq!(n.domain_size, Vector2::new(250.0, 1000.0 / 9.0));
        assert!((n.amplitude - 0.0005 * 36.0).abs() < 1e-15);
        assert!(n.normal_map_freq_mod.is_none());
        assert_eq!(n.seed, c.seed);
    }

    #[test]
    fn json_round_trip() {
        let mut c = reference();
        c.spectrum = SpectrumKind::Classic;
        c.normal_map_freq_mod = Some(Vector2::new(2.0, 2.0));
        let text = serde_json::to_string_pretty(&c).unwrap();
        let restored: OceanConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(c, restored);
    }

    #[test]
    fn serde_defaults_fill_optional_fields() {
        let text = r#"{
            "width": 8, "height": 8,
            "domain_size": {"x": 10.0, "y": 10.0},
            "amplitude": 1.0,
            "wind": {"x": 1.0, "y": 0.0},
            "seed": 3
        }"#;
        let c: OceanConfig = serde_json::from_str(text).unwrap();
        assert_eq!(c.gravity, GRAVITY);
        assert_eq!(c.spectrum, SpectrumKind::Phillips);
        assert_eq!(c.classic, ClassicSettings::default());
    }
}
