//! One-shot entry points for inspecting individual building blocks.
//!
//! These construct fresh state from a seed on every call, which makes them
//! convenient for the CLI `sample` command and for pinning reference values
//! in tests. Bulk generation goes through [`crate::assembler`] instead.

use crate::config::OceanConfig;
use crate::error::SpectrumError;
use crate::gaussian::{EngineNormal, GaussianKind, GaussianSampler, GaussianSource};
use crate::spectrum::Spectrum;

pub use crate::spectrum::phillips;

/// First standard normal drawn by the engine-normal sampler for `seed`.
pub fn sample_normal(seed: u64) -> f64 {
    EngineNormal::new(seed).generate_normal_random()
}

/// First Gaussian pair drawn by the `kind` sampler for `seed`.
pub fn sample_gaussian_pair(seed: u64, kind: GaussianKind) -> Result<(f64, f64), SpectrumError> {
    GaussianSampler::new(kind, seed).sample_pair()
}

/// Spectral density the configured model assigns to grid cell `(x, z)`.
pub fn spectrum_at(config: &OceanConfig, x: usize, z: usize) -> Result<f64, SpectrumError> {
    config.validate()?;
    let grid = config.wave_grid()?;
    if x >= grid.width() || z >= grid.height() {
        return Err(SpectrumError::InvalidConfiguration(format!(
            "cell ({x}, {z}) outside {}x{} grid",
            grid.width(),
            grid.height()
        )));
    }
    config.spectrum_model()?.density(grid.wave_vector(x, z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vector2;

    #[test]
    fn sample_normal_is_deterministic() {
        assert_eq!(sample_normal(42).to_bits(), sample_normal(42).to_bits());
        assert_ne!(sample_normal(42), sample_normal(43));
        assert!(sample_normal(7).is_finite());
    }

    #[test]
    fn sample_gaussian_pair_for_every_kind() {
        for &name in GaussianKind::list_names() {
            let kind = GaussianKind::from_name(name).unwrap();
            let (a, b) = sample_gaussian_pair(9, kind).unwrap();
            assert!(a.is_finite() && b.is_finite(), "{name}");
            assert_eq!((a, b), sample_gaussian_pair(9, kind).unwrap());
        }
    }

    #[test]
    fn phillips_reference_value() {
        let p = phillips(Vector2::new(1.0, 1.0), 9.81, 0.0005, Vector2::new(0.0, 32.0)).unwrap();
        assert!((p - 6.114994290954148e-05).abs() < 1e-15);
    }

    #[test]
    fn spectrum_at_matches_phillips() {
        let config = OceanConfig::new(16, 16, 0.0005, Vector2::new(0.0, 32.0));
        let k = config.wave_grid().unwrap().wave_vector(3, 5);
        let expected = phillips(k, config.gravity, config.amplitude, config.wind).unwrap();
        assert_eq!(spectrum_at(&config, 3, 5).unwrap(), expected);
        assert_eq!(spectrum_at(&config, 0, 0).unwrap(), 0.0);
    }

    #[test]
    fn spectrum_at_rejects_out_of_range_cell() {
        let config = OceanConfig::new(8, 8, 0.0005, Vector2::new(0.0, 32.0));
        assert!(matches!(
            spectrum_at(&config, 8, 0),
            Err(SpectrumError::InvalidConfiguration(_))
        ));
    }
}
