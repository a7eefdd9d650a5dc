//! Builds the initial frequency-domain field `h0(k)` for a configured grid.
//!
//! Each cell combines one Gaussian pair `(ξr, ξi)` with the spectral density
//! `P(k)` at its wave vector:
//!
//! ```text
//! h0(k) = (ξr + i·ξi) · sqrt(P(k)) / √2
//! ```
//!
//! The `1/√2` splits the expected energy `P(k)` evenly between the real and
//! imaginary parts, the usual convention for seeding a Tessendorf-style
//! inverse transform.

use crate::config::OceanConfig;
use crate::error::SpectrumError;
use crate::field::{ComplexAmplitude, SpectrumField};
use crate::gaussian::{GaussianSampler, GaussianSource};
use crate::prng::Xorshift64;
use crate::spectrum::{Spectrum, SpectrumModel};
use crate::wave_vector::WaveGrid;
use std::f64::consts::FRAC_1_SQRT_2;

/// Worker index used to derive the normal-map engine from the base seed.
const NORMAL_MAP_STREAM: u64 = 1;

/// `h0` for one cell from a Gaussian pair and a spectral density.
pub fn initial_amplitude(xi: (f64, f64), density: f64) -> ComplexAmplitude {
    let scale = density.sqrt() * FRAC_1_SQRT_2;
    ComplexAmplitude::new(xi.0 * scale, xi.1 * scale)
}

/// Assembles spectrum fields for one [`OceanConfig`].
///
/// Holds only the validated configuration and derived model; the random
/// state is created per call, so every [`assemble`](Self::assemble) with the
/// same config returns the same field.
#[derive(Debug, Clone)]
pub struct SpectrumAssembler {
    config: OceanConfig,
    grid: WaveGrid,
    model: SpectrumModel,
}

impl SpectrumAssembler {
    /// Validates `config` and prepares the wave grid and spectrum model.
    pub fn new(config: OceanConfig) -> Result<Self, SpectrumError> {
        config.validate()?;
        let grid = config.wave_grid()?;
        let model = config.spectrum_model()?;
        Ok(Self {
            config,
            grid,
            model,
        })
    }

    pub fn config(&self) -> &OceanConfig {
        &self.config
    }

    pub fn grid(&self) -> &WaveGrid {
        &self.grid
    }

    pub fn model(&self) -> &SpectrumModel {
        &self.model
    }

    /// Fresh random state seeded from the config.
    pub fn sampler(&self) -> GaussianSampler {
        GaussianSampler::new(self.config.gaussian, self.config.seed)
    }

    /// Builds the field with a sampler seeded from `config.seed`.
    pub fn assemble(&self) -> Result<SpectrumField, SpectrumError> {
        let mut sampler = self.sampler();
        self.assemble_with(&mut sampler)
    }

    /// Builds the field drawing from a caller-owned sampler.
    ///
    /// Cells are visited row-major and each consumes exactly one pair, so a
    /// sampler in the same state always produces the same field.
    pub fn assemble_with(
        &self,
        sampler: &mut dyn GaussianSource,
    ) -> Result<SpectrumField, SpectrumError> {
        let _span = tracing::debug_span!(
            "assemble",
            width = self.grid.width(),
            height = self.grid.height(),
            spectrum = self.model.name(),
        )
        .entered();

        let mut data = Vec::with_capacity(self.grid.len());
        for (_, _, k) in self.grid.iter() {
            let xi = sampler.sample_pair()?;
            let density = self.model.density(k)?;
            data.push(initial_amplitude(xi, density));
        }
        let field = SpectrumField::from_data(self.grid.width(), self.grid.height(), data)?;

        tracing::debug!(
            seed = self.config.seed,
            gaussian = self.config.gaussian.name(),
            energy = field.total_energy(),
            "assembled spectrum field"
        );
        Ok(field)
    }

    /// Builds the normal-map field, or `None` when no frequency modifier is
    /// configured.
    ///
    /// Uses its own engine derived from the seed so the two fields are
    /// independent yet both reproducible.
    pub fn assemble_normal_map(&self) -> Result<Option<SpectrumField>, SpectrumError> {
        let Some(config) = self.config.normal_map() else {
            return Ok(None);
        };
        let rng = Xorshift64::for_worker(config.seed, NORMAL_MAP_STREAM);
        let mut sampler = GaussianSampler::with_engine(config.gaussian, rng);
        SpectrumAssembler::new(config)?
            .assemble_with(&mut sampler)
            .map(Some)
    }
}
