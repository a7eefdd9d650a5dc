//! Standard-normal variate generation.
//!
//! Two strategies produce the Gaussian pairs that drive the spectrum:
//!
//! - [`EngineNormal`]: a [`NormalDistribution`] driven by the seeded engine
//!   through `rand_distr`, one variate per call.
//! - [`BoxMuller`]: the polar Box-Muller transform with rejection, yielding two
//!   independent variates per accepted draw.
//!
//! Both implement [`GaussianSource`]; [`GaussianSampler`] wraps them behind a
//! [`GaussianKind`] so the strategy is a configuration choice.
//!
//! # Liveness
//!
//! Box-Muller accepts a uniform draw in the square with probability π/4, so
//! its rejection loop terminates almost surely but not in a bounded number of
//! steps. A broken input source (constant, or never landing inside the unit
//! disk) would spin forever; the loop therefore gives up after
//! [`MAX_REJECTIONS`] draws and reports [`SpectrumError::SamplerStalled`].
//! With a healthy source the chance of reaching that bound is below 10^-600.
//!
//! # Threading
//!
//! Samplers own their engine and mutate it on every draw. Do not share one
//! between threads without a lock; give each worker its own sampler seeded
//! from [`Xorshift64::for_worker`].

use crate::error::SpectrumError;
use crate::prng::Xorshift64;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Upper bound on Box-Muller draws before the sampler reports a stall.
pub const MAX_REJECTIONS: usize = 1024;

/// A normal distribution parameterised by mean and standard deviation.
///
/// Sampling goes through `rand_distr`'s [`StandardNormal`], shifted and
/// scaled, so any [`Rng`] (including [`Xorshift64`]) can drive it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalDistribution {
    mean: f64,
    std_dev: f64,
}

impl Default for NormalDistribution {
    fn default() -> Self {
        Self::standard()
    }
}

impl NormalDistribution {
    /// Returns `InvalidConfiguration` unless `std_dev` is positive and both
    /// parameters are finite.
    pub fn new(mean: f64, std_dev: f64) -> Result<Self, SpectrumError> {
        if !mean.is_finite() || !std_dev.is_finite() || std_dev <= 0.0 {
            return Err(SpectrumError::InvalidConfiguration(format!(
                "normal distribution needs finite mean and positive std_dev, got ({mean}, {std_dev})"
            )));
        }
        Ok(Self { mean, std_dev })
    }

    /// N(0, 1).
    pub const fn standard() -> Self {
        Self {
            mean: 0.0,
            std_dev: 1.0,
        }
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    pub fn variance(&self) -> f64 {
        self.std_dev * self.std_dev
    }

    pub fn pdf(&self, x: f64) -> f64 {
        let z = (x - self.mean) / self.std_dev;
        (-0.5 * z * z).exp() / (self.std_dev * (2.0 * PI).sqrt())
    }
}

impl Distribution<f64> for NormalDistribution {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let z: f64 = StandardNormal.sample(rng);
        self.mean + self.std_dev * z
    }
}

/// Polar Box-Muller on an arbitrary input source.
///
/// `draw` is called in pairs `(x1, x2)` until `0 < x1² + x2² < 1`, then both
/// outputs `(x1·s, x2·s)` with `s = sqrt(-2 ln w / w)` are returned. For
/// standard-normal output `draw` must be uniform on [-1, 1].
pub fn box_muller_from<F>(mut draw: F) -> Result<(f64, f64), SpectrumError>
where
    F: FnMut() -> f64,
{
    for attempt in 0..MAX_REJECTIONS {
        let x1 = draw();
        let x2 = draw();
        let w = x1 * x1 + x2 * x2;
        if w > 0.0 && w < 1.0 {
            if attempt > 8 {
                tracing::trace!(attempt, "box-muller accepted after long rejection run");
            }
            let s = (-2.0 * w.ln() / w).sqrt();
            return Ok((x1 * s, x2 * s));
        }
    }
    tracing::warn!(
        attempts = MAX_REJECTIONS,
        "box-muller input never landed inside the unit disk"
    );
    Err(SpectrumError::SamplerStalled {
        attempts: MAX_REJECTIONS,
    })
}

/// Where [`BoxMuller`] takes its `x1`, `x2` inputs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UniformSource {
    /// Engine uniform scaled to [-1, 1). Yields exact N(0, 1) pairs.
    Uniform,
    /// Standard-normal draws reused as inputs. Kept for compatibility with
    /// fields generated that way; the output is Gaussian-shaped but its
    /// variance is below 1.
    Normal,
}

/// A strategy that yields pairs of Gaussian variates.
pub trait GaussianSource {
    /// One pair of variates. Both values are used by the caller.
    fn sample_pair(&mut self) -> Result<(f64, f64), SpectrumError>;

    /// A single variate; the default discards the second half of a pair.
    fn sample(&mut self) -> Result<f64, SpectrumError> {
        self.sample_pair().map(|(a, _)| a)
    }
}

/// Engine-backed normal sampler: a seeded engine plus a normal distribution.
#[derive(Debug, Clone)]
pub struct EngineNormal {
    rng: Xorshift64,
    distribution: NormalDistribution,
}

impl EngineNormal {
    /// Standard-normal sampler seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self::with_distribution(Xorshift64::new(seed), NormalDistribution::standard())
    }

    pub fn with_distribution(rng: Xorshift64, distribution: NormalDistribution) -> Self {
        Self { rng, distribution }
    }

    /// One sample from the distribution.
    pub fn generate_normal_random(&mut self) -> f64 {
        self.distribution.sample(&mut self.rng)
    }

    pub fn distribution(&self) -> &NormalDistribution {
        &self.distribution
    }
}

impl GaussianSource for EngineNormal {
    fn sample_pair(&mut self) -> Result<(f64, f64), SpectrumError> {
        let a = self.generate_normal_random();
        let b = self.generate_normal_random();
        Ok((a, b))
    }

    fn sample(&mut self) -> Result<f64, SpectrumError> {
        Ok(self.generate_normal_random())
    }
}

/// Polar Box-Muller sampler over a seeded engine.
#[derive(Debug, Clone)]
pub struct BoxMuller {
    rng: Xorshift64,
    source: UniformSource,
}

impl BoxMuller {
    pub fn new(seed: u64, source: UniformSource) -> Self {
        Self::with_engine(Xorshift64::new(seed), source)
    }

    pub fn with_engine(rng: Xorshift64, source: UniformSource) -> Self {
        Self { rng, source }
    }

    pub fn source(&self) -> UniformSource {
        self.source
    }
}

impl GaussianSource for BoxMuller {
    fn sample_pair(&mut self) -> Result<(f64, f64), SpectrumError> {
        let rng = &mut self.rng;
        match self.source {
            UniformSource::Uniform => box_muller_from(|| rng.next_signed()),
            UniformSource::Normal => box_muller_from(|| rng.sample(StandardNormal)),
        }
    }
}

/// Names of all Gaussian strategies, in [`GaussianKind`] order.
const GAUSSIAN_NAMES: &[&str] = &["box-muller", "box-muller-normal", "engine-normal"];

/// Selectable Gaussian generation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GaussianKind {
    /// Polar Box-Muller on uniform [-1, 1) inputs.
    #[default]
    BoxMuller,
    /// Polar Box-Muller on engine-normal inputs.
    BoxMullerNormal,
    /// Engine-driven normal distribution, one sample per variate.
    EngineNormal,
}

impl GaussianKind {
    /// Parses a strategy name. Returns `SpectrumError::UnknownVariant` otherwise.
    pub fn from_name(name: &str) -> Result<Self, SpectrumError> {
        match name {
            "box-muller" => Ok(Self::BoxMuller),
            "box-muller-normal" => Ok(Self::BoxMullerNormal),
            "engine-normal" => Ok(Self::EngineNormal),
            _ => Err(SpectrumError::UnknownVariant(name.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::BoxMuller => GAUSSIAN_NAMES[0],
            Self::BoxMullerNormal => GAUSSIAN_NAMES[1],
            Self::EngineNormal => GAUSSIAN_NAMES[2],
        }
    }

    pub fn list_names() -> &'static [&'static str] {
        GAUSSIAN_NAMES
    }
}

/// Random state for one generation pass: an owned engine and the selected
/// strategy.
#[derive(Debug, Clone)]
pub enum GaussianSampler {
    BoxMuller(BoxMuller),
    EngineNormal(EngineNormal),
}

impl GaussianSampler {
    pub fn new(kind: GaussianKind, seed: u64) -> Self {
        Self::with_engine(kind, Xorshift64::new(seed))
    }

    pub fn with_engine(kind: GaussianKind, rng: Xorshift64) -> Self {
        match kind {
            GaussianKind::BoxMuller => {
                Self::BoxMuller(BoxMuller::with_engine(rng, UniformSource::Uniform))
            }
            GaussianKind::BoxMullerNormal => {
                Self::BoxMuller(BoxMuller::with_engine(rng, UniformSource::Normal))
            }
            GaussianKind::EngineNormal => Self::EngineNormal(EngineNormal::with_distribution(
                rng,
                NormalDistribution::standard(),
            )),
        }
    }

    pub fn kind(&self) -> GaussianKind {
        match self {
            Self::BoxMuller(b) => match b.source() {
                UniformSource::Uniform => GaussianKind::BoxMuller,
                UniformSource::Normal => GaussianKind::BoxMullerNormal,
            },
            Self::EngineNormal(_) => GaussianKind::EngineNormal,
        }
    }
}

impl GaussianSource for GaussianSampler {
    fn sample_pair(&mut self) -> Result<(f64, f64), SpectrumError> {
        match self {
            Self::BoxMuller(s) => s.sample_pair(),
            Self::EngineNormal(s) => s.sample_pair(),
        }
    }

    fn sample(&mut self) -> Result<f64, SpectrumError> {
        match self {
            Self::BoxMuller(s) => s.sample(),
            Self::EngineNormal(s) => s.sample(),
        }
    }
}
