#![deny(unsafe_code)]
//! Core types for the BeamSeas ocean synthesizer.
//!
//! Provides `Vector2`/`Vector3`, the `Xorshift64` PRNG, Gaussian samplers
//! (Box-Muller and engine-normal), the `Spectrum` trait with the Phillips and
//! classic Phillips models, wave-vector grids, and `SpectrumAssembler`, which
//! turns an `OceanConfig` into the initial frequency-domain `SpectrumField`.

pub mod assembler;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod field;
pub mod gaussian;
pub mod params;
pub mod prng;
pub mod spectrum;
pub mod vector;
pub mod wave_vector;

pub use assembler::{initial_amplitude, SpectrumAssembler};
pub use config::OceanConfig;
pub use error::SpectrumError;
pub use field::{ComplexAmplitude, GpuComplex, SpectrumField};
pub use gaussian::{
    BoxMuller, EngineNormal, GaussianKind, GaussianSampler, GaussianSource, NormalDistribution,
    UniformSource,
};
pub use prng::Xorshift64;
pub use spectrum::{
    phillips, ClassicPhillips, ClassicSettings, PhillipsSpectrum, Spectrum, SpectrumKind,
    SpectrumModel, SpectrumParameters,
};
pub use vector::{Vector2, Vector3};
pub use wave_vector::WaveGrid;
