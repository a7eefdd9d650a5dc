//! Error types for the BeamSeas core.

use thiserror::Error;

/// Errors produced by spectrum synthesis.
///
/// Apart from `Io`, every error comes from a pure computation and leaves no
/// partial output behind.
#[derive(Debug, Error)]
pub enum SpectrumError {
    /// A zero-length (or non-finite) vector was normalised.
    #[error("degenerate input: cannot normalise a vector of length {length}")]
    DegenerateInput { length: f64 },

    /// A physical or grid parameter is outside its valid domain
    /// (non-positive gravity, zero wind, negative amplitude, ...).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Grid resolution was zero or `width * height` overflowed.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// Two grids had incompatible dimensions.
    #[error("dimension mismatch: ({lhs_w}, {lhs_h}) vs ({rhs_w}, {rhs_h})")]
    DimensionMismatch {
        lhs_w: usize,
        lhs_h: usize,
        rhs_w: usize,
        rhs_h: usize,
    },

    /// The Box-Muller rejection loop exhausted its draw budget. Only a
    /// broken uniform source gets here.
    #[error("gaussian sampler stalled after {attempts} rejected draws")]
    SamplerStalled { attempts: usize },

    /// A required configuration key was missing.
    #[error("parameter not found: {0}")]
    ParamNotFound(String),

    /// A configuration key existed but had the wrong JSON type.
    #[error("parameter type mismatch for '{name}': expected {expected}, got {got}")]
    ParamTypeMismatch {
        name: String,
        expected: String,
        got: String,
    },

    /// A spectrum model or Gaussian strategy name was not recognised.
    #[error("unknown variant: {0}")]
    UnknownVariant(String),

    /// Writing an output artifact failed.
    #[error("i/o error: {0}")]
    Io(String),
}
