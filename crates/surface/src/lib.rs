#![deny(unsafe_code)]
//! Turns an assembled spectrum into something you can look at.
//!
//! `beamseas-core` stops at the initial frequency-domain field `h0(k)`. This
//! crate evolves it in time, inverse transforms it into a [`HeightField`],
//! derives surface normals (optionally from a finer normal-map spectrum) and
//! writes PNG snapshots.

pub mod evolve;
pub mod height;
pub mod pixel;
pub mod transform;

#[cfg(feature = "png")]
pub mod snapshot;

use beamseas_core::error::SpectrumError;
use beamseas_core::vector::Vector3;
use beamseas_core::SpectrumAssembler;

pub use evolve::evolve;
pub use height::HeightField;
pub use transform::inverse_fft;

/// Assemble, evolve to `time` and inverse transform in one call.
pub fn surface_at(assembler: &SpectrumAssembler, time: f64) -> Result<HeightField, SpectrumError> {
    let h0 = assembler.assemble()?;
    let h = evolve(&h0, time, assembler.config().gravity, assembler.grid())?;
    inverse_fft(&h)
}

/// Surface normals at `time`.
///
/// With a normal-map frequency modifier configured, the normals come from
/// the finer normal-map spectrum over its shrunken patch. Otherwise they are
/// derived from `heights`, the main surface at the same time.
pub fn surface_normals(
    assembler: &SpectrumAssembler,
    time: f64,
    heights: &HeightField,
) -> Result<Vec<Vector3>, SpectrumError> {
    let (Some(config), Some(h0)) = (
        assembler.config().normal_map(),
        assembler.assemble_normal_map()?,
    ) else {
        return heights.normals(assembler.config().domain_size);
    };
    let grid = config.wave_grid()?;
    let detail = inverse_fft(&evolve(&h0, time, config.gravity, &grid)?)?;
    tracing::debug!(
        domain_x = config.domain_size.x,
        domain_z = config.domain_size.y,
        "normals from normal-map spectrum"
    );
    detail.normals(config.domain_size)
}
