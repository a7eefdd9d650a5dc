//! CPU-side PNG output for height fields and normal maps.
//!
//! Feature-gated behind `png` (default on) so consumers that only need the
//! numeric stages do not pull in the `image` crate. The pixel conversion
//! itself lives in [`crate::pixel`].

use crate::height::HeightField;
use crate::pixel::{height_to_rgba, normals_to_rgba};
use beamseas_core::error::SpectrumError;
use beamseas_core::vector::Vector3;
use std::path::Path;

/// Writes a height field as a grayscale PNG.
///
/// Returns `SpectrumError::InvalidDimensions` if the dimensions overflow
/// `u32`, or `SpectrumError::Io` on write failure.
pub fn write_png(field: &HeightField, path: &Path) -> Result<(), SpectrumError> {
    write_rgba(field.width(), field.height(), height_to_rgba(field), path)
}

/// Writes per-cell normals (row-major, `width * height` entries) as a
/// normal-map PNG.
pub fn write_normal_png(
    width: usize,
    height: usize,
    normals: &[Vector3],
    path: &Path,
) -> Result<(), SpectrumError> {
    write_rgba(width, height, normals_to_rgba(normals), path)
}

fn write_rgba(width: usize, height: usize, rgba: Vec<u8>, path: &Path) -> Result<(), SpectrumError> {
    let w = u32::try_from(width).map_err(|_| SpectrumError::InvalidDimensions)?;
    let h = u32::try_from(height).map_err(|_| SpectrumError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| SpectrumError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| SpectrumError::Io(e.to_string()))?;
    tracing::debug!(path = %path.display(), width, height, "wrote png");
    Ok(())
}
