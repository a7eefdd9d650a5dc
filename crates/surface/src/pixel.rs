//! Pure-computation pixel buffer conversion for height and normal fields.
//!
//! Always available (no feature gate) so callers without the `png` feature
//! can still hand buffers to their own image sink.

use crate::height::HeightField;
use beamseas_core::vector::Vector3;
use glam::Vec3;

/// Maps heights to grayscale RGBA8, lowest black and highest white.
///
/// A perfectly flat field renders mid-gray. The buffer length is
/// `width * height * 4`.
pub fn height_to_rgba(field: &HeightField) -> Vec<u8> {
    let (lo, hi) = field.min_max();
    let range = hi - lo;
    field
        .data()
        .iter()
        .flat_map(|&h| {
            let t = if range > 0.0 { (h - lo) / range } else { 0.5 };
            let v = (t.clamp(0.0, 1.0) * 255.0).round() as u8;
            [v, v, v, 255u8]
        })
        .collect()
}

/// Encodes unit normals as a tangent-style normal map: each component
/// `[-1, 1]` maps to `[0, 255]`. Encoding runs in single precision, the same
/// as the GPU texture it stands in for.
pub fn normals_to_rgba(normals: &[Vector3]) -> Vec<u8> {
    normals
        .iter()
        .flat_map(|&n| {
            let unit = Vec3::from(n).clamp(Vec3::NEG_ONE, Vec3::ONE);
            let rgb = ((unit * 0.5 + 0.5) * 255.0).round();
            [rgb.x as u8, rgb.y as u8, rgb.z as u8, 255u8]
        })
        .collect()
}
