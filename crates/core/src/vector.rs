//! Fixed-size 2D and 3D vectors used by the spectrum model.
//!
//! Both types are `Copy` values: every operation returns a new vector and
//! nothing aliases. Normalisation is fallible; a zero-length vector yields
//! [`SpectrumError::DegenerateInput`] instead of a NaN that would silently
//! poison every amplitude computed from it.

use crate::error::SpectrumError;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// A 2D vector of `f64` components. Used for wave vectors, wind and domain size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

/// A 3D vector of `f64` components. Used for surface normals.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both components set to `v`.
    pub const fn splat(v: f64) -> Self {
        Self { x: v, y: v }
    }

    pub fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Component-wise product.
    pub fn mul_elements(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }

    /// Component-wise quotient. Division by a zero component follows IEEE rules;
    /// callers validate divisors (see [`crate::config::OceanConfig::validate`]).
    pub fn div_elements(self, other: Self) -> Self {
        Self::new(self.x / other.x, self.y / other.y)
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    /// Euclidean length. Never negative; zero only for the zero vector.
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Returns the vector scaled to unit length.
    ///
    /// Returns `SpectrumError::DegenerateInput` for the zero vector or a
    /// non-finite component. The components are divided by the largest
    /// magnitude first, so finite vectors whose length overflows `f64` still
    /// normalise. Callers that want a softer threshold should compare
    /// [`length`](Self::length) against their own epsilon first.
    pub fn unit(self) -> Result<Self, SpectrumError> {
        let largest = self.x.abs().max(self.y.abs());
        if largest == 0.0 || !self.is_finite() {
            return Err(SpectrumError::DegenerateInput {
                length: self.length(),
            });
        }
        let reduced = Self::new(self.x / largest, self.y / largest);
        Ok(reduced.scale(1.0 / reduced.length()))
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Vector3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Returns the vector scaled to unit length, or `DegenerateInput` for the
    /// zero vector. Overflow-safe in the same way as [`Vector2::unit`].
    pub fn unit(self) -> Result<Self, SpectrumError> {
        let largest = self.x.abs().max(self.y.abs()).max(self.z.abs());
        if largest == 0.0 || !self.is_finite() {
            return Err(SpectrumError::DegenerateInput {
                length: self.length(),
            });
        }
        let reduced = Self::new(self.x / largest, self.y / largest, self.z / largest);
        Ok(reduced.scale(1.0 / reduced.length()))
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

// Operators delegate to the named methods so both spellings agree.

impl Add for Vector2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Vector2::add(self, rhs)
    }
}

impl Sub for Vector2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Vector2::sub(self, rhs)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

impl Neg for Vector2 {
    type Output = Self;
    fn neg(self) -> Self {
        self.scale(-1.0)
    }
}

impl Add for Vector3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Vector3::add(self, rhs)
    }
}

impl Sub for Vector3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Vector3::sub(self, rhs)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

impl Neg for Vector3 {
    type Output = Self;
    fn neg(self) -> Self {
        self.scale(-1.0)
    }
}

impl From<Vector3> for glam::Vec3 {
    fn from(v: Vector3) -> Self {
        glam::Vec3::new(v.x as f32, v.y as f32, v.z as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_of_3_4_is_5() {
        assert!((Vector2::new(3.0, 4.0).length() - 5.0).abs() < 1e-12);
        assert!((Vector3::new(2.0, 3.0, 6.0).length() - 7.0).abs() < 1e-12);
    }

    #[test]
    fn zero_vector_has_zero_length() {
        assert_eq!(Vector2::ZERO.length(), 0.0);
        assert_eq!(Vector3::ZERO.length(), 0.0);
    }

    #[test]
    fn unit_of_zero_vector_is_degenerate() {
        assert!(matches!(
            Vector2::ZERO.unit(),
            Err(SpectrumError::DegenerateInput { .. })
        ));
        assert!(matches!(
            Vector3::ZERO.unit(),
            Err(SpectrumError::DegenerateInput { .. })
        ));
    }

    #[test]
    fn unit_of_non_finite_vector_is_degenerate() {
        let v = Vector2::new(f64::INFINITY, 1.0);
        assert!(v.unit().is_err());
    }

    #[test]
    fn unit_of_axis_vector() {
        let u = Vector2::new(0.0, 32.0).unit().unwrap();
        assert_eq!(u, Vector2::new(0.0, 1.0));
    }

    #[test]
    fn operators_match_named_methods() {
        let a = Vector2::new(1.5, -2.0);
        let b = Vector2::new(0.25, 4.0);
        assert_eq!(a + b, a.add(b));
        assert_eq!(a - b, a.sub(b));
        assert_eq!(a * 3.0, a.scale(3.0));
        assert_eq!(-a, a.scale(-1.0));

        let c = Vector3::new(1.0, 2.0, 3.0);
        let d = Vector3::new(-1.0, 0.5, 2.0);
        assert_eq!(c + d, c.add(d));
        assert_eq!(c - d, c.sub(d));
        assert_eq!(c * 0.5, c.scale(0.5));
    }

    #[test]
    fn arithmetic_does_not_mutate_operands() {
        let a = Vector2::new(1.0, 2.0);
        let copy = a;
        let _ = a.add(Vector2::new(5.0, 5.0));
        let _ = a.scale(10.0);
        assert_eq!(a, copy);
    }

    #[test]
    fn cross_of_x_and_y_is_z() {
        let x = Vector3::new(1.0, 0.0, 0.0);
        let y = Vector3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(y), Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn element_wise_ops() {
        let a = Vector2::new(2.0, 6.0);
        let b = Vector2::new(4.0, 3.0);
        assert_eq!(a.mul_elements(b), Vector2::new(8.0, 18.0));
        assert_eq!(a.div_elements(b), Vector2::new(0.5, 2.0));
    }

    #[test]
    fn unit_of_huge_finite_vector() {
        let u = Vector2::new(1e200, 0.0).unit().unwrap();
        assert_eq!(u, Vector2::new(1.0, 0.0));
        let u = Vector2::new(3e300, -4e300).unit().unwrap();
        assert!((u.x - 0.6).abs() < 1e-15 && (u.y + 0.8).abs() < 1e-15, "{u:?}");
        let n = Vector3::new(0.0, 1e300, 1e300).unit().unwrap();
        assert!((n.length() - 1.0).abs() < 1e-15, "{n:?}");
    }

    #[test]
    fn unit_of_tiny_vector() {
        let u = Vector2::new(0.0, 5e-324).unit().unwrap();
        assert_eq!(u, Vector2::new(0.0, 1.0));
    }

    #[test]
    fn converts_to_f32_glam_vector() {
        let f: glam::Vec3 = Vector3::new(1.0, -0.5, 3.0).into();
        assert_eq!(f, glam::Vec3::new(1.0, -0.5, 3.0));
    }

    // -- Property-based tests --

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn component() -> impl Strategy<Value = f64> {
            -1e3_f64..1e3
        }

        proptest! {
            #[test]
            fn unit_has_length_one(x in component(), y in component()) {
                let v = Vector2::new(x, y);
                prop_assume!(v.length() > 1e-9);
                let len = v.unit().unwrap().length();
                prop_assert!((len - 1.0).abs() < 1e-5, "|unit({x}, {y})| = {len}");
            }

            #[test]
            fn unit3_has_length_one(x in component(), y in component(), z in component()) {
                let v = Vector3::new(x, y, z);
                prop_assume!(v.length() > 1e-9);
                let len = v.unit().unwrap().length();
                prop_assert!((len - 1.0).abs() < 1e-5, "|unit({x}, {y}, {z})| = {len}");
            }

            #[test]
            fn dot_with_self_is_length_squared(x in component(), y in component()) {
                let v = Vector2::new(x, y);
                let len = v.length();
                let tol = 1e-9 * (1.0 + len * len);
                prop_assert!((v.dot(v) - len * len).abs() < tol);
            }

            #[test]
            fn dot_is_commutative(
                ax in component(), ay in component(),
                bx in component(), by in component(),
            ) {
                let a = Vector2::new(ax, ay);
                let b = Vector2::new(bx, by);
                prop_assert_eq!(a.dot(b), b.dot(a));
            }

            #[test]
            fn cross_is_orthogonal(
                ax in component(), ay in component(), az in component(),
                bx in component(), by in component(), bz in component(),
            ) {
                let a = Vector3::new(ax, ay, az);
                let b = Vector3::new(bx, by, bz);
                let c = a.cross(b);
                let scale = 1.0 + a.length() * b.length() * (a.length() + b.length());
                prop_assert!(c.dot(a).abs() < 1e-9 * scale);
                prop_assert!(c.dot(b).abs() < 1e-9 * scale);
            }
        }
    }
}
