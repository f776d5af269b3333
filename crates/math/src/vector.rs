use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use crate::MathError;

/// A 3-component vector.
///
/// Value-returning operations (`add`, `subtract`, `normalize`, ...) leave
/// `self` untouched; the in-place variants are named `add_to` and
/// `normalize_mut`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// The zero vector.
    pub const fn empty() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// World up, `(0, 1, 0)`.
    pub const fn up() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn add(self, v: Vector3) -> Vector3 {
        Vector3::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }

    /// Accumulate `v` into `self` without producing a new value.
    pub fn add_to(&mut self, v: Vector3) {
        self.x += v.x;
        self.y += v.y;
        self.z += v.z;
    }

    pub fn subtract(self, v: Vector3) -> Vector3 {
        Vector3::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }

    /// Scale by a scalar.
    pub fn multiply(self, c: f32) -> Vector3 {
        Vector3::new(self.x * c, self.y * c, self.z * c)
    }

    pub fn dot(self, v: Vector3) -> f32 {
        self.x * v.x + self.y * v.y + self.z * v.z
    }

    pub fn cross(self, v: Vector3) -> Vector3 {
        Vector3::new(
            self.y * v.z - self.z * v.y,
            self.z * v.x - self.x * v.z,
            self.x * v.y - self.y * v.x,
        )
    }

    /// Euclidean length. Components are scaled by the largest one first so
    /// squaring neither overflows nor underflows.
    pub fn magnitude(self) -> f32 {
        let largest = self.largest_abs();
        if largest == 0.0 || !largest.is_finite() {
            return largest;
        }
        let scaled = self.divide(largest);
        largest * scaled.dot(scaled).sqrt()
    }

    /// Unit vector in the same direction.
    ///
    /// Fails with [`MathError::DegenerateVector`] only for the zero vector or
    /// non-finite input; any other length, however small or large, works.
    pub fn normalize(self) -> Result<Vector3, MathError> {
        let largest = self.largest_abs();
        if largest == 0.0 || !self.is_finite() {
            return Err(MathError::DegenerateVector("normalize"));
        }
        let scaled = self.divide(largest);
        Ok(scaled.divide(scaled.dot(scaled).sqrt()))
    }

    /// Normalize in place. On failure `self` is left unchanged.
    pub fn normalize_mut(&mut self) -> Result<(), MathError> {
        *self = self.normalize()?;
        Ok(())
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    fn largest_abs(self) -> f32 {
        self.x.abs().max(self.y.abs()).max(self.z.abs())
    }

    fn divide(self, c: f32) -> Vector3 {
        Vector3::new(self.x / c, self.y / c, self.z / c)
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Vector3) {
        self.add_to(rhs);
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        self.subtract(rhs)
    }
}

impl Mul<f32> for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: f32) -> Vector3 {
        self.multiply(rhs)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Vector3 {
        self.multiply(-1.0)
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from(a: [f32; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }
}

impl From<glam::Vec3> for Vector3 {
    fn from(v: glam::Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector3> for glam::Vec3 {
    fn from(v: Vector3) -> Self {
        glam::Vec3::new(v.x, v.y, v.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn constants() {
        assert_eq!(Vector3::empty(), Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(Vector3::up(), Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(Vector3::default(), Vector3::empty());
    }

    #[test]
    fn arithmetic() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, -5.0, 6.0);
        assert_eq!(a.add(b), Vector3::new(5.0, -3.0, 9.0));
        assert_eq!(a.subtract(b), Vector3::new(-3.0, 7.0, -3.0));
        assert_eq!(a.multiply(2.0), Vector3::new(2.0, 4.0, 6.0));
        assert_eq!(a.dot(b), 12.0);
        assert_eq!(a + b, a.add(b));
        assert_eq!(a - b, a.subtract(b));
        assert_eq!(-a, Vector3::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn pure_ops_leave_operands_untouched() {
        let a = Vector3::new(3.0, 0.0, 4.0);
        let _ = a.normalize().unwrap();
        let _ = a.add(Vector3::up());
        assert_eq!(a, Vector3::new(3.0, 0.0, 4.0));
    }

    #[test]
    fn add_to_accumulates_in_place() {
        let mut p = Vector3::empty();
        p.add_to(Vector3::new(1.0, 0.0, 0.0));
        p.add_to(Vector3::new(0.5, 2.0, 0.0));
        p += Vector3::new(0.0, 0.0, -1.0);
        assert_eq!(p, Vector3::new(1.5, 2.0, -1.0));
    }

    #[test]
    fn cross_follows_right_hand_rule() {
        let x = Vector3::new(1.0, 0.0, 0.0);
        let y = Vector3::up();
        assert_eq!(x.cross(y), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(y.cross(x), Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn normalize_yields_unit_length() {
        let samples = [
            Vector3::new(3.0, 4.0, 0.0),
            Vector3::new(-0.001, 0.002, 0.0005),
            Vector3::new(100.0, -250.0, 3.5),
            Vector3::new(0.0, 0.0, -7.0),
            Vector3::new(1e-3, 1e-3, 1e-3),
        ];
        for v in samples {
            let n = v.normalize().unwrap();
            assert!(approx_eq(n.magnitude(), 1.0, 1e-6), "{v:?} -> {n:?}");
        }
    }

    #[test]
    fn normalize_zero_is_degenerate() {
        let err = Vector3::empty().normalize().unwrap_err();
        assert!(matches!(err, MathError::DegenerateVector(_)));

        let mut v = Vector3::empty();
        assert!(v.normalize_mut().is_err());
        assert_eq!(v, Vector3::empty());
    }

    #[test]
    fn normalize_tiny_and_huge_vectors() {
        for v in [
            Vector3::new(5e-7, 0.0, 0.0),
            Vector3::new(0.0, -3e-30, 4e-30),
            Vector3::new(1e-45, 0.0, 0.0),
            Vector3::new(1e20, 0.0, 0.0),
            Vector3::new(3e38, -3e38, 3e38),
        ] {
            let n = v.normalize().unwrap();
            assert!(approx_eq(n.magnitude(), 1.0, 1e-6), "{v:?} -> {n:?}");
        }
        assert_eq!(Vector3::new(1e20, 0.0, 0.0).magnitude(), 1e20);
        assert!(approx_eq(Vector3::new(3e-30, 4e-30, 0.0).magnitude() / 5e-30, 1.0, 1e-6));
    }

    #[test]
    fn normalize_non_finite_is_degenerate() {
        assert!(Vector3::new(f32::NAN, 1.0, 0.0).normalize().is_err());
        assert!(Vector3::new(f32::INFINITY, 0.0, 0.0).normalize().is_err());
    }

    #[test]
    fn normalize_mut_in_place() {
        let mut v = Vector3::new(0.0, 5.0, 0.0);
        v.normalize_mut().unwrap();
        assert_eq!(v, Vector3::up());
    }

    #[test]
    fn glam_round_trip() {
        let v = Vector3::new(1.0, -2.0, 3.5);
        let g: glam::Vec3 = v.into();
        assert_eq!(Vector3::from(g), v);
        assert_eq!(v.cross(Vector3::up()), Vector3::from(g.cross(glam::Vec3::Y)));
    }
}
