//! Quaternion rotation primitive
//!
//! Every rotation in the editor, whether of a position around a pivot or of
//! an item's local axes, goes through [`Quat::rotate_vector`]: the vector is
//! lifted to a pure quaternion and sandwiched as `q · v · q*`.

use std::ops::Mul;
use super::vec::{Axis, Vec3};

/// Error type for rotation construction
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    /// Rotation axis had zero (or non-finite) length
    #[error("degenerate rotation axis ({x}, {y}, {z})")]
    DegenerateAxis { x: f64, y: f64, z: f64 },
}

/// Quaternion (w + xi + yj + zk)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quat {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quat {
    /// Identity rotation
    pub const IDENTITY: Quat = Quat { w: 1.0, x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// Pure quaternion (zero real part) carrying a vector
    pub fn pure(v: Vec3) -> Self {
        Self { w: 0.0, x: v.x, y: v.y, z: v.z }
    }

    /// Rotation of `degrees` about `axis` (right-hand rule).
    ///
    /// The axis does not need to be normalized.
    pub fn from_axis_angle(axis: Vec3, degrees: f64) -> Result<Quat, TransformError> {
        let unit = axis.try_normalize().ok_or(TransformError::DegenerateAxis {
            x: axis.x,
            y: axis.y,
            z: axis.z,
        })?;
        Ok(Self::from_unit_axis(unit, degrees))
    }

    /// Rotation about one of the fixed world axes
    pub fn about(axis: Axis, degrees: f64) -> Quat {
        Self::from_unit_axis(axis.unit(), degrees)
    }

    /// Rotation about an axis the caller guarantees to be unit length
    pub(crate) fn from_unit_axis(axis: Vec3, degrees: f64) -> Quat {
        let (s, c) = (degrees.to_radians() / 2.0).sin_cos();
        Quat {
            w: c,
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
        }
    }

    pub fn conjugate(self) -> Quat {
        Quat {
            w: self.w,
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }

    pub fn norm(self) -> f64 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Vector (imaginary) part
    pub fn vector(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Rotate `v` by this (unit) quaternion: `q · (0, v) · q*`
    pub fn rotate_vector(self, v: Vec3) -> Vec3 {
        (self * Quat::pure(v) * self.conjugate()).vector()
    }

    /// True if both quaternions describe the same rotation (`q` and `-q` are equal)
    pub fn same_rotation(self, other: Quat, tolerance: f64) -> bool {
        let dot = self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z;
        (dot.abs() - 1.0).abs() < tolerance
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Hamilton product. `a * b` applies `b` first, then `a`.
impl Mul for Quat {
    type Output = Quat;
    fn mul(self, rhs: Quat) -> Quat {
        Quat {
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_identity_rotation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert!(Quat::IDENTITY.rotate_vector(v).max_abs_diff(v) < EPS);
    }

    #[test]
    fn test_yaw_90_maps_x_to_minus_z() {
        let q = Quat::about(Axis::Y, 90.0);
        let r = q.rotate_vector(Vec3::UNIT_X);
        assert!(r.max_abs_diff(Vec3::new(0.0, 0.0, -1.0)) < EPS);
    }

    #[test]
    fn test_pitch_90_maps_y_to_z() {
        let q = Quat::about(Axis::X, 90.0);
        let r = q.rotate_vector(Vec3::UNIT_Y);
        assert!(r.max_abs_diff(Vec3::UNIT_Z) < EPS);
    }

    #[test]
    fn test_from_axis_angle_normalizes() {
        let a = Quat::from_axis_angle(Vec3::new(0.0, 5.0, 0.0), 30.0).unwrap();
        let b = Quat::about(Axis::Y, 30.0);
        assert!(a.same_rotation(b, EPS));
        assert!((a.norm() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_zero_axis_is_rejected() {
        let err = Quat::from_axis_angle(Vec3::ZERO, 45.0).unwrap_err();
        assert!(matches!(err, TransformError::DegenerateAxis { .. }));
    }

    #[test]
    fn test_product_is_not_commutative() {
        let a = Quat::about(Axis::X, 90.0);
        let b = Quat::about(Axis::Y, 90.0);
        assert!(!(a * b).same_rotation(b * a, 1e-6));
    }

    #[test]
    fn test_product_applies_right_operand_first() {
        let yaw = Quat::about(Axis::Y, 90.0);
        let pitch = Quat::about(Axis::X, 90.0);
        let v = Vec3::UNIT_Z;
        let composed = (pitch * yaw).rotate_vector(v);
        let stepwise = pitch.rotate_vector(yaw.rotate_vector(v));
        assert!(composed.max_abs_diff(stepwise) < EPS);
    }

    #[test]
    fn test_conjugate_undoes_rotation() {
        let q = Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), 73.0).unwrap();
        let v = Vec3::new(-2.0, 0.5, 4.0);
        let back = q.conjugate().rotate_vector(q.rotate_vector(v));
        assert!(back.max_abs_diff(v) < EPS);
    }
}
