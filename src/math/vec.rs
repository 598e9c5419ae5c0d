//! Vector math for item positions and rotation axes

use std::ops::{Add, AddAssign, Mul, Neg, Sub};
use serde::{Serialize, Deserialize};

/// 3D Vector (world units, Liftoff convention: Y is up)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const UNIT_X: Vec3 = Vec3 { x: 1.0, y: 0.0, z: 0.0 };
    pub const UNIT_Y: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };
    pub const UNIT_Z: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 1.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn len(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction, or `None` for a zero or non-finite vector
    pub fn try_normalize(self) -> Option<Vec3> {
        let l = self.len();
        if l == 0.0 || !l.is_finite() {
            return None;
        }
        Some(self.scale(1.0 / l))
    }

    pub fn scale(self, s: f64) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    /// Component-wise rounding to `places` decimal digits
    pub fn rounded(self, places: i32) -> Vec3 {
        Vec3 {
            x: round_to(self.x, places),
            y: round_to(self.y, places),
            z: round_to(self.z, places),
        }
    }

    /// Largest absolute component difference, used by tolerance checks
    pub fn max_abs_diff(self, other: Vec3) -> f64 {
        (self.x - other.x)
            .abs()
            .max((self.y - other.y).abs())
            .max((self.z - other.z).abs())
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, other: Vec3) {
        *self = *self + other;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        self.scale(-1.0)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f64) -> Vec3 {
        self.scale(s)
    }
}

/// One of the three world axes.
///
/// Also indexes the matching component of a frame or an Euler triple
/// (X = pitch, Y = yaw, Z = roll).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis {
    /// Order in which the editor applies rotations: yaw, then pitch, then roll
    pub const EDITOR_ORDER: [Axis; 3] = [Axis::Y, Axis::X, Axis::Z];

    pub fn index(self) -> usize {
        self as usize
    }

    /// World-space unit vector for this axis
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::UNIT_X,
            Axis::Y => Vec3::UNIT_Y,
            Axis::Z => Vec3::UNIT_Z,
        }
    }
}

/// Round to a fixed number of decimal places.
///
/// Negative zero is folded into positive zero so serialized output never
/// shows `-0`.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_dot() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert!((a.dot(b) - 32.0).abs() < 1e-9);
    }

    #[test]
    fn test_vec3_cross() {
        let c = Vec3::UNIT_X.cross(Vec3::UNIT_Y);
        assert!(c.max_abs_diff(Vec3::UNIT_Z) < 1e-12);
    }

    #[test]
    fn test_try_normalize() {
        let n = Vec3::new(0.0, 3.0, 4.0).try_normalize().unwrap();
        assert!((n.len() - 1.0).abs() < 1e-12);
        assert!((n.y - 0.6).abs() < 1e-12);

        assert!(Vec3::ZERO.try_normalize().is_none());
        assert!(Vec3::new(f64::NAN, 0.0, 0.0).try_normalize().is_none());
    }

    #[test]
    fn test_round_to_folds_negative_zero() {
        let r = round_to(-0.0001, 3);
        assert_eq!(r, 0.0);
        assert!(r.is_sign_positive());
        assert_eq!(round_to(1.23456, 3), 1.235);
    }
}
