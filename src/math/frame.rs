//! Orientation frame
//!
//! The three local axes of an item. Local rotations spin the frame about its
//! own (already rotated) axes; global rotations use the fixed world axes.

use super::quat::Quat;
use super::vec::{Axis, Vec3};

/// Current local X, Y, Z axes of an item, as unit vectors in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    axes: [Vec3; 3],
}

impl Frame {
    /// World basis
    pub const WORLD: Frame = Frame {
        axes: [Vec3::UNIT_X, Vec3::UNIT_Y, Vec3::UNIT_Z],
    };

    /// Current direction of a local axis
    pub fn axis(&self, axis: Axis) -> Vec3 {
        self.axes[axis.index()]
    }

    pub fn axes(&self) -> [Vec3; 3] {
        self.axes
    }

    /// Apply an arbitrary rotation to all three axes
    pub fn rotated_by(&self, q: Quat) -> Frame {
        Frame {
            axes: self.axes.map(|a| q.rotate_vector(a)),
        }
    }

    /// Rotate about the frame's own `axis`; returns the new frame and the step rotation
    pub fn rotated_local(&self, axis: Axis, degrees: f64) -> (Frame, Quat) {
        let q = Quat::from_unit_axis(self.axis(axis), degrees);
        (self.rotated_by(q), q)
    }

    /// Rotate about the fixed world `axis`; returns the new frame and the step rotation
    pub fn rotated_global(&self, axis: Axis, degrees: f64) -> (Frame, Quat) {
        let q = Quat::about(axis, degrees);
        (self.rotated_by(q), q)
    }

    /// Largest component deviation from another frame
    pub fn max_abs_diff(&self, other: &Frame) -> f64 {
        (0..3)
            .map(|i| self.axes[i].max_abs_diff(other.axes[i]))
            .fold(0.0, f64::max)
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::WORLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_local_and_global_agree_from_world_basis() {
        let (local, _) = Frame::WORLD.rotated_local(Axis::Y, 37.0);
        let (global, _) = Frame::WORLD.rotated_global(Axis::Y, 37.0);
        assert!(local.max_abs_diff(&global) < EPS);
    }

    #[test]
    fn test_local_rotation_uses_rotated_axis() {
        // Yaw 90 turns local X onto world -Z; a local pitch then spins about -Z
        let (yawed, _) = Frame::WORLD.rotated_local(Axis::Y, 90.0);
        assert!(yawed.axis(Axis::X).max_abs_diff(Vec3::new(0.0, 0.0, -1.0)) < EPS);

        let (local, _) = yawed.rotated_local(Axis::X, 90.0);
        let (global, _) = yawed.rotated_global(Axis::X, 90.0);

        // Local pitch keeps local X where it was
        assert!(local.axis(Axis::X).max_abs_diff(yawed.axis(Axis::X)) < EPS);
        // Global pitch about world X moves it
        assert!(global.axis(Axis::X).max_abs_diff(yawed.axis(Axis::X)) > 0.5);
    }

    #[test]
    fn test_rotation_keeps_axes_orthonormal() {
        let (f, _) = Frame::WORLD.rotated_local(Axis::Y, 33.0);
        let (f, _) = f.rotated_local(Axis::X, -71.0);
        let (f, _) = f.rotated_global(Axis::Z, 250.0);
        let [x, y, z] = f.axes();
        assert!((x.len() - 1.0).abs() < EPS);
        assert!((y.len() - 1.0).abs() < EPS);
        assert!(x.dot(y).abs() < EPS);
        assert!(x.cross(y).max_abs_diff(z) < EPS);
    }

    #[test]
    fn test_rotation_is_pure() {
        let start = Frame::WORLD;
        let (a, _) = start.rotated_local(Axis::Z, 45.0);
        let (b, _) = start.rotated_local(Axis::Z, 45.0);
        assert_eq!(a, b);
        assert_eq!(start, Frame::WORLD);
    }
}
