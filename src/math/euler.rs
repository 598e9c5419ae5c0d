//! Euler angle <-> quaternion conversion
//!
//! Liftoff stores rotations as (x, y, z) degrees meaning pitch, yaw, roll,
//! applied yaw first, then pitch, then roll, each about the item's own
//! already-rotated axes. In world terms that is `Ry · Rx · Rz`.
//!
//! Placing a blueprint instance rotates it about the fixed world axes in the
//! same Y, X, Z order, which composes as `Rz · Rx · Ry`.

use serde::{Serialize, Deserialize};
use super::frame::Frame;
use super::quat::Quat;
use super::vec::{round_to, Axis};

/// Decimal places kept on extracted angles
pub const ANGLE_PRECISION: i32 = 6;

/// Rotation in degrees: pitch about X, yaw about Y, roll about Z
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Euler {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

impl Euler {
    pub const ZERO: Euler = Euler { pitch: 0.0, yaw: 0.0, roll: 0.0 };

    pub fn new(pitch: f64, yaw: f64, roll: f64) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Angle for the rotation about `axis`
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.pitch,
            Axis::Y => self.yaw,
            Axis::Z => self.roll,
        }
    }

    pub fn set(&mut self, axis: Axis, degrees: f64) {
        match axis {
            Axis::X => self.pitch = degrees,
            Axis::Y => self.yaw = degrees,
            Axis::Z => self.roll = degrees,
        }
    }

    /// Every component wrapped into [0, 360)
    pub fn wrapped(self) -> Euler {
        Euler {
            pitch: wrap_degrees(self.pitch),
            yaw: wrap_degrees(self.yaw),
            roll: wrap_degrees(self.roll),
        }
    }

    /// Rounded to `places` decimals and wrapped, for serialized output
    pub fn rounded(self, places: i32) -> Euler {
        Euler {
            pitch: wrap_degrees(round_to(self.pitch, places)),
            yaw: wrap_degrees(round_to(self.yaw, places)),
            roll: wrap_degrees(round_to(self.roll, places)),
        }
    }

    /// Smallest angular distance per component, ignoring whole turns
    pub fn max_angle_diff(&self, other: &Euler) -> f64 {
        [Axis::X, Axis::Y, Axis::Z]
            .iter()
            .map(|&a| angle_distance(self.get(a), other.get(a)))
            .fold(0.0, f64::max)
    }
}

/// Wrap an angle into [0, 360)
pub fn wrap_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped + 0.0
    }
}

/// Distance between two angles on the circle, in [0, 180]
pub fn angle_distance(a: f64, b: f64) -> f64 {
    let d = wrap_degrees(a - b);
    d.min(360.0 - d)
}

/// Authoring rotation: yaw, pitch, roll about the item's own successive axes.
///
/// Returns the rotated frame and the single equivalent quaternion.
pub fn euler_to_local_quat(euler: Euler) -> (Frame, Quat) {
    let mut frame = Frame::WORLD;
    let mut total = Quat::IDENTITY;
    for axis in Axis::EDITOR_ORDER {
        let (next, step) = frame.rotated_local(axis, euler.get(axis));
        frame = next;
        total = step * total;
    }
    (frame, total)
}

/// Placement rotation: yaw, pitch, roll about the fixed world axes
pub fn euler_to_global_quat(euler: Euler) -> Quat {
    Axis::EDITOR_ORDER
        .iter()
        .fold(Quat::IDENTITY, |total, &axis| Quat::about(axis, euler.get(axis)) * total)
}

/// Recover editor angles from a composed rotation.
///
/// Inverts [`euler_to_local_quat`]. At pitch = ±90° yaw and roll collapse
/// into one degree of freedom; the editor reports roll = 0 there and folds
/// everything into yaw.
pub fn quat_to_euler(q: Quat) -> Euler {
    let Quat { w, x, y, z } = q;

    let sin_pitch = 2.0 * (w * x - y * z);

    let raw = if round_to(sin_pitch.abs(), ANGLE_PRECISION) >= 1.0 {
        Euler {
            pitch: 90.0f64.copysign(sin_pitch),
            yaw: (2.0 * y.atan2(w)).to_degrees(),
            roll: 0.0,
        }
    } else {
        Euler {
            pitch: sin_pitch.clamp(-1.0, 1.0).asin().to_degrees(),
            yaw: (2.0 * (w * y + x * z))
                .atan2(1.0 - 2.0 * (x * x + y * y))
                .to_degrees(),
            roll: (2.0 * (w * z + x * y))
                .atan2(1.0 - 2.0 * (x * x + z * z))
                .to_degrees(),
        }
    };

    raw.wrapped().rounded(ANGLE_PRECISION)
}
