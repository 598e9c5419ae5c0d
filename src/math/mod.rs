//! Rotation math for blueprint placement
//!
//! - `vec`: vectors, world axes, rounding helpers
//! - `quat`: quaternion primitive (axis-angle, product, sandwich rotation)
//! - `frame`: an item's local axes and how they turn
//! - `euler`: conversion between editor angles and quaternions

pub mod euler;
pub mod frame;
pub mod quat;
pub mod vec;

pub use euler::{
    euler_to_global_quat, euler_to_local_quat, quat_to_euler, wrap_degrees, Euler, ANGLE_PRECISION,
};
pub use frame::Frame;
pub use quat::{Quat, TransformError};
pub use vec::{round_to, Axis, Vec3};
