//! Extended Liftoff Editor
//!
//! Places copies of reusable item groups ("blueprints") into a Liftoff race
//! track, reproducing the game editor's rotation rules:
//! - Template rotations turn each item about its own axes (yaw, pitch, roll)
//! - Placement rotations turn the whole group about the world axes
//! - Angles are recovered from the composed quaternion, gimbal lock included

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod blueprint;
pub mod config;
pub mod math;
pub mod shell;
pub mod track;
