//! Track item
//!
//! The smallest placed thing in a track: one gate, flag, light, etc. Its
//! rotation is kept in two forms, the editor's Euler angles and the
//! accumulated quaternion those angles came from, so repeated placement
//! rotations compose exactly instead of adding angles.

use crate::math::{
    euler_to_global_quat, euler_to_local_quat, quat_to_euler, Euler, Frame, Quat, Vec3,
};

/// A single positioned and rotated track element
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Liftoff item type (e.g. `GateSquare01`)
    pub item_id: String,
    /// Track-unique id, assigned when the owning instance is placed
    pub instance_id: u64,
    position: Vec3,
    rotation: Euler,
    frame: Frame,
    orientation: Quat,
}

impl Item {
    /// Build an item from its authored values.
    ///
    /// Authored rotations are about the item's own axes, so orientation is
    /// derived with the local-axis rule.
    pub fn new(item_id: impl Into<String>, instance_id: u64, position: Vec3, rotation: Euler) -> Self {
        let (frame, orientation) = euler_to_local_quat(rotation);
        Self {
            item_id: item_id.into(),
            instance_id,
            position,
            rotation,
            frame,
            orientation,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Euler {
        self.rotation
    }

    /// Current local axes
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Quaternion equivalent of every rotation applied so far
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Rotate about the world axes (yaw, pitch, roll order). Position is untouched.
    pub fn rotate(&mut self, angles: Euler) {
        self.apply_global(euler_to_global_quat(angles));
    }

    /// Apply an already composed world-space rotation
    pub(crate) fn apply_global(&mut self, rotation: Quat) {
        let orientation = rotation * self.orientation;
        self.frame = self.frame.rotated_by(rotation);
        self.orientation = orientation;
        self.rotation = quat_to_euler(orientation);
    }

    /// Position relative to `pivot`, rotated, then moved back
    pub(crate) fn revolve(&mut self, pivot: Vec3, rotation: Quat) {
        self.position = pivot + rotation.rotate_vector(self.position - pivot);
    }

    /// Independent copy, re-deriving orientation from the current angles
    pub fn copy(&self) -> Item {
        Item::new(self.item_id.clone(), self.instance_id, self.position, self.rotation)
    }
}
