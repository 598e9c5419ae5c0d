//! Blueprint definition
//!
//! A named group of items. Loaded blueprints are templates and are never
//! changed; placing one copies it and moves/rotates the copy as a rigid group
//! around its pivot.

use crate::math::{euler_to_global_quat, wrap_degrees, Axis, Euler, Quat, Vec3};
use super::item::Item;

/// A group of items transformed together around a pivot
#[derive(Debug, Clone, PartialEq)]
pub struct Blueprint {
    /// Template name (file stem of the template)
    pub name: String,
    items: Vec<Item>,
    pivot_position: Vec3,
    pivot_rotation: Euler,
}

impl Blueprint {
    /// Create an empty blueprint with its pivot at the origin
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
            pivot_position: Vec3::ZERO,
            pivot_rotation: Euler::ZERO,
        }
    }

    /// Append an item; authoring order is kept
    pub fn add(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn pivot_position(&self) -> Vec3 {
        self.pivot_position
    }

    /// Accumulated placement angles, each wrapped into [0, 360)
    pub fn pivot_rotation(&self) -> Euler {
        self.pivot_rotation
    }

    /// Move the pivot and every item by the same offset
    pub fn translate(&mut self, offset: Vec3) {
        self.pivot_position += offset;
        for item in &mut self.items {
            item.translate(offset);
        }
    }

    /// Rotate the whole group about the world axes through the pivot.
    ///
    /// Positions revolve one axis at a time (yaw, pitch, roll) while the pivot
    /// angles accumulate; item orientations then turn once by the combined
    /// rotation.
    pub fn rotate(&mut self, angles: Euler) {
        for axis in Axis::EDITOR_ORDER {
            let angle = angles.get(axis);
            let step = Quat::about(axis, angle);
            for item in &mut self.items {
                item.revolve(self.pivot_position, step);
            }
            self.pivot_rotation
                .set(axis, wrap_degrees(self.pivot_rotation.get(axis) + angle));
        }

        let combined = euler_to_global_quat(angles);
        for item in &mut self.items {
            item.apply_global(combined);
        }
    }

    /// Give each item the next ids after `counter`; returns the last id used
    pub fn sync_instance_id(&mut self, mut counter: u64) -> u64 {
        for item in &mut self.items {
            counter += 1;
            item.instance_id = counter;
        }
        counter
    }

    /// Deep copy for placing a new instance
    pub fn copy(&self) -> Blueprint {
        Blueprint {
            name: self.name.clone(),
            items: self.items.iter().map(Item::copy).collect(),
            pivot_position: self.pivot_position,
            pivot_rotation: self.pivot_rotation,
        }
    }
}
