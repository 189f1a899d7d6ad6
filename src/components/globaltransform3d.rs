//! Computed world-space transform for entities in a hierarchy.
//!
//! When an entity has a [`ChildOf`](bevy_ecs::hierarchy::ChildOf) parent, its
//! [`Transform3d`](super::transform3d::Transform3d) is interpreted as local to
//! the parent. The
//! [`propagate_transforms`](crate::systems::propagate_transforms::propagate_transforms)
//! system computes the resulting world-space values and stores them here.

use bevy_ecs::prelude::*;
use glam::{Mat3, Quat, Vec3};

/// Computed world-space transform for hierarchical entities.
///
/// For root entities it mirrors the local transform. For child entities it
/// contains the composed result of the full ancestor chain.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct GlobalTransform3d {
    /// World-space position.
    pub translation: Vec3,
    /// World-space orientation.
    pub rotation: Quat,
}

impl Default for GlobalTransform3d {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl GlobalTransform3d {
    /// Orientation as a 3x3 basis; columns are the world-space local axes.
    pub fn basis(&self) -> Mat3 {
        Mat3::from_quat(self.rotation)
    }

    /// World-space viewing direction (local `-Z`).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Compose a child's local transform onto this one.
    pub fn mul_local(&self, translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation: self.translation + self.rotation * translation,
            rotation: (self.rotation * rotation).normalize(),
        }
    }
}
