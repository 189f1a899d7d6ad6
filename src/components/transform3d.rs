//! Local 3D transform component.
//!
//! When an entity has a [`ChildOf`](bevy_ecs::hierarchy::ChildOf) parent, its
//! [`Transform3d`] is interpreted relative to that parent. Rotations follow the
//! right-handed, Y-up convention where an unrotated node looks down `-Z`.

use bevy_ecs::prelude::Component;
use glam::{EulerRot, Quat, Vec3};

/// Translation and rotation of an entity relative to its parent (or the world
/// for roots).
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Transform3d {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Default for Transform3d {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform3d {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn from_xyz(x: f32, y: f32, z: f32) -> Self {
        Self::from_translation(Vec3::new(x, y, z))
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Euler angles in degrees, YXZ order, returned as `(x, y, z)`.
    pub fn rotation_degrees(&self) -> Vec3 {
        let (y, x, z) = self.rotation.to_euler(EulerRot::YXZ);
        Vec3::new(x.to_degrees(), y.to_degrees(), z.to_degrees())
    }

    /// Replace the rotation from `(x, y, z)` Euler angles in degrees, YXZ order.
    pub fn set_rotation_degrees(&mut self, degrees: Vec3) {
        self.rotation = Quat::from_euler(
            EulerRot::YXZ,
            degrees.y.to_radians(),
            degrees.x.to_radians(),
            degrees.z.to_radians(),
        );
    }
}
