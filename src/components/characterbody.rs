//! Kinematic body driven by a first-person controller.
//!
//! The [`CharacterBody`] component stores the velocity that persists between
//! fixed ticks and the floor flag reported by the last slide-move. Velocity is
//! never clamped here: the controller's interpolation target caps the
//! horizontal part asymptotically and the collision collaborator is free to
//! zero or redirect any component.

use bevy_ecs::prelude::Component;
use glam::Vec3;

/// Velocity plus grounding state for a kinematic character.
///
/// # Fields
/// - `velocity` - Current velocity in world units per second
/// - `on_floor` - Whether the last slide-move left the body on a walkable surface
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct CharacterBody {
    /// Current velocity in world units per second.
    pub velocity: Vec3,
    /// Floor flag from the most recent slide-move.
    pub on_floor: bool,
}

impl CharacterBody {
    /// Create a body at rest, not grounded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a body with an initial velocity.
    pub fn with_velocity(velocity: Vec3) -> Self {
        Self {
            velocity,
            on_floor: false,
        }
    }

    /// Velocity with the vertical component removed.
    pub fn horizontal_velocity(&self) -> Vec3 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z)
    }

    /// Horizontal speed, ignoring the vertical component.
    pub fn horizontal_speed(&self) -> f32 {
        self.horizontal_velocity().length()
    }

    /// Whether the last slide-move reported floor contact.
    pub fn is_grounded(&self) -> bool {
        self.on_floor
    }
}
