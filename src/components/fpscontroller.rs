//! First-person controller components.
//!
//! This module provides the data a first-person character carries:
//! - [`ControllerTuning`] – the tuning values fixed at construction
//! - [`FpsController`] – marks the yaw entity and owns its tuning
//! - [`MoveIntent`] – per-tick direction and jump request from the sampler
//! - [`LookPitch`] – marks the child entity that owns camera pitch
//!
//! Systems in [`crate::systems::fpsinput`] and [`crate::systems::fpsmovement`]
//! read these components; the look observer lives in
//! [`crate::events::pointermotion`].

use bevy_ecs::prelude::Component;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Pitch limit for the look node, in degrees, applied symmetrically.
pub const PITCH_LIMIT_DEGREES: f32 = 70.0;

/// Bounce budget handed to the slide-move collaborator each tick.
pub const SLIDE_MAX_BOUNCES: u32 = 4;

/// Tuning values for a first-person controller.
///
/// Angles are in degrees, speeds in world units per second, rates in
/// "fraction of the gap closed per second" (see
/// [`integrate_horizontal`](crate::systems::fpsmovement::integrate_horizontal)).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControllerTuning {
    /// Vertical acceleration applied every tick. Negative pulls down.
    pub gravity: f32,
    /// Horizontal speed the interpolation converges to.
    pub max_speed: f32,
    /// Vertical velocity set by a grounded jump.
    pub jump_speed: f32,
    /// Interpolation rate while pushing along the current motion.
    pub accel: f32,
    /// Interpolation rate while stopping, reversing or turning sharply.
    pub deaccel: f32,
    /// Steepest surface, in degrees from up, that still counts as floor.
    pub max_slope_angle_deg: f32,
    /// Degrees of rotation per unit of pointer motion.
    pub mouse_sensitivity: f32,
}

impl Default for ControllerTuning {
    fn default() -> Self {
        Self {
            gravity: -50.8,
            max_speed: 20.0,
            jump_speed: 18.0,
            accel: 4.5,
            deaccel: 16.0,
            max_slope_angle_deg: 40.0,
            mouse_sensitivity: 0.15,
        }
    }
}

impl ControllerTuning {
    /// Check every field for a usable value.
    ///
    /// Returns the name of the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("gravity", self.gravity),
            ("max_speed", self.max_speed),
            ("jump_speed", self.jump_speed),
            ("accel", self.accel),
            ("deaccel", self.deaccel),
            ("max_slope_angle", self.max_slope_angle_deg),
            ("mouse_sensitivity", self.mouse_sensitivity),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(format!("{} must be a finite number, got {}", name, value));
            }
        }
        for (name, value) in [
            ("max_speed", self.max_speed),
            ("jump_speed", self.jump_speed),
            ("accel", self.accel),
            ("deaccel", self.deaccel),
        ] {
            if value < 0.0 {
                return Err(format!("{} must not be negative, got {}", name, value));
            }
        }
        if !(0.0..=90.0).contains(&self.max_slope_angle_deg) {
            return Err(format!(
                "max_slope_angle must be within [0, 90], got {}",
                self.max_slope_angle_deg
            ));
        }
        Ok(())
    }

    /// Floor slope limit in radians.
    pub fn max_slope_radians(&self) -> f32 {
        self.max_slope_angle_deg.to_radians()
    }
}

/// First-person controller attached to the yaw (body) entity.
///
/// The entity also needs a [`CharacterBody`](super::characterbody::CharacterBody),
/// a [`MoveIntent`], a [`Transform3d`](super::transform3d::Transform3d), and
/// one child carrying [`LookPitch`].
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct FpsController {
    pub tuning: ControllerTuning,
}

impl FpsController {
    pub fn new(tuning: ControllerTuning) -> Self {
        Self { tuning }
    }
}

/// Movement request produced by the input sampler for the current tick.
///
/// `direction` is world-space and not yet flattened; the integrator removes
/// the vertical part.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct MoveIntent {
    pub direction: Vec3,
    pub jump: bool,
}

/// Marker for the child node that owns camera pitch.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct LookPitch;
