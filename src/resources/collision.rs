//! Collision collaborator seam.
//!
//! The controller never resolves contacts itself. Each tick it hands its
//! velocity to a [`SlideMover`] stored in the [`CollisionWorld`] resource and
//! takes the returned velocity, position and floor flag as authoritative.
//! [`StaticLevel`](crate::resources::staticlevel::StaticLevel) is the
//! implementation shipped with the crate; hosts with their own physics insert
//! a different one.

use bevy_ecs::prelude::Resource;
use glam::Vec3;

use crate::components::fpscontroller::SLIDE_MAX_BOUNCES;

/// Parameters for one slide-move call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideRequest {
    /// Desired velocity in world units per second.
    pub velocity: Vec3,
    /// Reference "up" used to classify floors.
    pub up: Vec3,
    /// Hold position on walkable slopes when only gravity is pulling.
    pub stop_on_slope: bool,
    /// Maximum number of contact resolutions.
    pub max_bounces: u32,
    /// Steepest angle from `up`, in radians, still counted as floor.
    pub max_slope_radians: f32,
}

impl SlideRequest {
    /// Request with the controller's fixed parameters: `+Y` up, no slope
    /// stopping, [`SLIDE_MAX_BOUNCES`] bounces.
    pub fn new(velocity: Vec3, max_slope_radians: f32) -> Self {
        Self {
            velocity,
            up: Vec3::Y,
            stop_on_slope: false,
            max_bounces: SLIDE_MAX_BOUNCES,
            max_slope_radians,
        }
    }
}

/// Result of one slide-move call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideOutcome {
    /// Velocity after sliding along every surface touched.
    pub velocity: Vec3,
    /// Body position after the move.
    pub position: Vec3,
    /// Whether a walkable surface was touched.
    pub on_floor: bool,
}

/// Collision-aware movement primitive.
pub trait SlideMover: Send + Sync {
    /// Move a body at `position` by `request.velocity * dt`, sliding along
    /// obstacles, and report where it ended up.
    fn slide_move(&self, position: Vec3, dt: f32, request: &SlideRequest) -> SlideOutcome;
}

/// Resource holding the active collision collaborator.
#[derive(Resource)]
pub struct CollisionWorld(pub Box<dyn SlideMover>);

impl CollisionWorld {
    pub fn new(mover: impl SlideMover + 'static) -> Self {
        Self(Box::new(mover))
    }

    pub fn slide_move(&self, position: Vec3, dt: f32, request: &SlideRequest) -> SlideOutcome {
        self.0.slide_move(position, dt, request)
    }
}

/// Mover with no obstacles: integrates position and never reports a floor.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenSpace;

impl SlideMover for OpenSpace {
    fn slide_move(&self, position: Vec3, dt: f32, request: &SlideRequest) -> SlideOutcome {
        SlideOutcome {
            velocity: request.velocity,
            position: position + request.velocity * dt,
            on_floor: false,
        }
    }
}
