//! First-person velocity integrator.
//!
//! Turns each controller's [`MoveIntent`] into a new velocity and hands it to
//! the [`CollisionWorld`] slide-move collaborator:
//!
//! 1. flatten the desired direction onto the horizontal plane
//! 2. add gravity to the vertical velocity (always, grounded or not)
//! 3. pick the accel or deaccel rate and move horizontal velocity toward
//!    `direction * max_speed` by `rate * dt` of the remaining gap
//! 4. slide-move, keeping the returned velocity, position and floor flag
//!
//! Steps 1–3 are the pure [`tick`] function.
use bevy_ecs::prelude::*;
use glam::Vec3;
use log::debug;

use crate::components::characterbody::CharacterBody;
use crate::components::fpscontroller::{ControllerTuning, FpsController, MoveIntent};
use crate::components::transform3d::Transform3d;
use crate::resources::collision::{CollisionWorld, OpenSpace, SlideMover, SlideRequest};
use crate::resources::worldtime::WorldTime;

/// Remove the vertical part of `direction` and renormalize (zero stays zero).
pub fn flatten_direction(direction: Vec3) -> Vec3 {
    Vec3::new(direction.x, 0.0, direction.z).normalize_or_zero()
}

/// Add one tick of gravity to the vertical component.
pub fn apply_gravity(velocity: Vec3, gravity: f32, dt: f32) -> Vec3 {
    Vec3::new(velocity.x, velocity.y + dt * gravity, velocity.z)
}

/// Interpolation rate for this tick.
///
/// Pushing along the current horizontal motion, or starting from rest, uses
/// `accel`. Anything else (releasing the keys, reversing, turning 90° or more)
/// uses `deaccel`.
pub fn choose_rate(direction: Vec3, horizontal: Vec3, tuning: &ControllerTuning) -> f32 {
    let starting = horizontal == Vec3::ZERO && direction != Vec3::ZERO;
    if starting || direction.dot(horizontal) > 0.0 {
        tuning.accel
    } else {
        tuning.deaccel
    }
}

/// Linear interpolation from `horizontal` toward `target` by `rate * dt`,
/// with the fraction clamped to `[0, 1]` so a large step lands on the target
/// instead of overshooting it.
pub fn integrate_horizontal(horizontal: Vec3, target: Vec3, rate: f32, dt: f32) -> Vec3 {
    horizontal.lerp(target, (rate * dt).clamp(0.0, 1.0))
}

/// Pre-collision velocity for one tick.
///
/// `direction` is the sampler's world-space direction; it is flattened here.
/// The returned vertical component is `velocity.y + dt * gravity`; the
/// horizontal components are the interpolation result.
pub fn tick(velocity: Vec3, direction: Vec3, tuning: &ControllerTuning, dt: f32) -> Vec3 {
    let direction = flatten_direction(direction);
    let velocity = apply_gravity(velocity, tuning.gravity, dt);

    let horizontal = Vec3::new(velocity.x, 0.0, velocity.z);
    let target = direction * tuning.max_speed;
    let rate = choose_rate(direction, horizontal, tuning);
    let horizontal = integrate_horizontal(horizontal, target, rate, dt);

    Vec3::new(horizontal.x, velocity.y, horizontal.z)
}

/// Integrate every controller and resolve its move through the collision
/// collaborator.
///
/// Controllers are expected to be hierarchy roots: the slide-move position is
/// written straight into their local [`Transform3d`]. Without a
/// [`CollisionWorld`] resource the body moves through open space.
pub fn integrate_fps_velocity(
    time: Res<WorldTime>,
    collision: Option<Res<CollisionWorld>>,
    mut query: Query<(
        Entity,
        &FpsController,
        &MoveIntent,
        &mut CharacterBody,
        &mut Transform3d,
    )>,
) {
    let dt = time.delta;
    if dt <= 0.0 {
        return;
    }

    for (entity, controller, intent, mut body, mut transform) in query.iter_mut() {
        let tuning = &controller.tuning;
        let velocity = tick(body.velocity, intent.direction, tuning, dt);
        let request = SlideRequest::new(velocity, tuning.max_slope_radians());

        let outcome = match collision.as_deref() {
            Some(world) => world.slide_move(transform.translation, dt, &request),
            None => OpenSpace.slide_move(transform.translation, dt, &request),
        };

        body.velocity = outcome.velocity;
        body.on_floor = outcome.on_floor;
        transform.translation = outcome.position;

        debug!(
            "{:?}: pos={:?} vel={:?} on_floor={}",
            entity, outcome.position, outcome.velocity, outcome.on_floor
        );
    }
}
