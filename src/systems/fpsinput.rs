//! First-person input sampler.
//!
//! Reads the shared [`InputState`](crate::resources::input::InputState) once
//! per fixed tick and, for every [`FpsController`]:
//! - projects the WASD vector onto the camera basis and stores it in
//!   [`MoveIntent`]
//! - sets the vertical velocity to the jump speed when jump is held and the
//!   body is grounded
//!
//! The capture toggle is process-wide: its press edge triggers a single
//! [`ToggleCursorEvent`] regardless of how many controllers exist.
use bevy_ecs::hierarchy::Children;
use bevy_ecs::prelude::*;
use glam::{Mat3, Vec2, Vec3};

use crate::components::characterbody::CharacterBody;
use crate::components::fpscontroller::{FpsController, LookPitch, MoveIntent};
use crate::components::globaltransform3d::GlobalTransform3d;
use crate::events::cursormode::ToggleCursorEvent;
use crate::resources::input::{InputAction, InputState};

/// Map a raw 2D input vector onto the camera's horizontal basis.
///
/// The input is normalized first (a zero vector stays zero). `y` follows the
/// camera's forward axis, which is `-Z` of the basis, and `x` follows its
/// right axis. The result is not flattened; pitch can give it a vertical
/// component that the integrator removes.
pub fn project_on_camera(input: Vec2, camera_basis: Mat3) -> Vec3 {
    let input = input.normalize_or_zero();
    -camera_basis.z_axis * input.y + camera_basis.x_axis * input.x
}

/// Jump impulse: replaces vertical velocity with `jump_speed` when `jump` is
/// held and the body is grounded, otherwise leaves it untouched.
pub fn apply_jump(velocity: Vec3, jump: bool, grounded: bool, jump_speed: f32) -> Vec3 {
    if jump && grounded {
        Vec3::new(velocity.x, jump_speed, velocity.z)
    } else {
        velocity
    }
}

/// Sample input into each controller's [`MoveIntent`] and apply jumps.
///
/// The camera basis is the global rotation of the controller's [`LookPitch`]
/// child; controllers without one fall back to their own global rotation, then
/// to identity.
pub fn sample_fps_input(
    input: Res<InputState>,
    mut controllers: Query<(
        &FpsController,
        &mut CharacterBody,
        &mut MoveIntent,
        Option<&GlobalTransform3d>,
        Option<&Children>,
    )>,
    looks: Query<&GlobalTransform3d, With<LookPitch>>,
    mut commands: Commands,
) {
    let raw = input.movement_vector();
    let jump = input.is_pressed(InputAction::Jump);

    for (controller, mut body, mut intent, global, children) in controllers.iter_mut() {
        let mut camera_basis = global.map(|g| g.basis()).unwrap_or(Mat3::IDENTITY);
        if let Some(children) = children {
            for child in children.iter() {
                if let Ok(look) = looks.get(child) {
                    camera_basis = look.basis();
                    break;
                }
            }
        }

        intent.direction = project_on_camera(raw, camera_basis);
        intent.jump = jump;

        let grounded = body.is_grounded();
        body.velocity = apply_jump(body.velocity, jump, grounded, controller.tuning.jump_speed);
    }

    if input.is_just_pressed(InputAction::ToggleCursor) {
        commands.trigger(ToggleCursorEvent {});
    }
}
