//! Raw pointer motion event and the mouse-look observer.
//!
//! The host triggers one [`PointerMotion`] per motion sample it receives.
//! While the pointer is captured, [`mouse_look_observer`] turns the
//! controller body about world up (yaw) and its [`LookPitch`] child about its
//! local X axis (pitch), keeping pitch within
//! [`PITCH_LIMIT_DEGREES`].
//!
//! Yaw and pitch live on separate entities so tilting the view never tilts
//! the body the movement code reads its heading from.

use bevy_ecs::hierarchy::Children;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use glam::{Quat, Vec3};

use crate::components::fpscontroller::{FpsController, LookPitch, PITCH_LIMIT_DEGREES};
use crate::components::transform3d::Transform3d;
use crate::resources::cursormode::CursorMode;

/// Relative pointer movement in device units.
///
/// Positive `dx` moves right, positive `dy` moves down, as most windowing
/// backends report it.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PointerMotion {
    pub dx: f32,
    pub dy: f32,
}

/// Apply one motion sample to a yaw rotation and a pitch angle.
///
/// Yaw turns by `-dx * sensitivity` degrees about world up; pitch changes by
/// `-dy * sensitivity` degrees and is then clamped to
/// `[-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES]`. Returns the new yaw rotation
/// and pitch in degrees.
pub fn apply_mouse_look(
    yaw: Quat,
    pitch_degrees: f32,
    dx: f32,
    dy: f32,
    sensitivity: f32,
) -> (Quat, f32) {
    let yaw = (Quat::from_axis_angle(Vec3::Y, (-dx * sensitivity).to_radians()) * yaw).normalize();
    let pitch = (pitch_degrees - dy * sensitivity).clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES);
    (yaw, pitch)
}

/// Observer that applies [`PointerMotion`] to every first-person controller.
///
/// Motion is ignored unless [`CursorMode`] is captured (a missing resource
/// counts as captured).
pub fn mouse_look_observer(
    trigger: On<PointerMotion>,
    cursor: Option<Res<CursorMode>>,
    mut bodies: Query<(&FpsController, &mut Transform3d, Option<&Children>), Without<LookPitch>>,
    mut looks: Query<&mut Transform3d, (With<LookPitch>, Without<FpsController>)>,
) {
    let captured = cursor.map(|c| c.is_captured()).unwrap_or(true);
    if !captured {
        return;
    }
    let motion = *trigger.event();

    for (controller, mut body, children) in bodies.iter_mut() {
        let sensitivity = controller.tuning.mouse_sensitivity;

        let mut look_entity = None;
        if let Some(children) = children {
            for child in children.iter() {
                if looks.contains(child) {
                    look_entity = Some(child);
                    break;
                }
            }
        }

        let pitch_degrees = look_entity
            .and_then(|e| looks.get(e).ok())
            .map(|t| t.rotation_degrees().x)
            .unwrap_or(0.0);

        let (yaw, pitch) =
            apply_mouse_look(body.rotation, pitch_degrees, motion.dx, motion.dy, sensitivity);
        body.rotation = yaw;

        if let Some(Ok(mut look)) = look_entity.map(|e| looks.get_mut(e)) {
            let mut degrees = look.rotation_degrees();
            degrees.x = pitch;
            look.set_rotation_degrees(degrees);
        }
    }
}
