//! Pointer capture toggle event and observer.
//!
//! The input sampler triggers [`ToggleCursorEvent`] on the tick the toggle
//! action goes down. [`toggle_cursor_observer`] flips the
//! [`CursorMode`] resource and announces the result with
//! [`CursorModeChanged`], which the host observes to show or hide the OS
//! pointer.

use crate::resources::cursormode::CursorMode;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

/// Event requesting the pointer capture mode be flipped.
#[derive(Event, Debug, Clone, Copy)]
pub struct ToggleCursorEvent {}

/// Event announcing the capture mode now in effect.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorModeChanged {
    pub mode: CursorMode,
}

/// Observer that flips [`CursorMode`] when [`ToggleCursorEvent`] fires.
///
/// A missing resource is treated as the default (captured) mode, so the
/// first toggle frees the pointer.
pub fn toggle_cursor_observer(
    _trigger: On<ToggleCursorEvent>,
    mode: Option<ResMut<CursorMode>>,
    mut commands: Commands,
) {
    let next = match mode {
        Some(mut mode) => {
            *mode = mode.toggled();
            *mode
        }
        None => {
            let next = CursorMode::default().toggled();
            commands.insert_resource(next);
            next
        }
    };
    info!("Cursor mode switched to {:?}", next);
    commands.trigger(CursorModeChanged { mode: next });
}
