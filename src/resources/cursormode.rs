//! Process-wide pointer capture mode.
//!
//! Only one controller is expected to be active, so capture is a single
//! resource rather than per-entity state. The host applies the mode to the OS
//! pointer when it observes
//! [`CursorModeChanged`](crate::events::cursormode::CursorModeChanged).

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

/// Whether the pointer is captured for mouse-look or free and visible.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorMode {
    /// Pointer hidden and locked; motion drives the look controller.
    #[default]
    Captured,
    /// Pointer shown; motion is ignored by the controller.
    Visible,
}

impl CursorMode {
    /// The opposite mode.
    pub fn toggled(self) -> Self {
        match self {
            CursorMode::Captured => CursorMode::Visible,
            CursorMode::Visible => CursorMode::Captured,
        }
    }

    pub fn is_captured(self) -> bool {
        self == CursorMode::Captured
    }
}
