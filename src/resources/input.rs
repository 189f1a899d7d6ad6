//! Per-tick action input resource.
//!
//! Captures the held state of the actions the controller cares about and
//! derives press/release edges from consecutive updates. The host writes raw
//! device state through [`InputState::set`] once per fixed tick, before the
//! schedule runs; systems read it via the [`InputState`] resource.
use bevy_ecs::prelude::*;
use glam::Vec2;

/// Logical actions read by the first-person controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Walk forward (default: W).
    Forward,
    /// Walk backward (default: S).
    Backward,
    /// Strafe left (default: A).
    Left,
    /// Strafe right (default: D).
    Right,
    /// Jump while grounded (default: Space).
    Jump,
    /// Capture or release the pointer (default: Escape).
    ToggleCursor,
}

impl InputAction {
    pub const ALL: [InputAction; 6] = [
        InputAction::Forward,
        InputAction::Backward,
        InputAction::Left,
        InputAction::Right,
        InputAction::Jump,
        InputAction::ToggleCursor,
    ];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Boolean action state with derived edges.
pub struct BoolState {
    /// Whether the action is currently held this tick.
    pub active: bool,
    /// Whether the action went down this tick.
    pub just_pressed: bool,
    /// Whether the action went up this tick.
    pub just_released: bool,
}

impl BoolState {
    /// Record this tick's held state and derive the edges from the previous one.
    pub fn update(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.just_released = !down && self.active;
        self.active = down;
    }
}

/// Resource capturing the per-tick state of controller actions.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    pub forward: BoolState,
    pub backward: BoolState,
    pub left: BoolState,
    pub right: BoolState,
    pub jump: BoolState,
    pub toggle_cursor: BoolState,
}

impl InputState {
    pub fn action(&self, action: InputAction) -> &BoolState {
        match action {
            InputAction::Forward => &self.forward,
            InputAction::Backward => &self.backward,
            InputAction::Left => &self.left,
            InputAction::Right => &self.right,
            InputAction::Jump => &self.jump,
            InputAction::ToggleCursor => &self.toggle_cursor,
        }
    }

    fn action_mut(&mut self, action: InputAction) -> &mut BoolState {
        match action {
            InputAction::Forward => &mut self.forward,
            InputAction::Backward => &mut self.backward,
            InputAction::Left => &mut self.left,
            InputAction::Right => &mut self.right,
            InputAction::Jump => &mut self.jump,
            InputAction::ToggleCursor => &mut self.toggle_cursor,
        }
    }

    /// Write the held state of one action for this tick.
    pub fn set(&mut self, action: InputAction, down: bool) {
        self.action_mut(action).update(down);
    }

    /// Held-state query.
    pub fn is_pressed(&self, action: InputAction) -> bool {
        self.action(action).active
    }

    /// Edge query: true only on the tick the action went down.
    pub fn is_just_pressed(&self, action: InputAction) -> bool {
        self.action(action).just_pressed
    }

    /// Combine the four directional actions into a raw 2D vector.
    ///
    /// `x` is right minus left, `y` is forward minus backward. The result is
    /// not normalized.
    pub fn movement_vector(&self) -> Vec2 {
        let mut v = Vec2::ZERO;
        if self.forward.active {
            v.y += 1.0;
        }
        if self.backward.active {
            v.y -= 1.0;
        }
        if self.left.active {
            v.x -= 1.0;
        }
        if self.right.active {
            v.x += 1.0;
        }
        v
    }
}
