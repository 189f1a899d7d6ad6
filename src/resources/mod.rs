//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution. Each submodule documents the
//! semantics and intended usage of its resource(s).
//!
//! Overview
//! - `collision` – slide-move request/outcome types and the collaborator seam
//! - `cursormode` – whether the pointer is captured for mouse-look
//! - `gameconfig` – INI-backed tuning, window, and tick-rate settings
//! - `input` – per-tick held state and edges of the controller's actions
//! - `staticlevel` – sphere-vs-static-geometry slide mover for the demo
//! - `worldtime` – simulation time, delta, and the fixed-step accumulator
pub mod collision;
pub mod cursormode;
pub mod gameconfig;
pub mod input;
pub mod staticlevel;
pub mod worldtime;
