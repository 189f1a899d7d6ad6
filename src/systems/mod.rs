//! Controller systems.
//!
//! This module groups the ECS systems that advance the simulation one fixed
//! tick at a time.
//!
//! Submodules overview
//! - [`fpsinput`] – project input onto the camera and apply jumps
//! - [`fpsmovement`] – gravity, acceleration, and the slide-move hand-off
//! - [`propagate_transforms`] – compose local transforms into world space
//! - [`time`] – update simulation time and delta

pub mod fpsinput;
pub mod fpsmovement;
pub mod propagate_transforms;
pub mod time;
