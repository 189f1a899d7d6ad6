//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the world. Components hold the per-controller data the systems read and
//! write each tick.
//!
//! Submodules overview:
//! - [`characterbody`] – kinematic body state: velocity and floor contact
//! - [`fpscontroller`] – controller tuning, per-tick move intent, and the pitch pivot marker
//! - [`globaltransform3d`] – computed world-space pose for hierarchy members
//! - [`transform3d`] – local translation and rotation

pub mod characterbody;
pub mod fpscontroller;
pub mod globaltransform3d;
pub mod transform3d;
