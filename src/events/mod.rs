//! Event types and observers used by the controller.
//!
//! Events decouple the host from the simulation: the host pushes pointer
//! motion in and learns about cursor capture changes out, without reaching
//! into the systems.
//!
//! Submodules:
//! - [`cursormode`] – pointer capture toggle and change notification
//! - [`pointermotion`] – raw pointer motion and the mouse-look observer
pub mod cursormode;
pub mod pointermotion;
