//! VCURSOR core.
//!
//! Drives an on-screen pointer from a gamepad analog stick. Each local user
//! gets one [`AnalogCursor`] that classifies incoming input, integrates
//! stick acceleration into velocity with drag, clamps the result to the
//! user's viewport, and pushes it back to the host's own cursor. The
//! [`CursorManager`] owns the per-user cursors and their registration with
//! the host input pipeline.

// Re-exports from vcursor-types (foundation types).
pub use vcursor_types::config;
pub use vcursor_types::curve;
pub use vcursor_types::error;
pub use vcursor_types::input;
pub use vcursor_types::math;

pub use vcursor_platform as platform;

pub mod clamp;
pub mod classifier;
pub mod cursor;
pub mod hover;
pub mod manager;
pub mod motion;
pub mod processor;

pub use cursor::{AnalogCursor, CursorSnapshot};
pub use manager::{CursorLifecycle, CursorManager};
pub use processor::{EventDisposition, InputProcessor};

#[cfg(test)]
mod test_utils;
