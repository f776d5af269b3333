//! Input: events from the windowing layer and the fixed-update controller
//! that turns them into player motion.
//!
//! # Invariants
//! - The core consumes [`InputEvent`]s, never raw device state.
//! - Player motion is applied only inside [`PlayerController::fixed_update`].

mod controller;
mod event;

pub use controller::{ControlConfig, InputState, PlayerController};
pub use event::{Axis, InputEvent};

/// Errors from input handling.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("axis value {0} is not one of -1, 0, 1")]
    InvalidAxis(i8),
    #[error("non-finite look delta ({d_pitch}, {d_yaw})")]
    NonFiniteDelta { d_pitch: f32, d_yaw: f32 },
    #[error("invalid control config: {0}")]
    InvalidControl(String),
}

pub fn crate_info() -> &'static str {
    "cubescene-input v0.1.0"
}
