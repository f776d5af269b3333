//! Runtime: configuration, the render context, and the cooperative frame
//! loop that drives fixed-rate input integration and per-frame rendering.
//!
//! # Invariants
//! - Both scheduled tasks run on one thread inside `FrameLoop::advance`.
//! - Fixed updates run at a constant rate, decoupled from the frame rate.
//! - A frame that fails to compose never stops the loop.
//! - The loop stops only through its `ShutdownHandle` or when the clock ends.

mod config;
mod context;
mod frame_loop;
mod timing;

pub use config::{ConfigError, EngineConfig};
pub use context::RenderContext;
pub use frame_loop::{FrameLoop, FrameReport, ShutdownHandle};
pub use timing::{FixedTimestep, FrameTimer};

pub fn crate_info() -> &'static str {
    "cubescene-runtime v0.1.0"
}

/// Evenly spaced frame timestamps starting at zero, for headless runs.
pub fn synthetic_clock(frames: usize, frame_rate: f64) -> impl Iterator<Item = f64> {
    (0..frames).map(move |i| i as f64 / frame_rate)
}
