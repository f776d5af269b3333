//! Frame composition and the renderer-agnostic backend interface.
//!
//! # Invariants
//! - The renderer never mutates the scene; frames derive from scene + camera.
//! - `mvp = projection · view · model` for every draw call.
//! - A frame that fails to compose is skipped and the previous frame is kept.
//!
//! Graphics API binding (shader compilation, buffer upload, draw issuance)
//! lives behind the [`Renderer`] trait. [`DebugTextRenderer`] is the built-in
//! implementation used by the CLI and tests.

mod composer;
mod config;
mod renderer;

pub use composer::{ComposerStats, DrawCall, DrawUniforms, Frame, FrameComposer, RenderError};
pub use config::{RenderConfig, Viewport};
pub use renderer::{DebugTextRenderer, Renderer, ShaderStatus};

pub fn crate_info() -> &'static str {
    "cubescene-render v0.1.0"
}
