use std::fmt::Write as _;

use crate::Frame;

/// Shader compile/link outcome reported by a backend.
///
/// Only used for diagnostics; it never changes control flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderStatus {
    pub ok: bool,
    pub log: String,
}

impl ShaderStatus {
    pub fn ok() -> Self {
        Self {
            ok: true,
            log: String::new(),
        }
    }

    pub fn failed(log: impl Into<String>) -> Self {
        Self {
            ok: false,
            log: log.into(),
        }
    }

    /// Log the status for the named shader program.
    pub fn report(&self, program: &str) {
        if self.ok {
            tracing::debug!(program, "shader program ready");
        } else {
            tracing::error!(program, log = %self.log, "shader program failed to compile or link");
        }
    }
}

/// Graphics backend interface. All backends implement this trait.
///
/// The backend receives fully composed frames and issues the draw calls.
/// It never sees or mutates the scene.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Submit one composed frame.
    fn render(&mut self, frame: &Frame) -> Self::Output;

    /// Status of the backend's shader program.
    fn shader_status(&self) -> ShaderStatus {
        ShaderStatus::ok()
    }
}

/// Text backend that dumps each frame in a human-readable form.
///
/// Useful for CLI output, logging, and testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    frames: u64,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, frame: &Frame) -> String {
        self.frames += 1;
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Frame {} (draws={}, time={:.3}s) ===",
            self.frames,
            frame.draws.len(),
            frame.time
        );
        let _ = write!(out, "View:\n{}", frame.view);
        let _ = write!(out, "Projection:\n{}", frame.projection);
        for draw in &frame.draws {
            let m = &draw.model_view_projection;
            let _ = writeln!(
                out,
                "  [{}] vertices={} triangles={} mvp.translation=({:.3}, {:.3}, {:.3}, {:.3})",
                draw.node,
                draw.mesh.vertex_count(),
                draw.mesh.triangle_count(),
                m[12],
                m[13],
                m[14],
                m[15]
            );
        }
        out
    }
}
