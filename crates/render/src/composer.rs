use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use cubescene_math::{MathError, Matrix, Vector3};
use cubescene_scene::{Mesh, Node, NodeId, Scene};

use crate::{RenderConfig, Viewport};

/// Errors that abort composition of a single frame.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("viewport {width}x0 has no aspect ratio (division by zero)")]
    ZeroHeightViewport { width: u32 },
    #[error("camera node {0} not found in scene")]
    CameraNotFound(NodeId),
    #[error(transparent)]
    Math(#[from] MathError),
}

/// Everything the graphics backend needs to draw one renderable node.
#[derive(Debug, Clone)]
pub struct DrawCall {
    pub node: NodeId,
    /// `projection · view · model`, column-major.
    pub model_view_projection: [f32; 16],
    /// `view · model`, column-major.
    pub model_view: [f32; 16],
    pub mesh: Arc<Mesh>,
}

impl DrawCall {
    pub fn uniforms(&self) -> DrawUniforms {
        DrawUniforms {
            model_view_projection: bytemuck::cast(self.model_view_projection),
            model_view: bytemuck::cast(self.model_view),
        }
    }
}

/// Per-draw uniform block laid out for direct GPU upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct DrawUniforms {
    pub model_view_projection: [[f32; 4]; 4],
    pub model_view: [[f32; 4]; 4],
}

impl DrawUniforms {
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// A composed frame: camera matrices plus ordered draw calls.
#[derive(Debug, Clone)]
pub struct Frame {
    pub view: Matrix,
    pub projection: Matrix,
    pub draws: Vec<DrawCall>,
    /// Seconds of loop time at submission, for time-driven shaders. Zero
    /// from [`FrameComposer::compose`]; stamped by `compose_or_reuse`.
    pub time: f64,
}

/// Per-frame counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComposerStats {
    pub frames_composed: u64,
    pub frames_skipped: u64,
}

/// Builds frames from a camera node and a scene.
///
/// A frame that fails to compose is skipped: the error is logged and the
/// previous frame stays current.
#[derive(Debug, Default)]
pub struct FrameComposer {
    config: RenderConfig,
    last_frame: Option<Frame>,
    stats: ComposerStats,
}

impl FrameComposer {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            last_frame: None,
            stats: ComposerStats::default(),
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn stats(&self) -> ComposerStats {
        self.stats
    }

    /// Most recent successfully composed frame.
    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }

    /// Compose one frame. Pure: does not touch the skip-frame state.
    pub fn compose(&self, viewport: Viewport, camera: &Node, scene: &Scene) -> Result<Frame, RenderError> {
        let _span = tracing::debug_span!("compose_frame", nodes = scene.len()).entered();

        let aspect = viewport.aspect()?;
        let target = camera.position.add(camera.forward());
        let view = Matrix::look_at(camera.position, target, Vector3::up())?;
        let projection = self.config.projection(aspect)?;

        let mut draws = Vec::with_capacity(scene.renderable_count());
        for unit in scene.draw_units() {
            let model_view = view.multiply(&unit.model)?;
            let mvp = projection.multiply(&model_view)?;
            draws.push(DrawCall {
                node: unit.node,
                model_view_projection: mvp.to_cols_array()?,
                model_view: model_view.to_cols_array()?,
                mesh: Arc::clone(unit.mesh),
            });
        }

        tracing::trace!(draws = draws.len(), aspect, "frame composed");
        Ok(Frame {
            view,
            projection,
            draws,
            time: 0.0,
        })
    }

    /// Look the camera up in `scene` and compose.
    pub fn compose_scene(&self, viewport: Viewport, camera: NodeId, scene: &Scene) -> Result<Frame, RenderError> {
        let camera = scene.node(camera).ok_or(RenderError::CameraNotFound(camera))?;
        self.compose(viewport, camera, scene)
    }

    /// Compose and remember the frame; on failure log and fall back to the
    /// previous frame. Either way the returned frame carries `time`.
    /// Returns `None` only if no frame has ever succeeded.
    pub fn compose_or_reuse(
        &mut self,
        viewport: Viewport,
        camera: NodeId,
        scene: &Scene,
        time: f64,
    ) -> Option<&Frame> {
        match self.compose_scene(viewport, camera, scene) {
            Ok(frame) => {
                self.stats.frames_composed += 1;
                self.last_frame = Some(frame);
            }
            Err(e) => {
                self.stats.frames_skipped += 1;
                tracing::warn!(error = %e, reused = self.last_frame.is_some(), "frame skipped");
            }
        }
        let frame = self.last_frame.as_mut()?;
        frame.time = time;
        Some(&*frame)
    }
}
