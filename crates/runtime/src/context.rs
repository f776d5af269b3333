use std::sync::Arc;

use cubescene_input::InputState;
use cubescene_math::{MathError, Vector3};
use cubescene_render::{RenderError, Viewport};
use cubescene_scene::{Mesh, Node, NodeId, Scene};

/// Everything the frame loop reads and mutates: the scene, which node is the
/// camera, the current viewport, and input waiting for the next fixed update.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub scene: Scene,
    pub viewport: Viewport,
    pub input: InputState,
    camera: NodeId,
}

impl RenderContext {
    /// Fails if `camera` does not name a node in `scene`.
    pub fn new(scene: Scene, camera: NodeId, viewport: Viewport) -> Result<Self, RenderError> {
        if scene.node(camera).is_none() {
            return Err(RenderError::CameraNotFound(camera));
        }
        Ok(Self {
            scene,
            viewport,
            input: InputState::new(),
            camera,
        })
    }

    /// One cube at the origin, viewed by the player from `(4, 3, -3)`.
    pub fn demo(viewport: Viewport) -> Result<Self, MathError> {
        let mut scene = Scene::new();
        scene.add_node(Node::renderable(
            "cube",
            Vector3::empty(),
            Vector3::empty(),
            Arc::new(Mesh::cube()),
        ));
        let player = Node::player(Vector3::new(4.0, 3.0, -3.0), Vector3::empty()).looking_at(Vector3::empty())?;
        let camera = scene.add_node(player);
        Ok(Self {
            scene,
            viewport,
            input: InputState::new(),
            camera,
        })
    }

    pub fn camera(&self) -> NodeId {
        self.camera
    }

    pub fn player(&self) -> Option<&Node> {
        self.scene.node(self.camera)
    }

    pub fn player_mut(&mut self) -> Option<&mut Node> {
        self.scene.node_mut(self.camera)
    }
}
