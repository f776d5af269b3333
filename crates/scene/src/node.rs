use std::f32::consts::FRAC_PI_2;
use std::fmt;
use std::sync::Arc;

use cubescene_math::{MathError, Matrix, Vector3};

use crate::Mesh;

/// Position of a node in its scene. Stable for the life of the scene since
/// nodes are never removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A positioned object in the scene.
///
/// Every node is spatial. A node with a mesh is drawn; a node without one
/// (the player/camera) only contributes its pose.
///
/// `rotation` holds Euler angles in radians: `x` is pitch, `z` is yaw and
/// `y` is not used.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub position: Vector3,
    pub rotation: Vector3,
    mesh: Option<Arc<Mesh>>,
}

impl Node {
    /// A node that has a pose but is never drawn.
    pub fn spatial(name: impl Into<String>, position: Vector3, rotation: Vector3) -> Self {
        Self {
            name: name.into(),
            position,
            rotation,
            mesh: None,
        }
    }

    pub fn renderable(
        name: impl Into<String>,
        position: Vector3,
        rotation: Vector3,
        mesh: Arc<Mesh>,
    ) -> Self {
        Self {
            mesh: Some(mesh),
            ..Self::spatial(name, position, rotation)
        }
    }

    /// The controllable camera/avatar. It carries no mesh and is not drawn.
    pub fn player(position: Vector3, rotation: Vector3) -> Self {
        Self::spatial("player", position, rotation)
    }

    /// Orient the node so that [`Node::forward`] points at `target`.
    pub fn looking_at(mut self, target: Vector3) -> Result<Self, MathError> {
        let d = target.subtract(self.position).normalize()?;
        let pitch = d.y.clamp(-1.0, 1.0).asin();
        let yaw = d.x.atan2(d.z);
        self.rotation = Vector3::new(pitch, 0.0, yaw);
        Ok(self)
    }

    pub fn mesh(&self) -> Option<&Arc<Mesh>> {
        self.mesh.as_ref()
    }

    pub fn is_renderable(&self) -> bool {
        self.mesh.is_some()
    }

    pub fn pitch(&self) -> f32 {
        self.rotation.x
    }

    pub fn yaw(&self) -> f32 {
        self.rotation.z
    }

    /// View direction derived from pitch and yaw.
    pub fn forward(&self) -> Vector3 {
        let (pitch, yaw) = (self.pitch(), self.yaw());
        Vector3::new(
            pitch.cos() * yaw.sin(),
            pitch.sin(),
            pitch.cos() * (-yaw).cos(),
        )
    }

    /// Horizontal strafe direction; ignores pitch.
    pub fn right(&self) -> Vector3 {
        let yaw = self.yaw();
        Vector3::new((yaw - FRAC_PI_2).sin(), 0.0, (yaw - FRAC_PI_2).cos())
    }

    pub fn translate(&mut self, delta: Vector3) {
        self.position.add_to(delta);
    }

    pub fn rotate(&mut self, d_pitch: f32, d_yaw: f32) {
        self.rotation.x += d_pitch;
        self.rotation.z += d_yaw;
    }

    /// Object-to-world transform. Meshes are placed by translation only.
    pub fn model_matrix(&self) -> Matrix {
        Matrix::translation(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_vec(a: Vector3, b: Vector3) -> bool {
        (a - b).magnitude() < 1e-5
    }

    #[test]
    fn zero_rotation_faces_positive_z() {
        let n = Node::player(Vector3::empty(), Vector3::empty());
        assert!(approx_vec(n.forward(), Vector3::new(0.0, 0.0, 1.0)));
        assert!(approx_vec(n.right(), Vector3::new(-1.0, 0.0, 0.0)));
    }

    #[test]
    fn forward_is_unit_and_right_is_horizontal() {
        for (pitch, yaw) in [(0.3, 1.2), (-0.8, -2.5), (1.2, 0.0), (0.0, 3.0)] {
            let n = Node::player(Vector3::empty(), Vector3::new(pitch, 0.0, yaw));
            assert!((n.forward().magnitude() - 1.0).abs() < 1e-5);
            assert_eq!(n.right().y, 0.0);
            assert!((n.right().magnitude() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn rotation_y_is_ignored() {
        let a = Node::player(Vector3::empty(), Vector3::new(0.2, 0.0, 0.7));
        let b = Node::player(Vector3::empty(), Vector3::new(0.2, 5.0, 0.7));
        assert_eq!(a.forward(), b.forward());
        assert_eq!(a.right(), b.right());
    }

    #[test]
    fn directions_follow_rotation_changes() {
        let mut n = Node::player(Vector3::empty(), Vector3::empty());
        let before = n.forward();
        n.rotate(0.0, FRAC_PI_2);
        assert!(approx_vec(n.forward(), Vector3::new(1.0, 0.0, 0.0)));
        assert_ne!(before, n.forward());
    }

    #[test]
    fn looking_at_points_forward_at_target() {
        let target = Vector3::empty();
        let n = Node::player(Vector3::new(4.0, 3.0, -3.0), Vector3::empty())
            .looking_at(target)
            .unwrap();
        let expected = target.subtract(n.position).normalize().unwrap();
        assert!(approx_vec(n.forward(), expected), "{:?}", n.forward());
    }

    #[test]
    fn looking_at_self_is_degenerate() {
        let p = Vector3::new(1.0, 1.0, 1.0);
        assert!(Node::player(p, Vector3::empty()).looking_at(p).is_err());
    }

    #[test]
    fn player_is_not_renderable() {
        let player = Node::player(Vector3::empty(), Vector3::empty());
        assert!(!player.is_renderable());
        let cube = Node::renderable(
            "cube",
            Vector3::empty(),
            Vector3::empty(),
            Arc::new(Mesh::cube()),
        );
        assert!(cube.is_renderable());
    }

    #[test]
    fn model_matrix_is_translation_only() {
        let n = Node::renderable(
            "cube",
            Vector3::new(2.0, 0.0, -1.0),
            Vector3::new(0.5, 0.0, 0.5),
            Arc::new(Mesh::cube()),
        );
        assert_eq!(n.model_matrix(), Matrix::translation(Vector3::new(2.0, 0.0, -1.0)));
    }
}
