//! Scene graph: shared meshes, spatial nodes, and the ordered traversal that
//! turns renderable nodes into draw units.
//!
//! # Invariants
//! - Meshes are validated at construction and never mutated afterwards.
//! - Scene order is insertion order; nodes are never removed.
//! - Only nodes that carry a mesh produce draw units.

mod mesh;
mod node;
mod scene;

pub use mesh::{Mesh, MeshError};
pub use node::{Node, NodeId};
pub use scene::{DrawUnit, DrawUnits, Scene};

pub fn crate_info() -> &'static str {
    "cubescene-scene v0.1.0"
}
