use std::sync::Arc;

use cubescene_math::Matrix;

use crate::{Mesh, Node, NodeId};

/// One renderable node's contribution to a frame, before camera transforms.
#[derive(Debug, Clone)]
pub struct DrawUnit<'a> {
    pub node: NodeId,
    pub model: Matrix,
    pub mesh: &'a Arc<Mesh>,
}

/// Ordered collection of nodes.
///
/// Insertion order is traversal order. Nodes are only ever appended, so a
/// [`NodeId`] stays valid for the life of the scene.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: Vec<Node>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node and return its id.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        tracing::debug!(%id, name = %node.name, renderable = node.is_renderable(), "node added");
        self.nodes.push(node);
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Lazily yield one [`DrawUnit`] per node that has a mesh, in insertion
    /// order. Call again (or clone the iterator) to restart.
    pub fn draw_units(&self) -> DrawUnits<'_> {
        DrawUnits {
            nodes: self.nodes.iter().enumerate(),
        }
    }

    pub fn renderable_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_renderable()).count()
    }
}

/// Iterator returned by [`Scene::draw_units`].
#[derive(Debug, Clone)]
pub struct DrawUnits<'a> {
    nodes: std::iter::Enumerate<std::slice::Iter<'a, Node>>,
}

impl<'a> Iterator for DrawUnits<'a> {
    type Item = DrawUnit<'a>;

    fn next(&mut self) -> Option<DrawUnit<'a>> {
        self.nodes.find_map(|(i, node)| {
            node.mesh().map(|mesh| DrawUnit {
                node: NodeId(i),
                model: node.model_matrix(),
                mesh,
            })
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.nodes.size_hint().1)
    }
}
