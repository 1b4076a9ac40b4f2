//! # Scene Graph
//!
//! A transform hierarchy stored in an arena: [`SceneGraph`] owns every node
//! in a single `Vec`, and nodes address their children through stable
//! [`NodeId`] indices instead of owned boxes. Nodes are never removed during
//! the render loop, so ids stay valid for the lifetime of the graph.
//!
//! Each node carries a local transform (translation, Euler rotation applied
//! Z then Y then X, non-uniform scale), an optional drawable [`Model`], and
//! a semantic [`NodeKind`] that selects special-case shading such as water.

pub mod builders;

use cgmath::{Matrix4, Rad, Vector3};

use crate::gfx::resources::Model;

/// Stable index of a node within its [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

/// Semantic tag selecting shading branches at draw time.
///
/// The renderer matches on this exhaustively, so adding a kind is a
/// compile-time-checked change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeKind {
    #[default]
    Empty,
    StaticMesh,
    Reflective,
    WaterSurface,
    Water,
}

/// One element of the transform hierarchy, optionally renderable.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    /// Drawable meshes with their materials; empty for pure group nodes.
    pub model: Model,
    pub translation: Vector3<f32>,
    /// Euler angles in radians, applied Z, then Y, then X.
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
    /// `(factor, units)` for z-fighting mitigation; currently unused by the
    /// traversal.
    pub polygon_offset: (f32, f32),
    /// An invisible node emits no draw calls for its own meshes but still
    /// contributes its transform to descendants.
    pub invisible: bool,
    children: Vec<NodeId>,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            kind: NodeKind::Empty,
            model: Model::new(),
            translation: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
            polygon_offset: (0.0, 0.0),
            invisible: false,
            children: Vec::new(),
        }
    }
}

impl Node {
    pub fn with_model(kind: NodeKind, model: Model) -> Self {
        Self {
            kind,
            model,
            ..Default::default()
        }
    }

    /// Local transform, always composed as `T · Rz · Ry · Rx · S`.
    pub fn local_transform(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.translation)
            * Matrix4::from_angle_z(Rad(self.rotation.z))
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Arena of scene nodes.
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node without a parent and returns its id.
    pub fn add(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Inserts a node as the last child of `parent`.
    pub fn add_child(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = self.add(node);
        self.nodes[parent.0 as usize].children.push(id);
        id
    }

    /// Attaches an existing root node as the last child of `parent`.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0 as usize].children.push(child);
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::{Matrix4, Rad};

    #[test]
    fn local_transform_composes_t_rz_ry_rx_s() {
        let node = Node {
            translation: Vector3::new(1.0, 2.0, 3.0),
            rotation: Vector3::new(0.1, 0.2, 0.3),
            scale: Vector3::new(2.0, 3.0, 4.0),
            ..Default::default()
        };

        let expected = Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0))
            * Matrix4::from_angle_z(Rad(0.3))
            * Matrix4::from_angle_y(Rad(0.2))
            * Matrix4::from_angle_x(Rad(0.1))
            * Matrix4::from_nonuniform_scale(2.0, 3.0, 4.0);

        let actual = node.local_transform();
        for col in 0..4 {
            for row in 0..4 {
                assert_relative_eq!(actual[col][row], expected[col][row], epsilon = 1e-6);
            }
        }
        // Rotation order matters: Z-then-Y-then-X is not X-then-Y-then-Z.
        let reversed = Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0))
            * Matrix4::from_angle_x(Rad(0.1))
            * Matrix4::from_angle_y(Rad(0.2))
            * Matrix4::from_angle_z(Rad(0.3))
            * Matrix4::from_nonuniform_scale(2.0, 3.0, 4.0);
        assert_ne!(actual, reversed);
    }

    #[test]
    fn arena_children_keep_insertion_order() {
        let mut scene = SceneGraph::new();
        let root = scene.add(Node::default());
        let a = scene.add_child(root, Node::default());
        let b = scene.add_child(root, Node::default());
        let c = scene.add(Node::default());
        scene.attach(root, c);

        assert_eq!(scene.node(root).children(), &[a, b, c]);
        assert_eq!(scene.len(), 4);
    }

    #[test]
    fn default_node_is_an_empty_group() {
        let node = Node::default();
        assert_eq!(node.kind, NodeKind::Empty);
        assert!(node.model.is_empty());
        assert!(!node.invisible);
        assert_eq!(node.scale, Vector3::new(1.0, 1.0, 1.0));
    }
}
