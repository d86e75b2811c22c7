use crate::material::{LineMaterial, MeshMaterial, PointsMaterial};

use super::{GeometryId, Light, Transform};

/// Handle to a node in a [`Scene`](super::Scene).
///
/// Handles are indices into the scene's arena and stay valid for the scene's
/// lifetime; nodes are never removed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(pub(crate) usize);

/// What a node contributes to the frame.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Pure transform; groups children.
    Group,
    Mesh { geometry: GeometryId, material: MeshMaterial },
    Lines { geometry: GeometryId, material: LineMaterial },
    Points { geometry: GeometryId, material: PointsMaterial },
    Light(Light),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name: Option<String>,
    pub transform: Transform,
    pub visible: bool,
    pub kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            name: None,
            transform: Transform::IDENTITY,
            visible: true,
            kind,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn group() -> Self {
        Self::new(NodeKind::Group)
    }

    pub fn mesh(geometry: GeometryId, material: MeshMaterial) -> Self {
        Self::new(NodeKind::Mesh { geometry, material })
    }

    pub fn lines(geometry: GeometryId, material: LineMaterial) -> Self {
        Self::new(NodeKind::Lines { geometry, material })
    }

    pub fn points(geometry: GeometryId, material: PointsMaterial) -> Self {
        Self::new(NodeKind::Points { geometry, material })
    }

    pub fn light(light: Light) -> Self {
        Self::new(NodeKind::Light(light))
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
