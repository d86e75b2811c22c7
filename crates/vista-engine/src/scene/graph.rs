use glam::{Mat4, Vec3};

use crate::coords::Color;
use crate::geometry::Geometry;

use super::{Node, NodeId, NodeKind};

/// Handle to a geometry stored in a [`Scene`].
///
/// Geometry is immutable once added, so several meshes may share one and the
/// renderer can cache GPU buffers per id.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct GeometryId(pub(crate) usize);

/// Hierarchical scene graph.
///
/// Node 0 is an implicit root group; [`Scene::add`] attaches to it. A child's world
/// matrix is its parent's world matrix times its own local matrix.
#[derive(Debug, Clone)]
pub struct Scene {
    nodes: Vec<Node>,
    geometries: Vec<Geometry>,
    pub background: Color,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::group().named("root")],
            geometries: Vec::new(),
            background: Color::black(),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn add_geometry(&mut self, geometry: Geometry) -> GeometryId {
        let id = GeometryId(self.geometries.len());
        self.geometries.push(geometry);
        id
    }

    pub fn geometry(&self, id: GeometryId) -> Option<&Geometry> {
        self.geometries.get(id.0)
    }

    /// Attaches `node` under the root.
    pub fn add(&mut self, node: Node) -> NodeId {
        self.add_child(self.root(), node)
    }

    /// Attaches `node` under `parent`.
    ///
    /// # Panics
    /// If `parent` does not belong to this scene.
    pub fn add_child(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        assert!(parent.0 < self.nodes.len(), "parent {parent:?} is not in this scene");
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        node.children.clear();
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Overwrites a node's Euler rotation. Unknown ids are ignored.
    pub fn set_rotation(&mut self, id: NodeId, rotation: Vec3) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.transform.rotation = rotation;
        }
    }

    /// World matrix of `id`, composed from the root down.
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let mut chain = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let Some(node) = self.nodes.get(current.0) else { break };
            chain.push(node.transform.matrix());
            cursor = node.parent;
        }
        chain.iter().rev().fold(Mat4::IDENTITY, |acc, local| acc * *local)
    }

    /// Visits every visible node depth-first with its world matrix.
    ///
    /// Invisible nodes hide their whole subtree.
    pub fn traverse(&self, mut visit: impl FnMut(NodeId, &Node, Mat4)) {
        let mut stack = vec![(self.root(), Mat4::IDENTITY)];
        while let Some((id, parent_world)) = stack.pop() {
            let node = &self.nodes[id.0];
            if !node.visible {
                continue;
            }
            let world = parent_world * node.transform.matrix();
            visit(id, node, world);
            for child in node.children.iter().rev() {
                stack.push((*child, world));
            }
        }
    }

    /// First directional light with its world-space direction of travel.
    pub fn primary_light(&self) -> Option<(super::Light, Vec3)> {
        let mut found = None;
        self.traverse(|_, node, world| {
            if found.is_some() {
                return;
            }
            if let NodeKind::Light(light) = &node.kind {
                let from = world.transform_point3(Vec3::ZERO);
                let dir = (light.target - from).try_normalize().unwrap_or(Vec3::NEG_Z);
                found = Some((*light, dir));
            }
        });
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Transform;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    // ── hierarchy ─────────────────────────────────────────────────────────

    #[test]
    fn add_attaches_to_root() {
        let mut scene = Scene::new();
        let a = scene.add(Node::group());
        assert_eq!(scene.node(a).unwrap().parent(), Some(scene.root()));
        assert_eq!(scene.node(scene.root()).unwrap().children(), &[a]);
    }

    #[test]
    fn child_inherits_parent_rotation() {
        let mut scene = Scene::new();
        let system = scene.add(Node::group());
        let orbit = scene.add_child(
            system,
            Node::group().with_transform(Transform::from_position(Vec3::new(10.0, 0.0, 0.0))),
        );

        scene.set_rotation(system, Vec3::new(0.0, FRAC_PI_2, 0.0));

        let p = scene.world_matrix(orbit).transform_point3(Vec3::ZERO);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(p.z, -10.0, epsilon = 1e-5);
    }

    #[test]
    fn scale_propagates_to_children() {
        let mut scene = Scene::new();
        let parent = scene.add(Node::group().with_transform(Transform::IDENTITY.with_scale(2.0)));
        let child = scene.add_child(
            parent,
            Node::group().with_transform(Transform::from_position(Vec3::X)),
        );
        let p = scene.world_matrix(child).transform_point3(Vec3::ZERO);
        assert_relative_eq!(p.x, 2.0);
    }

    // ── traverse ──────────────────────────────────────────────────────────

    #[test]
    fn traverse_visits_parents_before_children() {
        let mut scene = Scene::new();
        let a = scene.add(Node::group());
        let b = scene.add_child(a, Node::group());
        let c = scene.add(Node::group());

        let mut order = Vec::new();
        scene.traverse(|id, _, _| order.push(id));
        assert_eq!(order, vec![scene.root(), a, b, c]);
    }

    #[test]
    fn invisible_node_hides_subtree() {
        let mut scene = Scene::new();
        let a = scene.add(Node::group());
        let _b = scene.add_child(a, Node::group());
        scene.node_mut(a).unwrap().visible = false;

        let mut count = 0;
        scene.traverse(|_, _, _| count += 1);
        assert_eq!(count, 1);
    }

    // ── lights ────────────────────────────────────────────────────────────

    #[test]
    fn primary_light_points_at_target() {
        let mut scene = Scene::new();
        scene.add(
            Node::light(crate::scene::Light::directional(Color::white(), 1.0))
                .with_transform(Transform::from_position(Vec3::new(0.0, 5.0, 0.0))),
        );
        let (_, dir) = scene.primary_light().unwrap();
        assert_relative_eq!(dir.y, -1.0);
    }
}
