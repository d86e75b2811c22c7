use glam::Mat4;

use crate::camera::PerspectiveCamera;
use crate::geometry::Topology;
use crate::material::Side;
use crate::scene::{GeometryId, NodeKind, Scene};

use super::uniforms::DrawUniform;

/// Everything that selects a distinct render pipeline.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub(crate) struct PipelineKey {
    pub topology: Topology,
    pub side: Side,
    pub blend: bool,
    pub depth_test: bool,
    pub depth_write: bool,
}

/// One draw call, ready for upload.
#[derive(Debug, Clone)]
pub(crate) struct DrawItem {
    pub geometry: GeometryId,
    /// Draw the geometry's triangle edges instead of its faces.
    pub edges: bool,
    pub key: PipelineKey,
    pub uniform: DrawUniform,
    /// View-space distance of the node origin.
    pub depth: f32,
}

/// Flattens visible drawables: opaque in scene order, then blended back to front.
pub(crate) fn collect_draws(scene: &Scene, camera: &PerspectiveCamera) -> Vec<DrawItem> {
    let view = camera.view_matrix();
    let mut opaque = Vec::new();
    let mut blended = Vec::new();

    scene.traverse(|_, node, world| {
        let item = match &node.kind {
            NodeKind::Mesh { geometry, material } => {
                let Some(topology) = scene.geometry(*geometry).map(|g| g.topology) else { return };
                let edges = material.wireframe && topology == Topology::Triangles;
                DrawItem {
                    geometry: *geometry,
                    edges,
                    key: PipelineKey {
                        topology: if edges { Topology::Lines } else { topology },
                        side: if edges { Side::Double } else { material.side },
                        blend: material.transparent,
                        depth_test: material.depth_test,
                        depth_write: material.depth_write,
                    },
                    uniform: DrawUniform::mesh(world, material),
                    depth: view_depth(view, world),
                }
            }
            NodeKind::Lines { geometry, material } => {
                let Some(topology) = scene.geometry(*geometry).map(|g| g.topology) else { return };
                unlit(*geometry, topology, material.color.a < 1.0, DrawUniform::line(world, material), view, world)
            }
            NodeKind::Points { geometry, material } => {
                if scene.geometry(*geometry).is_none() {
                    return;
                }
                unlit(*geometry, Topology::Points, material.color.a < 1.0, DrawUniform::points(world, material), view, world)
            }
            NodeKind::Group | NodeKind::Light(_) => return,
        };

        if item.key.blend {
            blended.push(item);
        } else {
            opaque.push(item);
        }
    });

    blended.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    opaque.extend(blended);
    opaque
}

fn unlit(geometry: GeometryId, topology: Topology, blend: bool, uniform: DrawUniform, view: Mat4, world: Mat4) -> DrawItem {
    DrawItem {
        geometry,
        edges: false,
        key: PipelineKey {
            topology,
            side: Side::Double,
            blend,
            depth_test: true,
            depth_write: !blend,
        },
        uniform,
        depth: view_depth(view, world),
    }
}

fn view_depth(view: Mat4, world: Mat4) -> f32 {
    -(view * world).w_axis.z
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Color;
    use crate::geometry::{cuboid, point_cloud, polyline, CuboidParams};
    use crate::material::{LineMaterial, MeshMaterial, PointsMaterial};
    use crate::scene::{Node, Transform};
    use glam::Vec3;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(75.0, 1.0, 0.1, 100.0)
            .unwrap()
            .with_position(Vec3::new(0.0, 0.0, 10.0))
    }

    fn cube(scene: &mut Scene) -> GeometryId {
        scene.add_geometry(cuboid(CuboidParams::new(1.0, 1.0, 1.0)).unwrap())
    }

    // ── classification ────────────────────────────────────────────────────

    #[test]
    fn groups_and_lights_are_not_drawn() {
        let mut scene = Scene::new();
        scene.add(Node::group());
        scene.add(Node::light(crate::scene::Light::directional(Color::white(), 1.0)));
        assert!(collect_draws(&scene, &camera()).is_empty());
    }

    #[test]
    fn wireframe_material_draws_edges() {
        let mut scene = Scene::new();
        let g = cube(&mut scene);
        scene.add(Node::mesh(g, MeshMaterial::basic(Color::white()).with_wireframe(true)));
        let draws = collect_draws(&scene, &camera());
        assert!(draws[0].edges);
        assert_eq!(draws[0].key.topology, Topology::Lines);
    }

    #[test]
    fn lines_and_points_keep_their_topology() {
        let mut scene = Scene::new();
        let line = scene.add_geometry(polyline(vec![Vec3::ZERO, Vec3::X]));
        let cloud = scene.add_geometry(point_cloud(vec![Vec3::ZERO]));
        scene.add(Node::lines(line, LineMaterial::basic(Color::white())));
        scene.add(Node::points(cloud, PointsMaterial::new(Color::white(), 0.1, true).unwrap()));
        let kinds: Vec<_> = collect_draws(&scene, &camera()).iter().map(|d| d.key.topology).collect();
        assert_eq!(kinds, vec![Topology::LineStrip, Topology::Points]);
    }

    #[test]
    fn dangling_geometry_is_skipped() {
        let mut scene = Scene::new();
        scene.add(Node::mesh(GeometryId(42), MeshMaterial::basic(Color::white())));
        assert!(collect_draws(&scene, &camera()).is_empty());
    }

    // ── ordering ──────────────────────────────────────────────────────────

    #[test]
    fn blended_draws_follow_opaque_far_to_near() {
        let mut scene = Scene::new();
        let g = cube(&mut scene);
        let glass = MeshMaterial::basic(Color::white()).with_opacity(0.5);
        let at = |z: f32| Transform::from_position(Vec3::new(0.0, 0.0, z));

        scene.add(Node::mesh(g, glass).with_transform(at(5.0)));
        scene.add(Node::mesh(g, glass).with_transform(at(-5.0)));
        scene.add(Node::mesh(g, MeshMaterial::basic(Color::white())).with_transform(at(0.0)));

        let depths: Vec<_> = collect_draws(&scene, &camera()).iter().map(|d| (d.key.blend, d.depth)).collect();
        assert_eq!(depths, vec![(false, 10.0), (true, 15.0), (true, 5.0)]);
    }
}
