use std::time::Duration;

use glam::Vec3;

use crate::assets::AssetSource;
use crate::coords::Color;
use crate::error::StageError;
use crate::geometry::{cuboid, torus_knot, wireframe, CuboidParams, TorusKnotParams};
use crate::material::{LineMaterial, MeshMaterial};
use crate::scene::{Node, NodeId, Scene};
use crate::stage::{ready, BuildFuture, SceneBuilder};

/// Unit box tumbling at 1 rad/s around every axis.
#[derive(Debug, Default)]
pub struct CubeScene {
    cube: Option<NodeId>,
}

impl CubeScene {
    pub fn new() -> Self {
        Self::default()
    }

    fn build(&mut self, scene: &mut Scene) -> Result<(), StageError> {
        let geometry = scene.add_geometry(cuboid(CuboidParams::new(1.0, 1.0, 1.0))?);
        let material = MeshMaterial::phong(Color::hex(0x044a88)).build()?;
        self.cube = Some(scene.add(Node::mesh(geometry, material).named("cube")));
        Ok(())
    }
}

impl SceneBuilder for CubeScene {
    fn name(&self) -> &'static str {
        "cube"
    }

    fn setup_model<'a>(&'a mut self, scene: &'a mut Scene, _assets: &'a dyn AssetSource) -> BuildFuture<'a> {
        ready(self.build(scene))
    }

    fn update(&mut self, scene: &mut Scene, elapsed: Duration) {
        if let Some(cube) = self.cube {
            scene.set_rotation(cube, Vec3::splat(elapsed.as_secs_f32()));
        }
    }

    fn orbit_controls(&self) -> bool {
        false
    }
}

/// Subdivided gray box with its triangle edges overlaid in yellow.
#[derive(Debug, Default)]
pub struct WireframeBoxScene;

impl SceneBuilder for WireframeBoxScene {
    fn name(&self) -> &'static str {
        "wireframe-box"
    }

    fn setup_model<'a>(&'a mut self, scene: &'a mut Scene, _assets: &'a dyn AssetSource) -> BuildFuture<'a> {
        let params = CuboidParams::new(1.0, 1.0, 1.0).segments(2, 2, 2);
        ready(cuboid(params).and_then(|geometry| add_outlined(scene, geometry, Color::hex(0x515151), "box")))
    }
}

/// (2, 3) torus knot, outlined.
#[derive(Debug, Default)]
pub struct TorusKnotScene {
    pub params: TorusKnotParams,
}

impl SceneBuilder for TorusKnotScene {
    fn name(&self) -> &'static str {
        "torus-knot"
    }

    fn camera_distance(&self) -> f32 {
        4.0
    }

    fn setup_model<'a>(&'a mut self, scene: &'a mut Scene, _assets: &'a dyn AssetSource) -> BuildFuture<'a> {
        ready(torus_knot(self.params).and_then(|geometry| add_outlined(scene, geometry, Color::hex(0x515151), "knot")))
    }
}

/// Adds a group holding a Phong fill of `geometry` and a yellow edge overlay.
pub(crate) fn add_outlined(
    scene: &mut Scene,
    geometry: crate::geometry::Geometry,
    fill: Color,
    name: &str,
) -> Result<(), StageError> {
    let edges = scene.add_geometry(wireframe(&geometry));
    let solid = scene.add_geometry(geometry);

    let group = scene.add(Node::group().named(name));
    scene.add_child(group, Node::mesh(solid, MeshMaterial::phong(fill).build()?));
    scene.add_child(group, Node::lines(edges, LineMaterial::basic(Color::hex(0xffff00))));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MemoryAssets;
    use crate::scene::NodeKind;

    fn build(builder: &mut dyn SceneBuilder) -> Scene {
        let mut scene = Scene::new();
        let assets = MemoryAssets::new();
        pollster::block_on(builder.setup_model(&mut scene, &assets)).unwrap();
        scene
    }

    #[test]
    fn cube_rotates_with_elapsed_seconds() {
        let mut builder = CubeScene::new();
        let mut scene = build(&mut builder);
        builder.update(&mut scene, Duration::from_millis(1500));
        let cube = builder.cube.unwrap();
        assert_eq!(scene.node(cube).unwrap().transform.rotation, Vec3::splat(1.5));
    }

    #[test]
    fn wireframe_box_groups_fill_and_edges() {
        let scene = build(&mut WireframeBoxScene);
        let mut meshes = 0;
        let mut lines = 0;
        scene.traverse(|_, node, _| match node.kind {
            NodeKind::Mesh { .. } => meshes += 1,
            NodeKind::Lines { .. } => lines += 1,
            _ => {}
        });
        assert_eq!((meshes, lines), (1, 1));
    }

    #[test]
    fn static_scenes_ignore_time() {
        let mut builder = TorusKnotScene::default();
        let mut scene = build(&mut builder);
        let before: Vec<_> = (0..scene.len()).filter_map(|i| scene.node(NodeId(i)).map(|n| n.transform)).collect();
        builder.update(&mut scene, Duration::from_secs(3));
        let after: Vec<_> = (0..scene.len()).filter_map(|i| scene.node(NodeId(i)).map(|n| n.transform)).collect();
        assert_eq!(before, after);
    }
}
