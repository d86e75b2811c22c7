use glam::Vec3;

use crate::assets::AssetSource;
use crate::coords::Color;
use crate::error::StageError;
use crate::geometry::{cuboid, point_cloud, random_spread, sphere, CuboidParams, SphereParams};
use crate::material::{MeshMaterial, PointsMaterial};
use crate::scene::{Node, Scene, Transform};
use crate::stage::{ready, BuildFuture, SceneBuilder};

/// A box and a sphere sharing one physical material.
#[derive(Debug, Clone)]
pub struct MaterialsScene {
    pub material: MeshMaterial,
}

impl Default for MaterialsScene {
    fn default() -> Self {
        Self {
            material: MeshMaterial::physical(Color::hex(0xff0000))
                .with_emissive(Color::black())
                .with_pbr(1.0, 0.0)
                .with_clearcoat(0.0, 0.0),
        }
    }
}

impl MaterialsScene {
    fn build(&self, scene: &mut Scene) -> Result<(), StageError> {
        let material = self.material.build()?;

        let cube = scene.add_geometry(cuboid(CuboidParams::new(1.0, 1.0, 1.0))?);
        scene.add(
            Node::mesh(cube, material)
                .named("box")
                .with_transform(Transform::from_position(Vec3::new(-1.0, 0.0, 0.0))),
        );

        let ball = scene.add_geometry(sphere(SphereParams::new(0.7, 32, 32))?);
        scene.add(
            Node::mesh(ball, material)
                .named("sphere")
                .with_transform(Transform::from_position(Vec3::new(1.0, 0.0, 0.0))),
        );
        Ok(())
    }
}

impl SceneBuilder for MaterialsScene {
    fn name(&self) -> &'static str {
        "materials"
    }

    fn camera_distance(&self) -> f32 {
        3.0
    }

    fn setup_model<'a>(&'a mut self, scene: &'a mut Scene, _assets: &'a dyn AssetSource) -> BuildFuture<'a> {
        ready(self.build(scene))
    }
}

/// Yellow point field filling a cube of edge `spread`.
#[derive(Debug)]
pub struct ParticlesScene {
    pub count: usize,
    pub spread: f32,
    pub seed: u64,
}

impl Default for ParticlesScene {
    fn default() -> Self {
        Self { count: 10_000, spread: 5.0, seed: 0x5eed }
    }
}

impl ParticlesScene {
    fn build(&self, scene: &mut Scene) -> Result<(), StageError> {
        let positions = random_spread(self.count, self.spread, self.seed)?;
        let material = PointsMaterial::new(Color::hex(0xffff00), 0.1, true)?;
        let geometry = scene.add_geometry(point_cloud(positions));
        scene.add(Node::points(geometry, material).named("particles"));
        Ok(())
    }
}

impl SceneBuilder for ParticlesScene {
    fn name(&self) -> &'static str {
        "particles"
    }

    fn camera_distance(&self) -> f32 {
        7.0
    }

    fn setup_model<'a>(&'a mut self, scene: &'a mut Scene, _assets: &'a dyn AssetSource) -> BuildFuture<'a> {
        ready(self.build(scene))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MemoryAssets;
    use crate::material::ShadingModel;
    use crate::scene::NodeKind;

    #[test]
    fn materials_scene_shares_material() {
        let mut scene = Scene::new();
        pollster::block_on(MaterialsScene::default().setup_model(&mut scene, &MemoryAssets::new())).unwrap();
        let mut models = Vec::new();
        scene.traverse(|_, node, _| {
            if let NodeKind::Mesh { material, .. } = &node.kind {
                models.push(material.model);
            }
        });
        assert_eq!(models, vec![ShadingModel::Physical, ShadingModel::Physical]);
    }

    #[test]
    fn bad_roughness_is_rejected() {
        let mut builder = MaterialsScene::default();
        builder.material = builder.material.with_pbr(1.5, 0.0);
        let mut scene = Scene::new();
        let result = pollster::block_on(builder.setup_model(&mut scene, &MemoryAssets::new()));
        assert!(matches!(result, Err(StageError::InvalidParameter { name: "roughness", .. })));
    }

    #[test]
    fn particle_count_matches() {
        let mut scene = Scene::new();
        let mut builder = ParticlesScene { count: 250, ..ParticlesScene::default() };
        pollster::block_on(builder.setup_model(&mut scene, &MemoryAssets::new())).unwrap();
        let mut count = 0;
        scene.traverse(|_, node, _| {
            if let NodeKind::Points { geometry, .. } = node.kind {
                count = scene.geometry(geometry).unwrap().vertex_count();
            }
        });
        assert_eq!(count, 250);
    }
}
