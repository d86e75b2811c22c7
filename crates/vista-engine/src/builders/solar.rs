use std::time::Duration;

use glam::Vec3;

use crate::assets::AssetSource;
use crate::coords::Color;
use crate::error::StageError;
use crate::geometry::{sphere, SphereParams};
use crate::material::MeshMaterial;
use crate::scene::{Node, NodeId, Scene, Transform};
use crate::stage::{ready, BuildFuture, SceneBuilder};

/// Sun, earth and moon nested in orbit groups.
///
/// The whole system spins at t/2, the earth orbit at 2t and the moon orbit at
/// 5t, all around Y. Every body shares one sphere geometry.
#[derive(Debug, Default)]
pub struct SolarSystemScene {
    handles: Option<Orbits>,
}

#[derive(Debug, Copy, Clone)]
struct Orbits {
    system: NodeId,
    earth: NodeId,
    moon: NodeId,
}

impl SolarSystemScene {
    pub fn new() -> Self {
        Self::default()
    }

    fn build(&mut self, scene: &mut Scene) -> Result<(), StageError> {
        let ball = scene.add_geometry(sphere(SphereParams::new(1.0, 12, 12))?);

        let system = scene.add(Node::group().named("solar-system"));

        let sun = MeshMaterial::phong(Color::white())
            .with_emissive(Color::hex(0xffff00))
            .with_flat_shading(true)
            .build()?;
        scene.add_child(
            system,
            Node::mesh(ball, sun).named("sun").with_transform(Transform::IDENTITY.with_scale(3.0)),
        );

        let earth = scene.add_child(
            system,
            Node::group()
                .named("earth-orbit")
                .with_transform(Transform::from_position(Vec3::new(10.0, 0.0, 0.0))),
        );
        let earth_material = MeshMaterial::phong(Color::hex(0x2233ff))
            .with_emissive(Color::hex(0x112244))
            .with_flat_shading(true)
            .build()?;
        scene.add_child(earth, Node::mesh(ball, earth_material).named("earth"));

        let moon = scene.add_child(
            earth,
            Node::group()
                .named("moon-orbit")
                .with_transform(Transform::from_position(Vec3::new(2.0, 0.0, 0.0))),
        );
        let moon_material = MeshMaterial::phong(Color::hex(0x888888))
            .with_emissive(Color::hex(0x222222))
            .with_flat_shading(true)
            .build()?;
        scene.add_child(
            moon,
            Node::mesh(ball, moon_material).named("moon").with_transform(Transform::IDENTITY.with_scale(0.5)),
        );

        self.handles = Some(Orbits { system, earth, moon });
        Ok(())
    }
}

impl SceneBuilder for SolarSystemScene {
    fn name(&self) -> &'static str {
        "solar-system"
    }

    fn camera_distance(&self) -> f32 {
        25.0
    }

    fn setup_model<'a>(&'a mut self, scene: &'a mut Scene, _assets: &'a dyn AssetSource) -> BuildFuture<'a> {
        ready(self.build(scene))
    }

    fn update(&mut self, scene: &mut Scene, elapsed: Duration) {
        let Some(orbits) = self.handles else { return };
        let t = elapsed.as_secs_f32();
        scene.set_rotation(orbits.system, Vec3::new(0.0, t / 2.0, 0.0));
        scene.set_rotation(orbits.earth, Vec3::new(0.0, t * 2.0, 0.0));
        scene.set_rotation(orbits.moon, Vec3::new(0.0, t * 5.0, 0.0));
    }

    fn orbit_controls(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MemoryAssets;
    use approx::assert_relative_eq;

    fn built() -> (SolarSystemScene, Scene) {
        let mut builder = SolarSystemScene::new();
        let mut scene = Scene::new();
        pollster::block_on(builder.setup_model(&mut scene, &MemoryAssets::new())).unwrap();
        (builder, scene)
    }

    #[test]
    fn orbit_rates() {
        let (mut builder, mut scene) = built();
        builder.update(&mut scene, Duration::from_secs(2));
        let o = builder.handles.unwrap();
        assert_eq!(scene.node(o.system).unwrap().transform.rotation.y, 1.0);
        assert_eq!(scene.node(o.earth).unwrap().transform.rotation.y, 4.0);
        assert_eq!(scene.node(o.moon).unwrap().transform.rotation.y, 10.0);
    }

    #[test]
    fn earth_starts_ten_units_out() {
        let (builder, scene) = built();
        let o = builder.handles.unwrap();
        let p = scene.world_matrix(o.earth).transform_point3(Vec3::ZERO);
        assert_relative_eq!(p.x, 10.0);
        let m = scene.world_matrix(o.moon).transform_point3(Vec3::ZERO);
        assert_relative_eq!(m.x, 12.0);
    }

    #[test]
    fn moon_follows_earth() {
        let (mut builder, mut scene) = built();
        builder.update(&mut scene, Duration::from_millis(3700));
        let o = builder.handles.unwrap();
        let earth = scene.world_matrix(o.earth).transform_point3(Vec3::ZERO);
        let moon = scene.world_matrix(o.moon).transform_point3(Vec3::ZERO);
        assert_relative_eq!(earth.length(), 10.0, epsilon = 1e-4);
        assert_relative_eq!(earth.distance(moon), 2.0, epsilon = 1e-4);
    }
}
