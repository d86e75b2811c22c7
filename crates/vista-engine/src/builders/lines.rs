use glam::Vec3;

use crate::assets::AssetSource;
use crate::coords::Color;
use crate::error::StageError;
use crate::geometry::{polyline, Curve, Geometry, Path, SinCurve, Topology, DEFAULT_CURVE_DIVISIONS};
use crate::material::LineMaterial;
use crate::scene::{Node, Scene};
use crate::stage::{ready, BuildFuture, SceneBuilder};

/// Sine wave drawn as a yellow polyline.
#[derive(Debug)]
pub struct SinCurveScene {
    pub scale: f32,
    pub divisions: u32,
}

impl Default for SinCurveScene {
    fn default() -> Self {
        Self { scale: 4.0, divisions: DEFAULT_CURVE_DIVISIONS }
    }
}

impl SceneBuilder for SinCurveScene {
    fn name(&self) -> &'static str {
        "sin-curve"
    }

    fn camera_distance(&self) -> f32 {
        15.0
    }

    fn setup_model<'a>(&'a mut self, scene: &'a mut Scene, _assets: &'a dyn AssetSource) -> BuildFuture<'a> {
        let points = SinCurve { scale: self.scale }.points(self.divisions);
        let geometry = scene.add_geometry(polyline(points));
        scene.add(Node::lines(geometry, LineMaterial::basic(Color::hex(0xffff00))).named("curve"));
        ready(Ok(()))
    }
}

/// Heart outline traced with cubic bezier segments.
#[derive(Debug)]
pub struct HeartScene {
    pub divisions: u32,
}

impl Default for HeartScene {
    fn default() -> Self {
        Self { divisions: 12 }
    }
}

impl HeartScene {
    pub fn outline() -> Path {
        let (x, y) = (-2.5, -5.0);
        let mut path = Path::new();
        path.move_to(x + 2.5, y + 2.5)
            .bezier_curve_to(x + 2.5, y + 2.5, x + 2.0, y, x, y)
            .bezier_curve_to(x - 3.0, y, x - 3.0, y + 3.5, x - 3.0, y + 3.5)
            .bezier_curve_to(x - 3.0, y + 5.5, x - 1.5, y + 7.7, x + 2.5, y + 9.5)
            .bezier_curve_to(x + 6.0, y + 7.7, x + 8.0, y + 4.5, x + 8.0, y + 3.5)
            .bezier_curve_to(x + 8.0, y + 3.5, x + 8.0, y, x + 5.0, y)
            .bezier_curve_to(x + 3.5, y, x + 2.5, y + 2.5, x + 2.5, y + 2.5);
        path
    }
}

impl SceneBuilder for HeartScene {
    fn name(&self) -> &'static str {
        "heart"
    }

    fn camera_distance(&self) -> f32 {
        15.0
    }

    fn setup_model<'a>(&'a mut self, scene: &'a mut Scene, _assets: &'a dyn AssetSource) -> BuildFuture<'a> {
        let points = Self::outline()
            .points(self.divisions)
            .into_iter()
            .map(|p| p.extend(0.0))
            .collect();
        let geometry = scene.add_geometry(polyline(points));
        scene.add(Node::lines(geometry, LineMaterial::basic(Color::hex(0xffff00))).named("heart"));
        ready(Ok(()))
    }
}

/// Z-shaped strip with dashes measured along its length.
#[derive(Debug, Default)]
pub struct DashedLineScene;

impl DashedLineScene {
    fn build(scene: &mut Scene) -> Result<(), StageError> {
        let vertices = vec![
            Vec3::new(-1.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
        ];
        let mut geometry = Geometry::new(Topology::LineStrip, vertices);
        geometry.compute_line_distances();

        let material = LineMaterial::dashed(Color::hex(0xffff00), 0.2, 0.1, 1.0)?;
        let id = scene.add_geometry(geometry);
        scene.add(Node::lines(id, material).named("dashed"));
        Ok(())
    }
}

impl SceneBuilder for DashedLineScene {
    fn name(&self) -> &'static str {
        "dashed-line"
    }

    fn camera_distance(&self) -> f32 {
        7.0
    }

    fn setup_model<'a>(&'a mut self, scene: &'a mut Scene, _assets: &'a dyn AssetSource) -> BuildFuture<'a> {
        ready(Self::build(scene))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MemoryAssets;
    use crate::scene::NodeKind;
    use approx::assert_relative_eq;

    fn only_line(builder: &mut dyn SceneBuilder) -> (Scene, Geometry) {
        let mut scene = Scene::new();
        pollster::block_on(builder.setup_model(&mut scene, &MemoryAssets::new())).unwrap();
        let mut found = None;
        scene.traverse(|_, node, _| {
            if let NodeKind::Lines { geometry, .. } = node.kind {
                found = Some(geometry);
            }
        });
        let geometry = scene.geometry(found.unwrap()).unwrap().clone();
        (scene, geometry)
    }

    #[test]
    fn sin_curve_samples_default_divisions() {
        let (_, geometry) = only_line(&mut SinCurveScene::default());
        assert_eq!(geometry.positions.len(), DEFAULT_CURVE_DIVISIONS as usize + 1);
        assert_relative_eq!(geometry.positions[0].x, -6.0);
        assert_relative_eq!(geometry.positions.last().unwrap().x, 6.0);
    }

    #[test]
    fn heart_outline_is_closed() {
        let (_, geometry) = only_line(&mut HeartScene::default());
        let first = geometry.positions[0];
        let last = *geometry.positions.last().unwrap();
        assert_relative_eq!(first.distance(last), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn dashed_line_carries_distances() {
        let (_, geometry) = only_line(&mut DashedLineScene);
        let distances = geometry.line_distances.unwrap();
        assert_eq!(distances.len(), 4);
        assert_relative_eq!(distances[1], 2.0);
        assert_relative_eq!(distances[2], 2.0 + 8f32.sqrt(), epsilon = 1e-5);
    }
}
