use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use glam::Vec3;

use crate::assets::AssetSource;
use crate::camera::PerspectiveCamera;
use crate::coords::Color;
use crate::error::StageError;
use crate::scene::{Light, Node, Scene, Transform};

/// Future returned by [`SceneBuilder::setup_model`].
pub type BuildFuture<'a> = Pin<Box<dyn Future<Output = Result<(), StageError>> + 'a>>;

/// Camera field of view shared by every sample, in degrees.
pub const DEFAULT_FOV: f32 = 75.0;
pub const DEFAULT_NEAR: f32 = 0.1;
pub const DEFAULT_FAR: f32 = 100.0;

/// Chooses what a stage shows and how it moves.
///
/// The stage calls `camera`, then `setup_light`, then awaits `setup_model` once
/// during initialization. Afterwards only `update` runs, once per frame.
pub trait SceneBuilder {
    /// Short identifier used for selection and logging.
    fn name(&self) -> &'static str;

    /// Distance along +Z of the default camera.
    fn camera_distance(&self) -> f32 {
        2.0
    }

    fn camera(&self, aspect: f32) -> Result<PerspectiveCamera, StageError> {
        Ok(PerspectiveCamera::new(DEFAULT_FOV, aspect, DEFAULT_NEAR, DEFAULT_FAR)?
            .with_position(Vec3::new(0.0, 0.0, self.camera_distance())))
    }

    /// Adds a white directional light at (-1, 2, 4) aimed at the origin.
    fn setup_light(&self, scene: &mut Scene) {
        scene.add(
            Node::light(Light::directional(Color::white(), 1.0))
                .named("light")
                .with_transform(Transform::from_position(Vec3::new(-1.0, 2.0, 4.0))),
        );
    }

    /// Populates `scene`. May suspend on asset loads.
    fn setup_model<'a>(&'a mut self, scene: &'a mut Scene, assets: &'a dyn AssetSource) -> BuildFuture<'a>;

    /// Advances animated nodes to `elapsed`. Must be a pure function of time.
    fn update(&mut self, scene: &mut Scene, elapsed: Duration) {
        let _ = (scene, elapsed);
    }

    /// Whether the stage should attach orbit controls to the camera.
    fn orbit_controls(&self) -> bool {
        true
    }
}

/// Wraps an already computed result as a [`BuildFuture`].
pub fn ready<'a>(result: Result<(), StageError>) -> BuildFuture<'a> {
    Box::pin(std::future::ready(result))
}
