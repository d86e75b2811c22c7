use std::time::Duration;

use crate::assets::AssetSource;
use crate::camera::PerspectiveCamera;
use crate::controls::OrbitControls;
use crate::error::{DrawError, StageError};
use crate::input::InputEvent;
use crate::scene::Scene;

use super::builder::SceneBuilder;
use super::stop::StopToken;
use super::surface::{Mount, RenderSurface};

/// Control directive returned by [`Stage::render_frame`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    /// Another frame was requested.
    Continue,
    /// No frame was requested; the host should wind down.
    Stopped,
}

/// Everything a frame needs, fixed when the stage is built.
pub struct StageContext<S> {
    pub surface: S,
    pub scene: Scene,
    pub camera: PerspectiveCamera,
}

/// Frame loop controller.
///
/// Owns the surface, the scene and the camera. The host calls
/// [`resize`](Self::resize) on size changes and
/// [`render_frame`](Self::render_frame) for every frame callback; each
/// `render_frame` that returns [`LoopState::Continue`] has requested exactly one
/// more callback.
pub struct Stage<S: RenderSurface> {
    ctx: StageContext<S>,
    builder: Box<dyn SceneBuilder>,
    stop: StopToken,
    controls: Option<OrbitControls>,
    frames: u64,
}

impl<S: RenderSurface> Stage<S> {
    /// Mounts a surface, builds the scene and schedules the first frame.
    ///
    /// Asset failures inside the builder are logged and the stage comes up with
    /// whatever content was built; every other error aborts.
    pub async fn initialize<M>(
        mount: M,
        mut builder: Box<dyn SceneBuilder>,
        assets: &dyn AssetSource,
        stop: StopToken,
    ) -> Result<Self, StageError>
    where
        M: Mount<Surface = S>,
    {
        let surface = mount.mount()?;

        let size = surface.client_size();
        let aspect = if size.is_valid() { size.aspect() } else { 1.0 };
        let camera = builder.camera(aspect)?;

        let mut scene = Scene::new();
        builder.setup_light(&mut scene);

        match builder.setup_model(&mut scene, assets).await {
            Ok(()) => {}
            Err(err @ StageError::AssetLoadFailed { .. }) => {
                log::error!("scene `{}` built without assets: {err}", builder.name());
            }
            Err(err) => return Err(err),
        }

        let controls = builder.orbit_controls().then(OrbitControls::new);

        let mut stage = Self {
            ctx: StageContext { surface, scene, camera },
            builder,
            stop,
            controls,
            frames: 0,
        };

        stage.resize();
        stage.ctx.surface.request_frame();

        log::info!(
            "stage `{}` ready: {} nodes, {}x{} @ {:.2}x",
            stage.builder.name(),
            stage.ctx.scene.len(),
            stage.ctx.surface.size().width,
            stage.ctx.surface.size().height,
            stage.ctx.surface.pixel_ratio(),
        );

        Ok(stage)
    }

    /// Syncs camera aspect and surface size with the host's client area.
    ///
    /// A zero-sized client area (minimized window) leaves the previous state.
    pub fn resize(&mut self) {
        let size = self.ctx.surface.client_size();
        if !size.is_valid() {
            log::debug!("resize ignored for {}x{}", size.width, size.height);
            return;
        }

        self.ctx.camera.set_aspect(size.aspect());
        self.ctx.surface.set_size(size);
        log::debug!("resized to {}x{}", size.width, size.height);
    }

    /// Draws the current state, advances to `elapsed`, requests the next frame.
    pub fn render_frame(&mut self, elapsed: Duration) -> LoopState {
        if self.stop.is_stopped() {
            return LoopState::Stopped;
        }

        match self.ctx.surface.draw(&self.ctx.scene, &self.ctx.camera) {
            Ok(()) => {}
            Err(DrawError::Skipped(reason)) => {
                log::debug!("frame {} skipped: {reason}", self.frames);
            }
            Err(DrawError::Fatal(reason)) => {
                log::error!("stopping frame loop: {reason}");
                self.stop.stop();
                return LoopState::Stopped;
            }
        }

        self.update(elapsed);
        self.ctx.surface.request_frame();
        self.frames += 1;
        LoopState::Continue
    }

    /// Advances animated nodes to `elapsed` without drawing.
    pub fn update(&mut self, elapsed: Duration) {
        self.builder.update(&mut self.ctx.scene, elapsed);
    }

    /// Routes input to the orbit controls, if any. Returns `true` when the camera moved.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match self.controls.as_mut() {
            Some(controls) => controls.handle(event, &mut self.ctx.camera),
            None => false,
        }
    }

    pub fn context(&self) -> &StageContext<S> {
        &self.ctx
    }

    pub fn scene(&self) -> &Scene {
        &self.ctx.scene
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.ctx.camera
    }

    pub fn surface(&self) -> &S {
        &self.ctx.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.ctx.surface
    }

    pub fn stop_token(&self) -> &StopToken {
        &self.stop
    }

    pub fn builder_name(&self) -> &'static str {
        self.builder.name()
    }

    /// Frames that completed a full draw/update/reschedule step.
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }
}
