use anyhow::{anyhow, Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

use crate::assets::AssetSource;
use crate::coords::Color;
use crate::device::GpuInit;
use crate::input::platform::winit::translate_window_event;
use crate::input::{ButtonState, InputEvent, Key};
use crate::stage::{LoopState, SceneBuilder, Stage, StopToken};
use crate::time::FrameClock;

use super::surface::{WindowMount, WindowSurface};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Overrides the scene background when set.
    pub clear_color: Option<Color>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "vista".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            clear_color: None,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window, runs `builder`'s scene in it and returns when the loop stops.
    ///
    /// `stop` may be triggered from elsewhere; the window closes on the next frame.
    pub fn run(
        config: RuntimeConfig,
        gpu_init: GpuInit,
        builder: Box<dyn SceneBuilder>,
        assets: Box<dyn AssetSource>,
        stop: StopToken,
    ) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState {
            config,
            gpu_init,
            pending: Some(builder),
            assets,
            stop,
            stage: None,
            clock: FrameClock::new(),
            failure: None,
        };

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

struct AppState {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    pending: Option<Box<dyn SceneBuilder>>,
    assets: Box<dyn AssetSource>,
    stop: StopToken,

    stage: Option<Stage<WindowSurface>>,
    clock: FrameClock,
    failure: Option<anyhow::Error>,
}

impl AppState {
    fn start_stage(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let builder = self
            .pending
            .take()
            .ok_or_else(|| anyhow!("scene builder already consumed"))?;

        let mount = WindowMount {
            event_loop,
            config: self.config.clone(),
            gpu_init: self.gpu_init.clone(),
        };

        let stage = pollster::block_on(Stage::initialize(mount, builder, self.assets.as_ref(), self.stop.clone()))
            .context("failed to initialize stage")?;

        // Elapsed time starts with the first frame, not with the event loop.
        self.clock = FrameClock::new();
        self.stage = Some(stage);
        Ok(())
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.stop.stop();
        self.stage = None;
        event_loop.exit();
    }

    fn owns(&self, window_id: WindowId) -> bool {
        self.stage
            .as_ref()
            .is_some_and(|s| s.surface().window_id() == window_id)
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.stage.is_some() || self.pending.is_none() {
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        if let Err(e) = self.start_stage(event_loop) {
            log::error!("{e:#}");
            self.failure = Some(e);
            self.shutdown(event_loop);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Frames are requested by the stage itself; only watch for external stops.
        if self.stop.is_stopped() {
            self.shutdown(event_loop);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if !self.owns(window_id) {
            return;
        }
        let Some(stage) = self.stage.as_mut() else { return };

        match &event {
            WindowEvent::CloseRequested => {
                log::info!("window closed");
                self.shutdown(event_loop);
            }

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                stage.resize();
            }

            WindowEvent::RedrawRequested => {
                let ft = self.clock.tick();
                if stage.render_frame(ft.elapsed) == LoopState::Stopped {
                    log::info!("frame loop stopped after {} frames", stage.frames_rendered());
                    self.shutdown(event_loop);
                }
            }

            _ => {
                let Some(input) = translate_window_event(stage.surface().window(), &event) else {
                    return;
                };

                if let InputEvent::Key { key: Key::Escape, state: ButtonState::Pressed, .. } = input {
                    self.shutdown(event_loop);
                    return;
                }
                stage.handle_input(&input);
            }
        }
    }
}
