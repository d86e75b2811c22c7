use anyhow::Context;
use ouroboros::self_referencing;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use crate::camera::PerspectiveCamera;
use crate::coords::{Color, Viewport};
use crate::device::{Gpu, GpuInit};
use crate::error::{DrawError, StageError};
use crate::render::{RenderCtx, RenderTarget, SceneRenderer};
use crate::scene::Scene;
use crate::stage::{Mount, RenderSurface};

use super::RuntimeConfig;

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// A winit window with its GPU surface and scene renderer.
pub struct WindowSurface {
    entry: WindowEntry,
    renderer: SceneRenderer,
    size: Viewport,
    clear_color: Option<Color>,
}

impl WindowSurface {
    pub fn window_id(&self) -> WindowId {
        self.entry.borrow_window().id()
    }

    pub(crate) fn window(&self) -> &Window {
        self.entry.borrow_window()
    }
}

impl RenderSurface for WindowSurface {
    fn client_size(&self) -> Viewport {
        let window = self.entry.borrow_window();
        logical_size(window.inner_size(), window.scale_factor())
    }

    fn pixel_ratio(&self) -> f64 {
        self.entry.borrow_window().scale_factor()
    }

    fn size(&self) -> Viewport {
        self.size
    }

    fn set_size(&mut self, size: Viewport) {
        let window = self.entry.borrow_window();
        let physical = physical_size(size, window.inner_size(), window.scale_factor());
        self.entry.with_gpu_mut(|gpu| gpu.resize(physical));
        self.size = size;
    }

    fn draw(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), DrawError> {
        let pixel_ratio = self.pixel_ratio() as f32;
        let clear = self.clear_color.unwrap_or(scene.background);
        let renderer = &mut self.renderer;

        self.entry.with_gpu_mut(|gpu| {
            let mut frame = match gpu.begin_frame() {
                Ok(f) => f,
                Err(err) => {
                    let action = gpu.handle_surface_error(&err);
                    return Err(action.into_draw_error(&err));
                }
            };

            {
                let size = gpu.size();
                let ctx = RenderCtx::new(
                    gpu.device(),
                    gpu.queue(),
                    gpu.surface_format(),
                    (size.width, size.height),
                    pixel_ratio,
                );
                let mut target = RenderTarget::new(&mut frame.encoder, &frame.view, gpu.depth_view());
                renderer.render(&ctx, &mut target, scene, camera, clear);
            }

            gpu.submit(frame);
            Ok(())
        })
    }

    fn request_frame(&self) {
        self.entry.borrow_window().request_redraw();
    }
}

/// Creates the stage's window on an active event loop.
pub struct WindowMount<'a> {
    pub event_loop: &'a ActiveEventLoop,
    pub config: RuntimeConfig,
    pub gpu_init: GpuInit,
}

impl Mount for WindowMount<'_> {
    type Surface = WindowSurface;

    fn mount(self) -> Result<WindowSurface, StageError> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = self
            .event_loop
            .create_window(attrs)
            .context("failed to create window")
            .map_err(unavailable)?;

        let gpu_init = self.gpu_init;
        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .map_err(unavailable)?;

        let info = entry.with_gpu(|gpu| gpu.adapter_info());
        log::info!("using adapter {} ({:?})", info.name, info.backend);

        Ok(WindowSurface {
            entry,
            renderer: SceneRenderer::new(),
            size: Viewport::new(0, 0),
            clear_color: self.config.clear_color,
        })
    }
}

fn unavailable(err: anyhow::Error) -> StageError {
    StageError::SurfaceUnavailable(format!("{err:#}"))
}

/// Client area in logical pixels, rounded.
fn logical_size(inner: PhysicalSize<u32>, scale_factor: f64) -> Viewport {
    let logical: LogicalSize<f64> = inner.to_logical(scale_factor);
    Viewport::new(logical.width.round() as u32, logical.height.round() as u32)
}

/// Backing size for `size`.
///
/// When `size` is the window's own client area the physical size is taken
/// as-is; scaling the rounded logical size back up can land a pixel off.
fn physical_size(size: Viewport, inner: PhysicalSize<u32>, scale_factor: f64) -> PhysicalSize<u32> {
    if size == logical_size(inner, scale_factor) {
        return inner;
    }
    let (w, h) = size.to_physical(scale_factor);
    PhysicalSize::new(w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_area_keeps_exact_physical_size_at_fractional_scales() {
        for scale in [1.0, 1.25, 1.5, 1.75, 2.25] {
            for width in 990..1010u32 {
                let inner = PhysicalSize::new(width, 721);
                let logical = logical_size(inner, scale);
                assert_eq!(physical_size(logical, inner, scale), inner, "scale {scale}, width {width}");
            }
        }
    }

    #[test]
    fn other_sizes_scale_by_the_factor() {
        let inner = PhysicalSize::new(1500, 900);
        assert_eq!(physical_size(Viewport::new(400, 300), inner, 1.5), PhysicalSize::new(600, 450));
    }

    #[test]
    fn logical_size_rounds() {
        assert_eq!(logical_size(PhysicalSize::new(1003, 601), 1.5), Viewport::new(669, 401));
    }
}
