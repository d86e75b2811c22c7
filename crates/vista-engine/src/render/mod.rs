//! GPU rendering subsystem.
//!
//! [`SceneRenderer`] walks a [`Scene`](crate::scene::Scene) and issues wgpu
//! draws. It owns its GPU resources (pipelines, buffers) and creates them on
//! first use.
//!
//! Convention: right-handed world space, camera looking down -Z, sizes in
//! logical pixels scaled by the pixel ratio when they reach the GPU.

mod ctx;
mod draws;
mod mesh;
mod scene_renderer;
mod uniforms;

pub use ctx::{RenderCtx, RenderTarget};
pub use scene_renderer::SceneRenderer;
