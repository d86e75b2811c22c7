use crate::camera::PerspectiveCamera;
use crate::coords::Viewport;
use crate::error::{DrawError, StageError};
use crate::scene::Scene;

/// A drawable target the stage drives.
///
/// Sizes are logical pixels; the surface applies its own pixel ratio when it
/// allocates backing storage.
pub trait RenderSurface {
    /// Current client-area size as reported by the host.
    fn client_size(&self) -> Viewport;

    /// Physical pixels per logical pixel.
    fn pixel_ratio(&self) -> f64;

    /// Size last committed through [`set_size`](Self::set_size).
    fn size(&self) -> Viewport;

    fn set_size(&mut self, size: Viewport);

    /// Draws one frame of `scene` as seen from `camera`.
    fn draw(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), DrawError>;

    /// Asks the host to deliver one more frame callback.
    fn request_frame(&self);
}

/// Acquires a surface from the host.
///
/// Fails with [`StageError::SurfaceUnavailable`] when there is nothing to
/// attach to.
pub trait Mount {
    type Surface: RenderSurface;

    fn mount(self) -> Result<Self::Surface, StageError>;
}
