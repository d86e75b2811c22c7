//! Small value types shared by the surface, the camera and the renderer.
//!
//! World space is right-handed, +Y up, camera looking down -Z by default.
//! Surface sizes are logical pixels unless a name says `physical`.

mod color;
mod viewport;

pub use color::Color;
pub use viewport::Viewport;
