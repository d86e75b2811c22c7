//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the stage's window, and forwards resize,
//! redraw and input events to the [`Stage`](crate::stage::Stage).

mod runtime;
mod surface;

pub use runtime::{Runtime, RuntimeConfig};
pub use surface::{WindowMount, WindowSurface};
