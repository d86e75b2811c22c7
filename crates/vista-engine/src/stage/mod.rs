//! Frame loop controller.
//!
//! A [`Stage`] ties a [`RenderSurface`] to a scene produced by a
//! [`SceneBuilder`] and runs the render / update / resize cycle. The host owns
//! the clock and the frame callbacks; the stage only reacts to them.

mod builder;
mod controller;
mod stop;
mod surface;

pub use builder::{ready, BuildFuture, SceneBuilder, DEFAULT_FAR, DEFAULT_FOV, DEFAULT_NEAR};
pub use controller::{LoopState, Stage, StageContext};
pub use stop::StopToken;
pub use surface::{Mount, RenderSurface};
