//! Vista engine crate.
//!
//! A frame-loop controller ([`stage::Stage`]) driving small 3D scenes built by
//! [`stage::SceneBuilder`] strategies, plus the scene graph, procedural geometry
//! and the wgpu forward renderer those scenes are drawn with.

pub mod assets;
pub mod builders;
pub mod camera;
pub mod controls;
pub mod coords;
pub mod device;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod material;
pub mod render;
pub mod scene;
pub mod stage;
pub mod time;
pub mod window;

mod error;

pub use error::{DrawError, StageError};
