//! Materials.
//!
//! Plain parameter structs with a validating `build` step. The renderer maps
//! them onto one uber-shader; unsupported combinations degrade rather than fail.

mod line;
mod mesh;
mod points;

pub use line::{LineMaterial, LineStyle};
pub use mesh::{MeshMaterial, ShadingModel, Side};
pub use points::PointsMaterial;
