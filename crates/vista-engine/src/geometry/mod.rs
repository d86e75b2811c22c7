//! Procedural geometry.
//!
//! Every constructor validates its parameters and returns
//! `StageError::InvalidParameter` instead of producing degenerate buffers.
//! Tessellation layouts follow the conventions common to WebGL scene libraries
//! (plane-per-face boxes, UV spheres with collapsed poles) so vertex counts are
//! predictable.

mod cuboid;
mod curve;
mod data;
mod points;
mod sphere;
mod text;
mod torus_knot;
mod wireframe;

pub use cuboid::{cuboid, CuboidParams};
pub use curve::{polyline, Curve, Path, SinCurve, DEFAULT_CURVE_DIVISIONS};
pub use data::{Geometry, Topology};
pub use points::{point_cloud, random_spread};
pub use sphere::{sphere, SphereParams};
pub use text::{text, TextParams};
pub use torus_knot::{torus_knot, TorusKnotParams};
pub use wireframe::wireframe;
