//! Scene graph.
//!
//! An arena of transformable nodes plus the geometry they reference. Scene
//! builders populate it once; afterwards only node transforms change.

mod graph;
mod light;
mod node;
mod transform;

pub use graph::{GeometryId, Scene};
pub use light::Light;
pub use node::{Node, NodeId, NodeKind};
pub use transform::Transform;
