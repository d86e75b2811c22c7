//! Camera controls driven by input events.

mod orbit;

pub use orbit::OrbitControls;
