//! Time subsystem.
//!
//! Provides the monotonic clock that feeds `Stage::render_frame`:
//! - one `FrameClock` per render loop
//! - call `tick()` once per redraw to obtain `FrameTime`

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
