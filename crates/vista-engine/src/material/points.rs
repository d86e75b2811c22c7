use crate::coords::Color;
use crate::error::{ensure_positive, StageError};

/// Square point sprites.
///
/// With `size_attenuation` the size is in world units and shrinks with
/// distance; without it the size is in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointsMaterial {
    pub color: Color,
    pub size: f32,
    pub size_attenuation: bool,
}

impl PointsMaterial {
    pub fn new(color: Color, size: f32, size_attenuation: bool) -> Result<Self, StageError> {
        Ok(Self {
            color,
            size: ensure_positive("size", size)?,
            size_attenuation,
        })
    }
}
