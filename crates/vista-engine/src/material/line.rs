use crate::coords::Color;
use crate::error::{ensure_positive, StageError};

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum LineStyle {
    Solid,
    /// Repeating `dash_size` on / `gap_size` off pattern measured along the
    /// line, multiplied by `scale`. Needs line distances on the geometry.
    Dashed { dash_size: f32, gap_size: f32, scale: f32 },
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineMaterial {
    pub color: Color,
    pub style: LineStyle,
}

impl LineMaterial {
    pub fn basic(color: Color) -> Self {
        Self { color, style: LineStyle::Solid }
    }

    pub fn dashed(color: Color, dash_size: f32, gap_size: f32, scale: f32) -> Result<Self, StageError> {
        Ok(Self {
            color,
            style: LineStyle::Dashed {
                dash_size: ensure_positive("dash_size", dash_size)?,
                gap_size: ensure_positive("gap_size", gap_size)?,
                scale: ensure_positive("scale", scale)?,
            },
        })
    }
}
