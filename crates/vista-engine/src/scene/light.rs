use glam::Vec3;

use crate::coords::Color;

/// Directional light.
///
/// Light travels from the node's world position toward `target`, matching the
/// usual "sun at (-1, 2, 4) shining at the origin" setup.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Light {
    pub color: Color,
    pub intensity: f32,
    pub target: Vec3,
}

impl Light {
    pub fn directional(color: Color, intensity: f32) -> Self {
        Self { color, intensity, target: Vec3::ZERO }
    }
}
