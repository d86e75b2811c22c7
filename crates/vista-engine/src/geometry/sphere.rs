use std::f32::consts::PI;

use glam::Vec3;

use crate::error::{ensure_positive, ensure_segments, StageError};

use super::{Geometry, Topology};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SphereParams {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl SphereParams {
    pub fn new(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Self { radius, width_segments, height_segments }
    }
}

/// UV sphere centered on the origin.
///
/// Produces `(ws + 1) * (hs + 1)` vertices; the pole rows are collapsed so no
/// degenerate triangles are emitted there.
pub fn sphere(params: SphereParams) -> Result<Geometry, StageError> {
    let radius = ensure_positive("radius", params.radius)?;
    let ws = ensure_segments("width_segments", params.width_segments, 3)?;
    let hs = ensure_segments("height_segments", params.height_segments, 2)?;

    let mut positions = Vec::with_capacity(((ws + 1) * (hs + 1)) as usize);
    let mut normals = Vec::with_capacity(positions.capacity());

    for iy in 0..=hs {
        let theta = iy as f32 / hs as f32 * PI;
        for ix in 0..=ws {
            let phi = ix as f32 / ws as f32 * 2.0 * PI;
            let p = Vec3::new(
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            );
            positions.push(p);
            normals.push(p.normalize_or_zero());
        }
    }

    let row = ws + 1;
    let mut indices = Vec::new();
    for iy in 0..hs {
        for ix in 0..ws {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != hs - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    Ok(Geometry::indexed(Topology::Triangles, positions, normals, indices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn vertex_count_matches_grid() {
        let g = sphere(SphereParams::new(1.0, 12, 12)).unwrap();
        assert_eq!(g.vertex_count(), 13 * 13);
    }

    #[test]
    fn pole_rows_emit_single_triangles() {
        let g = sphere(SphereParams::new(1.0, 8, 4)).unwrap();
        // 8 per pole row, 16 per inner row.
        assert_eq!(g.element_count(), 3 * (8 + 16 + 16 + 8));
    }

    #[test]
    fn vertices_sit_on_radius() {
        let g = sphere(SphereParams::new(0.7, 32, 32)).unwrap();
        for p in &g.positions {
            assert_relative_eq!(p.length(), 0.7, epsilon = 1e-5);
        }
    }

    #[test]
    fn rejects_too_few_segments() {
        assert!(sphere(SphereParams::new(1.0, 2, 12)).is_err());
        assert!(sphere(SphereParams::new(1.0, 12, 1)).is_err());
        assert!(sphere(SphereParams::new(-1.0, 12, 12)).is_err());
    }
}
