use std::f32::consts::TAU;

use glam::Vec3;

use crate::error::{ensure_positive, ensure_segments, StageError};

use super::{Geometry, Topology};

/// Tube swept along a (p, q) torus knot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TorusKnotParams {
    pub radius: f32,
    pub tube: f32,
    pub tubular_segments: u32,
    pub radial_segments: u32,
    /// Windings around the axis of rotational symmetry.
    pub p: u32,
    /// Windings around the interior circle.
    pub q: u32,
}

impl Default for TorusKnotParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            tube: 0.4,
            tubular_segments: 64,
            radial_segments: 8,
            p: 2,
            q: 3,
        }
    }
}

pub fn torus_knot(params: TorusKnotParams) -> Result<Geometry, StageError> {
    let radius = ensure_positive("radius", params.radius)?;
    let tube = ensure_positive("tube", params.tube)?;
    let tubular = ensure_segments("tubular_segments", params.tubular_segments, 3)?;
    let radial = ensure_segments("radial_segments", params.radial_segments, 3)?;
    let p = ensure_segments("p", params.p, 1)? as f32;
    let q = ensure_segments("q", params.q, 1)? as f32;

    let curve = |u: f32| {
        let q_over_p = q / p * u;
        let cs = q_over_p.cos();
        Vec3::new(
            radius * (2.0 + cs) * 0.5 * u.cos(),
            radius * (2.0 + cs) * 0.5 * u.sin(),
            radius * q_over_p.sin() * 0.5,
        )
    };

    let mut positions = Vec::with_capacity(((tubular + 1) * (radial + 1)) as usize);
    let mut normals = Vec::with_capacity(positions.capacity());

    for i in 0..=tubular {
        let u = i as f32 / tubular as f32 * p * TAU;
        let p1 = curve(u);
        let p2 = curve(u + 0.01);

        // Frenet-like frame from the tangent and the sum of neighbouring points.
        let t = p2 - p1;
        let mut n = p2 + p1;
        let b = t.cross(n).normalize_or_zero();
        n = b.cross(t).normalize_or_zero();

        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();
            let vertex = p1 + n * cx + b * cy;
            positions.push(vertex);
            normals.push((vertex - p1).normalize_or_zero());
        }
    }

    let row = radial + 1;
    let mut indices = Vec::with_capacity((tubular * radial * 6) as usize);
    for j in 1..=tubular {
        for i in 1..=radial {
            let a = row * (j - 1) + (i - 1);
            let b = row * j + (i - 1);
            let c = row * j + i;
            let d = row * (j - 1) + i;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    Ok(Geometry::indexed(Topology::Triangles, positions, normals, indices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_knot_counts() {
        let g = torus_knot(TorusKnotParams::default()).unwrap();
        assert_eq!(g.vertex_count(), 65 * 9);
        assert_eq!(g.element_count(), 64 * 8 * 6);
    }

    #[test]
    fn normals_are_unit_length() {
        let g = torus_knot(TorusKnotParams::default()).unwrap();
        for n in &g.normals {
            assert_relative_eq!(n.length(), 1.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn rejects_zero_windings() {
        let params = TorusKnotParams { q: 0, ..TorusKnotParams::default() };
        assert!(torus_knot(params).is_err());
    }
}
