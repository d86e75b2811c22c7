use glam::Vec3;

use crate::error::{ensure_positive, ensure_segments, StageError};

use super::{Geometry, Topology};

/// Box dimensions and per-axis subdivision.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CuboidParams {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub depth_segments: u32,
}

impl CuboidParams {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
            width_segments: 1,
            height_segments: 1,
            depth_segments: 1,
        }
    }

    pub fn segments(mut self, width: u32, height: u32, depth: u32) -> Self {
        self.width_segments = width;
        self.height_segments = height;
        self.depth_segments = depth;
        self
    }
}

/// Axis-aligned box centered on the origin.
///
/// Each face is its own grid so corners are not shared and normals stay flat;
/// a box with segments `(w, h, d)` has
/// `2 * ((w+1)(h+1) + (h+1)(d+1) + (w+1)(d+1))` vertices.
pub fn cuboid(params: CuboidParams) -> Result<Geometry, StageError> {
    let width = ensure_positive("width", params.width)?;
    let height = ensure_positive("height", params.height)?;
    let depth = ensure_positive("depth", params.depth)?;
    let ws = ensure_segments("width_segments", params.width_segments, 1)?;
    let hs = ensure_segments("height_segments", params.height_segments, 1)?;
    let ds = ensure_segments("depth_segments", params.depth_segments, 1)?;

    let mut out = Faces::default();
    // (u, v, w) axes, u/v direction, plane extents, grid.
    out.plane([2, 1, 0], -1.0, -1.0, depth, height, width, ds, hs); // +x
    out.plane([2, 1, 0], 1.0, -1.0, depth, height, -width, ds, hs); // -x
    out.plane([0, 2, 1], 1.0, 1.0, width, depth, height, ws, ds); // +y
    out.plane([0, 2, 1], 1.0, -1.0, width, depth, -height, ws, ds); // -y
    out.plane([0, 1, 2], 1.0, -1.0, width, height, depth, ws, hs); // +z
    out.plane([0, 1, 2], -1.0, -1.0, width, height, -depth, ws, hs); // -z

    Ok(Geometry::indexed(Topology::Triangles, out.positions, out.normals, out.indices))
}

#[derive(Default)]
struct Faces {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    indices: Vec<u32>,
}

impl Faces {
    #[allow(clippy::too_many_arguments)]
    fn plane(
        &mut self,
        [u, v, w]: [usize; 3],
        udir: f32,
        vdir: f32,
        width: f32,
        height: f32,
        depth: f32,
        grid_x: u32,
        grid_y: u32,
    ) {
        let base = self.positions.len() as u32;
        let seg_w = width / grid_x as f32;
        let seg_h = height / grid_y as f32;
        let gx1 = grid_x + 1;

        for iy in 0..=grid_y {
            let y = iy as f32 * seg_h - height / 2.0;
            for ix in 0..=grid_x {
                let x = ix as f32 * seg_w - width / 2.0;

                let mut p = [0.0f32; 3];
                p[u] = x * udir;
                p[v] = y * vdir;
                p[w] = depth / 2.0;

                let mut n = [0.0f32; 3];
                n[w] = if depth > 0.0 { 1.0 } else { -1.0 };

                self.positions.push(Vec3::from_array(p));
                self.normals.push(Vec3::from_array(n));
            }
        }

        for iy in 0..grid_y {
            for ix in 0..grid_x {
                let a = base + ix + gx1 * iy;
                let b = base + ix + gx1 * (iy + 1);
                let c = base + (ix + 1) + gx1 * (iy + 1);
                let d = base + (ix + 1) + gx1 * iy;
                self.indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_cube_counts() {
        let g = cuboid(CuboidParams::new(1.0, 1.0, 1.0)).unwrap();
        assert_eq!(g.vertex_count(), 24);
        assert_eq!(g.element_count(), 36);
    }

    #[test]
    fn segmented_cube_counts() {
        let g = cuboid(CuboidParams::new(1.0, 1.0, 1.0).segments(2, 2, 2)).unwrap();
        assert_eq!(g.vertex_count(), 2 * (9 + 9 + 9));
        assert_eq!(g.element_count(), 6 * 4 * 6);
    }

    #[test]
    fn vertices_lie_on_the_surface() {
        let g = cuboid(CuboidParams::new(2.0, 4.0, 6.0)).unwrap();
        for p in &g.positions {
            let on_face = (p.x.abs() - 1.0).abs() < 1e-6
                || (p.y.abs() - 2.0).abs() < 1e-6
                || (p.z.abs() - 3.0).abs() < 1e-6;
            assert!(on_face, "{p:?} is inside the box");
        }
    }

    #[test]
    fn normals_point_outward() {
        let g = cuboid(CuboidParams::new(1.0, 1.0, 1.0)).unwrap();
        for (p, n) in g.positions.iter().zip(&g.normals) {
            assert!(p.dot(*n) > 0.0);
        }
    }

    #[test]
    fn rejects_bad_dimensions() {
        assert!(matches!(
            cuboid(CuboidParams::new(0.0, 1.0, 1.0)),
            Err(StageError::InvalidParameter { name: "width", .. })
        ));
        assert!(cuboid(CuboidParams::new(1.0, 1.0, 1.0).segments(1, 0, 1)).is_err());
    }
}
