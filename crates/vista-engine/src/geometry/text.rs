use std::collections::HashSet;

use glam::Vec3;

use crate::error::{ensure_positive, ensure_segments, StageError};

use super::{Geometry, Topology};

/// Extruded text parameters.
///
/// Glyphs are rasterized at `resolution` pixels per em and every covered pixel
/// becomes a cell of the extrusion, so `resolution` trades smoothness for
/// triangle count.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextParams {
    /// Em height in world units.
    pub size: f32,
    /// Extrusion depth along Z.
    pub depth: f32,
    pub resolution: u32,
}

impl Default for TextParams {
    fn default() -> Self {
        Self { size: 1.0, depth: 0.2, resolution: 32 }
    }
}

/// Builds solid text geometry from `font`, baseline on y = 0, starting at x = 0.
///
/// Only faces between filled and empty cells are emitted.
pub fn text(font: &fontdue::Font, content: &str, params: TextParams) -> Result<Geometry, StageError> {
    let size = ensure_positive("size", params.size)?;
    let depth = ensure_positive("depth", params.depth)?;
    let px = ensure_segments("resolution", params.resolution, 4)? as f32;

    let cells = rasterize(font, content, px);
    Ok(extrude(&cells, size / px, depth))
}

/// Turns filled grid cells of side `cell` into a closed solid of thickness `depth`.
///
/// Only faces between filled and empty cells are emitted.
fn extrude(cells: &HashSet<(i32, i32)>, cell: f32, depth: f32) -> Geometry {
    let mut out = Quads::default();
    let (front, back) = (depth / 2.0, -depth / 2.0);

    for &(cx, cy) in cells {
        let x0 = cx as f32 * cell;
        let y0 = cy as f32 * cell;
        let (x1, y1) = (x0 + cell, y0 + cell);

        out.quad(
            [Vec3::new(x0, y0, front), Vec3::new(x1, y0, front), Vec3::new(x1, y1, front), Vec3::new(x0, y1, front)],
            Vec3::Z,
        );
        out.quad(
            [Vec3::new(x1, y0, back), Vec3::new(x0, y0, back), Vec3::new(x0, y1, back), Vec3::new(x1, y1, back)],
            Vec3::NEG_Z,
        );

        if !cells.contains(&(cx - 1, cy)) {
            out.quad(
                [Vec3::new(x0, y0, back), Vec3::new(x0, y0, front), Vec3::new(x0, y1, front), Vec3::new(x0, y1, back)],
                Vec3::NEG_X,
            );
        }
        if !cells.contains(&(cx + 1, cy)) {
            out.quad(
                [Vec3::new(x1, y0, front), Vec3::new(x1, y0, back), Vec3::new(x1, y1, back), Vec3::new(x1, y1, front)],
                Vec3::X,
            );
        }
        if !cells.contains(&(cx, cy - 1)) {
            out.quad(
                [Vec3::new(x0, y0, back), Vec3::new(x1, y0, back), Vec3::new(x1, y0, front), Vec3::new(x0, y0, front)],
                Vec3::NEG_Y,
            );
        }
        if !cells.contains(&(cx, cy + 1)) {
            out.quad(
                [Vec3::new(x0, y1, front), Vec3::new(x1, y1, front), Vec3::new(x1, y1, back), Vec3::new(x0, y1, back)],
                Vec3::Y,
            );
        }
    }

    Geometry::indexed(Topology::Triangles, out.positions, out.normals, out.indices)
}

/// Covered pixels of the laid-out string in a y-up grid, baseline at row 0.
fn rasterize(font: &fontdue::Font, content: &str, px: f32) -> HashSet<(i32, i32)> {
    let mut cells = HashSet::new();
    let mut pen = 0.0f32;

    for ch in content.chars() {
        let (metrics, bitmap) = font.rasterize(ch, px);
        let glyph = GlyphRaster {
            bitmap: &bitmap,
            width: metrics.width,
            height: metrics.height,
            left: pen.round() as i32 + metrics.xmin,
            bottom: metrics.ymin,
        };
        glyph.cover(&mut cells);

        pen += metrics.advance_width;
    }

    cells
}

/// One rasterized glyph placed on the pen grid.
struct GlyphRaster<'a> {
    /// Coverage, rows top to bottom.
    bitmap: &'a [u8],
    width: usize,
    height: usize,
    left: i32,
    /// Bottom edge relative to the baseline.
    bottom: i32,
}

impl GlyphRaster<'_> {
    fn cover(&self, cells: &mut HashSet<(i32, i32)>) {
        for row in 0..self.height {
            let y = self.bottom + (self.height - 1 - row) as i32;
            for col in 0..self.width {
                if self.bitmap[row * self.width + col] >= 128 {
                    cells.insert((self.left + col as i32, y));
                }
            }
        }
    }
}

#[derive(Default)]
struct Quads {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    indices: Vec<u32>,
}

impl Quads {
    /// Corners counter-clockwise when seen from the side `normal` points to.
    fn quad(&mut self, corners: [Vec3; 4], normal: Vec3) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&corners);
        self.normals.extend_from_slice(&[normal; 4]);
        self.indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(list: &[(i32, i32)]) -> HashSet<(i32, i32)> {
        list.iter().copied().collect()
    }

    fn faces_with_normal(g: &Geometry, normal: Vec3) -> usize {
        g.normals.iter().filter(|n| **n == normal).count() / 4
    }

    // ── extrusion ─────────────────────────────────────────────────────────

    #[test]
    fn single_cell_is_a_closed_box() {
        let g = extrude(&cells(&[(0, 0)]), 1.0, 1.0);
        assert_eq!(g.vertex_count(), 6 * 4);
        assert_eq!(g.element_count(), 6 * 6);
    }

    #[test]
    fn neighbours_share_no_inner_wall() {
        let g = extrude(&cells(&[(0, 0), (1, 0)]), 1.0, 1.0);
        assert_eq!(g.vertex_count(), 10 * 4);
        assert_eq!(faces_with_normal(&g, Vec3::Z) + faces_with_normal(&g, Vec3::NEG_Z), 4);
        assert_eq!(faces_with_normal(&g, Vec3::X), 1);
        assert_eq!(faces_with_normal(&g, Vec3::NEG_X), 1);
        assert_eq!(faces_with_normal(&g, Vec3::Y) + faces_with_normal(&g, Vec3::NEG_Y), 4);

        let inner_wall = g
            .positions
            .iter()
            .zip(&g.normals)
            .any(|(p, n)| n.x != 0.0 && p.x == 1.0);
        assert!(!inner_wall);
    }

    #[test]
    fn bounds_follow_cell_size() {
        // size 2 at resolution 4: half-unit cells.
        let g = extrude(&cells(&[(0, 0), (1, 0), (1, 1)]), 2.0 / 4.0, 0.4);
        let (min, max) = g.bounds().unwrap();
        assert!(min.abs_diff_eq(Vec3::new(0.0, 0.0, -0.2), 1e-6), "{min:?}");
        assert!(max.abs_diff_eq(Vec3::new(1.0, 1.0, 0.2), 1e-6), "{max:?}");
    }

    // ── rasterization ─────────────────────────────────────────────────────

    #[test]
    fn glyph_rows_flip_to_y_up() {
        // 2x2 bitmap, only the top-left pixel covered.
        let bitmap = [255u8, 0, 0, 0];
        let glyph = GlyphRaster { bitmap: &bitmap, width: 2, height: 2, left: 3, bottom: -1 };
        let mut out = HashSet::new();
        glyph.cover(&mut out);
        assert_eq!(out, cells(&[(3, 0)]));
    }

    #[test]
    fn faint_coverage_is_ignored() {
        let bitmap = [127u8, 128];
        let glyph = GlyphRaster { bitmap: &bitmap, width: 2, height: 1, left: 0, bottom: 0 };
        let mut out = HashSet::new();
        glyph.cover(&mut out);
        assert_eq!(out, cells(&[(1, 0)]));
    }

    #[test]
    fn quad_winding_matches_normal() {
        let mut q = Quads::default();
        q.quad([Vec3::ZERO, Vec3::X, Vec3::X + Vec3::Y, Vec3::Y], Vec3::Z);
        let [a, b, c] = [q.positions[0], q.positions[1], q.positions[2]];
        assert!((b - a).cross(c - a).dot(Vec3::Z) > 0.0);
    }
}
