use std::collections::HashSet;

use super::{Geometry, Topology};

/// Extracts the unique edges of a triangle geometry as independent segments.
///
/// Edges shared by two triangles are emitted once. Non-triangle input is
/// returned as an empty line geometry.
pub fn wireframe(source: &Geometry) -> Geometry {
    let mut out = Geometry::indexed(Topology::Lines, source.positions.clone(), Vec::new(), Vec::new());
    if source.topology != Topology::Triangles {
        out.positions.clear();
        return out;
    }

    let triangles: Vec<[u32; 3]> = match &source.indices {
        Some(indices) => indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]]).collect(),
        None => (0..source.positions.len() as u32 / 3)
            .map(|t| [t * 3, t * 3 + 1, t * 3 + 2])
            .collect(),
    };

    let mut seen = HashSet::new();
    let mut indices = Vec::new();
    for [a, b, c] in triangles {
        for (x, y) in [(a, b), (b, c), (c, a)] {
            let key = (x.min(y), x.max(y));
            if seen.insert(key) {
                indices.extend_from_slice(&[key.0, key.1]);
            }
        }
    }

    out.indices = Some(indices);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{cuboid, CuboidParams};
    use glam::Vec3;

    #[test]
    fn quad_shares_its_diagonal() {
        let quad = Geometry::indexed(
            Topology::Triangles,
            vec![Vec3::ZERO, Vec3::X, Vec3::X + Vec3::Y, Vec3::Y],
            Vec::new(),
            vec![0, 1, 2, 0, 2, 3],
        );
        let w = wireframe(&quad);
        assert_eq!(w.topology, Topology::Lines);
        assert_eq!(w.element_count(), 5 * 2);
    }

    #[test]
    fn cube_faces_keep_their_own_edges() {
        // Box faces do not share vertices, so every face contributes 4 sides + 1 diagonal.
        let g = cuboid(CuboidParams::new(1.0, 1.0, 1.0)).unwrap();
        assert_eq!(wireframe(&g).element_count(), 6 * 5 * 2);
    }

    #[test]
    fn non_indexed_triangles_are_supported() {
        let tri = Geometry::new(Topology::Triangles, vec![Vec3::ZERO, Vec3::X, Vec3::Y]);
        assert_eq!(wireframe(&tri).element_count(), 6);
    }

    #[test]
    fn lines_yield_nothing() {
        let line = Geometry::new(Topology::LineStrip, vec![Vec3::ZERO, Vec3::X]);
        assert_eq!(wireframe(&line).element_count(), 0);
    }
}
