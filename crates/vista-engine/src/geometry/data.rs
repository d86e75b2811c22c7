use glam::Vec3;

/// How vertices are assembled into primitives.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Topology {
    Triangles,
    /// Independent segments, two vertices each.
    Lines,
    /// Connected polyline through all vertices.
    LineStrip,
    Points,
}

/// CPU-side geometry.
///
/// `normals` is either empty or matches `positions` in length. `line_distances`
/// is populated by [`Geometry::compute_line_distances`] for dashed line
/// materials.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub topology: Topology,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Option<Vec<u32>>,
    pub line_distances: Option<Vec<f32>>,
}

impl Geometry {
    pub fn new(topology: Topology, positions: Vec<Vec3>) -> Self {
        Self {
            topology,
            positions,
            normals: Vec::new(),
            indices: None,
            line_distances: None,
        }
    }

    pub fn indexed(topology: Topology, positions: Vec<Vec3>, normals: Vec<Vec3>, indices: Vec<u32>) -> Self {
        debug_assert!(normals.is_empty() || normals.len() == positions.len());
        Self {
            topology,
            positions,
            normals,
            indices: Some(indices),
            line_distances: None,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of elements the draw call consumes (indices if present, else vertices).
    pub fn element_count(&self) -> usize {
        self.indices.as_ref().map_or(self.positions.len(), Vec::len)
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` when empty.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        Some(self.positions.iter().fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p))))
    }

    /// Translates all positions so the bounding box is centered on the origin.
    pub fn center(&mut self) {
        let Some((lo, hi)) = self.bounds() else { return };
        let offset = (lo + hi) * 0.5;
        for p in &mut self.positions {
            *p -= offset;
        }
    }

    /// Fills `line_distances` with the distance along the line to each vertex.
    ///
    /// Strips accumulate from the first vertex; independent segments restart at
    /// zero for every pair. Other topologies are left untouched.
    pub fn compute_line_distances(&mut self) {
        let positions = self.ordered_positions();
        let distances = match self.topology {
            Topology::LineStrip => {
                let mut acc = 0.0;
                let mut out = Vec::with_capacity(positions.len());
                for (i, p) in positions.iter().enumerate() {
                    if i > 0 {
                        acc += positions[i - 1].distance(*p);
                    }
                    out.push(acc);
                }
                out
            }
            Topology::Lines => positions
                .chunks(2)
                .flat_map(|pair| match pair {
                    [a, b] => vec![0.0, a.distance(*b)],
                    _ => vec![0.0],
                })
                .collect(),
            Topology::Triangles | Topology::Points => return,
        };

        // Distances are per drawn vertex; an indexed line is flattened first.
        if self.indices.is_some() {
            self.positions = positions;
            self.indices = None;
            self.normals.clear();
        }
        self.line_distances = Some(distances);
    }

    fn ordered_positions(&self) -> Vec<Vec3> {
        match &self.indices {
            Some(indices) => indices
                .iter()
                .filter_map(|i| self.positions.get(*i as usize).copied())
                .collect(),
            None => self.positions.clone(),
        }
    }
}
