use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use super::{Geometry, Topology};

/// Divisions used when a caller does not pick one.
pub const DEFAULT_CURVE_DIVISIONS: u32 = 5;

/// Parametric curve over `t` in `[0, 1]`.
pub trait Curve {
    fn point(&self, t: f32) -> Vec3;

    /// `divisions + 1` evenly spaced samples, endpoints included.
    fn points(&self, divisions: u32) -> Vec<Vec3> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| self.point(i as f32 / divisions as f32))
            .collect()
    }
}

/// One period of a sine wave along X, scaled uniformly.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SinCurve {
    pub scale: f32,
}

impl Curve for SinCurve {
    fn point(&self, t: f32) -> Vec3 {
        Vec3::new(t * 3.0 - 1.5, (TAU * t).sin(), 0.0) * self.scale
    }
}

/// Connected line through `points`.
pub fn polyline(points: Vec<Vec3>) -> Geometry {
    Geometry::new(Topology::LineStrip, points)
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum Segment {
    Line(Vec2, Vec2),
    Cubic(Vec2, Vec2, Vec2, Vec2),
}

impl Segment {
    fn sample(&self, divisions: u32, out: &mut Vec<Vec2>) {
        match *self {
            Segment::Line(a, b) => {
                out.push(a);
                out.push(b);
            }
            Segment::Cubic(p0, c1, c2, p3) => {
                for i in 0..=divisions {
                    let t = i as f32 / divisions as f32;
                    let k = 1.0 - t;
                    out.push(
                        p0 * (k * k * k) + c1 * (3.0 * k * k * t) + c2 * (3.0 * k * t * t) + p3 * (t * t * t),
                    );
                }
            }
        }
    }
}

/// 2D outline built from lines and cubic Bézier segments, in the XY plane.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    segments: Vec<Segment>,
    start: Vec2,
    cursor: Vec2,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.start = Vec2::new(x, y);
        self.cursor = self.start;
        self
    }

    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        let to = Vec2::new(x, y);
        self.segments.push(Segment::Line(self.cursor, to));
        self.cursor = to;
        self
    }

    pub fn bezier_curve_to(&mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) -> &mut Self {
        let to = Vec2::new(x, y);
        self.segments.push(Segment::Cubic(
            self.cursor,
            Vec2::new(c1x, c1y),
            Vec2::new(c2x, c2y),
            to,
        ));
        self.cursor = to;
        self
    }

    /// Closes the current subpath back to the last `move_to`.
    pub fn close_path(&mut self) -> &mut Self {
        if self.cursor != self.start {
            self.segments.push(Segment::Line(self.cursor, self.start));
            self.cursor = self.start;
        }
        self
    }

    /// Samples every segment, dropping consecutive duplicates.
    ///
    /// Lines contribute their endpoints, Béziers `divisions + 1` samples.
    pub fn points(&self, divisions: u32) -> Vec<Vec2> {
        let divisions = divisions.max(1);
        let mut raw = Vec::new();
        for seg in &self.segments {
            seg.sample(divisions, &mut raw);
        }
        raw.dedup();
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ── curves ────────────────────────────────────────────────────────────

    #[test]
    fn sin_curve_endpoints() {
        let c = SinCurve { scale: 4.0 };
        let pts = c.points(DEFAULT_CURVE_DIVISIONS);
        assert_eq!(pts.len(), 6);
        assert_relative_eq!(pts[0].x, -6.0);
        assert_relative_eq!(pts[5].x, 6.0);
        assert_relative_eq!(pts[5].y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn zero_divisions_still_spans_the_curve() {
        let c = SinCurve { scale: 1.0 };
        assert_eq!(c.points(0).len(), 2);
    }

    // ── paths ─────────────────────────────────────────────────────────────

    #[test]
    fn closed_square_returns_to_start() {
        let mut path = Path::new();
        path.move_to(1.0, 1.0)
            .line_to(1.0, -1.0)
            .line_to(-1.0, -1.0)
            .line_to(-1.0, 1.0)
            .close_path();
        let pts = path.points(12);
        assert_eq!(pts.len(), 5);
        assert_eq!(pts.first(), pts.last());
    }

    #[test]
    fn bezier_hits_its_endpoints() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0).bezier_curve_to(0.0, 1.0, 1.0, 1.0, 1.0, 0.0);
        let pts = path.points(10);
        assert_eq!(pts.len(), 11);
        assert_eq!(pts[0], Vec2::ZERO);
        assert_relative_eq!(pts[10].x, 1.0);
        assert_relative_eq!(pts[5].y, 0.75);
    }
}
