//! Shape value types handed between the kernel and its hosts.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, instrument};

use crate::error::KernelError;
use crate::geometry::point::{Point2d, Point3d};

/// A straight line (`radius == 0`) or a circular arc (`radius > 0`).
///
/// Arcs must go through tessellation before a host can draw them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point2d,
    pub end: Point2d,
    pub radius: f64,
    pub clockwise: bool,
}

impl Segment {
    pub fn line(start: Point2d, end: Point2d) -> Self {
        Self {
            start,
            end,
            radius: 0.0,
            clockwise: false,
        }
    }

    pub fn arc(start: Point2d, end: Point2d, radius: f64, clockwise: bool) -> Self {
        Self {
            start,
            end,
            radius,
            clockwise,
        }
    }

    pub fn is_arc(&self) -> bool {
        self.radius > 0.0
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn map_points(&self, mut f: impl FnMut(&Point2d) -> Point2d) -> Self {
        Self {
            start: f(&self.start),
            end: f(&self.end),
            ..*self
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.1};{:.1}] -> [{:.1};{:.1}]",
            self.start.x, self.start.y, self.end.x, self.end.y
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleShape {
    pub center: Point2d,
    pub radius: f64,
}

impl CircleShape {
    pub fn new(center: Point2d, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Circle given in centimetres, stored in pixels.
    pub fn from_cm(x: f64, y: f64, radius: f64) -> Self {
        Self::new(
            Point2d::new(x, y).scaled(crate::PIXELS_PER_CM),
            radius * crate::PIXELS_PER_CM,
        )
    }
}

/// Pair of vertex indices into a [`Polyhedron`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub start: usize,
    pub end: usize,
}

impl Edge {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Wireframe mesh: vertices plus index-pair edges.
///
/// Every edge index is checked against the vertex count, so a built mesh
/// never refers to a missing vertex.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyhedron {
    vertices: Vec<Point3d>,
    edges: Vec<Edge>,
}

impl Polyhedron {
    pub fn new(vertices: Vec<Point3d>, edges: Vec<Edge>) -> Result<Self, KernelError> {
        let mut mesh = Self {
            vertices,
            edges: Vec::with_capacity(edges.len()),
        };
        for edge in edges {
            mesh.add_edge(edge)?;
        }
        Ok(mesh)
    }

    pub fn vertices(&self) -> &[Point3d] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn add_vertex(&mut self, p: Point3d) -> usize {
        self.vertices.push(p);
        self.vertices.len() - 1
    }

    pub fn add_edge(&mut self, edge: Edge) -> Result<(), KernelError> {
        let vertex_count = self.vertices.len();
        for index in [edge.start, edge.end] {
            if index >= vertex_count {
                return Err(KernelError::EdgeIndexOutOfRange {
                    edge: self.edges.len(),
                    index,
                    vertex_count,
                });
            }
        }
        self.edges.push(edge);
        Ok(())
    }

    /// Endpoints of every edge.
    pub fn edge_endpoints(&self) -> impl Iterator<Item = (Point3d, Point3d)> + '_ {
        self.edges
            .iter()
            .map(|e| (self.vertices[e.start], self.vertices[e.end]))
    }

    /// Prism over a star polygon, centred on the origin and extruded along Z.
    ///
    /// Each base ring alternates outer and inner radius starting at −90°.
    /// Vertices `0..2n` form the bottom ring (`z = −height/2`) and
    /// `2n..4n` the top ring. Edges per ring index `i` are: bottom ring,
    /// top ring, then the vertical.
    #[instrument]
    pub fn star_prism(
        outer_radius: f64,
        inner_radius: f64,
        height: f64,
        points: usize,
    ) -> Result<Self, KernelError> {
        if points < 2 {
            return Err(KernelError::TooFewStarPoints { points });
        }
        info!(outer_radius, inner_radius, height, points, "creating star prism");

        let per_layer = points * 2;
        let angle_step = 360.0 / per_layer as f64;
        let half_height = height / 2.0;

        let mut mesh = Self::default();
        for z in [-half_height, half_height] {
            for i in 0..per_layer {
                let r = if i % 2 == 0 { outer_radius } else { inner_radius };
                let angle = (i as f64 * angle_step).to_radians() - std::f64::consts::FRAC_PI_2;
                mesh.add_vertex(Point3d::new(r * angle.cos(), r * angle.sin(), z));
            }
        }

        for i in 0..per_layer {
            let next = (i + 1) % per_layer;
            mesh.add_edge(Edge::new(i, next))?;
            mesh.add_edge(Edge::new(i + per_layer, next + per_layer))?;
            mesh.add_edge(Edge::new(i, i + per_layer))?;
        }
        debug!(
            vertices = mesh.vertices.len(),
            edges = mesh.edges.len(),
            "star prism built"
        );
        Ok(mesh)
    }
}

/// An editable set of straight segments with in-place transforms.
///
/// Scaling and rotation use the centroid of all endpoints; on an empty set
/// they do nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentSet {
    segments: Vec<Segment>,
}

impl SegmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Append the 50..150 sample square.
    pub fn sample_square(&mut self) {
        let corners = [
            Point2d::new(50.0, 50.0),
            Point2d::new(150.0, 50.0),
            Point2d::new(150.0, 150.0),
            Point2d::new(50.0, 150.0),
        ];
        for i in 0..corners.len() {
            self.push(Segment::line(corners[i], corners[(i + 1) % corners.len()]));
        }
    }

    /// Append the diagonal `(0,0) → (100,100)`.
    pub fn add_line(&mut self) {
        self.push(Segment::line(Point2d::ORIGIN, Point2d::new(100.0, 100.0)));
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }

    /// Mean of all start and end points, or `None` for an empty set.
    pub fn centroid(&self) -> Option<Point2d> {
        if self.segments.is_empty() {
            return None;
        }
        let n = (self.segments.len() * 2) as f64;
        let (sx, sy) = self.segments.iter().fold((0.0, 0.0), |(sx, sy), s| {
            (sx + s.start.x + s.end.x, sy + s.start.y + s.end.y)
        });
        Some(Point2d::new(sx / n, sy / n))
    }

    fn map_all(&mut self, mut f: impl FnMut(&Point2d) -> Point2d) {
        for s in &mut self.segments {
            *s = s.map_points(&mut f);
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.map_all(|p| Point2d::new(p.x + dx, p.y + dy));
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        let Some(c) = self.centroid() else {
            return;
        };
        self.map_all(|p| Point2d::new(c.x + (p.x - c.x) * sx, c.y + (p.y - c.y) * sy));
    }

    pub fn rotate(&mut self, angle_degrees: f64) {
        let Some(c) = self.centroid() else {
            return;
        };
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        self.map_all(|p| {
            let rx = p.x - c.x;
            let ry = p.y - c.y;
            Point2d::new(c.x + rx * cos - ry * sin, c.y + rx * sin + ry * cos)
        });
    }

    /// `x += kx·y`, `y += ky·x`, both from the unsheared coordinates.
    pub fn shear(&mut self, kx: f64, ky: f64) {
        self.map_all(|p| Point2d::new(p.x + kx * p.y, p.y + ky * p.x));
    }

    /// Perspective-style shrink `p · 100 / (100 + factor)`.
    ///
    /// Skipped when the denominator is exactly zero.
    pub fn project(&mut self, factor: f64) {
        let depth = 100.0 + factor;
        if depth == 0.0 {
            debug!(factor, "projection skipped at zero depth");
            return;
        }
        self.map_all(|p| Point2d::new(p.x * 100.0 / depth, p.y * 100.0 / depth));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_star_prism_counts() {
        let mesh = Polyhedron::star_prism(50.0, 20.0, 100.0, 5).unwrap();
        assert_eq!(mesh.vertices().len(), 20);
        assert_eq!(mesh.edges().len(), 30);
        // first vertex is the outer point straight "up" (−90°) on the bottom ring
        assert_abs_diff_eq!(
            mesh.vertices()[0],
            Point3d::new(0.0, -50.0, -50.0),
            epsilon = 1e-9
        );
        assert_eq!(mesh.edges()[2], Edge::new(0, 10));
    }

    #[test]
    fn test_star_prism_rejects_too_few_points() {
        assert_eq!(
            Polyhedron::star_prism(50.0, 20.0, 100.0, 1),
            Err(KernelError::TooFewStarPoints { points: 1 })
        );
    }

    #[test]
    fn test_edge_index_validated() {
        let mut mesh = Polyhedron::new(vec![Point3d::ORIGIN, Point3d::new(1.0, 0.0, 0.0)], vec![])
            .unwrap();
        assert!(mesh.add_edge(Edge::new(0, 1)).is_ok());
        let err = mesh.add_edge(Edge::new(1, 2)).unwrap_err();
        assert_eq!(
            err,
            KernelError::EdgeIndexOutOfRange {
                edge: 1,
                index: 2,
                vertex_count: 2
            }
        );
        assert!(Polyhedron::new(vec![], vec![Edge::new(0, 0)]).is_err());
    }

    #[test]
    fn test_centroid_scale_keeps_center() {
        let mut set = SegmentSet::new();
        set.sample_square();
        let before = set.centroid().unwrap();
        set.scale(2.0, 0.5);
        assert_abs_diff_eq!(set.centroid().unwrap(), before, epsilon = 1e-9);
        assert_abs_diff_eq!(set.segments()[0].start, Point2d::new(0.0, 75.0), epsilon = 1e-9);
    }

    #[test]
    fn test_rotate_square_about_center() {
        let mut set = SegmentSet::new();
        set.sample_square();
        set.rotate(90.0);
        assert_abs_diff_eq!(set.segments()[0].start, Point2d::new(150.0, 50.0), epsilon = 1e-9);
    }

    #[test]
    fn test_shear_uses_pre_shear_coordinates() {
        let mut set = SegmentSet::new();
        set.add_line();
        set.shear(0.5, 0.5);
        assert_abs_diff_eq!(set.segments()[0].end, Point2d::new(150.0, 150.0), epsilon = 1e-12);
    }

    #[test]
    fn test_project_skips_zero_depth() {
        let mut set = SegmentSet::new();
        set.add_line();
        set.project(-100.0);
        assert_eq!(set.segments()[0].end, Point2d::new(100.0, 100.0));
        set.project(100.0);
        assert_abs_diff_eq!(set.segments()[0].end, Point2d::new(50.0, 50.0), epsilon = 1e-12);
    }

    #[test]
    fn test_empty_set_ops_are_noops() {
        let mut set = SegmentSet::new();
        set.scale(2.0, 2.0);
        set.rotate(45.0);
        assert!(set.is_empty());
        assert!(set.centroid().is_none());
    }

    #[test]
    fn test_segment_display() {
        let s = Segment::line(Point2d::new(1.0, 2.0), Point2d::new(3.0, 4.0));
        assert_eq!(s.to_string(), "[1.0;2.0] -> [3.0;4.0]");
    }
}
