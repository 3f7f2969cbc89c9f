use geolab_kernel::geometry::curves::FergusonSegment;
use geolab_kernel::geometry::surfaces::SurfaceGrid;
use geolab_kernel::{CircleShape, CurveEval, Matrix4, Point2d, Point3d, ScreenMapping, Segment, SurfaceEval};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Default angular step for arcs and circles, in degrees.
pub const DEFAULT_ANGLE_STEP: f64 = 10.0;

/// Default number of parameter steps per Hermite segment.
pub const DEFAULT_HERMITE_STEPS: usize = 8;

/// Density settings for every tessellation routine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TessellationConfig {
    /// Angular step for arcs and circles, in degrees.
    pub angle_step: f64,
    /// Uniform parameter steps per Hermite segment.
    pub hermite_steps: usize,
}

impl Default for TessellationConfig {
    fn default() -> Self {
        Self {
            angle_step: DEFAULT_ANGLE_STEP,
            hermite_steps: DEFAULT_HERMITE_STEPS,
        }
    }
}

impl TessellationConfig {
    /// Fast preview density.
    pub fn coarse() -> Self {
        Self {
            angle_step: 30.0,
            hermite_steps: 4,
        }
    }

    /// Dense output for exports.
    pub fn fine() -> Self {
        Self {
            angle_step: 2.0,
            hermite_steps: 32,
        }
    }
}

/// A usable angular step: non-positive or non-finite values fall back to
/// [`DEFAULT_ANGLE_STEP`].
fn effective_step(step_degrees: f64) -> f64 {
    if step_degrees.is_finite() && step_degrees > 0.0 {
        step_degrees
    } else {
        debug!(step_degrees, "invalid angle step, using default");
        DEFAULT_ANGLE_STEP
    }
}

/// Tessellate the arc of `radius` from `start` to `end`.
///
/// The centre lies on the chord's perpendicular bisector, on the left of the
/// chord for counter-clockwise arcs and on the right for clockwise ones.
/// A radius that cannot span the chord (`radius ≤ chord/2`) degrades to the
/// straight line `[start, end]`. Otherwise returns `steps + 1` points with
/// `steps = ceil(|sweep°| / step_degrees)`.
pub fn tessellate_arc(
    start: Point2d,
    end: Point2d,
    radius: f64,
    clockwise: bool,
    step_degrees: f64,
) -> Vec<Point2d> {
    let chord = end - start;
    let half_chord = chord.length() / 2.0;
    if radius <= half_chord {
        debug!(radius, half_chord, "radius cannot span chord, emitting straight line");
        return vec![start, end];
    }

    let perpendicular = if clockwise {
        -chord.perpendicular()
    } else {
        chord.perpendicular()
    };
    let distance = (radius * radius - half_chord * half_chord).sqrt();
    let center = start.midpoint(&end) + perpendicular.normalized_or_zero() * distance;

    let start_angle = (start.y - center.y).atan2(start.x - center.x);
    let end_angle = (end.y - center.y).atan2(end.x - center.x);
    let mut sweep = end_angle - start_angle;
    if clockwise && sweep > 0.0 {
        sweep -= std::f64::consts::TAU;
    } else if !clockwise && sweep < 0.0 {
        sweep += std::f64::consts::TAU;
    }

    let steps = (sweep.to_degrees().abs() / effective_step(step_degrees)).ceil() as usize;
    if steps == 0 {
        return vec![start, end];
    }
    let increment = sweep / steps as f64;
    (0..=steps)
        .map(|i| {
            let angle = start_angle + i as f64 * increment;
            Point2d::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect()
}

/// Sample `θ = i·step` for every `θ < 360°`, then repeat the first sample
/// to close the loop.
pub fn tessellate_circle(circle: &CircleShape, step_degrees: f64) -> Vec<Point2d> {
    let step = effective_step(step_degrees);
    let mut points: Vec<Point2d> = (0..)
        .map(|i| i as f64 * step)
        .take_while(|angle| *angle < 360.0)
        .map(|angle: f64| {
            let rad = angle.to_radians();
            Point2d::new(
                circle.center.x + circle.radius * rad.cos(),
                circle.center.y + circle.radius * rad.sin(),
            )
        })
        .collect();
    if let Some(first) = points.first().copied() {
        points.push(first);
    }
    points
}

/// Points of a segment: arcs are tessellated, lines pass through.
pub fn tessellate_segment(segment: &Segment, config: &TessellationConfig) -> Vec<Point2d> {
    if segment.is_arc() {
        tessellate_arc(
            segment.start,
            segment.end,
            segment.radius,
            segment.clockwise,
            config.angle_step,
        )
    } else {
        vec![segment.start, segment.end]
    }
}

/// Evaluate `curve` at `steps + 1` uniform parameters over `[0, 1]`.
pub fn sample_curve(curve: &impl CurveEval, steps: usize) -> Vec<Point2d> {
    let steps = steps.max(1);
    (0..=steps)
        .map(|i| curve.evaluate(i as f64 / steps as f64))
        .collect()
}

/// Tessellate one Hermite segment with `steps` uniform parameter steps.
pub fn tessellate_hermite(segment: &FergusonSegment, steps: usize) -> Vec<Point2d> {
    sample_curve(segment, steps)
}

/// Straight segments between consecutive points.
pub fn polyline_to_segments(points: &[Point2d]) -> Vec<Segment> {
    points
        .windows(2)
        .map(|w| Segment::line(w[0], w[1]))
        .collect()
}

/// Straight-line 3D edges of a wireframe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Wireframe {
    pub lines: Vec<(Point3d, Point3d)>,
}

impl Wireframe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn add_line(&mut self, a: Point3d, b: Point3d) {
        self.lines.push((a, b));
    }

    /// Add a line for each consecutive pair of `points`.
    pub fn add_polyline(&mut self, points: &[Point3d]) {
        for w in points.windows(2) {
            self.add_line(w[0], w[1]);
        }
    }

    /// Transform every endpoint with `matrix` and map it to the screen.
    pub fn project(&self, matrix: &Matrix4, screen: &ScreenMapping) -> Vec<Segment> {
        self.lines
            .iter()
            .map(|(a, b)| Segment::line(screen.project(matrix, a), screen.project(matrix, b)))
            .collect()
    }
}

/// Wireframe of a polar surface over `grid`.
///
/// For each of the `v_steps` angles a longitude runs from `u = 0` to
/// `max_radius`; for every ring `i ≥ 1` a latitude runs through
/// `v_steps + 1` angles and is then closed back to its first sample.
#[instrument(skip(surface))]
pub fn surface_wireframe(surface: &impl SurfaceEval, grid: &SurfaceGrid) -> Wireframe {
    let mut wire = Wireframe::new();

    for j in 0..grid.v_steps {
        let v = grid.v_at(j);
        let longitude: Vec<Point3d> = (0..=grid.u_steps)
            .map(|i| surface.evaluate(grid.u_at(i), v))
            .collect();
        wire.add_polyline(&longitude);
    }

    for i in 1..=grid.u_steps {
        let u = grid.u_at(i);
        let ring: Vec<Point3d> = (0..=grid.v_steps)
            .map(|j| surface.evaluate(u, grid.v_at(j)))
            .collect();
        wire.add_polyline(&ring);
        if let (Some(first), Some(last)) = (ring.first(), ring.last()) {
            wire.add_line(*last, *first);
        }
    }

    debug!(lines = wire.line_count(), "surface wireframe built");
    wire
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use geolab_kernel::Paraboloid;

    #[test]
    fn test_arc_half_chord_radius_is_straight() {
        let a = Point2d::new(0.0, 0.0);
        let b = Point2d::new(10.0, 0.0);
        assert_eq!(tessellate_arc(a, b, 5.0, false, 10.0), vec![a, b]);
        assert_eq!(tessellate_arc(a, b, 1.0, true, 10.0), vec![a, b]);
    }

    #[test]
    fn test_arc_endpoints_and_radius() {
        let a = Point2d::new(0.0, 0.0);
        let b = Point2d::new(10.0, 0.0);
        for clockwise in [false, true] {
            let pts = tessellate_arc(a, b, 8.0, clockwise, 10.0);
            assert!(pts.len() > 2);
            assert_abs_diff_eq!(pts[0], a, epsilon = 1e-9);
            assert_abs_diff_eq!(*pts.last().unwrap(), b, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_arc_center_side_follows_winding() {
        let a = Point2d::new(0.0, 0.0);
        let b = Point2d::new(10.0, 0.0);
        // counter-clockwise: centre on the left (+y), clockwise: right (−y)
        let ccw = tessellate_arc(a, b, 8.0, false, 10.0);
        let cw = tessellate_arc(a, b, 8.0, true, 10.0);
        let center_ccw = Point2d::new(5.0, (64.0f64 - 25.0).sqrt());
        let center_cw = Point2d::new(5.0, -(64.0f64 - 25.0).sqrt());
        for p in &ccw {
            assert!((p.distance_to(&center_ccw) - 8.0).abs() < 1e-9);
        }
        for p in &cw {
            assert!((p.distance_to(&center_cw) - 8.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_arc_step_count() {
        // quarter circle: sweep 90° at 7° steps -> ceil(12.86) = 13 steps
        let r = 10.0;
        let a = Point2d::new(r, 0.0);
        let b = Point2d::new(0.0, r);
        let pts = tessellate_arc(a, b, r, false, 7.0);
        assert_eq!(pts.len(), 14);
        for p in &pts {
            assert!((p.distance_to(&Point2d::ORIGIN) - r).abs() < 1e-9);
        }
    }

    #[test]
    fn test_invalid_step_falls_back() {
        let a = Point2d::new(10.0, 0.0);
        let b = Point2d::new(0.0, 10.0);
        let expected = tessellate_arc(a, b, 10.0, false, DEFAULT_ANGLE_STEP);
        assert_eq!(tessellate_arc(a, b, 10.0, false, 0.0), expected);
        assert_eq!(tessellate_arc(a, b, 10.0, false, f64::NAN), expected);
    }

    #[test]
    fn test_circle_step_90_closes() {
        let circle = CircleShape::new(Point2d::ORIGIN, 10.0);
        let pts = tessellate_circle(&circle, 90.0);
        let expected = [
            Point2d::new(10.0, 0.0),
            Point2d::new(0.0, 10.0),
            Point2d::new(-10.0, 0.0),
            Point2d::new(0.0, -10.0),
            Point2d::new(10.0, 0.0),
        ];
        assert_eq!(pts.len(), expected.len());
        for (p, e) in pts.iter().zip(&expected) {
            assert_abs_diff_eq!(*p, *e, epsilon = 1e-9);
        }
        assert_eq!(pts[0], pts[4]);
    }

    #[test]
    fn test_off_origin_circle_is_translated() {
        let circle = CircleShape::new(Point2d::new(1.0, 1.0), 2.0);
        let pts = tessellate_circle(&circle, 90.0);
        assert_abs_diff_eq!(pts[1], Point2d::new(1.0, 3.0), epsilon = 1e-12);
    }

    #[test]
    fn test_circle_default_density() {
        let circle = CircleShape::new(Point2d::ORIGIN, 1.0);
        assert_eq!(tessellate_circle(&circle, DEFAULT_ANGLE_STEP).len(), 37);
        assert_eq!(tessellate_circle(&circle, -5.0).len(), 37);
    }

    #[test]
    fn test_presets_change_density() {
        let circle = CircleShape::new(Point2d::ORIGIN, 1.0);
        assert_eq!(tessellate_circle(&circle, TessellationConfig::coarse().angle_step).len(), 13);
        assert_eq!(tessellate_circle(&circle, TessellationConfig::fine().angle_step).len(), 181);
        let seg = FergusonSegment::straight(Point2d::ORIGIN, Point2d::new(1.0, 0.0));
        assert_eq!(tessellate_hermite(&seg, TessellationConfig::coarse().hermite_steps).len(), 5);
    }

    #[test]
    fn test_segment_dispatch() {
        let config = TessellationConfig::default();
        let line = Segment::line(Point2d::ORIGIN, Point2d::new(3.0, 4.0));
        assert_eq!(tessellate_segment(&line, &config).len(), 2);
        let arc = Segment::arc(Point2d::ORIGIN, Point2d::new(10.0, 0.0), 8.0, false);
        assert!(tessellate_segment(&arc, &config).len() > 2);
    }

    #[test]
    fn test_hermite_tessellation() {
        let seg = FergusonSegment::straight(Point2d::ORIGIN, Point2d::new(8.0, 0.0));
        let pts = tessellate_hermite(&seg, DEFAULT_HERMITE_STEPS);
        assert_eq!(pts.len(), 9);
        assert_eq!(pts[0], seg.p0);
        assert_abs_diff_eq!(pts[8], seg.p1, epsilon = 1e-12);
    }

    #[test]
    fn test_polyline_to_segments() {
        let pts = [Point2d::ORIGIN, Point2d::new(1.0, 0.0), Point2d::new(1.0, 1.0)];
        let segs = polyline_to_segments(&pts);
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[1].start, pts[1]);
        assert!(polyline_to_segments(&pts[..1]).is_empty());
    }

    #[test]
    fn test_surface_wireframe_counts() {
        let grid = SurfaceGrid::default();
        let wire = surface_wireframe(&Paraboloid::default(), &grid);
        // 20 longitudes of 10 lines + 10 rings of (20 + 1) lines
        assert_eq!(wire.line_count(), 20 * 10 + 10 * 21);
    }

    #[test]
    fn test_wireframe_projection() {
        let mut wire = Wireframe::new();
        wire.add_line(Point3d::ORIGIN, Point3d::new(10.0, 20.0, 30.0));
        let segs = wire.project(&Matrix4::identity(), &ScreenMapping::default());
        assert_eq!(segs[0].start, Point2d::new(400.0, 300.0));
        assert_eq!(segs[0].end, Point2d::new(410.0, 280.0));
    }
}
