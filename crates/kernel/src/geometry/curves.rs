use serde::{Deserialize, Serialize};

use super::CurveEval;
use super::point::Point2d;
use super::vector::Vec2;

/// A cubic Hermite (Ferguson) segment given by its endpoints and two
/// control points.
///
/// End tangents are derived on demand (`c0 - p0` and `p1 - c1`), so moving a
/// control point can never leave a stale tangent behind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FergusonSegment {
    pub p0: Point2d,
    pub c0: Point2d,
    pub c1: Point2d,
    pub p1: Point2d,
}

/// Hermite basis functions `(h1, h2, h3, h4)` at `u`.
pub fn hermite_basis(u: f64) -> [f64; 4] {
    let u2 = u * u;
    let u3 = u2 * u;
    [
        2.0 * u3 - 3.0 * u2 + 1.0,
        -2.0 * u3 + 3.0 * u2,
        u3 - 2.0 * u2 + u,
        u3 - u2,
    ]
}

/// Derivatives of the Hermite basis functions at `u`.
fn hermite_basis_derivative(u: f64) -> [f64; 4] {
    let u2 = u * u;
    [
        6.0 * u2 - 6.0 * u,
        -6.0 * u2 + 6.0 * u,
        3.0 * u2 - 4.0 * u + 1.0,
        3.0 * u2 - 2.0 * u,
    ]
}

impl FergusonSegment {
    pub fn new(p0: Point2d, c0: Point2d, c1: Point2d, p1: Point2d) -> Self {
        Self { p0, c0, c1, p1 }
    }

    /// A straight segment: both control points sit on the endpoints, so
    /// both tangents are zero.
    pub fn straight(start: Point2d, end: Point2d) -> Self {
        Self::new(start, start, end, end)
    }

    pub fn tangent0(&self) -> Vec2 {
        self.c0 - self.p0
    }

    pub fn tangent1(&self) -> Vec2 {
        self.p1 - self.c1
    }

    /// Apply `f` to every control point.
    pub fn map_points(&self, mut f: impl FnMut(&Point2d) -> Point2d) -> Self {
        Self::new(f(&self.p0), f(&self.c0), f(&self.c1), f(&self.p1))
    }

    /// Interpolate every control point toward `other` by `t`.
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self::new(
            self.p0.lerp(&other.p0, t),
            self.c0.lerp(&other.c0, t),
            self.c1.lerp(&other.c1, t),
            self.p1.lerp(&other.p1, t),
        )
    }
}

impl CurveEval for FergusonSegment {
    fn evaluate(&self, u: f64) -> Point2d {
        let [h1, h2, h3, h4] = hermite_basis(u);
        let t0 = self.tangent0();
        let t1 = self.tangent1();
        Point2d::new(
            h1 * self.p0.x + h2 * self.p1.x + h3 * t0.x + h4 * t1.x,
            h1 * self.p0.y + h2 * self.p1.y + h3 * t0.y + h4 * t1.y,
        )
    }

    fn derivative(&self, u: f64) -> Vec2 {
        let [d1, d2, d3, d4] = hermite_basis_derivative(u);
        let t0 = self.tangent0();
        let t1 = self.tangent1();
        Vec2::new(
            d1 * self.p0.x + d2 * self.p1.x + d3 * t0.x + d4 * t1.x,
            d1 * self.p0.y + d2 * self.p1.y + d3 * t0.y + d4 * t1.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sample() -> FergusonSegment {
        FergusonSegment::new(
            Point2d::new(2.0, 12.0),
            Point2d::new(4.0, 15.0),
            Point2d::new(6.0, 16.0),
            Point2d::new(8.0, 15.5),
        )
    }

    #[test]
    fn test_basis_partition() {
        for i in 0..=10 {
            let [h1, h2, _, _] = hermite_basis(i as f64 / 10.0);
            assert!((h1 + h2 - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_endpoints_interpolated() {
        let seg = sample();
        assert_abs_diff_eq!(seg.evaluate(0.0), seg.p0, epsilon = 1e-12);
        assert_abs_diff_eq!(seg.evaluate(1.0), seg.p1, epsilon = 1e-12);
    }

    #[test]
    fn test_end_derivatives_are_tangents() {
        let seg = sample();
        assert_abs_diff_eq!(seg.derivative(0.0), seg.tangent0(), epsilon = 1e-12);
        assert_abs_diff_eq!(seg.derivative(1.0), seg.tangent1(), epsilon = 1e-12);
    }

    #[test]
    fn test_tangents_follow_control_points() {
        let mut seg = sample();
        seg.c0 = Point2d::new(10.0, 10.0);
        assert_eq!(seg.tangent0(), Vec2::new(8.0, -2.0));
    }

    #[test]
    fn test_straight_segment_stays_on_chord() {
        let seg = FergusonSegment::straight(Point2d::new(0.0, 0.0), Point2d::new(10.0, 0.0));
        for i in 0..=8 {
            let p = seg.evaluate(i as f64 / 8.0);
            assert!(p.y.abs() < 1e-12);
            assert!(p.x >= -1e-12 && p.x <= 10.0 + 1e-12);
        }
    }

    #[test]
    fn test_lerp_halfway() {
        let a = sample();
        let b = FergusonSegment::straight(Point2d::new(4.0, 4.0), Point2d::new(6.5, 6.75));
        let mid = a.lerp(&b, 0.5);
        assert_abs_diff_eq!(mid.p0, Point2d::new(3.0, 8.0), epsilon = 1e-12);
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
    }
}
