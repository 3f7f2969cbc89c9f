//! 2D homogeneous transforms.
//!
//! Points are row vectors: `[x' y' w'] = [x y 1] · M`. Row 0 holds the
//! x coefficients, row 1 the y coefficients and row 2 the offsets plus the
//! base weight; column 2 is the projective column. With this convention
//! `a * b` applies `a` first and `b` second.

use approx::AbsDiffEq;
use nalgebra::Matrix3 as Mat3;
use serde::{Deserialize, Serialize};
use std::ops::Mul;
use tracing::debug;

use super::point::Point2d;
use crate::shapes::Segment;

/// Projective weights with a smaller magnitude are replaced by this value
/// before the perspective divide. The sign of the weight is not preserved.
pub const MIN_PROJECTIVE_WEIGHT: f64 = 1e-9;

/// A 3x3 homogeneous transform of the plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix3 {
    m: Mat3<f64>,
}

impl Matrix3 {
    pub fn identity() -> Self {
        Self {
            m: Mat3::identity(),
        }
    }

    /// Build from rows `[x coefficients, y coefficients, offsets + weight]`.
    #[rustfmt::skip]
    pub fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        let m = Mat3::new(
            rows[0][0], rows[0][1], rows[0][2],
            rows[1][0], rows[1][1], rows[1][2],
            rows[2][0], rows[2][1], rows[2][2],
        );
        Self { m }
    }

    /// Standard matrix product `a · b`.
    pub fn multiply(a: &Matrix3, b: &Matrix3) -> Matrix3 {
        Matrix3 { m: a.m * b.m }
    }

    /// Rotation by `angle_degrees` about `pivot`; positive angles turn +x toward +y.
    pub fn rotation(angle_degrees: f64, pivot: Point2d) -> Self {
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        Self::with_fixed_point([[cos, sin], [-sin, cos]], pivot)
    }

    /// Uniform scaling by `factor` about `pivot`.
    pub fn scaling(factor: f64, pivot: Point2d) -> Self {
        Self::with_fixed_point([[factor, 0.0], [0.0, factor]], pivot)
    }

    pub fn translation(dx: f64, dy: f64) -> Self {
        Self::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [dx, dy, 1.0]])
    }

    /// Shear about the origin: `x' = x + kx·y`, `y' = y + ky·x`.
    pub fn shear(kx: f64, ky: f64) -> Self {
        Self::from_rows([[1.0, ky, 0.0], [kx, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Affine matrix with the given 2x2 linear part whose offset row keeps
    /// `pivot` fixed: `offset = pivot - linear(pivot)`.
    fn with_fixed_point(linear: [[f64; 2]; 2], pivot: Point2d) -> Self {
        let moved_x = pivot.x * linear[0][0] + pivot.y * linear[1][0];
        let moved_y = pivot.x * linear[0][1] + pivot.y * linear[1][1];
        Self::from_rows([
            [linear[0][0], linear[0][1], 0.0],
            [linear[1][0], linear[1][1], 0.0],
            [pivot.x - moved_x, pivot.y - moved_y, 1.0],
        ])
    }

    /// Coefficient at `(row, col)`, 0-indexed.
    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.m[(row, col)]
    }

    /// Apply the transform, including the perspective divide.
    ///
    /// A weight with `|w| < 1e-9` is clamped to `+1e-9`, so points on the
    /// vanishing line map far away instead of to infinity or NaN.
    pub fn apply(&self, p: &Point2d) -> Point2d {
        let m = &self.m;
        let mut w = p.x * m[(0, 2)] + p.y * m[(1, 2)] + m[(2, 2)];
        if w.abs() < MIN_PROJECTIVE_WEIGHT {
            debug!(x = p.x, y = p.y, w, "projective weight clamped");
            w = MIN_PROJECTIVE_WEIGHT;
        }
        let x = p.x * m[(0, 0)] + p.y * m[(1, 0)] + m[(2, 0)];
        let y = p.x * m[(0, 1)] + p.y * m[(1, 1)] + m[(2, 1)];
        Point2d::new(x / w, y / w)
    }

    /// Transform both endpoints; arc data is carried over unchanged.
    pub fn apply_segment(&self, segment: &Segment) -> Segment {
        Segment {
            start: self.apply(&segment.start),
            end: self.apply(&segment.end),
            ..*segment
        }
    }

    pub fn apply_all(&self, points: &[Point2d]) -> Vec<Point2d> {
        points.iter().map(|p| self.apply(p)).collect()
    }

    /// Inverse transform, or `None` if the matrix is singular.
    pub fn try_inverse(&self) -> Option<Self> {
        self.m.try_inverse().map(|m| Self { m })
    }

    pub fn determinant(&self) -> f64 {
        self.m.determinant()
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Matrix3 {
    type Output = Matrix3;
    fn mul(self, rhs: Matrix3) -> Matrix3 {
        Matrix3::multiply(&self, &rhs)
    }
}

impl AbsDiffEq for Matrix3 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.m.abs_diff_eq(&other.m, epsilon)
    }
}

/// Scale-then-rotate about a shared pivot: `scaling(scale) · rotation(angle)`.
///
/// Hosts append their own matrix with [`Matrix3::multiply`]; the order
/// `(scaling · rotation) · user` is relied on by every transform chain.
pub fn pivot_transform(angle_degrees: f64, scale: f64, pivot: Point2d) -> Matrix3 {
    let rotation = Matrix3::rotation(angle_degrees, pivot);
    let scaling = Matrix3::scaling(scale, pivot);
    Matrix3::multiply(&scaling, &rotation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_identity_apply() {
        let p = Point2d::new(12.5, -3.0);
        assert_eq!(Matrix3::identity().apply(&p), p);
    }

    #[test]
    fn test_rotation_90_about_origin() {
        let r = Matrix3::rotation(90.0, Point2d::ORIGIN);
        let p = r.apply(&Point2d::new(1.0, 0.0));
        assert_abs_diff_eq!(p, Point2d::new(0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_fixes_pivot() {
        let pivot = Point2d::new(164.5, 437.5);
        let r = Matrix3::rotation(33.0, pivot);
        assert_abs_diff_eq!(r.apply(&pivot), pivot, epsilon = 1e-9);
    }

    #[test]
    fn test_scaling_about_pivot() {
        let pivot = Point2d::new(10.0, 10.0);
        let s = Matrix3::scaling(2.0, pivot);
        assert_abs_diff_eq!(s.apply(&pivot), pivot, epsilon = 1e-12);
        assert_abs_diff_eq!(
            s.apply(&Point2d::new(11.0, 12.0)),
            Point2d::new(12.0, 14.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_multiply_applies_left_first() {
        let t = Matrix3::translation(5.0, 0.0);
        let r = Matrix3::rotation(90.0, Point2d::ORIGIN);
        // translate, then rotate
        let p = (t * r).apply(&Point2d::ORIGIN);
        assert_abs_diff_eq!(p, Point2d::new(0.0, 5.0), epsilon = 1e-12);
        // rotate, then translate
        let q = (r * t).apply(&Point2d::ORIGIN);
        assert_abs_diff_eq!(q, Point2d::new(5.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_multiply_identity() {
        let a = Matrix3::from_rows([[1.0, 2.0, 0.1], [3.0, 4.0, 0.2], [5.0, 6.0, 1.0]]);
        assert_eq!(Matrix3::multiply(&a, &Matrix3::identity()), a);
        assert_eq!(Matrix3::multiply(&Matrix3::identity(), &a), a);
    }

    #[test]
    fn test_projective_divide() {
        let m = Matrix3::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 2.0]]);
        assert_abs_diff_eq!(
            m.apply(&Point2d::new(4.0, 6.0)),
            Point2d::new(2.0, 3.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_zero_weight_is_clamped() {
        let m = Matrix3::from_rows([[1.0, 0.0, 1.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]]);
        // w = x, so the origin has w = 0
        let p = m.apply(&Point2d::new(0.0, 2.0));
        assert!(p.x.is_finite() && p.y.is_finite());
        assert!((p.y - 2.0 / MIN_PROJECTIVE_WEIGHT).abs() < 1e-3);

        // negative tiny weights are also replaced by the positive floor
        let q = m.apply(&Point2d::new(-1e-12, 1.0));
        assert!(q.y > 0.0);
    }

    #[test]
    fn test_pivot_transform_fixes_pivot() {
        let pivot = Point2d::new(3.0, -7.0);
        let m = pivot_transform(47.0, 1.8, pivot);
        assert_abs_diff_eq!(m.apply(&pivot), pivot, epsilon = 1e-9);
    }

    #[test]
    fn test_inverse_roundtrip() {
        let m = pivot_transform(30.0, 2.0, Point2d::new(1.0, 2.0)) * Matrix3::shear(0.3, 0.0);
        let inv = m.try_inverse().unwrap();
        let p = Point2d::new(-4.0, 9.0);
        assert_abs_diff_eq!(inv.apply(&m.apply(&p)), p, epsilon = 1e-9);
    }

    #[test]
    fn test_shear() {
        let m = Matrix3::shear(0.5, 0.0);
        assert_abs_diff_eq!(
            m.apply(&Point2d::new(1.0, 2.0)),
            Point2d::new(2.0, 2.0),
            epsilon = 1e-12
        );
    }
}
