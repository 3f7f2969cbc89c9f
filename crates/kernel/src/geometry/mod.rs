pub mod point;
pub mod vector;
pub mod matrix3;
pub mod transform;
pub mod curves;
pub mod trochoid;
pub mod surfaces;

use point::{Point2d, Point3d};
use vector::{Vec2, Vec3};

/// A planar parametric curve.
pub trait CurveEval {
    /// Evaluate the curve at parameter `t`.
    fn evaluate(&self, t: f64) -> Point2d;

    /// First derivative at parameter `t`.
    fn derivative(&self, t: f64) -> Vec2;

    /// Unit tangent at `t`, or the zero vector where the derivative vanishes.
    fn unit_tangent(&self, t: f64) -> Vec2 {
        self.derivative(t).normalized_or_zero()
    }
}

/// A parametric surface in 3D.
pub trait SurfaceEval {
    /// Evaluate the surface at parameters `(u, v)`.
    fn evaluate(&self, u: f64, v: f64) -> Point3d;

    /// Surface normal at `(u, v)` (not necessarily unit length).
    fn normal_at(&self, u: f64, v: f64) -> Vec3;
}
