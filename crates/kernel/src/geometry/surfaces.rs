use serde::{Deserialize, Serialize};

use super::SurfaceEval;
use super::point::{Point2d, Point3d};
use super::vector::Vec3;

/// Paraboloid of revolution in polar parameters:
/// `x = u·cos v`, `y = u·sin v`, `z = c·u²`.
///
/// `u` is the radius and `v` the angle in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paraboloid {
    /// Steepness coefficient.
    pub c: f64,
}

impl Default for Paraboloid {
    fn default() -> Self {
        Self { c: 0.05 }
    }
}

impl Paraboloid {
    pub fn new(c: f64) -> Self {
        Self { c }
    }
}

impl SurfaceEval for Paraboloid {
    fn evaluate(&self, u: f64, v: f64) -> Point3d {
        let (sin, cos) = v.sin_cos();
        Point3d::new(u * cos, u * sin, self.c * u * u)
    }

    fn normal_at(&self, u: f64, v: f64) -> Vec3 {
        // ∂/∂u × ∂/∂v = (−2c·u²·cos v, −2c·u²·sin v, u)
        let (sin, cos) = v.sin_cos();
        let du = Vec3::new(cos, sin, 2.0 * self.c * u);
        let dv = Vec3::new(-u * sin, u * cos, 0.0);
        du.cross(&dv)
    }
}

/// Parameter grid for surface wireframes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceGrid {
    /// Radial subdivisions between `u = 0` and `max_radius`.
    pub u_steps: usize,
    /// Angular subdivisions of the full turn.
    pub v_steps: usize,
    pub max_radius: f64,
}

impl Default for SurfaceGrid {
    fn default() -> Self {
        Self {
            u_steps: 10,
            v_steps: 20,
            max_radius: 40.0,
        }
    }
}

impl SurfaceGrid {
    pub fn u_at(&self, i: usize) -> f64 {
        i as f64 * (self.max_radius / self.u_steps.max(1) as f64)
    }

    pub fn v_at(&self, j: usize) -> f64 {
        j as f64 * (std::f64::consts::TAU / self.v_steps.max(1) as f64)
    }
}

/// Places a planar contour on a surface.
///
/// A point is centred on `pivot`, scaled, rotated by `rotation_degrees`,
/// then remapped: `v = x/v_divisor + offset_x/offset_x_divisor` and
/// `u = base_u + y/u_divisor + offset_y`, with `u` clamped to `≥ 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourMapping {
    pub pivot: Point2d,
    pub scale: f64,
    pub rotation_degrees: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub v_divisor: f64,
    pub offset_x_divisor: f64,
    pub base_u: f64,
    pub u_divisor: f64,
}

impl Default for ContourMapping {
    fn default() -> Self {
        Self {
            pivot: Point2d::new(300.0, 300.0),
            scale: 0.5,
            rotation_degrees: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
            v_divisor: 50.0,
            offset_x_divisor: 20.0,
            base_u: 25.0,
            u_divisor: 5.0,
        }
    }
}

impl ContourMapping {
    /// Surface parameters `(u, v)` for a contour point.
    pub fn parameters(&self, p: &Point2d) -> (f64, f64) {
        let x = (p.x - self.pivot.x) * self.scale;
        let y = (p.y - self.pivot.y) * self.scale;
        let (sin, cos) = self.rotation_degrees.to_radians().sin_cos();
        let x_rot = x * cos - y * sin;
        let y_rot = x * sin + y * cos;

        let v = x_rot / self.v_divisor + self.offset_x / self.offset_x_divisor;
        let u = (self.base_u + y_rot / self.u_divisor + self.offset_y).max(0.0);
        (u, v)
    }

    /// Map a contour point onto `surface`.
    pub fn map_point(&self, surface: &impl SurfaceEval, p: &Point2d) -> Point3d {
        let (u, v) = self.parameters(p);
        surface.evaluate(u, v)
    }
}
