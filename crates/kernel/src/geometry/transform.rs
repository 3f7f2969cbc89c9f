use approx::AbsDiffEq;
use nalgebra::Matrix4 as Mat4;
use serde::{Deserialize, Serialize};
use std::ops::Mul;

use super::point::{Point2d, Point3d};
use super::vector::Vec3;

/// A 4x4 homogeneous transform acting on row vectors `[x y z w] · M`.
///
/// Translation lives in row 3, so `a * b` applies `a` first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix4 {
    m: Mat4<f64>,
}

impl Matrix4 {
    pub fn identity() -> Self {
        Self {
            m: Mat4::identity(),
        }
    }

    pub fn from_rows(rows: [[f64; 4]; 4]) -> Self {
        let mut m = Mat4::zeros();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                m[(r, c)] = *value;
            }
        }
        Self { m }
    }

    pub fn multiply(a: &Matrix4, b: &Matrix4) -> Matrix4 {
        Matrix4 { m: a.m * b.m }
    }

    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        let mut t = Self::identity();
        t.m[(3, 0)] = dx;
        t.m[(3, 1)] = dy;
        t.m[(3, 2)] = dz;
        t
    }

    pub fn scaling(sx: f64, sy: f64, sz: f64) -> Self {
        let mut t = Self::identity();
        t.m[(0, 0)] = sx;
        t.m[(1, 1)] = sy;
        t.m[(2, 2)] = sz;
        t
    }

    /// Rotation around the X axis by `angle_degrees` (y toward z).
    pub fn rotation_x(angle_degrees: f64) -> Self {
        let (s, c) = angle_degrees.to_radians().sin_cos();
        #[rustfmt::skip]
        let rows = [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c,   s,   0.0],
            [0.0, -s,  c,   0.0],
            [0.0, 0.0, 0.0, 1.0],
        ];
        Self::from_rows(rows)
    }

    /// Rotation around the Y axis by `angle_degrees` (z toward x).
    pub fn rotation_y(angle_degrees: f64) -> Self {
        let (s, c) = angle_degrees.to_radians().sin_cos();
        #[rustfmt::skip]
        let rows = [
            [c,   0.0, -s,  0.0],
            [0.0, 1.0, 0.0, 0.0],
            [s,   0.0, c,   0.0],
            [0.0, 0.0, 0.0, 1.0],
        ];
        Self::from_rows(rows)
    }

    /// Rotation around the Z axis by `angle_degrees` (x toward y).
    pub fn rotation_z(angle_degrees: f64) -> Self {
        let (s, c) = angle_degrees.to_radians().sin_cos();
        #[rustfmt::skip]
        let rows = [
            [c,   s,   0.0, 0.0],
            [-s,  c,   0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ];
        Self::from_rows(rows)
    }

    /// Parallel projection onto the plane `axis = offset`.
    ///
    /// Zeroes the diagonal entry of the collapsed axis and puts `offset` in
    /// the translation row, so every point lands on the plane.
    pub fn projection(plane: ProjectionPlane, offset: f64) -> Self {
        let axis = plane.axis();
        let mut p = Self::identity();
        p.m[(axis, axis)] = 0.0;
        p.m[(3, axis)] = offset;
        p
    }

    /// `Rx · Ry · Rz · T`: rotate about X, then Y, then Z, then translate.
    pub fn world_transform(rot_x: f64, rot_y: f64, rot_z: f64, translation: Vec3) -> Self {
        let mut world = Self::identity();
        world = Self::multiply(&world, &Self::rotation_x(rot_x));
        world = Self::multiply(&world, &Self::rotation_y(rot_y));
        world = Self::multiply(&world, &Self::rotation_z(rot_z));
        Self::multiply(
            &world,
            &Self::translation(translation.x, translation.y, translation.z),
        )
    }

    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.m[(row, col)]
    }

    /// Row vector `[x y z w] · M`, returning the transformed point and `w'`.
    pub fn transform_homogeneous(&self, p: &Point3d, w: f64) -> (Point3d, f64) {
        let m = &self.m;
        let x = p.x * m[(0, 0)] + p.y * m[(1, 0)] + p.z * m[(2, 0)] + w * m[(3, 0)];
        let y = p.x * m[(0, 1)] + p.y * m[(1, 1)] + p.z * m[(2, 1)] + w * m[(3, 1)];
        let z = p.x * m[(0, 2)] + p.y * m[(1, 2)] + p.z * m[(2, 2)] + w * m[(3, 2)];
        let w_out = p.x * m[(0, 3)] + p.y * m[(1, 3)] + p.z * m[(2, 3)] + w * m[(3, 3)];
        (Point3d::new(x, y, z), w_out)
    }

    /// Transform a point with `w = 1`. Every factory here is affine, so the
    /// output weight stays 1 and is dropped.
    pub fn transform_point(&self, p: &Point3d) -> Point3d {
        self.transform_homogeneous(p, 1.0).0
    }

    pub fn try_inverse(&self) -> Option<Self> {
        self.m.try_inverse().map(|m| Self { m })
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Matrix4 {
    type Output = Matrix4;
    fn mul(self, rhs: Matrix4) -> Matrix4 {
        Matrix4::multiply(&self, &rhs)
    }
}

impl AbsDiffEq for Matrix4 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.m.abs_diff_eq(&other.m, epsilon)
    }
}

/// The axis collapsed by a parallel projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectionPlane {
    /// Project onto `x = p`; the screen shows (z, y).
    X,
    /// Project onto `y = p`; the screen shows (x, z).
    Y,
    /// Project onto `z = p`; the screen shows (x, y).
    #[default]
    Z,
}

impl ProjectionPlane {
    pub fn axis(self) -> usize {
        match self {
            ProjectionPlane::X => 0,
            ProjectionPlane::Y => 1,
            ProjectionPlane::Z => 2,
        }
    }

    /// The two surviving coordinates as (horizontal, vertical).
    pub fn screen_axes(self, p: &Point3d) -> (f64, f64) {
        match self {
            ProjectionPlane::Z => (p.x, p.y),
            ProjectionPlane::Y => (p.x, p.z),
            ProjectionPlane::X => (p.z, p.y),
        }
    }
}

/// Maps projected 3D points to screen coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenMapping {
    pub plane: ProjectionPlane,
    pub center: Point2d,
}

impl Default for ScreenMapping {
    fn default() -> Self {
        Self {
            plane: ProjectionPlane::Z,
            center: Point2d::new(400.0, 300.0),
        }
    }
}

impl ScreenMapping {
    pub fn new(plane: ProjectionPlane, center: Point2d) -> Self {
        Self { plane, center }
    }

    /// Map an already-projected point.
    pub fn to_screen(&self, p: &Point3d) -> Point2d {
        let (a, b) = self.plane.screen_axes(p);
        Point2d::new(self.center.x + a, self.center.y - b)
    }

    /// Transform with `matrix`, then map to the screen.
    pub fn project(&self, matrix: &Matrix4, p: &Point3d) -> Point2d {
        self.to_screen(&matrix.transform_point(p))
    }
}

/// Axis-aligned bounding box in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox2d {
    pub min: Point2d,
    pub max: Point2d,
}

impl BoundingBox2d {
    pub fn empty() -> Self {
        Self {
            min: Point2d::new(f64::INFINITY, f64::INFINITY),
            max: Point2d::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_points(points: &[Point2d]) -> Self {
        let mut bb = Self::empty();
        for p in points {
            bb.expand_to_include(p);
        }
        bb
    }

    pub fn expand_to_include(&mut self, p: &Point2d) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }

    pub fn center(&self) -> Point2d {
        self.min.midpoint(&self.max)
    }
}
