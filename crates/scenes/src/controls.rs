use geolab_kernel::{Matrix3, PIXELS_PER_CM, Point2d, Segment, pivot_transform};
use serde::{Deserialize, Serialize};

/// How the nine user coefficients are turned into a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UserMatrixMode {
    /// Coefficients are ignored.
    #[default]
    Identity,
    Affine,
    Projective,
}

/// Rotation/scale about a pivot plus a user-entered 3x3 matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformControls {
    /// Rotation in degrees.
    pub angle: f64,
    pub scale: f64,
    pub pivot: Point2d,
    pub xx: f64,
    pub xy: f64,
    pub wx: f64,
    pub yx: f64,
    pub yy: f64,
    pub wy: f64,
    pub dx: f64,
    pub dy: f64,
    pub w0: f64,
    pub mode: UserMatrixMode,
}

impl Default for TransformControls {
    fn default() -> Self {
        Self {
            angle: 0.0,
            scale: 1.0,
            pivot: Point2d::new(4.7 * PIXELS_PER_CM, 12.5 * PIXELS_PER_CM),
            xx: 1.0,
            xy: 0.0,
            wx: 0.0,
            yx: 0.0,
            yy: 1.0,
            wy: 0.0,
            dx: 0.0,
            dy: 0.0,
            w0: 1.0,
            mode: UserMatrixMode::Identity,
        }
    }
}

impl TransformControls {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The matrix built from the user coefficients in the current mode.
    #[rustfmt::skip]
    pub fn user_matrix(&self) -> Matrix3 {
        match self.mode {
            UserMatrixMode::Identity => Matrix3::identity(),
            UserMatrixMode::Affine => Matrix3::from_rows([
                [self.xx, self.xy, 0.0],
                [self.yx, self.yy, 0.0],
                [self.dx, self.dy, 1.0],
            ]),
            UserMatrixMode::Projective => Matrix3::from_rows([
                [self.xx * self.wx, self.xy * self.wx, self.wx],
                [self.yx * self.wy, self.yy * self.wy, self.wy],
                [self.dx * self.w0, self.dy * self.w0, self.w0],
            ]),
        }
    }

    /// `pivot_transform · user` when `with_pivot`, else the user matrix.
    pub fn build_matrix(&self, with_pivot: bool) -> Matrix3 {
        let user = self.user_matrix();
        if with_pivot {
            Matrix3::multiply(&pivot_transform(self.angle, self.scale, self.pivot), &user)
        } else {
            user
        }
    }
}

/// Background grid of evenly spaced lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub width: f64,
    pub height: f64,
    pub step: f64,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(800.0, 600.0, PIXELS_PER_CM)
    }
}

impl Grid {
    pub fn new(width: f64, height: f64, step: f64) -> Self {
        Self {
            width,
            height,
            step,
        }
    }

    /// Vertical lines at `x = 0, step, … ≤ width`, then horizontal lines
    /// the same way. A non-positive step yields no lines.
    pub fn lines(&self) -> Vec<Segment> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Vec::new();
        }
        let columns = (self.width / self.step).floor().max(-1.0) as i64 + 1;
        let rows = (self.height / self.step).floor().max(-1.0) as i64 + 1;
        let mut lines = Vec::with_capacity((columns + rows).max(0) as usize);
        for i in 0..columns {
            let x = i as f64 * self.step;
            lines.push(Segment::line(Point2d::new(x, 0.0), Point2d::new(x, self.height)));
        }
        for i in 0..rows {
            let y = i as f64 * self.step;
            lines.push(Segment::line(Point2d::new(0.0, y), Point2d::new(self.width, y)));
        }
        lines
    }

    /// Grid lines mapped through `matrix`.
    pub fn transformed(&self, matrix: &Matrix3) -> Vec<Segment> {
        self.lines().iter().map(|s| matrix.apply_segment(s)).collect()
    }
}
