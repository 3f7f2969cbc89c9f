use geolab_kernel::{BoundingBox2d, Point2d};
use serde::{Deserialize, Serialize};

/// Target canvas for fractal output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasFit {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    /// Scale uniformly to fill the padded canvas; otherwise keep scale 1.
    pub auto_scale: bool,
}

impl Default for CanvasFit {
    fn default() -> Self {
        Self {
            width: 450.0,
            height: 800.0,
            padding: 20.0,
            auto_scale: true,
        }
    }
}

impl CanvasFit {
    /// Uniform scale and offset that centre `bounds` in the padded canvas.
    ///
    /// A zero extent is treated as 1 so degenerate drawings stay finite.
    pub fn placement(&self, bounds: &BoundingBox2d) -> (f64, Point2d) {
        let w = if bounds.width() == 0.0 { 1.0 } else { bounds.width() };
        let h = if bounds.height() == 0.0 { 1.0 } else { bounds.height() };
        let inner_w = self.width - 2.0 * self.padding;
        let inner_h = self.height - 2.0 * self.padding;

        let scale = if self.auto_scale {
            (inner_w / w).min(inner_h / h)
        } else {
            1.0
        };
        let offset = Point2d::new(
            self.padding - bounds.min.x * scale + (inner_w - w * scale) / 2.0,
            self.padding - bounds.min.y * scale + (inner_h - h * scale) / 2.0,
        );
        (scale, offset)
    }
}

/// Scale and centre `points` onto the canvas. Returns an empty list for
/// fewer than two points.
pub fn fit_to_canvas(points: &[Point2d], fit: &CanvasFit) -> Vec<Point2d> {
    if points.len() < 2 {
        return Vec::new();
    }
    let bounds = BoundingBox2d::from_points(points);
    let (scale, offset) = fit.placement(&bounds);
    points
        .iter()
        .map(|p| Point2d::new(p.x * scale + offset.x, p.y * scale + offset.y))
        .collect()
}
