use std::f64::consts::PI;
use std::fmt;

use geolab_kernel::{
    CurvatureRadius, CurveEval, Inflection, PIXELS_PER_CM, Point2d, Segment, Trochoid,
    TrochoidConfig, Vec2,
};
use geolab_tessellation::polyline_to_segments;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::animation::{Animate, AnimationConfig, Oscillator};
use crate::controls::{Grid, TransformControls};

/// Half-length of the tangent and normal markers, in centimetres.
const MARKER_HALF_LENGTH_CM: f64 = 2.0;

/// Derived quantities in display units (cm and cm²).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrochoidMetrics {
    pub area: f64,
    pub arc_length: f64,
    pub curvature_radius: CurvatureRadius,
    pub inflection: Inflection,
}

impl fmt::Display for TrochoidMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Area: {:.2} cm²", self.area)?;
        writeln!(f, "Arc length: {:.2} cm", self.arc_length)?;
        writeln!(f, "Curvature radius: {}", self.curvature_radius)?;
        write!(f, "Inflection points: {}", self.inflection)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrochoidFrame {
    /// Background grid under the user matrix only.
    pub grid: Vec<Segment>,
    pub curve: Vec<Segment>,
    pub point: Point2d,
    pub tangent: Segment,
    pub normal: Segment,
    pub pivot: Point2d,
    pub metrics: TrochoidMetrics,
}

/// Trochoid with a marked parameter and its tangent and normal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrochoidScene {
    pub controls: TransformControls,
    pub grid: Grid,
    /// Rolling circle radius in cm.
    pub r: f64,
    /// Tracing distance in cm.
    pub h: f64,
    /// Marked parameter value.
    pub t: f64,
    /// Screen offset of the curve in cm.
    pub offset: Vec2,
    pub sampling: TrochoidConfig,
    pub animation: AnimationConfig,
    /// Direction of the `h` animation.
    pub h_rising: bool,
}

impl Default for TrochoidScene {
    fn default() -> Self {
        Self {
            controls: TransformControls::default(),
            grid: Grid::default(),
            r: 3.0,
            h: 2.0,
            t: 1.5 * PI,
            offset: Vec2::new(1.0, 3.0),
            sampling: TrochoidConfig::default(),
            animation: AnimationConfig::default(),
            h_rising: true,
        }
    }
}

impl TrochoidScene {
    pub fn new(r: f64, h: f64, t: f64) -> Self {
        Self {
            r,
            h,
            t,
            ..Self::default()
        }
    }

    /// The curve in pixels.
    pub fn curve(&self) -> Trochoid {
        Trochoid::new(self.r * PIXELS_PER_CM, self.h * PIXELS_PER_CM)
    }

    fn offset_px(&self) -> Vec2 {
        self.offset * PIXELS_PER_CM
    }

    pub fn metrics(&self) -> TrochoidMetrics {
        let curve = self.curve();
        TrochoidMetrics {
            area: curve.area() / (PIXELS_PER_CM * PIXELS_PER_CM),
            arc_length: curve.arc_length(self.sampling.arc_length_intervals) / PIXELS_PER_CM,
            curvature_radius: curve.curvature_radius(self.t).scaled_down(PIXELS_PER_CM),
            inflection: curve.inflection(),
        }
    }

    /// Rebuild the frame. Curve, markers and pivot go through the composite
    /// matrix; the grid only through the user matrix.
    #[instrument(skip(self), fields(r = self.r, h = self.h, t = self.t))]
    pub fn recompute(&self) -> TrochoidFrame {
        let full = self.controls.build_matrix(true);
        let user = self.controls.build_matrix(false);
        let curve = self.curve();
        let offset = self.offset_px();
        let samples = full.apply_all(&curve.sample(&self.sampling, offset));
        let point = curve.evaluate(self.t) + offset;
        let half = MARKER_HALF_LENGTH_CM * PIXELS_PER_CM;
        let marker =
            |dir: Vec2| full.apply_segment(&Segment::line(point - dir * half, point + dir * half));

        let frame = TrochoidFrame {
            grid: self.grid.transformed(&user),
            curve: polyline_to_segments(&samples),
            point: full.apply(&point),
            tangent: marker(curve.tangent(self.t)),
            normal: marker(curve.normal(self.t)),
            pivot: full.apply(&self.controls.pivot),
            metrics: self.metrics(),
        };
        debug!(samples = samples.len(), "trochoid frame built");
        frame
    }
}

impl Animate for TrochoidScene {
    /// Bounce `h` between 0.1 cm and `2r` at 0.05 cm per tick.
    fn advance(&self, dt: f64) -> Self {
        let ticks = self.animation.ticks(dt);
        let h = Oscillator {
            value: self.h,
            min: 0.1,
            max: 2.0 * self.r,
            rising: self.h_rising,
        }
        .with_range(0.1, 2.0 * self.r)
        .step(0.05 * ticks);
        Self {
            h: h.value,
            h_rising: h.rising,
            ..self.clone()
        }
    }
}
