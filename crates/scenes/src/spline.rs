use geolab_contour::{ControlRole, Contour, Morph};
use geolab_kernel::{CircleShape, FergusonSegment, PIXELS_PER_CM, Point2d, Segment};
use geolab_tessellation::{DEFAULT_HERMITE_STEPS, polyline_to_segments, tessellate_hermite};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::animation::{Animate, AnimationConfig, Oscillator};
use crate::controls::{Grid, TransformControls};
use crate::error::SceneError;
use crate::models::{bird_contour, triangle_target};

const ENDPOINT_MARKER_CM: f64 = 0.15;
const CONTROL_MARKER_CM: f64 = 0.1;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SplineFrame {
    /// Background grid under the user matrix only.
    pub grid: Vec<Segment>,
    pub curve: Vec<Segment>,
    /// `p0–c0`, `c0–c1`, `c1–p1` per segment; empty unless the polygon is shown.
    pub polygon: Vec<Segment>,
    pub markers: Vec<CircleShape>,
    pub pivot: Point2d,
}

/// Editable Hermite contour that can morph into a target shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplineScene {
    pub controls: TransformControls,
    pub grid: Grid,
    pub show_polygon: bool,
    pub hermite_steps: usize,
    pub animation: AnimationConfig,
    morph: Morph,
    progress: Oscillator,
}

impl SplineScene {
    /// The bird contour morphing toward the triangle.
    pub fn new() -> Result<Self, SceneError> {
        Self::with_shapes(&bird_contour(), &triangle_target())
    }

    pub fn with_shapes(
        start: &[FergusonSegment],
        target: &[FergusonSegment],
    ) -> Result<Self, SceneError> {
        let morph = Morph::new(Contour::from_segments(start)?, Contour::from_segments(target)?)?;
        Ok(Self {
            controls: TransformControls::default(),
            grid: Grid::default(),
            show_polygon: true,
            hermite_steps: DEFAULT_HERMITE_STEPS,
            animation: AnimationConfig::default(),
            morph,
            progress: Oscillator::new(0.0, 0.0, 1.0),
        })
    }

    pub fn progress(&self) -> f64 {
        self.progress.value
    }

    pub fn set_progress(&mut self, progress: f64) {
        self.progress.value = progress.clamp(0.0, 1.0);
    }

    /// The editable start contour.
    pub fn contour(&self) -> &Contour {
        self.morph.start()
    }

    pub fn target(&self) -> &Contour {
        self.morph.target()
    }

    /// Move one control point of the start contour. Shared joints move for
    /// both neighbouring segments.
    pub fn move_point(
        &mut self,
        index: usize,
        role: ControlRole,
        position: Point2d,
    ) -> Result<(), SceneError> {
        self.morph.start_mut().move_point(index, role, position)?;
        Ok(())
    }

    /// Back to the bird at progress 0 with no rotation or scaling.
    pub fn reset(&mut self) -> Result<(), SceneError> {
        *self.morph.start_mut() = Contour::from_segments(&bird_contour())?;
        self.progress = Oscillator::new(0.0, 0.0, 1.0);
        self.controls.angle = 0.0;
        self.controls.scale = 1.0;
        info!("spline scene reset");
        Ok(())
    }

    /// The in-between shape with control points mapped by the composite
    /// matrix.
    pub fn shape(&self) -> Result<Vec<FergusonSegment>, SceneError> {
        let matrix = self.controls.build_matrix(true);
        let mut shape = self.morph.at(self.progress.value)?;
        shape.transform_points(|p| matrix.apply(p));
        Ok(shape.segments())
    }

    #[instrument(skip(self), fields(progress = self.progress.value))]
    pub fn recompute(&self) -> Result<SplineFrame, SceneError> {
        let shape = self.shape()?;
        let mut frame = SplineFrame {
            grid: self.grid.transformed(&self.controls.build_matrix(false)),
            pivot: self.controls.build_matrix(true).apply(&self.controls.pivot),
            ..SplineFrame::default()
        };

        for segment in &shape {
            let points = tessellate_hermite(segment, self.hermite_steps);
            frame.curve.extend(polyline_to_segments(&points));
        }

        if self.show_polygon {
            for (index, s) in shape.iter().enumerate() {
                frame.polygon.push(Segment::line(s.p0, s.c0));
                frame.polygon.push(Segment::line(s.c0, s.c1));
                frame.polygon.push(Segment::line(s.c1, s.p1));

                let endpoint = ENDPOINT_MARKER_CM * PIXELS_PER_CM;
                let control = CONTROL_MARKER_CM * PIXELS_PER_CM;
                frame.markers.push(CircleShape::new(s.p0, endpoint));
                frame.markers.push(CircleShape::new(s.c0, control));
                frame.markers.push(CircleShape::new(s.c1, control));
                if index + 1 == shape.len() {
                    frame.markers.push(CircleShape::new(s.p1, endpoint));
                }
            }
        }

        debug!(
            curve = frame.curve.len(),
            markers = frame.markers.len(),
            "spline frame built"
        );
        Ok(frame)
    }
}

impl Animate for SplineScene {
    /// Morph progress ping-pongs over `[0, 1]` at 0.01 per tick.
    fn advance(&self, dt: f64) -> Self {
        let ticks = self.animation.ticks(dt);
        Self {
            progress: self.progress.step(0.01 * ticks),
            ..self.clone()
        }
    }
}
