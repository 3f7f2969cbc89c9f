use geolab_kernel::{CircleShape, Point2d, Segment, SegmentSet};
use geolab_tessellation::{TessellationConfig, polyline_to_segments, tessellate_circle, tessellate_segment};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::controls::{Grid, TransformControls};
use crate::models::{figure_circle, letter_figure};

/// Geometry produced by one [`FigureScene::recompute`] pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FigureFrame {
    pub grid: Vec<Segment>,
    pub figure: Vec<Segment>,
    pub circles: Vec<Segment>,
    /// Free-hand segment set, transformed like the figure.
    pub sketch: Vec<Segment>,
    pub pivot: Point2d,
}

/// Transform lab: a fixed figure under pivot rotation/scale and a user matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigureScene {
    pub controls: TransformControls,
    pub grid: Grid,
    pub tessellation: TessellationConfig,
    pub sketch: SegmentSet,
    figure: Vec<Segment>,
    circles: Vec<CircleShape>,
}

impl Default for FigureScene {
    fn default() -> Self {
        Self {
            controls: TransformControls::default(),
            grid: Grid::default(),
            tessellation: TessellationConfig::default(),
            sketch: SegmentSet::new(),
            figure: letter_figure(),
            circles: vec![figure_circle()],
        }
    }
}

impl FigureScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn figure(&self) -> &[Segment] {
        &self.figure
    }

    pub fn circles(&self) -> &[CircleShape] {
        &self.circles
    }

    /// Restore the controls; the sketch is kept.
    pub fn reset(&mut self) {
        self.controls.reset();
    }

    /// Rebuild every output from the model shapes.
    ///
    /// The figure, circle, sketch and pivot use the composite matrix; the
    /// grid only sees the user matrix.
    #[instrument(skip(self), fields(angle = self.controls.angle, scale = self.controls.scale))]
    pub fn recompute(&self) -> FigureFrame {
        let full = self.controls.build_matrix(true);
        let user = self.controls.build_matrix(false);

        let mut figure = Vec::with_capacity(self.figure.len());
        for segment in &self.figure {
            let points = full.apply_all(&tessellate_segment(segment, &self.tessellation));
            figure.extend(polyline_to_segments(&points));
        }

        let circles = self
            .circles
            .iter()
            .flat_map(|c| {
                let points = full.apply_all(&tessellate_circle(c, self.tessellation.angle_step));
                polyline_to_segments(&points)
            })
            .collect::<Vec<_>>();

        let sketch = self
            .sketch
            .segments()
            .iter()
            .map(|s| full.apply_segment(s))
            .collect();

        let frame = FigureFrame {
            grid: self.grid.transformed(&user),
            figure,
            circles,
            sketch,
            pivot: full.apply(&self.controls.pivot),
        };
        debug!(
            figure = frame.figure.len(),
            circles = frame.circles.len(),
            grid = frame.grid.len(),
            "figure frame built"
        );
        frame
    }
}
