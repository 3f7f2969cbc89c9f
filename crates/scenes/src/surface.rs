use geolab_kernel::{ContourMapping, Paraboloid, Point2d, Point3d, Segment, SurfaceGrid, Vec3};
use geolab_tessellation::{DEFAULT_HERMITE_STEPS, Wireframe, surface_wireframe, tessellate_hermite};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::animation::{Animate, AnimationConfig, Oscillator};
use crate::models::bird_contour;
use crate::prism::ViewSettings;

/// What a projected segment belongs to; hosts pick colours by layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layer {
    Surface,
    Contour,
    Axis,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayeredSegment {
    pub layer: Layer,
    pub segment: Segment,
}

/// Tessellate a chain of Hermite segments into one polyline without
/// repeating the shared joints.
fn contour_polyline(steps: usize) -> Vec<Point2d> {
    let mut points = Vec::new();
    for segment in bird_contour() {
        let samples = tessellate_hermite(&segment, steps);
        let skip = usize::from(!points.is_empty());
        points.extend(samples.into_iter().skip(skip));
    }
    points
}

/// Paraboloid wireframe with a planar contour wrapped onto it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceScene {
    pub grid: SurfaceGrid,
    pub mapping: ContourMapping,
    pub view: ViewSettings,
    pub axes_length: f64,
    pub animation: AnimationConfig,
    steepness: Oscillator,
    contour: Vec<Point2d>,
}

impl Default for SurfaceScene {
    fn default() -> Self {
        Self {
            grid: SurfaceGrid::default(),
            mapping: ContourMapping::default(),
            view: ViewSettings {
                rotation: Vec3::new(-20.0, 30.0, 0.0),
                ..ViewSettings::default()
            },
            axes_length: 50.0,
            animation: AnimationConfig::default(),
            steepness: Oscillator::new(Paraboloid::default().c, 0.01, 0.15),
            contour: contour_polyline(DEFAULT_HERMITE_STEPS),
        }
    }
}

impl SurfaceScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn surface(&self) -> Paraboloid {
        Paraboloid::new(self.steepness.value)
    }

    /// Set the steepness, clamped into the animation range.
    pub fn set_c(&mut self, c: f64) {
        self.steepness.value = c.clamp(self.steepness.min, self.steepness.max);
    }

    pub fn contour(&self) -> &[Point2d] {
        &self.contour
    }

    /// Replace the planar contour, e.g. with a curve from the spline scene.
    pub fn set_contour(&mut self, points: Vec<Point2d>) {
        self.contour = points;
    }

    /// The contour placed on the surface.
    pub fn mapped_contour(&self) -> Vec<Point3d> {
        let surface = self.surface();
        self.contour
            .iter()
            .map(|p| self.mapping.map_point(&surface, p))
            .collect()
    }

    #[instrument(skip(self), fields(c = self.steepness.value))]
    pub fn recompute(&self) -> Vec<LayeredSegment> {
        let matrix = self.view.matrix();
        let screen = self.view.screen();
        let tag = |layer: Layer| move |segment: Segment| LayeredSegment { layer, segment };

        let mut out: Vec<LayeredSegment> = surface_wireframe(&self.surface(), &self.grid)
            .project(&matrix, &screen)
            .into_iter()
            .map(tag(Layer::Surface))
            .collect();

        let mut contour = Wireframe::new();
        contour.add_polyline(&self.mapped_contour());
        out.extend(contour.project(&matrix, &screen).into_iter().map(tag(Layer::Contour)));

        out.extend(
            self.view
                .axes(&matrix, self.axes_length)
                .into_iter()
                .map(tag(Layer::Axis)),
        );
        debug!(segments = out.len(), "surface frame built");
        out
    }
}

impl Animate for SurfaceScene {
    /// `c` ping-pongs over `[0.01, 0.15]` by 0.002 per tick; the view turns
    /// 1° about Z.
    fn advance(&self, dt: f64) -> Self {
        let ticks = self.animation.ticks(dt);
        let mut next = self.clone();
        next.steepness = self.steepness.step(0.002 * ticks);
        next.view.rotation.z = (self.view.rotation.z + ticks).rem_euclid(360.0);
        next
    }
}
