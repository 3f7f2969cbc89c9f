use geolab_kernel::{Matrix4, Point2d, Point3d, Polyhedron, ProjectionPlane, ScreenMapping, Segment, Vec3};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::animation::{Animate, AnimationConfig, Oscillator};
use crate::error::SceneError;

/// Camera for the 3D scenes: world rotation and translation, then a
/// parallel projection and a screen mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSettings {
    /// Rotation about X, Y and Z in degrees.
    pub rotation: Vec3,
    pub translation: Vec3,
    pub plane: ProjectionPlane,
    /// Position of the projection plane along its axis.
    pub offset: f64,
    pub center: Point2d,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            rotation: Vec3::ZERO,
            translation: Vec3::ZERO,
            plane: ProjectionPlane::Z,
            offset: 0.0,
            center: ScreenMapping::default().center,
        }
    }
}

impl ViewSettings {
    /// `world_transform · projection`.
    pub fn matrix(&self) -> Matrix4 {
        let world = Matrix4::world_transform(
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
            self.translation,
        );
        Matrix4::multiply(&world, &Matrix4::projection(self.plane, self.offset))
    }

    pub fn screen(&self) -> ScreenMapping {
        ScreenMapping::new(self.plane, self.center)
    }

    /// Project one 3D line to the screen.
    pub fn project_line(&self, matrix: &Matrix4, a: &Point3d, b: &Point3d) -> Segment {
        let screen = self.screen();
        Segment::line(screen.project(matrix, a), screen.project(matrix, b))
    }

    /// X, Y and Z axes of `length` from the origin, in that order.
    pub fn axes(&self, matrix: &Matrix4, length: f64) -> Vec<Segment> {
        [
            Point3d::new(length, 0.0, 0.0),
            Point3d::new(0.0, length, 0.0),
            Point3d::new(0.0, 0.0, length),
        ]
        .iter()
        .map(|tip| self.project_line(matrix, &Point3d::ORIGIN, tip))
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrismFrame {
    pub edges: Vec<Segment>,
    pub axes: Vec<Segment>,
}

/// A star prism under a world transform and parallel projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrismScene {
    pub view: ViewSettings,
    pub outer_radius: f64,
    pub points: usize,
    pub axes_length: f64,
    pub animation: AnimationConfig,
    height: Oscillator,
}

impl Default for PrismScene {
    fn default() -> Self {
        Self {
            view: ViewSettings::default(),
            outer_radius: 50.0,
            points: 5,
            axes_length: 100.0,
            animation: AnimationConfig::default(),
            height: Oscillator::new(100.0, 100.0, 200.0),
        }
    }
}

impl PrismScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn height(&self) -> f64 {
        self.height.value
    }

    pub fn set_height(&mut self, height: f64) {
        self.height.value = height.clamp(self.height.min, self.height.max);
    }

    pub fn inner_radius(&self) -> f64 {
        self.outer_radius / 2.5
    }

    pub fn model(&self) -> Result<Polyhedron, SceneError> {
        Ok(Polyhedron::star_prism(
            self.outer_radius,
            self.inner_radius(),
            self.height.value,
            self.points,
        )?)
    }

    #[instrument(skip(self), fields(height = self.height.value, plane = ?self.view.plane))]
    pub fn recompute(&self) -> Result<PrismFrame, SceneError> {
        let model = self.model()?;
        let matrix = self.view.matrix();
        let edges: Vec<Segment> = model
            .edge_endpoints()
            .map(|(a, b)| self.view.project_line(&matrix, &a, &b))
            .collect();
        debug!(edges = edges.len(), "prism frame built");
        Ok(PrismFrame {
            edges,
            axes: self.view.axes(&matrix, self.axes_length),
        })
    }
}

impl Animate for PrismScene {
    /// Height ping-pongs over `[100, 200]` by 1 per tick while the prism
    /// turns 2° about Y and 1° about X.
    fn advance(&self, dt: f64) -> Self {
        let ticks = self.animation.ticks(dt);
        let mut next = self.clone();
        next.height = self.height.step(ticks);
        next.view.rotation.y = (self.view.rotation.y + 2.0 * ticks).rem_euclid(360.0);
        next.view.rotation.x = (self.view.rotation.x + ticks).rem_euclid(360.0);
        next
    }
}
