pub mod error;
pub mod geometry;
pub mod shapes;

// Re-export the value types hosts touch most often.
pub use error::KernelError;
pub use geometry::matrix3::{Matrix3, pivot_transform};
pub use geometry::point::{Point2d, Point3d};
pub use geometry::curves::FergusonSegment;
pub use geometry::surfaces::{ContourMapping, Paraboloid, SurfaceGrid};
pub use geometry::transform::{BoundingBox2d, Matrix4, ProjectionPlane, ScreenMapping};
pub use geometry::trochoid::{CurvatureRadius, Inflection, Trochoid, TrochoidConfig};
pub use geometry::vector::{Vec2, Vec3};
pub use geometry::{CurveEval, SurfaceEval};
pub use shapes::{CircleShape, Edge, Polyhedron, Segment, SegmentSet};

/// Screen pixels per centimetre of model space.
pub const PIXELS_PER_CM: f64 = 35.0;

/// Tolerance for geometric comparisons.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Points closer than this are considered coincident.
    pub coincidence: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self { coincidence: 1e-7 }
    }
}

impl Tolerance {
    pub fn points_coincident(&self, a: &Point2d, b: &Point2d) -> bool {
        a.distance_to(b) < self.coincidence
    }
}

/// Default tolerance used by continuity checks.
pub fn default_tolerance() -> Tolerance {
    Tolerance::default()
}
