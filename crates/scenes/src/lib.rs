//! Host-facing scenes. Each scene owns its model shapes and control
//! parameters, rebuilds its output geometry from scratch in `recompute`, and
//! steps its animation purely through [`Animate::advance`].

pub mod animation;
pub mod controls;
pub mod error;
pub mod figure;
pub mod fractal;
pub mod models;
pub mod prism;
pub mod spline;
pub mod surface;
pub mod trochoid;

pub use animation::{Animate, AnimationConfig, Oscillator};
pub use controls::{Grid, TransformControls, UserMatrixMode};
pub use error::SceneError;
pub use figure::{FigureFrame, FigureScene};
pub use fractal::FractalScene;
pub use prism::{PrismFrame, PrismScene, ViewSettings};
pub use spline::{SplineFrame, SplineScene};
pub use surface::{Layer, LayeredSegment, SurfaceScene};
pub use trochoid::{TrochoidFrame, TrochoidMetrics, TrochoidScene};
