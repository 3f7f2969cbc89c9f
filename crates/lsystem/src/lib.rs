//! String-rewriting fractals: rule parsing, parallel rewriting, turtle
//! interpretation and fitting the result onto a canvas.

pub mod fit;
pub mod rules;
pub mod system;
pub mod turtle;

pub use fit::{CanvasFit, fit_to_canvas};
pub use rules::{Rules, parse_rules, rewrite};
pub use system::{FractalSegment, LSystem, LSystemConfig, LSystemError};
pub use turtle::interpret;
