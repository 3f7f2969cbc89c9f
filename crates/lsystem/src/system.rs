use geolab_kernel::Segment;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::fit::{CanvasFit, fit_to_canvas};
use crate::rules::{Rules, parse_rules, rewrite};
use crate::turtle::interpret;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LSystemError {
    #[error(
        "Rewriting step {iteration} would produce {length} symbols (limit {max_length})"
    )]
    ExpansionTooLarge {
        iteration: usize,
        length: usize,
        max_length: usize,
    },
}

/// Limits and canvas settings for fractal generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LSystemConfig {
    /// Requested iteration counts above this are clamped.
    pub max_iterations: usize,
    /// Longest rewritten string allowed before generation fails.
    pub max_length: usize,
    pub canvas: CanvasFit,
}

impl Default for LSystemConfig {
    fn default() -> Self {
        Self {
            max_iterations: 4,
            max_length: 1_000_000,
            canvas: CanvasFit::default(),
        }
    }
}

impl LSystemConfig {
    /// No iteration clamp beyond the length guard.
    pub fn unbounded() -> Self {
        Self {
            max_iterations: usize::MAX,
            ..Self::default()
        }
    }
}

/// One drawn fractal segment with its position along the drawing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FractalSegment {
    pub segment: Segment,
    /// `i / point_count` for the segment ending at point `i`; hosts use it
    /// for colour gradients.
    pub progress: f64,
}

/// An L-system definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LSystem {
    pub axiom: String,
    pub rules: Rules,
    pub iterations: usize,
    /// Turn angle in degrees.
    pub angle: f64,
    /// Forward step length before canvas fitting.
    pub step: f64,
}

impl Default for LSystem {
    /// Sierpiński arrowhead-style curve.
    fn default() -> Self {
        Self {
            axiom: "X".to_string(),
            rules: parse_rules("X->+FXF-FXF-FXF+\nF->FXF"),
            iterations: 4,
            angle: 60.0,
            step: 10.0,
        }
    }
}

impl LSystem {
    pub fn new(axiom: &str, rules_text: &str, iterations: usize, angle: f64, step: f64) -> Self {
        Self {
            axiom: axiom.to_string(),
            rules: parse_rules(rules_text),
            iterations,
            angle,
            step,
        }
    }

    /// The rewritten program after the (clamped) iteration count.
    pub fn expand(&self, config: &LSystemConfig) -> Result<String, LSystemError> {
        let iterations = if self.iterations > config.max_iterations {
            warn!(
                requested = self.iterations,
                max = config.max_iterations,
                "iteration count clamped"
            );
            config.max_iterations
        } else {
            self.iterations
        };
        rewrite(&self.axiom, &self.rules, iterations, config.max_length)
    }

    /// Rewrite, interpret and fit onto the canvas.
    ///
    /// Consecutive emitted points become segments; fewer than two points
    /// give no segments.
    #[instrument(skip(self, config), fields(axiom = %self.axiom, iterations = self.iterations))]
    pub fn generate(&self, config: &LSystemConfig) -> Result<Vec<FractalSegment>, LSystemError> {
        let program = self.expand(config)?;
        let raw = interpret(&program, self.angle, self.step);
        let points = fit_to_canvas(&raw, &config.canvas);
        let count = points.len() as f64;
        let segments: Vec<FractalSegment> = points
            .windows(2)
            .enumerate()
            .map(|(i, w)| FractalSegment {
                segment: Segment::line(w[0], w[1]),
                progress: (i + 1) as f64 / count,
            })
            .collect();
        info!(
            symbols = program.len(),
            points = points.len(),
            segments = segments.len(),
            "fractal generated"
        );
        Ok(segments)
    }
}
