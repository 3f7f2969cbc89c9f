use geolab_lsystem::{FractalSegment, LSystem, LSystemConfig, parse_rules};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::error::SceneError;

const DEFAULT_RULES: &str = "X->+FXF-FXF-FXF+\nF->FXF";

/// L-system editor state: the raw rule text is kept next to the parsed
/// system so hosts can show what the user typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FractalScene {
    pub config: LSystemConfig,
    system: LSystem,
    rules_text: String,
}

impl Default for FractalScene {
    fn default() -> Self {
        Self {
            config: LSystemConfig::default(),
            system: LSystem::new("X", DEFAULT_RULES, 4, 60.0, 10.0),
            rules_text: DEFAULT_RULES.to_string(),
        }
    }
}

impl FractalScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn system(&self) -> &LSystem {
        &self.system
    }

    pub fn rules_text(&self) -> &str {
        &self.rules_text
    }

    pub fn set_axiom(&mut self, axiom: &str) {
        self.system.axiom = axiom.to_string();
    }

    pub fn set_rules(&mut self, text: &str) {
        self.rules_text = text.to_string();
        self.system.rules = parse_rules(text);
    }

    pub fn set_angle(&mut self, degrees: f64) {
        self.system.angle = degrees;
    }

    /// Iteration counts beyond the configured maximum are clamped.
    pub fn set_iterations(&mut self, iterations: usize) {
        if iterations > self.config.max_iterations {
            warn!(
                requested = iterations,
                max = self.config.max_iterations,
                "iteration count clamped"
            );
        }
        self.system.iterations = iterations.min(self.config.max_iterations);
    }

    #[instrument(skip(self), fields(iterations = self.system.iterations))]
    pub fn recompute(&self) -> Result<Vec<FractalSegment>, SceneError> {
        Ok(self.system.generate(&self.config)?)
    }
}
