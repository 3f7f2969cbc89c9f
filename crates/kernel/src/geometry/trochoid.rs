//! Trochoid: the path of a point at distance `h` from the centre of a
//! circle of radius `r` rolling along a line.
//!
//! `x(t) = r·t − h·sin t`, `y(t) = r − h·cos t`. Units are whatever the
//! caller uses for `r` and `h`; all derived lengths come back in the same
//! units (areas in their square).

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

use super::CurveEval;
use super::point::Point2d;
use super::vector::Vec2;

/// Denominators of the curvature formula below this are treated as zero.
pub const CURVATURE_EPSILON: f64 = 1e-6;

/// Sampling and integration settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrochoidConfig {
    pub t_min: f64,
    pub t_max: f64,
    /// Parameter step between samples.
    pub step: f64,
    /// Trapezoid subintervals used for the arc length of one arch.
    pub arc_length_intervals: usize,
}

impl Default for TrochoidConfig {
    fn default() -> Self {
        Self {
            t_min: 0.0,
            t_max: 6.0 * PI,
            step: 0.25,
            arc_length_intervals: 1000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trochoid {
    /// Radius of the rolling circle.
    pub r: f64,
    /// Distance of the traced point from the circle's centre.
    pub h: f64,
}

/// Radius of curvature at a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CurvatureRadius {
    Finite(f64),
    /// The curvature vanishes (an inflection point).
    Infinite,
}

impl CurvatureRadius {
    pub fn value(&self) -> Option<f64> {
        match self {
            CurvatureRadius::Finite(r) => Some(*r),
            CurvatureRadius::Infinite => None,
        }
    }

    /// Divide a finite radius by `factor` (unit conversion).
    pub fn scaled_down(self, factor: f64) -> Self {
        match self {
            CurvatureRadius::Finite(r) => CurvatureRadius::Finite(r / factor),
            CurvatureRadius::Infinite => CurvatureRadius::Infinite,
        }
    }
}

impl fmt::Display for CurvatureRadius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurvatureRadius::Finite(r) => write!(f, "{r:.2}"),
            CurvatureRadius::Infinite => write!(f, "infinite (inflection point)"),
        }
    }
}

/// Inflection parameters on the first arch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Inflection {
    /// `|h| > r`: the curve never changes its bending direction.
    None,
    Pair(f64, f64),
}

impl fmt::Display for Inflection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inflection::None => write!(f, "none"),
            Inflection::Pair(a, b) => write!(f, "t = {a:.2} and t = {b:.2}"),
        }
    }
}

impl Trochoid {
    pub fn new(r: f64, h: f64) -> Self {
        Self { r, h }
    }

    /// Sample the curve from `t_min` while `t ≤ t_max`, then shift every
    /// sample by `offset`.
    pub fn sample(&self, config: &TrochoidConfig, offset: Vec2) -> Vec<Point2d> {
        if !(config.step.is_finite() && config.step > 0.0) || config.t_max < config.t_min {
            return Vec::new();
        }
        let count = ((config.t_max - config.t_min) / config.step).floor() as usize + 1;
        (0..count)
            .map(|i| self.evaluate(config.t_min + i as f64 * config.step) + offset)
            .collect()
    }

    /// Unit tangent at `t`; zero where the derivative vanishes (a cusp).
    pub fn tangent(&self, t: f64) -> Vec2 {
        self.unit_tangent(t)
    }

    /// Tangent turned a quarter counter-clockwise.
    pub fn normal(&self, t: f64) -> Vec2 {
        self.tangent(t).perpendicular()
    }

    /// Area under one arch: `2π·r² + π·h²`.
    pub fn area(&self) -> f64 {
        2.0 * PI * self.r * self.r + PI * self.h * self.h
    }

    fn speed(&self, t: f64) -> f64 {
        (self.r * self.r + self.h * self.h - 2.0 * self.r * self.h * t.cos())
            .max(0.0)
            .sqrt()
    }

    /// Length of one arch (`t ∈ [0, 2π]`) by the composite trapezoid rule.
    ///
    /// At least 1000 subintervals are used regardless of `intervals`.
    pub fn arc_length(&self, intervals: usize) -> f64 {
        let n = intervals.max(1000);
        let width = 2.0 * PI / n as f64;
        let interior: f64 = (1..n).map(|i| self.speed(i as f64 * width)).sum();
        (0.5 * (self.speed(0.0) + self.speed(2.0 * PI)) + interior) * width
    }

    /// `(r² + h² − 2rh·cos t)^1.5 / |rh·cos t − h²|`.
    pub fn curvature_radius(&self, t: f64) -> CurvatureRadius {
        let (r, h) = (self.r, self.h);
        let den = (r * h * t.cos() - h * h).abs();
        if den < CURVATURE_EPSILON {
            return CurvatureRadius::Infinite;
        }
        let num = (r * r + h * h - 2.0 * r * h * t.cos()).max(0.0).powf(1.5);
        CurvatureRadius::Finite(num / den)
    }

    /// Inflection parameters `acos(h/r)` and `2π − acos(h/r)` when
    /// `|h| ≤ r`. Outside that range `acos` is undefined and the curve has
    /// none.
    pub fn inflection(&self) -> Inflection {
        if self.r <= 0.0 {
            return Inflection::None;
        }
        let ratio = self.h / self.r;
        if !ratio.is_finite() || ratio.abs() > 1.0 {
            return Inflection::None;
        }
        let t = ratio.acos();
        Inflection::Pair(t, 2.0 * PI - t)
    }
}

impl CurveEval for Trochoid {
    fn evaluate(&self, t: f64) -> Point2d {
        Point2d::new(self.r * t - self.h * t.sin(), self.r - self.h * t.cos())
    }

    fn derivative(&self, t: f64) -> Vec2 {
        Vec2::new(self.r - self.h * t.cos(), self.h * t.sin())
    }
}
