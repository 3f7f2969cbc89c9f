use serde::{Deserialize, Serialize};

/// Pure animation step: returns the state `dt` seconds later.
///
/// Scenes never run timers; the host calls `advance` at whatever rate it
/// likes and swaps in the returned value.
pub trait Animate: Sized {
    fn advance(&self, dt: f64) -> Self;
}

/// Timing shared by all scenes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Length of one reference tick in seconds. Per-tick steps are scaled
    /// by `dt / tick_seconds`.
    pub tick_seconds: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self { tick_seconds: 0.016 }
    }
}

impl AnimationConfig {
    /// Number of reference ticks in `dt` (zero for non-positive input).
    pub fn ticks(&self, dt: f64) -> f64 {
        if !(dt.is_finite() && dt > 0.0 && self.tick_seconds > 0.0) {
            return 0.0;
        }
        dt / self.tick_seconds
    }
}

/// Slack for deciding that a step lands on a bound.
pub const BOUND_EPSILON: f64 = 1e-9;

/// A value that ping-pongs between `min` and `max`.
///
/// Reaching a bound clamps the value onto it and reverses the direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oscillator {
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub rising: bool,
}

impl Oscillator {
    pub fn new(value: f64, min: f64, max: f64) -> Self {
        Self {
            value: value.clamp(min, max),
            min,
            max,
            rising: true,
        }
    }

    /// Move by `amount` in the current direction.
    ///
    /// A step that reaches a bound (within [`BOUND_EPSILON`]) stops on it and
    /// reverses; the overshoot is dropped, so each step reverses at most once.
    pub fn step(&self, amount: f64) -> Self {
        let mut next = *self;
        if self.max <= self.min {
            next.value = self.min;
            return next;
        }
        let amount = amount.abs();
        let room = if next.rising {
            next.max - next.value
        } else {
            next.value - next.min
        };
        if amount >= room - BOUND_EPSILON {
            next.value = if next.rising { next.max } else { next.min };
            next.rising = !next.rising;
        } else {
            next.value += if next.rising { amount } else { -amount };
        }
        next
    }

    /// Same oscillator with a new range; the value is clamped into it.
    pub fn with_range(&self, min: f64, max: f64) -> Self {
        Self {
            value: self.value.clamp(min.min(max), max.max(min)),
            min,
            max,
            rising: self.rising,
        }
    }
}
