use geolab_kernel::geometry::curves::FergusonSegment;
use serde::{Deserialize, Serialize};

use crate::contour::{Contour, ContourError};

/// Interpolate corresponding segments of two equally long chains.
///
/// `progress` is clamped to `[0, 1]`; every control point of segment `i`
/// moves linearly from `start[i]` toward `target[i]`.
pub fn morph_segments(
    start: &[FergusonSegment],
    target: &[FergusonSegment],
    progress: f64,
) -> Result<Vec<FergusonSegment>, ContourError> {
    if start.len() != target.len() {
        return Err(ContourError::SegmentCountMismatch {
            left: start.len(),
            right: target.len(),
        });
    }
    let t = progress.clamp(0.0, 1.0);
    Ok(start.iter().zip(target).map(|(a, b)| a.lerp(b, t)).collect())
}

/// A start shape and a target shape with the same segment count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Morph {
    start: Contour,
    target: Contour,
}

impl Morph {
    pub fn new(start: Contour, target: Contour) -> Result<Self, ContourError> {
        if start.len() != target.len() {
            return Err(ContourError::SegmentCountMismatch {
                left: start.len(),
                right: target.len(),
            });
        }
        if start.is_closed() != target.is_closed() {
            return Err(ContourError::ClosureMismatch);
        }
        Ok(Self { start, target })
    }

    pub fn start(&self) -> &Contour {
        &self.start
    }

    pub fn target(&self) -> &Contour {
        &self.target
    }

    /// The editable start shape. Editing moves points, never segments, so
    /// the segment counts stay equal.
    pub fn start_mut(&mut self) -> &mut Contour {
        &mut self.start
    }

    /// The in-between contour at `progress` (clamped to `[0, 1]`).
    pub fn at(&self, progress: f64) -> Result<Contour, ContourError> {
        self.start.lerp(&self.target, progress.clamp(0.0, 1.0))
    }
}
