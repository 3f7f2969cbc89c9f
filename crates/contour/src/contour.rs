use geolab_kernel::geometry::curves::FergusonSegment;
use geolab_kernel::{Point2d, default_tolerance};
use serde::{Deserialize, Serialize};
use slotmap::{SlotMap, new_key_type};
use thiserror::Error;
use tracing::{debug, info};

new_key_type! {
    pub struct ControlPointId;
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContourError {
    #[error("Segment {index} is out of range (contour has {len} segments)")]
    SegmentOutOfRange { index: usize, len: usize },
    #[error("Contours differ in length: {left} vs {right} segments")]
    SegmentCountMismatch { left: usize, right: usize },
    #[error("Cannot pair a closed contour with an open one")]
    ClosureMismatch,
    #[error("Segment {index} does not start where segment {previous} ends")]
    Discontinuous { previous: usize, index: usize },
}

/// Which of a segment's four control points is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlRole {
    P0,
    C0,
    C1,
    P1,
}

impl ControlRole {
    pub const ALL: [ControlRole; 4] = [
        ControlRole::P0,
        ControlRole::C0,
        ControlRole::C1,
        ControlRole::P1,
    ];
}

/// Arena handles of one segment's control points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct SegmentHandles {
    p0: ControlPointId,
    c0: ControlPointId,
    c1: ControlPointId,
    p1: ControlPointId,
}

impl SegmentHandles {
    fn get(&self, role: ControlRole) -> ControlPointId {
        match role {
            ControlRole::P0 => self.p0,
            ControlRole::C0 => self.c0,
            ControlRole::C1 => self.c1,
            ControlRole::P1 => self.p1,
        }
    }
}

/// A chain of Hermite segments whose joints are shared arena entries.
///
/// Segment `i`'s `p1` and segment `i + 1`'s `p0` are the same
/// [`ControlPointId`]; in a closed contour the last `p1` is also the first
/// `p0`. Moving a joint therefore moves it for both neighbours, and the
/// chain cannot be torn apart by editing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contour {
    points: SlotMap<ControlPointId, Point2d>,
    segments: Vec<SegmentHandles>,
    closed: bool,
}

impl Contour {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a contour from segments given by value.
    ///
    /// Each segment must start where the previous one ends (within the
    /// default coincidence tolerance). If the last segment ends at the first
    /// segment's start the contour is closed.
    pub fn from_segments(segments: &[FergusonSegment]) -> Result<Self, ContourError> {
        let tol = default_tolerance();
        let mut contour = Self::new();
        let Some(first) = segments.first() else {
            return Ok(contour);
        };

        let closed = segments.len() > 1
            && segments
                .last()
                .is_some_and(|last| tol.points_coincident(&last.p1, &first.p0));

        let start = contour.points.insert(first.p0);
        let mut joint = start;
        for (index, seg) in segments.iter().enumerate() {
            if index > 0 && !tol.points_coincident(&segments[index - 1].p1, &seg.p0) {
                return Err(ContourError::Discontinuous {
                    previous: index - 1,
                    index,
                });
            }
            let c0 = contour.points.insert(seg.c0);
            let c1 = contour.points.insert(seg.c1);
            let p1 = if closed && index == segments.len() - 1 {
                start
            } else {
                contour.points.insert(seg.p1)
            };
            contour.segments.push(SegmentHandles {
                p0: joint,
                c0,
                c1,
                p1,
            });
            joint = p1;
        }
        contour.closed = closed;

        info!(
            segments = contour.segments.len(),
            control_points = contour.points.len(),
            closed,
            "contour built"
        );
        Ok(contour)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Distinct control points in the arena.
    pub fn control_point_count(&self) -> usize {
        self.points.len()
    }

    fn handles(&self, index: usize) -> Result<&SegmentHandles, ContourError> {
        self.segments.get(index).ok_or(ContourError::SegmentOutOfRange {
            index,
            len: self.segments.len(),
        })
    }

    /// Arena id of a control point.
    pub fn point_id(&self, index: usize, role: ControlRole) -> Result<ControlPointId, ContourError> {
        Ok(self.handles(index)?.get(role))
    }

    pub fn point(&self, id: ControlPointId) -> Option<Point2d> {
        self.points.get(id).copied()
    }

    fn resolve(&self, handles: &SegmentHandles) -> FergusonSegment {
        // every handle was inserted by this contour and nothing is ever removed
        let at = |id: ControlPointId| self.points.get(id).copied().unwrap_or_default();
        FergusonSegment::new(at(handles.p0), at(handles.c0), at(handles.c1), at(handles.p1))
    }

    pub fn segment(&self, index: usize) -> Result<FergusonSegment, ContourError> {
        Ok(self.resolve(self.handles(index)?))
    }

    /// All segments by value, in order.
    pub fn segments(&self) -> Vec<FergusonSegment> {
        self.segments.iter().map(|h| self.resolve(h)).collect()
    }

    /// Move one control point. Joints are shared, so moving an endpoint also
    /// moves the neighbouring segment's endpoint.
    pub fn move_point(
        &mut self,
        index: usize,
        role: ControlRole,
        position: Point2d,
    ) -> Result<(), ContourError> {
        let id = self.point_id(index, role)?;
        if let Some(p) = self.points.get_mut(id) {
            *p = position;
        }
        debug!(index, ?role, x = position.x, y = position.y, "control point moved");
        Ok(())
    }

    /// Apply `f` to every control point once.
    pub fn transform_points(&mut self, mut f: impl FnMut(&Point2d) -> Point2d) {
        for (_, p) in self.points.iter_mut() {
            *p = f(p);
        }
    }

    /// Per-segment interpolation toward `other`.
    ///
    /// The result keeps this contour's sharing structure.
    pub fn lerp(&self, other: &Contour, t: f64) -> Result<Contour, ContourError> {
        if self.len() != other.len() {
            return Err(ContourError::SegmentCountMismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        if self.closed != other.closed {
            return Err(ContourError::ClosureMismatch);
        }
        let mut out = self.clone();
        for (mine, theirs) in self.segments.iter().zip(&other.segments) {
            for role in ControlRole::ALL {
                let id = mine.get(role);
                let (Some(a), Some(b)) = (self.point(id), other.point(theirs.get(role))) else {
                    continue;
                };
                if let Some(p) = out.points.get_mut(id) {
                    *p = a.lerp(&b, t);
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn square() -> Vec<FergusonSegment> {
        let corners = [
            Point2d::new(0.0, 0.0),
            Point2d::new(10.0, 0.0),
            Point2d::new(10.0, 10.0),
            Point2d::new(0.0, 10.0),
        ];
        (0..4)
            .map(|i| FergusonSegment::straight(corners[i], corners[(i + 1) % 4]))
            .collect()
    }

    #[test]
    fn test_closed_contour_shares_joints() {
        let contour = Contour::from_segments(&square()).unwrap();
        assert!(contour.is_closed());
        assert_eq!(contour.len(), 4);
        // 4 joints + 2 controls per segment
        assert_eq!(contour.control_point_count(), 12);
        assert_eq!(
            contour.point_id(3, ControlRole::P1).unwrap(),
            contour.point_id(0, ControlRole::P0).unwrap()
        );
        assert_eq!(
            contour.point_id(1, ControlRole::P1).unwrap(),
            contour.point_id(2, ControlRole::P0).unwrap()
        );
    }

    #[test]
    fn test_move_endpoint_moves_neighbour() {
        let mut contour = Contour::from_segments(&square()).unwrap();
        let target = Point2d::new(12.0, -1.0);
        contour.move_point(0, ControlRole::P1, target).unwrap();
        assert_eq!(contour.segment(0).unwrap().p1, target);
        assert_eq!(contour.segment(1).unwrap().p0, target);
    }

    #[test]
    fn test_move_first_point_closes_loop() {
        let mut contour = Contour::from_segments(&square()).unwrap();
        let target = Point2d::new(-3.0, -3.0);
        contour.move_point(0, ControlRole::P0, target).unwrap();
        assert_eq!(contour.segment(3).unwrap().p1, target);
    }

    #[test]
    fn test_move_control_is_local() {
        let mut contour = Contour::from_segments(&square()).unwrap();
        contour.move_point(1, ControlRole::C0, Point2d::new(20.0, 5.0)).unwrap();
        assert_eq!(contour.segment(1).unwrap().c0, Point2d::new(20.0, 5.0));
        assert_eq!(contour.segment(0).unwrap().c1, Point2d::new(10.0, 0.0));
    }

    #[test]
    fn test_out_of_range_segment() {
        let mut contour = Contour::from_segments(&square()).unwrap();
        let err = contour
            .move_point(4, ControlRole::P0, Point2d::ORIGIN)
            .unwrap_err();
        assert_eq!(err, ContourError::SegmentOutOfRange { index: 4, len: 4 });
        assert!(contour.segment(99).is_err());
    }

    #[test]
    fn test_discontinuous_input_rejected() {
        let mut segs = square();
        segs[2].p0 = Point2d::new(50.0, 50.0);
        assert_eq!(
            Contour::from_segments(&segs).unwrap_err(),
            ContourError::Discontinuous {
                previous: 1,
                index: 2
            }
        );
    }

    #[test]
    fn test_open_contour() {
        let segs = &square()[..2];
        let contour = Contour::from_segments(segs).unwrap();
        assert!(!contour.is_closed());
        assert_eq!(contour.control_point_count(), 7);
        assert!(Contour::from_segments(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_lerp_contours() {
        let a = Contour::from_segments(&square()).unwrap();
        let mut b = a.clone();
        b.transform_points(|p| Point2d::new(p.x * 2.0, p.y * 2.0));
        let mid = a.lerp(&b, 0.5).unwrap();
        assert_abs_diff_eq!(
            mid.segment(2).unwrap().p0,
            Point2d::new(15.0, 15.0),
            epsilon = 1e-12
        );
        assert_eq!(
            mid.point_id(3, ControlRole::P1).unwrap(),
            mid.point_id(0, ControlRole::P0).unwrap()
        );
    }

    #[test]
    fn test_lerp_length_mismatch() {
        let a = Contour::from_segments(&square()).unwrap();
        let b = Contour::from_segments(&square()[..2]).unwrap();
        assert_eq!(
            a.lerp(&b, 0.5).unwrap_err(),
            ContourError::SegmentCountMismatch { left: 4, right: 2 }
        );
    }

    #[test]
    fn test_lerp_closure_mismatch() {
        let closed = Contour::from_segments(&square()).unwrap();
        let mut segs = square();
        segs[3].p1 = Point2d::new(-5.0, 0.0);
        let open = Contour::from_segments(&segs).unwrap();
        assert!(!open.is_closed());
        assert_eq!(
            closed.lerp(&open, 0.5).unwrap_err(),
            ContourError::ClosureMismatch
        );
    }
}
