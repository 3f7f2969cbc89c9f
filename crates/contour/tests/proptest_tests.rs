//! Property-based tests for contour editing and morphing.

use proptest::prelude::*;

use geolab_contour::{Contour, ControlRole, morph_segments};
use geolab_kernel::Point2d;
use geolab_kernel::geometry::curves::FergusonSegment;

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn arb_point() -> impl Strategy<Value = Point2d> {
    (-500.0f64..500.0, -500.0f64..500.0).prop_map(|(x, y)| Point2d::new(x, y))
}

/// A closed chain of `3..12` joints with arbitrary control points.
fn arb_closed_chain() -> impl Strategy<Value = Vec<FergusonSegment>> {
    prop::collection::vec((arb_point(), arb_point(), arb_point()), 3..12).prop_map(|raw| {
        let n = raw.len();
        (0..n)
            .map(|i| FergusonSegment::new(raw[i].0, raw[i].1, raw[i].2, raw[(i + 1) % n].0))
            .collect()
    })
}

fn arb_role() -> impl Strategy<Value = ControlRole> {
    prop::sample::select(ControlRole::ALL.to_vec())
}

// ---------------------------------------------------------------------------
// 1. Any edit keeps every joint continuous
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn edits_preserve_continuity(
        chain in arb_closed_chain(),
        index in 0usize..12,
        role in arb_role(),
        target in arb_point(),
    ) {
        let mut contour = Contour::from_segments(&chain).unwrap();
        let index = index % contour.len();
        contour.move_point(index, role, target).unwrap();

        let segs = contour.segments();
        for i in 0..segs.len() {
            let next = &segs[(i + 1) % segs.len()];
            prop_assert_eq!(segs[i].p1, next.p0);
        }
        let moved = contour.segment(index).unwrap();
        let actual = match role {
            ControlRole::P0 => moved.p0,
            ControlRole::C0 => moved.c0,
            ControlRole::C1 => moved.c1,
            ControlRole::P1 => moved.p1,
        };
        prop_assert_eq!(actual, target);
    }
}

// ---------------------------------------------------------------------------
// 2. Morphing hits both ends exactly
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn morph_starts_at_start(a in arb_closed_chain()) {
        let b: Vec<FergusonSegment> = a
            .iter()
            .map(|s| s.map_points(|p| Point2d::new(p.y, p.x)))
            .collect();
        prop_assert_eq!(morph_segments(&a, &b, 0.0).unwrap(), a);
    }
}
