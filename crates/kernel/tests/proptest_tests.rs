//! Property-based tests for kernel invariants using the `proptest` crate.

use proptest::prelude::*;

use geolab_kernel::geometry::curves::FergusonSegment;
use geolab_kernel::geometry::trochoid::{Inflection, Trochoid};
use geolab_kernel::{
    CurveEval, Matrix3, Matrix4, Point2d, Point3d, Segment, SegmentSet, Vec3, pivot_transform,
};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// Arbitrary planar coordinate in a screen-like range.
fn arb_point2() -> impl Strategy<Value = (f64, f64)> {
    (-1000.0f64..1000.0, -1000.0f64..1000.0)
}

fn arb_point3() -> impl Strategy<Value = (f64, f64, f64)> {
    (-1000.0f64..1000.0, -1000.0f64..1000.0, -1000.0f64..1000.0)
}

/// Arbitrary angle in degrees.
fn arb_degrees() -> impl Strategy<Value = f64> {
    -360.0f64..360.0
}

/// Non-degenerate scale factor.
fn arb_scale() -> impl Strategy<Value = f64> {
    0.1f64..10.0
}

fn arb_segments() -> impl Strategy<Value = Vec<(f64, f64, f64, f64)>> {
    prop::collection::vec(
        (-500.0f64..500.0, -500.0f64..500.0, -500.0f64..500.0, -500.0f64..500.0),
        0..20,
    )
}

const TOL: f64 = 1e-6;

fn close(a: &Point2d, b: &Point2d, tol: f64) -> bool {
    (a.x - b.x).abs() < tol && (a.y - b.y).abs() < tol
}

// ---------------------------------------------------------------------------
// 1. The identity leaves every point unchanged
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn identity_apply_is_exact((x, y) in arb_point2()) {
        let p = Point2d::new(x, y);
        prop_assert_eq!(Matrix3::identity().apply(&p), p);
    }
}

// ---------------------------------------------------------------------------
// 2. A pivot is fixed by its own rotation, scaling and composite
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn pivot_is_fixed(
        (px, py) in arb_point2(),
        angle in arb_degrees(),
        scale in arb_scale(),
    ) {
        let pivot = Point2d::new(px, py);
        let rotated = Matrix3::rotation(angle, pivot).apply(&pivot);
        prop_assert!(close(&rotated, &pivot, TOL), "rotation moved pivot to {:?}", rotated);
        let composite = pivot_transform(angle, scale, pivot).apply(&pivot);
        prop_assert!(close(&composite, &pivot, 1e-5), "composite moved pivot to {:?}", composite);
    }
}

// ---------------------------------------------------------------------------
// 3. Multiplying by the identity changes nothing
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn matrix3_identity_product(
        angle in arb_degrees(),
        scale in arb_scale(),
        (px, py) in arb_point2(),
    ) {
        let a = pivot_transform(angle, scale, Point2d::new(px, py));
        let i = Matrix3::identity();
        prop_assert_eq!(Matrix3::multiply(&a, &i), a);
        prop_assert_eq!(Matrix3::multiply(&i, &a), a);
    }

    #[test]
    fn matrix4_identity_product(
        rx in arb_degrees(),
        ry in arb_degrees(),
        rz in arb_degrees(),
        (tx, ty, tz) in arb_point3(),
    ) {
        let a = Matrix4::world_transform(rx, ry, rz, Vec3::new(tx, ty, tz));
        let i = Matrix4::identity();
        prop_assert_eq!(Matrix4::multiply(&a, &i), a);
        prop_assert_eq!(Matrix4::multiply(&i, &a), a);
    }
}

// ---------------------------------------------------------------------------
// 4. World transforms preserve distances (rotation + translation only)
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn world_transform_is_rigid(
        rx in arb_degrees(),
        ry in arb_degrees(),
        rz in arb_degrees(),
        (ax, ay, az) in arb_point3(),
        (bx, by, bz) in arb_point3(),
    ) {
        let m = Matrix4::world_transform(rx, ry, rz, Vec3::new(5.0, -3.0, 2.0));
        let a = Point3d::new(ax, ay, az);
        let b = Point3d::new(bx, by, bz);
        let before = a.distance_to(&b);
        let after = m.transform_point(&a).distance_to(&m.transform_point(&b));
        prop_assert!((before - after).abs() < 1e-6 * before.max(1.0));
    }
}

// ---------------------------------------------------------------------------
// 5. Hermite segments interpolate their endpoints
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn hermite_interpolates_endpoints(
        (ax, ay) in arb_point2(),
        (bx, by) in arb_point2(),
        (cx, cy) in arb_point2(),
        (dx, dy) in arb_point2(),
    ) {
        let seg = FergusonSegment::new(
            Point2d::new(ax, ay),
            Point2d::new(bx, by),
            Point2d::new(cx, cy),
            Point2d::new(dx, dy),
        );
        prop_assert!(close(&seg.evaluate(0.0), &seg.p0, 1e-9));
        prop_assert!(close(&seg.evaluate(1.0), &seg.p1, 1e-9));
    }
}

// ---------------------------------------------------------------------------
// 6. Translating a segment set forth and back restores it
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn translate_round_trip(
        raw in arb_segments(),
        (dx, dy) in arb_point2(),
    ) {
        let segments: Vec<Segment> = raw
            .iter()
            .map(|&(a, b, c, d)| Segment::line(Point2d::new(a, b), Point2d::new(c, d)))
            .collect();
        let mut set = SegmentSet::from_segments(segments.clone());
        set.translate(dx, dy);
        set.translate(-dx, -dy);
        prop_assert_eq!(set.len(), segments.len());
        for (moved, before) in set.segments().iter().zip(&segments) {
            prop_assert!(close(&moved.start, &before.start, 1e-9));
            prop_assert!(close(&moved.end, &before.end, 1e-9));
        }
    }
}

// ---------------------------------------------------------------------------
// 7. Trochoid inflection points exist exactly when |h| ≤ r
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn trochoid_inflection_iff_h_le_r(r in 0.1f64..10.0, h in -20.0f64..20.0) {
        let c = Trochoid::new(r, h);
        match c.inflection() {
            Inflection::Pair(a, b) => {
                prop_assert!(h.abs() <= r);
                prop_assert!(a.is_finite() && b.is_finite());
                prop_assert!((a + b - 2.0 * std::f64::consts::PI).abs() < 1e-9);
            }
            Inflection::None => prop_assert!(h.abs() > r),
        }
    }
}
