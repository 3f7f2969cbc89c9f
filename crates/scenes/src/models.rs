//! Built-in shapes, authored in centimetres and converted to pixels.

use geolab_kernel::{CircleShape, FergusonSegment, PIXELS_PER_CM, Point2d, Segment, Vec2};

fn cm(x: f64, y: f64) -> Point2d {
    Point2d::new(x * PIXELS_PER_CM, y * PIXELS_PER_CM)
}

const FIGURE_LINES: [[f64; 4]; 10] = [
    [2.0, 15.0, 7.0, 15.0],
    [7.0, 16.0, 7.0, 4.0],
    [2.0, 10.0, 2.0, 15.0],
    [2.0, 10.0, 4.1, 10.0],
    [4.1, 10.0, 7.0, 8.0],
    [7.0, 16.0, 9.0, 16.0],
    [9.0, 16.0, 9.0, 3.8],
    [9.0, 3.8, 8.0, 3.8],
    [8.0, 3.8, 8.0, 4.0],
    [8.0, 4.0, 7.0, 4.0],
];

/// The letter-like figure of the transform lab.
pub fn letter_figure() -> Vec<Segment> {
    FIGURE_LINES
        .iter()
        .map(|[x0, y0, x1, y1]| Segment::line(cm(*x0, *y0), cm(*x1, *y1)))
        .collect()
}

/// The small circle drawn around the figure's default pivot.
pub fn figure_circle() -> CircleShape {
    CircleShape::from_cm(4.7, 12.5, 0.6)
}

/// `(p0, c0, c1, p1)` per segment.
const BIRD: [[(f64, f64); 4]; 12] = [
    [(2.0, 12.0), (4.0, 15.0), (6.0, 16.0), (8.0, 15.5)],
    [(8.0, 15.5), (9.0, 15.0), (9.5, 14.5), (10.0, 13.5)],
    [(10.0, 13.5), (10.5, 12.5), (11.5, 13.0), (12.0, 12.0)],
    [(12.0, 12.0), (12.5, 11.0), (12.5, 10.0), (12.5, 9.0)],
    [(12.5, 9.0), (12.5, 8.0), (13.0, 7.0), (12.5, 6.0)],
    [(12.5, 6.0), (12.2, 4.0), (12.2, 2.0), (12.0, 0.5)],
    [(12.0, 0.5), (11.5, 0.5), (11.0, 1.0), (11.0, 3.0)],
    [(11.0, 3.0), (11.0, 4.0), (10.0, 4.0), (9.0, 5.0)],
    [(9.0, 5.0), (8.0, 6.0), (8.0, 8.0), (9.0, 9.0)],
    [(9.0, 9.0), (9.2, 10.0), (9.2, 11.0), (9.0, 11.5)],
    [(9.0, 11.5), (8.0, 11.2), (6.0, 11.0), (5.0, 11.2)],
    [(5.0, 11.2), (4.0, 11.5), (3.0, 11.8), (2.0, 12.0)],
];

/// Closed bird outline of twelve Hermite segments.
pub fn bird_contour() -> Vec<FergusonSegment> {
    BIRD.iter()
        .map(|[p0, c0, c1, p1]| {
            FergusonSegment::new(cm(p0.0, p0.1), cm(c0.0, c0.1), cm(c1.0, c1.1), cm(p1.0, p1.1))
        })
        .collect()
}

/// Triangle with four straight segments per side, matching the bird's
/// segment count so the two can be morphed.
pub fn triangle_target() -> Vec<FergusonSegment> {
    let corners = [cm(4.0, 4.0), cm(14.0, 4.0), cm(9.0, 15.0)];
    let mut segments = Vec::with_capacity(12);
    for k in 0..3 {
        let start = corners[k];
        let end = corners[(k + 1) % 3];
        let v: Vec2 = (end - start) * 0.25;
        for i in 0..4 {
            let a = start + v * i as f64;
            let b = start + v * (i + 1) as f64;
            segments.push(FergusonSegment::straight(a, b));
        }
    }
    segments
}
