use geolab_kernel::Point2d;

/// Walk `program` with a turtle and return every emitted point.
///
/// The turtle starts at the origin facing +x and emits its start point.
/// `F`, `A` and `B` step forward by `step` and emit; `+` turns by
/// `angle_degrees` and `-` turns back; `[` saves position and heading and
/// `]` restores the last saved state, emitting the restored point. An
/// unmatched `]` and every other symbol are ignored.
pub fn interpret(program: &str, angle_degrees: f64, step: f64) -> Vec<Point2d> {
    let mut x = 0.0;
    let mut y = 0.0;
    let mut heading: f64 = 0.0;
    let mut stack: Vec<(f64, f64, f64)> = Vec::new();
    let mut points = vec![Point2d::new(x, y)];

    for symbol in program.chars() {
        match symbol {
            'F' | 'A' | 'B' => {
                let (sin, cos) = heading.to_radians().sin_cos();
                x += step * cos;
                y += step * sin;
                points.push(Point2d::new(x, y));
            }
            '+' => heading += angle_degrees,
            '-' => heading -= angle_degrees,
            '[' => stack.push((x, y, heading)),
            ']' => {
                if let Some((sx, sy, sh)) = stack.pop() {
                    x = sx;
                    y = sy;
                    heading = sh;
                    points.push(Point2d::new(x, y));
                }
            }
            _ => {}
        }
    }
    points
}
