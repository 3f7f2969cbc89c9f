//! Generate SVG line drawings of every scene for the README.

use std::error::Error;
use std::fs;

use geolab_kernel::{BoundingBox2d, CircleShape, Segment};
use geolab_lsystem::FractalSegment;
use geolab_scenes::{
    Animate, FigureScene, FractalScene, Layer, PrismScene, SplineScene, SurfaceScene,
    TrochoidScene, UserMatrixMode,
};
use geolab_tessellation::{polyline_to_segments, tessellate_circle};
use serde::Serialize;

const OUT_DIR: &str = "docs/renders";

/// One group of lines sharing a stroke colour.
struct Layered<'a> {
    color: &'a str,
    width: f64,
    segments: Vec<Segment>,
}

impl<'a> Layered<'a> {
    fn new(color: &'a str, width: f64, segments: Vec<Segment>) -> Self {
        Self {
            color,
            width,
            segments,
        }
    }
}

fn circle_outline(circle: &CircleShape) -> Vec<Segment> {
    polyline_to_segments(&tessellate_circle(circle, 30.0))
}

/// Lines are drawn in scene coordinates; the view box is fitted around the
/// drawing so every scene lands on the canvas.
fn segments_to_svg(layers: &[Layered<'_>], width: f64, height: f64, title: &str) -> String {
    let mut bounds = BoundingBox2d::empty();
    for layer in layers {
        for s in &layer.segments {
            bounds.expand_to_include(&s.start);
            bounds.expand_to_include(&s.end);
        }
    }
    if !bounds.is_valid() {
        return format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\">\
             <text x=\"10\" y=\"20\" font-family=\"monospace\" font-size=\"14\" fill=\"#ccc\">{title}</text>\
             </svg>\n"
        );
    }

    let pad = 20.0;
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
         viewBox=\"{:.1} {:.1} {:.1} {:.1}\" style=\"background:#1a1a2e\">\n",
        bounds.min.x - pad,
        bounds.min.y - pad - 20.0,
        bounds.width() + 2.0 * pad,
        bounds.height() + 2.0 * pad + 20.0,
    );
    svg.push_str(&format!(
        "  <text x=\"{:.1}\" y=\"{:.1}\" font-family=\"monospace\" font-size=\"13\" fill=\"#8892b0\" \
         text-anchor=\"middle\">{title}</text>\n",
        bounds.center().x,
        bounds.min.y - pad,
    ));

    let mut total = 0usize;
    for layer in layers {
        svg.push_str(&format!(
            "  <g stroke=\"{}\" stroke-width=\"{}\" fill=\"none\">\n",
            layer.color, layer.width
        ));
        for s in &layer.segments {
            svg.push_str(&format!(
                "    <line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\"/>\n",
                s.start.x, s.start.y, s.end.x, s.end.y
            ));
        }
        svg.push_str("  </g>\n");
        total += layer.segments.len();
    }
    svg.push_str(&format!("  <!-- {total} segments -->\n</svg>\n"));
    svg
}

/// Fractal segments shaded from blue to orange along the drawing.
fn fractal_to_svg(segments: &[FractalSegment], width: f64, height: f64) -> String {
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
         style=\"background:#1a1a2e\">\n"
    );
    for fs in segments {
        let t = fs.progress.clamp(0.0, 1.0);
        let r = (80.0 + 170.0 * t) as u8;
        let g = (140.0 - 20.0 * t) as u8;
        let b = (230.0 - 180.0 * t) as u8;
        let s = &fs.segment;
        svg.push_str(&format!(
            "  <line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"rgb({r},{g},{b})\"/>\n",
            s.start.x, s.start.y, s.end.x, s.end.y
        ));
    }
    svg.push_str("</svg>\n");
    svg
}

#[derive(Debug, Serialize)]
struct RenderSummary {
    file: String,
    segments: usize,
}

fn write_svg(
    summary: &mut Vec<RenderSummary>,
    name: &str,
    svg: String,
    segments: usize,
) -> Result<(), Box<dyn Error>> {
    let file = format!("{OUT_DIR}/{name}.svg");
    fs::write(&file, svg)?;
    println!("  {name}: {segments} segments");
    summary.push(RenderSummary { file, segments });
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(OUT_DIR)?;
    let mut summary = Vec::new();

    println!("=== 2D Transforms ===");

    // 1. Figure under rotation and scale about the pivot
    {
        let mut scene = FigureScene::new();
        scene.controls.angle = 30.0;
        scene.controls.scale = 0.8;
        scene.sketch.sample_square();
        scene.sketch.rotate(15.0);
        let frame = scene.recompute();
        let count = frame.figure.len() + frame.circles.len() + frame.sketch.len();
        let svg = segments_to_svg(
            &[
                Layered::new("#2a2a4a", 0.5, frame.grid),
                Layered::new("#64a0dc", 1.5, frame.figure),
                Layered::new("#dc8c50", 1.0, frame.circles),
                Layered::new("#8cdc8c", 1.0, frame.sketch),
                Layered::new("#ffffff", 1.0, circle_outline(&CircleShape::new(frame.pivot, 3.0))),
            ],
            800.0,
            600.0,
            "Figure (rotate 30°, scale 0.8)",
        );
        write_svg(&mut summary, "figure", svg, count)?;
    }

    // 2. Same figure through a projective user matrix
    {
        let mut scene = FigureScene::new();
        scene.controls.mode = UserMatrixMode::Projective;
        scene.controls.wx = 1.0;
        scene.controls.wy = 1.0;
        scene.controls.w0 = 400.0;
        scene.controls.dx = 1.0;
        scene.controls.dy = 1.0;
        let frame = scene.recompute();
        let count = frame.figure.len() + frame.circles.len();
        let svg = segments_to_svg(
            &[
                Layered::new("#2a2a4a", 0.5, frame.grid),
                Layered::new("#64a0dc", 1.5, frame.figure),
                Layered::new("#dc8c50", 1.0, frame.circles),
            ],
            800.0,
            600.0,
            "Figure (projective)",
        );
        write_svg(&mut summary, "figure_projective", svg, count)?;
    }

    println!("\n=== Curves ===");

    // 3. Trochoid with tangent and normal
    {
        let scene = TrochoidScene::default();
        let frame = scene.recompute();
        println!("{}", frame.metrics);
        let count = frame.curve.len();
        let svg = segments_to_svg(
            &[
                Layered::new("#2a2a4a", 0.5, frame.grid),
                Layered::new("#64a0dc", 1.5, frame.curve),
                Layered::new("#dc8c50", 1.0, vec![frame.tangent]),
                Layered::new("#8cdc8c", 1.0, vec![frame.normal]),
            ],
            900.0,
            400.0,
            "Trochoid (r=3, h=2)",
        );
        write_svg(&mut summary, "trochoid", svg, count)?;
    }

    // 4. Spline halfway between bird and triangle
    {
        let mut scene = SplineScene::new()?;
        scene = scene.advance(scene.animation.tick_seconds * 50.0);
        let frame = scene.recompute()?;
        let markers: Vec<Segment> = frame.markers.iter().flat_map(circle_outline).collect();
        let count = frame.curve.len();
        let svg = segments_to_svg(
            &[
                Layered::new("#2a2a4a", 0.5, frame.grid),
                Layered::new("#3a3a5a", 0.5, frame.polygon),
                Layered::new("#64a0dc", 1.5, frame.curve),
                Layered::new("#dc8c50", 1.0, markers),
            ],
            600.0,
            600.0,
            "Hermite morph (50%)",
        );
        write_svg(&mut summary, "spline_morph", svg, count)?;
    }

    println!("\n=== 3D ===");

    // 5. Star prism, turned
    {
        let mut scene = PrismScene::new();
        scene.view.rotation.x = 30.0;
        scene.view.rotation.y = 40.0;
        let frame = scene.recompute()?;
        let count = frame.edges.len();
        let svg = segments_to_svg(
            &[
                Layered::new("#5a6080", 1.0, frame.axes),
                Layered::new("#64a0dc", 1.5, frame.edges),
            ],
            600.0,
            600.0,
            "Star prism",
        );
        write_svg(&mut summary, "prism", svg, count)?;
    }

    // 6. Paraboloid with the mapped contour
    {
        let scene = SurfaceScene::new();
        let frame = scene.recompute();
        let pick = |layer: Layer| -> Vec<Segment> {
            frame
                .iter()
                .filter(|s| s.layer == layer)
                .map(|s| s.segment)
                .collect()
        };
        let svg = segments_to_svg(
            &[
                Layered::new("#3a4a7a", 0.7, pick(Layer::Surface)),
                Layered::new("#dc8c50", 1.5, pick(Layer::Contour)),
                Layered::new("#8cdc8c", 1.0, pick(Layer::Axis)),
            ],
            600.0,
            600.0,
            "Paraboloid with contour",
        );
        write_svg(&mut summary, "surface", svg, frame.len())?;
    }

    println!("\n=== Fractals ===");

    // 7. Default L-system
    {
        let scene = FractalScene::new();
        let segments = scene.recompute()?;
        let svg = fractal_to_svg(&segments, scene.config.canvas.width, scene.config.canvas.height);
        write_svg(&mut summary, "fractal", svg, segments.len())?;
    }

    // 8. Branching plant
    {
        let mut scene = FractalScene::new();
        scene.set_axiom("X");
        scene.set_rules("X->F+[[X]-X]-F[-FX]+X\nF->FF");
        scene.set_angle(25.0);
        scene.set_iterations(4);
        let segments = scene.recompute()?;
        let svg = fractal_to_svg(&segments, scene.config.canvas.width, scene.config.canvas.height);
        write_svg(&mut summary, "fractal_plant", svg, segments.len())?;
    }

    println!("\n{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
