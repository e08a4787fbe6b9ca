#![cfg(test)]

use inkstroke::gesture::{
    CaptureOptions, GestureCapture, GestureData, HeadlessSurface, LineRenderer,
    RecognitionResult, RemoveStrategy,
};
use inkstroke::math::{point, rect, size, vector, Point};
use inkstroke::tessellation::geometry_builder::{BuffersBuilder, VertexBuffers};
use inkstroke::tessellation::{
    Color, LineJoin, MeshBuffer, QuadVertex, StreamingStroke, StrokeOptions, StrokeTessellator,
    SurfaceRect, TessellationError, UnsupportedParameter,
};

use futures::executor::block_on;

fn assert_close(a: Point, b: Point) {
    if (a - b).square_length() > 0.0001 {
        panic!("assert almost equal: {:?} != {:?}", a, b);
    }
}

fn rebuild(points: &[Point], options: &StrokeOptions) -> MeshBuffer {
    StrokeTessellator::new()
        .rebuild(points, &SurfaceRect::default(), options)
        .unwrap()
}

/// Quad count of a connected polyline with no degenerate segments.
fn expected_quads(points: usize, options: &StrokeOptions, bevel_joints: usize) -> usize {
    let segments = points - 1;
    let caps = if options.line_caps { 2 } else { 0 };
    segments + caps + bevel_joints
}

#[test]
fn two_points_make_one_quad() {
    let mesh = rebuild(&[point(-3.0, 2.0), point(4.0, 7.0)], &StrokeOptions::default());

    assert_eq!(mesh.quad_count(), 1);
    assert_eq!(mesh.triangle_count(), 2);
    assert_eq!(mesh.uvs.len(), 4);
}

#[test]
fn quad_count_formula() {
    // A regular polygon outline: every turn is 30 degrees, comfortably stable.
    let points: Vec<Point> = (0..12)
        .map(|i| {
            let a = i as f32 * std::f32::consts::PI / 6.0;
            point(100.0 * a.cos(), 100.0 * a.sin())
        })
        .collect();

    for &caps in &[false, true] {
        let bevel = StrokeOptions::default().with_line_caps(caps).with_line_join(LineJoin::Bevel);
        let miter = bevel.with_line_join(LineJoin::Miter);

        assert_eq!(rebuild(&points, &bevel).quad_count(), expected_quads(12, &bevel, 10));
        assert_eq!(rebuild(&points, &miter).quad_count(), expected_quads(12, &miter, 0));
    }
}

#[test]
fn corner_scenario() {
    let options = StrokeOptions::default().with_line_width(2.0).with_line_join(LineJoin::Bevel);
    let mesh = rebuild(&[point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)], &options);

    assert_eq!(mesh.quad_count(), 3);

    let seg0 = &mesh.vertices[0..4];
    let join = &mesh.vertices[4..8];
    let seg1 = &mesh.vertices[8..12];

    // Outer corners, untouched.
    assert_eq!(seg0[2], point(10.0, -1.0));
    assert_eq!(seg1[1], point(11.0, 0.0));
    // Inner corner, shared.
    assert_close(seg0[3], point(9.0, 1.0));
    assert_eq!(seg0[3], seg1[0]);

    assert_eq!(join[0], seg0[2]);
    assert_eq!(join[1], seg0[3]);
    assert_eq!(join[2], seg1[0]);
    assert_eq!(join[3], seg1[1]);
}

#[test]
fn list_mode() {
    let points = [
        point(0.0, 0.0),
        point(0.0, 10.0),
        point(5.0, 0.0),
        point(5.0, 10.0),
    ];

    let mesh = rebuild(&points, &StrokeOptions::default().with_line_list(true));
    assert_eq!(mesh.quad_count(), 2);

    let err = StrokeTessellator::new().rebuild(
        &points[..3],
        &SurfaceRect::default(),
        &StrokeOptions::default().with_line_list(true),
    );
    assert_eq!(
        err,
        Err(TessellationError::UnsupportedParameter(UnsupportedParameter::OddPointCount(3)))
    );
}

#[test]
fn single_point() {
    let mesh = rebuild(&[point(1.0, 1.0)], &StrokeOptions::default().with_line_caps(true));
    assert!(mesh.is_empty());
    assert!(mesh.vertices.is_empty());
}

#[test]
fn deterministic_rebuilds() {
    let points: Vec<Point> = (0..50)
        .map(|i| point(i as f32 * 1.7, ((i * 7919) % 13) as f32 * 0.9))
        .collect();
    let options = StrokeOptions::default().with_line_join(LineJoin::Miter).with_line_caps(true);

    let a = rebuild(&points, &options);
    let b = rebuild(&points, &options);

    assert_eq!(a.indices, b.indices);
    assert_eq!(a.vertices.len(), b.vertices.len());
    for (pa, pb) in a.vertices.iter().zip(b.vertices.iter()) {
        assert_eq!(pa.x.to_bits(), pb.x.to_bits());
        assert_eq!(pa.y.to_bits(), pb.y.to_bits());
    }
}

#[test]
fn custom_vertex_layout() {
    #[derive(Copy, Clone, Debug, PartialEq)]
    struct GpuVertex {
        position: [f32; 2],
        uv: [f32; 2],
        color: [f32; 4],
    }

    let mut geometry: VertexBuffers<GpuVertex, u16> = VertexBuffers::new();
    let red = Color::new(1.0, 0.0, 0.0, 1.0);

    StrokeTessellator::new()
        .tessellate_polyline(
            &[point(0.0, 0.0), point(4.0, 0.0)],
            &StrokeOptions::default().with_color(red).with_line_caps(true),
            &mut BuffersBuilder::new(&mut geometry, |v: QuadVertex| GpuVertex {
                position: v.position.to_array(),
                uv: v.uv,
                color: v.color.to_array(),
            }),
        )
        .unwrap();

    assert_eq!(geometry.vertices.len(), 12);
    assert_eq!(geometry.indices.len(), 18);
    assert!(geometry.vertices.iter().all(|v| v.color == [1.0, 0.0, 0.0, 1.0]));
    // Start cap, body, end cap.
    assert_eq!(geometry.vertices[0].uv, [0.0, 0.0]);
    assert_eq!(geometry.vertices[6].uv, [0.5, 1.0]);
    assert_eq!(geometry.vertices[10].uv, [1.0, 1.0]);
}

#[test]
fn renderer_keeps_the_last_valid_mesh() {
    let surface_rect = SurfaceRect::new(size(200.0, 200.0), vector(0.5, 0.5));
    let options = StrokeOptions::default().with_relative_size(true).with_line_width(4.0);

    let mut renderer = LineRenderer::new(HeadlessSurface::new(), options);
    renderer.set_surface_rect(surface_rect).unwrap();
    renderer
        .set_points(vec![point(0.0, 0.0), point(0.5, 0.5), point(1.0, 0.0)])
        .unwrap();

    let published = renderer.surface().mesh().unwrap().clone();
    assert_eq!(published.quad_count(), 3);
    assert_close(published.vertices[0], point(-100.0 - 1.4142135, -100.0 + 1.4142135));

    assert!(renderer
        .set_options(options.with_line_width(f32::NAN))
        .is_err());
    assert!(renderer
        .set_points(vec![point(0.0, 0.0), point(f32::NAN, 0.0)])
        .is_err());

    assert!(std::sync::Arc::ptr_eq(renderer.surface().mesh().unwrap(), &published));
    assert_eq!(renderer.surface().redraw_count(), 2);
}

#[test]
fn streaming_matches_point_count() {
    let mut stroke = StreamingStroke::new(3.0, Color::WHITE).unwrap();
    let points: Vec<Point> = (0..20).map(|i| point(i as f32, (i % 3) as f32)).collect();

    let added = points.iter().filter(|p| stroke.add_point(**p)).count();

    assert_eq!(added, points.len() - 1);
    assert_eq!(stroke.to_mesh().quad_count(), points.len() - 1);
}

#[test]
fn two_stroke_gesture() {
    // Recognizes a cross: two lines, the second one crossing the first.
    let recognizer = |data: GestureData, normalize_scale: bool| {
        assert!(!normalize_scale);
        let is_cross = data.lines.len() == 2
            && data.lines.iter().all(|line| line.points.len() >= 2);
        if is_cross {
            RecognitionResult::new("cross", 0.93)
        } else {
            RecognitionResult::new("line", 0.5)
        }
    };

    let options = CaptureOptions::DEFAULT
        .with_max_lines(2)
        .with_fixed_area(rect(0.0, 0.0, 100.0, 100.0))
        .with_remove_strategy(RemoveStrategy::RemoveOld);
    let mut capture = GestureCapture::new(recognizer, options, HeadlessSurface::new).unwrap();

    capture.pointer_down(point(0.0, 0.0));
    capture.pointer_move(point(50.0, 50.0));
    let first = block_on(capture.pointer_up(point(100.0, 100.0)));
    assert!(first.is_empty());
    assert_eq!(first.to_string(), "?");

    capture.pointer_down(point(100.0, 0.0));
    capture.pointer_move(point(50.0, 50.0));
    let second = block_on(capture.pointer_up(point(0.0, 100.0)));
    assert_eq!(second.to_string(), "cross\n93%");

    assert_eq!(capture.drawers().len(), 2);
    for drawer in capture.drawers() {
        assert_eq!(drawer.mesh().quad_count(), 2);
        assert!(drawer.surface().redraw_count() >= 2);
    }

    // A third stroke replaces the oldest one.
    capture.pointer_down(point(10.0, 10.0));
    assert_eq!(capture.data().lines.len(), 2);
    assert_eq!(capture.data().lines[0].points[0], point(100.0, 0.0));
    assert_eq!(capture.drawers()[0].stroke().last_point(), Some(point(0.0, 100.0)));
    assert_eq!(capture.drawers()[1].stroke().last_point(), Some(point(10.0, 10.0)));
}
