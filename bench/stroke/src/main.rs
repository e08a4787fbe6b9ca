extern crate inkstroke;
#[macro_use]
extern crate bencher;

use inkstroke::math::{point, Point};
use inkstroke::tessellation::geometry_builder::{simple_builder, VertexBuffers};
use inkstroke::tessellation::{
    Color, LineJoin, MeshBuffer, StreamingStroke, StrokeOptions, StrokeTessellator, SurfaceRect,
};

use bencher::Bencher;

const N: usize = 100;

/// A wobbly spiral, sampled the way a pointer drag would be.
fn spiral(num_points: usize) -> Vec<Point> {
    (0..num_points)
        .map(|i| {
            let t = i as f32 * 0.1;
            let r = 10.0 + t * 5.0 + (t * 7.0).sin();
            point(r * t.cos(), r * t.sin())
        })
        .collect()
}

fn stroke_bevel(bench: &mut Bencher) {
    let points = spiral(500);
    let options = StrokeOptions::default().with_line_join(LineJoin::Bevel).with_line_caps(true);
    let mut tess = StrokeTessellator::new();

    bench.iter(|| {
        for _ in 0..N {
            let mut mesh = MeshBuffer::with_capacity(8192, 12288);
            tess.tessellate_polyline(&points, &options, &mut mesh).unwrap();
        }
    })
}

fn stroke_miter(bench: &mut Bencher) {
    let points = spiral(500);
    let options = StrokeOptions::default().with_line_join(LineJoin::Miter).with_line_caps(true);
    let mut tess = StrokeTessellator::new();

    bench.iter(|| {
        for _ in 0..N {
            let mut mesh = MeshBuffer::with_capacity(8192, 12288);
            tess.tessellate_polyline(&points, &options, &mut mesh).unwrap();
        }
    })
}

fn stroke_line_list(bench: &mut Bencher) {
    let points = spiral(500);
    let options = StrokeOptions::default().with_line_list(true);
    let mut tess = StrokeTessellator::new();

    bench.iter(|| {
        for _ in 0..N {
            let mut buffers: VertexBuffers<Point, u16> = VertexBuffers::with_capacity(1024, 1536);
            tess.tessellate_polyline(&points, &options, &mut simple_builder(&mut buffers)).unwrap();
        }
    })
}

fn stroke_rebuild_in_surface(bench: &mut Bencher) {
    let points: Vec<Point> = spiral(500)
        .iter()
        .map(|p| point(p.x / 500.0 + 0.5, p.y / 500.0 + 0.5))
        .collect();
    let surface = SurfaceRect::from_size(1024.0, 768.0);
    let options = StrokeOptions::default()
        .with_relative_size(true)
        .with_margin(inkstroke::math::vector(20.0, 20.0));
    let mut tess = StrokeTessellator::new();

    bench.iter(|| {
        for _ in 0..N {
            let mesh = tess.rebuild(&points, &surface, &options).unwrap();
            bencher::black_box(mesh);
        }
    })
}

fn streaming_add_points(bench: &mut Bencher) {
    let points = spiral(500);

    bench.iter(|| {
        for _ in 0..N {
            let mut stroke = StreamingStroke::new(4.0, Color::WHITE).unwrap();
            for p in &points {
                stroke.add_point(*p);
            }
            bencher::black_box(stroke.to_mesh());
        }
    })
}

benchmark_group!(stroke_tess,
  stroke_bevel,
  stroke_miter,
  stroke_line_list,
  stroke_rebuild_in_surface
);

benchmark_group!(streaming,
  streaming_add_points
);

benchmark_main!(stroke_tess, streaming);
