use crate::geom::LineSegment;
use crate::geometry_builder::QuadGeometryBuilder;
use crate::math::Point;
use crate::{
    build_cap, build_segment, resolve_join, MeshBuffer, Quad, SegmentRole, StrokeOptions,
    SurfaceRect, TessellationError, TessellationResult, UnsupportedParameter,
};

use log::debug;

/// A Context object that can tessellate constant-width strokes along polylines.
///
/// ## Overview
///
/// Each segment of the polyline is extruded into a quad, and adjacent quads
/// are welded at the corners according to the `LineJoin` of the options
/// (see [`resolve_join`](fn.resolve_join.html)). Optional flat caps extend
/// the first and last segments. Every quad is written as two triangles, so
/// the output is a plain triangle list.
///
/// Like other strip-based stroke tessellators, self-overlapping strokes
/// produce overlapping triangles. This needs to be kept in mind when
/// rendering semi-transparent strokes.
///
/// In line list mode (`StrokeOptions::line_list`), the points are read as
/// independent pairs, each producing its own quad and caps with no joins.
///
/// The tessellator keeps its scratch buffers between calls, so reusing the
/// same `StrokeTessellator` for repeated rebuilds avoids allocations.
///
/// # Examples
///
/// ```
/// # extern crate inkstroke_tessellation as tess;
/// # use tess::math::*;
/// # use tess::geometry_builder::{VertexBuffers, simple_builder};
/// # use tess::*;
/// # fn main() {
/// // Create the destination vertex and index buffers.
/// let mut buffers: VertexBuffers<Point, u16> = VertexBuffers::new();
///
/// {
///     let mut vertex_builder = simple_builder(&mut buffers);
///
///     // Create the tessellator.
///     let mut tessellator = StrokeTessellator::new();
///
///     // Compute the tessellation.
///     tessellator.tessellate_polyline(
///         &[point(0.0, 0.0), point(1.0, 2.0), point(2.0, 0.0)],
///         &StrokeOptions::default().with_line_caps(true),
///         &mut vertex_builder
///     ).unwrap();
/// }
///
/// println!("The generated vertices are: {:?}.", &buffers.vertices[..]);
/// println!("The generated indices are: {:?}.", &buffers.indices[..]);
///
/// # }
/// ```
#[derive(Default)]
pub struct StrokeTessellator {
    lines: Vec<LineSegment>,
    segments: Vec<Quad>,
    joins: Vec<Option<Quad>>,
    quads: Vec<Quad>,
}

impl StrokeTessellator {
    pub fn new() -> Self {
        StrokeTessellator {
            lines: Vec::new(),
            segments: Vec::new(),
            joins: Vec::new(),
            quads: Vec::new(),
        }
    }

    /// Compute the tessellation of a polyline, without any coordinate transform.
    pub fn tessellate_polyline(
        &mut self,
        points: &[Point],
        options: &StrokeOptions,
        output: &mut dyn QuadGeometryBuilder,
    ) -> TessellationResult {
        self.tessellate_polyline_in(points, &SurfaceRect::default(), options, output)
    }

    /// Compute the tessellation of a polyline drawn into a surface.
    ///
    /// The points are first mapped into the surface's coordinates, see
    /// [`SurfaceRect::stroke_transform`](struct.SurfaceRect.html#method.stroke_transform).
    ///
    /// The options and the points are validated before anything is written
    /// to the output. If the output fails to accept a vertex, the geometry is
    /// aborted and the error is returned.
    pub fn tessellate_polyline_in(
        &mut self,
        points: &[Point],
        surface: &SurfaceRect,
        options: &StrokeOptions,
        output: &mut dyn QuadGeometryBuilder,
    ) -> TessellationResult {
        validate(points, options)?;

        output.begin_geometry();

        self.build_quads(points, surface, options);

        for quad in &self.quads {
            if let Err(e) = quad.write_to(output) {
                output.abort_geometry();
                return Err(e.into());
            }
        }

        output.end_geometry();

        debug!(
            "stroke tessellated: {} points, {} segments, {} quads",
            points.len(),
            self.lines.len(),
            self.quads.len(),
        );

        Ok(())
    }

    /// Tessellate a polyline into a new `MeshBuffer`.
    pub fn rebuild(
        &mut self,
        points: &[Point],
        surface: &SurfaceRect,
        options: &StrokeOptions,
    ) -> Result<MeshBuffer, TessellationError> {
        let mut mesh = MeshBuffer::new();
        self.tessellate_polyline_in(points, surface, options, &mut mesh)?;
        mesh.color = options.color;

        Ok(mesh)
    }

    /// Fills `self.quads` in output order.
    fn build_quads(&mut self, points: &[Point], surface: &SurfaceRect, options: &StrokeOptions) {
        self.lines.clear();
        self.segments.clear();
        self.joins.clear();
        self.quads.clear();

        if points.len() < 2 {
            return;
        }

        let transform = surface.stroke_transform(options);
        let w = options.line_width;
        let color = options.color;

        if options.line_list {
            for pair in points.chunks_exact(2) {
                let line = LineSegment::new(pair[0], pair[1]).transformed(&transform);
                if line.direction().is_none() {
                    continue;
                }

                self.lines.push(line);

                if options.line_caps {
                    self.quads.extend(build_cap(line.from, line.to, SegmentRole::Start, w, color));
                }
                self.quads.push(build_segment(line.from, line.to, SegmentRole::Middle, w, color));
                if options.line_caps {
                    self.quads.extend(build_cap(line.from, line.to, SegmentRole::End, w, color));
                }
            }

            return;
        }

        for pair in points.windows(2) {
            let line = LineSegment::new(pair[0], pair[1]).transformed(&transform);
            if line.direction().is_none() {
                continue;
            }

            self.lines.push(line);
            self.segments.push(build_segment(line.from, line.to, SegmentRole::Middle, w, color));
        }

        // Joins are resolved in order, each one sees the corners moved by the
        // previous one.
        for i in 1..self.segments.len() {
            let (head, tail) = self.segments.split_at_mut(i);
            let join = resolve_join(&mut head[i - 1], &mut tail[0], options.line_join, w);
            self.joins.push(join);
        }

        if options.line_caps {
            if let Some(first) = self.lines.first() {
                self.quads.extend(build_cap(first.from, first.to, SegmentRole::Start, w, color));
            }
        }

        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                self.quads.extend(self.joins[i - 1]);
            }
            self.quads.push(*segment);
        }

        if options.line_caps {
            if let Some(last) = self.lines.last() {
                self.quads.extend(build_cap(last.from, last.to, SegmentRole::End, w, color));
            }
        }
    }
}

fn validate(points: &[Point], options: &StrokeOptions) -> Result<(), UnsupportedParameter> {
    options.validate()?;

    if options.line_list && points.len() % 2 != 0 {
        return Err(UnsupportedParameter::OddPointCount(points.len()));
    }

    if points.iter().any(|p| p.x.is_nan() || p.y.is_nan()) {
        return Err(UnsupportedParameter::PositionIsNaN);
    }

    Ok(())
}

#[cfg(test)]
use crate::geom::utils::cross;
#[cfg(test)]
use crate::geometry_builder::*;
#[cfg(test)]
use crate::math::point;
#[cfg(test)]
use crate::{GeometryBuilderError, LineJoin, QuadVertex, VertexId};

#[cfg(test)]
fn test_polyline(
    points: &[Point],
    options: &StrokeOptions,
    expected_quad_count: Option<usize>,
) -> MeshBuffer {
    struct TestBuilder<'l> {
        mesh: &'l mut MeshBuffer,
    }

    impl<'l> GeometryBuilder for TestBuilder<'l> {
        fn begin_geometry(&mut self) {
            self.mesh.begin_geometry();
        }
        fn end_geometry(&mut self) {
            self.mesh.end_geometry();
        }
        fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId) {
            assert!(a != b);
            assert!(a != c);
            assert!(b != c);
            self.mesh.add_triangle(a, b, c);
        }
        fn abort_geometry(&mut self) {
            panic!();
        }
    }

    impl<'l> QuadGeometryBuilder for TestBuilder<'l> {
        fn add_quad_vertex(
            &mut self,
            vertex: QuadVertex,
        ) -> Result<VertexId, GeometryBuilderError> {
            assert!(!vertex.position.x.is_nan());
            assert!(!vertex.position.y.is_nan());
            self.mesh.add_quad_vertex(vertex)
        }
    }

    let mut mesh = MeshBuffer::new();
    let mut tess = StrokeTessellator::new();
    tess.tessellate_polyline(points, options, &mut TestBuilder { mesh: &mut mesh })
        .unwrap();

    assert_eq!(mesh.indices.len(), mesh.quad_count() * 6);

    if let Some(quads) = expected_quad_count {
        assert_eq!(quads, mesh.quad_count(), "Unexpected number of quads");
    }

    mesh
}

#[cfg(test)]
fn assert_close(a: Point, b: Point) {
    if (a - b).square_length() > 0.00001 {
        panic!("assert almost equal: {:?} != {:?}", a, b);
    }
}

#[test]
fn test_single_segment() {
    let mesh = test_polyline(
        &[point(0.0, 0.0), point(10.0, 0.0)],
        &StrokeOptions::default(),
        Some(1),
    );

    assert_eq!(
        mesh.vertices,
        vec![
            point(0.0, 1.0),
            point(0.0, -1.0),
            point(10.0, -1.0),
            point(10.0, 1.0),
        ]
    );
    assert_eq!(mesh.indices, vec![0, 1, 2, 2, 3, 0]);
}

#[test]
fn test_quad_count() {
    let zigzag = [
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 10.0),
        point(20.0, 10.0),
        point(20.0, 20.0),
    ];

    // 4 segments, 3 joins.
    test_polyline(&zigzag, &StrokeOptions::default(), Some(7));
    test_polyline(&zigzag, &StrokeOptions::default().with_line_caps(true), Some(9));

    // Right angles are stable miters: no join quads.
    test_polyline(&zigzag, &StrokeOptions::default().with_line_join(LineJoin::Miter), Some(4));
    test_polyline(
        &zigzag,
        &StrokeOptions::default().with_line_join(LineJoin::Miter).with_line_caps(true),
        Some(6),
    );
}

#[test]
fn test_empty_input() {
    test_polyline(&[], &StrokeOptions::default(), Some(0));
    test_polyline(&[point(1.0, 2.0)], &StrokeOptions::default(), Some(0));
    test_polyline(&[point(1.0, 2.0)], &StrokeOptions::default().with_line_caps(true), Some(0));
}

#[test]
fn test_degenerate_segments_are_skipped() {
    let points = [
        point(0.0, 0.0),
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 10.0),
    ];

    // Same as [(0, 0), (10, 0), (10, 10)].
    test_polyline(&points, &StrokeOptions::default(), Some(3));
    test_polyline(
        &[point(5.0, 5.0), point(5.0, 5.0)],
        &StrokeOptions::default().with_line_caps(true),
        Some(0),
    );
}

#[test]
fn test_bevel_corner() {
    let mesh = test_polyline(
        &[point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)],
        &StrokeOptions::default().with_line_width(2.0).with_line_join(LineJoin::Bevel),
        Some(3),
    );

    // seg0, join, seg1.
    let seg0 = &mesh.vertices[0..4];
    let join = &mesh.vertices[4..8];
    let seg1 = &mesh.vertices[8..12];

    // The inner corner is shared by both segments.
    assert_eq!(seg0[3], seg1[0]);
    assert_close(seg0[3], point(9.0, 1.0));
    // The join quad copies the corners it connects.
    assert_eq!(join, &[seg0[2], seg0[3], seg1[0], seg1[1]]);
    // Texture coordinates included, so the bevel does not flip the texture.
    assert_eq!(mesh.uvs[4], mesh.uvs[2]);
    assert_eq!(mesh.uvs[5], mesh.uvs[3]);
    assert_eq!(mesh.uvs[6], mesh.uvs[8]);
    assert_eq!(mesh.uvs[7], mesh.uvs[9]);
    assert_eq!(mesh.uvs[4..6], [[0.5, 1.0], [0.5, 0.0]]);
}

#[test]
fn test_caps_order() {
    let mesh = test_polyline(
        &[point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)],
        &StrokeOptions::default().with_line_caps(true),
        Some(5),
    );

    // start cap, seg0, join, seg1, end cap.
    assert_eq!(mesh.uvs[0..4], SegmentRole::Start.uvs());
    assert_eq!(mesh.uvs[16..20], SegmentRole::End.uvs());
    assert_close(mesh.vertices[0], point(-1.0, 1.0));
    assert_close(mesh.vertices[18], point(11.0, 11.0));
}

#[test]
fn test_line_list() {
    let points = [
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(0.0, 5.0),
        point(0.0, 15.0),
    ];
    let list = StrokeOptions::default().with_line_list(true);

    let mesh = test_polyline(&points, &list, Some(2));
    // No joins: the quads are untouched extrusions of each pair.
    assert_eq!(mesh.vertices[2], point(10.0, -1.0));
    assert_eq!(mesh.vertices[4], point(-1.0, 5.0));

    test_polyline(&points, &list.with_line_caps(true), Some(6));
    test_polyline(&points, &list.with_line_join(LineJoin::Miter), Some(2));
}

#[test]
fn test_miter_stays_within_half_segments() {
    let inputs: [&[Point]; 3] = [
        // Sharp zig-zag with short segments, the miters fall back to bevels.
        &[point(0.0, 0.0), point(3.0, 0.0), point(0.5, 1.0), point(3.5, 1.0)],
        // Right angles with a short middle segment, the miters are applied.
        &[point(0.0, 0.0), point(10.0, 0.0), point(10.0, 3.0), point(20.0, 3.0)],
        &[point(0.0, 0.0), point(10.0, 0.0), point(15.0, 8.0), point(4.0, 12.0), point(-3.0, 4.0)],
    ];

    for points in &inputs {
        for &join in &[LineJoin::Miter, LineJoin::Bevel] {
            let options = StrokeOptions::default().with_line_width(2.0).with_line_join(join);

            let mut tess = StrokeTessellator::new();
            tess.build_quads(points, &SurfaceRect::default(), &options);

            for (line, quad) in tess.lines.iter().zip(tess.segments.iter()) {
                let mid = line.mid_point();
                let dir = line.to_vector();
                // The trailing corners never move behind the middle of their
                // segment, and the leading ones never move past it.
                for &corner in &quad.positions[2..4] {
                    assert!((corner - mid).dot(dir) >= -0.0001, "{:?} {:?}", corner, line);
                }
                for &corner in &quad.positions[0..2] {
                    assert!((corner - mid).dot(dir) <= 0.0001, "{:?} {:?}", corner, line);
                }

                // Which keeps both triangles of the segment wound the same way.
                let p = quad.positions;
                assert!(cross(p[1] - p[0], p[2] - p[1]) > 0.0, "{:?}", quad);
                assert!(cross(p[3] - p[2], p[0] - p[3]) > 0.0, "{:?}", quad);
            }
        }
    }
}

#[test]
fn test_determinism() {
    let points = [
        point(0.3, 0.1),
        point(10.7, 0.2),
        point(10.1, 10.9),
        point(-4.2, 3.3),
    ];
    let options = StrokeOptions::default().with_line_caps(true).with_line_join(LineJoin::Miter);

    let mut tess = StrokeTessellator::new();
    let a = tess.rebuild(&points, &SurfaceRect::default(), &options).unwrap();
    let b = tess.rebuild(&points, &SurfaceRect::default(), &options).unwrap();
    let c = StrokeTessellator::new().rebuild(&points, &SurfaceRect::default(), &options).unwrap();

    let bits = |mesh: &MeshBuffer| -> Vec<(u32, u32)> {
        mesh.vertices.iter().map(|p| (p.x.to_bits(), p.y.to_bits())).collect()
    };

    assert_eq!(bits(&a), bits(&b));
    assert_eq!(bits(&a), bits(&c));
    assert_eq!(a.indices, c.indices);
}

#[test]
fn test_surface_transform() {
    let surface = SurfaceRect::new(crate::math::size(100.0, 100.0), crate::math::vector(0.5, 0.5));
    let options = StrokeOptions::default().with_relative_size(true);

    let mesh = StrokeTessellator::new()
        .rebuild(&[point(0.5, 0.5), point(1.0, 0.5)], &surface, &options)
        .unwrap();

    assert_eq!(mesh.vertices[0], point(0.0, 1.0));
    assert_eq!(mesh.vertices[2], point(50.0, -1.0));
}

#[test]
fn test_validation() {
    let mut tess = StrokeTessellator::new();
    let mut output = NoOutput::new();
    let points = [point(0.0, 0.0), point(1.0, 0.0), point(2.0, 0.0)];
    let nan_points = [point(0.0, 0.0), point(f32::NAN, 1.0)];
    let zero_width = StrokeOptions::default().with_line_width(0.0);
    let list = StrokeOptions::default().with_line_list(true);

    assert_eq!(
        tess.tessellate_polyline(&points, &zero_width, &mut output),
        Err(UnsupportedParameter::InvalidLineWidth(0.0).into()),
    );
    assert_eq!(
        tess.tessellate_polyline(&points, &list, &mut output),
        Err(UnsupportedParameter::OddPointCount(3).into()),
    );
    // A single point in list mode is still an odd count.
    assert_eq!(
        tess.tessellate_polyline(&points[..1], &list, &mut output),
        Err(UnsupportedParameter::OddPointCount(1).into()),
    );
    assert_eq!(
        tess.tessellate_polyline(&nan_points, &StrokeOptions::default(), &mut output),
        Err(UnsupportedParameter::PositionIsNaN.into()),
    );
    assert_eq!(
        tess.tessellate_polyline(&points, &StrokeOptions::default(), &mut output),
        Ok(()),
    );
}

#[test]
fn test_too_many_vertices() {
    /// This test checks that the tessellator returns the proper error when
    /// the geometry builder run out of vertex ids.
    struct Builder {
        max_vertices: u32,
        aborted: bool,
    }
    impl GeometryBuilder for Builder {
        fn begin_geometry(&mut self) {}
        fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId) {
            assert!(a != b);
            assert!(a != c);
            assert!(b != c);
        }
        fn end_geometry(&mut self) {
            // Expected to abort the geometry.
            panic!();
        }
        fn abort_geometry(&mut self) {
            self.aborted = true;
        }
    }

    impl QuadGeometryBuilder for Builder {
        fn add_quad_vertex(&mut self, _: QuadVertex) -> Result<VertexId, GeometryBuilderError> {
            if self.max_vertices == 0 {
                return Err(GeometryBuilderError::TooManyVertices);
            }
            self.max_vertices -= 1;
            Ok(VertexId(self.max_vertices))
        }
    }

    let points = [point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)];
    let mut tess = StrokeTessellator::new();
    let options = StrokeOptions::default();

    for &max_vertices in &[0, 5, 11] {
        let mut builder = Builder { max_vertices, aborted: false };
        assert_eq!(
            tess.tessellate_polyline(&points, &options, &mut builder),
            Err(TessellationError::GeometryBuilder(GeometryBuilderError::TooManyVertices)),
        );
        assert!(builder.aborted);
    }
}

#[test]
fn test_rebuild_sets_the_color() {
    let red = crate::Color::new(1.0, 0.0, 0.0, 1.0);
    let options = StrokeOptions::default().with_color(red);
    let mesh = StrokeTessellator::new()
        .rebuild(&[point(0.0, 0.0)], &SurfaceRect::default(), &options)
        .unwrap();

    assert!(mesh.is_empty());
    assert_eq!(mesh.color, red);
}
