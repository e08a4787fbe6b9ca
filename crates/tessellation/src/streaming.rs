use crate::geometry_builder::QuadGeometryBuilder;
use crate::math::Point;
use crate::{
    build_segment, Color, MeshBuffer, Quad, SegmentRole, StrokeOptions, TessellationResult,
    UnsupportedParameter, FULL_UVS,
};

use log::trace;

/// An append-only stroke for live drawing feedback.
///
/// Each new point adds exactly one quad between the previous point and the
/// new one. Nothing is ever recomputed, which keeps the cost of a pointer
/// move constant, at the expense of joins: the quads simply overlap at the
/// corners.
///
/// ```
/// use inkstroke_tessellation::{StreamingStroke, Color};
/// use inkstroke_tessellation::math::point;
///
/// let mut stroke = StreamingStroke::new(4.0, Color::BLACK).unwrap();
/// stroke.add_point(point(0.0, 0.0));
/// stroke.add_point(point(10.0, 0.0));
/// stroke.add_point(point(10.0, 10.0));
///
/// assert_eq!(stroke.quad_count(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct StreamingStroke {
    quads: Vec<Quad>,
    last_point: Option<Point>,
    line_width: f32,
    color: Color,
}

impl StreamingStroke {
    pub const DEFAULT_LINE_WIDTH: f32 = 4.0;

    /// Fails with `InvalidLineWidth` unless the width is positive and finite.
    pub fn new(line_width: f32, color: Color) -> Result<Self, UnsupportedParameter> {
        StrokeOptions::line_width(line_width).validate()?;

        Ok(StreamingStroke {
            quads: Vec::new(),
            last_point: None,
            line_width,
            color,
        })
    }

    /// Appends a point to the stroke.
    ///
    /// Returns `true` if a quad was added. The first point of a stroke and
    /// points equal to the previous one don't produce any geometry. Non-finite
    /// points are dropped.
    pub fn add_point(&mut self, point: Point) -> bool {
        if !(point.x.is_finite() && point.y.is_finite()) {
            trace!("ignoring non-finite point {:?}", point);
            return false;
        }

        let previous = match self.last_point {
            Some(previous) => previous,
            None => {
                self.last_point = Some(point);
                return false;
            }
        };

        if previous == point {
            trace!("ignoring repeated point {:?}", point);
            return false;
        }

        let quad = build_segment(
            previous,
            point,
            SegmentRole::Middle,
            self.line_width,
            self.color,
        )
        .with_uvs(FULL_UVS);

        self.quads.push(quad);
        self.last_point = Some(point);

        true
    }

    /// Removes all quads and forgets the last point.
    pub fn clear(&mut self) {
        self.quads.clear();
        self.last_point = None;
    }

    pub fn quad_count(&self) -> usize {
        self.quads.len()
    }

    pub fn last_point(&self) -> Option<Point> {
        self.last_point
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Only affects the quads added after this call. An invalid width is
    /// rejected and the current one is kept.
    pub fn set_line_width(&mut self, line_width: f32) -> Result<(), UnsupportedParameter> {
        StrokeOptions::line_width(line_width).validate()?;
        self.line_width = line_width;

        Ok(())
    }

    /// Only affects the quads added after this call.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }

    /// Writes every quad of the stroke into a geometry builder.
    pub fn write_to(&self, output: &mut dyn QuadGeometryBuilder) -> TessellationResult {
        output.begin_geometry();

        for quad in &self.quads {
            if let Err(e) = quad.write_to(output) {
                output.abort_geometry();
                return Err(e.into());
            }
        }

        output.end_geometry();

        Ok(())
    }

    /// Copies the stroke into a new `MeshBuffer`.
    pub fn to_mesh(&self) -> MeshBuffer {
        let mut mesh = MeshBuffer::with_capacity(self.quads.len() * 4, self.quads.len() * 6);
        mesh.color = self.color;

        // A MeshBuffer only rejects vertices past u32::MAX.
        if self.write_to(&mut mesh).is_err() {
            mesh.clear();
        }

        mesh
    }
}

impl Default for StreamingStroke {
    fn default() -> Self {
        StreamingStroke {
            quads: Vec::new(),
            last_point: None,
            line_width: Self::DEFAULT_LINE_WIDTH,
            color: Color::WHITE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry_builder::{simple_builder, VertexBuffers};
    use crate::math::point;

    #[test]
    fn first_point_is_buffered() {
        let mut stroke = StreamingStroke::new(2.0, Color::WHITE).unwrap();

        assert!(!stroke.add_point(point(1.0, 1.0)));
        assert_eq!(stroke.quad_count(), 0);
        assert_eq!(stroke.last_point(), Some(point(1.0, 1.0)));
        assert!(stroke.to_mesh().is_empty());
    }

    #[test]
    fn one_quad_per_point() {
        let mut stroke = StreamingStroke::new(2.0, Color::WHITE).unwrap();
        let points = [
            point(0.0, 0.0),
            point(10.0, 0.0),
            point(10.0, 10.0),
            point(0.0, 10.0),
            point(0.0, 0.0),
        ];

        for p in &points {
            stroke.add_point(*p);
        }

        assert_eq!(stroke.quad_count(), points.len() - 1);

        let mesh = stroke.to_mesh();
        assert_eq!(mesh.quad_count(), 4);
        assert_eq!(mesh.triangle_count(), 8);
        // No joins: the second quad is a plain extrusion.
        assert_eq!(mesh.vertices[4], point(9.0, 0.0));
        assert_eq!(mesh.uvs[..4], FULL_UVS);
    }

    #[test]
    fn repeated_points_are_ignored() {
        let mut stroke = StreamingStroke::new(2.0, Color::WHITE).unwrap();

        stroke.add_point(point(0.0, 0.0));
        assert!(stroke.add_point(point(5.0, 0.0)));
        assert!(!stroke.add_point(point(5.0, 0.0)));
        assert!(stroke.add_point(point(5.0, 5.0)));

        assert_eq!(stroke.quad_count(), 2);
        for quad in stroke.quads() {
            assert!(quad.positions.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        }
    }

    #[test]
    fn clear() {
        let mut stroke = StreamingStroke::new(2.0, Color::WHITE).unwrap();
        stroke.add_point(point(0.0, 0.0));
        stroke.add_point(point(5.0, 0.0));

        stroke.clear();
        assert_eq!(stroke.quad_count(), 0);
        assert_eq!(stroke.last_point(), None);

        // The next point starts a new stroke.
        assert!(!stroke.add_point(point(7.0, 7.0)));
    }

    #[test]
    fn write_to_buffers() {
        let mut stroke = StreamingStroke::new(2.0, Color::WHITE).unwrap();
        stroke.add_point(point(0.0, 0.0));
        stroke.add_point(point(5.0, 0.0));
        stroke.add_point(point(5.0, 5.0));

        let mut buffers: VertexBuffers<Point, u16> = VertexBuffers::new();
        stroke.write_to(&mut simple_builder(&mut buffers)).unwrap();

        assert_eq!(buffers.vertices.len(), 8);
        assert_eq!(&buffers.indices[..], &[0, 1, 2, 2, 3, 0, 4, 5, 6, 6, 7, 4]);
    }

    #[test]
    fn non_finite_points_are_ignored() {
        let mut stroke = StreamingStroke::new(2.0, Color::WHITE).unwrap();

        assert!(!stroke.add_point(point(f32::NAN, 0.0)));
        assert_eq!(stroke.last_point(), None);

        stroke.add_point(point(0.0, 0.0));
        assert!(!stroke.add_point(point(f32::NAN, 0.0)));
        assert!(!stroke.add_point(point(0.0, f32::INFINITY)));
        assert_eq!(stroke.quad_count(), 0);
        assert_eq!(stroke.last_point(), Some(point(0.0, 0.0)));

        assert!(stroke.add_point(point(3.0, 0.0)));
        assert_eq!(stroke.quad_count(), 1);
    }

    #[test]
    fn invalid_line_width() {
        assert_eq!(
            StreamingStroke::new(f32::NAN, Color::WHITE).err().map(|e| e.to_string()),
            Some(UnsupportedParameter::InvalidLineWidth(f32::NAN).to_string())
        );
        assert_eq!(
            StreamingStroke::new(0.0, Color::WHITE).err(),
            Some(UnsupportedParameter::InvalidLineWidth(0.0))
        );
        assert!(StreamingStroke::new(-1.0, Color::WHITE).is_err());

        let mut stroke = StreamingStroke::default();
        assert_eq!(stroke.line_width(), StreamingStroke::DEFAULT_LINE_WIDTH);
        assert!(stroke.set_line_width(f32::INFINITY).is_err());
        assert_eq!(stroke.line_width(), StreamingStroke::DEFAULT_LINE_WIDTH);
        assert!(stroke.set_line_width(1.5).is_ok());
        assert_eq!(stroke.line_width(), 1.5);
    }
}
