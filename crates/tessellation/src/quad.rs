use crate::geometry_builder::QuadGeometryBuilder;
use crate::math::Point;
use crate::{Color, GeometryBuilderError, SegmentRole};

/// Texture coordinates spanning the whole stroke texture, used by the
/// streaming stroke which has no notion of caps.
pub const FULL_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]];

/// A vertex produced by the stroke tessellators.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct QuadVertex {
    pub position: Point,
    pub uv: [f32; 2],
    pub color: Color,
}

impl QuadVertex {
    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }
}

/// Four vertices with a flat color, the unit the stroke is assembled from.
///
/// Corners `0` and `1` sit at the start of the segment, `2` and `3` at the
/// end. Corners `1` and `2` are on the positive side of the segment (see
/// `inkstroke_geom::utils::perpendicular`). The triangles `(0, 1, 2)` and
/// `(2, 3, 0)` cover the quad.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Quad {
    pub positions: [Point; 4],
    pub uvs: [[f32; 2]; 4],
    pub color: Color,
}

impl Quad {
    pub fn new(positions: [Point; 4], role: SegmentRole, color: Color) -> Self {
        Quad {
            positions,
            uvs: role.uvs(),
            color,
        }
    }

    #[inline]
    pub fn with_uvs(mut self, uvs: [[f32; 2]; 4]) -> Self {
        self.uvs = uvs;
        self
    }

    #[inline]
    pub fn vertex(&self, idx: usize) -> QuadVertex {
        QuadVertex {
            position: self.positions[idx],
            uv: self.uvs[idx],
            color: self.color,
        }
    }

    /// Adds the four vertices and the two triangles of this quad to the output.
    pub fn write_to(
        &self,
        output: &mut dyn QuadGeometryBuilder,
    ) -> Result<(), GeometryBuilderError> {
        let a = output.add_quad_vertex(self.vertex(0))?;
        let b = output.add_quad_vertex(self.vertex(1))?;
        let c = output.add_quad_vertex(self.vertex(2))?;
        let d = output.add_quad_vertex(self.vertex(3))?;

        output.add_triangle(a, b, c);
        output.add_triangle(c, d, a);

        Ok(())
    }
}
