use crate::geometry_builder::{GeometryBuilder, QuadGeometryBuilder};
use crate::math::Point;
use crate::{Color, GeometryBuilderError, QuadVertex, VertexId};

/// De-interleaved triangle mesh, the output handed to rendering surfaces.
///
/// `vertices`, `uvs` are parallel arrays. Every three entries of `indices`
/// form a triangle. The strokes this crate produces have a single flat
/// color, stored once in `color`.
///
/// `MeshBuffer` implements the geometry builder traits so the tessellators
/// can write into it directly.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct MeshBuffer {
    pub vertices: Vec<Point>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
    pub color: Color,
    #[cfg_attr(feature = "serialization", serde(skip))]
    first_vertex: u32,
    #[cfg_attr(feature = "serialization", serde(skip))]
    first_index: usize,
}

impl MeshBuffer {
    pub fn new() -> Self {
        MeshBuffer::default()
    }

    pub fn with_capacity(num_vertices: usize, num_indices: usize) -> Self {
        MeshBuffer {
            vertices: Vec::with_capacity(num_vertices),
            uvs: Vec::with_capacity(num_vertices),
            indices: Vec::with_capacity(num_indices),
            ..MeshBuffer::default()
        }
    }

    /// Empty the buffers without freeing memory, for reuse without reallocation.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.uvs.clear();
        self.indices.clear();
        self.first_vertex = 0;
        self.first_index = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of quads, assuming the mesh was built out of quads only.
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates over the triangles of the mesh as triplets of positions.
    pub fn triangles(&self) -> impl Iterator<Item = [Point; 3]> + '_ {
        self.indices.chunks_exact(3).map(move |tri| {
            [
                self.vertices[tri[0] as usize],
                self.vertices[tri[1] as usize],
                self.vertices[tri[2] as usize],
            ]
        })
    }
}

impl GeometryBuilder for MeshBuffer {
    fn begin_geometry(&mut self) {
        self.first_vertex = self.vertices.len() as u32;
        self.first_index = self.indices.len();
    }

    fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId) {
        debug_assert!(a != b);
        debug_assert!(a != c);
        debug_assert!(b != c);
        let offset = self.first_vertex;
        self.indices.push((a + offset).offset());
        self.indices.push((b + offset).offset());
        self.indices.push((c + offset).offset());
    }

    fn abort_geometry(&mut self) {
        self.vertices.truncate(self.first_vertex as usize);
        self.uvs.truncate(self.first_vertex as usize);
        self.indices.truncate(self.first_index);
    }
}

impl QuadGeometryBuilder for MeshBuffer {
    fn add_quad_vertex(&mut self, vertex: QuadVertex) -> Result<VertexId, GeometryBuilderError> {
        let len = self.vertices.len();
        if len >= u32::MAX as usize {
            return Err(GeometryBuilderError::TooManyVertices);
        }

        self.vertices.push(vertex.position);
        self.uvs.push(vertex.uv);
        self.color = vertex.color;

        Ok(VertexId(len as u32 - self.first_vertex))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::point;
    use crate::{Quad, SegmentRole};

    fn quad(x: f32, color: Color) -> Quad {
        Quad::new(
            [
                point(x, 1.0),
                point(x, -1.0),
                point(x + 1.0, -1.0),
                point(x + 1.0, 1.0),
            ],
            SegmentRole::Start,
            color,
        )
    }

    #[test]
    fn de_interleaved_output() {
        let red = Color::new(1.0, 0.0, 0.0, 1.0);
        let mut mesh = MeshBuffer::new();

        mesh.begin_geometry();
        quad(0.0, red).write_to(&mut mesh).unwrap();
        quad(5.0, red).write_to(&mut mesh).unwrap();
        mesh.end_geometry();

        assert_eq!(mesh.quad_count(), 2);
        assert_eq!(mesh.triangle_count(), 4);
        assert_eq!(mesh.vertices.len(), mesh.uvs.len());
        assert_eq!(mesh.uvs[..4], SegmentRole::Start.uvs());
        assert_eq!(&mesh.indices[6..], &[4, 5, 6, 6, 7, 4]);
        assert_eq!(mesh.color, red);

        let first = mesh.triangles().next().unwrap();
        assert_eq!(first, [point(0.0, 1.0), point(0.0, -1.0), point(1.0, -1.0)]);
    }

    #[test]
    fn abort_keeps_previous_geometry() {
        let mut mesh = MeshBuffer::new();

        mesh.begin_geometry();
        quad(0.0, Color::WHITE).write_to(&mut mesh).unwrap();
        mesh.end_geometry();

        mesh.begin_geometry();
        quad(1.0, Color::WHITE).write_to(&mut mesh).unwrap();
        quad(2.0, Color::WHITE).write_to(&mut mesh).unwrap();
        mesh.abort_geometry();

        assert_eq!(mesh.quad_count(), 1);
        assert_eq!(mesh.indices, vec![0, 1, 2, 2, 3, 0]);
    }

    #[test]
    fn clear() {
        let mut mesh = MeshBuffer::with_capacity(8, 12);
        mesh.begin_geometry();
        quad(0.0, Color::WHITE).write_to(&mut mesh).unwrap();
        mesh.end_geometry();
        assert!(!mesh.is_empty());

        mesh.clear();
        assert!(mesh.is_empty());
        assert_eq!(mesh.quad_count(), 0);
    }
}
