//! Tools to help with generating vertex and index buffers.
//!
//! ## Overview
//!
//! While it would be possible for the tessellators to directly generate vertex and
//! index buffers with a certain layout, most code using them would then have to copy
//! and convert all generated vertices into their own vertex layout, or into
//! de-interleaved vertex formats.
//!
//! In order to flexibly build geometry of various flavors, this module contains a
//! number of builder interfaces centered around the idea of building vertex and index
//! buffers without having to know about the final vertex and index types.
//!
//! See:
//!
//! * [`GeometryBuilder`](trait.GeometryBuilder.html)
//! * [`QuadGeometryBuilder`](trait.QuadGeometryBuilder.html)
//!
//! The traits above are what the tessellators interface with. It is very common to push
//! vertices and indices into a pair of vectors, so to facilitate this pattern this module
//! also provides:
//!
//! * The struct [`VertexBuffers`](struct.VertexBuffers.html) is a simple pair of vectors of
//!   indices and vertices (generic parameters).
//! * The struct [`BuffersBuilder`](struct.BuffersBuilder.html) which writes into a
//!   [`VertexBuffers`](struct.VertexBuffers.html) and implements the geometry builder
//!   traits. It takes care of filling the buffers while producing vertices is delegated
//!   to a [`QuadVertexConstructor`](trait.QuadVertexConstructor.html).
//!
//! The de-interleaved [`MeshBuffer`](../struct.MeshBuffer.html) is the output the rendering
//! surfaces consume, it implements the builder traits directly.
//!
//! ## Generating custom vertices
//!
//! ```
//! use inkstroke_tessellation::{BuffersBuilder, QuadVertex, VertexBuffers};
//! use inkstroke_tessellation::{StrokeOptions, StrokeTessellator};
//! use inkstroke_tessellation::math::point;
//!
//! // Our custom vertex.
//! #[derive(Copy, Clone, Debug)]
//! pub struct MyVertex {
//!     position: [f32; 2],
//!     uv: [f32; 2],
//!     color: [f32; 4],
//! }
//!
//! let mut output: VertexBuffers<MyVertex, u16> = VertexBuffers::new();
//! let mut tessellator = StrokeTessellator::new();
//!
//! tessellator.tessellate_polyline(
//!     &[point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)],
//!     &StrokeOptions::default(),
//!     &mut BuffersBuilder::new(&mut output, |vertex: QuadVertex| MyVertex {
//!         position: vertex.position.to_array(),
//!         uv: vertex.uv,
//!         color: vertex.color.to_array(),
//!     }),
//! ).unwrap();
//!
//! println!(" -- {} vertices, {} indices", output.vertices.len(), output.indices.len());
//! ```
//!

pub use crate::error::GeometryBuilderError;
use crate::math::Point;
use crate::{Index, QuadVertex, VertexId};

use core::convert::From;
use core::ops::Add;

/// An interface separating tessellators from the actual vertex construction.
///
/// Tessellators also require the [`QuadGeometryBuilder`](trait.QuadGeometryBuilder.html)
/// trait which contains the hook to generate vertices.
pub trait GeometryBuilder {
    /// Called at the beginning of a generation.
    ///
    /// end_geometry must be called before begin_geometry is called again.
    fn begin_geometry(&mut self) {}

    /// Called at the end of a generation.
    fn end_geometry(&mut self) {}

    /// Insert a triangle made of vertices that were added after the last call to begin_geometry.
    ///
    /// This method can only be called between begin_geometry and end_geometry.
    fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId);

    /// abort_geometry is called instead of end_geometry if an error occurred while producing
    /// the geometry and we won't be able to finish.
    ///
    /// The implementation is expected to discard the geometry that was generated since the last
    /// time begin_geometry was called, and to remain in a usable state.
    fn abort_geometry(&mut self) {}
}

/// A Geometry builder to interface with the stroke tessellators.
pub trait QuadGeometryBuilder: GeometryBuilder {
    /// Inserts a vertex and returns its id, only valid between begin_geometry and
    /// end_geometry.
    fn add_quad_vertex(&mut self, vertex: QuadVertex) -> Result<VertexId, GeometryBuilderError>;
}

/// Structure that holds the vertex and index data.
///
/// Usually written into though temporary `BuffersBuilder` objects.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct VertexBuffers<OutputVertex, OutputIndex> {
    pub vertices: Vec<OutputVertex>,
    pub indices: Vec<OutputIndex>,
}

impl<OutputVertex, OutputIndex> VertexBuffers<OutputVertex, OutputIndex> {
    /// Constructor
    pub fn new() -> Self {
        VertexBuffers::with_capacity(512, 1024)
    }

    /// Constructor
    pub fn with_capacity(num_vertices: usize, num_indices: usize) -> Self {
        VertexBuffers {
            vertices: Vec::with_capacity(num_vertices),
            indices: Vec::with_capacity(num_indices),
        }
    }

    /// Empty the buffers without freeing memory, for reuse without reallocation.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }
}

/// A temporary view on a `VertexBuffers` object which facilitate the population of vertex and index
/// data.
///
/// `BuffersBuilders` record the vertex offset from when they are created so that algorithms using
/// them don't need to worry about offsetting indices if some geometry was added beforehand.
///
/// The `QuadVertexConstructor` does the translation from `QuadVertex` to `OutputVertex`.
pub struct BuffersBuilder<'l, OutputVertex: 'l, OutputIndex: 'l, Ctor> {
    buffers: &'l mut VertexBuffers<OutputVertex, OutputIndex>,
    first_vertex: Index,
    first_index: Index,
    vertex_offset: Index,
    vertex_constructor: Ctor,
}

impl<'l, OutputVertex: 'l, OutputIndex: 'l, Ctor>
    BuffersBuilder<'l, OutputVertex, OutputIndex, Ctor>
{
    pub fn new(buffers: &'l mut VertexBuffers<OutputVertex, OutputIndex>, ctor: Ctor) -> Self {
        let first_vertex = buffers.vertices.len() as Index;
        let first_index = buffers.indices.len() as Index;
        BuffersBuilder {
            buffers,
            first_vertex,
            first_index,
            vertex_offset: first_vertex,
            vertex_constructor: ctor,
        }
    }

    pub fn buffers<'a, 'b: 'a>(&'b self) -> &'a VertexBuffers<OutputVertex, OutputIndex> {
        self.buffers
    }
}

/// A trait specifying how to create vertex values.
pub trait QuadVertexConstructor<OutputVertex> {
    fn new_vertex(&mut self, vertex: QuadVertex) -> OutputVertex;
}

/// A simple vertex constructor that just takes the position.
pub struct Positions;

impl QuadVertexConstructor<Point> for Positions {
    fn new_vertex(&mut self, vertex: QuadVertex) -> Point {
        vertex.position
    }
}

impl<F, OutputVertex> QuadVertexConstructor<OutputVertex> for F
where
    F: Fn(QuadVertex) -> OutputVertex,
{
    fn new_vertex(&mut self, vertex: QuadVertex) -> OutputVertex {
        self(vertex)
    }
}

/// A `BuffersBuilder` that only keeps the vertex positions.
pub type SimpleBuffersBuilder<'l> = BuffersBuilder<'l, Point, u16, Positions>;

/// Creates a `SimpleBuffersBuilder`.
pub fn simple_builder(buffers: &mut VertexBuffers<Point, u16>) -> SimpleBuffersBuilder {
    BuffersBuilder::new(buffers, Positions)
}

impl<'l, OutputVertex, OutputIndex, Ctor> GeometryBuilder
    for BuffersBuilder<'l, OutputVertex, OutputIndex, Ctor>
where
    OutputVertex: 'l,
    OutputIndex: Add + From<VertexId> + MaxIndex,
{
    fn begin_geometry(&mut self) {
        self.first_vertex = self.buffers.vertices.len() as Index;
        self.first_index = self.buffers.indices.len() as Index;
        self.vertex_offset = self.first_vertex;
    }

    fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId) {
        debug_assert!(a != b);
        debug_assert!(a != c);
        debug_assert!(b != c);
        debug_assert!(a != VertexId::INVALID);
        debug_assert!(b != VertexId::INVALID);
        debug_assert!(c != VertexId::INVALID);
        self.buffers.indices.push((a + self.vertex_offset).into());
        self.buffers.indices.push((b + self.vertex_offset).into());
        self.buffers.indices.push((c + self.vertex_offset).into());
    }

    fn abort_geometry(&mut self) {
        self.buffers.vertices.truncate(self.first_vertex as usize);
        self.buffers.indices.truncate(self.first_index as usize);
    }
}

impl<'l, OutputVertex, OutputIndex, Ctor> QuadGeometryBuilder
    for BuffersBuilder<'l, OutputVertex, OutputIndex, Ctor>
where
    OutputVertex: 'l,
    OutputIndex: Add + From<VertexId> + MaxIndex,
    Ctor: QuadVertexConstructor<OutputVertex>,
{
    fn add_quad_vertex(&mut self, v: QuadVertex) -> Result<VertexId, GeometryBuilderError> {
        let len = self.buffers.vertices.len();
        if len >= OutputIndex::MAX {
            return Err(GeometryBuilderError::TooManyVertices);
        }
        self.buffers
            .vertices
            .push(self.vertex_constructor.new_vertex(v));

        Ok(VertexId((len - self.vertex_offset as usize) as Index))
    }
}

/// A geometry builder that does not output any geometry.
///
/// Mostly useful for testing.
pub struct NoOutput {
    next_vertex: u32,
}

impl NoOutput {
    pub fn new() -> Self {
        NoOutput { next_vertex: 0 }
    }
}

impl Default for NoOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryBuilder for NoOutput {
    fn begin_geometry(&mut self) {
        self.next_vertex = 0;
    }

    fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId) {
        debug_assert!(a != b);
        debug_assert!(a != c);
        debug_assert!(b != c);
    }
}

impl QuadGeometryBuilder for NoOutput {
    fn add_quad_vertex(&mut self, _vertex: QuadVertex) -> Result<VertexId, GeometryBuilderError> {
        if self.next_vertex == u32::MAX {
            return Err(GeometryBuilderError::TooManyVertices);
        }
        self.next_vertex += 1;
        Ok(VertexId(self.next_vertex - 1))
    }
}

/// Provides the maximum value of an index.
///
/// This should be the maximum value representable by the index type up
/// to u32::MAX because the tessellators can't internally represent more
/// than u32::MAX indices.
pub trait MaxIndex {
    const MAX: usize;
}

impl MaxIndex for u16 {
    const MAX: usize = u16::MAX as usize;
}
impl MaxIndex for u32 {
    const MAX: usize = u32::MAX as usize;
}
impl MaxIndex for usize {
    const MAX: usize = u32::MAX as usize;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::point;
    use crate::{Color, Quad, SegmentRole};

    fn unit_quad() -> Quad {
        Quad::new(
            [
                point(0.0, 1.0),
                point(0.0, -1.0),
                point(1.0, -1.0),
                point(1.0, 1.0),
            ],
            SegmentRole::Middle,
            Color::WHITE,
        )
    }

    #[test]
    fn indices_are_offset_by_existing_vertices() {
        let mut buffers: VertexBuffers<Point, u16> = VertexBuffers::new();

        {
            let mut builder = simple_builder(&mut buffers);
            builder.begin_geometry();
            unit_quad().write_to(&mut builder).unwrap();
            builder.end_geometry();
        }
        {
            let mut builder = simple_builder(&mut buffers);
            builder.begin_geometry();
            unit_quad().write_to(&mut builder).unwrap();
            builder.end_geometry();
        }

        assert_eq!(buffers.vertices.len(), 8);
        assert_eq!(&buffers.indices[..], &[0, 1, 2, 2, 3, 0, 4, 5, 6, 6, 7, 4]);
    }

    #[test]
    fn abort_discards_the_current_geometry() {
        let mut buffers: VertexBuffers<Point, u32> = VertexBuffers::new();
        let mut builder = BuffersBuilder::new(&mut buffers, Positions);

        builder.begin_geometry();
        unit_quad().write_to(&mut builder).unwrap();
        builder.end_geometry();

        builder.begin_geometry();
        unit_quad().write_to(&mut builder).unwrap();
        builder.abort_geometry();

        assert_eq!(builder.buffers().vertices.len(), 4);
        assert_eq!(builder.buffers().indices.len(), 6);
    }

    #[test]
    fn too_many_vertices() {
        let mut buffers: VertexBuffers<Point, u16> = VertexBuffers::new();
        buffers.vertices.resize(u16::MAX as usize - 2, point(0.0, 0.0));

        let mut builder = simple_builder(&mut buffers);
        builder.begin_geometry();
        assert_eq!(
            unit_quad().write_to(&mut builder),
            Err(GeometryBuilderError::TooManyVertices)
        );
    }

    #[test]
    fn custom_vertex_constructor() {
        let mut buffers: VertexBuffers<[f32; 2], u32> = VertexBuffers::new();
        let mut builder = BuffersBuilder::new(&mut buffers, |v: QuadVertex| v.uv);

        builder.begin_geometry();
        unit_quad().write_to(&mut builder).unwrap();
        builder.end_geometry();

        assert_eq!(buffers.vertices[0], [0.5, 0.0]);
        assert_eq!(buffers.vertices[2], [0.5, 1.0]);
    }
}
