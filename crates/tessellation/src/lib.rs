#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::float_cmp)]
#![allow(clippy::too_many_arguments)]

//! Tessellation of constant-width polyline strokes.
//!
//! This crate is reexported in [inkstroke](https://docs.rs/inkstroke/).
//!
//! ## Overview
//!
//! The most interesting types and traits of this crate are:
//!
//! * [StrokeTessellator](struct.StrokeTessellator.html) - Turns a polyline, or a list of
//!   independent line segments, into quads welded at the corners.
//! * [StreamingStroke](struct.StreamingStroke.html) - Append-only stroke for live drawing
//!   feedback, one quad per new point.
//! * [`GeometryBuilder`](geometry_builder/trait.GeometryBuilder.html) - (See the documentation
//!   of the [geometry_builder module](geometry_builder/index.html)) which the above two are
//!   built on.
//! * [MeshBuffer](struct.MeshBuffer.html) - A de-interleaved vertex/uv/index buffer ready to be
//!   handed to a rendering surface.
//!
//! ## The tessellation pipeline
//!
//! 1. The input points are mapped into the surface's coordinate space (see
//!    [SurfaceRect](struct.SurfaceRect.html)).
//! 2. Each non-degenerate pair of consecutive points becomes a quad, extruded by
//!    half of the line width on each side (the segment builder).
//! 3. Optional flat caps extend the first and last segments by half of the line width.
//! 4. In connected mode, each pair of adjacent segment quads is welded by the join
//!    resolver, either by moving the shared corners to the miter points or by
//!    inserting a bevel quad.
//! 5. The quads are written in order into a geometry builder, two triangles per quad.
//!
//! ## Example
//!
//! ```
//! use inkstroke_tessellation::{StrokeTessellator, StrokeOptions, LineJoin, SurfaceRect};
//! use inkstroke_tessellation::math::point;
//!
//! let mut tessellator = StrokeTessellator::new();
//! let mesh = tessellator.rebuild(
//!     &[point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)],
//!     &SurfaceRect::default(),
//!     &StrokeOptions::default().with_line_width(2.0).with_line_join(LineJoin::Bevel),
//! ).unwrap();
//!
//! // Two segments and one bevel join.
//! assert_eq!(mesh.quad_count(), 3);
//! assert_eq!(mesh.indices.len(), 18);
//! ```
//!

pub use inkstroke_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod error;
pub mod geometry_builder;
mod join;
mod layout;
mod mesh;
mod quad;
mod segment;
mod streaming;
mod stroke;

pub use crate::geom::math;

#[doc(inline)]
pub use crate::error::*;

#[doc(inline)]
pub use crate::geometry_builder::{
    BuffersBuilder, GeometryBuilder, QuadGeometryBuilder, QuadVertexConstructor, VertexBuffers,
};

#[doc(inline)]
pub use crate::join::{resolve_join, MIN_BEVEL_NICE_JOIN, MIN_MITER_JOIN};
#[doc(inline)]
pub use crate::layout::SurfaceRect;
#[doc(inline)]
pub use crate::mesh::MeshBuffer;
#[doc(inline)]
pub use crate::quad::{Quad, QuadVertex, FULL_UVS};
#[doc(inline)]
pub use crate::segment::{build_cap, build_segment};
#[doc(inline)]
pub use crate::streaming::StreamingStroke;
#[doc(inline)]
pub use crate::stroke::StrokeTessellator;

use crate::math::Vector;
use core::ops::Add;

/// Line join, as in SVG, restricted to the two
/// joins this tessellator can build out of quads.
///
/// A miter join that would be unstable (angle too sharp, or the miter point
/// overshooting half of one of the adjacent segments) falls back to a bevel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum LineJoin {
    /// A bevel quad fills the wedge between the two segments.
    Bevel,
    /// The segment corners are moved to the intersection of the outlines.
    Miter,
}

/// Where a segment sits in the stroke. Each role maps to its own horizontal
/// band of the stroke texture so that cap art can differ from body art.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum SegmentRole {
    Start,
    Middle,
    End,
}

impl SegmentRole {
    /// Texture coordinates of the four quad corners for this role.
    pub fn uvs(self) -> [[f32; 2]; 4] {
        match self {
            SegmentRole::Start => [[0.0, 0.0], [0.0, 1.0], [0.5, 1.0], [0.5, 0.0]],
            SegmentRole::Middle => [[0.5, 0.0], [0.5, 1.0], [0.5, 1.0], [0.5, 0.0]],
            SegmentRole::End => [[0.5, 0.0], [0.5, 1.0], [1.0, 1.0], [1.0, 0.0]],
        }
    }
}

/// A flat RGBA color, components in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Color::new(0.0, 0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color { r, g, b, a }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// Parameters for the stroke tessellator.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct StrokeOptions {
    /// Line width
    ///
    /// Must be finite and greater than zero.
    /// Default value: `StrokeOptions::DEFAULT_LINE_WIDTH`.
    pub line_width: f32,

    /// How the corners between consecutive segments are built.
    ///
    /// Ignored in line list mode.
    /// Default value: `LineJoin::Bevel`.
    pub line_join: LineJoin,

    /// Whether to extend the first and last segments with flat caps.
    ///
    /// In line list mode every pair gets its own caps.
    /// Default value: `false`.
    pub line_caps: bool,

    /// Interpret the points as independent pairs instead of a polyline.
    ///
    /// Default value: `false`.
    pub line_list: bool,

    /// Interpret the points as normalized `[0, 1]` coordinates relative to
    /// the surface size.
    ///
    /// Default value: `false`.
    pub relative_size: bool,

    /// Shrinks the usable area by this amount and re-centers the stroke.
    ///
    /// Default value: `None`.
    pub margin: Option<Vector>,

    /// Flat color of every produced vertex.
    ///
    /// Default value: `Color::WHITE`.
    pub color: Color,
}

impl StrokeOptions {
    pub const DEFAULT_LINE_WIDTH: f32 = 2.0;
    pub const DEFAULT_LINE_JOIN: LineJoin = LineJoin::Bevel;

    pub const DEFAULT: Self = StrokeOptions {
        line_width: Self::DEFAULT_LINE_WIDTH,
        line_join: Self::DEFAULT_LINE_JOIN,
        line_caps: false,
        line_list: false,
        relative_size: false,
        margin: None,
        color: Color::WHITE,
    };

    #[inline]
    pub fn line_width(width: f32) -> Self {
        Self::DEFAULT.with_line_width(width)
    }

    #[inline]
    pub const fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    #[inline]
    pub const fn with_line_join(mut self, join: LineJoin) -> Self {
        self.line_join = join;
        self
    }

    #[inline]
    pub const fn with_line_caps(mut self, caps: bool) -> Self {
        self.line_caps = caps;
        self
    }

    #[inline]
    pub const fn with_line_list(mut self, list: bool) -> Self {
        self.line_list = list;
        self
    }

    #[inline]
    pub const fn with_relative_size(mut self, relative: bool) -> Self {
        self.relative_size = relative;
        self
    }

    #[inline]
    pub const fn with_margin(mut self, margin: Vector) -> Self {
        self.margin = Some(margin);
        self
    }

    #[inline]
    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Checks the options that do not depend on the input points.
    pub fn validate(&self) -> Result<(), UnsupportedParameter> {
        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            return Err(UnsupportedParameter::InvalidLineWidth(self.line_width));
        }

        Ok(())
    }
}

impl Default for StrokeOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

type Index = u32;

/// A virtual vertex offset in a geometry.
///
/// The `VertexId`s are only valid between `GeometryBuilder::begin_geometry` and
/// `GeometryBuilder::end_geometry`. `GeometryBuilder` implementations typically
/// translate the ids internally so that first `VertexId` after `begin_geometry` is zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct VertexId(pub Index);

impl VertexId {
    pub const INVALID: VertexId = VertexId(u32::MAX);

    pub fn offset(self) -> Index {
        self.0
    }
}

impl Add<u32> for VertexId {
    type Output = Self;
    fn add(self, rhs: u32) -> Self {
        VertexId(self.0 + rhs)
    }
}

impl From<u32> for VertexId {
    fn from(v: u32) -> Self {
        VertexId(v)
    }
}

impl From<VertexId> for u16 {
    fn from(v: VertexId) -> Self {
        v.0 as u16
    }
}
impl From<VertexId> for u32 {
    fn from(v: VertexId) -> Self {
        v.0
    }
}

#[test]
fn default_options() {
    let options = StrokeOptions::default();

    assert_eq!(options.line_width, 2.0);
    assert_eq!(options.line_join, LineJoin::Bevel);
    assert!(!options.line_caps);
    assert!(!options.line_list);
    assert_eq!(options.validate(), Ok(()));
}

#[test]
fn invalid_line_width() {
    assert_eq!(
        StrokeOptions::line_width(0.0).validate(),
        Err(UnsupportedParameter::InvalidLineWidth(0.0))
    );
    assert_eq!(
        StrokeOptions::line_width(-3.0).validate(),
        Err(UnsupportedParameter::InvalidLineWidth(-3.0))
    );
    assert!(StrokeOptions::line_width(f32::INFINITY).validate().is_err());
    assert!(StrokeOptions::line_width(f32::NAN).validate().is_err());
}

#[test]
fn role_uvs_are_distinct() {
    assert_ne!(SegmentRole::Start.uvs(), SegmentRole::Middle.uvs());
    assert_ne!(SegmentRole::Middle.uvs(), SegmentRole::End.uvs());
    assert_ne!(SegmentRole::Start.uvs(), SegmentRole::End.uvs());
}
