#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::float_cmp)]

//! Simple 2D geometric primitives on top of euclid.
//!
//! This crate is reexported in [inkstroke](https://docs.rs/inkstroke/).
//!
//! # Overview.
//!
//! This crate implements the little bit of vector math the stroke tessellator
//! needs:
//!
//! - f32 aliases of the euclid point, vector, size, rectangle and transform types,
//! - line segments,
//! - perpendiculars, 2D cross products, turn direction and angles between vectors.
//!
//! # Handedness
//!
//! The perpendicular of a direction `d` is always `(d.y, -d.x)`. In a y-up
//! coordinate system this is the right-hand side of the direction of travel,
//! in a y-down (screen) coordinate system it is the left-hand side. Every
//! crate in the workspace relies on this single convention, in particular the
//! join resolver of the tessellator which derives its miter points from it.
//!

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

// Reexport dependencies.
pub use euclid;

mod line;
pub mod utils;

#[doc(inline)]
pub use crate::line::LineSegment;

pub mod math {
    //! f32 version of the euclid types used everywhere. The other inkstroke
    //! crates reexport them.

    /// Alias for ```euclid::default::Point2D<f32>```.
    pub type Point = euclid::default::Point2D<f32>;

    /// Alias for ```euclid::default::Vector2D<f32>```.
    pub type Vector = euclid::default::Vector2D<f32>;

    /// Alias for ```euclid::default::Size2D<f32>```.
    pub type Size = euclid::default::Size2D<f32>;

    /// Alias for ```euclid::default::Rect<f32>```
    pub type Rect = euclid::default::Rect<f32>;

    /// Alias for ```euclid::default::Transform2D<f32>```
    pub type Transform = euclid::default::Transform2D<f32>;

    /// Shorthand for `Rect::new(Point::new(x, y), Size::new(w, h))`.
    #[inline]
    pub fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect {
            origin: point(x, y),
            size: size(w, h),
        }
    }

    /// Shorthand for `Vector::new(x, y)`.
    #[inline]
    pub fn vector(x: f32, y: f32) -> Vector {
        Vector::new(x, y)
    }

    /// Shorthand for `Point::new(x, y)`.
    #[inline]
    pub fn point(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    /// Shorthand for `Size::new(x, y)`.
    #[inline]
    pub fn size(w: f32, h: f32) -> Size {
        Size::new(w, h)
    }
}

pub use crate::math::{point, vector, Point, Vector};
