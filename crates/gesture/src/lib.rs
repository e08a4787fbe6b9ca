#![deny(bare_trait_objects)]
#![allow(clippy::float_cmp)]

//! Drawing surfaces and pointer capture on top of the stroke tessellator.
//!
//! This crate is reexported in [inkstroke](https://docs.rs/inkstroke/).
//!
//! ## Overview
//!
//! * [LineRenderer](struct.LineRenderer.html) - Owns a polyline and its style, re-tessellates
//!   it from scratch whenever either changes and publishes the result to a surface.
//! * [LineDrawer](struct.LineDrawer.html) - Live feedback while a pointer is dragged, built on
//!   the append-only [StreamingStroke](../inkstroke_tessellation/struct.StreamingStroke.html).
//! * [GestureCapture](struct.GestureCapture.html) - Records multi-stroke gestures from
//!   pointer events and asks a [Recognizer](trait.Recognizer.html) to classify them.
//!
//! The host application provides the two ends: pointer events in, and a
//! [RenderSurface](trait.RenderSurface.html) that receives the meshes out.
//!
//! ## Example
//!
//! ```
//! use inkstroke_gesture::*;
//! use inkstroke_gesture::math::point;
//! use futures::executor::block_on;
//!
//! // Accepts anything drawn with a single stroke.
//! let recognizer = |data: GestureData, _normalize_scale: bool| {
//!     if data.lines.len() == 1 {
//!         RecognitionResult::new("line", 1.0)
//!     } else {
//!         RecognitionResult::empty()
//!     }
//! };
//!
//! let mut capture =
//!     GestureCapture::new(recognizer, CaptureOptions::DEFAULT, HeadlessSurface::new).unwrap();
//!
//! capture.pointer_down(point(0.0, 0.0));
//! capture.pointer_move(point(10.0, 0.0));
//! let result = block_on(capture.pointer_up(point(20.0, 0.0)));
//!
//! assert_eq!(result.to_string(), "line\n100%");
//! assert_eq!(capture.drawers()[0].mesh().quad_count(), 2);
//! ```

pub use inkstroke_tessellation as tessellation;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod capture;
mod drawer;
mod recognizer;
mod renderer;
mod surface;

pub use crate::tessellation::math;

#[doc(inline)]
pub use crate::capture::{CaptureOptions, Canceller, GestureCapture, RemoveStrategy};
#[doc(inline)]
pub use crate::drawer::LineDrawer;
#[doc(inline)]
pub use crate::recognizer::{GestureData, GestureId, GestureLine, RecognitionResult, Recognizer};
#[doc(inline)]
pub use crate::renderer::LineRenderer;
#[doc(inline)]
pub use crate::surface::{HeadlessSurface, RenderSurface};
