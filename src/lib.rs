#![deny(bare_trait_objects)]

//! Real-time polyline stroke tessellation for 2D drawing surfaces.
//!
//! # Crates
//!
//! This meta-crate (`inkstroke`) reexports the following sub-crates for convenience:
//!
//! * **inkstroke_tessellation** - Turns polylines into quad-based triangle meshes, with
//!   bevel or miter joins and optional flat caps, plus an append-only variant for live drawing.
//! * **inkstroke_gesture** - Line renderers and drawers that publish meshes to a host
//!   surface, and the pointer capture that feeds multi-stroke gestures to a recognizer.
//! * **inkstroke_geom** - The f32 vector math shared by the above, on top of `euclid`.
//!
//! Each `inkstroke_<name>` crate is reexported as a `<name>` module in `inkstroke`. For example:
//!
//! ```ignore
//! extern crate inkstroke_tessellation;
//! use inkstroke_tessellation::StrokeTessellator;
//! ```
//!
//! Is equivalent to:
//!
//! ```ignore
//! extern crate inkstroke;
//! use inkstroke::tessellation::StrokeTessellator;
//! ```
//!
//! # Feature flags
//!
//! serialization using serde can be enabled on each crate using the
//! `serialization` feature flag (disabled by default).
//!
//! # Examples
//!
//! ## Tessellating a polyline
//!
//! ```
//! use inkstroke::math::{point, Point};
//! use inkstroke::tessellation::{LineJoin, StrokeOptions, StrokeTessellator, SurfaceRect};
//!
//! fn main() {
//!     let points: Vec<Point> = vec![
//!         point(0.0, 0.0),
//!         point(10.0, 0.0),
//!         point(10.0, 10.0),
//!         point(20.0, 10.0),
//!     ];
//!
//!     let options = StrokeOptions::default()
//!         .with_line_width(3.0)
//!         .with_line_join(LineJoin::Miter)
//!         .with_line_caps(true);
//!
//!     let mut tessellator = StrokeTessellator::new();
//!     let mesh = tessellator.rebuild(&points, &SurfaceRect::default(), &options).unwrap();
//!
//!     // Three segments and two caps, the right angles are mitered.
//!     assert_eq!(mesh.quad_count(), 5);
//!
//!     // The mesh is ready to be uploaded to the GPU.
//!     println!(" -- {} vertices {} indices",
//!         mesh.vertices.len(),
//!         mesh.indices.len()
//!     );
//! }
//! ```
//!
//! ## Rendering the tessellated geometry
//!
//! inkstroke does not provide any rendering backend. Meshes are handed to an
//! implementation of `gesture::RenderSurface`, it is up to the host to upload
//! them with whatever graphics API it uses. Note that join quads are not
//! wound like segment quads, back-face culling must be disabled.

pub extern crate inkstroke_geom;
pub extern crate inkstroke_gesture;
pub extern crate inkstroke_tessellation;

pub use inkstroke_geom as geom;
pub use inkstroke_gesture as gesture;
pub use inkstroke_tessellation as tessellation;

pub use geom::math;
