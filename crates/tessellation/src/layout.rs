use crate::math::{size, vector, Size, Transform, Vector};
use crate::StrokeOptions;

/// The rectangle a stroke is drawn into.
///
/// `pivot` is expressed in fractions of `size`: a pivot of `(0.5, 0.5)` puts
/// the origin of the stroke's coordinates at the center of the surface.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct SurfaceRect {
    pub size: Size,
    pub pivot: Vector,
}

impl SurfaceRect {
    pub const fn new(size: Size, pivot: Vector) -> Self {
        SurfaceRect { size, pivot }
    }

    /// A surface of the given size with its pivot at the bottom-left corner.
    pub fn from_size(w: f32, h: f32) -> Self {
        SurfaceRect {
            size: size(w, h),
            pivot: vector(0.0, 0.0),
        }
    }

    /// The transform from input points to surface coordinates.
    ///
    /// Points are scaled by the surface size if `relative_size` is set, then
    /// shrunk by the margin and moved so that the pivot maps to the origin of
    /// the surface. The margin is split evenly between both sides.
    pub fn stroke_transform(&self, options: &StrokeOptions) -> Transform {
        let margin = options.margin.unwrap_or_else(|| vector(0.0, 0.0));

        let extent = if options.relative_size {
            self.size.to_vector()
        } else {
            vector(1.0, 1.0)
        };
        let scale = extent - margin;

        let offset = vector(
            -self.pivot.x * self.size.width,
            -self.pivot.y * self.size.height,
        ) + margin * 0.5;

        Transform::scale(scale.x, scale.y).then_translate(offset)
    }
}

impl Default for SurfaceRect {
    fn default() -> Self {
        SurfaceRect::new(size(0.0, 0.0), vector(0.0, 0.0))
    }
}
