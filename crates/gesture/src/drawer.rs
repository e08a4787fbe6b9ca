use crate::math::Point;
use crate::surface::RenderSurface;
use crate::tessellation::{Color, MeshBuffer, StreamingStroke, UnsupportedParameter};

use std::sync::Arc;

/// Draws a stroke while it is being captured.
///
/// Wraps a [`StreamingStroke`](../inkstroke_tessellation/struct.StreamingStroke.html)
/// and republishes its mesh to the surface each time it changes.
pub struct LineDrawer<S> {
    stroke: StreamingStroke,
    mesh: Arc<MeshBuffer>,
    surface: S,
}

impl<S: RenderSurface> LineDrawer<S> {
    pub const DEFAULT_LINE_WIDTH: f32 = StreamingStroke::DEFAULT_LINE_WIDTH;

    /// A white stroke of `DEFAULT_LINE_WIDTH`.
    pub fn new(surface: S) -> Self {
        LineDrawer::with_stroke(surface, StreamingStroke::default())
    }

    /// Fails if `line_width` is not a positive finite number.
    pub fn with_style(
        surface: S,
        line_width: f32,
        color: Color,
    ) -> Result<Self, UnsupportedParameter> {
        Ok(LineDrawer::with_stroke(surface, StreamingStroke::new(line_width, color)?))
    }

    /// Draws `stroke`, and whatever is added to it afterwards.
    pub fn with_stroke(surface: S, stroke: StreamingStroke) -> Self {
        LineDrawer {
            stroke,
            mesh: Arc::new(MeshBuffer::new()),
            surface,
        }
    }

    /// Appends a point, publishing the mesh if it produced a new quad.
    pub fn add_point(&mut self, point: Point) -> bool {
        let added = self.stroke.add_point(point);
        if added {
            self.publish();
        }

        added
    }

    /// Erases the stroke and publishes the empty mesh.
    pub fn clear(&mut self) {
        self.stroke.clear();
        self.publish();
    }

    fn publish(&mut self) {
        self.mesh = Arc::new(self.stroke.to_mesh());
        self.surface.set_mesh(Arc::clone(&self.mesh));
        self.surface.request_redraw();
    }

    pub fn mesh(&self) -> &Arc<MeshBuffer> {
        &self.mesh
    }

    pub fn stroke(&self) -> &StreamingStroke {
        &self.stroke
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::point;
    use crate::surface::HeadlessSurface;

    #[test]
    fn publishes_each_quad() {
        let mut drawer = LineDrawer::new(HeadlessSurface::new());

        assert!(!drawer.add_point(point(0.0, 0.0)));
        assert_eq!(drawer.surface().redraw_count(), 0);

        assert!(drawer.add_point(point(10.0, 0.0)));
        assert!(drawer.add_point(point(10.0, 10.0)));
        assert!(!drawer.add_point(point(10.0, 10.0)));

        assert_eq!(drawer.surface().redraw_count(), 2);
        assert_eq!(drawer.mesh().quad_count(), 2);
        assert!(Arc::ptr_eq(drawer.surface().mesh().unwrap(), drawer.mesh()));

        // Default width is 4.
        assert_eq!(drawer.mesh().vertices[0], point(0.0, 2.0));
    }

    #[test]
    fn clear() {
        let mut drawer = LineDrawer::with_style(HeadlessSurface::new(), 1.0, Color::BLACK).unwrap();
        drawer.add_point(point(0.0, 0.0));
        drawer.add_point(point(1.0, 1.0));

        drawer.clear();

        assert!(drawer.mesh().is_empty());
        assert!(drawer.surface().mesh().unwrap().is_empty());
        assert_eq!(drawer.stroke().last_point(), None);
        assert_eq!(drawer.mesh().color, Color::BLACK);
    }

    #[test]
    fn invalid_style() {
        assert!(LineDrawer::with_style(HeadlessSurface::new(), f32::NAN, Color::BLACK).is_err());
        assert!(LineDrawer::with_style(HeadlessSurface::new(), 0.0, Color::BLACK).is_err());
    }

    #[test]
    fn non_finite_points_are_not_published() {
        let mut drawer = LineDrawer::new(HeadlessSurface::new());
        drawer.add_point(point(0.0, 0.0));

        assert!(!drawer.add_point(point(f32::NAN, 1.0)));
        assert_eq!(drawer.surface().redraw_count(), 0);
        assert!(drawer.surface().mesh().is_none());
    }
}
