use crate::math::Point;
use crate::surface::RenderSurface;
use crate::tessellation::{
    MeshBuffer, StrokeOptions, StrokeTessellator, SurfaceRect, TessellationResult,
};

use log::{debug, warn};
use std::mem;
use std::sync::Arc;

/// Keeps a polyline, its style and the mesh currently displayed by a surface.
///
/// Every change rebuilds the whole mesh. The new mesh is published only if
/// the tessellation succeeds. On error the change is rolled back, so the
/// renderer and its surface always agree on a valid state.
pub struct LineRenderer<S> {
    points: Vec<Point>,
    options: StrokeOptions,
    surface_rect: SurfaceRect,
    tessellator: StrokeTessellator,
    mesh: Arc<MeshBuffer>,
    surface: S,
}

impl<S: RenderSurface> LineRenderer<S> {
    pub fn new(surface: S, options: StrokeOptions) -> Self {
        LineRenderer {
            points: Vec::new(),
            options,
            surface_rect: SurfaceRect::default(),
            tessellator: StrokeTessellator::new(),
            mesh: Arc::new(MeshBuffer::new()),
            surface,
        }
    }

    /// Replaces the polyline.
    pub fn set_points(&mut self, points: Vec<Point>) -> TessellationResult {
        let previous = mem::replace(&mut self.points, points);
        let result = self.rebuild();
        if result.is_err() {
            self.points = previous;
        }

        result
    }

    pub fn set_options(&mut self, options: StrokeOptions) -> TessellationResult {
        let previous = mem::replace(&mut self.options, options);
        let result = self.rebuild();
        if result.is_err() {
            self.options = previous;
        }

        result
    }

    pub fn set_surface_rect(&mut self, surface_rect: SurfaceRect) -> TessellationResult {
        let previous = mem::replace(&mut self.surface_rect, surface_rect);
        let result = self.rebuild();
        if result.is_err() {
            self.surface_rect = previous;
        }

        result
    }

    /// Tessellates the current polyline and publishes the mesh.
    ///
    /// On error, the previously published mesh is kept.
    pub fn rebuild(&mut self) -> TessellationResult {
        match self
            .tessellator
            .rebuild(&self.points, &self.surface_rect, &self.options)
        {
            Ok(mesh) => {
                debug!(
                    "line rebuilt: {} points, {} triangles",
                    self.points.len(),
                    mesh.triangle_count()
                );
                self.mesh = Arc::new(mesh);
                self.surface.set_mesh(Arc::clone(&self.mesh));
                self.surface.request_redraw();

                Ok(())
            }
            Err(e) => {
                warn!("line rebuild failed, keeping the previous mesh: {}", e);

                Err(e)
            }
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn options(&self) -> &StrokeOptions {
        &self.options
    }

    pub fn surface_rect(&self) -> &SurfaceRect {
        &self.surface_rect
    }

    /// The mesh currently displayed.
    pub fn mesh(&self) -> &Arc<MeshBuffer> {
        &self.mesh
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
    use crate::tessellation::{LineJoin, TessellationError, UnsupportedParameter};

    fn corner() -> Vec<Point> {
        vec![point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)]
    }

    #[test]
    fn publishes_on_change() {
        let mut renderer = LineRenderer::new(HeadlessSurface::new(), StrokeOptions::DEFAULT);
        assert!(renderer.surface().mesh().is_none());

        renderer.set_points(corner()).unwrap();
        assert_eq!(renderer.mesh().quad_count(), 3);
        assert_eq!(renderer.surface().redraw_count(), 1);
        assert!(Arc::ptr_eq(renderer.surface().mesh().unwrap(), renderer.mesh()));

        renderer
            .set_options(StrokeOptions::DEFAULT.with_line_join(LineJoin::Miter))
            .unwrap();
        assert_eq!(renderer.mesh().quad_count(), 2);
        assert_eq!(renderer.surface().redraw_count(), 2);
    }

    #[test]
    fn invalid_options_keep_the_previous_mesh() {
        let mut renderer = LineRenderer::new(HeadlessSurface::new(), StrokeOptions::DEFAULT);
        renderer.set_points(corner()).unwrap();
        let published = Arc::clone(renderer.mesh());

        assert_eq!(
            renderer.set_options(StrokeOptions::DEFAULT.with_line_width(-1.0)),
            Err(TessellationError::UnsupportedParameter(
                UnsupportedParameter::InvalidLineWidth(-1.0)
            )),
        );

        assert!(Arc::ptr_eq(renderer.mesh(), &published));
        assert_eq!(renderer.options(), &StrokeOptions::DEFAULT);
        assert_eq!(renderer.surface().redraw_count(), 1);
    }

    #[test]
    fn invalid_points_are_rolled_back() {
        let options = StrokeOptions::DEFAULT.with_line_list(true);
        let mut renderer = LineRenderer::new(HeadlessSurface::new(), options);
        renderer
            .set_points(vec![point(0.0, 0.0), point(1.0, 0.0)])
            .unwrap();

        assert!(renderer.set_points(corner()).is_err());
        assert_eq!(renderer.points().len(), 2);
        assert_eq!(renderer.mesh().quad_count(), 1);
    }

    #[test]
    fn surface_rect() {
        use crate::math::{size, vector};

        let options = StrokeOptions::DEFAULT.with_relative_size(true);
        let mut renderer = LineRenderer::new(HeadlessSurface::new(), options);
        renderer
            .set_points(vec![point(0.0, 0.5), point(1.0, 0.5)])
            .unwrap();
        renderer
            .set_surface_rect(SurfaceRect::new(size(100.0, 50.0), vector(0.0, 0.0)))
            .unwrap();

        let mesh = renderer.mesh();
        assert_eq!(mesh.vertices[0], point(0.0, 26.0));
        assert_eq!(mesh.vertices[2], point(100.0, 24.0));
    }
}
