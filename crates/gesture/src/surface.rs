use crate::tessellation::MeshBuffer;

use std::sync::Arc;

/// The host side of a drawing: something that displays a mesh.
///
/// Renderers and drawers publish each new mesh through `set_mesh`, then call
/// `request_redraw`. Meshes are shared rather than copied, a surface can
/// keep the `Arc` until its next frame.
pub trait RenderSurface {
    fn set_mesh(&mut self, mesh: Arc<MeshBuffer>);

    fn request_redraw(&mut self) {}
}

impl<S: RenderSurface + ?Sized> RenderSurface for Box<S> {
    fn set_mesh(&mut self, mesh: Arc<MeshBuffer>) {
        (**self).set_mesh(mesh)
    }

    fn request_redraw(&mut self) {
        (**self).request_redraw()
    }
}

/// A surface that keeps the last mesh it received and counts redraw
/// requests.
///
/// Useful for tests and for hosts that poll the mesh instead of being
/// notified.
#[derive(Clone, Debug, Default)]
pub struct HeadlessSurface {
    mesh: Option<Arc<MeshBuffer>>,
    redraws: usize,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        HeadlessSurface::default()
    }

    pub fn mesh(&self) -> Option<&Arc<MeshBuffer>> {
        self.mesh.as_ref()
    }

    pub fn redraw_count(&self) -> usize {
        self.redraws
    }
}

impl RenderSurface for HeadlessSurface {
    fn set_mesh(&mut self, mesh: Arc<MeshBuffer>) {
        self.mesh = Some(mesh);
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
    }
}
