use winit::window::{Window, WindowId};

use crate::coords::{PixelSize, Viewport};
use crate::device::SurfaceErrorAction;
use crate::imaging::ImageLoader;
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};
use crate::renderer::WgpuBackend;

use super::app::AppControl;

/// Window handle and metadata.
pub struct WindowCtx<'a> {
    pub id: WindowId,
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    pub fn viewport(&self) -> Viewport {
        let phys = self.window.inner_size();
        Viewport::from_physical(PixelSize::new(phys.width, phys.height), self.window.scale_factor())
    }

    pub fn scale_factor(&self) -> f32 {
        self.window.scale_factor() as f32
    }

    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

/// Context passed to `App::on_start` and `App::on_event`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by the backend
pub struct AppCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub backend: &'a mut WgpuBackend<'w>,
    pub loader: &'a ImageLoader,
}

/// Per-frame context passed to `App::on_frame`.
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub backend: &'a mut WgpuBackend<'w>,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Composites the canvas over `clear`, calls `draw` with a ready [`RenderCtx`]
    /// and [`RenderTarget`] for overlays, then presents the frame.
    ///
    /// A no-op until the backend has a configured surface.
    pub fn render<F>(&mut self, clear: Color, draw: F) -> AppControl
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        let viewport = self.window.viewport();
        let scale_factor = self.window.scale_factor();

        match self.backend.present(clear, viewport, scale_factor, draw) {
            None | Some(SurfaceErrorAction::SkipFrame) => AppControl::Continue,
            Some(SurfaceErrorAction::Reconfigured) => {
                self.window.request_redraw();
                AppControl::Continue
            }
            Some(SurfaceErrorAction::Fatal) => AppControl::Exit,
        }
    }
}
