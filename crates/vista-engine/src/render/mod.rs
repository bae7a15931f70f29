//! GPU rendering subsystem.
//!
//! - [`ImageTexture`] + [`QuadPipeline`] draw the uploaded image into the [`Canvas`].
//! - [`CanvasCompositor`] copies the canvas 1:1 into the window every frame.
//! - [`PanelRenderer`] draws flat overlay quads (the sidebar) on top.
//!
//! Each renderer owns its GPU resources.

mod canvas;
mod compositor;
mod ctx;
mod panel;
mod quad;
mod texture;

pub use canvas::Canvas;
pub use compositor::CanvasCompositor;
pub use ctx::{RenderCtx, RenderTarget};
pub use panel::{PanelQuad, PanelRenderer};
pub use quad::{QuadPipeline, QUAD_VERTEX_COUNT};
pub use texture::{ImageTexture, IMAGE_TEXTURE_FORMAT};
