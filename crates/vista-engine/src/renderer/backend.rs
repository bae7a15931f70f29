use crate::coords::PixelSize;
use crate::imaging::DecodedImage;

use super::RenderError;

/// The graphics API as seen by [`ImageRenderer`](super::ImageRenderer).
///
/// One method per step of the render sequence. The renderer owns the ordering;
/// implementations only perform the step they are asked for. Steps that acquire
/// long-lived objects (device, surface, pipeline) must be idempotent.
pub trait GraphicsBackend {
    /// Whether any graphics API is reachable. Must not allocate GPU resources.
    fn probe(&self) -> bool;

    /// Requests an adapter and a logical device. No-op when already held.
    fn acquire_device(&mut self) -> Result<(), RenderError>;

    /// Binds the output surface to the device (preferred format, opaque).
    fn configure_surface(&mut self) -> Result<(), RenderError>;

    /// Allocates a texture of exactly the image size and copies the pixels in.
    /// Replaces any texture from a previous invocation.
    fn upload_texture(&mut self, image: &DecodedImage) -> Result<(), RenderError>;

    /// Resizes the output canvas to exactly `size`.
    fn resize_canvas(&mut self, size: PixelSize) -> Result<(), RenderError>;

    /// Builds the fixed textured-quad pipeline unless it already exists.
    fn ensure_pipeline(&mut self) -> Result<(), RenderError>;

    /// Binds sampler (slot 0) and texture view (slot 1) for the pipeline.
    fn bind_texture(&mut self) -> Result<(), RenderError>;

    /// Clears the canvas to opaque black and draws the quad once.
    fn draw(&mut self) -> Result<(), RenderError>;

    /// Current canvas size, if a canvas exists.
    fn canvas_size(&self) -> Option<PixelSize>;
}
