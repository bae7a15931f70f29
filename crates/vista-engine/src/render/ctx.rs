use crate::coords::{Rect, Viewport};

/// What an overlay renderer needs to draw into the current window frame.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    /// Format of the swapchain texture behind `RenderTarget::color_view`.
    pub surface_format: wgpu::TextureFormat,
    /// Window size in logical pixels.
    pub viewport: Viewport,
    /// Physical pixels per logical pixel.
    pub scale_factor: f32,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        viewport: Viewport,
        scale_factor: f32,
    ) -> Self {
        Self {
            device,
            queue,
            surface_format,
            viewport,
            scale_factor,
        }
    }

    /// Aligns a logical rectangle to whole physical pixels, so flat fills get crisp edges.
    #[inline]
    pub fn snap(&self, rect: Rect) -> Rect {
        rect.snapped(self.scale_factor)
    }
}

/// Encoder and color attachment of the frame being recorded.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self { encoder, color_view }
    }
}
