/// One swapchain image plus the encoder recording into it.
///
/// The surface hands out a single texture at a time, so a frame must reach
/// [`Gpu::submit`](super::Gpu::submit) before the next one is acquired.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

/// Recovery chosen after the swapchain refused a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Lost/outdated surface was configured again; the next frame should work.
    Reconfigured,
    /// Nothing to do but try again later (timeout, minimized window).
    SkipFrame,
    /// Out of memory. The window cannot present anymore.
    Fatal,
}
