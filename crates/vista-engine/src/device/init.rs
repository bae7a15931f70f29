/// Initialization parameters for the GPU layer.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Backends the instance may pick from.
    pub backends: wgpu::Backends,

    /// Adapter power preference. The first adapter matching it is used; there is
    /// no further selection policy.
    pub power_preference: wgpu::PowerPreference,

    /// Prefer an sRGB surface format when available.
    ///
    /// The image texture is uploaded as sRGB, so an sRGB target keeps pixel
    /// values byte-exact through the quad.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior).
    pub present_mode: wgpu::PresentMode,

    /// Alpha mode preference for the surface.
    ///
    /// Opaque by default: the canvas never blends with what is behind the window.
    /// If unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            power_preference: wgpu::PowerPreference::default(),
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: Some(wgpu::CompositeAlphaMode::Opaque),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
