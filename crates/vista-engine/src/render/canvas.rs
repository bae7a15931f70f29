use crate::coords::PixelSize;

/// Offscreen color target the image is drawn into.
///
/// The canvas is always exactly the size of the last drawn image; it is never
/// scaled. It is sampled by the compositor, so it is both a render attachment
/// and a texture binding.
pub struct Canvas {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    size: PixelSize,
    format: wgpu::TextureFormat,
    /// Bumped on every reallocation so dependents can rebuild their bindings.
    revision: u64,
}

impl Canvas {
    pub fn new(device: &wgpu::Device, size: PixelSize, format: wgpu::TextureFormat) -> Self {
        let (texture, view) = allocate(device, size, format);
        Self {
            texture,
            view,
            size,
            format,
            revision: 0,
        }
    }

    /// Reallocates the canvas when `size` differs from the current one.
    ///
    /// Returns `true` when a new texture was created.
    pub fn resize(&mut self, device: &wgpu::Device, size: PixelSize) -> bool {
        if size == self.size {
            return false;
        }
        let (texture, view) = allocate(device, size, self.format);
        self.texture = texture;
        self.view = view;
        self.size = size;
        self.revision = self.revision.wrapping_add(1);
        true
    }

    #[inline]
    pub fn size(&self) -> PixelSize {
        self.size
    }

    #[inline]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    #[inline]
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    #[inline]
    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

fn allocate(
    device: &wgpu::Device,
    size: PixelSize,
    format: wgpu::TextureFormat,
) -> (wgpu::Texture, wgpu::TextureView) {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("vista canvas"),
        size: wgpu::Extent3d {
            width: size.width.max(1),
            height: size.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT
            | wgpu::TextureUsages::TEXTURE_BINDING
            | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}
