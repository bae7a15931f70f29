use crate::coords::PixelSize;
use crate::imaging::DecodedImage;
use crate::renderer::RenderError;

/// Format of uploaded images. Decoded pixels are sRGB-encoded RGBA8.
pub const IMAGE_TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// GPU-resident copy of one decoded image, sized exactly to the image.
pub struct ImageTexture {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
    size: PixelSize,
}

impl ImageTexture {
    /// Allocates the texture and copies all pixels in one queue write.
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &DecodedImage,
    ) -> Result<Self, RenderError> {
        let size = image.size();
        let max = device.limits().max_texture_dimension_2d;
        if size.max_side() > max {
            return Err(RenderError::ImageTooLarge { size, max });
        }

        let extent = wgpu::Extent3d {
            width: size.width,
            height: size.height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("vista image texture"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: IMAGE_TEXTURE_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.pixels(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(image.bytes_per_row()),
                rows_per_image: Some(size.height),
            },
            extent,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Ok(Self {
            _texture: texture,
            view,
            size,
        })
    }

    #[inline]
    pub fn size(&self) -> PixelSize {
        self.size
    }

    #[inline]
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }
}
