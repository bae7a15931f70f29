use crate::paint::Color;

use super::{Canvas, ImageTexture};

/// Vertices emitted by the quad shader per draw (two triangles).
pub const QUAD_VERTEX_COUNT: u32 = 6;

/// Fixed pipeline sampling one texture over a full-target quad.
///
/// The shader never changes, so the pipeline is built once per target format
/// and reused for every image; only the bind group changes per image.
pub struct QuadPipeline {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
}

impl QuadPipeline {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("vista quad shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/quad.wgsl").into()),
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("vista quad sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("vista quad bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("vista quad pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("vista quad pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("quad pipeline built for {format:?}");

        Self {
            format,
            pipeline,
            bind_group_layout,
            sampler,
        }
    }

    /// Color target format the pipeline was built for.
    #[inline]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    /// Sampler at binding 0, texture view at binding 1.
    pub fn bind(&self, device: &wgpu::Device, texture: &ImageTexture) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("vista quad bind group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(texture.view()),
                },
            ],
        })
    }

    /// Records one pass that clears the canvas to opaque black and draws the quad.
    pub fn draw(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        canvas: &Canvas,
        bind_group: &wgpu::BindGroup,
    ) {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("vista quad pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: canvas.view(),
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(Color::BLACK.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.draw(0..QUAD_VERTEX_COUNT, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::DecodedImage;
    use crate::render::IMAGE_TEXTURE_FORMAT;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];

    /// Device without a surface; `None` when the host has no adapter at all.
    fn headless_device() -> Option<(wgpu::Device, wgpu::Queue)> {
        pollster::block_on(async {
            let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
            let adapter = instance
                .request_adapter(&wgpu::RequestAdapterOptions {
                    power_preference: wgpu::PowerPreference::default(),
                    compatible_surface: None,
                    force_fallback_adapter: false,
                })
                .await
                .ok()?;
            adapter
                .request_device(&wgpu::DeviceDescriptor {
                    label: Some("vista test device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_defaults(),
                    experimental_features: wgpu::ExperimentalFeatures::disabled(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    trace: wgpu::Trace::Off,
                })
                .await
                .ok()
        })
    }

    /// Uploads `image`, draws it into a same-sized canvas and reads the canvas back.
    fn draw_and_read(device: &wgpu::Device, queue: &wgpu::Queue, image: &DecodedImage) -> Vec<u8> {
        let texture = ImageTexture::upload(device, queue, image).unwrap();
        let size = texture.size();
        assert_eq!(size, image.size());
        let canvas = Canvas::new(device, size, IMAGE_TEXTURE_FORMAT);
        let quad = QuadPipeline::new(device, canvas.format());
        let bind_group = quad.bind(device, &texture);

        // 256 px rows are 1024 bytes, already a multiple of COPY_BYTES_PER_ROW_ALIGNMENT.
        let bytes_per_row = size.width * 4;
        let readback = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("vista test readback"),
            size: u64::from(bytes_per_row) * u64::from(size.height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("vista test encoder"),
        });
        quad.draw(&mut encoder, &canvas, &bind_group);
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: canvas.texture(),
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &readback,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(bytes_per_row),
                    rows_per_image: Some(size.height),
                },
            },
            wgpu::Extent3d {
                width: size.width,
                height: size.height,
                depth_or_array_layers: 1,
            },
        );
        queue.submit(Some(encoder.finish()));

        let slice = readback.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |res| {
            let _ = tx.send(res);
        });
        device.poll(wgpu::PollType::wait_indefinitely()).unwrap();
        rx.recv().unwrap().unwrap();

        let bytes = slice.get_mapped_range().to_vec();
        readback.unmap();
        bytes
    }

    #[test]
    fn draws_red_image_into_canvas() {
        let Some((device, queue)) = headless_device() else {
            eprintln!("no GPU adapter available; skipping");
            return;
        };

        let image = DecodedImage::solid(256, 256, RED).unwrap();
        let pixels = draw_and_read(&device, &queue, &image);

        assert_eq!(pixels.len(), 256 * 256 * 4);
        for (i, px) in pixels.chunks_exact(4).enumerate() {
            assert_eq!(px, RED, "pixel {i}");
        }
    }

    #[test]
    fn keeps_image_rows_upright() {
        let Some((device, queue)) = headless_device() else {
            eprintln!("no GPU adapter available; skipping");
            return;
        };

        let (w, h) = (256u32, 256u32);
        let mut rgba = Vec::with_capacity((w * h * 4) as usize);
        for y in 0..h {
            let px = if y < h / 2 { RED } else { BLUE };
            for _ in 0..w {
                rgba.extend_from_slice(&px);
            }
        }
        let image = DecodedImage::from_rgba8(w, h, rgba).unwrap();
        let pixels = draw_and_read(&device, &queue, &image);

        let at = |x: u32, y: u32| {
            let i = ((y * w + x) * 4) as usize;
            [pixels[i], pixels[i + 1], pixels[i + 2], pixels[i + 3]]
        };
        assert_eq!(at(10, 10), RED);
        assert_eq!(at(200, 100), RED);
        assert_eq!(at(10, 200), BLUE);
        assert_eq!(at(245, 250), BLUE);
    }
}
