use super::{Canvas, RenderTarget};

/// Presents the canvas in the window every frame.
///
/// This is a plain 1:1 copy: canvas pixel (x, y) lands on window pixel (x, y).
/// It never re-runs the image draw, so the image pipeline still executes once
/// per render invocation.
#[derive(Default)]
pub struct CanvasCompositor {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,

    /// Bind group for the canvas revision it was built against.
    bind_group: Option<(u64, wgpu::BindGroup)>,
}

impl CanvasCompositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a pass that clears the target to `clear` and copies `canvas` over it.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        target: &mut RenderTarget<'_>,
        canvas: Option<&Canvas>,
        clear: wgpu::Color,
    ) {
        if let Some(canvas) = canvas {
            self.ensure_pipeline(device, surface_format);
            self.ensure_bind_group(device, canvas);
        }

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("vista present pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        if canvas.is_none() {
            return;
        }
        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some((_, bind_group)) = self.bind_group.as_ref() else { return };

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.draw(0..3, 0..1);
    }

    fn ensure_pipeline(&mut self, device: &wgpu::Device, format: wgpu::TextureFormat) {
        if self.pipeline_format == Some(format) && self.pipeline.is_some() {
            return;
        }

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("vista present shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/present.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("vista present bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: false },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("vista present pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("vista present pipeline"),
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
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
    }

    fn ensure_bind_group(&mut self, device: &wgpu::Device, canvas: &Canvas) {
        if matches!(&self.bind_group, Some((rev, _)) if *rev == canvas.revision()) {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("vista present bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(canvas.view()),
            }],
        });

        self.bind_group = Some((canvas.revision(), bind_group));
    }
}
