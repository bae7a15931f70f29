use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::coords::{PixelSize, Viewport};
use crate::device::{Gpu, GpuInit, SurfaceErrorAction};
use crate::imaging::DecodedImage;
use crate::paint::Color;
use crate::render::{Canvas, CanvasCompositor, ImageTexture, QuadPipeline, RenderCtx, RenderTarget};

use super::{GraphicsBackend, RenderError};

/// [`GraphicsBackend`] on top of wgpu, bound to one window.
///
/// Long-lived objects (device, surface configuration, quad pipeline, canvas)
/// are created on first use and kept. The image texture and its bind group
/// belong to the latest invocation and are replaced by the next one.
pub struct WgpuBackend<'w> {
    window: &'w Window,
    init: GpuInit,

    gpu: Option<Gpu<'w>>,
    quad: Option<QuadPipeline>,
    canvas: Option<Canvas>,

    texture: Option<ImageTexture>,
    bind_group: Option<wgpu::BindGroup>,

    compositor: CanvasCompositor,
}

impl<'w> WgpuBackend<'w> {
    pub fn new(window: &'w Window, init: GpuInit) -> Self {
        Self {
            window,
            init,
            gpu: None,
            quad: None,
            canvas: None,
            texture: None,
            bind_group: None,
            compositor: CanvasCompositor::new(),
        }
    }

    /// Tracks window resizes. The canvas is unaffected.
    pub fn resize_surface(&mut self, size: PhysicalSize<u32>) {
        if let Some(gpu) = self.gpu.as_mut() {
            gpu.resize(size);
        }
    }

    /// Presents one window frame: the canvas 1:1 over `clear`, then `draw` on top.
    ///
    /// Returns the recovery action when the swapchain frame could not be acquired.
    /// Before the surface is configured this is a silent no-op.
    pub fn present<F>(
        &mut self,
        clear: Color,
        viewport: Viewport,
        scale_factor: f32,
        draw: F,
    ) -> Option<SurfaceErrorAction>
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        let gpu = self.gpu.as_mut()?;
        let format = gpu.surface_format()?;

        let mut frame = match gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                log::debug!("frame skipped: {err}");
                return Some(gpu.handle_surface_error(err));
            }
        };

        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            self.compositor.render(
                gpu.device(),
                format,
                &mut target,
                self.canvas.as_ref(),
                clear.to_wgpu(),
            );

            let rctx = RenderCtx::new(gpu.device(), gpu.queue(), format, viewport, scale_factor);
            draw(&rctx, &mut target);
        }

        self.window.pre_present_notify();
        gpu.submit(frame);
        None
    }
}

fn require<'a, 'w>(gpu: &'a Option<Gpu<'w>>) -> Result<&'a Gpu<'w>, RenderError> {
    gpu.as_ref()
        .ok_or_else(|| RenderError::draw("graphics device has not been acquired"))
}

impl GraphicsBackend for WgpuBackend<'_> {
    fn probe(&self) -> bool {
        Gpu::platform_supported(&self.init)
    }

    fn acquire_device(&mut self) -> Result<(), RenderError> {
        if self.gpu.is_some() {
            return Ok(());
        }
        let gpu = pollster::block_on(Gpu::acquire(self.window, &self.init))?;
        self.gpu = Some(gpu);
        Ok(())
    }

    fn configure_surface(&mut self) -> Result<(), RenderError> {
        let init = &self.init;
        let gpu = self.gpu.as_mut().ok_or_else(|| RenderError::SurfaceConfiguration {
            reason: "graphics device has not been acquired".into(),
        })?;
        gpu.configure_surface(init)?;
        Ok(())
    }

    fn upload_texture(&mut self, image: &DecodedImage) -> Result<(), RenderError> {
        let gpu = require(&self.gpu)?;
        let texture = ImageTexture::upload(gpu.device(), gpu.queue(), image)?;

        // The previous invocation's texture and bind group are released here.
        self.bind_group = None;
        self.texture = Some(texture);
        Ok(())
    }

    fn resize_canvas(&mut self, size: PixelSize) -> Result<(), RenderError> {
        let gpu = require(&self.gpu)?;
        let format = gpu
            .surface_format()
            .ok_or_else(|| RenderError::draw("surface is not configured"))?;

        if let Some(canvas) = self.canvas.as_mut() {
            canvas.resize(gpu.device(), size);
        } else {
            self.canvas = Some(Canvas::new(gpu.device(), size, format));
        }
        Ok(())
    }

    fn ensure_pipeline(&mut self) -> Result<(), RenderError> {
        let gpu = require(&self.gpu)?;
        let format = self
            .canvas
            .as_ref()
            .map(Canvas::format)
            .ok_or_else(|| RenderError::draw("no canvas to build the pipeline for"))?;

        if self.quad.as_ref().is_some_and(|q| q.format() == format) {
            return Ok(());
        }
        let quad = QuadPipeline::new(gpu.device(), format);
        self.bind_group = None;
        self.quad = Some(quad);
        Ok(())
    }

    fn bind_texture(&mut self) -> Result<(), RenderError> {
        let gpu = require(&self.gpu)?;
        let quad = self.quad.as_ref().ok_or_else(|| RenderError::draw("pipeline missing"))?;
        let texture = self.texture.as_ref().ok_or_else(|| RenderError::draw("texture missing"))?;

        self.bind_group = Some(quad.bind(gpu.device(), texture));
        Ok(())
    }

    fn draw(&mut self) -> Result<(), RenderError> {
        let gpu = require(&self.gpu)?;
        let quad = self.quad.as_ref().ok_or_else(|| RenderError::draw("pipeline missing"))?;
        let canvas = self.canvas.as_ref().ok_or_else(|| RenderError::draw("canvas missing"))?;
        let bind_group = self
            .bind_group
            .as_ref()
            .ok_or_else(|| RenderError::draw("bind group missing"))?;

        let mut encoder = gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("vista image encoder"),
            });
        quad.draw(&mut encoder, canvas, bind_group);
        gpu.queue().submit(std::iter::once(encoder.finish()));

        self.window.request_redraw();
        Ok(())
    }

    fn canvas_size(&self) -> Option<PixelSize> {
        self.canvas.as_ref().map(Canvas::size)
    }
}
