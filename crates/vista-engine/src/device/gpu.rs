use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::renderer::RenderError;

use super::surface;
use super::{GpuFrame, GpuInit, SurfaceErrorAction};

/// Owns wgpu core objects and the window surface.
///
/// Construction is split the same way the image render sequence is:
/// - [`Gpu::acquire`] creates Instance/Surface/Adapter/Device/Queue
/// - [`Gpu::configure_surface`] binds the surface to the device
///
/// Frames can only be acquired once the surface is configured.
pub struct Gpu<'w> {
    /// Kept alive for the surface; wgpu requires the instance to outlive it.
    _instance: wgpu::Instance,

    /// Surface bound to the window. The window must outlive the `Gpu`.
    surface: wgpu::Surface<'w>,

    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,

    /// Active surface configuration; `None` until configured.
    config: Option<wgpu::SurfaceConfiguration>,

    /// Current drawable size in physical pixels.
    size: PhysicalSize<u32>,
}

impl<'w> Gpu<'w> {
    /// Returns whether this build can reach any graphics backend at all.
    pub fn platform_supported(init: &GpuInit) -> bool {
        !(wgpu::Instance::enabled_backend_features() & init.backends).is_empty()
    }

    /// Requests an adapter, then a logical device from it.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu.
    pub async fn acquire(window: &'w Window, init: &GpuInit) -> Result<Self, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: init.backends,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .map_err(|e| RenderError::UnsupportedPlatform {
                reason: format!("failed to create wgpu surface: {e}"),
            })?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| RenderError::DeviceAcquisition {
                reason: format!("no suitable GPU adapter: {e}"),
            })?;

        let info = adapter.get_info();
        log::info!("using adapter {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("vista device"),
                required_features: wgpu::Features::empty(),
                required_limits: init.required_limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|e| RenderError::DeviceAcquisition {
                reason: format!("failed to create wgpu device/queue: {e}"),
            })?;

        Ok(Self {
            _instance: instance,
            surface,
            adapter,
            device,
            queue,
            config: None,
            size: window.inner_size(),
        })
    }

    /// Configures the surface with the platform's preferred format.
    ///
    /// Calling it again is a no-op once configured.
    pub fn configure_surface(&mut self, init: &GpuInit) -> Result<wgpu::TextureFormat, RenderError> {
        if let Some(config) = &self.config {
            return Ok(config.format);
        }

        let caps = self.surface.get_capabilities(&self.adapter);
        let format = surface::choose_surface_format(&caps, init.prefer_srgb).ok_or_else(|| {
            RenderError::SurfaceConfiguration {
                reason: "surface reports no supported formats".into(),
            }
        })?;
        let alpha_mode = surface::choose_alpha_mode(&caps, init.alpha_mode);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: self.size.width.max(1),
            height: self.size.height.max(1),
            present_mode: init.present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };

        if self.size.width > 0 && self.size.height > 0 {
            self.surface.configure(&self.device, &config);
        }
        log::debug!("surface configured: {format:?}, {alpha_mode:?}");

        self.config = Some(config);
        Ok(format)
    }

    /// Returns the configured surface format.
    pub fn surface_format(&self) -> Option<wgpu::TextureFormat> {
        self.config.as_ref().map(|c| c.format)
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Reconfigures the surface after a resize.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        surface::apply_resize(
            &self.surface,
            &self.device,
            self.config.as_mut(),
            &mut self.size,
            new_size,
        );
    }

    /// Acquires the next surface texture and creates an encoder.
    ///
    /// The returned frame owns the surface texture. Releasing it (after submission)
    /// presents the frame.
    pub fn begin_frame(&self) -> Result<GpuFrame, SurfaceError> {
        if self.config.is_none() {
            return Err(SurfaceError::Outdated);
        }

        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("vista frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the recorded commands for the given frame and presents it.
    pub fn submit(&self, frame: GpuFrame) {
        self.queue.submit(std::iter::once(frame.encoder.finish()));
        drop(frame.view);
        frame.surface_texture.present();
    }

    /// Converts a `SurfaceError` into a higher-level action.
    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        surface::map_surface_error(
            &self.surface,
            &self.device,
            self.config.as_ref(),
            self.size,
            err,
        )
    }
}
