use anyhow::{Context, Result};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::surface::SurfaceState;
use super::{GpuFrame, GpuInit, SurfaceErrorAction};

/// Device, queue and window surface.
///
/// Borrows the window for `'w`; the window must outlive it.
pub struct Gpu<'w> {
    _instance: wgpu::Instance,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: SurfaceState<'w>,
}

impl<'w> Gpu<'w> {
    /// Opens an adapter and device able to present to `window`.
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(
            size.width > 0 && size.height > 0,
            "cannot create a surface for a {}x{} window",
            size.width,
            size.height
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: init.backends,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no GPU adapter can present to this window")?;

        let info = adapter.get_info();
        log::info!("adapter: {} ({:?}, {:?})", info.name, info.backend, info.device_type);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("sierpinski device"),
                required_features: wgpu::Features::empty(),
                required_limits: init.required_limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("adapter refused to open a device")?;

        let surface = SurfaceState::configure(surface, &adapter, &device, size, &init)?;

        Ok(Self {
            _instance: instance,
            device,
            queue,
            surface,
        })
    }

    #[inline]
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    #[inline]
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    #[inline]
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface.format()
    }

    /// Drawable size in physical pixels; may be 0x0 while minimized.
    #[inline]
    pub fn size(&self) -> PhysicalSize<u32> {
        self.surface.size()
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.surface.resize(&self.device, size);
    }

    /// Acquires the next swapchain image and opens an encoder for it.
    pub fn begin_frame(&self) -> std::result::Result<GpuFrame, wgpu::SurfaceError> {
        let texture = self.surface.acquire()?;
        let view = texture.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("sierpinski frame encoder"),
            });

        Ok(GpuFrame {
            texture,
            view,
            encoder,
        })
    }

    /// Submits the frame's commands and presents it.
    pub fn submit(&self, frame: GpuFrame) {
        let GpuFrame {
            texture,
            view,
            encoder,
        } = frame;

        self.queue.submit([encoder.finish()]);
        drop(view);
        texture.present();
    }

    /// Tries to recover from a failed acquisition.
    pub fn handle_surface_error(&mut self, err: wgpu::SurfaceError) -> SurfaceErrorAction {
        log::warn!("surface error: {err}");
        self.surface.recover(&self.device, err)
    }
}
