use anyhow::{Context, Result};
use winit::dpi::PhysicalSize;

use super::GpuInit;

/// What the render loop should do after a failed frame acquisition.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; try again next frame.
    Reconfigured,
    /// Transient; drop this frame.
    SkipFrame,
    /// Unrecoverable (out of memory).
    Fatal,
}

/// Swapchain surface plus its current configuration.
pub(super) struct SurfaceState<'w> {
    surface: wgpu::Surface<'w>,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
}

impl<'w> SurfaceState<'w> {
    pub(super) fn configure(
        surface: wgpu::Surface<'w>,
        adapter: &wgpu::Adapter,
        device: &wgpu::Device,
        size: PhysicalSize<u32>,
        init: &GpuInit,
    ) -> Result<Self> {
        let caps = surface.get_capabilities(adapter);
        let format = pick_format(&caps.formats, init.prefer_srgb)
            .context("surface reports no supported formats")?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: init.present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: init.frame_latency,
        };
        surface.configure(device, &config);
        log::debug!("surface {format:?} {}x{}", size.width, size.height);

        Ok(Self { surface, config, size })
    }

    #[inline]
    pub(super) fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    #[inline]
    pub(super) fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    #[inline]
    fn has_area(&self) -> bool {
        self.size.width > 0 && self.size.height > 0
    }

    /// Records the new size; reconfigures only when it has area.
    pub(super) fn resize(&mut self, device: &wgpu::Device, size: PhysicalSize<u32>) {
        self.size = size;
        if self.has_area() {
            self.config.width = size.width;
            self.config.height = size.height;
            self.surface.configure(device, &self.config);
        }
    }

    pub(super) fn acquire(&self) -> std::result::Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    pub(super) fn recover(
        &self,
        device: &wgpu::Device,
        err: wgpu::SurfaceError,
    ) -> SurfaceErrorAction {
        use wgpu::SurfaceError as E;

        match err {
            E::Lost | E::Outdated => {
                if self.has_area() {
                    self.surface.configure(device, &self.config);
                }
                SurfaceErrorAction::Reconfigured
            }
            E::OutOfMemory => SurfaceErrorAction::Fatal,
            E::Timeout | E::Other => SurfaceErrorAction::SkipFrame,
        }
    }
}

/// First format matching the sRGB preference, else the surface's first format.
fn pick_format(formats: &[wgpu::TextureFormat], prefer_srgb: bool) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| f.is_srgb() == prefer_srgb)
        .or_else(|| formats.first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat::{Bgra8Unorm, Bgra8UnormSrgb, Rgba8Unorm};

    #[test]
    fn pick_format_honors_srgb_preference() {
        let formats = [Bgra8UnormSrgb, Bgra8Unorm];
        assert_eq!(pick_format(&formats, true), Some(Bgra8UnormSrgb));
        assert_eq!(pick_format(&formats, false), Some(Bgra8Unorm));
    }

    #[test]
    fn pick_format_falls_back_to_first() {
        assert_eq!(pick_format(&[Rgba8Unorm], true), Some(Rgba8Unorm));
        assert_eq!(pick_format(&[], false), None);
    }
}
