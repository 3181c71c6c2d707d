/// Depth attachment sized to the surface.
pub(crate) struct DepthBuffer {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
    size: (u32, u32),
}

impl DepthBuffer {
    pub(crate) const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    pub(crate) fn new(device: &wgpu::Device, size: (u32, u32)) -> Self {
        let (width, height) = (size.0.max(1), size.1.max(1));
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("sierpinski depth"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            _texture: texture,
            view,
            size,
        }
    }

    #[inline]
    pub(crate) fn size(&self) -> (u32, u32) {
        self.size
    }

    #[inline]
    pub(crate) fn view(&self) -> &wgpu::TextureView {
        &self.view
    }
}
