/// Everything a renderer needs to record one frame.
///
/// Built by [`FrameCtx::render`](crate::core::FrameCtx::render); lives only for
/// the draw callback.
pub struct RenderFrame<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub encoder: &'a mut wgpu::CommandEncoder,
    /// Swapchain image for this frame.
    pub color_view: &'a wgpu::TextureView,
    /// Physical pixels, never zero.
    pub size: (u32, u32),
}
