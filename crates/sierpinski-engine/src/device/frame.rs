/// Surface texture acquired for one frame, with its view and command encoder.
///
/// Must be handed back to [`Gpu::submit`](super::Gpu::submit) promptly; the next
/// frame cannot be acquired while this one is held.
pub struct GpuFrame {
    pub(super) texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
