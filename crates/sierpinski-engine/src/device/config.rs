/// GPU startup options.
///
/// wgpu picks the backend; these only narrow what the adapter and surface must offer.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Backends wgpu may choose from.
    pub backends: wgpu::Backends,

    pub power_preference: wgpu::PowerPreference,

    /// Pick an sRGB surface format if one exists. With `false`, vertex colors
    /// reach the display unconverted.
    pub prefer_srgb: bool,

    /// Swap behavior. FIFO (vsync) is the only mode every platform supports.
    pub present_mode: wgpu::PresentMode,

    /// Limits the device must satisfy.
    pub required_limits: wgpu::Limits,

    /// Frames the surface may queue ahead; a hint.
    pub frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            power_preference: wgpu::PowerPreference::HighPerformance,
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            required_limits: wgpu::Limits::default(),
            frame_latency: 2,
        }
    }
}
