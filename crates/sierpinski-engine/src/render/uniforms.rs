use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Per-frame camera block (`group(0)`).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new(view: Mat4, projection: Mat4) -> Self {
        Self {
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
        }
    }
}

/// Per-mesh model block (`group(1)`).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct ModelUniform {
    pub model: [[f32; 4]; 4],
}

impl ModelUniform {
    pub(crate) fn new(model: Mat4) -> Self {
        Self { model: model.to_cols_array_2d() }
    }
}

/// Minimum binding size for a uniform block of type `T`.
pub(crate) fn min_binding_size<T: Pod>() -> Option<std::num::NonZeroU64> {
    std::num::NonZeroU64::new(std::mem::size_of::<T>() as u64)
}

pub(crate) fn uniform_layout_entry<T: Pod>() -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: min_binding_size::<T>(),
        },
        count: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_sizes_are_matrix_multiples() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 128);
        assert_eq!(std::mem::size_of::<ModelUniform>(), 64);
    }

    #[test]
    fn model_uniform_is_column_major() {
        let m = ModelUniform::new(Mat4::from_translation(glam::Vec3::X));
        assert_eq!(m.model[3], [1.0, 0.0, 0.0, 1.0]);
    }
}
