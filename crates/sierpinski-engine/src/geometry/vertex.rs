use bytemuck::{Pod, Zeroable};

use crate::paint::Color;

/// Interleaved mesh vertex: position followed by color.
///
/// `#[repr(C)]` keeps the in-memory layout equal to six consecutive `f32`s
/// (`x, y, z, r, g, b`), which is what the GPU vertex layout describes.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    /// Number of `f32` values per vertex.
    pub const FLOATS: usize = 6;

    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3  // color
    ];

    #[inline]
    pub fn new(position: glam::Vec3, color: Color) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
        }
    }

    #[inline]
    pub fn position(&self) -> glam::Vec3 {
        glam::Vec3::from_array(self.position)
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}
