use anyhow::{Context, Result};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::geometry::{IndexedMesh, TriangleSoup, Vertex};

use super::uniforms::ModelUniform;

/// Static mesh resident in device memory.
///
/// Vertex and index data are immutable after upload; only the model transform
/// changes. Buffers are released when the value is dropped.
pub struct GpuMesh {
    label: String,
    vertex_buffer: wgpu::Buffer,
    index_buffer: Option<wgpu::Buffer>,

    /// Vertex count for non-indexed meshes, index count otherwise.
    draw_count: u32,

    model_ubo: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
}

impl GpuMesh {
    pub(crate) fn new(
        device: &wgpu::Device,
        model_layout: &wgpu::BindGroupLayout,
        label: &str,
        vertices: &[Vertex],
        indices: Option<&[u32]>,
    ) -> Result<Self> {
        let draw_count = match indices {
            Some(idx) => u32::try_from(idx.len()),
            None => u32::try_from(vertices.len()),
        }
        .with_context(|| format!("mesh '{label}' is too large for a single draw call"))?;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(format!("{label} vbo").as_str()),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = indices.map(|idx| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(format!("{label} ibo").as_str()),
                contents: bytemuck::cast_slice(idx),
                usage: wgpu::BufferUsages::INDEX,
            })
        });

        let model_ubo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(format!("{label} model ubo").as_str()),
            contents: bytemuck::bytes_of(&ModelUniform::new(Mat4::IDENTITY)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let model_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(format!("{label} model bind group").as_str()),
            layout: model_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: model_ubo.as_entire_binding(),
            }],
        });

        log::debug!(
            "uploaded mesh '{label}': {} vertices, {} indices",
            vertices.len(),
            indices.map_or(0, <[u32]>::len)
        );

        Ok(Self {
            label: label.to_string(),
            vertex_buffer,
            index_buffer,
            draw_count,
            model_ubo,
            model_bind_group,
        })
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn is_indexed(&self) -> bool {
        self.index_buffer.is_some()
    }

    #[inline]
    pub fn draw_count(&self) -> u32 {
        self.draw_count
    }

    /// Replaces the model transform used by subsequent draws.
    pub fn set_model(&self, queue: &wgpu::Queue, model: Mat4) {
        queue.write_buffer(&self.model_ubo, 0, bytemuck::bytes_of(&ModelUniform::new(model)));
    }

    pub(crate) fn record(&self, rpass: &mut wgpu::RenderPass<'_>) {
        if self.draw_count == 0 {
            return;
        }

        rpass.set_bind_group(1, &self.model_bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));

        match &self.index_buffer {
            Some(ibo) => {
                rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..self.draw_count, 0, 0..1);
            }
            None => rpass.draw(0..self.draw_count, 0..1),
        }
    }
}

impl Drop for GpuMesh {
    fn drop(&mut self) {
        log::debug!("releasing mesh '{}'", self.label);
        self.vertex_buffer.destroy();
        if let Some(ibo) = &self.index_buffer {
            ibo.destroy();
        }
        self.model_ubo.destroy();
    }
}

/// Upload sources accepted by [`MeshRenderer::upload`](super::MeshRenderer::upload).
pub enum MeshSource<'a> {
    Soup(&'a TriangleSoup),
    Indexed(&'a IndexedMesh),
}

impl<'a> From<&'a TriangleSoup> for MeshSource<'a> {
    fn from(m: &'a TriangleSoup) -> Self {
        MeshSource::Soup(m)
    }
}

impl<'a> From<&'a IndexedMesh> for MeshSource<'a> {
    fn from(m: &'a IndexedMesh) -> Self {
        MeshSource::Indexed(m)
    }
}
