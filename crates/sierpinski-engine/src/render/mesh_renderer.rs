use anyhow::{Context, Result};
use glam::Mat4;

use crate::geometry::Vertex;
use crate::paint::Color;

use super::depth::DepthBuffer;
use super::mesh::{GpuMesh, MeshSource};
use super::uniforms::{uniform_layout_entry, CameraUniform, ModelUniform};
use super::RenderFrame;

/// Renders static vertex-colored meshes with depth testing.
///
/// One pipeline serves every mesh: the camera block is bound once per pass and
/// each [`GpuMesh`] brings its own model block.
pub struct MeshRenderer {
    pipeline: wgpu::RenderPipeline,
    model_layout: wgpu::BindGroupLayout,

    camera_ubo: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,

    depth: Option<DepthBuffer>,
}

impl MeshRenderer {
    /// Builds the pipeline for `surface_format`.
    ///
    /// Fails when the shader does not compile or the pipeline does not link.
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Result<Self> {
        Self::with_shader(device, surface_format, include_str!("shaders/mesh.wgsl"))
    }

    fn with_shader(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        wgsl: &str,
    ) -> Result<Self> {
        let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sierpinski mesh shader"),
            source: wgpu::ShaderSource::Wgsl(wgsl.into()),
        });
        let rejected = pollster::block_on(scope.pop());
        check_compilation(&shader, rejected).context("mesh shader failed to compile")?;

        let camera_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sierpinski camera bgl"),
            entries: &[uniform_layout_entry::<CameraUniform>()],
        });

        let model_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sierpinski model bgl"),
            entries: &[uniform_layout_entry::<ModelUniform>()],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sierpinski mesh pipeline layout"),
            bind_group_layouts: &[&camera_layout, &model_layout],
            immediate_size: 0,
        });

        let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sierpinski mesh pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            // Fractal faces are emitted with mixed winding, so nothing is culled.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: Some(wgpu::DepthStencilState {
                format: DepthBuffer::FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        });
        if let Some(err) = pollster::block_on(scope.pop()) {
            anyhow::bail!("mesh pipeline failed to link: {err}");
        }

        let camera_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("sierpinski camera ubo"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sierpinski camera bind group"),
            layout: &camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_ubo.as_entire_binding(),
            }],
        });

        Ok(Self {
            pipeline,
            model_layout,
            camera_ubo,
            camera_bind_group,
            depth: None,
        })
    }

    /// Uploads a mesh once; the returned handle owns its device buffers.
    pub fn upload<'m>(
        &self,
        device: &wgpu::Device,
        label: &str,
        source: impl Into<MeshSource<'m>>,
    ) -> Result<GpuMesh> {
        match source.into() {
            MeshSource::Soup(soup) => {
                GpuMesh::new(device, &self.model_layout, label, &soup.vertices, None)
            }
            MeshSource::Indexed(mesh) => {
                anyhow::ensure!(
                    mesh.is_well_formed(),
                    "mesh '{label}' has out-of-range or incomplete indices"
                );
                GpuMesh::new(
                    device,
                    &self.model_layout,
                    label,
                    &mesh.vertices,
                    Some(&mesh.indices),
                )
            }
        }
    }

    /// Clears color and depth, then draws `meshes` in order.
    pub fn draw(
        &mut self,
        frame: &mut RenderFrame<'_>,
        clear: Color,
        view: Mat4,
        projection: Mat4,
        meshes: &[&GpuMesh],
    ) {
        frame.queue.write_buffer(
            &self.camera_ubo,
            0,
            bytemuck::bytes_of(&CameraUniform::new(view, projection)),
        );

        if self.depth.as_ref().map(DepthBuffer::size) != Some(frame.size) {
            log::debug!("recreating depth buffer at {}x{}", frame.size.0, frame.size.1);
            self.depth = Some(DepthBuffer::new(frame.device, frame.size));
        }
        let Some(depth) = self.depth.as_ref() else { return };

        let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("sierpinski mesh pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: frame.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth.view(),
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.camera_bind_group, &[]);

        for mesh in meshes {
            mesh.record(&mut rpass);
        }
    }
}

/// Logs shader warnings and fails on any error, either reported by the
/// compiler or caught by the validation scope around module creation.
fn check_compilation(shader: &wgpu::ShaderModule, rejected: Option<wgpu::Error>) -> Result<()> {
    let info = pollster::block_on(shader.get_compilation_info());

    let mut errors = Vec::new();
    for msg in &info.messages {
        let at = msg
            .location
            .as_ref()
            .map(|l| format!("{}:{}: ", l.line_number, l.line_position))
            .unwrap_or_default();

        match msg.message_type {
            wgpu::CompilationMessageType::Error => errors.push(format!("{at}{}", msg.message)),
            wgpu::CompilationMessageType::Warning => log::warn!("shader: {at}{}", msg.message),
            wgpu::CompilationMessageType::Info => log::debug!("shader: {at}{}", msg.message),
        }
    }

    if errors.is_empty() {
        if let Some(err) = rejected {
            errors.push(err.to_string());
        }
    }

    if !errors.is_empty() {
        anyhow::bail!("{}", errors.join("\n"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{IndexedMesh, TorusParams, TriangleSoup};

    const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    fn device() -> (wgpu::Device, wgpu::Queue) {
        wgpu::Device::noop(&wgpu::DeviceDescriptor::default())
    }

    fn soup(n: usize) -> TriangleSoup {
        TriangleSoup { vertices: vec![Vertex::new(glam::Vec3::ZERO, Color::WHITE); n] }
    }

    #[test]
    fn builds_with_bundled_shader() {
        let (device, _queue) = device();
        assert!(MeshRenderer::new(&device, FORMAT).is_ok());
    }

    #[test]
    fn invalid_wgsl_is_an_error() {
        let (device, _queue) = device();
        let err = MeshRenderer::with_shader(&device, FORMAT, "fn vs_main( -> {")
            .err()
            .expect("syntax error must fail");
        assert!(format!("{err:#}").contains("failed to compile"));
    }

    #[test]
    fn missing_entry_point_fails_to_link() {
        let (device, _queue) = device();
        let vertex_only = include_str!("shaders/mesh.wgsl").replace("fn fs_main", "fn fs_other");
        let err = MeshRenderer::with_shader(&device, FORMAT, &vertex_only)
            .err()
            .expect("missing fragment entry point must fail");
        assert!(err.to_string().contains("failed to link"));
    }

    #[test]
    fn upload_counts_vertices_or_indices() {
        let (device, _queue) = device();
        let renderer = MeshRenderer::new(&device, FORMAT).expect("renderer");

        let flat = renderer.upload(&device, "soup", &soup(6)).expect("soup");
        assert!(!flat.is_indexed());
        assert_eq!(flat.draw_count(), 6);

        let torus = IndexedMesh::torus(&TorusParams { sides: 4, rings: 4, ..TorusParams::default() })
            .expect("torus");
        let indexed = renderer.upload(&device, "torus", &torus).expect("torus");
        assert!(indexed.is_indexed());
        assert_eq!(indexed.draw_count(), 96);
        assert_eq!(indexed.label(), "torus");
    }

    #[test]
    fn upload_rejects_out_of_range_index() {
        let (device, _queue) = device();
        let renderer = MeshRenderer::new(&device, FORMAT).expect("renderer");

        let mesh = IndexedMesh { vertices: soup(3).vertices, indices: vec![0, 1, 3] };
        assert!(renderer.upload(&device, "bad", &mesh).is_err());
    }

    #[test]
    fn upload_rejects_partial_triangle() {
        let (device, _queue) = device();
        let renderer = MeshRenderer::new(&device, FORMAT).expect("renderer");

        let mesh = IndexedMesh { vertices: soup(3).vertices, indices: vec![0, 1, 2, 0] };
        assert!(renderer.upload(&device, "bad", &mesh).is_err());
    }

    #[test]
    fn draws_degenerate_torus_without_error() {
        let (device, queue) = device();
        let mut renderer = MeshRenderer::new(&device, FORMAT).expect("renderer");

        let empty = IndexedMesh::torus(&TorusParams { sides: 0, ..TorusParams::default() })
            .expect("empty torus");
        let empty = renderer.upload(&device, "empty", &empty).expect("empty torus");
        assert_eq!(empty.draw_count(), 0);
        let tri = renderer.upload(&device, "tri", &soup(3)).expect("triangle");

        let target = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("test target"),
            size: wgpu::Extent3d { width: 8, height: 8, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = target.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor::default());

        let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
        renderer.draw(
            &mut RenderFrame {
                device: &device,
                queue: &queue,
                encoder: &mut encoder,
                color_view: &view,
                size: (8, 8),
            },
            Color::gray(0.1),
            Mat4::IDENTITY,
            Mat4::IDENTITY,
            &[&empty, &tri],
        );
        queue.submit([encoder.finish()]);

        assert!(pollster::block_on(scope.pop()).is_none());
    }
}
