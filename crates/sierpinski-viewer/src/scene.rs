use anyhow::{Context, Result};
use glam::Vec3;
use winit::event::WindowEvent;

use sierpinski_engine::camera::CameraConfig;
use sierpinski_engine::core::{App, AppControl, FrameCtx};
use sierpinski_engine::device::Gpu;
use sierpinski_engine::geometry::{IndexedMesh, Tetrahedron, TorusParams, TriangleSoup};
use sierpinski_engine::paint::Color;
use sierpinski_engine::render::{GpuMesh, MeshRenderer};

use crate::bindings::KeyBindings;
use crate::state::{LoopPhase, SceneState};

/// Static scene description.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub fractal: Tetrahedron,
    pub fractal_depth: u32,
    pub fractal_color: Color,

    pub torus: TorusParams,
    pub torus_offset: Vec3,

    pub clear_color: Color,
    pub camera: CameraConfig,
    pub bindings: KeyBindings,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            fractal: Tetrahedron::new(
                Vec3::new(0.0, 0.5, 0.0),
                Vec3::new(-0.5, -0.5, 0.5),
                Vec3::new(0.5, -0.5, 0.5),
                Vec3::new(0.0, -0.5, -0.5),
            ),
            fractal_depth: 3,
            fractal_color: Color::rgb(1.0, 0.843, 0.0),

            torus: TorusParams::default(),
            torus_offset: Vec3::X,

            clear_color: Color::gray(0.1),
            camera: CameraConfig::default(),
            bindings: KeyBindings::default(),
        }
    }
}

/// Device-side resources, created in `init` and dropped on exit.
struct SceneGpu {
    renderer: MeshRenderer,
    fractal: GpuMesh,
    torus: GpuMesh,
}

/// The viewer application: a Sierpinski tetrahedron and a torus under an
/// orbiting camera.
pub struct Viewer {
    config: SceneConfig,
    state: SceneState,
    gpu: Option<SceneGpu>,
}

impl Viewer {
    pub fn new(config: SceneConfig) -> Result<Self> {
        config.camera.validate().context("invalid camera configuration")?;
        let state = SceneState::new(config.camera.clone(), config.torus_offset);
        Ok(Self {
            config,
            state,
            gpu: None,
        })
    }
}

/// Generates both meshes on the CPU.
pub fn build_meshes(config: &SceneConfig) -> Result<(TriangleSoup, IndexedMesh)> {
    let fractal =
        TriangleSoup::sierpinski(&config.fractal, config.fractal_depth, config.fractal_color);
    let torus = IndexedMesh::torus(&config.torus).context("torus generation failed")?;
    Ok((fractal, torus))
}

impl App for Viewer {
    fn init(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        let (fractal, torus) = build_meshes(&self.config)?;

        log::info!(
            "fractal: depth {}, {} vertices ({} triangles)",
            self.config.fractal_depth,
            fractal.vertex_count(),
            fractal.triangle_count()
        );
        log::info!(
            "torus: {} vertices, {} indices, {} seam vertices unreferenced",
            torus.vertex_count(),
            torus.index_count(),
            torus.vertex_count() - torus.referenced_vertex_count()
        );

        let renderer = MeshRenderer::new(gpu.device(), gpu.surface_format())?;
        let fractal = renderer.upload(gpu.device(), "fractal", &fractal)?;
        let torus = renderer.upload(gpu.device(), "torus", &torus)?;

        self.gpu = Some(SceneGpu {
            renderer,
            fractal,
            torus,
        });
        Ok(())
    }

    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        if let WindowEvent::CloseRequested = event {
            self.state.close();
        }
        match self.state.phase() {
            LoopPhase::Running => AppControl::Continue,
            LoopPhase::Closing => AppControl::Exit,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let signals = self.config.bindings.signals(ctx.input, ctx.input_frame);

        let Some(xf) = self.state.step(signals, ctx.time.elapsed) else {
            return AppControl::Exit;
        };
        let Some(scene) = self.gpu.as_mut() else {
            return AppControl::Continue;
        };

        let clear = self.config.clear_color;
        ctx.render(|frame| {
            scene.fractal.set_model(frame.queue, xf.fractal_model);
            scene.torus.set_model(frame.queue, xf.torus_model);
            scene.renderer.draw(
                frame,
                clear,
                xf.view,
                xf.projection,
                &[&scene.fractal, &scene.torus],
            );
        })
    }

    fn on_exit(&mut self) {
        self.state.close();
        if self.gpu.take().is_some() {
            log::info!("scene resources released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scene_mesh_sizes() {
        let (fractal, torus) = build_meshes(&SceneConfig::default()).expect("meshes");
        assert_eq!(fractal.vertex_count(), 768);
        assert_eq!(torus.vertex_count(), 961);
        assert_eq!(torus.index_count(), 5400);
        assert!(torus.is_well_formed());
    }

    #[test]
    fn default_fractal_is_gold() {
        let (fractal, _) = build_meshes(&SceneConfig::default()).expect("meshes");
        assert!(fractal.vertices.iter().all(|v| v.color == [1.0, 0.843, 0.0]));
    }

    #[test]
    fn invalid_camera_is_rejected() {
        let config = SceneConfig {
            camera: CameraConfig { min_fov_degrees: 80.0, ..Default::default() },
            ..Default::default()
        };
        assert!(Viewer::new(config).is_err());
    }

    #[test]
    fn close_request_exits() {
        let mut viewer = Viewer::new(SceneConfig::default()).expect("valid config");
        assert_eq!(viewer.on_window_event(&WindowEvent::CloseRequested), AppControl::Exit);
        assert_eq!(viewer.state.phase(), LoopPhase::Closing);
    }
}
