use glam::{Mat4, Vec3};

use sierpinski_engine::camera::{CameraConfig, OrbitCamera};

use crate::bindings::FrameSignals;

/// Render loop phase. `Closing` is terminal.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopPhase {
    Running,
    Closing,
}

/// Transforms for one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTransforms {
    pub view: Mat4,
    pub projection: Mat4,
    pub fractal_model: Mat4,
    pub torus_model: Mat4,
}

/// CPU-side scene state: loop phase plus camera.
///
/// Mutated only through [`step`](Self::step) and [`close`](Self::close).
#[derive(Debug, Clone)]
pub struct SceneState {
    phase: LoopPhase,
    camera: OrbitCamera,
    torus_offset: Vec3,
}

impl SceneState {
    pub fn new(camera: CameraConfig, torus_offset: Vec3) -> Self {
        Self {
            phase: LoopPhase::Running,
            camera: OrbitCamera::new(camera),
            torus_offset,
        }
    }

    #[inline]
    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    #[inline]
    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    /// External close (window closed).
    pub fn close(&mut self) {
        self.phase = LoopPhase::Closing;
    }

    /// Applies this frame's signals and computes transforms at `elapsed` seconds.
    ///
    /// Returns `None` once the loop is closing; nothing is drawn after that.
    pub fn step(&mut self, signals: FrameSignals, elapsed: f64) -> Option<FrameTransforms> {
        if self.phase == LoopPhase::Closing {
            return None;
        }

        if signals.quit {
            self.close();
            return None;
        }

        let fov_before = self.camera.fov_degrees();
        if signals.zoom_in {
            self.camera.zoom_in();
        }
        if signals.zoom_out {
            self.camera.zoom_out();
        }
        if self.camera.fov_degrees() != fov_before {
            log::trace!("fov {:.2} -> {:.2}", fov_before, self.camera.fov_degrees());
        }

        self.camera.orbit(elapsed);

        Some(FrameTransforms {
            view: self.camera.view_matrix(),
            projection: self.camera.projection_matrix(),
            fractal_model: Mat4::IDENTITY,
            torus_model: Mat4::from_translation(self.torus_offset),
        })
    }
}
