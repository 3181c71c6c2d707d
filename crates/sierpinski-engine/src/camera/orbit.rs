use glam::{Mat4, Vec3};

use super::config::CameraConfig;

/// Camera orbiting a fixed target on a horizontal circle.
///
/// State only changes through [`orbit`](Self::orbit), [`zoom_in`](Self::zoom_in)
/// and [`zoom_out`](Self::zoom_out). The field of view always stays within the
/// configured bounds.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    config: CameraConfig,
    position: Vec3,
    forward: Vec3,
    up: Vec3,
    fov_degrees: f32,
}

impl OrbitCamera {
    pub fn new(config: CameraConfig) -> Self {
        let fov_degrees = config
            .initial_fov_degrees
            .clamp(config.min_fov_degrees, config.max_fov_degrees);
        let up = config.up.normalize_or_zero();

        let mut cam = Self {
            config,
            position: Vec3::ZERO,
            forward: Vec3::NEG_Z,
            up,
            fov_degrees,
        };
        cam.orbit(0.0);
        cam
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.up
    }

    #[inline]
    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    /// Narrows the field of view by one step, stopping at the minimum.
    pub fn zoom_in(&mut self) {
        self.fov_degrees = (self.fov_degrees - self.config.zoom_step_degrees)
            .max(self.config.min_fov_degrees);
    }

    /// Widens the field of view by one step, stopping at the maximum.
    pub fn zoom_out(&mut self) {
        self.fov_degrees = (self.fov_degrees + self.config.zoom_step_degrees)
            .min(self.config.max_fov_degrees);
    }

    /// Places the camera on its orbit at `elapsed` seconds.
    ///
    /// The angle is reduced in `f64` before narrowing, so the step between
    /// frames stays smooth however long the clock has run.
    pub fn orbit(&mut self, elapsed: f64) {
        let (s, c) = elapsed.rem_euclid(std::f64::consts::TAU).sin_cos();
        let (s, c) = (s as f32, c as f32);
        let r = self.config.orbit_radius;
        self.position = self.config.target + Vec3::new(s * r, 0.0, c * r);
        self.forward = (self.config.target - self.position).normalize_or_zero();
    }

    /// Right-handed look-at transform toward the orbit target.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.config.target, self.up)
    }

    /// Right-handed perspective with a `[0, 1]` depth range.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_degrees.to_radians(),
            self.config.aspect_ratio,
            self.config.near,
            self.config.far,
        )
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}
