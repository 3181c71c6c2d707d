use glam::Vec3;

/// Orbit camera configuration.
///
/// Field-of-view values are vertical and in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    /// Distance from `target` in the horizontal plane.
    pub orbit_radius: f32,
    pub target: Vec3,
    pub up: Vec3,

    pub initial_fov_degrees: f32,
    pub min_fov_degrees: f32,
    pub max_fov_degrees: f32,

    /// Field-of-view change per applied zoom signal.
    pub zoom_step_degrees: f32,

    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            orbit_radius: 5.0,
            target: Vec3::ZERO,
            up: Vec3::Y,
            initial_fov_degrees: 20.0,
            min_fov_degrees: 1.0,
            max_fov_degrees: 70.0,
            zoom_step_degrees: 0.01,
            aspect_ratio: 800.0 / 600.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl CameraConfig {
    /// Validates ranges that would otherwise produce a singular projection.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.min_fov_degrees > 0.0 && self.min_fov_degrees <= self.max_fov_degrees,
            "invalid fov bounds [{}, {}]",
            self.min_fov_degrees,
            self.max_fov_degrees
        );
        anyhow::ensure!(self.max_fov_degrees < 180.0, "max fov must be below 180 degrees");
        anyhow::ensure!(self.aspect_ratio > 0.0, "aspect ratio must be positive");
        anyhow::ensure!(
            self.near > 0.0 && self.far > self.near,
            "invalid clip planes near={} far={}",
            self.near,
            self.far
        );
        anyhow::ensure!(self.up.length_squared() > 0.0, "up vector must be non-zero");
        Ok(())
    }
}
