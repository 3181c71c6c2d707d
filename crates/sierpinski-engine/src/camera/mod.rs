//! Orbit camera and its configuration.

mod config;
mod orbit;

pub use config::CameraConfig;
pub use orbit::OrbitCamera;
