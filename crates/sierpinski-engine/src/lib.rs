//! Sierpinski engine crate.
//!
//! Platform runtime, GPU plumbing, and the procedural geometry and camera used
//! by the viewer.

pub mod camera;
pub mod core;
pub mod device;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod time;
pub mod window;
