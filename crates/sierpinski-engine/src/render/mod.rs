//! GPU rendering subsystem.
//!
//! Meshes are uploaded once through [`MeshRenderer::upload`] and drawn every
//! frame with a shared camera block. World space is right-handed, +Y up.

mod depth;
mod frame;
mod mesh;
mod mesh_renderer;
mod uniforms;

pub use frame::RenderFrame;
pub use mesh::{GpuMesh, MeshSource};
pub use mesh_renderer::MeshRenderer;
pub use uniforms::CameraUniform;
