//! Procedural mesh generation.
//!
//! Two mesh forms are produced:
//! - [`TriangleSoup`]: independent vertex triples (the Sierpinski solid)
//! - [`IndexedMesh`]: vertex grid plus triangle indices (the torus)
//!
//! Generators are pure CPU code and never touch the GPU.

mod fractal;
mod mesh;
mod torus;
mod vertex;

pub use fractal::{sierpinski, sierpinski_vertex_count, Tetrahedron};
pub use mesh::{IndexedMesh, TriangleSoup};
pub use torus::TorusParams;
pub use vertex::Vertex;
