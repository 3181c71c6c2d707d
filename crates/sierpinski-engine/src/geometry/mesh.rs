use super::vertex::Vertex;

/// Non-indexed mesh: every consecutive vertex triple is one triangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleSoup {
    pub vertices: Vec<Vertex>,
}

impl TriangleSoup {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Flat interleaved view (`x, y, z, r, g, b, ...`).
    #[inline]
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn triangles(&self) -> impl Iterator<Item = &[Vertex]> {
        self.vertices.chunks_exact(3)
    }
}

/// Vertex grid plus a triangle index list.
///
/// Invariants: `indices.len() % 3 == 0` and every index is `< vertices.len()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl IndexedMesh {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[inline]
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Number of distinct vertices named by at least one index.
    pub fn referenced_vertex_count(&self) -> usize {
        let mut seen = vec![false; self.vertices.len()];
        for &i in &self.indices {
            if let Some(slot) = seen.get_mut(i as usize) {
                *slot = true;
            }
        }
        seen.into_iter().filter(|&s| s).count()
    }

    /// Checks the index invariants.
    pub fn is_well_formed(&self) -> bool {
        let n = self.vertices.len();
        self.indices.len() % 3 == 0 && self.indices.iter().all(|&i| (i as usize) < n)
    }
}
