use std::f32::consts::TAU;

use anyhow::Result;

use glam::Vec3;

use crate::paint::Color;

use super::mesh::IndexedMesh;
use super::vertex::Vertex;

/// Torus generation parameters.
///
/// The ring axis is +Z; `outer_radius` is the distance from the axis to the tube
/// center and `inner_radius` the tube radius.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TorusParams {
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Segments around the tube cross-section.
    pub sides: u32,
    /// Segments around the ring.
    pub rings: u32,
}

impl Default for TorusParams {
    fn default() -> Self {
        Self {
            inner_radius: 0.15,
            outer_radius: 0.35,
            sides: 30,
            rings: 30,
        }
    }
}

impl TorusParams {
    #[inline]
    fn is_degenerate(&self) -> bool {
        self.sides == 0 || self.rings == 0
    }

    /// Grid vertex count: `(rings + 1) * (sides + 1)`.
    pub fn vertex_count(&self) -> usize {
        if self.is_degenerate() {
            return 0;
        }
        (self.rings as usize + 1).saturating_mul(self.sides as usize + 1)
    }

    /// Index count: two triangles per cell.
    pub fn index_count(&self) -> usize {
        if self.is_degenerate() {
            return 0;
        }
        (self.rings as usize)
            .saturating_mul(self.sides as usize)
            .saturating_mul(6)
    }

    /// Whether every grid vertex is addressable by a `u32` index.
    pub fn fits_u32_indices(&self) -> bool {
        (u64::from(self.rings) + 1)
            .checked_mul(u64::from(self.sides) + 1)
            .is_some_and(|n| n <= u64::from(u32::MAX) + 1)
    }
}

/// Generates the `(rings + 1) x (sides + 1)` vertex grid, row-major by ring.
///
/// The last row and column repeat the first so the seam closes exactly.
fn torus_vertices(params: &TorusParams) -> Vec<Vertex> {
    if params.is_degenerate() {
        return Vec::new();
    }

    let ring_step = TAU / params.rings as f32;
    let side_step = TAU / params.sides as f32;
    let (r1, r2) = (params.outer_radius, params.inner_radius);

    let mut out = Vec::with_capacity(params.vertex_count());
    for i in 0..=params.rings {
        let (sin_theta, cos_theta) = (i as f32 * ring_step).sin_cos();
        for j in 0..=params.sides {
            let (sin_phi, cos_phi) = (j as f32 * side_step).sin_cos();
            let rho = r1 + r2 * cos_phi;
            let p = Vec3::new(rho * cos_theta, rho * sin_theta, r2 * sin_phi);
            out.push(Vertex::new(p, Color::WHITE));
        }
    }
    out
}

/// Generates the triangle list for the grid produced by [`torus_vertices`].
///
/// Neighbors wrap with `mod rings` / `mod sides` rather than using the seam
/// row/column, so the last row and column of the grid are never referenced.
fn torus_indices(params: &TorusParams) -> Vec<u32> {
    if params.is_degenerate() {
        return Vec::new();
    }

    // In range once `fits_u32_indices` holds.
    let (rings, sides) = (params.rings, params.sides);
    let at = |i: u32, j: u32| i * (sides + 1) + j;

    let mut out = Vec::with_capacity(params.index_count());
    for i in 0..rings {
        let next_i = (i + 1) % rings;
        for j in 0..sides {
            let next_j = (j + 1) % sides;

            out.extend_from_slice(&[at(i, j), at(next_i, j), at(next_i, next_j)]);
            out.extend_from_slice(&[at(i, j), at(next_i, next_j), at(i, next_j)]);
        }
    }
    out
}

impl IndexedMesh {
    /// Builds a white torus mesh.
    ///
    /// Fails before allocating when the grid is too large for `u32` indices.
    pub fn torus(params: &TorusParams) -> Result<Self> {
        anyhow::ensure!(
            params.fits_u32_indices(),
            "torus grid of {} x {} vertices exceeds the u32 index range",
            u64::from(params.rings) + 1,
            u64::from(params.sides) + 1
        );
        if params.is_degenerate() {
            log::debug!("torus with zero sides or rings: {params:?}; emitting empty mesh");
        }
        Ok(Self {
            vertices: torus_vertices(params),
            indices: torus_indices(params),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(rings: u32, sides: u32) -> TorusParams {
        TorusParams { inner_radius: 0.15, outer_radius: 0.35, sides, rings }
    }

    #[test]
    fn default_resolution_counts() {
        let mesh = IndexedMesh::torus(&params(30, 30)).expect("torus");
        assert_eq!(mesh.vertex_count(), 961);
        assert_eq!(mesh.index_count(), 5400);
        assert!(mesh.is_well_formed());
    }

    #[test]
    fn small_grid_counts_and_range() {
        let mesh = IndexedMesh::torus(&params(4, 4)).expect("torus");
        assert_eq!(mesh.vertex_count(), 25);
        assert_eq!(mesh.index_count(), 96);
        assert!(mesh.indices.iter().all(|&i| i <= 24));
        assert_eq!(mesh.indices.len() % 3, 0);
    }

    #[test]
    fn counts_match_params_for_uneven_grid() {
        let p = params(7, 3);
        let mesh = IndexedMesh::torus(&p).expect("torus");
        assert_eq!(mesh.vertex_count(), 8 * 4);
        assert_eq!(mesh.index_count(), 7 * 3 * 6);
        assert_eq!(p.vertex_count(), mesh.vertex_count());
        assert_eq!(p.index_count(), mesh.index_count());
    }

    #[test]
    fn vertices_lie_on_torus_surface() {
        let p = params(30, 30);
        for v in torus_vertices(&p) {
            let pos = v.position();
            let rho = (pos.x * pos.x + pos.y * pos.y).sqrt();
            assert!(rho >= p.outer_radius - p.inner_radius - 1e-5);
            assert!(rho <= p.outer_radius + p.inner_radius + 1e-5);

            // Distance to the tube center circle equals the tube radius.
            let tube = ((rho - p.outer_radius).powi(2) + pos.z * pos.z).sqrt();
            assert!((tube - p.inner_radius).abs() < 1e-5);
        }
    }

    #[test]
    fn vertices_are_white() {
        assert!(torus_vertices(&params(5, 6)).iter().all(|v| v.color == [1.0, 1.0, 1.0]));
    }

    #[test]
    fn row_major_storage_order() {
        let p = params(4, 4);
        let verts = torus_vertices(&p);
        // i = 1, j = 0: theta = 90deg, phi = 0 -> (0, R + r, 0)
        let v = verts[5].position();
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - (p.outer_radius + p.inner_radius)).abs() < 1e-6);
        assert!(v.z.abs() < 1e-6);
    }

    #[test]
    fn seam_row_and_column_are_never_referenced() {
        let (rings, sides) = (4u32, 4u32);
        let mesh = IndexedMesh::torus(&params(rings, sides)).expect("torus");
        for &idx in &mesh.indices {
            let (i, j) = (idx / (sides + 1), idx % (sides + 1));
            assert!(i < rings);
            assert!(j < sides);
        }
        assert_eq!(mesh.referenced_vertex_count(), (rings * sides) as usize);
    }

    #[test]
    fn seam_duplicates_first_row() {
        let p = params(6, 5);
        let verts = torus_vertices(&p);
        let stride = p.sides as usize + 1;
        for j in 0..stride {
            let first = verts[j].position();
            let last = verts[p.rings as usize * stride + j].position();
            assert!((first - last).length() < 1e-5);
        }
    }

    #[test]
    fn first_cell_triangles() {
        let mesh = IndexedMesh::torus(&params(4, 4)).expect("torus");
        assert_eq!(&mesh.indices[..6], &[0, 5, 6, 0, 6, 1]);
    }

    #[test]
    fn zero_resolution_is_empty() {
        assert!(IndexedMesh::torus(&params(0, 30)).expect("torus").vertices.is_empty());
        assert!(IndexedMesh::torus(&params(30, 0)).expect("torus").indices.is_empty());
    }

    #[test]
    fn index_range_limit_is_exact() {
        assert!(params(65_535, 65_535).fits_u32_indices());
        assert!(!params(65_536, 65_535).fits_u32_indices());
        assert!(!params(u32::MAX, u32::MAX).fits_u32_indices());
    }

    #[test]
    fn oversized_grid_is_rejected_before_allocation() {
        let err = IndexedMesh::torus(&params(u32::MAX, 1)).unwrap_err();
        assert!(err.to_string().contains("u32 index range"));
    }
}
