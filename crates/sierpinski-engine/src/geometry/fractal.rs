use glam::{Mat3, Vec3};

use crate::paint::Color;

use super::mesh::TriangleSoup;
use super::vertex::Vertex;

/// Tetrahedron given by its four corners.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tetrahedron {
    pub corners: [Vec3; 4],
}

impl Tetrahedron {
    #[inline]
    pub const fn new(a: Vec3, b: Vec3, c: Vec3, d: Vec3) -> Self {
        Self { corners: [a, b, c, d] }
    }

    /// The four faces in emission order.
    pub fn faces(&self) -> [[Vec3; 3]; 4] {
        let [v1, v2, v3, v4] = self.corners;
        [[v1, v2, v3], [v1, v3, v4], [v1, v2, v4], [v2, v3, v4]]
    }

    /// Corner cells of one midpoint subdivision step.
    ///
    /// Cell `k` keeps corner `k` and the midpoints of its three edges; the
    /// central octahedron is dropped.
    pub fn corner_cells(&self) -> [Tetrahedron; 4] {
        let [v1, v2, v3, v4] = self.corners;
        let m12 = (v1 + v2) / 2.0;
        let m13 = (v1 + v3) / 2.0;
        let m14 = (v1 + v4) / 2.0;
        let m23 = (v2 + v3) / 2.0;
        let m24 = (v2 + v4) / 2.0;
        let m34 = (v3 + v4) / 2.0;

        [
            Tetrahedron::new(v1, m12, m13, m14),
            Tetrahedron::new(m12, v2, m23, m24),
            Tetrahedron::new(m13, m23, v3, m34),
            Tetrahedron::new(m14, m24, m34, v4),
        ]
    }

    /// Barycentric containment test with tolerance `eps`.
    ///
    /// Flat tetrahedra contain nothing. Flatness is judged against the edge
    /// lengths, so the test works at any scale.
    pub fn contains(&self, p: Vec3, eps: f32) -> bool {
        let [a, b, c, d] = self.corners;
        let (ab, ac, ad) = (b - a, c - a, d - a);
        let m = Mat3::from_cols(ab, ac, ad);
        let scale = ab.length() * ac.length() * ad.length();
        let det = m.determinant().abs();
        if det.is_nan() || det <= scale * 1e-6 {
            return false;
        }
        let l = m.inverse() * (p - a);
        l.x >= -eps && l.y >= -eps && l.z >= -eps && l.x + l.y + l.z <= 1.0 + eps
    }
}

/// Vertex count of a Sierpinski tetrahedron at `depth`: `12 * 4^depth`.
///
/// Returns `None` when the count does not fit in `usize`.
pub fn sierpinski_vertex_count(depth: u32) -> Option<usize> {
    4u64.checked_pow(depth)
        .and_then(|cells| cells.checked_mul(12))
        .and_then(|n| usize::try_from(n).ok())
}

/// Appends the Sierpinski tetrahedron of `tetra` at `depth` to `out`.
///
/// Leaf cells are emitted depth-first in corner order; each leaf contributes its
/// four faces as flat-colored triangles. Depth is not bounded here.
pub fn sierpinski(tetra: &Tetrahedron, depth: u32, color: Color, out: &mut Vec<Vertex>) {
    if depth == 0 {
        for face in tetra.faces() {
            out.extend(face.iter().map(|&p| Vertex::new(p, color)));
        }
        return;
    }

    for cell in tetra.corner_cells() {
        sierpinski(&cell, depth - 1, color, out);
    }
}

impl TriangleSoup {
    /// Builds a Sierpinski tetrahedron mesh.
    pub fn sierpinski(tetra: &Tetrahedron, depth: u32, color: Color) -> Self {
        let mut vertices = Vec::new();
        if let Some(n) = sierpinski_vertex_count(depth) {
            vertices.reserve(n);
        }
        sierpinski(tetra, depth, color, &mut vertices);
        Self { vertices }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> Tetrahedron {
        Tetrahedron::new(
            Vec3::new(0.0, 0.5, 0.0),
            Vec3::new(-0.5, -0.5, 0.5),
            Vec3::new(0.5, -0.5, 0.5),
            Vec3::new(0.0, -0.5, -0.5),
        )
    }

    const GOLD: Color = Color::rgb(1.0, 0.843, 0.0);

    #[test]
    fn depth_zero_emits_four_faces_in_order() {
        let t = unit();
        let soup = TriangleSoup::sierpinski(&t, 0, GOLD);
        assert_eq!(soup.vertex_count(), 12);

        let [v1, v2, v3, v4] = t.corners;
        let expected = [v1, v2, v3, v1, v3, v4, v1, v2, v4, v2, v3, v4];
        for (vertex, want) in soup.vertices.iter().zip(expected) {
            assert_eq!(vertex.position(), want);
            assert_eq!(vertex.color, GOLD.to_array());
        }
    }

    #[test]
    fn vertex_count_is_twelve_times_four_pow_depth() {
        for d in 0..=3 {
            let soup = TriangleSoup::sierpinski(&unit(), d, GOLD);
            assert_eq!(soup.vertex_count(), 12 * 4usize.pow(d));
            assert_eq!(sierpinski_vertex_count(d), Some(soup.vertex_count()));
        }
        assert_eq!(TriangleSoup::sierpinski(&unit(), 1, GOLD).vertex_count(), 48);
        assert_eq!(TriangleSoup::sierpinski(&unit(), 3, GOLD).vertex_count(), 768);
    }

    #[test]
    fn vertex_count_overflow_is_none() {
        assert_eq!(sierpinski_vertex_count(64), None);
    }

    #[test]
    fn every_vertex_stays_inside_source_tetrahedron() {
        let t = unit();
        let soup = TriangleSoup::sierpinski(&t, 3, GOLD);
        assert!(soup.vertices.iter().all(|v| t.contains(v.position(), 1e-5)));
    }

    #[test]
    fn color_is_uniform_at_any_depth() {
        let soup = TriangleSoup::sierpinski(&unit(), 2, GOLD);
        assert!(soup.vertices.iter().all(|v| v.color == GOLD.to_array()));
    }

    #[test]
    fn first_leaf_is_corner_one_cell() {
        // Depth-first corner order: the first 12 vertices belong to the cell at v1.
        let t = unit();
        let soup = TriangleSoup::sierpinski(&t, 1, GOLD);
        let cell = t.corner_cells()[0];
        let leaf = TriangleSoup::sierpinski(&cell, 0, GOLD);
        assert_eq!(&soup.vertices[..12], &leaf.vertices[..]);
        assert_eq!(soup.vertices[0].position(), t.corners[0]);
    }

    #[test]
    fn output_is_deterministic() {
        let a = TriangleSoup::sierpinski(&unit(), 3, GOLD);
        let b = TriangleSoup::sierpinski(&unit(), 3, GOLD);
        assert_eq!(a, b);
    }

    #[test]
    fn appends_after_existing_vertices() {
        let mut out = vec![Vertex::default()];
        sierpinski(&unit(), 0, GOLD, &mut out);
        assert_eq!(out.len(), 13);
        assert_eq!(out[0], Vertex::default());
    }

    #[test]
    fn contains_works_at_small_scale() {
        let [a, b, c, d] = unit().corners;
        let tiny = Tetrahedron::new(a * 0.002, b * 0.002, c * 0.002, d * 0.002);
        let centroid = (tiny.corners.iter().copied().sum::<Vec3>()) / 4.0;
        assert!(tiny.contains(centroid, 1e-5));
        assert!(!tiny.contains(centroid + Vec3::Y, 1e-5));
    }

    #[test]
    fn flat_tetrahedron_contains_nothing() {
        let flat = Tetrahedron::new(Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::new(1.0, 1.0, 0.0));
        assert!(!flat.contains(Vec3::new(0.25, 0.25, 0.0), 1e-5));
    }

    #[test]
    fn contains_rejects_outside_point() {
        assert!(!unit().contains(Vec3::new(0.0, 1.0, 0.0), 1e-5));
        assert!(unit().contains(Vec3::new(0.0, -0.25, 0.1), 1e-5));
    }
}
