//! Vertex normal computation for the cloth mesh.
//!
//! Accumulates area-weighted face normals at each corner and
//! normalizes the result.

use drape_types::Vec3;

use crate::half_edge::{ClothMesh, Triangle};

/// Unnormalized face normal; its length is twice the triangle area.
#[inline]
pub fn face_normal(triangle: &Triangle, positions: &[Vec3]) -> Vec3 {
    let [a, b, c] = triangle.vertices;
    let pa = positions[a.index()];
    let e1 = positions[b.index()] - pa;
    let e2 = positions[c.index()] - pa;
    e1.cross(e2)
}

/// Area-weighted vertex normals for the current particle positions.
///
/// `positions` must hold one entry per grid point. Particles that touch
/// no triangle, or whose accumulated normal vanishes, get `Vec3::ZERO`.
pub fn compute_vertex_normals(mesh: &ClothMesh, positions: &[Vec3]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];

    for tri in &mesh.triangles {
        let n = face_normal(tri, positions);
        for v in tri.vertices {
            normals[v.index()] += n;
        }
    }

    for n in &mut normals {
        *n = n.normalize_or_zero();
    }
    normals
}
