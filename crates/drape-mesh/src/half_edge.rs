//! Half-edge connectivity for a regular cloth grid.
//!
//! Every link is an index into an arena owned by [`ClothMesh`], so the
//! structure can be cloned, serialized, and moved freely. Each grid quad
//!
//! ```text
//! A ---- B
//! |    / |
//! |   /  |
//! |  /   |
//! C ---- D
//! ```
//!
//! is split into the counter-clockwise triangles `(A, C, B)` and `(B, C, D)`.

use std::collections::HashMap;

use drape_types::{DrapeError, DrapeResult, EdgeId, HalfedgeId, ParticleId, TriangleId};
use serde::{Deserialize, Serialize};

/// A mesh triangle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Triangle {
    /// Corner particles in counter-clockwise order.
    pub vertices: [ParticleId; 3],
    /// Texture coordinates of each corner.
    pub uvs: [[f32; 2]; 3],
    /// Half-edge leaving `vertices[0]`.
    pub halfedge: HalfedgeId,
}

/// A directed edge inside one triangle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Halfedge {
    /// Origin particle.
    pub vertex: ParticleId,
    /// Next half-edge around the same triangle.
    pub next: HalfedgeId,
    /// Opposite half-edge in the neighbouring triangle. `None` on the boundary.
    pub twin: Option<HalfedgeId>,
    /// Undirected edge shared with the twin.
    pub edge: EdgeId,
    /// Owning triangle.
    pub triangle: TriangleId,
}

/// An undirected edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// One of the (at most two) half-edges along this edge.
    pub halfedge: HalfedgeId,
}

/// Half-edge mesh over a `num_width_points × num_height_points` grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClothMesh {
    /// Grid points along the width.
    pub num_width_points: usize,
    /// Grid points along the height.
    pub num_height_points: usize,
    /// Triangle arena.
    pub triangles: Vec<Triangle>,
    /// Half-edge arena, three consecutive entries per triangle.
    pub halfedges: Vec<Halfedge>,
    /// Edge arena.
    pub edges: Vec<Edge>,
    /// One outgoing half-edge per particle, if the particle touches a triangle.
    pub vertex_halfedges: Vec<Option<HalfedgeId>>,
}

impl ClothMesh {
    /// Number of half-edges [`ClothMesh::from_grid`] creates for the grid,
    /// or `None` if the count overflows `usize`.
    pub fn grid_halfedge_count(num_width_points: usize, num_height_points: usize) -> Option<usize> {
        num_width_points
            .saturating_sub(1)
            .checked_mul(num_height_points.saturating_sub(1))?
            .checked_mul(6)
    }

    /// Builds the mesh for a row-major grid of particles.
    ///
    /// Grids with a single row or column have no triangles. Every id must
    /// fit in `u32`: callers bound [`ClothMesh::grid_halfedge_count`] first.
    pub fn from_grid(num_width_points: usize, num_height_points: usize) -> Self {
        debug_assert!(
            Self::grid_halfedge_count(num_width_points, num_height_points)
                .is_some_and(|n| u32::try_from(n).is_ok()),
            "{num_width_points}x{num_height_points} grid exceeds the half-edge id range"
        );
        let quads_w = num_width_points.saturating_sub(1);
        let quads_h = num_height_points.saturating_sub(1);
        let tri_count = quads_w * quads_h * 2;

        let mut triangles = Vec::with_capacity(tri_count);
        for row in 0..quads_h {
            for col in 0..quads_w {
                let a = row * num_width_points + col;
                let b = a + 1;
                let c = a + num_width_points;
                let d = c + 1;

                let u_min = col as f32 / quads_w as f32;
                let u_max = (col + 1) as f32 / quads_w as f32;
                let v_min = row as f32 / quads_h as f32;
                let v_max = (row + 1) as f32 / quads_h as f32;

                let uv_a = [u_min, v_min];
                let uv_b = [u_max, v_min];
                let uv_c = [u_min, v_max];
                let uv_d = [u_max, v_max];

                let base = triangles.len() as u32 * 3;
                triangles.push(Triangle {
                    vertices: [a.into(), c.into(), b.into()],
                    uvs: [uv_a, uv_c, uv_b],
                    halfedge: HalfedgeId(base),
                });
                triangles.push(Triangle {
                    vertices: [b.into(), c.into(), d.into()],
                    uvs: [uv_b, uv_c, uv_d],
                    halfedge: HalfedgeId(base + 3),
                });
            }
        }

        // Directed (from, to) → half-edge, for twin lookup.
        let mut directed: HashMap<(ParticleId, ParticleId), HalfedgeId> =
            HashMap::with_capacity(tri_count * 3);
        for (t, tri) in triangles.iter().enumerate() {
            for k in 0..3 {
                let h = HalfedgeId((t * 3 + k) as u32);
                directed.insert((tri.vertices[k], tri.vertices[(k + 1) % 3]), h);
            }
        }

        let mut halfedges = Vec::with_capacity(tri_count * 3);
        let mut edges: Vec<Edge> = Vec::new();
        let mut edge_of: Vec<Option<EdgeId>> = vec![None; tri_count * 3];
        let mut vertex_halfedges = vec![None; num_width_points * num_height_points];

        for (t, tri) in triangles.iter().enumerate() {
            for k in 0..3 {
                let idx = t * 3 + k;
                let h = HalfedgeId(idx as u32);
                let from = tri.vertices[k];
                let to = tri.vertices[(k + 1) % 3];
                let twin = directed.get(&(to, from)).copied();

                let edge = match edge_of[idx] {
                    Some(e) => e,
                    None => {
                        let e = EdgeId(edges.len() as u32);
                        edges.push(Edge { halfedge: h });
                        if let Some(tw) = twin {
                            edge_of[tw.index()] = Some(e);
                        }
                        e
                    }
                };

                if vertex_halfedges[from.index()].is_none() {
                    vertex_halfedges[from.index()] = Some(h);
                }

                halfedges.push(Halfedge {
                    vertex: from,
                    next: HalfedgeId((t * 3 + (k + 1) % 3) as u32),
                    twin,
                    edge,
                    triangle: TriangleId(t as u32),
                });
            }
        }

        Self {
            num_width_points,
            num_height_points,
            triangles,
            halfedges,
            edges,
            vertex_halfedges,
        }
    }

    /// Number of particles the mesh indexes into.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.num_width_points * self.num_height_points
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn halfedge_count(&self) -> usize {
        self.halfedges.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the triangle with the given id.
    #[inline]
    pub fn triangle(&self, id: TriangleId) -> &Triangle {
        &self.triangles[id.index()]
    }

    /// Returns the half-edge with the given id.
    #[inline]
    pub fn halfedge(&self, id: HalfedgeId) -> &Halfedge {
        &self.halfedges[id.index()]
    }

    /// Opposite half-edge, or `None` on the boundary.
    #[inline]
    pub fn twin(&self, id: HalfedgeId) -> Option<HalfedgeId> {
        self.halfedges[id.index()].twin
    }

    /// Destination particle of a half-edge.
    #[inline]
    pub fn destination(&self, id: HalfedgeId) -> ParticleId {
        let next = self.halfedges[id.index()].next;
        self.halfedges[next.index()].vertex
    }

    /// Number of half-edges without a twin.
    pub fn boundary_halfedge_count(&self) -> usize {
        self.halfedges.iter().filter(|h| h.twin.is_none()).count()
    }

    /// Flat triangle index buffer `[t0v0, t0v1, t0v2, t1v0, ...]` for export.
    pub fn indices(&self) -> Vec<u32> {
        self.triangles
            .iter()
            .flat_map(|t| t.vertices.iter().map(|v| v.0))
            .collect()
    }

    /// Checks arena consistency.
    ///
    /// - every `next` cycle closes after three steps within one triangle
    /// - twins are mutual, reversed, and share an edge
    /// - all particle indices are in range
    pub fn validate(&self) -> DrapeResult<()> {
        let n = self.vertex_count();

        if self.halfedges.len() != self.triangles.len() * 3 {
            return Err(DrapeError::InvalidMesh(format!(
                "Half-edge count ({}) != 3 × triangle count ({})",
                self.halfedges.len(),
                self.triangles.len()
            )));
        }

        for (i, he) in self.halfedges.iter().enumerate() {
            let id = HalfedgeId(i as u32);

            if he.vertex.index() >= n {
                return Err(DrapeError::InvalidMesh(format!(
                    "Half-edge {} references particle {} (vertex count: {})",
                    i, he.vertex.0, n
                )));
            }

            let mut h = id;
            for _ in 0..3 {
                h = self.halfedges[h.index()].next;
                if self.halfedges[h.index()].triangle != he.triangle {
                    return Err(DrapeError::InvalidMesh(format!(
                        "Half-edge {} leaves its triangle while following next",
                        i
                    )));
                }
            }
            if h != id {
                return Err(DrapeError::InvalidMesh(format!(
                    "Half-edge {} does not close a 3-cycle",
                    i
                )));
            }

            if let Some(tw) = he.twin {
                let twin = &self.halfedges[tw.index()];
                if twin.twin != Some(id) {
                    return Err(DrapeError::InvalidMesh(format!(
                        "Twin of half-edge {} does not point back",
                        i
                    )));
                }
                if twin.vertex != self.destination(id) || self.destination(tw) != he.vertex {
                    return Err(DrapeError::InvalidMesh(format!(
                        "Half-edge {} and its twin are not reversed",
                        i
                    )));
                }
                if twin.edge != he.edge {
                    return Err(DrapeError::InvalidMesh(format!(
                        "Half-edge {} and its twin do not share an edge",
                        i
                    )));
                }
            }
        }

        Ok(())
    }
}
