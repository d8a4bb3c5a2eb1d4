//! # drape-mesh
//!
//! Renderable cloth surface derived once from the point-mass grid.
//!
//! ## Key Types
//!
//! - [`ClothMesh`]: half-edge connectivity stored in index arenas
//!   (triangles, half-edges, edges). Static after construction.
//! - [`normals::compute_vertex_normals`]: area-weighted shading normals
//!   from the current particle positions.
//!
//! Nothing in this crate feeds back into the physics step.

pub mod half_edge;
pub mod normals;

pub use half_edge::{ClothMesh, Edge, Halfedge, Triangle};
