//! # drape-contact
//!
//! Collision handling for the cloth.
//!
//! Two independent mechanisms live here:
//! 1. **Self-collision**: a [`SpatialHashIndex`] rebuilt every substep
//!    bins point masses into cells, and [`SelfCollision`] pushes apart
//!    particles of the same cell that are closer than twice the cloth
//!    thickness.
//! 2. **External primitives**: anything implementing [`CollisionObject`]
//!    resolves its own contact against a single point mass. [`Plane`] and
//!    [`Sphere`] are provided.

pub mod collider;
pub mod plane;
pub mod self_collision;
pub mod spatial_hash;
pub mod sphere;

pub use collider::CollisionObject;
pub use plane::Plane;
pub use self_collision::SelfCollision;
pub use spatial_hash::{CellKey, SpatialHashIndex};
pub use sphere::Sphere;
