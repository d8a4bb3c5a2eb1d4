//! # drape-types
//!
//! Shared types, identifiers, error types, and physical constants
//! for the Drape mass-spring cloth simulator.
//!
//! Besides the vocabulary types, this crate owns [`PointMass`], the
//! particle record every other crate reads and writes.

pub mod constants;
pub mod error;
pub mod ids;
pub mod point_mass;

pub use error::{DrapeError, DrapeResult};
pub use ids::{EdgeId, HalfedgeId, ParticleId, TriangleId};
pub use point_mass::PointMass;

// glam is the canonical vector type for every crate in the workspace.
pub use glam::Vec3;
