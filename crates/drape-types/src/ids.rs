//! Strongly-typed identifiers for simulation and mesh entities.
//!
//! Springs, the spatial hash and the half-edge mesh all refer to
//! point masses by index into one contiguous store. Newtypes keep
//! those indices from being mixed with triangle or half-edge indices.

use serde::{Deserialize, Serialize};

/// Index into the point-mass store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticleId(pub u32);

/// Index into the mesh triangle arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriangleId(pub u32);

/// Index into the mesh half-edge arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HalfedgeId(pub u32);

/// Index into the mesh edge arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub u32);

impl ParticleId {
    /// Returns the raw index as `usize` for array indexing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl TriangleId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl HalfedgeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl EdgeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for ParticleId {
    fn from(val: usize) -> Self {
        debug_assert!(u32::try_from(val).is_ok(), "particle index {val} exceeds u32");
        Self(val as u32)
    }
}

impl From<u32> for ParticleId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}
