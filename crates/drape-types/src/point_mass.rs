//! The point mass: one particle of the cloth.

use glam::Vec3;

/// A simulated particle.
///
/// Velocity is never stored explicitly. Verlet integration recovers it
/// from `position - last_position`.
#[derive(Debug, Clone, PartialEq)]
pub struct PointMass {
    /// Current location.
    pub position: Vec3,
    /// Location at the previous substep.
    pub last_position: Vec3,
    /// Location at construction, restored by `reset`.
    pub start_position: Vec3,
    /// Force accumulated during the current substep.
    pub forces: Vec3,
    /// Pinned particles never move.
    pub pinned: bool,
}

impl PointMass {
    /// Creates a particle at rest at `position`.
    pub fn new(position: Vec3, pinned: bool) -> Self {
        Self {
            position,
            last_position: position,
            start_position: position,
            forces: Vec3::ZERO,
            pinned,
        }
    }

    /// Implicit Verlet velocity over a substep of length `delta_t`.
    #[inline]
    pub fn velocity(&self, delta_t: f32) -> Vec3 {
        (self.position - self.last_position) / delta_t
    }

    /// Restores the construction-time position and discards velocity.
    pub fn reset(&mut self) {
        self.position = self.start_position;
        self.last_position = self.start_position;
        self.forces = Vec3::ZERO;
    }
}
