//! Self-collision resolution between particles of one cloth.

use drape_types::{PointMass, Vec3};

use crate::spatial_hash::SpatialHashIndex;

/// Pushes apart point masses that share a spatial-hash cell and are
/// closer than twice the cloth thickness.
///
/// Spring-connected neighbours are not excluded.
#[derive(Debug, Clone, Copy)]
pub struct SelfCollision {
    /// Cloth thickness; contacts begin at `2 · thickness`.
    thickness: f32,
}

impl SelfCollision {
    /// Creates a resolver for a cloth of the given thickness.
    pub fn new(thickness: f32) -> Self {
        Self { thickness }
    }

    /// Separation below which two particles are in contact.
    #[inline]
    pub fn contact_distance(&self) -> f32 {
        2.0 * self.thickness
    }

    /// Resolve contacts for the point mass at `index`.
    ///
    /// Corrections from every neighbour in range are averaged and then
    /// scaled by `1 / simulation_steps`, so a full separation is reached
    /// only over a whole frame. Pinned particles are never moved.
    ///
    /// Returns the number of neighbours in contact.
    pub fn resolve(
        &self,
        index: usize,
        points: &mut [PointMass],
        hash: &SpatialHashIndex,
        simulation_steps: u32,
    ) -> usize {
        if points[index].pinned {
            return 0;
        }

        let position = points[index].position;
        let contact = self.contact_distance();
        let mut correction = Vec3::ZERO;
        let mut count = 0usize;

        for &other in hash.neighbors_of(position) {
            if other == index {
                continue;
            }
            let offset = position - points[other].position;
            let distance = offset.length();
            if distance < contact {
                correction += offset.normalize_or_zero() * (contact - distance);
                count += 1;
            }
        }

        if count > 0 {
            points[index].position += correction / count as f32 / simulation_steps.max(1) as f32;
        }
        count
    }
}
