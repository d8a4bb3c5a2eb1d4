//! Infinite plane collision.
//!
//! A point collides when it crossed (or touches) the plane during the
//! last substep. It is moved back onto the side it came from, just off
//! the surface, with friction scaling the motion it keeps.

use drape_types::constants::SURFACE_OFFSET;
use drape_types::{PointMass, Vec3};

use crate::collider::CollisionObject;

/// An infinite plane through `point` with unit `normal`.
#[derive(Debug, Clone)]
pub struct Plane {
    /// Any point on the plane.
    pub point: Vec3,
    /// Unit normal.
    pub normal: Vec3,
    /// Friction coefficient in `[0, 1]`. `1` stops the particle dead.
    pub friction: f32,
}

impl Plane {
    /// Creates a plane. A zero normal falls back to `+Y`.
    pub fn new(point: Vec3, normal: Vec3, friction: f32) -> Self {
        Self {
            point,
            normal: normal.try_normalize().unwrap_or(Vec3::Y),
            friction,
        }
    }

    /// Signed distance from the plane.
    #[inline]
    pub fn signed_distance(&self, p: Vec3) -> f32 {
        (p - self.point).dot(self.normal)
    }
}

impl CollisionObject for Plane {
    fn resolve_contact(&self, point_mass: &mut PointMass) {
        let last_side = self.signed_distance(point_mass.last_position);
        let current_side = self.signed_distance(point_mass.position);

        if last_side * current_side > 0.0 {
            return;
        }

        let tangent = point_mass.position - current_side * self.normal;
        let side = if last_side >= 0.0 { 1.0 } else { -1.0 };
        let correction = tangent + self.normal * (SURFACE_OFFSET * side) - point_mass.last_position;

        point_mass.position = point_mass.last_position + correction * (1.0 - self.friction);
    }

    fn name(&self) -> &str {
        "plane"
    }
}
