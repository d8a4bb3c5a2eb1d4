//! Analytical sphere collision.
//!
//! Points inside the sphere are projected to the surface along the
//! radial direction, then friction pulls them back toward their
//! previous position.

use drape_types::{PointMass, Vec3};

use crate::collider::CollisionObject;

/// A static sphere.
#[derive(Debug, Clone)]
pub struct Sphere {
    /// Center of the sphere.
    pub origin: Vec3,
    /// Radius of the sphere.
    pub radius: f32,
    /// Friction coefficient in `[0, 1]`.
    pub friction: f32,
}

impl Sphere {
    /// Creates a new sphere collider.
    pub fn new(origin: Vec3, radius: f32, friction: f32) -> Self {
        Self {
            origin,
            radius,
            friction,
        }
    }
}

impl CollisionObject for Sphere {
    fn resolve_contact(&self, point_mass: &mut PointMass) {
        let offset = point_mass.position - self.origin;
        let distance = offset.length();

        if distance > self.radius {
            return;
        }

        // Exactly at the center there is no radial direction; push up.
        let direction = offset.try_normalize().unwrap_or(Vec3::Y);
        let tangent = self.origin + direction * self.radius;
        let correction = tangent - point_mass.last_position;

        point_mass.position = point_mass.last_position + correction * (1.0 - self.friction);
    }

    fn name(&self) -> &str {
        "sphere"
    }
}
