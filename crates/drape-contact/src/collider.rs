//! External collision object contract.
//!
//! The cloth performs no detection of its own for external objects.
//! Once per point mass per substep it hands the particle to each
//! object, which detects and resolves contact however it sees fit.

use drape_types::PointMass;

/// A rigid primitive the cloth can collide with.
///
/// # Implementations
/// - [`Plane`](crate::plane::Plane): infinite plane with friction
/// - [`Sphere`](crate::sphere::Sphere): static sphere with friction
pub trait CollisionObject: Send + Sync {
    /// Detect and resolve contact against one point mass.
    ///
    /// Implementations mutate `point_mass.position` only when a contact
    /// exists, and must be deterministic.
    fn resolve_contact(&self, point_mass: &mut PointMass);

    /// Returns the primitive name.
    fn name(&self) -> &str;
}
