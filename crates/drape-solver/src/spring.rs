//! Springs between pairs of point masses.

use drape_types::constants::BENDING_FORCE_SCALE;
use drape_types::{ParticleId, PointMass, Vec3};
use serde::{Deserialize, Serialize};

/// Stiffness class of a spring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpringType {
    /// Direct horizontal/vertical neighbours.
    Structural,
    /// Diagonal neighbours.
    Shearing,
    /// Neighbours two points away.
    Bending,
}

impl SpringType {
    /// Returns all spring types.
    pub fn all() -> &'static [SpringType] {
        &[SpringType::Structural, SpringType::Shearing, SpringType::Bending]
    }

    /// Multiplier applied to the Hookean force of this class.
    #[inline]
    pub fn force_scale(self) -> f32 {
        match self {
            SpringType::Bending => BENDING_FORCE_SCALE,
            _ => 1.0,
        }
    }
}

/// A constraint between two distinct point masses.
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    pub pm_a: ParticleId,
    pub pm_b: ParticleId,
    /// Distance between the endpoints at creation. Never recomputed.
    pub rest_length: f32,
    pub spring_type: SpringType,
}

impl Spring {
    /// Creates a spring whose rest length is the current endpoint distance.
    pub fn new(
        pm_a: ParticleId,
        pm_b: ParticleId,
        points: &[PointMass],
        spring_type: SpringType,
    ) -> Self {
        debug_assert_ne!(pm_a, pm_b, "spring endpoints must differ");
        let rest_length = (points[pm_a.index()].position - points[pm_b.index()].position).length();
        Self {
            pm_a,
            pm_b,
            rest_length,
            spring_type,
        }
    }

    /// `pm_a.position − pm_b.position`.
    #[inline]
    pub fn delta(&self, points: &[PointMass]) -> Vec3 {
        points[self.pm_a.index()].position - points[self.pm_b.index()].position
    }

    /// Current endpoint distance.
    #[inline]
    pub fn length(&self, points: &[PointMass]) -> f32 {
        self.delta(points).length()
    }

    /// Current length over rest length.
    pub fn strain(&self, points: &[PointMass]) -> f32 {
        self.length(points) / self.rest_length
    }

    /// Hookean force `ks · (|Δp| − rest) · unit(Δp)`, scaled by the class factor.
    ///
    /// Subtract it from `pm_a` and add it to `pm_b`.
    pub fn force(&self, points: &[PointMass], ks: f32) -> Vec3 {
        let delta = self.delta(points);
        let extension = delta.length() - self.rest_length;
        delta.normalize_or_zero() * (ks * extension * self.spring_type.force_scale())
    }
}
