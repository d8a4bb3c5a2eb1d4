//! Physical cloth parameters.
//!
//! Read every frame by [`Cloth::simulate`](crate::Cloth::simulate), so
//! they can be tuned while the simulation runs.

use drape_types::{DrapeError, DrapeResult};
use serde::{Deserialize, Serialize};

use crate::spring::SpringType;

/// Parameters controlling forces and integration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClothParameters {
    /// Areal mass density (kg per unit²).
    pub density: f32,

    /// Spring stiffness.
    pub ks: f32,

    /// Velocity damping in percent (0–100).
    pub damping: f32,

    /// Whether structural springs exert force.
    pub enable_structural_constraints: bool,

    /// Whether shearing springs exert force.
    pub enable_shearing_constraints: bool,

    /// Whether bending springs exert force.
    pub enable_bending_constraints: bool,
}

impl Default for ClothParameters {
    fn default() -> Self {
        Self {
            density: 15.0,
            ks: 5000.0,
            damping: 0.2,
            enable_structural_constraints: true,
            enable_shearing_constraints: true,
            enable_bending_constraints: true,
        }
    }
}

impl ClothParameters {
    /// Default parameters with the given constraint classes enabled.
    pub fn with_constraints(structural: bool, shearing: bool, bending: bool) -> Self {
        Self {
            enable_structural_constraints: structural,
            enable_shearing_constraints: shearing,
            enable_bending_constraints: bending,
            ..Default::default()
        }
    }

    /// Returns true if springs of `spring_type` exert force.
    #[inline]
    pub fn is_enabled(&self, spring_type: SpringType) -> bool {
        match spring_type {
            SpringType::Structural => self.enable_structural_constraints,
            SpringType::Shearing => self.enable_shearing_constraints,
            SpringType::Bending => self.enable_bending_constraints,
        }
    }

    /// Checks that every value is physically meaningful.
    pub fn validate(&self) -> DrapeResult<()> {
        if !self.density.is_finite() || self.density <= 0.0 {
            return Err(DrapeError::InvalidParameters(format!(
                "density must be positive, got {}",
                self.density
            )));
        }
        if !self.ks.is_finite() || self.ks < 0.0 {
            return Err(DrapeError::InvalidParameters(format!(
                "ks must be non-negative, got {}",
                self.ks
            )));
        }
        if !(0.0..=100.0).contains(&self.damping) {
            return Err(DrapeError::InvalidParameters(format!(
                "damping is a percentage in [0, 100], got {}",
                self.damping
            )));
        }
        Ok(())
    }
}
