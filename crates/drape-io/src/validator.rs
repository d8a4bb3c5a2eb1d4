//! Scene validation.
//!
//! Catches non-physical values before a cloth is built, with messages
//! that point at the offending field.

use drape_types::constants::EPSILON;
use drape_types::{DrapeError, DrapeResult};

use crate::scene::{ColliderConfig, SceneConfig, SimulationSettings};

/// Validates a complete scene.
///
/// Checks:
/// - Cloth grid, extents, thickness and pins
/// - Cloth parameters (density, stiffness, damping)
/// - Frame timing and gravity
/// - Every collider's geometry and friction
pub fn validate_scene(scene: &SceneConfig) -> DrapeResult<()> {
    let result = validate_inner(scene);
    if let Err(ref err) = result {
        tracing::warn!(error = %err, "Scene rejected");
    }
    result
}

fn validate_inner(scene: &SceneConfig) -> DrapeResult<()> {
    scene
        .cloth
        .validate()
        .map_err(|e| DrapeError::InvalidConfig(format!("cloth: {e}")))?;
    scene
        .parameters
        .validate()
        .map_err(|e| DrapeError::InvalidConfig(format!("parameters: {e}")))?;
    validate_settings(&scene.simulation)?;
    for (i, collider) in scene.colliders.iter().enumerate() {
        validate_collider(collider).map_err(|e| match e {
            DrapeError::InvalidConfig(msg) => {
                DrapeError::InvalidConfig(format!("colliders[{i}]: {msg}"))
            }
            other => other,
        })?;
    }
    Ok(())
}

fn validate_settings(settings: &SimulationSettings) -> DrapeResult<()> {
    if !settings.frames_per_sec.is_finite() || settings.frames_per_sec <= 0.0 {
        return Err(DrapeError::InvalidConfig(format!(
            "simulation.frames_per_sec must be positive, got {}",
            settings.frames_per_sec
        )));
    }
    if settings.simulation_steps == 0 {
        return Err(DrapeError::InvalidConfig(
            "simulation.simulation_steps must be >= 1".into(),
        ));
    }
    if settings.frames == 0 {
        return Err(DrapeError::InvalidConfig(
            "simulation.frames must be >= 1".into(),
        ));
    }
    if !all_finite(&settings.gravity) {
        return Err(DrapeError::InvalidConfig(format!(
            "simulation.gravity must be finite, got {:?}",
            settings.gravity
        )));
    }
    Ok(())
}

fn validate_collider(collider: &ColliderConfig) -> DrapeResult<()> {
    let friction = collider.friction();
    if !(0.0..=1.0).contains(&friction) {
        return Err(DrapeError::InvalidConfig(format!(
            "friction must lie in [0, 1], got {friction}"
        )));
    }
    match collider {
        ColliderConfig::Plane { point, normal, .. } => {
            if !all_finite(point) || !all_finite(normal) {
                return Err(DrapeError::InvalidConfig(
                    "plane point and normal must be finite".into(),
                ));
            }
            let len_sq: f32 = normal.iter().map(|c| c * c).sum();
            if len_sq <= EPSILON * EPSILON {
                return Err(DrapeError::InvalidConfig("plane normal must be non-zero".into()));
            }
        }
        ColliderConfig::Sphere { origin, radius, .. } => {
            if !all_finite(origin) {
                return Err(DrapeError::InvalidConfig("sphere origin must be finite".into()));
            }
            if !radius.is_finite() || *radius <= 0.0 {
                return Err(DrapeError::InvalidConfig(format!(
                    "sphere radius must be positive, got {radius}"
                )));
            }
        }
    }
    Ok(())
}

fn all_finite(v: &[f32; 3]) -> bool {
    v.iter().all(|c| c.is_finite())
}
