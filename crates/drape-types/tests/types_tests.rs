//! Integration tests for drape-types.

use drape_types::{DrapeError, ParticleId, PointMass, TriangleId, Vec3};

// ─── ID Tests ──────────────────────────────────────────────────

#[test]
fn particle_id_index() {
    let id = ParticleId(42);
    assert_eq!(id.index(), 42);
    assert_eq!(ParticleId::from(7usize), ParticleId(7));
}

#[test]
fn triangle_id_index() {
    assert_eq!(TriangleId(3).index(), 3);
}

#[test]
fn ids_are_serializable() {
    let id = ParticleId(100);
    let json = serde_json::to_string(&id).unwrap();
    let deserialized: ParticleId = serde_json::from_str(&json).unwrap();
    assert_eq!(id, deserialized);
}

// ─── PointMass Tests ──────────────────────────────────────────

#[test]
fn point_mass_starts_at_rest() {
    let pm = PointMass::new(Vec3::new(1.0, 2.0, 3.0), false);
    assert_eq!(pm.position, pm.last_position);
    assert_eq!(pm.position, pm.start_position);
    assert_eq!(pm.velocity(0.01), Vec3::ZERO);
}

#[test]
fn point_mass_velocity_from_history() {
    let mut pm = PointMass::new(Vec3::ZERO, false);
    pm.position = Vec3::new(0.5, 0.0, 0.0);
    let v = pm.velocity(0.1);
    assert!((v.x - 5.0).abs() < 1e-5);
}

#[test]
fn point_mass_reset() {
    let mut pm = PointMass::new(Vec3::ONE, true);
    pm.position = Vec3::new(4.0, 4.0, 4.0);
    pm.last_position = Vec3::new(3.0, 3.0, 3.0);
    pm.forces = Vec3::X;
    pm.reset();
    assert_eq!(pm.position, Vec3::ONE);
    assert_eq!(pm.last_position, Vec3::ONE);
    assert_eq!(pm.forces, Vec3::ZERO);
    assert!(pm.pinned);
}

// ─── Error Tests ──────────────────────────────────────────────

#[test]
fn error_display() {
    let err = DrapeError::InvalidGrid("grid must have at least one point".into());
    assert!(err.to_string().contains("at least one point"));
}

#[test]
fn io_error_converts() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "scene.toml");
    let err: DrapeError = io.into();
    assert!(err.to_string().contains("scene.toml"));
}
