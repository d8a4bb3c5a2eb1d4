//! Force accumulation and position Verlet integration.

use drape_types::{PointMass, Vec3};

use crate::params::ClothParameters;
use crate::spring::Spring;

/// Mass of every point: `width · height · density / point_count`.
#[inline]
pub fn particle_mass(
    width: f32,
    height: f32,
    density: f32,
    num_width_points: usize,
    num_height_points: usize,
) -> f32 {
    width * height * density / (num_width_points * num_height_points) as f32
}

/// Length of one substep: `1 / (frames_per_sec · simulation_steps)`.
#[inline]
pub fn substep_duration(frames_per_sec: f32, simulation_steps: u32) -> f32 {
    1.0 / (frames_per_sec * simulation_steps as f32)
}

/// Overwrites every point's forces with the external force, then adds
/// the Hookean forces of every enabled spring class.
pub fn accumulate_forces(
    points: &mut [PointMass],
    springs: &[Spring],
    params: &ClothParameters,
    mass: f32,
    external_accelerations: &[Vec3],
) {
    let external: Vec3 = external_accelerations.iter().map(|a| *a * mass).sum();
    for pm in points.iter_mut() {
        pm.forces = external;
    }

    for spring in springs {
        if !params.is_enabled(spring.spring_type) {
            continue;
        }
        let force = spring.force(points, params.ks);
        points[spring.pm_a.index()].forces -= force;
        points[spring.pm_b.index()].forces += force;
    }
}

/// Advances every unpinned point by one damped Verlet step.
///
/// `damping` is a percentage: 0 keeps all momentum, 100 removes it.
pub fn verlet_step(points: &mut [PointMass], mass: f32, delta_t: f32, damping: f32) {
    let retain = 1.0 - damping / 100.0;
    let dt2 = delta_t * delta_t;
    for pm in points.iter_mut().filter(|pm| !pm.pinned) {
        let current = pm.position;
        pm.position = current + retain * (current - pm.last_position) + pm.forces / mass * dt2;
        pm.last_position = current;
    }
}
