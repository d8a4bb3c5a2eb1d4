//! Provot strain limiting.
//!
//! Reference: Provot, "Deformation Constraints in a Mass-Spring Model to
//! Describe Rigid Cloth Behavior", Graphics Interface 1995.

use drape_types::constants::MAX_STRAIN;
use drape_types::PointMass;

use crate::spring::Spring;

/// One pass over every spring, shortening those longer than
/// `MAX_STRAIN · rest_length`.
///
/// Applies to all spring classes, enabled or not. The excess is split
/// between both endpoints, or given entirely to the free endpoint when the
/// other one is pinned. Returns the number of springs corrected.
pub fn limit_strain(points: &mut [PointMass], springs: &[Spring]) -> usize {
    let mut corrected = 0;
    for spring in springs {
        let a = spring.pm_a.index();
        let b = spring.pm_b.index();
        let delta = points[a].position - points[b].position;
        let diff = delta.length() - MAX_STRAIN * spring.rest_length;
        if diff <= 0.0 {
            continue;
        }

        let correction = delta.normalize_or_zero() * (0.5 * diff);
        match (points[a].pinned, points[b].pinned) {
            (true, true) => continue,
            (true, false) => points[b].position += 2.0 * correction,
            (false, true) => points[a].position -= 2.0 * correction,
            (false, false) => {
                points[a].position -= correction;
                points[b].position += correction;
            }
        }
        corrected += 1;
    }
    corrected
}

/// Largest length-over-rest ratio among `springs`, or 0 when there are none.
pub fn max_strain(points: &[PointMass], springs: &[Spring]) -> f32 {
    springs
        .iter()
        .map(|s| s.strain(points))
        .fold(0.0, f32::max)
}
