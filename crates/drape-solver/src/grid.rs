//! One-time construction of point masses and springs from a regular grid.

use std::collections::HashSet;

use drape_types::constants::{HORIZONTAL_SHEET_HEIGHT, VERTICAL_JITTER};
use drape_types::{ParticleId, PointMass, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::spring::{Spring, SpringType};

/// How the sheet is laid out at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Sheet in the XZ plane at `y = 1`.
    #[default]
    Horizontal,
    /// Sheet in the XY plane with a small random Z jitter.
    Vertical,
}

/// Lattice spacing along a dimension. A single-point dimension has step 0.
#[inline]
pub fn lattice_step(extent: f32, points: usize) -> f32 {
    if points > 1 {
        extent / (points - 1) as f32
    } else {
        0.0
    }
}

/// Lays out `num_width_points × num_height_points` point masses in row-major order.
///
/// Vertical sheets draw their Z jitter from `rng`, in `[-VERTICAL_JITTER, 0)`.
pub fn build_point_masses<R: Rng + ?Sized>(
    width: f32,
    height: f32,
    num_width_points: usize,
    num_height_points: usize,
    orientation: Orientation,
    pinned: &[[usize; 2]],
    rng: &mut R,
) -> Vec<PointMass> {
    let x_step = lattice_step(width, num_width_points);
    let y_step = lattice_step(height, num_height_points);
    let pinned: HashSet<(usize, usize)> = pinned.iter().map(|&[c, r]| (c, r)).collect();

    let mut points = Vec::with_capacity(num_width_points * num_height_points);
    for row in 0..num_height_points {
        for col in 0..num_width_points {
            let x = x_step * col as f32;
            let y = y_step * row as f32;
            let position = match orientation {
                Orientation::Horizontal => Vec3::new(x, HORIZONTAL_SHEET_HEIGHT, y),
                Orientation::Vertical => {
                    let u: f32 = rng.gen();
                    Vec3::new(x, y, (u - 1.0) * VERTICAL_JITTER)
                }
            };
            points.push(PointMass::new(position, pinned.contains(&(col, row))));
        }
    }
    points
}

/// Creates the structural, shearing and bending springs of the grid.
///
/// For each point, in row-major order, springs are emitted towards: left,
/// above, upper-left, upper-right, two-left, two-above. Neighbours outside
/// the grid are skipped.
pub fn build_springs(
    num_width_points: usize,
    num_height_points: usize,
    points: &[PointMass],
) -> Vec<Spring> {
    let idx = |col: usize, row: usize| ParticleId::from(row * num_width_points + col);
    let mut springs = Vec::new();

    for row in 0..num_height_points {
        for col in 0..num_width_points {
            let current = idx(col, row);
            let mut link = |other: ParticleId, ty: SpringType| {
                springs.push(Spring::new(current, other, points, ty));
            };

            if col > 0 {
                link(idx(col - 1, row), SpringType::Structural);
            }
            if row > 0 {
                link(idx(col, row - 1), SpringType::Structural);
            }
            if row > 0 && col > 0 {
                link(idx(col - 1, row - 1), SpringType::Shearing);
            }
            if row > 0 && col + 1 < num_width_points {
                link(idx(col + 1, row - 1), SpringType::Shearing);
            }
            if col > 1 {
                link(idx(col - 2, row), SpringType::Bending);
            }
            if row > 1 {
                link(idx(col, row - 2), SpringType::Bending);
            }
        }
    }
    springs
}
