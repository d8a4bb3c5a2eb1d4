//! Physical constants and simulation defaults.

/// Gravitational acceleration (m/s²).
pub const GRAVITY: f32 = 9.8;

/// Default number of rendered frames per second.
pub const DEFAULT_FRAMES_PER_SEC: f32 = 90.0;

/// Default number of substeps per frame.
pub const DEFAULT_SIMULATION_STEPS: u32 = 30;

/// Maximum spring length as a multiple of its rest length after strain limiting.
pub const MAX_STRAIN: f32 = 1.1;

/// Scale applied to bending spring forces.
pub const BENDING_FORCE_SCALE: f32 = 0.2;

/// Spatial hash cell size, in multiples of the average point spacing.
pub const SPATIAL_CELL_FACTOR: f32 = 3.0;

/// Out-of-plane jitter amplitude for vertical sheets.
pub const VERTICAL_JITTER: f32 = 1.0e-3;

/// Height of a horizontal sheet at construction.
pub const HORIZONTAL_SHEET_HEIGHT: f32 = 1.0;

/// Offset kept between a resolved point and a collision plane.
pub const SURFACE_OFFSET: f32 = 1.0e-4;

/// Epsilon for floating-point comparisons.
pub const EPSILON: f32 = 1.0e-6;
