//! # drape-solver
//!
//! Mass-spring cloth: construction, time integration, and strain limiting.
//!
//! ## Key Types
//!
//! - [`Cloth`]: owns the point masses, springs, mesh and spatial hash;
//!   advances one frame per [`Cloth::simulate`] call
//! - [`ClothDesc`]: construction parameters (grid, size, pins)
//! - [`ClothParameters`]: physical parameters consumed every frame
//! - [`Spring`] / [`SpringType`]: index-based constraints
//!
//! Each substep runs, in order: force accumulation → Verlet integration →
//! spatial hash rebuild → self-collision and external collision per point
//! mass → strain limiting.

pub mod cloth;
pub mod grid;
pub mod integrator;
pub mod params;
pub mod spring;
pub mod strain_limit;

pub use cloth::{Cloth, ClothDesc, FrameReport};
pub use grid::Orientation;
pub use params::ClothParameters;
pub use spring::{Spring, SpringType};
