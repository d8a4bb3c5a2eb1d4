//! # drape-io
//!
//! Scene files in, frame recordings out.
//!
//! - [`SceneConfig`](scene::SceneConfig): cloth, parameters, settings and
//!   colliders, loaded from TOML or JSON
//! - [`validate_scene`](validator::validate_scene): physical plausibility
//!   checks before a run
//! - [`FrameExporter`](export::FrameExporter): per-frame positions plus
//!   triangle indices, written as JSON

pub mod export;
pub mod scene;
pub mod validator;

pub use export::FrameExporter;
pub use scene::{ColliderConfig, SceneConfig, SimulationSettings};
pub use validator::validate_scene;
