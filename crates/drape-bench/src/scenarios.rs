//! Benchmark scenarios.
//!
//! Three canonical scenes for regression tracking:
//! 1. **Hanging sheet**: vertical sheet pinned at its top corners
//! 2. **Sphere drape**: horizontal sheet falling onto a sphere
//! 3. **Plane drop**: horizontal sheet settling on the ground plane

use drape_io::{ColliderConfig, SceneConfig, SimulationSettings};
use drape_solver::{ClothDesc, ClothParameters, Orientation};
use serde::{Deserialize, Serialize};

/// Which benchmark scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    HangingSheet,
    SphereDrape,
    PlaneDrop,
}

impl ScenarioKind {
    /// Returns all scenario kinds.
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::HangingSheet,
            ScenarioKind::SphereDrape,
            ScenarioKind::PlaneDrop,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::HangingSheet => "hanging_sheet",
            ScenarioKind::SphereDrape => "sphere_drape",
            ScenarioKind::PlaneDrop => "plane_drop",
        }
    }

    /// Looks up a scenario by its [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.name() == name)
    }
}

/// A fully specified benchmark scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub kind: ScenarioKind,
    pub scene: SceneConfig,
}

/// Sheet resolution shared by every scenario.
const GRID_POINTS: usize = 32;

impl Scenario {
    /// A 1 m × 1 m vertical sheet pinned at both top corners, hanging for
    /// two seconds.
    pub fn hanging_sheet() -> Self {
        let top = GRID_POINTS - 1;
        Self {
            kind: ScenarioKind::HangingSheet,
            scene: SceneConfig {
                cloth: ClothDesc {
                    num_width_points: GRID_POINTS,
                    num_height_points: GRID_POINTS,
                    orientation: Orientation::Vertical,
                    pinned: vec![[0, top], [top, top]],
                    ..Default::default()
                },
                parameters: ClothParameters::default(),
                simulation: SimulationSettings {
                    frames: 180,
                    ..Default::default()
                },
                colliders: Vec::new(),
            },
        }
    }

    /// A free 1 m × 1 m horizontal sheet dropped onto a sphere of radius
    /// 0.3 m whose top sits 0.2 m below the sheet.
    pub fn sphere_drape() -> Self {
        Self {
            kind: ScenarioKind::SphereDrape,
            scene: SceneConfig {
                cloth: ClothDesc {
                    num_width_points: GRID_POINTS,
                    num_height_points: GRID_POINTS,
                    ..Default::default()
                },
                parameters: ClothParameters::default(),
                simulation: SimulationSettings {
                    frames: 180,
                    ..Default::default()
                },
                colliders: vec![ColliderConfig::Sphere {
                    origin: [0.5, 0.5, 0.5],
                    radius: 0.3,
                    friction: 0.3,
                }],
            },
        }
    }

    /// A free horizontal sheet dropped half a metre onto a plane.
    pub fn plane_drop() -> Self {
        Self {
            kind: ScenarioKind::PlaneDrop,
            scene: SceneConfig {
                cloth: ClothDesc {
                    num_width_points: GRID_POINTS,
                    num_height_points: GRID_POINTS,
                    ..Default::default()
                },
                parameters: ClothParameters::default(),
                simulation: SimulationSettings {
                    frames: 120,
                    ..Default::default()
                },
                colliders: vec![ColliderConfig::Plane {
                    point: [0.0, 0.5, 0.0],
                    normal: [0.0, 1.0, 0.0],
                    friction: 0.5,
                }],
            },
        }
    }

    /// Create a scenario by kind.
    pub fn from_kind(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::HangingSheet => Self::hanging_sheet(),
            ScenarioKind::SphereDrape => Self::sphere_drape(),
            ScenarioKind::PlaneDrop => Self::plane_drop(),
        }
    }

    /// Overrides the number of frames to run.
    pub fn with_frames(mut self, frames: u32) -> Self {
        self.scene.simulation.frames = frames;
        self
    }

    /// Overrides the number of substeps per frame.
    pub fn with_simulation_steps(mut self, steps: u32) -> Self {
        self.scene.simulation.simulation_steps = steps;
        self
    }
}
