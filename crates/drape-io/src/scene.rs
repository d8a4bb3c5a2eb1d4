//! Scene description: everything needed to set up and run a simulation.

use std::path::Path;

use drape_contact::{CollisionObject, Plane, Sphere};
use drape_solver::integrator::substep_duration;
use drape_solver::{Cloth, ClothDesc, ClothParameters};
use drape_types::constants::{DEFAULT_FRAMES_PER_SEC, DEFAULT_SIMULATION_STEPS, GRAVITY};
use drape_types::{DrapeError, DrapeResult, Vec3};
use serde::{Deserialize, Serialize};

/// A complete scene file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub cloth: ClothDesc,
    pub parameters: ClothParameters,
    pub simulation: SimulationSettings,
    pub colliders: Vec<ColliderConfig>,
}

/// Frame timing and external forcing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub frames_per_sec: f32,
    /// Substeps per frame.
    pub simulation_steps: u32,
    /// Frames to run.
    pub frames: u32,
    /// Constant acceleration applied to every point mass.
    pub gravity: [f32; 3],
    /// Seed for the vertical-sheet jitter.
    pub seed: u64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            frames_per_sec: DEFAULT_FRAMES_PER_SEC,
            simulation_steps: DEFAULT_SIMULATION_STEPS,
            frames: 90,
            gravity: [0.0, -GRAVITY, 0.0],
            seed: 0,
        }
    }
}

impl SimulationSettings {
    /// Length of one substep in seconds.
    pub fn substep_duration(&self) -> f32 {
        substep_duration(self.frames_per_sec, self.simulation_steps)
    }
}

/// A collision primitive as written in a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColliderConfig {
    Plane {
        point: [f32; 3],
        normal: [f32; 3],
        #[serde(default)]
        friction: f32,
    },
    Sphere {
        origin: [f32; 3],
        radius: f32,
        #[serde(default)]
        friction: f32,
    },
}

impl ColliderConfig {
    /// Instantiates the collision object.
    pub fn build(&self) -> Box<dyn CollisionObject> {
        match *self {
            ColliderConfig::Plane {
                point,
                normal,
                friction,
            } => Box::new(Plane::new(Vec3::from(point), Vec3::from(normal), friction)),
            ColliderConfig::Sphere {
                origin,
                radius,
                friction,
            } => Box::new(Sphere::new(Vec3::from(origin), radius, friction)),
        }
    }

    pub fn friction(&self) -> f32 {
        match *self {
            ColliderConfig::Plane { friction, .. } | ColliderConfig::Sphere { friction, .. } => {
                friction
            }
        }
    }
}

impl SceneConfig {
    /// Parses a TOML scene.
    pub fn from_toml_str(text: &str) -> DrapeResult<Self> {
        toml::from_str(text)
            .map_err(|e| DrapeError::Serialization(format!("TOML scene parse failed: {e}")))
    }

    /// Parses a JSON scene.
    pub fn from_json_str(text: &str) -> DrapeResult<Self> {
        serde_json::from_str(text)
            .map_err(|e| DrapeError::Serialization(format!("JSON scene parse failed: {e}")))
    }

    /// Loads a scene file, choosing the format from its extension.
    pub fn load(path: impl AsRef<Path>) -> DrapeResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let scene = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&text)?,
            Some("json") => Self::from_json_str(&text)?,
            other => {
                return Err(DrapeError::InvalidConfig(format!(
                    "unsupported scene extension {:?} for {}",
                    other.unwrap_or(""),
                    path.display()
                )))
            }
        };
        tracing::info!(path = %path.display(), colliders = scene.colliders.len(), "Loaded scene");
        Ok(scene)
    }

    /// Serializes the scene as pretty TOML.
    pub fn to_toml_string(&self) -> DrapeResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| DrapeError::Serialization(format!("TOML scene write failed: {e}")))
    }

    /// Builds the cloth, seeded from the simulation settings.
    pub fn build_cloth(&self) -> DrapeResult<Cloth> {
        Cloth::with_seed(self.cloth.clone(), self.simulation.seed)
    }

    /// Instantiates every collider.
    pub fn build_colliders(&self) -> Vec<Box<dyn CollisionObject>> {
        self.colliders.iter().map(ColliderConfig::build).collect()
    }

    /// External accelerations applied every substep.
    pub fn external_accelerations(&self) -> Vec<Vec3> {
        vec![Vec3::from(self.simulation.gravity)]
    }
}
