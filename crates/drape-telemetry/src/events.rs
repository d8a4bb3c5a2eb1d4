//! Frame event types.
//!
//! Events are small value types emitted once per frame by whoever drives
//! the cloth (the CLI, the benchmark runner).

use serde::{Deserialize, Serialize};

/// An event tagged with the frame it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameEvent {
    /// Frame number (0-indexed).
    pub frame: u32,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Frame started.
    FrameBegin {
        /// Simulated time at the start of the frame (seconds).
        sim_time: f64,
    },

    /// Frame completed.
    FrameEnd {
        /// Wall-clock time for the whole frame (seconds).
        wall_time: f64,
    },

    /// Self-collision contacts resolved during the frame.
    SelfCollision {
        /// Neighbour contacts summed over all substeps.
        contacts: u64,
    },

    /// Strain limiting summary for the frame.
    StrainLimit {
        /// Springs shortened, summed over all substeps.
        corrections: u64,
        /// Largest length/rest ratio after the frame.
        max_strain: f32,
    },

    /// Energy snapshot after the frame.
    Energy {
        /// Kinetic energy of the unpinned point masses.
        kinetic: f64,
    },

    /// Free-form event.
    Custom {
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl FrameEvent {
    /// Creates an event for the given frame.
    pub fn new(frame: u32, kind: EventKind) -> Self {
        Self { frame, kind }
    }

    /// Short name of the payload variant.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            EventKind::FrameBegin { .. } => "frame_begin",
            EventKind::FrameEnd { .. } => "frame_end",
            EventKind::SelfCollision { .. } => "self_collision",
            EventKind::StrainLimit { .. } => "strain_limit",
            EventKind::Energy { .. } => "energy",
            EventKind::Custom { .. } => "custom",
        }
    }
}
