//! JSON frame exporter: per-frame positions for offline viewing.

use std::path::Path;

use drape_mesh::ClothMesh;
use drape_types::{DrapeError, DrapeResult, Vec3};
use serde::{Deserialize, Serialize};

/// Positions captured at one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameData {
    pub frame: u32,
    /// Interleaved `[x0, y0, z0, x1, y1, z1, ...]`.
    pub positions: Vec<f32>,
}

/// A whole recording as written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecording {
    pub vertex_count: usize,
    pub triangle_count: usize,
    /// Three vertex indices per triangle.
    pub indices: Vec<u32>,
    pub frames: Vec<FrameData>,
}

/// Accumulates frames in memory and writes them as one JSON document.
///
/// ```text
/// let mut exporter = FrameExporter::new(cloth.mesh());
/// // each frame:
/// exporter.capture(frame, &cloth.positions());
/// exporter.write("frames.json")?;
/// ```
pub struct FrameExporter {
    recording: FrameRecording,
}

impl FrameExporter {
    /// Creates an exporter for a cloth with the given mesh.
    pub fn new(mesh: &ClothMesh) -> Self {
        Self {
            recording: FrameRecording {
                vertex_count: mesh.vertex_count(),
                triangle_count: mesh.triangle_count(),
                indices: mesh.indices(),
                frames: Vec::new(),
            },
        }
    }

    /// Records the positions of one frame.
    pub fn capture(&mut self, frame: u32, positions: &[Vec3]) {
        let mut flat = Vec::with_capacity(positions.len() * 3);
        for p in positions {
            flat.extend_from_slice(&p.to_array());
        }
        self.recording.frames.push(FrameData {
            frame,
            positions: flat,
        });
    }

    pub fn frame_count(&self) -> usize {
        self.recording.frames.len()
    }

    pub fn recording(&self) -> &FrameRecording {
        &self.recording
    }

    /// Serializes the recording.
    pub fn to_json(&self) -> DrapeResult<String> {
        serde_json::to_string(&self.recording)
            .map_err(|e| DrapeError::Serialization(format!("JSON serialization failed: {e}")))
    }

    /// Writes the recording to `path`.
    pub fn write(&self, path: impl AsRef<Path>) -> DrapeResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        tracing::info!(
            path = %path.display(),
            frames = self.frame_count(),
            "Wrote frame recording"
        );
        Ok(())
    }
}
