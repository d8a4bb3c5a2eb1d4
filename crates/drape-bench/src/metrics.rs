//! Benchmark metrics: data collected during a scenario run.

use std::path::Path;

use drape_types::DrapeResult;
use serde::{Deserialize, Serialize};

/// Metrics collected from a benchmark scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    pub scenario: String,
    pub vertex_count: usize,
    pub spring_count: usize,
    /// Frames executed.
    pub frames: u32,
    /// Substeps per frame.
    pub simulation_steps: u32,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Average wall-clock time per frame (seconds).
    pub avg_frame_time: f64,
    pub min_frame_time: f64,
    pub max_frame_time: f64,
    /// Kinetic energy after the last frame (approaches zero once settled).
    pub final_kinetic_energy: f64,
    /// Largest point displacement from its start position.
    pub max_displacement: f32,
    /// Largest length/rest ratio after the last frame.
    pub max_strain: f32,
    /// Self-collision contacts summed over the run.
    pub self_collision_contacts: u64,
    /// Strain-limit corrections summed over the run.
    pub strain_corrections: u64,
}

impl BenchmarkMetrics {
    pub fn to_csv_header() -> String {
        "scenario,vertex_count,spring_count,frames,simulation_steps,total_wall_time_s,avg_frame_ms,min_frame_ms,max_frame_ms,final_ke,max_displacement,max_strain,self_collision_contacts,strain_corrections".to_string()
    }

    /// Format this run as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{:.6},{:.4},{:.4},{:.4},{:.6e},{:.6},{:.4},{},{}",
            self.scenario,
            self.vertex_count,
            self.spring_count,
            self.frames,
            self.simulation_steps,
            self.total_wall_time,
            self.avg_frame_time * 1000.0,
            self.min_frame_time * 1000.0,
            self.max_frame_time * 1000.0,
            self.final_kinetic_energy,
            self.max_displacement,
            self.max_strain,
            self.self_collision_contacts,
            self.strain_corrections,
        )
    }

    /// Header plus one row per run.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv.push('\n');
        csv
    }

    /// Writes [`to_csv`](Self::to_csv) to `path`.
    pub fn write_csv(metrics: &[BenchmarkMetrics], path: impl AsRef<Path>) -> DrapeResult<()> {
        std::fs::write(path, Self::to_csv(metrics))?;
        Ok(())
    }
}
