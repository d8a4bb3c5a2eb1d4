//! Benchmark runner: executes scenarios and collects metrics.

use std::time::Instant;

use drape_io::validate_scene;
use drape_solver::{Cloth, ClothParameters, FrameReport};
use drape_telemetry::{EventBus, EventKind, FrameEvent};
use drape_types::DrapeResult;

use crate::metrics::BenchmarkMetrics;
use crate::scenarios::{Scenario, ScenarioKind};

/// Runs benchmark scenarios and collects metrics.
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    /// Run a single scenario, emitting per-frame events on `bus`.
    ///
    /// The bus is flushed after every frame.
    pub fn run(scenario: &Scenario, bus: &mut EventBus) -> DrapeResult<BenchmarkMetrics> {
        let scene = &scenario.scene;
        validate_scene(scene)?;

        let mut cloth = scene.build_cloth()?;
        let colliders = scene.build_colliders();
        let accelerations = scene.external_accelerations();
        let settings = &scene.simulation;
        let frame_duration = 1.0 / settings.frames_per_sec as f64;

        tracing::info!(
            scenario = scenario.kind.name(),
            points = cloth.point_masses().len(),
            frames = settings.frames,
            "Running benchmark"
        );

        let mut frame_times: Vec<f64> = Vec::with_capacity(settings.frames as usize);
        let mut self_collision_contacts = 0u64;
        let mut strain_corrections = 0u64;

        let total_start = Instant::now();
        for frame in 0..settings.frames {
            bus.emit(FrameEvent::new(
                frame,
                EventKind::FrameBegin {
                    sim_time: frame as f64 * frame_duration,
                },
            ));

            let report = cloth.simulate(
                settings.frames_per_sec,
                settings.simulation_steps,
                &scene.parameters,
                &accelerations,
                &colliders,
            );
            frame_times.push(report.wall_time);
            self_collision_contacts += report.self_collision_contacts as u64;
            strain_corrections += report.strain_corrections as u64;

            emit_frame_summary(
                bus,
                frame,
                &report,
                &cloth,
                &scene.parameters,
                settings.substep_duration(),
            );
            bus.flush();
        }
        let total_wall_time = total_start.elapsed().as_secs_f64();

        let avg_frame_time = if frame_times.is_empty() {
            0.0
        } else {
            frame_times.iter().sum::<f64>() / frame_times.len() as f64
        };
        let min_frame_time = frame_times.iter().copied().fold(f64::MAX, f64::min);
        let max_frame_time = frame_times.iter().copied().fold(0.0, f64::max);

        let metrics = BenchmarkMetrics {
            scenario: scenario.kind.name().to_string(),
            vertex_count: cloth.point_masses().len(),
            spring_count: cloth.springs().len(),
            frames: settings.frames,
            simulation_steps: settings.simulation_steps,
            total_wall_time,
            avg_frame_time,
            min_frame_time,
            max_frame_time,
            final_kinetic_energy: cloth
                .kinetic_energy(&scene.parameters, settings.substep_duration())
                as f64,
            max_displacement: cloth.max_displacement(),
            max_strain: cloth.max_strain(),
            self_collision_contacts,
            strain_corrections,
        };
        tracing::info!(
            scenario = %metrics.scenario,
            wall_time = metrics.total_wall_time,
            max_strain = metrics.max_strain,
            "Benchmark complete"
        );
        Ok(metrics)
    }

    /// Run every scenario with its default settings.
    pub fn run_all(bus: &mut EventBus) -> DrapeResult<Vec<BenchmarkMetrics>> {
        ScenarioKind::all()
            .iter()
            .map(|&kind| Self::run(&Scenario::from_kind(kind), bus))
            .collect()
    }
}

/// Emits the end-of-frame events for `report`: self-collision contacts,
/// strain limiting, kinetic energy and frame timing, in that order.
pub fn emit_frame_summary(
    bus: &EventBus,
    frame: u32,
    report: &FrameReport,
    cloth: &Cloth,
    params: &ClothParameters,
    substep_duration: f32,
) {
    bus.emit(FrameEvent::new(
        frame,
        EventKind::SelfCollision {
            contacts: report.self_collision_contacts as u64,
        },
    ));
    bus.emit(FrameEvent::new(
        frame,
        EventKind::StrainLimit {
            corrections: report.strain_corrections as u64,
            max_strain: cloth.max_strain(),
        },
    ));
    bus.emit(FrameEvent::new(
        frame,
        EventKind::Energy {
            kinetic: cloth.kinetic_energy(params, substep_duration) as f64,
        },
    ));
    bus.emit(FrameEvent::new(
        frame,
        EventKind::FrameEnd {
            wall_time: report.wall_time,
        },
    ));
}
