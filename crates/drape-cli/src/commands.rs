//! CLI command implementations.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use drape_bench::metrics::BenchmarkMetrics;
use drape_bench::runner::{emit_frame_summary, BenchmarkRunner};
use drape_bench::scenarios::{Scenario, ScenarioKind};
use drape_io::{validate_scene, FrameExporter, SceneConfig};
use drape_telemetry::sinks::{JsonLinesSink, TracingSink};
use drape_telemetry::{EventBus, EventKind, FrameEvent};

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Run a simulation from a scene file.
pub fn simulate(
    scene_path: &Path,
    frames: Option<u32>,
    output_path: Option<&Path>,
    events_path: Option<&Path>,
) -> CliResult {
    println!("Drape Simulation");
    println!("────────────────");
    println!("Scene: {}", scene_path.display());

    let mut scene = SceneConfig::load(scene_path)?;
    if let Some(frames) = frames {
        scene.simulation.frames = frames;
    }
    validate_scene(&scene)?;

    let mut cloth = scene.build_cloth()?;
    let colliders = scene.build_colliders();
    let accelerations = scene.external_accelerations();
    let settings = scene.simulation.clone();

    println!(
        "Cloth: {}x{} points, {} springs, {} colliders",
        cloth.num_width_points(),
        cloth.num_height_points(),
        cloth.springs().len(),
        colliders.len()
    );
    println!(
        "Run:   {} frames at {} fps, {} substeps per frame",
        settings.frames, settings.frames_per_sec, settings.simulation_steps
    );
    println!();

    let mut bus = EventBus::new();
    bus.add_sink(Box::new(TracingSink::default()));
    if let Some(path) = events_path {
        let file = BufWriter::new(File::create(path)?);
        bus.add_sink(Box::new(JsonLinesSink::new(file)));
    }

    let mut exporter = output_path.map(|_| FrameExporter::new(cloth.mesh()));
    if let Some(exporter) = exporter.as_mut() {
        exporter.capture(0, &cloth.positions());
    }

    let frame_duration = 1.0 / settings.frames_per_sec as f64;
    let mut total_wall_time = 0.0;
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
        total_wall_time += report.wall_time;
        emit_frame_summary(
            &bus,
            frame,
            &report,
            &cloth,
            &scene.parameters,
            settings.substep_duration(),
        );
        bus.flush();

        if let Some(exporter) = exporter.as_mut() {
            exporter.capture(frame + 1, &cloth.positions());
        }
    }
    bus.finalize();
    tracing::info!(
        frames = settings.frames,
        wall_time = total_wall_time,
        max_strain = cloth.max_strain(),
        "Simulation finished"
    );

    println!("  Wall time:     {total_wall_time:.3}s");
    println!("  Max strain:    {:.4}", cloth.max_strain());
    println!("  Max displace:  {:.4}m", cloth.max_displacement());

    if let (Some(exporter), Some(path)) = (exporter, output_path) {
        exporter.write(path)?;
        println!("Frames written to: {}", path.display());
    }
    if let Some(path) = events_path {
        println!("Events written to: {}", path.display());
    }
    Ok(())
}

/// Run benchmark suite.
pub fn benchmark(scenario_name: &str, output_path: Option<&Path>) -> CliResult {
    println!("Drape Benchmark Suite");
    println!("═════════════════════");
    println!();

    let kinds: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        match ScenarioKind::from_name(scenario_name) {
            Some(kind) => vec![kind],
            None => {
                let available: Vec<&str> = ScenarioKind::all().iter().map(|k| k.name()).collect();
                return Err(format!(
                    "Unknown scenario: '{scenario_name}'. Available: {}, all",
                    available.join(", ")
                )
                .into());
            }
        }
    };

    let mut bus = EventBus::new();
    bus.add_sink(Box::new(TracingSink::default()));

    let mut all_metrics = Vec::new();
    for kind in kinds {
        let scenario = Scenario::from_kind(kind);
        println!(
            "Running: {} ({}x{} points, {} frames)",
            kind.name(),
            scenario.scene.cloth.num_width_points,
            scenario.scene.cloth.num_height_points,
            scenario.scene.simulation.frames,
        );

        let metrics = BenchmarkRunner::run(&scenario, &mut bus)
            .map_err(|e| format!("Benchmark failed: {e}"))?;

        println!("  Wall time:     {:.3}s", metrics.total_wall_time);
        println!("  Avg frame:     {:.3}ms", metrics.avg_frame_time * 1000.0);
        println!("  Final KE:      {:.6e}", metrics.final_kinetic_energy);
        println!("  Max displace:  {:.4}m", metrics.max_displacement);
        println!("  Max strain:    {:.4}", metrics.max_strain);
        println!();
        tracing::info!(
            scenario = kind.name(),
            wall_time = metrics.total_wall_time,
            "Benchmark scenario finished"
        );

        all_metrics.push(metrics);
    }
    bus.finalize();

    if let Some(path) = output_path {
        BenchmarkMetrics::write_csv(&all_metrics, path)?;
        println!("Results written to: {}", path.display());
    } else {
        println!("CSV Output:");
        print!("{}", BenchmarkMetrics::to_csv(&all_metrics));
    }
    Ok(())
}

/// Validate a scene file.
pub fn validate(path: &Path) -> CliResult {
    println!("Drape Validator");
    println!("───────────────");
    println!("Validating scene: {}", path.display());

    let scene = SceneConfig::load(path)?;
    validate_scene(&scene)?;
    let cloth = scene.build_cloth()?;
    cloth.mesh().validate()?;
    tracing::info!(path = %path.display(), "Scene validated");

    println!(
        "✅ Scene is valid ({} points, {} springs, {} triangles, {} colliders).",
        cloth.point_masses().len(),
        cloth.springs().len(),
        cloth.mesh().triangle_count(),
        scene.colliders.len()
    );
    Ok(())
}
