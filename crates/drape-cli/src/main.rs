//! Drape CLI: simulation, benchmarking, and scene validation.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "drape")]
#[command(version, about = "Drape: mass-spring cloth simulation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation from a scene file.
    Simulate {
        /// Path to the scene (TOML or JSON).
        #[arg(short, long)]
        scene: PathBuf,

        /// Override the number of frames in the scene.
        #[arg(short, long)]
        frames: Option<u32>,

        /// Write per-frame positions as JSON.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write per-frame telemetry as JSON lines.
        #[arg(short, long)]
        events: Option<PathBuf>,
    },

    /// Run benchmark suite.
    Benchmark {
        /// Which scenario to run (hanging_sheet, sphere_drape, plane_drop, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a scene file.
    Validate {
        /// Path to the scene (TOML or JSON).
        path: PathBuf,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            scene,
            frames,
            output,
            events,
        } => commands::simulate(&scene, frames, output.as_deref(), events.as_deref()),
        Commands::Benchmark { scenario, output } => {
            commands::benchmark(&scenario, output.as_deref())
        }
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
