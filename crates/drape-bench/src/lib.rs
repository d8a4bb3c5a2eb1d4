//! # drape-bench
//!
//! Benchmark suite for the Drape cloth simulator.
//!
//! Provides 3 canonical scenarios, a runner that streams per-frame
//! telemetry, and CSV export of the collected metrics.

pub mod metrics;
pub mod runner;
pub mod scenarios;

pub use metrics::BenchmarkMetrics;
pub use runner::BenchmarkRunner;
pub use scenarios::{Scenario, ScenarioKind};
