//! QKD Noise Sweep CLI
//!
//! Runs the adaptive-vs-static amplification comparison across noise
//! models and prints the headline figures.

use clap::Parser;
use qkd_noise_sweep::{
    config::{ConfigError, FileConfig},
    key::Key,
    metrics::SweepMetrics,
    sweep::{SummaryStatistics, SweepEngine},
    NoiseModel,
};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "qkd-noise-sweep", version, about)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Length of the generated original key
    #[arg(short = 'n', long)]
    key_length: Option<usize>,

    /// Explicit original key as a 0/1 string (overrides --key-length)
    #[arg(long)]
    key: Option<Key>,

    /// Master seed for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,

    /// First grid probability
    #[arg(long)]
    start: Option<f64>,

    /// Last grid probability
    #[arg(long)]
    end: Option<f64>,

    /// Number of grid samples
    #[arg(long)]
    points: Option<usize>,

    /// Restrict to these models (repeatable), e.g. --model "Bit Flip"
    #[arg(short, long = "model")]
    models: Vec<NoiseModel>,

    /// Evaluate grid points in parallel
    #[arg(long)]
    parallel: bool,

    /// Print Prometheus metrics after the run
    #[arg(long)]
    metrics: bool,
}

impl Args {
    fn into_config(self) -> Result<(FileConfig, Option<Key>, bool), ConfigError> {
        let mut config = match &self.config {
            Some(path) => FileConfig::from_file(path)?,
            None => FileConfig::default(),
        };

        let sweep = &mut config.sweep;
        if let Some(n) = self.key_length {
            sweep.key_length = n;
        }
        if let Some(key) = &self.key {
            sweep.key_length = key.len();
        }
        if let Some(seed) = self.seed {
            sweep.seed = Some(seed);
        }
        if let Some(start) = self.start {
            sweep.grid_start = start;
        }
        if let Some(end) = self.end {
            sweep.grid_end = end;
        }
        if let Some(points) = self.points {
            sweep.grid_points = points;
        }
        if !self.models.is_empty() {
            sweep.models = self.models;
        }
        sweep.parallel |= self.parallel;

        config.validate()?;
        Ok((config, self.key, self.metrics))
    }
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("QKD Noise Sweep v{}", qkd_noise_sweep::VERSION);

    let (config, explicit_key, print_metrics) = match Args::parse().into_config() {
        Ok(parts) => parts,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let sweep = &config.sweep;
    let schedule = sweep.schedule();
    let key =
        explicit_key.unwrap_or_else(|| Key::random(sweep.key_length, &mut schedule.key_rng()));

    let grid = match sweep.grid() {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Invalid grid: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        key_length = key.len(),
        models = sweep.models.len(),
        grid_points = grid.len(),
        "Starting sweep"
    );

    let engine = SweepEngine::new(config.policy.clone());
    let result = if sweep.parallel {
        run_parallel(&engine, &key, &sweep.models, &grid, &schedule)
    } else {
        engine.run(&key, &sweep.models, &grid, &schedule)
    };

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Sweep failed: {}", e);
            std::process::exit(1);
        }
    };

    print_summary(&summary);

    if print_metrics {
        match SweepMetrics::new() {
            Ok(metrics) => {
                metrics.record(&summary);
                match metrics.encode() {
                    Ok(text) => println!("\n{}", text),
                    Err(e) => warn!("Failed to encode metrics: {}", e),
                }
            }
            Err(e) => warn!("Failed to create metrics registry: {}", e),
        }
    }
}

#[cfg(feature = "parallel")]
fn run_parallel(
    engine: &SweepEngine,
    key: &Key,
    models: &[NoiseModel],
    grid: &qkd_noise_sweep::SweepGrid,
    schedule: &qkd_noise_sweep::SeedSchedule,
) -> qkd_noise_sweep::Result<SummaryStatistics> {
    engine.run_parallel(key, models, grid, schedule)
}

#[cfg(not(feature = "parallel"))]
fn run_parallel(
    engine: &SweepEngine,
    key: &Key,
    models: &[NoiseModel],
    grid: &qkd_noise_sweep::SweepGrid,
    schedule: &qkd_noise_sweep::SeedSchedule,
) -> qkd_noise_sweep::Result<SummaryStatistics> {
    warn!("Built without the `parallel` feature, running sequentially");
    engine.run(key, models, grid, schedule)
}

fn print_summary(summary: &SummaryStatistics) {
    println!(
        "Best model:  {} ({:+.2} bits over static)",
        summary.best.model, summary.best.gain
    );
    println!(
        "Worst model: {} ({:+.2} bits over static)",
        summary.worst.model, summary.worst.gain
    );
    println!("Mean gain (all models): {:.2} bits", summary.mean_gain);
    println!(
        "Gain at highest noise (p = {:.2}): {:.2} bits",
        summary.max_probability(),
        summary.gain_at_max_probability
    );
}
