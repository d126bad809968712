//! Prometheus metrics for sweep observability.
//!
//! # Metrics Exposed
//!
//! ## Work Counters
//! - `qkd_sweep_runs_total` - Completed sweeps
//! - `qkd_sweep_evaluations_total` - (model, probability) points evaluated
//! - `qkd_sweep_bits_disturbed_total` - Key positions altered by noise
//!
//! ## Latest Sweep Outcome
//! - `qkd_sweep_static_baseline_bits` - Static retained-bit count
//! - `qkd_sweep_best_gain_bits` - Average gain of the best model
//! - `qkd_sweep_worst_gain_bits` - Average gain of the worst model
//! - `qkd_sweep_mean_gain_bits` - Mean gain across all models
//! - `qkd_sweep_gain_at_max_probability_bits` - Mean gain at the noisiest point
//!
//! # Example
//!
//! ```no_run
//! use qkd_noise_sweep::{
//!     channel::NoiseModel, key::Key, metrics::SweepMetrics, seeding::SeedSchedule,
//!     sweep::{SweepEngine, SweepGrid},
//! };
//!
//! let metrics = SweepMetrics::new().expect("Failed to create registry");
//!
//! let schedule = SeedSchedule::from_u64(1);
//! let key = Key::random(512, &mut schedule.key_rng());
//! let summary = SweepEngine::default()
//!     .run(&key, &NoiseModel::ALL, &SweepGrid::default(), &schedule)
//!     .unwrap();
//!
//! metrics.record(&summary);
//! println!("{}", metrics.encode().unwrap());
//! ```

mod collector;

pub use collector::{MetricsError, SweepMetrics};
