//! Reproducible randomness for sweeps.
//!
//! This module derives independent ChaCha20 streams from a single
//! master seed, one per (model, grid point) task.

mod schedule;

pub use schedule::SeedSchedule;
