//! Sweep and aggregation.
//!
//! For every model and every grid probability the engine disturbs the
//! original key, measures the error rate, and asks the amplification
//! policy how many bits to keep. The resulting curves are aggregated
//! into [`SummaryStatistics`] against the static half-key baseline.

mod engine;
mod grid;
mod summary;

pub use engine::{PointResult, SweepEngine};
pub use grid::{max_index, SweepGrid, DEFAULT_GRID_END, DEFAULT_GRID_POINTS, DEFAULT_GRID_START};
pub use summary::{ModelCurve, ModelGain, SummaryStatistics};
