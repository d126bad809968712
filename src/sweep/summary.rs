//! Per-model curves and cross-model summary statistics.

use super::grid::max_index;
use crate::analysis::ErrorStatistics;
use crate::channel::NoiseModel;
use crate::error::{InvalidInput, Result, SimError};
use serde::Serialize;

/// Adaptive retained-bit counts for one model across the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelCurve {
    /// Model that produced the curve.
    pub model: NoiseModel,
    /// Retained bits, one per grid point.
    pub retained: Vec<usize>,
    /// Error measurements behind each retained count.
    pub observations: Vec<ErrorStatistics>,
}

impl ModelCurve {
    /// Mean of `retained[j] - baseline` over the grid.
    pub fn gain_over(&self, baseline: usize) -> f64 {
        if self.retained.is_empty() {
            return 0.0;
        }
        let total: f64 = self
            .retained
            .iter()
            .map(|&bits| bits as f64 - baseline as f64)
            .sum();
        total / self.retained.len() as f64
    }

    /// QBER at each grid point.
    pub fn qber(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.qber).collect()
    }
}

/// Average gain of a model over the static baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelGain {
    pub model: NoiseModel,
    pub gain: f64,
}

/// Aggregate view over all curves of one sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStatistics {
    /// Probabilities the sweep was evaluated at.
    pub grid: Vec<f64>,
    /// Length of the original key.
    pub key_length: usize,
    /// Static retained-bit count used for comparison.
    pub static_baseline: usize,
    /// Curves in model-list order.
    pub curves: Vec<ModelCurve>,
    /// Gains in model-list order.
    pub model_gains: Vec<ModelGain>,
    /// Highest-gain model (earliest wins ties).
    pub best: ModelGain,
    /// Lowest-gain model (earliest wins ties).
    pub worst: ModelGain,
    /// Per-grid-point mean across curves.
    pub mean_curve: Vec<f64>,
    /// Per-grid-point minimum across curves.
    pub min_curve: Vec<usize>,
    /// Per-grid-point maximum across curves.
    pub max_curve: Vec<usize>,
    /// Mean over the grid of `mean_curve - static_baseline`.
    pub mean_gain: f64,
    /// `mean_curve - static_baseline` at the largest probability (first
    /// such point on ties).
    pub gain_at_max_probability: f64,
}

impl SummaryStatistics {
    /// Aggregates completed curves.
    ///
    /// Curves are combined in the order given and grid points in grid
    /// order, so the result is fully determined by the curves.
    pub fn aggregate(
        grid: &[f64],
        key_length: usize,
        static_baseline: usize,
        curves: Vec<ModelCurve>,
    ) -> Result<Self> {
        if grid.is_empty() {
            return Err(InvalidInput::EmptyGrid.into());
        }
        if curves.is_empty() {
            return Err(InvalidInput::EmptyModelList.into());
        }
        if let Some(bad) = curves.iter().find(|c| c.retained.len() != grid.len()) {
            return Err(SimError::Simulation(format!(
                "{} curve has {} points, grid has {}",
                bad.model,
                bad.retained.len(),
                grid.len()
            )));
        }

        let model_gains: Vec<ModelGain> = curves
            .iter()
            .map(|c| ModelGain {
                model: c.model,
                gain: c.gain_over(static_baseline),
            })
            .collect();

        let mut best = model_gains[0];
        let mut worst = model_gains[0];
        for entry in &model_gains[1..] {
            if entry.gain > best.gain {
                best = *entry;
            }
            if entry.gain < worst.gain {
                worst = *entry;
            }
        }

        let n = curves.len() as f64;
        let mut mean_curve = Vec::with_capacity(grid.len());
        let mut min_curve = Vec::with_capacity(grid.len());
        let mut max_curve = Vec::with_capacity(grid.len());
        for j in 0..grid.len() {
            let column = curves.iter().map(|c| c.retained[j]);
            mean_curve.push(column.clone().map(|b| b as f64).sum::<f64>() / n);
            min_curve.push(column.clone().min().unwrap_or(0));
            max_curve.push(column.max().unwrap_or(0));
        }

        let baseline = static_baseline as f64;
        let mean_gain =
            mean_curve.iter().map(|m| m - baseline).sum::<f64>() / mean_curve.len() as f64;

        let gain_at_max_probability = mean_curve[max_index(grid)] - baseline;

        Ok(Self {
            grid: grid.to_vec(),
            key_length,
            static_baseline,
            curves,
            model_gains,
            best,
            worst,
            mean_curve,
            min_curve,
            max_curve,
            mean_gain,
            gain_at_max_probability,
        })
    }

    /// Curve for `model`, if it was part of the sweep.
    pub fn curve(&self, model: NoiseModel) -> Option<&ModelCurve> {
        self.curves.iter().find(|c| c.model == model)
    }

    /// Average gain for `model`, if it was part of the sweep.
    pub fn gain(&self, model: NoiseModel) -> Option<f64> {
        self.model_gains
            .iter()
            .find(|g| g.model == model)
            .map(|g| g.gain)
    }

    /// Largest probability in the grid.
    pub fn max_probability(&self) -> f64 {
        self.grid[max_index(&self.grid)]
    }
}
