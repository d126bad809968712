//! Drives noise, metrics and policy across models and the grid.

use super::grid::SweepGrid;
use super::summary::{ModelCurve, SummaryStatistics};
use crate::analysis::{static_baseline, AmplificationPolicy, ErrorStatistics};
use crate::channel::{apply_noise, NoiseModel};
use crate::error::{InvalidInput, Result};
use crate::key::Key;
use crate::seeding::SeedSchedule;
use rand::Rng;

/// Outcome of one (model, probability) evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointResult {
    /// Bits the adaptive policy retains.
    pub retained: usize,
    /// Measurements the decision was based on.
    pub stats: ErrorStatistics,
}

/// Compares adaptive and static amplification across noise models.
#[derive(Debug, Clone, Default)]
pub struct SweepEngine {
    policy: AmplificationPolicy,
}

impl SweepEngine {
    /// Creates an engine using the given amplification policy.
    pub fn new(policy: AmplificationPolicy) -> Self {
        Self { policy }
    }

    /// Returns the policy in use.
    pub fn policy(&self) -> &AmplificationPolicy {
        &self.policy
    }

    /// Evaluates a single grid point for one model.
    pub fn evaluate<R: Rng + ?Sized>(
        &self,
        key: &Key,
        model: NoiseModel,
        p: f64,
        rng: &mut R,
    ) -> Result<PointResult> {
        let noisy = apply_noise(key, p, model, rng)?;
        let stats = ErrorStatistics::analyze(key, &noisy)?;
        let retained = self.policy.retained_bits(key.len(), stats.confidence);

        tracing::debug!(
            model = model.name(),
            p,
            qber = stats.qber,
            entropy = stats.entropy,
            retained,
            "Evaluated grid point"
        );

        Ok(PointResult { retained, stats })
    }

    /// Runs the sweep with an independent stream per (model, grid) task.
    ///
    /// Results depend only on the schedule's master seed.
    pub fn run(
        &self,
        key: &Key,
        models: &[NoiseModel],
        grid: &SweepGrid,
        schedule: &SeedSchedule,
    ) -> Result<SummaryStatistics> {
        Self::check_inputs(key, models, grid)?;

        let mut points = Vec::with_capacity(models.len() * grid.len());
        for (mi, &model) in models.iter().enumerate() {
            for (gi, &p) in grid.points().iter().enumerate() {
                let mut rng = schedule.task_rng(mi, gi);
                points.push(self.evaluate(key, model, p, &mut rng)?);
            }
        }

        self.summarize(key, models, grid, points)
    }

    /// Runs the sweep drawing every task from one shared stream.
    ///
    /// Tasks consume randomness in model-list order, then grid order.
    pub fn run_with_rng<R: Rng + ?Sized>(
        &self,
        key: &Key,
        models: &[NoiseModel],
        grid: &SweepGrid,
        rng: &mut R,
    ) -> Result<SummaryStatistics> {
        Self::check_inputs(key, models, grid)?;

        let mut points = Vec::with_capacity(models.len() * grid.len());
        for &model in models {
            for &p in grid.points() {
                points.push(self.evaluate(key, model, p, rng)?);
            }
        }

        self.summarize(key, models, grid, points)
    }

    /// Parallel form of [`SweepEngine::run`].
    ///
    /// Produces the same statistics as `run` for the same schedule.
    #[cfg(feature = "parallel")]
    pub fn run_parallel(
        &self,
        key: &Key,
        models: &[NoiseModel],
        grid: &SweepGrid,
        schedule: &SeedSchedule,
    ) -> Result<SummaryStatistics> {
        use rayon::prelude::*;

        Self::check_inputs(key, models, grid)?;

        let tasks: Vec<(usize, usize)> = (0..models.len())
            .flat_map(|mi| (0..grid.len()).map(move |gi| (mi, gi)))
            .collect();

        // Indexed collect keeps task order
        let points = tasks
            .par_iter()
            .map(|&(mi, gi)| {
                let mut rng = schedule.task_rng(mi, gi);
                self.evaluate(key, models[mi], grid.points()[gi], &mut rng)
            })
            .collect::<Result<Vec<_>>>()?;

        self.summarize(key, models, grid, points)
    }

    fn check_inputs(key: &Key, models: &[NoiseModel], grid: &SweepGrid) -> Result<()> {
        if models.is_empty() {
            return Err(InvalidInput::EmptyModelList.into());
        }
        for (i, model) in models.iter().enumerate() {
            if models[..i].contains(model) {
                return Err(InvalidInput::DuplicateModel(*model).into());
            }
        }
        if grid.is_empty() {
            return Err(InvalidInput::EmptyGrid.into());
        }
        if key.is_empty() {
            return Err(InvalidInput::EmptyKey.into());
        }
        Ok(())
    }

    /// Splits row-major point results into curves and aggregates them.
    fn summarize(
        &self,
        key: &Key,
        models: &[NoiseModel],
        grid: &SweepGrid,
        points: Vec<PointResult>,
    ) -> Result<SummaryStatistics> {
        let curves = models
            .iter()
            .zip(points.chunks(grid.len()))
            .map(|(&model, row)| ModelCurve {
                model,
                retained: row.iter().map(|pt| pt.retained).collect(),
                observations: row.iter().map(|pt| pt.stats).collect(),
            })
            .collect();

        let baseline = static_baseline(key.len());
        let summary = SummaryStatistics::aggregate(grid.points(), key.len(), baseline, curves)?;

        tracing::info!(
            models = models.len(),
            grid_points = grid.len(),
            best = summary.best.model.name(),
            best_gain = summary.best.gain,
            worst = summary.worst.model.name(),
            worst_gain = summary.worst.gain,
            mean_gain = summary.mean_gain,
            "Sweep complete"
        );

        Ok(summary)
    }
}
