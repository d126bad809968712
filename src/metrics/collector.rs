//! Metrics collection and registry.

use crate::sweep::SummaryStatistics;
use prometheus::{Encoder, Gauge, IntCounter, IntGauge, Registry, TextEncoder};
use thiserror::Error;

/// Errors that can occur during metrics operations.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

/// Prometheus metrics registry for sweep telemetry.
pub struct SweepMetrics {
    registry: Registry,

    // Work counters
    runs_total: IntCounter,
    evaluations_total: IntCounter,
    bits_disturbed_total: IntCounter,

    // Latest sweep outcome
    static_baseline_bits: IntGauge,
    best_gain_bits: Gauge,
    worst_gain_bits: Gauge,
    mean_gain_bits: Gauge,
    gain_at_max_probability_bits: Gauge,
}

impl SweepMetrics {
    /// Creates a new registry with all sweep metrics registered.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let runs_total = IntCounter::new("qkd_sweep_runs_total", "Completed sweeps")?;
        let evaluations_total = IntCounter::new(
            "qkd_sweep_evaluations_total",
            "Total (model, probability) points evaluated",
        )?;
        let bits_disturbed_total = IntCounter::new(
            "qkd_sweep_bits_disturbed_total",
            "Total key positions altered by channel noise",
        )?;

        let static_baseline_bits = IntGauge::new(
            "qkd_sweep_static_baseline_bits",
            "Retained bits under static amplification",
        )?;
        let best_gain_bits = Gauge::new(
            "qkd_sweep_best_gain_bits",
            "Average adaptive gain of the best model in the latest sweep",
        )?;
        let worst_gain_bits = Gauge::new(
            "qkd_sweep_worst_gain_bits",
            "Average adaptive gain of the worst model in the latest sweep",
        )?;
        let mean_gain_bits = Gauge::new(
            "qkd_sweep_mean_gain_bits",
            "Mean adaptive gain across all models in the latest sweep",
        )?;
        let gain_at_max_probability_bits = Gauge::new(
            "qkd_sweep_gain_at_max_probability_bits",
            "Mean adaptive gain at the highest swept probability",
        )?;

        registry.register(Box::new(runs_total.clone()))?;
        registry.register(Box::new(evaluations_total.clone()))?;
        registry.register(Box::new(bits_disturbed_total.clone()))?;
        registry.register(Box::new(static_baseline_bits.clone()))?;
        registry.register(Box::new(best_gain_bits.clone()))?;
        registry.register(Box::new(worst_gain_bits.clone()))?;
        registry.register(Box::new(mean_gain_bits.clone()))?;
        registry.register(Box::new(gain_at_max_probability_bits.clone()))?;

        Ok(Self {
            registry,
            runs_total,
            evaluations_total,
            bits_disturbed_total,
            static_baseline_bits,
            best_gain_bits,
            worst_gain_bits,
            mean_gain_bits,
            gain_at_max_probability_bits,
        })
    }

    /// Records a completed sweep.
    pub fn record(&self, summary: &SummaryStatistics) {
        self.runs_total.inc();

        let evaluations: usize = summary.curves.iter().map(|c| c.retained.len()).sum();
        self.evaluations_total.inc_by(evaluations as u64);

        let disturbed: usize = summary
            .curves
            .iter()
            .flat_map(|c| c.observations.iter())
            .map(|o| o.disturbed)
            .sum();
        self.bits_disturbed_total.inc_by(disturbed as u64);

        self.static_baseline_bits.set(summary.static_baseline as i64);
        self.best_gain_bits.set(summary.best.gain);
        self.worst_gain_bits.set(summary.worst.gain);
        self.mean_gain_bits.set(summary.mean_gain);
        self.gain_at_max_probability_bits
            .set(summary.gain_at_max_probability);
    }

    /// Returns the underlying Prometheus registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encodes all metrics in Prometheus text format.
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ErrorStatistics;
    use crate::channel::NoiseModel;
    use crate::sweep::ModelCurve;

    fn observation(disturbed: usize) -> ErrorStatistics {
        ErrorStatistics {
            disturbed,
            qber: disturbed as f64 / 10.0,
            entropy: 0.0,
            confidence: 1.0,
        }
    }

    fn summary() -> SummaryStatistics {
        let curves = vec![
            ModelCurve {
                model: NoiseModel::BitFlip,
                retained: vec![10, 5],
                observations: vec![observation(0), observation(3)],
            },
            ModelCurve {
                model: NoiseModel::PhaseFlip,
                retained: vec![10, 10],
                observations: vec![observation(0), observation(0)],
            },
        ];
        SummaryStatistics::aggregate(&[0.0, 0.3], 10, 5, curves).unwrap()
    }

    #[test]
    fn test_registry_creation() {
        let metrics = SweepMetrics::new().unwrap();
        assert!(!metrics.registry().gather().is_empty());
    }

    #[test]
    fn test_record_updates_counters() {
        let metrics = SweepMetrics::new().unwrap();
        metrics.record(&summary());
        metrics.record(&summary());

        assert_eq!(metrics.runs_total.get(), 2);
        assert_eq!(metrics.evaluations_total.get(), 8);
        assert_eq!(metrics.bits_disturbed_total.get(), 6);
        assert_eq!(metrics.static_baseline_bits.get(), 5);
        assert_eq!(metrics.best_gain_bits.get(), 5.0);
        assert_eq!(metrics.worst_gain_bits.get(), 2.5);
    }

    #[test]
    fn test_encode_contains_metric_names() {
        let metrics = SweepMetrics::new().unwrap();
        metrics.record(&summary());

        let output = metrics.encode().unwrap();
        assert!(output.contains("qkd_sweep_runs_total"));
        assert!(output.contains("qkd_sweep_best_gain_bits"));
        assert!(output.contains("qkd_sweep_mean_gain_bits"));
    }
}
