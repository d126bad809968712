//! Sweep configuration.
//!
//! Defaults reproduce the reference comparison: a 512-bit key, twelve
//! probabilities evenly spaced over [0.01, 0.3], and all twelve models.

use crate::analysis::{AmplificationPolicy, PolicyViolation};
use crate::channel::NoiseModel;
use crate::error::SimError;
use crate::seeding::SeedSchedule;
use crate::sweep::{SweepGrid, DEFAULT_GRID_END, DEFAULT_GRID_POINTS, DEFAULT_GRID_START};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default length of the generated original key.
pub const DEFAULT_KEY_LENGTH: usize = 512;

/// Parameters of a single comparison run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Length of the original key in bits.
    pub key_length: usize,
    /// First grid probability.
    pub grid_start: f64,
    /// Last grid probability.
    pub grid_end: f64,
    /// Number of evenly spaced grid samples.
    pub grid_points: usize,
    /// Models to compare, in tie-breaking order.
    pub models: Vec<NoiseModel>,
    /// Master seed; drawn from the OS when absent.
    pub seed: Option<u64>,
    /// Evaluate tasks in parallel (requires the `parallel` feature).
    pub parallel: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            key_length: DEFAULT_KEY_LENGTH,
            grid_start: DEFAULT_GRID_START,
            grid_end: DEFAULT_GRID_END,
            grid_points: DEFAULT_GRID_POINTS,
            models: NoiseModel::ALL.to_vec(),
            seed: None,
            parallel: false,
        }
    }
}

impl SweepConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key_length == 0 {
            return Err(ConfigError::InvalidKeyLength);
        }
        if self.models.is_empty() {
            return Err(ConfigError::NoModels);
        }
        for (i, model) in self.models.iter().enumerate() {
            if self.models[..i].contains(model) {
                return Err(ConfigError::DuplicateModel(*model));
            }
        }
        self.grid()?;
        Ok(())
    }

    /// Builds the probability grid.
    pub fn grid(&self) -> Result<SweepGrid, ConfigError> {
        SweepGrid::linspace(self.grid_start, self.grid_end, self.grid_points)
            .map_err(ConfigError::InvalidGrid)
    }

    /// Builds the seed schedule.
    pub fn schedule(&self) -> SeedSchedule {
        match self.seed {
            Some(seed) => SeedSchedule::from_u64(seed),
            None => SeedSchedule::from_os_entropy(),
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("key length must be positive")]
    InvalidKeyLength,
    #[error("at least one noise model is required")]
    NoModels,
    #[error("noise model {0} listed more than once")]
    DuplicateModel(NoiseModel),
    #[error("invalid grid: {0}")]
    InvalidGrid(SimError),
    #[error("invalid amplification policy: {0}")]
    InvalidPolicy(#[from] PolicyViolation),
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub sweep: SweepConfig,
    #[serde(default)]
    pub policy: AmplificationPolicy,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: FileConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sweep.validate()?;
        self.policy.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sweep.grid().unwrap(), SweepGrid::default());
    }

    #[test]
    fn test_zero_key_length_invalid() {
        let config = SweepConfig {
            key_length: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidKeyLength)));
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = FileConfig::from_toml("").unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_parse_sections() {
        let config = FileConfig::from_toml(
            r#"
            [sweep]
            key_length = 64
            grid_points = 3
            models = ["Bit Flip", "Gaussian Bosonic"]
            seed = 9

            [policy]
            floor_fraction = 0.4
            tiers = [
                { min_confidence = 0.8, fraction = 0.9 },
                { min_confidence = 0.5, fraction = 0.6 },
            ]
            "#,
        )
        .unwrap();

        assert_eq!(config.sweep.key_length, 64);
        assert_eq!(config.sweep.grid_start, DEFAULT_GRID_START);
        assert_eq!(
            config.sweep.models,
            vec![NoiseModel::BitFlip, NoiseModel::GaussianBosonic]
        );
        assert_eq!(config.sweep.seed, Some(9));
        assert_eq!(config.policy.tiers.len(), 2);
        assert_eq!(config.policy.fraction(0.1), 0.4);
    }

    #[test]
    fn test_unknown_model_rejected() {
        let result = FileConfig::from_toml(
            r#"
            [sweep]
            models = ["Thermal"]
            "#,
        );
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_duplicate_model_rejected() {
        let result = FileConfig::from_toml(
            r#"
            [sweep]
            models = ["Bit Flip", "Depolarizing", "Bit Flip"]
            "#,
        );
        assert!(matches!(
            result,
            Err(ConfigError::DuplicateModel(NoiseModel::BitFlip))
        ));
    }

    #[test]
    fn test_bad_grid_rejected() {
        let result = FileConfig::from_toml(
            r#"
            [sweep]
            grid_start = 0.5
            grid_end = 0.1
            "#,
        );
        assert!(matches!(result, Err(ConfigError::InvalidGrid(_))));
    }

    #[test]
    fn test_bad_policy_rejected() {
        let result = FileConfig::from_toml(
            r#"
            [policy]
            floor_fraction = 1.5
            tiers = []
            "#,
        );
        assert!(matches!(result, Err(ConfigError::InvalidPolicy(_))));
    }
}
