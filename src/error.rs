//! Error types shared across the simulation core.

use crate::channel::NoiseModel;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SimError>;

/// Top-level simulation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Caller supplied input that no statistics can be computed from.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    /// A corruption rule or aggregation step violated its own contract.
    ///
    /// Indicates a model-definition bug; never retried.
    #[error("simulation error: {0}")]
    Simulation(String),
}

/// Input validation failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    #[error("sweep grid is empty")]
    EmptyGrid,

    #[error("model list is empty")]
    EmptyModelList,

    #[error("model {0} listed more than once")]
    DuplicateModel(NoiseModel),

    #[error("key is empty")]
    EmptyKey,

    #[error("key length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("noise probability {0} outside [0, 1]")]
    ProbabilityOutOfRange(f64),

    #[error("error rate {0} outside [0, 1]")]
    ErrorRateOutOfRange(f64),

    #[error("invalid key symbol {symbol:?} at position {position}")]
    InvalidSymbol { position: usize, symbol: char },

    #[error("invalid grid bounds: start {start}, end {end}")]
    InvalidGridBounds { start: f64, end: f64 },
}

impl SimError {
    /// Returns true if the error was caused by caller input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, SimError::InvalidInput(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_converts() {
        let err: SimError = InvalidInput::EmptyGrid.into();
        assert!(err.is_invalid_input());
        assert_eq!(err.to_string(), "invalid input: sweep grid is empty");
    }

    #[test]
    fn test_simulation_error_not_input() {
        let err = SimError::Simulation("bad rule".into());
        assert!(!err.is_invalid_input());
    }
}
