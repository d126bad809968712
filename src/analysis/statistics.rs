//! Error-rate and entropy measurements between two keys.

use crate::error::{InvalidInput, Result};
use crate::key::Key;
use serde::Serialize;

/// Quantum bit error rate: fraction of positions where the keys differ.
///
/// Fails on length mismatch or empty keys.
pub fn qber(original: &Key, noisy: &Key) -> Result<f64> {
    let errors = original.hamming_distance(noisy)?;
    if original.is_empty() {
        return Err(InvalidInput::EmptyKey.into());
    }
    Ok(errors as f64 / original.len() as f64)
}

/// Binary Shannon entropy H(q) in bits.
///
/// H(0) = H(1) = 0 by convention. Errors for q outside [0, 1].
pub fn shannon_entropy(q: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&q) {
        return Err(InvalidInput::ErrorRateOutOfRange(q).into());
    }
    if q == 0.0 || q == 1.0 {
        return Ok(0.0);
    }
    Ok(-q * q.log2() - (1.0 - q) * (1.0 - q).log2())
}

/// Confidence score `1 - H(q)` fed to the amplification policy.
pub fn confidence(q: f64) -> Result<f64> {
    Ok(1.0 - shannon_entropy(q)?)
}

/// Measurements derived from comparing an original and a noisy key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ErrorStatistics {
    /// Number of positions that differ.
    pub disturbed: usize,
    /// Quantum bit error rate.
    pub qber: f64,
    /// Binary entropy of the error rate.
    pub entropy: f64,
    /// `1 - entropy`.
    pub confidence: f64,
}

impl ErrorStatistics {
    /// Compares two keys and derives all measurements.
    pub fn analyze(original: &Key, noisy: &Key) -> Result<Self> {
        let disturbed = original.hamming_distance(noisy)?;
        let qber = qber(original, noisy)?;
        let entropy = shannon_entropy(qber)?;

        Ok(Self {
            disturbed,
            qber,
            entropy,
            confidence: 1.0 - entropy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> Key {
        s.parse().unwrap()
    }

    #[test]
    fn test_qber_identical_is_zero() {
        let k = key("10110010");
        assert_eq!(qber(&k, &k).unwrap(), 0.0);
    }

    #[test]
    fn test_qber_symmetric() {
        let a = key("10110010");
        let b = key("00111011");
        assert_eq!(qber(&a, &b).unwrap(), qber(&b, &a).unwrap());
        assert_eq!(qber(&a, &b).unwrap(), 3.0 / 8.0);
    }

    #[test]
    fn test_qber_length_mismatch() {
        let err = qber(&key("101"), &key("1010")).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_qber_empty_keys() {
        let empty = Key::from_bits(Vec::new());
        assert!(qber(&empty, &empty).is_err());
    }

    #[test]
    fn test_entropy_endpoints() {
        assert_eq!(shannon_entropy(0.0).unwrap(), 0.0);
        assert_eq!(shannon_entropy(1.0).unwrap(), 0.0);
        assert!((shannon_entropy(0.5).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_entropy_symmetric_about_half() {
        let a = shannon_entropy(0.11).unwrap();
        let b = shannon_entropy(0.89).unwrap();
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn test_entropy_out_of_domain() {
        assert!(shannon_entropy(-0.01).is_err());
        assert!(shannon_entropy(1.01).is_err());
        assert!(shannon_entropy(f64::NAN).is_err());
    }

    #[test]
    fn test_error_statistics() {
        let stats = ErrorStatistics::analyze(&key("0000"), &key("0001")).unwrap();
        assert_eq!(stats.disturbed, 1);
        assert_eq!(stats.qber, 0.25);
        assert!((stats.confidence - (1.0 - stats.entropy)).abs() < 1e-12);
        assert!((stats.entropy - 0.811_278_124_459_132_8).abs() < 1e-9);
    }
}
