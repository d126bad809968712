//! Adaptive privacy-amplification policy.
//!
//! Maps a confidence score to the fraction of the raw key judged safe
//! to retain. The static comparison point keeps half the key
//! regardless of channel conditions.

use serde::{Deserialize, Serialize};

/// One step of the policy: at or above `min_confidence`, keep `fraction`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmplificationTier {
    /// Inclusive lower bound on confidence.
    pub min_confidence: f64,
    /// Retained fraction of the key.
    pub fraction: f64,
}

/// Threshold table for adaptive amplification.
///
/// Tiers are checked in order and the first match wins, so they must
/// be listed with descending `min_confidence`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmplificationPolicy {
    /// Ordered tiers, highest confidence first.
    pub tiers: Vec<AmplificationTier>,
    /// Fraction used when no tier matches.
    pub floor_fraction: f64,
}

impl Default for AmplificationPolicy {
    fn default() -> Self {
        Self {
            tiers: vec![
                AmplificationTier {
                    min_confidence: 0.9,
                    fraction: 1.0,
                },
                AmplificationTier {
                    min_confidence: 0.75,
                    fraction: 0.75,
                },
                AmplificationTier {
                    min_confidence: 0.6,
                    fraction: 0.6,
                },
            ],
            floor_fraction: 0.5,
        }
    }
}

impl AmplificationPolicy {
    /// Returns the retained fraction for a confidence score.
    pub fn fraction(&self, confidence: f64) -> f64 {
        self.tiers
            .iter()
            .find(|tier| confidence >= tier.min_confidence)
            .map_or(self.floor_fraction, |tier| tier.fraction)
    }

    /// Number of key bits retained for a key of `key_len` symbols.
    ///
    /// Always within [0, key_len].
    pub fn retained_bits(&self, key_len: usize, confidence: f64) -> usize {
        let bits = (key_len as f64 * self.fraction(confidence)).floor() as usize;
        bits.min(key_len)
    }

    /// Checks the table is well formed.
    pub fn validate(&self) -> Result<(), PolicyViolation> {
        let fractions = self
            .tiers
            .iter()
            .map(|t| t.fraction)
            .chain(std::iter::once(self.floor_fraction));
        for fraction in fractions {
            if !(fraction > 0.0 && fraction <= 1.0) {
                return Err(PolicyViolation::FractionOutOfRange(fraction));
            }
        }

        for pair in self.tiers.windows(2) {
            if pair[1].min_confidence >= pair[0].min_confidence {
                return Err(PolicyViolation::TiersNotDescending {
                    previous: pair[0].min_confidence,
                    next: pair[1].min_confidence,
                });
            }
            if pair[1].fraction > pair[0].fraction {
                return Err(PolicyViolation::NotMonotonic {
                    previous: pair[0].fraction,
                    next: pair[1].fraction,
                });
            }
        }

        if let Some(last) = self.tiers.last() {
            if self.floor_fraction > last.fraction {
                return Err(PolicyViolation::NotMonotonic {
                    previous: last.fraction,
                    next: self.floor_fraction,
                });
            }
        }

        Ok(())
    }
}

/// Malformed policy tables.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PolicyViolation {
    #[error("retained fraction {0} outside (0, 1]")]
    FractionOutOfRange(f64),

    #[error("tier thresholds not descending: {previous} then {next}")]
    TiersNotDescending { previous: f64, next: f64 },

    #[error("retained fraction increases from {previous} to {next} as confidence drops")]
    NotMonotonic { previous: f64, next: f64 },
}

/// Retained fraction under the default policy.
pub fn adaptive_amplification(confidence: f64) -> f64 {
    AmplificationPolicy::default().fraction(confidence)
}

/// Noise-independent retained count: half the key, rounded down.
pub fn static_baseline(key_len: usize) -> usize {
    key_len / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tiers() {
        assert_eq!(adaptive_amplification(0.95), 1.0);
        assert_eq!(adaptive_amplification(0.8), 0.75);
        assert_eq!(adaptive_amplification(0.65), 0.6);
        assert_eq!(adaptive_amplification(0.1), 0.5);
    }

    #[test]
    fn test_thresholds_inclusive() {
        assert_eq!(adaptive_amplification(0.9), 1.0);
        assert_eq!(adaptive_amplification(0.75), 0.75);
        assert_eq!(adaptive_amplification(0.6), 0.6);
    }

    #[test]
    fn test_retained_bits_floor() {
        let policy = AmplificationPolicy::default();
        assert_eq!(policy.retained_bits(512, 1.0), 512);
        assert_eq!(policy.retained_bits(512, 0.8), 384);
        assert_eq!(policy.retained_bits(7, 0.65), 4);
        assert_eq!(policy.retained_bits(7, 0.0), 3);
    }

    #[test]
    fn test_static_baseline() {
        assert_eq!(static_baseline(512), 256);
        assert_eq!(static_baseline(7), 3);
    }

    #[test]
    fn test_default_policy_valid() {
        assert!(AmplificationPolicy::default().validate().is_ok());
    }

    #[test]
    fn test_unordered_tiers_rejected() {
        let mut policy = AmplificationPolicy::default();
        policy.tiers.swap(0, 1);
        assert!(matches!(
            policy.validate(),
            Err(PolicyViolation::TiersNotDescending { .. })
        ));
    }

    #[test]
    fn test_zero_fraction_rejected() {
        let policy = AmplificationPolicy {
            floor_fraction: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            policy.validate(),
            Err(PolicyViolation::FractionOutOfRange(_))
        ));
    }
}
