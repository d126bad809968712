//! Noise model registry and per-symbol corruption rules.

use crate::key::Bit;
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Standard deviation of the Gaussian Bosonic channel's thermal term.
pub const GAUSSIAN_STD_DEV: f64 = 0.1;

/// Gaussian Bosonic disturbance threshold on `g + p`.
pub const GAUSSIAN_THRESHOLD: f64 = 0.15;

/// Share of `p` driving 1→0 decay under generalized amplitude damping.
pub const GAD_DECAY_WEIGHT: f64 = 0.6;

/// Share of `p` driving 0→1 excitation under generalized amplitude damping.
pub const GAD_EXCITE_WEIGHT: f64 = 0.4;

/// A per-symbol corruption rule.
///
/// Implementors receive the symbol, its 0-based position, the nominal
/// disturbance probability and a uniform draw `r` in [0, 1) that the
/// caller has already taken for this position. Any further randomness
/// a rule needs is drawn from `rng`.
pub trait CorruptionRule {
    /// Returns the (possibly disturbed) symbol.
    fn corrupt<R: Rng + ?Sized>(
        &self,
        bit: Bit,
        position: usize,
        p: f64,
        r: f64,
        rng: &mut R,
    ) -> Bit;
}

/// Identity rule used for model names outside the registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl CorruptionRule for PassThrough {
    fn corrupt<R: Rng + ?Sized>(&self, bit: Bit, _: usize, _: f64, _: f64, _: &mut R) -> Bit {
        bit
    }
}

/// The twelve supported noise-channel models.
///
/// A model is a pure behavioral tag with no internal state. The
/// bit-level rules are simplified heuristics, not density-matrix
/// evolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoiseModel {
    #[serde(rename = "Bit Flip")]
    BitFlip,
    #[serde(rename = "Phase Flip")]
    PhaseFlip,
    #[serde(rename = "Bit-Phase Flip")]
    BitPhaseFlip,
    #[serde(rename = "Depolarizing")]
    Depolarizing,
    #[serde(rename = "Amplitude Damping")]
    AmplitudeDamping,
    #[serde(rename = "Generalized Amplitude Damping")]
    GeneralizedAmplitudeDamping,
    #[serde(rename = "Phase Damping")]
    PhaseDamping,
    #[serde(rename = "Non-Markovian")]
    NonMarkovian,
    #[serde(rename = "Collective Correlated")]
    CollectiveCorrelated,
    #[serde(rename = "Gaussian Bosonic")]
    GaussianBosonic,
    #[serde(rename = "Polarization Mode Dispersion")]
    PolarizationModeDispersion,
    #[serde(rename = "Photon Number Splitting")]
    PhotonNumberSplitting,
}

impl NoiseModel {
    /// Canonical registry order. Ties in best/worst selection resolve
    /// to the earlier entry.
    pub const ALL: [NoiseModel; 12] = [
        NoiseModel::BitFlip,
        NoiseModel::PhaseFlip,
        NoiseModel::BitPhaseFlip,
        NoiseModel::Depolarizing,
        NoiseModel::AmplitudeDamping,
        NoiseModel::GeneralizedAmplitudeDamping,
        NoiseModel::PhaseDamping,
        NoiseModel::NonMarkovian,
        NoiseModel::CollectiveCorrelated,
        NoiseModel::GaussianBosonic,
        NoiseModel::PolarizationModeDispersion,
        NoiseModel::PhotonNumberSplitting,
    ];

    /// Display name of the model.
    pub fn name(self) -> &'static str {
        match self {
            NoiseModel::BitFlip => "Bit Flip",
            NoiseModel::PhaseFlip => "Phase Flip",
            NoiseModel::BitPhaseFlip => "Bit-Phase Flip",
            NoiseModel::Depolarizing => "Depolarizing",
            NoiseModel::AmplitudeDamping => "Amplitude Damping",
            NoiseModel::GeneralizedAmplitudeDamping => "Generalized Amplitude Damping",
            NoiseModel::PhaseDamping => "Phase Damping",
            NoiseModel::NonMarkovian => "Non-Markovian",
            NoiseModel::CollectiveCorrelated => "Collective Correlated",
            NoiseModel::GaussianBosonic => "Gaussian Bosonic",
            NoiseModel::PolarizationModeDispersion => "Polarization Mode Dispersion",
            NoiseModel::PhotonNumberSplitting => "Photon Number Splitting",
        }
    }

    /// Looks up a model by display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }

    /// Position of the model in [`NoiseModel::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns true if the model never alters a symbol.
    pub fn is_pass_through(self) -> bool {
        matches!(
            self,
            NoiseModel::PhaseFlip | NoiseModel::PhaseDamping | NoiseModel::PhotonNumberSplitting
        )
    }
}

#[inline]
fn flip_if(bit: Bit, r: f64, threshold: f64) -> Bit {
    if r < threshold {
        bit.flip()
    } else {
        bit
    }
}

/// Gaussian Bosonic step for a given thermal sample `g`.
///
/// Replaces the symbol with a random one when `g + p` exceeds
/// [`GAUSSIAN_THRESHOLD`].
pub fn bosonic_disturb<R: Rng + ?Sized>(bit: Bit, p: f64, g: f64, rng: &mut R) -> Bit {
    if g + p > GAUSSIAN_THRESHOLD {
        Bit::random(rng)
    } else {
        bit
    }
}

impl CorruptionRule for NoiseModel {
    fn corrupt<R: Rng + ?Sized>(
        &self,
        bit: Bit,
        position: usize,
        p: f64,
        r: f64,
        rng: &mut R,
    ) -> Bit {
        match self {
            NoiseModel::BitFlip | NoiseModel::BitPhaseFlip | NoiseModel::CollectiveCorrelated => {
                flip_if(bit, r, p)
            }
            // Phase errors leave no trace in the computational basis
            NoiseModel::PhaseFlip | NoiseModel::PhaseDamping => bit,
            NoiseModel::Depolarizing => {
                if r < p {
                    Bit::random(rng)
                } else {
                    bit
                }
            }
            NoiseModel::AmplitudeDamping => match bit {
                Bit::One if r < p => Bit::Zero,
                _ => bit,
            },
            NoiseModel::GeneralizedAmplitudeDamping => match bit {
                Bit::One if r < p * GAD_DECAY_WEIGHT => Bit::Zero,
                Bit::Zero if r < p * GAD_EXCITE_WEIGHT => Bit::One,
                _ => bit,
            },
            NoiseModel::NonMarkovian => {
                if r < p && position % 2 == 0 {
                    Bit::random(rng)
                } else {
                    bit
                }
            }
            NoiseModel::GaussianBosonic => {
                let g = GAUSSIAN_STD_DEV * rng.sample::<f64, _>(StandardNormal);
                bosonic_disturb(bit, p, g, rng)
            }
            NoiseModel::PolarizationModeDispersion => flip_if(bit, r, p / 2.0),
            // Sets a 1 to 1 when triggered; no observable effect.
            NoiseModel::PhotonNumberSplitting => match bit {
                Bit::One if r < p => Bit::One,
                _ => bit,
            },
        }
    }
}

impl fmt::Display for NoiseModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unrecognized model name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown noise model {0:?}")]
pub struct UnknownModel(pub String);

impl FromStr for NoiseModel {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownModel(s.to_string()))
    }
}
