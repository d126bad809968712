//! Bit-level quantum-channel noise.
//!
//! Each [`NoiseModel`] maps to a simplified per-symbol corruption rule.
//! Noise application is length-preserving and consumes randomness only
//! from the generator the caller passes in.

mod model;
mod noise;

pub use model::{
    bosonic_disturb, CorruptionRule, NoiseModel, PassThrough, UnknownModel, GAD_DECAY_WEIGHT,
    GAD_EXCITE_WEIGHT, GAUSSIAN_STD_DEV, GAUSSIAN_THRESHOLD,
};
pub use noise::{apply_noise, apply_noise_by_name, apply_rule, validate_probability};
