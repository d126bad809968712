//! Applying a noise model to a whole key.

use super::model::{CorruptionRule, NoiseModel, PassThrough};
use crate::error::{InvalidInput, Result, SimError};
use crate::key::Key;
use rand::Rng;

/// Rejects probabilities outside [0, 1] (including NaN).
pub fn validate_probability(p: f64) -> Result<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(InvalidInput::ProbabilityOutOfRange(p).into())
    }
}

/// Passes every symbol of `key` through `rule`.
///
/// One uniform draw is taken per position before the rule runs; the
/// rule may take more. The input key is left untouched.
pub fn apply_rule<C, R>(key: &Key, p: f64, rule: &C, rng: &mut R) -> Result<Key>
where
    C: CorruptionRule,
    R: Rng + ?Sized,
{
    validate_probability(p)?;

    let bits = key
        .bits()
        .iter()
        .enumerate()
        .map(|(i, &bit)| {
            let r: f64 = rng.gen();
            rule.corrupt(bit, i, p, r, &mut *rng)
        })
        .collect::<Vec<_>>();

    if bits.len() != key.len() {
        return Err(SimError::Simulation(format!(
            "corruption rule changed key length from {} to {}",
            key.len(),
            bits.len()
        )));
    }

    Ok(Key::from_bits(bits))
}

/// Produces a noisy copy of `key` under `model` at probability `p`.
pub fn apply_noise<R: Rng + ?Sized>(
    key: &Key,
    p: f64,
    model: NoiseModel,
    rng: &mut R,
) -> Result<Key> {
    let noisy = apply_rule(key, p, &model, rng)?;

    tracing::trace!(
        model = model.name(),
        p,
        len = key.len(),
        "Applied channel noise"
    );

    Ok(noisy)
}

/// Like [`apply_noise`], but selects the model by display name.
///
/// Unrecognized names pass the key through unchanged.
pub fn apply_noise_by_name<R: Rng + ?Sized>(
    key: &Key,
    p: f64,
    name: &str,
    rng: &mut R,
) -> Result<Key> {
    match NoiseModel::from_name(name) {
        Some(model) => apply_noise(key, p, model, rng),
        None => {
            tracing::debug!(model = name, "Unrecognized noise model, passing key through");
            apply_rule(key, p, &PassThrough, rng)
        }
    }
}
