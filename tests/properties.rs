//! Property tests over the noise, metric and policy layers.

use proptest::prelude::*;
use qkd_noise_sweep::{
    adaptive_amplification, apply_noise, qber, shannon_entropy, Bit, Key, NoiseModel,
    SeedSchedule, SweepEngine, SweepGrid,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn arb_key() -> impl Strategy<Value = Key> {
    prop::collection::vec(any::<bool>(), 1..256)
        .prop_map(|bits| Key::from_bits(bits.into_iter().map(Bit::from).collect()))
}

fn arb_model() -> impl Strategy<Value = NoiseModel> {
    (0..NoiseModel::ALL.len()).prop_map(|i| NoiseModel::ALL[i])
}

proptest! {
    #[test]
    fn noise_preserves_length(key in arb_key(), p in 0.0f64..=1.0, model in arb_model(), seed: u64) {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let noisy = apply_noise(&key, p, model, &mut rng).unwrap();
        prop_assert_eq!(noisy.len(), key.len());
    }

    #[test]
    fn phase_models_never_alter(key in arb_key(), p in 0.0f64..=1.0, seed: u64) {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        for model in [NoiseModel::PhaseFlip, NoiseModel::PhaseDamping, NoiseModel::PhotonNumberSplitting] {
            let noisy = apply_noise(&key, p, model, &mut rng).unwrap();
            prop_assert_eq!(&noisy, &key);
        }
    }

    #[test]
    fn amplitude_damping_never_raises_bits(key in arb_key(), p in 0.0f64..=1.0, seed: u64) {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let noisy = apply_noise(&key, p, NoiseModel::AmplitudeDamping, &mut rng).unwrap();
        for (a, b) in key.bits().iter().zip(noisy.bits()) {
            prop_assert!(!(*a == Bit::Zero && *b == Bit::One));
        }
    }

    #[test]
    fn qber_is_symmetric_and_bounded(a in arb_key(), seed: u64) {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let b = Key::random(a.len(), &mut rng);

        let ab = qber(&a, &b).unwrap();
        let ba = qber(&b, &a).unwrap();
        prop_assert_eq!(ab, ba);
        prop_assert!((0.0..=1.0).contains(&ab));
        prop_assert_eq!(qber(&a, &a).unwrap(), 0.0);
    }

    #[test]
    fn entropy_bounded_by_half(q in 0.0f64..=1.0) {
        let h = shannon_entropy(q).unwrap();
        prop_assert!(h >= 0.0);
        prop_assert!(h <= shannon_entropy(0.5).unwrap() + 1e-12);
    }

    #[test]
    fn policy_monotonic(a in -0.5f64..1.5, b in -0.5f64..1.5) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let f_lo = adaptive_amplification(lo);
        let f_hi = adaptive_amplification(hi);
        prop_assert!(f_lo <= f_hi);
        prop_assert!([0.5, 0.6, 0.75, 1.0].contains(&f_hi));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn best_and_worst_bound_all_gains(seed: u64, len in 16usize..128) {
        let schedule = SeedSchedule::from_u64(seed);
        let key = Key::random(len, &mut schedule.key_rng());
        let summary = SweepEngine::default()
            .run(&key, &NoiseModel::ALL, &SweepGrid::default(), &schedule)
            .unwrap();

        prop_assert_eq!(summary.model_gains.len(), NoiseModel::ALL.len());
        for entry in &summary.model_gains {
            prop_assert!(summary.best.gain >= entry.gain);
            prop_assert!(summary.worst.gain <= entry.gain);
        }
        for j in 0..summary.grid.len() {
            prop_assert!(summary.min_curve[j] as f64 <= summary.mean_curve[j]);
            prop_assert!(summary.mean_curve[j] <= summary.max_curve[j] as f64);
            prop_assert!(summary.max_curve[j] <= len);
        }
    }
}
