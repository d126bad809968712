//! Error-rate metrics and the adaptive amplification policy.
//!
//! QBER and binary entropy quantify how much a channel disturbed the
//! key. The policy turns the resulting confidence into a retained-bit
//! count. This is a fraction decision, not hash-based compression.

mod policy;
mod statistics;

pub use policy::{
    adaptive_amplification, static_baseline, AmplificationPolicy, AmplificationTier,
    PolicyViolation,
};
pub use statistics::{confidence, qber, shannon_entropy, ErrorStatistics};
