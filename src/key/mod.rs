//! Binary key material.
//!
//! A [`Key`] is the shared secret bitstring produced by a key
//! distribution exchange. Noise channels never mutate a key in place;
//! they produce a fresh key of identical length.

mod bits;

pub use bits::{Bit, Key};
