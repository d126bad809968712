//! Bit and key types.

use crate::error::{InvalidInput, Result};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// A single binary symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    /// Returns the opposite symbol.
    #[inline]
    pub fn flip(self) -> Self {
        match self {
            Bit::Zero => Bit::One,
            Bit::One => Bit::Zero,
        }
    }

    /// Draws a uniformly random symbol.
    #[inline]
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Bit::from(rng.gen::<bool>())
    }

    /// Returns the character form ('0' or '1').
    #[inline]
    pub fn as_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        if value {
            Bit::One
        } else {
            Bit::Zero
        }
    }
}

/// An ordered, fixed-length binary key.
///
/// Immutable once built: every operation that disturbs a key returns
/// a new one.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Key {
    bits: Vec<Bit>,
}

impl Key {
    /// Creates a key from a vector of bits.
    pub fn from_bits(bits: Vec<Bit>) -> Self {
        Self { bits }
    }

    /// Generates a uniformly random key of the given length.
    pub fn random<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Self {
        Self {
            bits: (0..len).map(|_| Bit::random(rng)).collect(),
        }
    }

    /// Returns the bits as a slice.
    #[inline]
    pub fn bits(&self) -> &[Bit] {
        &self.bits
    }

    /// Returns the number of symbols.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns true if the key holds no symbols.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Counts the `1` symbols.
    pub fn ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b == Bit::One).count()
    }

    /// Counts positions at which two keys differ.
    ///
    /// Fails if the lengths differ.
    pub fn hamming_distance(&self, other: &Key) -> Result<usize> {
        if self.len() != other.len() {
            return Err(InvalidInput::LengthMismatch {
                left: self.len(),
                right: other.len(),
            }
            .into());
        }

        Ok(self
            .bits
            .iter()
            .zip(other.bits.iter())
            .filter(|(a, b)| a != b)
            .count())
    }
}

impl FromStr for Key {
    type Err = InvalidInput;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let bits = s
            .chars()
            .enumerate()
            .map(|(position, symbol)| match symbol {
                '0' => Ok(Bit::Zero),
                '1' => Ok(Bit::One),
                _ => Err(InvalidInput::InvalidSymbol { position, symbol }),
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self { bits })
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            write!(f, "{}", bit.as_char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("len", &self.bits.len())
            .field("ones", &self.ones())
            .finish()
    }
}
