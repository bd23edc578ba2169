use std::{fmt, str::FromStr};

use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for the random source driving an evolution run.
///
/// This is a 128-bit (16-byte) seed for the PCG generator owned by a
/// [`Population`](crate::population::Population). Shuffling, parent sampling,
/// gene draws and splice positions all come from that one generator, so two
/// populations built from the same seed, corpus and configuration evolve
/// identically.
///
/// The seed is written as a 32-character hexadecimal string, both by
/// [`Display`](fmt::Display) and in serialized form.
///
/// # Example
///
/// ```
/// use codename_core::seed::EvolutionSeed;
/// use rand::Rng as _;
///
/// let seed: EvolutionSeed = rand::rng().random();
/// let parsed: EvolutionSeed = seed.to_string().parse().unwrap();
/// assert_eq!(seed, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvolutionSeed([u8; 16]);

impl EvolutionSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

impl From<u128> for EvolutionSeed {
    fn from(value: u128) -> Self {
        Self(value.to_be_bytes())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    #[display("invalid seed: expected 32 hex characters, got {_0}")]
    InvalidLength(#[error(not(source))] usize),
    #[display("invalid seed: {_0} is not hexadecimal")]
    InvalidDigit(#[error(not(source))] String),
}

impl FromStr for EvolutionSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseSeedError::InvalidLength(s.len()));
        }
        // from_str_radix alone would accept a leading sign
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseSeedError::InvalidDigit(s.to_owned()));
        }
        let num =
            u128::from_str_radix(s, 16).map_err(|_| ParseSeedError::InvalidDigit(s.to_owned()))?;
        Ok(Self::from(num))
    }
}

impl fmt::Display for EvolutionSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl Serialize for EvolutionSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EvolutionSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `EvolutionSeed` values with `rng.random()`.
impl Distribution<EvolutionSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> EvolutionSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        EvolutionSeed(seed)
    }
}
