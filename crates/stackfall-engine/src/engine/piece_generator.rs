use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{PieceKind, PieceRotation};

/// Seed for deterministic piece generation.
///
/// A 128-bit seed for the piece generator's random number generator. The
/// same seed always yields the same sequence of pieces and rotations, which
/// makes games reproducible for tests and simulations.
///
/// Seeds are written as 32 hexadecimal characters, both by [`fmt::Display`]
/// and by serde.
///
/// # Example
///
/// ```
/// use stackfall_engine::PieceSeed;
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
/// let parsed: PieceSeed = seed.to_string().parse().unwrap();
/// assert_eq!(seed, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed {input:?}: {reason}")]
pub struct ParseSeedError {
    input: String,
    reason: String,
}

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = |reason: String| ParseSeedError {
            input: s.to_owned(),
            reason,
        };
        if s.len() != 32 {
            return Err(error(format!("expected 32 characters, got {}", s.len())));
        }
        // `from_str_radix` accepts a leading sign, which is not hex.
        if !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(error("expected only hexadecimal digits".to_owned()));
        }
        let num = u128::from_str_radix(s, 16).map_err(|e| error(e.to_string()))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

/// Source of new pieces.
///
/// Every draw picks a piece kind uniformly from the seven kinds and,
/// independently, a rotation uniformly from the four rotations.
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    seed: PieceSeed,
    rng: Pcg32,
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceGenerator {
    /// Creates a generator with a random seed.
    ///
    /// For deterministic piece generation, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            seed,
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Returns the seed this generator was created with.
    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.seed
    }

    /// Draws the kind and spawn rotation of the next piece.
    pub fn pop_next(&mut self) -> (PieceKind, PieceRotation) {
        let kind = self.rng.random();
        let rotation = self.rng.random();
        (kind, rotation)
    }
}
