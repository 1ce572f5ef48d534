//! Per-stream seed derivation.
//!
//! A run is identified by one 64-bit seed. Workers never share a generator;
//! instead each stream ordinal gets its own seed:
//!
//! ```text
//! seed(ordinal) = mix64(run_seed + (ordinal + 1) * GAMMA)
//! ```
//!
//! `GAMMA` is odd, so the affine map is a bijection on `u64`, and `mix64` (the
//! SplitMix64 finaliser) is a bijection too. Distinct ordinals therefore always
//! yield distinct seeds for the same run seed.

use super::prng::PricerRng;

/// Golden-ratio increment used by SplitMix64.
const GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// SplitMix64 output function.
#[inline]
fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Expands one run seed into independent per-worker seeds.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::rng::SeedSequence;
///
/// let seeds = SeedSequence::new(7);
/// assert_eq!(seeds.run_seed(), 7);
/// assert_ne!(seeds.stream_seed(0), seeds.stream_seed(1));
///
/// // Derivation is a pure function of (run seed, ordinal)
/// assert_eq!(seeds.stream_seed(3), SeedSequence::new(7).stream_seed(3));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeedSequence {
    run_seed: u64,
}

impl SeedSequence {
    /// Creates a sequence rooted at an explicit run seed.
    #[inline]
    pub fn new(run_seed: u64) -> Self {
        Self { run_seed }
    }

    /// Creates a sequence rooted at a fresh seed drawn once from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Returns the run seed.
    #[inline]
    pub fn run_seed(&self) -> u64 {
        self.run_seed
    }

    /// Returns the seed for stream `ordinal`.
    #[inline]
    pub fn stream_seed(&self, ordinal: u64) -> u64 {
        mix64(
            self.run_seed
                .wrapping_add(ordinal.wrapping_add(1).wrapping_mul(GAMMA)),
        )
    }

    /// Builds a fresh generator for stream `ordinal`.
    #[inline]
    pub fn stream(&self, ordinal: u64) -> PricerRng {
        PricerRng::from_seed(self.stream_seed(ordinal))
    }
}
