//! Deterministic seeding and RNG utilities.
//!
//! - `RngStream`: the reproducible PRNG every environment owns (ChaCha8)
//! - `SeedSequence`: expands one root seed into independent sub-seeds
//! - `split_n`: sub-seeds for a batch of environments

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Default RNG stream used by environments in this crate.
pub type RngStream = ChaCha8Rng;

/// SplitMix64 expansion of a 64-bit root seed into a stream of sub-seeds.
#[derive(Clone, Debug)]
pub struct SeedSequence {
    state: u64,
}

impl SeedSequence {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next sub-seed in the sequence.
    pub fn next_subseed(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// RNG stream seeded from the next sub-seed.
    pub fn next_rng(&mut self) -> RngStream {
        RngStream::seed_from_u64(self.next_subseed())
    }

    pub fn split_n(&mut self, n: usize) -> Vec<u64> {
        (0..n).map(|_| self.next_subseed()).collect()
    }
}

/// Split a root seed into `n` sub-seeds deterministically.
pub fn split_n(seed: u64, n: usize) -> Vec<u64> {
    SeedSequence::new(seed).split_n(n)
}

pub fn rng_from_seed(seed: u64) -> RngStream {
    RngStream::seed_from_u64(seed)
}
