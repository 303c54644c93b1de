//! RNG module - seeded randomness for dealing decks
//!
//! Wraps a ChaCha8 stream so that a seed fully determines a deal. The shuffle
//! is an explicit modern Fisher-Yates pass so every permutation of the deck is
//! equally likely for a uniform source.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG used by the deck generator.
#[derive(Debug, Clone)]
pub struct DeckRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl DeckRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this RNG was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform value in `[0, max]`.
    pub fn below_inclusive(&mut self, max: usize) -> usize {
        self.inner.gen_range(0..=max)
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.below_inclusive(i);
            slice.swap(i, j);
        }
    }

    /// Draw the seed for the next deal.
    ///
    /// A controller seeded once keeps producing the same sequence of decks
    /// across resets.
    pub fn next_seed(&mut self) -> u64 {
        self.inner.next_u64()
    }
}

impl Default for DeckRng {
    fn default() -> Self {
        Self::new(1)
    }
}
