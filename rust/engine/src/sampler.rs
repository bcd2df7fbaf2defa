use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::grid::{MineSet, GRID_SIZE};

/// Picks `mine_count` distinct indices uniformly from `0..grid_size`.
///
/// Sampling is without replacement (partial Fisher-Yates), so every subset of
/// the requested size is equally likely.
///
/// # Panics
///
/// Panics if `mine_count > grid_size`; the engine validates mine counts before
/// sampling.
pub fn sample_mines<R: Rng + ?Sized>(rng: &mut R, mine_count: usize, grid_size: usize) -> MineSet {
    index::sample(rng, grid_size, mine_count)
        .into_iter()
        .collect()
}

/// Seeded source of mine layouts for a session.
/// The same seed yields the same sequence of layouts, round after round.
///
/// # Examples
///
/// ```
/// use neonmines_engine::sampler::MineSampler;
///
/// let mut a = MineSampler::new_with_seed(42);
/// let mut b = MineSampler::new_with_seed(42);
/// assert_eq!(a.sample(3), b.sample(3));
/// ```
#[derive(Debug, Clone)]
pub struct MineSampler {
    /// Seed the RNG was created from, kept for reproducing a session
    seed: u64,
    rng: ChaCha20Rng,
}

impl MineSampler {
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Seeds from `seed` when given, otherwise draws a fresh random seed.
    pub fn new(seed: Option<u64>) -> Self {
        Self::new_with_seed(seed.unwrap_or_else(rand::random))
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Samples a layout for the standard 25-tile board.
    pub fn sample(&mut self, mine_count: usize) -> MineSet {
        sample_mines(&mut self.rng, mine_count, GRID_SIZE)
    }

    /// Rewinds the RNG to the start of its seeded sequence.
    pub fn reset(&mut self) {
        self.rng = ChaCha20Rng::seed_from_u64(self.seed);
    }
}
