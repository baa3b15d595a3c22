//! Synthetic key sets for the benchmark.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::ConfigResult;
use crate::error::config::ConfigError;

/// Three disjoint key sets drawn from one shuffled range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workload {
    /// Keys inserted first.
    pub first_half: Vec<u32>,
    /// Keys inserted second.
    pub second_half: Vec<u32>,
    /// Keys that are never inserted.
    pub absent: Vec<u32>,
}

impl Workload {
    /// Shuffles `0..3 * (n / 2)` with a generator seeded by `seed` and splits
    /// it into three sets of `n / 2` keys each. Distinctness follows from the
    /// permutation.
    ///
    /// # Errors
    ///
    /// `ValueOutOfRange` if `3 * (n / 2)` does not fit in a `u32`.
    pub fn generate(n: u32, seed: u64) -> ConfigResult<Self> {
        let half = n / 2;
        let total = half
            .checked_mul(3)
            .ok_or_else(|| ConfigError::ValueOutOfRange {
                key: "benchmark.size".to_string(),
                message: format!("3 * ({n} / 2) keys exceed the u32 key space"),
            })?;

        let mut keys: Vec<u32> = (0..total).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        keys.shuffle(&mut rng);

        let half = half as usize;
        let absent = keys.split_off(2 * half);
        let second_half = keys.split_off(half);
        Ok(Self {
            first_half: keys,
            second_half,
            absent,
        })
    }

    /// Number of keys the benchmark inserts.
    pub fn inserted(&self) -> usize {
        self.first_half.len() + self.second_half.len()
    }
}
