// Copyright (c) 2025 Dictbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Configuration options for the dictionary strategies.

use serde::{Deserialize, Serialize};

/// Configuration shared by every dictionary strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Seed for every hash function drawn by the dictionary.
    /// `None` seeds from operating system entropy.
    pub seed: Option<u64>,

    /// Maximum number of consecutive rehash attempts a cuckoo insert may make
    /// before giving up.
    pub max_rehash_attempts: usize,

    /// Maximum number of displacement steps for a single cuckoo placement.
    /// `None` derives the bound from the table capacity.
    pub max_displacements: Option<usize>,
}

impl DictionaryConfig {
    /// Creates a new configuration with default values.
    ///
    /// # Returns
    ///
    /// A new `DictionaryConfig` instance with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the seed used to draw hash functions.
    ///
    /// # Arguments
    ///
    /// * `seed` - Seed for the hash function generator.
    ///
    /// # Returns
    ///
    /// Self with the updated configuration.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the maximum number of consecutive rehash attempts.
    ///
    /// # Arguments
    ///
    /// * `max_rehash_attempts` - The maximum number of attempts (at least 1).
    ///
    /// # Returns
    ///
    /// Self with the updated configuration.
    pub fn with_max_rehash_attempts(mut self, max_rehash_attempts: usize) -> Self {
        self.max_rehash_attempts = max_rehash_attempts.max(1);
        self
    }

    /// Sets the maximum number of displacement steps per placement.
    ///
    /// # Arguments
    ///
    /// * `max_displacements` - The maximum number of steps (at least 1).
    ///
    /// # Returns
    ///
    /// Self with the updated configuration.
    pub fn with_max_displacements(mut self, max_displacements: usize) -> Self {
        self.max_displacements = Some(max_displacements.max(1));
        self
    }

    /// Returns the displacement bound for cuckoo tables of `capacity` slots each.
    pub fn displacement_limit(&self, capacity: usize) -> usize {
        self.max_displacements
            .unwrap_or_else(|| capacity.saturating_mul(4).saturating_add(4))
    }
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_rehash_attempts: 32,
            max_displacements: None,
        }
    }
}
