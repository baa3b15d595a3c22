// Copyright (c) 2025 Dictbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Key/value dictionaries over 32-bit keys with four collision strategies.
//!
//! | strategy | storage | hash | fails when |
//! |---|---|---|---|
//! | [`NaiveDict`] | one unsorted vector | none | never |
//! | [`ChainDict`] | `capacity` growable buckets | degree-2 polynomial | never |
//! | [`LinearProbeDict`] | `2 * capacity` slots | degree-5 polynomial | every slot taken |
//! | [`CuckooDict`] | two tables of `capacity` slots | two tabulation hashes | every slot taken, or rehashing gives up |
//!
//! All four implement [`Dictionary`]. [`AnyDictionary`] picks one at runtime
//! from a [`Strategy`].
//!
//! # Example
//!
//! ```
//! use dictbench_lib::data_structures::dictionary::{
//!     AnyDictionary, Dictionary, DictionaryConfig, DictionaryError, Strategy,
//! };
//!
//! let config = DictionaryConfig::new().with_seed(7);
//! let mut dict = AnyDictionary::with_config(Strategy::Cuckoo, 16, &config);
//!
//! dict.set(1, "one").unwrap();
//! dict.set(1, "uno").unwrap();
//!
//! assert_eq!(dict.search(1), Ok(&"uno"));
//! assert_eq!(dict.search(2), Err(DictionaryError::NotFound { key: 2 }));
//! assert_eq!(dict.len(), 1);
//! ```
//!
//! # Randomness
//!
//! Hash functions are drawn from a [`HasherSource`]. The default source is a
//! ChaCha8 generator seeded from [`DictionaryConfig::seed`], falling back to
//! OS entropy, so fixing the seed makes every table layout reproducible.

// Module declarations
mod chain;
mod config;
mod cuckoo;
mod entry;
mod error;
mod hash;
mod linear_probe;
mod naive;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// Re-exports
pub use chain::ChainDict;
pub use config::DictionaryConfig;
pub use cuckoo::CuckooDict;
pub use entry::Entry;
pub use error::{DictResult, DictionaryError};
pub use hash::{
    HasherSource, KeyHasher, Poly2Hash, Poly5Hash, RandomHasher, SeededSource, TabulationHash,
    LARGE_PRIME,
};
pub use linear_probe::LinearProbeDict;
pub use naive::NaiveDict;

/// The capability set shared by every dictionary strategy.
pub trait Dictionary<V> {
    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// [`DictionaryError::NotFound`] if no entry carries `key`.
    fn search(&self, key: u32) -> DictResult<&V>;

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Errors
    ///
    /// [`DictionaryError::NotFound`] if no entry carries `key`.
    fn search_mut(&mut self, key: u32) -> DictResult<&mut V>;

    /// Associates `value` with `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// [`DictionaryError::CapacityExceeded`] if a fixed-capacity strategy has
    /// no slot for a new key, [`DictionaryError::ConsistencyAnomaly`] if cuckoo
    /// rehashing gives up.
    fn set(&mut self, key: u32, value: V) -> DictResult<()>;

    /// Number of stored entries.
    fn len(&self) -> usize;

    /// Whether the dictionary is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether an entry carries `key`.
    fn contains(&self, key: u32) -> bool {
        self.search(key).is_ok()
    }
}

/// Collision-resolution strategy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// Unsorted vector scan
    #[serde(rename = "naive")]
    Naive,
    /// Separate chaining
    #[serde(rename = "chain")]
    Chain,
    /// Linear probing
    #[serde(rename = "lp")]
    LinearProbe,
    /// Two-table cuckoo hashing
    #[default]
    #[serde(rename = "cuckoo")]
    Cuckoo,
}

impl Strategy {
    /// Every strategy, in increasing order of sophistication.
    pub const ALL: [Strategy; 4] = [
        Strategy::Naive,
        Strategy::Chain,
        Strategy::LinearProbe,
        Strategy::Cuckoo,
    ];

    /// The short name used on the command line and in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Naive => "naive",
            Self::Chain => "chain",
            Self::LinearProbe => "lp",
            Self::Cuckoo => "cuckoo",
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = DictionaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| DictionaryError::UnknownStrategy(s.to_string()))
    }
}

/// A dictionary of any strategy, chosen at construction.
#[derive(Debug)]
pub enum AnyDictionary<V> {
    /// See [`NaiveDict`].
    Naive(NaiveDict<V>),
    /// See [`ChainDict`].
    Chain(ChainDict<V>),
    /// See [`LinearProbeDict`].
    LinearProbe(LinearProbeDict<V>),
    /// See [`CuckooDict`].
    Cuckoo(CuckooDict<V>),
}

impl<V> AnyDictionary<V> {
    /// Creates an empty dictionary of the given strategy with default configuration.
    pub fn new(strategy: Strategy, capacity: usize) -> Self {
        Self::with_config(strategy, capacity, &DictionaryConfig::default())
    }

    /// Creates an empty dictionary of the given strategy.
    pub fn with_config(strategy: Strategy, capacity: usize, config: &DictionaryConfig) -> Self {
        match strategy {
            Strategy::Naive => Self::Naive(NaiveDict::new(capacity)),
            Strategy::Chain => Self::Chain(ChainDict::with_config(capacity, config)),
            Strategy::LinearProbe => {
                Self::LinearProbe(LinearProbeDict::with_config(capacity, config))
            }
            Strategy::Cuckoo => Self::Cuckoo(CuckooDict::with_config(capacity, config)),
        }
    }

    /// The strategy backing this dictionary.
    pub fn strategy(&self) -> Strategy {
        match self {
            Self::Naive(_) => Strategy::Naive,
            Self::Chain(_) => Strategy::Chain,
            Self::LinearProbe(_) => Strategy::LinearProbe,
            Self::Cuckoo(_) => Strategy::Cuckoo,
        }
    }

    /// Number of cuckoo rehashes so far; zero for the other strategies.
    pub fn rehash_count(&self) -> u64 {
        match self {
            Self::Cuckoo(dict) => dict.rehash_count(),
            _ => 0,
        }
    }
}

impl<V> Dictionary<V> for AnyDictionary<V> {
    fn search(&self, key: u32) -> DictResult<&V> {
        match self {
            Self::Naive(dict) => dict.search(key),
            Self::Chain(dict) => dict.search(key),
            Self::LinearProbe(dict) => dict.search(key),
            Self::Cuckoo(dict) => dict.search(key),
        }
    }

    fn search_mut(&mut self, key: u32) -> DictResult<&mut V> {
        match self {
            Self::Naive(dict) => dict.search_mut(key),
            Self::Chain(dict) => dict.search_mut(key),
            Self::LinearProbe(dict) => dict.search_mut(key),
            Self::Cuckoo(dict) => dict.search_mut(key),
        }
    }

    fn set(&mut self, key: u32, value: V) -> DictResult<()> {
        match self {
            Self::Naive(dict) => dict.set(key, value),
            Self::Chain(dict) => dict.set(key, value),
            Self::LinearProbe(dict) => dict.set(key, value),
            Self::Cuckoo(dict) => dict.set(key, value),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Naive(dict) => dict.len(),
            Self::Chain(dict) => dict.len(),
            Self::LinearProbe(dict) => dict.len(),
            Self::Cuckoo(dict) => dict.len(),
        }
    }
}
