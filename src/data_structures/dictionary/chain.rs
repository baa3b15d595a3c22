// Copyright (c) 2025 Dictbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Separate chaining.
//!
//! A fixed number of buckets, each an unbounded vector of entries, indexed by a
//! degree-2 polynomial hash. Buckets grow without limit, so `set` never fails.

use crate::data_structures::dictionary::config::DictionaryConfig;
use crate::data_structures::dictionary::entry::Entry;
use crate::data_structures::dictionary::error::{DictResult, DictionaryError};
use crate::data_structures::dictionary::hash::{HasherSource, KeyHasher, Poly2Hash, SeededSource};
use crate::data_structures::dictionary::Dictionary;

/// Hash table with separate chaining.
///
/// # Type Parameters
///
/// * `V` - The value type.
/// * `H` - The bucket hash function, a degree-2 polynomial by default.
#[derive(Debug, Clone)]
pub struct ChainDict<V, H = Poly2Hash> {
    buckets: Vec<Vec<Entry<V>>>,
    hasher: H,
    len: usize,
}

impl<V> ChainDict<V> {
    /// Creates an empty dictionary with `capacity` buckets and a hash function
    /// drawn from OS entropy.
    pub fn new(capacity: usize) -> Self {
        Self::with_config(capacity, &DictionaryConfig::default())
    }

    /// Creates an empty dictionary drawing its hash function according to `config`.
    pub fn with_config(capacity: usize, config: &DictionaryConfig) -> Self {
        let mut source = SeededSource::<Poly2Hash>::from_optional_seed(config.seed);
        Self::with_hasher(capacity, source.next_hasher())
    }
}

impl<V, H: KeyHasher> ChainDict<V, H> {
    /// Creates an empty dictionary with an explicit hash function.
    /// A zero capacity is raised to one bucket.
    pub fn with_hasher(capacity: usize, hasher: H) -> Self {
        let buckets = (0..capacity.max(1)).map(|_| Vec::new()).collect();
        Self {
            buckets,
            hasher,
            len: 0,
        }
    }

    /// Number of buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    fn bucket_index(&self, key: u32) -> usize {
        self.hasher.index(key, self.buckets.len())
    }
}

impl<V, H: KeyHasher> Dictionary<V> for ChainDict<V, H> {
    fn search(&self, key: u32) -> DictResult<&V> {
        self.buckets[self.bucket_index(key)]
            .iter()
            .find(|entry| entry.key() == key)
            .map(Entry::value)
            .ok_or(DictionaryError::NotFound { key })
    }

    fn search_mut(&mut self, key: u32) -> DictResult<&mut V> {
        let index = self.bucket_index(key);
        self.buckets[index]
            .iter_mut()
            .find(|entry| entry.key() == key)
            .map(Entry::value_mut)
            .ok_or(DictionaryError::NotFound { key })
    }

    fn set(&mut self, key: u32, value: V) -> DictResult<()> {
        let index = self.bucket_index(key);
        let bucket = &mut self.buckets[index];
        match bucket.iter_mut().find(|entry| entry.key() == key) {
            Some(entry) => entry.set_value(value),
            None => {
                bucket.push(Entry::new(key, value));
                self.len += 1;
            }
        }
        Ok(())
    }

    fn len(&self) -> usize {
        self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colliding_keys_share_bucket() {
        // a1 = 0 sends every key to bucket a0 % capacity
        let mut dict = ChainDict::with_hasher(8, Poly2Hash::from_coefficients(3, 0));
        for key in 0..20 {
            dict.set(key, key + 1).unwrap();
        }

        assert_eq!(dict.len(), 20);
        assert_eq!(dict.buckets[3].len(), 20);
        for key in 0..20 {
            assert_eq!(dict.search(key), Ok(&(key + 1)));
        }
        assert!(dict.search(20).is_err());
    }

    #[test]
    fn test_overwrite_does_not_duplicate() {
        let mut dict = ChainDict::with_config(4, &DictionaryConfig::new().with_seed(1));
        dict.set(9, "a").unwrap();
        dict.set(9, "b").unwrap();

        assert_eq!(dict.len(), 1);
        assert_eq!(dict.search(9), Ok(&"b"));
        let stored: usize = dict.buckets.iter().map(Vec::len).sum();
        assert_eq!(stored, 1);
    }

    #[test]
    fn test_entries_live_in_hashed_bucket() {
        let mut dict = ChainDict::with_config(16, &DictionaryConfig::new().with_seed(7));
        for key in (0..500).step_by(7) {
            dict.set(key, ()).unwrap();
        }

        for (index, bucket) in dict.buckets.iter().enumerate() {
            for entry in bucket {
                assert_eq!(dict.hasher.index(entry.key(), dict.bucket_count()), index);
            }
        }
    }

    #[test]
    fn test_zero_capacity_uses_one_bucket() {
        let mut dict = ChainDict::with_config(0, &DictionaryConfig::new().with_seed(2));
        assert_eq!(dict.bucket_count(), 1);
        dict.set(1, 1).unwrap();
        dict.set(2, 2).unwrap();
        assert_eq!(dict.search(2), Ok(&2));
    }
}
