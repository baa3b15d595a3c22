// Copyright (c) 2025 Dictbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Open addressing with linear probing.
//!
//! The table holds twice the requested capacity and is addressed by a degree-5
//! polynomial hash. A probe walks forward from the home slot, wrapping at the
//! end, until it meets an empty slot or the key. Probes visit at most one full
//! table, so a completely full table reports `NotFound` / `CapacityExceeded`
//! instead of scanning forever.

use crate::data_structures::dictionary::config::DictionaryConfig;
use crate::data_structures::dictionary::entry::Entry;
use crate::data_structures::dictionary::error::{DictResult, DictionaryError};
use crate::data_structures::dictionary::hash::{HasherSource, KeyHasher, Poly5Hash, SeededSource};
use crate::data_structures::dictionary::Dictionary;

/// Number of slots allocated per unit of requested capacity.
const SLOTS_PER_CAPACITY: usize = 2;

/// Where a probe for a key stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    /// The slot holds the key.
    Found(usize),
    /// The slot is empty and the key is absent.
    Vacant(usize),
    /// Every slot holds some other key.
    Exhausted,
}

/// Hash table with linear probing.
#[derive(Debug, Clone)]
pub struct LinearProbeDict<V, H = Poly5Hash> {
    slots: Vec<Option<Entry<V>>>,
    hasher: H,
    len: usize,
}

impl<V> LinearProbeDict<V> {
    /// Creates an empty dictionary for `capacity` entries with a hash function
    /// drawn from OS entropy.
    pub fn new(capacity: usize) -> Self {
        Self::with_config(capacity, &DictionaryConfig::default())
    }

    /// Creates an empty dictionary drawing its hash function according to `config`.
    pub fn with_config(capacity: usize, config: &DictionaryConfig) -> Self {
        let mut source = SeededSource::<Poly5Hash>::from_optional_seed(config.seed);
        Self::with_hasher(capacity, source.next_hasher())
    }
}

impl<V, H: KeyHasher> LinearProbeDict<V, H> {
    /// Creates an empty dictionary with an explicit hash function.
    /// The table gets `2 * capacity` slots; a zero capacity is raised to one.
    pub fn with_hasher(capacity: usize, hasher: H) -> Self {
        let size = capacity.max(1) * SLOTS_PER_CAPACITY;
        Self {
            slots: (0..size).map(|_| None).collect(),
            hasher,
            len: 0,
        }
    }

    /// Total number of slots in the table.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Index of the slot holding `key`, if any.
    pub(crate) fn locate(&self, key: u32) -> Option<usize> {
        match self.probe(key) {
            Probe::Found(index) => Some(index),
            Probe::Vacant(_) | Probe::Exhausted => None,
        }
    }

    fn probe(&self, key: u32) -> Probe {
        let size = self.slots.len();
        let home = self.hasher.index(key, size);
        for step in 0..size {
            let index = (home + step) % size;
            match &self.slots[index] {
                None => return Probe::Vacant(index),
                Some(entry) if entry.key() == key => return Probe::Found(index),
                Some(_) => {}
            }
        }
        Probe::Exhausted
    }
}

impl<V, H: KeyHasher> Dictionary<V> for LinearProbeDict<V, H> {
    fn search(&self, key: u32) -> DictResult<&V> {
        self.locate(key)
            .and_then(|index| self.slots[index].as_ref())
            .map(Entry::value)
            .ok_or(DictionaryError::NotFound { key })
    }

    fn search_mut(&mut self, key: u32) -> DictResult<&mut V> {
        match self.locate(key) {
            Some(index) => self.slots[index]
                .as_mut()
                .map(Entry::value_mut)
                .ok_or(DictionaryError::NotFound { key }),
            None => Err(DictionaryError::NotFound { key }),
        }
    }

    fn set(&mut self, key: u32, value: V) -> DictResult<()> {
        match self.probe(key) {
            Probe::Found(index) => {
                if let Some(entry) = self.slots[index].as_mut() {
                    entry.set_value(value);
                }
                Ok(())
            }
            Probe::Vacant(index) => {
                self.slots[index] = Some(Entry::new(key, value));
                self.len += 1;
                Ok(())
            }
            Probe::Exhausted => Err(DictionaryError::CapacityExceeded {
                key,
                slots: self.slots.len(),
            }),
        }
    }

    fn len(&self) -> usize {
        self.len
    }
}
