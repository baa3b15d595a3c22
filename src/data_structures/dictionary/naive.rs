// Copyright (c) 2025 Dictbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Unsorted vector dictionary, the baseline every other strategy is measured
//! against. Both operations are O(n).

use crate::data_structures::dictionary::entry::Entry;
use crate::data_structures::dictionary::error::{DictResult, DictionaryError};
use crate::data_structures::dictionary::Dictionary;

/// Dictionary backed by one insertion-ordered vector.
#[derive(Debug, Clone)]
pub struct NaiveDict<V> {
    entries: Vec<Entry<V>>,
}

impl<V> NaiveDict<V> {
    /// Creates an empty dictionary. The capacity is only a preallocation hint.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    fn position(&self, key: u32) -> Option<usize> {
        self.entries.iter().position(|entry| entry.key() == key)
    }
}

impl<V> Dictionary<V> for NaiveDict<V> {
    fn search(&self, key: u32) -> DictResult<&V> {
        self.entries
            .iter()
            .find(|entry| entry.key() == key)
            .map(Entry::value)
            .ok_or(DictionaryError::NotFound { key })
    }

    fn search_mut(&mut self, key: u32) -> DictResult<&mut V> {
        self.entries
            .iter_mut()
            .find(|entry| entry.key() == key)
            .map(Entry::value_mut)
            .ok_or(DictionaryError::NotFound { key })
    }

    fn set(&mut self, key: u32, value: V) -> DictResult<()> {
        match self.position(key) {
            Some(index) => self.entries[index].set_value(value),
            None => self.entries.push(Entry::new(key, value)),
        }
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
