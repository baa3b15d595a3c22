// Copyright (c) 2025 Dictbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Key/value pair stored by every dictionary strategy.

/// One entry in a dictionary.
///
/// The key is fixed at creation; only the value can change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<V> {
    key: u32,
    value: V,
}

impl<V> Entry<V> {
    /// Creates a new entry.
    pub fn new(key: u32, value: V) -> Self {
        Self { key, value }
    }

    /// Returns the entry's key.
    pub fn key(&self) -> u32 {
        self.key
    }

    /// Returns a reference to the value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns a mutable reference to the value.
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Replaces the value, dropping the previous one.
    pub fn set_value(&mut self, value: V) {
        self.value = value;
    }
}
