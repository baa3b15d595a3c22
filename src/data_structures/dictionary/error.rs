// Copyright (c) 2025 Dictbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for the dictionary strategies.

/// Errors that can occur in dictionary operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum DictionaryError {
    /// No entry carries the requested key
    #[error("Key {key} not found")]
    NotFound {
        /// The key that was searched for.
        key: u32,
    },

    /// The fixed-capacity structure has no slot left for the key
    #[error("Cannot place key {key}: all {slots} slots are occupied")]
    CapacityExceeded {
        /// The key that could not be placed.
        key: u32,
        /// Total number of slots in the structure.
        slots: usize,
    },

    /// An internal bound was hit that should not be reachable in normal operation
    #[error("Consistency anomaly: {0}")]
    ConsistencyAnomaly(String),

    /// A strategy name did not match any known strategy
    #[error("Unknown dictionary strategy '{0}', expected one of: naive, chain, lp, cuckoo")]
    UnknownStrategy(String),
}

impl DictionaryError {
    /// Returns `true` for the `NotFound` variant.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for dictionary operations
pub type DictResult<T> = std::result::Result<T, DictionaryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DictionaryError::NotFound { key: 7 };
        assert_eq!(err.to_string(), "Key 7 not found");

        let err = DictionaryError::CapacityExceeded { key: 3, slots: 8 };
        assert_eq!(
            err.to_string(),
            "Cannot place key 3: all 8 slots are occupied"
        );

        let err = DictionaryError::ConsistencyAnomaly("rehash limit".to_string());
        assert_eq!(err.to_string(), "Consistency anomaly: rehash limit");
    }

    #[test]
    fn test_is_not_found() {
        assert!(DictionaryError::NotFound { key: 1 }.is_not_found());
        assert!(!DictionaryError::CapacityExceeded { key: 1, slots: 2 }.is_not_found());
    }
}
