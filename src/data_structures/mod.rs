//! Data structures for the dictionary benchmark.
//!
//! All implementations adhere to the project requirements:
//! - No unsafe code
//! - Slot ownership through `Option` rather than manual lifetimes
//! - Every loop over a fixed-size table is bounded

pub mod dictionary;

// Re-export common data structures
pub use dictionary::{
    AnyDictionary, ChainDict, CuckooDict, Dictionary, DictionaryConfig, DictionaryError,
    LinearProbeDict, NaiveDict, Strategy,
};
