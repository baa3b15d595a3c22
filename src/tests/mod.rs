//! Test modules for dictbench.
//!
//! Cross-component tests live here; tests of a single type stay next to it.
//! - Behavior shared by every dictionary strategy, parameterized with test-case
//! - Property-based tests of the dictionary contract using proptest
//! - Configuration loading and validation
//! - Error display and reporting
//! - End-to-end benchmark runs

pub mod test_utils;

pub use test_utils::TestFixture;
