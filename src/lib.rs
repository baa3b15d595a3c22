//! Dictbench Library
//!
//! This library contains four key→value dictionary strategies over 32-bit keys
//! (unsorted vector, separate chaining, linear probing and two-table cuckoo
//! hashing) together with the driver that times and verifies them.
//!
//! # Architecture
//!
//! - [`data_structures::dictionary`] holds the strategies, their hash function
//!   families and the shared [`data_structures::Dictionary`] trait
//! - [`benchmark`] generates workloads and verifies a dictionary against them
//! - [`config`] layers defaults, a configuration file and environment overrides
//! - [`error`] defines the application error type and error reporting

// Re-export public modules
pub mod benchmark;
pub mod config;
pub mod data_structures;
pub mod error;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for dictbench.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library initialization function.
///
/// Installs the tracing-backed error reporter as the process-wide reporter.
pub fn init() {
    error::set_error_reporter(std::sync::Arc::new(error::TracingErrorReporter));
}
