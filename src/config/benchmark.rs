//! Benchmark configuration module.
//!
//! This module defines which dictionary strategy the benchmark drives, how
//! large the workload is, and how the report is printed.

use super::{ConfigResult, Validate};
use crate::data_structures::dictionary::Strategy;
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Largest accepted input size. Keeps `3 * (size / 2)` inside the `u32` key space.
pub const MAX_BENCHMARK_SIZE: u32 = 2_000_000_000;

/// Output format for the benchmark report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human readable lines
    #[default]
    Text,
    /// A single JSON object
    Json,
}

impl Display for ReportFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::ParseError(format!(
                "Unknown report format '{other}', expected text or json"
            ))),
        }
    }
}

/// Benchmark configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Dictionary strategy to benchmark
    pub structure: Strategy,

    /// Input size `n`: the dictionary capacity and the size of the key universe
    pub size: u32,

    /// Seed for the workload permutation
    pub workload_seed: u64,

    /// Report output format
    pub format: ReportFormat,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            structure: Strategy::Cuckoo,
            size: 100_000,
            workload_seed: 0,
            format: ReportFormat::Text,
        }
    }
}

impl Validate for BenchmarkConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.size == 0 || self.size > MAX_BENCHMARK_SIZE {
            return Err(ConfigError::ValueOutOfRange {
                key: "benchmark.size".to_string(),
                message: format!(
                    "input size {} must be between 1 and {MAX_BENCHMARK_SIZE}",
                    self.size
                ),
            });
        }
        Ok(())
    }
}
