//! Dictionary benchmark driver.
//!
//! Builds one dictionary, feeds it a [`Workload`] in two insertion rounds and
//! verifies after every round that exactly the inserted keys are present with
//! `value = key + 1`. The whole sequence of checks and inserts is timed.

use std::fmt::{Display, Formatter};
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::BenchmarkConfig;
use crate::data_structures::dictionary::{AnyDictionary, Dictionary, DictionaryConfig, Strategy};
use crate::error::{DictBenchError, DictBenchResult};

mod workload;

pub use workload::Workload;

/// Outcome of a successful benchmark run.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BenchmarkReport {
    /// Strategy that was measured
    pub structure: Strategy,
    /// Requested input size
    pub n: u32,
    /// Number of `set` calls made
    pub inserted: usize,
    /// Number of `search` calls made
    pub searched: usize,
    /// Entries held by the dictionary at the end
    pub stored: usize,
    /// Cuckoo rehashes performed (zero for other strategies)
    pub rehashes: u64,
    /// Wall-clock time of the timed section in seconds
    pub elapsed_secs: f64,
}

impl BenchmarkReport {
    /// Renders the report as pretty-printed JSON.
    pub fn to_json(&self) -> DictBenchResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Display for BenchmarkReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "== dictionary benchmark ==")?;
        writeln!(f, "structure: {}", self.structure)?;
        writeln!(f, "n: {}", self.n)?;
        writeln!(f, "inserted: {}", self.inserted)?;
        writeln!(f, "searched: {}", self.searched)?;
        if self.structure == Strategy::Cuckoo {
            writeln!(f, "rehashes: {}", self.rehashes)?;
        }
        write!(f, "elapsed time: {} seconds", self.elapsed_secs)
    }
}

/// The value stored under `key` by the benchmark.
pub fn expected_value(key: u32) -> u32 {
    key.wrapping_add(1)
}

/// Checks that every key in `keys` is present with its expected value.
/// Returns the number of searches made.
pub fn verify_present<D: Dictionary<u32>>(dict: &D, keys: &[u32]) -> DictBenchResult<usize> {
    for &key in keys {
        match dict.search(key) {
            Ok(&found) if found == expected_value(key) => {}
            Ok(&found) => {
                return Err(DictBenchError::Verification(format!(
                    "search({key}) found value {found}, which should be {}",
                    expected_value(key)
                )))
            }
            Err(err) if err.is_not_found() => {
                return Err(DictBenchError::Verification(format!(
                    "search({key}) failed"
                )))
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(keys.len())
}

/// Checks that no key in `keys` is present. Returns the number of searches made.
pub fn verify_absent<D: Dictionary<u32>>(dict: &D, keys: &[u32]) -> DictBenchResult<usize> {
    for &key in keys {
        match dict.search(key) {
            Ok(found) => {
                return Err(DictBenchError::Verification(format!(
                    "search({key}) found value {found}, but that key shouldn't be present"
                )))
            }
            Err(err) if err.is_not_found() => {}
            Err(err) => return Err(err.into()),
        }
    }
    Ok(keys.len())
}

/// Inserts every key in `keys` with its expected value. Returns the number of
/// inserts made.
pub fn insert_all<D: Dictionary<u32>>(dict: &mut D, keys: &[u32]) -> DictBenchResult<usize> {
    for &key in keys {
        dict.set(key, expected_value(key))?;
    }
    Ok(keys.len())
}

/// Runs the benchmark described by `benchmark` against a dictionary built
/// from `dictionary`.
///
/// # Errors
///
/// * `Verification` if the dictionary returns a wrong answer
/// * `Dictionary` if a `set` fails
/// * `Config` if the input size is out of range
pub fn run_benchmark(
    benchmark: &BenchmarkConfig,
    dictionary: &DictionaryConfig,
) -> DictBenchResult<BenchmarkReport> {
    let n = benchmark.size;
    info!(structure = %benchmark.structure, n, "generating input");
    let workload = Workload::generate(n, benchmark.workload_seed)?;

    let mut dict = AnyDictionary::with_config(benchmark.structure, n as usize, dictionary);

    info!(n, "inserting and searching");
    let start = Instant::now();
    let mut searched = 0;
    let mut inserted = 0;

    // nothing inserted yet
    searched += verify_absent(&dict, &workload.first_half)?;
    searched += verify_absent(&dict, &workload.second_half)?;
    searched += verify_absent(&dict, &workload.absent)?;

    inserted += insert_all(&mut dict, &workload.first_half)?;
    debug!(stored = dict.len(), "first half inserted");

    searched += verify_present(&dict, &workload.first_half)?;
    searched += verify_absent(&dict, &workload.second_half)?;
    searched += verify_absent(&dict, &workload.absent)?;

    inserted += insert_all(&mut dict, &workload.second_half)?;
    debug!(stored = dict.len(), "second half inserted");

    searched += verify_present(&dict, &workload.first_half)?;
    searched += verify_present(&dict, &workload.second_half)?;
    searched += verify_absent(&dict, &workload.absent)?;

    let elapsed = start.elapsed();

    if dict.len() != workload.inserted() {
        return Err(DictBenchError::Verification(format!(
            "dictionary holds {} entries after {} distinct inserts",
            dict.len(),
            workload.inserted()
        )));
    }

    info!(elapsed_secs = elapsed.as_secs_f64(), "benchmark finished");
    Ok(BenchmarkReport {
        structure: benchmark.structure,
        n,
        inserted,
        searched,
        stored: dict.len(),
        rehashes: dict.rehash_count(),
        elapsed_secs: elapsed.as_secs_f64(),
    })
}
