//! Test utilities and fixtures for dictbench.
//!
//! Provides scripted hash functions for steering dictionaries into specific
//! layouts, proptest strategies for key sets, and a temporary-directory
//! fixture for configuration tests.

use crate::data_structures::dictionary::{HasherSource, KeyHasher};
use mockall::mock;
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use std::collections::{HashMap, HashSet, VecDeque};
use tempfile::TempDir;

/// Maximum number of keys in a generated key set.
const MAX_KEYS: usize = 256;

/// A hash function defined by a lookup table.
///
/// Keys missing from the table hash to themselves when the hasher is an
/// identity hasher, and to zero otherwise.
#[derive(Debug, Clone, Default)]
pub struct StubHasher {
    mapping: HashMap<u32, u32>,
    identity: bool,
}

impl StubHasher {
    /// Creates a hasher that maps each `(key, hash)` pair as given.
    pub fn new(pairs: &[(u32, u32)]) -> Self {
        Self {
            mapping: pairs.iter().copied().collect(),
            identity: false,
        }
    }

    /// Creates a hasher with `h(x) = x`.
    pub fn identity() -> Self {
        Self {
            mapping: HashMap::new(),
            identity: true,
        }
    }
}

impl KeyHasher for StubHasher {
    fn hash(&self, key: u32) -> u32 {
        match self.mapping.get(&key) {
            Some(&hash) => hash,
            None if self.identity => key,
            None => 0,
        }
    }
}

/// Hands out a fixed sequence of [`StubHasher`]s.
///
/// Panics once the script runs out unless a repeating hasher was given.
#[derive(Debug)]
pub struct ScriptedSource {
    queue: VecDeque<StubHasher>,
    repeat: Option<StubHasher>,
}

impl ScriptedSource {
    /// Yields `hashers` in order.
    pub fn new(hashers: Vec<StubHasher>) -> Self {
        Self {
            queue: hashers.into(),
            repeat: None,
        }
    }

    /// Yields clones of `hasher` forever.
    pub fn repeating(hasher: StubHasher) -> Self {
        Self {
            queue: VecDeque::new(),
            repeat: Some(hasher),
        }
    }

    /// Hashers left in the script.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl HasherSource for ScriptedSource {
    type Hasher = StubHasher;

    fn next_hasher(&mut self) -> StubHasher {
        match (self.queue.pop_front(), &self.repeat) {
            (Some(hasher), _) => hasher,
            (None, Some(hasher)) => hasher.clone(),
            (None, None) => panic!("scripted hasher source exhausted"),
        }
    }
}

mock! {
    /// A hasher source with call expectations.
    pub Source {}

    impl HasherSource for Source {
        type Hasher = StubHasher;

        fn next_hasher(&mut self) -> StubHasher;
    }
}

/// Strategy for a set of distinct keys.
pub fn distinct_keys_strategy() -> BoxedStrategy<Vec<u32>> {
    proptest::collection::hash_set(any::<u32>(), 0..MAX_KEYS)
        .prop_map(|keys| keys.into_iter().collect())
        .boxed()
}

/// Strategy for two disjoint key sets: keys to insert and keys to probe for.
pub fn disjoint_keys_strategy() -> BoxedStrategy<(Vec<u32>, Vec<u32>)> {
    (
        proptest::collection::hash_set(any::<u32>(), 0..MAX_KEYS),
        proptest::collection::vec(any::<u32>(), 0..MAX_KEYS),
    )
        .prop_map(|(present, candidates)| {
            let absent: HashSet<u32> = candidates
                .into_iter()
                .filter(|key| !present.contains(key))
                .collect();
            (present.into_iter().collect(), absent.into_iter().collect())
        })
        .boxed()
}

/// Test fixture for tests that read configuration files.
pub struct TestFixture {
    /// Temporary directory for test files
    pub temp_dir: TempDir,
}

impl TestFixture {
    /// Creates a fixture backed by a fresh temporary directory.
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            temp_dir: tempfile::tempdir()?,
        })
    }

    /// Writes `contents` to `name` inside the fixture directory.
    pub fn create_file<C: AsRef<[u8]>>(
        &self,
        name: &str,
        contents: C,
    ) -> std::io::Result<std::path::PathBuf> {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, contents)?;
        Ok(path)
    }
}
