// Copyright (c) 2025 Dictbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Two-table cuckoo hashing with eviction and bounded rehashing.
//!
//! Every key has exactly one candidate slot in each table, chosen by that
//! table's tabulation hash. Lookups inspect both candidates. Inserts place the
//! key in table 0, evicting the occupant, which moves to its slot in the other
//! table, and so on until an empty slot is reached.
//!
//! # Cycles and rehashing
//!
//! When the key being inserted is itself evicted from table 1, the displacement
//! path has closed on itself and will never terminate. The path is undone,
//! leaving the tables exactly as they were, and the dictionary draws a new pair
//! of hash functions and redistributes every entry. A rehash attempt is planned
//! on keys alone and only committed once every key has a slot, so a run of
//! failed attempts never loses entries. After `max_rehash_attempts` failures the
//! insert is rejected with [`DictionaryError::ConsistencyAnomaly`].

use tracing::{debug, warn};

use crate::data_structures::dictionary::config::DictionaryConfig;
use crate::data_structures::dictionary::entry::Entry;
use crate::data_structures::dictionary::error::{DictResult, DictionaryError};
use crate::data_structures::dictionary::hash::{
    HasherSource, KeyHasher, SeededSource, TabulationHash,
};
use crate::data_structures::dictionary::Dictionary;

/// Number of tables (and hash functions) used.
const TABLE_COUNT: usize = 2;

type Tables<T> = [Vec<Option<T>>; TABLE_COUNT];

/// Outcome of a displacement walk.
#[derive(Debug)]
enum Displacement<T> {
    /// The item and everything it evicted found a slot.
    Placed,
    /// The walk cycled or ran out of steps; the tables were restored and the
    /// item is handed back.
    Cycle(T),
}

/// Walks the displacement path for `item`, swapping it into table 0, then
/// carrying each evicted occupant to its slot in the other table.
///
/// On a cycle the swaps are replayed in reverse, which restores every slot on
/// the path to its previous occupant.
fn displace<T, H, F>(
    tables: &mut Tables<T>,
    hashers: &[H; TABLE_COUNT],
    item: T,
    key_of: F,
    max_steps: usize,
) -> Displacement<T>
where
    H: KeyHasher,
    F: Fn(&T) -> u32,
{
    let capacity = tables[0].len();
    let origin = key_of(&item);
    let mut carried = Some(item);
    let mut path: Vec<(usize, usize)> = Vec::new();
    let mut side = 0;

    loop {
        let Some(key) = carried.as_ref().map(&key_of) else {
            return Displacement::Placed;
        };
        if path.len() >= max_steps {
            break;
        }

        let index = hashers[side].index(key, capacity);
        std::mem::swap(&mut carried, &mut tables[side][index]);
        path.push((side, index));

        if side == 1 && carried.as_ref().map(&key_of) == Some(origin) {
            break;
        }
        side = 1 - side;
    }

    for &(side, index) in path.iter().rev() {
        std::mem::swap(&mut carried, &mut tables[side][index]);
    }
    carried.map_or(Displacement::Placed, Displacement::Cycle)
}

/// Plans where each of `keys` lands under `hashers`, inserting in order.
///
/// Slots hold indices into `keys`. Returns `None` if any key cycles.
fn plan_layout<H: KeyHasher>(
    keys: &[u32],
    hashers: &[H; TABLE_COUNT],
    capacity: usize,
    max_steps: usize,
) -> Option<Tables<usize>> {
    let mut layout: Tables<usize> = [vec![None; capacity], vec![None; capacity]];
    for position in 0..keys.len() {
        match displace(
            &mut layout,
            hashers,
            position,
            |&i: &usize| keys[i],
            max_steps,
        ) {
            Displacement::Placed => {}
            Displacement::Cycle(_) => return None,
        }
    }
    Some(layout)
}

/// Cuckoo hash table over two tables of `capacity` slots each.
///
/// # Type Parameters
///
/// * `V` - The value type.
/// * `S` - Source of hash functions, drawn twice at construction and twice
///   per rehash attempt. Seeded tabulation hashing by default.
#[derive(Debug)]
pub struct CuckooDict<V, S: HasherSource = SeededSource<TabulationHash>> {
    tables: Tables<Entry<V>>,
    hashers: [S::Hasher; TABLE_COUNT],
    source: S,
    capacity: usize,
    len: usize,
    max_rehash_attempts: usize,
    max_displacements: usize,
    rehash_count: u64,
}

impl<V> CuckooDict<V> {
    /// Creates an empty dictionary with hash functions drawn from OS entropy.
    pub fn new(capacity: usize) -> Self {
        Self::with_config(capacity, &DictionaryConfig::default())
    }

    /// Creates an empty dictionary configured by `config`.
    pub fn with_config(capacity: usize, config: &DictionaryConfig) -> Self {
        Self::with_source(
            capacity,
            SeededSource::from_optional_seed(config.seed),
            config,
        )
    }
}

impl<V, S: HasherSource> CuckooDict<V, S> {
    /// Creates an empty dictionary that takes its hash functions from `source`.
    /// A zero capacity is raised to one slot per table.
    pub fn with_source(capacity: usize, mut source: S, config: &DictionaryConfig) -> Self {
        let capacity = capacity.max(1);
        let hashers = [source.next_hasher(), source.next_hasher()];
        Self {
            tables: [
                (0..capacity).map(|_| None).collect(),
                (0..capacity).map(|_| None).collect(),
            ],
            hashers,
            source,
            capacity,
            len: 0,
            max_rehash_attempts: config.max_rehash_attempts.max(1),
            max_displacements: config.displacement_limit(capacity).max(1),
            rehash_count: 0,
        }
    }

    /// Number of successful rehashes since construction.
    pub fn rehash_count(&self) -> u64 {
        self.rehash_count
    }

    /// Returns `(table, index)` of the slot holding `key`, if any.
    pub(crate) fn locate(&self, key: u32) -> Option<(usize, usize)> {
        (0..TABLE_COUNT).find_map(|side| {
            let index = self.hashers[side].index(key, self.capacity);
            match &self.tables[side][index] {
                Some(entry) if entry.key() == key => Some((side, index)),
                _ => None,
            }
        })
    }

    /// Redistributes every stored entry plus `pending` under freshly drawn
    /// hash functions.
    ///
    /// Leaves the dictionary untouched and drops `pending` if no attempt
    /// succeeds.
    fn rehash(&mut self, pending: Entry<V>) -> DictResult<()> {
        let mut keys: Vec<u32> = self
            .tables
            .iter()
            .flatten()
            .flatten()
            .map(Entry::key)
            .collect();
        keys.push(pending.key());

        for attempt in 1..=self.max_rehash_attempts {
            let hashers = [self.source.next_hasher(), self.source.next_hasher()];
            let Some(layout) = plan_layout(&keys, &hashers, self.capacity, self.max_displacements)
            else {
                debug!(
                    attempt,
                    entries = keys.len(),
                    "cuckoo rehash attempt cycled"
                );
                continue;
            };

            // Same traversal order as `keys`, so positions line up with the plan.
            let mut entries: Vec<Option<Entry<V>>> = self
                .tables
                .iter_mut()
                .flat_map(|table| table.iter_mut())
                .filter_map(Option::take)
                .map(Some)
                .collect();
            entries.push(Some(pending));

            let [first, second] = layout;
            self.tables = [
                first
                    .into_iter()
                    .map(|slot| slot.and_then(|position| entries[position].take()))
                    .collect(),
                second
                    .into_iter()
                    .map(|slot| slot.and_then(|position| entries[position].take()))
                    .collect(),
            ];
            self.hashers = hashers;
            self.len = keys.len();
            self.rehash_count += 1;
            debug!(
                attempt,
                entries = self.len,
                capacity = self.capacity,
                "cuckoo rehash committed"
            );
            return Ok(());
        }

        warn!(
            attempts = self.max_rehash_attempts,
            entries = keys.len(),
            capacity = self.capacity,
            "cuckoo rehash gave up"
        );
        Err(DictionaryError::ConsistencyAnomaly(format!(
            "no layout for {} entries in 2 x {} slots without a cycle and within {} \
             displacement steps after {} rehash attempts",
            keys.len(),
            self.capacity,
            self.max_displacements,
            self.max_rehash_attempts
        )))
    }
}

impl<V, S: HasherSource> Dictionary<V> for CuckooDict<V, S> {
    fn search(&self, key: u32) -> DictResult<&V> {
        self.locate(key)
            .and_then(|(side, index)| self.tables[side][index].as_ref())
            .map(Entry::value)
            .ok_or(DictionaryError::NotFound { key })
    }

    fn search_mut(&mut self, key: u32) -> DictResult<&mut V> {
        match self.locate(key) {
            Some((side, index)) => self.tables[side][index]
                .as_mut()
                .map(Entry::value_mut)
                .ok_or(DictionaryError::NotFound { key }),
            None => Err(DictionaryError::NotFound { key }),
        }
    }

    fn set(&mut self, key: u32, value: V) -> DictResult<()> {
        if let Some((side, index)) = self.locate(key) {
            if let Some(entry) = self.tables[side][index].as_mut() {
                entry.set_value(value);
            }
            return Ok(());
        }

        let slots = self.capacity * TABLE_COUNT;
        if self.len >= slots {
            return Err(DictionaryError::CapacityExceeded { key, slots });
        }

        match displace(
            &mut self.tables,
            &self.hashers,
            Entry::new(key, value),
            Entry::key,
            self.max_displacements,
        ) {
            Displacement::Placed => {
                self.len += 1;
                Ok(())
            }
            Displacement::Cycle(pending) => {
                debug!(key, len = self.len, "cuckoo displacement cycle, rehashing");
                self.rehash(pending)
            }
        }
    }

    fn len(&self) -> usize {
        self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::test_utils::{MockSource, ScriptedSource, StubHasher};

    fn config() -> DictionaryConfig {
        DictionaryConfig::new().with_seed(42)
    }

    #[test]
    fn test_single_displacement() {
        // A and B share table-0 slot 2 but not their table-1 slots
        let (a, b) = (10, 20);
        let source = ScriptedSource::new(vec![
            StubHasher::new(&[(a, 2), (b, 2)]),
            StubHasher::new(&[(a, 1), (b, 3)]),
        ]);
        let mut dict = CuckooDict::with_source(4, source, &config());

        dict.set(a, "a").unwrap();
        dict.set(b, "b").unwrap();

        assert_eq!(dict.locate(b), Some((0, 2)));
        assert_eq!(dict.locate(a), Some((1, 1)));
        assert_eq!(dict.search(a), Ok(&"a"));
        assert_eq!(dict.search(b), Ok(&"b"));
        assert_eq!(dict.rehash_count(), 0);
    }

    #[test]
    fn test_construction_draws_one_hasher_per_table() {
        let mut source = MockSource::new();
        source
            .expect_next_hasher()
            .times(2)
            .returning(StubHasher::identity);
        let mut dict = CuckooDict::with_source(4, source, &config());

        // distinct identity slots, no rehash and no further draws
        for key in 0..4 {
            dict.set(key, key).unwrap();
        }
        assert_eq!(dict.rehash_count(), 0);
    }

    #[test]
    fn test_cycle_forces_rehash() {
        let source = ScriptedSource::new(vec![
            // every key collides on slot 0 of both tables
            StubHasher::new(&[(1, 0), (2, 0), (3, 0)]),
            StubHasher::new(&[(1, 0), (2, 0), (3, 0)]),
            // replacement functions spread the keys out
            StubHasher::new(&[(1, 0), (2, 1), (3, 0)]),
            StubHasher::new(&[(1, 0), (2, 0), (3, 1)]),
        ]);
        let mut dict = CuckooDict::with_source(2, source, &config());

        dict.set(1, 100).unwrap();
        dict.set(2, 200).unwrap();
        assert_eq!(dict.rehash_count(), 0);

        dict.set(3, 300).unwrap();
        assert_eq!(dict.rehash_count(), 1);
        assert_eq!(dict.len(), 3);
        assert_eq!(dict.search(1), Ok(&100));
        assert_eq!(dict.search(2), Ok(&200));
        assert_eq!(dict.search(3), Ok(&300));
        assert_eq!(dict.source.remaining(), 0);
    }

    #[test]
    fn test_exhausted_rehash_leaves_table_intact() {
        let colliding = || StubHasher::new(&[(1, 0), (2, 0), (3, 0)]);
        let source = ScriptedSource::repeating(colliding());
        let mut dict = CuckooDict::with_source(2, source, &config().with_max_rehash_attempts(3));

        dict.set(1, 'x').unwrap();
        dict.set(2, 'y').unwrap();
        let before = dict.tables.clone();

        let err = dict.set(3, 'z').unwrap_err();
        assert!(matches!(err, DictionaryError::ConsistencyAnomaly(_)));
        assert_eq!(dict.tables, before);
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.search(1), Ok(&'x'));
        assert_eq!(dict.search(2), Ok(&'y'));
        assert!(dict.search(3).is_err());
        assert_eq!(dict.rehash_count(), 0);
    }

    #[test]
    fn test_full_tables_reject_new_keys() {
        let source = ScriptedSource::repeating(StubHasher::identity());
        let mut dict = CuckooDict::with_source(2, source, &config());
        // identity hash mod 2: 0 and 2 share slot 0, 1 and 3 share slot 1
        for key in 0..4 {
            dict.set(key, key).unwrap();
        }
        assert_eq!(dict.len(), 4);
        assert_eq!(
            dict.set(9, 9),
            Err(DictionaryError::CapacityExceeded { key: 9, slots: 4 })
        );
        dict.set(2, 22).unwrap();
        assert_eq!(dict.search(2), Ok(&22));
    }

    #[test]
    fn test_overwrite_keeps_single_entry() {
        let mut dict = CuckooDict::with_config(8, &config());
        dict.set(5, 1).unwrap();
        dict.set(5, 2).unwrap();

        assert_eq!(dict.len(), 1);
        assert_eq!(dict.search(5), Ok(&2));
        let stored = dict.tables.iter().flatten().flatten().count();
        assert_eq!(stored, 1);
    }

    #[test]
    fn test_entries_sit_in_designated_slots() {
        let mut dict = CuckooDict::with_config(256, &config());
        for key in 0..200u32 {
            dict.set(key * 31, key).unwrap();
        }

        for side in 0..TABLE_COUNT {
            for (index, slot) in dict.tables[side].iter().enumerate() {
                if let Some(entry) = slot {
                    assert_eq!(dict.hashers[side].index(entry.key(), dict.capacity), index);
                }
            }
        }
        for key in 0..200u32 {
            assert_eq!(dict.search(key * 31), Ok(&key));
        }
    }

    #[test]
    fn test_step_cap_forces_rehash() {
        // B evicts A from table 0; a cap of one step stops A moving on
        let (a, b) = (10, 20);
        let source = ScriptedSource::new(vec![
            StubHasher::new(&[(a, 2), (b, 2)]),
            StubHasher::new(&[(a, 1), (b, 3)]),
            StubHasher::new(&[(a, 0), (b, 1)]),
            StubHasher::new(&[(a, 0), (b, 0)]),
        ]);
        let mut dict = CuckooDict::with_source(4, source, &config().with_max_displacements(1));

        dict.set(a, 'a').unwrap();
        assert_eq!(dict.rehash_count(), 0);
        assert_eq!(dict.source.remaining(), 2);

        dict.set(b, 'b').unwrap();
        assert_eq!(dict.rehash_count(), 1);
        assert_eq!(dict.source.remaining(), 0);
        assert_eq!(dict.locate(a), Some((0, 0)));
        assert_eq!(dict.locate(b), Some((0, 1)));
        assert_eq!(dict.search(a), Ok(&'a'));
        assert_eq!(dict.search(b), Ok(&'b'));
    }

    #[test]
    fn test_step_cap_exhausts_rehash() {
        let source = ScriptedSource::repeating(StubHasher::new(&[(1, 0), (2, 0)]));
        let config = config()
            .with_max_displacements(1)
            .with_max_rehash_attempts(3);
        let mut dict = CuckooDict::with_source(2, source, &config);

        dict.set(1, 'x').unwrap();
        let before = dict.tables.clone();

        let err = dict.set(2, 'y').unwrap_err();
        match err {
            DictionaryError::ConsistencyAnomaly(message) => {
                assert!(message.contains("within 1 displacement steps"), "{message}");
                assert!(message.contains("after 3 rehash attempts"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(dict.tables, before);
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.search(1), Ok(&'x'));
        assert_eq!(dict.rehash_count(), 0);
    }

    #[test]
    fn test_displace_stops_at_step_cap() {
        let hashers = [StubHasher::identity(), StubHasher::identity()];
        let mut tables: Tables<u32> = [vec![Some(0), None], vec![None, None]];

        // 2 evicts 0, which would need a second step to reach table 1
        match displace(&mut tables, &hashers, 2, |&key: &u32| key, 1) {
            Displacement::Cycle(item) => assert_eq!(item, 2),
            Displacement::Placed => panic!("expected the step cap to stop the walk"),
        }
        assert_eq!(tables, [vec![Some(0), None], vec![None, None]]);

        match displace(&mut tables, &hashers, 2, |&key: &u32| key, 2) {
            Displacement::Placed => {}
            Displacement::Cycle(item) => panic!("{item} should have been placed"),
        }
        assert_eq!(tables, [vec![Some(2), None], vec![Some(0), None]]);
    }

    #[test]
    fn test_displace_restores_path_on_cycle() {
        let hashers = [StubHasher::identity(), StubHasher::identity()];
        let mut tables: Tables<u32> = [vec![Some(0), None], vec![Some(2), None]];

        // 4 maps to slot 0 in both tables, which hold 0 and 2 (also slot 0)
        match displace(&mut tables, &hashers, 4, |&key: &u32| key, 16) {
            Displacement::Cycle(item) => assert_eq!(item, 4),
            Displacement::Placed => panic!("expected a cycle"),
        }
        assert_eq!(tables, [vec![Some(0), None], vec![Some(2), None]]);
    }
}
