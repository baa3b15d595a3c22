// Copyright (c) 2025 Dictbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Hash function families for the dictionary strategies.
//!
//! Every function maps a 32-bit key to a 32-bit hash using wrapping unsigned
//! arithmetic. Coefficients are drawn once, at construction, from an explicit
//! random number generator, so a seeded generator yields reproducible tables.

use std::fmt::Debug;
use std::marker::PhantomData;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Largest prime below 2^31.
pub const LARGE_PRIME: u32 = 2_147_483_647;

/// Exclusive upper bound for every random coefficient.
const COEFFICIENT_BOUND: u32 = LARGE_PRIME - 1;

/// Number of byte lookup tables used by tabulation hashing.
const TABULATION_TABLES: usize = 4;

/// A hash function over 32-bit keys.
pub trait KeyHasher: Debug {
    /// Evaluates the hash function for the given key.
    fn hash(&self, key: u32) -> u32;

    /// Reduces the hash of `key` to an index in `0..slots`.
    ///
    /// `slots` must be non-zero.
    fn index(&self, key: u32, slots: usize) -> usize {
        self.hash(key) as usize % slots
    }
}

/// A hash function whose coefficients can be drawn from a random generator.
pub trait RandomHasher: KeyHasher + Sized {
    /// Draws a fresh function from `rng`.
    fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

/// A supplier of fresh hash functions.
///
/// Strategies that replace their hash functions at runtime (cuckoo rehashing)
/// hold a source instead of a generator so tests can script the exact
/// functions handed out.
pub trait HasherSource {
    /// The kind of hash function produced.
    type Hasher: KeyHasher;

    /// Produces the next hash function.
    fn next_hasher(&mut self) -> Self::Hasher;
}

/// Degree-2 polynomial: `h(x) = a0 + a1*x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Poly2Hash {
    a0: u32,
    a1: u32,
}

impl Poly2Hash {
    /// Creates a function with explicit coefficients.
    pub fn from_coefficients(a0: u32, a1: u32) -> Self {
        Self { a0, a1 }
    }
}

impl KeyHasher for Poly2Hash {
    fn hash(&self, key: u32) -> u32 {
        self.a0.wrapping_add(key.wrapping_mul(self.a1))
    }
}

impl RandomHasher for Poly2Hash {
    fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            a0: rng.gen_range(0..COEFFICIENT_BOUND),
            a1: rng.gen_range(0..COEFFICIENT_BOUND),
        }
    }
}

/// Degree-5 polynomial: `h(x) = a0 + a1*x + a2*x^2 + a3*x^3 + a4*x^4`,
/// evaluated in Horner form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Poly5Hash {
    a: [u32; 5],
}

impl Poly5Hash {
    /// Creates a function with explicit coefficients, lowest degree first.
    pub fn from_coefficients(a: [u32; 5]) -> Self {
        Self { a }
    }
}

impl KeyHasher for Poly5Hash {
    fn hash(&self, key: u32) -> u32 {
        self.a.iter().rev().fold(0u32, |acc, &coefficient| {
            acc.wrapping_mul(key).wrapping_add(coefficient)
        })
    }
}

impl RandomHasher for Poly5Hash {
    fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut a = [0u32; 5];
        for coefficient in &mut a {
            *coefficient = rng.gen_range(0..COEFFICIENT_BOUND);
        }
        Self { a }
    }
}

/// Tabulation hashing: four 256-entry tables, one per key byte, XORed together.
#[derive(Clone, PartialEq, Eq)]
pub struct TabulationHash {
    tables: Box<[[u32; 256]; TABULATION_TABLES]>,
}

impl TabulationHash {
    /// Creates a function from explicit lookup tables.
    pub fn from_tables(tables: [[u32; 256]; TABULATION_TABLES]) -> Self {
        Self {
            tables: Box::new(tables),
        }
    }
}

impl Debug for TabulationHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 1024 table entries are noise in debug output
        f.debug_struct("TabulationHash")
            .field(
                "first_entries",
                &[
                    self.tables[0][0],
                    self.tables[1][0],
                    self.tables[2][0],
                    self.tables[3][0],
                ],
            )
            .finish_non_exhaustive()
    }
}

impl KeyHasher for TabulationHash {
    fn hash(&self, key: u32) -> u32 {
        self.tables
            .iter()
            .zip(key.to_le_bytes())
            .fold(0u32, |acc, (table, byte)| acc ^ table[byte as usize])
    }
}

impl RandomHasher for TabulationHash {
    fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut tables = Box::new([[0u32; 256]; TABULATION_TABLES]);
        for table in tables.iter_mut() {
            for value in table.iter_mut() {
                *value = rng.gen_range(0..COEFFICIENT_BOUND);
            }
        }
        Self { tables }
    }
}

/// A [`HasherSource`] backed by a ChaCha8 generator.
#[derive(Debug, Clone)]
pub struct SeededSource<H> {
    rng: ChaCha8Rng,
    _marker: PhantomData<fn() -> H>,
}

impl<H: RandomHasher> SeededSource<H> {
    /// Creates a reproducible source from a seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            _marker: PhantomData,
        }
    }

    /// Creates a source seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
            _marker: PhantomData,
        }
    }

    /// Uses `seed` when present, entropy otherwise.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<H: RandomHasher> HasherSource for SeededSource<H> {
    type Hasher = H;

    fn next_hasher(&mut self) -> H {
        H::from_rng(&mut self.rng)
    }
}
