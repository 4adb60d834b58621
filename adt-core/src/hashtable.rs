//! Randomized chained hashtable
//!
//! Provides:
//! - Separate chaining with doubly-linked bucket chains for O(1) splice-out
//! - Universal hash family, re-drawn every time the table doubles
//! - Amortized O(1) insert, lookup, and delete
//! - Bucket-then-chain iteration over live entries
//!
//! Entries live in a slot arena and chains link them by index, so the
//! `chain_prev` back-reference is a plain index rather than a second owning
//! pointer. A doubling reseeds `(a, b, p)` and relinks every entry exactly
//! once; entry slots keep their indices across the move.

use std::fmt;

use log::debug;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::hash::{Normalize, UniversalHasher};

/// Default bucket count (must be a power of two).
const DEFAULT_BUCKETS: usize = 16;

/// Default half-open range the prime modulus is drawn from.
const DEFAULT_PRIME_RANGE: (u64, u64) = (1_000_000, 10_000_000);

/// Error type for hashtable operations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableError {
    /// Lookup or delete on a key the table does not hold.
    KeyNotFound,
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::KeyNotFound => write!(f, "key not in hashtable"),
        }
    }
}

impl std::error::Error for TableError {}

/// One live key-value pair in the chain arena.
#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    /// `(a·normalize(key) + b) mod p`. Stale the moment the parameters
    /// change, so a doubling recomputes it for every entry.
    hash_cache: u64,
    chain_next: Option<usize>,
    chain_prev: Option<usize>,
}

/// Chained hashtable with a randomized universal hash family.
///
/// Bucket count is always a power of two and doubles whenever the number of
/// live entries reaches it; each doubling draws fresh hash parameters.
pub struct ChainedHashTable<K, V> {
    /// Head entry index per bucket.
    buckets: Vec<Option<usize>>,
    /// Slot arena; vacant slots are on the free list.
    entries: Vec<Option<Entry<K, V>>>,
    free: Vec<usize>,
    /// Live entry count.
    len: usize,
    hasher: UniversalHasher,
    prime_range: (u64, u64),
    rng: ChaCha8Rng,
}

impl<K, V> ChainedHashTable<K, V> {
    fn entry(&self, idx: usize) -> &Entry<K, V> {
        match &self.entries[idx] {
            Some(entry) => entry,
            None => panic!("corrupt chain: slot {} is vacant", idx),
        }
    }

    fn entry_mut(&mut self, idx: usize) -> &mut Entry<K, V> {
        match &mut self.entries[idx] {
            Some(entry) => entry,
            None => panic!("corrupt chain: slot {} is vacant", idx),
        }
    }

    /// Take an entry out of the arena and recycle its slot.
    fn release(&mut self, idx: usize) -> Entry<K, V> {
        match self.entries[idx].take() {
            Some(entry) => {
                self.free.push(idx);
                entry
            }
            None => panic!("corrupt chain: releasing vacant slot {}", idx),
        }
    }

    #[inline]
    fn bucket_index(&self, hash_cache: u64) -> usize {
        (hash_cache % self.buckets.len() as u64) as usize
    }

    /// Number of live key-value pairs.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current bucket count.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Iterate over live `(key, value)` pairs in bucket-then-chain order.
    ///
    /// The order is unspecified and may change across any mutation.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            table: self,
            bucket: 0,
            cursor: None,
        }
    }

    /// Iterate over live keys.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Iterate over live values.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    /// Current hash parameters, exposed so tests can observe reseeding.
    #[cfg(test)]
    pub(crate) fn hash_params(&self) -> UniversalHasher {
        self.hasher
    }

    /// Verify the rep invariant, panicking on any violation.
    ///
    /// Checks that every live slot is reachable from exactly one chain, that
    /// each entry sits in the bucket its cached hash selects, that
    /// `next.prev` mirrors every forward link, and that `len` matches the
    /// total chain length. A failure here is a structural bug, not a user
    /// error; the check exists for tests and debugging, not as part of the
    /// stable contract.
    pub fn check_rep(&self) {
        let mut seen = vec![false; self.entries.len()];
        let mut counted = 0;

        for (bucket, head) in self.buckets.iter().enumerate() {
            let mut prev = None;
            let mut cursor = *head;
            while let Some(idx) = cursor {
                assert!(!seen[idx], "slot {} linked from two chains", idx);
                seen[idx] = true;
                counted += 1;

                let entry = self.entry(idx);
                assert_eq!(
                    self.bucket_index(entry.hash_cache),
                    bucket,
                    "entry in slot {} is chained under the wrong bucket",
                    idx
                );
                assert_eq!(
                    entry.chain_prev, prev,
                    "chain_prev of slot {} does not mirror the forward link",
                    idx
                );
                prev = cursor;
                cursor = entry.chain_next;
            }
        }

        assert_eq!(counted, self.len, "len does not match total chain length");
        for (idx, slot) in self.entries.iter().enumerate() {
            assert_eq!(
                slot.is_some(),
                seen[idx],
                "slot {} live/linked status mismatch",
                idx
            );
        }
    }
}

impl<K, V> ChainedHashTable<K, V>
where
    K: Normalize + Eq,
{
    /// Create a table with the default bucket count (16) and prime range
    /// `(1_000_000, 10_000_000)`, seeded from entropy.
    pub fn new() -> Self {
        Self::with_params(DEFAULT_BUCKETS, DEFAULT_PRIME_RANGE)
    }

    /// Create a table with explicit parameters, seeded from entropy.
    ///
    /// # Arguments
    /// * `size` - Initial bucket count; must be a power of two
    /// * `prime_range` - Half-open range the prime modulus is drawn from
    pub fn with_params(size: usize, prime_range: (u64, u64)) -> Self {
        Self::from_rng(size, prime_range, ChaCha8Rng::from_entropy())
    }

    /// Create a table whose hash parameters derive from a fixed seed.
    ///
    /// The same seed and insertion sequence reproduce the same bucket
    /// layout, which tests rely on.
    pub fn seeded(size: usize, prime_range: (u64, u64), seed: u64) -> Self {
        Self::from_rng(size, prime_range, ChaCha8Rng::seed_from_u64(seed))
    }

    fn from_rng(size: usize, prime_range: (u64, u64), mut rng: ChaCha8Rng) -> Self {
        assert!(
            size > 0 && size.is_power_of_two(),
            "bucket count must be a power of two"
        );
        assert!(
            prime_range.0 >= 2 && prime_range.1 > prime_range.0,
            "prime range must satisfy 2 <= lo < hi"
        );

        let hasher = UniversalHasher::draw(&mut rng, prime_range);
        ChainedHashTable {
            buckets: vec![None; size],
            entries: Vec::new(),
            free: Vec::new(),
            len: 0,
            hasher,
            prime_range,
            rng,
        }
    }

    /// Insert a key-value pair, returning the previous value if the key was
    /// already present.
    ///
    /// Doubles the table first when the live-entry count has reached the
    /// bucket count. Never fails: an existing key is overwritten in place, a
    /// new key is appended at the tail of its bucket's chain.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if self.len >= self.buckets.len() {
            self.double();
        }

        let hash_cache = self.hasher.hash(key.normalize());
        let bucket = self.bucket_index(hash_cache);

        let mut tail = None;
        let mut cursor = self.buckets[bucket];
        while let Some(idx) = cursor {
            if self.entry(idx).key == key {
                let old = std::mem::replace(&mut self.entry_mut(idx).value, value);
                return Some(old);
            }
            tail = Some(idx);
            cursor = self.entry(idx).chain_next;
        }

        let slot = self.alloc(Entry {
            key,
            value,
            hash_cache,
            chain_next: None,
            chain_prev: tail,
        });
        match tail {
            Some(t) => self.entry_mut(t).chain_next = Some(slot),
            None => self.buckets[bucket] = Some(slot),
        }
        self.len += 1;
        None
    }

    /// Look up the value stored under `key`.
    pub fn get(&self, key: &K) -> Result<&V, TableError> {
        match self.find(key) {
            Some(idx) => Ok(&self.entry(idx).value),
            None => Err(TableError::KeyNotFound),
        }
    }

    /// Look up the value stored under `key`, mutably.
    pub fn get_mut(&mut self, key: &K) -> Result<&mut V, TableError> {
        match self.find(key) {
            Some(idx) => Ok(&mut self.entry_mut(idx).value),
            None => Err(TableError::KeyNotFound),
        }
    }

    /// `true` if the table holds `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Remove `key`, returning its value.
    ///
    /// Splices the entry out of its chain. Four cases: sole entry in the
    /// bucket, head of a longer chain, tail, and interior; each repairs the
    /// surviving neighbors' links (and the bucket head for the first two).
    pub fn remove(&mut self, key: &K) -> Result<V, TableError> {
        let idx = match self.find(key) {
            Some(idx) => idx,
            None => return Err(TableError::KeyNotFound),
        };

        let (prev, next, bucket) = {
            let entry = self.entry(idx);
            (
                entry.chain_prev,
                entry.chain_next,
                self.bucket_index(entry.hash_cache),
            )
        };

        match (prev, next) {
            // sole entry in the bucket
            (None, None) => self.buckets[bucket] = None,
            // head of the chain: bucket now points at the successor
            (None, Some(n)) => {
                self.buckets[bucket] = Some(n);
                self.entry_mut(n).chain_prev = None;
            }
            // tail of the chain
            (Some(p), None) => self.entry_mut(p).chain_next = None,
            // interior: neighbors link around the entry
            (Some(p), Some(n)) => {
                self.entry_mut(p).chain_next = Some(n);
                self.entry_mut(n).chain_prev = Some(p);
            }
        }

        let entry = self.release(idx);
        self.len -= 1;
        Ok(entry.value)
    }

    fn find(&self, key: &K) -> Option<usize> {
        let hash_cache = self.hasher.hash(key.normalize());
        let mut cursor = self.buckets[self.bucket_index(hash_cache)];
        while let Some(idx) = cursor {
            let entry = self.entry(idx);
            if entry.key == *key {
                return Some(idx);
            }
            cursor = entry.chain_next;
        }
        None
    }

    fn alloc(&mut self, entry: Entry<K, V>) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.entries[idx] = Some(entry);
                idx
            }
            None => {
                self.entries.push(Some(entry));
                self.entries.len() - 1
            }
        }
    }

    /// Double the bucket array, reseed the hash family, and relink every
    /// live entry into its new bucket.
    ///
    /// Entries are relinked, not recreated: arena slots keep their indices,
    /// only the cached hashes and chain links change. Each entry is visited
    /// exactly once.
    fn double(&mut self) {
        let new_size = self.buckets.len() * 2;
        self.hasher = UniversalHasher::draw(&mut self.rng, self.prime_range);
        debug!(
            "doubling hashtable to {} buckets, reseeded hash family (p = {})",
            new_size,
            self.hasher.prime()
        );

        self.buckets = vec![None; new_size];
        let mut tails: Vec<Option<usize>> = vec![None; new_size];

        for idx in 0..self.entries.len() {
            let hash_cache = match &self.entries[idx] {
                Some(entry) => self.hasher.hash(entry.key.normalize()),
                None => continue,
            };
            let bucket = self.bucket_index(hash_cache);

            {
                let entry = self.entry_mut(idx);
                entry.hash_cache = hash_cache;
                entry.chain_next = None;
                entry.chain_prev = tails[bucket];
            }
            match tails[bucket] {
                Some(t) => self.entry_mut(t).chain_next = Some(idx),
                None => self.buckets[bucket] = Some(idx),
            }
            tails[bucket] = Some(idx);
        }
    }
}

impl<K, V> Default for ChainedHashTable<K, V>
where
    K: Normalize + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over live `(key, value)` pairs in bucket-then-chain order.
pub struct Iter<'a, K, V> {
    table: &'a ChainedHashTable<K, V>,
    bucket: usize,
    cursor: Option<usize>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(idx) = self.cursor {
                let entry = self.table.entry(idx);
                self.cursor = entry.chain_next;
                return Some((&entry.key, &entry.value));
            }
            if self.bucket >= self.table.buckets.len() {
                return None;
            }
            self.cursor = self.table.buckets[self.bucket];
            self.bucket += 1;
        }
    }
}
