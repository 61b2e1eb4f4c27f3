//! Separate-chaining hash index with load-factor growth.
//!
//! Backs the [`ResponseCache`](crate::service::cache::ResponseCache). Each bucket
//! is an ordered `Vec<(K, V)>`; a key's bucket is `hash(key) % capacity`.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    HashIndex<K, V> (capacity = 8)                       │
//! │                                                                         │
//! │   buckets: Vec<Vec<(K, V)>>                                             │
//! │                                                                         │
//! │   [0] ─► ("city_1", a)                                                  │
//! │   [1] ─► (empty)                                                        │
//! │   [2] ─► ("city_9", b) ─► ("city_4", c)      ◄── collision chain        │
//! │   [3] ─► (empty)                                                        │
//! │   ...                                                                   │
//! │   [7] ─► ("city_2", d)                                                  │
//! │                                                                         │
//! │   put(k, v):                                                            │
//! │     1. i = hash(k) % capacity                                           │
//! │     2. scan buckets[i]; overwrite in place if k present                 │
//! │     3. otherwise append, len += 1                                       │
//! │     4. if len / capacity > max_load_factor: double + rehash everything  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation            | Description                           | Complexity   |
//! |----------------------|---------------------------------------|--------------|
//! | [`put`]              | Insert or overwrite                   | O(1) average |
//! | [`get`] / [`get_or`] | Lookup (miss → `None` / default)      | O(1) average |
//! | [`lookup`]           | Strict lookup (miss → `NotFound`)     | O(1) average |
//! | [`delete`]           | Remove, report existence              | O(1) average |
//! | [`keys`] / [`items`] | Full snapshots                        | O(n)         |
//!
//! [`put`]: HashIndex::put
//! [`get`]: HashIndex::get
//! [`get_or`]: HashIndex::get_or
//! [`lookup`]: HashIndex::lookup
//! [`delete`]: HashIndex::delete
//! [`keys`]: HashIndex::keys
//! [`items`]: HashIndex::items
//!
//! ## Example Usage
//!
//! ```
//! use tripkit::ds::HashIndex;
//!
//! let mut index: HashIndex<&str, u32> = HashIndex::new();
//! index.put("lisbon", 3);
//! index.put("lisbon", 5);
//!
//! assert_eq!(index.get(&"lisbon"), Some(&5));
//! assert_eq!(index.get_or(&"oslo", 0), 0);
//! assert!(index.delete(&"lisbon"));
//! assert!(!index.delete(&"lisbon"));
//! ```
//!
//! ## Implementation Notes
//!
//! - Growth is a full rebuild into fresh buckets, never incremental.
//! - There is no shrink path; `clear` keeps the current bucket count.
//! - The default hasher is `FxHasher`, which is deterministic across runs.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, BuildHasherDefault, Hash};

use rustc_hash::FxHasher;
use tracing::debug;

use crate::error::{Error, InvariantError, Result};

/// Default hash builder: deterministic `FxHasher`.
pub type FxBuildHasher = BuildHasherDefault<FxHasher>;

/// Bucket count of a freshly created index.
pub const DEFAULT_CAPACITY: usize = 16;

/// Growth threshold for `len / capacity`.
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.75;

type Bucket<K, V> = Vec<(K, V)>;

/// Associative map using separate chaining and doubling growth.
pub struct HashIndex<K, V, S = FxBuildHasher> {
    buckets: Vec<Bucket<K, V>>,
    len: usize,
    max_load_factor: f64,
    hasher: S,
}

impl<K, V> HashIndex<K, V, FxBuildHasher>
where
    K: Eq + Hash,
{
    /// Creates an empty index with 16 buckets and a 0.75 load factor.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty index with `capacity` buckets (clamped to at least 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_params(capacity, DEFAULT_MAX_LOAD_FACTOR, FxBuildHasher::default())
    }
}

impl<K, V, S> HashIndex<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Creates an empty index with explicit bucket count, load factor and hasher.
    ///
    /// `capacity` is clamped to at least 1. A non-finite or non-positive
    /// `max_load_factor` falls back to [`DEFAULT_MAX_LOAD_FACTOR`]; use
    /// [`ServiceBuilder`](crate::builder::ServiceBuilder) for validated input.
    pub fn with_params(capacity: usize, max_load_factor: f64, hasher: S) -> Self {
        let capacity = capacity.max(1);
        let max_load_factor = if max_load_factor.is_finite() && max_load_factor > 0.0 {
            max_load_factor
        } else {
            DEFAULT_MAX_LOAD_FACTOR
        };
        Self {
            buckets: Self::empty_buckets(capacity),
            len: 0,
            max_load_factor,
            hasher,
        }
    }

    fn empty_buckets(capacity: usize) -> Vec<Bucket<K, V>> {
        (0..capacity).map(|_| Vec::new()).collect()
    }

    fn bucket_index<Q>(&self, key: &Q) -> usize
    where
        Q: Hash + ?Sized,
    {
        (self.hasher.hash_one(key) as usize) % self.buckets.len()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the index holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current bucket count.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Current `len / capacity` ratio.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Growth threshold configured for this index.
    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    /// Inserts `value` under `key`, returning the previous value if the key existed.
    ///
    /// Overwrites keep the entry's position in its bucket. A new key may
    /// trigger growth once the load factor exceeds the threshold.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let idx = self.bucket_index(&key);
        let bucket = &mut self.buckets[idx];
        if let Some(slot) = bucket.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(&mut slot.1, value));
        }
        bucket.push((key, value));
        self.len += 1;

        if self.load_factor() > self.max_load_factor {
            self.grow();
        }
        None
    }

    /// Doubles the bucket count and rehashes every entry into fresh buckets.
    fn grow(&mut self) {
        let old_capacity = self.buckets.len();
        let new_capacity = old_capacity * 2;
        let old = std::mem::replace(&mut self.buckets, Self::empty_buckets(new_capacity));
        for (key, value) in old.into_iter().flatten() {
            let idx = self.bucket_index(&key);
            self.buckets[idx].push((key, value));
        }
        debug!(
            old_capacity,
            new_capacity,
            len = self.len,
            "hash index grew"
        );
    }

    /// Returns a reference to the value under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.bucket_index(key);
        self.buckets[idx]
            .iter()
            .find(|(k, _)| k.borrow() == key)
            .map(|(_, v)| v)
    }

    /// Returns the value under `key`, or `default` when absent.
    pub fn get_or<Q>(&self, key: &Q, default: V) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.get(key).cloned().unwrap_or(default)
    }

    /// Returns a mutable reference to the value under `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.bucket_index(key);
        self.buckets[idx]
            .iter_mut()
            .find(|(k, _)| k.borrow() == key)
            .map(|(_, v)| v)
    }

    /// Strict lookup: a missing key is an [`Error::NotFound`].
    pub fn lookup<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        self.get(key)
            .ok_or_else(|| Error::not_found(format!("key {key:?}")))
    }

    /// Returns `true` if `key` is present.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Removes `key` and returns its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.bucket_index(key);
        let bucket = &mut self.buckets[idx];
        let pos = bucket.iter().position(|(k, _)| k.borrow() == key)?;
        let (_, value) = bucket.remove(pos);
        self.len -= 1;
        Some(value)
    }

    /// Removes `key`; returns `true` if it existed.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove(key).is_some()
    }

    /// Strict removal: a missing key is an [`Error::NotFound`].
    pub fn take<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        self.remove(key)
            .ok_or_else(|| Error::not_found(format!("key {key:?}")))
    }

    /// Removes every entry. The bucket count is kept.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    /// Iterates entries in bucket order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.iter().map(|(k, v)| (k, v)))
    }

    /// Snapshot of all keys.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.iter().map(|(k, _)| k.clone()).collect()
    }

    /// Snapshot of all values.
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    /// Snapshot of all `(key, value)` pairs.
    pub fn items(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    /// Validates bucket placement, key uniqueness, length and load factor.
    pub fn check_invariants(&self) -> std::result::Result<(), InvariantError> {
        let mut counted = 0;
        for (idx, bucket) in self.buckets.iter().enumerate() {
            for (pos, (key, _)) in bucket.iter().enumerate() {
                if self.bucket_index(key) != idx {
                    return Err(InvariantError::new(format!(
                        "entry in bucket {idx} hashes to bucket {}",
                        self.bucket_index(key)
                    )));
                }
                if bucket[..pos].iter().any(|(other, _)| other == key) {
                    return Err(InvariantError::new(format!(
                        "duplicate key in bucket {idx}"
                    )));
                }
            }
            counted += bucket.len();
        }
        if counted != self.len {
            return Err(InvariantError::new(format!(
                "len is {} but buckets hold {counted} entries",
                self.len
            )));
        }
        if self.load_factor() > self.max_load_factor {
            return Err(InvariantError::new(format!(
                "load factor {:.3} exceeds {:.3}",
                self.load_factor(),
                self.max_load_factor
            )));
        }
        Ok(())
    }
}

impl<K, V> Default for HashIndex<K, V, FxBuildHasher>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> fmt::Debug for HashIndex<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.buckets.iter().flatten().map(|(k, v)| (k, v)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_get_overwrite() {
        let mut index = HashIndex::new();
        assert_eq!(index.put("k1", 1), None);
        assert_eq!(index.put("k1", 2), Some(1));
        assert_eq!(index.get(&"k1"), Some(&2));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn get_or_returns_default_on_miss() {
        let mut index: HashIndex<String, i32> = HashIndex::new();
        index.put("a".to_string(), 7);
        assert_eq!(index.get_or("a", -1), 7);
        assert_eq!(index.get_or("b", -1), -1);
    }

    #[test]
    fn strict_access_reports_not_found() {
        let mut index: HashIndex<String, i32> = HashIndex::new();
        assert!(index.lookup("missing").unwrap_err().is_not_found());
        assert!(index.take("missing").unwrap_err().is_not_found());

        index.put("present".to_string(), 1);
        assert_eq!(index.lookup("present"), Ok(&1));
        assert_eq!(index.take("present"), Ok(1));
        assert!(index.is_empty());
    }

    #[test]
    fn delete_reports_existence() {
        let mut index = HashIndex::new();
        index.put(10_u64, "ten");
        assert!(index.delete(&10));
        assert!(!index.delete(&10));
        assert!(!index.contains(&10));
        assert_eq!(index.len(), 0);
    }

    #[test]
    fn grows_past_load_factor_and_keeps_entries() {
        let mut index = HashIndex::new();
        assert_eq!(index.capacity(), 16);

        // 12 / 16 == 0.75 is not above the threshold
        for i in 0..12_u32 {
            index.put(i, i * 10);
        }
        assert_eq!(index.capacity(), 16);

        index.put(12, 120);
        assert_eq!(index.capacity(), 32);

        for i in 0..200_u32 {
            index.put(i, i * 10);
        }
        assert_eq!(index.len(), 200);
        assert!(index.capacity() >= 256);
        for i in 0..200_u32 {
            assert_eq!(index.get(&i), Some(&(i * 10)));
        }
        index.check_invariants().unwrap();
    }

    #[test]
    fn overwrite_does_not_trigger_growth() {
        let mut index = HashIndex::with_capacity(4);
        for i in 0..3 {
            index.put(i, 0);
        }
        assert_eq!(index.capacity(), 4);
        for round in 0..10 {
            index.put(0, round);
        }
        assert_eq!(index.capacity(), 4);
        assert_eq!(index.get(&0), Some(&9));
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut index = HashIndex::new();
        for i in 0..40 {
            index.put(i, i);
        }
        let capacity = index.capacity();
        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.capacity(), capacity);
        assert_eq!(index.get(&3), None);
    }

    #[test]
    fn snapshots_cover_every_entry() {
        let mut index = HashIndex::new();
        for i in 0..30 {
            index.put(i, i + 100);
        }
        let mut keys = index.keys();
        keys.sort();
        assert_eq!(keys, (0..30).collect::<Vec<_>>());

        let mut values = index.values();
        values.sort();
        assert_eq!(values, (100..130).collect::<Vec<_>>());

        let mut items = index.items();
        items.sort();
        assert_eq!(items.len(), 30);
        assert_eq!(items[0], (0, 100));
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut index = HashIndex::new();
        index.put("hits", 0);
        if let Some(v) = index.get_mut(&"hits") {
            *v += 5;
        }
        assert_eq!(index.get(&"hits"), Some(&5));
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let mut index = HashIndex::with_capacity(0);
        assert_eq!(index.capacity(), 1);
        index.put(1, 1);
        index.put(2, 2);
        assert_eq!(index.len(), 2);
        index.check_invariants().unwrap();
    }

    #[test]
    fn invalid_load_factor_falls_back_to_default() {
        let index: HashIndex<u32, u32> =
            HashIndex::with_params(8, f64::NAN, FxBuildHasher::default());
        assert_eq!(index.max_load_factor(), DEFAULT_MAX_LOAD_FACTOR);
    }

    #[test]
    fn debug_lists_entries() {
        let mut index = HashIndex::new();
        index.put("only", 1);
        assert_eq!(format!("{index:?}"), r#"{"only": 1}"#);
    }

    // ==============================================
    // Property Tests
    // ==============================================

    mod property_tests {
        use std::collections::HashMap;

        use proptest::prelude::*;

        use super::*;

        #[derive(Debug, Clone)]
        enum Op {
            Put(u16, u32),
            Delete(u16),
            Get(u16),
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                (0u16..200, any::<u32>()).prop_map(|(k, v)| Op::Put(k, v)),
                (0u16..200).prop_map(Op::Delete),
                (0u16..200).prop_map(Op::Get),
            ]
        }

        proptest! {
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_matches_std_hashmap(
                capacity in 1usize..32,
                ops in prop::collection::vec(op_strategy(), 0..400)
            ) {
                let mut index = HashIndex::with_capacity(capacity);
                let mut model = HashMap::new();
                for op in ops {
                    match op {
                        Op::Put(k, v) => {
                            prop_assert_eq!(index.put(k, v), model.insert(k, v));
                        },
                        Op::Delete(k) => {
                            prop_assert_eq!(index.delete(&k), model.remove(&k).is_some());
                        },
                        Op::Get(k) => {
                            prop_assert_eq!(index.get(&k), model.get(&k));
                        },
                    }
                    prop_assert_eq!(index.len(), model.len());
                }
                index.check_invariants().unwrap();
                for (k, v) in &model {
                    prop_assert_eq!(index.get(k), Some(v));
                }
            }
        }
    }
}
