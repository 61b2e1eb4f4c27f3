//! Response cache with hit/miss accounting.
//!
//! ## Architecture
//!
//! ```text
//!   ResponseCache<K, V>
//!   ┌──────────────────────────────────────────────┐
//!   │ index: RwLock<HashIndex<K, V>>               │
//!   │ counters: { hits: AtomicU64, misses: ... }   │
//!   └──────────────────────────────────────────────┘
//!
//!   get(k)    → read lock, lookup, hits += 1 | misses += 1
//!   set(k, v) → write lock (growth rehash runs under it)
//!   delete(k) → write lock
//! ```
//!
//! There is no TTL, capacity bound or automatic eviction: the cache is a
//! counted pass-through and callers invalidate entries themselves (e.g.
//! `delete` on every write to the cached entity).
//!
//! ## Example Usage
//!
//! ```
//! use tripkit::service::ResponseCache;
//!
//! let cache: ResponseCache<String, String> = ResponseCache::new();
//! assert_eq!(cache.get("city_1"), None);
//!
//! cache.set("city_1".to_string(), "Mumbai".to_string());
//! assert_eq!(cache.get("city_1"), Some("Mumbai".to_string()));
//!
//! let stats = cache.stats();
//! assert_eq!((stats.hits, stats.misses, stats.total_requests), (1, 1, 2));
//! assert_eq!(stats.hit_rate, 50.0);
//! ```
//!
//! ## Thread Safety
//!
//! `ResponseCache` is `Send + Sync`. Writers hold the write lock for the
//! whole operation, including index growth, so readers never observe a
//! partially rehashed table.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use serde::Serialize;
use tracing::debug;

use crate::ds::hash_index::{DEFAULT_CAPACITY, DEFAULT_MAX_LOAD_FACTOR, FxBuildHasher, HashIndex};
use crate::error::InvariantError;
use crate::service::round2;

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub total_requests: u64,
    /// `hits / total_requests * 100`, rounded to 2 decimals; 0 with no requests.
    pub hit_rate: f64,
    pub current_size: usize,
}

/// Lookup counters. `total_requests` is derived as `hits + misses`.
#[derive(Debug, Default)]
struct CacheCounters {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CacheCounters {
    fn inc_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn inc_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    fn snapshot(&self, current_size: usize) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total_requests = hits + misses;
        let hit_rate = if total_requests == 0 {
            0.0
        } else {
            round2(hits as f64 / total_requests as f64 * 100.0)
        };
        CacheStats {
            hits,
            misses,
            total_requests,
            hit_rate,
            current_size,
        }
    }
}

/// Thread-safe cache over a [`HashIndex`] with hit/miss accounting.
#[derive(Debug)]
pub struct ResponseCache<K, V> {
    index: RwLock<HashIndex<K, V>>,
    counters: CacheCounters,
}

impl<K, V> ResponseCache<K, V>
where
    K: Eq + Hash,
{
    /// Creates an empty cache with the default index parameters.
    pub fn new() -> Self {
        Self::with_params(DEFAULT_CAPACITY, DEFAULT_MAX_LOAD_FACTOR)
    }

    /// Creates an empty cache with an explicit initial bucket count and load factor.
    pub fn with_params(capacity: usize, max_load_factor: f64) -> Self {
        Self {
            index: RwLock::new(HashIndex::with_params(
                capacity,
                max_load_factor,
                FxBuildHasher::default(),
            )),
            counters: CacheCounters::default(),
        }
    }

    /// Looks up `key`, counting a hit or a miss.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        let index = self.index.read();
        match index.get(key) {
            Some(value) => {
                self.counters.inc_hit();
                Some(value.clone())
            },
            None => {
                self.counters.inc_miss();
                None
            },
        }
    }

    /// Checks for `key` without touching the counters.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.read().contains(key)
    }

    /// Inserts or overwrites `key`, returning the previous value. No counter effect.
    pub fn set(&self, key: K, value: V) -> Option<V> {
        self.index.write().put(key, value)
    }

    /// Invalidates `key`; returns `true` if it was cached.
    pub fn delete<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = self.index.write().delete(key);
        if removed {
            debug!("cache entry invalidated");
        }
        removed
    }

    /// Drops every entry and resets the counters.
    pub fn clear(&self) {
        let mut index = self.index.write();
        index.clear();
        self.counters.reset();
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.index.read().len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.index.read().is_empty()
    }

    /// Snapshot of the counters and current size.
    pub fn stats(&self) -> CacheStats {
        let index = self.index.read();
        self.counters.snapshot(index.len())
    }

    /// Validates the backing index.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.index.read().check_invariants()
    }
}

impl<K, V> Default for ResponseCache<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
