//! Deterministic key-to-shard mapping.
//!
//! Used by [`ActivityTracker`](crate::service::tracker::ActivityTracker) to
//! spread per-user state over independently locked shards.
//!
//! ## Architecture
//!
//! ```text
//!   "user:42" ──► ShardSelector { shards: 4, seed: 7 }
//!                   1. FxHasher
//!                   2. hash seed, then key
//!                   3. finish() % 4
//!                        │
//!                        ▼
//!   ┌─────────┬─────────┬─────────┬─────────┐
//!   │ Shard 0 │ Shard 1 │ Shard 2 │ Shard 3 │
//!   └─────────┴─────────┴─────────┴─────────┘
//! ```
//!
//! The same `(key, seed, shards)` always yields the same shard, across
//! processes as well, since `FxHasher` is unseeded.
//!
//! ## Example Usage
//!
//! ```
//! use tripkit::ds::ShardSelector;
//!
//! let selector = ShardSelector::new(4, 0);
//! let shard = selector.shard_for_key("user:123");
//! assert!(shard < 4);
//! assert_eq!(selector.shard_for_key("user:123"), shard);
//! ```

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

/// Deterministic shard selector using a seeded hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardSelector {
    shards: usize,
    seed: u64,
}

impl ShardSelector {
    /// Creates a selector for `shards` shards with the given `seed`.
    ///
    /// The shard count is clamped to at least 1.
    pub fn new(shards: usize, seed: u64) -> Self {
        Self {
            shards: shards.max(1),
            seed,
        }
    }

    /// Returns the number of shards.
    pub fn shard_count(&self) -> usize {
        self.shards
    }

    /// Maps a key to a shard index in `[0, shards)`.
    pub fn shard_for_key<K: Hash + ?Sized>(&self, key: &K) -> usize {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        key.hash(&mut hasher);
        (hasher.finish() as usize) % self.shards
    }
}

impl Default for ShardSelector {
    /// Creates a single-shard selector with seed 0.
    fn default() -> Self {
        Self::new(1, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_shards_clamped_to_one() {
        let selector = ShardSelector::new(0, 9);
        assert_eq!(selector.shard_count(), 1);
        assert_eq!(selector.shard_for_key("anyone"), 0);
    }

    #[test]
    fn mapping_is_deterministic_and_in_range() {
        let selector = ShardSelector::new(8, 42);
        for i in 0..500 {
            let key = format!("user:{i}");
            let shard = selector.shard_for_key(key.as_str());
            assert!(shard < 8);
            assert_eq!(selector.shard_for_key(key.as_str()), shard);
        }
    }

    #[test]
    fn keys_spread_over_all_shards() {
        let selector = ShardSelector::new(4, 0);
        let mut seen = [0usize; 4];
        for i in 0..1_000 {
            seen[selector.shard_for_key(&i)] += 1;
        }
        assert!(seen.iter().all(|&n| n > 0), "shard histogram {seen:?}");
    }

    #[test]
    fn str_and_string_agree() {
        let selector = ShardSelector::new(16, 3);
        let owned = String::from("user:alice");
        assert_eq!(
            selector.shard_for_key(owned.as_str()),
            selector.shard_for_key("user:alice")
        );
    }

    #[test]
    fn default_is_single_shard() {
        assert_eq!(ShardSelector::default(), ShardSelector::new(1, 0));
    }
}
