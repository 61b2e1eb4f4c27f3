//! Bounded recency list with unique keys.
//!
//! Used to track recently viewed entities per user. Implemented as a
//! [`LinkedList`] of `(key, value)` pairs ordered oldest (head) to newest (tail).
//!
//! ## Behavior
//! - `record(k, v)`: unlinks any existing entry for `k`, evicts the head if
//!   the list is still at capacity, then appends `(k, v)` at the tail
//! - `remove(k)`: unlinks the entry for `k`
//! - `iter()`: oldest to newest
//!
//! ## Performance
//! - `record` / `remove` / `contains`: O(capacity)
//!
//! The capacity is small (10 for recently viewed cities), so a linear scan
//! beats keeping a separate key index in sync.
//!
//! ## Example Usage
//!
//! ```
//! use tripkit::ds::RecentList;
//!
//! let mut recent = RecentList::new(2);
//! recent.record("a", 1);
//! recent.record("b", 2);
//! recent.record("a", 3); // moves "a" to the tail
//! recent.record("c", 4); // evicts "b"
//!
//! let keys: Vec<_> = recent.iter().map(|(k, _)| *k).collect();
//! assert_eq!(keys, vec!["a", "c"]);
//! ```

use tracing::trace;

use crate::ds::linked_list::LinkedList;
use crate::error::InvariantError;

/// Default number of entries kept per user.
pub const DEFAULT_RECENT_CAPACITY: usize = 10;

/// Bounded, key-unique list ordered by last record time.
#[derive(Debug)]
pub struct RecentList<K, V> {
    list: LinkedList<(K, V)>,
    capacity: usize,
}

impl<K, V> RecentList<K, V>
where
    K: Eq,
{
    /// Creates a list keeping at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            list: LinkedList::new(),
            capacity,
        }
    }

    /// Returns the maximum number of entries kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if the list holds no entries.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns `true` if `key` is present.
    pub fn contains(&self, key: &K) -> bool {
        self.list.position(|(k, _)| k == key).is_some()
    }

    /// Records `key` as the newest entry, returning the evicted oldest entry if any.
    ///
    /// A key that is already present is moved to the tail with the new value
    /// and does not count towards eviction.
    pub fn record(&mut self, key: K, value: V) -> Option<(K, V)> {
        if self.capacity == 0 {
            return None;
        }

        self.list.remove_first(|(k, _)| *k == key);

        let evicted = if self.list.len() >= self.capacity {
            let evicted = self.list.pop_front().ok();
            trace!(capacity = self.capacity, "recent list evicted oldest entry");
            evicted
        } else {
            None
        };

        self.list.push_back((key, value));
        evicted
    }

    /// Removes the entry for `key`, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.list.remove_first(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Iterates from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.list.iter().map(|(k, v)| (k, v))
    }

    /// Checks the capacity bound and key uniqueness.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.list.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "recent list holds {} entries, capacity {}",
                self.list.len(),
                self.capacity
            )));
        }
        let entries: Vec<&(K, V)> = self.list.iter().collect();
        for (i, (key, _)) in entries.iter().enumerate() {
            if entries[..i].iter().any(|(other, _)| other == key) {
                return Err(InvariantError::new("duplicate key in recent list"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &RecentList<u32, &'static str>) -> Vec<u32> {
        list.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn evicts_oldest_past_capacity() {
        let mut recent = RecentList::new(DEFAULT_RECENT_CAPACITY);
        for id in 1..=10 {
            assert_eq!(recent.record(id, "city"), None);
        }
        assert_eq!(recent.record(11, "city"), Some((1, "city")));
        assert_eq!(recent.len(), 10);
        assert_eq!(keys(&recent), (2..=11).collect::<Vec<_>>());
        recent.check_invariants().unwrap();
    }

    #[test]
    fn re_record_moves_to_tail_without_growing() {
        let mut recent = RecentList::new(3);
        recent.record(1, "a");
        recent.record(2, "b");
        recent.record(3, "c");

        assert_eq!(recent.record(1, "a2"), None);
        assert_eq!(keys(&recent), vec![2, 3, 1]);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent.iter().last(), Some((&1, &"a2")));
    }

    #[test]
    fn re_record_at_capacity_does_not_evict() {
        let mut recent = RecentList::new(2);
        recent.record(1, "a");
        recent.record(2, "b");
        assert_eq!(recent.record(2, "b"), None);
        assert_eq!(keys(&recent), vec![1, 2]);
    }

    #[test]
    fn remove_and_contains() {
        let mut recent = RecentList::new(4);
        recent.record(5, "x");
        assert!(recent.contains(&5));
        assert_eq!(recent.remove(&5), Some("x"));
        assert_eq!(recent.remove(&5), None);
        assert!(recent.is_empty());
    }

    #[test]
    fn zero_capacity_is_noop() {
        let mut recent = RecentList::new(0);
        assert_eq!(recent.record(1, "a"), None);
        assert!(recent.is_empty());
        assert_eq!(recent.capacity(), 0);
    }
}
