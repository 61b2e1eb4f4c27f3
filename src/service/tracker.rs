//! Per-user navigation history and recently viewed entities.
//!
//! ## Architecture
//!
//! ```text
//!   ActivityTracker<E>
//!   ┌───────────────────────────────────────────────────────────────────┐
//!   │ selector: ShardSelector (user id → shard)                         │
//!   │                                                                   │
//!   │ shards[i]: Mutex<TrackerShard>                                    │
//!   │   navigation: user → Stack<PageVisit>           (unbounded, LIFO) │
//!   │   recent:     user → RecentList<E, ViewInfo>    (bounded, 10)     │
//!   └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Per-user state is created on first write and never removed; growth with
//! the number of distinct users is accepted. User ids are opaque and not
//! validated.
//!
//! ## Example Usage
//!
//! ```
//! use tripkit::service::ActivityTracker;
//!
//! let tracker: ActivityTracker<u64> = ActivityTracker::new();
//! for page in ["Home", "Cities", "Mumbai", "Book"] {
//!     tracker.track("u1", page);
//! }
//! assert_eq!(tracker.go_back("u1").map(|v| v.page), Some("Mumbai".to_string()));
//!
//! tracker.record_view("u1", 7, "Mumbai");
//! assert_eq!(tracker.recent("u1")[0].entity_id, 7);
//! ```

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::debug;

use crate::ds::{DEFAULT_RECENT_CAPACITY, RecentList, ShardSelector, Stack};

/// Default number of independently locked user shards.
pub const DEFAULT_TRACKER_SHARDS: usize = 16;

/// One navigation breadcrumb.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageVisit {
    pub page: String,
    pub visited_at: DateTime<Utc>,
}

/// One recently viewed entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentView<E> {
    pub entity_id: E,
    pub label: String,
    pub viewed_at: DateTime<Utc>,
}

#[derive(Debug)]
struct ViewInfo {
    label: String,
    viewed_at: DateTime<Utc>,
}

#[derive(Debug)]
struct TrackerShard<E> {
    navigation: FxHashMap<String, Stack<PageVisit>>,
    recent: FxHashMap<String, RecentList<E, ViewInfo>>,
}

impl<E> Default for TrackerShard<E> {
    fn default() -> Self {
        Self {
            navigation: FxHashMap::default(),
            recent: FxHashMap::default(),
        }
    }
}

/// Thread-safe per-user history and recency tracker.
#[derive(Debug)]
pub struct ActivityTracker<E> {
    shards: Vec<Mutex<TrackerShard<E>>>,
    selector: ShardSelector,
    recent_capacity: usize,
}

impl<E> ActivityTracker<E>
where
    E: Eq + Clone,
{
    /// Creates a tracker with 16 shards and a recent-list capacity of 10.
    pub fn new() -> Self {
        Self::with_config(DEFAULT_TRACKER_SHARDS, DEFAULT_RECENT_CAPACITY)
    }

    /// Creates a tracker with `shards` user shards (clamped to at least 1)
    /// keeping at most `recent_capacity` recent views per user.
    pub fn with_config(shards: usize, recent_capacity: usize) -> Self {
        let selector = ShardSelector::new(shards, 0);
        let shards = (0..selector.shard_count())
            .map(|_| Mutex::new(TrackerShard::default()))
            .collect();
        Self {
            shards,
            selector,
            recent_capacity,
        }
    }

    fn shard(&self, user_id: &str) -> &Mutex<TrackerShard<E>> {
        &self.shards[self.selector.shard_for_key(user_id)]
    }

    /// Returns the number of independently locked user shards.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Returns the per-user recent-view capacity.
    pub fn recent_capacity(&self) -> usize {
        self.recent_capacity
    }

    /// Pushes `page` onto the user's navigation stack.
    pub fn track(&self, user_id: &str, page: impl Into<String>) {
        let visit = PageVisit {
            page: page.into(),
            visited_at: Utc::now(),
        };
        let mut shard = self.shard(user_id).lock();
        match shard.navigation.get_mut(user_id) {
            Some(stack) => stack.push(visit),
            None => {
                let mut stack = Stack::new();
                stack.push(visit);
                shard.navigation.insert(user_id.to_owned(), stack);
            },
        }
    }

    /// Discards the current page and returns the one before it.
    ///
    /// Returns `None` if the user has no history or had a single entry.
    pub fn go_back(&self, user_id: &str) -> Option<PageVisit> {
        let mut shard = self.shard(user_id).lock();
        let stack = shard.navigation.get_mut(user_id)?;
        stack.pop().ok()?;
        stack.peek().ok().cloned()
    }

    /// The `limit` most recent visits, newest first, leaving the stack intact.
    pub fn history(&self, user_id: &str, limit: usize) -> Vec<PageVisit> {
        let mut shard = self.shard(user_id).lock();
        let Some(stack) = shard.navigation.get_mut(user_id) else {
            return Vec::new();
        };

        let mut history = Vec::with_capacity(limit.min(stack.len()));
        let mut aux = Stack::new();
        while history.len() < limit {
            let Ok(visit) = stack.pop() else {
                break;
            };
            history.push(visit.clone());
            aux.push(visit);
        }
        while let Ok(visit) = aux.pop() {
            stack.push(visit);
        }
        history
    }

    /// Records a view of `entity_id`, moving it to the newest position.
    ///
    /// The oldest view is evicted once the user's list is at capacity.
    pub fn record_view(&self, user_id: &str, entity_id: E, label: impl Into<String>) {
        let info = ViewInfo {
            label: label.into(),
            viewed_at: Utc::now(),
        };
        let capacity = self.recent_capacity;
        let mut shard = self.shard(user_id).lock();
        let evicted = match shard.recent.get_mut(user_id) {
            Some(list) => list.record(entity_id, info),
            None => {
                let mut list = RecentList::new(capacity);
                let evicted = list.record(entity_id, info);
                shard.recent.insert(user_id.to_owned(), list);
                evicted
            },
        };
        if let Some((_, old)) = evicted {
            debug!(user_id, label = %old.label, "recent view evicted");
        }
    }

    /// Recent views, oldest first. Empty for users with no recorded views.
    pub fn recent(&self, user_id: &str) -> Vec<RecentView<E>> {
        let shard = self.shard(user_id).lock();
        let Some(list) = shard.recent.get(user_id) else {
            return Vec::new();
        };
        list.iter()
            .map(|(entity_id, info)| RecentView {
                entity_id: entity_id.clone(),
                label: info.label.clone(),
                viewed_at: info.viewed_at,
            })
            .collect()
    }

    /// Number of distinct users with any tracked state.
    pub fn user_count(&self) -> usize {
        self.shards
            .iter()
            .map(|shard| {
                let shard = shard.lock();
                let recent_only = shard
                    .recent
                    .keys()
                    .filter(|user| !shard.navigation.contains_key(*user))
                    .count();
                shard.navigation.len() + recent_only
            })
            .sum()
    }
}

impl<E> Default for ActivityTracker<E>
where
    E: Eq + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
