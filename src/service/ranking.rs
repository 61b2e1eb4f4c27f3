//! Top-K ranking over rating values.
//!
//! Pairs a [`RatingTree`] of distinct rating values with a side index from
//! each rating to the entity IDs holding it, in the order they were recorded.
//!
//! ## Architecture
//!
//! ```text
//!   tree (distinct values)        index (rating → entity IDs)
//!
//!            85                   70 → [c6]
//!          /    \                 78 → [c3]
//!        78      92               85 → [c1, c9]    ◄── insertion order
//!       /       /  \              88 → [c5]
//!     70      88    95            ...
//!
//!   top_k(3):
//!     1. inorder                 → [70, 78, 85, 88, 90, 92, 95]
//!     2. last 3, descending      → [95, 92, 90]
//!     3. expand entity IDs per rating in recorded order, truncate to 3
//! ```
//!
//! Ties among equal ratings are broken by recording order, never by ID.
//!
//! ## Example Usage
//!
//! ```
//! use tripkit::service::RatingRanker;
//!
//! let ranker = RatingRanker::new();
//! ranker.record_rating("goa", 4);
//! ranker.record_rating("pune", 5);
//! ranker.record_rating("agra", 4);
//!
//! let top: Vec<_> = ranker.top_k(2).into_iter().map(|e| (e.rating, e.entity_id)).collect();
//! assert_eq!(top, vec![(5, "pune"), (4, "goa")]);
//! ```

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::{debug, trace};

use crate::ds::RatingTree;
use crate::error::InvariantError;
use crate::service::round2;

/// Rating value. Expected to be a small positive integer (1–5 or 1–10 scale).
pub type Rating = u32;

/// One row of a top-K result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry<Id> {
    pub rating: Rating,
    pub entity_id: Id,
}

/// Snapshot of the rating distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingStats {
    pub total_distinct_ratings: usize,
    pub highest: Option<Rating>,
    pub lowest: Option<Rating>,
    /// Mean of the distinct rating values (not weighted by entity count),
    /// rounded to 2 decimals. `None` when no ratings were recorded.
    pub average: Option<f64>,
    pub tree_height: usize,
}

#[derive(Debug)]
struct RankingState<Id> {
    tree: RatingTree<Rating>,
    index: FxHashMap<Rating, Vec<Id>>,
}

/// Thread-safe order-statistics engine over entity ratings.
#[derive(Debug)]
pub struct RatingRanker<Id> {
    state: Mutex<RankingState<Id>>,
}

impl<Id> RatingRanker<Id>
where
    Id: Eq + Clone,
{
    /// Creates an empty ranker.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RankingState {
                tree: RatingTree::new(),
                index: FxHashMap::default(),
            }),
        }
    }

    /// Records that `entity_id` holds `rating`.
    ///
    /// Idempotent per `(entity_id, rating)` pair.
    pub fn record_rating(&self, entity_id: Id, rating: Rating) {
        let mut state = self.state.lock();
        if state.tree.insert(rating) {
            trace!(rating, "new rating value");
        }
        let ids = state.index.entry(rating).or_default();
        if !ids.contains(&entity_id) {
            ids.push(entity_id);
        }
    }

    /// Highest-rated entries, at most `limit` of them.
    pub fn top_k(&self, limit: usize) -> Vec<RankedEntry<Id>> {
        let state = self.state.lock();
        let ascending = state.tree.inorder();
        let start = ascending.len().saturating_sub(limit);
        ascending[start..]
            .iter()
            .rev()
            .flat_map(|&rating| {
                state
                    .index
                    .get(&rating)
                    .into_iter()
                    .flatten()
                    .map(move |id| RankedEntry {
                        rating,
                        entity_id: id.clone(),
                    })
            })
            .take(limit)
            .collect()
    }

    /// Highest recorded rating value.
    pub fn highest(&self) -> Option<Rating> {
        self.state.lock().tree.max().copied()
    }

    /// Lowest recorded rating value.
    pub fn lowest(&self) -> Option<Rating> {
        self.state.lock().tree.min().copied()
    }

    /// Distinct rating values in ascending order.
    pub fn ratings_ascending(&self) -> Vec<Rating> {
        self.state.lock().tree.inorder()
    }

    /// Entity IDs recorded for `rating`, in recording order.
    pub fn entities_for(&self, rating: Rating) -> Vec<Id> {
        self.state
            .lock()
            .index
            .get(&rating)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of distinct rating values.
    pub fn len(&self) -> usize {
        self.state.lock().tree.len()
    }

    /// Returns `true` if no rating has been recorded.
    pub fn is_empty(&self) -> bool {
        self.state.lock().tree.is_empty()
    }

    /// Removes a rating value and every entity association with it.
    pub fn remove_rating(&self, rating: Rating) -> bool {
        let mut state = self.state.lock();
        let removed = state.tree.remove(&rating);
        state.index.remove(&rating);
        if removed {
            debug!(rating, "rating value removed");
        }
        removed
    }

    /// Removes one entity from `rating`; the value itself goes once no entity holds it.
    pub fn remove_entity_rating(&self, entity_id: &Id, rating: Rating) -> bool {
        let mut state = self.state.lock();
        let Some(ids) = state.index.get_mut(&rating) else {
            return false;
        };
        let Some(pos) = ids.iter().position(|id| id == entity_id) else {
            return false;
        };
        ids.remove(pos);
        if ids.is_empty() {
            state.index.remove(&rating);
            state.tree.remove(&rating);
            debug!(rating, "last entity left rating value");
        }
        true
    }

    /// Distinct count, extremes, average of distinct values and tree height.
    pub fn stats(&self) -> RatingStats {
        let state = self.state.lock();
        let values = state.tree.inorder();
        let average = if values.is_empty() {
            None
        } else {
            let sum: u64 = values.iter().map(|&v| u64::from(v)).sum();
            Some(round2(sum as f64 / values.len() as f64))
        };
        RatingStats {
            total_distinct_ratings: values.len(),
            highest: state.tree.max().copied(),
            lowest: state.tree.min().copied(),
            average,
            tree_height: state.tree.height(),
        }
    }

    /// Checks that tree values and index keys coincide and ID lists are unique.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let state = self.state.lock();
        state.tree.check_invariants()?;
        if state.index.len() != state.tree.len() {
            return Err(InvariantError::new(format!(
                "index has {} ratings, tree has {}",
                state.index.len(),
                state.tree.len()
            )));
        }
        for (rating, ids) in &state.index {
            if !state.tree.contains(rating) {
                return Err(InvariantError::new(format!(
                    "rating {rating} indexed but missing from tree"
                )));
            }
            if ids.is_empty() {
                return Err(InvariantError::new(format!(
                    "rating {rating} has no entities"
                )));
            }
            for (i, id) in ids.iter().enumerate() {
                if ids[..i].contains(id) {
                    return Err(InvariantError::new(format!(
                        "duplicate entity under rating {rating}"
                    )));
                }
            }
        }
        Ok(())
    }
}

impl<Id> Default for RatingRanker<Id>
where
    Id: Eq + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
