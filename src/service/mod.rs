//! Thread-safe services built on the [`ds`](crate::ds) structures.
//!
//! Each service owns its backing structures exclusively and guards them with
//! `parking_lot` locks, so a single instance can be shared behind an `Arc`
//! by every request handler. Nothing is shared across services.

pub mod admission;
pub mod cache;
pub mod ranking;
pub mod tracker;

pub use admission::{AdmissionQueue, EnqueueReceipt, ItemStatus, QueueItem, QueueStatus};
pub use cache::{CacheStats, ResponseCache};
pub use ranking::{RankedEntry, Rating, RatingRanker, RatingStats};
pub use tracker::{ActivityTracker, PageVisit, RecentView};

/// Rounds to two decimal places, as reported in stats snapshots.
///
/// Exact ties go to the even neighbour: `3.125` reports as `3.12`.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
