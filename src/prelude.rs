pub use crate::builder::{ServiceBuilder, ServiceConfig, Services};
pub use crate::ds::{FifoQueue, HashIndex, LinkedList, RatingTree, RecentList, ShardSelector, Stack};
pub use crate::error::{ConfigError, Error, InvariantError, Result};
pub use crate::service::{
    ActivityTracker, AdmissionQueue, CacheStats, EnqueueReceipt, ItemStatus, PageVisit,
    QueueItem, QueueStatus, RankedEntry, Rating, RatingRanker, RatingStats, RecentView,
    ResponseCache,
};
