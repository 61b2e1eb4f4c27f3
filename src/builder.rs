//! Service configuration and construction.
//!
//! The services are meant to be built once at process start and handed to
//! request handlers by reference (typically behind an `Arc`). Each test can
//! build a fresh, isolated set.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use tripkit::builder::{ServiceBuilder, Services};
//!
//! let services: Arc<Services<String, String>> = Arc::new(
//!     ServiceBuilder::new()
//!         .hash_capacity(64)
//!         .recent_capacity(5)
//!         .try_build()
//!         .unwrap(),
//! );
//!
//! services.cache.set("city_1".into(), "Jaipur".into());
//! services.admissions.enqueue("booking #1".into());
//! services.ranking.record_rating(1, 5);
//! services.tracker.record_view("u1", 1, "Jaipur");
//! ```

use std::hash::Hash;

use crate::ds::hash_index::{DEFAULT_CAPACITY, DEFAULT_MAX_LOAD_FACTOR};
use crate::ds::recent_list::DEFAULT_RECENT_CAPACITY;
use crate::error::ConfigError;
use crate::service::tracker::DEFAULT_TRACKER_SHARDS;
use crate::service::{ActivityTracker, AdmissionQueue, RatingRanker, ResponseCache};

/// Tunables for the service bundle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceConfig {
    /// Initial bucket count of the cache's hash index.
    pub hash_capacity: usize,
    /// Load factor above which the hash index doubles; in `(0, 1]`.
    pub max_load_factor: f64,
    /// Recently viewed entries kept per user.
    pub recent_capacity: usize,
    /// Independently locked shards of per-user state.
    pub tracker_shards: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            hash_capacity: DEFAULT_CAPACITY,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            recent_capacity: DEFAULT_RECENT_CAPACITY,
            tracker_shards: DEFAULT_TRACKER_SHARDS,
        }
    }
}

impl ServiceConfig {
    /// Checks every parameter, reporting the first invalid one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hash_capacity == 0 {
            return Err(ConfigError::new("hash capacity must be > 0"));
        }
        if !(self.max_load_factor > 0.0 && self.max_load_factor <= 1.0) {
            return Err(ConfigError::new(format!(
                "max load factor must be in (0, 1], got {}",
                self.max_load_factor
            )));
        }
        if self.recent_capacity == 0 {
            return Err(ConfigError::new("recent capacity must be > 0"));
        }
        if self.tracker_shards == 0 {
            return Err(ConfigError::new("tracker shard count must be > 0"));
        }
        Ok(())
    }
}

/// The four services, constructed together.
///
/// The cache is keyed by caller-derived strings (e.g. `"city_42"`); `V` is
/// the cached response, `P` the booking payload, `E` the entity identifier
/// used for ratings and recent views.
#[derive(Debug)]
pub struct Services<V, P, E = u64> {
    pub cache: ResponseCache<String, V>,
    pub admissions: AdmissionQueue<P>,
    pub ranking: RatingRanker<E>,
    pub tracker: ActivityTracker<E>,
}

impl<V, P, E> Default for Services<V, P, E>
where
    E: Eq + Clone,
{
    fn default() -> Self {
        Self {
            cache: ResponseCache::new(),
            admissions: AdmissionQueue::new(),
            ranking: RatingRanker::new(),
            tracker: ActivityTracker::new(),
        }
    }
}

/// Builder for [`Services`] and the individual services.
#[derive(Debug, Clone, Default)]
pub struct ServiceBuilder {
    config: ServiceConfig,
}

impl ServiceBuilder {
    /// Starts from [`ServiceConfig::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an explicit configuration.
    pub fn from_config(config: ServiceConfig) -> Self {
        Self { config }
    }

    /// Sets the initial bucket count of the cache index.
    pub fn hash_capacity(mut self, capacity: usize) -> Self {
        self.config.hash_capacity = capacity;
        self
    }

    /// Sets the load factor above which the cache index doubles.
    pub fn max_load_factor(mut self, load_factor: f64) -> Self {
        self.config.max_load_factor = load_factor;
        self
    }

    /// Sets the number of recent views kept per user.
    pub fn recent_capacity(mut self, capacity: usize) -> Self {
        self.config.recent_capacity = capacity;
        self
    }

    /// Sets the number of tracker user shards.
    pub fn tracker_shards(mut self, shards: usize) -> Self {
        self.config.tracker_shards = shards;
        self
    }

    /// The configuration built so far.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Validates the configuration without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.config.validate()
    }

    /// Builds a response cache.
    pub fn try_build_cache<K, V>(&self) -> Result<ResponseCache<K, V>, ConfigError>
    where
        K: Eq + Hash,
    {
        self.validate()?;
        Ok(ResponseCache::with_params(
            self.config.hash_capacity,
            self.config.max_load_factor,
        ))
    }

    /// Builds an activity tracker.
    pub fn try_build_tracker<E>(&self) -> Result<ActivityTracker<E>, ConfigError>
    where
        E: Eq + Clone,
    {
        self.validate()?;
        Ok(ActivityTracker::with_config(
            self.config.tracker_shards,
            self.config.recent_capacity,
        ))
    }

    /// Builds all four services.
    pub fn try_build<V, P, E>(&self) -> Result<Services<V, P, E>, ConfigError>
    where
        E: Eq + Clone,
    {
        Ok(Services {
            cache: self.try_build_cache()?,
            admissions: AdmissionQueue::new(),
            ranking: RatingRanker::new(),
            tracker: self.try_build_tracker()?,
        })
    }
}
