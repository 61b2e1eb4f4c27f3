//! Error types for the tripkit library.
//!
//! ## Key Components
//!
//! - [`Error`]: Returned by strict-access operations on the index structures
//!   (missing key, empty stack/queue, out-of-bounds list position) and by
//!   positional inserts with an invalid position.
//! - [`InvariantError`]: Returned when internal data-structure invariants are
//!   violated (`check_invariants` methods).
//! - [`ConfigError`]: Returned when service configuration parameters are
//!   invalid (e.g. zero capacity, out-of-range load factor).
//!
//! ## Example Usage
//!
//! ```
//! use tripkit::ds::HashIndex;
//! use tripkit::error::Error;
//!
//! let mut index: HashIndex<String, u32> = HashIndex::new();
//! index.put("paris".to_string(), 4);
//!
//! assert_eq!(index.lookup("paris"), Ok(&4));
//! assert!(matches!(index.lookup("rome"), Err(Error::NotFound(_))));
//! ```

use thiserror::Error;

/// Result alias for fallible tripkit operations.
pub type Result<T> = std::result::Result<T, Error>;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error kinds surfaced by the index structures.
///
/// Neither kind is retried internally; callers decide how to surface them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A key, item, or position does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// An argument is outside the accepted range (e.g. insertion position).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Creates a [`Error::NotFound`] with the given description.
    #[inline]
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Creates a [`Error::InvalidArgument`] with the given description.
    #[inline]
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Returns `true` for [`Error::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal invariants are violated.
///
/// Produced by `check_invariants` methods (e.g.
/// [`HashIndex::check_invariants`](crate::ds::HashIndex::check_invariants)).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when service configuration parameters are invalid.
///
/// Produced by [`ServiceBuilder::try_build`](crate::builder::ServiceBuilder::try_build)
/// and the per-service `try_build_*` methods.
///
/// # Example
///
/// ```
/// use tripkit::builder::ServiceBuilder;
///
/// let err = ServiceBuilder::new().hash_capacity(0).validate().unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
