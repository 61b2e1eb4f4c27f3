//! tripkit: in-memory index services for a travel booking backend.
//!
//! Four independent services, each owning its own structures:
//!
//! - [`ResponseCache`](service::ResponseCache): hash-index cache with hit/miss accounting
//! - [`AdmissionQueue`](service::AdmissionQueue): FIFO booking admission
//! - [`RatingRanker`](service::RatingRanker): top-K ranking over a rating BST
//! - [`ActivityTracker`](service::ActivityTracker): per-user navigation stack and
//!   bounded recently-viewed list
//!
//! The hand-rolled structures behind them live in [`ds`]. Build the services
//! once with [`builder::ServiceBuilder`] and share them across handlers.

pub mod builder;
pub mod ds;
pub mod error;
pub mod prelude;
pub mod service;
