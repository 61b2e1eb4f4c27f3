//! FIFO admission queue for booking requests.
//!
//! Requests are admitted in arrival order and drained one at a time by an
//! external consumer loop calling [`AdmissionQueue::dequeue_next`]. Nothing
//! inside the crate drains the queue on its own.
//!
//! ## Item Lifecycle
//!
//! ```text
//!   enqueue(p) ──► QueueItem { status: Pending, enqueued_at: now }
//!                                   │
//!                    dequeue_next() │ (exactly once, by the consumer)
//!                                   ▼
//!                  QueueItem { status: Processed, processed_at: Some(now) }
//! ```
//!
//! ## Example Usage
//!
//! ```
//! use tripkit::service::{AdmissionQueue, ItemStatus};
//!
//! let queue = AdmissionQueue::new();
//! let receipt = queue.enqueue("booking-1");
//! assert_eq!(receipt.queue_position, 1);
//! assert_eq!(receipt.status, ItemStatus::Pending);
//!
//! let item = queue.dequeue_next().unwrap();
//! assert_eq!(item.payload, "booking-1");
//! assert_eq!(item.status, ItemStatus::Processed);
//! assert!(queue.status().is_empty);
//! ```

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::debug;

use crate::ds::FifoQueue;

/// Message returned with every successful enqueue.
pub const ENQUEUED_MESSAGE: &str = "Booking request queued successfully";

/// Processing state of a queued item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Pending,
    Processed,
}

/// A queued request and its lifecycle timestamps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueueItem<T> {
    pub payload: T,
    pub enqueued_at: DateTime<Utc>,
    pub status: ItemStatus,
    pub processed_at: Option<DateTime<Utc>>,
}

impl<T> QueueItem<T> {
    fn pending(payload: T) -> Self {
        Self {
            payload,
            enqueued_at: Utc::now(),
            status: ItemStatus::Pending,
            processed_at: None,
        }
    }

    fn mark_processed(&mut self) {
        self.status = ItemStatus::Processed;
        self.processed_at = Some(Utc::now());
    }
}

/// Acknowledgement for an admitted request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnqueueReceipt {
    pub message: &'static str,
    /// Queue length right after the insert (1-based position of the new item).
    pub queue_position: usize,
    pub status: ItemStatus,
}

/// Snapshot of the queue state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QueueStatus {
    pub pending_count: usize,
    /// Items dequeued since the queue was created.
    pub processed_count: u64,
    pub is_empty: bool,
}

#[derive(Debug)]
struct AdmissionState<T> {
    queue: FifoQueue<QueueItem<T>>,
    processed_count: u64,
}

/// Thread-safe FIFO admission queue.
#[derive(Debug)]
pub struct AdmissionQueue<T> {
    state: Mutex<AdmissionState<T>>,
}

impl<T> AdmissionQueue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(AdmissionState {
                queue: FifoQueue::new(),
                processed_count: 0,
            }),
        }
    }

    /// Appends `payload` as a pending item.
    pub fn enqueue(&self, payload: T) -> EnqueueReceipt {
        let mut state = self.state.lock();
        state.queue.enqueue(QueueItem::pending(payload));
        let queue_position = state.queue.len();
        debug!(queue_position, "request admitted");
        EnqueueReceipt {
            message: ENQUEUED_MESSAGE,
            queue_position,
            status: ItemStatus::Pending,
        }
    }

    /// Removes the oldest pending item and stamps it processed.
    ///
    /// Returns `None` when the queue is empty.
    pub fn dequeue_next(&self) -> Option<QueueItem<T>> {
        let mut state = self.state.lock();
        let mut item = state.queue.dequeue().ok()?;
        item.mark_processed();
        state.processed_count += 1;
        debug!(
            pending = state.queue.len(),
            processed = state.processed_count,
            "request dequeued"
        );
        Some(item)
    }

    /// Returns a copy of the oldest pending item without removing it.
    pub fn peek_next(&self) -> Option<QueueItem<T>>
    where
        T: Clone,
    {
        self.state.lock().queue.peek().ok().cloned()
    }

    /// Pending count, processed count and emptiness.
    pub fn status(&self) -> QueueStatus {
        let state = self.state.lock();
        QueueStatus {
            pending_count: state.queue.len(),
            processed_count: state.processed_count,
            is_empty: state.queue.is_empty(),
        }
    }

    /// Number of pending items.
    pub fn len(&self) -> usize {
        self.state.lock().queue.len()
    }

    /// Returns `true` if no item is pending.
    pub fn is_empty(&self) -> bool {
        self.state.lock().queue.is_empty()
    }

    /// Drops every pending item. The processed count is kept.
    pub fn clear(&self) {
        self.state.lock().queue.clear();
    }
}

impl<T> Default for AdmissionQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_reports_position_after_insert() {
        let queue = AdmissionQueue::new();
        assert_eq!(queue.enqueue("A").queue_position, 1);
        assert_eq!(queue.enqueue("B").queue_position, 2);
        let receipt = queue.enqueue("C");
        assert_eq!(receipt.queue_position, 3);
        assert_eq!(receipt.message, "Booking request queued successfully");
        assert_eq!(receipt.status, ItemStatus::Pending);
    }

    #[test]
    fn dequeues_in_fifo_order_and_stamps_items() {
        let queue = AdmissionQueue::new();
        for payload in ["A", "B", "C"] {
            queue.enqueue(payload);
        }

        let mut pending = queue.status().pending_count;
        let mut drained = Vec::new();
        while let Some(item) = queue.dequeue_next() {
            assert_eq!(item.status, ItemStatus::Processed);
            let processed_at = item.processed_at.unwrap();
            assert!(processed_at >= item.enqueued_at);

            let status = queue.status();
            assert_eq!(status.pending_count, pending - 1);
            pending = status.pending_count;
            drained.push(item.payload);
        }
        assert_eq!(drained, vec!["A", "B", "C"]);
        assert_eq!(queue.status().processed_count, 3);
    }

    #[test]
    fn empty_queue_returns_none() {
        let queue: AdmissionQueue<u32> = AdmissionQueue::new();
        assert!(queue.dequeue_next().is_none());
        assert!(queue.peek_next().is_none());
        assert_eq!(
            queue.status(),
            QueueStatus {
                pending_count: 0,
                processed_count: 0,
                is_empty: true,
            }
        );
    }

    #[test]
    fn peek_returns_oldest_pending_without_removing() {
        let queue = AdmissionQueue::new();
        queue.enqueue(10);
        queue.enqueue(20);
        let head = queue.peek_next().unwrap();
        assert_eq!(head.payload, 10);
        assert_eq!(head.status, ItemStatus::Pending);
        assert_eq!(head.processed_at, None);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn clear_keeps_processed_count() {
        let queue = AdmissionQueue::new();
        queue.enqueue(1);
        queue.enqueue(2);
        queue.dequeue_next();
        queue.clear();
        let status = queue.status();
        assert!(status.is_empty);
        assert_eq!(status.processed_count, 1);
    }

    #[test]
    fn item_serializes_lowercase_status() {
        let queue = AdmissionQueue::new();
        queue.enqueue("trip");
        let json = serde_json::to_value(queue.peek_next().unwrap()).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["payload"], "trip");
        assert!(json["processed_at"].is_null());
    }
}
