//! FIFO queue backed by a ring buffer.
//!
//! Dequeue is O(1). Ordering is strict insertion order: no priority, no
//! reordering, no deduplication.
//!
//! ## Example Usage
//!
//! ```
//! use tripkit::ds::FifoQueue;
//!
//! let mut queue = FifoQueue::new();
//! queue.enqueue('a');
//! queue.enqueue('b');
//! assert_eq!(queue.peek(), Ok(&'a'));
//! assert_eq!(queue.dequeue(), Ok('a'));
//! assert_eq!(queue.len(), 1);
//! ```

use std::collections::VecDeque;

use crate::error::{Error, Result};

/// First-in, first-out sequence.
#[derive(Debug, Clone)]
pub struct FifoQueue<T> {
    items: VecDeque<T>,
}

impl<T> FifoQueue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Appends `item` at the back.
    pub fn enqueue(&mut self, item: T) {
        self.items.push_back(item);
    }

    /// Removes and returns the oldest item.
    pub fn dequeue(&mut self) -> Result<T> {
        self.items
            .pop_front()
            .ok_or_else(|| Error::not_found("dequeue from an empty queue"))
    }

    /// Returns the oldest item without removing it.
    pub fn peek(&self) -> Result<&T> {
        self.items
            .front()
            .ok_or_else(|| Error::not_found("peek at an empty queue"))
    }

    /// Returns the number of queued items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the queue holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterates from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T> Default for FifoQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dequeues_in_enqueue_order() {
        let mut queue = FifoQueue::new();
        for item in ["A", "B", "C"] {
            queue.enqueue(item);
        }
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec!["A", "B", "C"]);
        assert_eq!(queue.dequeue(), Ok("A"));
        assert_eq!(queue.dequeue(), Ok("B"));
        queue.enqueue("D");
        assert_eq!(queue.dequeue(), Ok("C"));
        assert_eq!(queue.dequeue(), Ok("D"));
        assert!(queue.is_empty());
    }

    #[test]
    fn empty_queue_is_not_found() {
        let mut queue: FifoQueue<u8> = FifoQueue::new();
        assert!(queue.dequeue().unwrap_err().is_not_found());
        assert!(queue.peek().unwrap_err().is_not_found());
    }

    #[test]
    fn peek_does_not_remove() {
        let mut queue = FifoQueue::new();
        queue.enqueue(1);
        assert_eq!(queue.peek(), Ok(&1));
        assert_eq!(queue.len(), 1);
        queue.clear();
        assert!(queue.is_empty());
    }
}
