//! Vec-backed LIFO stack.
//!
//! Used for per-user navigation breadcrumbs. `pop` and `peek` on an empty
//! stack are [`Error::NotFound`](crate::error::Error::NotFound).
//!
//! ## Example Usage
//!
//! ```
//! use tripkit::ds::Stack;
//!
//! let mut stack = Stack::new();
//! stack.push("home");
//! stack.push("cities");
//! assert_eq!(stack.pop(), Ok("cities"));
//! assert_eq!(stack.peek(), Ok(&"home"));
//! ```

use crate::error::{Error, Result};

/// Last-in, first-out sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Pushes `item` on top.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Removes and returns the top item.
    pub fn pop(&mut self) -> Result<T> {
        self.items
            .pop()
            .ok_or_else(|| Error::not_found("pop from an empty stack"))
    }

    /// Returns the top item without removing it.
    pub fn peek(&self) -> Result<&T> {
        self.items
            .last()
            .ok_or_else(|| Error::not_found("peek at an empty stack"))
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the stack holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterates from top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter().rev()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_pop_is_lifo() {
        let mut stack = Stack::new();
        for page in ["Home", "Cities", "Mumbai", "Book"] {
            stack.push(page);
        }
        assert_eq!(stack.len(), 4);
        assert_eq!(stack.pop(), Ok("Book"));
        assert_eq!(stack.pop(), Ok("Mumbai"));
        assert_eq!(stack.peek(), Ok(&"Cities"));
        assert_eq!(stack.iter().copied().collect::<Vec<_>>(), vec!["Cities", "Home"]);
    }

    #[test]
    fn empty_stack_is_not_found() {
        let mut stack: Stack<u8> = Stack::new();
        assert!(stack.pop().unwrap_err().is_not_found());
        assert!(stack.peek().unwrap_err().is_not_found());
    }

    #[test]
    fn clear_empties() {
        let mut stack = Stack::new();
        stack.push(1);
        stack.push(2);
        stack.clear();
        assert!(stack.is_empty());
    }
}
