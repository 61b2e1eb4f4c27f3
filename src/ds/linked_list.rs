//! Singly linked list with positional access.
//!
//! Backs [`RecentList`](crate::ds::RecentList). Nodes are boxed and linked
//! head to tail; the length is cached.
//!
//! ## Architecture
//!
//! ```text
//!   head ─► [A] ─► [B] ─► [C] ─► None
//!            0      1      2
//!
//!   insert_at(1, X):  head ─► [A] ─► [X] ─► [B] ─► [C]
//!   remove_first(|v| v == B):  head ─► [A] ─► [X] ─► [C]
//! ```
//!
//! ## Errors
//!
//! - `insert_at` with `position > len` → `InvalidArgument`
//! - `get` with `position >= len` → `NotFound`
//! - `pop_front` / `pop_back` on an empty list → `NotFound`
//!
//! ## Performance
//!
//! - `push_front` / `pop_front`: O(1)
//! - `push_back` / `pop_back` / `insert_at` / `get` / `remove_first`: O(n)
//!
//! ## Example Usage
//!
//! ```
//! use tripkit::ds::LinkedList;
//!
//! let mut list = LinkedList::new();
//! list.push_back(1);
//! list.push_back(3);
//! list.insert_at(1, 2).unwrap();
//! assert_eq!(list.to_vec(), vec![1, 2, 3]);
//!
//! assert_eq!(list.remove_first(|v| *v == 2), Some(2));
//! assert!(list.insert_at(9, 0).is_err());
//! ```

use std::fmt;

use crate::error::{Error, Result};

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    value: T,
    next: Link<T>,
}

/// Singly linked list.
pub struct LinkedList<T> {
    head: Link<T>,
    len: usize,
}

impl<T> LinkedList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Returns the number of values.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list holds no values.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the link slot at `index` (the tail slot when `index == len`).
    fn link_at(&mut self, index: usize) -> &mut Link<T> {
        let mut link = &mut self.head;
        for _ in 0..index {
            match link {
                Some(node) => link = &mut node.next,
                None => break,
            }
        }
        link
    }

    /// Inserts `value` at the head.
    pub fn push_front(&mut self, value: T) {
        let next = self.head.take();
        self.head = Some(Box::new(Node { value, next }));
        self.len += 1;
    }

    /// Appends `value` at the tail.
    pub fn push_back(&mut self, value: T) {
        let tail = self.link_at(self.len);
        *tail = Some(Box::new(Node { value, next: None }));
        self.len += 1;
    }

    /// Inserts `value` so that it ends up at `position` (0-indexed).
    pub fn insert_at(&mut self, position: usize, value: T) -> Result<()> {
        if position > self.len {
            return Err(Error::invalid_argument(format!(
                "insert position {position} exceeds length {}",
                self.len
            )));
        }
        let link = self.link_at(position);
        let next = link.take();
        *link = Some(Box::new(Node { value, next }));
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the head value.
    pub fn pop_front(&mut self) -> Result<T> {
        let node = self
            .head
            .take()
            .ok_or_else(|| Error::not_found("pop from an empty list"))?;
        let node = *node;
        self.head = node.next;
        self.len -= 1;
        Ok(node.value)
    }

    /// Removes and returns the tail value.
    pub fn pop_back(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(Error::not_found("pop from an empty list"));
        }
        let last = self.len - 1;
        let node = self
            .link_at(last)
            .take()
            .ok_or_else(|| Error::not_found("pop from an empty list"))?;
        self.len -= 1;
        Ok(node.value)
    }

    /// Returns the value at `position`.
    pub fn get(&self, position: usize) -> Result<&T> {
        self.iter().nth(position).ok_or_else(|| {
            Error::not_found(format!(
                "position {position} out of bounds for length {}",
                self.len
            ))
        })
    }

    /// Index of the first value matching `pred`.
    pub fn position<F>(&self, pred: F) -> Option<usize>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().position(pred)
    }

    /// Unlinks and returns the first value matching `pred`.
    pub fn remove_first<F>(&mut self, pred: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        let index = self.position(pred)?;
        let link = self.link_at(index);
        let node = *link.take()?;
        *link = node.next;
        self.len -= 1;
        Some(node.value)
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
        self.len = 0;
    }

    /// Iterates head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    /// Copies the values head to tail.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for LinkedList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        let mut tail = &mut list.head;
        for value in iter {
            let node = tail.insert(Box::new(Node { value, next: None }));
            tail = &mut node.next;
            list.len += 1;
        }
        list
    }
}

/// Borrowed iterator, head to tail.
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        Some(&node.value)
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
