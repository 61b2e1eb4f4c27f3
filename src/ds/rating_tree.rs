//! Unbalanced binary search tree over distinct ordered values.
//!
//! Stores each value at most once: inserting an equal value is a no-op.
//! Deleting a node with two children copies the in-order successor (minimum
//! of the right subtree) into it and splices the successor out of its
//! original position.
//!
//! ## Architecture
//!
//! ```text
//!   insert 85, 92, 78, 95, 88, 70, 90
//!
//!                 85
//!               /    \
//!             78      92
//!            /       /  \
//!          70      88    95
//!                    \
//!                     90
//!
//!   inorder  = [70, 78, 85, 88, 90, 92, 95]
//!   height   = 4 (nodes on the longest root-to-leaf path)
//!
//!   remove(85): successor = min(right subtree) = 88
//!                 88
//!               /    \
//!             78      92
//!            /       /  \
//!          70      90    95
//! ```
//!
//! ## Performance
//!
//! - `insert` / `contains` / `remove`: O(depth); O(n) under sorted insertion
//!   since the tree is never rebalanced
//! - `inorder` / `height`: O(n), iterative so degenerate trees cannot
//!   overflow the call stack
//!
//! ## Example Usage
//!
//! ```
//! use tripkit::ds::RatingTree;
//!
//! let mut tree = RatingTree::new();
//! for v in [5, 3, 8, 3] {
//!     tree.insert(v);
//! }
//! assert_eq!(tree.len(), 3);
//! assert_eq!(tree.inorder(), vec![3, 5, 8]);
//! assert_eq!(tree.max(), Some(&8));
//! ```

use std::cmp::Ordering;

use crate::error::InvariantError;

type Link<T> = Option<Box<Node<T>>>;

#[derive(Debug)]
struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn leaf(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            left: None,
            right: None,
        })
    }
}

/// Binary search tree holding distinct values, with no rebalancing.
#[derive(Debug)]
pub struct RatingTree<T> {
    root: Link<T>,
    len: usize,
}

impl<T> RatingTree<T> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Number of distinct values stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every node.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Leftmost value.
    pub fn min(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.value)
    }

    /// Rightmost value.
    pub fn max(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.value)
    }

    /// Number of nodes on the longest root-to-leaf path (0 when empty).
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut pending: Vec<(&Node<T>, usize)> =
            self.root.as_deref().map(|root| (root, 1)).into_iter().collect();
        while let Some((node, depth)) = pending.pop() {
            height = height.max(depth);
            pending.extend(node.left.as_deref().map(|child| (child, depth + 1)));
            pending.extend(node.right.as_deref().map(|child| (child, depth + 1)));
        }
        height
    }
}

impl<T: Ord> RatingTree<T> {
    /// Inserts `value`; returns `false` if an equal value is already present.
    pub fn insert(&mut self, value: T) -> bool {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = match value.cmp(&node.value) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => return false,
            };
        }
        *link = Some(Node::leaf(value));
        self.len += 1;
        true
    }

    /// Returns `true` if `value` is stored.
    pub fn contains(&self, value: &T) -> bool {
        let mut link = &self.root;
        while let Some(node) = link {
            link = match value.cmp(&node.value) {
                Ordering::Less => &node.left,
                Ordering::Greater => &node.right,
                Ordering::Equal => return true,
            };
        }
        false
    }

    /// Removes `value`; returns `false` if it was not present.
    pub fn remove(&mut self, value: &T) -> bool {
        let removed = Self::remove_from(&mut self.root, value);
        if removed {
            self.len -= 1;
        }
        removed
    }

    fn remove_from(link: &mut Link<T>, value: &T) -> bool {
        let Some(node) = link else {
            return false;
        };
        match value.cmp(&node.value) {
            Ordering::Less => return Self::remove_from(&mut node.left, value),
            Ordering::Greater => return Self::remove_from(&mut node.right, value),
            Ordering::Equal => {},
        }

        if node.left.is_some() && node.right.is_some() {
            if let Some(successor) = Self::take_min(&mut node.right) {
                node.value = successor;
            }
            return true;
        }

        let child = node.left.take().or_else(|| node.right.take());
        *link = child;
        true
    }

    /// Detaches the minimum node of the subtree at `link`, re-linking its
    /// right child in its place.
    fn take_min(mut link: &mut Link<T>) -> Option<T> {
        while link.as_ref()?.left.is_some() {
            link = &mut link.as_mut()?.left;
        }
        let node = *link.take()?;
        *link = node.right;
        Some(node.value)
    }

    /// Checks ordering and the cached length.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        fn walk<T: Ord>(
            link: &Link<T>,
            lower: Option<&T>,
            upper: Option<&T>,
            count: &mut usize,
        ) -> Result<(), InvariantError> {
            let Some(node) = link else {
                return Ok(());
            };
            if lower.is_some_and(|lo| node.value <= *lo) || upper.is_some_and(|hi| node.value >= *hi)
            {
                return Err(InvariantError::new("node violates search-tree ordering"));
            }
            *count += 1;
            walk(&node.left, lower, Some(&node.value), count)?;
            walk(&node.right, Some(&node.value), upper, count)
        }

        let mut count = 0;
        walk(&self.root, None, None, &mut count)?;
        if count != self.len {
            return Err(InvariantError::new(format!(
                "len is {} but tree holds {count} nodes",
                self.len
            )));
        }
        Ok(())
    }
}

impl<T: Clone> RatingTree<T> {
    /// Values in ascending order.
    pub fn inorder(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len);
        let mut spine: Vec<&Node<T>> = Vec::new();
        let mut cursor = self.root.as_deref();
        loop {
            while let Some(node) = cursor {
                spine.push(node);
                cursor = node.left.as_deref();
            }
            let Some(node) = spine.pop() else {
                break;
            };
            out.push(node.value.clone());
            cursor = node.right.as_deref();
        }
        out
    }

    /// Values in node-left-right order.
    pub fn preorder(&self) -> Vec<T> {
        fn walk<T: Clone>(link: &Link<T>, out: &mut Vec<T>) {
            if let Some(node) = link {
                out.push(node.value.clone());
                walk(&node.left, out);
                walk(&node.right, out);
            }
        }
        let mut out = Vec::with_capacity(self.len);
        walk(&self.root, &mut out);
        out
    }

    /// Values in left-right-node order.
    pub fn postorder(&self) -> Vec<T> {
        fn walk<T: Clone>(link: &Link<T>, out: &mut Vec<T>) {
            if let Some(node) = link {
                walk(&node.left, out);
                walk(&node.right, out);
                out.push(node.value.clone());
            }
        }
        let mut out = Vec::with_capacity(self.len);
        walk(&self.root, &mut out);
        out
    }
}

impl<T> Default for RatingTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RatingTree<T> {
    // Iterative teardown; a degenerate tree is a linked list and recursive
    // drop would overflow the stack.
    fn drop(&mut self) {
        let mut pending: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}
