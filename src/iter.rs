//! In-order traversal driven by the caller.
//!
//! A [`Cursor`] keeps the path of ancestors it still has to visit as an explicit stack: the top of
//! the stack is always the next entry in key order. Because a cursor borrows its tree, the tree
//! cannot be modified while the cursor is alive. Dropping the cursor frees its stack and nothing
//! else.
//!
//! # Examples
//!
//! ```
//! use keyed_bst::{Numeric, Tree};
//!
//! let mut tree = Tree::new(Numeric);
//! for key in ["52", "2", "33", "99"] {
//!     tree.insert(key, key.len()).unwrap();
//! }
//!
//! let mut cursor = tree.cursor();
//! let mut keys = Vec::new();
//! while !cursor.is_at_end() {
//!     keys.push(cursor.current_key().unwrap());
//!     cursor.advance();
//! }
//! assert_eq!(keys, ["2", "33", "52", "99"]);
//! assert!(cursor.current_key().is_err());
//! ```

use std::fmt;
use std::iter::FusedIterator;

use crate::error::{Error, Result};
use crate::tree::{Node, Tree};

/// An external in-order iterator over a [`Tree`].
pub struct Cursor<'a, V> {
    stack: Vec<&'a Node<V>>,
}

/// Manual implementation of `Clone` so `V` doesn't need to be `Clone`: only references are copied.
impl<V> Clone for Cursor<'_, V> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
        }
    }
}

impl<V> fmt::Debug for Cursor<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("current_key", &self.current_key().ok())
            .field("depth", &self.stack.len())
            .finish()
    }
}

impl<'a, V> Cursor<'a, V> {
    /// Creates a cursor positioned at the smallest key of `tree`. For an empty tree the cursor
    /// starts out at the end.
    pub fn new<C, D>(tree: &'a Tree<V, C, D>) -> Self
    where
        D: FnMut(V),
    {
        let mut cursor = Self { stack: Vec::new() };
        cursor.push_left_spine(tree.root());
        cursor
    }

    /// Whether every entry has been visited.
    pub fn is_at_end(&self) -> bool {
        self.stack.is_empty()
    }

    /// The key of the entry the cursor is on.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] if the cursor [is at the end][Self::is_at_end].
    pub fn current_key(&self) -> Result<&'a str> {
        self.current().map(|node| node.key.as_str())
    }

    /// The value of the entry the cursor is on.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] if the cursor [is at the end][Self::is_at_end].
    pub fn current_value(&self) -> Result<&'a V> {
        self.current().map(|node| &node.value)
    }

    /// Moves to the next entry in key order. Returns `false` once there is no entry left to move
    /// to, including when the cursor was already at the end.
    pub fn advance(&mut self) -> bool {
        let Some(node) = self.stack.pop() else {
            return false;
        };
        self.push_left_spine(node.right.as_deref());
        !self.stack.is_empty()
    }

    fn current(&self) -> Result<&'a Node<V>> {
        self.stack
            .last()
            .copied()
            .ok_or(Error::InvalidState("cursor is past the last entry"))
    }

    /// Pushes `link` and all of its left descendants, leaving the smallest of them on top.
    fn push_left_spine(&mut self, mut link: Option<&'a Node<V>>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = node.left.as_deref();
        }
    }
}

/// An iterator over the `(key, value)` pairs of a [`Tree`] in ascending key order, created by
/// [`Tree::iter`].
pub struct Iter<'a, V> {
    cursor: Cursor<'a, V>,
    remaining: usize,
}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Self {
            cursor: self.cursor.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new<C, D>(tree: &'a Tree<V, C, D>) -> Self
    where
        D: FnMut(V),
    {
        Self {
            cursor: Cursor::new(tree),
            remaining: tree.len(),
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.cursor.current().ok()?;
        self.cursor.advance();
        self.remaining -= 1;
        Some((node.key.as_str(), &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}
