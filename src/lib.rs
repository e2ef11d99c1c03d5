//! This crate exposes a Binary Search Tree (BST) mapping string keys to values,
//! ordered by a comparator chosen by the caller rather than by the keys' natural order.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Here "less" and "greater" are whatever the tree's [`Compare`] strategy says they are. The
//! tree does not rebalance itself, so searching takes `O(height)` and inserting keys in sorted
//! order produces a tree as tall as it is large.
//!
//! # Examples
//!
//! ```
//! use keyed_bst::{Numeric, Tree};
//!
//! let mut tree = Tree::new(Numeric);
//! tree.insert("10", "ten").unwrap();
//! tree.insert("9", "nine").unwrap();
//! tree.insert("100", "hundred").unwrap();
//!
//! // Keys are ordered as integers, not as text.
//! let keys: Vec<_> = tree.iter().map(|(k, _)| k).collect();
//! assert_eq!(keys, ["9", "10", "100"]);
//!
//! assert_eq!(tree.delete("10"), Some("ten"));
//! assert!(!tree.contains("10"));
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod iter;
pub mod numeric;
pub mod tree;

mod util;

#[cfg(test)]
mod test {
    pub(crate) mod quick;
}

pub use compare::{natural, Compare, Natural};
pub use error::{Error, Result};
pub use iter::{Cursor, Iter};
pub use numeric::Numeric;
pub use tree::Tree;
