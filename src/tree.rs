//! An unbalanced BST keyed by strings. Each node exclusively owns its two children, so the whole
//! tree is freed by freeing the root.
//!
//! # Examples
//!
//! ```
//! use keyed_bst::{natural, Tree};
//!
//! let mut tree = Tree::new(natural());
//!
//! // Nothing in here yet.
//! assert_eq!(tree.search("a"), None);
//!
//! tree.insert("a", 1).unwrap();
//! assert_eq!(tree.search("a"), Some(&1));
//!
//! // Inserting a new value for the same key overwrites the value.
//! tree.insert("a", 2).unwrap();
//! assert_eq!(tree.search("a"), Some(&2));
//! assert_eq!(tree.len(), 1);
//!
//! // Deleting a node returns its value.
//! assert_eq!(tree.delete("a"), Some(2));
//! assert_eq!(tree.search("a"), None);
//! assert!(tree.is_empty());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use compare::{Compare, Natural};

use crate::error::{Error, Result};
use crate::iter::{Cursor, Iter};
use crate::util::DeleteResult;

type Link<V> = Option<Box<Node<V>>>;

/// A Binary Search Tree mapping string keys to values of type `V`, ordered by the comparator
/// `C`. This can be used for inserting, finding, and deleting keys and values, and for visiting
/// them in key order.
///
/// The tree copies every key it is given, so callers can reuse their key buffers immediately.
/// Values are moved in and never cloned.
///
/// `D` is the destructor receiving the values the tree lets go of on its own: values replaced by
/// [`insert`][Self::insert] and values still resident when the tree is torn down. It may borrow
/// from its environment, in which case the tree cannot outlive what it borrows.
pub struct Tree<V, C = Natural<str>, D = fn(V)>
where
    D: FnMut(V),
{
    root: Link<V>,
    len: usize,
    cmp: C,
    destructor: Option<D>,
}

impl<V> Default for Tree<V> {
    fn default() -> Self {
        Self::new(compare::natural())
    }
}

impl<V, C, D> Drop for Tree<V, C, D>
where
    D: FnMut(V),
{
    fn drop(&mut self) {
        self.tear_down();
    }
}

impl<V, C, D> fmt::Debug for Tree<V, C, D>
where
    V: fmt::Debug,
    D: FnMut(V),
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V, C> Tree<V, C>
where
    C: Compare<str>,
{
    /// Generates a new, empty `Tree` ordered by `cmp`. Values the tree releases on its own are
    /// simply dropped.
    pub fn new(cmp: C) -> Self {
        Self {
            root: None,
            len: 0,
            cmp,
            destructor: None,
        }
    }
}

impl<V, C, D> Tree<V, C, D>
where
    C: Compare<str>,
    D: FnMut(V),
{
    /// Generates a new, empty `Tree` ordered by `cmp` that hands every value it releases on its
    /// own to `destructor`: the old value when [`insert`][Self::insert] overwrites a key, and
    /// every resident value when the tree is destroyed. Values returned by
    /// [`delete`][Self::delete] belong to the caller and never reach `destructor`.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_bst::{natural, Tree};
    ///
    /// let mut released = Vec::new();
    /// let mut tree = Tree::with_destructor(natural(), |v| released.push(v));
    ///
    /// tree.insert("k", "old").unwrap();
    /// tree.insert("k", "new").unwrap();
    /// tree.destroy();
    ///
    /// assert_eq!(released, ["old", "new"]);
    /// ```
    pub fn with_destructor(cmp: C, destructor: D) -> Self {
        Self {
            root: None,
            len: 0,
            cmp,
            destructor: Some(destructor),
        }
    }

    /// Inserts `value` under a private copy of `key`. Inserting a new value for an existing key
    /// overwrites its value and keeps the stored key.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfMemory`] if the key copy cannot be allocated. The tree is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_bst::{Numeric, Tree};
    ///
    /// let mut tree = Tree::new(Numeric);
    ///
    /// tree.insert("1", 2).unwrap();
    /// assert_eq!(tree.search("1"), Some(&2));
    ///
    /// // "01" and "1" are the same key numerically.
    /// tree.insert("01", 3).unwrap();
    /// assert_eq!(tree.search("1"), Some(&3));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: &str, value: V) -> Result<()> {
        let mut link = &mut self.root;
        while let Some(node) = link {
            match self.cmp.compare(key, node.key.as_str()) {
                Ordering::Less => link = &mut node.left,
                Ordering::Greater => link = &mut node.right,
                Ordering::Equal => {
                    log::debug!("Tree::insert replacing value of {:?}", node.key);
                    let old_value = mem::replace(&mut node.value, value);
                    release(&mut self.destructor, old_value);
                    return Ok(());
                }
            }
        }

        *link = Some(Node::new_boxed(copy_key(key)?, value));
        self.len += 1;
        if self.len == 1 {
            log::debug!("Tree::insert created root {:?}", key);
        } else {
            log::trace!("Tree::insert attached {:?}, size now {}", key, self.len);
        }
        Ok(())
    }

    /// Potentially finds the value associated with the given key in this tree. If no node has the
    /// corresponding key, `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_bst::{natural, Tree};
    ///
    /// let mut tree = Tree::new(natural());
    /// tree.insert("k", None).unwrap();
    ///
    /// // A stored "empty" value is still distinguishable from a missing key.
    /// assert_eq!(tree.search("k"), Some(&None::<u8>));
    /// assert_eq!(tree.search("missing"), None);
    /// ```
    pub fn search(&self, key: &str) -> Option<&V> {
        self.find_node(key).map(|node| &node.value)
    }

    /// Like [`search`][Self::search] but allows the value to be modified in place.
    pub fn search_mut(&mut self, key: &str) -> Option<&mut V> {
        let mut link = self.root.as_deref_mut();
        while let Some(node) = link {
            match self.cmp.compare(key, node.key.as_str()) {
                Ordering::Less => link = node.left.as_deref_mut(),
                Ordering::Greater => link = node.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.value),
            }
        }
        None
    }

    /// Whether a node with the given key exists in the tree.
    pub fn contains(&self, key: &str) -> bool {
        self.find_node(key).is_some()
    }

    /// Deletes the node containing the given key from the tree and returns its value. If the tree
    /// does not contain a node with the key, nothing happens and `None` is returned.
    ///
    /// The returned value now belongs to the caller: it is not passed to the tree's destructor.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_bst::{natural, Tree};
    ///
    /// let mut tree = Tree::new(natural());
    /// tree.insert("b", 2).unwrap();
    /// tree.insert("a", 1).unwrap();
    /// tree.insert("c", 3).unwrap();
    ///
    /// // "b" has two children.
    /// assert_eq!(tree.delete("b"), Some(2));
    /// assert_eq!(tree.delete("b"), None);
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn delete(&mut self, key: &str) -> Option<V> {
        let value = Node::delete(&mut self.root, key, &self.cmp).into_value()?;
        self.len -= 1;
        Some(value)
    }

    fn find_node(&self, key: &str) -> Option<&Node<V>> {
        let mut link = self.root.as_deref();
        while let Some(node) = link {
            match self.cmp.compare(key, node.key.as_str()) {
                Ordering::Less => link = node.left.as_deref(),
                Ordering::Greater => link = node.right.as_deref(),
                Ordering::Equal => return Some(node),
            }
        }
        None
    }
}

impl<V, C, D> Tree<V, C, D>
where
    D: FnMut(V),
{
    /// The number of entries in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree has no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Destroys the tree, passing every value still stored in it to the destructor (if one was
    /// configured) and freeing every node. Dropping the tree does the same thing.
    pub fn destroy(self) {
        drop(self);
    }

    /// Visits every entry in ascending key order, stopping as soon as `visit` returns `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_bst::{Numeric, Tree};
    ///
    /// let mut tree = Tree::new(Numeric);
    /// for key in ["5", "-3", "12", "0"] {
    ///     tree.insert(key, ()).unwrap();
    /// }
    ///
    /// let mut seen = Vec::new();
    /// tree.in_order(|key, _| {
    ///     seen.push(key.to_string());
    ///     key != "0"
    /// });
    /// assert_eq!(seen, ["-3", "0"]);
    /// ```
    pub fn in_order<F>(&self, mut visit: F)
    where
        F: FnMut(&str, &V) -> bool,
    {
        if let Some(root) = self.root() {
            root.in_order(&mut visit);
        }
    }

    /// An external iterator positioned at the smallest key.
    pub fn cursor(&self) -> Cursor<'_, V> {
        Cursor::new(self)
    }

    /// Iterates over `(key, value)` pairs in ascending key order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self)
    }

    pub(crate) fn root(&self) -> Option<&Node<V>> {
        self.root.as_deref()
    }

    /// Frees every node in post-order with an explicit stack, so skewed trees can't overflow the
    /// call stack.
    fn tear_down(&mut self) {
        let Some(root) = self.root.take() else {
            return;
        };
        log::debug!("Tree::tear_down releasing {} nodes", self.len);
        self.len = 0;

        let mut pending = Pending(vec![root]);
        while let Some(mut node) = pending.0.pop() {
            if node.left.is_some() || node.right.is_some() {
                let left = node.left.take();
                let right = node.right.take();
                pending.0.push(node);
                pending.0.extend(right);
                pending.0.extend(left);
            } else {
                let Node { value, .. } = *node;
                release(&mut self.destructor, value);
            }
        }
    }
}

/// Nodes waiting to be freed by [`Tree::tear_down`]. If a destructor panics, dropping this during
/// the unwind frees the rest of the tree one node at a time, without the destructor and without
/// recursing.
struct Pending<V>(Vec<Box<Node<V>>>);

impl<V> Drop for Pending<V> {
    fn drop(&mut self) {
        while let Some(mut node) = self.0.pop() {
            self.0.extend(node.left.take());
            self.0.extend(node.right.take());
        }
    }
}

impl<'a, V, C, D> IntoIterator for &'a Tree<V, C, D>
where
    D: FnMut(V),
{
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Hands `value` to the destructor, or drops it if there is none.
fn release<V, D>(destructor: &mut Option<D>, value: V)
where
    D: FnMut(V),
{
    match destructor {
        Some(destructor) => destructor(value),
        None => drop(value),
    }
}

/// Copies `key` into storage owned by the tree, reporting allocation failure instead of aborting.
fn copy_key(key: &str) -> Result<String> {
    let mut owned = String::new();
    owned
        .try_reserve_exact(key.len())
        .map_err(|e| Error::out_of_memory(key.len(), e))?;
    owned.push_str(key);
    Ok(owned)
}

pub(crate) struct Node<V> {
    pub(crate) key: String,
    pub(crate) value: V,
    pub(crate) left: Link<V>,
    pub(crate) right: Link<V>,
}

impl<V> Node<V> {
    fn new_boxed(key: String, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            left: None,
            right: None,
        })
    }

    /// Returns `false` if `visit` asked to stop.
    fn in_order<F>(&self, visit: &mut F) -> bool
    where
        F: FnMut(&str, &V) -> bool,
    {
        if let Some(left) = self.left.as_deref() {
            if !left.in_order(visit) {
                return false;
            }
        }
        if !visit(&self.key, &self.value) {
            return false;
        }
        match self.right.as_deref() {
            Some(right) => right.in_order(visit),
            None => true,
        }
    }

    /// Deletes the node with the given `key` from the subtree hanging off `link`. `link` is the
    /// parent's slot for the subtree (or the tree's root), so the node can be spliced out of it.
    fn delete<C>(link: &mut Link<V>, key: &str, cmp: &C) -> DeleteResult<V>
    where
        C: Compare<str>,
    {
        let Some(node) = link else {
            log::debug!("Could not find key {:?} to delete.", key);
            return DeleteResult::NotFound;
        };
        match cmp.compare(key, node.key.as_str()) {
            Ordering::Less => Self::delete(&mut node.left, key, cmp),
            Ordering::Greater => Self::delete(&mut node.right, key, cmp),
            Ordering::Equal => Self::unlink(link),
        }
    }

    /// Removes the node in `link` from the tree, replacing it with whatever should take its place,
    /// and returns its value.
    fn unlink(link: &mut Link<V>) -> DeleteResult<V> {
        let Some(mut node) = link.take() else {
            return DeleteResult::NotFound;
        };
        match (node.left.take(), node.right.take()) {
            (None, None) => {
                log::debug!("Deleting leaf {:?}", node.key);
                let Node { value, .. } = *node;
                DeleteResult::Deleted(value)
            }
            (Some(child), None) | (None, Some(child)) => {
                log::debug!("Deleting {:?}, splicing up {:?}", node.key, child.key);
                *link = Some(child);
                let Node { value, .. } = *node;
                DeleteResult::Deleted(value)
            }
            // If we have two children we have to figure out which node to promote. We choose here
            // this node's predecessor. That is, the largest node in this node's left subtree. It
            // has no right child so taking it out is one of the cases above.
            (Some(left), Some(right)) => {
                let (new_left, pred_key, pred_value) = Self::take_largest(left);
                log::debug!("Deleting {:?}, promoting predecessor {:?}", node.key, pred_key);

                node.key = pred_key;
                node.left = new_left;
                node.right = Some(right);
                let value = mem::replace(&mut node.value, pred_value);
                *link = Some(node);
                DeleteResult::Deleted(value)
            }
        }
    }

    /// Removes the largest node of the subtree rooted at `node` by recursing to the right until
    /// there is no right child. Returns what is left of the subtree along with the removed key and
    /// value.
    fn take_largest(mut node: Box<Self>) -> (Link<V>, String, V) {
        match node.right.take() {
            None => {
                let Node {
                    key, value, left, ..
                } = *node;
                (left, key, value)
            }
            Some(right) => {
                let (new_right, key, value) = Self::take_largest(right);
                node.right = new_right;
                (Some(node), key, value)
            }
        }
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::numeric::Numeric;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and a `BTreeMap`.
    /// This way we can ensure that after a random smattering of inserts
    /// and deletes we have the same set of keys in the map.
    fn do_ops<V>(ops: &[Op<i8, V>], bst: &mut Tree<V, Numeric>, map: &mut BTreeMap<i8, V>)
    where
        V: std::fmt::Debug + PartialEq + Clone,
    {
        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    bst.insert(&k.to_string(), v.clone()).unwrap();
                    map.insert(*k, v.clone());
                }
                Op::Delete(k) => {
                    assert_eq!(bst.delete(&k.to_string()), map.remove(k));
                }
                Op::Iter => {
                    let keys: Vec<_> = bst.iter().map(|(k, _)| k.to_string()).collect();
                    let expected: Vec<_> = map.keys().map(i8::to_string).collect();
                    assert_eq!(keys, expected);
                }
            }
            assert_eq!(bst.len(), map.len());
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
            let mut tree = Tree::new(Numeric);
            let mut map = BTreeMap::new();

            do_ops(&ops, &mut tree, &mut map);
            map.iter().all(|(key, value)| tree.search(&key.to_string()) == Some(value))
        }
    }

    quickcheck::quickcheck! {
        fn contains(xs: Vec<i8>) -> bool {
            let mut tree = Tree::new(Numeric);
            for x in &xs {
                tree.insert(&x.to_string(), *x).unwrap();
            }

            xs.iter().all(|x| tree.search(&x.to_string()) == Some(x))
        }
    }

    quickcheck::quickcheck! {
        fn always_a_valid_bst(xs: Vec<i16>, deletes: Vec<i16>) -> bool {
            let mut tree = Tree::new(Numeric);
            for x in &xs {
                tree.insert(&x.to_string(), ()).unwrap();
            }
            for x in &deletes {
                tree.delete(&x.to_string());
            }

            let mut previous: Option<i64> = None;
            let mut ascending = true;
            let mut count = 0;
            tree.in_order(|key, _| {
                let key = Numeric::parse(key);
                ascending &= previous.map_or(true, |p| p < key);
                previous = Some(key);
                count += 1;
                true
            });
            ascending && count == tree.len()
        }
    }
}
