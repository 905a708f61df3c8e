mod node;
mod preorder;

pub use node::Node;
pub use preorder::*;

use std::fmt;
use std::mem;
use std::cmp::Ordering;
use std::iter::FromIterator;

use compare::{Compare, Natural};
use tracing::{debug, trace};

use crate::error::{Argument, Error, Result};
use crate::slab::{Ptr, Slab};

use node::{InnerNode, Side};

/// An ordered map backed by an unbalanced binary search tree (BST)
///
/// BST properties: For each node with key `k`, under the map's comparator `C`:
/// - The key of each node in the left subtree is less than `k`
/// - The key of each node in the right subtree is greater than `k`
///
/// Duplicate keys are not allowed. Inserting a key that already exists replaces its value in
/// place.
///
/// The shape of the tree depends only on insertion order. Inserting keys in sorted order produces
/// a tree with linear depth.
///
/// Every node keeps a link to its parent. Nodes are stored in a slab and linked by index, so the
/// parent link never owns anything.
///
/// Removal deliberately keeps a simplified splice:
/// - Removing the root clears the whole map and returns `None`
/// - Removing a node with a left child promotes that left child and *replaces* the promoted node's
///   right subtree with the removed node's right subtree. Entries that hung off the promoted node's
///   right side are dropped and `len()` still only decreases by one.
pub struct TreeMap<K, V, C = Natural<K>> {
    nodes: Slab<InnerNode<K, V>>,
    root: Ptr,
    len: usize,
    cmp: C,
}

impl<K, V, C: Clone> Clone for TreeMap<K, V, C>
    where K: Clone,
          V: Clone,
{
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            root: self.root,
            len: self.len,
            cmp: self.cmp.clone(),
        }
    }
}

impl<K: Ord, V> Default for TreeMap<K, V> {
    fn default() -> Self {
        Self::with_cmp(compare::natural())
    }
}

impl<K, V, C> fmt::Debug for TreeMap<K, V, C>
    where K: fmt::Debug,
          V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter_preorder()).finish()
    }
}

/// Renders the entries as `{k1=v1, k2=v2}` in **pre-order tree order**
///
/// This only matches sorted order for some insertion sequences. Use `entry_set()` for sorted
/// output.
impl<K, V, C> fmt::Display for TreeMap<K, V, C>
    where K: fmt::Display,
          V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.iter_preorder().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        f.write_str("}")
    }
}

impl<K: Ord, V> TreeMap<K, V> {
    /// Creates an empty `TreeMap` ordered by the natural ordering of its keys
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_map::TreeMap;
    /// let mut map: TreeMap<&str, i32> = TreeMap::new();
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty naturally ordered map with room for at least `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_cmp(capacity, compare::natural())
    }

    /// Creates a naturally ordered map holding a copy of every entry of `source`
    ///
    /// The source may use any ordering. Entries are inserted in the source's sorted order, so the
    /// new tree's shape is determined by that order.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_map::TreeMap;
    ///
    /// let mut reversed = TreeMap::with_cmp(|a: &i32, b: &i32| b.cmp(a));
    /// reversed.insert(1, "a");
    /// reversed.insert(2, "b");
    ///
    /// let copy = TreeMap::from_map(&reversed);
    /// assert_eq!(copy.key_set(), vec![1, 2]);
    /// assert_eq!(reversed.key_set(), vec![2, 1]);
    /// ```
    pub fn from_map<C2>(source: &TreeMap<K, V, C2>) -> Self
        where K: Clone,
              V: Clone,
              C2: Compare<K>,
    {
        let mut map = Self::new();
        map.put_all(source);
        map
    }
}

impl<K, V, C> TreeMap<K, V, C> {
    /// Returns the number of entries in the map
    ///
    /// This counts successful insertions minus successful removals. It can be larger than the
    /// number of reachable entries after a removal that dropped a subtree (see the type docs).
    ///
    /// Time complexity: `O(1)`
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_map::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// assert_eq!(map.len(), 0);
    /// map.insert(1, "a");
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the map is empty
    ///
    /// Time complexity: `O(1)`
    pub fn is_empty(&self) -> bool {
        debug_assert!(self.len != 0 || (self.root.is_null() && self.nodes.is_empty()));
        self.len == 0
    }

    /// Returns the number of entries the map can hold without reallocating
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Reserves capacity for at least `additional` more entries
    pub fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional)
    }

    /// Shrinks the capacity of the node storage as much as possible
    pub fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit()
    }

    /// Returns a reference to the map's comparator
    pub fn cmp(&self) -> &C {
        &self.cmp
    }

    /// Clears the map, removing all entries
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_map::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, "a");
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert_eq!(map.get(&1), None);
    /// ```
    pub fn clear(&mut self) {
        debug!(len = self.len, "clearing map");
        self.nodes.clear();
        self.root = Ptr::null();
        self.len = 0;
    }

    /// Walks the tree in pre-order: each node, then its left subtree, then its right subtree
    ///
    /// The iterator is lazy and can be cloned to restart from the same position.
    pub fn iter_preorder(&self) -> IterPreorder<'_, K, V> {
        IterPreorder::new(&self.nodes, self.root)
    }

    /// Returns the root node of the tree, or `None` if the tree is empty
    ///
    /// This is a low-level API meant to be used for implementing custom traversals and for
    /// inspecting the shape of the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_map::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// let root = map.root().unwrap();
    /// assert_eq!(root.key(), &2);
    /// assert_eq!(root.left().map(|node| *node.key()), Some(1));
    /// assert_eq!(root.left().and_then(|node| node.parent()), Some(root));
    /// ```
    pub fn root(&self) -> Option<Node<'_, K, V>> {
        self.root.non_null().map(|ptr| Node::new(&self.nodes, ptr))
    }

    /// Returns a copy of every value in pre-order tree order
    ///
    /// The result is independent of the map and can be modified freely.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_map::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(2, "b");
    /// map.insert(3, "c");
    /// map.insert(1, "a");
    /// assert_eq!(map.values(), vec!["b", "a", "c"]);
    /// ```
    pub fn values(&self) -> Vec<V>
        where V: Clone,
    {
        self.iter_preorder().map(|(_, value)| value.clone()).collect()
    }

    /// Returns true if any entry of the map holds `value`
    ///
    /// Time complexity: `O(n)`
    pub fn contains_value(&self, value: &V) -> bool
        where V: PartialEq,
    {
        self.iter_preorder().any(|(_, other)| other == value)
    }

    /// Removes every node of the subtree rooted at `root` from storage, returning how many there
    /// were
    fn free_subtree(&mut self, root: Ptr) -> usize {
        let mut stack = vec![root];
        let mut freed = 0;
        while let Some(ptr) = stack.pop() {
            let node = self.nodes.remove(ptr);
            stack.extend(node.left.non_null());
            stack.extend(node.right.non_null());
            freed += 1;
        }

        freed
    }
}

impl<K, V, C: Compare<K>> TreeMap<K, V, C> {
    /// Creates an empty map ordered by the given comparator
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_map::TreeMap;
    ///
    /// let mut map = TreeMap::with_cmp(|a: &i32, b: &i32| b.cmp(a));
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    /// map.insert(2, "b");
    /// assert_eq!(map.key_set(), vec![3, 2, 1]);
    /// ```
    pub fn with_cmp(cmp: C) -> Self {
        Self {
            nodes: Slab::new(),
            root: Ptr::null(),
            len: 0,
            cmp,
        }
    }

    /// Creates an empty map ordered by the given comparator with room for at least `capacity`
    /// entries
    pub fn with_capacity_and_cmp(capacity: usize, cmp: C) -> Self {
        Self {
            nodes: Slab::with_capacity(capacity),
            ..Self::with_cmp(cmp)
        }
    }

    /// Finds the node holding `key`
    ///
    /// Time complexity: `O(depth)`
    fn find(&self, key: &K) -> Option<Ptr> {
        let mut current = self.root.non_null();
        while let Some(ptr) = current {
            let node = self.nodes.get(ptr);
            match self.cmp.compare(&node.key, key) {
                Ordering::Greater => current = node.left.non_null(),
                Ordering::Less => current = node.right.non_null(),
                Ordering::Equal => return Some(ptr),
            }
        }

        None
    }

    /// Returns `true` if the map contains a value for the specified key
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_map::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, "a");
    /// assert!(map.contains_key(&1));
    /// assert!(!map.contains_key(&2));
    /// ```
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns a reference to the value corresponding to the given key, or `None` if no such key
    /// exists in the map
    ///
    /// Time complexity: `O(depth)`
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_map::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|ptr| &self.nodes.get(ptr).value)
    }

    /// Like `get`, but rejects an absent key with `Error::InvalidArgument`
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_map::{Argument, Error, TreeMap};
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.try_get(Some(&1)), Ok(Some(&"a")));
    /// assert_eq!(map.try_get(None), Err(Error::InvalidArgument(Argument::Key)));
    /// ```
    pub fn try_get(&self, key: Option<&K>) -> Result<Option<&V>> {
        let key = key.ok_or(Error::InvalidArgument(Argument::Key))?;
        Ok(self.get(key))
    }

    /// Returns a mutable reference to the value corresponding to the given key, or `None` if no
    /// such key exists in the map
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_map::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map.get(&1), Some(&"b"));
    /// assert_eq!(map.get_mut(&2), None);
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let ptr = self.find(key)?;
        Some(&mut self.nodes.get_mut(ptr).value)
    }

    /// Returns the stored key and value corresponding to the given key
    ///
    /// With a comparator that ignores some fields, the stored key may differ from `key`.
    pub fn get_entry(&self, key: &K) -> Option<(&K, &V)> {
        self.find(key).map(|ptr| {
            let node = self.nodes.get(ptr);
            (&node.key, &node.value)
        })
    }

    /// Inserts a new value into the map
    ///
    /// Returns the previous value if the key was already present in an existing node or `None` if
    /// a new node was inserted. The key of an existing node is never replaced.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_map::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.insert(37, "b"), Some("a"));
    /// assert_eq!(map.get(&37), Some(&"b"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut current = match self.root.non_null() {
            Some(root) => root,
            None => {
                self.root = self.nodes.push(InnerNode::new(key, value, Ptr::null()));

                debug_assert_eq!(self.len, 0);
                self.len = 1;
                trace!("inserted root entry");

                return None;
            },
        };

        loop {
            let node = self.nodes.get_mut(current);
            let side = match self.cmp.compare(&node.key, &key) {
                Ordering::Greater => Side::Left,
                Ordering::Less => Side::Right,
                Ordering::Equal => {
                    // Replacing, so `self.len` does not change
                    return Some(mem::replace(&mut node.value, value));
                },
            };

            match node.child(side).non_null() {
                Some(child) => current = child,
                None => {
                    // Key not found, insert where we stopped
                    let ptr = self.nodes.push(InnerNode::new(key, value, current));
                    self.nodes.get_mut(current).set_child(side, ptr);
                    self.len += 1;
                    trace!(?side, len = self.len, "inserted entry");

                    return None;
                },
            }
        }
    }

    /// Like `insert`, but rejects an absent key or value with `Error::InvalidArgument`
    ///
    /// Nothing is inserted when an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_map::{Argument, Error, TreeMap};
    ///
    /// let mut map = TreeMap::new();
    /// assert_eq!(map.try_insert(Some("x"), Some(1)), Ok(None));
    /// assert_eq!(map.try_insert(None, Some(1)), Err(Error::InvalidArgument(Argument::Key)));
    /// assert_eq!(map.try_insert(Some("y"), None), Err(Error::InvalidArgument(Argument::Value)));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn try_insert(&mut self, key: Option<K>, value: Option<V>) -> Result<Option<V>> {
        let key = key.ok_or(Error::InvalidArgument(Argument::Key))?;
        let value = value.ok_or(Error::InvalidArgument(Argument::Value))?;
        Ok(self.insert(key, value))
    }

    /// Removes a key from the map, returning the value at the key if the key was previously in the
    /// map
    ///
    /// Removing the root entry clears the entire map and returns `None`. Removing an entry with a
    /// left child may drop other entries too (see the type docs).
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_map::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(2, "b");
    /// map.insert(3, "c");
    /// assert_eq!(map.remove(&3), Some("c"));
    /// assert_eq!(map.remove(&3), None);
    /// assert_eq!(map.len(), 1);
    ///
    /// map.insert(1, "a");
    /// // 2 is the root, so everything goes and no value is handed back
    /// assert_eq!(map.remove(&2), None);
    /// assert!(map.is_empty());
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let ptr = self.find(key)?;

        if ptr == self.root {
            debug!(len = self.len, "removing the root entry clears the map");
            self.clear();
            return None;
        }

        let InnerNode {value, left, right, parent, ..} = self.nodes.remove(ptr);
        let side = self.nodes.get(parent).side_of(ptr);

        let replacement = match (left.non_null(), right.non_null()) {
            (None, None) => Ptr::null(),

            (None, Some(right)) => right,

            (Some(left), _) => {
                let promoted = self.nodes.get_mut(left);
                let discarded = mem::replace(&mut promoted.right, right);
                if let Some(right) = right.non_null() {
                    self.nodes.get_mut(right).parent = left;
                }

                if let Some(discarded) = discarded.non_null() {
                    let freed = self.free_subtree(discarded);
                    debug!(discarded = freed, "promoted left child lost its right subtree");
                }

                left
            },
        };

        if let Some(replacement) = replacement.non_null() {
            self.nodes.get_mut(replacement).parent = parent;
        }
        self.nodes.get_mut(parent).set_child(side, replacement);
        self.len -= 1;

        Some(value)
    }

    /// Like `remove`, but rejects an absent key with `Error::InvalidArgument`
    pub fn try_remove(&mut self, key: Option<&K>) -> Result<Option<V>> {
        let key = key.ok_or(Error::InvalidArgument(Argument::Key))?;
        Ok(self.remove(key))
    }

    /// Inserts a copy of every entry of `source`, in the source's sorted order
    ///
    /// Existing keys have their values replaced.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_map::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, "a");
    ///
    /// let mut other = TreeMap::new();
    /// other.insert(1, "x");
    /// other.insert(2, "b");
    ///
    /// map.put_all(&other);
    /// assert_eq!(map.entry_set(), vec![(1, "x"), (2, "b")]);
    /// ```
    pub fn put_all<C2>(&mut self, source: &TreeMap<K, V, C2>)
        where K: Clone,
              V: Clone,
              C2: Compare<K>,
    {
        for (key, value) in source.entry_set() {
            self.insert(key, value);
        }
    }

    /// Inserts every pair with `try_insert`, stopping at the first absent key or value
    ///
    /// This is not atomic: pairs inserted before the failure stay in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_map::{Argument, Error, TreeMap};
    ///
    /// let mut map = TreeMap::new();
    /// let pairs = vec![(Some(1), Some("a")), (Some(2), None), (Some(3), Some("c"))];
    /// assert_eq!(map.try_put_all(pairs), Err(Error::InvalidArgument(Argument::Value)));
    /// assert_eq!(map.key_set(), vec![1]);
    /// ```
    pub fn try_put_all<I>(&mut self, pairs: I) -> Result<()>
        where I: IntoIterator<Item = (Option<K>, Option<V>)>,
    {
        for (key, value) in pairs {
            self.try_insert(key, value)?;
        }

        Ok(())
    }

    /// Returns a copy of every key, sorted by the map's comparator
    ///
    /// The order does not depend on the shape of the tree. The result is independent of the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_map::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert("b", 2);
    /// map.insert("c", 3);
    /// map.insert("a", 1);
    /// assert_eq!(map.key_set(), vec!["a", "b", "c"]);
    /// ```
    pub fn key_set(&self) -> Vec<K>
        where K: Clone,
    {
        let mut keys: Vec<K> = self.iter_preorder().map(|(key, _)| key.clone()).collect();
        keys.sort_by(|a, b| self.cmp.compare(a, b));
        keys
    }

    /// Returns a copy of every entry, sorted by key using the map's comparator
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_map::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert("b", 2);
    /// map.insert("a", 1);
    /// assert_eq!(map.entry_set(), vec![("a", 1), ("b", 2)]);
    /// ```
    pub fn entry_set(&self) -> Vec<(K, V)>
        where K: Clone,
              V: Clone,
    {
        let mut entries: Vec<(K, V)> = self.iter_preorder()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        entries.sort_by(|(a, _), (b, _)| self.cmp.compare(a, b));
        entries
    }
}

impl<K, V, C: Compare<K>> Extend<(K, V)> for TreeMap<K, V, C> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for TreeMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}
