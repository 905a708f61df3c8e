use std::ptr;
use std::fmt;

use crate::slab::{Ptr, Slab};

/// Which child slot of a node a link occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// Storage for a single entry of the tree
///
/// `left` and `right` are owning links: a node is reachable from exactly one parent slot.
/// `parent` is only used to walk back up during removal and is null for the root.
#[derive(Debug, Clone)]
pub(crate) struct InnerNode<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Ptr,
    pub(crate) right: Ptr,
    pub(crate) parent: Ptr,
}

impl<K, V> InnerNode<K, V> {
    pub(crate) fn new(key: K, value: V, parent: Ptr) -> Self {
        Self {
            key,
            value,
            left: Ptr::null(),
            right: Ptr::null(),
            parent,
        }
    }

    pub(crate) fn child(&self, side: Side) -> Ptr {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Ptr) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// Returns the slot of this node that holds `child`
    pub(crate) fn side_of(&self, child: Ptr) -> Side {
        if self.left == child {
            Side::Left
        } else {
            debug_assert_eq!(self.right, child, "parent link does not match either child");
            Side::Right
        }
    }
}

/// A single node of the binary search tree
///
/// This is a read-only view: keys can never be changed once inserted, and the shape of the tree is
/// only changed through the map itself.
pub struct Node<'a, K, V> {
    nodes: &'a Slab<InnerNode<K, V>>,
    node: &'a InnerNode<K, V>,
}

impl<'a, K, V> fmt::Debug for Node<'a, K, V>
    where K: fmt::Debug,
          V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", self.key())
            .field("value", self.value())
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}

impl<'a, K, V> Clone for Node<'a, K, V> {
    fn clone(&self) -> Self {
        Self {..*self}
    }
}

impl<'a, K, V> Copy for Node<'a, K, V> {}

impl<'a, K, V> PartialEq for Node<'a, K, V> {
    /// Two views are equal when they refer to the same node of the same tree
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.nodes, other.nodes) && ptr::eq(self.node, other.node)
    }
}

impl<'a, K, V> Eq for Node<'a, K, V> {}

impl<'a, K, V> Node<'a, K, V> {
    pub(crate) fn new(nodes: &'a Slab<InnerNode<K, V>>, ptr: Ptr) -> Self {
        Self {nodes, node: nodes.get(ptr)}
    }

    fn at(&self, ptr: Ptr) -> Option<Self> {
        ptr.non_null().map(|ptr| Self::new(self.nodes, ptr))
    }

    /// Returns the key of this node
    pub fn key(&self) -> &'a K {
        &self.node.key
    }

    /// Returns the value of this node
    pub fn value(&self) -> &'a V {
        &self.node.value
    }

    /// Returns true if this node has a left subtree
    pub fn has_left(&self) -> bool {
        !self.node.left.is_null()
    }

    /// Returns true if this node has a right subtree
    pub fn has_right(&self) -> bool {
        !self.node.right.is_null()
    }

    /// Returns the left child node (subtree) of this node, if any
    pub fn left(&self) -> Option<Self> {
        self.at(self.node.left)
    }

    /// Returns the right child node (subtree) of this node, if any
    pub fn right(&self) -> Option<Self> {
        self.at(self.node.right)
    }

    /// Returns the node this node hangs off of, or `None` for the root
    pub fn parent(&self) -> Option<Self> {
        self.at(self.node.parent)
    }
}
