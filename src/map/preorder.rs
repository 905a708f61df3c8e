use std::iter::FusedIterator;

use crate::slab::{Ptr, Slab};

use super::InnerNode;

/// Lazy pre-order walk over a map: each node, then its left subtree, then its right subtree
///
/// Uses an explicit stack, so arbitrarily deep (degenerate) trees do not overflow the call stack.
pub struct IterPreorder<'a, K, V> {
    nodes: &'a Slab<InnerNode<K, V>>,
    stack: Vec<Ptr>,
}

impl<'a, K, V> IterPreorder<'a, K, V> {
    pub(super) fn new(nodes: &'a Slab<InnerNode<K, V>>, root: Ptr) -> Self {
        Self {
            nodes,
            stack: root.non_null().into_iter().collect(),
        }
    }
}

impl<'a, K, V> Clone for IterPreorder<'a, K, V> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            stack: self.stack.clone(),
        }
    }
}

// See: https://www.geeksforgeeks.org/iterative-preorder-traversal/
impl<'a, K, V> Iterator for IterPreorder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let top_ptr = self.stack.pop()?;
        let node = self.nodes.get(top_ptr);
        self.stack.extend(node.right.non_null());
        self.stack.extend(node.left.non_null());
        Some((&node.key, &node.value))
    }
}

impl<'a, K, V> FusedIterator for IterPreorder<'a, K, V> {}
