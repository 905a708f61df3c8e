//! An ordered map backed by an unbalanced binary search tree with parent links
//!
//! [`TreeMap`] orders its keys either by their natural ordering ([`TreeMap::new`]) or by any
//! comparator implementing [`compare::Compare`] ([`TreeMap::with_cmp`]).

mod slab;
mod error;

pub mod map;

pub use map::TreeMap;
pub use error::{Argument, Error, Result};

/// Builds a naturally ordered [`TreeMap`] from `key => value` pairs
///
/// Pairs are inserted left to right, so the first key becomes the root and the layout of the tree
/// follows the order the pairs are written in. A repeated key keeps its last value.
///
/// ```
/// use tree_map::treemap;
///
/// let map = treemap! {
///     "b" => 2,
///     "a" => 1,
///     "c" => 3,
///     "a" => 10,
/// };
///
/// assert_eq!(map.len(), 3);
/// assert_eq!(map.to_string(), "{b=2, a=10, c=3}");
/// assert_eq!(map.root().map(|root| *root.key()), Some("b"));
/// ```
#[macro_export(local_inner_macros)]
macro_rules! treemap {
    // trailing comma case
    ($($key:expr => $value:expr,)+) => (treemap!($($key => $value),+));

    ( $($key:expr => $value:expr),* ) => {
        {
            let mut _map = $crate::TreeMap::new();
            $(
                let _ = _map.insert($key, $value);
            )*
            _map
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn treemap_macro() {
        let map = treemap! {
            2 => 3,
            1 => 2,
            3 => 4, // trailing comma
        };

        let pairs: Vec<(_, _)> = map.iter_preorder()
            .map(|(&key, &value)| (key, value))
            .collect();
        assert_eq!(&pairs, &[(2, 3), (1, 2), (3, 4)]);

        // No trailing comma
        let map = treemap![3 => 4];

        let pairs: Vec<(_, _)> = map.iter_preorder()
            .map(|(&key, &value)| (key, value))
            .collect();
        assert_eq!(&pairs, &[(3, 4)]);

        // Zero items
        let map: TreeMap<i32, i32> = treemap!();
        assert!(map.is_empty());
    }
}
