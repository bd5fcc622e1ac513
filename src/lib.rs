//! A binary search tree built by midpoint splitting, with subtree statistics and explicit
//! rebalancing, plus a small fixed-capacity hash map.
//!
//! # Examples
//!
//! ```
//! use midtree::Tree;
//!
//! let mut tree = Tree::from_values(vec![25, 50, 75]);
//! tree.insert(10);
//! tree.insert(5);
//! assert!(!tree.is_balanced());
//!
//! tree.rebalance();
//! assert!(tree.is_balanced());
//! assert_eq!(tree.tree_height(), 3);
//! assert_eq!(tree.iter().cloned().collect::<Vec<_>>(), [5, 10, 25, 50, 75]);
//! ```

#![warn(missing_docs)]

pub mod hash_map;
mod node;
pub mod order;
pub mod tree;

#[cfg(feature = "quickcheck")]
mod quickcheck;

pub use hash_map::HashMap;
pub use node::{IntoIter, Iter, Node, Pretty, Side};
pub use tree::Tree;
