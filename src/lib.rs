//! Red-black tree index with O(log n) search, insert, delete and in-order
//! navigation, plus a plain unbalanced search tree sharing its node storage.
//!
//! Nodes live in an arena and are addressed through [`NodeId`] handles;
//! `None` plays the part of the sentinel leaf.
//!
//! ```
//! use fast_rbtree::rbtree_base::{DefaultRBTree, Node};
//!
//! let mut tree = DefaultRBTree::new();
//! for k in [5, 2, 20, 1, 4] {
//!     tree.insert(Node::new(k, k.to_string()));
//! }
//! let two = tree.search(&2).unwrap();
//! assert_eq!(tree.successor(two).map(|id| *tree.key(id)), Some(4));
//!
//! // 2 has two children, so its successor 4 is the node that leaves the
//! // tree and `two` now holds the successor's key and payload
//! assert_eq!(tree.delete(two).unwrap().node.data, "4");
//! assert_eq!(tree.data(two), "4");
//! assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![1, 4, 5, 20]);
//! ```
//!
//! [`NodeId`]: rbtree_base::NodeId

pub mod rbtree_base;
pub mod rbtree_map;
