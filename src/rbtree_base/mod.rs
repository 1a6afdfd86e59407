mod arena;
pub mod bst;
pub mod iter;
mod linked_tree;
pub mod node;
pub mod rbtree;
pub mod tree_stats;
pub mod tree_traits;
pub mod verify;

use self::{
    bst::UnbalancedTree,
    rbtree::RBTree,
    tree_traits::{DefaultTreeConfig, VerifiedTreeConfig},
};

pub use self::node::{Color, Direction, Node, NodeId, Unlinked};

pub type DefaultRBTree<K, V> = RBTree<DefaultTreeConfig<K, V>>;
/// Re-checks every invariant after each mutation.
pub type VerifiedRBTree<K, V> = RBTree<VerifiedTreeConfig<K, V>>;

pub type DefaultUnbalancedTree<K, V> = UnbalancedTree<DefaultTreeConfig<K, V>>;
pub type VerifiedUnbalancedTree<K, V> = UnbalancedTree<VerifiedTreeConfig<K, V>>;
