use bitmask_enum::bitmask;

use super::{
    iter::Iter,
    linked_tree::LinkedTree,
    node::{Color, Direction},
    tree_stats::TreeStats,
};

#[bitmask(u8)]
pub enum InvariantFlags {
    Ok = 0,
    // in-order keys decrease somewhere
    KeyOrder = 1,
    // a child does not point back at its parent, or the root has a parent
    BrokenLink = 2,
    RedRoot = 4,
    RedRedEdge = 8,
    // root-to-sentinel paths disagree on their black node count
    BlackHeight = 16,
    // reachable node count disagrees with the stored node count
    SizeMismatch = 32,
}

/// Outcome of a full invariant check.
pub struct Verification {
    pub flags: InvariantFlags,
    pub stats: TreeStats,
}

impl Verification {
    pub fn is_ok(&self) -> bool {
        self.flags.bits() == 0
    }

    pub fn has(&self, flag: InvariantFlags) -> bool {
        self.flags.contains(flag)
    }
}

impl<K: Ord, V> LinkedTree<K, V> {
    /// Order, parent links and node count. Holds for any binary search tree.
    pub fn check_structure(&self) -> InvariantFlags {
        let mut flags = InvariantFlags::Ok;

        if let Some(root) = self.root {
            if self.parent(root).is_some() {
                flags = flags | InvariantFlags::BrokenLink;
            }
        }

        let mut reached = 0;
        let mut prev = None;
        for (id, node) in Iter::new(self, Direction::Left) {
            reached += 1;
            if prev.map_or(false, |k| k > &node.key) {
                flags = flags | InvariantFlags::KeyOrder;
            }
            prev = Some(&node.key);

            for dir in [Direction::Left, Direction::Right] {
                if let Some(child) = self.child(id.index, dir) {
                    if self.parent(child) != Some(id.index) {
                        flags = flags | InvariantFlags::BrokenLink;
                    }
                }
            }
        }

        if reached != self.len() {
            flags = flags | InvariantFlags::SizeMismatch;
        }
        flags
    }

    /// Red-black coloring rules on top of `check_structure`.
    pub fn check_red_black(&self) -> InvariantFlags {
        let mut flags = self.check_structure();
        if flags.contains(InvariantFlags::BrokenLink) {
            // colors are meaningless if walking up can loop
            return flags;
        }

        if self.is_red(self.root) {
            flags = flags | InvariantFlags::RedRoot;
        }

        let mut path_blacks = None;
        for (id, _) in Iter::new(self, Direction::Left) {
            let idx = id.index;
            let node = self.node(idx);
            if node.is_red() && self.is_red(node.parent) {
                flags = flags | InvariantFlags::RedRedEdge;
            }

            if node.child(Direction::Left).is_some() && node.child(Direction::Right).is_some() {
                continue;
            }
            // a sentinel hangs below this node: count blacks up to the root
            let mut blacks = 0;
            let mut curr = Some(idx);
            while let Some(i) = curr {
                if self.color(curr) == Color::Black {
                    blacks += 1;
                }
                curr = self.parent(i);
            }
            match path_blacks {
                None => path_blacks = Some(blacks),
                Some(expected) if expected != blacks => {
                    flags = flags | InvariantFlags::BlackHeight;
                }
                Some(_) => {}
            }
        }
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rbtree_base::node::Node;

    fn chain(n: i32) -> LinkedTree<i32, ()> {
        let mut tree = LinkedTree::new();
        for k in 0..n {
            tree.attach(Node::new(k, ()));
        }
        tree
    }

    #[test]
    fn unbalanced_chain_is_a_valid_bst() {
        let tree = chain(4);
        assert_eq!(tree.check_structure().bits(), 0);
    }

    #[test]
    fn all_red_chain_breaks_coloring() {
        let tree = chain(4);
        let flags = tree.check_red_black();
        assert!(flags.contains(InvariantFlags::RedRoot));
        assert!(flags.contains(InvariantFlags::RedRedEdge));
        assert!(!flags.contains(InvariantFlags::KeyOrder));
    }

    #[test]
    fn black_chain_breaks_black_height() {
        let mut tree = chain(3);
        for idx in 0..3 {
            tree.set_color(idx, Color::Black);
        }
        let flags = tree.check_red_black();
        assert!(flags.contains(InvariantFlags::BlackHeight));
        assert!(!flags.contains(InvariantFlags::RedRedEdge));
    }

    #[test]
    fn rewritten_key_breaks_order() {
        let mut tree = chain(3);
        let root = tree.root.unwrap();
        tree.node_mut(root).entry.key = 7;
        assert!(tree.check_structure().contains(InvariantFlags::KeyOrder));
    }

    #[test]
    fn verification_report() {
        let report = Verification {
            flags: InvariantFlags::RedRoot | InvariantFlags::BlackHeight,
            stats: TreeStats::new(),
        };
        assert!(!report.is_ok());
        assert!(report.has(InvariantFlags::BlackHeight));
        assert!(!report.has(InvariantFlags::KeyOrder));
    }
}
