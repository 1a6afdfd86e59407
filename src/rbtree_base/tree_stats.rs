use super::{
    linked_tree::LinkedTree,
    node::{Color, Direction},
};

/// Shape of a tree at one point in time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub size: usize,
    /// Nodes on the longest root-to-leaf path.
    pub height: usize,
    /// Black-height of the root: black nodes on the leftmost path from the
    /// root down to the sentinel, not counting the root itself.
    pub black_height: usize,
    pub red_nodes: usize,
}

impl TreeStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upper bound on the height of a red-black tree with `size` nodes,
    /// `2 * log2(size + 1)`.
    pub fn max_balanced_height(&self) -> f64 {
        2.0 * ((self.size + 1) as f64).log2()
    }
}

impl<K, V> LinkedTree<K, V> {
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::new();
        stats.size = self.len();

        let mut stack = Vec::new();
        if let Some(root) = self.root {
            stack.push((root, 1));
        }
        while let Some((idx, depth)) = stack.pop() {
            let node = self.node(idx);
            if node.is_red() {
                stats.red_nodes += 1;
            }
            stats.height = stats.height.max(depth);
            for dir in [Direction::Left, Direction::Right] {
                if let Some(child) = node.child(dir) {
                    stack.push((child, depth + 1));
                }
            }
        }

        let mut curr = self.root.and_then(|root| self.child(root, Direction::Left));
        while let Some(idx) = curr {
            if self.node(idx).color == Color::Black {
                stats.black_height += 1;
            }
            curr = self.child(idx, Direction::Left);
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rbtree_base::node::Node;

    #[test]
    fn empty_tree_has_zero_stats() {
        let tree = LinkedTree::<i32, ()>::new();
        assert_eq!(tree.stats(), TreeStats::new());
        assert_eq!(tree.stats().max_balanced_height(), 0.0);
    }

    #[test]
    fn degenerate_chain_height() {
        let mut tree = LinkedTree::new();
        for k in 0..6 {
            tree.attach(Node::new(k, ()));
        }
        let stats = tree.stats();
        assert_eq!(stats.size, 6);
        assert_eq!(stats.height, 6);
        assert_eq!(stats.red_nodes, 6);
        assert_eq!(stats.black_height, 0);
        assert!((stats.height as f64) > stats.max_balanced_height());
    }

    #[test]
    fn black_height_excludes_the_root() {
        let mut tree = LinkedTree::new();
        for k in [2, 1, 3] {
            tree.attach(Node::new(k, ()));
        }
        let root = tree.root.unwrap();
        tree.set_color(root, Color::Black);
        assert_eq!(tree.stats().black_height, 0);
        assert_eq!(tree.stats().red_nodes, 2);

        let left = tree.child(root, Direction::Left).unwrap();
        let right = tree.child(root, Direction::Right).unwrap();
        tree.set_color(left, Color::Black);
        tree.set_color(right, Color::Black);
        assert_eq!(tree.stats().black_height, 1);
        assert_eq!(tree.stats().red_nodes, 0);
    }
}
