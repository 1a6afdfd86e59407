use std::iter::FusedIterator;

use super::{
    linked_tree::LinkedTree,
    node::{Direction, Link, Node, NodeId},
};

/// In-order walk over a tree, ascending or descending.
///
/// Keeps the spine of not-yet-visited ancestors on an explicit stack, so the
/// walk is lazy and never recurses. A clone resumes from the same position;
/// asking the tree for a new iterator starts over.
pub struct Iter<'a, K, V> {
    tree: &'a LinkedTree<K, V>,
    stack: Vec<u32>,
    first: Direction,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(tree: &'a LinkedTree<K, V>, first: Direction) -> Self {
        let mut iter = Self {
            tree,
            stack: Vec::new(),
            first,
            remaining: tree.len(),
        };
        iter.push_spine(tree.root);
        iter
    }

    fn push_spine(&mut self, mut link: Link) {
        while let Some(idx) = link {
            self.stack.push(idx);
            link = self.tree.child(idx, self.first);
        }
    }
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            stack: self.stack.clone(),
            first: self.first,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (NodeId, &'a Node<K, V>);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let tree = self.tree;
        self.push_spine(tree.child(idx, self.first.opposite()));
        self.remaining = self.remaining.saturating_sub(1);
        Some((tree.arena.id(idx), &tree.node(idx).entry))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_both_directions() {
        let mut tree = LinkedTree::new();
        for k in [8, 3, 10, 1, 6, 14, 4, 7, 13] {
            tree.attach(Node::new(k, ()));
        }

        let up: Vec<i32> = Iter::new(&tree, Direction::Left).map(|(_, n)| n.key).collect();
        assert_eq!(up, vec![1, 3, 4, 6, 7, 8, 10, 13, 14]);

        let down: Vec<i32> = Iter::new(&tree, Direction::Right).map(|(_, n)| n.key).collect();
        assert_eq!(down, vec![14, 13, 10, 8, 7, 6, 4, 3, 1]);
    }

    #[test]
    fn reports_exact_length_and_resumes_from_clone() {
        let mut tree = LinkedTree::new();
        for k in 0..5 {
            tree.attach(Node::new(k, ()));
        }

        let mut iter = Iter::new(&tree, Direction::Left);
        assert_eq!(iter.len(), 5);
        iter.next();
        let rest = iter.clone();
        assert_eq!(rest.len(), 4);
        assert_eq!(rest.map(|(_, n)| n.key).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(iter.count(), 4);
    }

    #[test]
    fn empty_tree_yields_nothing() {
        let tree = LinkedTree::<i32, ()>::new();
        let mut iter = Iter::new(&tree, Direction::Left);
        assert_eq!(iter.len(), 0);
        assert!(iter.next().is_none());
    }
}
