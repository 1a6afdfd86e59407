use super::{
    iter::Iter,
    linked_tree::{Detached, LinkedTree},
    node::{Color, Direction, Link, Node, NodeId, Unlinked},
    tree_stats::TreeStats,
    tree_traits::TreeParams,
    verify::Verification,
};

/// Binary search tree without rebalancing. Same handles, navigation and
/// delete semantics as `RBTree`, but sorted input degrades it to a list.
pub struct UnbalancedTree<T: TreeParams> {
    tree: LinkedTree<T::KeyType, T::ValueType>,
}

impl<T: TreeParams> UnbalancedTree<T> {
    pub fn new() -> Self {
        Self {
            tree: LinkedTree::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    fn to_id(&self, link: Link) -> Option<NodeId> {
        link.map(|idx| self.tree.arena.id(idx))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.tree.arena.lookup(id).is_some()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.to_id(self.tree.root)
    }

    pub fn get(&self, id: NodeId) -> &Node<T::KeyType, T::ValueType> {
        &self.tree.node(self.tree.arena.resolve(id)).entry
    }

    pub fn search(&self, key: &T::KeyType) -> Option<NodeId> {
        self.to_id(self.tree.search(key))
    }

    pub fn minimum(&self) -> Option<NodeId> {
        self.tree
            .root
            .map(|root| self.tree.arena.id(self.tree.extreme(root, Direction::Left)))
    }

    pub fn maximum(&self) -> Option<NodeId> {
        self.tree
            .root
            .map(|root| self.tree.arena.id(self.tree.extreme(root, Direction::Right)))
    }

    pub fn successor(&self, id: NodeId) -> Option<NodeId> {
        self.to_id(self.tree.neighbor(self.tree.arena.resolve(id), Direction::Right))
    }

    pub fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        self.to_id(self.tree.neighbor(self.tree.arena.resolve(id), Direction::Left))
    }

    pub fn inorder(&self) -> Iter<'_, T::KeyType, T::ValueType> {
        Iter::new(&self.tree, Direction::Left)
    }

    pub fn insert(&mut self, node: Node<T::KeyType, T::ValueType>) -> NodeId {
        log::debug!("UnbalancedTree::insert({:?}) on tree size {}", node.key, self.len());
        let idx = self.tree.attach(node);
        // colors carry no meaning here
        self.tree.set_color(idx, Color::Black);
        self.self_verify();
        self.tree.arena.id(idx)
    }

    /// Same contract as `RBTree::delete`: for a node with two children the
    /// successor leaves the tree and its key and payload are returned.
    pub fn delete(
        &mut self,
        node: impl Into<Option<NodeId>>,
    ) -> Option<Unlinked<T::KeyType, T::ValueType>>
    where
        T::KeyType: Clone,
        T::ValueType: Clone,
    {
        let id = node.into()?;
        let idx = self.tree.arena.resolve(id);
        let detached = self.unlink(idx);

        let node = if detached.id == id {
            detached.entry
        } else {
            self.tree.node(idx).entry.clone()
        };
        Some(Unlinked {
            id: detached.id,
            node,
        })
    }

    /// Same contract as `RBTree::take`.
    pub fn take(
        &mut self,
        node: impl Into<Option<NodeId>>,
    ) -> Option<Node<T::KeyType, T::ValueType>> {
        let id = node.into()?;
        let idx = self.tree.arena.resolve(id);
        Some(self.unlink(idx).entry)
    }

    fn unlink(&mut self, idx: u32) -> Detached<T::KeyType, T::ValueType> {
        log::debug!("UnbalancedTree::delete slot {} on tree size {}", idx, self.len());
        let detached = self.tree.detach(idx);
        self.self_verify();
        detached
    }

    /// Order, links and size only; there is no coloring to check.
    pub fn verify(&self) -> Verification {
        Verification {
            flags: self.tree.check_structure(),
            stats: self.tree.stats(),
        }
    }

    pub fn stats(&self) -> TreeStats {
        self.tree.stats()
    }

    fn self_verify(&self) {
        if T::SELF_VERIFY {
            let report = self.verify();
            assert!(
                report.is_ok(),
                "search tree invariants violated, flags {:#08b}",
                report.flags.bits()
            );
        }
    }
}

impl<T: TreeParams> Default for UnbalancedTree<T> {
    fn default() -> Self {
        Self::new()
    }
}
