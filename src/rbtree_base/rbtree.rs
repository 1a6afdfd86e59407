use super::{
    iter::Iter,
    linked_tree::{Detached, LinkedTree},
    node::{Color, Direction, Link, Node, NodeId, Unlinked},
    tree_stats::TreeStats,
    tree_traits::TreeParams,
    verify::Verification,
};

/// Red-black tree over an arena of nodes.
///
/// Invariants kept across every `insert` and `delete`:
/// in-order keys are sorted (ties land right), the root is black, no red
/// node has a red parent, and every root-to-sentinel path crosses the same
/// number of black nodes. Height therefore stays below `2 * log2(n + 1)`.
pub struct RBTree<T: TreeParams> {
    tree: LinkedTree<T::KeyType, T::ValueType>,
}

/// Handles and node access
impl<T: TreeParams> RBTree<T> {
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

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    #[inline]
    fn to_id(&self, link: Link) -> Option<NodeId> {
        link.map(|idx| self.tree.arena.id(idx))
    }

    #[inline]
    fn index(&self, id: NodeId) -> u32 {
        self.tree.arena.resolve(id)
    }

    /// Whether `id` still names a node in this tree.
    pub fn contains(&self, id: NodeId) -> bool {
        self.tree.arena.lookup(id).is_some()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.to_id(self.tree.root)
    }

    pub fn get(&self, id: NodeId) -> &Node<T::KeyType, T::ValueType> {
        &self.tree.node(self.index(id)).entry
    }

    pub fn key(&self, id: NodeId) -> &T::KeyType {
        &self.get(id).key
    }

    pub fn data(&self, id: NodeId) -> &T::ValueType {
        &self.get(id).data
    }

    /// Only the payload is handed out mutably; keys stay fixed while a node
    /// is in the tree.
    pub fn data_mut(&mut self, id: NodeId) -> &mut T::ValueType {
        let idx = self.index(id);
        &mut self.tree.node_mut(idx).entry.data
    }

    pub fn color(&self, id: NodeId) -> Color {
        self.tree.node(self.index(id)).color
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.to_id(self.tree.parent(self.index(id)))
    }

    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.to_id(self.tree.child(self.index(id), Direction::Left))
    }

    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.to_id(self.tree.child(self.index(id), Direction::Right))
    }
}

/// Navigation
impl<T: TreeParams> RBTree<T> {
    /// Finds a node holding `key`, or `None`.
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

    /// Smallest node of the subtree rooted at `id`.
    pub fn minimum_of(&self, id: NodeId) -> NodeId {
        self.tree.arena.id(self.tree.extreme(self.index(id), Direction::Left))
    }

    /// Largest node of the subtree rooted at `id`.
    pub fn maximum_of(&self, id: NodeId) -> NodeId {
        self.tree.arena.id(self.tree.extreme(self.index(id), Direction::Right))
    }

    pub fn successor(&self, id: NodeId) -> Option<NodeId> {
        self.to_id(self.tree.neighbor(self.index(id), Direction::Right))
    }

    pub fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        self.to_id(self.tree.neighbor(self.index(id), Direction::Left))
    }

    /// Ascending in-order walk.
    pub fn inorder(&self) -> Iter<'_, T::KeyType, T::ValueType> {
        Iter::new(&self.tree, Direction::Left)
    }

    /// Descending in-order walk.
    pub fn inorder_rev(&self) -> Iter<'_, T::KeyType, T::ValueType> {
        Iter::new(&self.tree, Direction::Right)
    }

    pub fn keys(&self) -> impl Iterator<Item = &T::KeyType> + '_ {
        self.inorder().map(|(_, node)| &node.key)
    }
}

/// Insertion
impl<T: TreeParams> RBTree<T> {
    /// Links `node` into the tree and rebalances. Equal keys are kept; a
    /// duplicate goes to the right of the existing ones.
    pub fn insert(&mut self, node: Node<T::KeyType, T::ValueType>) -> NodeId {
        log::debug!("RBTree::insert({:?}) on tree size {}", node.key, self.len());

        let idx = self.tree.attach(node);
        self.insert_fixup(idx);
        self.self_verify();

        self.tree.arena.id(idx)
    }

    /// Removes red-red edges starting at the freshly attached red node `z`.
    fn insert_fixup(&mut self, mut z: u32) {
        while let Some(parent) = self
            .tree
            .parent(z)
            .filter(|&p| self.tree.node(p).is_red())
        {
            let grandparent = match self.tree.parent(parent) {
                Some(g) => g,
                None => unreachable!("red node {} is the root", parent),
            };
            let side = self.tree.side_in(grandparent, Some(parent));
            let uncle = self.tree.child(grandparent, side.opposite());

            if let Some(uncle) = uncle.filter(|&u| self.tree.node(u).is_red()) {
                log::debug!(
                    "RBTree::insert_fixup recolor at {}, moving up to {}",
                    z,
                    grandparent
                );
                self.tree.set_color(parent, Color::Black);
                self.tree.set_color(uncle, Color::Black);
                self.tree.set_color(grandparent, Color::Red);
                z = grandparent;
                continue;
            }

            let mut parent = parent;
            if self.tree.child(parent, side.opposite()) == Some(z) {
                log::debug!(
                    "RBTree::insert_fixup inner grandchild {}, rotating {} {:?}",
                    z,
                    parent,
                    side
                );
                self.tree.rotate(parent, side);
                std::mem::swap(&mut z, &mut parent);
            }

            log::debug!(
                "RBTree::insert_fixup outer grandchild {}, rotating {} {:?}",
                z,
                grandparent,
                side.opposite()
            );
            self.tree.set_color(parent, Color::Black);
            self.tree.set_color(grandparent, Color::Red);
            self.tree.rotate(grandparent, side.opposite());
        }

        if let Some(root) = self.tree.root {
            self.tree.set_color(root, Color::Black);
        }
    }
}

/// Erase
impl<T: TreeParams> RBTree<T> {
    /// Unlinks a node and rebalances. `None` is a no-op returning `None`.
    ///
    /// A node with two children is not unlinked itself: it takes over the
    /// key and payload of its in-order successor, and the successor's slot
    /// is spliced out instead. After such a delete the handle passed in is
    /// still live (now holding the successor's key and payload) and the
    /// successor's old handle is stale. The returned `Unlinked` always
    /// describes the node that left the tree: `id` is its handle and `node`
    /// its key and payload, so for a two-child delete both belong to the
    /// successor and the requested entry is dropped.
    ///
    /// Panics if `node` is a stale handle.
    pub fn delete(
        &mut self,
        node: impl Into<Option<NodeId>>,
    ) -> Option<Unlinked<T::KeyType, T::ValueType>>
    where
        T::KeyType: Clone,
        T::ValueType: Clone,
    {
        let id = node.into()?;
        let idx = self.index(id);
        let detached = self.unlink(idx);

        let node = if detached.id == id {
            detached.entry
        } else {
            // the successor's key and payload now live under `id` as well
            self.tree.node(idx).entry.clone()
        };
        Some(Unlinked {
            id: detached.id,
            node,
        })
    }

    /// Deletes one node holding `key`, if any.
    pub fn remove(&mut self, key: &T::KeyType) -> Option<Unlinked<T::KeyType, T::ValueType>>
    where
        T::KeyType: Clone,
        T::ValueType: Clone,
    {
        let found = self.search(key);
        if found.is_none() {
            log::debug!("Could not find key {:?} to remove.", key);
        }
        self.delete(found)
    }

    /// Deletes a node and hands back the key and payload that were stored
    /// under `node` before the call. Same restructuring as `delete`, but
    /// nothing is cloned.
    ///
    /// Panics if `node` is a stale handle.
    pub fn take(
        &mut self,
        node: impl Into<Option<NodeId>>,
    ) -> Option<Node<T::KeyType, T::ValueType>> {
        let id = node.into()?;
        let idx = self.index(id);
        Some(self.unlink(idx).entry)
    }

    /// Splices `idx` (or its successor) out and repairs the coloring. The
    /// returned entry is the one `idx` held on entry.
    fn unlink(&mut self, idx: u32) -> Detached<T::KeyType, T::ValueType> {
        log::debug!(
            "RBTree::delete slot {} key {:?} on tree size {}",
            idx,
            self.tree.node(idx).entry.key,
            self.len()
        );

        let detached = self.tree.detach(idx);
        if detached.color == Color::Black {
            self.delete_fixup(detached.child, detached.parent);
        }
        self.self_verify();
        detached
    }

    #[inline]
    fn sibling(&self, parent: u32, side: Direction) -> u32 {
        match self.tree.child(parent, side) {
            Some(sibling) => sibling,
            None => unreachable!(
                "node {} has no {:?} child under a black deficiency",
                parent,
                side
            ),
        }
    }

    /// Clears the missing black on the path through `x`, which sits where a
    /// black node was spliced out. `x` may be the sentinel, hence the
    /// separate `x_parent`.
    fn delete_fixup(&mut self, mut x: Link, mut x_parent: Link) {
        while x != self.tree.root && !self.tree.is_red(x) {
            let parent = match x_parent {
                Some(p) => p,
                None => unreachable!("non-root fixup cursor without a parent"),
            };
            let side = self.tree.side_in(parent, x);
            let far_side = side.opposite();
            let mut sibling = self.sibling(parent, far_side);

            if self.tree.node(sibling).is_red() {
                log::debug!(
                    "RBTree::delete_fixup red sibling {}, rotating {} {:?}",
                    sibling,
                    parent,
                    side
                );
                self.tree.set_color(sibling, Color::Black);
                self.tree.set_color(parent, Color::Red);
                self.tree.rotate(parent, side);
                sibling = self.sibling(parent, far_side);
            }

            let near = self.tree.child(sibling, side);
            let far = self.tree.child(sibling, far_side);
            if !self.tree.is_red(near) && !self.tree.is_red(far) {
                log::debug!("RBTree::delete_fixup black nephews, moving up to {}", parent);
                self.tree.set_color(sibling, Color::Red);
                x = Some(parent);
                x_parent = self.tree.parent(parent);
                continue;
            }

            if !self.tree.is_red(far) {
                log::debug!(
                    "RBTree::delete_fixup red near nephew, rotating {} {:?}",
                    sibling,
                    far_side
                );
                if let Some(near) = near {
                    self.tree.set_color(near, Color::Black);
                }
                self.tree.set_color(sibling, Color::Red);
                self.tree.rotate(sibling, far_side);
                sibling = self.sibling(parent, far_side);
            }

            log::debug!("RBTree::delete_fixup red far nephew, rotating {} {:?}", parent, side);
            let parent_color = self.tree.node(parent).color;
            self.tree.set_color(sibling, parent_color);
            self.tree.set_color(parent, Color::Black);
            if let Some(far) = self.tree.child(sibling, far_side) {
                self.tree.set_color(far, Color::Black);
            }
            self.tree.rotate(parent, side);
            x = self.tree.root;
            x_parent = None;
        }

        if let Some(x) = x {
            self.tree.set_color(x, Color::Black);
        }
    }
}

/// Verification
impl<T: TreeParams> RBTree<T> {
    pub fn verify(&self) -> Verification {
        Verification {
            flags: self.tree.check_red_black(),
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
                "red-black invariants violated, flags {:#08b}",
                report.flags.bits()
            );
        }
    }
}

impl<T: TreeParams> Default for RBTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: TreeParams> IntoIterator for &'a RBTree<T> {
    type Item = (NodeId, &'a Node<T::KeyType, T::ValueType>);
    type IntoIter = Iter<'a, T::KeyType, T::ValueType>;

    fn into_iter(self) -> Self::IntoIter {
        self.inorder()
    }
}

/// Debug
impl<T: TreeParams> RBTree<T> {
    fn print_node(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        idx: u32,
        depth: usize,
    ) -> std::fmt::Result {
        let node = self.tree.node(idx);
        if let Some(right) = node.child(Direction::Right) {
            self.print_node(f, right, depth + 1)?;
        }
        for _ in 0..depth {
            write!(f, "  ")?;
        }
        writeln!(f, "{:?}:{}", node.entry.key, if node.is_red() { 'R' } else { 'B' })?;
        if let Some(left) = node.child(Direction::Left) {
            self.print_node(f, left, depth + 1)?;
        }
        Ok(())
    }
}

impl<T: TreeParams> std::fmt::Debug for RBTree<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(root) = self.tree.root {
            self.print_node(f, root, 0)?;
        }
        Ok(())
    }
}
