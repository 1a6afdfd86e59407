use super::{
    arena::NodeArena,
    node::{Color, Direction, Link, Node, NodeId, TreeNode},
};

/// Parent-linked binary search tree over a node arena: the navigation,
/// rotation and structural edit steps shared by the balanced and the
/// unbalanced tree.
pub(crate) struct LinkedTree<K, V> {
    pub arena: NodeArena<K, V>,
    pub root: Link,
}

/// Result of splicing a node out of the tree.
pub(crate) struct Detached<K, V> {
    /// Handle of the slot that was actually unlinked.
    pub id: NodeId,
    pub entry: Node<K, V>,
    pub color: Color,
    /// Link that took the spliced node's place, and its parent.
    pub child: Link,
    pub parent: Link,
}

/// Link accessors
impl<K, V> LinkedTree<K, V> {
    pub fn new() -> Self {
        Self {
            arena: NodeArena::new(),
            root: None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    #[inline]
    pub fn node(&self, idx: u32) -> &TreeNode<K, V> {
        self.arena.get(idx)
    }

    #[inline]
    pub fn node_mut(&mut self, idx: u32) -> &mut TreeNode<K, V> {
        self.arena.get_mut(idx)
    }

    #[inline]
    pub fn parent(&self, idx: u32) -> Link {
        self.node(idx).parent
    }

    #[inline]
    pub fn child(&self, idx: u32, dir: Direction) -> Link {
        self.node(idx).child(dir)
    }

    #[inline]
    fn set_child(&mut self, idx: u32, dir: Direction, link: Link) {
        self.node_mut(idx).set_child(dir, link);
    }

    #[inline]
    fn set_parent(&mut self, link: Link, parent: Link) {
        if let Some(idx) = link {
            self.node_mut(idx).parent = parent;
        }
    }

    /// Color of a link; the sentinel is always black.
    #[inline]
    pub fn color(&self, link: Link) -> Color {
        match link {
            Some(idx) => self.node(idx).color,
            None => Color::Black,
        }
    }

    #[inline]
    pub fn is_red(&self, link: Link) -> bool {
        self.color(link) == Color::Red
    }

    #[inline]
    pub fn set_color(&mut self, idx: u32, color: Color) {
        self.node_mut(idx).color = color;
    }

    /// Which child of `parent` the link `link` is. A sentinel link is taken
    /// to be on whichever side of `parent` is empty.
    #[inline]
    pub fn side_in(&self, parent: u32, link: Link) -> Direction {
        if self.child(parent, Direction::Left) == link {
            Direction::Left
        } else {
            Direction::Right
        }
    }

    /// Points whatever referenced `old` (its parent's child slot, or the
    /// root) at `new`.
    fn replace_child(&mut self, parent: Link, old: u32, new: Link) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let dir = self.side_in(p, Some(old));
                self.set_child(p, dir, new);
            }
        }
    }
}

/// Navigation
impl<K: Ord, V> LinkedTree<K, V> {
    pub fn search(&self, key: &K) -> Link {
        let mut curr = self.root;
        while let Some(idx) = curr {
            let node_key = &self.node(idx).entry.key;
            if key == node_key {
                break;
            }
            curr = self.child(idx, if key < node_key { Direction::Left } else { Direction::Right });
        }
        curr
    }

    /// Last node reached by following `dir` children from `idx`: the
    /// subtree minimum for `Left`, the maximum for `Right`.
    pub fn extreme(&self, mut idx: u32, dir: Direction) -> u32 {
        while let Some(next) = self.child(idx, dir) {
            idx = next;
        }
        idx
    }

    /// In-order neighbor of `idx`: the successor for `Right`, the
    /// predecessor for `Left`.
    pub fn neighbor(&self, idx: u32, dir: Direction) -> Link {
        if let Some(sub) = self.child(idx, dir) {
            return Some(self.extreme(sub, dir.opposite()));
        }

        let mut curr = idx;
        let mut up = self.parent(idx);
        while let Some(p) = up {
            if self.child(p, dir) != Some(curr) {
                break;
            }
            curr = p;
            up = self.parent(p);
        }
        up
    }
}

/// Rotations
impl<K, V> LinkedTree<K, V> {
    /// Moves `x` down toward `dir`, promoting its child on the other side.
    /// `rotate(x, Left)` is the classic left rotation.
    pub fn rotate(&mut self, x: u32, dir: Direction) {
        let up = dir.opposite();
        let y = match self.child(x, up) {
            Some(y) => y,
            None => unreachable!("rotation pivot {} has no {:?} child", x, up),
        };
        log::trace!("LinkedTree::rotate {} {:?}, promoting {}", x, dir, y);

        let inner = self.child(y, dir);
        self.set_child(x, up, inner);
        self.set_parent(inner, Some(x));

        let x_parent = self.parent(x);
        self.node_mut(y).parent = x_parent;
        self.replace_child(x_parent, x, Some(y));

        self.set_child(y, dir, Some(x));
        self.node_mut(x).parent = Some(y);
    }

}

/// Structural edits
impl<K: Ord, V> LinkedTree<K, V> {
    /// Plain BST insert: descends from the root, sending `key < node.key`
    /// left and ties right, then hangs a red leaf under the last node seen.
    pub fn attach(&mut self, entry: Node<K, V>) -> u32 {
        let mut parent = None;
        let mut dir = Direction::Left;
        let mut curr = self.root;
        while let Some(idx) = curr {
            parent = Some(idx);
            dir = if entry.key < self.node(idx).entry.key {
                Direction::Left
            } else {
                Direction::Right
            };
            curr = self.child(idx, dir);
        }

        let idx = self.arena.alloc(TreeNode::new_leaf(entry, parent));
        match parent {
            None => self.root = Some(idx),
            Some(p) => self.set_child(p, dir, Some(idx)),
        }
        idx
    }

    /// Plain BST removal of `idx`. A node with two children has its
    /// successor spliced out in its place after the two exchange entries,
    /// so `idx` stays linked (holding the successor's entry) and the
    /// successor's slot is freed. The returned entry is the one `idx` held.
    pub fn detach(&mut self, idx: u32) -> Detached<K, V> {
        let splice = match (
            self.child(idx, Direction::Left),
            self.child(idx, Direction::Right),
        ) {
            (Some(_), Some(right)) => self.extreme(right, Direction::Left),
            _ => idx,
        };

        let child = self
            .child(splice, Direction::Left)
            .or(self.child(splice, Direction::Right));
        let parent = self.parent(splice);
        self.set_parent(child, parent);
        self.replace_child(parent, splice, child);

        if splice != idx {
            self.arena.swap_entries(idx, splice);
        }

        let id = self.arena.id(splice);
        let removed = self.arena.release(splice);
        Detached {
            id,
            entry: removed.entry,
            color: removed.color,
            child,
            parent,
        }
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }
}
