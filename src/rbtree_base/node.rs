/// Stable handle to a node stored in a tree.
///
/// A handle stays valid until the node it names is unlinked by `delete`.
/// Using it after that is a contract violation and panics, even if the
/// slot has since been reused by another node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

/// A key with its payload, as handed to `insert` and returned by `delete`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node<K, V> {
    pub key: K,
    pub data: V,
}

impl<K, V> Node<K, V> {
    pub fn new(key: K, data: V) -> Self {
        Self { key, data }
    }
}

impl<K, V> From<(K, V)> for Node<K, V> {
    fn from((key, data): (K, V)) -> Self {
        Self::new(key, data)
    }
}

/// Slot index of a node, `None` standing in for the sentinel leaf.
pub(crate) type Link = Option<u32>;

pub(crate) struct TreeNode<K, V> {
    pub entry: Node<K, V>,
    pub color: Color,
    pub parent: Link,
    pub children: [Link; 2],
}

impl<K, V> TreeNode<K, V> {
    pub fn new_leaf(entry: Node<K, V>, parent: Link) -> Self {
        Self {
            entry,
            color: Color::Red,
            parent,
            children: [None, None],
        }
    }

    #[inline]
    pub fn child(&self, dir: Direction) -> Link {
        self.children[dir.index()]
    }

    #[inline]
    pub fn set_child(&mut self, dir: Direction, link: Link) {
        self.children[dir.index()] = link;
    }

    #[inline]
    pub fn is_red(&self) -> bool {
        self.color == Color::Red
    }
}

/// What `delete` hands back: the handle that was actually unlinked and the
/// entry that left the tree.
///
/// When the requested node had two children its in-order successor is the
/// one spliced out, so `id` is the successor's former handle and `node` its
/// key and payload, while the requested handle stays in the tree holding a
/// copy of them.
#[derive(Debug, PartialEq, Eq)]
pub struct Unlinked<K, V> {
    pub id: NodeId,
    pub node: Node<K, V>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_opposite() {
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
        assert_ne!(Direction::Left.index(), Direction::Right.index());
    }

    #[test]
    fn fresh_leaf_is_red_without_children() {
        let leaf = TreeNode::new_leaf(Node::new(1, "a"), Some(3));
        assert!(leaf.is_red());
        assert_eq!(leaf.parent, Some(3));
        assert_eq!(leaf.child(Direction::Left), None);
        assert_eq!(leaf.child(Direction::Right), None);
    }
}
