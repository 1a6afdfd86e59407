use super::node::{NodeId, TreeNode};

enum Slot<K, V> {
    Occupied(TreeNode<K, V>),
    Vacant { next_free: Option<u32> },
}

struct ArenaEntry<K, V> {
    generation: u32,
    slot: Slot<K, V>,
}

/// Node storage addressed by slot index. Freed slots are chained into a free
/// list and reused; each reuse bumps the slot generation so old handles can
/// be told apart from the new occupant.
pub(crate) struct NodeArena<K, V> {
    entries: Vec<ArenaEntry<K, V>>,
    free_head: Option<u32>,
    len: usize,
}

impl<K, V> NodeArena<K, V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn alloc(&mut self, node: TreeNode<K, V>) -> u32 {
        self.len += 1;
        match self.free_head {
            Some(index) => {
                let entry = &mut self.entries[index as usize];
                self.free_head = match entry.slot {
                    Slot::Vacant { next_free } => next_free,
                    Slot::Occupied(_) => {
                        unreachable!("free list points at occupied slot {}", index)
                    }
                };
                entry.slot = Slot::Occupied(node);
                index
            }
            None => {
                let index =
                    u32::try_from(self.entries.len()).expect("node arena exceeds u32 slots");
                self.entries.push(ArenaEntry {
                    generation: 0,
                    slot: Slot::Occupied(node),
                });
                index
            }
        }
    }

    pub fn release(&mut self, index: u32) -> TreeNode<K, V> {
        let entry = &mut self.entries[index as usize];
        let old = std::mem::replace(
            &mut entry.slot,
            Slot::Vacant {
                next_free: self.free_head,
            },
        );
        match old {
            Slot::Occupied(node) => {
                entry.generation = entry.generation.wrapping_add(1);
                self.free_head = Some(index);
                self.len -= 1;
                node
            }
            Slot::Vacant { .. } => unreachable!("double release of slot {}", index),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.free_head = None;
        self.len = 0;
    }

    #[inline]
    pub fn get(&self, index: u32) -> &TreeNode<K, V> {
        match &self.entries[index as usize].slot {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("link to vacant slot {}", index),
        }
    }

    #[inline]
    pub fn get_mut(&mut self, index: u32) -> &mut TreeNode<K, V> {
        match &mut self.entries[index as usize].slot {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("link to vacant slot {}", index),
        }
    }

    #[inline]
    pub fn id(&self, index: u32) -> NodeId {
        NodeId {
            index,
            generation: self.entries[index as usize].generation,
        }
    }

    /// Slot index behind a handle, or `None` if the handle is stale.
    pub fn lookup(&self, id: NodeId) -> Option<u32> {
        let entry = self.entries.get(id.index as usize)?;
        match entry.slot {
            Slot::Occupied(_) if entry.generation == id.generation => Some(id.index),
            _ => None,
        }
    }

    /// Slot index behind a handle; a stale handle is a caller bug.
    pub fn resolve(&self, id: NodeId) -> u32 {
        match self.lookup(id) {
            Some(index) => index,
            None => panic!("stale {:?}: the node was already removed from the tree", id),
        }
    }

    /// Exchanges the key/payload of two occupied slots, leaving colors and
    /// links where they are.
    pub fn swap_entries(&mut self, a: u32, b: u32) {
        if a == b {
            return;
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.entries.split_at_mut(hi as usize);
        match (&mut head[lo as usize].slot, &mut tail[0].slot) {
            (Slot::Occupied(x), Slot::Occupied(y)) => std::mem::swap(&mut x.entry, &mut y.entry),
            _ => unreachable!("swap_entries on vacant slot ({}, {})", a, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rbtree_base::node::Node;

    fn leaf(key: i32) -> TreeNode<i32, ()> {
        TreeNode::new_leaf(Node::new(key, ()), None)
    }

    #[test]
    fn released_slots_are_reused_with_new_generation() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(leaf(1));
        let b = arena.alloc(leaf(2));
        let old_id = arena.id(a);
        assert_eq!(arena.len(), 2);

        assert_eq!(arena.release(a).entry.key, 1);
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.lookup(old_id), None);

        let c = arena.alloc(leaf(3));
        assert_eq!(c, a);
        assert_ne!(arena.id(c), old_id);
        assert_eq!(arena.lookup(old_id), None);
        assert_eq!(arena.get(b).entry.key, 2);
    }

    #[test]
    fn swap_entries_keeps_links() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(leaf(1));
        let b = arena.alloc(TreeNode::new_leaf(Node::new(2, ()), Some(a)));
        arena.swap_entries(b, a);
        assert_eq!(arena.get(a).entry.key, 2);
        assert_eq!(arena.get(b).entry.key, 1);
        assert_eq!(arena.get(b).parent, Some(a));
    }

    #[test]
    #[should_panic(expected = "stale")]
    fn resolving_a_stale_handle_panics() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(leaf(1));
        let id = arena.id(a);
        arena.release(a);
        arena.resolve(id);
    }
}
