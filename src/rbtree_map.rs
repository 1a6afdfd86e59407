use crate::rbtree_base::{
    node::Node,
    rbtree::RBTree,
    tree_traits::{DefaultTreeConfig, TreeParams},
};

/// Ordered map with unique keys, backed by a red-black tree.
pub struct RBTreeMap<T: TreeParams> {
    _tree: RBTree<T>,
}

impl<T: TreeParams> RBTreeMap<T> {
    pub fn is_empty(&self) -> bool {
        self._tree.is_empty()
    }

    pub fn len(&self) -> usize {
        self._tree.len()
    }

    pub fn contains_key(&self, key: &T::KeyType) -> bool {
        self._tree.search(key).is_some()
    }

    /// Inserts or overwrites; an existing value is replaced in place and
    /// returned.
    pub fn put(&mut self, key: T::KeyType, value: T::ValueType) -> Option<T::ValueType> {
        match self._tree.search(&key) {
            Some(id) => Some(std::mem::replace(self._tree.data_mut(id), value)),
            None => {
                self._tree.insert(Node::new(key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &T::KeyType) -> Option<&T::ValueType> {
        self._tree.search(key).map(|id| self._tree.data(id))
    }

    pub fn get_mut(&mut self, key: &T::KeyType) -> Option<&mut T::ValueType> {
        let id = self._tree.search(key)?;
        Some(self._tree.data_mut(id))
    }

    pub fn remove(&mut self, key: &T::KeyType) -> Option<T::ValueType> {
        let id = self._tree.search(key)?;
        self._tree.take(id).map(|node| node.data)
    }

    pub fn first_key_value(&self) -> Option<(&T::KeyType, &T::ValueType)> {
        self._tree.minimum().map(|id| {
            let node = self._tree.get(id);
            (&node.key, &node.data)
        })
    }

    pub fn last_key_value(&self) -> Option<(&T::KeyType, &T::ValueType)> {
        self._tree.maximum().map(|id| {
            let node = self._tree.get(id);
            (&node.key, &node.data)
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&T::KeyType, &T::ValueType)> + '_ {
        self._tree.inorder().map(|(_, node)| (&node.key, &node.data))
    }

    pub fn keys(&self) -> impl Iterator<Item = &T::KeyType> + '_ {
        self._tree.keys()
    }

    pub fn clear(&mut self) {
        self._tree.clear();
    }

    /// The underlying tree, for navigation by handle.
    pub fn tree(&self) -> &RBTree<T> {
        &self._tree
    }

    pub fn new() -> Self {
        Self {
            _tree: RBTree::new(),
        }
    }
}

impl<T: TreeParams> Default for RBTreeMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TreeParams> FromIterator<(T::KeyType, T::ValueType)> for RBTreeMap<T> {
    fn from_iter<I: IntoIterator<Item = (T::KeyType, T::ValueType)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.put(key, value);
        }
        map
    }
}

pub type DefaultRBTreeMap<K, V> = RBTreeMap<DefaultTreeConfig<K, V>>;
