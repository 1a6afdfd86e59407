use std::fmt::Debug;
use std::marker::PhantomData;

/// Compile-time configuration of a tree.
pub trait TreeParams {
    type KeyType: Ord + Debug;
    type ValueType;
    /// Re-check every invariant after each insert/delete and panic on a
    /// violation. Linear per operation, meant for tests.
    const SELF_VERIFY: bool;
}

pub struct _Tree<TKey: Ord + Debug, TValue, const SELF_VERIFY: bool> {
    _phantom_key: PhantomData<TKey>,
    _phantom_value: PhantomData<TValue>,
}

impl<TKey: Ord + Debug, TValue, const VERIFY: bool> TreeParams for _Tree<TKey, TValue, VERIFY> {
    type KeyType = TKey;
    type ValueType = TValue;
    const SELF_VERIFY: bool = VERIFY;
}

pub type DefaultTreeConfig<K, V> = _Tree<K, V, false>;
pub type VerifiedTreeConfig<K, V> = _Tree<K, V, true>;

#[cfg(test)]
#[test]
fn test_tree_params() {
    assert!(!DefaultTreeConfig::<u64, u64>::SELF_VERIFY);
    assert!(VerifiedTreeConfig::<u64, String>::SELF_VERIFY);
}
