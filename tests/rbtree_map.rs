use std::{borrow::Borrow, collections::HashSet};

use fast_rbtree::rbtree_map::DefaultRBTreeMap;
use rand::{seq::SliceRandom, thread_rng, Rng};

#[test]
fn rbtree_map_works() {
    let mut tree = Box::new(DefaultRBTreeMap::<i32, i32>::new());

    for i in 0..1000 {
        assert_eq!(tree.put(i, i + 1), None);
    }

    for i in 0..1000 {
        assert_eq!(tree.get(&i), Some(&(i + 1)));
    }

    assert_eq!(tree.get(&12), Some(&13));
    assert_eq!(tree.remove(&12), Some(13));
    assert!(tree.get(&12).is_none());
    assert_eq!(tree.remove(&12), None);
    tree.put(12, 24);
    assert_eq!(tree.get(&12), Some(&24));
    assert_eq!(tree.put(12, 25), Some(24));

    for i in 0..1000 {
        if i == 12 {
            assert_eq!(tree.get(&i), Some(&25));
        } else {
            assert_eq!(tree.get(&i), Some(&(i + 1)));
        }
    }
    assert_eq!(tree.len(), 1000);
    assert!(tree.tree().verify().is_ok());
}

#[test]
fn works_on_pointer_types() {
    let mut tree = Box::new(DefaultRBTreeMap::<String, String>::new());
    assert_eq!(tree.get(&"test".into()), None);
    tree.put("test".into(), "test2".into());
    assert_eq!(tree.get(&"test".into()), Some(&("test2".to_string())));
    for i in 0..100 {
        tree.put(i.to_string(), (i + 1).to_string());
    }
    for i in 0..100 {
        assert_eq!(
            tree.get(i.to_string().borrow()),
            Some((i + 1).to_string().borrow()),
        );
    }
    if let Some(value) = tree.get_mut(&"test".into()) {
        value.push('!');
    }
    assert_eq!(tree.remove(&"test".into()), Some("test2!".to_string()));
}

#[test]
fn ordered_views() {
    let tree: DefaultRBTreeMap<i32, char> = [(3, 'c'), (1, 'a'), (2, 'b')].into_iter().collect();
    assert_eq!(tree.first_key_value(), Some((&1, &'a')));
    assert_eq!(tree.last_key_value(), Some((&3, &'c')));
    assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(
        tree.iter().map(|(_, v)| *v).collect::<String>(),
        "abc".to_string()
    );
    assert!(tree.contains_key(&2));
    assert!(!tree.contains_key(&4));

    let mut tree = tree;
    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.first_key_value(), None);
}

#[test]
fn random_op_test() {
    let mut tree = Box::new(DefaultRBTreeMap::<i32, i32>::new());

    let n = 50000;

    let mut rng = thread_rng();

    let mut keys = HashSet::new();
    while keys.len() < n {
        keys.insert(rng.gen::<u16>() as i32);
    }
    let mut keys: Vec<_> = keys.into_iter().collect();

    for &key in keys.iter() {
        tree.put(key, key + 1);
    }

    for &key in keys.iter() {
        assert_eq!(tree.get(&key), Some(&(key + 1)));
    }

    keys.shuffle(&mut rng);
    let removed_keys = keys.split_off(n / 2);
    for &key in removed_keys.iter() {
        assert_eq!(tree.remove(&key), Some(key + 1));
    }

    for &key in removed_keys.iter() {
        assert!(tree.get(&key).is_none());
    }

    for &key in keys.iter() {
        assert_eq!(tree.get(&key), Some(&(key + 1)));
    }

    let report = tree.tree().verify();
    assert!(report.is_ok(), "flags {:#08b}", report.flags.bits());
    assert!((report.stats.height as f64) <= report.stats.max_balanced_height());
}
