//! Integration tests for adt-core

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{BinarySearchTree, ChainedHashTable, TableError, TraverseOrder, TreeError};

#[test]
fn test_hashtable_basic_workflow() {
    let mut table = ChainedHashTable::new();

    table.insert("hello".to_string(), "there".to_string());
    assert_eq!(table.get(&"hello".to_string()), Ok(&"there".to_string()));
    assert_eq!(table.remove(&"hello".to_string()), Ok("there".to_string()));
    assert_eq!(
        table.get(&"hello".to_string()),
        Err(TableError::KeyNotFound)
    );
}

#[test]
fn test_hashtable_random_workload() {
    let mut rng = ChaCha8Rng::seed_from_u64(101);
    let mut table = ChainedHashTable::seeded(16, (1_000_000, 10_000_000), 101);
    let mut shadow = std::collections::HashMap::new();

    for _ in 0..5_000 {
        let key: u64 = rng.gen_range(0..800);
        if rng.gen_bool(0.6) {
            let value: u64 = rng.gen();
            assert_eq!(table.insert(key, value), shadow.insert(key, value));
        } else {
            assert_eq!(table.remove(&key).ok(), shadow.remove(&key));
        }
    }

    table.check_rep();
    assert_eq!(table.len(), shadow.len());
    for (key, value) in &shadow {
        assert_eq!(table.get(key), Ok(value));
    }
}

#[test]
fn test_hashtable_string_keys_across_resizes() {
    let mut table = ChainedHashTable::seeded(16, (1_000_000, 10_000_000), 7);
    for i in 0..500 {
        table.insert(format!("key{}", i), i);
    }
    assert_eq!(table.len(), 500);
    for i in 0..500 {
        assert_eq!(table.get(&format!("key{}", i)), Ok(&i));
    }
    table.check_rep();
}

#[test]
fn test_bst_duplicate_workflow() {
    let values = [3i64, 6, 5, 4, 1, 9, 8, 7, 6, 5, 3, 2, 1];
    let mut tree = BinarySearchTree::new();
    for value in values {
        tree.insert(value);
    }

    let mut inorder = Vec::new();
    tree.traverse(|v| inorder.push(*v), TraverseOrder::InOrder);
    assert_eq!(inorder, vec![1, 1, 2, 3, 3, 4, 5, 5, 6, 6, 7, 8, 9]);
    assert_eq!(tree.min(), Some(&1));
    assert_eq!(tree.max(), Some(&9));

    assert_eq!(tree.delete(&7), Ok(7));
    assert_eq!(tree.delete(&3), Ok(3));
    let mut after = Vec::new();
    tree.traverse(|v| after.push(*v), TraverseOrder::InOrder);
    assert_eq!(after, vec![1, 1, 2, 3, 4, 5, 5, 6, 6, 8, 9]);
    tree.check_rep();
}

#[test]
fn test_bst_random_inserts_and_deletes_stay_ordered() {
    let mut rng = ChaCha8Rng::seed_from_u64(202);
    let mut tree = BinarySearchTree::new();
    let mut shadow = Vec::new();

    for _ in 0..2_000 {
        let value: i64 = rng.gen_range(-100..100);
        if rng.gen_bool(0.6) || shadow.is_empty() {
            tree.insert(value);
            shadow.push(value);
        } else if let Ok(removed) = tree.delete(&value) {
            let pos = shadow
                .iter()
                .position(|&v| v == removed)
                .expect("tree and shadow agree");
            shadow.swap_remove(pos);
        }
        tree.check_rep();
    }

    shadow.sort_unstable();
    let mut inorder = Vec::new();
    tree.traverse(|v| inorder.push(*v), TraverseOrder::InOrder);
    assert_eq!(inorder, shadow);
}

#[test]
fn test_bst_successor_predecessor_inverse() {
    // unique values, so successor and predecessor are exact inverses
    let mut rng = ChaCha8Rng::seed_from_u64(303);
    let mut values: Vec<i64> = (0..200).map(|v| v * 3).collect();
    values.shuffle(&mut rng);

    let mut tree = BinarySearchTree::new();
    for &value in &values {
        tree.insert(value);
    }

    for &value in &values {
        match tree.successor(&value) {
            Ok(Some(&next)) => assert_eq!(tree.predecessor(&next), Ok(Some(&value))),
            Ok(None) => assert_eq!(tree.max(), Some(&value)),
            Err(err) => panic!("successor of a present value failed: {}", err),
        }
    }
}

#[test]
fn test_traverse_order_error_display() {
    let err = "sideways".parse::<TraverseOrder>().unwrap_err();
    assert_eq!(err, TreeError::InvalidOrder("sideways".to_string()));
    assert!(err.to_string().contains("sideways"));
}
