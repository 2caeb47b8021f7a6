//! B-tree scenario tests.
//!
//! End-to-end scenarios exercising the full split / borrow / merge
//! machinery through the public API, with fixed key sequences whose
//! resulting shapes are known in advance.

use fanout::{BTree, Error, Key};

/// Walk every node and apply `f` to it.
fn visit_nodes(node: &fanout::Node, is_root: bool, f: &mut dyn FnMut(&fanout::Node, bool)) {
    f(node, is_root);
    for index in 0..node.num_children() {
        if let Some(child) = node.child(index) {
            visit_nodes(child, false, f);
        }
    }
}

// ============================================================================
// Order-4 scenario: root split on the 5th insert, then a leaf delete
// ============================================================================

#[test]
fn test_order_4_split_and_delete_scenario() {
    let mut tree = BTree::new(4).unwrap();

    // The first four inserts trigger the initial root split (the root
    // fills at 3 keys); after the 5th insert (12) the tree must be two
    // levels deep with exactly one split performed.
    for key in [10, 20, 5, 6, 12] {
        tree.insert(key).unwrap();
    }
    assert_eq!(tree.height(), 2);
    assert_eq!(tree.stats().splits, 1);
    assert!(!tree.root().is_leaf());

    for key in [30, 7, 17] {
        tree.insert(key).unwrap();
    }
    assert_eq!(tree.keys(), vec![5, 6, 7, 10, 12, 17, 20, 30]);
    assert!(tree.check_invariants().is_ok());

    // Deleting a present key succeeds; deleting an absent one reports
    // KeyNotFound and changes nothing.
    assert_eq!(tree.delete(6), Ok(()));
    assert_eq!(tree.delete(13), Err(Error::KeyNotFound(13)));

    assert_eq!(tree.keys(), vec![5, 7, 10, 12, 17, 20, 30]);
    assert!(tree.check_invariants().is_ok());
}

// ============================================================================
// Order-6 scenario: the alphabet, A-Z mapped to 1..=26
// ============================================================================

#[test]
fn test_order_6_alphabet_occupancy_and_search() {
    let mut tree = BTree::new(6).unwrap();
    for key in 1..=26 as Key {
        tree.insert(key).unwrap();
    }

    assert_eq!(tree.len(), 26);
    assert_eq!(tree.keys(), (1..=26).collect::<Vec<Key>>());
    assert!(tree.check_invariants().is_ok());

    // Order 6 gives t = 3: every node except the root must hold
    // between 2 and 5 keys.
    visit_nodes(tree.root(), true, &mut |node, is_root| {
        assert!(node.num_keys() <= 5, "node holds {} keys", node.num_keys());
        if !is_root {
            assert!(node.num_keys() >= 2, "node holds {} keys", node.num_keys());
        }
    });

    // Every inserted key is found; keys just outside the range are not.
    for key in 1..=26 {
        assert!(tree.contains(key), "key {} missing", key);
        let node = tree.search(key).unwrap();
        assert!(node.keys().contains(&key));
    }
    assert!(!tree.contains(0));
    assert!(!tree.contains(27));
}

// ============================================================================
// Round-trip: fill then drain back to an empty single-leaf root
// ============================================================================

#[test]
fn test_round_trip_returns_to_empty() {
    let mut tree = BTree::new(4).unwrap();
    let keys: Vec<Key> = (0..200).map(|i| (i * 37) % 1000).collect();

    for &key in &keys {
        tree.insert(key).unwrap();
        assert!(tree.check_invariants().is_ok(), "after inserting {}", key);
    }
    assert_eq!(tree.len(), keys.len());

    // Delete in a different order than insertion.
    let mut drain = keys.clone();
    drain.reverse();
    for &key in &drain {
        tree.delete(key).unwrap();
        assert!(tree.check_invariants().is_ok(), "after deleting {}", key);
    }

    assert!(tree.is_empty());
    assert_eq!(tree.height(), 1);
    assert!(tree.root().is_leaf());
    assert_eq!(tree.root().num_keys(), 0);
}

// ============================================================================
// Duplicate rejection
// ============================================================================

#[test]
fn test_duplicates_leave_the_tree_unchanged() {
    let mut tree = BTree::new(4).unwrap();
    for key in [10, 20, 5, 6, 12, 30, 7, 17] {
        tree.insert(key).unwrap();
    }

    let before = tree.keys();
    for key in [10, 20, 5, 6, 12, 30, 7, 17] {
        assert_eq!(tree.insert(key), Err(Error::DuplicateKey(key)));
        assert_eq!(tree.keys(), before, "key sequence changed after duplicate {}", key);
        assert!(tree.check_invariants().is_ok());
    }
    assert_eq!(tree.len(), before.len());
}

// ============================================================================
// Deleting separators out of internal nodes
// ============================================================================

#[test]
fn test_delete_every_key_in_sorted_order() {
    // Sorted-order deletion repeatedly hits separators and exercises
    // the successor-replacement and merge paths.
    let mut tree = BTree::new(4).unwrap();
    for key in 1..=64 {
        tree.insert(key).unwrap();
    }

    for key in 1..=64 {
        tree.delete(key).unwrap();
        assert!(!tree.contains(key));
        assert!(tree.check_invariants().is_ok(), "after deleting {}", key);
    }
    assert!(tree.is_empty());
}

#[test]
fn test_delete_every_key_in_reverse_order() {
    // Reverse order leans on predecessor replacement and left-sibling
    // borrows instead.
    let mut tree = BTree::new(4).unwrap();
    for key in 1..=64 {
        tree.insert(key).unwrap();
    }

    for key in (1..=64).rev() {
        tree.delete(key).unwrap();
        assert!(tree.check_invariants().is_ok(), "after deleting {}", key);
    }
    assert!(tree.is_empty());
    assert_eq!(tree.stats().merges, tree.stats().splits);
}

// ============================================================================
// Configuration errors
// ============================================================================

#[test]
fn test_invalid_order_is_rejected_without_a_tree() {
    for order in 0..3 {
        assert_eq!(BTree::new(order).unwrap_err(), Error::InvalidOrder(order));
    }
}

// ============================================================================
// Interleaved churn
// ============================================================================

#[test]
fn test_interleaved_inserts_and_deletes() {
    let mut tree = BTree::new(6).unwrap();

    // Fill evens, then replace half of them with odds.
    for key in (0..100).map(|i| i * 2) {
        tree.insert(key).unwrap();
    }
    for i in 0..50 {
        tree.delete(i * 4).unwrap();
        tree.insert(i * 4 + 1).unwrap();
        assert!(tree.check_invariants().is_ok(), "after round {}", i);
    }

    assert_eq!(tree.len(), 100);
    let keys = tree.keys();
    assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
}
