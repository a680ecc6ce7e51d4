use redblack_arena::{Color, Descending, Error, RbArena};

#[test]
fn insert_canonical_shape() {
    let mut tree: RbArena<i64, i64> = RbArena::new();
    for val in [10, 5, 15, 3, 7, 20] {
        assert!(tree.put(val, val).is_none());
    }
    assert_eq!(tree.len(), 6);
    assert_eq!(tree.root(), Ok(&10));
    assert_eq!(tree.color(&10), Color::Black);

    assert_eq!(tree.left(&10), Ok(&5));
    assert_eq!(tree.color(&5), Color::Black);
    assert_eq!(tree.right(&10), Ok(&15));
    assert_eq!(tree.color(&15), Color::Black);

    assert_eq!(tree.left(&5), Ok(&3));
    assert_eq!(tree.color(&3), Color::Red);
    assert_eq!(tree.right(&5), Ok(&7));
    assert_eq!(tree.color(&7), Color::Red);

    assert_eq!(tree.right(&15), Ok(&20));
    assert_eq!(tree.color(&20), Color::Red);
    // 15 has no left child
    assert_eq!(tree.left(&15), Err(Error::NotFound));

    RbArena::_check_invariants(&tree).unwrap();
}

#[test]
fn insert_bulk_preserves_invariants() {
    let samples = [
        11, 2, 31, 34, 7, 35, 47, 0, 49, 26, 46, 3, 24, 13, 4, 37, 27, 12, 16, 10, 39, 19, 29, 25,
        33, 41, 28, 45, 30, 48,
    ];
    let mut tree: RbArena<i64, i64> = RbArena::new();
    for val in samples {
        assert!(tree.put(val, val).is_none());
        assert_eq!(tree.get(&val), Ok(&val));
    }
    assert_eq!(tree.len(), samples.len());
    assert_eq!(tree.color(tree.root().unwrap()), Color::Black);

    // audit through the public introspection surface: no red node has a red
    // child (an absent child reads black)
    for key in tree.keys() {
        if tree.color(key) == Color::Red {
            if let Ok(tree0) = tree.left(key) {
                assert_eq!(tree.color(tree0), Color::Black);
            }
            if let Ok(tree1) = tree.right(key) {
                assert_eq!(tree.color(tree1), Color::Black);
            }
        }
    }

    // the in-order walk is ascending
    let mut sorted = samples;
    sorted.sort_unstable();
    assert!(tree.iter_ordered().map(|(k, _)| *k).eq(sorted.iter().copied()));

    RbArena::_check_invariants(&tree).unwrap();
}

#[test]
fn remove_preserves_invariants() {
    let keys = [10, 5, 15, 3, 7, 12, 17, 1, 4, 6, 8, 11, 13, 16, 18, 2, 9];
    let dels = [5, 15, 17, 10];
    let mut tree: RbArena<i64, i64> = RbArena::new();
    for val in keys {
        assert!(tree.put(val, val).is_none());
    }

    for val in dels {
        assert_eq!(tree.remove(&val), Ok(val));
        assert_eq!(tree.get(&val), Err(Error::NotFound));
        RbArena::_check_invariants(&tree).unwrap();
    }
    assert_eq!(tree.len(), keys.len() - dels.len());
    assert_eq!(tree.color(tree.root().unwrap()), Color::Black);

    for val in keys {
        if dels.contains(&val) {
            assert_eq!(tree.get(&val), Err(Error::NotFound));
        } else {
            assert_eq!(tree.get(&val), Ok(&val));
        }
    }
}

#[test]
fn slot_recycling_reuses_the_smallest_index() {
    // removing a leaf vacates its own slot, and the next insertion takes it
    let mut tree: RbArena<u64, u64> = RbArena::new();
    for k in [1, 2, 3] {
        tree.put(k, k);
    }
    let vacated = tree._find_slot(&3).unwrap();
    tree.remove(&3).unwrap();
    tree.put(4, 4);
    assert_eq!(tree._find_slot(&4), Some(vacated));
    RbArena::_check_invariants(&tree).unwrap();

    // removing an interior key vacates the slot of its in-order predecessor
    // instead; whichever slot went dead is the one reused
    let mut tree: RbArena<u64, u64> = RbArena::new();
    for k in [1, 2, 3] {
        tree.put(k, k);
    }
    tree.remove(&2).unwrap();
    let live: Vec<usize> = [1, 3]
        .iter()
        .map(|k| tree._find_slot(k).unwrap())
        .collect();
    let vacated = (1..=3).find(|inx| !live.contains(inx)).unwrap();
    tree.put(4, 4);
    assert_eq!(tree._find_slot(&4), Some(vacated));
    assert_eq!(tree.len(), 3);
    RbArena::_check_invariants(&tree).unwrap();
}

#[test]
fn remove_then_put_revives_the_key() {
    let mut tree: RbArena<u64, &str> = RbArena::new();
    tree.put(7, "seven");
    assert_eq!(tree.remove(&7), Ok("seven"));
    assert_eq!(tree.get(&7), Err(Error::NotFound));
    assert!(tree.put(7, "again").is_none());
    assert_eq!(tree.get(&7), Ok(&"again"));
    assert_eq!(tree.len(), 1);
}

#[test]
fn overwrite_leaves_structure_alone() {
    let mut tree: RbArena<u64, u64> = RbArena::new();
    for k in [10, 5, 15] {
        tree.put(k, k);
    }
    let slot = tree._find_slot(&5).unwrap();
    assert_eq!(tree.put(5, 500), Some(5));
    assert_eq!(tree.len(), 3);
    assert_eq!(tree._find_slot(&5), Some(slot));
    assert_eq!(tree.get(&5), Ok(&500));
    *tree.get_mut(&5).unwrap() += 1;
    assert_eq!(tree.get(&5), Ok(&501));
}

#[test]
fn empty_and_absent_lookups() {
    let mut tree: RbArena<u64, u64> = RbArena::new();
    assert_eq!(tree.root(), Err(Error::EmptyTree));
    assert_eq!(tree.get(&1), Err(Error::NotFound));
    assert_eq!(tree.remove(&1), Err(Error::NotFound));
    assert_eq!(tree.len(), 0);
    assert!(tree.is_empty());
    // an absent key reads as the (black) sentinel
    assert_eq!(tree.color(&1), Color::Black);

    tree.put(1, 1);
    assert_eq!(tree.left(&1), Err(Error::NotFound));
    assert_eq!(tree.right(&1), Err(Error::NotFound));
    assert_eq!(tree.left(&99), Err(Error::NotFound));
    assert_eq!(tree.color(&99), Color::Black);
    assert!(!tree.contains(&99));
}

#[test]
fn arena_order_iteration_visits_live_entries_once() {
    let mut tree: RbArena<u64, u64> = RbArena::new();
    for k in [4, 8, 1, 6, 3, 9, 2] {
        tree.put(k, k * 10);
    }
    tree.remove(&8).unwrap();
    tree.remove(&1).unwrap();

    let mut seen: Vec<u64> = tree.iter().map(|(k, _)| *k).collect();
    assert_eq!(seen.len(), tree.len());
    seen.sort_unstable();
    assert_eq!(seen, [2, 3, 4, 6, 9]);

    // the visitor contract: short-circuit on the first failing key
    let mut visited = 0usize;
    let res: Result<(), u64> = tree.iter().try_for_each(|(k, _)| {
        visited += 1;
        if *k == 6 {
            Err(*k)
        } else {
            Ok(())
        }
    });
    assert_eq!(res, Err(6));
    assert!(visited <= tree.len());
}

#[test]
fn descending_comparator_flips_the_order() {
    let mut tree: RbArena<u64, u64, Descending> = RbArena::with_comparator(Descending);
    for k in [3, 1, 4, 1, 5, 9, 2, 6] {
        tree.put(k, k);
    }
    assert_eq!(tree.len(), 7);
    let walked: Vec<u64> = tree.iter_ordered().map(|(k, _)| *k).collect();
    assert_eq!(walked, [9, 6, 5, 4, 3, 2, 1]);
    RbArena::_check_invariants(&tree).unwrap();
}

#[test]
fn clear_resets_everything_but_capacity() {
    let mut tree: RbArena<u64, u64> = RbArena::with_capacity(16);
    assert!(tree.capacity() >= 16);
    for k in 0..10 {
        tree.put(k, k);
    }
    tree.remove(&4).unwrap();
    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.root(), Err(Error::EmptyTree));
    assert!(tree.capacity() >= 16);
    RbArena::_check_invariants(&tree).unwrap();

    tree.put(1, 1);
    assert_eq!(tree.get(&1), Ok(&1));
}

#[test]
fn from_iterator_and_eq() {
    let a: RbArena<u64, u64> = [(1, 10), (2, 20), (1, 11)].into_iter().collect();
    assert_eq!(a.len(), 2);
    assert_eq!(a.get(&1), Ok(&11));

    let mut b: RbArena<u64, u64> = RbArena::new();
    b.put(2, 20);
    b.put(1, 11);
    // same contents, different insertion order and slot assignment
    assert_eq!(a, b);
    b.put(3, 30);
    assert_ne!(a, b);
}
