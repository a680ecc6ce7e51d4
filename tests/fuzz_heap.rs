use rand_xoshiro::{
    rand_core::{RngCore, SeedableRng},
    Xoshiro128StarStar,
};
use redblack_arena::{Descending, Error, Heap};

const N: usize = if cfg!(miri) {
    1000
} else if cfg!(debug_assertions) {
    50_000
} else {
    500_000
};

const MAX_ELEM: u64 = 128;

#[test]
fn fuzz_heap_ascending() {
    let mut rng = Xoshiro128StarStar::seed_from_u64(0);
    let mut a: Heap<u64> = Heap::ascending();
    // model: kept sorted ascending, extremum at the front
    let mut b: Vec<u64> = vec![];

    for _ in 0..N {
        assert_eq!(a.len(), b.len());
        assert_eq!(a.is_empty(), b.is_empty());
        match rng.next_u32() % 100 {
            0..=54 => {
                let x = rng.next_u64() % MAX_ELEM;
                a.push(x);
                let at = b.partition_point(|&e| e < x);
                b.insert(at, x);
            }
            55..=89 => {
                if b.is_empty() {
                    assert_eq!(a.pop(), Err(Error::EmptyHeap));
                } else {
                    assert_eq!(a.pop(), Ok(b.remove(0)));
                }
            }
            90..=98 => {
                if b.is_empty() {
                    assert_eq!(a.peek(), Err(Error::EmptyHeap));
                } else {
                    assert_eq!(a.peek(), Ok(&b[0]));
                }
            }
            99 => {
                a.clear();
                b.clear();
            }
            _ => unreachable!(),
        }
        if let Err(e) = Heap::_check_invariants(&a) {
            panic!("{e}");
        }
    }

    // drain the remainder; the sequence must be nondecreasing
    let mut prev = None;
    while let Ok(x) = a.pop() {
        if let Some(prev) = prev {
            assert!(prev <= x);
        }
        prev = Some(x);
        assert_eq!(x, b.remove(0));
    }
    assert!(b.is_empty());
}

#[test]
fn fuzz_heap_descending() {
    let mut rng = Xoshiro128StarStar::seed_from_u64(7);
    let mut a: Heap<u64, Descending> = Heap::descending();
    let mut b: Vec<u64> = vec![];

    for _ in 0..(N / 10) {
        match rng.next_u32() % 10 {
            0..=5 => {
                let x = rng.next_u64() % MAX_ELEM;
                a.push(x);
                // descending model, extremum (greatest) at the front
                let at = b.partition_point(|&e| e > x);
                b.insert(at, x);
            }
            _ => {
                if b.is_empty() {
                    assert_eq!(a.pop(), Err(Error::EmptyHeap));
                } else {
                    assert_eq!(a.pop(), Ok(b.remove(0)));
                }
            }
        }
        if let Err(e) = Heap::_check_invariants(&a) {
            panic!("{e}");
        }
    }
}
