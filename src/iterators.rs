//! Iterators for [`RbArena`]
//!
//! [`Iter`], [`Keys`], and [`Vals`] walk the raw arena in slot order,
//! skipping the sentinel and tombstones: every live entry is visited
//! exactly once, but *not* in key order. [`OrderedIter`] is the in-order
//! walk, ascending under the comparator. All of them borrow the arena, so
//! mutating it while iterating is rejected at compile time.

use crate::{
    rb::{Dir, Entry, NIL},
    Compare, RbArena,
};

/// An iterator over `(&K, &V)` in arena order (slot order, not key order)
pub struct Iter<'a, K, V, C> {
    arena: &'a RbArena<K, V, C>,
    inx: usize,
    remaining: usize,
}

impl<'a, K, V, C> Iterator for Iter<'a, K, V, C> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while self.inx < self.arena.slots.len() {
            let inx = self.inx;
            self.inx += 1;
            if let Entry::Live(node) = &self.arena.slots[inx] {
                self.remaining -= 1;
                return Some((&node.k, &node.v))
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, C> ExactSizeIterator for Iter<'_, K, V, C> {}

/// An iterator over `&K` in arena order
pub struct Keys<'a, K, V, C> {
    iter: Iter<'a, K, V, C>,
}

impl<'a, K, V, C> Iterator for Keys<'a, K, V, C> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, V, C> ExactSizeIterator for Keys<'_, K, V, C> {}

/// An iterator over `&V` in arena order
pub struct Vals<'a, K, V, C> {
    iter: Iter<'a, K, V, C>,
}

impl<'a, K, V, C> Iterator for Vals<'a, K, V, C> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, V, C> ExactSizeIterator for Vals<'_, K, V, C> {}

/// An in-order iterator over `(&K, &V)`, keys ascending under the comparator
pub struct OrderedIter<'a, K, V, C> {
    arena: &'a RbArena<K, V, C>,
    /// Next slot to yield, `NIL` when exhausted
    inx: usize,
    remaining: usize,
}

impl<'a, K, V, C: Compare<K>> Iterator for OrderedIter<'a, K, V, C> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.inx == NIL {
            return None
        }
        let inx = self.inx;
        // in-order successor: down the right subtree if there is one, else
        // up until we rise out of a right child
        let right = self.arena.child(inx, Dir::Right);
        self.inx = if right != NIL {
            self.arena.farthest(right, Dir::Left)
        } else {
            let mut curr = inx;
            loop {
                let p_back = self.arena.parent(curr);
                if p_back == NIL {
                    break NIL
                }
                if self.arena.dir_of(p_back, curr) == Dir::Left {
                    break p_back
                }
                curr = p_back;
            }
        };
        self.remaining -= 1;
        let node = self.arena.node(inx);
        Some((&node.k, &node.v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, C: Compare<K>> ExactSizeIterator for OrderedIter<'_, K, V, C> {}

impl<K, V, C: Compare<K>> RbArena<K, V, C> {
    /// Iteration over `(&K, &V)` in arena order. Every live entry is visited
    /// exactly once; tombstoned slots are skipped. Combine with
    /// [`Iterator::try_for_each`] to short-circuit on the first failing key.
    pub fn iter(&self) -> Iter<'_, K, V, C> {
        Iter {
            arena: self,
            // slot 0 is the sentinel
            inx: 1,
            remaining: self.len,
        }
    }

    /// Iteration over `&K` in arena order
    pub fn keys(&self) -> Keys<'_, K, V, C> {
        Keys { iter: self.iter() }
    }

    /// Iteration over `&V` in arena order
    pub fn vals(&self) -> Vals<'_, K, V, C> {
        Vals { iter: self.iter() }
    }

    /// Iteration over `(&K, &V)` from the least key to the greatest
    pub fn iter_ordered(&self) -> OrderedIter<'_, K, V, C> {
        let start = if self.root == NIL {
            NIL
        } else {
            self.farthest(self.root, Dir::Left)
        };
        OrderedIter {
            arena: self,
            inx: start,
            remaining: self.len,
        }
    }
}

impl<'a, K, V, C: Compare<K>> IntoIterator for &'a RbArena<K, V, C> {
    type IntoIter = Iter<'a, K, V, C>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for RbArena<K, V> {
    /// Uses `put` and lets it overwrite identical keys
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut a = RbArena::new();
        for (k, v) in iter {
            let _ = a.put(k, v);
        }
        a
    }
}
