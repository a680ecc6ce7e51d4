use core::cmp::Ordering;

use super::rb_arena::{Color, Dir, Entry, NIL};
use crate::{Compare, Error, Heap, RbArena};

impl<K, V, C: Compare<K>> RbArena<K, V, C> {
    /// Descends from the root by the comparator and returns the slot index
    /// holding `k`
    pub(crate) fn find(&self, k: &K) -> Result<usize, Error> {
        if self.root == NIL {
            return Err(Error::NotFound)
        }
        let mut curr = self.root;
        loop {
            match &self.slots[curr] {
                Entry::Live(node) => {
                    let next = match self.cmp.compare(k, &node.k) {
                        Ordering::Equal => return Ok(curr),
                        Ordering::Less => node.p_tree[Dir::Left as usize],
                        Ordering::Greater => node.p_tree[Dir::Right as usize],
                    };
                    if next == NIL {
                        return Err(Error::NotFound)
                    }
                    curr = next;
                }
                // tombstones are detached before they are queued, so a live
                // descent landing on one is reported distinctly instead of
                // walking through stale links
                Entry::Tomb => return Err(Error::Deleted),
                Entry::Nil => return Err(Error::NotFound),
            }
        }
    }

    /// Returns a reference to the value associated with `k`
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if there is no live entry for `k`
    pub fn get(&self, k: &K) -> Result<&V, Error> {
        self.find(k).map(|inx| &self.node(inx).v)
    }

    /// Returns a mutable reference to the value associated with `k`
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if there is no live entry for `k`
    pub fn get_mut(&mut self, k: &K) -> Result<&mut V, Error> {
        let inx = self.find(k)?;
        Ok(&mut self.node_mut(inx).v)
    }

    /// Returns if there is a live entry for `k`
    pub fn contains(&self, k: &K) -> bool {
        self.find(k).is_ok()
    }

    /// Returns a reference to the key at the root of the tree
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTree`] if the tree is empty
    pub fn root(&self) -> Result<&K, Error> {
        if self.root == NIL {
            Err(Error::EmptyTree)
        } else {
            Ok(&self.node(self.root).k)
        }
    }

    /// Color of the node holding `k`.
    ///
    /// An absent key reports the sentinel's color, `Black`, so this alone
    /// cannot distinguish "absent" from "present and black"; use
    /// [`RbArena::contains`] to disambiguate. A future major version may
    /// report absence as an error instead.
    pub fn color(&self, k: &K) -> Color {
        match self.find(k) {
            Ok(inx) => self.node(inx).color,
            Err(_) => Color::Black,
        }
    }

    /// Returns a reference to the key of the left child of the node holding
    /// `k`
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if `k` is absent or the child is `NIL`
    pub fn left(&self, k: &K) -> Result<&K, Error> {
        self.child_key(k, Dir::Left)
    }

    /// Returns a reference to the key of the right child of the node holding
    /// `k`
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if `k` is absent or the child is `NIL`
    pub fn right(&self, k: &K) -> Result<&K, Error> {
        self.child_key(k, Dir::Right)
    }

    fn child_key(&self, k: &K, dir: Dir) -> Result<&K, Error> {
        let inx = self.find(k)?;
        let child = self.child(inx, dir);
        if child == NIL {
            Err(Error::NotFound)
        } else {
            Ok(&self.node(child).k)
        }
    }

    /// Farthest descendant of `inx` in direction `dir`; `Dir::Right` gives
    /// the in-order maximum of the subtree
    pub(crate) fn farthest(&self, mut inx: usize, dir: Dir) -> usize {
        loop {
            let next = self.child(inx, dir);
            if next == NIL {
                return inx
            }
            inx = next;
        }
    }

    /// Used by tests to observe slot assignment
    #[doc(hidden)]
    pub fn _find_slot(&self, k: &K) -> Option<usize> {
        self.find(k).ok()
    }

    /// Used by tests
    #[doc(hidden)]
    pub fn _check_invariants(this: &Self) -> Result<(), &'static str> {
        // the sentinel and slot partition
        match this.slots.first() {
            Some(Entry::Nil) => (),
            _ => return Err("slot 0 is not the sentinel"),
        }
        let mut n_live = 0usize;
        let mut n_tomb = 0usize;
        for entry in this.slots.iter().skip(1) {
            match entry {
                Entry::Nil => return Err("sentinel outside slot 0"),
                Entry::Tomb => n_tomb = n_tomb.checked_add(1).unwrap(),
                Entry::Live(_) => n_live = n_live.checked_add(1).unwrap(),
            }
        }
        if n_live != this.len {
            return Err("live slot count != len")
        }
        // every tombstone is queued exactly once, and nothing else is
        if this.free.len() != n_tomb {
            return Err("free heap length != tombstone count")
        }
        let mut queued = alloc::vec![false; this.slots.len()];
        for inx in this.free.as_slice().iter().copied() {
            if !matches!(this.slots.get(inx), Some(Entry::Tomb)) {
                return Err("free heap entry is not a tombstone")
            }
            if queued[inx] {
                return Err("free heap entry queued twice")
            }
            queued[inx] = true;
        }
        Heap::_check_invariants(&this.free)?;
        // the tree itself
        if this.root == NIL {
            if this.len != 0 {
                return Err("no root but live slots exist")
            }
            return Ok(())
        }
        if this.parent(this.root) != NIL {
            return Err("root node has a back pointer")
        }
        if this.color_of(this.root) != Color::Black {
            return Err("root is red")
        }
        let mut reached = 0usize;
        subtree_check(this, this.root, &mut reached)?;
        if reached != this.len {
            return Err("live slots unreachable from the root")
        }
        // strict in-order monotonicity
        let mut iter = this.iter_ordered();
        if let Some(mut prev) = iter.next() {
            for pair in iter {
                if this.cmp.compare(prev.0, pair.0) != Ordering::Less {
                    return Err("incorrect ordering")
                }
                prev = pair;
            }
        }
        Ok(())
    }
}

/// Checks link consistency, colors, and black heights below `inx`, returning
/// the black height of the subtree (the sentinel counts one black)
fn subtree_check<K, V, C: Compare<K>>(
    this: &RbArena<K, V, C>,
    inx: usize,
    reached: &mut usize,
) -> Result<usize, &'static str> {
    if inx == NIL {
        return Ok(1)
    }
    let node = match &this.slots[inx] {
        Entry::Live(node) => node,
        _ => return Err("tree links to a nonlive slot"),
    };
    *reached = reached.checked_add(1).unwrap();
    if *reached > this.len {
        return Err("tree links form a cycle")
    }
    for dir in [Dir::Left, Dir::Right] {
        let c = node.p_tree[dir as usize];
        if c == NIL {
            continue
        }
        match &this.slots[c] {
            Entry::Live(child) => {
                if child.p_back != inx {
                    return Err("broken parent link")
                }
                if (node.color == Color::Red) && (child.color == Color::Red) {
                    return Err("red node with red child")
                }
            }
            _ => return Err("tree links to a nonlive slot"),
        }
    }
    let bh0 = subtree_check(this, node.p_tree[Dir::Left as usize], reached)?;
    let bh1 = subtree_check(this, node.p_tree[Dir::Right as usize], reached)?;
    if bh0 != bh1 {
        return Err("unequal black heights")
    }
    Ok(if node.color == Color::Black {
        bh0 + 1
    } else {
        bh0
    })
}
