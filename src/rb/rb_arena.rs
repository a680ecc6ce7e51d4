use alloc::vec::Vec;
use core::{fmt, fmt::Debug};

use crate::{Ascending, Compare, Heap};

/// Arena index of the permanently-black sentinel standing in for "no child"
pub(crate) const NIL: usize = 0;

/// Color of a tree node.
///
/// Any read of the sentinel's color yields `Black`; the balancing logic
/// relies on this when it indexes children it has not inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
}

/// Child/descent direction. The balancing cases are symmetric in this, so
/// each is written once over a `Dir` and flipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Dir {
    Left = 0,
    Right = 1,
}

impl Dir {
    #[inline]
    pub(crate) fn flip(self) -> Self {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

/// Internal node for a live slot of an `RbArena`
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub k: K,
    pub v: V,
    /// Arena index of the parent, `NIL` for the root
    pub p_back: usize,
    /// Arena indices of the left and right subtrees, indexed by `Dir`
    pub p_tree: [usize; 2],
    pub color: Color,
}

/// Internal entry for one arena slot
#[derive(Clone)]
pub(crate) enum Entry<K, V> {
    /// The sentinel, only ever at slot 0: black, childless, no payload
    Nil,
    /// A tombstoned slot whose index is queued in the free-slot heap
    Tomb,
    /// A live node reachable from the root
    Live(Node<K, V>),
}

/// An ordered map realized as a red-black tree over an arena of slots, with
/// tombstoned slots recycled through an internal min-[`Heap`] of indices.
///
/// All nodes live in one growable `Vec`; parent and child links are plain
/// indices into it, and slot 0 is reserved as the permanently-black `NIL`
/// sentinel. Removal tombstones a slot and queues its index; the next
/// insertion drains the smallest queued index before the arena grows. This
/// keeps the structure free of per-node allocations and stable under
/// relocation of the backing `Vec`.
///
/// `put`, `get`, and `remove` are `O(log n)` worst case with the usual
/// red-black guarantees. The map is single-mutator: share it across threads
/// only behind external exclusion, and note that iterators borrow it, so
/// mutation during iteration is rejected at compile time.
///
/// Note: it is a logic error for a key's ordering to change relative to
/// other keys while it is in the map.
///
/// ```
/// use redblack_arena::{Color, RbArena};
///
/// let mut a: RbArena<u64, &str> = RbArena::new();
/// assert!(a.put(50, "fifty").is_none());
/// a.put(30, "thirty");
/// a.put(70, "seventy");
///
/// assert_eq!(a.len(), 3);
/// assert_eq!(a.root(), Ok(&50));
/// assert_eq!(a.get(&30), Ok(&"thirty"));
///
/// // overwriting an existing key replaces the value and leaves the
/// // structure untouched
/// assert_eq!(a.put(30, "XXX"), Some("thirty"));
/// assert_eq!(a.len(), 3);
///
/// // structural introspection by key
/// assert_eq!(a.color(&50), Color::Black);
/// assert_eq!(a.left(&50), Ok(&30));
/// assert_eq!(a.right(&50), Ok(&70));
///
/// assert_eq!(a.remove(&30), Ok("XXX"));
/// assert!(a.get(&30).is_err());
///
/// // the tombstoned slot is reused by the next insertion
/// a.put(60, "sixty");
/// assert_eq!(a.len(), 3);
/// ```
pub struct RbArena<K, V, C = Ascending> {
    /// Slot 0 is always `Entry::Nil`
    pub(crate) slots: Vec<Entry<K, V>>,
    /// `NIL` iff the tree is empty
    pub(crate) root: usize,
    /// Count of live nodes
    pub(crate) len: usize,
    /// Tombstoned slot indices, smallest first
    pub(crate) free: Heap<usize, Ascending>,
    pub(crate) cmp: C,
}

impl<K: Ord, V> RbArena<K, V> {
    /// Returns an empty map ordered by `Ord`, ascending
    pub fn new() -> Self {
        Self::with_comparator(Ascending)
    }

    /// [`RbArena::new`] with the initial slot capacity set to at least
    /// `capacity`
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_comparator_and_capacity(Ascending, capacity)
    }
}

impl<K, V, C: Compare<K>> RbArena<K, V, C> {
    /// Returns an empty map ordered by `cmp`
    pub fn with_comparator(cmp: C) -> Self {
        let mut slots = Vec::with_capacity(1);
        slots.push(Entry::Nil);
        Self {
            slots,
            root: NIL,
            len: 0,
            free: Heap::ascending(),
            cmp,
        }
    }

    /// [`RbArena::with_comparator`] with the initial slot capacity set to at
    /// least `capacity`
    pub fn with_comparator_and_capacity(cmp: C, capacity: usize) -> Self {
        let mut res = Self::with_comparator(cmp);
        res.slots.reserve(capacity);
        res
    }

    /// Returns the number of live entries. Tombstoned slots awaiting reuse
    /// do not count.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns if there are no live entries
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of node slots the arena can hold without
    /// reallocating, not counting the sentinel
    pub fn capacity(&self) -> usize {
        self.slots.capacity() - 1
    }

    /// Drops all entries and empties the free-slot queue. This has no effect
    /// on the allocated capacity.
    pub fn clear(&mut self) {
        self.slots.truncate(1);
        self.root = NIL;
        self.len = 0;
        self.free.clear();
    }

    /// Returns the live node at `inx`.
    ///
    /// # Panics
    ///
    /// Internal indices always point at live nodes; anything else is an
    /// invariant breakage and fails loudly.
    #[inline]
    pub(crate) fn node(&self, inx: usize) -> &Node<K, V> {
        match &self.slots[inx] {
            Entry::Live(node) => node,
            _ => unreachable!("arena index does not point at a live node"),
        }
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, inx: usize) -> &mut Node<K, V> {
        match &mut self.slots[inx] {
            Entry::Live(node) => node,
            _ => unreachable!("arena index does not point at a live node"),
        }
    }

    /// Color of the slot at `inx`. The sentinel reads as black
    /// unconditionally, so callers never special-case uninspected children.
    #[inline]
    pub(crate) fn color_of(&self, inx: usize) -> Color {
        match &self.slots[inx] {
            Entry::Live(node) => node.color,
            _ => Color::Black,
        }
    }

    /// Recolors the live node at `inx`. The sentinel is never recolored.
    #[inline]
    pub(crate) fn set_color(&mut self, inx: usize, color: Color) {
        self.node_mut(inx).color = color;
    }

    /// Child of `inx` on side `dir`. The sentinel's children are the
    /// sentinel.
    #[inline]
    pub(crate) fn child(&self, inx: usize, dir: Dir) -> usize {
        match &self.slots[inx] {
            Entry::Live(node) => node.p_tree[dir as usize],
            _ => NIL,
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, inx: usize, dir: Dir, to: usize) {
        self.node_mut(inx).p_tree[dir as usize] = to;
    }

    #[inline]
    pub(crate) fn parent(&self, inx: usize) -> usize {
        self.node(inx).p_back
    }

    /// Which side of `p_back` the node `inx` hangs on
    #[inline]
    pub(crate) fn dir_of(&self, p_back: usize, inx: usize) -> Dir {
        if self.child(p_back, Dir::Left) == inx {
            Dir::Left
        } else {
            Dir::Right
        }
    }

    /// Yields a slot for a fresh node: the smallest tombstoned index if any
    /// are queued, otherwise a slot appended to the arena. The new node
    /// starts detached with both children `NIL`.
    pub(crate) fn allocate(&mut self, k: K, v: V, color: Color) -> usize {
        let node = Node {
            k,
            v,
            p_back: NIL,
            p_tree: [NIL, NIL],
            color,
        };
        match self.free.pop() {
            Ok(inx) => {
                self.slots[inx] = Entry::Live(node);
                inx
            }
            Err(_) => {
                self.slots.push(Entry::Live(node));
                self.slots.len() - 1
            }
        }
    }

    /// Rotates at `root` so that its `dir.flip()` child rises into its
    /// place; `rotate(x, Dir::Left)` is the classic left-rotation. Returns
    /// the risen index. Rotations preserve the in-order sequence and never
    /// move or free slots.
    ///
    /// # Panics
    ///
    /// Panics if there is no child to rise; the balancing cases only request
    /// rotations whose pivot exists, so this is an invariant breakage.
    pub(crate) fn rotate(&mut self, root: usize, dir: Dir) -> usize {
        let rise = self.child(root, dir.flip());
        assert_ne!(rise, NIL, "rotation with no child to rise");
        let transfer = self.child(rise, dir);
        let p_back = self.parent(root);

        if p_back == NIL {
            self.root = rise;
        } else {
            let d = self.dir_of(p_back, root);
            self.set_child(p_back, d, rise);
        }
        self.node_mut(rise).p_back = p_back;
        self.set_child(rise, dir, root);
        self.node_mut(root).p_back = rise;
        self.set_child(root, dir.flip(), transfer);
        if transfer != NIL {
            self.node_mut(transfer).p_back = root;
        }
        rise
    }
}

impl<K: Ord, V> Default for RbArena<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Implemented if `K: Clone` and `V: Clone`. Clones preserve slot
/// assignment, not just contents.
impl<K: Clone, V: Clone, C: Clone> Clone for RbArena<K, V, C> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            root: self.root,
            len: self.len,
            free: self.free.clone(),
            cmp: self.cmp.clone(),
        }
    }
}

impl<K: Debug, V: Debug, C: Compare<K>> Debug for RbArena<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Checks that all live key-value pairs are equal under the in-order walk.
/// Slot assignment, capacity, and tombstones are not compared.
impl<K: PartialEq, V: PartialEq, C: Compare<K>> PartialEq for RbArena<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        if self.len != other.len {
            return false
        }
        self.iter_ordered().eq(other.iter_ordered())
    }
}

impl<K: Eq, V: Eq, C: Compare<K>> Eq for RbArena<K, V, C> {}
