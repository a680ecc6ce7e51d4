use core::{cmp::Ordering, mem};

use super::rb_arena::{Color, Dir, NIL};
use crate::{Compare, RbArena};

impl<K, V, C: Compare<K>> RbArena<K, V, C> {
    /// Inserts `k → v`.
    ///
    /// If `k` is already present its value is overwritten and returned, and
    /// the tree structure is untouched. Otherwise a red leaf is attached
    /// where the comparator descent ends, the red-black invariants are
    /// restored, and `None` is returned. Recycled slots are consumed
    /// smallest index first before the arena grows.
    pub fn put(&mut self, k: K, v: V) -> Option<V> {
        if self.root == NIL {
            let inx = self.allocate(k, v, Color::Black);
            self.root = inx;
            self.len += 1;
            return None
        }
        let mut curr = self.root;
        loop {
            let dir = match self.cmp.compare(&k, &self.node(curr).k) {
                Ordering::Equal => {
                    return Some(mem::replace(&mut self.node_mut(curr).v, v))
                }
                Ordering::Less => Dir::Left,
                Ordering::Greater => Dir::Right,
            };
            let next = self.child(curr, dir);
            if next == NIL {
                let child = self.allocate(k, v, Color::Red);
                self.set_child(curr, dir, child);
                self.node_mut(child).p_back = curr;
                self.len += 1;
                self.insert_fixup(child);
                return None
            }
            curr = next;
        }
    }

    /// Restores the red-black invariants after attaching the red leaf `me`.
    /// The root may transiently go red while recoloring walks upward, but it
    /// is black again on return.
    fn insert_fixup(&mut self, mut me: usize) {
        loop {
            let p_back = self.parent(me);
            // case 1: the root is simply recolored
            if p_back == NIL {
                self.set_color(me, Color::Black);
                return
            }
            // case 2: a black parent absorbs the new red
            if self.color_of(p_back) == Color::Black {
                return
            }
            // the parent is red, so it is not the root and the grandparent
            // exists
            let grand = self.parent(p_back);
            let d = self.dir_of(grand, p_back);
            let uncle = self.child(grand, d.flip());
            if self.color_of(uncle) == Color::Red {
                // case 3: red uncle, recolor and reexamine the grandparent
                self.set_color(p_back, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grand, Color::Red);
                me = grand;
                continue
            }
            // case 4: an inner grandchild rotates out to its parent's place
            // so that case 5 always sees the outer shape
            let mut parent = p_back;
            if self.dir_of(p_back, me) != d {
                self.rotate(p_back, d);
                parent = me;
            }
            // case 5: outer grandchild, the parent takes the grandparent's
            // place and color
            self.set_color(parent, Color::Black);
            self.set_color(grand, Color::Red);
            self.rotate(grand, d.flip());
            return
        }
    }
}
