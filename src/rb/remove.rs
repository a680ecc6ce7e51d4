use core::mem;

use super::rb_arena::{Color, Dir, Entry, NIL};
use crate::{Compare, Error, RbArena};

impl<K, V, C: Compare<K>> RbArena<K, V, C> {
    /// Removes the live entry for `k` and returns its value. The vacated
    /// slot is tombstoned and its index queued for reuse; subsequent `get`s
    /// of `k` fail until it is reinserted.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if there is no live entry for `k`
    pub fn remove(&mut self, k: &K) -> Result<V, Error> {
        let found = self.find(k)?;
        // a victim with two subtrees trades payload with its in-order
        // predecessor (the rightmost descendant of its left subtree), which
        // by construction has at most one child; that slot is the one
        // physically removed
        let target = if (self.child(found, Dir::Left) != NIL)
            && (self.child(found, Dir::Right) != NIL)
        {
            let pred = self.farthest(self.child(found, Dir::Left), Dir::Right);
            self.swap_payload(found, pred);
            pred
        } else {
            found
        };

        let child = {
            let tree0 = self.child(target, Dir::Left);
            if tree0 != NIL {
                tree0
            } else {
                self.child(target, Dir::Right)
            }
        };

        if self.color_of(target) == Color::Black {
            if self.color_of(child) == Color::Red {
                // the red child takes over the removed black
                self.set_color(child, Color::Black);
            } else {
                // the replacement is `NIL`; fix the double black while the
                // target is still attached
                self.remove_fixup(target);
            }
        }

        // splice the target out
        let p_back = self.parent(target);
        if p_back == NIL {
            self.root = child;
        } else {
            let d = self.dir_of(p_back, target);
            self.set_child(p_back, d, child);
        }
        if child != NIL {
            self.node_mut(child).p_back = p_back;
        }

        let node = match mem::replace(&mut self.slots[target], Entry::Tomb) {
            Entry::Live(node) => node,
            _ => unreachable!("removal target was not live"),
        };
        self.free.push(target);
        self.len -= 1;
        Ok(node.v)
    }

    /// Swaps the key and value payloads of two distinct live slots, leaving
    /// links and colors in place
    fn swap_payload(&mut self, x: usize, y: usize) {
        let (low, high) = if x < y { (x, y) } else { (y, x) };
        let (head, tail) = self.slots.split_at_mut(high);
        match (&mut head[low], &mut tail[0]) {
            (Entry::Live(n0), Entry::Live(n1)) => {
                mem::swap(&mut n0.k, &mut n1.k);
                mem::swap(&mut n0.v, &mut n1.v);
            }
            _ => unreachable!("payload swap on nonlive slots"),
        }
    }

    /// Double-black fix-up, run while the removal target is still attached;
    /// `me` always carries the missing black. Cases are sibling-relative and
    /// symmetric over which side of its parent `me` hangs on.
    fn remove_fixup(&mut self, mut me: usize) {
        loop {
            let p_back = self.parent(me);
            // case 1: the deficit reached the root and vanishes
            if p_back == NIL {
                return
            }
            let d = self.dir_of(p_back, me);
            let mut sibling = self.child(p_back, d.flip());
            // a missing sibling cannot donate a black; continue above (the
            // sentinel is never recolored)
            if sibling == NIL {
                me = p_back;
                continue
            }
            if self.color_of(sibling) == Color::Red {
                // case 2: red sibling. Trade colors with the parent and
                // rotate it toward us so the new sibling is black
                self.set_color(p_back, Color::Red);
                self.set_color(sibling, Color::Black);
                self.rotate(p_back, d);
                sibling = self.child(p_back, d.flip());
            }
            let near = self.child(sibling, d);
            let far = self.child(sibling, d.flip());
            if (self.color_of(sibling) == Color::Black)
                && (self.color_of(near) == Color::Black)
                && (self.color_of(far) == Color::Black)
            {
                if self.color_of(p_back) == Color::Black {
                    // case 3: everything black, push the deficit up
                    self.set_color(sibling, Color::Red);
                    me = p_back;
                    continue
                }
                // case 4: a red parent absorbs the deficit
                self.set_color(sibling, Color::Red);
                self.set_color(p_back, Color::Black);
                return
            }
            let (sibling, far) = if (self.color_of(near) == Color::Red)
                && (self.color_of(far) == Color::Black)
            {
                // case 5: promote the near nephew so that case 6 sees a red
                // far nephew
                self.set_color(sibling, Color::Red);
                self.set_color(near, Color::Black);
                let s = self.rotate(sibling, d.flip());
                (s, self.child(s, d.flip()))
            } else {
                (sibling, far)
            };
            // case 6: the sibling takes the parent's color and a black moves
            // over to our side through the rotation
            self.set_color(sibling, self.color_of(p_back));
            self.set_color(p_back, Color::Black);
            self.set_color(far, Color::Black);
            self.rotate(p_back, d);
            return
        }
    }
}
