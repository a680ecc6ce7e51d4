use alloc::{vec, vec::Vec};

use crate::Error;

/// A vertex of the pattern trie
#[derive(Clone)]
struct Vertex {
    /// Child indices over the alphabet; `0` means no child
    transition: Vec<usize>,
    /// Nonzero marks a pattern terminus (it holds the vertex's own index)
    escape: usize,
    /// Zero until the failure-transition pass populates it
    #[allow(dead_code)]
    suffix_link: usize,
}

impl Vertex {
    fn new(range: usize) -> Self {
        Vertex {
            transition: vec![0; range],
            escape: 0,
            suffix_link: 0,
        }
    }
}

/// An Aho-Corasick pattern trie over an append-only vertex arena.
///
/// Each vertex carries a fixed-width transition vector over an alphabet of
/// `range` symbols; the caller supplies the injection from `char` into
/// `[0, range)`. Vertex 0 is the root and doubles as the "absent child"
/// sentinel, so the arena is never empty and vertices are never freed.
///
/// Only pattern insertion is implemented; suffix links and matching are
/// reserved for the [`AhoCorasick::optimize`] pass, which today just freezes
/// the trie. Insertion is `O(|pattern|)`.
///
/// ```
/// use redblack_arena::{AhoCorasick, Error};
///
/// let lowercase = |c: char, _range: usize| (c as usize) - ('a' as usize);
/// let mut trie = AhoCorasick::new(26, lowercase);
/// trie.build(["he", "she", "his", "hers"]).unwrap();
///
/// assert!(trie.contains("his"));
/// assert!(!trie.contains("her")); // a prefix, not an inserted pattern
///
/// trie.optimize();
/// assert_eq!(trie.build(["more"]), Err(Error::AlreadyOptimized));
/// ```
pub struct AhoCorasick<I> {
    verts: Vec<Vertex>,
    range: usize,
    optimized: bool,
    index: I,
}

impl<I: Fn(char, usize) -> usize> AhoCorasick<I> {
    /// Returns an empty trie over an alphabet of `range` symbols mapped by
    /// `index`
    pub fn new(range: usize, index: I) -> Self {
        Self::with_capacity(range, 0, index)
    }

    /// [`AhoCorasick::new`] with the vertex capacity set to at least
    /// `capacity`
    pub fn with_capacity(range: usize, capacity: usize, index: I) -> Self {
        let mut verts = Vec::with_capacity(capacity.max(1));
        verts.push(Vertex::new(range));
        Self {
            verts,
            range,
            optimized: false,
            index,
        }
    }

    /// Returns the number of vertices in the arena, the root included
    pub fn vertex_count(&self) -> usize {
        self.verts.len()
    }

    /// Returns the alphabet size the trie was configured with
    pub fn range(&self) -> usize {
        self.range
    }

    /// Returns if [`AhoCorasick::optimize`] has run
    pub fn is_optimized(&self) -> bool {
        self.optimized
    }

    /// Inserts each pattern as a path from the root, allocating vertices for
    /// transitions that do not exist yet, and marks the last vertex of each
    /// pattern as an accepting terminus. Inserting a pattern twice re-marks
    /// the same terminus and allocates nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyOptimized`] if [`AhoCorasick::optimize`] has
    /// run; the trie is untouched in that case.
    ///
    /// # Panics
    ///
    /// Panics if the alphabet mapper sends a `char` out of `[0, range)`;
    /// characters are never silently dropped.
    pub fn build<'a, P: IntoIterator<Item = &'a str>>(&mut self, patterns: P) -> Result<(), Error> {
        if self.optimized {
            return Err(Error::AlreadyOptimized)
        }
        for pattern in patterns {
            let mut vertex = 0;
            for c in pattern.chars() {
                let leaf = self.leaf_of(c);
                vertex = match self.verts[vertex].transition[leaf] {
                    0 => {
                        let next = self.verts.len();
                        let new = Vertex::new(self.range);
                        self.verts.push(new);
                        self.verts[vertex].transition[leaf] = next;
                        next
                    }
                    next => next,
                };
            }
            self.verts[vertex].escape = vertex;
        }
        Ok(())
    }

    /// Freezes the trie against further [`AhoCorasick::build`] calls.
    /// Idempotent.
    // TODO compute suffix links and failure transitions in BFS order so the
    // trie can stream-match; `Vertex::suffix_link` is already reserved
    pub fn optimize(&mut self) {
        self.optimized = true;
    }

    /// Walks `pattern` through the transitions and reports whether it was
    /// inserted as a whole pattern (prefixes of inserted patterns do not
    /// count)
    pub fn contains(&self, pattern: &str) -> bool {
        self._terminus_of(pattern).is_some()
    }

    /// Used by tests to observe terminus assignment
    #[doc(hidden)]
    pub fn _terminus_of(&self, pattern: &str) -> Option<usize> {
        let mut vertex = 0;
        for c in pattern.chars() {
            let leaf = self.leaf_of(c);
            match self.verts[vertex].transition[leaf] {
                0 => return None,
                next => vertex = next,
            }
        }
        if (vertex != 0) && (self.verts[vertex].escape == vertex) {
            Some(vertex)
        } else {
            None
        }
    }

    fn leaf_of(&self, c: char) -> usize {
        let leaf = (self.index)(c, self.range);
        assert!(
            leaf < self.range,
            "alphabet index {leaf} out of range {}",
            self.range
        );
        leaf
    }
}
