use thiserror::Error;

/// Errors surfaced by the containers in this crate.
///
/// Everything here is reported immediately and locally; nothing is retried or
/// recovered internally. Conditions that can only arise from a broken
/// invariant (such as a rotation with no pivot child, or an alphabet mapper
/// returning an out-of-range index) are programming errors and panic instead
/// of appearing here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// `pop` or `peek` on a heap with no elements
    #[error("the heap is empty")]
    EmptyHeap,
    /// `root` on a tree with no live nodes
    #[error("the tree is empty")]
    EmptyTree,
    /// No live entry for the requested key
    #[error("not found the key")]
    NotFound,
    /// A lookup landed on a tombstoned slot awaiting reuse
    #[error("the key has been deleted")]
    Deleted,
    /// Patterns cannot be added to a trie after `optimize` has run
    #[error("the trie has already been optimized")]
    AlreadyOptimized,
}
