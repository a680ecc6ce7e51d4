#![no_std]
// all interlinks are plain indices into arena `Vec`s, so nothing here needs
// unsafe code
#![deny(unsafe_code)]

//! Arena-backed containers: an ordered map realized as a red-black tree with
//! integrated slot recycling ([`RbArena`]), the binary [`Heap`] that doubles
//! as its free-slot recycler, and an [`AhoCorasick`] pattern-trie skeleton.

mod compare;
mod error;
mod heap;
pub mod iterators;
mod rb;
#[cfg(feature = "serde_support")]
mod serde_support;
mod trie;

pub use compare::{Ascending, CmpFn, Compare, Descending};
pub use error::Error;
pub use heap::Heap;
pub use rb::{Color, RbArena};
pub use trie::AhoCorasick;

extern crate alloc;
