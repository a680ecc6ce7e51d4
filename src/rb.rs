mod find;
mod insert;
mod rb_arena;
mod remove;

pub use rb_arena::{Color, RbArena};
pub(crate) use rb_arena::{Dir, Entry, NIL};
