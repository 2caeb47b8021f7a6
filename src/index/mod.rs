//! Index structures.
//!
//! Currently a single ordered index: the in-memory B-tree in [`btree`].

pub mod btree;

pub use btree::{BTree, BTreeStats, Node, NodeKind};
