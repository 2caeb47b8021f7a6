//! B-tree index implementation.
//!
//! An in-memory B-tree: an ordered, self-balancing multiway search
//! tree with all leaves at equal depth and node fan-out bounded by a
//! configured order.
//!
//! # Layout
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      BTree (tree.rs)                     │
//! │   create / insert / delete / search drivers + lifecycle  │
//! ├──────────────────────────────────────────────────────────┤
//! │                      Node (node.rs)                      │
//! │   bounded key/child arrays + split / borrow / merge      │
//! ├──────────────────────────────────────────────────────────┤
//! │                   BTreeStats (stats.rs)                  │
//! │   rebalancing counters (splits, merges, rotations)       │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Insert and delete are single top-down passes: each establishes the
//! occupancy precondition the next level needs before descending, so
//! neither ever walks back up to repair an ancestor.

mod node;
mod stats;
mod tree;

pub use node::{Node, NodeKind};
pub use stats::BTreeStats;
pub use tree::BTree;
