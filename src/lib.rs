//! Fanout - an in-memory B-tree index with configurable node fan-out.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                        Fanout                           │
//! ├─────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────┐   │
//! │  │              Index Layer (index/)               │   │
//! │  │   BTree driver: insert / delete / search        │   │
//! │  │   Node operators: split / borrow / merge        │   │
//! │  │   BTreeStats: rebalancing counters              │   │
//! │  └─────────────────────────────────────────────────┘   │
//! │                          ↓                              │
//! │  ┌─────────────────────────────────────────────────┐   │
//! │  │             Common Layer (common/)              │   │
//! │  │   Key + Error/Result + order/degree bounds      │   │
//! │  └─────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! A B-tree of order `m` keeps every node's fan-out at or below `m`
//! and every non-root node's key count at or above `t - 1`, where
//! `t = ceil(m/2)` is the minimum degree. All leaves sit at the same
//! depth, which bounds every operation at O(log n). The invariant is
//! re-established after every mutation through node splitting, key
//! promotion, key borrowing, and node merging — all performed on the
//! way down, never by backtracking.
//!
//! # Modules
//! - [`common`] - Shared primitives (Key, Error, order/degree bounds)
//! - [`index`] - Index structures (B-tree)
//!
//! # Quick Start
//! ```
//! use fanout::BTree;
//!
//! let mut tree = BTree::new(4).unwrap();
//! for key in [10, 20, 5, 6, 12, 30, 7, 17] {
//!     tree.insert(key).unwrap();
//! }
//!
//! assert!(tree.contains(12));
//! assert_eq!(tree.keys(), vec![5, 6, 7, 10, 12, 17, 20, 30]);
//!
//! tree.delete(6).unwrap();
//! assert!(!tree.contains(6));
//! ```

// Core modules
pub mod common;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_ORDER, MIN_ORDER};
pub use common::{Error, Key, Result};

pub use index::btree::{BTree, BTreeStats, Node, NodeKind};
