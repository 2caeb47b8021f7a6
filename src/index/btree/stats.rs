//! B-tree rebalancing statistics.

use std::fmt;

/// Counters for the structural operations the tree performs while
/// rebalancing.
///
/// The tree is single-threaded by contract, so plain integers suffice
/// (no atomics needed). Counters only ever grow; use [`BTreeStats::reset`]
/// to start a fresh measurement window.
///
/// # Example
/// ```
/// use fanout::BTree;
///
/// let mut tree = BTree::new(4).unwrap();
/// for key in [10, 20, 5, 6, 12] {
///     tree.insert(key).unwrap();
/// }
/// // The 5th insert overflows the root and forces a split.
/// assert_eq!(tree.stats().splits, 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BTreeStats {
    /// Number of node splits (one median promoted per split).
    pub splits: u64,

    /// Number of sibling merges (inverse of a split).
    pub merges: u64,

    /// Number of borrow rotations: a single key (and child, for
    /// internal nodes) moved through a parent separator.
    pub rotations: u64,
}

impl BTreeStats {
    /// Create a new stats block with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for BTreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ splits: {}, merges: {}, rotations: {} }}",
            self.splits, self.merges, self.rotations
        )
    }
}
