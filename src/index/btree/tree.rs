//! The B-tree itself: configuration, lifecycle, and the public
//! insert/delete/search surface.

use std::fmt;

use crate::common::config::{self, DEFAULT_ORDER, MIN_ORDER};
use crate::common::{Error, Key, Result};
use crate::index::btree::{BTreeStats, Node, NodeKind};

/// An ordered, self-balancing multiway search tree.
///
/// All leaves sit at the same depth and every node's fan-out is bounded
/// by the configured order, which keeps search, insert and delete at
/// O(log n). The tree exclusively owns its root; each internal node
/// exclusively owns its children. Dropping the tree releases every node
/// (no explicit destroy call needed).
///
/// # Occupancy invariant
/// With minimum degree `t = ceil(order/2)`, every node holds at most
/// `2t - 1` keys and every non-root node at least `t - 1`. Inserts
/// re-establish the invariant by splitting full nodes on the way down;
/// deletes by borrowing from or merging with siblings on the way down.
/// Neither ever backtracks.
///
/// # Threading
/// All operations are synchronous and non-yielding; the tree is
/// single-threaded by design. Wrap it in an exclusive lock if it must
/// be shared.
///
/// # Example
/// ```
/// use fanout::{BTree, Error};
///
/// let mut tree = BTree::new(4)?;
/// tree.insert(7)?;
/// tree.insert(3)?;
/// assert!(tree.contains(7));
/// assert_eq!(tree.insert(7), Err(Error::DuplicateKey(7)));
///
/// tree.delete(3)?;
/// assert_eq!(tree.delete(3), Err(Error::KeyNotFound(3)));
/// # Ok::<(), fanout::Error>(())
/// ```
pub struct BTree {
    /// Exclusively owned root; a lone empty leaf for an empty tree.
    root: Box<Node>,

    /// Configured order (immutable after construction).
    order: usize,

    /// Cached minimum degree `t = ceil(order/2)`.
    min_degree: usize,

    /// Number of keys currently stored.
    len: usize,

    /// Rebalancing counters.
    stats: BTreeStats,
}

impl BTree {
    /// Create an empty tree of the given order.
    ///
    /// # Errors
    /// `Error::InvalidOrder` if `order < 3` — below that a node cannot
    /// hold a median to promote, so the tree could never split.
    pub fn new(order: usize) -> Result<Self> {
        if order < MIN_ORDER {
            return Err(Error::InvalidOrder(order));
        }
        let min_degree = config::min_degree(order);
        Ok(Self {
            root: Box::new(Node::new(NodeKind::Leaf, min_degree)),
            order,
            min_degree,
            len: 0,
            stats: BTreeStats::new(),
        })
    }

    // ========================================================================
    // Public API: mutation
    // ========================================================================

    /// Insert `key` into the tree.
    ///
    /// A full root is split through a fresh internal root before the
    /// descent begins — the only way the tree grows in height, and it
    /// always happens at the root. The descent then splits any full
    /// child before entering it, so the recursion only ever inserts
    /// into non-full nodes.
    ///
    /// # Errors
    /// `Error::DuplicateKey` if `key` is already present. The key
    /// sequence is unchanged in that case (preparatory splits along the
    /// probe path may have occurred; they never move a key out of order
    /// or below the floor).
    pub fn insert(&mut self, key: Key) -> Result<()> {
        let t = self.min_degree;
        if self.root.is_full(t) {
            let placeholder = Box::new(Node::new(NodeKind::Leaf, t));
            let old_root = std::mem::replace(&mut self.root, placeholder);
            self.root = Node::new_root_above(old_root, t, &mut self.stats);
        }
        self.root.insert_non_full(key, t, &mut self.stats)?;
        self.len += 1;
        Ok(())
    }

    /// Delete `key` from the tree.
    ///
    /// A single top-down pass that tops up every child to at least `t`
    /// keys (borrowing from a sibling, or merging when no sibling has
    /// surplus) before descending into it, so removal never leaves a
    /// node under-full. If a merge empties the root, its single
    /// remaining child becomes the new root — the only way the tree
    /// shrinks in height.
    ///
    /// # Errors
    /// `Error::KeyNotFound` if `key` is not present; the tree is left
    /// exactly as it was.
    pub fn delete(&mut self, key: Key) -> Result<()> {
        let t = self.min_degree;
        self.root.remove(key, t, &mut self.stats)?;
        self.len -= 1;

        if let Some(child) = self.root.take_sole_child() {
            self.root = child;
        }
        Ok(())
    }

    // ========================================================================
    // Public API: lookup and inspection
    // ========================================================================

    /// Find the node holding `key`, or `None` if absent.
    ///
    /// Read-only: repeated searches return identical results and never
    /// touch the structure.
    pub fn search(&self, key: Key) -> Option<&Node> {
        self.root.search(key)
    }

    /// Whether `key` is present.
    pub fn contains(&self, key: Key) -> bool {
        self.search(key).is_some()
    }

    /// Number of keys stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The configured order.
    pub fn order(&self) -> usize {
        self.order
    }

    /// The minimum degree `t` derived from the order.
    pub fn min_degree(&self) -> usize {
        self.min_degree
    }

    /// Number of levels, counting the root; an empty tree has height 1.
    pub fn height(&self) -> usize {
        self.root.height()
    }

    /// The root node, for structural inspection.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// All keys in sorted order.
    ///
    /// A full in-order dump for diagnostics and verification, not a
    /// range-scan API: it always walks the entire tree.
    pub fn keys(&self) -> Vec<Key> {
        let mut out = Vec::with_capacity(self.len);
        self.root.collect_keys(&mut out);
        out
    }

    /// Snapshot of the rebalancing counters.
    pub fn stats(&self) -> BTreeStats {
        self.stats
    }

    /// Reset the rebalancing counters to zero.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Verify every structural invariant of the tree.
    ///
    /// Walks the whole tree checking occupancy bounds, strict key
    /// ordering within and across nodes (via separator ranges),
    /// leaf/child consistency and uniform leaf depth. Returns a
    /// description of the first violation found. Intended for tests and
    /// debugging; O(n).
    pub fn check_invariants(&self) -> std::result::Result<(), String> {
        self.root
            .check_subtree(self.min_degree, true, None, None)
            .map(|_| ())
    }
}

impl Default for BTree {
    /// An empty tree of [`DEFAULT_ORDER`].
    fn default() -> Self {
        match Self::new(DEFAULT_ORDER) {
            Ok(tree) => tree,
            // DEFAULT_ORDER >= MIN_ORDER, checked in config tests.
            Err(_) => unreachable!("default order is valid"),
        }
    }
}

impl fmt::Display for BTree {
    /// One line per node, indented by depth, top to bottom.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "BTree(order={}, t={}, len={}, height={})",
            self.order,
            self.min_degree,
            self.len,
            self.height()
        )?;
        self.root.fmt_subtree(f, 0)
    }
}

impl fmt::Debug for BTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BTree")
            .field("order", &self.order)
            .field("min_degree", &self.min_degree)
            .field("len", &self.len)
            .field("height", &self.height())
            .finish()
    }
}
