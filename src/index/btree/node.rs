//! B-tree node representation and the structural operators.
//!
//! A node is a bounded, ordered run of keys plus (for internal nodes)
//! one child per key gap. All rebalancing is built from three operators
//! defined here:
//!
//! - [`Node::split_child`] — divide a full child around its median,
//!   promoting the median into this node,
//! - `borrow_from_left` / `borrow_from_right` — rotate one key (and
//!   child) through a parent separator,
//! - `merge_children` — fuse two floor-occupancy siblings and their
//!   separator back into one node (the inverse of a split).
//!
//! The insert/delete drivers in this file are *top-down*: they establish
//! the precondition a lower level needs (non-full for insert, above the
//! floor for delete) before descending, and never backtrack.
//!
//! All arithmetic runs on the minimum degree `t`:
//! - full node: `2t - 1` keys,
//! - floor for non-root nodes: `t - 1` keys.

use std::cmp::Ordering;
use std::fmt;

use crate::common::{Error, Key, Result};
use crate::index::btree::BTreeStats;

/// Whether a node sits at the bottom of the tree.
///
/// Leaves hold keys only; internal nodes hold keys and `keys + 1`
/// children. The tag (rather than `children.is_empty()`) distinguishes
/// an internal node that is transiently empty during a root collapse
/// from a genuine leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Bottom-level node; never holds children.
    Leaf,
    /// Inner node; holds `keys.len() + 1` children.
    Internal,
}

/// A single B-tree node.
///
/// # Invariants
/// - `keys` is strictly increasing (no duplicates).
/// - `keys.len() <= 2t - 1`; every non-root node keeps `keys.len() >= t - 1`.
/// - Leaf: `children` is empty. Internal: `children.len() == keys.len() + 1`.
/// - `children[i]` holds only keys `< keys[i]`; `children[i + 1]` only
///   keys `> keys[i]` (strict separator property).
///
/// Capacity for the full `2t - 1` keys (and `2t` children) is reserved
/// at construction, so a node never reallocates during rebalancing.
#[derive(Debug)]
pub struct Node {
    kind: NodeKind,
    keys: Vec<Key>,
    children: Vec<Box<Node>>,
}

impl Node {
    /// Create an empty node for a tree of minimum degree `t`.
    pub(crate) fn new(kind: NodeKind, t: usize) -> Self {
        let child_capacity = match kind {
            NodeKind::Leaf => 0,
            NodeKind::Internal => 2 * t,
        };
        Self {
            kind,
            keys: Vec::with_capacity(2 * t - 1),
            children: Vec::with_capacity(child_capacity),
        }
    }

    // ========================================================================
    // Read-only accessors
    // ========================================================================

    /// The node's kind tag.
    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Whether this node is a leaf.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.kind == NodeKind::Leaf
    }

    /// The node's keys, in strictly increasing order.
    #[inline]
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Number of keys currently held.
    #[inline]
    pub fn num_keys(&self) -> usize {
        self.keys.len()
    }

    /// Number of children currently held (0 for leaves).
    #[inline]
    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    /// Borrow the `index`-th child, if any.
    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index).map(|c| c.as_ref())
    }

    /// Whether the node holds its maximum of `2t - 1` keys.
    #[inline]
    pub(crate) fn is_full(&self, t: usize) -> bool {
        self.keys.len() == 2 * t - 1
    }

    // ========================================================================
    // Search (read-only, no invariant maintenance)
    // ========================================================================

    /// Multiway descent for `key`.
    ///
    /// At each node, binary search for the smallest slot whose key is
    /// `>= key`; on an exact hit the current node is the answer, else
    /// the search continues into the child guarding that gap.
    pub(crate) fn search(&self, key: Key) -> Option<&Node> {
        match self.keys.binary_search(&key) {
            Ok(_) => Some(self),
            Err(index) => {
                if self.is_leaf() {
                    None
                } else {
                    self.children[index].search(key)
                }
            }
        }
    }

    // ========================================================================
    // Split operator
    // ========================================================================

    /// Split the full child at `index`, promoting its median key.
    ///
    /// ```text
    ///        parent: [.. P ..]                 parent: [.. P  M ..]
    ///                  |              =>                 |    \
    ///   full: [a b c  M  x y z]           full: [a b c]  sib: [x y z]
    /// ```
    ///
    /// The upper `t - 1` keys (and upper `t` children, when internal)
    /// move to a fresh sibling of the same kind; the median `M` (key
    /// `t - 1`) is inserted into this node at `index`, with the sibling
    /// linked at `index + 1`. Both halves end at exactly `t - 1` keys.
    ///
    /// Purely positional: no key comparison happens during a split.
    ///
    /// Precondition (caller-enforced, checked in debug builds): the
    /// child at `index` holds exactly `2t - 1` keys.
    pub(crate) fn split_child(&mut self, index: usize, t: usize, stats: &mut BTreeStats) {
        debug_assert_eq!(self.kind, NodeKind::Internal);
        debug_assert!(
            self.children[index].is_full(t),
            "split_child requires a full child"
        );

        let full = &mut self.children[index];
        let mut sibling = Box::new(Node::new(full.kind, t));

        // Upper t - 1 keys (indices t..2t-1) move to the sibling.
        sibling.keys.extend(full.keys.drain(t..));
        if full.kind == NodeKind::Internal {
            // Upper t children go with them.
            sibling.children.extend(full.children.drain(t..));
        }

        // The median (now the last key of the lower half) is promoted.
        let median = full.keys.remove(t - 1);
        self.keys.insert(index, median);
        self.children.insert(index + 1, sibling);

        stats.splits += 1;
    }

    /// Build a new root above a full old root and split it.
    ///
    /// The returned node is internal with one promoted key and two
    /// children. This is the only way the tree grows in height.
    pub(crate) fn new_root_above(
        old_root: Box<Node>,
        t: usize,
        stats: &mut BTreeStats,
    ) -> Box<Node> {
        debug_assert!(old_root.is_full(t));

        let mut root = Box::new(Node::new(NodeKind::Internal, t));
        root.children.push(old_root);
        root.split_child(0, t, stats);
        root
    }

    /// If this node holds no keys and exactly one child, detach that
    /// child so it can take over as root.
    ///
    /// A merge of the root's last two children leaves the root in this
    /// state; collapsing it is the only way the tree shrinks in height.
    pub(crate) fn take_sole_child(&mut self) -> Option<Box<Node>> {
        if self.keys.is_empty() && self.children.len() == 1 {
            Some(self.children.remove(0))
        } else {
            None
        }
    }

    // ========================================================================
    // Insert driver (top-down, never backtracks)
    // ========================================================================

    /// Insert `key` somewhere below this node, which must not be full.
    ///
    /// At a leaf the key is placed into its gap directly. At an
    /// internal node, the target child is split first if it is full —
    /// so the recursion always enters a non-full node — and the descent
    /// re-aims against the freshly promoted separator.
    ///
    /// Duplicates are rejected at whichever level they surface:
    /// the binary search per node doubles as the duplicate check.
    pub(crate) fn insert_non_full(
        &mut self,
        key: Key,
        t: usize,
        stats: &mut BTreeStats,
    ) -> Result<()> {
        debug_assert!(!self.is_full(t), "insert_non_full requires a non-full node");

        let mut index = match self.keys.binary_search(&key) {
            Ok(_) => return Err(Error::DuplicateKey(key)),
            Err(index) => index,
        };

        if self.is_leaf() {
            // Terminal case: shift the upper keys right and drop the
            // new key into its gap.
            self.keys.insert(index, key);
            return Ok(());
        }

        if self.children[index].is_full(t) {
            self.split_child(index, t, stats);
            // The promoted median landed at `index`; re-aim the descent
            // against it to pick the correct post-split half.
            match key.cmp(&self.keys[index]) {
                Ordering::Equal => return Err(Error::DuplicateKey(key)),
                Ordering::Greater => index += 1,
                Ordering::Less => {}
            }
        }

        self.children[index].insert_non_full(key, t, stats)
    }

    // ========================================================================
    // Delete driver (top-down, visited node always above the floor)
    // ========================================================================

    /// Remove `key` from the subtree rooted here.
    ///
    /// The driver maintains one invariant along the descent: every node
    /// it enters holds at least `t` keys (the root is exempt), so a key
    /// can be removed — or the recursion pushed one level deeper —
    /// without ever dropping a node below the `t - 1` floor.
    pub(crate) fn remove(&mut self, key: Key, t: usize, stats: &mut BTreeStats) -> Result<()> {
        match self.keys.binary_search(&key) {
            Ok(index) => {
                if self.is_leaf() {
                    // Leaf hit: shift the upper keys left over the gap.
                    self.keys.remove(index);
                    Ok(())
                } else {
                    self.remove_separator(index, t, stats)
                }
            }
            Err(index) => {
                if self.is_leaf() {
                    // Bottom reached without a hit: the key is absent.
                    return Err(Error::KeyNotFound(key));
                }
                // Top-up the target child before entering it. The child
                // index may shift left when a merge folds it into its
                // left sibling.
                let index = if self.children[index].num_keys() == t - 1 {
                    self.refill_child(index, t, stats)
                } else {
                    index
                };
                self.children[index].remove(key, t, stats)
            }
        }
    }

    /// Remove the separator at `index` of this internal node.
    ///
    /// The separator cannot simply be shifted out: its two children
    /// need a new separator between them. Three cases, in order:
    /// 1. the left child has `>= t` keys — replace the separator with
    ///    its predecessor (the left subtree's maximum) and delete that
    ///    key from the left child;
    /// 2. the right child has `>= t` keys — symmetric, successor;
    /// 3. both children sit on the floor — merge them with the
    ///    separator into one node and delete the key from the merge.
    fn remove_separator(&mut self, index: usize, t: usize, stats: &mut BTreeStats) -> Result<()> {
        let key = self.keys[index];

        if self.children[index].num_keys() >= t {
            let predecessor = self.children[index].max_key();
            self.keys[index] = predecessor;
            self.children[index].remove(predecessor, t, stats)
        } else if self.children[index + 1].num_keys() >= t {
            let successor = self.children[index + 1].min_key();
            self.keys[index] = successor;
            self.children[index + 1].remove(successor, t, stats)
        } else {
            // Both children at t - 1: the merged node holds 2t - 1 keys
            // including `key` itself, and stays at position `index`.
            self.merge_children(index, t, stats);
            self.children[index].remove(key, t, stats)
        }
    }

    /// Bring the floor-occupancy child at `index` up to `t` keys.
    ///
    /// Borrowing is preferred over merging (it is O(1) and keeps the
    /// tree taller but fuller); between two lendable siblings the one
    /// with strictly more keys wins, and a tie goes left for
    /// determinism. Only when neither sibling has surplus are child and
    /// sibling merged.
    ///
    /// Returns the child's index after the fix-up: unchanged for a
    /// borrow or a right-merge, `index - 1` when the child was folded
    /// into its left sibling.
    fn refill_child(&mut self, index: usize, t: usize, stats: &mut BTreeStats) -> usize {
        debug_assert_eq!(self.children[index].num_keys(), t - 1);

        let left_keys = if index > 0 {
            self.children[index - 1].num_keys()
        } else {
            0
        };
        let right_keys = if index + 1 < self.children.len() {
            self.children[index + 1].num_keys()
        } else {
            0
        };

        if left_keys >= t && left_keys >= right_keys {
            self.borrow_from_left(index, stats);
            index
        } else if right_keys >= t {
            self.borrow_from_right(index, stats);
            index
        } else if index > 0 {
            // No surplus anywhere: fold into the left sibling.
            self.merge_children(index - 1, t, stats);
            index - 1
        } else {
            // Leftmost child: fold the right sibling into it.
            self.merge_children(index, t, stats);
            index
        }
    }

    /// Rotate one key from the left sibling through the separator.
    ///
    /// ```text
    ///   parent: [.. S ..]            parent: [.. y ..]
    ///            /   \          =>            /   \
    ///   left: [x y]  child: [a]      left: [x]  child: [S a]
    /// ```
    ///
    /// For internal nodes the left sibling's last child moves across
    /// with the key, keeping the separator property intact.
    fn borrow_from_left(&mut self, index: usize, stats: &mut BTreeStats) {
        let left = &mut self.children[index - 1];
        debug_assert!(!left.keys.is_empty());

        let moved_key = left.keys.remove(left.keys.len() - 1);
        let moved_child = if left.is_leaf() {
            None
        } else {
            Some(left.children.remove(left.children.len() - 1))
        };

        let separator = std::mem::replace(&mut self.keys[index - 1], moved_key);
        let child = &mut self.children[index];
        child.keys.insert(0, separator);
        if let Some(grandchild) = moved_child {
            child.children.insert(0, grandchild);
        }

        stats.rotations += 1;
    }

    /// Mirror image of [`Node::borrow_from_left`]: the right sibling's
    /// first key rotates up and the separator rotates down onto the end
    /// of the deficient child.
    fn borrow_from_right(&mut self, index: usize, stats: &mut BTreeStats) {
        let right = &mut self.children[index + 1];
        debug_assert!(!right.keys.is_empty());

        let moved_key = right.keys.remove(0);
        let moved_child = if right.is_leaf() {
            None
        } else {
            Some(right.children.remove(0))
        };

        let separator = std::mem::replace(&mut self.keys[index], moved_key);
        let child = &mut self.children[index];
        child.keys.push(separator);
        if let Some(grandchild) = moved_child {
            child.children.push(grandchild);
        }

        stats.rotations += 1;
    }

    /// Merge `children[index]`, the separator at `index`, and
    /// `children[index + 1]` into a single node (inverse of a split).
    ///
    /// Precondition (caller-enforced, checked in debug builds): both
    /// children sit on the `t - 1` floor, so the merge lands exactly at
    /// the `2t - 1` ceiling.
    fn merge_children(&mut self, index: usize, t: usize, stats: &mut BTreeStats) {
        debug_assert_eq!(self.children[index].num_keys(), t - 1);
        debug_assert_eq!(self.children[index + 1].num_keys(), t - 1);
        debug_assert_eq!(self.children[index].kind, self.children[index + 1].kind);

        let separator = self.keys.remove(index);
        let right = *self.children.remove(index + 1);

        let left = &mut self.children[index];
        left.keys.push(separator);
        left.keys.extend(right.keys);
        left.children.extend(right.children);

        stats.merges += 1;
    }

    // ========================================================================
    // Subtree queries used by the delete driver and diagnostics
    // ========================================================================

    /// Maximum key in the subtree: rightmost key of the rightmost leaf.
    fn max_key(&self) -> Key {
        let mut node = self;
        while let Some(child) = node.children.last() {
            node = child;
        }
        node.keys[node.keys.len() - 1]
    }

    /// Minimum key in the subtree: leftmost key of the leftmost leaf.
    fn min_key(&self) -> Key {
        let mut node = self;
        while let Some(child) = node.children.first() {
            node = child;
        }
        node.keys[0]
    }

    /// Number of levels below and including this node (a lone leaf has
    /// height 1). All leaves share one depth, so following the leftmost
    /// spine is enough.
    pub(crate) fn height(&self) -> usize {
        match self.children.first() {
            Some(child) => 1 + child.height(),
            None => 1,
        }
    }

    /// Append the subtree's keys to `out` in sorted order.
    pub(crate) fn collect_keys(&self, out: &mut Vec<Key>) {
        if self.is_leaf() {
            out.extend_from_slice(&self.keys);
            return;
        }
        for (index, child) in self.children.iter().enumerate() {
            child.collect_keys(out);
            if index < self.keys.len() {
                out.push(self.keys[index]);
            }
        }
    }

    /// Verify every structural invariant of the subtree.
    ///
    /// Checks occupancy bounds (`is_root` exempts the floor), strict
    /// key ordering, the `(lower, upper)` range inherited from parent
    /// separators, leaf/child consistency, and uniform leaf depth.
    /// Returns the subtree height on success so parents can compare
    /// sibling depths.
    pub(crate) fn check_subtree(
        &self,
        t: usize,
        is_root: bool,
        lower: Option<Key>,
        upper: Option<Key>,
    ) -> std::result::Result<usize, String> {
        if self.keys.len() > 2 * t - 1 {
            return Err(format!(
                "node holds {} keys, above the {} ceiling",
                self.keys.len(),
                2 * t - 1
            ));
        }
        if !is_root && self.keys.len() < t - 1 {
            return Err(format!(
                "non-root node holds {} keys, below the {} floor",
                self.keys.len(),
                t - 1
            ));
        }

        for pair in self.keys.windows(2) {
            if pair[0] >= pair[1] {
                return Err(format!("keys out of order: {} before {}", pair[0], pair[1]));
            }
        }
        if let (Some(low), Some(first)) = (lower, self.keys.first()) {
            if *first <= low {
                return Err(format!("key {} at or below separator bound {}", first, low));
            }
        }
        if let (Some(high), Some(last)) = (upper, self.keys.last()) {
            if *last >= high {
                return Err(format!("key {} at or above separator bound {}", last, high));
            }
        }

        match self.kind {
            NodeKind::Leaf => {
                if !self.children.is_empty() {
                    return Err("leaf node holds children".to_string());
                }
                Ok(1)
            }
            NodeKind::Internal => {
                if self.children.len() != self.keys.len() + 1 {
                    return Err(format!(
                        "internal node holds {} keys but {} children",
                        self.keys.len(),
                        self.children.len()
                    ));
                }
                let mut depth = None;
                for (index, child) in self.children.iter().enumerate() {
                    let child_lower = if index == 0 {
                        lower
                    } else {
                        Some(self.keys[index - 1])
                    };
                    let child_upper = self.keys.get(index).copied().or(upper);
                    let child_depth = child.check_subtree(t, false, child_lower, child_upper)?;
                    match depth {
                        None => depth = Some(child_depth),
                        Some(expected) if expected != child_depth => {
                            return Err(format!(
                                "leaves at unequal depth: {} vs {}",
                                expected, child_depth
                            ));
                        }
                        Some(_) => {}
                    }
                }
                // depth is Some: an internal node has >= 1 child here.
                Ok(1 + depth.unwrap_or(0))
            }
        }
    }

    /// Write one line per node, indented by depth. Used by the tree's
    /// `Display` impl.
    pub(crate) fn fmt_subtree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        writeln!(
            f,
            "{:indent$}{:?} {:?}",
            "",
            self.kind,
            self.keys,
            indent = depth * 2
        )?;
        for child in &self.children {
            child.fmt_subtree(f, depth + 1)?;
        }
        Ok(())
    }
}
