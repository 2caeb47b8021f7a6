//! Key type stored in the B-tree.

/// The key type indexed by the tree.
///
/// Keys are fixed-width signed integers, compared by their natural
/// order. A plain alias (rather than a newtype) keeps call sites and
/// tests free of wrapping noise; the tree never interprets key values
/// beyond ordering and equality.
pub type Key = i64;
