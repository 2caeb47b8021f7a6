//! Error types for the fanout crate.

use crate::common::Key;
use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write
/// `Result<T>`. This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in the fanout crate.
///
/// Every variant is recoverable and scoped to the single call that
/// produced it: a failed insert or delete leaves the tree exactly as it
/// was able to be observed before the call (same key sequence, same
/// invariants). Internal invariant violations — splitting a child that
/// is not full, borrowing from a sibling at the floor — are programming
/// errors and are enforced with `debug_assert!`, not represented here.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The requested order is below the minimum of 3.
    ///
    /// A B-tree needs at least 3-way branching for a node to have a
    /// meaningful median key to promote on split.
    #[error("invalid order {0}: a B-tree requires order >= 3")]
    InvalidOrder(usize),

    /// The key being inserted is already present.
    ///
    /// Duplicates are rejected rather than stored; the key sequence is
    /// unchanged.
    #[error("key {0} already exists")]
    DuplicateKey(Key),

    /// The key being deleted is not in the tree.
    #[error("key {0} not found")]
    KeyNotFound(Key),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidOrder(2);
        assert_eq!(format!("{}", err), "invalid order 2: a B-tree requires order >= 3");

        let err = Error::DuplicateKey(42);
        assert_eq!(format!("{}", err), "key 42 already exists");

        let err = Error::KeyNotFound(7);
        assert_eq!(format!("{}", err), "key 7 not found");
    }

    #[test]
    fn test_result_type_alias() {
        // This function returns our Result type
        fn might_fail() -> Result<u32> {
            Ok(42)
        }

        assert_eq!(might_fail().unwrap(), 42);
    }

    #[test]
    fn test_errors_are_comparable() {
        // Tests match on exact error values, so Eq must hold.
        assert_eq!(Error::KeyNotFound(1), Error::KeyNotFound(1));
        assert_ne!(Error::KeyNotFound(1), Error::DuplicateKey(1));
    }
}
