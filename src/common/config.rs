//! Configuration constants and derived bounds for the B-tree.
//!
//! A B-tree of order `m` allows at most `m` children per internal node.
//! The *minimum degree* `t = ceil(m/2)` sets the occupancy floor: every
//! node except the root must hold at least `t - 1` keys.
//!
//! All node arithmetic runs on `t`. The key ceiling is `2t - 1`, which
//! is exactly what a preemptive split needs: a full node divides into
//! two halves of `t - 1` keys around its promoted median. For even
//! orders `2t - 1 == m - 1`; an odd order is effectively rounded up to
//! the next even order (same floor, one extra key of headroom).
//!
//! All bounds are derived from the order through the helpers below so
//! that node code never hard-codes an off-by-one.

/// Smallest meaningful B-tree order.
///
/// With fewer than 3 children a node cannot hold the two keys needed to
/// produce a median on split, so orders below 3 are rejected at creation.
pub const MIN_ORDER: usize = 3;

/// Default order when the caller has no preference.
///
/// Order 6 gives `t = 3`: nodes hold 2..=5 keys, a comfortable size for
/// exercising split, borrow and merge in tests.
pub const DEFAULT_ORDER: usize = 6;

/// Minimum degree `t = ceil(order / 2)`.
#[inline]
pub const fn min_degree(order: usize) -> usize {
    (order + 1) / 2
}

/// Maximum keys a node may hold: `2t - 1` (equals `order - 1` for even
/// orders).
#[inline]
pub const fn max_keys(order: usize) -> usize {
    2 * min_degree(order) - 1
}

/// Minimum keys every non-root node must hold: `t - 1`.
#[inline]
pub const fn min_keys(order: usize) -> usize {
    min_degree(order) - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_order_bounds() {
        // Order 6: t = 3, nodes hold 2..=5 keys.
        assert_eq!(min_degree(DEFAULT_ORDER), 3);
        assert_eq!(min_keys(DEFAULT_ORDER), 2);
        assert_eq!(max_keys(DEFAULT_ORDER), 5);
    }

    #[test]
    fn test_even_order_matches_classic_bound() {
        // For even orders the ceiling is the textbook m - 1.
        for order in [4usize, 6, 8, 10, 32] {
            assert_eq!(max_keys(order), order - 1);
        }
    }

    #[test]
    fn test_odd_order_rounds_up() {
        // Order 5 behaves as order 6: t = 3, ceiling 5.
        assert_eq!(min_degree(5), 3);
        assert_eq!(min_keys(5), 2);
        assert_eq!(max_keys(5), 5);
    }

    #[test]
    fn test_smallest_order() {
        // Order 3: t = 2, every non-root node holds at least 1 key.
        assert_eq!(min_degree(MIN_ORDER), 2);
        assert_eq!(min_keys(MIN_ORDER), 1);
        assert_eq!(max_keys(MIN_ORDER), 3);
    }

    #[test]
    fn test_split_halves_sit_on_the_floor() {
        // A full node (2t - 1 keys) splits into two halves of t - 1
        // keys around the median, landing exactly on the floor.
        for order in MIN_ORDER..=64 {
            let t = min_degree(order);
            assert_eq!(max_keys(order), 2 * (t - 1) + 1);
            assert_eq!(min_keys(order), t - 1);
        }
    }
}
