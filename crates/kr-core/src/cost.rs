//! Travel-time and key-cost arithmetic.
//!
//! Costs are unsigned, so negative weights cannot be expressed.  Unreachable
//! locations carry [`INFINITE_COST`], which is never a valid finite cost.
//!
//! Two ways to add:
//!
//! - [`add_costs`] saturates, so an infinite half never wraps into a finite
//!   total.  Use it where "too large" and "unreachable" may be merged.
//! - [`checked_add_costs`] returns `None` when the sum does not fit below
//!   [`INFINITE_COST`].  Searches and route totals use it so an overflowing
//!   sum is reported instead of passing for the sentinel.

/// Travel time along a path, a key's acquisition cost, or any sum of them.
pub type Cost = u64;

/// Distance of a location that no search reached.
pub const INFINITE_COST: Cost = Cost::MAX;

/// `true` for any cost other than [`INFINITE_COST`].
#[inline]
pub fn is_finite(cost: Cost) -> bool {
    cost != INFINITE_COST
}

/// Saturating sum: infinite if either operand is infinite or the sum
/// overflows.
#[inline]
pub fn add_costs(a: Cost, b: Cost) -> Cost {
    a.saturating_add(b)
}

/// Finite sum, or `None` if an operand is infinite or the sum reaches
/// [`INFINITE_COST`].
#[inline]
pub fn checked_add_costs(a: Cost, b: Cost) -> Option<Cost> {
    a.checked_add(b).filter(|&sum| is_finite(sum))
}
