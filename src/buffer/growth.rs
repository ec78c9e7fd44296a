//! Capacity sizing.

use std::num::NonZeroUsize;

/// Returns the smallest `capacity + k * unit` (`k >= 0`) that is at least
/// `target`, or `None` if that value does not fit in `usize`.
pub(crate) fn next_capacity(capacity: usize, target: usize, unit: NonZeroUsize) -> Option<usize> {
    if capacity >= target {
        return Some(capacity);
    }

    let steps = (target - capacity).div_ceil(unit.get());
    steps
        .checked_mul(unit.get())
        .and_then(|extra| capacity.checked_add(extra))
}
