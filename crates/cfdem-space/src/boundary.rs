//! Per-axis boundary handling for grid lookups.

/// How the index resolves a grid index one step past either face of an axis.
///
/// Only a single-cell overshoot is ever corrected. A point that lands
/// further out has left the domain whatever the boundary says.
///
/// # Examples
///
/// ```
/// use cfdem_space::{wrap_axis_index, AxisBoundary};
///
/// assert_eq!(wrap_axis_index(10, 10, AxisBoundary::Periodic), Some(0));
/// assert_eq!(wrap_axis_index(-1, 10, AxisBoundary::Periodic), Some(9));
/// assert_eq!(wrap_axis_index(10, 10, AxisBoundary::Clamp), Some(9));
/// assert_eq!(wrap_axis_index(11, 10, AxisBoundary::Clamp), None);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AxisBoundary {
    /// Index `n` wraps to `0`; index `-1` wraps to `n - 1`.
    #[default]
    Periodic,
    /// Index `n` maps to `n - 1`; index `-1` maps to `0`.
    Clamp,
}

/// Resolve a raw grid index on an axis of `len` cells.
///
/// In-range indices pass through unchanged. Indices exactly one past a
/// face are corrected according to `boundary`. Anything else, or an
/// empty axis, yields `None`.
pub fn wrap_axis_index(index: i64, len: u32, boundary: AxisBoundary) -> Option<u32> {
    let n = i64::from(len);
    if n == 0 {
        return None;
    }
    if (0..n).contains(&index) {
        return u32::try_from(index).ok();
    }
    match (boundary, index) {
        (AxisBoundary::Periodic, i) if i == n => Some(0),
        (AxisBoundary::Periodic, -1) => Some(len - 1),
        (AxisBoundary::Clamp, i) if i == n => Some(len - 1),
        (AxisBoundary::Clamp, -1) => Some(0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn periodic_wraps_both_faces() {
        assert_eq!(wrap_axis_index(5, 5, AxisBoundary::Periodic), Some(0));
        assert_eq!(wrap_axis_index(-1, 5, AxisBoundary::Periodic), Some(4));
    }

    #[test]
    fn clamp_holds_both_faces() {
        assert_eq!(wrap_axis_index(5, 5, AxisBoundary::Clamp), Some(4));
        assert_eq!(wrap_axis_index(-1, 5, AxisBoundary::Clamp), Some(0));
    }

    #[test]
    fn single_cell_axis() {
        assert_eq!(wrap_axis_index(1, 1, AxisBoundary::Periodic), Some(0));
        assert_eq!(wrap_axis_index(-1, 1, AxisBoundary::Periodic), Some(0));
        assert_eq!(wrap_axis_index(1, 1, AxisBoundary::Clamp), Some(0));
    }

    #[test]
    fn far_outside_is_rejected() {
        for boundary in [AxisBoundary::Periodic, AxisBoundary::Clamp] {
            assert_eq!(wrap_axis_index(6, 5, boundary), None);
            assert_eq!(wrap_axis_index(-2, 5, boundary), None);
            assert_eq!(wrap_axis_index(i64::MAX, 5, boundary), None);
            assert_eq!(wrap_axis_index(i64::MIN, 5, boundary), None);
        }
    }

    #[test]
    fn empty_axis_is_rejected() {
        assert_eq!(wrap_axis_index(0, 0, AxisBoundary::Periodic), None);
        assert_eq!(wrap_axis_index(-1, 0, AxisBoundary::Clamp), None);
    }

    proptest! {
        #[test]
        fn in_range_is_identity(len in 1u32..1000, frac in 0.0f64..1.0) {
            let i = ((f64::from(len) * frac) as i64).min(i64::from(len) - 1);
            for boundary in [AxisBoundary::Periodic, AxisBoundary::Clamp] {
                prop_assert_eq!(wrap_axis_index(i, len, boundary), Some(i as u32));
            }
        }

        #[test]
        fn periodic_matches_euclidean_remainder(len in 1u32..1000, offset in -1i64..=1) {
            let i = match offset {
                -1 => -1,
                0 => 0,
                _ => i64::from(len),
            };
            let expected = i.rem_euclid(i64::from(len)) as u32;
            prop_assert_eq!(wrap_axis_index(i, len, AxisBoundary::Periodic), Some(expected));
        }
    }
}
