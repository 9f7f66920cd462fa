//! Weight-range overlap detection.

use rust_decimal::Decimal;
use zc_core::Reading;

use crate::schema::ExtraCharge;

/// A weight bracket as read from its inputs. A bound is `None` when its
/// field does not hold a number; such a range never overlaps anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightRange {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

impl WeightRange {
    pub fn new(min: Decimal, max: Decimal) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn of(extra: &ExtraCharge) -> Self {
        Self {
            min: Reading::of(&extra.min_weight).number(),
            max: Reading::of(&extra.max_weight).number(),
        }
    }
}

/// Share of `y`'s span covered by its intersection with `x`.
///
/// 1 when `x` contains `y`, 0 when they are disjoint. Negative for a range
/// whose bounds are inverted.
pub fn overlap(x: &WeightRange, y: &WeightRange) -> Decimal {
    let (Some(x_min), Some(x_max), Some(y_min), Some(y_max)) = (x.min, x.max, y.min, y.max)
    else {
        return Decimal::ZERO;
    };

    if x_min <= y_min && x_max >= y_max {
        return Decimal::ONE;
    }
    if x_max < y_min || y_max < x_min {
        return Decimal::ZERO;
    }

    // Spans of extreme bounds can overflow; treat those as no overlap.
    let shared = x_max.min(y_max).checked_sub(x_min.max(y_min));
    let span = y_max.checked_sub(y_min);
    shared
        .zip(span)
        .and_then(|(shared, span)| shared.checked_div(span))
        .unwrap_or(Decimal::ZERO)
}

/// First cyclic-adjacent pair `(i, (i + 1) % len)` whose overlap is positive.
///
/// Only neighbours in list order are compared, the last range with the
/// first; non-adjacent ranges are never checked against each other.
/// Fewer than two ranges never overlap.
pub fn find_adjacent_overlap(ranges: &[WeightRange]) -> Option<(usize, usize)> {
    let len = ranges.len();
    if len < 2 {
        return None;
    }
    (0..len)
        .map(|i| (i, (i + 1) % len))
        .find(|&(i, j)| overlap(&ranges[i], &ranges[j]) > Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(min: i64, max: i64) -> WeightRange {
        WeightRange::new(Decimal::from(min), Decimal::from(max))
    }

    #[test]
    fn containment_is_full_overlap() {
        assert_eq!(overlap(&r(0, 10), &r(2, 5)), Decimal::ONE);
    }

    #[test]
    fn disjoint_is_zero() {
        assert_eq!(overlap(&r(0, 1), &r(5, 6)), Decimal::ZERO);
    }

    #[test]
    fn partial_overlap_is_fraction_of_second_span() {
        let ratio = overlap(&r(0, 10), &r(5, 15));
        assert!(ratio > Decimal::ZERO && ratio < Decimal::ONE);
        assert_eq!(ratio, Decimal::new(5, 1));
    }

    #[test]
    fn touching_bounds_do_not_overlap() {
        // zero-width intersection
        assert_eq!(overlap(&r(1, 3), &r(3, 5)), Decimal::ZERO);
        assert_eq!(overlap(&r(3, 3), &r(3, 3)), Decimal::ONE);
    }

    #[test]
    fn missing_bound_never_overlaps() {
        let broken = WeightRange {
            min: None,
            max: Some(Decimal::from(4)),
        };
        assert_eq!(overlap(&broken, &r(0, 10)), Decimal::ZERO);
        assert_eq!(overlap(&r(0, 10), &broken), Decimal::ZERO);
    }

    #[test]
    fn overflowing_span_is_no_overlap() {
        let huge = Decimal::from_str_exact("50000000000000000000000000000").unwrap();
        let wide = WeightRange::new(-huge, huge);
        let unit = r(0, 1);
        assert_eq!(overlap(&unit, &wide), Decimal::ZERO);
        assert_eq!(find_adjacent_overlap(&[unit, wide]), Some((1, 0)));
    }

    #[test]
    fn adjacent_pairs_wrap_around() {
        assert_eq!(find_adjacent_overlap(&[r(1, 3), r(2, 4)]), Some((0, 1)));
        assert_eq!(find_adjacent_overlap(&[r(1, 2), r(3, 4), r(0, 5)]), Some((1, 2)));
        assert_eq!(find_adjacent_overlap(&[r(1, 2), r(3, 4)]), None);
        assert_eq!(find_adjacent_overlap(&[r(1, 2)]), None);
    }

    #[test]
    fn non_adjacent_overlap_is_not_detected_with_four_ranges() {
        // 0 and 2 overlap but are never compared.
        let ranges = [r(1, 5), r(6, 7), r(2, 3), r(8, 9)];
        assert_eq!(find_adjacent_overlap(&ranges), None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn ratio_is_within_unit_interval_for_ordered_ranges(
            a in 0i64..100, b in 0i64..100, c in 0i64..100, d in 0i64..100
        ) {
            let x = WeightRange::new(Decimal::from(a.min(b)), Decimal::from(a.max(b)));
            let y = WeightRange::new(Decimal::from(c.min(d)), Decimal::from(c.max(d)));
            let ratio = overlap(&x, &y);
            prop_assert!(ratio >= Decimal::ZERO && ratio <= Decimal::ONE);
        }
    }
}
