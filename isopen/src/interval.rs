//! Interval algebra used to merge the intervals resolved from all rules.
//!
//! Open time is the union of the intervals of all positive rules, minus the
//! union of the intervals of all negative rules. The order of rules has no
//! influence on the result.

use std::cmp::{max, min};
use std::ops::Range;

use chrono::{DateTime, Utc};

use isopen_syntax::RuleKind;

/// A half-open period of time `[start, end)` in which a rule applies, or in
/// which a schedule is open.
pub type ResolvedInterval = Range<DateTime<Utc>>;

/// Merge intervals annotated with the kind of the rule they were resolved
/// from into a sorted sequence of disjoint open intervals.
///
/// ```
/// use isopen::combine;
/// use isopen::RuleKind;
///
/// let open = combine([
///     (8..20, RuleKind::Open),
///     (12..13, RuleKind::Closed),
///     (19..22, RuleKind::Open),
/// ]);
///
/// assert_eq!(open, [8..12, 13..22]);
/// ```
pub fn combine<T: Ord + Clone>(
    resolved: impl IntoIterator<Item = (Range<T>, RuleKind)>,
) -> Vec<Range<T>> {
    let (open, closed): (Vec<_>, Vec<_>) = resolved
        .into_iter()
        .partition(|(_, kind)| *kind == RuleKind::Open);

    let open = ranges_union(open.into_iter().map(|(range, _)| range));
    let closed = ranges_union(closed.into_iter().map(|(range, _)| range));
    ranges_difference(open, &closed)
}

/// Merge overlapping or adjacent ranges together, empty ranges are dropped.
///
/// ```
/// use isopen::interval::ranges_union;
///
/// assert_eq!(ranges_union([5..7, 1..3, 3..4, 6..6, 6..9]), [1..4, 5..9]);
/// ```
pub fn ranges_union<T: Ord>(ranges: impl IntoIterator<Item = Range<T>>) -> Vec<Range<T>> {
    let mut ranges: Vec<_> = ranges
        .into_iter()
        .filter(|range| range.start < range.end)
        .collect();

    let mut output = Vec::new();

    // Get ranges by increasing start
    ranges.sort_unstable_by(|r1, r2| r1.start.cmp(&r2.start));
    let mut ranges = ranges.into_iter();

    if let Some(mut current) = ranges.next() {
        for item in ranges {
            if current.end >= item.start {
                // The two intervals intersect with each other
                current.end = max(current.end, item.end);
            } else {
                output.push(current);
                current = item;
            }
        }

        output.push(current);
    }

    output
}

/// Remove a set of ranges from another one.
///
/// Both inputs must be sorted and disjoint, as returned by [`ranges_union`].
///
/// ```
/// use isopen::interval::ranges_difference;
///
/// assert_eq!(ranges_difference(vec![0..10, 12..20], &[2..4, 8..14]), [0..2, 4..8, 14..20]);
/// ```
pub fn ranges_difference<T: Ord + Clone>(
    ranges: Vec<Range<T>>,
    removed: &[Range<T>],
) -> Vec<Range<T>> {
    let mut output = Vec::with_capacity(ranges.len());
    let mut removed = removed.iter().peekable();

    for mut range in ranges {
        // Removed ranges that end before this one can't overlap next ones
        while removed.next_if(|rm| rm.end <= range.start).is_some() {}

        let mut overlapping = removed.clone();

        while let Some(rm) = overlapping.next_if(|rm| rm.start < range.end) {
            if rm.start > range.start {
                output.push(range.start.clone()..rm.start.clone());
            }

            range.start = max(range.start.clone(), rm.end.clone());

            if range.start >= range.end {
                break;
            }
        }

        if range.start < range.end {
            output.push(range);
        }
    }

    output
}

pub fn range_intersection<T: Ord>(range_1: Range<T>, range_2: Range<T>) -> Option<Range<T>> {
    let result = max(range_1.start, range_2.start)..min(range_1.end, range_2.end);

    if result.start < result.end {
        Some(result)
    } else {
        None
    }
}

/// Check that ranges are non-empty, sorted and separated by gaps.
pub(crate) fn is_normalized<T: Ord>(ranges: &[Range<T>]) -> bool {
    ranges.iter().all(|range| range.start < range.end)
        && ranges.windows(2).all(|pair| pair[0].end < pair[1].start)
}
