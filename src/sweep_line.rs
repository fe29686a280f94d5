//! Single-pass sweep-line computations over half-open intervals `[start, end)`.
//!
//! Unlike [`IntervalTree`](crate::IntervalTree), which works on closed ranges,
//! every function here treats `(start, end)` as half-open: two intervals that
//! merely touch (`a.end == b.start`) never run concurrently. Convert closed
//! integer intervals with [`Interval::to_half_open`](crate::Interval::to_half_open).
//!
//! Intervals with `start >= end` are empty under this convention and are ignored
//! when building events.

use num_traits::Zero;
use std::fmt::Debug;
use std::ops::Sub;

/// Start and end events, sorted by `(time, delta)`: at equal times the `-1`
/// of a closing interval comes before the `+1` of an opening one.
///
/// ```
/// use sweep_interval_tree::sweep_line::events;
///
/// assert_eq!(events(&[(1, 3), (3, 4)]), vec![(1, 1), (3, -1), (3, 1), (4, -1)]);
/// ```
pub fn events<T: Ord + Copy>(intervals: &[(T, T)]) -> Vec<(T, i32)> {
    let mut events: Vec<(T, i32)> = intervals
        .iter()
        .filter(|(start, end)| start < end)
        .flat_map(|&(start, end)| [(start, 1), (end, -1)])
        .collect();
    events.sort_unstable();
    events
}

/// The minimum number of rooms needed to host every interval without two
/// overlapping meetings sharing a room.
///
/// ```
/// use sweep_interval_tree::sweep_line::min_meeting_rooms;
///
/// assert_eq!(min_meeting_rooms(&[(0, 30), (5, 10), (15, 20)]), 2);
/// ```
pub fn min_meeting_rooms<T: Ord + Copy>(intervals: &[(T, T)]) -> usize {
    let mut open = 0i64;
    let mut rooms = 0i64;
    for (_, delta) in events(intervals) {
        open += i64::from(delta);
        debug_assert!(open >= 0, "more intervals closed than opened");
        rooms = rooms.max(open);
    }
    debug_assert_eq!(open, 0);
    log::debug!("min_meeting_rooms over {} intervals: {}", intervals.len(), rooms);
    rooms as usize
}

/// The union of `intervals` as sorted, disjoint ranges. Touching ranges are joined.
///
/// ```
/// use sweep_interval_tree::sweep_line::merge_intervals;
///
/// assert_eq!(merge_intervals(&[(6, 8), (2, 5), (1, 3)]), vec![(1, 5), (6, 8)]);
/// ```
pub fn merge_intervals<T: Ord + Copy>(intervals: &[(T, T)]) -> Vec<(T, T)> {
    let mut sorted: Vec<(T, T)> = intervals
        .iter()
        .copied()
        .filter(|(start, end)| start < end)
        .collect();
    sorted.sort_unstable();

    let mut merged: Vec<(T, T)> = Vec::new();
    for (l, r) in sorted {
        if let Some((_, cur_r)) = merged.last_mut() {
            if l <= *cur_r {
                *cur_r = (*cur_r).max(r);
                continue;
            }
        }
        merged.push((l, r));
    }
    merged
}

/// Total length covered by at least one interval.
///
/// ```
/// use sweep_interval_tree::sweep_line::total_coverage;
///
/// assert_eq!(total_coverage(&[(1, 3), (2, 5), (6, 8)]), 6);
/// ```
pub fn total_coverage<T>(intervals: &[(T, T)]) -> T
where
    T: Ord + Copy + Zero + Sub<Output = T> + Debug,
{
    let total = merge_intervals(intervals)
        .into_iter()
        .fold(T::zero(), |acc, (l, r)| acc + (r - l));
    log::debug!("total_coverage over {} intervals: {:?}", intervals.len(), total);
    total
}

/// Total length covered by at least `k` intervals at once.
///
/// With `k == 0` this is the distance from the first to the last event. A `k`
/// larger than the number of intervals can never be reached and yields zero.
///
/// ```
/// use sweep_interval_tree::sweep_line::k_overlap_length;
///
/// assert_eq!(k_overlap_length(&[(1, 4), (2, 6), (5, 7)], 2), 3);
/// ```
pub fn k_overlap_length<T>(intervals: &[(T, T)], k: usize) -> T
where
    T: Ord + Copy + Zero + Sub<Output = T> + Debug,
{
    if k > intervals.len() {
        log::debug!("k_overlap_length: k = {} exceeds {} intervals", k, intervals.len());
        return T::zero();
    }
    let mut open = 0usize;
    let mut previous: Option<T> = None;
    let mut length = T::zero();
    for (time, delta) in events(intervals) {
        // `open` still holds the count for [previous, time).
        if let Some(previous) = previous {
            if open >= k {
                length = length + (time - previous);
            }
        }
        if delta > 0 {
            open += 1;
        } else {
            open -= 1;
        }
        previous = Some(time);
    }
    log::debug!(
        "k_overlap_length over {} intervals with k = {}: {:?}",
        intervals.len(),
        k,
        length
    );
    length
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_intervals(rng: &mut StdRng, n: usize) -> Vec<(i64, i64)> {
        (0..n)
            .map(|_| {
                let start = rng.gen_range(0..60);
                (start, start + rng.gen_range(0..15))
            })
            .collect()
    }

    // Brute force over unit cells [x, x + 1).
    fn depth_at(intervals: &[(i64, i64)], x: i64) -> usize {
        intervals.iter().filter(|&&(s, e)| s <= x && x < e).count()
    }

    #[test]
    fn empty_inputs() {
        let none: [(i64, i64); 0] = [];
        assert_eq!(min_meeting_rooms(&none), 0);
        assert_eq!(total_coverage(&none), 0);
        assert_eq!(k_overlap_length(&none, 0), 0);
        assert_eq!(k_overlap_length(&none, 3), 0);
        assert!(merge_intervals(&none).is_empty());
        assert!(events(&none).is_empty());
    }

    #[test]
    fn meeting_rooms() {
        assert_eq!(min_meeting_rooms(&[(0, 30), (5, 10), (15, 20)]), 2);
        assert_eq!(min_meeting_rooms(&[(7, 10), (2, 4)]), 1);
        // A room freed at 10 is reused by a meeting starting at 10.
        assert_eq!(min_meeting_rooms(&[(0, 10), (10, 20), (20, 30)]), 1);
        assert_eq!(min_meeting_rooms(&[(1, 5), (1, 5), (1, 5)]), 3);
    }

    #[test]
    fn empty_and_inverted_intervals_are_ignored() {
        assert_eq!(min_meeting_rooms(&[(5, 5), (9, 2)]), 0);
        assert_eq!(min_meeting_rooms(&[(5, 5), (4, 6)]), 1);
        assert_eq!(total_coverage(&[(9, 2), (1, 2)]), 1);
        assert_eq!(k_overlap_length(&[(9, 2), (1, 3), (2, 2)], 1), 2);
    }

    #[test]
    fn coverage() {
        assert_eq!(total_coverage(&[(1, 3), (2, 5), (6, 8)]), 6);
        assert_eq!(merge_intervals(&[(1, 3), (2, 5), (6, 8)]), vec![(1, 5), (6, 8)]);
        assert_eq!(merge_intervals(&[(1, 3), (3, 4)]), vec![(1, 4)]);
        assert_eq!(total_coverage(&[(0, 10), (2, 3), (4, 5)]), 10);
        assert_eq!(total_coverage(&[(-5, -1), (-3, 2)]), 7);
    }

    #[test]
    fn coverage_does_not_touch_input() {
        let input = vec![(6, 8), (1, 3), (2, 5)];
        let copy = input.clone();
        assert_eq!(total_coverage(&input), 6);
        assert_eq!(input, copy);
    }

    #[test]
    fn k_overlap() {
        let intervals = [(1, 4), (2, 6), (5, 7)];
        assert_eq!(k_overlap_length(&intervals, 2), 3);
        assert_eq!(k_overlap_length(&intervals, 1), 6);
        assert_eq!(k_overlap_length(&intervals, 3), 0);
        assert_eq!(k_overlap_length(&intervals, 0), 6);
        assert_eq!(k_overlap_length(&[(0, 2), (5, 6)], 0), 6);
    }

    #[test]
    fn k_overlap_beyond_interval_count_is_zero() {
        let intervals = [(1i64, 4i64), (2, 6)];
        assert_eq!(k_overlap_length(&intervals, 2), 2);
        assert_eq!(k_overlap_length(&intervals, 3), 0);
        assert_eq!(k_overlap_length(&[(1i64, 4i64)], usize::MAX), 0);
        assert_eq!(k_overlap_length(&[(1i64, 4i64)], usize::MAX / 2 + 1), 0);
        let none: [(i64, i64); 0] = [];
        assert_eq!(k_overlap_length(&none, usize::MAX), 0);
    }

    #[test]
    fn events_close_before_open() {
        let events = events(&[(3, 5), (0, 3)]);
        assert_eq!(events, vec![(0, 1), (3, -1), (3, 1), (5, -1)]);
        let mut open = 0i32;
        for (_, delta) in &events {
            open += delta;
            assert!(open >= 0);
        }
        assert_eq!(open, 0);
    }

    #[test]
    fn matches_brute_force() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut rng = StdRng::seed_from_u64(42);
        for round in 0..300 {
            let intervals = random_intervals(&mut rng, round % 25);
            let depths: Vec<usize> = (-1..80).map(|x| depth_at(&intervals, x)).collect();

            let rooms = depths.iter().copied().max().unwrap_or(0);
            assert_eq!(min_meeting_rooms(&intervals), rooms, "{:?}", intervals);

            let covered = depths.iter().filter(|&&d| d >= 1).count() as i64;
            assert_eq!(total_coverage(&intervals), covered, "{:?}", intervals);
            assert_eq!(k_overlap_length(&intervals, 1), covered);

            for k in 2..5 {
                let expected = depths.iter().filter(|&&d| d >= k).count() as i64;
                assert_eq!(k_overlap_length(&intervals, k), expected, "k = {}", k);
            }
        }
    }

    #[test]
    fn closed_intervals_need_conversion() {
        use crate::Interval;

        // [1, 3] and [3, 5] share the point 3 when closed.
        let closed = [Interval::new(1, 3), Interval::new(3, 5)];
        let raw: Vec<(i64, i64)> = closed.iter().copied().map(Into::into).collect();
        assert_eq!(min_meeting_rooms(&raw), 1);
        let half_open: Vec<(i64, i64)> = closed.iter().map(Interval::to_half_open).collect();
        assert_eq!(min_meeting_rooms(&half_open), 2);
        assert_eq!(total_coverage(&half_open), 5);
    }
}
