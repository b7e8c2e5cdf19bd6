use std::cmp::max;
use std::cmp::min;
use std::fmt::Display;
use std::fmt::Formatter;

use crate::gourd_assert_advanced;
use crate::gourd_assert_simple;

/// A closed range `[lower, upper]` of integers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval {
    pub lower: i32,
    pub upper: i32,
}

impl Interval {
    fn size(&self) -> u64 {
        (self.upper as i64 - self.lower as i64 + 1) as u64
    }
}

/// The set of values which a variable can still take.
///
/// Stored as a sorted list of disjoint, non-adjacent intervals, so that a domain with `k` holes
/// takes `O(k)` space regardless of its width. The bounds are read in `O(1)`, and membership
/// tests and bound pruning locate the affected interval by binary search.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Domain {
    intervals: Vec<Interval>,
}

impl Domain {
    /// Creates the domain `[lower_bound, upper_bound]`; returns `None` when
    /// `lower_bound > upper_bound`.
    pub fn new(lower_bound: i32, upper_bound: i32) -> Option<Domain> {
        if lower_bound > upper_bound {
            return None;
        }

        Some(Domain {
            intervals: vec![Interval {
                lower: lower_bound,
                upper: upper_bound,
            }],
        })
    }

    /// Creates the domain containing exactly `values`, normalised into maximal runs of
    /// consecutive values. Returns `None` when no values are given.
    pub fn from_values(values: impl IntoIterator<Item = i32>) -> Option<Domain> {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_unstable();
        values.dedup();

        let domain = Domain::from_sorted_values(values);
        (!domain.is_empty()).then_some(domain)
    }

    pub(crate) fn singleton(value: i32) -> Domain {
        Domain {
            intervals: vec![Interval {
                lower: value,
                upper: value,
            }],
        }
    }

    /// The domain `{0, 1}`.
    pub(crate) fn boolean() -> Domain {
        Domain {
            intervals: vec![Interval { lower: 0, upper: 1 }],
        }
    }

    /// Builds a domain from strictly increasing values.
    fn from_sorted_values(values: impl IntoIterator<Item = i32>) -> Domain {
        let mut intervals: Vec<Interval> = Vec::new();

        for value in values {
            match intervals.last_mut() {
                Some(last) if last.upper.checked_add(1) == Some(value) => last.upper = value,
                _ => intervals.push(Interval {
                    lower: value,
                    upper: value,
                }),
            }
        }

        Domain { intervals }
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Whether exactly one value remains.
    pub fn is_fixed(&self) -> bool {
        self.intervals.len() == 1 && self.intervals[0].lower == self.intervals[0].upper
    }

    /// The smallest value in the domain. The domain must not be empty.
    pub fn min(&self) -> i32 {
        gourd_assert_simple!(!self.is_empty(), "the minimum of an empty domain is undefined");
        self.intervals[0].lower
    }

    /// The largest value in the domain. The domain must not be empty.
    pub fn max(&self) -> i32 {
        gourd_assert_simple!(!self.is_empty(), "the maximum of an empty domain is undefined");
        self.intervals[self.intervals.len() - 1].upper
    }

    /// The number of values in the domain.
    pub fn size(&self) -> u64 {
        self.intervals.iter().map(Interval::size).sum()
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Iterates over the values in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.intervals
            .iter()
            .flat_map(|interval| interval.lower..=interval.upper)
    }

    /// Index of the first interval whose upper bound is at least `value`.
    fn position(&self, value: i32) -> usize {
        self.intervals
            .partition_point(|interval| interval.upper < value)
    }

    pub fn contains(&self, value: i32) -> bool {
        let position = self.position(value);
        position < self.intervals.len() && self.intervals[position].lower <= value
    }

    /// Removes `value`, splitting the interval containing it when needed. Returns whether the
    /// domain changed.
    pub fn remove_value(&mut self, value: i32) -> bool {
        let position = self.position(value);
        if position >= self.intervals.len() || self.intervals[position].lower > value {
            return false;
        }

        let interval = &mut self.intervals[position];
        if interval.lower == interval.upper {
            let _ = self.intervals.remove(position);
        } else if interval.lower == value {
            interval.lower += 1;
        } else if interval.upper == value {
            interval.upper -= 1;
        } else {
            let upper = interval.upper;
            interval.upper = value - 1;
            self.intervals.insert(
                position + 1,
                Interval {
                    lower: value + 1,
                    upper,
                },
            );
        }

        gourd_assert_advanced!(self.is_well_formed());
        true
    }

    /// Removes every value strictly below `value`. Returns whether the domain changed.
    pub fn remove_below(&mut self, value: i32) -> bool {
        let position = self.position(value);
        let mut changed = position > 0;
        let _ = self.intervals.drain(..position);

        if let Some(first) = self.intervals.first_mut() {
            if first.lower < value {
                first.lower = value;
                changed = true;
            }
        }

        gourd_assert_advanced!(self.is_well_formed());
        changed
    }

    /// Removes every value strictly above `value`. Returns whether the domain changed.
    pub fn remove_above(&mut self, value: i32) -> bool {
        let position = self
            .intervals
            .partition_point(|interval| interval.lower <= value);
        let mut changed = position < self.intervals.len();
        self.intervals.truncate(position);

        if let Some(last) = self.intervals.last_mut() {
            if last.upper > value {
                last.upper = value;
                changed = true;
            }
        }

        gourd_assert_advanced!(self.is_well_formed());
        changed
    }

    /// Keeps only the values which are also in `other`. Returns whether the domain changed.
    pub fn intersect(&mut self, other: &Domain) -> bool {
        let mut result = Vec::with_capacity(self.intervals.len());
        let (mut i, mut j) = (0, 0);

        while i < self.intervals.len() && j < other.intervals.len() {
            let ours = self.intervals[i];
            let theirs = other.intervals[j];

            let lower = max(ours.lower, theirs.lower);
            let upper = min(ours.upper, theirs.upper);
            if lower <= upper {
                result.push(Interval { lower, upper });
            }

            if ours.upper < theirs.upper {
                i += 1;
            } else {
                j += 1;
            }
        }

        let changed = result != self.intervals;
        self.intervals = result;

        gourd_assert_advanced!(self.is_well_formed());
        changed
    }

    /// Whether the two domains share at least one value.
    pub fn intersects(&self, other: &Domain) -> bool {
        let (mut i, mut j) = (0, 0);

        while i < self.intervals.len() && j < other.intervals.len() {
            let ours = self.intervals[i];
            let theirs = other.intervals[j];

            if max(ours.lower, theirs.lower) <= min(ours.upper, theirs.upper) {
                return true;
            }

            if ours.upper < theirs.upper {
                i += 1;
            } else {
                j += 1;
            }
        }

        false
    }

    /// Keeps only the values for which `keep` holds. Returns whether the domain changed.
    ///
    /// Visits every value, so this is meant for domains which are known to be small.
    pub fn retain(&mut self, keep: impl FnMut(&i32) -> bool) -> bool {
        let retained = Domain::from_sorted_values(self.iter().filter(keep));
        let changed = retained != *self;
        *self = retained;
        changed
    }

    /// The value in the domain closest to `target`; ties go to the smaller value. The domain must
    /// not be empty.
    pub fn closest_value(&self, target: i32) -> i32 {
        let position = self.position(target);

        if position >= self.intervals.len() {
            return self.max();
        }
        if self.intervals[position].lower <= target {
            return target;
        }
        if position == 0 {
            return self.min();
        }

        let below = self.intervals[position - 1].upper;
        let above = self.intervals[position].lower;
        if target as i64 - below as i64 <= above as i64 - target as i64 {
            below
        } else {
            above
        }
    }

    /// The `n`-th smallest value in the domain, if the domain has more than `n` values.
    pub fn nth_value(&self, mut n: u64) -> Option<i32> {
        for interval in &self.intervals {
            if n < interval.size() {
                return Some((interval.lower as i64 + n as i64) as i32);
            }
            n -= interval.size();
        }
        None
    }

    fn is_well_formed(&self) -> bool {
        self.intervals
            .iter()
            .all(|interval| interval.lower <= interval.upper)
            && self
                .intervals
                .windows(2)
                .all(|pair| (pair[0].upper as i64) + 1 < pair[1].lower as i64)
    }
}

impl Display for Domain {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (index, interval) in self.intervals.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            if interval.lower == interval.upper {
                write!(f, "{}", interval.lower)?;
            } else {
                write!(f, "{}..{}", interval.lower, interval.upper)?;
            }
        }
        write!(f, "}}")
    }
}
