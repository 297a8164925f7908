//! The interval contract consumed by the trees, and `Span`, a plain [start, end) pair.
//!
//! Trees order their keys by `start` first and `end` second. For instance:
//! - [1,4)<[2,5), because 1<2
//! - [1,4)<[1,5), because 4<5
//!
//! So the order of keys in a tree is [1,4)<[1,5)<[2,5).
//!
//! Only half-open intervals are supported: two intervals that merely touch,
//! such as [0,10) and [10,20), do not overlap.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Range;

/// A half-open interval [start, end) on the integer line.
///
/// Implementors must keep `start() < end()`. Trees never check this; a
/// malformed interval silently breaks ordering and overlap results.
pub trait Interval {
    /// Inclusive start.
    fn start(&self) -> i64;

    /// Exclusive end.
    fn end(&self) -> i64;

    /// Number of points covered. Exact for any bounds, including
    /// `[i64::MIN, i64::MAX)`.
    #[inline]
    fn length(&self) -> u64 {
        self.end().abs_diff(self.start())
    }

    /// Checks if self shares at least one point with `other`.
    #[inline]
    fn overlaps<J: Interval>(&self, other: &J) -> bool {
        self.end() > other.start() && other.end() > self.start()
    }

    /// Checks if one of the two intervals ends exactly where the other starts.
    #[inline]
    fn is_adjacent<J: Interval>(&self, other: &J) -> bool {
        self.start() == other.end() || self.end() == other.start()
    }

    /// Compares bounds: start ascending, then end ascending.
    #[inline]
    fn cmp_bounds<J: Interval>(&self, other: &J) -> Ordering {
        self.start()
            .cmp(&other.start())
            .then_with(|| self.end().cmp(&other.end()))
    }
}

/// A bare interval [start, end) with no attached data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub struct Span {
    /// Start value
    pub start: i64,
    /// End value
    pub end: i64,
}

impl Span {
    /// Create a new `Span`
    ///
    /// # Panics
    ///
    /// This method panics when start >= end
    #[inline]
    #[must_use]
    pub fn new(start: i64, end: i64) -> Self {
        assert!(start < end, "invalid range");
        Self { start, end }
    }

    /// A span covering the single point `x`.
    ///
    /// # Panics
    ///
    /// This method panics when `x` is `i64::MAX`, whose point has no
    /// representable end
    #[inline]
    #[must_use]
    pub fn point(x: i64) -> Self {
        assert!(x < i64::MAX, "invalid range");
        Self::new(x, x + 1)
    }

    /// Copies the bounds of any interval.
    #[inline]
    pub fn of<J: Interval>(interval: &J) -> Self {
        Self {
            start: interval.start(),
            end: interval.end(),
        }
    }
}

impl Interval for Span {
    #[inline]
    fn start(&self) -> i64 {
        self.start
    }

    #[inline]
    fn end(&self) -> i64 {
        self.end
    }
}

impl Interval for Range<i64> {
    #[inline]
    fn start(&self) -> i64 {
        self.start
    }

    #[inline]
    fn end(&self) -> i64 {
        self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
