//! Temporal range model.
//!
//! A [`Range`] is an immutable `(lower, upper)` pair over a comparable
//! time domain. Ranges are replaced wholesale — every edit produces a
//! new value — so corrections can be recorded as old/new pairs.
//!
//! # Time Domains
//!
//! The domain is abstracted by [`TimePoint`]: `i64` for millisecond or
//! abstract-unit scheduling (epoch convention: t=0 is consumer-defined),
//! `chrono::DateTime<Utc>` for calendar scheduling.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A point in a totally ordered time domain.
///
/// Implementations provide duration arithmetic so that range shifts can
/// preserve duration exactly across any domain.
pub trait TimePoint: Copy + Ord {
    /// Duration type of the domain.
    type Span: Copy + Ord;

    /// Span from `earlier` to `self`. Negative if `self < earlier`.
    fn span_since(self, earlier: Self) -> Self::Span;

    /// This point moved forward by `span`.
    fn forward(self, span: Self::Span) -> Self;

    /// This point moved backward by `span`.
    fn backward(self, span: Self::Span) -> Self;

    /// The empty span.
    fn zero_span() -> Self::Span;
}

impl TimePoint for i64 {
    type Span = i64;

    fn span_since(self, earlier: Self) -> i64 {
        self - earlier
    }

    fn forward(self, span: i64) -> Self {
        self + span
    }

    fn backward(self, span: i64) -> Self {
        self - span
    }

    fn zero_span() -> i64 {
        0
    }
}

impl TimePoint for DateTime<Utc> {
    type Span = Duration;

    fn span_since(self, earlier: Self) -> Duration {
        self - earlier
    }

    fn forward(self, span: Duration) -> Self {
        self + span
    }

    fn backward(self, span: Duration) -> Self {
        self - span
    }

    fn zero_span() -> Duration {
        Duration::zero()
    }
}

/// An immutable time range `[lower, upper]`.
///
/// Well-formed when `lower <= upper`. Construction does not enforce the
/// invariant; enforcement policies treat a negative-duration range as a
/// caller contract violation (see `enforcement::Outcome::Invalid`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range<T: TimePoint> {
    /// Lower bound (start).
    pub lower: T,
    /// Upper bound (end).
    pub upper: T,
}

impl<T: TimePoint> Range<T> {
    /// Creates a range from bounds.
    pub fn new(lower: T, upper: T) -> Self {
        Self { lower, upper }
    }

    /// Duration `upper - lower`. Negative for a malformed range.
    pub fn duration(&self) -> T::Span {
        self.upper.span_since(self.lower)
    }

    /// Whether `lower <= upper`.
    pub fn is_well_formed(&self) -> bool {
        self.lower <= self.upper
    }

    /// Whether `point` lies within `[lower, upper]`.
    pub fn contains(&self, point: T) -> bool {
        self.lower <= point && point <= self.upper
    }

    /// A range of equal duration starting at `lower`.
    pub fn anchored_at(&self, lower: T) -> Self {
        Self::new(lower, lower.forward(self.duration()))
    }

    /// A range of equal duration ending at `upper`.
    pub fn anchored_until(&self, upper: T) -> Self {
        Self::new(upper.backward(self.duration()), upper)
    }

    /// Both bounds moved forward by `span`.
    pub fn shifted_by(&self, span: T::Span) -> Self {
        Self::new(self.lower.forward(span), self.upper.forward(span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_range_duration() {
        let r = Range::new(10i64, 25);
        assert_eq!(r.duration(), 15);
        assert!(r.is_well_formed());
    }

    #[test]
    fn test_malformed_range() {
        let r = Range::new(25i64, 10);
        assert_eq!(r.duration(), -15);
        assert!(!r.is_well_formed());
    }

    #[test]
    fn test_anchored_at_preserves_duration() {
        let r = Range::new(5i64, 15);
        let moved = r.anchored_at(20);
        assert_eq!(moved, Range::new(20, 30));
        assert_eq!(moved.duration(), r.duration());
    }

    #[test]
    fn test_anchored_until_preserves_duration() {
        let r = Range::new(5i64, 12);
        let moved = r.anchored_until(20);
        assert_eq!(moved, Range::new(13, 20));
        assert_eq!(moved.duration(), r.duration());
    }

    #[test]
    fn test_shifted_by() {
        let r = Range::new(0i64, 10);
        assert_eq!(r.shifted_by(7), Range::new(7, 17));
        assert_eq!(r.shifted_by(-3), Range::new(-3, 7));
    }

    #[test]
    fn test_contains_boundary_inclusive() {
        let r = Range::new(10i64, 20);
        assert!(r.contains(10));
        assert!(r.contains(20));
        assert!(!r.contains(21));
    }

    #[test]
    fn test_calendar_domain() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 5, 8, 0, 0).unwrap();
        let r = Range::new(start, end);
        assert_eq!(r.duration(), Duration::days(4));

        let anchor = Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap();
        let moved = r.anchored_at(anchor);
        assert_eq!(moved.duration(), Duration::days(4));
        assert_eq!(moved.upper, anchor + Duration::days(4));
    }

    #[test]
    fn test_range_serde_roundtrip() {
        let r = Range::new(100i64, 250);
        let json = serde_json::to_string(&r).unwrap();
        let back: Range<i64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
