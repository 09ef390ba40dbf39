use std::fmt;

use crate::error::{GeometryError, Result};

use super::fuzzy;

/// Whether an interval includes its bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundType {
    /// The bound value is excluded.
    Open,
    /// The bound value is included.
    Closed,
}

impl BoundType {
    fn is_closed(self) -> bool {
        self == Self::Closed
    }

    fn either_closed(a: Self, b: Self) -> Self {
        if a.is_closed() || b.is_closed() {
            Self::Closed
        } else {
            Self::Open
        }
    }

    fn both_closed(a: Self, b: Self) -> Self {
        if a.is_closed() && b.is_closed() {
            Self::Closed
        } else {
            Self::Open
        }
    }
}

/// An interval over the real numbers with independently open or closed bounds.
///
/// Invariant: `lower <= upper`. The range is empty iff both bounds are equal
/// and at least one of them is open.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    lower: f64,
    upper: f64,
    lower_type: BoundType,
    upper_type: BoundType,
}

impl Range {
    /// Creates a range from explicit bounds.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidRange`] if `lower > upper` or either
    /// bound is NaN.
    pub fn new(lower: f64, lower_type: BoundType, upper: f64, upper_type: BoundType) -> Result<Self> {
        if lower.is_nan() || upper.is_nan() || lower > upper {
            return Err(GeometryError::InvalidRange { lower, upper }.into());
        }
        Ok(Self {
            lower,
            upper,
            lower_type,
            upper_type,
        })
    }

    /// `[lower, upper]`
    ///
    /// # Errors
    ///
    /// See [`Range::new`].
    pub fn closed(lower: f64, upper: f64) -> Result<Self> {
        Self::new(lower, BoundType::Closed, upper, BoundType::Closed)
    }

    /// `(lower, upper)`
    ///
    /// # Errors
    ///
    /// See [`Range::new`].
    pub fn open(lower: f64, upper: f64) -> Result<Self> {
        Self::new(lower, BoundType::Open, upper, BoundType::Open)
    }

    /// `[lower, upper)`
    ///
    /// # Errors
    ///
    /// See [`Range::new`].
    pub fn closed_open(lower: f64, upper: f64) -> Result<Self> {
        Self::new(lower, BoundType::Closed, upper, BoundType::Open)
    }

    /// `(lower, upper]`
    ///
    /// # Errors
    ///
    /// See [`Range::new`].
    pub fn open_closed(lower: f64, upper: f64) -> Result<Self> {
        Self::new(lower, BoundType::Open, upper, BoundType::Closed)
    }

    #[must_use]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    #[must_use]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    #[must_use]
    pub fn lower_type(&self) -> BoundType {
        self.lower_type
    }

    #[must_use]
    pub fn upper_type(&self) -> BoundType {
        self.upper_type
    }

    /// Returns `true` if no real number lies in the range.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        #[allow(clippy::float_cmp)]
        let degenerate = self.lower == self.upper;
        degenerate && !(self.lower_type.is_closed() && self.upper_type.is_closed())
    }

    /// `upper - lower`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EmptyRange`] if the range is empty.
    pub fn length(&self) -> Result<f64> {
        if self.is_empty() {
            return Err(GeometryError::EmptyRange.into());
        }
        Ok(self.upper - self.lower)
    }

    /// Exact membership test honoring the bound types.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        let above = value > self.lower || (self.lower_type.is_closed() && value >= self.lower);
        let below = value < self.upper || (self.upper_type.is_closed() && value <= self.upper);
        above && below
    }

    /// Membership test with both bounds widened by `tolerance`.
    #[must_use]
    pub fn fuzzy_contains(&self, value: f64, tolerance: f64) -> bool {
        fuzzy::fuzzy_ge(value, self.lower, tolerance)
            && fuzzy::fuzzy_le(value, self.upper, tolerance)
    }

    /// Returns `true` if `inner` fits inside `self` widened by `tolerance` on both sides.
    #[must_use]
    pub fn fuzzy_encloses(&self, inner: &Range, tolerance: f64) -> bool {
        fuzzy::fuzzy_ge(inner.lower, self.lower, tolerance)
            && fuzzy::fuzzy_le(inner.upper, self.upper, tolerance)
    }

    /// Returns `true` if both bounds agree within `tolerance`.
    #[must_use]
    pub fn fuzzy_eq(&self, other: &Range, tolerance: f64) -> bool {
        fuzzy::fuzzy_eq(self.lower, other.lower, tolerance)
            && fuzzy::fuzzy_eq(self.upper, other.upper, tolerance)
    }

    /// Returns `true` if the ranges share at least one point.
    ///
    /// Ranges touching at a single value intersect only if both include it.
    #[must_use]
    pub fn intersects(&self, other: &Range) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let (lo, lo_type) = max_lower(self, other);
        let (hi, hi_type) = min_upper(self, other);
        #[allow(clippy::float_cmp)]
        let touching = lo == hi && lo_type.is_closed() && hi_type.is_closed();
        lo < hi || touching
    }

    /// Returns `true` if the ranges meet at one value that exactly one of them includes.
    ///
    /// Adjacent ranges union into a single contiguous range without overlapping.
    #[must_use]
    pub fn is_adjacent(&self, other: &Range) -> bool {
        #[allow(clippy::float_cmp)]
        let meets = |a: &Range, b: &Range| {
            a.upper == b.lower && (a.upper_type.is_closed() != b.lower_type.is_closed())
        };
        meets(self, other) || meets(other, self)
    }

    /// Smallest range containing both ranges.
    #[must_use]
    pub fn span(&self, other: &Range) -> Range {
        let (lower, lower_type) = if self.lower < other.lower {
            (self.lower, self.lower_type)
        } else if other.lower < self.lower {
            (other.lower, other.lower_type)
        } else {
            (self.lower, BoundType::either_closed(self.lower_type, other.lower_type))
        };
        let (upper, upper_type) = if self.upper > other.upper {
            (self.upper, self.upper_type)
        } else if other.upper > self.upper {
            (other.upper, other.upper_type)
        } else {
            (self.upper, BoundType::either_closed(self.upper_type, other.upper_type))
        };
        Range {
            lower,
            upper,
            lower_type,
            upper_type,
        }
    }

    /// Range moved by `offset`.
    #[must_use]
    pub fn shift(&self, offset: f64) -> Range {
        Range {
            lower: self.lower + offset,
            upper: self.upper + offset,
            ..*self
        }
    }

    /// Same bounds with a different upper bound type.
    #[must_use]
    pub fn with_upper_bound_type(&self, upper_type: BoundType) -> Range {
        Range {
            upper_type,
            ..*self
        }
    }
}

fn max_lower(a: &Range, b: &Range) -> (f64, BoundType) {
    if a.lower > b.lower {
        (a.lower, a.lower_type)
    } else if b.lower > a.lower {
        (b.lower, b.lower_type)
    } else {
        (a.lower, BoundType::both_closed(a.lower_type, b.lower_type))
    }
}

fn min_upper(a: &Range, b: &Range) -> (f64, BoundType) {
    if a.upper < b.upper {
        (a.upper, a.upper_type)
    } else if b.upper < a.upper {
        (b.upper, b.upper_type)
    } else {
        (a.upper, BoundType::both_closed(a.upper_type, b.upper_type))
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = if self.lower_type.is_closed() { '[' } else { '(' };
        let close = if self.upper_type.is_closed() { ']' } else { ')' };
        write!(f, "{open}{}, {}{close}", self.lower, self.upper)
    }
}

/// A minimal, ordered set of pairwise disjoint ranges.
///
/// Overlapping or adjacent ranges are merged on insertion. Adjacency is
/// exact; no tolerance is applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeSet {
    ranges: Vec<Range>,
}

impl RangeSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from arbitrary ranges.
    #[must_use]
    pub fn from_ranges(ranges: impl IntoIterator<Item = Range>) -> Self {
        let mut set = Self::new();
        for range in ranges {
            set.add(range);
        }
        set
    }

    /// Inserts a range, merging it with every range it overlaps or touches.
    pub fn add(&mut self, range: Range) {
        if range.is_empty() {
            return;
        }
        let mut merged = range;
        self.ranges.retain(|existing| {
            if existing.intersects(&merged) || existing.is_adjacent(&merged) {
                merged = merged.span(existing);
                false
            } else {
                true
            }
        });
        let index = self.ranges.partition_point(|r| r.lower < merged.lower);
        self.ranges.insert(index, merged);
    }

    /// Union of two sets.
    #[must_use]
    pub fn union(&self, other: &RangeSet) -> RangeSet {
        let mut result = self.clone();
        for range in &other.ranges {
            result.add(*range);
        }
        result
    }

    /// Returns `true` if any member intersects `range`.
    #[must_use]
    pub fn intersects(&self, range: &Range) -> bool {
        self.ranges.iter().any(|r| r.intersects(range))
    }

    /// Returns `true` if any member of `self` intersects any member of `other`.
    #[must_use]
    pub fn intersects_set(&self, other: &RangeSet) -> bool {
        other.ranges.iter().any(|r| self.intersects(r))
    }

    /// Exact membership test.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.ranges.iter().any(|r| r.contains(value))
    }

    /// Smallest single range covering the whole set.
    #[must_use]
    pub fn span(&self) -> Option<Range> {
        let first = self.ranges.first()?;
        Some(self.ranges.iter().fold(*first, |acc, r| acc.span(r)))
    }

    /// Members in ascending order.
    #[must_use]
    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::RoadGeomError;

    fn closed(l: f64, u: f64) -> Range {
        Range::closed(l, u).unwrap()
    }

    fn closed_open(l: f64, u: f64) -> Range {
        Range::closed_open(l, u).unwrap()
    }

    fn open_closed(l: f64, u: f64) -> Range {
        Range::open_closed(l, u).unwrap()
    }

    #[test]
    fn inverted_bounds_rejected() {
        assert!(matches!(
            Range::closed(2.0, 1.0).unwrap_err(),
            RoadGeomError::Geometry(GeometryError::InvalidRange { .. })
        ));
    }

    #[test]
    fn emptiness_depends_on_bound_types() {
        assert!(!closed(1.0, 1.0).is_empty());
        assert!(closed_open(1.0, 1.0).is_empty());
        assert!(Range::open(1.0, 1.0).unwrap().is_empty());
        assert!(!closed_open(1.0, 2.0).is_empty());
    }

    #[test]
    fn length_of_empty_range_fails() {
        assert!((closed_open(2.0, 5.5).length().unwrap() - 3.5).abs() < 1e-12);
        assert!(closed(1.0, 1.0).length().unwrap().abs() < 1e-12);
        assert!(Range::open(1.0, 1.0).unwrap().length().is_err());
    }

    #[test]
    fn contains_honors_bounds() {
        let r = closed_open(0.0, 5.0);
        assert!(r.contains(0.0));
        assert!(r.contains(4.999));
        assert!(!r.contains(5.0));
        assert!(!open_closed(0.0, 5.0).contains(0.0));
        assert!(open_closed(0.0, 5.0).contains(5.0));
    }

    #[test]
    fn fuzzy_encloses_widens_outer() {
        let outer = closed(0.0, 10.0);
        assert!(outer.fuzzy_encloses(&closed(0.0, 10.0 + 1e-9), 1e-7));
        assert!(outer.fuzzy_encloses(&closed(2.0, 3.0), 1e-7));
        assert!(!outer.fuzzy_encloses(&closed(-0.1, 3.0), 1e-7));
        assert!(outer.fuzzy_contains(-1e-8, 1e-7));
    }

    #[test]
    fn touching_closed_ranges_intersect() {
        assert!(closed(0.0, 1.0).intersects(&closed(1.0, 2.0)));
        assert!(!closed_open(0.0, 1.0).intersects(&closed(1.0, 2.0)));
        assert!(!closed(0.0, 1.0).intersects(&open_closed(1.0, 2.0)));
        assert!(closed(0.0, 2.0).intersects(&closed(1.0, 3.0)));
        assert!(!closed(0.0, 1.0).intersects(&closed(2.0, 3.0)));
    }

    #[test]
    fn adjacency_requires_exactly_one_closed_side() {
        assert!(closed_open(0.0, 1.0).is_adjacent(&closed(1.0, 2.0)));
        assert!(closed(1.0, 2.0).is_adjacent(&closed_open(0.0, 1.0)));
        assert!(!closed(0.0, 1.0).is_adjacent(&closed(1.0, 2.0)));
        assert!(!Range::open(0.0, 1.0).unwrap().is_adjacent(&open_closed(1.0, 2.0)));
    }

    #[test]
    fn set_merges_adjacent_ranges() {
        let set = RangeSet::from_ranges([closed_open(0.0, 5.0), closed(5.0, 10.0)]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.ranges()[0], closed(0.0, 10.0));
    }

    #[test]
    fn set_keeps_ranges_separated_by_a_missing_point() {
        let set = RangeSet::from_ranges([closed_open(0.0, 5.0), open_closed(5.0, 10.0)]);
        assert_eq!(set.len(), 2);
        assert!(!set.contains(5.0));
        assert!(set.contains(7.0));
    }

    #[test]
    fn set_union_is_ordered_and_minimal() {
        let a = RangeSet::from_ranges([closed(8.0, 9.0), closed(0.0, 1.0)]);
        let b = RangeSet::from_ranges([closed(0.5, 3.0), closed(20.0, 21.0), closed(2.5, 8.5)]);
        let union = a.union(&b);
        assert_eq!(union.ranges(), &[closed(0.0, 9.0), closed(20.0, 21.0)]);
        assert_eq!(union.span().unwrap(), closed(0.0, 21.0));
    }

    #[test]
    fn set_intersection_queries() {
        let set = RangeSet::from_ranges([closed_open(0.0, 1.0), closed(3.0, 4.0)]);
        assert!(!set.intersects(&closed(1.0, 2.0)));
        assert!(set.intersects(&closed(2.0, 3.0)));
        assert!(set.intersects_set(&RangeSet::from_ranges([closed(3.5, 6.0)])));
    }

    #[test]
    fn display_shows_bound_types() {
        assert_eq!(closed_open(0.0, 2.5).to_string(), "[0, 2.5)");
    }
}
