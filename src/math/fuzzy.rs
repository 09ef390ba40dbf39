//! Tolerance-based comparisons.
//!
//! Every function takes the tolerance explicitly; none of the geometry
//! algorithms compare floats for exact equality.

use super::Point3;

/// Returns `true` if `a` and `b` differ by at most `tolerance`.
#[must_use]
pub fn fuzzy_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

/// Returns `true` if `value` is within `tolerance` of zero.
#[must_use]
pub fn fuzzy_zero(value: f64, tolerance: f64) -> bool {
    value.abs() <= tolerance
}

/// Returns `true` if `a <= b + tolerance`.
#[must_use]
pub fn fuzzy_le(a: f64, b: f64, tolerance: f64) -> bool {
    a <= b + tolerance
}

/// Returns `true` if `a >= b - tolerance`.
#[must_use]
pub fn fuzzy_ge(a: f64, b: f64, tolerance: f64) -> bool {
    a >= b - tolerance
}

/// Returns `true` if two 3D points are within `tolerance` of each other.
#[must_use]
pub fn points_fuzzy_eq(a: &Point3, b: &Point3, tolerance: f64) -> bool {
    (a - b).norm() <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eq_within_tolerance() {
        assert!(fuzzy_eq(1.0, 1.0 + 1e-8, 1e-7));
        assert!(!fuzzy_eq(1.0, 1.0 + 1e-6, 1e-7));
    }

    #[test]
    fn ordering_widens_by_tolerance() {
        assert!(fuzzy_le(1.00001, 1.0, 1e-4));
        assert!(!fuzzy_le(1.1, 1.0, 1e-4));
        assert!(fuzzy_ge(0.99999, 1.0, 1e-4));
    }

    #[test]
    fn zero_and_points() {
        assert!(fuzzy_zero(-1e-9, 1e-7));
        assert!(points_fuzzy_eq(
            &Point3::new(1.0, 2.0, 3.0),
            &Point3::new(1.0, 2.0, 3.0 + 1e-9),
            1e-7
        ));
        assert!(!points_fuzzy_eq(&Point3::origin(), &Point3::new(0.1, 0.0, 0.0), 1e-3));
    }
}
