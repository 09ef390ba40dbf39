use super::fuzzy::{fuzzy_zero, points_fuzzy_eq};
use super::{Point3, Vector3, EPSILON};

/// Polygon normal by Newell's method, not normalized.
///
/// The magnitude equals twice the polygon area; the direction follows the
/// right-hand rule over the vertex order.
#[must_use]
pub fn newell_normal(points: &[Point3]) -> Vector3 {
    let n = points.len();
    let mut normal = Vector3::new(0.0, 0.0, 0.0);
    for i in 0..n {
        let curr = &points[i];
        let next = &points[(i + 1) % n];
        normal.x += (curr.y - next.y) * (curr.z + next.z);
        normal.y += (curr.z - next.z) * (curr.x + next.x);
        normal.z += (curr.x - next.x) * (curr.y + next.y);
    }
    normal
}

/// Unit polygon normal, or `None` if the polygon has no area.
#[must_use]
pub fn unit_normal(points: &[Point3]) -> Option<Vector3> {
    let normal = newell_normal(points);
    let len = normal.norm();
    (len > EPSILON).then(|| normal / len)
}

/// Two unit directions spanning the plane orthogonal to `normal`.
///
/// The returned `(u, v)` satisfy `u x v = normal`, so a counter-clockwise
/// loop in `(u, v)` coordinates has `normal` as its right-hand normal.
#[must_use]
pub fn plane_basis(normal: &Vector3) -> (Vector3, Vector3) {
    // Choose a reference vector not parallel to the normal
    let reference = if normal.x.abs() < 0.9 {
        Vector3::new(1.0, 0.0, 0.0)
    } else {
        Vector3::new(0.0, 1.0, 0.0)
    };
    let u_dir = normal.cross(&reference).normalize();
    let v_dir = normal.cross(&u_dir);
    (u_dir, v_dir)
}

/// Compute the area of a 3D polygon (coplanar points).
///
/// Uses the cross-product summation method projected along the polygon normal.
#[must_use]
pub fn polygon_area_3d(points: &[Point3], normal: &Vector3) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let n = points.len();
    let mut cross_sum = Vector3::new(0.0, 0.0, 0.0);
    let o = &points[0];
    for i in 1..n {
        let a = points[i] - o;
        let b = points[(i + 1) % n] - o;
        cross_sum += a.cross(&b);
    }
    0.5 * cross_sum.dot(normal).abs()
}

/// Arithmetic mean of the points.
#[must_use]
pub fn centroid(points: &[Point3]) -> Point3 {
    if points.is_empty() {
        return Point3::origin();
    }
    #[allow(clippy::cast_precision_loss)]
    let inv_n = 1.0 / points.len() as f64;
    let sum = points
        .iter()
        .fold(Vector3::new(0.0, 0.0, 0.0), |acc, p| acc + p.coords);
    Point3::from(sum * inv_n)
}

/// Distance from `p` to the closed segment `a`-`b`.
#[must_use]
pub fn distance_to_segment(p: &Point3, a: &Point3, b: &Point3) -> f64 {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq < EPSILON * EPSILON {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}

/// Returns `true` if `p` lies on the segment `a`-`b` within `tolerance`.
#[must_use]
pub fn is_on_segment(p: &Point3, a: &Point3, b: &Point3, tolerance: f64) -> bool {
    fuzzy_zero(distance_to_segment(p, a, b), tolerance)
}

/// Returns `true` if the three points lie on a common line within `tolerance`.
///
/// Measures the height of the triangle over its longest edge.
#[must_use]
pub fn are_colinear(a: &Point3, b: &Point3, c: &Point3, tolerance: f64) -> bool {
    let longest = (b - a).norm().max((c - b).norm()).max((a - c).norm());
    if fuzzy_zero(longest, tolerance) {
        return true;
    }
    let double_area = (b - a).cross(&(c - a)).norm();
    fuzzy_zero(double_area / longest, tolerance)
}

/// Returns `true` if all points lie on a common line within `tolerance`.
#[must_use]
pub fn all_colinear(points: &[Point3], tolerance: f64) -> bool {
    let Some(first) = points.first() else {
        return true;
    };
    let farthest = points
        .iter()
        .max_by(|a, b| (*a - first).norm().total_cmp(&(*b - first).norm()))
        .unwrap_or(first);
    if points_fuzzy_eq(farthest, first, tolerance) {
        return true;
    }
    points
        .iter()
        .all(|p| are_colinear(first, farthest, p, tolerance))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn unit_square() -> Vec<Point3> {
        vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn newell_normal_of_ccw_square_points_up() {
        let n = unit_normal(&unit_square()).unwrap_or_else(Vector3::zeros);
        assert_relative_eq!(n, Vector3::z(), epsilon = 1e-12);
        assert_relative_eq!(newell_normal(&unit_square()).norm(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_polygon_has_no_normal() {
        assert!(unit_normal(&[p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0)]).is_none());
    }

    #[test]
    fn basis_is_right_handed() {
        let normal = Vector3::new(0.3, -0.5, 0.8).normalize();
        let (u, v) = plane_basis(&normal);
        assert_relative_eq!(u.cross(&v), normal, epsilon = 1e-12);
        assert_relative_eq!(u.dot(&normal), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn unit_square_area() {
        let area = polygon_area_3d(&unit_square(), &Vector3::z());
        assert_relative_eq!(area, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn colinearity_uses_tolerance() {
        assert!(are_colinear(&p(0.0, 0.0, 0.0), &p(1.0, 1e-9, 0.0), &p(2.0, 0.0, 0.0), 1e-7));
        assert!(!are_colinear(&p(0.0, 0.0, 0.0), &p(1.0, 0.1, 0.0), &p(2.0, 0.0, 0.0), 1e-7));
        assert!(all_colinear(
            &[p(0.0, 0.0, 0.0), p(3.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0)],
            1e-7
        ));
        assert!(!all_colinear(&unit_square(), 1e-7));
    }

    #[test]
    fn segment_membership() {
        assert!(is_on_segment(&p(0.5, 0.0, 0.0), &p(0.0, 0.0, 0.0), &p(1.0, 0.0, 0.0), 1e-7));
        assert!(!is_on_segment(&p(1.5, 0.0, 0.0), &p(0.0, 0.0, 0.0), &p(1.0, 0.0, 0.0), 1e-7));
    }

    #[test]
    fn centroid_of_square() {
        assert_relative_eq!(centroid(&unit_square()), p(0.5, 0.5, 0.0));
    }
}
