use crate::math::Point3;

use super::Triangle3;

/// Meshes the strip between two sample sequences of equal length.
///
/// Each quad `R_i, R_{i+1}, L_{i+1}, L_i` becomes two triangles, wound so
/// that the normal points up when the left boundary lies to the left of the
/// right one. Triangles that collapse within `tolerance`, where the
/// boundaries touch, are skipped. Extra samples on the longer side are
/// ignored.
#[must_use]
pub fn triangulate_ruled_strip(left: &[Point3], right: &[Point3], tolerance: f64) -> Vec<Triangle3> {
    let n = left.len().min(right.len());
    let mut triangles = Vec::with_capacity(2 * n.saturating_sub(1));
    for i in 1..n {
        let candidates = [
            Triangle3::new(right[i - 1], right[i], left[i]),
            Triangle3::new(right[i - 1], left[i], left[i - 1]),
        ];
        triangles.extend(candidates.into_iter().filter(|t| !t.is_colinear(tolerance)));
    }
    triangles
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::Vector3;

    #[test]
    fn strip_normals_point_up() {
        let left = [Point3::new(0.0, 1.0, 0.0), Point3::new(1.0, 1.0, 0.0), Point3::new(2.0, 1.0, 0.0)];
        let right = [Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)];
        let triangles = triangulate_ruled_strip(&left, &right, 1e-7);
        assert_eq!(triangles.len(), 4);
        for t in &triangles {
            assert_relative_eq!(t.unit_normal().unwrap_or_default(), Vector3::z(), epsilon = 1e-12);
        }
    }

    #[test]
    fn touching_boundaries_collapse_to_one_triangle() {
        // Tapered end: both boundaries meet at the last sample
        let left = [Point3::new(0.0, 1.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        let right = [Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        let triangles = triangulate_ruled_strip(&left, &right, 1e-7);
        assert_eq!(triangles.len(), 1);
        assert_relative_eq!(triangles[0].area(), 0.5);
    }
}
