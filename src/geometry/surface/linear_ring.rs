use crate::error::{ConstructionError, Result};
use crate::math::fuzzy::{fuzzy_zero, points_fuzzy_eq};
use crate::math::polygon_3d::{
    all_colinear, centroid, is_on_segment, polygon_area_3d, unit_normal,
};
use crate::math::{Affine3D, Point3, Vector3};

/// A closed planar polygon outline.
///
/// The closing edge is implicit: the first vertex is never repeated at the
/// end. Construction removes redundant vertices and guarantees at least
/// three vertices that are not all colinear.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRing {
    vertices: Vec<Point3>,
    normal: Vector3,
}

impl LinearRing {
    /// Creates a ring from an ordered outline.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::DegenerateRing`] if fewer than three
    /// vertices remain after cleaning, if they are colinear, or if the
    /// outline encloses no area.
    pub fn new(vertices: &[Point3], tolerance: f64) -> Result<Self> {
        let vertices = remove_redundant_vertices(vertices, tolerance);
        if vertices.len() < 3 {
            return Err(ConstructionError::DegenerateRing(format!(
                "{} distinct vertices remain, at least 3 required",
                vertices.len()
            ))
            .into());
        }
        if all_colinear(&vertices, tolerance) {
            return Err(ConstructionError::DegenerateRing("vertices are colinear".into()).into());
        }
        let normal = unit_normal(&vertices)
            .ok_or_else(|| ConstructionError::DegenerateRing("outline encloses no area".into()))?;
        Ok(Self { vertices, normal })
    }

    /// Vertices in order, without the closing repetition.
    #[must_use]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always `false`; a ring holds at least three vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Unit normal following the right-hand rule over the vertex order.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        polygon_area_3d(&self.vertices, &self.normal)
    }

    #[must_use]
    pub fn centroid(&self) -> Point3 {
        centroid(&self.vertices)
    }

    /// Ring with the opposite orientation.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            vertices: self.vertices.iter().rev().copied().collect(),
            normal: -self.normal,
        }
    }

    /// Returns `true` if every vertex lies within `tolerance` of the best-fit plane.
    #[must_use]
    pub fn is_planar(&self, tolerance: f64) -> bool {
        let origin = self.centroid();
        self.vertices
            .iter()
            .all(|p| fuzzy_zero((p - origin).dot(&self.normal), tolerance))
    }

    /// Applies a transform and rebuilds the ring.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::DegenerateRing`] if the transform collapses the ring.
    pub fn transformed(&self, affine: &Affine3D, tolerance: f64) -> Result<Self> {
        let vertices: Vec<Point3> = self
            .vertices
            .iter()
            .map(|p| affine.transform_point(p))
            .collect();
        Self::new(&vertices, tolerance)
    }
}

/// Removes repeated vertices and vertices lying on the segment between their
/// neighbors, treating the outline as closed.
///
/// The result is a fixed point: cleaning it again returns it unchanged.
#[must_use]
pub fn remove_redundant_vertices(vertices: &[Point3], tolerance: f64) -> Vec<Point3> {
    let mut points = vertices.to_vec();
    while points.len() >= 2 {
        let n = points.len();
        let redundant = (0..n).find(|&i| {
            let prev = &points[(i + n - 1) % n];
            let curr = &points[i];
            let next = &points[(i + 1) % n];
            points_fuzzy_eq(curr, next, tolerance)
                || (n >= 3 && is_on_segment(curr, prev, next, tolerance))
        });
        match redundant {
            Some(i) => {
                points.remove(i);
            }
            None => break,
        }
    }
    points
}
