use std::collections::{HashMap, HashSet, VecDeque};

use spade::handles::FixedVertexHandle;
use spade::{
    ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation,
};

use crate::error::{Result, TessellationError};
use crate::math::Point2;

/// A planar polygon triangulation backend.
///
/// [`crate::tessellation::Triangulate`] converts a panic raised by any
/// backend into [`TessellationError::TriangulationFailure`].
pub trait Triangulator: Send + Sync {
    /// Triangulates the interior of a simple closed polygon.
    ///
    /// Returns index triples into `polygon`. Implementations need not
    /// preserve the polygon's winding.
    ///
    /// # Errors
    ///
    /// Returns [`TessellationError::TriangulationFailure`] if the backend
    /// cannot triangulate the input.
    fn triangulate(&self, polygon: &[Point2]) -> Result<Vec<[usize; 3]>>;
}

/// Constrained Delaunay triangulation backed by `spade`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpadeTriangulator;

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

impl Triangulator for SpadeTriangulator {
    fn triangulate(&self, polygon: &[Point2]) -> Result<Vec<[usize; 3]>> {
        if polygon.len() < 3 {
            return Err(TessellationError::InvalidParameters(format!(
                "polygon needs at least 3 points, got {}",
                polygon.len()
            ))
            .into());
        }

        let mut cdt = Cdt::new();
        let handles = insert_polygon(&mut cdt, polygon)?;

        // Coinciding input points share one vertex; the first occurrence wins
        let mut polygon_index: HashMap<usize, usize> = HashMap::with_capacity(handles.len());
        for (i, handle) in handles.iter().enumerate() {
            polygon_index.entry(handle.index()).or_insert(i);
        }
        let lookup = |vertex: usize| {
            polygon_index.get(&vertex).copied().ok_or_else(|| {
                TessellationError::TriangulationFailure(
                    "triangulation introduced a vertex not in the polygon".into(),
                )
            })
        };

        let interior = interior_faces(&cdt);
        cdt.inner_faces()
            .filter(|face| interior.contains(&face.fix().index()))
            .map(|face| -> Result<[usize; 3]> {
                let [a, b, c] = face.vertices().map(|v| v.fix().index());
                Ok([lookup(a)?, lookup(b)?, lookup(c)?])
            })
            .collect()
    }
}

/// Inserts the polygon's vertices and closes them into a loop of
/// constraint edges.
///
/// An edge crossing an earlier one is a failure rather than a split.
fn insert_polygon(cdt: &mut Cdt, polygon: &[Point2]) -> Result<Vec<FixedVertexHandle>> {
    let handles = polygon
        .iter()
        .map(|p| cdt.insert(SpadePoint2::new(p.x, p.y)))
        .collect::<std::result::Result<Vec<_>, InsertionError>>()
        .map_err(|e| TessellationError::TriangulationFailure(format!("vertex insertion failed: {e}")))?;

    let closing = handles.iter().cycle().skip(1);
    for (edge, (&from, &to)) in handles.iter().zip(closing).enumerate() {
        if from == to {
            continue;
        }
        if !cdt.can_add_constraint(from, to) {
            return Err(TessellationError::TriangulationFailure(format!(
                "polygon edge {edge} intersects another edge"
            ))
            .into());
        }
        cdt.add_constraint(from, to);
    }
    Ok(handles)
}

/// Indices of the faces enclosed by the constraint loop.
///
/// Walks outward-in from the unbounded face; crossing a constraint edge
/// flips between outside and inside.
fn interior_faces(cdt: &Cdt) -> HashSet<usize> {
    let mut neighbors: HashMap<usize, Vec<(usize, bool)>> = HashMap::new();
    for edge in cdt.directed_edges() {
        let crossing = cdt.is_constraint_edge(edge.as_undirected().fix());
        neighbors
            .entry(edge.face().fix().index())
            .or_default()
            .push((edge.rev().face().fix().index(), crossing));
    }

    let outer = cdt.outer_face().fix().index();
    let mut inside = HashMap::from([(outer, false)]);
    let mut pending = VecDeque::from([outer]);
    while let Some(face) = pending.pop_front() {
        let Some(&face_inside) = inside.get(&face) else {
            continue;
        };
        for &(neighbor, crossing) in neighbors.get(&face).into_iter().flatten() {
            inside.entry(neighbor).or_insert_with(|| {
                pending.push_back(neighbor);
                face_inside ^ crossing
            });
        }
    }

    inside
        .into_iter()
        .filter_map(|(face, is_inside)| is_inside.then_some(face))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::RoadGeomError;

    fn signed_area(polygon: &[Point2], t: &[usize; 3]) -> f64 {
        let (a, b, c) = (polygon[t[0]], polygon[t[1]], polygon[t[2]]);
        (b - a).perp(&(c - a)) / 2.0
    }

    #[test]
    fn square_produces_2_triangles() {
        let square = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        let triangles = SpadeTriangulator.triangulate(&square).unwrap();
        assert_eq!(triangles.len(), 2);
        let area: f64 = triangles.iter().map(|t| signed_area(&square, t).abs()).sum();
        assert!((area - 1.0).abs() < 1e-12);
    }

    #[test]
    fn l_shape_excludes_notch() {
        let l_shape = [
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 2.0),
            Point2::new(0.0, 2.0),
        ];
        let triangles = SpadeTriangulator.triangulate(&l_shape).unwrap();
        assert_eq!(triangles.len(), 4);
        let area: f64 = triangles.iter().map(|t| signed_area(&l_shape, t).abs()).sum();
        assert!((area - 3.0).abs() < 1e-12);
    }

    #[test]
    fn u_shape_leaves_both_notch_faces_outside() {
        let u_shape = [
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 0.0),
            Point2::new(3.0, 3.0),
            Point2::new(2.0, 3.0),
            Point2::new(2.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 3.0),
            Point2::new(0.0, 3.0),
        ];
        let triangles = SpadeTriangulator.triangulate(&u_shape).unwrap();
        assert_eq!(triangles.len(), 6);
        let area: f64 = triangles.iter().map(|t| signed_area(&u_shape, t).abs()).sum();
        assert!((area - 7.0).abs() < 1e-12);
    }

    #[test]
    fn self_intersecting_polygon_fails() {
        let bowtie = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ];
        let err = SpadeTriangulator.triangulate(&bowtie).unwrap_err();
        assert!(matches!(
            err,
            RoadGeomError::Tessellation(TessellationError::TriangulationFailure(_))
        ));
    }

    #[test]
    fn non_finite_point_fails() {
        let polygon = [
            Point2::new(0.0, 0.0),
            Point2::new(f64::NAN, 0.0),
            Point2::new(0.0, 1.0),
        ];
        assert!(SpadeTriangulator.triangulate(&polygon).is_err());
    }
}
