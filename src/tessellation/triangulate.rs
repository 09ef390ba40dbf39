use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::debug;

use crate::config::GeometryConfig;
use crate::error::{Result, TessellationError};
use crate::math::polygon_3d::{plane_basis, unit_normal};
use crate::math::{Point2, Point3, Vector3};

use super::{SpadeTriangulator, Triangle3, Triangulator};

/// Triangulates a planar polygon given by its 3D vertices.
///
/// Triangles are reoriented to agree with the winding of the input: any
/// triangle whose normal deviates from the polygon's Newell normal by more
/// than the orientation threshold is reversed.
pub struct Triangulate {
    vertices: Vec<Point3>,
    tolerance: f64,
    orientation_threshold_degrees: f64,
    triangulator: Box<dyn Triangulator>,
}

impl Triangulate {
    /// Creates a new `Triangulate` operation using the spade backend and
    /// the default orientation threshold.
    #[must_use]
    pub fn new(vertices: Vec<Point3>, tolerance: f64) -> Self {
        Self {
            vertices,
            tolerance,
            orientation_threshold_degrees: GeometryConfig::DEFAULT_ORIENTATION_THRESHOLD_DEGREES,
            triangulator: Box::new(SpadeTriangulator),
        }
    }

    /// Creates the operation with tolerance and threshold taken from `config`.
    #[must_use]
    pub fn with_config(vertices: Vec<Point3>, config: &GeometryConfig) -> Self {
        Self::new(vertices, config.tolerance)
            .with_orientation_threshold(config.orientation_threshold_degrees)
    }

    /// Sets the angle in degrees above which a triangle is reversed.
    #[must_use]
    pub fn with_orientation_threshold(mut self, degrees: f64) -> Self {
        self.orientation_threshold_degrees = degrees;
        self
    }

    /// Replaces the triangulation backend.
    #[must_use]
    pub fn with_triangulator(mut self, triangulator: Box<dyn Triangulator>) -> Self {
        self.triangulator = triangulator;
        self
    }

    /// Executes the triangulation.
    ///
    /// # Errors
    ///
    /// Returns [`TessellationError::InvalidParameters`] for fewer than three
    /// vertices or a threshold outside `(0, 180]`,
    /// [`TessellationError::ColinearTriangle`] if any produced triangle is
    /// colinear within tolerance, and
    /// [`TessellationError::TriangulationFailure`] if the polygon encloses
    /// no area or the backend fails or panics.
    pub fn execute(&self) -> Result<Vec<Triangle3>> {
        if self.vertices.len() < 3 {
            return Err(TessellationError::InvalidParameters(format!(
                "polygon needs at least 3 vertices, got {}",
                self.vertices.len()
            ))
            .into());
        }
        if !(self.orientation_threshold_degrees > 0.0 && self.orientation_threshold_degrees <= 180.0) {
            return Err(TessellationError::InvalidParameters(format!(
                "orientation threshold must be in (0, 180] degrees, got {}",
                self.orientation_threshold_degrees
            ))
            .into());
        }

        let triangles = if self.vertices.len() == 3 {
            vec![Triangle3::new(self.vertices[0], self.vertices[1], self.vertices[2])]
        } else {
            self.triangulate_projected()?
        };

        if let Some(index) = triangles.iter().position(|t| t.is_colinear(self.tolerance)) {
            return Err(TessellationError::ColinearTriangle { index }.into());
        }

        let Some(reference) = unit_normal(&self.vertices) else {
            return Err(TessellationError::TriangulationFailure(
                "polygon encloses no area".into(),
            )
            .into());
        };
        Ok(self.correct_orientation(triangles, &reference))
    }

    /// Runs the backend on the projection onto the polygon's plane.
    fn triangulate_projected(&self) -> Result<Vec<Triangle3>> {
        let normal = unit_normal(&self.vertices).ok_or_else(|| {
            TessellationError::TriangulationFailure("polygon encloses no area".into())
        })?;
        let (u, v) = plane_basis(&normal);
        let origin = self.vertices[0];
        let projected: Vec<Point2> = self
            .vertices
            .iter()
            .map(|p| {
                let d = p - origin;
                Point2::new(d.dot(&u), d.dot(&v))
            })
            .collect();

        let indices = panic::catch_unwind(AssertUnwindSafe(|| {
            self.triangulator.triangulate(&projected)
        }))
        .unwrap_or_else(|payload| {
            Err(TessellationError::TriangulationFailure(format!(
                "triangulation backend panicked: {}",
                panic_message(payload.as_ref())
            ))
            .into())
        })?;
        if indices.is_empty() {
            return Err(TessellationError::TriangulationFailure(
                "backend produced no triangles".into(),
            )
            .into());
        }
        indices
            .iter()
            .map(|&[a, b, c]| {
                match (self.vertices.get(a), self.vertices.get(b), self.vertices.get(c)) {
                    (Some(a), Some(b), Some(c)) => Ok(Triangle3::new(*a, *b, *c)),
                    _ => Err(TessellationError::TriangulationFailure(format!(
                        "backend returned out-of-range index in [{a}, {b}, {c}]"
                    ))
                    .into()),
                }
            })
            .collect()
    }

    fn correct_orientation(&self, triangles: Vec<Triangle3>, reference: &Vector3) -> Vec<Triangle3> {
        let threshold = self.orientation_threshold_degrees.to_radians();
        triangles
            .into_iter()
            .enumerate()
            .map(|(index, triangle)| {
                let Some(normal) = triangle.unit_normal() else {
                    return triangle;
                };
                let angle = normal.dot(reference).clamp(-1.0, 1.0).acos();
                if angle > threshold {
                    debug!(index, angle = angle.to_degrees(), "reversing triangle orientation");
                    triangle.reversed()
                } else {
                    triangle
                }
            })
            .collect()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}

/// Triangulates a planar polygon with the default backend and threshold.
///
/// # Errors
///
/// See [`Triangulate::execute`].
pub fn triangulate(vertices: &[Point3], tolerance: f64) -> Result<Vec<Triangle3>> {
    Triangulate::new(vertices.to_vec(), tolerance).execute()
}
