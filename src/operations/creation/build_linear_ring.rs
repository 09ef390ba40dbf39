use crate::error::Result;
use crate::geometry::surface::LinearRing;
use crate::math::Point3;

/// Builds a [`LinearRing`] from an ordered outline.
///
/// A closing vertex equal to the first one is accepted and dropped.
pub struct BuildLinearRing {
    vertices: Vec<Point3>,
    tolerance: f64,
}

impl BuildLinearRing {
    /// Creates a new `BuildLinearRing` operation.
    #[must_use]
    pub fn new(vertices: Vec<Point3>, tolerance: f64) -> Self {
        Self {
            vertices,
            tolerance,
        }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ConstructionError::DegenerateRing`] if fewer
    /// than three non-colinear vertices remain after redundant ones are removed.
    pub fn execute(&self) -> Result<LinearRing> {
        LinearRing::new(&self.vertices, self.tolerance)
    }
}
