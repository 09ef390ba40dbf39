use crate::config::GeometryConfig;
use crate::error::Result;
use crate::geometry::curve::Curve3;
use crate::geometry::surface::ParametricBoundedSurface;

/// Builds a ruled [`ParametricBoundedSurface`] between two boundary curves.
pub struct BuildParametricBoundedSurface {
    left: Box<dyn Curve3>,
    right: Box<dyn Curve3>,
    tolerance: f64,
    step_size: f64,
}

impl BuildParametricBoundedSurface {
    /// Creates a new `BuildParametricBoundedSurface` operation.
    #[must_use]
    pub fn new(
        left: Box<dyn Curve3>,
        right: Box<dyn Curve3>,
        tolerance: f64,
        step_size: f64,
    ) -> Self {
        Self {
            left,
            right,
            tolerance,
            step_size,
        }
    }

    /// Creates the operation with tolerance and step size taken from `config`.
    #[must_use]
    pub fn with_config(
        left: Box<dyn Curve3>,
        right: Box<dyn Curve3>,
        config: &GeometryConfig,
    ) -> Self {
        Self::new(left, right, config.tolerance, config.discretization_step_size)
    }

    /// Executes the operation, consuming the boundary curves.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::GeometryError::DomainMismatch`] if the
    /// boundary domains differ, and the errors of
    /// [`ParametricBoundedSurface::new`] otherwise.
    pub fn execute(self) -> Result<ParametricBoundedSurface> {
        ParametricBoundedSurface::new(self.left, self.right, self.tolerance, self.step_size)
    }
}
