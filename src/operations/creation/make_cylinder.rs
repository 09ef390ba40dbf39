use crate::config::GeometryConfig;
use crate::error::Result;
use crate::geometry::surface::Polyhedron;
use crate::math::Vector3;
use crate::operations::shaping::Extrude;

use super::MakeCircle;

/// Creates a prism approximating an upright cylinder.
///
/// The base circle is centered on the origin; the solid spans `z` in
/// `[0, height]`.
pub struct MakeCylinder {
    radius: f64,
    height: f64,
    slices: usize,
    tolerance: f64,
}

impl MakeCylinder {
    /// Creates a new `MakeCylinder` operation.
    #[must_use]
    pub fn new(radius: f64, height: f64, slices: usize, tolerance: f64) -> Self {
        Self {
            radius,
            height,
            slices,
            tolerance,
        }
    }

    /// Creates the operation with slice count and tolerance taken from `config`.
    #[must_use]
    pub fn with_config(radius: f64, height: f64, config: &GeometryConfig) -> Self {
        Self::new(radius, height, config.circle_slices, config.tolerance)
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ConstructionError::InvalidInput`] if the
    /// radius or height is not larger than the tolerance, or fewer than three
    /// slices are requested.
    pub fn execute(&self) -> Result<Polyhedron> {
        let base = MakeCircle::new(self.radius, self.slices, self.tolerance).execute()?;
        Extrude::new(base, Vector3::new(0.0, 0.0, self.height), self.tolerance).execute()
    }
}
