use crate::error::Result;
use crate::geometry::surface::Polyhedron;
use crate::math::Vector3;
use crate::operations::shaping::Extrude;

use super::MakeRectangle;

/// Creates a cuboid standing on the xy-plane.
///
/// The base is centered on the origin; the solid spans `z` in `[0, height]`.
pub struct MakeCuboid {
    length: f64,
    width: f64,
    height: f64,
    tolerance: f64,
}

impl MakeCuboid {
    /// Creates a new `MakeCuboid` operation.
    ///
    /// `length` runs along x, `width` along y.
    #[must_use]
    pub fn new(length: f64, width: f64, height: f64, tolerance: f64) -> Self {
        Self {
            length,
            width,
            height,
            tolerance,
        }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ConstructionError::InvalidInput`] if any
    /// dimension is not larger than the tolerance.
    pub fn execute(&self) -> Result<Polyhedron> {
        let base = MakeRectangle::new(self.length, self.width, self.tolerance).execute()?;
        Extrude::new(base, Vector3::new(0.0, 0.0, self.height), self.tolerance).execute()
    }
}
