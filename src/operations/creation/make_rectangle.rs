use crate::error::{ConstructionError, Result};
use crate::geometry::surface::LinearRing;
use crate::math::Point3;

/// Creates an axis-aligned rectangle in the xy-plane, centered on the
/// origin and wound counter-clockwise.
pub struct MakeRectangle {
    width: f64,
    height: f64,
    tolerance: f64,
}

impl MakeRectangle {
    /// Creates a new `MakeRectangle` operation.
    ///
    /// `width` runs along x, `height` along y.
    #[must_use]
    pub fn new(width: f64, height: f64, tolerance: f64) -> Self {
        Self {
            width,
            height,
            tolerance,
        }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvalidInput`] if either side is not
    /// larger than the tolerance.
    pub fn execute(&self) -> Result<LinearRing> {
        if !(self.width > self.tolerance && self.height > self.tolerance) {
            return Err(ConstructionError::InvalidInput(format!(
                "rectangle sides must be positive, got {} x {}",
                self.width, self.height
            ))
            .into());
        }
        let (hx, hy) = (self.width / 2.0, self.height / 2.0);
        LinearRing::new(
            &[
                Point3::new(-hx, -hy, 0.0),
                Point3::new(hx, -hy, 0.0),
                Point3::new(hx, hy, 0.0),
                Point3::new(-hx, hy, 0.0),
            ],
            self.tolerance,
        )
    }
}
