use std::f64::consts::TAU;

use crate::config::GeometryConfig;
use crate::error::{ConstructionError, Result};
use crate::geometry::surface::LinearRing;
use crate::math::Point3;

/// Creates a regular polygon approximating a circle in the xy-plane,
/// centered on the origin and wound counter-clockwise.
///
/// The first vertex lies on the positive x-axis.
pub struct MakeCircle {
    radius: f64,
    slices: usize,
    tolerance: f64,
}

impl MakeCircle {
    /// Creates a new `MakeCircle` operation.
    #[must_use]
    pub fn new(radius: f64, slices: usize, tolerance: f64) -> Self {
        Self {
            radius,
            slices,
            tolerance,
        }
    }

    /// Creates the operation with slice count and tolerance taken from `config`.
    #[must_use]
    pub fn with_config(radius: f64, config: &GeometryConfig) -> Self {
        Self::new(radius, config.circle_slices, config.tolerance)
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvalidInput`] if the radius is not
    /// larger than the tolerance or fewer than three slices are requested.
    pub fn execute(&self) -> Result<LinearRing> {
        if !self.radius.is_finite() || self.radius <= self.tolerance {
            return Err(ConstructionError::InvalidInput(format!(
                "circle radius must be positive, got {}",
                self.radius
            ))
            .into());
        }
        if self.slices < 3 {
            return Err(ConstructionError::InvalidInput(format!(
                "circle needs at least 3 slices, got {}",
                self.slices
            ))
            .into());
        }
        #[allow(clippy::cast_precision_loss)]
        let step = TAU / self.slices as f64;
        let vertices: Vec<Point3> = (0..self.slices)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let angle = step * i as f64;
                Point3::new(self.radius * angle.cos(), self.radius * angle.sin(), 0.0)
            })
            .collect();
        LinearRing::new(&vertices, self.tolerance)
    }
}
