use crate::error::{ConstructionError, Result};
use crate::geometry::surface::{LinearRing, Polyhedron};
use crate::math::fuzzy::fuzzy_zero;
use crate::math::{Point3, Vector3};

/// Extrudes a planar ring along a direction vector into a closed prism.
pub struct Extrude {
    profile: LinearRing,
    direction: Vector3,
    tolerance: f64,
}

impl Extrude {
    /// Creates a new `Extrude` operation.
    #[must_use]
    pub fn new(profile: LinearRing, direction: Vector3, tolerance: f64) -> Self {
        Self {
            profile,
            direction,
            tolerance,
        }
    }

    /// Executes the extrusion.
    ///
    /// The resulting faces are ordered bottom, top, then one side per
    /// profile edge, each oriented outward.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvalidInput`] if the direction is
    /// zero-length or parallel to the profile plane.
    pub fn execute(&self) -> Result<Polyhedron> {
        if self.direction.norm() <= self.tolerance {
            return Err(
                ConstructionError::InvalidInput("extrude direction must be non-zero".into()).into(),
            );
        }
        let along_normal = self.profile.normal().dot(&self.direction);
        if fuzzy_zero(along_normal, self.tolerance) {
            return Err(ConstructionError::InvalidInput(
                "extrude direction lies in the profile plane".into(),
            )
            .into());
        }

        // Base winding follows the direction so the top keeps it and the bottom flips
        let base = if along_normal > 0.0 {
            self.profile.clone()
        } else {
            self.profile.reversed()
        };
        let base_points = base.vertices();
        let top_points: Vec<Point3> = base_points.iter().map(|p| p + self.direction).collect();

        let n = base_points.len();
        let mut faces = Vec::with_capacity(n + 2);
        faces.push(base.reversed());
        faces.push(LinearRing::new(&top_points, self.tolerance)?);
        for i in 0..n {
            let j = (i + 1) % n;
            faces.push(LinearRing::new(
                &[base_points[i], base_points[j], top_points[j], top_points[i]],
                self.tolerance,
            )?);
        }
        Ok(Polyhedron::new(faces))
    }
}
