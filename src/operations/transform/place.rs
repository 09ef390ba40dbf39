use crate::error::Result;
use crate::geometry::surface::{LinearRing, Polyhedron};
use crate::math::{Affine3D, AffineSequence, Point3};

/// Geometry that can be moved by an affine transform.
pub trait Placeable: Sized {
    /// Returns a copy transformed by `affine`.
    ///
    /// # Errors
    ///
    /// Returns an error if the transform collapses the geometry.
    fn placed(&self, affine: &Affine3D, tolerance: f64) -> Result<Self>;
}

impl Placeable for Vec<Point3> {
    fn placed(&self, affine: &Affine3D, _tolerance: f64) -> Result<Self> {
        Ok(self.iter().map(|p| affine.transform_point(p)).collect())
    }
}

impl Placeable for LinearRing {
    fn placed(&self, affine: &Affine3D, tolerance: f64) -> Result<Self> {
        self.transformed(affine, tolerance)
    }
}

impl Placeable for Polyhedron {
    fn placed(&self, affine: &Affine3D, tolerance: f64) -> Result<Self> {
        self.transformed(affine, tolerance)
    }
}

/// Places geometry with an ordered chain of transforms, such as
/// object-local, then reference-curve pose, then global offset.
pub struct Place<'a, T: Placeable> {
    target: &'a T,
    sequence: AffineSequence<Affine3D>,
    tolerance: f64,
}

impl<'a, T: Placeable> Place<'a, T> {
    /// Creates a new `Place` operation.
    #[must_use]
    pub fn new(target: &'a T, sequence: AffineSequence<Affine3D>, tolerance: f64) -> Self {
        Self {
            target,
            sequence,
            tolerance,
        }
    }

    /// Executes the placement. An empty sequence copies the target unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ConstructionError::DegenerateRing`] if the
    /// composed transform collapses a ring.
    pub fn execute(&self) -> Result<T> {
        self.target.placed(&self.sequence.solve(), self.tolerance)
    }
}
