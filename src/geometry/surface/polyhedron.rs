use crate::error::Result;
use crate::math::{Affine3D, Point3};

use super::LinearRing;

/// A closed solid bounded by planar faces.
///
/// Every face ring is oriented so that its normal points out of the solid.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyhedron {
    faces: Vec<LinearRing>,
}

impl Polyhedron {
    #[must_use]
    pub fn new(faces: Vec<LinearRing>) -> Self {
        Self { faces }
    }

    #[must_use]
    pub fn faces(&self) -> &[LinearRing] {
        &self.faces
    }

    /// Enclosed volume via the divergence theorem over the face rings.
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.faces
            .iter()
            .map(|face| face.area() * face.normal().dot(&face.vertices()[0].coords))
            .sum::<f64>()
            / 3.0
    }

    /// All face vertices, in face order.
    pub fn vertices(&self) -> impl Iterator<Item = &Point3> {
        self.faces.iter().flat_map(|face| face.vertices().iter())
    }

    /// Applies a transform to every face.
    ///
    /// Orientation-reversing transforms flip every face back outward.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ConstructionError::DegenerateRing`] if the
    /// transform collapses a face.
    pub fn transformed(&self, affine: &Affine3D, tolerance: f64) -> Result<Self> {
        let mirrored = affine.determinant() < 0.0;
        let faces = self
            .faces
            .iter()
            .map(|face| {
                let placed = face.transformed(affine, tolerance)?;
                Ok(if mirrored { placed.reversed() } else { placed })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { faces })
    }
}
