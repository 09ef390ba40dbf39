use crate::error::{ConstructionError, GeometryError, Result};
use crate::geometry::curve::Curve3;
use crate::math::fuzzy::{fuzzy_ge, fuzzy_le};
use crate::math::{Point3, Range};
use crate::tessellation::{triangulate_ruled_strip, Triangle3};

use super::LinearRing;

/// A ruled surface spanned between two boundary curves sharing one domain.
///
/// Both boundaries are sampled once, at construction, at the same
/// arc-length positions, so the sample lists always have equal counts.
#[derive(Debug)]
pub struct ParametricBoundedSurface {
    left: Box<dyn Curve3>,
    right: Box<dyn Curve3>,
    tolerance: f64,
    step_size: f64,
    samples: Vec<f64>,
    left_vertices: Vec<Point3>,
    right_vertices: Vec<Point3>,
}

impl ParametricBoundedSurface {
    /// Creates a ruled surface from its left and right boundary.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DomainMismatch`] if the boundary domains
    /// differ beyond `tolerance`, [`GeometryError::Degenerate`] if the
    /// common domain is not longer than `tolerance`, and
    /// [`ConstructionError::InvalidInput`] if `step_size` is not larger than
    /// `tolerance`. Boundary evaluation errors are propagated.
    pub fn new(
        left: Box<dyn Curve3>,
        right: Box<dyn Curve3>,
        tolerance: f64,
        step_size: f64,
    ) -> Result<Self> {
        if !step_size.is_finite() || fuzzy_le(step_size, 0.0, tolerance) {
            return Err(ConstructionError::InvalidInput(format!(
                "step size {step_size} must exceed the tolerance {tolerance}"
            ))
            .into());
        }
        let domain = left.domain();
        if !domain.fuzzy_eq(&right.domain(), tolerance) {
            return Err(GeometryError::DomainMismatch {
                expected: domain.to_string(),
                actual: right.domain().to_string(),
            }
            .into());
        }
        if fuzzy_le(domain.upper(), domain.lower(), tolerance) {
            return Err(GeometryError::Degenerate(format!(
                "surface domain {domain} has no extent"
            ))
            .into());
        }

        let samples = discretize(&domain, step_size, tolerance);
        let left_vertices = samples
            .iter()
            .map(|&s| left.evaluate(s))
            .collect::<Result<Vec<_>>>()?;
        let right_vertices = samples
            .iter()
            .map(|&s| right.evaluate(s))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            left,
            right,
            tolerance,
            step_size,
            samples,
            left_vertices,
            right_vertices,
        })
    }

    #[must_use]
    pub fn left(&self) -> &dyn Curve3 {
        self.left.as_ref()
    }

    #[must_use]
    pub fn right(&self) -> &dyn Curve3 {
        self.right.as_ref()
    }

    /// Common parameter domain of both boundaries.
    #[must_use]
    pub fn domain(&self) -> Range {
        self.left.domain()
    }

    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    #[must_use]
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Arc-length positions at which both boundaries were sampled.
    #[must_use]
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    #[must_use]
    pub fn left_vertices(&self) -> &[Point3] {
        &self.left_vertices
    }

    #[must_use]
    pub fn right_vertices(&self) -> &[Point3] {
        &self.right_vertices
    }

    /// Outline running forward along the right boundary and back along the left.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::DegenerateRing`] if both boundaries coincide.
    pub fn boundary_ring(&self) -> Result<LinearRing> {
        let outline: Vec<Point3> = self
            .right_vertices
            .iter()
            .chain(self.left_vertices.iter().rev())
            .copied()
            .collect();
        LinearRing::new(&outline, self.tolerance)
    }

    /// Triangles connecting corresponding samples of both boundaries.
    ///
    /// Triangles collapsing where the boundaries touch are skipped.
    #[must_use]
    pub fn triangles(&self) -> Vec<Triangle3> {
        triangulate_ruled_strip(&self.left_vertices, &self.right_vertices, self.tolerance)
    }
}

/// Sample positions over `domain` spaced by `step_size`, always including
/// both ends.
///
/// A regular sample closer than `tolerance` to the upper end is replaced by
/// the end itself.
#[must_use]
pub fn discretize(domain: &Range, step_size: f64, tolerance: f64) -> Vec<f64> {
    let (lower, upper) = (domain.lower(), domain.upper());
    let mut samples = vec![lower];
    if step_size.is_nan() || step_size <= 0.0 {
        samples.push(upper);
        return samples;
    }
    let mut i = 1_u32;
    loop {
        let s = lower + f64::from(i) * step_size;
        if fuzzy_ge(s, upper, tolerance) {
            break;
        }
        samples.push(s);
        i += 1;
    }
    if !fuzzy_le(upper, lower, tolerance) {
        samples.push(upper);
    }
    samples
}
