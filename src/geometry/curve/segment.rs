use crate::error::{ConstructionError, GeometryError, Result};
use crate::math::{Affine2D, BoundType, Point2, Pose2, Range};

use super::{Arc, CubicPolynomial, LineSegment, ParametricCubic, RawGeometry, Spiral};

/// The closed set of plan-view curve kinds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentKind {
    Line(LineSegment),
    Arc(Arc),
    Spiral(Spiral),
    CubicPolynomial(CubicPolynomial),
    ParametricCubic(ParametricCubic),
}

impl SegmentKind {
    /// Pose in the segment's own frame.
    #[must_use]
    pub fn local_pose(&self, s: f64) -> Pose2 {
        match self {
            Self::Line(line) => line.local_pose(s),
            Self::Arc(arc) => arc.local_pose(s),
            Self::Spiral(spiral) => spiral.local_pose(s),
            Self::CubicPolynomial(poly) => poly.local_pose(s),
            Self::ParametricCubic(curve) => curve.local_pose(s),
        }
    }

    /// Signed curvature in the segment's own frame.
    #[must_use]
    pub fn curvature(&self, s: f64) -> f64 {
        match self {
            Self::Line(line) => line.curvature(s),
            Self::Arc(arc) => arc.curvature(),
            Self::Spiral(spiral) => spiral.curvature(s),
            Self::CubicPolynomial(poly) => poly.curvature(s),
            Self::ParametricCubic(curve) => curve.curvature(s),
        }
    }

    /// Short name of the variant.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Line(_) => "line",
            Self::Arc(_) => "arc",
            Self::Spiral(_) => "spiral",
            Self::CubicPolynomial(_) => "cubic polynomial",
            Self::ParametricCubic(_) => "parametric cubic",
        }
    }
}

/// Picks the curve kind for a raw geometry description.
///
/// Precedence: spiral, arc, cubic polynomial, parametric cubic, and a line
/// when nothing richer is given.
#[must_use]
pub fn select_segment_kind(geometry: &RawGeometry, length: f64) -> SegmentKind {
    if let Some(spiral) = &geometry.spiral {
        SegmentKind::Spiral(Spiral::new(spiral.curv_start, spiral.curv_end, length))
    } else if let Some(arc) = &geometry.arc {
        SegmentKind::Arc(Arc::new(arc.curvature))
    } else if let Some(poly) = &geometry.poly3 {
        SegmentKind::CubicPolynomial(CubicPolynomial::new(*poly))
    } else if let Some(param) = &geometry.param_poly3 {
        SegmentKind::ParametricCubic(ParametricCubic::new(param.u, param.v, param.p_range, length))
    } else {
        SegmentKind::Line(LineSegment::new())
    }
}

/// A curve kind placed in a parent frame over the local domain `[0, length)`,
/// or `[0, length]` when it ends a composite.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveSegment {
    kind: SegmentKind,
    length: f64,
    affine: Affine2D,
    domain: Range,
    tolerance: f64,
}

impl CurveSegment {
    /// Creates a new curve segment.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvalidInput`] if `length` is negative or
    /// not finite.
    pub fn new(
        kind: SegmentKind,
        length: f64,
        affine: Affine2D,
        end_bound: BoundType,
        tolerance: f64,
    ) -> Result<Self> {
        if !length.is_finite() || length < 0.0 {
            return Err(ConstructionError::InvalidInput(format!(
                "segment length must be non-negative, got {length}"
            ))
            .into());
        }
        let domain = Range::new(0.0, BoundType::Closed, length, end_bound)?;
        Ok(Self {
            kind,
            length,
            affine,
            domain,
            tolerance,
        })
    }

    #[must_use]
    pub fn kind(&self) -> &SegmentKind {
        &self.kind
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Placement of the local frame in the parent frame.
    #[must_use]
    pub fn affine(&self) -> &Affine2D {
        &self.affine
    }

    /// Local parameter domain.
    #[must_use]
    pub fn domain(&self) -> &Range {
        &self.domain
    }

    #[must_use]
    pub fn end_bound(&self) -> BoundType {
        self.domain.upper_type()
    }

    /// Pose in the parent frame at local parameter `s`.
    ///
    /// Parameters within tolerance outside the domain are clamped onto it.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::OutOfDomain`] if `s` lies outside the domain
    /// by more than the tolerance.
    pub fn evaluate(&self, s: f64) -> Result<Pose2> {
        let s = self.check_parameter(s)?;
        Ok(self.affine.transform_pose(&self.kind.local_pose(s)))
    }

    /// Point in the parent frame at local parameter `s`.
    ///
    /// # Errors
    ///
    /// See [`CurveSegment::evaluate`].
    pub fn evaluate_point(&self, s: f64) -> Result<Point2> {
        Ok(self.evaluate(s)?.point)
    }

    /// Signed curvature at local parameter `s`.
    ///
    /// # Errors
    ///
    /// See [`CurveSegment::evaluate`].
    pub fn curvature(&self, s: f64) -> Result<f64> {
        let s = self.check_parameter(s)?;
        Ok(self.kind.curvature(s))
    }

    fn check_parameter(&self, s: f64) -> Result<f64> {
        if !self.domain.fuzzy_contains(s, self.tolerance) {
            return Err(GeometryError::OutOfDomain {
                parameter: s,
                min: self.domain.lower(),
                max: self.domain.upper(),
            }
            .into());
        }
        Ok(s.clamp(0.0, self.length))
    }
}
