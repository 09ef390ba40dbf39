use crate::error::{GeometryError, Result};
use crate::math::{Point3, Pose3, Range, UnivariateFunction};

use super::{CompositeCurve, Curve3};

/// A reference curve restricted to a sub-domain, shifted sideways by a
/// signed lateral offset and lifted by a height function.
///
/// Positive offsets move to the left of the reference heading.
#[derive(Debug, Clone, PartialEq)]
pub struct LateralTranslatedCurve {
    base: CompositeCurve,
    domain: Range,
    lateral_offset: UnivariateFunction,
    height: UnivariateFunction,
}

impl LateralTranslatedCurve {
    /// Creates a new lateral translated curve.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DomainMismatch`] if `domain` is not fuzzily
    /// enclosed by the domain of `base`.
    pub fn new(
        base: CompositeCurve,
        domain: Range,
        lateral_offset: UnivariateFunction,
        height: UnivariateFunction,
    ) -> Result<Self> {
        if !base.domain().fuzzy_encloses(&domain, base.tolerance()) {
            return Err(GeometryError::DomainMismatch {
                expected: format!("a sub-range of {}", base.domain()),
                actual: domain.to_string(),
            }
            .into());
        }
        Ok(Self {
            base,
            domain,
            lateral_offset,
            height,
        })
    }

    #[must_use]
    pub fn base(&self) -> &CompositeCurve {
        &self.base
    }

    #[must_use]
    pub fn lateral_offset(&self) -> &UnivariateFunction {
        &self.lateral_offset
    }

    #[must_use]
    pub fn height(&self) -> &UnivariateFunction {
        &self.height
    }

    /// Pose at arc length `s`, oriented along the reference heading.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::OutOfDomain`] if `s` lies outside the domain
    /// by more than the tolerance.
    pub fn pose_at(&self, s: f64) -> Result<Pose3> {
        let s = self.check_parameter(s)?;
        let pose = self.base.evaluate(s)?;
        let offset = pose.left_normal() * self.lateral_offset.value(s);
        let point = pose.point + offset;
        let mut lifted = pose.lift(self.height.value(s));
        lifted.point = Point3::new(point.x, point.y, lifted.point.z);
        Ok(lifted)
    }

    fn check_parameter(&self, s: f64) -> Result<f64> {
        let tolerance = self.base.tolerance();
        if !self.domain.fuzzy_contains(s, tolerance) {
            return Err(GeometryError::OutOfDomain {
                parameter: s,
                min: self.domain.lower(),
                max: self.domain.upper(),
            }
            .into());
        }
        let base_domain = self.base.domain();
        Ok(s.clamp(self.domain.lower(), self.domain.upper())
            .clamp(base_domain.lower(), base_domain.upper()))
    }
}

impl Curve3 for LateralTranslatedCurve {
    fn domain(&self) -> Range {
        self.domain
    }

    fn evaluate(&self, s: f64) -> Result<Point3> {
        Ok(self.pose_at(s)?.point)
    }
}
