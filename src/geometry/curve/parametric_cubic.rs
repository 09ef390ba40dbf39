use serde::{Deserialize, Serialize};

use crate::math::{CubicFunction, Point2, Pose2};

/// Domain of the curve parameter of a [`ParametricCubic`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterRange {
    /// The parameter runs over `[0, length]`.
    #[default]
    ArcLength,
    /// The parameter runs over `[0, 1]`.
    Normalized,
}

/// A planar curve with independent cubics `u(p)` and `v(p)`.
///
/// When the range is [`ParameterRange::Normalized`] the incoming arc length
/// is divided by the segment length before evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParametricCubic {
    u: CubicFunction,
    v: CubicFunction,
    range: ParameterRange,
    length: f64,
}

impl ParametricCubic {
    /// Creates a new parametric cubic. `length` must be positive.
    #[must_use]
    pub fn new(u: CubicFunction, v: CubicFunction, range: ParameterRange, length: f64) -> Self {
        Self {
            u,
            v,
            range,
            length,
        }
    }

    #[must_use]
    pub fn range(&self) -> ParameterRange {
        self.range
    }

    /// Maps an arc length onto the curve parameter.
    #[must_use]
    pub fn parameter(&self, s: f64) -> f64 {
        match self.range {
            ParameterRange::ArcLength => s,
            ParameterRange::Normalized => s / self.length,
        }
    }

    /// Local pose at arc length `s`.
    #[must_use]
    pub fn local_pose(&self, s: f64) -> Pose2 {
        let p = self.parameter(s);
        Pose2::new(
            Point2::new(self.u.value(p), self.v.value(p)),
            self.v.slope(p).atan2(self.u.slope(p)),
        )
    }

    /// Signed curvature at arc length `s`.
    #[must_use]
    pub fn curvature(&self, s: f64) -> f64 {
        let p = self.parameter(s);
        let (du, dv) = (self.u.slope(p), self.v.slope(p));
        let (ddu, ddv) = (self.u.second_derivative(p), self.v.second_derivative(p));
        let speed_sq = du * du + dv * dv;
        if speed_sq <= 0.0 {
            return 0.0;
        }
        (du * ddv - dv * ddu) / speed_sq.powf(1.5)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn straight_diagonal(range: ParameterRange, scale: f64) -> ParametricCubic {
        ParametricCubic::new(
            CubicFunction::new(0.0, scale, 0.0, 0.0),
            CubicFunction::new(0.0, scale, 0.0, 0.0),
            range,
            10.0,
        )
    }

    #[test]
    fn normalized_divides_by_length() {
        let curve = straight_diagonal(ParameterRange::Normalized, 10.0);
        let pose = curve.local_pose(5.0);
        assert_relative_eq!(pose.point, Point2::new(5.0, 5.0));
        assert_relative_eq!(pose.heading, std::f64::consts::FRAC_PI_4);
    }

    #[test]
    fn arc_length_uses_raw_parameter() {
        let curve = straight_diagonal(ParameterRange::ArcLength, 1.0);
        let pose = curve.local_pose(5.0);
        assert_relative_eq!(pose.point, Point2::new(5.0, 5.0));
        assert_relative_eq!(curve.curvature(5.0), 0.0);
    }

    #[test]
    fn circle_like_curvature_sign() {
        let curve = ParametricCubic::new(
            CubicFunction::new(0.0, 1.0, 0.0, 0.0),
            CubicFunction::new(0.0, 0.0, 0.5, 0.0),
            ParameterRange::ArcLength,
            1.0,
        );
        assert!(curve.curvature(0.0) > 0.0);
    }
}
