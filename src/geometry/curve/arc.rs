use crate::math::{Point2, Pose2, EPSILON};

/// A circular arc of constant curvature starting at the local origin with heading `0`.
///
/// Positive curvature turns left. The center lies at `(0, 1 / curvature)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    curvature: f64,
}

impl Arc {
    /// Creates a new arc.
    #[must_use]
    pub fn new(curvature: f64) -> Self {
        Self { curvature }
    }

    /// Returns the signed curvature.
    #[must_use]
    pub fn curvature(&self) -> f64 {
        self.curvature
    }

    /// Returns the signed radius, or `None` for a vanishing curvature.
    #[must_use]
    pub fn radius(&self) -> Option<f64> {
        (self.curvature.abs() > EPSILON).then(|| 1.0 / self.curvature)
    }

    /// Local pose at arc length `s`.
    #[must_use]
    pub fn local_pose(&self, s: f64) -> Pose2 {
        let Some(radius) = self.radius() else {
            return Pose2::new(Point2::new(s, 0.0), 0.0);
        };
        let angle = s * self.curvature;
        Pose2::new(
            Point2::new(radius * angle.sin(), radius * (1.0 - angle.cos())),
            angle,
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn quarter_circle_left() {
        let arc = Arc::new(1.0);
        let pose = arc.local_pose(std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(pose.point, Point2::new(1.0, 1.0), epsilon = 1e-12);
        assert_relative_eq!(pose.heading, std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn negative_curvature_turns_right() {
        let pose = Arc::new(-0.5).local_pose(1.0);
        assert!(pose.point.y < 0.0);
        assert_relative_eq!(pose.heading, -0.5, epsilon = 1e-12);
    }

    #[test]
    fn zero_curvature_is_straight() {
        let pose = Arc::new(0.0).local_pose(3.0);
        assert_relative_eq!(pose.point, Point2::new(3.0, 0.0));
        assert!(Arc::new(0.0).radius().is_none());
    }
}
