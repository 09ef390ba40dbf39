use crate::math::{Point2, Pose2};

/// A straight segment along the local x axis.
///
/// The parametric form is: `P(s) = (s, 0)` with constant heading `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LineSegment;

impl LineSegment {
    /// Creates a new line segment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Local pose at arc length `s`.
    #[must_use]
    pub fn local_pose(&self, s: f64) -> Pose2 {
        Pose2::new(Point2::new(s, 0.0), 0.0)
    }

    /// Curvature, always zero.
    #[must_use]
    pub fn curvature(&self, _s: f64) -> f64 {
        0.0
    }
}
