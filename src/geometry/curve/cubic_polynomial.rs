use crate::math::{CubicFunction, Point2, Pose2};

/// A local cubic `v(u) = a + b*u + c*u^2 + d*u^3` evaluated along the local u axis.
///
/// The segment parameter is the local `u` coordinate, not the arc length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicPolynomial {
    function: CubicFunction,
}

impl CubicPolynomial {
    /// Creates a new cubic polynomial segment.
    #[must_use]
    pub fn new(function: CubicFunction) -> Self {
        Self { function }
    }

    #[must_use]
    pub fn function(&self) -> &CubicFunction {
        &self.function
    }

    /// Local pose at parameter `u`.
    #[must_use]
    pub fn local_pose(&self, u: f64) -> Pose2 {
        Pose2::new(
            Point2::new(u, self.function.value(u)),
            self.function.slope(u).atan(),
        )
    }

    /// Curvature of the graph at parameter `u`.
    #[must_use]
    pub fn curvature(&self, u: f64) -> f64 {
        let slope = self.function.slope(u);
        self.function.second_derivative(u) / (1.0 + slope * slope).powf(1.5)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn follows_polynomial() {
        let poly = CubicPolynomial::new(CubicFunction::new(0.0, 0.0, 0.1, 0.0));
        let pose = poly.local_pose(2.0);
        assert_relative_eq!(pose.point, Point2::new(2.0, 0.4));
        assert_relative_eq!(pose.heading, 0.4_f64.atan());
        assert_relative_eq!(poly.curvature(0.0), 0.2);
    }
}
