use crate::math::{Point2, Pose2, Vector2};

/// Gauss-Legendre nodes and weights on `[-1, 1]`.
const GAUSS_LEGENDRE_5: [(f64, f64); 5] = [
    (0.0, 0.568_888_888_888_888_9),
    (-0.538_469_310_105_683_1, 0.478_628_670_499_366_5),
    (0.538_469_310_105_683_1, 0.478_628_670_499_366_5),
    (-0.906_179_845_938_664, 0.236_926_885_056_189_1),
    (0.906_179_845_938_664, 0.236_926_885_056_189_1),
];

/// Longest arc length integrated by a single quadrature panel.
const MAX_PANEL_LENGTH: f64 = 0.5;

/// A clothoid whose curvature varies linearly from `curvature_start` to
/// `curvature_end` over `length`.
///
/// Starts at the local origin with heading `0`. Positions are obtained by
/// integrating the unit tangent with composite Gauss-Legendre quadrature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spiral {
    curvature_start: f64,
    curvature_end: f64,
    length: f64,
}

impl Spiral {
    /// Creates a new spiral. `length` must be positive.
    #[must_use]
    pub fn new(curvature_start: f64, curvature_end: f64, length: f64) -> Self {
        Self {
            curvature_start,
            curvature_end,
            length,
        }
    }

    #[must_use]
    pub fn curvature_start(&self) -> f64 {
        self.curvature_start
    }

    #[must_use]
    pub fn curvature_end(&self) -> f64 {
        self.curvature_end
    }

    /// Rate of change of curvature per unit arc length.
    #[must_use]
    pub fn curvature_rate(&self) -> f64 {
        if self.length > 0.0 {
            (self.curvature_end - self.curvature_start) / self.length
        } else {
            0.0
        }
    }

    /// Curvature at arc length `s`.
    #[must_use]
    pub fn curvature(&self, s: f64) -> f64 {
        self.curvature_start + self.curvature_rate() * s
    }

    /// Heading at arc length `s`, the integral of the curvature.
    #[must_use]
    pub fn heading(&self, s: f64) -> f64 {
        s * (self.curvature_start + 0.5 * self.curvature_rate() * s)
    }

    /// Local pose at arc length `s`.
    #[must_use]
    pub fn local_pose(&self, s: f64) -> Pose2 {
        Pose2::new(Point2::from(self.integrate_tangent(s)), self.heading(s))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn integrate_tangent(&self, s: f64) -> Vector2 {
        let panels = ((s.abs() / MAX_PANEL_LENGTH).ceil() as usize).max(1);
        let h = s / panels as f64;
        let half = 0.5 * h;
        let mut sum = Vector2::zeros();
        for i in 0..panels {
            let mid = h * i as f64 + half;
            for (node, weight) in GAUSS_LEGENDRE_5 {
                let theta = self.heading(mid + half * node);
                sum += Vector2::new(theta.cos(), theta.sin()) * (weight * half);
            }
        }
        sum
    }
}
