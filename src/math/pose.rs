use nalgebra::Rotation3;

use super::{Affine2D, Affine3D, Point2, Point3, Vector2, Vector3};

/// A position in the plane together with a heading in radians.
///
/// Headings are measured counter-clockwise from the x axis, so a positive
/// curvature turns left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose2 {
    /// Position.
    pub point: Point2,
    /// Heading in radians.
    pub heading: f64,
}

impl Pose2 {
    /// Creates a new pose.
    #[must_use]
    pub fn new(point: Point2, heading: f64) -> Self {
        Self { point, heading }
    }

    /// Unit tangent in the heading direction.
    #[must_use]
    pub fn tangent(&self) -> Vector2 {
        Vector2::new(self.heading.cos(), self.heading.sin())
    }

    /// Unit normal pointing to the left of the heading.
    #[must_use]
    pub fn left_normal(&self) -> Vector2 {
        Vector2::new(-self.heading.sin(), self.heading.cos())
    }

    /// Transform mapping the local frame of this pose into the parent frame.
    #[must_use]
    pub fn to_affine(&self) -> Affine2D {
        Affine2D::of_pose(self)
    }

    /// Lifts the pose into 3D at height `z`, rotating about the z axis.
    #[must_use]
    pub fn lift(&self, z: f64) -> Pose3 {
        Pose3::new(
            Point3::new(self.point.x, self.point.y, z),
            Rotation3::from_axis_angle(&Vector3::z_axis(), self.heading),
        )
    }
}

impl Default for Pose2 {
    fn default() -> Self {
        Self::new(Point2::origin(), 0.0)
    }
}

/// A position in space together with an orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose3 {
    /// Position.
    pub point: Point3,
    /// Orientation.
    pub rotation: Rotation3<f64>,
}

impl Pose3 {
    /// Creates a new pose.
    #[must_use]
    pub fn new(point: Point3, rotation: Rotation3<f64>) -> Self {
        Self { point, rotation }
    }

    /// Transform mapping the local frame of this pose into the parent frame.
    #[must_use]
    pub fn to_affine(&self) -> Affine3D {
        Affine3D::of_pose(self)
    }
}
