pub mod affine;
pub mod function;
pub mod fuzzy;
pub mod polygon_3d;
pub mod pose;
pub mod range;

pub use affine::{Affine, Affine2D, Affine3D, AffineSequence};
pub use function::{CubicFunction, UnivariateFunction};
pub use pose::{Pose2, Pose3};
pub use range::{BoundType, Range, RangeSet};

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 3x3 matrix, the homogeneous form of a 2D affine transform.
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// 4x4 matrix, the homogeneous form of a 3D affine transform.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Threshold below which values are treated as numerically zero.
///
/// Only used for conditions independent of the caller's tolerance, such as
/// detecting a vanishing curvature or determinant.
pub const EPSILON: f64 = 1e-12;
