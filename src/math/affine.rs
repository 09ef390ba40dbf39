//! Homogeneous affine transforms in 2D and 3D.
//!
//! Composition conventions:
//!
//! - `Affine3D::of(&[a, b, c])` is the single matrix `a * b * c`, so `c`
//!   acts on a point first.
//! - `a.append(&b)` applies `a` and then `b`, i.e. the matrix `b * a`.
//! - [`AffineSequence::solve`] folds `append` left to right, so the first
//!   element of the sequence acts first.

use nalgebra::{Rotation3, Vector3 as NVector3, Vector4};

use crate::error::{GeometryError, Result};

use super::{Matrix3, Matrix4, Point2, Point3, Pose2, Pose3, Vector2, Vector3, EPSILON};

/// Common behavior of composable affine transforms.
pub trait Affine: Clone {
    /// The transform leaving every point unchanged.
    fn identity() -> Self;

    /// Returns the transform equal to applying `self` and then `other`.
    #[must_use]
    fn append(&self, other: &Self) -> Self;
}

/// A 2D affine transform stored as a 3x3 homogeneous matrix.
///
/// The last row is always `[0, 0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine2D {
    matrix: Matrix3,
}

impl Affine2D {
    /// Creates a transform from a homogeneous matrix.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidAffine`] if the last row is not
    /// `[0, 0, 1]` or an entry is not finite.
    pub fn from_matrix(matrix: Matrix3) -> Result<Self> {
        if matrix.iter().any(|v| !v.is_finite()) {
            return Err(GeometryError::InvalidAffine("non-finite entry".into()).into());
        }
        let last = matrix.row(2);
        if last[0].abs() > EPSILON || last[1].abs() > EPSILON || (last[2] - 1.0).abs() > EPSILON {
            return Err(GeometryError::InvalidAffine(format!(
                "last row must be [0, 0, 1], got [{}, {}, {}]",
                last[0], last[1], last[2]
            ))
            .into());
        }
        Ok(Self { matrix })
    }

    /// Pure translation.
    #[must_use]
    pub fn of_translation(translation: &Vector2) -> Self {
        Self {
            matrix: Matrix3::new_translation(translation),
        }
    }

    /// Pure rotation by `angle` radians, counter-clockwise.
    #[must_use]
    pub fn of_rotation(angle: f64) -> Self {
        Self {
            matrix: Matrix3::new_rotation(angle),
        }
    }

    /// Pure non-uniform scaling.
    #[must_use]
    pub fn of_scaling(scaling: &Vector2) -> Self {
        Self {
            matrix: Matrix3::new_nonuniform_scaling(scaling),
        }
    }

    /// Rotation by the pose heading followed by translation to its point.
    #[must_use]
    pub fn of_pose(pose: &Pose2) -> Self {
        Self {
            matrix: Matrix3::new_translation(&pose.point.coords)
                * Matrix3::new_rotation(pose.heading),
        }
    }

    /// Multiplies the given transforms in order into one matrix.
    #[must_use]
    pub fn of(affines: &[Self]) -> Self {
        let matrix = affines
            .iter()
            .fold(Matrix3::identity(), |acc, a| acc * a.matrix);
        Self { matrix }
    }

    /// Returns the homogeneous matrix.
    #[must_use]
    pub fn matrix(&self) -> &Matrix3 {
        &self.matrix
    }

    /// Determinant of the linear part.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.matrix.fixed_view::<2, 2>(0, 0).determinant()
    }

    /// Transforms a point.
    #[must_use]
    pub fn transform_point(&self, point: &Point2) -> Point2 {
        let v = self.matrix * NVector3::new(point.x, point.y, 1.0);
        Point2::new(v.x, v.y)
    }

    /// Transforms a direction, ignoring translation.
    #[must_use]
    pub fn transform_vector(&self, vector: &Vector2) -> Vector2 {
        let v = self.matrix * NVector3::new(vector.x, vector.y, 0.0);
        Vector2::new(v.x, v.y)
    }

    /// Transforms a pose; the heading follows the transformed tangent.
    ///
    /// The heading is not wrapped: it is the input heading plus the turn,
    /// in `(-pi, pi]`, from the input tangent to the transformed one.
    #[must_use]
    pub fn transform_pose(&self, pose: &Pose2) -> Pose2 {
        let tangent = pose.tangent();
        let mapped = self.transform_vector(&tangent);
        let turn = tangent.perp(&mapped).atan2(tangent.dot(&mapped));
        Pose2::new(self.transform_point(&pose.point), pose.heading + turn)
    }

    /// Returns the inverse transform.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::SingularTransform`] if the determinant is zero.
    pub fn inverse(&self) -> Result<Self> {
        if self.determinant().abs() < EPSILON {
            return Err(GeometryError::SingularTransform.into());
        }
        let matrix = self
            .matrix
            .try_inverse()
            .ok_or(GeometryError::SingularTransform)?;
        Ok(Self { matrix })
    }

    /// Maps a point back through the inverse transform.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::SingularTransform`] if the transform is not invertible.
    pub fn inverse_transform(&self, point: &Point2) -> Result<Point2> {
        Ok(self.inverse()?.transform_point(point))
    }

    /// Translation component.
    #[must_use]
    pub fn extract_translation(&self) -> Vector2 {
        Vector2::new(self.matrix[(0, 2)], self.matrix[(1, 2)])
    }

    /// Scale factors along the local axes.
    ///
    /// A reflection shows up as a negative x factor.
    #[must_use]
    pub fn extract_scaling(&self) -> Vector2 {
        let sx = self.matrix.fixed_view::<2, 1>(0, 0).norm();
        let sy = self.matrix.fixed_view::<2, 1>(0, 1).norm();
        if self.determinant() < 0.0 {
            Vector2::new(-sx, sy)
        } else {
            Vector2::new(sx, sy)
        }
    }

    /// Returns `true` if the local axes stay orthogonal under this transform.
    #[must_use]
    pub fn is_shear_free(&self, tolerance: f64) -> bool {
        self.normalized_linear(tolerance).is_ok()
    }

    /// Rotation angle in radians.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::SingularTransform`] for a zero scale and
    /// [`GeometryError::ShearedTransform`] if the axes are not orthogonal.
    pub fn extract_rotation_angle(&self, tolerance: f64) -> Result<f64> {
        let r = self.normalized_linear(tolerance)?;
        Ok(r[(1, 0)].atan2(r[(0, 0)]))
    }

    /// Rotation component as its own transform.
    ///
    /// # Errors
    ///
    /// See [`Affine2D::extract_rotation_angle`].
    pub fn extract_rotation_affine(&self, tolerance: f64) -> Result<Self> {
        Ok(Self::of_rotation(self.extract_rotation_angle(tolerance)?))
    }

    fn normalized_linear(&self, tolerance: f64) -> Result<nalgebra::Matrix2<f64>> {
        let scaling = self.extract_scaling();
        if scaling.x.abs() < EPSILON || scaling.y.abs() < EPSILON {
            return Err(GeometryError::SingularTransform.into());
        }
        let linear = self.matrix.fixed_view::<2, 2>(0, 0).into_owned();
        let r = linear * nalgebra::Matrix2::from_diagonal(&Vector2::new(1.0 / scaling.x, 1.0 / scaling.y));
        let deviation = (r.transpose() * r - nalgebra::Matrix2::identity()).abs().max();
        if deviation > tolerance {
            return Err(GeometryError::ShearedTransform.into());
        }
        Ok(r)
    }
}

impl Affine for Affine2D {
    fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    fn append(&self, other: &Self) -> Self {
        Self {
            matrix: other.matrix * self.matrix,
        }
    }
}

impl Default for Affine2D {
    fn default() -> Self {
        <Self as Affine>::identity()
    }
}

/// A 3D affine transform stored as a 4x4 homogeneous matrix.
///
/// The last row is always `[0, 0, 0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine3D {
    matrix: Matrix4,
}

impl Affine3D {
    /// Creates a transform from a homogeneous matrix.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidAffine`] if the last row is not
    /// `[0, 0, 0, 1]` or an entry is not finite.
    pub fn from_matrix(matrix: Matrix4) -> Result<Self> {
        if matrix.iter().any(|v| !v.is_finite()) {
            return Err(GeometryError::InvalidAffine("non-finite entry".into()).into());
        }
        let last = matrix.row(3);
        let expected = [0.0, 0.0, 0.0, 1.0];
        if last.iter().zip(expected).any(|(v, e)| (v - e).abs() > EPSILON) {
            return Err(GeometryError::InvalidAffine(format!(
                "last row must be [0, 0, 0, 1], got [{}, {}, {}, {}]",
                last[0], last[1], last[2], last[3]
            ))
            .into());
        }
        Ok(Self { matrix })
    }

    /// Pure translation.
    #[must_use]
    pub fn of_translation(translation: &Vector3) -> Self {
        Self {
            matrix: Matrix4::new_translation(translation),
        }
    }

    /// Pure rotation.
    #[must_use]
    pub fn of_rotation(rotation: &Rotation3<f64>) -> Self {
        Self {
            matrix: rotation.to_homogeneous(),
        }
    }

    /// Rotation by `heading` radians about the z axis.
    #[must_use]
    pub fn of_heading(heading: f64) -> Self {
        Self::of_rotation(&Rotation3::from_axis_angle(&Vector3::z_axis(), heading))
    }

    /// Pure non-uniform scaling.
    #[must_use]
    pub fn of_scaling(scaling: &Vector3) -> Self {
        Self {
            matrix: Matrix4::new_nonuniform_scaling(scaling),
        }
    }

    /// Rotation by the pose orientation followed by translation to its point.
    #[must_use]
    pub fn of_pose(pose: &Pose3) -> Self {
        Self {
            matrix: Matrix4::new_translation(&pose.point.coords) * pose.rotation.to_homogeneous(),
        }
    }

    /// Multiplies the given transforms in order into one matrix.
    #[must_use]
    pub fn of(affines: &[Self]) -> Self {
        let matrix = affines
            .iter()
            .fold(Matrix4::identity(), |acc, a| acc * a.matrix);
        Self { matrix }
    }

    /// Returns the homogeneous matrix.
    #[must_use]
    pub fn matrix(&self) -> &Matrix4 {
        &self.matrix
    }

    /// Determinant of the linear part.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.matrix.fixed_view::<3, 3>(0, 0).determinant()
    }

    /// Transforms a point.
    #[must_use]
    pub fn transform_point(&self, point: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(point.x, point.y, point.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }

    /// Transforms a direction, ignoring translation.
    #[must_use]
    pub fn transform_vector(&self, vector: &Vector3) -> Vector3 {
        let v = self.matrix * Vector4::new(vector.x, vector.y, vector.z, 0.0);
        Vector3::new(v.x, v.y, v.z)
    }

    /// Returns the inverse transform.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::SingularTransform`] if the determinant is zero.
    pub fn inverse(&self) -> Result<Self> {
        if self.determinant().abs() < EPSILON {
            return Err(GeometryError::SingularTransform.into());
        }
        let matrix = self
            .matrix
            .try_inverse()
            .ok_or(GeometryError::SingularTransform)?;
        Ok(Self { matrix })
    }

    /// Maps a point back through the inverse transform.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::SingularTransform`] if the transform is not invertible.
    pub fn inverse_transform(&self, point: &Point3) -> Result<Point3> {
        Ok(self.inverse()?.transform_point(point))
    }

    /// Translation component.
    #[must_use]
    pub fn extract_translation(&self) -> Vector3 {
        Vector3::new(self.matrix[(0, 3)], self.matrix[(1, 3)], self.matrix[(2, 3)])
    }

    /// Scale factors along the local axes.
    ///
    /// A reflection shows up as a negative x factor.
    #[must_use]
    pub fn extract_scaling(&self) -> Vector3 {
        let sx = self.matrix.fixed_view::<3, 1>(0, 0).norm();
        let sy = self.matrix.fixed_view::<3, 1>(0, 1).norm();
        let sz = self.matrix.fixed_view::<3, 1>(0, 2).norm();
        if self.determinant() < 0.0 {
            Vector3::new(-sx, sy, sz)
        } else {
            Vector3::new(sx, sy, sz)
        }
    }

    /// Returns `true` if the local axes stay orthogonal under this transform.
    #[must_use]
    pub fn is_shear_free(&self, tolerance: f64) -> bool {
        self.extract_rotation(tolerance).is_ok()
    }

    /// Rotation component.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::SingularTransform`] for a zero scale and
    /// [`GeometryError::ShearedTransform`] if the axes are not orthogonal.
    pub fn extract_rotation(&self, tolerance: f64) -> Result<Rotation3<f64>> {
        let scaling = self.extract_scaling();
        if scaling.iter().any(|s| s.abs() < EPSILON) {
            return Err(GeometryError::SingularTransform.into());
        }
        let linear = self.matrix.fixed_view::<3, 3>(0, 0).into_owned();
        let r = linear * Matrix3::from_diagonal(&scaling.map(|s| 1.0 / s));
        let deviation = (r.transpose() * r - Matrix3::identity()).abs().max();
        if deviation > tolerance {
            return Err(GeometryError::ShearedTransform.into());
        }
        Ok(Rotation3::from_matrix_unchecked(r))
    }

    /// Rotation component as its own transform.
    ///
    /// # Errors
    ///
    /// See [`Affine3D::extract_rotation`].
    pub fn extract_rotation_affine(&self, tolerance: f64) -> Result<Self> {
        Ok(Self::of_rotation(&self.extract_rotation(tolerance)?))
    }
}

impl Affine for Affine3D {
    fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    fn append(&self, other: &Self) -> Self {
        Self {
            matrix: other.matrix * self.matrix,
        }
    }
}

impl Default for Affine3D {
    fn default() -> Self {
        <Self as Affine>::identity()
    }
}

impl From<&Affine2D> for Affine3D {
    /// Embeds a planar transform, leaving z untouched.
    fn from(affine: &Affine2D) -> Self {
        let m = affine.matrix();
        let mut matrix = Matrix4::identity();
        matrix[(0, 0)] = m[(0, 0)];
        matrix[(0, 1)] = m[(0, 1)];
        matrix[(1, 0)] = m[(1, 0)];
        matrix[(1, 1)] = m[(1, 1)];
        matrix[(0, 3)] = m[(0, 2)];
        matrix[(1, 3)] = m[(1, 2)];
        Self { matrix }
    }
}

/// An ordered chain of transforms; the first element acts first.
#[derive(Debug, Clone, PartialEq)]
pub struct AffineSequence<A: Affine> {
    affines: Vec<A>,
}

impl<A: Affine> AffineSequence<A> {
    /// Creates a sequence from transforms in application order.
    #[must_use]
    pub fn new(affines: Vec<A>) -> Self {
        Self { affines }
    }

    /// Creates an empty sequence, equivalent to the identity.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            affines: Vec::new(),
        }
    }

    /// Returns the sequence extended by one transform applied last.
    #[must_use]
    pub fn then(mut self, affine: A) -> Self {
        self.affines.push(affine);
        self
    }

    /// Returns the transforms in application order.
    #[must_use]
    pub fn affines(&self) -> &[A] {
        &self.affines
    }

    /// Number of transforms in the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.affines.len()
    }

    /// Returns `true` if the sequence holds no transforms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.affines.is_empty()
    }

    /// Collapses the sequence into one transform.
    #[must_use]
    pub fn solve(&self) -> A {
        self.affines
            .iter()
            .fold(A::identity(), |acc, a| acc.append(a))
    }
}

impl<A: Affine> Default for AffineSequence<A> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_relative_eq;

    use super::*;
    use crate::error::RoadGeomError;

    fn sample_3d() -> Affine3D {
        Affine3D::of(&[
            Affine3D::of_translation(&Vector3::new(3.0, -2.0, 1.5)),
            Affine3D::of_rotation(&Rotation3::from_euler_angles(0.3, -0.2, 1.1)),
            Affine3D::of_scaling(&Vector3::new(2.0, 0.5, 1.5)),
        ])
    }

    #[test]
    fn translation_moves_points_not_vectors() {
        let a = Affine3D::of_translation(&Vector3::new(1.0, 2.0, 3.0));
        let p = a.transform_point(&Point3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(p, Point3::new(2.0, 3.0, 4.0));
        let v = a.transform_vector(&Vector3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(v, Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn round_trip_3d() {
        let a = sample_3d();
        let p = Point3::new(-4.0, 7.5, 0.25);
        let back = a.inverse_transform(&a.transform_point(&p)).unwrap();
        assert_relative_eq!(back, p, epsilon = 1e-9);
    }

    #[test]
    fn round_trip_2d() {
        let a = Affine2D::of(&[
            Affine2D::of_translation(&Vector2::new(10.0, -3.0)),
            Affine2D::of_rotation(0.7),
            Affine2D::of_scaling(&Vector2::new(1.5, 3.0)),
        ]);
        let p = Point2::new(2.0, 5.0);
        let back = a.inverse_transform(&a.transform_point(&p)).unwrap();
        assert_relative_eq!(back, p, epsilon = 1e-9);
    }

    #[test]
    fn singular_inverse_fails() {
        let a = Affine3D::of_scaling(&Vector3::new(1.0, 0.0, 1.0));
        let err = a.inverse_transform(&Point3::origin()).unwrap_err();
        assert!(matches!(
            err,
            RoadGeomError::Geometry(GeometryError::SingularTransform)
        ));
    }

    #[test]
    fn append_is_associative() {
        let a = Affine3D::of_translation(&Vector3::new(1.0, 0.0, 0.0));
        let b = Affine3D::of_heading(FRAC_PI_2);
        let c = Affine3D::of_scaling(&Vector3::new(2.0, 3.0, 4.0));
        let left = a.append(&b).append(&c);
        let right = a.append(&b.append(&c));
        let p = Point3::new(0.5, -1.0, 2.0);
        assert_relative_eq!(left.transform_point(&p), right.transform_point(&p), epsilon = 1e-12);
    }

    #[test]
    fn append_applies_self_first() {
        let translate = Affine2D::of_translation(&Vector2::new(1.0, 0.0));
        let rotate = Affine2D::of_rotation(FRAC_PI_2);
        let p = translate.append(&rotate).transform_point(&Point2::origin());
        assert_relative_eq!(p, Point2::new(0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn of_applies_rightmost_first() {
        let translate = Affine2D::of_translation(&Vector2::new(1.0, 0.0));
        let rotate = Affine2D::of_rotation(FRAC_PI_2);
        let p = Affine2D::of(&[translate, rotate]).transform_point(&Point2::new(1.0, 0.0));
        assert_relative_eq!(p, Point2::new(1.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn empty_sequence_is_identity() {
        let seq: AffineSequence<Affine3D> = AffineSequence::empty();
        let p = Point3::new(1.0, 2.0, 3.0);
        assert_relative_eq!(seq.solve().transform_point(&p), p);
    }

    #[test]
    fn sequence_folds_in_order() {
        let seq = AffineSequence::new(vec![
            Affine2D::of_translation(&Vector2::new(1.0, 0.0)),
            Affine2D::of_rotation(FRAC_PI_2),
        ])
        .then(Affine2D::of_translation(&Vector2::new(0.0, 5.0)));
        assert_eq!(seq.len(), 3);
        let p = seq.solve().transform_point(&Point2::origin());
        assert_relative_eq!(p, Point2::new(0.0, 6.0), epsilon = 1e-12);
    }

    #[test]
    fn decomposition_recovers_components() {
        let a = sample_3d();
        assert_relative_eq!(a.extract_translation(), Vector3::new(3.0, -2.0, 1.5));
        assert_relative_eq!(a.extract_scaling(), Vector3::new(2.0, 0.5, 1.5), epsilon = 1e-12);
        let rotation = a.extract_rotation(1e-9).unwrap();
        let expected = Rotation3::from_euler_angles(0.3, -0.2, 1.1);
        assert_relative_eq!(rotation.matrix(), expected.matrix(), epsilon = 1e-9);
    }

    #[test]
    fn heading_decomposition_2d() {
        let a = Affine2D::of_pose(&Pose2::new(Point2::new(4.0, 5.0), 0.8));
        assert_relative_eq!(a.extract_rotation_angle(1e-9).unwrap(), 0.8, epsilon = 1e-12);
        assert_relative_eq!(a.extract_translation(), Vector2::new(4.0, 5.0));
    }

    #[test]
    fn shear_is_rejected() {
        let mut m = Matrix4::identity();
        m[(0, 1)] = 0.5;
        let a = Affine3D::from_matrix(m).unwrap();
        assert!(!a.is_shear_free(1e-9));
        assert!(matches!(
            a.extract_rotation(1e-9).unwrap_err(),
            RoadGeomError::Geometry(GeometryError::ShearedTransform)
        ));
    }

    #[test]
    fn invalid_last_row_rejected() {
        let mut m = Matrix3::identity();
        m[(2, 0)] = 1.0;
        assert!(Affine2D::from_matrix(m).is_err());
    }

    #[test]
    fn embedding_keeps_planar_mapping() {
        let a2 = Affine2D::of_pose(&Pose2::new(Point2::new(1.0, 2.0), 0.4));
        let a3 = Affine3D::from(&a2);
        let p2 = a2.transform_point(&Point2::new(3.0, -1.0));
        let p3 = a3.transform_point(&Point3::new(3.0, -1.0, 7.0));
        assert_relative_eq!(p3, Point3::new(p2.x, p2.y, 7.0), epsilon = 1e-12);
    }

    #[test]
    fn pose_transform_rotates_heading() {
        let a = Affine2D::of_rotation(0.25);
        let pose = a.transform_pose(&Pose2::new(Point2::new(1.0, 0.0), 0.5));
        assert_relative_eq!(pose.heading, 0.75, epsilon = 1e-12);
    }

    #[test]
    fn pose_heading_is_not_wrapped() {
        let a = Affine2D::of_pose(&Pose2::new(Point2::new(2.0, -1.0), 3.0));
        let pose = a.transform_pose(&Pose2::new(Point2::origin(), 0.5));
        assert_relative_eq!(pose.heading, 3.5, epsilon = 1e-12);
        assert_relative_eq!(pose.point, Point2::new(2.0, -1.0), epsilon = 1e-12);

        let scaled = Affine2D::of_scaling(&Vector2::new(2.0, 2.0));
        let pose = scaled.transform_pose(&Pose2::new(Point2::new(1.0, 1.0), -3.0));
        assert_relative_eq!(pose.heading, -3.0, epsilon = 1e-12);
    }
}
