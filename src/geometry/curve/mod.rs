mod arc;
mod composite;
mod cubic_polynomial;
mod lateral;
mod line;
mod parametric_cubic;
mod raw;
mod segment;
mod spiral;

pub use arc::Arc;
pub use composite::{CompositeCurve, CompositeMember, CurveDiagnostic};
pub use cubic_polynomial::CubicPolynomial;
pub use lateral::LateralTranslatedCurve;
pub use line::LineSegment;
pub use parametric_cubic::{ParameterRange, ParametricCubic};
pub use raw::{RawArc, RawGeometry, RawParamPoly3, RawPlanViewSegment, RawSpiral};
pub use segment::{select_segment_kind, CurveSegment, SegmentKind};
pub use spiral::Spiral;

use std::fmt::Debug;

use crate::error::Result;
use crate::math::{Point3, Range};

/// A 3D curve parametrized over an arc-length domain.
pub trait Curve3: Debug + Send + Sync {
    /// Returns the parameter domain.
    fn domain(&self) -> Range;

    /// Evaluates the curve at parameter `s`.
    ///
    /// # Errors
    ///
    /// Returns an error if `s` is outside the domain or evaluation fails.
    fn evaluate(&self, s: f64) -> Result<Point3>;
}
