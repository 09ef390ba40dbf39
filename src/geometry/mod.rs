pub mod curve;
pub mod surface;

pub use curve::{CompositeCurve, Curve3, CurveSegment, LateralTranslatedCurve, SegmentKind};
pub use surface::{LinearRing, ParametricBoundedSurface, Polyhedron};
