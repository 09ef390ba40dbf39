use tracing::{debug, warn};

use crate::error::{ConstructionError, Result};
use crate::geometry::curve::{
    select_segment_kind, CompositeCurve, CompositeMember, CurveDiagnostic, CurveSegment,
    RawPlanViewSegment,
};
use crate::math::fuzzy::{fuzzy_eq, fuzzy_le};
use crate::math::{Affine2D, AffineSequence, BoundType, Range, Vector2};

/// Stitches raw plan-view records into one continuous composite curve.
///
/// Entries with a length within tolerance of zero are dropped and recorded
/// as diagnostics. Segment domains are derived from consecutive start
/// values; a declared length that disagrees with that spacing is recorded
/// but the derived length wins.
pub struct BuildCompositeCurve {
    segments: Vec<RawPlanViewSegment>,
    offset: Vector2,
    tolerance: f64,
}

impl BuildCompositeCurve {
    /// Creates a new `BuildCompositeCurve` operation.
    #[must_use]
    pub fn new(segments: Vec<RawPlanViewSegment>, offset: Vector2, tolerance: f64) -> Self {
        Self {
            segments,
            offset,
            tolerance,
        }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::EmptyCurve`] if no entry of positive
    /// length remains, and [`ConstructionError::InvalidInput`] for
    /// non-finite values or start values that decrease.
    pub fn execute(&self) -> Result<CompositeCurve> {
        self.validate_input()?;

        let mut diagnostics = Vec::new();
        let mut retained: Vec<(usize, &RawPlanViewSegment)> = Vec::with_capacity(self.segments.len());
        for (index, raw) in self.segments.iter().enumerate() {
            if fuzzy_le(raw.length, 0.0, self.tolerance) {
                debug!(index, s = raw.s, length = raw.length, "removing zero-length plan-view segment");
                diagnostics.push(CurveDiagnostic::ZeroLengthSegmentRemoved {
                    index,
                    length: raw.length,
                });
            } else {
                retained.push((index, raw));
            }
        }

        // A non-final entry whose successor starts at the same s covers nothing
        while let Some(k) = (0..retained.len().saturating_sub(1))
            .find(|&k| fuzzy_eq(retained[k + 1].1.s, retained[k].1.s, self.tolerance))
        {
            let (index, raw) = retained.remove(k);
            debug!(index, s = raw.s, length = raw.length, "removing plan-view segment with empty domain");
            diagnostics.push(CurveDiagnostic::EmptyDomainRemoved {
                index,
                length: raw.length,
            });
        }

        if retained.is_empty() {
            return Err(ConstructionError::EmptyCurve.into());
        }

        let offset_affine = Affine2D::of_translation(&self.offset);
        let mut members = Vec::with_capacity(retained.len());
        for (k, &(index, raw)) in retained.iter().enumerate() {
            let (upper, upper_type) = match retained.get(k + 1) {
                Some((_, next)) => (next.s, BoundType::Open),
                None => (raw.s + raw.length, BoundType::Closed),
            };
            let domain = Range::new(raw.s, BoundType::Closed, upper, upper_type).map_err(|_| {
                ConstructionError::InvalidInput(format!(
                    "plan-view segment {index} starts at {} after its successor at {upper}",
                    raw.s
                ))
            })?;
            let computed = upper - raw.s;
            if !fuzzy_eq(computed, raw.length, self.tolerance) {
                warn!(
                    index,
                    declared = raw.length,
                    computed,
                    "plan-view segment length disagrees with start values"
                );
                diagnostics.push(CurveDiagnostic::LengthMismatch {
                    index,
                    declared: raw.length,
                    computed,
                });
            }

            let affine = AffineSequence::new(vec![raw.start_pose().to_affine(), offset_affine]).solve();
            let kind = select_segment_kind(&raw.geometry, computed);
            let segment = CurveSegment::new(kind, computed, affine, upper_type, self.tolerance)?;
            members.push(CompositeMember::new(segment, domain));
        }

        CompositeCurve::new(members, self.tolerance, diagnostics)
    }

    fn validate_input(&self) -> Result<()> {
        for (index, raw) in self.segments.iter().enumerate() {
            let values = [raw.s, raw.x, raw.y, raw.hdg, raw.length];
            if values.iter().any(|v| !v.is_finite()) {
                return Err(ConstructionError::InvalidInput(format!(
                    "plan-view segment {index} contains a non-finite value"
                ))
                .into());
            }
        }
        if !(self.offset.x.is_finite() && self.offset.y.is_finite()) {
            return Err(ConstructionError::InvalidInput("offset must be finite".into()).into());
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::{GeometryError, RoadGeomError};
    use crate::geometry::curve::{RawGeometry, SegmentKind};
    use crate::math::{CubicFunction, Point2};

    const TOL: f64 = 1e-7;

    fn build(segments: Vec<RawPlanViewSegment>) -> Result<CompositeCurve> {
        BuildCompositeCurve::new(segments, Vector2::zeros(), TOL).execute()
    }

    #[test]
    fn zero_length_member_is_filtered() {
        let curve = build(vec![
            RawPlanViewSegment::line(0.0, 0.0, 0.0, 0.0, 5.0),
            RawPlanViewSegment::line(5.0, 5.0, 0.0, 0.0, 0.0),
            RawPlanViewSegment::line(5.0, 5.0, 0.0, 0.0, 5.0),
        ])
        .unwrap();
        assert_eq!(curve.members().len(), 2);
        assert_eq!(*curve.domain(), Range::closed(0.0, 10.0).unwrap());
        assert_eq!(curve.start_arc_lengths(), &[0.0, 5.0]);
        assert_eq!(
            curve.diagnostics(),
            &[CurveDiagnostic::ZeroLengthSegmentRemoved {
                index: 1,
                length: 0.0
            }]
        );
    }

    #[test]
    fn member_domains_partition_curve_domain() {
        let curve = build(vec![
            RawPlanViewSegment::line(0.0, 0.0, 0.0, 0.0, 2.0),
            RawPlanViewSegment::line(2.0, 2.0, 0.0, 0.0, 3.0).with_geometry(RawGeometry::arc(0.05)),
            RawPlanViewSegment::line(5.0, 0.0, 0.0, 0.0, 4.0).with_geometry(RawGeometry::spiral(0.0, 0.1)),
        ])
        .unwrap();
        let members = curve.members();
        assert_eq!(members[0].domain(), &Range::closed_open(0.0, 2.0).unwrap());
        assert_eq!(members[1].domain(), &Range::closed_open(2.0, 5.0).unwrap());
        assert_eq!(members[2].domain(), &Range::closed(5.0, 9.0).unwrap());
        for pair in members.windows(2) {
            assert!((pair[0].domain().upper() - pair[1].domain().lower()).abs() < f64::EPSILON);
            assert!(!pair[0].domain().intersects(pair[1].domain()));
        }
        assert_eq!(members[0].segment().end_bound(), BoundType::Open);
        assert_eq!(members[2].segment().end_bound(), BoundType::Closed);
        assert!(matches!(members[2].segment().kind(), SegmentKind::Spiral(_)));
    }

    #[test]
    fn evaluation_uses_owning_member() {
        let curve = build(vec![
            RawPlanViewSegment::line(0.0, 0.0, 0.0, 0.0, 5.0),
            RawPlanViewSegment::line(5.0, 5.0, 0.0, std::f64::consts::FRAC_PI_2, 5.0),
        ])
        .unwrap();
        let before = curve.evaluate(4.0).unwrap();
        assert_relative_eq!(before.point, Point2::new(4.0, 0.0), epsilon = 1e-12);
        let boundary = curve.evaluate(5.0).unwrap();
        assert_relative_eq!(boundary.heading, std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
        let end = curve.end_pose().unwrap();
        assert_relative_eq!(end.point, Point2::new(5.0, 5.0), epsilon = 1e-12);
    }

    #[test]
    fn heading_keeps_turning_past_pi() {
        let curve = build(vec![
            RawPlanViewSegment::line(0.0, 0.0, 0.0, 3.0, 5.0).with_geometry(RawGeometry::arc(0.1))
        ])
        .unwrap();
        assert_relative_eq!(curve.evaluate(0.0).unwrap().heading, 3.0, epsilon = 1e-12);
        assert_relative_eq!(curve.evaluate(5.0).unwrap().heading, 3.5, epsilon = 1e-12);
    }

    #[test]
    fn offset_translates_every_member() {
        let curve = BuildCompositeCurve::new(
            vec![RawPlanViewSegment::line(0.0, 1.0, 2.0, 0.0, 3.0)],
            Vector2::new(100.0, 200.0),
            TOL,
        )
        .execute()
        .unwrap();
        assert_relative_eq!(
            curve.evaluate_point(1.0).unwrap(),
            Point2::new(102.0, 202.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn out_of_domain_evaluation_fails() {
        let curve = build(vec![RawPlanViewSegment::line(0.0, 0.0, 0.0, 0.0, 5.0)]).unwrap();
        assert!(curve.evaluate(5.0 + 1e-8).is_ok());
        assert!(matches!(
            curve.evaluate(5.5).unwrap_err(),
            RoadGeomError::Geometry(GeometryError::OutOfDomain { .. })
        ));
        assert!(curve.evaluate(-0.1).is_err());
    }

    #[test]
    fn all_zero_length_gives_empty_curve() {
        let err = build(vec![
            RawPlanViewSegment::line(0.0, 0.0, 0.0, 0.0, 0.0),
            RawPlanViewSegment::line(0.0, 0.0, 0.0, 0.0, 1e-9),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            RoadGeomError::Construction(ConstructionError::EmptyCurve)
        ));
        assert!(build(Vec::new()).is_err());
    }

    #[test]
    fn length_mismatch_is_recorded_not_fatal() {
        let curve = build(vec![
            RawPlanViewSegment::line(0.0, 0.0, 0.0, 0.0, 4.0),
            RawPlanViewSegment::line(5.0, 5.0, 0.0, 0.0, 2.0),
        ])
        .unwrap();
        assert_relative_eq!(curve.members()[0].segment().length(), 5.0);
        assert_eq!(
            curve.diagnostics(),
            &[CurveDiagnostic::LengthMismatch {
                index: 0,
                declared: 4.0,
                computed: 5.0
            }]
        );
    }

    #[test]
    fn decreasing_starts_rejected() {
        let err = build(vec![
            RawPlanViewSegment::line(5.0, 0.0, 0.0, 0.0, 5.0),
            RawPlanViewSegment::line(1.0, 0.0, 0.0, 0.0, 5.0),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            RoadGeomError::Construction(ConstructionError::InvalidInput(_))
        ));
    }

    #[test]
    fn shared_start_drops_leading_entry() {
        let curve = build(vec![
            RawPlanViewSegment::line(0.0, 0.0, 0.0, 0.0, 2.0),
            RawPlanViewSegment::line(0.0, 0.0, 0.0, 0.0, 3.0),
        ])
        .unwrap();
        assert_eq!(curve.members().len(), 1);
        assert_relative_eq!(curve.length(), 3.0);
        assert_eq!(
            curve.diagnostics(),
            &[CurveDiagnostic::EmptyDomainRemoved {
                index: 0,
                length: 2.0
            }]
        );
    }

    #[test]
    fn comparisons_honor_tolerance() {
        let curve = BuildCompositeCurve::new(
            vec![
                RawPlanViewSegment::line(0.0, 0.0, 0.0, 0.0, 5.0),
                RawPlanViewSegment::line(5.0, 5.0, 0.0, 0.0, 1e-4),
                RawPlanViewSegment::line(5.0 + 5e-4, 5.0, 0.0, 0.0, 2.0),
            ],
            Vector2::zeros(),
            1e-3,
        )
        .execute()
        .unwrap();
        assert_eq!(curve.members().len(), 2);
        assert_eq!(
            curve.diagnostics(),
            &[CurveDiagnostic::ZeroLengthSegmentRemoved {
                index: 1,
                length: 1e-4
            }]
        );
        assert_relative_eq!(curve.length(), 7.0 + 5e-4, epsilon = 1e-12);
    }

    #[test]
    fn cubic_polynomial_member_follows_local_frame() {
        let curve = build(vec![RawPlanViewSegment::line(0.0, 10.0, 0.0, std::f64::consts::FRAC_PI_2, 2.0)
            .with_geometry(RawGeometry::poly3(CubicFunction::new(0.0, 0.0, 0.5, 0.0)))])
        .unwrap();
        // Local (1, 0.5) rotated by 90 degrees: (-0.5, 1)
        assert_relative_eq!(
            curve.evaluate_point(1.0).unwrap(),
            Point2::new(9.5, 1.0),
            epsilon = 1e-12
        );
    }
}
