use crate::error::{ConstructionError, GeometryError, Result};
use crate::math::fuzzy::fuzzy_eq;
use crate::math::{Point2, Point3, Pose2, Range};

use super::{Curve3, CurveSegment};

/// A non-fatal finding recorded while assembling a composite curve.
#[derive(Debug, Clone, PartialEq)]
pub enum CurveDiagnostic {
    /// The input entry at `index` was dropped because its length is within tolerance of zero.
    ZeroLengthSegmentRemoved { index: usize, length: f64 },
    /// The input entry at `index` was dropped because its successor starts
    /// at the same arc length. `length` is the declared length.
    EmptyDomainRemoved { index: usize, length: f64 },
    /// The declared length of entry `index` disagrees with the spacing of the start values.
    /// The computed length is used.
    LengthMismatch {
        index: usize,
        declared: f64,
        computed: f64,
    },
}

/// A segment together with the absolute arc-length range it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeMember {
    segment: CurveSegment,
    domain: Range,
}

impl CompositeMember {
    #[must_use]
    pub fn new(segment: CurveSegment, domain: Range) -> Self {
        Self { segment, domain }
    }

    #[must_use]
    pub fn segment(&self) -> &CurveSegment {
        &self.segment
    }

    /// Absolute arc-length domain.
    #[must_use]
    pub fn domain(&self) -> &Range {
        &self.domain
    }
}

/// Heterogeneous segments stitched end to end over increasing arc length.
///
/// Member domains partition the curve domain: every member is half-open
/// `[s_i, s_{i+1})` except the last, which is closed.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeCurve {
    members: Vec<CompositeMember>,
    start_arc_lengths: Vec<f64>,
    domain: Range,
    tolerance: f64,
    diagnostics: Vec<CurveDiagnostic>,
}

impl CompositeCurve {
    /// Assembles a composite from members sorted by domain.
    ///
    /// Use [`crate::operations::creation::BuildCompositeCurve`] to build
    /// one from raw plan-view records.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::EmptyCurve`] if `members`
    /// is empty and [`GeometryError::Degenerate`] if the domains do not
    /// partition a single interval.
    pub fn new(
        members: Vec<CompositeMember>,
        tolerance: f64,
        diagnostics: Vec<CurveDiagnostic>,
    ) -> Result<Self> {
        let (Some(first), Some(last)) = (members.first(), members.last()) else {
            return Err(ConstructionError::EmptyCurve.into());
        };
        for pair in members.windows(2) {
            let (a, b) = (&pair[0].domain, &pair[1].domain);
            if !fuzzy_eq(a.upper(), b.lower(), tolerance) || a.intersects(b) {
                return Err(GeometryError::Degenerate(format!(
                    "member domains {a} and {b} do not connect"
                ))
                .into());
            }
        }
        let domain = first.domain.span(&last.domain);
        let start_arc_lengths = members.iter().map(|m| m.domain.lower()).collect();
        Ok(Self {
            members,
            start_arc_lengths,
            domain,
            tolerance,
            diagnostics,
        })
    }

    #[must_use]
    pub fn members(&self) -> &[CompositeMember] {
        &self.members
    }

    /// Absolute start arc length of every member, ascending.
    #[must_use]
    pub fn start_arc_lengths(&self) -> &[f64] {
        &self.start_arc_lengths
    }

    /// Absolute arc-length domain `[s_min, s_max]`.
    #[must_use]
    pub fn domain(&self) -> &Range {
        &self.domain
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.domain.upper() - self.domain.lower()
    }

    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Findings recorded while building the curve.
    #[must_use]
    pub fn diagnostics(&self) -> &[CurveDiagnostic] {
        &self.diagnostics
    }

    /// Member whose domain owns arc length `s`.
    ///
    /// Values below the domain map to the first member, values above to the last.
    #[must_use]
    pub fn member_at(&self, s: f64) -> &CompositeMember {
        let index = self.start_arc_lengths.partition_point(|&start| start <= s);
        &self.members[index.saturating_sub(1).min(self.members.len() - 1)]
    }

    /// Pose at absolute arc length `s`.
    ///
    /// Headings are not wrapped into `(-pi, pi]`: within a member the
    /// heading is the member's local heading plus its placement rotation.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::OutOfDomain`] if `s` lies outside the domain
    /// by more than the tolerance.
    pub fn evaluate(&self, s: f64) -> Result<Pose2> {
        if !self.domain.fuzzy_contains(s, self.tolerance) {
            return Err(GeometryError::OutOfDomain {
                parameter: s,
                min: self.domain.lower(),
                max: self.domain.upper(),
            }
            .into());
        }
        let s = s.clamp(self.domain.lower(), self.domain.upper());
        let member = self.member_at(s);
        let local = (s - member.domain.lower()).clamp(0.0, member.segment.length());
        member.segment.evaluate(local)
    }

    /// Point at absolute arc length `s`.
    ///
    /// # Errors
    ///
    /// See [`CompositeCurve::evaluate`].
    pub fn evaluate_point(&self, s: f64) -> Result<Point2> {
        Ok(self.evaluate(s)?.point)
    }

    /// Pose at the start of the curve.
    ///
    /// # Errors
    ///
    /// Propagates evaluation errors of the first member.
    pub fn start_pose(&self) -> Result<Pose2> {
        self.evaluate(self.domain.lower())
    }

    /// Pose at the end of the curve.
    ///
    /// # Errors
    ///
    /// Propagates evaluation errors of the last member.
    pub fn end_pose(&self) -> Result<Pose2> {
        self.evaluate(self.domain.upper())
    }
}

impl Curve3 for CompositeCurve {
    fn domain(&self) -> Range {
        self.domain
    }

    fn evaluate(&self, s: f64) -> Result<Point3> {
        let point = self.evaluate_point(s)?;
        Ok(Point3::new(point.x, point.y, 0.0))
    }
}
