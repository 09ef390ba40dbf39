//! Plain plan-view records as produced by an input parser.

use serde::{Deserialize, Serialize};

use crate::math::{CubicFunction, Point2, Pose2};

use super::ParameterRange;

/// One plan-view geometry entry: a start pose, a declared length and the
/// optional curve descriptions attached to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPlanViewSegment {
    /// Arc length at which the segment starts.
    pub s: f64,
    pub x: f64,
    pub y: f64,
    /// Start heading in radians.
    pub hdg: f64,
    /// Declared length.
    pub length: f64,
    #[serde(default)]
    pub geometry: RawGeometry,
}

impl RawPlanViewSegment {
    /// A straight segment.
    #[must_use]
    pub fn line(s: f64, x: f64, y: f64, hdg: f64, length: f64) -> Self {
        Self {
            s,
            x,
            y,
            hdg,
            length,
            geometry: RawGeometry::default(),
        }
    }

    /// Replaces the curve description.
    #[must_use]
    pub fn with_geometry(mut self, geometry: RawGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Pose at the start of the segment.
    #[must_use]
    pub fn start_pose(&self) -> Pose2 {
        Pose2::new(Point2::new(self.x, self.y), self.hdg)
    }
}

/// Optional curve descriptions of a plan-view entry.
///
/// More than one may be present; the richest one wins, see
/// [`super::select_segment_kind`]. With none present the entry is a line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawGeometry {
    pub spiral: Option<RawSpiral>,
    pub arc: Option<RawArc>,
    pub poly3: Option<CubicFunction>,
    pub param_poly3: Option<RawParamPoly3>,
}

impl RawGeometry {
    #[must_use]
    pub fn arc(curvature: f64) -> Self {
        Self {
            arc: Some(RawArc { curvature }),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn spiral(curv_start: f64, curv_end: f64) -> Self {
        Self {
            spiral: Some(RawSpiral {
                curv_start,
                curv_end,
            }),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn poly3(function: CubicFunction) -> Self {
        Self {
            poly3: Some(function),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn param_poly3(u: CubicFunction, v: CubicFunction, p_range: ParameterRange) -> Self {
        Self {
            param_poly3: Some(RawParamPoly3 { u, v, p_range }),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSpiral {
    pub curv_start: f64,
    pub curv_end: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawArc {
    pub curvature: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawParamPoly3 {
    pub u: CubicFunction,
    pub v: CubicFunction,
    #[serde(default)]
    pub p_range: ParameterRange,
}
