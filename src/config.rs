use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Read-only numeric settings shared by every geometry construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Tolerance for all fuzzy comparisons.
    pub tolerance: f64,
    /// Arc-length step used when sampling ruled surfaces.
    pub discretization_step_size: f64,
    /// Triangles whose normal deviates more than this from the polygon
    /// normal are reversed.
    pub orientation_threshold_degrees: f64,
    /// Number of straight segments approximating a full circle.
    pub circle_slices: usize,
}

impl GeometryConfig {
    pub const DEFAULT_TOLERANCE: f64 = 1e-7;
    pub const DEFAULT_DISCRETIZATION_STEP_SIZE: f64 = 0.3;
    pub const DEFAULT_ORIENTATION_THRESHOLD_DEGREES: f64 = 135.0;
    pub const DEFAULT_CIRCLE_SLICES: usize = 16;

    /// Parses a configuration from TOML and validates it.
    ///
    /// Missing keys fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is usable by the geometry algorithms.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            ))
            .into());
        }
        if !(self.discretization_step_size.is_finite()
            && self.discretization_step_size > self.tolerance)
        {
            return Err(ConfigError::Invalid(format!(
                "discretization_step_size must exceed the tolerance, got {}",
                self.discretization_step_size
            ))
            .into());
        }
        if !(self.orientation_threshold_degrees > 0.0
            && self.orientation_threshold_degrees <= 180.0)
        {
            return Err(ConfigError::Invalid(format!(
                "orientation_threshold_degrees must be in (0, 180], got {}",
                self.orientation_threshold_degrees
            ))
            .into());
        }
        if self.circle_slices < 3 {
            return Err(ConfigError::Invalid(format!(
                "circle_slices must be at least 3, got {}",
                self.circle_slices
            ))
            .into());
        }
        Ok(())
    }
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            tolerance: Self::DEFAULT_TOLERANCE,
            discretization_step_size: Self::DEFAULT_DISCRETIZATION_STEP_SIZE,
            orientation_threshold_degrees: Self::DEFAULT_ORIENTATION_THRESHOLD_DEGREES,
            circle_slices: Self::DEFAULT_CIRCLE_SLICES,
        }
    }
}
