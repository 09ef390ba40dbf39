use thiserror::Error;

/// Top-level error type for the road geometry engine.
#[derive(Debug, Error)]
pub enum RoadGeomError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("transform is singular and cannot be inverted")]
    SingularTransform,

    #[error("transform contains shear and cannot be decomposed")]
    ShearedTransform,

    #[error("invalid affine matrix: {0}")]
    InvalidAffine(String),

    #[error("parameter {parameter} is out of domain [{min}, {max}]")]
    OutOfDomain { parameter: f64, min: f64, max: f64 },

    #[error("domain mismatch: expected {expected}, got {actual}")]
    DomainMismatch { expected: String, actual: String },

    #[error("range is empty")]
    EmptyRange,

    #[error("invalid range: lower bound {lower} exceeds upper bound {upper}")]
    InvalidRange { lower: f64, upper: f64 },

    #[error("zero-length vector")]
    ZeroVector,

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors raised while constructing curves, rings, surfaces and solids.
#[derive(Debug, Error)]
pub enum ConstructionError {
    #[error("composite curve has no segments of positive length")]
    EmptyCurve,

    #[error("degenerate linear ring: {0}")]
    DegenerateRing(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors related to triangulation and meshing.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("triangle {index} has colinear vertices")]
    ColinearTriangle { index: usize },

    #[error("triangulation failed: {0}")]
    TriangulationFailure(String),

    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),
}

/// Errors related to loading and validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Convenience type alias for results using [`RoadGeomError`].
pub type Result<T> = std::result::Result<T, RoadGeomError>;
