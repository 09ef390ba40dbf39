pub mod config;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod tessellation;

pub use config::GeometryConfig;
pub use error::{Result, RoadGeomError};
