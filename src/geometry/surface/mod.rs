mod linear_ring;
mod parametric_bounded;
mod polyhedron;

pub use linear_ring::{remove_redundant_vertices, LinearRing};
pub use parametric_bounded::{discretize, ParametricBoundedSurface};
pub use polyhedron::Polyhedron;
