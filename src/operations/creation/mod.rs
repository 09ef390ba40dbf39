mod build_bounded_surface;
mod build_composite_curve;
mod build_linear_ring;
mod make_circle;
mod make_cuboid;
mod make_cylinder;
mod make_rectangle;

pub use build_bounded_surface::BuildParametricBoundedSurface;
pub use build_composite_curve::BuildCompositeCurve;
pub use build_linear_ring::BuildLinearRing;
pub use make_circle::MakeCircle;
pub use make_cuboid::MakeCuboid;
pub use make_cylinder::MakeCylinder;
pub use make_rectangle::MakeRectangle;
