mod ruled;
mod triangulate;
mod triangulator;

pub use ruled::triangulate_ruled_strip;
pub use triangulate::{triangulate, Triangulate};
pub use triangulator::{SpadeTriangulator, Triangulator};

use crate::math::polygon_3d::are_colinear;
use crate::math::{Point3, Vector3};

/// A triangle in 3D space whose vertex order defines its orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle3 {
    pub vertices: [Point3; 3],
}

impl Triangle3 {
    #[must_use]
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Unnormalized normal by the right-hand rule; its length is twice the area.
    #[must_use]
    pub fn normal(&self) -> Vector3 {
        let [a, b, c] = &self.vertices;
        (b - a).cross(&(c - a))
    }

    /// Unit normal, or `None` if the triangle has no area.
    #[must_use]
    pub fn unit_normal(&self) -> Option<Vector3> {
        self.normal().try_normalize(crate::math::EPSILON)
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.normal().norm() / 2.0
    }

    /// Returns `true` if the three vertices lie on a common line within `tolerance`.
    #[must_use]
    pub fn is_colinear(&self, tolerance: f64) -> bool {
        let [a, b, c] = &self.vertices;
        are_colinear(a, b, c, tolerance)
    }

    /// Same triangle with the opposite winding.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let [a, b, c] = self.vertices;
        Self::new(a, c, b)
    }
}

/// An indexed triangle mesh with flat per-vertex normals.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Vertex normals.
    pub normals: Vec<Vector3>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Builds a mesh with three unshared vertices per triangle.
    ///
    /// Triangles without area get a zero normal.
    #[must_use]
    pub fn from_triangles(triangles: &[Triangle3]) -> Self {
        let mut mesh = Self {
            vertices: Vec::with_capacity(triangles.len() * 3),
            normals: Vec::with_capacity(triangles.len() * 3),
            indices: Vec::with_capacity(triangles.len()),
        };
        for triangle in triangles {
            let normal = triangle.unit_normal().unwrap_or_else(Vector3::zeros);
            #[allow(clippy::cast_possible_truncation)]
            let base = mesh.vertices.len() as u32;
            mesh.vertices.extend_from_slice(&triangle.vertices);
            mesh.normals.extend([normal; 3]);
            mesh.indices.push([base, base + 1, base + 2]);
        }
        mesh
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }
}
