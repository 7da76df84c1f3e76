//! Indexed triangle mesh model and metrics
//!
//! The mesh stores deduplicated vertices plus index triples, the form
//! `stl_io` produces when reading a file. All coordinates are `f64`; STL
//! files store `f32` and are widened on load.

use nalgebra::{Point3, Rotation3, Vector3};

use crate::error::{MeshError, Result};

/// Indexed triangle mesh
///
/// Vertices are unique points; each triangle is a triple of indices into
/// `vertices`. Triangle winding follows the source file: outward-wound
/// solids yield a positive [`volume`](Mesh::volume).
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Mesh name (from `solid <name>` header or the file stem)
    pub name: Option<String>,
    /// Whether the source file was binary STL
    pub is_binary: bool,
    /// Deduplicated vertex positions
    pub vertices: Vec<Point3<f64>>,
    /// Vertex index triples, one per triangle
    pub tris: Vec<[usize; 3]>,
}

impl Mesh {
    /// Create a mesh from vertices and index triples
    ///
    /// Every index in `tris` must be a valid index into `vertices`.
    #[must_use = "constructing a mesh has no side effects"]
    pub fn new(vertices: Vec<Point3<f64>>, tris: Vec<[usize; 3]>) -> Self {
        debug_assert!(
            tris.iter().flatten().all(|&i| i < vertices.len()),
            "triangle index out of bounds"
        );
        Self {
            name: None,
            is_binary: false,
            vertices,
            tris,
        }
    }

    /// Number of unique vertices
    #[inline]
    #[must_use = "vertex_count returns a value"]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles
    #[inline]
    #[must_use = "triangle_count returns a value"]
    pub fn triangle_count(&self) -> usize {
        self.tris.len()
    }

    /// Whether the mesh has no triangles
    #[inline]
    #[must_use = "is_empty returns a value"]
    pub fn is_empty(&self) -> bool {
        self.tris.is_empty()
    }

    /// Axis-aligned bounding box as (min, max) corners
    ///
    /// An empty mesh reports a degenerate box at the origin.
    #[must_use = "aabb returns the bounding box corners"]
    pub fn aabb(&self) -> (Point3<f64>, Point3<f64>) {
        if self.vertices.is_empty() {
            return (Point3::origin(), Point3::origin());
        }

        let mut min = [f64::INFINITY; 3];
        let mut max = [f64::NEG_INFINITY; 3];

        for vertex in &self.vertices {
            for i in 0..3 {
                min[i] = min[i].min(vertex[i]);
                max[i] = max[i].max(vertex[i]);
            }
        }

        (
            Point3::new(min[0], min[1], min[2]),
            Point3::new(max[0], max[1], max[2]),
        )
    }

    /// Bounding-box extents as `[width (X), depth (Y), height (Z)]`
    #[must_use = "dimensions returns width/depth/height extents"]
    pub fn dimensions(&self) -> [f64; 3] {
        let (min, max) = self.aabb();
        [max.x - min.x, max.y - min.y, max.z - min.z]
    }

    /// Enclosed volume by signed tetrahedron summation
    ///
    /// Sums `dot(a, cross(b, c)) / 6` over all triangles. The result is
    /// signed: a closed solid with outward winding gives a positive value,
    /// inverted winding a negative one. An empty mesh has volume `0.0`.
    #[must_use = "volume returns a value"]
    pub fn volume(&self) -> f64 {
        let mut volume = 0.0;
        for tri in &self.tris {
            let a = self.vertices[tri[0]].coords;
            let b = self.vertices[tri[1]].coords;
            let c = self.vertices[tri[2]].coords;
            volume += a.cross(&b).dot(&c) / 6.0;
        }
        volume
    }

    /// Total surface area, the sum of all triangle areas
    #[must_use = "surface_area returns a value"]
    pub fn surface_area(&self) -> f64 {
        let mut area = 0.0;
        for tri in &self.tris {
            let a = self.vertices[tri[0]];
            let b = self.vertices[tri[1]];
            let c = self.vertices[tri[2]];
            area += (b - a).cross(&(c - a)).norm() / 2.0;
        }
        area
    }

    /// Corner coordinates of triangle `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= triangle_count()`.
    #[must_use = "triangle_coords returns the corner points"]
    pub fn triangle_coords(&self, index: usize) -> [Point3<f64>; 3] {
        let tri = self.tris[index];
        [
            self.vertices[tri[0]],
            self.vertices[tri[1]],
            self.vertices[tri[2]],
        ]
    }

    /// Unit normal of triangle `index`, following its winding
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::DegenerateTriangle`] if the triangle has zero
    /// area and no direction can be derived.
    pub fn triangle_normal(&self, index: usize) -> Result<Vector3<f64>> {
        let [a, b, c] = self.triangle_coords(index);
        let normal = (b - a).cross(&(c - b));
        let length = normal.norm();
        if length == 0.0 {
            return Err(MeshError::DegenerateTriangle(index));
        }
        Ok(normal / length)
    }

    /// Move every vertex by `offset`
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for vertex in &mut self.vertices {
            *vertex += offset;
        }
    }

    /// Rotate every vertex about the origin
    pub fn rotate(&mut self, rotation: &Rotation3<f64>) {
        for vertex in &mut self.vertices {
            *vertex = rotation * *vertex;
        }
    }

    /// Append another mesh, shifting its indices past this mesh's vertices
    pub fn merge(&mut self, other: Mesh) {
        let base = self.vertices.len();
        self.vertices.extend(other.vertices);
        self.tris.extend(
            other
                .tris
                .into_iter()
                .map(|tri| [tri[0] + base, tri[1] + base, tri[2] + base]),
        );
    }

    /// Merge a copy of this mesh translated by `offset`
    pub fn copy_to_point(&mut self, offset: Vector3<f64>) {
        let mut copy = self.clone();
        copy.translate(offset);
        self.merge(copy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    /// 10 mm cube with outward winding: volume 1000, area 600
    fn cube() -> Mesh {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(10.0, 10.0, 0.0),
            Point3::new(0.0, 10.0, 0.0),
            Point3::new(0.0, 0.0, 10.0),
            Point3::new(10.0, 0.0, 10.0),
            Point3::new(10.0, 10.0, 10.0),
            Point3::new(0.0, 10.0, 10.0),
        ];
        let tris = vec![
            [0, 2, 1],
            [0, 3, 2],
            [4, 5, 6],
            [4, 6, 7],
            [0, 1, 5],
            [0, 5, 4],
            [3, 6, 2],
            [3, 7, 6],
            [0, 4, 7],
            [0, 7, 3],
            [1, 2, 6],
            [1, 6, 5],
        ];
        Mesh::new(vertices, tris)
    }

    #[test]
    fn test_counts() {
        let mesh = cube();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 12);
        assert!(!mesh.is_empty());
    }

    #[test]
    fn test_cube_volume() {
        assert!((cube().volume() - 1000.0).abs() < EPS);
    }

    #[test]
    fn test_cube_surface_area() {
        assert!((cube().surface_area() - 600.0).abs() < EPS);
    }

    #[test]
    fn test_inverted_winding_gives_negative_volume() {
        let mut mesh = cube();
        for tri in &mut mesh.tris {
            tri.swap(1, 2);
        }
        assert!((mesh.volume() + 1000.0).abs() < EPS);
    }

    #[test]
    fn test_aabb_and_dimensions() {
        let mesh = cube();
        let (min, max) = mesh.aabb();
        assert_eq!(min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(max, Point3::new(10.0, 10.0, 10.0));
        assert_eq!(mesh.dimensions(), [10.0, 10.0, 10.0]);
    }

    #[test]
    fn test_empty_mesh_metrics() {
        let mesh = Mesh::new(Vec::new(), Vec::new());
        assert!(mesh.is_empty());
        assert_eq!(mesh.dimensions(), [0.0, 0.0, 0.0]);
        assert_eq!(mesh.volume(), 0.0);
        assert_eq!(mesh.surface_area(), 0.0);
    }

    #[test]
    fn test_triangle_normal_points_outward() {
        let mesh = cube();
        // first triangle is on the z = 0 face
        let normal = mesh.triangle_normal(0).unwrap();
        assert!((normal - Vector3::new(0.0, 0.0, -1.0)).norm() < EPS);
    }

    #[test]
    fn test_degenerate_triangle_normal() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        let mesh = Mesh::new(vertices, vec![[0, 1, 2]]);
        assert!(matches!(
            mesh.triangle_normal(0),
            Err(MeshError::DegenerateTriangle(0))
        ));
    }

    #[test]
    fn test_translate_preserves_metrics() {
        let mut mesh = cube();
        mesh.translate(Vector3::new(-3.0, 7.5, 120.0));
        assert!((mesh.volume() - 1000.0).abs() < EPS);
        assert!((mesh.surface_area() - 600.0).abs() < EPS);
        let (min, _) = mesh.aabb();
        assert!((min.x + 3.0).abs() < EPS);
        assert!((min.y - 7.5).abs() < EPS);
        assert!((min.z - 120.0).abs() < EPS);
    }

    #[test]
    fn test_rotate_preserves_volume_and_area() {
        let mut mesh = cube();
        let rotation = Rotation3::from_euler_angles(0.3, -1.1, 2.4);
        mesh.rotate(&rotation);
        assert!((mesh.volume() - 1000.0).abs() < 1e-6);
        assert!((mesh.surface_area() - 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_merge_shifts_indices() {
        let mut mesh = cube();
        let mut other = cube();
        other.translate(Vector3::new(20.0, 0.0, 0.0));
        mesh.merge(other);

        assert_eq!(mesh.vertex_count(), 16);
        assert_eq!(mesh.triangle_count(), 24);
        assert!((mesh.volume() - 2000.0).abs() < EPS);
        // second cube's triangles reference the appended vertices
        assert!(mesh.tris[12..].iter().flatten().all(|&i| i >= 8));
    }

    #[test]
    fn test_copy_to_point_doubles_counts() {
        let mut mesh = cube();
        mesh.copy_to_point(Vector3::new(0.0, 0.0, 25.0));
        assert_eq!(mesh.vertex_count(), 16);
        assert_eq!(mesh.triangle_count(), 24);
        assert_eq!(mesh.dimensions(), [10.0, 10.0, 35.0]);
    }
}
