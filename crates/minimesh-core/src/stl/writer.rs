//! Binary STL export
//!
//! Writes a [`Mesh`] back to disk as binary STL. Normals are recomputed
//! from triangle geometry; the normals stored in a source file are not
//! kept by the indexed model.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::{MeshError, Result};
use crate::mesh::Mesh;

/// Write a mesh as binary STL
///
/// # Errors
///
/// Returns [`MeshError::EmptyMesh`] for a mesh with no triangles and
/// [`MeshError::WriteError`] if the file cannot be created or written.
pub fn write_stl_file<P: AsRef<Path>>(mesh: &Mesh, path: P) -> Result<()> {
    let path = path.as_ref();
    if mesh.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    let mut triangles = Vec::with_capacity(mesh.triangle_count());
    for index in 0..mesh.triangle_count() {
        // degenerate triangles get a zero normal, matching what most
        // slicers emit for them
        let normal = match mesh.triangle_normal(index) {
            Ok(n) => [n.x as f32, n.y as f32, n.z as f32],
            Err(_) => {
                log::warn!("triangle {index} is degenerate; writing zero normal");
                [0.0, 0.0, 0.0]
            }
        };

        let corners = mesh.triangle_coords(index);
        triangles.push(stl_io::Triangle {
            normal: stl_io::Normal::new(normal),
            vertices: corners.map(|p| stl_io::Vertex::new([p.x as f32, p.y as f32, p.z as f32])),
        });
    }

    let file = File::create(path).map_err(|e| MeshError::write_error(path, e))?;
    let mut writer = BufWriter::new(file);
    stl_io::write_stl(&mut writer, triangles.iter())
        .map_err(|e| MeshError::write_error(path, e))?;
    Ok(())
}
