//! STL file parser
//!
//! Reads STL files (both ASCII and binary) through the `stl_io` crate and
//! converts them to the indexed [`Mesh`] model with `f64` coordinates.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use nalgebra::Point3;
use stl_io::IndexedMesh;

use crate::error::{MeshError, Result};
use crate::mesh::Mesh;

/// STL parser
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StlParser;

impl StlParser {
    /// Parse an STL file from a path
    ///
    /// The format variant (ASCII or binary) is detected automatically.
    /// Vertices are deduplicated by `stl_io`, so `vertex_count` reports
    /// unique positions.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::ReadError`] if the file cannot be opened and
    /// [`MeshError::InvalidFormat`] if its content is not valid STL.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Mesh> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| MeshError::read_error(path, e))?;
        let mut reader = BufReader::new(file);

        let indexed = read_indexed(&mut reader)
            .map_err(|e| MeshError::invalid_format(path, e.to_string()))?;

        let mut mesh = to_mesh(&indexed);
        mesh.name = name_from_path(path);
        mesh.is_binary = is_likely_binary(path, indexed.faces.len())
            .map_err(|e| MeshError::read_error(path, e))?;
        Ok(mesh)
    }

    /// Parse STL data from a string (ASCII only)
    ///
    /// Binary STL cannot be carried in a `&str`; use
    /// [`parse_file`](StlParser::parse_file) for binary input.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::ParseError`] if the string is not valid ASCII STL.
    pub fn parse_str(content: &str) -> Result<Mesh> {
        let mut cursor = std::io::Cursor::new(content.as_bytes());
        let indexed =
            read_indexed(&mut cursor).map_err(|e| MeshError::ParseError(e.to_string()))?;

        let mut mesh = to_mesh(&indexed);
        mesh.name = name_from_header(content);
        mesh.is_binary = false;
        Ok(mesh)
    }
}

/// Read and validate an indexed mesh from any seekable source
fn read_indexed<R: Read + Seek>(reader: &mut R) -> std::io::Result<IndexedMesh> {
    let indexed = stl_io::read_stl(reader)?;
    indexed.validate()?;
    Ok(indexed)
}

/// Widen the `f32` indexed mesh to the `f64` model
fn to_mesh(indexed: &IndexedMesh) -> Mesh {
    let vertices = indexed
        .vertices
        .iter()
        .map(|v| Point3::new(f64::from(v[0]), f64::from(v[1]), f64::from(v[2])))
        .collect();
    let tris = indexed.faces.iter().map(|f| f.vertices).collect();
    Mesh::new(vertices, tris)
}

/// Mesh name from the file stem
fn name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(std::string::ToString::to_string)
}

/// Mesh name from the ASCII `solid <name>` header line
fn name_from_header(content: &str) -> Option<String> {
    content
        .lines()
        .next()
        .and_then(|line| line.strip_prefix("solid "))
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
}

/// Detect whether a file on disk is binary STL
///
/// ASCII files start with `solid `; binary files start with an arbitrary
/// 80-byte header and are exactly `80 + 4 + 50 * triangle_count` bytes.
/// Some binary exporters still write "solid" into the header, so the size
/// check decides when both hold.
fn is_likely_binary(path: &Path, triangle_count: usize) -> std::io::Result<bool> {
    let mut file = File::open(path)?;
    let mut prefix = [0u8; 6];
    let read = file.read(&mut prefix)?;
    if read < 5 {
        return Ok(false);
    }

    if &prefix[0..5] != b"solid" {
        return Ok(true);
    }

    let file_size = std::fs::metadata(path)?.len();
    let binary_size = 80 + 4 + 50 * triangle_count as u64;
    if file_size == binary_size {
        log::warn!(
            "{} starts with \"solid\" but matches the binary layout; treating as binary",
            path.display()
        );
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_FACETS: &str = r"solid test_cube
  facet normal 0.0 0.0 1.0
    outer loop
      vertex 0.0 0.0 0.0
      vertex 1.0 0.0 0.0
      vertex 1.0 1.0 0.0
    endloop
  endfacet
  facet normal 0.0 0.0 1.0
    outer loop
      vertex 0.0 0.0 0.0
      vertex 1.0 1.0 0.0
      vertex 0.0 1.0 0.0
    endloop
  endfacet
endsolid test_cube
";

    #[test]
    fn test_parse_str() {
        let mesh = StlParser::parse_str(TWO_FACETS).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.name, Some("test_cube".to_string()));
        assert!(!mesh.is_binary);
    }

    #[test]
    fn test_parse_str_bounding_box() {
        let mesh = StlParser::parse_str(TWO_FACETS).unwrap();
        let (min, max) = mesh.aabb();
        assert_eq!(min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(max, Point3::new(1.0, 1.0, 0.0));
        assert_eq!(mesh.dimensions(), [1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_parse_str_rejects_garbage() {
        assert!(matches!(
            StlParser::parse_str("not an stl file at all"),
            Err(MeshError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_file_missing() {
        assert!(matches!(
            StlParser::parse_file("/nonexistent/model.stl"),
            Err(MeshError::ReadError { .. })
        ));
    }

    #[test]
    fn test_parse_file_reads_ascii() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plate.stl");
        std::fs::write(&path, TWO_FACETS).unwrap();

        let mesh = StlParser::parse_file(&path).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.name, Some("plate".to_string()));
        assert!(!mesh.is_binary);
    }

    #[test]
    fn test_parse_file_invalid_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.stl");
        std::fs::write(&path, "solid broken\n  facet oops\n").unwrap();

        assert!(matches!(
            StlParser::parse_file(&path),
            Err(MeshError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_name_from_header() {
        assert_eq!(
            name_from_header("solid my_model\n  facet..."),
            Some("my_model".to_string())
        );
        assert_eq!(name_from_header("solid \n  facet..."), None);
    }
}
