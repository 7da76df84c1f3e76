//! Mesh report type and serializers
//!
//! [`MeshReport`] is the computed summary of one STL file. It serializes to
//! JSON via serde and renders either as the five-line text summary or as a
//! markdown document.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::mesh::Mesh;

/// STL storage variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StlFormat {
    /// Text `solid`/`facet` format
    Ascii,
    /// 80-byte header plus fixed-size triangle records
    Binary,
}

impl std::fmt::Display for StlFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ascii => write!(f, "ASCII"),
            Self::Binary => write!(f, "Binary"),
        }
    }
}

/// Computed summary of an STL mesh
///
/// All lengths are in the file's units; 3D-printing STL files are
/// conventionally millimeters, which is what the text summary labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshReport {
    /// Mesh name (solid header or file stem)
    pub name: Option<String>,
    /// Storage variant of the source file
    pub format: StlFormat,
    /// Number of triangles
    pub triangles: usize,
    /// Number of unique vertices
    pub vertices: usize,
    /// Signed enclosed volume
    pub volume: f64,
    /// Total surface area
    pub surface_area: f64,
    /// Bounding-box extents `[x, y, z]`
    pub dimensions: [f64; 3],
    /// Bounding-box minimum corner
    pub bbox_min: [f64; 3],
    /// Bounding-box maximum corner
    pub bbox_max: [f64; 3],
}

impl MeshReport {
    /// Compute the report for a mesh
    #[must_use = "from_mesh returns the computed report"]
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let (min, max) = mesh.aabb();
        Self {
            name: mesh.name.clone(),
            format: if mesh.is_binary {
                StlFormat::Binary
            } else {
                StlFormat::Ascii
            },
            triangles: mesh.triangle_count(),
            vertices: mesh.vertex_count(),
            volume: mesh.volume(),
            surface_area: mesh.surface_area(),
            dimensions: mesh.dimensions(),
            bbox_min: [min.x, min.y, min.z],
            bbox_max: [max.x, max.y, max.z],
        }
    }
}

/// Render the five-line text summary
///
/// Numeric values are rounded to two decimals:
///
/// ```text
/// STL Volume: 1000.00 mm^3
/// STL Surface area: 600.00 mm^2
/// STL Vertices: 8
/// STL Triangles: 12
/// STL Dimensions: 10.00 x 10.00 x 10.00 mm
/// ```
#[must_use = "serialization returns the summary string"]
pub fn summary_lines(report: &MeshReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "STL Volume: {:.2} mm^3", report.volume);
    let _ = writeln!(out, "STL Surface area: {:.2} mm^2", report.surface_area);
    let _ = writeln!(out, "STL Vertices: {}", report.vertices);
    let _ = writeln!(out, "STL Triangles: {}", report.triangles);
    let _ = writeln!(
        out,
        "STL Dimensions: {:.2} x {:.2} x {:.2} mm",
        report.dimensions[0], report.dimensions[1], report.dimensions[2]
    );
    out
}

/// Convert a mesh report to markdown
#[must_use = "serialization returns markdown string"]
pub fn to_markdown(report: &MeshReport) -> String {
    let mut md = String::new();

    if let Some(ref name) = report.name {
        let _ = writeln!(md, "# STL Model: {name}\n");
    } else {
        md.push_str("# STL Model\n\n");
    }

    md.push_str("## File Information\n\n");
    let _ = writeln!(md, "- **Format**: STL ({})", report.format);

    md.push_str("\n## Mesh Statistics\n\n");
    let _ = writeln!(md, "- **Triangles**: {}", report.triangles);
    let _ = writeln!(md, "- **Vertices**: {}", report.vertices);
    let _ = writeln!(md, "- **Volume**: {:.3} mm^3", report.volume);
    let _ = writeln!(md, "- **Surface Area**: {:.3} mm^2", report.surface_area);

    md.push_str("\n## Bounding Box\n\n");
    let _ = writeln!(
        md,
        "- **Minimum**: ({:.3}, {:.3}, {:.3})",
        report.bbox_min[0], report.bbox_min[1], report.bbox_min[2]
    );
    let _ = writeln!(
        md,
        "- **Maximum**: ({:.3}, {:.3}, {:.3})",
        report.bbox_max[0], report.bbox_max[1], report.bbox_max[2]
    );

    md.push_str("\n## Dimensions\n\n");
    let _ = writeln!(md, "- **Width** (X): {:.3} mm", report.dimensions[0]);
    let _ = writeln!(md, "- **Depth** (Y): {:.3} mm", report.dimensions[1]);
    let _ = writeln!(md, "- **Height** (Z): {:.3} mm", report.dimensions[2]);

    md.push_str("\n## Model Description\n\n");
    let _ = write!(
        md,
        "This model encloses {:.3} mm^3 across {} triangular faces on {} unique vertices. ",
        report.volume, report.triangles, report.vertices
    );

    match report.format {
        StlFormat::Binary => {
            md.push_str("The source file is binary STL, the compact machine format.");
        }
        StlFormat::Ascii => {
            md.push_str("The source file is ASCII STL, the human-readable text format.");
        }
    }

    md.push('\n');
    md
}
