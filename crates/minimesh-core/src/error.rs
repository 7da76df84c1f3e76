//! Error types for mesh parsing and analysis

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for mesh operations
pub type Result<T> = std::result::Result<T, MeshError>;

/// Error type for mesh parsing and analysis operations
#[derive(Error, Debug)]
pub enum MeshError {
    /// Failed to read STL file from disk
    #[error("Failed to read STL file {path}: {source}")]
    ReadError {
        /// Path to the file that failed to read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Failed to write STL file to disk
    #[error("Failed to write STL file {path}: {source}")]
    WriteError {
        /// Path to the file that failed to write
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// File content is not valid STL
    #[error("Invalid STL data in {path}: {message}")]
    InvalidFormat {
        /// Path to the file with invalid content
        path: PathBuf,
        /// Description of the format error
        message: String,
    },

    /// General parsing error (non-file input)
    #[error("Failed to parse STL data: {0}")]
    ParseError(String),

    /// An operation that requires at least one triangle was given none
    #[error("Mesh contains no triangles")]
    EmptyMesh,

    /// Triangle has zero area, so no normal can be derived
    #[error("Triangle {0} is degenerate (zero area)")]
    DegenerateTriangle(usize),
}

impl MeshError {
    /// Create a read error
    #[inline]
    #[must_use = "returns MeshError for file read failures"]
    pub fn read_error<P: AsRef<Path>>(path: P, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a write error
    #[inline]
    #[must_use = "returns MeshError for file write failures"]
    pub fn write_error<P: AsRef<Path>>(path: P, source: std::io::Error) -> Self {
        Self::WriteError {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create an invalid format error
    #[inline]
    #[must_use = "returns MeshError for invalid STL content"]
    pub fn invalid_format<P: AsRef<Path>>(path: P, message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }
}
