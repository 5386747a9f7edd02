//! Error types for mesh loading and export.

use std::path::PathBuf;

use meshkit_topo::TopoError;
use thiserror::Error;

/// Result type for mesh I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur while loading or saving a mesh.
#[derive(Debug, Error)]
pub enum IoError {
    /// The path could not be opened for reading or writing.
    #[error("cannot access {}: {source}", path.display())]
    FileAccess {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// The extension does not name a format supported for this operation.
    #[error("unsupported file format: .{extension}")]
    UnsupportedFormat {
        /// The unrecognized extension (`(none)` if the path has none).
        extension: String,
    },

    /// A line did not match the record layout expected at that point.
    #[error("malformed input at line {line}: {message}")]
    Malformed {
        /// Line number (1-indexed).
        line: usize,
        /// Description of what was wrong.
        message: String,
    },

    /// A face referenced a vertex that does not exist.
    #[error("invalid face: {0}")]
    Topology(#[from] TopoError),

    /// A vertex is used by no triangle.
    #[error("vertex {index} is not referenced by any face")]
    IsolatedVertex {
        /// Index of the first such vertex.
        index: usize,
    },

    /// The input held no faces.
    #[error("mesh has no triangles")]
    NoTriangles,

    /// Export was asked for a mesh with no triangles.
    #[error("cannot export an empty mesh")]
    EmptyMesh,

    /// A per-vertex scalar field does not match the vertex count.
    #[error("scalar field has {got} values but the mesh has {expected} vertices")]
    ScalarCountMismatch {
        /// Number of vertices in the mesh.
        expected: usize,
        /// Number of scalar values supplied.
        got: usize,
    },

    /// I/O error while reading or writing an already open stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of an [`IoError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The file could not be opened or a stream failed.
    FileAccess,
    /// The format is not handled by the requested operation.
    InvalidOperation,
    /// The caller broke a precondition.
    InvalidArgument,
    /// The parsed mesh is structurally unusable.
    StructuralValidity,
    /// The input text does not follow the format.
    Malformed,
}

impl IoError {
    /// Create a `Malformed` error at `line`.
    #[must_use]
    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            message: message.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FileAccess { .. } | Self::Io(_) => ErrorKind::FileAccess,
            Self::UnsupportedFormat { .. } => ErrorKind::InvalidOperation,
            Self::Topology(_) | Self::EmptyMesh | Self::ScalarCountMismatch { .. } => {
                ErrorKind::InvalidArgument
            }
            Self::NoTriangles | Self::IsolatedVertex { .. } => ErrorKind::StructuralValidity,
            Self::Malformed { .. } => ErrorKind::Malformed,
        }
    }
}
