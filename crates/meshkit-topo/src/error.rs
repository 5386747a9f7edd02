//! Error types for topology construction.

use thiserror::Error;

/// Errors that can occur while building or editing a [`TriMesh`](crate::TriMesh).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopoError {
    /// A vertex index does not name an existing vertex.
    #[error("vertex index {index} out of range (mesh has {vertex_count} vertices)")]
    VertexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of vertices in the mesh at the time of the call.
        vertex_count: usize,
    },

    /// A triangle index does not name an existing triangle.
    #[error("triangle index {index} out of range (mesh has {triangle_count} triangles)")]
    TriangleOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of triangles in the mesh at the time of the call.
        triangle_count: usize,
    },
}

/// Result type for topology operations.
pub type Result<T> = std::result::Result<T, TopoError>;
