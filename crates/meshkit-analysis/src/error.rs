//! Error types for mesh analysis.

use meshkit_topo::TopoError;
use thiserror::Error;

use crate::extremal::ScanKind;

/// Errors that can occur during analysis.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Mesh has no triangles.
    #[error("mesh is empty")]
    EmptyMesh,

    /// The observer asked an extremal scan to stop.
    #[error("{scan} scan cancelled")]
    Cancelled {
        /// The scan that was running.
        scan: ScanKind,
    },

    /// The mesh is larger than the configured limit for exhaustive scans.
    #[error("exhaustive scans are limited to {limit} vertices, mesh has {vertices}")]
    TooManyVertices {
        /// Vertices in the mesh.
        vertices: usize,
        /// Configured limit.
        limit: usize,
    },

    /// Invalid analysis settings.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// An entity id did not resolve.
    #[error(transparent)]
    Topology(#[from] TopoError),
}

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
