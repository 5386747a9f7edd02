#![warn(missing_docs)]

//! Geometric analysis of meshkit meshes.
//!
//! Two families of operations:
//!
//! - **Measures** ([`measure`]): triangle areas, per-vertex ring areas,
//!   edge-length statistics and triangle normals. Linear in mesh size.
//! - **Extremal scans** ([`extremal`]): the largest distance, triangle area
//!   and tetrahedron volume over *all* vertex pairs, triples and quadruples.
//!   These are exhaustive and polynomial in the vertex count, so they report
//!   progress and honor cancellation through a [`ScanObserver`].
//!
//! [`analyze`] bundles both into a serializable [`MeshReport`].
//!
//! Every entry point requires a built mesh (at least one triangle) and
//! returns [`AnalysisError::EmptyMesh`] otherwise.

mod error;
pub mod extremal;
pub mod measure;
mod settings;

pub use error::{AnalysisError, Result};
pub use extremal::{
    compute_aux_info, max_tetrahedron_volume, max_triangle_area, max_vertex_distance, AuxInfo,
    CancelFlag, LogProgress, NoopObserver, ScanKind, ScanObserver,
};
pub use measure::{
    assign_triangle_normals, average_edge_length, edge_length_stats, total_surface_area,
    triangle_area, triangle_areas, vertex_ring_areas, EdgeLengthStats,
};
pub use settings::AnalysisSettings;

use meshkit_topo::{MeshStats, TriMesh};
use serde::Serialize;
use tracing::info;

/// Everything [`analyze`] computes for one mesh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshReport {
    /// Entity counts.
    pub stats: MeshStats,
    /// `V - E + F`.
    pub euler_characteristic: i64,
    /// Sum of triangle areas.
    pub total_surface_area: f64,
    /// Edge length summary.
    pub edge_lengths: EdgeLengthStats,
    /// Extremal quantities, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aux: Option<AuxInfo>,
}

/// Analyze `mesh` according to `settings`.
///
/// # Errors
///
/// - [`AnalysisError::InvalidSettings`] if `settings` fail validation
/// - [`AnalysisError::EmptyMesh`] if the mesh has no triangles
/// - [`AnalysisError::TooManyVertices`] if extremal scans are requested on a
///   mesh above `settings.max_vertices`
/// - [`AnalysisError::Cancelled`] if `observer` aborts a scan
pub fn analyze(
    mesh: &TriMesh,
    settings: &AnalysisSettings,
    observer: &mut dyn ScanObserver,
) -> Result<MeshReport> {
    settings.validate()?;
    measure::require_built(mesh)?;

    let aux = if settings.extremal {
        if let Some(limit) = settings.max_vertices {
            if mesh.num_vertices() > limit {
                return Err(AnalysisError::TooManyVertices {
                    vertices: mesh.num_vertices(),
                    limit,
                });
            }
        }
        Some(compute_aux_info(mesh, observer)?)
    } else {
        None
    };

    let report = MeshReport {
        stats: mesh.stats(),
        euler_characteristic: mesh.euler_characteristic(),
        total_surface_area: total_surface_area(mesh)?,
        edge_lengths: edge_length_stats(mesh)?,
        aux,
    };
    info!(
        area = report.total_surface_area,
        extremal = report.aux.is_some(),
        "analysis complete"
    );
    Ok(report)
}
