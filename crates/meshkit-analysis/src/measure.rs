//! Per-triangle and per-vertex measures over a built mesh.

use meshkit_math::{triangle_cross, Vec3};
use meshkit_topo::{TopoError, TriMesh, TriangleId};
use serde::Serialize;
use tracing::debug;

use crate::error::{AnalysisError, Result};

/// Cross products shorter than this are treated as degenerate.
const DEGENERATE_EPS: f64 = 1e-9;

/// Fail with [`AnalysisError::EmptyMesh`] unless the mesh has triangles.
pub fn require_built(mesh: &TriMesh) -> Result<()> {
    if mesh.is_built() {
        Ok(())
    } else {
        Err(AnalysisError::EmptyMesh)
    }
}

fn area_unchecked(mesh: &TriMesh, t: TriangleId) -> f64 {
    let [a, b, c] = mesh.triangle_positions(t);
    meshkit_math::triangle_area(a, b, c)
}

/// Area of one triangle from its current vertex positions.
pub fn triangle_area(mesh: &TriMesh, t: TriangleId) -> Result<f64> {
    if mesh.triangle(t).is_none() {
        return Err(TopoError::TriangleOutOfRange {
            index: t.index(),
            triangle_count: mesh.num_triangles(),
        }
        .into());
    }
    Ok(area_unchecked(mesh, t))
}

/// Area of every triangle, indexed by triangle id.
pub fn triangle_areas(mesh: &TriMesh) -> Result<Vec<f64>> {
    require_built(mesh)?;
    Ok(mesh
        .triangles()
        .iter()
        .map(|t| area_unchecked(mesh, t.id))
        .collect())
}

/// Sum of all triangle areas.
pub fn total_surface_area(mesh: &TriMesh) -> Result<f64> {
    Ok(triangle_areas(mesh)?.iter().sum())
}

/// For each vertex, the summed area of the triangles around it.
pub fn vertex_ring_areas(mesh: &TriMesh) -> Result<Vec<f64>> {
    let areas = triangle_areas(mesh)?;
    Ok(mesh
        .vertices()
        .iter()
        .map(|v| v.triangles.iter().map(|t| areas[t.index()]).sum())
        .collect())
}

/// Mean length of the distinct edges.
///
/// Uses the lengths recorded when each edge was created.
pub fn average_edge_length(mesh: &TriMesh) -> Result<f64> {
    Ok(edge_length_stats(mesh)?.mean)
}

/// Summary of edge lengths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeLengthStats {
    /// Shortest edge.
    pub min: f64,
    /// Longest edge.
    pub max: f64,
    /// Arithmetic mean over distinct edges.
    pub mean: f64,
}

/// Min, max and mean over the distinct edges.
pub fn edge_length_stats(mesh: &TriMesh) -> Result<EdgeLengthStats> {
    require_built(mesh)?;
    let edges = mesh.edges();
    let (min, max, sum) = edges.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, 0.0),
        |(min, max, sum), e| (min.min(e.length), max.max(e.length), sum + e.length),
    );
    Ok(EdgeLengthStats {
        min,
        max,
        mean: sum / edges.len() as f64,
    })
}

/// Compute and store a unit normal on every triangle.
///
/// The normal is `(b - a) × (c - a)` normalized. Degenerate triangles get
/// the zero vector. Normals are not refreshed automatically; call this
/// again after moving vertices.
pub fn assign_triangle_normals(mesh: &mut TriMesh) -> Result<()> {
    require_built(mesh)?;
    let mut degenerate = 0usize;

    for i in 0..mesh.num_triangles() {
        let t = TriangleId::new(i);
        let [a, b, c] = mesh.triangle_positions(t);
        let n = triangle_cross(a, b, c);
        let len = n.norm();
        let normal = if len < DEGENERATE_EPS {
            degenerate += 1;
            Vec3::zeros()
        } else {
            n / len
        };
        mesh.set_triangle_normal(t, normal)?;
    }

    if degenerate > 0 {
        debug!(degenerate, "degenerate triangles given zero normals");
    }
    Ok(())
}
