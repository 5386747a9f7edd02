#![warn(missing_docs)]

//! Procedural mesh construction for the meshkit toolkit.
//!
//! Builds fixed topologies through the ordinary [`TriMesh::add_vertex`] /
//! [`TriMesh::add_triangle`] calls, so the results exercise exactly the
//! same incidence bookkeeping as a loaded file. The cube is the canonical
//! closed-surface fixture: 8 vertices, 18 edges, 12 triangles.

use meshkit_math::{Point3, Vec3};
use meshkit_topo::{Result, TriMesh, VertexId};
use tracing::debug;

/// Corner offsets in units of the side length.
///
/// ```text
///     v4----v5
///    /|    /|
///   v7----v6|    z
///   | v3--|-v2   | y
///   |/    |/     |/
///   v0----v1     +---x
/// ```
const CUBE_CORNERS: [[f64; 3]; 8] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    [1.0, 0.0, 1.0],
    [0.0, 0.0, 1.0],
];

/// Two triangles per face, each quad split along one diagonal.
const CUBE_TRIANGLES: [[usize; 3]; 12] = [
    [0, 1, 2],
    [0, 2, 3],
    [1, 6, 2],
    [6, 5, 2],
    [7, 5, 6],
    [7, 4, 5],
    [0, 3, 7],
    [3, 4, 7],
    [0, 6, 1],
    [0, 7, 6],
    [3, 2, 5],
    [3, 5, 4],
];

/// Append an axis-aligned cube with one corner at `origin` to `mesh`.
///
/// Existing contents of `mesh` are kept; the new vertices are appended
/// after them. Returns the ids of the eight corners: `v0..v3` walk the
/// bottom face counter-clockwise from `origin`, `v4..v7` the top face
/// starting above `v3`.
pub fn build_cube(mesh: &mut TriMesh, origin: Point3, side: f64) -> Result<[VertexId; 8]> {
    let corners = CUBE_CORNERS.map(|[x, y, z]| mesh.add_vertex(origin + Vec3::new(x, y, z) * side));

    for [a, b, c] in CUBE_TRIANGLES {
        mesh.add_triangle(corners[a], corners[b], corners[c])?;
        for i in [a, b, c] {
            mesh.mark_referenced(corners[i])?;
        }
    }

    debug!(side, edges = mesh.num_edges(), "built cube");
    Ok(corners)
}

/// A new mesh holding a cube of the given side with its corner at the origin.
pub fn make_cube(side: f64) -> Result<TriMesh> {
    let mut mesh = TriMesh::new();
    build_cube(&mut mesh, Point3::origin(), side)?;
    Ok(mesh)
}
