#![warn(missing_docs)]

//! Mesh file I/O for the meshkit toolkit.
//!
//! Loading fills a [`TriMesh`] from:
//!
//! - **OBJ** (Wavefront) - `v` / `f` records, 1-based indices
//! - **OFF** (Object File Format) - counts header, 0-based indices
//!
//! Saving writes ASCII **PLY** with an optional per-vertex scalar field
//! rendered through a [`ColorMap`].
//!
//! ```no_run
//! use meshkit_io::{load_mesh, save_mesh, ExportSettings};
//! use meshkit_topo::TriMesh;
//!
//! let mut mesh = TriMesh::new();
//! load_mesh("bunny.off", &mut mesh).unwrap();
//! save_mesh(&mesh, "bunny.ply", &[], &ExportSettings::default()).unwrap();
//! ```
//!
//! Every successful load leaves at least one triangle and guarantees that
//! each vertex belongs to at least one triangle.

mod error;
mod obj;
mod off;
mod palette;
mod ply;
mod reader;

pub use error::{ErrorKind, IoError, IoResult};
pub use obj::{load_obj, read_obj};
pub use off::{load_off, read_off};
pub use palette::{ColorMap, ColorPalette};
pub use ply::{save_ply, write_ply, ColorScale, ExportSettings};

use std::fs::File;
use std::path::Path;

use meshkit_topo::{TriMesh, VertexId};
use tracing::info;

/// Mesh file formats known to the toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshFormat {
    /// Wavefront OBJ. Load only.
    Obj,
    /// Object File Format. Load only.
    Off,
    /// Polygon File Format, ASCII. Save only.
    Ply,
}

impl MeshFormat {
    /// Detect format from file extension (case-insensitive).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "obj" => Some(Self::Obj),
            "off" => Some(Self::Off),
            "ply" => Some(Self::Ply),
            _ => None,
        }
    }

    /// Canonical file extension for this format.
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Obj => "obj",
            Self::Off => "off",
            Self::Ply => "ply",
        }
    }
}

fn unsupported(path: &Path) -> IoError {
    IoError::UnsupportedFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    }
}

/// Load a mesh into `mesh`, detecting format from the extension.
///
/// # Errors
///
/// [`IoError::UnsupportedFormat`] for anything but `.obj` / `.off`;
/// otherwise see [`load_obj`] and [`load_off`].
pub fn load_mesh<P: AsRef<Path>>(path: P, mesh: &mut TriMesh) -> IoResult<()> {
    let path = path.as_ref();
    match MeshFormat::from_path(path) {
        Some(MeshFormat::Obj) => load_obj(path, mesh),
        Some(MeshFormat::Off) => load_off(path, mesh),
        Some(MeshFormat::Ply) | None => Err(unsupported(path)),
    }
}

/// Save `mesh` with an optional per-vertex scalar field, detecting format
/// from the extension.
///
/// # Errors
///
/// [`IoError::UnsupportedFormat`] for anything but `.ply`; otherwise see
/// [`save_ply`].
pub fn save_mesh<P: AsRef<Path>>(
    mesh: &TriMesh,
    path: P,
    scalars: &[f64],
    settings: &ExportSettings,
) -> IoResult<()> {
    let path = path.as_ref();
    match MeshFormat::from_path(path) {
        Some(MeshFormat::Ply) => save_ply(mesh, path, scalars, settings),
        _ => Err(unsupported(path)),
    }
}

fn open(path: &Path) -> IoResult<File> {
    File::open(path).map_err(|source| IoError::FileAccess {
        path: path.to_path_buf(),
        source,
    })
}

/// Add a loaded face and mark its corners as referenced.
fn add_face(mesh: &mut TriMesh, [a, b, c]: [VertexId; 3]) -> IoResult<()> {
    mesh.add_triangle(a, b, c)?;
    for v in [a, b, c] {
        mesh.mark_referenced(v)?;
    }
    Ok(())
}

/// Post-parse check shared by all readers.
fn finish_load(mesh: &TriMesh, format: &str) -> IoResult<()> {
    if !mesh.is_built() {
        return Err(IoError::NoTriangles);
    }
    if let Some(v) = mesh.first_unreferenced_vertex() {
        return Err(IoError::IsolatedVertex { index: v.index() });
    }
    let stats = mesh.stats();
    info!(
        format,
        triangles = stats.triangles,
        vertices = stats.vertices,
        edges = stats.edges,
        "mesh loaded"
    );
    Ok(())
}
