//! ASCII PLY writer with optional per-vertex colors.
//!
//! Each vertex line holds the position and, when a scalar field is
//! supplied, the RGB triple the field maps to. Each face line is `3`
//! followed by the triangle's vertex indices in insertion order.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use meshkit_topo::TriMesh;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{IoError, IoResult};
use crate::palette::{ColorMap, ColorPalette};

/// How scalar values are scaled onto the color ramp.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScale {
    /// Multiply by `1 / vertex_count`.
    #[default]
    ReciprocalVertexCount,
    /// Stretch the field's own `[min, max]` over the ramp.
    Range,
    /// Multiply by a fixed factor.
    Fixed(f64),
}

impl ColorScale {
    /// Build the palette for `scalars` on a mesh of `vertex_count` vertices.
    pub fn palette(&self, vertex_count: usize, scalars: &[f64]) -> ColorPalette {
        match *self {
            Self::ReciprocalVertexCount => ColorPalette::new(1.0 / vertex_count.max(1) as f64),
            Self::Range => {
                let (min, max) = scalars
                    .iter()
                    .copied()
                    .filter(|v| v.is_finite())
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                        (lo.min(v), hi.max(v))
                    });
                ColorPalette::with_range(min, max)
            }
            Self::Fixed(scale) => ColorPalette::new(scale),
        }
    }
}

/// Export parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Scalar-to-color scaling.
    pub color_scale: ColorScale,
}

/// Save `mesh` as ASCII PLY, coloring vertices by `scalars` if non-empty.
///
/// # Errors
///
/// - [`IoError::EmptyMesh`] if the mesh has no triangles
/// - [`IoError::ScalarCountMismatch`] if `scalars` is neither empty nor
///   one value per vertex
///
/// Both are checked before the file is created.
/// - [`IoError::FileAccess`] if the file cannot be created
pub fn save_ply<P: AsRef<Path>>(
    mesh: &TriMesh,
    path: P,
    scalars: &[f64],
    settings: &ExportSettings,
) -> IoResult<()> {
    let path = path.as_ref();
    check_exportable(mesh, scalars)?;

    let file = File::create(path).map_err(|source| IoError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    let palette = settings
        .color_scale
        .palette(mesh.num_vertices(), scalars);
    write_ply(&mut writer, mesh, scalars, &palette)?;
    writer.flush()?;

    info!(
        path = %path.display(),
        vertices = mesh.num_vertices(),
        faces = mesh.num_triangles(),
        colored = !scalars.is_empty(),
        "wrote PLY"
    );
    Ok(())
}

/// Write `mesh` as ASCII PLY to any writer.
///
/// The color properties are declared in the header only when `scalars`
/// is non-empty, so header and body always agree.
pub fn write_ply<W: Write>(
    writer: &mut W,
    mesh: &TriMesh,
    scalars: &[f64],
    colors: &dyn ColorMap,
) -> IoResult<()> {
    check_exportable(mesh, scalars)?;
    let colored = !scalars.is_empty();

    writeln!(writer, "ply")?;
    writeln!(writer, "format ascii 1.0")?;
    writeln!(writer, "element vertex {}", mesh.num_vertices())?;
    writeln!(writer, "property float32 x")?;
    writeln!(writer, "property float32 y")?;
    writeln!(writer, "property float32 z")?;
    if colored {
        writeln!(writer, "property uchar diffuse_red")?;
        writeln!(writer, "property uchar diffuse_green")?;
        writeln!(writer, "property uchar diffuse_blue")?;
    }
    writeln!(writer, "element face {}", mesh.num_triangles())?;
    writeln!(writer, "property list uint8 int32 vertex_indices")?;
    writeln!(writer, "end_header")?;

    for v in mesh.vertices() {
        let p = &v.position;
        write!(writer, "{:.6} {:.6} {:.6}", p.x, p.y, p.z)?;
        if colored {
            let [r, g, b] = colors.color(scalars[v.id.index()]);
            write!(writer, " {r} {g} {b}")?;
        }
        writeln!(writer)?;
    }

    for t in mesh.triangles() {
        let [a, b, c] = t.vertices;
        writeln!(writer, "3 {a} {b} {c}")?;
    }

    Ok(())
}

fn check_exportable(mesh: &TriMesh, scalars: &[f64]) -> IoResult<()> {
    if !mesh.is_built() {
        return Err(IoError::EmptyMesh);
    }
    if scalars.is_empty() || scalars.len() == mesh.num_vertices() {
        Ok(())
    } else {
        Err(IoError::ScalarCountMismatch {
            expected: mesh.num_vertices(),
            got: scalars.len(),
        })
    }
}
