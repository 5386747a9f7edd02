//! Wavefront OBJ reader.
//!
//! Only geometry records matter here: `v x y z [w]` appends a vertex and
//! `f a b c` a triangle over 1-based vertex indices. References of the
//! form `a/ta/na` use the leading vertex index. Other standard statements
//! (normals, texture coordinates, grouping, materials) are skipped.

use std::io::{BufRead, BufReader};
use std::path::Path;

use meshkit_topo::{TriMesh, VertexId};
use tracing::debug;

use crate::error::{IoError, IoResult};
use crate::reader::{LineReader, Record};
use crate::{add_face, finish_load, open};

const SKIPPED_STATEMENTS: &[&str] = &["vn", "vt", "vp", "o", "g", "s", "usemtl", "mtllib", "l"];

/// Load an OBJ file into `mesh`, replacing its contents.
///
/// # Errors
///
/// - [`IoError::FileAccess`] if the file cannot be opened
/// - [`IoError::Malformed`] on a line that is not a valid record
/// - [`IoError::Topology`] if a face names a vertex that does not exist
/// - [`IoError::IsolatedVertex`] if some vertex is used by no face
pub fn load_obj<P: AsRef<Path>>(path: P, mesh: &mut TriMesh) -> IoResult<()> {
    let file = open(path.as_ref())?;
    read_obj(BufReader::new(file), mesh)
}

/// Read OBJ text from any buffered reader into `mesh`.
///
/// `mesh` is cleared first. On error it may hold a partial mesh.
pub fn read_obj<R: BufRead>(reader: R, mesh: &mut TriMesh) -> IoResult<()> {
    mesh.clear();
    let mut lines = LineReader::new(reader);

    while let Some(rec) = lines.next_record()? {
        match rec.tag() {
            "v" => {
                if !(4..=5).contains(&rec.len()) {
                    return Err(IoError::malformed(
                        rec.line,
                        format!("vertex: expected 3 or 4 coordinates, found {}", rec.len() - 1),
                    ));
                }
                mesh.add_vertex(rec.point(1)?);
            }
            "f" => {
                rec.expect_len(4, "face")?;
                let corners = [
                    vertex_ref(&rec, 1)?,
                    vertex_ref(&rec, 2)?,
                    vertex_ref(&rec, 3)?,
                ];
                add_face(mesh, corners)?;
            }
            tag if SKIPPED_STATEMENTS.contains(&tag) => {
                debug!(line = rec.line, tag, "skipping OBJ statement");
            }
            tag => {
                return Err(IoError::malformed(
                    rec.line,
                    format!("unknown record `{tag}`"),
                ));
            }
        }
    }

    finish_load(mesh, "OBJ")
}

/// Parse a 1-based face reference into a 0-based vertex id.
fn vertex_ref(rec: &Record, i: usize) -> IoResult<VertexId> {
    let field = &rec.fields[i];
    let head = field.split('/').next().unwrap_or(field);
    let index: i64 = head
        .parse()
        .map_err(|_| IoError::malformed(rec.line, format!("invalid vertex reference `{field}`")))?;
    if index < 1 {
        return Err(IoError::malformed(
            rec.line,
            format!("vertex reference `{field}` must be a positive 1-based index"),
        ));
    }
    Ok(VertexId::new((index - 1) as usize))
}
