//! OFF (Object File Format) reader.
//!
//! Layout:
//!
//! ```text
//! OFF
//! <vertex count> <face count> <edge count>
//! x y z            (vertex count lines)
//! n i0 i1 i2       (until end of input, 0-based indices)
//! ```
//!
//! Only the vertex count is used to drive parsing; faces are read until
//! the input ends.

use std::io::{BufRead, BufReader};
use std::path::Path;

use meshkit_topo::{TriMesh, VertexId};
use tracing::{debug, warn};

use crate::error::{IoError, IoResult};
use crate::reader::{LineReader, Record};
use crate::{add_face, finish_load, open};

/// Load an OFF file into `mesh`, replacing its contents.
///
/// # Errors
///
/// - [`IoError::FileAccess`] if the file cannot be opened
/// - [`IoError::Malformed`] on a missing header, bad counts line, too few
///   vertex lines, or a face line that is not four integers
/// - [`IoError::Topology`] if a face names a vertex that does not exist
/// - [`IoError::IsolatedVertex`] if some vertex is used by no face
pub fn load_off<P: AsRef<Path>>(path: P, mesh: &mut TriMesh) -> IoResult<()> {
    let file = open(path.as_ref())?;
    read_off(BufReader::new(file), mesh)
}

/// Read OFF text from any buffered reader into `mesh`.
///
/// `mesh` is cleared first. On error it may hold a partial mesh.
pub fn read_off<R: BufRead>(reader: R, mesh: &mut TriMesh) -> IoResult<()> {
    mesh.clear();
    let mut lines = LineReader::new(reader);

    let header = required(&mut lines, "OFF header")?;
    if header.len() != 1 || header.tag() != "OFF" {
        return Err(IoError::malformed(
            header.line,
            format!("expected `OFF` header, found `{}`", header.fields.join(" ")),
        ));
    }

    let counts = required(&mut lines, "counts line")?;
    counts.expect_len(3, "counts line")?;
    let vertex_count: usize = counts.parse(0, "vertex count")?;
    let declared_faces: usize = counts.parse(1, "face count")?;
    let _declared_edges: usize = counts.parse(2, "edge count")?;
    debug!(vertex_count, declared_faces, "reading OFF body");

    for i in 0..vertex_count {
        let rec = lines.next_record()?.ok_or_else(|| {
            IoError::malformed(
                lines.line(),
                format!("expected {vertex_count} vertices, input ended after {i}"),
            )
        })?;
        rec.expect_len(3, "vertex")?;
        mesh.add_vertex(rec.point(0)?);
    }

    while let Some(rec) = lines.next_record()? {
        rec.expect_len(4, "face")?;
        let arity: usize = rec.parse(0, "face vertex count")?;
        if arity != 3 {
            warn!(line = rec.line, arity, "OFF face declares {arity} vertices, reading 3");
        }
        let corners = [index(&rec, 1)?, index(&rec, 2)?, index(&rec, 3)?];
        add_face(mesh, corners)?;
    }

    if mesh.num_triangles() != declared_faces {
        warn!(
            declared = declared_faces,
            read = mesh.num_triangles(),
            "OFF face count differs from header"
        );
    }

    finish_load(mesh, "OFF")
}

fn required<R: BufRead>(lines: &mut LineReader<R>, what: &str) -> IoResult<Record> {
    lines
        .next_record()?
        .ok_or_else(|| IoError::malformed(lines.line() + 1, format!("missing {what}")))
}

fn index(rec: &Record, i: usize) -> IoResult<VertexId> {
    rec.parse::<usize>(i, "vertex index").map(VertexId::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    const TETRA: &str = "\
OFF
4 4 6
0 0 0
1 0 0
0 1 0
0 0 1
3 0 2 1
3 0 1 3
3 0 3 2
3 1 2 3
";

    #[test]
    fn test_read_tetrahedron() {
        let mut mesh = TriMesh::new();
        read_off(TETRA.as_bytes(), &mut mesh).unwrap();
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_triangles(), 4);
        assert_eq!(mesh.num_edges(), 6);
        assert_eq!(mesh.euler_characteristic(), 2);
        // Indices are used as-is.
        assert_eq!(mesh.triangles()[0].vertices.map(VertexId::index), [0, 2, 1]);
        assert!(mesh.vertices().iter().all(|v| !v.isolated));
    }

    #[test]
    fn test_counts_drive_vertex_section() {
        // Declares N vertices and M faces; both come back exactly.
        let mut text = String::from("OFF\n6 4 0\n");
        for i in 0..6 {
            text.push_str(&format!("{i} {} 0\n", i * i));
        }
        text.push_str("3 0 1 2\n3 2 3 4\n3 3 4 5\n3 0 4 5\n");
        let mut mesh = TriMesh::new();
        read_off(text.as_bytes(), &mut mesh).unwrap();
        assert_eq!(mesh.num_vertices(), 6);
        assert_eq!(mesh.num_triangles(), 4);
    }

    #[test]
    fn test_face_arity_is_not_validated() {
        let input = "OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n4 0 1 2\n";
        let mut mesh = TriMesh::new();
        read_off(input.as_bytes(), &mut mesh).unwrap();
        assert_eq!(mesh.num_triangles(), 1);
    }

    #[test]
    fn test_missing_header() {
        let mut mesh = TriMesh::new();
        let err = read_off("3 1 0\n".as_bytes(), &mut mesh).unwrap_err();
        assert!(matches!(err, IoError::Malformed { line: 1, .. }));

        let err = read_off("".as_bytes(), &mut mesh).unwrap_err();
        assert!(matches!(err, IoError::Malformed { line: 1, .. }));
    }

    #[test]
    fn test_truncated_vertex_section() {
        let input = "OFF\n4 1 0\n0 0 0\n1 0 0\n";
        let mut mesh = TriMesh::new();
        let err = read_off(input.as_bytes(), &mut mesh).unwrap_err();
        match err {
            IoError::Malformed { message, .. } => assert!(message.contains("after 2"), "{message}"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_face_line() {
        let input = "OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1\n";
        let mut mesh = TriMesh::new();
        let err = read_off(input.as_bytes(), &mut mesh).unwrap_err();
        assert!(matches!(err, IoError::Malformed { line: 6, .. }));
    }

    #[test]
    fn test_negative_index_is_malformed() {
        let input = "OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 -1 2\n";
        let mut mesh = TriMesh::new();
        let err = read_off(input.as_bytes(), &mut mesh).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }

    #[test]
    fn test_out_of_range_index() {
        let input = "OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 3\n";
        let mut mesh = TriMesh::new();
        let err = read_off(input.as_bytes(), &mut mesh).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_isolated_vertex() {
        let input = "OFF\n4 1 0\n0 0 0\n1 0 0\n2 2 2\n0 1 0\n3 0 1 3\n";
        let mut mesh = TriMesh::new();
        let err = read_off(input.as_bytes(), &mut mesh).unwrap_err();
        assert!(matches!(err, IoError::IsolatedVertex { index: 2 }));
    }

    #[test]
    fn test_empty_body() {
        let mut mesh = TriMesh::new();
        let err = read_off("OFF\n0 0 0\n".as_bytes(), &mut mesh).unwrap_err();
        assert!(matches!(err, IoError::NoTriangles));
        assert_eq!(err.kind(), ErrorKind::StructuralValidity);
    }

    #[test]
    fn test_non_utf8_face_line() {
        let input: &[u8] = b"OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 \xff\xfe\n";
        let mut mesh = TriMesh::new();
        let err = read_off(input, &mut mesh).unwrap_err();
        assert!(matches!(err, IoError::Malformed { line: 6, .. }));
    }
}
