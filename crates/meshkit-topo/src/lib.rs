#![warn(missing_docs)]

//! Triangle mesh topology for the meshkit toolkit.
//!
//! [`TriMesh`] owns every vertex, edge, and triangle in flat arenas and
//! cross-references them only by dense integer ids. Each vertex keeps
//! incidence lists (triangles, edges, neighboring vertices); edges are
//! deduplicated on construction so two triangles sharing a vertex pair
//! share one [`Edge`].
//!
//! ```
//! use meshkit_math::Point3;
//! use meshkit_topo::TriMesh;
//!
//! let mut mesh = TriMesh::new();
//! let a = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
//! let b = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
//! let c = mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
//! let d = mesh.add_vertex(Point3::new(1.0, 1.0, 0.0));
//! mesh.add_triangle(a, b, c).unwrap();
//! mesh.add_triangle(b, d, c).unwrap();
//! assert_eq!(mesh.num_edges(), 5);
//! ```

pub mod error;

pub use error::{Result, TopoError};

use std::fmt;
use std::ops::Index;

use meshkit_math::{distance, Point3, Vec3};
use serde::Serialize;
use tracing::trace;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(usize);

        impl $name {
            /// Wrap a raw zero-based index.
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            /// The raw zero-based index.
            pub const fn index(self) -> usize {
                self.0
            }
        }

        impl From<usize> for $name {
            fn from(index: usize) -> Self {
                Self(index)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Index of a vertex in a [`TriMesh`].
    VertexId
);
define_id!(
    /// Index of an edge in a [`TriMesh`].
    EdgeId
);
define_id!(
    /// Index of a triangle in a [`TriMesh`].
    TriangleId
);

/// A mesh vertex and its incidence lists.
#[derive(Debug, Clone)]
pub struct Vertex {
    /// This vertex's id.
    pub id: VertexId,
    /// Position in space.
    pub position: Point3,
    /// Triangles using this vertex, in insertion order.
    pub triangles: Vec<TriangleId>,
    /// Edges ending at this vertex.
    pub edges: Vec<EdgeId>,
    /// Vertices sharing an edge with this one.
    pub neighbors: Vec<VertexId>,
    /// True until a loader or generator marks the vertex as referenced
    /// by a face.
    pub isolated: bool,
}

/// An undirected edge between two vertices.
#[derive(Debug, Clone)]
pub struct Edge {
    /// This edge's id.
    pub id: EdgeId,
    /// Endpoints, in the order the edge was first resolved.
    pub vertices: [VertexId; 2],
    /// Endpoint distance at creation time. Not updated when either
    /// endpoint moves later.
    pub length: f64,
}

impl Edge {
    /// True if `v` is one of this edge's endpoints.
    pub fn has_vertex(&self, v: VertexId) -> bool {
        self.vertices[0] == v || self.vertices[1] == v
    }

    /// True if this edge joins `a` and `b`, in either order.
    pub fn connects(&self, a: VertexId, b: VertexId) -> bool {
        self.vertices == [a, b] || self.vertices == [b, a]
    }
}

/// A triangle referencing three vertices and its three sides.
#[derive(Debug, Clone)]
pub struct Triangle {
    /// This triangle's id.
    pub id: TriangleId,
    /// Corners in insertion order.
    pub vertices: [VertexId; 3],
    /// Sides `(v0, v1)`, `(v0, v2)`, `(v1, v2)`.
    pub edges: [EdgeId; 3],
    /// Unit normal, populated by an explicit analysis pass.
    pub normal: Option<Vec3>,
}

/// Entity counts of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MeshStats {
    /// Number of vertices.
    pub vertices: usize,
    /// Number of distinct edges.
    pub edges: usize,
    /// Number of triangles.
    pub triangles: usize,
}

/// Arena-backed triangle mesh with explicit incidence.
#[derive(Debug, Clone, Default)]
pub struct TriMesh {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    triangles: Vec<Triangle>,
}

impl TriMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every vertex, edge, and triangle.
    pub fn clear(&mut self) {
        trace!(
            vertices = self.vertices.len(),
            edges = self.edges.len(),
            triangles = self.triangles.len(),
            "clearing mesh"
        );
        self.vertices.clear();
        self.edges.clear();
        self.triangles.clear();
    }

    /// Append a vertex at `position` and return its id.
    ///
    /// No duplicate check is made; two vertices at the same position are
    /// distinct.
    pub fn add_vertex(&mut self, position: Point3) -> VertexId {
        let id = VertexId(self.vertices.len());
        self.vertices.push(Vertex {
            id,
            position,
            triangles: Vec::new(),
            edges: Vec::new(),
            neighbors: Vec::new(),
            isolated: true,
        });
        id
    }

    /// Append a triangle over three existing vertices.
    ///
    /// Registers the triangle with each corner and resolves (creates or
    /// reuses) the edge on each side. All three ids are range-checked
    /// before anything is modified.
    pub fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId) -> Result<TriangleId> {
        for v in [a, b, c] {
            self.check_vertex(v)?;
        }

        let id = TriangleId(self.triangles.len());
        for v in [a, b, c] {
            self.vertices[v.0].triangles.push(id);
        }

        let edges = [
            self.resolve_edge(a, b),
            self.resolve_edge(a, c),
            self.resolve_edge(b, c),
        ];
        self.triangles.push(Triangle {
            id,
            vertices: [a, b, c],
            edges,
            normal: None,
        });
        Ok(id)
    }

    /// Return the edge between `a` and `b`, creating it if needed.
    ///
    /// Scans `a`'s edge list for one ending at `b`. When none exists the
    /// two vertices become neighbors and a new edge is created with its
    /// length taken from the current positions.
    ///
    /// # Panics
    ///
    /// Panics if either id is out of range; [`TriMesh::add_triangle`]
    /// checks its arguments before calling this.
    pub fn resolve_edge(&mut self, a: VertexId, b: VertexId) -> EdgeId {
        let existing = self.vertices[a.0]
            .edges
            .iter()
            .copied()
            .find(|&e| self.edges[e.0].connects(a, b));
        if let Some(e) = existing {
            return e;
        }

        self.vertices[a.0].neighbors.push(b);
        self.vertices[b.0].neighbors.push(a);

        let id = EdgeId(self.edges.len());
        let length = distance(&self.vertices[a.0].position, &self.vertices[b.0].position);
        self.edges.push(Edge {
            id,
            vertices: [a, b],
            length,
        });
        self.vertices[a.0].edges.push(id);
        self.vertices[b.0].edges.push(id);
        id
    }

    /// Record that `v` is used by at least one face.
    pub fn mark_referenced(&mut self, v: VertexId) -> Result<()> {
        self.check_vertex(v)?;
        self.vertices[v.0].isolated = false;
        Ok(())
    }

    /// Move a vertex.
    ///
    /// Edge lengths, triangle normals, and any derived areas are left as
    /// they were; rerun the relevant analysis afterwards.
    pub fn set_position(&mut self, v: VertexId, position: Point3) -> Result<()> {
        self.check_vertex(v)?;
        self.vertices[v.0].position = position;
        Ok(())
    }

    /// Store a normal on a triangle.
    pub fn set_triangle_normal(&mut self, t: TriangleId, normal: Vec3) -> Result<()> {
        let triangle_count = self.triangles.len();
        let tri = self
            .triangles
            .get_mut(t.0)
            .ok_or(TopoError::TriangleOutOfRange {
                index: t.0,
                triangle_count,
            })?;
        tri.normal = Some(normal);
        Ok(())
    }

    fn check_vertex(&self, v: VertexId) -> Result<()> {
        if v.0 < self.vertices.len() {
            Ok(())
        } else {
            Err(TopoError::VertexOutOfRange {
                index: v.0,
                vertex_count: self.vertices.len(),
            })
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// All vertices, indexed by [`VertexId::index`].
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// All edges, indexed by [`EdgeId::index`].
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// All triangles, indexed by [`TriangleId::index`].
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Look up a vertex by id.
    pub fn vertex(&self, v: VertexId) -> Option<&Vertex> {
        self.vertices.get(v.0)
    }

    /// Look up an edge by id.
    pub fn edge(&self, e: EdgeId) -> Option<&Edge> {
        self.edges.get(e.0)
    }

    /// Look up a triangle by id.
    pub fn triangle(&self, t: TriangleId) -> Option<&Triangle> {
        self.triangles.get(t.0)
    }

    /// Position of a vertex.
    ///
    /// # Panics
    ///
    /// Panics if `v` is out of range.
    pub fn position(&self, v: VertexId) -> &Point3 {
        &self.vertices[v.0].position
    }

    /// Corner positions of a triangle.
    ///
    /// # Panics
    ///
    /// Panics if `t` is out of range.
    pub fn triangle_positions(&self, t: TriangleId) -> [&Point3; 3] {
        let [a, b, c] = self.triangles[t.0].vertices;
        [self.position(a), self.position(b), self.position(c)]
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of distinct edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// True once the mesh holds at least one triangle.
    pub fn is_built(&self) -> bool {
        !self.triangles.is_empty()
    }

    /// Entity counts.
    pub fn stats(&self) -> MeshStats {
        MeshStats {
            vertices: self.vertices.len(),
            edges: self.edges.len(),
            triangles: self.triangles.len(),
        }
    }

    /// `V - E + F`. A closed genus-0 surface gives 2.
    pub fn euler_characteristic(&self) -> i64 {
        self.vertices.len() as i64 - self.edges.len() as i64 + self.triangles.len() as i64
    }

    /// First vertex with no incident triangle, if any.
    pub fn first_unreferenced_vertex(&self) -> Option<VertexId> {
        self.vertices
            .iter()
            .find(|v| v.triangles.is_empty())
            .map(|v| v.id)
    }
}

impl Index<VertexId> for TriMesh {
    type Output = Vertex;

    fn index(&self, v: VertexId) -> &Vertex {
        &self.vertices[v.0]
    }
}

impl Index<EdgeId> for TriMesh {
    type Output = Edge;

    fn index(&self, e: EdgeId) -> &Edge {
        &self.edges[e.0]
    }
}

impl Index<TriangleId> for TriMesh {
    type Output = Triangle;

    fn index(&self, t: TriangleId) -> &Triangle {
        &self.triangles[t.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quad() -> (TriMesh, [VertexId; 4]) {
        let mut mesh = TriMesh::new();
        let a = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        let b = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        let c = mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
        let d = mesh.add_vertex(Point3::new(1.0, 1.0, 0.0));
        (mesh, [a, b, c, d])
    }

    #[test]
    fn test_vertex_ids_are_dense() {
        let (mesh, ids) = quad();
        for (i, id) in ids.iter().enumerate() {
            assert_eq!(id.index(), i);
            assert_eq!(mesh[*id].id, *id);
            assert!(mesh[*id].isolated);
        }
    }

    #[test]
    fn test_duplicate_positions_are_distinct() {
        let mut mesh = TriMesh::new();
        let a = mesh.add_vertex(Point3::new(1.0, 2.0, 3.0));
        let b = mesh.add_vertex(Point3::new(1.0, 2.0, 3.0));
        assert_ne!(a, b);
        assert_eq!(mesh.num_vertices(), 2);
    }

    #[test]
    fn test_add_triangle_registers_incidence() {
        let (mut mesh, [a, b, c, _]) = quad();
        let t = mesh.add_triangle(a, b, c).unwrap();

        assert_eq!(mesh.num_triangles(), 1);
        assert_eq!(mesh.num_edges(), 3);
        for v in [a, b, c] {
            assert_eq!(mesh[v].triangles, vec![t]);
            assert_eq!(mesh[v].edges.len(), 2);
            assert_eq!(mesh[v].neighbors.len(), 2);
        }

        let tri = &mesh[t];
        assert_eq!(tri.vertices, [a, b, c]);
        assert!(tri.normal.is_none());
        assert_eq!(mesh[tri.edges[0]].vertices, [a, b]);
        assert_eq!(mesh[tri.edges[1]].vertices, [a, c]);
        assert_eq!(mesh[tri.edges[2]].vertices, [b, c]);
    }

    #[test]
    fn test_shared_edge_is_reused() {
        let (mut mesh, [a, b, c, d]) = quad();
        let t0 = mesh.add_triangle(a, b, c).unwrap();
        let t1 = mesh.add_triangle(b, d, c).unwrap();

        assert_eq!(mesh.num_edges(), 5);
        // (b, c) is side 2 of t0 and side 1 of t1.
        assert_eq!(mesh[t0].edges[2], mesh[t1].edges[1]);
        // b and c are not listed as neighbors twice.
        assert_eq!(mesh[b].neighbors.iter().filter(|&&n| n == c).count(), 1);
        assert_eq!(mesh[c].neighbors.iter().filter(|&&n| n == b).count(), 1);
    }

    #[test]
    fn test_reverse_order_reuses_edge() {
        let (mut mesh, [a, b, c, _]) = quad();
        let e = mesh.resolve_edge(a, b);
        assert_eq!(mesh.resolve_edge(b, a), e);
        mesh.add_triangle(b, a, c).unwrap();
        assert_eq!(mesh.num_edges(), 3);
    }

    #[test]
    fn test_non_manifold_sharing_is_permitted() {
        let (mut mesh, [a, b, c, d]) = quad();
        let e = mesh.add_vertex(Point3::new(0.5, 0.5, 1.0));
        mesh.add_triangle(a, b, c).unwrap();
        mesh.add_triangle(a, b, d).unwrap();
        mesh.add_triangle(a, b, e).unwrap();

        let ab = mesh.resolve_edge(a, b);
        let sharing = mesh
            .triangles()
            .iter()
            .filter(|t| t.edges.contains(&ab))
            .count();
        assert_eq!(sharing, 3);
        assert_eq!(mesh.num_edges(), 7);
    }

    #[test]
    fn test_duplicate_triangle_adds_no_edges() {
        let (mut mesh, [a, b, c, _]) = quad();
        mesh.add_triangle(a, b, c).unwrap();
        let before = mesh.num_edges();
        mesh.add_triangle(c, a, b).unwrap();
        assert_eq!(mesh.num_edges(), before);
        assert_eq!(mesh.num_triangles(), 2);
    }

    #[test]
    fn test_edge_count_bounded_by_three_per_triangle() {
        let mut mesh = TriMesh::new();
        let ids: Vec<_> = (0..10)
            .map(|i| {
                let t = i as f64;
                mesh.add_vertex(Point3::new(t.cos(), t.sin(), t * 0.1))
            })
            .collect();
        for i in 0..ids.len() {
            for j in (i + 1)..ids.len() {
                let k = (i + j) % ids.len();
                mesh.add_triangle(ids[i], ids[j], ids[k]).unwrap();
                assert!(mesh.num_edges() <= 3 * mesh.num_triangles());
            }
        }
    }

    #[test]
    fn test_out_of_range_vertex_is_rejected() {
        let (mut mesh, [a, b, _, _]) = quad();
        let err = mesh.add_triangle(a, b, VertexId::new(9)).unwrap_err();
        assert_eq!(
            err,
            TopoError::VertexOutOfRange {
                index: 9,
                vertex_count: 4
            }
        );
        // Nothing was modified.
        assert_eq!(mesh.num_triangles(), 0);
        assert_eq!(mesh.num_edges(), 0);
        assert!(mesh[a].triangles.is_empty());
    }

    #[test]
    fn test_edge_length_is_a_snapshot() {
        let (mut mesh, [a, b, c, _]) = quad();
        let t = mesh.add_triangle(a, b, c).unwrap();
        let ab = mesh[t].edges[0];
        assert_relative_eq!(mesh[ab].length, 1.0);

        mesh.set_position(b, Point3::new(5.0, 0.0, 0.0)).unwrap();
        assert_relative_eq!(mesh[ab].length, 1.0);
        assert_relative_eq!(mesh.position(b).x, 5.0);
    }

    #[test]
    fn test_repeated_corner_makes_self_edge() {
        let (mut mesh, [a, b, _, _]) = quad();
        let t = mesh.add_triangle(a, b, a).unwrap();
        assert_eq!(mesh.num_edges(), 2);

        let sides = mesh[t].edges;
        assert_eq!(sides[0], sides[2]);
        assert_eq!(mesh[sides[1]].vertices, [a, a]);
        assert_eq!(mesh[sides[1]].length, 0.0);
    }

    #[test]
    fn test_mark_referenced() {
        let (mut mesh, [a, _, _, _]) = quad();
        mesh.mark_referenced(a).unwrap();
        assert!(!mesh[a].isolated);
        assert!(mesh.mark_referenced(VertexId::new(4)).is_err());
    }

    #[test]
    fn test_set_triangle_normal() {
        let (mut mesh, [a, b, c, _]) = quad();
        let t = mesh.add_triangle(a, b, c).unwrap();
        mesh.set_triangle_normal(t, Vec3::z()).unwrap();
        assert_eq!(mesh[t].normal, Some(Vec3::z()));
        assert_eq!(
            mesh.set_triangle_normal(TriangleId::new(3), Vec3::z()),
            Err(TopoError::TriangleOutOfRange {
                index: 3,
                triangle_count: 1
            })
        );
    }

    #[test]
    fn test_first_unreferenced_vertex() {
        let (mut mesh, [a, b, c, d]) = quad();
        mesh.add_triangle(a, b, c).unwrap();
        assert_eq!(mesh.first_unreferenced_vertex(), Some(d));
        mesh.add_triangle(b, d, c).unwrap();
        assert_eq!(mesh.first_unreferenced_vertex(), None);
    }

    #[test]
    fn test_clear() {
        let (mut mesh, [a, b, c, _]) = quad();
        mesh.add_triangle(a, b, c).unwrap();
        assert!(mesh.is_built());

        mesh.clear();
        assert!(!mesh.is_built());
        assert_eq!(mesh.stats(), MeshStats { vertices: 0, edges: 0, triangles: 0 });

        // Ids restart from zero after a clear.
        assert_eq!(mesh.add_vertex(Point3::origin()).index(), 0);
    }

    #[test]
    fn test_stats_serialize() {
        let (mut mesh, [a, b, c, _]) = quad();
        mesh.add_triangle(a, b, c).unwrap();
        let json = serde_json::to_string(&mesh.stats()).unwrap();
        assert_eq!(json, r#"{"vertices":4,"edges":3,"triangles":1}"#);
        assert_eq!(mesh.euler_characteristic(), 2);
    }
}
