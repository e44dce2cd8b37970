//! Half-edge mesh data structure.
//!
//! This module provides a half-edge representation of the connectivity of a
//! triangle mesh. The graph is topology only: positions live in
//! [`TriMesh`](super::TriMesh) and the graph is derived from its index list
//! whenever a query or an edit needs it.
//!
//! # Structure
//!
//! - Face `f` owns the three consecutive half-edges `3f`, `3f + 1`, `3f + 2`
//! - Each half-edge knows its **head** (the vertex it points to), its **face**,
//!   the **next** half-edge in its face, and its **twin** on the other side of
//!   the edge
//! - `prev` and `tail` are not stored; they follow from the block layout
//! - Each vertex stores one outgoing half-edge
//! - Each face stores one half-edge on its boundary
//!
//! # Boundary Handling
//!
//! There are no half-edges outside faces. A half-edge on the mesh boundary
//! simply has no twin, which [`HalfEdgeMesh::twin`] reports as `None`.

use super::index::{FaceId, HalfEdgeId, MeshIndex, VertexId};

/// A vertex in the half-edge graph.
#[derive(Debug, Clone, Copy)]
pub struct Vertex<I: MeshIndex = u32> {
    /// One outgoing half-edge from this vertex, invalid if the vertex is isolated.
    pub halfedge: HalfEdgeId<I>,

    /// Number of half-edges leaving this vertex, across all faces.
    pub num_outgoing: usize,
}

impl<I: MeshIndex> Vertex<I> {
    /// Create an isolated vertex.
    pub fn new() -> Self {
        Self {
            halfedge: HalfEdgeId::invalid(),
            num_outgoing: 0,
        }
    }

    /// Check if no face references this vertex.
    #[inline]
    pub fn is_isolated(&self) -> bool {
        !self.halfedge.is_valid()
    }
}

impl<I: MeshIndex> Default for Vertex<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// A half-edge in the mesh.
#[derive(Debug, Clone, Copy)]
pub struct HalfEdge<I: MeshIndex = u32> {
    /// The vertex this half-edge points to.
    pub head: VertexId<I>,

    /// The face this half-edge belongs to.
    pub face: FaceId<I>,

    /// The next half-edge around the face.
    pub next: HalfEdgeId<I>,

    /// The opposite half-edge, invalid on a boundary.
    pub twin: HalfEdgeId<I>,
}

impl<I: MeshIndex> HalfEdge<I> {
    /// Create a new uninitialized half-edge.
    pub fn new() -> Self {
        Self {
            head: VertexId::invalid(),
            face: FaceId::invalid(),
            next: HalfEdgeId::invalid(),
            twin: HalfEdgeId::invalid(),
        }
    }

    /// Check if this half-edge is on the boundary.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        !self.twin.is_valid()
    }
}

impl<I: MeshIndex> Default for HalfEdge<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// A face in the half-edge mesh.
#[derive(Debug, Clone, Copy)]
pub struct Face<I: MeshIndex = u32> {
    /// One half-edge on the boundary of this face.
    pub halfedge: HalfEdgeId<I>,
}

impl<I: MeshIndex> Face<I> {
    /// Create a new face with the given half-edge.
    pub fn new(halfedge: HalfEdgeId<I>) -> Self {
        Self { halfedge }
    }
}

impl<I: MeshIndex> Default for Face<I> {
    fn default() -> Self {
        Self {
            halfedge: HalfEdgeId::invalid(),
        }
    }
}

/// Half-edge connectivity of a triangle mesh.
///
/// Built by [`build_from_indices`](super::build_from_indices). All links are
/// plain indices into the three arrays below.
#[derive(Debug, Clone)]
pub struct HalfEdgeMesh<I: MeshIndex = u32> {
    /// All vertices in the mesh.
    pub(crate) vertices: Vec<Vertex<I>>,

    /// All half-edges in the mesh, three per face.
    pub(crate) halfedges: Vec<HalfEdge<I>>,

    /// All faces in the mesh.
    pub(crate) faces: Vec<Face<I>>,
}

impl<I: MeshIndex> Default for HalfEdgeMesh<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: MeshIndex> HalfEdgeMesh<I> {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            halfedges: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    pub fn with_capacity(num_vertices: usize, num_faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(num_vertices),
            halfedges: Vec::with_capacity(num_faces * 3),
            faces: Vec::with_capacity(num_faces),
        }
    }

    // ==================== Accessors ====================

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of half-edges.
    #[inline]
    pub fn num_halfedges(&self) -> usize {
        self.halfedges.len()
    }

    /// Get the number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Get the number of undirected edges.
    pub fn num_edges(&self) -> usize {
        let boundary = self.halfedges.iter().filter(|he| he.is_boundary()).count();
        boundary + (self.halfedges.len() - boundary) / 2
    }

    /// Get a vertex by ID.
    #[inline]
    pub fn vertex(&self, id: VertexId<I>) -> &Vertex<I> {
        &self.vertices[id.index()]
    }

    /// Get a half-edge by ID.
    #[inline]
    pub fn halfedge(&self, id: HalfEdgeId<I>) -> &HalfEdge<I> {
        &self.halfedges[id.index()]
    }

    /// Get a face by ID.
    #[inline]
    pub fn face(&self, id: FaceId<I>) -> &Face<I> {
        &self.faces[id.index()]
    }

    /// Check whether `he` names a half-edge of this mesh.
    #[inline]
    pub fn contains_halfedge(&self, he: HalfEdgeId<I>) -> bool {
        he.is_valid() && he.index() < self.halfedges.len()
    }

    // ==================== Topology Queries ====================

    /// Get the twin (opposite) half-edge, or `None` on a boundary.
    #[inline]
    pub fn twin(&self, he: HalfEdgeId<I>) -> Option<HalfEdgeId<I>> {
        let twin = self.halfedge(he).twin;
        twin.is_valid().then_some(twin)
    }

    /// Get the next half-edge around the face.
    #[inline]
    pub fn next(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).next
    }

    /// Get the previous half-edge around the face.
    #[inline]
    pub fn prev(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        he.prev_in_block()
    }

    /// Get the vertex a half-edge points to.
    #[inline]
    pub fn head(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.halfedge(he).head
    }

    /// Get the vertex a half-edge starts from.
    #[inline]
    pub fn tail(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.head(self.prev(he))
    }

    /// Get the face of a half-edge.
    #[inline]
    pub fn face_of(&self, he: HalfEdgeId<I>) -> FaceId<I> {
        self.halfedge(he).face
    }

    /// Get the vertex opposite a half-edge within its face.
    #[inline]
    pub fn opposite_vertex(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.head(self.next(he))
    }

    /// Get one outgoing half-edge of a vertex, or `None` if it is isolated.
    #[inline]
    pub fn outgoing(&self, v: VertexId<I>) -> Option<HalfEdgeId<I>> {
        let he = self.vertex(v).halfedge;
        he.is_valid().then_some(he)
    }

    /// Number of half-edges leaving a vertex, counted over every face.
    ///
    /// A one-ring walk that reaches fewer outgoing half-edges than this has
    /// stayed inside one of several fans sharing the vertex.
    #[inline]
    pub fn num_outgoing(&self, v: VertexId<I>) -> usize {
        self.vertex(v).num_outgoing
    }

    /// Check if a half-edge is on the boundary.
    #[inline]
    pub fn is_boundary_halfedge(&self, he: HalfEdgeId<I>) -> bool {
        self.halfedge(he).is_boundary()
    }

    /// Find the half-edge running from `a` to `b`.
    ///
    /// Falls back to the half-edge running from `b` to `a` when the edge is a
    /// boundary edge oriented the other way, so any edge reported by the
    /// wireframe can be mapped back to a half-edge.
    pub fn find_halfedge(&self, a: VertexId<I>, b: VertexId<I>) -> Option<HalfEdgeId<I>> {
        let directed = |from: VertexId<I>, to: VertexId<I>| {
            self.halfedge_ids()
                .find(|&he| self.head(he) == to && self.tail(he) == from)
        };
        directed(a, b).or_else(|| directed(b, a))
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex IDs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        (0..self.vertices.len()).map(|i| VertexId::new(i))
    }

    /// Iterate over all half-edge IDs.
    pub fn halfedge_ids(&self) -> impl Iterator<Item = HalfEdgeId<I>> + '_ {
        (0..self.halfedges.len()).map(|i| HalfEdgeId::new(i))
    }

    /// Iterate over all face IDs.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId<I>> + '_ {
        (0..self.faces.len()).map(|i| FaceId::new(i))
    }

    /// Iterate over all boundary half-edges.
    pub fn boundary_halfedges(&self) -> impl Iterator<Item = HalfEdgeId<I>> + '_ {
        self.halfedge_ids()
            .filter(move |&he| self.is_boundary_halfedge(he))
    }

    /// Get the three half-edges of a face, starting at its representative.
    pub fn face_halfedges(&self, f: FaceId<I>) -> [HalfEdgeId<I>; 3] {
        let he0 = self.face(f).halfedge;
        let he1 = self.next(he0);
        let he2 = self.next(he1);
        [he0, he1, he2]
    }

    /// Get the three vertices of a face in block order.
    pub fn face_triangle(&self, f: FaceId<I>) -> [VertexId<I>; 3] {
        let [he0, he1, he2] = self.face_halfedges(f);
        [self.tail(he0), self.tail(he1), self.tail(he2)]
    }

    /// Flatten the faces back into a triangle index list.
    pub fn to_indices(&self) -> Vec<usize> {
        self.face_ids()
            .flat_map(|f| self.face_triangle(f).map(|v| v.index()))
            .collect()
    }

    // ==================== Validation ====================

    /// Check if the mesh is valid (all connectivity is consistent).
    pub fn is_valid(&self) -> bool {
        if self.halfedges.len() != self.faces.len() * 3 {
            return false;
        }

        // Check vertices
        let outgoing: usize = self.vertices.iter().map(|v| v.num_outgoing).sum();
        if outgoing != self.halfedges.len() {
            return false;
        }
        for v in self.vertex_ids() {
            if let Some(he) = self.outgoing(v) {
                if !self.contains_halfedge(he) || self.tail(he) != v {
                    return false;
                }
            }
        }

        // Check half-edges
        for he in self.halfedge_ids() {
            let data = self.halfedge(he);
            if data.face != he.face() || data.next != he.next_in_block() {
                return false;
            }
            if data.head.index() >= self.vertices.len() {
                return false;
            }

            // Twin consistency
            if let Some(twin) = self.twin(he) {
                if !self.contains_halfedge(twin)
                    || self.twin(twin) != Some(he)
                    || self.head(twin) != self.tail(he)
                    || self.head(he) == self.head(twin)
                {
                    return false;
                }
            }
        }

        // Check faces
        for f in self.face_ids() {
            let he = self.face(f).halfedge;
            if !self.contains_halfedge(he) || self.face_of(he) != f {
                return false;
            }
        }

        true
    }
}
