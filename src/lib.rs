//! # meshedit
//!
//! Half-edge connectivity and local edits for triangle meshes.
//!
//! meshedit keeps a triangle mesh as plain positions and a flat index list,
//! derives half-edge connectivity from it on demand, and offers the queries
//! and edits interactive mesh tools are built on.
//!
//! ## Features
//!
//! - **Half-edge graph**: index-linked arrays with type-safe indices
//! - **Flexible indexing**: Support for 16-bit, 32-bit, and 64-bit indices
//! - **Valence queries**: one-ring walks with boundary handling and a step cap
//! - **Edge flip and split**: local rewrites of the triangle index list
//! - **Render-ready output**: normals, wireframe edges and byte-castable buffers
//!
//! ## Quick Start
//!
//! ```
//! use meshedit::prelude::*;
//! use nalgebra::Point3;
//!
//! let positions = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let mut mesh = TriMesh::new(positions, vec![0, 1, 2, 0, 2, 3]).unwrap();
//!
//! // Per-vertex valence, e.g. for a color ramp
//! let valences = mesh.valences(&TraversalOptions::default()).unwrap();
//! assert_eq!(valences, vec![3, 2, 3, 2]);
//!
//! // Pick an edge from the wireframe and split it
//! let [a, b] = mesh.wireframe_edges()[2];
//! let he: HalfEdgeId = mesh.find_halfedge(a, b).unwrap().unwrap();
//! let m = edge_split(&mut mesh, he).unwrap().unwrap();
//! assert_eq!(m.index(), 4);
//! assert_eq!(mesh.num_faces(), 4);
//!
//! // Hand the result to a renderer
//! let buffers = mesh.to_buffers().unwrap();
//! assert_eq!(buffers.indices.len(), 12);
//! ```
//!
//! ## Mesh Traversal
//!
//! ```
//! use meshedit::prelude::*;
//!
//! let graph: HalfEdgeMesh = build_from_indices(&[0, 1, 2, 0, 2, 3], 4).unwrap();
//!
//! for he in graph.halfedge_ids() {
//!     match graph.twin(he) {
//!         Some(twin) => assert_eq!(graph.twin(twin), Some(he)),
//!         None => assert!(graph.is_boundary_halfedge(he)),
//!     }
//! }
//!
//! let ring = graph.one_ring(VertexId::new(0)).unwrap();
//! assert_eq!(ring.len(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use meshedit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::{compute_vertex_normals, edge_flip, edge_split, wireframe_edges};
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        build_from_indices, build_with_options, BuildOptions, FaceId, HalfEdgeId, HalfEdgeMesh,
        MeshBuffers, MeshIndex, NonManifoldPolicy, TraversalOptions, TriMesh, VertexId,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use nalgebra::Point3;

    #[test]
    fn test_tetrahedron() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, 0.5, 1.0),
        ];

        let indices = vec![
            0, 2, 1, // bottom
            0, 1, 3, // front
            1, 2, 3, // right
            2, 0, 3, // left
        ];

        let mesh = TriMesh::new(positions, indices).unwrap();
        let graph: HalfEdgeMesh = mesh.halfedge_graph().unwrap();

        assert_eq!(graph.num_vertices(), 4);
        assert_eq!(graph.num_faces(), 4);
        assert_eq!(graph.num_halfedges(), 12);
        assert_eq!(graph.num_edges(), 6);
        assert!(graph.is_valid());

        // Closed mesh: no boundary vertices, every vertex touches the other three
        for v in graph.vertex_ids() {
            assert!(!graph.is_boundary_vertex(v).unwrap());
        }
        let valences = mesh.valences(&TraversalOptions::default()).unwrap();
        assert_eq!(valences, vec![3, 3, 3, 3]);
        assert_eq!(mesh.wireframe_edges().len(), 6);
    }

    #[test]
    fn test_edit_sequence() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let mut mesh = TriMesh::new(positions, vec![0, 1, 2, 0, 2, 3]).unwrap();

        let he: HalfEdgeId = mesh.find_halfedge(0, 2).unwrap().unwrap();
        assert!(edge_flip(&mut mesh, he).unwrap());

        let he: HalfEdgeId = mesh.find_halfedge(1, 3).unwrap().unwrap();
        let m = edge_split(&mut mesh, he).unwrap().unwrap();
        assert_eq!(m.index(), 4);

        let graph: HalfEdgeMesh = mesh.halfedge_graph().unwrap();
        assert!(graph.is_valid());
        assert_eq!(mesh.wireframe_edges().len(), graph.num_edges());

        let valences = mesh.valences(&TraversalOptions::default()).unwrap();
        assert_eq!(valences.iter().sum::<usize>(), 2 * graph.num_edges());
        assert_eq!(valences[m.index()], 4);
    }
}
