//! Core mesh data structures.
//!
//! This module provides the persistent triangle mesh and the half-edge
//! connectivity derived from it.
//!
//! # Overview
//!
//! [`TriMesh`] owns the only state that survives between operations: vertex
//! positions, the flat triangle index list and the per-vertex normals derived
//! from them. [`HalfEdgeMesh`] is built from the index list on demand, used
//! for one query or one edit, and dropped. There is no incremental patching
//! of the graph.
//!
//! # Index Types
//!
//! Graph elements are identified by type-safe index wrappers:
//! - [`VertexId`] - Identifies a vertex
//! - [`HalfEdgeId`] - Identifies a half-edge
//! - [`FaceId`] - Identifies a face
//!
//! These indices are generic over the underlying integer type ([`MeshIndex`] trait),
//! allowing you to choose `u16`, `u32`, or `u64` based on mesh size.
//!
//! # Construction
//!
//! ```
//! use meshedit::mesh::TriMesh;
//! use nalgebra::Point3;
//!
//! let positions = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//!
//! let mesh = TriMesh::new(positions, vec![0, 1, 2]).unwrap();
//! let graph = mesh.halfedge_graph::<u32>().unwrap();
//! assert_eq!(graph.num_halfedges(), 3);
//! ```

mod buffers;
mod builder;
mod halfedge;
mod index;
mod traversal;
mod trimesh;

pub use buffers::{GpuVertex, MeshBuffers};
pub use builder::{
    build_from_indices, build_from_triangles, build_with_options, BuildOptions, NonManifoldPolicy,
};
pub use halfedge::{Face, HalfEdge, HalfEdgeMesh, Vertex};
pub use index::{FaceId, HalfEdgeId, MeshIndex, VertexId};
pub use traversal::{TraversalOptions, DEFAULT_MAX_RING_STEPS};
pub use trimesh::TriMesh;
