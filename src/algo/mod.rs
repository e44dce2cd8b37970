//! Mesh editing and attribute algorithms.
//!
//! This module contains the operations that read or rewrite a [`TriMesh`]:
//!
//! - **Edge flip**: swap the shared edge of two triangles for the other diagonal
//! - **Edge split**: insert a midpoint vertex and subdivide the adjacent triangles
//! - **Normals**: area-weighted per-vertex normals
//! - **Wireframe**: deduplicated undirected edge list
//!
//! Edits never patch connectivity incrementally. Each one rebuilds the
//! half-edge graph from the current index list, locates its edge, rewrites
//! the index list and recomputes normals, so every edit costs O(F).
//!
//! [`TriMesh`]: crate::mesh::TriMesh

mod flip;
mod normals;
mod split;
mod wireframe;

pub use flip::edge_flip;
pub use normals::compute_vertex_normals;
pub use split::edge_split;
pub use wireframe::wireframe_edges;
