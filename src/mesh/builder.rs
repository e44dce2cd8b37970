//! Mesh construction utilities.
//!
//! This module builds half-edge connectivity from a flat triangle index list,
//! the format mesh loaders and render backends exchange. Construction is a
//! single pass over the faces plus one hash-map pass for twin resolution.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::halfedge::{Face, HalfEdge, HalfEdgeMesh, Vertex};
use super::index::{FaceId, HalfEdgeId, MeshIndex, VertexId};
use crate::error::{MeshError, Result};

/// What to do when the same directed edge appears in more than one face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NonManifoldPolicy {
    /// Fail with [`MeshError::NonManifoldEdge`].
    #[default]
    Reject,

    /// Keep the most recently inserted half-edge as the twin target.
    ///
    /// Shadowed half-edges are left without a twin so twin links stay
    /// symmetric.
    LastWins,
}

/// Options for building half-edge connectivity.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Handling of directed edges shared by more than one face.
    pub non_manifold: NonManifoldPolicy,
}

impl BuildOptions {
    /// Set the non-manifold edge policy.
    pub fn with_non_manifold(mut self, policy: NonManifoldPolicy) -> Self {
        self.non_manifold = policy;
        self
    }

    /// Create options that tolerate non-manifold edges.
    pub fn lenient() -> Self {
        Self::default().with_non_manifold(NonManifoldPolicy::LastWins)
    }
}

/// Build a half-edge mesh from a flat triangle index list.
///
/// # Arguments
/// * `indices` - Triangle vertex indices, three per face
/// * `num_vertices` - Number of vertices the indices refer into
///
/// # Returns
/// A half-edge mesh, or an error if the input is invalid.
///
/// # Example
/// ```
/// use meshedit::mesh::{build_from_indices, HalfEdgeMesh};
///
/// let indices = [0, 1, 2, 0, 2, 3];
/// let mesh: HalfEdgeMesh = build_from_indices(&indices, 4).unwrap();
/// assert_eq!(mesh.num_faces(), 2);
/// assert_eq!(mesh.num_edges(), 5);
/// ```
pub fn build_from_indices<I: MeshIndex>(
    indices: &[usize],
    num_vertices: usize,
) -> Result<HalfEdgeMesh<I>> {
    build_with_options(indices, num_vertices, &BuildOptions::default())
}

/// Build a half-edge mesh from a list of triangles.
pub fn build_from_triangles<I: MeshIndex>(
    triangles: &[[usize; 3]],
    num_vertices: usize,
) -> Result<HalfEdgeMesh<I>> {
    let indices: Vec<usize> = triangles.iter().flatten().copied().collect();
    build_from_indices(&indices, num_vertices)
}

/// Build a half-edge mesh from a flat triangle index list with explicit options.
pub fn build_with_options<I: MeshIndex>(
    indices: &[usize],
    num_vertices: usize,
    options: &BuildOptions,
) -> Result<HalfEdgeMesh<I>> {
    validate_indices::<I>(indices, num_vertices)?;

    let num_faces = indices.len() / 3;
    let mut mesh = HalfEdgeMesh::with_capacity(num_vertices, num_faces);
    mesh.vertices.resize(num_vertices, Vertex::new());

    // First pass: one block of three half-edges per face
    for (fi, face) in indices.chunks_exact(3).enumerate() {
        let face_id = FaceId::<I>::new(fi);
        let base = fi * 3;

        for k in 0..3 {
            let he = HalfEdgeId::<I>::new(base + k);
            mesh.halfedges.push(HalfEdge {
                head: VertexId::new(face[(k + 1) % 3]),
                face: face_id,
                next: he.next_in_block(),
                twin: HalfEdgeId::invalid(),
            });

            // Last write wins; any outgoing half-edge will do
            mesh.vertices[face[k]].halfedge = he;
            mesh.vertices[face[k]].num_outgoing += 1;
        }

        mesh.faces.push(Face::new(face_id.first_halfedge()));
    }

    // Second pass: map directed edges (tail, head) to half-edges
    let mut edge_map: HashMap<(usize, usize), HalfEdgeId<I>> =
        HashMap::with_capacity(mesh.num_halfedges());
    for he in mesh.halfedge_ids() {
        let key = (mesh.tail(he).index(), mesh.head(he).index());
        match edge_map.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(he);
            }
            Entry::Occupied(mut slot) => match options.non_manifold {
                NonManifoldPolicy::Reject => {
                    return Err(MeshError::NonManifoldEdge {
                        v0: key.0,
                        v1: key.1,
                    });
                }
                NonManifoldPolicy::LastWins => {
                    log::warn!(
                        "directed edge ({}, {}) repeated: {:?} shadows {:?}",
                        key.0,
                        key.1,
                        he,
                        slot.get()
                    );
                    slot.insert(he);
                }
            },
        }
    }

    // Third pass: link twins through the reverse pair
    for he in mesh.halfedge_ids().collect::<Vec<_>>() {
        let tail = mesh.tail(he).index();
        let head = mesh.head(he).index();
        if edge_map.get(&(tail, head)) != Some(&he) {
            // Shadowed by a later duplicate; stays a boundary
            continue;
        }
        if let Some(&twin) = edge_map.get(&(head, tail)) {
            mesh.halfedges[he.index()].twin = twin;
        }
    }

    log::trace!(
        "built half-edge graph: {} vertices, {} faces, {} edges",
        mesh.num_vertices(),
        mesh.num_faces(),
        mesh.num_edges()
    );

    Ok(mesh)
}

/// Check an index list before any graph storage is touched.
fn validate_indices<I: MeshIndex>(indices: &[usize], num_vertices: usize) -> Result<()> {
    if indices.len() % 3 != 0 {
        return Err(MeshError::InvalidIndexCount { len: indices.len() });
    }

    for count in [num_vertices, indices.len()] {
        if !I::fits(count) {
            return Err(MeshError::IndexOverflow {
                count,
                max: I::MAX.to_usize(),
            });
        }
    }

    for (fi, face) in indices.chunks_exact(3).enumerate() {
        for &vi in face {
            if vi >= num_vertices {
                return Err(MeshError::InvalidVertexIndex {
                    face: fi,
                    vertex: vi,
                    num_vertices,
                });
            }
        }
        if face[0] == face[1] || face[1] == face[2] || face[0] == face[2] {
            return Err(MeshError::DegenerateFace { face: fi });
        }
    }

    Ok(())
}
