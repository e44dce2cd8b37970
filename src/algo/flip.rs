//! Edge flip.

use crate::error::Result;
use crate::mesh::{HalfEdgeId, MeshIndex, TriMesh};

/// Flip the edge under a half-edge to the other diagonal of its quad.
///
/// For `he: a -> b` in triangle `(a, b, c)` whose twin lies in triangle
/// `(b, a, d)`, the two triangles are rewritten in place to `(c, d, b)` and
/// `(d, c, a)`. Winding is preserved and no other triangle or position is
/// touched. Normals are recomputed afterwards.
///
/// Connectivity is rebuilt from the current index list to locate the edge,
/// so `he` refers to the half-edge numbering of the mesh as it is now.
///
/// # Returns
///
/// `Ok(true)` if the edge was flipped, `Ok(false)` if the flip was rejected:
/// the id is out of range, the edge is on the boundary, or the flip would
/// create a degenerate triangle or an edge that already exists. Errors are
/// only returned when the mesh itself cannot be rebuilt.
///
/// # Example
///
/// ```
/// use meshedit::prelude::*;
/// use nalgebra::Point3;
///
/// let positions = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let mut mesh = TriMesh::new(positions, vec![0, 1, 2, 0, 2, 3]).unwrap();
///
/// let he: HalfEdgeId = mesh.find_halfedge(0, 2).unwrap().unwrap();
/// assert!(edge_flip(&mut mesh, he).unwrap());
/// assert!(mesh.find_halfedge::<u32>(1, 3).unwrap().is_some());
/// ```
pub fn edge_flip<I: MeshIndex>(mesh: &mut TriMesh, he: HalfEdgeId<I>) -> Result<bool> {
    let graph = mesh.halfedge_graph::<I>()?;

    if !graph.contains_halfedge(he) {
        log::debug!("flip rejected: {:?} is not a half-edge of the mesh", he);
        return Ok(false);
    }
    let Some(twin) = graph.twin(he) else {
        log::debug!("flip rejected: {:?} is a boundary edge", he);
        return Ok(false);
    };

    let a = graph.tail(he);
    let b = graph.head(he);
    let c = graph.opposite_vertex(he);
    let d = graph.opposite_vertex(twin);

    if c == d || c == a || c == b || d == a || d == b {
        log::debug!("flip rejected: {:?} would produce a degenerate triangle", he);
        return Ok(false);
    }
    if graph.find_halfedge(c, d).is_some() {
        log::debug!(
            "flip rejected: edge ({}, {}) already exists",
            c.index(),
            d.index()
        );
        return Ok(false);
    }

    let (a, b, c, d) = (a.index(), b.index(), c.index(), d.index());
    mesh.set_triangle(graph.face_of(he).index(), [c, d, b]);
    mesh.set_triangle(graph.face_of(twin).index(), [d, c, a]);
    mesh.recompute_normals();

    log::debug!("flipped edge ({}, {}) to ({}, {})", a, b, c, d);
    Ok(true)
}
