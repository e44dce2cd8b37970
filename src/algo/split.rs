//! Edge split.

use nalgebra::Point3;

use crate::error::{MeshError, Result};
use crate::mesh::{HalfEdgeId, MeshIndex, TriMesh, VertexId};

/// Split the edge under a half-edge at its midpoint.
///
/// For `he: a -> b` in triangle `(a, b, c)`, a vertex `m` is appended at the
/// midpoint of `a` and `b`. The triangle is rewritten to `(a, m, c)` and
/// `(m, b, c)` is appended. If the edge is interior, the twin's triangle
/// `(b, a, d)` is rewritten to `(b, m, d)` and `(m, a, d)` is appended as
/// well. Normals are recomputed afterwards.
///
/// # Returns
///
/// `Ok(Some(m))` with the new vertex, or `Ok(None)` if `he` is not a
/// half-edge of the mesh. Errors are only returned when the mesh itself
/// cannot be rebuilt or the new vertex does not fit the index type.
pub fn edge_split<I: MeshIndex>(
    mesh: &mut TriMesh,
    he: HalfEdgeId<I>,
) -> Result<Option<VertexId<I>>> {
    let graph = mesh.halfedge_graph::<I>()?;

    if !graph.contains_halfedge(he) {
        log::debug!("split rejected: {:?} is not a half-edge of the mesh", he);
        return Ok(None);
    }
    // One new vertex and up to two new faces must stay addressable
    for count in [mesh.num_vertices() + 1, mesh.indices().len() + 6] {
        if !I::fits(count) {
            return Err(MeshError::IndexOverflow {
                count,
                max: I::MAX.to_usize(),
            });
        }
    }

    let a = graph.tail(he).index();
    let b = graph.head(he).index();
    let c = graph.opposite_vertex(he).index();

    let pa = mesh.positions()[a];
    let pb = mesh.positions()[b];
    let m = mesh.push_vertex(Point3::from((pa.coords + pb.coords) * 0.5));

    mesh.set_triangle(graph.face_of(he).index(), [a, m, c]);
    mesh.push_triangle([m, b, c]);

    if let Some(twin) = graph.twin(he) {
        let d = graph.opposite_vertex(twin).index();
        mesh.set_triangle(graph.face_of(twin).index(), [b, m, d]);
        mesh.push_triangle([m, a, d]);
    }

    mesh.recompute_normals();

    log::debug!("split edge ({}, {}) at new vertex {}", a, b, m);
    Ok(Some(VertexId::new(m)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::edge_flip;
    use crate::mesh::{HalfEdgeMesh, TraversalOptions};

    fn quad() -> TriMesh {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        TriMesh::new(positions, vec![0, 1, 2, 0, 2, 3]).unwrap()
    }

    #[test]
    fn test_split_quad_diagonal() {
        let mut mesh = quad();
        let he: HalfEdgeId = mesh.find_halfedge(0, 2).unwrap().unwrap();
        let m = edge_split(&mut mesh, he).unwrap().unwrap();

        assert_eq!(m.index(), 4);
        assert_eq!(mesh.num_vertices(), 5);
        assert_eq!(mesh.num_faces(), 4);
        assert!((mesh.positions()[4] - Point3::new(0.5, 0.5, 0.0)).norm() < 1e-12);

        // Every new triangle uses the midpoint and keeps +z winding
        let graph: HalfEdgeMesh = mesh.halfedge_graph().unwrap();
        assert!(graph.is_valid());
        for t in mesh.triangles() {
            assert!(t.contains(&4));
        }
        for n in mesh.normals() {
            assert!((n.z - 1.0).abs() < 1e-10);
        }

        // The diagonal is gone, replaced by four spokes
        assert!(graph.find_halfedge(VertexId::new(0), VertexId::new(2)).is_none());
        let valences = mesh.valences(&TraversalOptions::default()).unwrap();
        assert_eq!(valences[4], 4);
    }

    #[test]
    fn test_split_boundary_edge() {
        let mut mesh = quad();
        let he: HalfEdgeId = mesh.find_halfedge(0, 1).unwrap().unwrap();
        let m = edge_split(&mut mesh, he).unwrap().unwrap();

        assert_eq!(m.index(), 4);
        assert_eq!(mesh.num_vertices(), 5);
        assert_eq!(mesh.num_faces(), 3);
        assert!((mesh.positions()[4] - Point3::new(0.5, 0.0, 0.0)).norm() < 1e-12);

        let graph: HalfEdgeMesh = mesh.halfedge_graph().unwrap();
        assert!(graph.is_valid());
        assert!(graph.is_boundary_vertex(VertexId::new(4)).unwrap());
        assert_eq!(graph.valence(VertexId::new(4)).unwrap(), 3);
    }

    #[test]
    fn test_split_interior_growth() {
        // Octahedron: every edge is interior
        let positions = vec![
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, -1.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(0.0, -1.0, 0.0),
        ];
        let indices = vec![
            0, 2, 3, 0, 3, 4, 0, 4, 5, 0, 5, 2, //
            1, 3, 2, 1, 4, 3, 1, 5, 4, 1, 2, 5,
        ];
        let mut mesh = TriMesh::new(positions, indices).unwrap();

        for step in 0..5 {
            let vertices = mesh.num_vertices();
            let faces = mesh.num_faces();
            let he = HalfEdgeId::<u32>::new(step * 5 % (faces * 3));
            assert!(edge_split(&mut mesh, he).unwrap().is_some());
            assert_eq!(mesh.num_vertices(), vertices + 1);
            assert_eq!(mesh.num_faces(), faces + 2);
        }

        let graph: HalfEdgeMesh = mesh.halfedge_graph().unwrap();
        assert!(graph.is_valid());
        assert_eq!(graph.boundary_halfedges().count(), 0);

        let valences = graph.valences(&TraversalOptions::default()).unwrap();
        assert_eq!(valences.iter().sum::<usize>(), 3 * mesh.num_faces());
        for n in mesh.normals() {
            assert!((n.norm() - 1.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_split_invalid_id_rejected() {
        let mut mesh = quad();
        assert_eq!(edge_split(&mut mesh, HalfEdgeId::<u32>::new(42)).unwrap(), None);
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_faces(), 2);
    }

    #[test]
    fn test_split_refuses_index_overflow() {
        // 21_844 faces use 65_532 half-edges; two more faces would not fit u16
        let mut positions = vec![Point3::new(0.0, 0.0, 0.0)];
        let mut indices = Vec::new();
        for i in 0..21_844 {
            let x = i as f64;
            positions.push(Point3::new(x + 1.0, 0.0, 0.0));
            positions.push(Point3::new(x + 1.0, 1.0, 0.0));
            let k = positions.len();
            indices.extend_from_slice(&[0, k - 2, k - 1]);
        }
        let mut mesh = TriMesh::new(positions, indices).unwrap();
        let he = HalfEdgeId::<u16>::new(1);

        let before = mesh.indices().to_vec();
        assert_eq!(
            edge_split(&mut mesh, he).unwrap_err(),
            MeshError::IndexOverflow {
                count: 65_538,
                max: 65_534
            }
        );
        assert_eq!(mesh.indices(), &before[..]);
        assert_eq!(mesh.num_vertices(), 43_689);

        // Wider indices still accept the same edit
        let he = HalfEdgeId::<u32>::new(1);
        assert!(edge_split(&mut mesh, he).unwrap().is_some());
    }

    #[test]
    fn test_split_then_flip() {
        let mut mesh = quad();
        let he: HalfEdgeId = mesh.find_halfedge(0, 1).unwrap().unwrap();
        edge_split(&mut mesh, he).unwrap().unwrap();

        // The new spoke 4-2 is interior; flipping it reconnects 0 and 1
        let spoke: HalfEdgeId = mesh.find_halfedge(4, 2).unwrap().unwrap();
        assert!(edge_flip(&mut mesh, spoke).unwrap());

        let graph: HalfEdgeMesh = mesh.halfedge_graph().unwrap();
        assert!(graph.is_valid());
        assert!(graph.find_halfedge(VertexId::new(4), VertexId::new(2)).is_none());
    }
}
