//! The persistent triangle mesh.

use nalgebra::{Point3, Vector3};

use super::buffers::{GpuVertex, MeshBuffers};
use super::builder::{build_with_options, BuildOptions};
use super::halfedge::HalfEdgeMesh;
use super::index::{HalfEdgeId, MeshIndex, VertexId};
use super::traversal::TraversalOptions;
use crate::algo::{compute_vertex_normals, wireframe_edges};
use crate::error::{MeshError, Result};

/// A triangle mesh: positions, a flat triangle index list and vertex normals.
///
/// This is the state edits operate on. Connectivity is not stored; call
/// [`TriMesh::halfedge_graph`] to derive it. Normals are kept in sync with
/// the positions and indices by every constructor and edit.
#[derive(Debug, Clone)]
pub struct TriMesh {
    positions: Vec<Point3<f64>>,
    normals: Vec<Vector3<f64>>,
    indices: Vec<usize>,
    options: BuildOptions,
}

impl TriMesh {
    /// Create a mesh from positions and a flat triangle index list.
    ///
    /// The index list is validated by building its connectivity once, so a
    /// mesh that constructs successfully can always be rebuilt by later
    /// queries and edits.
    pub fn new(positions: Vec<Point3<f64>>, indices: Vec<usize>) -> Result<Self> {
        Self::with_options(positions, indices, BuildOptions::default())
    }

    /// Create a mesh with explicit connectivity build options.
    pub fn with_options(
        positions: Vec<Point3<f64>>,
        indices: Vec<usize>,
        options: BuildOptions,
    ) -> Result<Self> {
        build_with_options::<u32>(&indices, positions.len(), &options)?;

        let normals = compute_vertex_normals(&positions, &indices, false);
        Ok(Self {
            positions,
            normals,
            indices,
            options,
        })
    }

    /// Create a mesh from render-style buffers: 3 floats per vertex and `u32` indices.
    pub fn from_buffers(positions: &[f32], indices: &[u32]) -> Result<Self> {
        if positions.len() % 3 != 0 {
            return Err(MeshError::InvalidPositionCount {
                len: positions.len(),
            });
        }

        let positions = positions
            .chunks_exact(3)
            .map(|p| Point3::new(p[0] as f64, p[1] as f64, p[2] as f64))
            .collect();
        let indices = indices.iter().map(|&i| i as usize).collect();
        Self::new(positions, indices)
    }

    // ==================== Accessors ====================

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex positions.
    #[inline]
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    /// Unit vertex normals (zero for vertices no triangle uses).
    #[inline]
    pub fn normals(&self) -> &[Vector3<f64>] {
        &self.normals
    }

    /// The flat triangle index list.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// The options used whenever connectivity is rebuilt.
    #[inline]
    pub fn build_options(&self) -> &BuildOptions {
        &self.options
    }

    /// Get the vertices of triangle `f`, or `None` if there is no such face.
    #[inline]
    pub fn triangle(&self, f: usize) -> Option<[usize; 3]> {
        let i = f.checked_mul(3)?;
        match self.indices.get(i..i.checked_add(3)?)? {
            &[a, b, c] => Some([a, b, c]),
            _ => None,
        }
    }

    /// Iterate over all triangles.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    // ==================== Derived Data ====================

    /// Build the half-edge connectivity of the current index list.
    pub fn halfedge_graph<I: MeshIndex>(&self) -> Result<HalfEdgeMesh<I>> {
        build_with_options(&self.indices, self.positions.len(), &self.options)
    }

    /// Compute the valence of every vertex.
    pub fn valences(&self, options: &TraversalOptions) -> Result<Vec<usize>> {
        self.halfedge_graph::<u32>()?.valences(options)
    }

    /// Deduplicated undirected edges, in order of first appearance.
    pub fn wireframe_edges(&self) -> Vec<[usize; 2]> {
        wireframe_edges(&self.indices)
    }

    /// Map an undirected edge back to one of its half-edges.
    ///
    /// Returns `None` if no triangle contains the edge.
    pub fn find_halfedge<I: MeshIndex>(&self, a: usize, b: usize) -> Result<Option<HalfEdgeId<I>>> {
        if a >= self.num_vertices() || b >= self.num_vertices() {
            return Ok(None);
        }
        let graph = self.halfedge_graph::<I>()?;
        Ok(graph.find_halfedge(VertexId::new(a), VertexId::new(b)))
    }

    /// Recompute vertex normals from the current positions and indices.
    pub fn recompute_normals(&mut self) {
        self.recompute_normals_with(false);
    }

    /// Recompute vertex normals, optionally in parallel.
    pub fn recompute_normals_with(&mut self, parallel: bool) {
        self.normals = compute_vertex_normals(&self.positions, &self.indices, parallel);
    }

    /// Export positions, normals and indices as GPU-ready buffers.
    pub fn to_buffers(&self) -> Result<MeshBuffers> {
        let vertices = self
            .positions
            .iter()
            .zip(&self.normals)
            .map(|(p, n)| GpuVertex {
                position: [p.x as f32, p.y as f32, p.z as f32],
                normal: [n.x as f32, n.y as f32, n.z as f32],
            })
            .collect();

        let indices = to_u32_indices(&self.indices)?;
        Ok(MeshBuffers { vertices, indices })
    }

    /// Wireframe edges as a line-list index buffer.
    pub fn wireframe_indices(&self) -> Result<Vec<u32>> {
        let flat: Vec<usize> = self.wireframe_edges().into_iter().flatten().collect();
        to_u32_indices(&flat)
    }

    // ==================== Edit Support ====================

    /// Overwrite triangle `f` in place.
    pub(crate) fn set_triangle(&mut self, f: usize, triangle: [usize; 3]) {
        self.indices[f * 3..f * 3 + 3].copy_from_slice(&triangle);
    }

    /// Append a triangle.
    pub(crate) fn push_triangle(&mut self, triangle: [usize; 3]) {
        self.indices.extend_from_slice(&triangle);
    }

    /// Append a vertex with a placeholder normal and return its index.
    pub(crate) fn push_vertex(&mut self, position: Point3<f64>) -> usize {
        self.positions.push(position);
        self.normals.push(Vector3::zeros());
        self.positions.len() - 1
    }
}

fn to_u32_indices(indices: &[usize]) -> Result<Vec<u32>> {
    indices
        .iter()
        .map(|&i| {
            u32::try_from(i).map_err(|_| MeshError::IndexOverflow {
                count: i + 1,
                max: u32::MAX as usize,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::NonManifoldPolicy;

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
    fn test_construction() {
        let mesh = quad();
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_faces(), 2);
        assert_eq!(mesh.triangle(1), Some([0, 2, 3]));
        assert_eq!(mesh.triangle(2), None);
        assert_eq!(mesh.triangle(usize::MAX), None);
        assert_eq!(mesh.triangles().count(), 2);
        assert_eq!(mesh.normals().len(), 4);

        for n in mesh.normals() {
            assert!((n - Vector3::z()).norm() < 1e-10);
        }
    }

    #[test]
    fn test_invalid_input_fails_fast() {
        let positions = vec![Point3::origin(); 3];
        assert_eq!(
            TriMesh::new(positions.clone(), vec![0, 1, 3]).unwrap_err(),
            MeshError::InvalidVertexIndex {
                face: 0,
                vertex: 3,
                num_vertices: 3
            }
        );
        assert_eq!(
            TriMesh::new(positions, vec![0, 1]).unwrap_err(),
            MeshError::InvalidIndexCount { len: 2 }
        );
    }

    #[test]
    fn test_options_are_kept() {
        let positions = vec![Point3::origin(); 5];
        let indices = vec![0, 1, 2, 1, 0, 3, 0, 1, 4];
        assert!(TriMesh::new(positions.clone(), indices.clone()).is_err());

        let options = BuildOptions::default().with_non_manifold(NonManifoldPolicy::LastWins);
        let mesh = TriMesh::with_options(positions, indices, options).unwrap();
        assert_eq!(mesh.build_options().non_manifold, NonManifoldPolicy::LastWins);
        assert!(mesh.halfedge_graph::<u32>().is_ok());
    }

    #[test]
    fn test_from_buffers() {
        let positions = [0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let mesh = TriMesh::from_buffers(&positions, &[0, 1, 2]).unwrap();
        assert_eq!(mesh.num_vertices(), 3);
        assert_eq!(mesh.indices(), &[0, 1, 2]);

        assert_eq!(
            TriMesh::from_buffers(&positions[..8], &[0, 1, 2]).unwrap_err(),
            MeshError::InvalidPositionCount { len: 8 }
        );
    }

    #[test]
    fn test_valences_and_wireframe() {
        let mesh = quad();
        let valences = mesh.valences(&TraversalOptions::default()).unwrap();
        assert_eq!(valences, vec![3, 2, 3, 2]);

        let edges = mesh.wireframe_edges();
        assert_eq!(edges.len(), 5);
        assert_eq!(mesh.wireframe_indices().unwrap().len(), 10);
    }

    #[test]
    fn test_find_halfedge() {
        let mesh = quad();
        let graph = mesh.halfedge_graph::<u32>().unwrap();

        for [a, b] in mesh.wireframe_edges() {
            let he = mesh.find_halfedge::<u32>(a, b).unwrap().unwrap();
            let ends = [graph.tail(he).index(), graph.head(he).index()];
            assert!(ends == [a, b] || ends == [b, a]);
        }

        // 1-3 is not an edge of the quad
        assert_eq!(mesh.find_halfedge::<u32>(1, 3).unwrap(), None);
        assert_eq!(mesh.find_halfedge::<u32>(0, 9).unwrap(), None);
    }

    #[test]
    fn test_to_buffers() {
        let mesh = quad();
        let buffers = mesh.to_buffers().unwrap();
        assert_eq!(buffers.vertices.len(), 4);
        assert_eq!(buffers.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(buffers.vertices[2].position, [1.0, 1.0, 0.0]);
        assert_eq!(buffers.vertices[2].normal, [0.0, 0.0, 1.0]);
    }
}
