//! Per-vertex normal recomputation.

use nalgebra::{Point3, Vector3};
use rayon::prelude::*;

/// Compute area-weighted vertex normals from a flat triangle index list.
///
/// Each triangle contributes its unnormalized normal `(p1 - p0) x (p2 - p0)`
/// to its three vertices, so larger triangles weigh more. Vertices that no
/// triangle uses keep a zero normal.
///
/// # Panics
/// Panics if an index is not smaller than `positions.len()`. Index lists
/// held by [`TriMesh`](crate::mesh::TriMesh) are checked on construction.
pub fn compute_vertex_normals(
    positions: &[Point3<f64>],
    indices: &[usize],
    parallel: bool,
) -> Vec<Vector3<f64>> {
    let face_normal = |t: &[usize]| -> Vector3<f64> {
        let p0 = &positions[t[0]];
        let e1 = positions[t[1]] - p0;
        let e2 = positions[t[2]] - p0;
        e1.cross(&e2)
    };

    if parallel {
        // Gather: each vertex sums the faces around it
        let mut vertex_faces: Vec<Vec<usize>> = vec![Vec::new(); positions.len()];
        for (face_idx, face) in indices.chunks_exact(3).enumerate() {
            for &v in face {
                vertex_faces[v].push(face_idx);
            }
        }

        vertex_faces
            .par_iter()
            .map(|faces| {
                let normal: Vector3<f64> = faces
                    .iter()
                    .map(|&f| face_normal(&indices[f * 3..f * 3 + 3]))
                    .sum();
                normalize_or_zero(normal)
            })
            .collect()
    } else {
        // Scatter face normals to vertices
        let mut normals: Vec<Vector3<f64>> = vec![Vector3::zeros(); positions.len()];

        for face in indices.chunks_exact(3) {
            let n = face_normal(face);
            normals[face[0]] += n;
            normals[face[1]] += n;
            normals[face[2]] += n;
        }

        for n in &mut normals {
            *n = normalize_or_zero(*n);
        }

        normals
    }
}

#[inline]
fn normalize_or_zero(n: Vector3<f64>) -> Vector3<f64> {
    let len = n.norm();
    if len > 0.0 {
        n / len
    } else {
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tetrahedron() -> (Vec<Point3<f64>>, Vec<usize>) {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, 0.5, 1.0),
        ];
        let indices = vec![0, 2, 1, 0, 1, 3, 1, 2, 3, 2, 0, 3];
        (positions, indices)
    }

    #[test]
    fn test_unit_length() {
        let (positions, indices) = tetrahedron();
        let normals = compute_vertex_normals(&positions, &indices, false);
        assert_eq!(normals.len(), 4);
        for n in &normals {
            assert!((n.norm() - 1.0).abs() < 1e-10);
        }

        // Apex normal points up and out
        assert!(normals[3].z > 0.0);
        // Base vertices lean downwards
        assert!(normals[0].z < 0.0);
    }

    #[test]
    fn test_unused_vertex_is_zero() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(5.0, 5.0, 5.0),
        ];
        let normals = compute_vertex_normals(&positions, &[0, 1, 2], false);
        assert_eq!(normals[3], Vector3::zeros());
        assert!((normals[0] - Vector3::z()).norm() < 1e-12);
    }

    #[test]
    fn test_area_weighting() {
        // A large triangle in the xy-plane and a small one in the xz-plane share vertex 0
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(0.0, 10.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(-1.0, 0.0, 0.0),
        ];
        let indices = vec![0, 1, 2, 0, 3, 4];
        let normals = compute_vertex_normals(&positions, &indices, false);
        assert!(normals[0].z > normals[0].y.abs());
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_index_panics() {
        let (positions, _) = tetrahedron();
        compute_vertex_normals(&positions, &[0, 1, 4], false);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let (positions, indices) = tetrahedron();
        let seq = compute_vertex_normals(&positions, &indices, false);
        let par = compute_vertex_normals(&positions, &indices, true);
        for (a, b) in seq.iter().zip(&par) {
            assert!((a - b).norm() < 1e-12);
        }
    }
}
