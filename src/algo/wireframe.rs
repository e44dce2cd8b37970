//! Wireframe (undirected edge) extraction.

use std::collections::HashSet;

/// Extract the deduplicated undirected edges of a flat triangle index list.
///
/// Each edge is reported once as `[min, max]`, in the order it is first
/// encountered while scanning triangles.
pub fn wireframe_edges(indices: &[usize]) -> Vec<[usize; 2]> {
    let mut seen: HashSet<(usize, usize)> = HashSet::with_capacity(indices.len());
    let mut edges = Vec::with_capacity(indices.len() / 2);

    for face in indices.chunks_exact(3) {
        for i in 0..3 {
            let v0 = face[i];
            let v1 = face[(i + 1) % 3];
            let edge = if v0 < v1 { (v0, v1) } else { (v1, v0) };
            if seen.insert(edge) {
                edges.push([edge.0, edge.1]);
            }
        }
    }

    edges
}
