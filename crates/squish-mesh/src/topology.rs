//! Tetrahedral topology queries.
//!
//! Derives unique edges and boundary faces from the tet index buffer.
//! External assets normally ship both, but procedurally generated
//! meshes (and assets that predate the edge list) derive them here.
//!
//! Extraction order is deterministic: first-encounter order over the
//! tet buffer, so identical input yields identical output buffers.

use std::collections::{HashMap, HashSet};

/// The six edges of a tetrahedron, as local vertex-index pairs.
const TET_EDGES: [[usize; 2]; 6] = [[0, 1], [0, 2], [0, 3], [1, 2], [1, 3], [2, 3]];

/// The four faces of a tetrahedron, as local vertex-index triples.
/// Winding is outward for a positively oriented tet.
const TET_FACES: [[usize; 3]; 4] = [[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]];

/// Extracts the unique undirected edges referenced by a flat tet
/// index buffer, as a flat `[v0, v1, ...]` buffer.
///
/// Each edge appears once, in first-encounter order; the pair is
/// stored `(min, max)`.
pub fn unique_edges(tet_indices: &[u32]) -> Vec<u32> {
    let mut seen: HashSet<(u32, u32)> = HashSet::new();
    let mut edges = Vec::new();

    for tet in tet_indices.chunks_exact(4) {
        for [a, b] in TET_EDGES {
            let (v0, v1) = if tet[a] < tet[b] {
                (tet[a], tet[b])
            } else {
                (tet[b], tet[a])
            };
            if seen.insert((v0, v1)) {
                edges.push(v0);
                edges.push(v1);
            }
        }
    }

    edges
}

/// Extracts the boundary (surface) triangles of a tet mesh, as a flat
/// `[v0, v1, v2, ...]` buffer.
///
/// A face is on the surface iff exactly one tetrahedron references it.
/// The winding of the owning tet's face is preserved so surface
/// normals point outward for positively oriented tets.
pub fn surface_triangles(tet_indices: &[u32]) -> Vec<u32> {
    // Canonical (sorted) key → (occurrence count, original winding)
    let mut faces: HashMap<[u32; 3], (u32, [u32; 3])> = HashMap::new();
    let mut order: Vec<[u32; 3]> = Vec::new();

    for tet in tet_indices.chunks_exact(4) {
        for [a, b, c] in TET_FACES {
            let winding = [tet[a], tet[b], tet[c]];
            let mut key = winding;
            key.sort_unstable();

            match faces.get_mut(&key) {
                Some(entry) => entry.0 += 1,
                None => {
                    faces.insert(key, (1, winding));
                    order.push(key);
                }
            }
        }
    }

    let mut surface = Vec::new();
    for key in order {
        let (count, winding) = faces[&key];
        if count == 1 {
            surface.extend_from_slice(&winding);
        }
    }

    surface
}
