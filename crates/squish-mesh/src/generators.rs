//! Procedural tet-mesh generators for benchmarks and testing.
//!
//! All generators are deterministic, produce positively oriented
//! tetrahedra, and derive edge and surface buffers through
//! [`crate::topology`].

use crate::mesh::TetMesh;
use crate::topology;

/// A single positively oriented tetrahedron.
///
/// # Example
/// ```
/// use squish_mesh::generators::single_tet;
/// let mesh = single_tet();
/// assert_eq!(mesh.vertex_count(), 4);
/// assert_eq!(mesh.tet_count(), 1);
/// assert_eq!(mesh.edge_count(), 6);
/// ```
pub fn single_tet() -> TetMesh {
    let mut mesh = TetMesh::with_capacity(4, 1);
    for [x, y, z] in [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
    ] {
        mesh.pos_x.push(x);
        mesh.pos_y.push(y);
        mesh.pos_z.push(z);
    }
    mesh.tet_indices = vec![0, 1, 2, 3];
    mesh.edge_indices = topology::unique_edges(&mesh.tet_indices);
    mesh.surface_indices = topology::surface_triangles(&mesh.tet_indices);
    mesh
}

/// Two positively oriented tetrahedra sharing the face `(1, 2, 3)`.
pub fn two_tets() -> TetMesh {
    let mut mesh = TetMesh::with_capacity(5, 2);
    for [x, y, z] in [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
    ] {
        mesh.pos_x.push(x);
        mesh.pos_y.push(y);
        mesh.pos_z.push(z);
    }
    mesh.tet_indices = vec![0, 1, 2, 3, 1, 2, 3, 4];
    mesh.edge_indices = topology::unique_edges(&mesh.tet_indices);
    mesh.surface_indices = topology::surface_triangles(&mesh.tet_indices);
    mesh
}

/// Axis permutations for the six-tet (Kuhn) cube subdivision, with
/// parity. Odd permutations get two path vertices swapped so every
/// generated tet has positive signed volume.
const KUHN_PATHS: [([usize; 3], bool); 6] = [
    ([0, 1, 2], true),
    ([1, 2, 0], true),
    ([2, 0, 1], true),
    ([0, 2, 1], false),
    ([1, 0, 2], false),
    ([2, 1, 0], false),
];

/// Generates an axis-aligned grid of cubic cells, each subdivided
/// into six tetrahedra, spanning `[0, nx·spacing] × [0, ny·spacing] ×
/// [0, nz·spacing]`.
///
/// # Example
/// ```
/// use squish_mesh::generators::tet_grid;
/// let mesh = tet_grid(2, 1, 1, 1.0);
/// assert_eq!(mesh.vertex_count(), 3 * 2 * 2);
/// assert_eq!(mesh.tet_count(), 2 * 6);
/// ```
pub fn tet_grid(nx: usize, ny: usize, nz: usize, spacing: f32) -> TetMesh {
    let vx = nx + 1;
    let vy = ny + 1;
    let vz = nz + 1;
    let vertex_count = vx * vy * vz;
    let tet_count = nx * ny * nz * 6;

    let mut mesh = TetMesh::with_capacity(vertex_count, tet_count);

    for i in 0..vx {
        for j in 0..vy {
            for k in 0..vz {
                mesh.pos_x.push(i as f32 * spacing);
                mesh.pos_y.push(j as f32 * spacing);
                mesh.pos_z.push(k as f32 * spacing);
            }
        }
    }

    let index = |i: usize, j: usize, k: usize| -> u32 { ((i * vy + j) * vz + k) as u32 };

    for ci in 0..nx {
        for cj in 0..ny {
            for ck in 0..nz {
                for (axes, even) in KUHN_PATHS {
                    // Walk one unit step per axis, corner to corner.
                    let mut corner = [ci, cj, ck];
                    let mut path = [index(ci, cj, ck), 0, 0, 0];
                    for (step, &axis) in axes.iter().enumerate() {
                        corner[axis] += 1;
                        path[step + 1] = index(corner[0], corner[1], corner[2]);
                    }
                    if !even {
                        path.swap(1, 2);
                    }
                    mesh.tet_indices.extend_from_slice(&path);
                }
            }
        }
    }

    mesh.edge_indices = topology::unique_edges(&mesh.tet_indices);
    mesh.surface_indices = topology::surface_triangles(&mesh.tet_indices);
    mesh
}

/// A bar of `segments` cubic cells along X. Convenience wrapper over
/// [`tet_grid`].
pub fn tet_bar(segments: usize) -> TetMesh {
    tet_grid(segments, 1, 1, 1.0)
}
