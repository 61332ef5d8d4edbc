//! Integration tests for squish-mesh.

use squish_mesh::generators::{single_tet, tet_bar, tet_grid, two_tets};
use squish_mesh::loader::parse_tet_mesh;
use squish_mesh::topology::{surface_triangles, unique_edges};
use squish_mesh::TetMesh;

/// Signed volume of tet `t`, matching the solver's convention.
fn signed_volume(mesh: &TetMesh, t: usize) -> f32 {
    let [a, b, c, d] = mesh.tet(t);
    let p0 = mesh.position_vec3(a as usize);
    let e1 = mesh.position_vec3(b as usize) - p0;
    let e2 = mesh.position_vec3(c as usize) - p0;
    let e3 = mesh.position_vec3(d as usize) - p0;
    e1.cross(e2).dot(e3) / 6.0
}

// ─── TetMesh Tests ────────────────────────────────────────────

#[test]
fn mesh_counts() {
    let mesh = single_tet();
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.tet_count(), 1);
    assert_eq!(mesh.edge_count(), 6);
    assert_eq!(mesh.surface_triangle_count(), 4);
}

#[test]
fn mesh_validate_ok() {
    single_tet().validate().unwrap();
    two_tets().validate().unwrap();
    tet_bar(3).validate().unwrap();
}

#[test]
fn mesh_validate_rejects_out_of_range_index() {
    let mut mesh = single_tet();
    mesh.tet_indices[0] = 99;
    assert!(mesh.validate().is_err());
}

#[test]
fn mesh_validate_rejects_repeated_edge_vertex() {
    let mut mesh = single_tet();
    mesh.edge_indices[1] = mesh.edge_indices[0];
    assert!(mesh.validate().is_err());
}

#[test]
fn mesh_validate_rejects_inconsistent_soa() {
    let mut mesh = single_tet();
    mesh.pos_y.pop();
    assert!(mesh.validate().is_err());
}

#[test]
fn mesh_from_interleaved_round_trip() {
    let src = two_tets();
    let mut positions = Vec::new();
    for i in 0..src.vertex_count() {
        positions.extend_from_slice(&src.position(i));
    }
    let mesh = TetMesh::from_interleaved(
        &positions,
        &src.tet_indices,
        &src.edge_indices,
        &src.surface_indices,
    )
    .unwrap();
    assert_eq!(mesh.vertex_count(), src.vertex_count());
    assert_eq!(mesh.position(4), src.position(4));
}

#[test]
fn mesh_apply_transform_translates() {
    let mut mesh = single_tet();
    let m = glam::Mat4::from_translation(glam::Vec3::new(0.0, 2.0, 0.0));
    mesh.apply_transform(&m);
    assert!((mesh.pos_y[0] - 2.0).abs() < 1e-6);
    assert!((mesh.pos_y[2] - 3.0).abs() < 1e-6);
}

// ─── Loader Tests ─────────────────────────────────────────────

/// Serializes a mesh into the line-oriented text format.
fn to_text(mesh: &TetMesh) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", mesh.vertex_count()));
    out.push_str(&format!("{}\n", mesh.tet_count()));
    out.push_str(&format!("{}\n", mesh.edge_count()));
    out.push_str(&format!("{}\n", mesh.surface_triangle_count()));
    for i in 0..mesh.vertex_count() {
        let [x, y, z] = mesh.position(i);
        out.push_str(&format!("{}\n{}\n{}\n", x, y, z));
    }
    for &i in &mesh.tet_indices {
        out.push_str(&format!("{}\n", i));
    }
    for &i in &mesh.edge_indices {
        out.push_str(&format!("{}\n", i));
    }
    for &i in &mesh.surface_indices {
        out.push_str(&format!("{}\n", i));
    }
    out
}

#[test]
fn loader_round_trip() {
    let src = tet_bar(2);
    let mesh = parse_tet_mesh(&to_text(&src)).unwrap();
    assert_eq!(mesh.vertex_count(), src.vertex_count());
    assert_eq!(mesh.tet_indices, src.tet_indices);
    assert_eq!(mesh.edge_indices, src.edge_indices);
    assert_eq!(mesh.surface_indices, src.surface_indices);
}

#[test]
fn loader_accepts_crlf() {
    let text = to_text(&single_tet()).replace('\n', "\r\n");
    let mesh = parse_tet_mesh(&text).unwrap();
    assert_eq!(mesh.vertex_count(), 4);
}

#[test]
fn loader_rejects_truncated_file() {
    let text = to_text(&single_tet());
    let truncated = &text[..text.len() / 2];
    assert!(parse_tet_mesh(truncated).is_err());
}

#[test]
fn loader_rejects_garbage_value() {
    // First line is the vertex count "4"
    let text = to_text(&single_tet()).replacen('4', "banana", 1);
    let err = parse_tet_mesh(&text).unwrap_err();
    assert!(err.to_string().contains("Line 1"), "got: {err}");
}

// ─── Topology Tests ───────────────────────────────────────────

#[test]
fn topology_single_tet_edges() {
    let edges = unique_edges(&[0, 1, 2, 3]);
    assert_eq!(edges.len(), 12); // 6 edges × 2 indices
}

#[test]
fn topology_shared_edges_deduplicated() {
    // Two tets sharing face (1,2,3): 6 + 6 edges, 3 shared
    let edges = unique_edges(&[0, 1, 2, 3, 1, 2, 3, 4]);
    assert_eq!(edges.len() / 2, 9);
}

#[test]
fn topology_shared_face_is_interior() {
    let surface = surface_triangles(&[0, 1, 2, 3, 1, 2, 3, 4]);
    // 4 + 4 faces, the shared one counted twice and dropped
    assert_eq!(surface.len() / 3, 6);
    // The shared face (1,2,3) must not appear
    for tri in surface.chunks_exact(3) {
        let mut sorted = [tri[0], tri[1], tri[2]];
        sorted.sort_unstable();
        assert_ne!(sorted, [1, 2, 3]);
    }
}

#[test]
fn topology_extraction_is_deterministic() {
    let tets = tet_grid(2, 2, 2, 0.5).tet_indices;
    assert_eq!(unique_edges(&tets), unique_edges(&tets));
    assert_eq!(surface_triangles(&tets), surface_triangles(&tets));
}

// ─── Generator Tests ──────────────────────────────────────────

#[test]
fn generator_grid_counts() {
    let mesh = tet_grid(2, 1, 1, 1.0);
    assert_eq!(mesh.vertex_count(), 3 * 2 * 2);
    assert_eq!(mesh.tet_count(), 2 * 6);
}

#[test]
fn generator_all_tets_positively_oriented() {
    let mesh = tet_grid(2, 2, 2, 0.5);
    for t in 0..mesh.tet_count() {
        let v = signed_volume(&mesh, t);
        assert!(v > 0.0, "Tet {} has non-positive volume {}", t, v);
    }
}

#[test]
fn generator_grid_cell_volumes_sum() {
    // 6 tets per unit cell partition it exactly
    let mesh = tet_bar(1);
    let total: f32 = (0..mesh.tet_count()).map(|t| signed_volume(&mesh, t)).sum();
    assert!((total - 1.0).abs() < 1e-5, "total volume {}", total);
}

#[test]
fn generator_single_tet_volume() {
    let mesh = single_tet();
    assert!((signed_volume(&mesh, 0) - 1.0 / 6.0).abs() < 1e-6);
}
