//! Integration tests for squish-io.

use squish_io::contract::{SimulationInput, SimulationParams};
use squish_io::scene::parse_scene;
use squish_io::validator::{validate_input, validate_params};
use squish_mesh::generators::single_tet;

// ─── Scene Format Tests ───────────────────────────────────────

const IDENTITY: &str = "1 0 0 0 0 1 0 0 0 0 1 0 0 0 0 1";

fn scene_text(obstacles: &str, count: usize) -> String {
    format!(
        "{count}\nbunny\n{IDENTITY}\nrubber\n0.5\n0.0\n{obstacles}"
    )
}

#[test]
fn scene_parse_minimal() {
    let text = scene_text("", 0);
    let scene = parse_scene(&text).unwrap();
    assert_eq!(scene.mesh_file, "bunny");
    assert_eq!(scene.material, "rubber");
    assert!((scene.edge_compliance - 0.5).abs() < 1e-6);
    assert_eq!(scene.volume_compliance, 0.0);
    assert!(scene.obstacles.is_empty());
    assert_eq!(scene.transform, glam::Mat4::IDENTITY);
}

#[test]
fn scene_parse_obstacles() {
    let text = scene_text("-5 -1 -5\n5 0 5\n0 0 0\n1 2 3\n", 2);
    let scene = parse_scene(&text).unwrap();
    assert_eq!(scene.obstacles.len(), 2);
    assert_eq!(scene.obstacles[0].aabb.min, glam::Vec3::new(-5.0, -1.0, -5.0));
    assert_eq!(scene.obstacles[1].aabb.max, glam::Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn scene_parse_transform_column_major() {
    // Translation lives in the last column
    let text = "0\nbunny\n1 0 0 0 0 1 0 0 0 0 1 0 3 4 5 1\nrubber\n0\n0\n";
    let scene = parse_scene(text).unwrap();
    let p = scene.transform.transform_point3(glam::Vec3::ZERO);
    assert_eq!(p, glam::Vec3::new(3.0, 4.0, 5.0));
}

#[test]
fn scene_rejects_missing_obstacles() {
    // Declares 2 obstacles, provides 1
    let text = scene_text("-1 -1 -1\n1 1 1\n", 2);
    assert!(parse_scene(&text).is_err());
}

#[test]
fn scene_rejects_short_transform() {
    let text = "0\nbunny\n1 0 0 0\nrubber\n0\n0\n";
    assert!(parse_scene(text).is_err());
}

#[test]
fn scene_rejects_inverted_obstacle() {
    let text = scene_text("1 1 1\n0 0 0\n", 1);
    assert!(parse_scene(&text).is_err());
}

#[test]
fn scene_accepts_crlf() {
    let text = scene_text("", 0).replace('\n', "\r\n");
    assert!(parse_scene(&text).is_ok());
}

// ─── Contract Tests ───────────────────────────────────────────

#[test]
fn params_default_are_valid() {
    validate_params(&SimulationParams::default()).unwrap();
}

#[test]
fn params_toml_round_trip() {
    let params = SimulationParams {
        duration: 3.5,
        ..Default::default()
    };
    let text = toml::to_string(&params).unwrap();
    let recovered: SimulationParams = toml::from_str(&text).unwrap();
    assert!((recovered.duration - 3.5).abs() < 1e-6);
    assert_eq!(recovered.solver.n_substeps, params.solver.n_substeps);
}

// ─── Validator Tests ──────────────────────────────────────────

fn valid_input() -> SimulationInput {
    let mesh = single_tet();
    let pinned = vec![false; mesh.vertex_count()];
    SimulationInput {
        mesh,
        pinned,
        params: SimulationParams::default(),
    }
}

#[test]
fn validator_accepts_valid_input() {
    validate_input(&valid_input()).unwrap();
}

#[test]
fn validator_rejects_pinned_length_mismatch() {
    let mut input = valid_input();
    input.pinned.push(true);
    assert!(validate_input(&input).is_err());
}

#[test]
fn validator_rejects_bad_mesh() {
    let mut input = valid_input();
    input.mesh.tet_indices[0] = 42;
    assert!(validate_input(&input).is_err());
}

#[test]
fn validator_rejects_non_positive_duration() {
    let mut input = valid_input();
    input.params.duration = 0.0;
    assert!(validate_input(&input).is_err());
}

#[test]
fn validator_rejects_huge_frame_dt() {
    let mut input = valid_input();
    input.params.frame_dt = 2.0;
    assert!(validate_input(&input).is_err());
}

#[test]
fn validator_rejects_invalid_solver_config() {
    let mut input = valid_input();
    input.params.solver.n_substeps = 0;
    assert!(validate_input(&input).is_err());
}
