//! Integration tests for squish-contact.

use glam::Vec3;
use squish_contact::{Aabb, BoxBroadPhase, BoxObstacle, BroadPhase, NullBroadPhase};
use squish_contact::broad::body_aabb;
use squish_mesh::generators::single_tet;
use squish_solver::ParticleState;

// ─── Aabb Tests ───────────────────────────────────────────────

#[test]
fn aabb_from_points() {
    let aabb = Aabb::from_points(vec![
        Vec3::new(1.0, -2.0, 0.5),
        Vec3::new(-1.0, 3.0, 0.0),
        Vec3::new(0.0, 0.0, 2.0),
    ]);
    assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, 0.0));
    assert_eq!(aabb.max, Vec3::new(1.0, 3.0, 2.0));
}

#[test]
fn aabb_intersects_overlap_and_touch() {
    let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
    let b = Aabb::new(Vec3::splat(0.5), Vec3::splat(1.5));
    let c = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
    let d = Aabb::new(Vec3::splat(2.0), Vec3::splat(3.0));

    assert!(a.intersects(&b));
    assert!(b.intersects(&a));
    assert!(a.intersects(&c), "Touching faces count as overlap");
    assert!(!a.intersects(&d));
}

#[test]
fn aabb_union_and_grow() {
    let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
    let b = Aabb::new(Vec3::splat(2.0), Vec3::splat(3.0));

    let u = a.union(&b);
    assert_eq!(u.min, Vec3::ZERO);
    assert_eq!(u.max, Vec3::splat(3.0));

    let g = a.grow(0.5);
    assert_eq!(g.min, Vec3::splat(-0.5));
    assert_eq!(g.max, Vec3::splat(1.5));
}

#[test]
fn aabb_contains() {
    let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
    assert!(a.contains(Vec3::splat(0.5)));
    assert!(a.contains(Vec3::ONE)); // boundary inclusive
    assert!(!a.contains(Vec3::splat(1.1)));
}

// ─── Broad Phase Tests ────────────────────────────────────────

#[test]
fn body_aabb_bounds_all_particles() {
    let mesh = single_tet();
    let state = ParticleState::from_mesh(&mesh);
    let aabb = body_aabb(&state);
    assert_eq!(aabb.min, Vec3::ZERO);
    assert_eq!(aabb.max, Vec3::ONE);
}

#[test]
fn broad_phase_flags_overlapping_obstacles() {
    let mesh = single_tet(); // body spans [0,1]³
    let state = ParticleState::from_mesh(&mesh);

    let obstacles = vec![
        BoxObstacle::new(Vec3::splat(0.5), Vec3::splat(2.0)), // overlaps
        BoxObstacle::new(Vec3::splat(5.0), Vec3::splat(6.0)), // far away
        BoxObstacle::new(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 1.0)), // touching
    ];
    let mut broad = BoxBroadPhase::new(obstacles);
    broad.update(&state);

    assert_eq!(broad.flags(), &[true, false, true]);
    assert_eq!(broad.overlap_count(), 2);
}

#[test]
fn broad_phase_tracks_body_motion() {
    let mesh = single_tet();
    let mut state = ParticleState::from_mesh(&mesh);

    let obstacles = vec![BoxObstacle::new(Vec3::splat(4.9), Vec3::splat(6.0))];
    let mut broad = BoxBroadPhase::new(obstacles);

    broad.update(&state);
    assert_eq!(broad.flags(), &[false]);

    // Move the body next to the obstacle
    for x in state.pos_x.iter_mut() {
        *x += 4.0;
    }
    for y in state.pos_y.iter_mut() {
        *y += 4.0;
    }
    for z in state.pos_z.iter_mut() {
        *z += 4.0;
    }
    broad.update(&state);
    assert_eq!(broad.flags(), &[true]);
}

#[test]
fn broad_phase_margin_widens_bounds() {
    let mesh = single_tet();
    let state = ParticleState::from_mesh(&mesh);

    // Obstacle 0.05 away from the body
    let obstacles = vec![BoxObstacle::new(
        Vec3::new(1.05, 0.0, 0.0),
        Vec3::new(2.0, 1.0, 1.0),
    )];

    let mut tight = BoxBroadPhase::new(obstacles.clone());
    tight.update(&state);
    assert_eq!(tight.flags(), &[false]);

    let mut wide = BoxBroadPhase::new(obstacles).with_margin(0.1);
    wide.update(&state);
    assert_eq!(wide.flags(), &[true]);
}

#[test]
fn null_broad_phase_has_no_flags() {
    let mesh = single_tet();
    let state = ParticleState::from_mesh(&mesh);
    let mut broad = NullBroadPhase::new();
    broad.update(&state);
    assert!(broad.flags().is_empty());
    assert_eq!(broad.bounds().min, Vec3::ZERO);
}
