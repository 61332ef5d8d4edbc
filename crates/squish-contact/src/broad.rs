//! Broad phase collision detection.
//!
//! Quickly identifies which static obstacles *could* touch the body
//! this frame. The external narrow phase then refines the flagged
//! candidates into actual position corrections.

use glam::Vec3;
use squish_solver::ParticleState;

use crate::aabb::Aabb;
use crate::obstacle::BoxObstacle;

/// Computes the body's bounding box from current particle positions.
pub fn body_aabb(state: &ParticleState) -> Aabb {
    Aabb::from_points((0..state.particle_count).map(|i| {
        Vec3::new(state.pos_x[i], state.pos_y[i], state.pos_z[i])
    }))
}

/// Trait for broad phase collision detection.
///
/// Implementations cull obstacles that are too far from the body to
/// collide. Call [`BroadPhase::update`] once per frame, between
/// completed steps — never mid-sub-step.
pub trait BroadPhase: Send {
    /// Recomputes the body bounds and per-obstacle flags from current
    /// positions.
    fn update(&mut self, state: &ParticleState);

    /// The body AABB from the last update.
    fn bounds(&self) -> Aabb;

    /// Per-obstacle "potential collision" flags from the last update,
    /// in obstacle order.
    fn flags(&self) -> &[bool];

    /// Returns the broad phase strategy name.
    fn name(&self) -> &str;
}

/// Broad phase over a fixed set of static box obstacles.
pub struct BoxBroadPhase {
    obstacles: Vec<BoxObstacle>,
    flags: Vec<bool>,
    bounds: Aabb,
    /// Margin added to the body bounds before testing.
    margin: f32,
}

impl BoxBroadPhase {
    /// Creates a broad phase for the given obstacles.
    pub fn new(obstacles: Vec<BoxObstacle>) -> Self {
        let n = obstacles.len();
        Self {
            obstacles,
            flags: vec![false; n],
            bounds: Aabb::empty(),
            margin: 0.0,
        }
    }

    /// Sets a safety margin added to the body bounds.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// The obstacles under test.
    pub fn obstacles(&self) -> &[BoxObstacle] {
        &self.obstacles
    }

    /// How many obstacles were flagged in the last update.
    pub fn overlap_count(&self) -> usize {
        self.flags.iter().filter(|&&f| f).count()
    }
}

impl BroadPhase for BoxBroadPhase {
    fn update(&mut self, state: &ParticleState) {
        self.bounds = body_aabb(state).grow(self.margin);
        for (flag, obstacle) in self.flags.iter_mut().zip(&self.obstacles) {
            *flag = self.bounds.intersects(&obstacle.aabb);
        }
    }

    fn bounds(&self) -> Aabb {
        self.bounds
    }

    fn flags(&self) -> &[bool] {
        &self.flags
    }

    fn name(&self) -> &str {
        "box_broad_phase"
    }
}

/// No-op broad phase for scenes without obstacles.
pub struct NullBroadPhase {
    bounds: Aabb,
}

impl NullBroadPhase {
    /// Creates an empty broad phase.
    pub fn new() -> Self {
        Self {
            bounds: Aabb::empty(),
        }
    }
}

impl Default for NullBroadPhase {
    fn default() -> Self {
        Self::new()
    }
}

impl BroadPhase for NullBroadPhase {
    fn update(&mut self, state: &ParticleState) {
        self.bounds = body_aabb(state);
    }

    fn bounds(&self) -> Aabb {
        self.bounds
    }

    fn flags(&self) -> &[bool] {
        &[]
    }

    fn name(&self) -> &str {
        "null_broad_phase"
    }
}
