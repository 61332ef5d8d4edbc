//! XPBD sub-stepping solver.
//!
//! Drives the per-frame pipeline over one body's particle state:
//!
//! ```text
//! for each of n_substeps:
//!     integrate                    (all particles, data-parallel)
//!     solve edge clusters          (clusters sequential, members parallel)
//!     solve volume clusters        (clusters sequential, members parallel)
//!     external correction pass     (separate pass, never inside clusters)
//!     velocity update              (all particles, data-parallel)
//! ```
//!
//! Per-constraint Lagrange multipliers accumulate across the frame's
//! sub-steps and reset at the start of the next frame; this is what
//! keeps effective stiffness independent of the sub-step count.
//! A step is atomic: it either completes all sub-steps, or the
//! post-step finiteness scan fails and the solver refuses further
//! work until the fault is cleared.

use std::time::Instant;

use squish_mesh::TetMesh;
use squish_types::constants::DEGENERATE_LENGTH;
use squish_types::{SquishError, SquishResult};

use crate::coloring::ClusterSet;
use crate::config::SolverConfig;
use crate::constraint::{signed_volume, ConstraintSet, LengthConstraint, VolumeConstraint};
use crate::dispatch::{self, ParticleView, SharedSliceMut};
use crate::state::ParticleState;

/// Externally supplied position corrections, run between sub-steps.
///
/// Corrections (e.g. the narrow-phase collision projection) execute as
/// their own pass after the constraint clusters, never scheduled
/// inside them, so the clustering invariants are unaffected.
pub trait CorrectionPass: Send {
    /// Applies position corrections to the state for one sub-step.
    fn apply(&mut self, state: &mut ParticleState, sdt: f32);

    /// Returns a human-readable name for diagnostics.
    fn name(&self) -> &str;
}

/// Result of one completed frame step.
#[derive(Debug, Clone)]
pub struct StepResult {
    /// Number of sub-steps executed.
    pub substeps: u32,
    /// Wall-clock time for the step (seconds).
    pub wall_time: f64,
    /// Kinetic energy after the step.
    pub kinetic_energy: f64,
}

/// XPBD solver for one deformable body.
///
/// Owns the particle buffer exclusively; readers observe it between
/// completed frames through [`XpbdSolver::state`]. All cluster layout
/// and constraint data is per-instance — two bodies share nothing.
pub struct XpbdSolver {
    state: ParticleState,
    constraints: ConstraintSet,
    edge_clusters: ClusterSet,
    volume_clusters: ClusterSet,
    /// Accumulated multipliers, one per length constraint.
    edge_lambda: Vec<f32>,
    /// Accumulated multipliers, one per volume constraint.
    volume_lambda: Vec<f32>,
    config: SolverConfig,
    correction: Option<Box<dyn CorrectionPass>>,
    frame: u32,
    poisoned: bool,
}

impl XpbdSolver {
    /// Builds a solver from a tetrahedral mesh.
    ///
    /// Validates the mesh and config, builds constraints (accumulating
    /// inverse mass), and colors both conflict graphs. Fatal on any
    /// mesh or config defect; no partial body is constructed.
    pub fn from_mesh(mesh: &TetMesh, config: SolverConfig) -> SquishResult<Self> {
        config.validate()?;
        mesh.validate()?;

        let mut state = ParticleState::from_mesh(mesh);
        let constraints = ConstraintSet::build(mesh, &mut state)?;

        let edge_clusters = ClusterSet::build(&constraints.lengths, state.particle_count);
        let volume_clusters = ClusterSet::build(&constraints.volumes, state.particle_count);

        let edge_lambda = vec![0.0; constraints.lengths.len()];
        let volume_lambda = vec![0.0; constraints.volumes.len()];

        Ok(Self {
            state,
            constraints,
            edge_clusters,
            volume_clusters,
            edge_lambda,
            volume_lambda,
            config,
            correction: None,
            frame: 0,
            poisoned: false,
        })
    }

    /// Advances the simulation by one frame of `frame_dt` seconds.
    pub fn step(&mut self, frame_dt: f32) -> SquishResult<StepResult> {
        if self.poisoned {
            return Err(SquishError::InvalidConfig(
                "Solver halted after numeric instability; clear_fault() to resume".into(),
            ));
        }
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return Err(SquishError::InvalidConfig(format!(
                "Frame delta time must be positive and finite, got {}",
                frame_dt
            )));
        }

        let start = Instant::now();
        let sdt = frame_dt / self.config.n_substeps as f32;
        let gravity = self.config.gravity_vec();

        // Multipliers accumulate across this frame's sub-steps only
        self.edge_lambda.fill(0.0);
        self.volume_lambda.fill(0.0);

        for _ in 0..self.config.n_substeps {
            self.state.integrate(sdt, gravity);
            self.solve_edge_clusters(sdt);
            self.solve_volume_clusters(sdt);
            if let Some(pass) = self.correction.as_mut() {
                pass.apply(&mut self.state, sdt);
            }
            self.state.update_velocities(sdt);
            if self.config.damping > 0.0 {
                self.state.damp_velocities(self.config.damping);
            }
        }

        if let Some(detail) = self.state.find_non_finite() {
            self.poisoned = true;
            return Err(SquishError::NumericInstability {
                frame: self.frame,
                detail,
            });
        }

        self.frame += 1;
        Ok(StepResult {
            substeps: self.config.n_substeps,
            wall_time: start.elapsed().as_secs_f64(),
            kinetic_energy: self.state.kinetic_energy(),
        })
    }

    fn solve_edge_clusters(&mut self, sdt: f32) {
        let alpha_tilde = self.config.edge_compliance / (sdt * sdt);

        let Self {
            state,
            constraints,
            edge_clusters,
            edge_lambda,
            ..
        } = self;

        let view = ParticleView::new(&mut state.pos_x, &mut state.pos_y, &mut state.pos_z);
        let inv_mass = state.inv_mass.as_slice();
        let lambda = SharedSliceMut::new(edge_lambda.as_mut_slice());
        let lengths = constraints.lengths.as_slice();

        for cluster in edge_clusters.clusters() {
            dispatch::run_cluster(cluster, |ci| {
                // SAFETY: within one cluster no two constraints share
                // a particle, and each lane owns exactly one
                // constraint, so particle and multiplier accesses are
                // disjoint across lanes.
                unsafe { project_length(&lengths[ci], view, inv_mass, lambda, ci, alpha_tilde) };
            });
        }
    }

    fn solve_volume_clusters(&mut self, sdt: f32) {
        let alpha_tilde = self.config.volume_compliance / (sdt * sdt);

        let Self {
            state,
            constraints,
            volume_clusters,
            volume_lambda,
            ..
        } = self;

        let view = ParticleView::new(&mut state.pos_x, &mut state.pos_y, &mut state.pos_z);
        let inv_mass = state.inv_mass.as_slice();
        let lambda = SharedSliceMut::new(volume_lambda.as_mut_slice());
        let volumes = constraints.volumes.as_slice();

        for cluster in volume_clusters.clusters() {
            dispatch::run_cluster(cluster, |ci| {
                // SAFETY: same disjointness argument as the edge pass.
                unsafe { project_volume(&volumes[ci], view, inv_mass, lambda, ci, alpha_tilde) };
            });
        }
    }

    /// Installs a correction pass, run after the constraint clusters
    /// in every sub-step.
    pub fn set_correction_pass(&mut self, pass: Box<dyn CorrectionPass>) {
        self.correction = Some(pass);
    }

    /// Removes the installed correction pass.
    pub fn clear_correction_pass(&mut self) {
        self.correction = None;
    }

    /// Read access to the particle state, for rendering and the
    /// broad phase. Only meaningful between completed frames.
    pub fn state(&self) -> &ParticleState {
        &self.state
    }

    /// Mutable access to the particle state, for external resets
    /// between frames. Never call during a step.
    pub fn state_mut(&mut self) -> &mut ParticleState {
        &mut self.state
    }

    /// The constraints this solver projects.
    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    /// Cluster layout of the edge constraints.
    pub fn edge_clusters(&self) -> &ClusterSet {
        &self.edge_clusters
    }

    /// Cluster layout of the volume constraints.
    pub fn volume_clusters(&self) -> &ClusterSet {
        &self.volume_clusters
    }

    /// The active configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Number of completed frames.
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// True if a numeric fault has halted this solver.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Clears a numeric fault. The caller is responsible for having
    /// repaired the state (e.g. via [`XpbdSolver::state_mut`]) first.
    pub fn clear_fault(&mut self) {
        self.poisoned = false;
    }
}

/// Projects one length constraint.
///
/// # Safety
/// `ci` must index `lambda`, the constraint's particles must be in
/// bounds of the view, and no other lane of the running batch may
/// touch the same particles or multiplier slot.
unsafe fn project_length(
    c: &LengthConstraint,
    pos: ParticleView<'_>,
    inv_mass: &[f32],
    lambda: SharedSliceMut<'_, f32>,
    ci: usize,
    alpha_tilde: f32,
) {
    let i1 = c.p1 as usize;
    let i2 = c.p2 as usize;
    let w1 = inv_mass[i1];
    let w2 = inv_mass[i2];

    let denom = w1 + w2 + alpha_tilde;
    if denom <= 0.0 {
        // Both endpoints pinned and the constraint rigid
        return;
    }

    let x1 = pos.get(i1);
    let x2 = pos.get(i2);
    let d = x2 - x1;
    let len = d.length();
    if len <= DEGENERATE_LENGTH {
        // Correction direction undefined
        return;
    }

    let c_val = len - c.rest_length;
    let lam = lambda.get(ci);
    let d_lam = (-c_val - alpha_tilde * lam) / denom;
    lambda.set(ci, lam + d_lam);

    // Pinned endpoints are never written, not even with a zero delta
    let dir = d / len;
    if w1 > 0.0 {
        pos.add(i1, dir * (-w1 * d_lam));
    }
    if w2 > 0.0 {
        pos.add(i2, dir * (w2 * d_lam));
    }
}

/// Projects one volume constraint.
///
/// Gradients are the cross products of the two edges opposite each
/// vertex, scaled by 1/6 to match the signed-volume convention.
///
/// # Safety
/// Same contract as [`project_length`].
unsafe fn project_volume(
    c: &VolumeConstraint,
    pos: ParticleView<'_>,
    inv_mass: &[f32],
    lambda: SharedSliceMut<'_, f32>,
    ci: usize,
    alpha_tilde: f32,
) {
    if c.rest_volume <= 0.0 {
        // Degenerate tet: no volume resistance
        return;
    }

    let [p1, p2, p3, p4] = c.particles;
    let i1 = p1 as usize;
    let i2 = p2 as usize;
    let i3 = p3 as usize;
    let i4 = p4 as usize;

    let x1 = pos.get(i1);
    let x2 = pos.get(i2);
    let x3 = pos.get(i3);
    let x4 = pos.get(i4);

    let g1 = (x4 - x2).cross(x3 - x2) / 6.0;
    let g2 = (x3 - x1).cross(x4 - x1) / 6.0;
    let g3 = (x4 - x1).cross(x2 - x1) / 6.0;
    let g4 = (x2 - x1).cross(x3 - x1) / 6.0;

    let w1 = inv_mass[i1];
    let w2 = inv_mass[i2];
    let w3 = inv_mass[i3];
    let w4 = inv_mass[i4];

    let w = w1 * g1.length_squared()
        + w2 * g2.length_squared()
        + w3 * g3.length_squared()
        + w4 * g4.length_squared();

    let denom = w + alpha_tilde;
    if denom <= 0.0 {
        return;
    }

    let c_val = signed_volume(x1, x2, x3, x4) - c.rest_volume;
    let lam = lambda.get(ci);
    let d_lam = (-c_val - alpha_tilde * lam) / denom;
    lambda.set(ci, lam + d_lam);

    if w1 > 0.0 {
        pos.add(i1, g1 * (w1 * d_lam));
    }
    if w2 > 0.0 {
        pos.add(i2, g2 * (w2 * d_lam));
    }
    if w3 > 0.0 {
        pos.add(i3, g3 * (w3 * d_lam));
    }
    if w4 > 0.0 {
        pos.add(i4, g4 * (w4 * d_lam));
    }
}
