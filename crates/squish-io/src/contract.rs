//! Simulation input/output contract types.
//!
//! These types define the I/O boundary of the squish engine. They are
//! serializable for API transport and CLI configuration.

use serde::{Deserialize, Serialize};
use squish_mesh::TetMesh;
use squish_solver::SolverConfig;

/// Complete input specification for a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationInput {
    /// The tetrahedral body to simulate.
    pub mesh: TetMesh,

    /// Per-vertex pinning constraints.
    /// `true` = pinned (infinite mass), `false` = free.
    /// Length must equal `mesh.vertex_count()`.
    pub pinned: Vec<bool>,

    /// Simulation parameters.
    pub params: SimulationParams,
}

/// Run-level parameters wrapping the solver configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Total simulation time in seconds.
    pub duration: f32,
    /// Frame timestep in seconds (e.g. 1/60).
    pub frame_dt: f32,
    /// Solver configuration (sub-steps, compliances, gravity).
    pub solver: SolverConfig,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            duration: 2.0,
            frame_dt: squish_types::constants::DEFAULT_FRAME_DT,
            solver: SolverConfig::default(),
        }
    }
}

/// Output from a completed simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationOutput {
    /// Final particle positions, flat interleaved `[x0, y0, z0, ...]`.
    pub positions: Vec<f32>,

    /// Final particle velocities, flat interleaved. Exposed for
    /// diagnostics; nothing internal consumes them.
    pub velocities: Vec<f32>,

    /// Surface triangle indices for rendering the final state.
    pub surface_indices: Vec<u32>,

    /// Simulation-wide metrics.
    pub metrics: SimulationMetrics,
}

/// Aggregate metrics from a simulation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationMetrics {
    /// Number of frames simulated.
    pub frames: u32,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Mean wall-clock time per frame (seconds).
    pub avg_step_time: f64,
    /// Kinetic energy at the final frame.
    pub final_kinetic_energy: f64,
}
