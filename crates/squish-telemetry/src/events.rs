//! Simulation event types.
//!
//! Structured events emitted by the simulation at various points in
//! each frame. Events are lightweight value types that carry just
//! enough data to be useful for monitoring and debugging.

use serde::{Deserialize, Serialize};

/// A simulation event emitted by the engine.
///
/// Events are tagged with a frame index and carry domain-specific data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Frame number (0-indexed).
    pub frame: u32,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventKind {
    /// Frame step started.
    StepBegin {
        /// Target simulation time for this frame (seconds).
        sim_time: f64,
    },

    /// Frame step completed.
    StepEnd {
        /// Wall-clock time for the entire step (seconds).
        wall_time: f64,
        /// Number of sub-steps executed.
        substeps: u32,
    },

    /// Constraint building completed at body initialization.
    ConstraintBuild {
        /// Number of edge (length) constraints.
        edges: u32,
        /// Number of tet (volume) constraints.
        tets: u32,
        /// Tets with non-positive rest volume. These contribute no
        /// inverse mass and no volume resistance.
        degenerate_tets: u32,
    },

    /// Constraint graph coloring completed for one constraint kind.
    Coloring {
        /// Which constraint kind was colored ("edge" or "volume").
        kind: String,
        /// Number of clusters (colors) produced.
        clusters: u32,
        /// Number of constraints partitioned.
        constraints: u32,
    },

    /// Broad-phase overlap test completed for the frame.
    BroadPhase {
        /// Number of static obstacles tested.
        obstacles: u32,
        /// How many obstacle AABBs overlap the body AABB.
        overlapping: u32,
    },

    /// Kinetic energy snapshot at current state.
    Energy {
        /// Kinetic energy (0.5 * m * v^2).
        kinetic: f64,
    },

    /// A non-finite position or velocity was detected post-step.
    Instability {
        /// What was non-finite.
        detail: String,
    },
}

impl SimulationEvent {
    /// Creates a new event for the given frame.
    pub fn new(frame: u32, kind: EventKind) -> Self {
        Self { frame, kind }
    }
}
