//! Solver configuration.
//!
//! Parameters that control the sub-stepping pipeline: sub-step count,
//! constraint compliances, gravity, velocity damping.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use squish_types::{SquishError, SquishResult};

/// Configuration for the XPBD solver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Number of sub-steps per frame. Each sub-step runs the full
    /// integrate / solve / velocity-update pipeline at
    /// `sdt = frame_dt / n_substeps`.
    pub n_substeps: u32,

    /// Edge (length) constraint compliance. 0 = perfectly rigid.
    pub edge_compliance: f32,

    /// Tet (volume) constraint compliance. 0 = perfectly rigid.
    pub volume_compliance: f32,

    /// Gravitational acceleration magnitude (m/s²), applied along -Y.
    pub gravity: f32,

    /// Velocity damping factor per sub-step
    /// (0.0 = no damping, 1.0 = full damping).
    pub damping: f32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            n_substeps: squish_types::constants::DEFAULT_SUBSTEPS,
            edge_compliance: 1.0,
            volume_compliance: 0.0,
            gravity: squish_types::constants::GRAVITY,
            damping: 0.0,
        }
    }
}

impl SolverConfig {
    /// Creates a config with both constraint kinds perfectly rigid.
    pub fn rigid() -> Self {
        Self {
            edge_compliance: 0.0,
            volume_compliance: 0.0,
            ..Default::default()
        }
    }

    /// Creates a config with no external forces, for constraint tests.
    pub fn weightless() -> Self {
        Self {
            gravity: 0.0,
            ..Default::default()
        }
    }

    /// Returns the gravity acceleration vector (along -Y).
    pub fn gravity_vec(&self) -> Vec3 {
        Vec3::new(0.0, -self.gravity, 0.0)
    }

    /// Validates parameter ranges.
    pub fn validate(&self) -> SquishResult<()> {
        if self.n_substeps == 0 {
            return Err(SquishError::InvalidConfig(
                "Sub-step count must be >= 1".into(),
            ));
        }
        if !self.edge_compliance.is_finite() || self.edge_compliance < 0.0 {
            return Err(SquishError::InvalidConfig(
                "Edge compliance must be finite and non-negative".into(),
            ));
        }
        if !self.volume_compliance.is_finite() || self.volume_compliance < 0.0 {
            return Err(SquishError::InvalidConfig(
                "Volume compliance must be finite and non-negative".into(),
            ));
        }
        if !self.gravity.is_finite() || self.gravity < 0.0 {
            return Err(SquishError::InvalidConfig(
                "Gravity magnitude must be finite and non-negative".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(SquishError::InvalidConfig(
                "Damping must be within [0, 1]".into(),
            ));
        }
        Ok(())
    }
}
