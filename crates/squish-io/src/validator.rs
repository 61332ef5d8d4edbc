//! Input validation.
//!
//! Validates simulation inputs before the solver receives them,
//! catching data-level errors early with clear diagnostics.

use squish_types::{SquishError, SquishResult};

use crate::contract::{SimulationInput, SimulationParams};

/// Validates a complete simulation input.
///
/// Checks:
/// - Mesh integrity (SoA consistency, valid indices, no repeated
///   vertices within an edge or tet)
/// - Pinning array length matches the mesh
/// - Run and solver parameters are physically reasonable
pub fn validate_input(input: &SimulationInput) -> SquishResult<()> {
    input.mesh.validate()?;

    if input.pinned.len() != input.mesh.vertex_count() {
        return Err(SquishError::InvalidMesh(format!(
            "Pinned array length ({}) != vertex count ({})",
            input.pinned.len(),
            input.mesh.vertex_count()
        )));
    }

    validate_params(&input.params)?;

    Ok(())
}

/// Validates run-level parameters.
pub fn validate_params(params: &SimulationParams) -> SquishResult<()> {
    if params.frame_dt <= 0.0 {
        return Err(SquishError::InvalidConfig(
            "Frame timestep must be positive".into(),
        ));
    }
    if params.frame_dt > 1.0 {
        return Err(SquishError::InvalidConfig(
            "Frame timestep > 1.0 is unreasonably large".into(),
        ));
    }
    if params.duration <= 0.0 {
        return Err(SquishError::InvalidConfig(
            "Duration must be positive".into(),
        ));
    }

    params.solver.validate()
}
