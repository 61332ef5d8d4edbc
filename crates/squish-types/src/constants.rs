//! Physical constants and simulation defaults.

/// Gravitational acceleration magnitude (m/s²), applied along -Y.
pub const GRAVITY: f32 = 9.81;

/// Default frame timestep (seconds). 1/60th of a second.
pub const DEFAULT_FRAME_DT: f32 = 1.0 / 60.0;

/// Default number of solver sub-steps per frame.
pub const DEFAULT_SUBSTEPS: u32 = 10;

/// Edge lengths below this are treated as degenerate during
/// constraint projection (the correction direction is undefined).
pub const DEGENERATE_LENGTH: f32 = 1.0e-9;
