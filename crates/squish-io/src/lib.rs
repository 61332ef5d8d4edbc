//! # squish-io
//!
//! The I/O boundary of the squish simulation engine: serializable
//! input/output contract types, the scene text format, and input
//! validation.

pub mod contract;
pub mod scene;
pub mod validator;

pub use contract::{SimulationInput, SimulationMetrics, SimulationOutput, SimulationParams};
pub use scene::Scene;
