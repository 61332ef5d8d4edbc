//! # squish-telemetry
//!
//! Simulation telemetry. The engine emits structured events (step
//! timing, energy, constraint-build and coloring summaries, broad-phase
//! counts, numeric faults) which registered sinks turn into tracing
//! output, run statistics, or an in-memory capture for tests.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
