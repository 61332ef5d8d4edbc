//! # squish-contact
//!
//! Broad-phase collision interface for the squish engine.
//!
//! Once per frame, between completed steps, the broad phase computes
//! the body's axis-aligned bounding box from current particle
//! positions and tests it against every static box obstacle,
//! producing a per-obstacle boolean "potential collision" flag. An
//! external narrow-phase pass consumes the flags and applies position
//! corrections through the solver's correction-pass hook; that
//! resolution math is outside this crate.

pub mod aabb;
pub mod broad;
pub mod obstacle;

pub use aabb::Aabb;
pub use broad::{BoxBroadPhase, BroadPhase, NullBroadPhase};
pub use obstacle::BoxObstacle;
