//! # squish-solver
//!
//! The XPBD core: constraint building, parallel-safety scheduling,
//! and the sub-stepping solver.
//!
//! ## Key Types
//!
//! - [`XpbdSolver`] — owns particle state and drives the per-frame pipeline
//! - [`ParticleState`] — SoA buffers for positions, velocities, inverse masses
//! - [`ConstraintSet`] — length and volume constraints with rest-state parameters
//! - [`ClusterSet`] — conflict-free constraint clusters from graph coloring
//! - [`SolverConfig`] — sub-step count, compliances, gravity, damping
//!
//! ## Pipeline
//!
//! Each frame runs `n_substeps` iterations of
//! integrate → solve edge clusters → solve volume clusters →
//! external corrections → velocity update. Within a cluster no two
//! constraints share a particle, so cluster members may be projected
//! in parallel; clusters themselves run strictly in ascending color
//! order.

pub mod coloring;
pub mod config;
pub mod constraint;
pub mod dispatch;
pub mod state;
pub mod xpbd;

pub use coloring::ClusterSet;
pub use config::SolverConfig;
pub use constraint::{ConstraintSet, LengthConstraint, VolumeConstraint};
pub use state::ParticleState;
pub use xpbd::{CorrectionPass, StepResult, XpbdSolver};
