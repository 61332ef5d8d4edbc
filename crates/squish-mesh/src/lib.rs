//! # squish-mesh
//!
//! Tetrahedral mesh ingestion for the squish soft-body engine.
//!
//! ## Key Types
//!
//! - [`TetMesh`] — SoA vertex positions plus flat tet/edge/surface index buffers
//! - [`loader`] — the line-oriented tet-mesh text format
//! - [`topology`] — unique-edge and boundary-face extraction
//! - [`generators`] — deterministic procedural meshes for tests and benchmarks

pub mod generators;
pub mod loader;
pub mod mesh;
pub mod topology;

pub use mesh::TetMesh;
