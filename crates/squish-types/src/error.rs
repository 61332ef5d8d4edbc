//! Error types for the squish engine.
//!
//! All crates return `SquishResult<T>` from fallible operations.
//! Construction-time errors (bad mesh, bad config) are fatal: no
//! partial body is ever built. Per-step numeric faults are surfaced
//! to the caller, who decides whether to reset or halt.

use thiserror::Error;

/// Unified error type for the squish engine.
#[derive(Debug, Error)]
pub enum SquishError {
    /// Mesh data is malformed or degenerate (zero-length edge,
    /// out-of-range index, inconsistent buffer lengths).
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A text asset (tet mesh, scene file) failed to parse.
    #[error("Parse error: {0}")]
    Parse(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A non-finite position or velocity was detected after a step.
    /// The solver refuses further steps until the fault is cleared.
    #[error("Numeric instability in frame {frame}: {detail}")]
    NumericInstability {
        /// Frame index whose step surfaced the fault.
        frame: u32,
        /// What was non-finite.
        detail: String,
    },
}

/// Convenience alias for `Result<T, SquishError>`.
pub type SquishResult<T> = Result<T, SquishError>;
