//! # squish-types
//!
//! Shared error types and physical constants for the squish
//! soft-body simulation engine.
//!
//! This crate has zero domain logic — it defines the vocabulary
//! that all other squish crates share.

pub mod constants;
pub mod error;

pub use error::{SquishError, SquishResult};
