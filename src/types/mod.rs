//! Core domain types for PR readiness scoring.
//!
//! This module contains the fundamental types used throughout the crate,
//! designed to encode invariants via the type system.

pub mod ids;
pub mod pr;

// Re-export commonly used types at the module level
pub use ids::{CommentId, PrNumber, RepoId, Sha};
pub use pr::{MergeableState, PrSnapshot, PrState};
