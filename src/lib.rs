//! PR readiness scoring core.
//!
//! This library turns already-fetched GitHub pull request state (CI check
//! tallies, reviews, comments, commits, and structural metadata) into a
//! deterministic 0-100 readiness score with a qualitative classification and
//! lists of blockers, warnings, and recommendations.
//!
//! The data flow is strictly sequential for one PR:
//!
//! ```text
//! raw GitHub data -> timeline -> feedback analysis -> review health -> readiness
//! ```
//!
//! Every stage is a pure, synchronous function over in-memory data: no I/O,
//! no hidden state, recomputed from scratch on every call. Fetching from
//! GitHub and persisting results are the embedding service's concern; this
//! crate only defines the shapes it consumes ([`github`]) and produces
//! ([`readiness::ReadinessRecord`]).

pub mod github;
pub mod readiness;
pub mod review;
pub mod sort;
pub mod timeline;
pub mod types;

#[cfg(test)]
pub mod test_utils;

pub use readiness::{assess, Classification, ReadinessResult, ScoreWeights};
pub use review::ReviewHealth;
pub use timeline::build_timeline;
