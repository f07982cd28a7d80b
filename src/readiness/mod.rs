//! Readiness scoring: CI confidence, blockers/warnings, and the final verdict.

pub mod ci;
pub mod record;
pub mod rules;
pub mod scorer;
pub mod weights;

pub use ci::ci_confidence;
pub use record::{ReadinessRecord, RecordError};
pub use rules::{collect_blockers, collect_warnings, recommendations, Blocker, Warning};
pub use scorer::{assess, evaluate, Classification, ReadinessResult};
pub use weights::ScoreWeights;
