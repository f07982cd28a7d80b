//! Review feedback-loop analysis and health classification.

pub mod feedback;
pub mod health;

pub use feedback::{
    analyze_feedback, stale_after, FeedbackItem, FeedbackKind, ReviewProgress, STALE_AFTER_HOURS,
};
pub use health::{classify_health, HealthClassification, ReviewHealth};
