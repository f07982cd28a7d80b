//! Blend weighting between CI confidence and review health.

use serde::{Deserialize, Serialize};

/// Weights used to blend the CI score with the review-health score.
///
/// The default split is 45% CI / 55% review.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Weight applied to the CI confidence score.
    pub ci: f64,

    /// Weight applied to the review-health score.
    pub review: f64,
}

impl ScoreWeights {
    pub const fn new(ci: f64, review: f64) -> Self {
        ScoreWeights { ci, review }
    }

    /// Blends the two component scores into one.
    pub fn blend(&self, ci_score: f64, review_score: f64) -> f64 {
        ci_score * self.ci + review_score * self.review
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoreWeights::new(0.45, 0.55)
    }
}
