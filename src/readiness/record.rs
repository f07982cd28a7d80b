//! Flat record shape consumed by the persistence collaborator.
//!
//! The scorer's typed result is flattened to the relational column set the
//! storage layer upserts: scalar fields plus JSON-encoded arrays for the
//! list-valued columns. The record is a cache of a derived value; the next
//! refresh recomputes and replaces it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::scorer::ReadinessResult;

/// Errors that can occur when flattening a result into a record.
#[derive(Debug, Error)]
pub enum RecordError {
    /// A list-valued column could not be JSON-encoded.
    #[error("failed to encode readiness column as JSON: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One row of readiness columns, ready for upsert.
///
/// Field names mirror the storage schema's column names one to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessRecord {
    pub overall_score: i64,
    pub ci_score: i64,
    pub review_score: i64,
    pub classification: String,
    pub merge_ready: bool,

    /// JSON array of blocker messages.
    pub blockers: String,

    /// JSON array of warning messages.
    pub warnings: String,

    /// JSON array of recommendation strings.
    pub recommendations: String,

    pub review_health_classification: String,
    pub review_health_score: i64,
    pub response_rate: f64,
    pub total_feedback: i64,
    pub responded_feedback: i64,

    /// JSON array of stale feedback items.
    pub stale_feedback: String,

    /// RFC 3339 computation timestamp.
    pub readiness_computed_at: String,
}

impl ReadinessRecord {
    /// Flattens a computed result into its storage row.
    pub fn from_result(result: &ReadinessResult) -> Result<Self, RecordError> {
        let blocker_messages: Vec<String> =
            result.blockers.iter().map(|b| b.message()).collect();
        let warning_messages: Vec<String> =
            result.warnings.iter().map(|w| w.message()).collect();

        Ok(ReadinessRecord {
            overall_score: i64::from(result.overall_score),
            ci_score: i64::from(result.ci_score),
            review_score: i64::from(result.review_score),
            classification: result.classification.as_str().to_string(),
            merge_ready: result.merge_ready,
            blockers: serde_json::to_string(&blocker_messages)?,
            warnings: serde_json::to_string(&warning_messages)?,
            recommendations: serde_json::to_string(&result.recommendations)?,
            review_health_classification: result
                .review_health
                .classification
                .as_str()
                .to_string(),
            review_health_score: i64::from(result.review_health.score),
            response_rate: result.review_health.response_rate,
            total_feedback: result.review_health.total_feedback as i64,
            responded_feedback: result.review_health.responded_feedback as i64,
            stale_feedback: serde_json::to_string(&result.review_health.stale_feedback)?,
            readiness_computed_at: result.computed_at.to_rfc3339(),
        })
    }
}
