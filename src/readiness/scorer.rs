//! The readiness scorer: CI + review health + structural state -> verdict.
//!
//! `evaluate` is a pure function with no state across calls: identical inputs
//! always produce identical output. `assess` wires the whole pipeline
//! (timeline -> feedback -> health -> score) for callers holding raw data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::github::{review_decision, CheckTally, RawPrData, ReviewDecision, ReviewState};
use crate::review::{analyze_feedback, classify_health, ReviewHealth};
use crate::timeline::build_timeline;
use crate::types::PrSnapshot;

use super::ci::ci_confidence;
use super::rules::{collect_blockers, collect_warnings, recommendations, Blocker, Warning};
use super::weights::ScoreWeights;

/// Score multiplier when reviewers have requested changes.
const CHANGES_REQUESTED_MULTIPLIER: f64 = 0.5;

/// Score multiplier when the merge base has conflicts.
const MERGE_CONFLICTS_MULTIPLIER: f64 = 0.67;

/// Points deducted per unresolved conversation thread.
const CONVERSATION_PENALTY: f64 = 3.0;

/// Overall readiness classification.
///
/// A pure function of the overall score and the blocker set: score bands
/// 70/60/40 pick the level, and any blocker caps the result at `NeedsWork`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    /// Score >= 70 with no blockers.
    ReadyToMerge,

    /// Score in [60, 70).
    NearlyReady,

    /// Score in [40, 60), or any score with blockers present.
    NeedsWork,

    /// Score below 40.
    NotReady,
}

impl Classification {
    /// Maps a score and the presence of blockers to a classification.
    pub fn from_score(score: u8, has_blockers: bool) -> Self {
        let by_score = match score {
            70..=100 => Classification::ReadyToMerge,
            60..=69 => Classification::NearlyReady,
            40..=59 => Classification::NeedsWork,
            _ => Classification::NotReady,
        };
        if has_blockers {
            // A blocker caps the result at NeedsWork; it never lifts a
            // NotReady score.
            match by_score {
                Classification::ReadyToMerge | Classification::NearlyReady => {
                    Classification::NeedsWork
                }
                other => other,
            }
        } else {
            by_score
        }
    }

    /// Returns the string form used in persisted records ("READY_TO_MERGE", ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::ReadyToMerge => "READY_TO_MERGE",
            Classification::NearlyReady => "NEARLY_READY",
            Classification::NeedsWork => "NEEDS_WORK",
            Classification::NotReady => "NOT_READY",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The computed readiness verdict for one pull request.
///
/// Derived, not authoritative: recomputed from GitHub state on demand, and
/// any persisted copy is a cache invalidated by the next refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessResult {
    /// Composite 0-100 merge-safety estimate.
    pub overall_score: u8,

    /// CI confidence component, 0-100.
    pub ci_score: u8,

    /// Review-health component, 0-100.
    pub review_score: u8,

    /// Overall classification.
    pub classification: Classification,

    /// True exactly when classification is `READY_TO_MERGE`.
    pub merge_ready: bool,

    /// Conditions making the PR unsafe to merge, in rule order.
    pub blockers: Vec<Blocker>,

    /// Conditions worth flagging, in rule order.
    pub warnings: Vec<Warning>,

    /// Actions derived 1:1 from blockers then warnings.
    pub recommendations: Vec<String>,

    /// The review-health assessment the score was built from.
    pub review_health: ReviewHealth,

    /// When this result was computed.
    pub computed_at: DateTime<Utc>,
}

/// Computes the readiness verdict from prepared components.
///
/// Steps, in order:
/// 1. CI confidence from the check tally.
/// 2. Weighted blend with the review-health score.
/// 3. Multipliers, mutually exclusive and in priority order: a draft forces
///    the score to 0 outright; otherwise merge conflicts scale by 0.67;
///    otherwise a standing change request scales by 0.5.
/// 4. Minus 3 points per unresolved conversation, floored at 0.
/// 5. Round and clamp to [0, 100].
/// 6. Blockers, warnings, recommendations; classification; merge_ready.
pub fn evaluate(
    snapshot: &PrSnapshot,
    checks: &CheckTally,
    health: &ReviewHealth,
    decision: ReviewDecision,
    weights: ScoreWeights,
    now: DateTime<Utc>,
) -> ReadinessResult {
    let ci_score = ci_confidence(checks);
    let mut score = weights.blend(ci_score, f64::from(health.score));

    if snapshot.is_draft {
        // Terminal: a draft is not a merge candidate, whatever its CI or
        // reviews say.
        score = 0.0;
    } else if snapshot.mergeable_state.has_conflicts() {
        score *= MERGE_CONFLICTS_MULTIPLIER;
    } else if decision == ReviewDecision::ChangesRequested {
        score *= CHANGES_REQUESTED_MULTIPLIER;
    }

    score -= CONVERSATION_PENALTY * f64::from(snapshot.open_conversations_count);
    let overall_score = score.round().clamp(0.0, 100.0) as u8;

    let blockers = collect_blockers(snapshot, checks, health, decision);
    let warnings = collect_warnings(snapshot, checks, health);
    let recommendations = recommendations(&blockers, &warnings);

    let classification = Classification::from_score(overall_score, !blockers.is_empty());

    ReadinessResult {
        overall_score,
        ci_score: ci_score.round() as u8,
        review_score: health.score,
        merge_ready: classification == Classification::ReadyToMerge,
        classification,
        blockers,
        warnings,
        recommendations,
        review_health: health.clone(),
        computed_at: now,
    }
}

/// Runs the full readiness pipeline on raw PR data.
///
/// Builds the timeline, analyzes feedback loops, classifies review health,
/// and scores readiness - the strictly sequential data flow of the system.
pub fn assess(
    raw: &RawPrData,
    snapshot: &PrSnapshot,
    checks: &CheckTally,
    weights: ScoreWeights,
    now: DateTime<Utc>,
) -> ReadinessResult {
    let timeline = build_timeline(raw);
    let progress = analyze_feedback(&timeline, &snapshot.author_login, now);
    let decision = review_decision(&raw.reviews);
    // Only submitted reviews count as review activity; a pending review is
    // invisible to everyone but its author.
    let submitted_reviews = raw
        .reviews
        .iter()
        .filter(|r| r.state != ReviewState::Pending && r.submitted_at.is_some())
        .count();
    let health = classify_health(&progress, decision, submitted_reviews);
    evaluate(snapshot, checks, &health, decision, weights, now)
}
