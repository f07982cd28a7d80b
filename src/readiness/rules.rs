//! Blocker and warning rules.
//!
//! Blockers and warnings are tagged variants, each carrying its cause data,
//! evaluated in the order they are declared, so the rendered lists (and the
//! recommendations derived from them) always come out in declaration order,
//! blockers before warnings.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::github::{CheckTally, ReviewDecision};
use crate::review::{HealthClassification, ReviewHealth};
use crate::types::{PrSnapshot, PrState};

/// Files-changed count above which a PR is warned as hard to review.
pub const LARGE_PR_FILES: u32 = 30;

/// A condition that makes the PR unsafe to merge.
///
/// Any blocker caps the overall classification at `NEEDS_WORK`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Blocker {
    /// The PR is in draft mode.
    Draft,

    /// CI checks are failing.
    FailingChecks { count: u32 },

    /// The merge base has conflicts.
    MergeConflicts,

    /// The PR was closed without merging.
    Closed,

    /// The PR is already merged.
    AlreadyMerged,

    /// Reviewer feedback has gone unanswered past the staleness threshold.
    StaleFeedback { count: usize },

    /// The author owes a response to an outstanding change request.
    AwaitingAuthorChanges,
}

impl Blocker {
    /// Human-readable description of the blocker.
    pub fn message(&self) -> String {
        match self {
            Blocker::Draft => "PR is in draft mode".to_string(),
            Blocker::FailingChecks { count } => format!("{} CI check(s) failing", count),
            Blocker::MergeConflicts => "PR has merge conflicts".to_string(),
            Blocker::Closed => "PR is closed".to_string(),
            Blocker::AlreadyMerged => "PR is already merged".to_string(),
            Blocker::StaleFeedback { count } => {
                format!("{} piece(s) of stale unaddressed feedback", count)
            }
            Blocker::AwaitingAuthorChanges => {
                "Awaiting author response to requested changes".to_string()
            }
        }
    }

    /// The action that clears this blocker, where one exists.
    pub fn recommendation(&self) -> Option<String> {
        match self {
            Blocker::Draft => Some("Convert to 'Ready for review' when finished".to_string()),
            Blocker::FailingChecks { .. } => {
                Some("Fix failing CI checks before merging".to_string())
            }
            Blocker::MergeConflicts => {
                Some("Resolve merge conflicts with the base branch".to_string())
            }
            Blocker::StaleFeedback { .. } => {
                Some("Review and respond to old comments".to_string())
            }
            Blocker::AwaitingAuthorChanges => {
                Some("Address reviewer comments and push updates".to_string())
            }
            // A closed or merged PR has no path back to mergeable.
            Blocker::Closed | Blocker::AlreadyMerged => None,
        }
    }
}

impl fmt::Display for Blocker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// A condition worth flagging that does not by itself block a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// Review conversation threads are unresolved.
    UnresolvedConversations { count: u32 },

    /// The PR touches many files.
    LargeChangeset { files: u32 },

    /// Some CI checks were skipped.
    SkippedChecks { count: u32 },

    /// No review activity yet.
    NoReviewActivity,

    /// The author has answered; reviewer approval is outstanding.
    AwaitingReviewerApproval,

    /// GitHub reports the PR blocked by required checks or reviews.
    MergeBlocked,
}

impl Warning {
    /// Human-readable description of the warning.
    pub fn message(&self) -> String {
        match self {
            Warning::UnresolvedConversations { count } => {
                format!("{} open conversation(s) unresolved", count)
            }
            Warning::LargeChangeset { files } => format!("Large PR ({} files changed)", files),
            Warning::SkippedChecks { count } => format!("{} CI check(s) skipped", count),
            Warning::NoReviewActivity => "No review activity yet".to_string(),
            Warning::AwaitingReviewerApproval => "Awaiting reviewer approval".to_string(),
            Warning::MergeBlocked => {
                "PR is blocked by required status checks or reviews".to_string()
            }
        }
    }

    /// The action that clears this warning, where one exists.
    pub fn recommendation(&self) -> Option<String> {
        match self {
            Warning::UnresolvedConversations { .. } => {
                Some("Resolve open review conversations before merging".to_string())
            }
            Warning::LargeChangeset { .. } => {
                Some("Consider splitting into smaller PRs for easier review".to_string())
            }
            Warning::NoReviewActivity => Some("Request reviews from maintainers".to_string()),
            Warning::AwaitingReviewerApproval => {
                Some("Ping reviewers or request re-review".to_string())
            }
            Warning::SkippedChecks { .. } | Warning::MergeBlocked => None,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Evaluates every blocker rule, in declaration order.
///
/// Rules are non-exclusive: every condition that holds contributes a blocker.
pub fn collect_blockers(
    snapshot: &PrSnapshot,
    checks: &CheckTally,
    health: &ReviewHealth,
    decision: ReviewDecision,
) -> Vec<Blocker> {
    let mut blockers = Vec::new();

    if snapshot.is_draft {
        blockers.push(Blocker::Draft);
    }
    if checks.failed > 0 {
        blockers.push(Blocker::FailingChecks {
            count: checks.failed,
        });
    }
    if snapshot.mergeable_state.has_conflicts() {
        blockers.push(Blocker::MergeConflicts);
    }
    match snapshot.state {
        PrState::Closed => blockers.push(Blocker::Closed),
        PrState::Merged => blockers.push(Blocker::AlreadyMerged),
        PrState::Open => {}
    }
    if !health.stale_feedback.is_empty() {
        blockers.push(Blocker::StaleFeedback {
            count: health.stale_feedback.len(),
        });
    }
    if health.classification == HealthClassification::AwaitingAuthor
        && decision == ReviewDecision::ChangesRequested
    {
        blockers.push(Blocker::AwaitingAuthorChanges);
    }

    blockers
}

/// Evaluates every warning rule, in declaration order.
pub fn collect_warnings(
    snapshot: &PrSnapshot,
    checks: &CheckTally,
    health: &ReviewHealth,
) -> Vec<Warning> {
    let mut warnings = Vec::new();

    if snapshot.open_conversations_count > 0 {
        warnings.push(Warning::UnresolvedConversations {
            count: snapshot.open_conversations_count,
        });
    }
    if snapshot.files_changed > LARGE_PR_FILES {
        warnings.push(Warning::LargeChangeset {
            files: snapshot.files_changed,
        });
    }
    if checks.skipped > 0 {
        warnings.push(Warning::SkippedChecks {
            count: checks.skipped,
        });
    }
    if health.classification == HealthClassification::NoActivity {
        warnings.push(Warning::NoReviewActivity);
    }
    if health.classification == HealthClassification::AwaitingReviewer {
        warnings.push(Warning::AwaitingReviewerApproval);
    }
    if snapshot.mergeable_state.is_blocked() {
        warnings.push(Warning::MergeBlocked);
    }

    warnings
}

/// Derives the recommendation list: blockers first, then warnings, each in
/// rule order. Deterministic for a given blocker/warning set.
pub fn recommendations(blockers: &[Blocker], warnings: &[Warning]) -> Vec<String> {
    blockers
        .iter()
        .filter_map(Blocker::recommendation)
        .chain(warnings.iter().filter_map(Warning::recommendation))
        .collect()
}
