//! Pull request state and metadata types.
//!
//! These types represent the structural state of a pull request as reported by
//! GitHub: open/closed/merged lifecycle, mergeability, and the metadata fields
//! the readiness scorer consumes.

use serde::{Deserialize, Serialize};

use super::ids::PrNumber;

/// The lifecycle state of a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrState {
    /// The PR is open.
    Open,

    /// The PR was closed without merging.
    Closed,

    /// The PR was merged.
    Merged,
}

impl PrState {
    /// Returns true if the PR is open.
    pub fn is_open(&self) -> bool {
        matches!(self, PrState::Open)
    }

    /// Returns true if the PR was merged.
    pub fn is_merged(&self) -> bool {
        matches!(self, PrState::Merged)
    }
}

/// GitHub's reported mergeable state for a pull request.
///
/// This mirrors the REST API's `mergeable_state` field. Values GitHub adds in
/// the future (or values we have never seen) deserialize to `Unknown`, the
/// most conservative non-blocking category: scoring must never fail on an
/// unrecognized state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeableState {
    /// All requirements satisfied - the PR can be merged.
    Clean,

    /// Non-required checks failing - can still merge.
    Unstable,

    /// Required checks not passing or approvals missing.
    Blocked,

    /// Head branch is behind base (strict mode).
    Behind,

    /// Merge conflicts exist.
    Dirty,

    /// The PR is a draft.
    Draft,

    /// State not yet computed by GitHub, or an unrecognized value.
    #[serde(other)]
    Unknown,
}

impl MergeableState {
    /// Returns true if the merge base has conflicts.
    pub fn has_conflicts(&self) -> bool {
        matches!(self, MergeableState::Dirty)
    }

    /// Returns true if GitHub reports the PR blocked by required checks or reviews.
    pub fn is_blocked(&self) -> bool {
        matches!(self, MergeableState::Blocked)
    }
}

/// Structural metadata for one pull request at evaluation time.
///
/// This is the `pr_meta` input to the readiness scorer: everything the scorer
/// needs about the PR beyond its checks, reviews, and comments. The caller is
/// responsible for validating counts as non-negative (they are unsigned here)
/// and for mapping unknown GitHub values to the `Unknown` variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrSnapshot {
    /// The PR number.
    pub number: PrNumber,

    /// The PR author's login. Feedback from this login never counts as
    /// reviewer feedback.
    pub author_login: String,

    /// The lifecycle state of the PR.
    pub state: PrState,

    /// Whether the PR is a draft. A draft forces the readiness score to 0.
    pub is_draft: bool,

    /// GitHub's reported mergeable state.
    pub mergeable_state: MergeableState,

    /// Number of files changed in the PR.
    pub files_changed: u32,

    /// Number of unresolved review conversation threads.
    pub open_conversations_count: u32,
}
