//! Raw GitHub data shapes consumed by the scoring core.
//!
//! These types mirror the fields the core needs from the GitHub API objects
//! the data collaborator fetches: reviews, comments, commits, and check
//! tallies. They are deliberately lossy - only the fields scoring reads are
//! kept - and deliberately forgiving: authors can be missing (deleted
//! accounts) and timestamps can be missing (pending reviews, malformed
//! payloads). Downstream code drops entries it cannot place in time rather
//! than failing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CommentId, Sha};

/// The state of a submitted pull request review.
///
/// Mirrors GitHub's review `state` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewState {
    /// The reviewer approved the changes.
    Approved,

    /// The reviewer requested changes.
    ChangesRequested,

    /// The reviewer left comments without an explicit verdict.
    Commented,

    /// The review was dismissed.
    Dismissed,

    /// The review has been started but not submitted. Pending reviews are
    /// invisible to everyone but their author and are excluded from the
    /// timeline.
    Pending,
}

impl ReviewState {
    /// Returns true if a review in this state counts as reviewer feedback
    /// that the PR author is expected to answer.
    pub fn requests_response(&self) -> bool {
        matches!(self, ReviewState::ChangesRequested | ReviewState::Commented)
    }
}

/// A pull request review as fetched from GitHub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReview {
    /// The reviewer's login. `None` for deleted accounts.
    pub author: Option<String>,

    /// The review verdict.
    pub state: ReviewState,

    /// When the review was submitted. `None` for pending reviews.
    pub submitted_at: Option<DateTime<Utc>>,

    /// The review body text.
    #[serde(default)]
    pub body: String,
}

/// A review comment (inline code comment) or issue comment (conversation tab).
///
/// Review comments carry a `path`; issue comments do not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawComment {
    /// The commenter's login. `None` for deleted accounts.
    pub author: Option<String>,

    /// The comment body text.
    #[serde(default)]
    pub body: String,

    /// When the comment was created.
    pub created_at: Option<DateTime<Utc>>,

    /// The file the comment is attached to, for inline review comments.
    #[serde(default)]
    pub path: Option<String>,

    /// The comment this one replies to, for threaded review comments.
    #[serde(default)]
    pub in_reply_to: Option<CommentId>,
}

/// A commit on the PR branch as fetched from GitHub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCommit {
    /// The commit SHA.
    pub sha: Sha,

    /// The committer's login, or git author name when the commit is not
    /// linked to a GitHub account. `None` when neither is available.
    pub author: Option<String>,

    /// The commit's author date.
    pub timestamp: Option<DateTime<Utc>>,

    /// The full commit message.
    #[serde(default)]
    pub message: String,
}

/// Tally of CI check results for the PR head.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckTally {
    /// Number of passing checks.
    pub passed: u32,

    /// Number of failing checks.
    pub failed: u32,

    /// Number of skipped checks.
    pub skipped: u32,
}

impl CheckTally {
    pub fn new(passed: u32, failed: u32, skipped: u32) -> Self {
        CheckTally {
            passed,
            failed,
            skipped,
        }
    }

    /// Total number of checks configured for the PR head. Saturates rather
    /// than overflowing on absurd counts.
    pub fn total(&self) -> u32 {
        self.passed
            .saturating_add(self.failed)
            .saturating_add(self.skipped)
    }
}

/// All per-event raw data for one pull request, as supplied by the GitHub
/// data collaborator. Input to the timeline builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPrData {
    #[serde(default)]
    pub commits: Vec<RawCommit>,

    #[serde(default)]
    pub reviews: Vec<RawReview>,

    #[serde(default)]
    pub review_comments: Vec<RawComment>,

    #[serde(default)]
    pub issue_comments: Vec<RawComment>,
}

/// The overall review verdict for a PR, reduced across reviewers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    /// No reviewer has submitted a verdict yet.
    Pending,

    /// At least one reviewer's latest review approves, and no reviewer's
    /// latest review requests changes.
    Approved,

    /// At least one reviewer's latest review requests changes. Takes
    /// precedence over approval from other reviewers.
    ChangesRequested,
}

/// Reduces a review list to the overall verdict.
///
/// Only each reviewer's most recently submitted review counts: a reviewer who
/// requested changes and later approved has approved. Reviews without a
/// `submitted_at` or without an author (deleted accounts) are skipped -
/// there is no reliable position in time or reviewer identity to reduce over.
pub fn review_decision(reviews: &[RawReview]) -> ReviewDecision {
    let mut sorted: Vec<&RawReview> = reviews
        .iter()
        .filter(|r| r.submitted_at.is_some() && r.author.is_some())
        .collect();
    sorted.sort_by_key(|r| r.submitted_at);

    let mut latest: std::collections::HashMap<&str, ReviewState> = std::collections::HashMap::new();
    for review in sorted {
        // A pending review is not a verdict. A dismissed review IS recorded:
        // it overwrites the reviewer's earlier verdict with no standing one.
        if matches!(review.state, ReviewState::Pending) {
            continue;
        }
        if let Some(author) = review.author.as_deref() {
            latest.insert(author, review.state);
        }
    }

    if latest
        .values()
        .any(|s| matches!(s, ReviewState::ChangesRequested))
    {
        ReviewDecision::ChangesRequested
    } else if latest.values().any(|s| matches!(s, ReviewState::Approved)) {
        ReviewDecision::Approved
    } else {
        ReviewDecision::Pending
    }
}
