//! Builds the unified chronological timeline for one pull request.
//!
//! The builder normalizes raw commits, reviews, review comments, and issue
//! comments into a single event list ordered by timestamp. It is a pure
//! function over already-fetched data: entries that cannot be placed in time
//! (missing timestamps) are dropped, never fatal, and the result is recomputed
//! fresh on every call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::github::{RawPrData, ReviewState};
use crate::types::{CommentId, Sha};

/// Author label used when GitHub reports no account (deleted users, or
/// commits not linked to an account).
pub const UNKNOWN_AUTHOR: &str = "unknown";

/// The type-specific payload of a timeline event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// A commit pushed to the PR branch.
    Commit {
        sha: Sha,
        /// First line of the commit message.
        message: String,
    },

    /// A submitted review. Pending reviews never appear on the timeline.
    Review { state: ReviewState, body: String },

    /// An inline code comment.
    ReviewComment {
        body: String,
        path: Option<String>,
        in_reply_to: Option<CommentId>,
    },

    /// A comment on the PR conversation tab.
    IssueComment { body: String },
}

/// One event on a PR's timeline. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// When the event happened.
    pub timestamp: DateTime<Utc>,

    /// Login of the event's author, or [`UNKNOWN_AUTHOR`].
    pub author: String,

    /// The type-specific payload.
    #[serde(flatten)]
    pub kind: EventKind,
}

impl TimelineEvent {
    /// Returns true if this event is a commit.
    pub fn is_commit(&self) -> bool {
        matches!(self.kind, EventKind::Commit { .. })
    }

    /// Returns true if this event is a submitted review.
    pub fn is_review(&self) -> bool {
        matches!(self.kind, EventKind::Review { .. })
    }

    /// Returns the review state if this event is a review.
    pub fn review_state(&self) -> Option<ReviewState> {
        match self.kind {
            EventKind::Review { state, .. } => Some(state),
            _ => None,
        }
    }
}

/// Builds the unified chronological timeline from raw PR data.
///
/// Events are collected in input-category order (commits, reviews, review
/// comments, issue comments) and then stably sorted by timestamp, so events
/// with identical timestamps keep that order. Entries with no timestamp are
/// dropped with a debug log. Pending reviews are excluded: GitHub shows them
/// to nobody but their author, so they are not conversation.
pub fn build_timeline(data: &RawPrData) -> Vec<TimelineEvent> {
    let mut events = Vec::with_capacity(
        data.commits.len()
            + data.reviews.len()
            + data.review_comments.len()
            + data.issue_comments.len(),
    );

    for commit in &data.commits {
        let Some(timestamp) = commit.timestamp else {
            debug!(sha = commit.sha.short(), "dropping commit without timestamp");
            continue;
        };
        events.push(TimelineEvent {
            timestamp,
            author: author_or_unknown(commit.author.as_deref()),
            kind: EventKind::Commit {
                sha: commit.sha.clone(),
                message: first_line(&commit.message),
            },
        });
    }

    for review in &data.reviews {
        if review.state == ReviewState::Pending {
            continue;
        }
        let Some(timestamp) = review.submitted_at else {
            debug!("dropping review without submission time");
            continue;
        };
        events.push(TimelineEvent {
            timestamp,
            author: author_or_unknown(review.author.as_deref()),
            kind: EventKind::Review {
                state: review.state,
                body: review.body.clone(),
            },
        });
    }

    for comment in &data.review_comments {
        let Some(timestamp) = comment.created_at else {
            debug!("dropping review comment without timestamp");
            continue;
        };
        events.push(TimelineEvent {
            timestamp,
            author: author_or_unknown(comment.author.as_deref()),
            kind: EventKind::ReviewComment {
                body: comment.body.clone(),
                path: comment.path.clone(),
                in_reply_to: comment.in_reply_to,
            },
        });
    }

    for comment in &data.issue_comments {
        let Some(timestamp) = comment.created_at else {
            debug!("dropping issue comment without timestamp");
            continue;
        };
        events.push(TimelineEvent {
            timestamp,
            author: author_or_unknown(comment.author.as_deref()),
            kind: EventKind::IssueComment {
                body: comment.body.clone(),
            },
        });
    }

    // Stable sort: ties keep input-category order.
    events.sort_by_key(|e| e.timestamp);
    events
}

fn author_or_unknown(author: Option<&str>) -> String {
    match author {
        Some(a) if !a.is_empty() => a.to_string(),
        _ => UNKNOWN_AUTHOR.to_string(),
    }
}

fn first_line(message: &str) -> String {
    message.lines().next().unwrap_or("").to_string()
}
