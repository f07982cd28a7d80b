//! Feedback-loop analysis: pairing reviewer feedback with author responses.
//!
//! Walks a PR timeline and pairs each piece of reviewer feedback (a review
//! that requests a response, or an inline review comment) with the first
//! author action that follows it. From the pairs it derives responsiveness
//! metrics and staleness, the raw material for review-health classification.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::github::ReviewState;
use crate::timeline::{EventKind, TimelineEvent};

/// Feedback with no author response for longer than this is stale.
pub const STALE_AFTER_HOURS: i64 = 72;

/// [`STALE_AFTER_HOURS`] as a `chrono::Duration`.
pub fn stale_after() -> Duration {
    Duration::hours(STALE_AFTER_HOURS)
}

/// The kind of reviewer action that produced a feedback item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    /// A submitted review (changes requested or commented).
    Review,

    /// An inline code comment.
    ReviewComment,
}

/// One piece of reviewer feedback, paired with the author response if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackItem {
    /// Login of the reviewer who left the feedback.
    pub reviewer: String,

    /// What kind of action produced the feedback.
    pub kind: FeedbackKind,

    /// When the feedback was left.
    pub feedback_timestamp: DateTime<Utc>,

    /// Whether the PR author has acted after the feedback.
    pub responded: bool,

    /// When the author first acted after the feedback, if they have.
    pub response_timestamp: Option<DateTime<Utc>>,

    /// Hours between feedback and response, if responded.
    pub response_delay_hours: Option<f64>,

    /// Hours between feedback and the evaluation instant.
    pub age_hours: f64,

    /// True if unresponded for more than [`stale_after`].
    pub is_stale: bool,
}

impl FeedbackItem {
    /// Age of the feedback in days, rounded to one decimal place.
    pub fn days_old(&self) -> f64 {
        (self.age_hours / 24.0 * 10.0).round() / 10.0
    }
}

/// The outcome of analyzing a PR's review feedback loops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewProgress {
    /// All feedback items, in timeline order.
    pub feedback: Vec<FeedbackItem>,

    /// State of the most recent submitted review by a non-author, if any.
    pub latest_review_state: Option<ReviewState>,

    /// When a reviewer last acted (review or inline comment).
    pub last_reviewer_action: Option<DateTime<Utc>>,

    /// When the author last acted (commit, issue comment, or reply).
    pub last_author_action: Option<DateTime<Utc>>,

    /// True if the ball is in the author's court: changes are requested, or
    /// a reviewer acted more recently than the author.
    pub awaiting_author: bool,

    /// True if the ball is in the reviewers' court: the author acted last
    /// and nothing marks the PR as awaiting the author.
    pub awaiting_reviewer: bool,
}

impl ReviewProgress {
    /// Total number of feedback items.
    pub fn total_feedback(&self) -> usize {
        self.feedback.len()
    }

    /// Number of feedback items the author has responded to.
    pub fn responded_feedback(&self) -> usize {
        self.feedback.iter().filter(|f| f.responded).count()
    }

    /// Fraction of feedback responded to, in [0, 1].
    ///
    /// Zero feedback is the neutral case and yields 1.0 (fully responsive by
    /// convention), never a division failure.
    pub fn response_rate(&self) -> f64 {
        if self.feedback.is_empty() {
            1.0
        } else {
            self.responded_feedback() as f64 / self.feedback.len() as f64
        }
    }

    /// Feedback items that have gone unanswered past the staleness threshold.
    pub fn stale_feedback(&self) -> Vec<FeedbackItem> {
        self.feedback.iter().filter(|f| f.is_stale).cloned().collect()
    }
}

/// Analyzes feedback loops on a timeline.
///
/// `pr_author` is the PR author's login; `now` is the evaluation instant
/// (passed explicitly so the analysis is deterministic and testable).
///
/// A timeline event counts as *feedback* when it is authored by someone other
/// than the PR author and is either a review whose state requests a response
/// (`CHANGES_REQUESTED` or `COMMENTED`) or an inline review comment. It counts
/// as an *author action* when the PR author commits, comments on the
/// conversation, or replies inline.
///
/// Each feedback item is answered by the first author action strictly after
/// its timestamp; one author action may therefore answer several outstanding
/// items at once. Feedback with no answer and age over [`stale_after`] is
/// stale.
pub fn analyze_feedback(
    timeline: &[TimelineEvent],
    pr_author: &str,
    now: DateTime<Utc>,
) -> ReviewProgress {
    let mut latest_review_state = None;
    let mut last_reviewer_action = None;
    let mut last_author_action = None;

    // Timestamps of author actions, in timeline (ascending) order.
    let author_actions: Vec<DateTime<Utc>> = timeline
        .iter()
        .filter(|e| e.author == pr_author && is_author_action(&e.kind))
        .map(|e| e.timestamp)
        .collect();

    let mut feedback = Vec::new();

    for event in timeline {
        if event.author == pr_author {
            if is_author_action(&event.kind) {
                last_author_action = Some(event.timestamp);
            }
            continue;
        }

        match &event.kind {
            EventKind::Review { state, .. } => {
                latest_review_state = Some(*state);
                last_reviewer_action = Some(event.timestamp);
                if state.requests_response() {
                    feedback.push(make_item(
                        event,
                        FeedbackKind::Review,
                        &author_actions,
                        now,
                    ));
                }
            }
            EventKind::ReviewComment { .. } => {
                last_reviewer_action = Some(event.timestamp);
                feedback.push(make_item(
                    event,
                    FeedbackKind::ReviewComment,
                    &author_actions,
                    now,
                ));
            }
            _ => {}
        }
    }

    let awaiting_author = latest_review_state == Some(ReviewState::ChangesRequested)
        || (last_reviewer_action.is_some()
            && match (last_reviewer_action, last_author_action) {
                (Some(reviewer), Some(author)) => reviewer > author,
                (Some(_), None) => true,
                _ => false,
            });

    let awaiting_reviewer = !awaiting_author
        && last_author_action.is_some()
        && match (last_author_action, last_reviewer_action) {
            (Some(author), Some(reviewer)) => author > reviewer,
            (Some(_), None) => true,
            _ => false,
        };

    ReviewProgress {
        feedback,
        latest_review_state,
        last_reviewer_action,
        last_author_action,
        awaiting_author,
        awaiting_reviewer,
    }
}

fn is_author_action(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Commit { .. } | EventKind::IssueComment { .. } | EventKind::ReviewComment { .. }
    )
}

fn make_item(
    event: &TimelineEvent,
    kind: FeedbackKind,
    author_actions: &[DateTime<Utc>],
    now: DateTime<Utc>,
) -> FeedbackItem {
    // First author action strictly after the feedback. author_actions is
    // ascending, so partition_point finds it directly.
    let idx = author_actions.partition_point(|ts| *ts <= event.timestamp);
    let response_timestamp = author_actions.get(idx).copied();

    let age = now - event.timestamp;
    let responded = response_timestamp.is_some();

    FeedbackItem {
        reviewer: event.author.clone(),
        kind,
        feedback_timestamp: event.timestamp,
        responded,
        response_timestamp,
        response_delay_hours: response_timestamp
            .map(|r| hours_between(event.timestamp, r)),
        age_hours: age.num_seconds() as f64 / 3600.0,
        is_stale: !responded && age > stale_after(),
    }
}

fn hours_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let delay = (to - from).num_seconds() as f64 / 3600.0;
    (delay * 10.0).round() / 10.0
}
