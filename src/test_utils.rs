//! Shared test fixtures and arbitrary generators for property-based testing.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

use crate::github::{CheckTally, RawComment, RawCommit, RawPrData, RawReview, ReviewState};
use crate::review::{FeedbackItem, FeedbackKind, HealthClassification, ReviewHealth};
use crate::timeline::{EventKind, TimelineEvent};
use crate::types::{MergeableState, PrNumber, PrSnapshot, PrState, Sha};

/// The fixed day all fixture events live on.
fn base_day() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()
}

/// A timestamp on the fixture day at the given hour.
pub fn at_hour(hour: u32) -> DateTime<Utc> {
    base_day() + Duration::hours(i64::from(hour))
}

/// An evaluation instant `days` days after midnight of the fixture day.
pub fn now_at_day(days: i64) -> DateTime<Utc> {
    base_day() + Duration::days(days)
}

pub fn event_at(author: &str, hour: u32, kind: EventKind) -> TimelineEvent {
    TimelineEvent {
        timestamp: at_hour(hour),
        author: author.to_string(),
        kind,
    }
}

pub fn commit_at(author: &str, hour: u32) -> RawCommit {
    RawCommit {
        sha: Sha::new("abc123def456789012345678901234567890abcd"),
        author: Some(author.to_string()),
        timestamp: Some(at_hour(hour)),
        message: "change something".to_string(),
    }
}

pub fn review_at(author: &str, state: ReviewState, hour: u32) -> RawReview {
    RawReview {
        author: Some(author.to_string()),
        state,
        submitted_at: Some(at_hour(hour)),
        body: String::new(),
    }
}

pub fn issue_comment_at(author: &str, hour: u32) -> RawComment {
    RawComment {
        author: Some(author.to_string()),
        body: "a comment".to_string(),
        created_at: Some(at_hour(hour)),
        path: None,
        in_reply_to: None,
    }
}

/// An open, non-draft, mergeable PR by "alice" with nothing to flag.
pub fn open_snapshot() -> PrSnapshot {
    PrSnapshot {
        number: PrNumber(101),
        author_login: "alice".to_string(),
        state: PrState::Open,
        is_draft: false,
        mergeable_state: MergeableState::Clean,
        files_changed: 3,
        open_conversations_count: 0,
    }
}

/// A review health value with the given classification and score and no
/// feedback recorded.
pub fn healthy_review(classification: HealthClassification, score: u8) -> ReviewHealth {
    ReviewHealth {
        classification,
        score,
        response_rate: 1.0,
        total_feedback: 0,
        responded_feedback: 0,
        stale_feedback: Vec::new(),
    }
}

/// A stale, unresponded feedback item aged `days` days.
pub fn stale_item(reviewer: &str, days: f64) -> FeedbackItem {
    FeedbackItem {
        reviewer: reviewer.to_string(),
        kind: FeedbackKind::ReviewComment,
        feedback_timestamp: at_hour(9),
        responded: false,
        response_timestamp: None,
        response_delay_hours: None,
        age_hours: days * 24.0,
        is_stale: true,
    }
}

/// Logins drawn from a small pool so generated timelines actually interleave
/// the PR author ("alice") with reviewers.
pub fn arb_author() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        3 => Just(Some("alice".to_string())),
        3 => Just(Some("bob".to_string())),
        1 => Just(Some("carol".to_string())),
        1 => Just(None),
    ]
}

/// Timestamps within a few days of the fixture day, occasionally missing.
pub fn arb_timestamp() -> impl Strategy<Value = Option<DateTime<Utc>>> {
    prop_oneof![
        6 => (0i64..96).prop_map(|h| Some(base_day() + Duration::hours(h))),
        1 => Just(None),
    ]
}

pub fn arb_review_state() -> impl Strategy<Value = ReviewState> {
    prop_oneof![
        Just(ReviewState::Approved),
        Just(ReviewState::ChangesRequested),
        Just(ReviewState::Commented),
        Just(ReviewState::Dismissed),
        Just(ReviewState::Pending),
    ]
}

pub fn arb_commit() -> impl Strategy<Value = RawCommit> {
    (arb_author(), arb_timestamp(), "[0-9a-f]{40}").prop_map(|(author, timestamp, sha)| {
        RawCommit {
            sha: Sha::new(sha),
            author,
            timestamp,
            message: "generated".to_string(),
        }
    })
}

pub fn arb_review() -> impl Strategy<Value = RawReview> {
    (arb_author(), arb_review_state(), arb_timestamp()).prop_map(|(author, state, submitted_at)| {
        RawReview {
            author,
            state,
            submitted_at,
            body: String::new(),
        }
    })
}

pub fn arb_comment(inline: bool) -> impl Strategy<Value = RawComment> {
    (arb_author(), arb_timestamp()).prop_map(move |(author, created_at)| RawComment {
        author,
        body: "generated".to_string(),
        created_at,
        path: inline.then(|| "src/lib.rs".to_string()),
        in_reply_to: None,
    })
}

pub fn arb_raw_pr_data() -> impl Strategy<Value = RawPrData> {
    (
        prop::collection::vec(arb_commit(), 0..4),
        prop::collection::vec(arb_review(), 0..4),
        prop::collection::vec(arb_comment(true), 0..4),
        prop::collection::vec(arb_comment(false), 0..4),
    )
        .prop_map(
            |(commits, reviews, review_comments, issue_comments)| RawPrData {
                commits,
                reviews,
                review_comments,
                issue_comments,
            },
        )
}

pub fn arb_mergeable_state() -> impl Strategy<Value = MergeableState> {
    prop_oneof![
        Just(MergeableState::Clean),
        Just(MergeableState::Unstable),
        Just(MergeableState::Blocked),
        Just(MergeableState::Behind),
        Just(MergeableState::Dirty),
        Just(MergeableState::Draft),
        Just(MergeableState::Unknown),
    ]
}

pub fn arb_pr_state() -> impl Strategy<Value = PrState> {
    prop_oneof![
        Just(PrState::Open),
        Just(PrState::Closed),
        Just(PrState::Merged),
    ]
}

pub fn arb_snapshot() -> impl Strategy<Value = PrSnapshot> {
    (
        any::<u32>(),
        arb_pr_state(),
        any::<bool>(),
        arb_mergeable_state(),
        0u32..100,
        0u32..20,
    )
        .prop_map(
            |(number, state, is_draft, mergeable_state, files_changed, conversations)| {
                PrSnapshot {
                    number: PrNumber(u64::from(number)),
                    author_login: "alice".to_string(),
                    state,
                    is_draft,
                    mergeable_state,
                    files_changed,
                    open_conversations_count: conversations,
                }
            },
        )
}

pub fn arb_check_tally() -> impl Strategy<Value = CheckTally> {
    (0u32..50, 0u32..50, 0u32..50)
        .prop_map(|(passed, failed, skipped)| CheckTally::new(passed, failed, skipped))
}
