//! Review-health classification.
//!
//! Reduces feedback-loop analysis plus the overall review verdict to a
//! qualitative classification and a 0-100 score. The rules are evaluated
//! first-match-wins in a fixed priority order, so precedence is auditable:
//! approval beats everything, staleness beats any otherwise-active state.

use serde::{Deserialize, Serialize};

use crate::github::ReviewDecision;

use super::feedback::{FeedbackItem, ReviewProgress};

/// Qualitative classification of reviewer/author interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthClassification {
    /// An approving review stands and no change request is outstanding.
    Approved,

    /// Good back-and-forth, nothing stale.
    Active,

    /// The author has answered; a reviewer needs to re-review.
    AwaitingReviewer,

    /// Recent feedback the author has not yet answered.
    AwaitingAuthor,

    /// Feedback has gone unanswered past the staleness threshold.
    Stalled,

    /// No reviews and no feedback yet.
    NoActivity,
}

impl HealthClassification {
    /// Returns the string form used in persisted records ("APPROVED", ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthClassification::Approved => "APPROVED",
            HealthClassification::Active => "ACTIVE",
            HealthClassification::AwaitingReviewer => "AWAITING_REVIEWER",
            HealthClassification::AwaitingAuthor => "AWAITING_AUTHOR",
            HealthClassification::Stalled => "STALLED",
            HealthClassification::NoActivity => "NO_ACTIVITY",
        }
    }
}

impl std::fmt::Display for HealthClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative plus numeric assessment of review interaction state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewHealth {
    /// The classification, per the priority order of [`classify_health`].
    pub classification: HealthClassification,

    /// Score in [0, 100], inside the classification's band.
    pub score: u8,

    /// Fraction of feedback the author has responded to (1.0 with none).
    pub response_rate: f64,

    /// Total feedback items found on the timeline.
    pub total_feedback: usize,

    /// Feedback items the author responded to.
    pub responded_feedback: usize,

    /// Feedback unanswered past the staleness threshold.
    pub stale_feedback: Vec<FeedbackItem>,
}

/// Classifies review health from feedback analysis and the review verdict.
///
/// `review_count` is the number of submitted, non-pending reviews; it
/// distinguishes "nobody has looked at this" from "reviews exist but produced
/// no feedback".
///
/// Rules, first match wins:
/// 1. Verdict approved (and so no outstanding change request) -> `APPROVED`, 95.
/// 2. No reviews and no feedback -> `NO_ACTIVITY`, 50.
/// 3. Any stale feedback -> `STALLED`; 30 for one stale item, 5 less for each
///    additional one, floored at 10.
/// 4. Awaiting the author -> `AWAITING_AUTHOR`; 35 plus up to 20 for
///    responsiveness (35-55).
/// 5. Awaiting a reviewer -> `AWAITING_REVIEWER`; 60 plus up to 20 for
///    responsiveness (60-80).
/// 6. Otherwise -> `ACTIVE`; 70 plus up to 15 for responsiveness (70-85).
pub fn classify_health(
    progress: &ReviewProgress,
    decision: ReviewDecision,
    review_count: usize,
) -> ReviewHealth {
    let response_rate = progress.response_rate();
    let stale = progress.stale_feedback();

    let (classification, score) = if decision == ReviewDecision::Approved {
        (HealthClassification::Approved, 95)
    } else if review_count == 0 && progress.feedback.is_empty() {
        (HealthClassification::NoActivity, 50)
    } else if !stale.is_empty() {
        let penalty = 5 * (stale.len() as i64 - 1);
        (HealthClassification::Stalled, (30 - penalty).max(10) as u8)
    } else if progress.awaiting_author {
        (
            HealthClassification::AwaitingAuthor,
            35 + scaled(response_rate, 20),
        )
    } else if progress.awaiting_reviewer {
        (
            HealthClassification::AwaitingReviewer,
            60 + scaled(response_rate, 20),
        )
    } else {
        (HealthClassification::Active, 70 + scaled(response_rate, 15))
    };

    ReviewHealth {
        classification,
        score,
        response_rate,
        total_feedback: progress.total_feedback(),
        responded_feedback: progress.responded_feedback(),
        stale_feedback: stale,
    }
}

/// Maps a rate in [0, 1] onto [0, span], rounding to nearest.
fn scaled(rate: f64, span: u8) -> u8 {
    (rate.clamp(0.0, 1.0) * f64::from(span)).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::ReviewState;
    use crate::review::feedback::analyze_feedback;
    use crate::test_utils::{event_at, now_at_day};
    use crate::timeline::{EventKind, TimelineEvent};

    const AUTHOR: &str = "alice";
    const REVIEWER: &str = "bob";

    fn review_event(state: ReviewState, hour: u32) -> TimelineEvent {
        event_at(
            REVIEWER,
            hour,
            EventKind::Review {
                state,
                body: String::new(),
            },
        )
    }

    fn author_comment(hour: u32) -> TimelineEvent {
        event_at(
            AUTHOR,
            hour,
            EventKind::IssueComment {
                body: String::new(),
            },
        )
    }

    fn inline_comment(hour: u32) -> TimelineEvent {
        event_at(
            REVIEWER,
            hour,
            EventKind::ReviewComment {
                body: String::new(),
                path: None,
                in_reply_to: None,
            },
        )
    }

    fn classify(
        timeline: &[TimelineEvent],
        decision: ReviewDecision,
        review_count: usize,
        now_day: i64,
    ) -> ReviewHealth {
        let progress = analyze_feedback(timeline, AUTHOR, now_at_day(now_day));
        classify_health(&progress, decision, review_count)
    }

    mod priority_order {
        use super::*;

        #[test]
        fn approved_with_no_activity_is_approved() {
            let timeline = vec![review_event(ReviewState::Approved, 9)];
            let health = classify(&timeline, ReviewDecision::Approved, 1, 1);
            assert_eq!(health.classification, HealthClassification::Approved);
            assert_eq!(health.score, 95);
        }

        #[test]
        fn approval_beats_staleness() {
            // Old unanswered comment, but a later approval stands.
            let timeline = vec![
                inline_comment(9),
                review_event(ReviewState::Approved, 10),
            ];
            let health = classify(&timeline, ReviewDecision::Approved, 1, 30);
            assert_eq!(health.classification, HealthClassification::Approved);
        }

        #[test]
        fn staleness_beats_awaiting_author() {
            let timeline = vec![review_event(ReviewState::ChangesRequested, 9)];
            let health = classify(&timeline, ReviewDecision::ChangesRequested, 1, 30);
            assert_eq!(health.classification, HealthClassification::Stalled);
        }

        #[test]
        fn no_reviews_and_no_feedback_is_no_activity() {
            let health = classify(&[], ReviewDecision::Pending, 0, 1);
            assert_eq!(health.classification, HealthClassification::NoActivity);
            assert_eq!(health.score, 50);
            assert_eq!(health.response_rate, 1.0);
        }

        #[test]
        fn author_activity_alone_is_still_no_activity() {
            // Commits without any review are not review activity.
            let timeline = vec![author_comment(9)];
            let health = classify(&timeline, ReviewDecision::Pending, 0, 1);
            assert_eq!(health.classification, HealthClassification::NoActivity);
        }
    }

    mod bands {
        use super::*;

        #[test]
        fn stalled_score_shrinks_with_more_stale_items() {
            let one = vec![inline_comment(9)];
            let health_one = classify(&one, ReviewDecision::Pending, 0, 30);
            assert_eq!(health_one.classification, HealthClassification::Stalled);
            assert_eq!(health_one.score, 30);

            let three = vec![inline_comment(9), inline_comment(10), inline_comment(11)];
            let health_three = classify(&three, ReviewDecision::Pending, 0, 30);
            assert_eq!(health_three.score, 20);
        }

        #[test]
        fn stalled_score_floors_at_10() {
            let many: Vec<_> = (0..10).map(inline_comment).collect();
            let health = classify(&many, ReviewDecision::Pending, 0, 30);
            assert_eq!(health.classification, HealthClassification::Stalled);
            assert_eq!(health.score, 10);
        }

        #[test]
        fn awaiting_author_band() {
            // Fresh unanswered change request: rate 0 -> score 35.
            let timeline = vec![review_event(ReviewState::ChangesRequested, 9)];
            let health = classify(&timeline, ReviewDecision::ChangesRequested, 1, 1);
            assert_eq!(health.classification, HealthClassification::AwaitingAuthor);
            assert_eq!(health.score, 35);
        }

        #[test]
        fn awaiting_author_with_full_response_rate() {
            // Change request answered, but the request still stands.
            let timeline = vec![
                review_event(ReviewState::ChangesRequested, 9),
                author_comment(10),
            ];
            let health = classify(&timeline, ReviewDecision::ChangesRequested, 1, 1);
            assert_eq!(health.classification, HealthClassification::AwaitingAuthor);
            assert_eq!(health.score, 55);
        }

        #[test]
        fn awaiting_reviewer_band_scales_with_rate() {
            // Commented review answered; author acted last.
            let timeline = vec![
                review_event(ReviewState::Commented, 9),
                author_comment(10),
            ];
            let health = classify(&timeline, ReviewDecision::Pending, 1, 1);
            assert_eq!(
                health.classification,
                HealthClassification::AwaitingReviewer
            );
            assert_eq!(health.score, 80);
        }
    }

    mod invariants {
        use super::*;
        use crate::test_utils::arb_raw_pr_data;
        use crate::timeline::build_timeline;
        use proptest::prelude::*;

        fn band(classification: HealthClassification) -> (u8, u8) {
            match classification {
                HealthClassification::Approved => (95, 95),
                HealthClassification::Active => (70, 85),
                HealthClassification::AwaitingReviewer => (60, 80),
                HealthClassification::AwaitingAuthor => (35, 55),
                HealthClassification::Stalled => (10, 30),
                HealthClassification::NoActivity => (50, 50),
            }
        }

        proptest! {
            #[test]
            fn score_is_always_inside_its_band(
                data in arb_raw_pr_data(),
                decision in prop_oneof![
                    Just(ReviewDecision::Pending),
                    Just(ReviewDecision::Approved),
                    Just(ReviewDecision::ChangesRequested),
                ],
            ) {
                let timeline = build_timeline(&data);
                let progress = analyze_feedback(&timeline, AUTHOR, now_at_day(2));
                let health = classify_health(&progress, decision, data.reviews.len());

                let (lo, hi) = band(health.classification);
                prop_assert!(health.score >= lo && health.score <= hi,
                    "score {} outside band [{}, {}] for {:?}",
                    health.score, lo, hi, health.classification);
                prop_assert!(health.responded_feedback <= health.total_feedback);
                prop_assert!((0.0..=1.0).contains(&health.response_rate));
            }
        }
    }
}
