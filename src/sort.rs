//! Static mapping from logical sort keys to storage columns.
//!
//! The PR list endpoint lets clients sort by readiness fields. Instead of
//! interpolating caller-supplied column names into SQL, every sortable field
//! is an enum variant with a fixed column name: unknown keys are rejected at
//! parse time and the emitted ORDER BY clause is built only from this static
//! table.

use std::fmt;
use std::str::FromStr;

use tracing::warn;

/// A sortable readiness field.
///
/// `FromStr` accepts the logical names clients use, including aliases
/// (`overall` for `ready_score`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Boolean merge-ready flag.
    Ready,

    /// Overall readiness score.
    ReadyScore,

    /// CI confidence component.
    CiScore,

    /// Review-health component.
    ReviewScore,

    /// Author response rate.
    ResponseScore,

    /// Count of responded feedback items.
    FeedbackScore,

    /// Last update time of the PR row.
    LastUpdated,
}

impl SortKey {
    /// The storage column this key sorts by.
    pub fn column(&self) -> &'static str {
        match self {
            SortKey::Ready => "merge_ready",
            SortKey::ReadyScore => "overall_score",
            SortKey::CiScore => "ci_score",
            SortKey::ReviewScore => "review_score",
            SortKey::ResponseScore => "response_rate",
            SortKey::FeedbackScore => "responded_feedback",
            SortKey::LastUpdated => "last_updated_at",
        }
    }
}

impl FromStr for SortKey {
    type Err = InvalidSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ready" => Ok(SortKey::Ready),
            "ready_score" | "overall" | "overall_score" => Ok(SortKey::ReadyScore),
            "ci_score" => Ok(SortKey::CiScore),
            "review_score" => Ok(SortKey::ReviewScore),
            "response_score" | "response_rate" => Ok(SortKey::ResponseScore),
            "feedback_score" | "responded_feedback" => Ok(SortKey::FeedbackScore),
            "last_updated" | "last_updated_at" => Ok(SortKey::LastUpdated),
            _ => Err(InvalidSortKey(s.trim().to_string())),
        }
    }
}

/// Error for a sort key with no column mapping.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key: {0:?}")]
pub struct InvalidSortKey(pub String);

/// Error for a direction that is neither `asc` nor `desc`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort direction: {0:?}")]
pub struct InvalidSortDirection(pub String);

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = InvalidSortDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(InvalidSortDirection(s.trim().to_string())),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// One parsed sort criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortClause {
    pub key: SortKey,
    pub direction: SortDirection,
}

/// Parses comma-separated sort keys and directions into clauses.
///
/// `sort_by` is a comma-separated key list ("ready_score,ci_score");
/// `sort_dir` is a parallel direction list ("desc,asc"). Missing or invalid
/// directions default to descending. Unknown keys are skipped with a warning.
/// If nothing valid remains, the default is last-updated descending.
pub fn parse_sort_spec(sort_by: Option<&str>, sort_dir: Option<&str>) -> Vec<SortClause> {
    let directions: Vec<Option<SortDirection>> = sort_dir
        .map(|s| s.split(',').map(|d| d.parse().ok()).collect())
        .unwrap_or_default();

    let mut clauses = Vec::new();
    if let Some(sort_by) = sort_by {
        for (i, raw_key) in sort_by.split(',').enumerate() {
            match raw_key.parse::<SortKey>() {
                Ok(key) => clauses.push(SortClause {
                    key,
                    direction: directions.get(i).copied().flatten().unwrap_or_default(),
                }),
                Err(err) => {
                    warn!(key = raw_key.trim(), "rejected sort key: {}", err);
                }
            }
        }
    }

    if clauses.is_empty() {
        clauses.push(SortClause {
            key: SortKey::LastUpdated,
            direction: SortDirection::Desc,
        });
    }
    clauses
}

/// Renders the ORDER BY expression list for the given clauses.
///
/// Each clause sorts nulls last regardless of direction, via
/// `<col> IS NOT NULL DESC`. Column names come only from [`SortKey::column`],
/// never from caller input.
pub fn order_by_clause(clauses: &[SortClause]) -> String {
    let parts: Vec<String> = clauses
        .iter()
        .map(|c| {
            let col = c.key.column();
            format!("{col} IS NOT NULL DESC, {col} {}", c.direction.as_sql())
        })
        .collect();
    parts.join(", ")
}
