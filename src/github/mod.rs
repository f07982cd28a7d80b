//! Raw GitHub input shapes and URL parsing.
//!
//! Nothing here performs I/O. The data collaborator fetches GitHub objects and
//! maps them into these shapes before handing them to the scoring core.

pub mod data;
pub mod url;

pub use data::{
    review_decision, CheckTally, RawComment, RawCommit, RawPrData, RawReview, ReviewDecision,
    ReviewState,
};
pub use url::{parse_org_url, parse_pr_url, parse_repo_url, PrLocator, UrlError};
