//! Parsers for GitHub PR, repository, and organization URLs.
//!
//! Pure parsers that extract structured locators from user-supplied URLs.
//! The PR parser is strict: the URL must be exactly
//! `http(s)://github.com/OWNER/REPO/pull/NUMBER` with no trailing path
//! segments, so malformed URLs with trailing junk are rejected rather than
//! silently truncated.

use thiserror::Error;

use crate::types::{PrNumber, RepoId};

/// A fully resolved pull request location: repository plus PR number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrLocator {
    pub repo: RepoId,
    pub number: PrNumber,
}

/// Errors that can occur when parsing a PR URL.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlError {
    /// The input was empty or whitespace.
    #[error("PR URL is required")]
    Empty,

    /// The input is not a GitHub PR URL of the expected shape.
    #[error("invalid GitHub PR URL, expected https://github.com/OWNER/REPO/pull/NUMBER")]
    Malformed,
}

/// GitHub top-level paths that are not organizations or users.
const RESERVED_OWNERS: &[&str] = &[
    "settings",
    "organizations",
    "explore",
    "marketplace",
    "notifications",
    "new",
    "login",
    "signup",
    "features",
    "enterprise",
    "pricing",
    "topics",
    "collections",
    "trending",
    "sponsors",
    "about",
    "security",
    "pulls",
    "issues",
    "codespaces",
    "discussions",
];

/// Parses a GitHub PR URL into its repository and PR number.
///
/// A single trailing slash is tolerated; anything else after the PR number is
/// rejected.
///
/// # Examples
///
/// ```
/// use pr_readiness::github::parse_pr_url;
/// use pr_readiness::types::PrNumber;
///
/// let pr = parse_pr_url("https://github.com/rust-lang/rust/pull/12345").unwrap();
/// assert_eq!(pr.repo.owner, "rust-lang");
/// assert_eq!(pr.repo.repo, "rust");
/// assert_eq!(pr.number, PrNumber(12345));
///
/// assert!(parse_pr_url("https://github.com/rust-lang/rust/pull/12345/files").is_err());
/// ```
///
/// # Errors
///
/// Returns `UrlError::Empty` for empty input and `UrlError::Malformed` for
/// anything that is not exactly a GitHub PR URL.
pub fn parse_pr_url(url: &str) -> Result<PrLocator, UrlError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(UrlError::Empty);
    }
    let url = url.strip_suffix('/').unwrap_or(url);

    let rest = strip_github_prefix(url).ok_or(UrlError::Malformed)?;
    let mut segments = rest.split('/');

    let owner = segments.next().filter(|s| !s.is_empty());
    let repo = segments.next().filter(|s| !s.is_empty());
    let pull = segments.next();
    let number = segments.next();

    match (owner, repo, pull, number, segments.next()) {
        (Some(owner), Some(repo), Some("pull"), Some(number), None) => {
            let number: u64 = number.parse().map_err(|_| UrlError::Malformed)?;
            Ok(PrLocator {
                repo: RepoId::new(owner, repo),
                number: PrNumber(number),
            })
        }
        _ => Err(UrlError::Malformed),
    }
}

/// Parses a GitHub repository URL into a `RepoId`.
///
/// Trailing path segments (e.g. `/tree/main`) are tolerated and ignored.
/// Returns `None` if the input is not a GitHub repository URL.
pub fn parse_repo_url(url: &str) -> Option<RepoId> {
    let url = url.trim();
    let url = url.strip_suffix('/').unwrap_or(url);

    let rest = strip_github_prefix(url)?;
    let mut segments = rest.split('/');

    let owner = segments.next().filter(|s| !s.is_empty())?;
    let repo = segments.next().filter(|s| !s.is_empty())?;

    Some(RepoId::new(owner, repo))
}

/// Parses a GitHub organization/user URL into the owner name.
///
/// Only bare owner URLs (`github.com/OWNER`, no further path) match, and
/// GitHub reserved top-level paths like `settings` or `explore` are rejected.
pub fn parse_org_url(url: &str) -> Option<String> {
    let url = url.trim();
    let url = url.strip_suffix('/').unwrap_or(url);

    let rest = strip_github_prefix(url)?;
    if rest.is_empty() || rest.contains('/') {
        return None;
    }
    if !rest
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        return None;
    }
    if RESERVED_OWNERS.contains(&rest.to_ascii_lowercase().as_str()) {
        return None;
    }

    Some(rest.to_string())
}

/// Strips the `http(s)://github.com/` prefix, returning the remaining path.
fn strip_github_prefix(url: &str) -> Option<&str> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))?;
    rest.strip_prefix("github.com/")
}
