//! Unified chronological PR timeline.

pub mod builder;

pub use builder::{build_timeline, EventKind, TimelineEvent, UNKNOWN_AUTHOR};
