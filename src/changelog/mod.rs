//! Changelog generation.
//!
//! - `aggregator`: per-release body from closed milestone issues
//! - `document`: cumulative CHANGELOG.md from the release history

mod aggregator;
mod document;

pub use aggregator::{
    ChangelogAggregator, ChangelogGroup, ClassifiedIssue, IssueFilter, PRE_RELEASE_WARNING,
    UNLABELED_HEADING, group_issues, render_groups, with_pre_release_warning,
};
pub use document::{
    CHANGELOG_COMMIT_MESSAGE, CHANGELOG_PATH, CREATED_AT_CORRECTION_HOURS,
    ChangelogFileAggregator, render_document, render_release,
};
