//! Per-release changelog built from closed milestone issues

use crate::error::Result;
use crate::github::{Issue, IssueTracker, ReleasePatch, ReleaseService, RemoteRelease};
use crate::settings::{LabelHeader, ReleaseSettings};
use crate::version::VersionIdentifier;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Table prepended to pre-release changelogs. Starts with `|` so the cumulative
/// document drops it again.
pub const PRE_RELEASE_WARNING: &str = "| :warning: **Pre-release**|\n| --- |";

/// Heading text for issues collected without a label mapping
pub const UNLABELED_HEADING: &str = "Unlabeled";

/// Issue paired with the heading it renders under; `None` is the unlabeled bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedIssue {
    /// Heading, `None` when no label mapping is configured
    pub header: Option<String>,
    /// The issue
    pub issue: Issue,
}

/// Issues rendered together under one heading, sorted by title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogGroup {
    /// Heading, `None` for the unlabeled bucket
    pub header: Option<String>,
    /// Issues in ascending title order
    pub issues: Vec<Issue>,
}

/// Issue selection rules for one release
#[derive(Debug, Clone, Copy)]
pub struct IssueFilter<'a> {
    /// Milestone title an issue must carry
    pub milestone_key: &'a str,
    /// Label that excludes an issue, compared case-insensitively
    pub filter_label: Option<&'a str>,
    /// Only issues closed strictly after this instant qualify
    pub closed_after: Option<DateTime<Utc>>,
    /// Ordered label mapping; when non-empty, unmatched issues are dropped
    pub label_headers: &'a [LabelHeader],
}

impl IssueFilter<'_> {
    /// Apply milestone, filter-label and date rules, then classify.
    ///
    /// Returns `None` for issues that do not belong in the changelog.
    pub fn classify(&self, issue: &Issue) -> Option<ClassifiedIssue> {
        if issue.milestone_title.as_deref() != Some(self.milestone_key) {
            return None;
        }

        if let Some(filter) = self.filter_label {
            let filter = filter.to_lowercase();
            if issue.labels.iter().any(|l| l.to_lowercase() == filter) {
                return None;
            }
        }

        if let Some(since) = self.closed_after {
            match issue.closed_at {
                Some(closed_at) if closed_at > since => {}
                _ => return None,
            }
        }

        if self.label_headers.is_empty() {
            return Some(ClassifiedIssue {
                header: None,
                issue: issue.clone(),
            });
        }

        self.label_headers
            .iter()
            .find(|mapping| issue.labels.iter().any(|l| *l == mapping.label))
            .map(|mapping| ClassifiedIssue {
                header: Some(mapping.header.clone()),
                issue: issue.clone(),
            })
    }
}

/// Group classified issues: groups ascending by heading (unlabeled first), issues
/// ascending by title within a group.
pub fn group_issues(
    classified: impl IntoIterator<Item = ClassifiedIssue>,
) -> Vec<ChangelogGroup> {
    let mut groups: BTreeMap<Option<String>, Vec<Issue>> = BTreeMap::new();
    for item in classified {
        groups.entry(item.header).or_default().push(item.issue);
    }

    groups
        .into_iter()
        .map(|(header, mut issues)| {
            issues.sort_by(|a, b| a.title.cmp(&b.title));
            ChangelogGroup { header, issues }
        })
        .collect()
}

/// Render groups as markdown: a `####` heading per group followed by one link bullet
/// per issue, groups separated by a blank line.
pub fn render_groups(groups: &[ChangelogGroup]) -> String {
    let mut out = String::new();
    for group in groups {
        let heading = group.header.as_deref().unwrap_or(UNLABELED_HEADING);
        out.push('\n');
        out.push_str(&format!("#### {}:\n", heading));
        for issue in &group.issues {
            out.push_str(&format!("- [{}]({})\n", issue.title, issue.html_url));
        }
    }
    out.trim().to_string()
}

/// Prefix a body with the pre-release warning table
pub fn with_pre_release_warning(body: &str) -> String {
    if body.is_empty() {
        return PRE_RELEASE_WARNING.to_string();
    }
    format!("{}\n{}", PRE_RELEASE_WARNING, body)
}

/// Builds and attaches the changelog body of the release being synchronized
pub struct ChangelogAggregator<'a, C> {
    client: &'a C,
    settings: &'a ReleaseSettings,
}

impl<'a, C: ReleaseService + IssueTracker> ChangelogAggregator<'a, C> {
    /// Create an aggregator
    pub fn new(client: &'a C, settings: &'a ReleaseSettings) -> Self {
        Self { client, settings }
    }

    /// Render the changelog body for `version`.
    pub async fn build(&self, version: &VersionIdentifier) -> Result<String> {
        let closed_after = if self.settings.is_pre_release {
            self.previous_release_published_at(version).await?
        } else {
            None
        };
        if let Some(since) = closed_after {
            log::info!("Pre-release: only issues closed after {}", since);
        }

        let milestone_key = version.milestone_key();
        let filter = IssueFilter {
            milestone_key: &milestone_key,
            filter_label: self.settings.issue_filter_label.as_deref(),
            closed_after,
            label_headers: &self.settings.label_headers,
        };

        let issues = self.client.list_closed_issues().await?;
        let total = issues.len();
        let classified: Vec<ClassifiedIssue> =
            issues.iter().filter_map(|issue| filter.classify(issue)).collect();
        log::info!(
            "{} of {} closed issue(s) belong to milestone {}",
            classified.len(),
            total,
            milestone_key
        );

        let groups = group_issues(classified);
        for group in &groups {
            log::debug!(
                "{}: {} issue(s)",
                group.header.as_deref().unwrap_or(UNLABELED_HEADING),
                group.issues.len()
            );
        }

        let body = render_groups(&groups);
        Ok(if self.settings.is_pre_release {
            with_pre_release_warning(&body)
        } else {
            body
        })
    }

    /// Render the changelog and store it as the release body
    pub async fn attach(
        &self,
        version: &VersionIdentifier,
        release: &RemoteRelease,
    ) -> Result<RemoteRelease> {
        let body = self.build(version).await?;
        log::info!("Attaching changelog to release {}", release.name);
        self.client
            .edit_release(release.id, &ReleasePatch::body(body))
            .await
    }

    /// Publication time of the most recently created release other than the one
    /// being synchronized.
    async fn previous_release_published_at(
        &self,
        version: &VersionIdentifier,
    ) -> Result<Option<DateTime<Utc>>> {
        let current = version.full_identifier();
        let releases = self.client.list_releases().await?;

        Ok(releases
            .iter()
            .filter(|release| release.name != current)
            .max_by_key(|release| release.created_at)
            .and_then(|release| release.published_at))
    }
}
