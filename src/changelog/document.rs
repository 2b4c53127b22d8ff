//! Cumulative CHANGELOG.md rebuilt from the full release history

use super::aggregator::PRE_RELEASE_WARNING;
use crate::error::{ReleaseError, Result};
use crate::github::{ContentService, ReleaseService, RemoteRelease};
use crate::version::VersionIdentifier;
use chrono::TimeDelta;

/// Repository path of the cumulative changelog
pub const CHANGELOG_PATH: &str = "CHANGELOG.md";

/// Commit message used when updating the changelog
pub const CHANGELOG_COMMIT_MESSAGE: &str = "Changelog";

/// Hours added to release creation times before display
pub const CREATED_AT_CORRECTION_HOURS: i64 = 24;

/// Rebuilds CHANGELOG.md from every published release and commits it
pub struct ChangelogFileAggregator<'a, C> {
    client: &'a C,
}

impl<'a, C: ReleaseService + ContentService> ChangelogFileAggregator<'a, C> {
    /// Create an aggregator
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Render the document from the current release list and commit it.
    ///
    /// Fails with [`ReleaseError::ChangelogTargetNotFound`] when the file does not
    /// exist yet; it is only ever updated.
    pub async fn update(&self) -> Result<String> {
        log::info!("Creating {}", CHANGELOG_PATH);

        let releases = self.client.list_releases().await?;
        let document = render_document(&releases);

        let current = self.client.get_file(CHANGELOG_PATH).await?.ok_or_else(|| {
            ReleaseError::ChangelogTargetNotFound {
                path: CHANGELOG_PATH.to_string(),
            }
        })?;

        log::debug!(
            "Replacing {} ({} bytes, blob {})",
            current.path,
            current.size,
            current.sha
        );
        self.client
            .commit_file(
                CHANGELOG_PATH,
                &document,
                CHANGELOG_COMMIT_MESSAGE,
                &current.sha,
            )
            .await?;

        log::info!("Committed {} ({} bytes)", CHANGELOG_PATH, document.len());
        Ok(document)
    }
}

/// Render the cumulative document: newest release first, drafts skipped.
pub fn render_document(releases: &[RemoteRelease]) -> String {
    let mut ordered: Vec<&RemoteRelease> = releases.iter().filter(|r| !r.draft).collect();
    ordered.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let mut out = String::new();
    for release in ordered {
        match render_release(release) {
            Some(section) => out.push_str(&section),
            None => log::warn!(
                "Skipping release '{}': name is not a version",
                release.name
            ),
        }
    }
    out
}

/// Render one release section, `None` when its name is not a version
pub fn render_release(release: &RemoteRelease) -> Option<String> {
    let version = VersionIdentifier::parse(&release.name)?;

    let created = release.created_at + TimeDelta::hours(CREATED_AT_CORRECTION_HOURS);
    let date = created.format("%Y-%m-%d %H:%M");
    let pre_release = if release.prerelease { " | Pre-release" } else { "" };

    let mut out = format!(
        "## [{}]({})\n\n`Build: {} | Date (UTC): {}{}`\n\n",
        version.milestone_key(),
        release.html_url,
        version.build,
        date,
        pre_release
    );

    let body = release.body.as_deref().unwrap_or_default().trim();
    let body = body.replace(PRE_RELEASE_WARNING, "");
    for line in body.split('\n') {
        if !line.starts_with('|') {
            out.push_str(line.trim_end_matches('\r'));
            out.push('\n');
        }
    }
    out.push('\n');

    Some(out)
}
