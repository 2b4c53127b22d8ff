//! Top-level coordination of one release run

use crate::changelog::{ChangelogAggregator, ChangelogFileAggregator};
use crate::error::Result;
use crate::fs::FileSystem;
use crate::github::{ContentService, IssueTracker, ReleaseService, RemoteRelease};
use crate::release::{ReleaseSynchronizer, UploadOutcome};
use crate::settings::ReleaseSettings;
use crate::version::{self, VersionIdentifier};

/// Everything a run produced
#[derive(Debug)]
pub struct RunReport {
    /// Version the run released
    pub version: VersionIdentifier,
    /// Final state of the release
    pub release: RemoteRelease,
    /// Attachment batch outcome
    pub uploads: UploadOutcome,
    /// Changelog body stored on the release
    pub changelog: String,
    /// Committed CHANGELOG.md content, when enabled
    pub changelog_document: Option<String>,
}

/// Runs version resolution, release synchronization, changelog attachment and the
/// optional CHANGELOG.md update, strictly in that order.
pub struct ReleaseOrchestrator<'a, C, F> {
    client: &'a C,
    fs: &'a F,
    settings: &'a ReleaseSettings,
}

impl<'a, C, F> ReleaseOrchestrator<'a, C, F>
where
    C: ReleaseService + IssueTracker + ContentService,
    F: FileSystem,
{
    /// Create an orchestrator over an explicitly constructed client
    pub fn new(client: &'a C, fs: &'a F, settings: &'a ReleaseSettings) -> Self {
        Self {
            client,
            fs,
            settings,
        }
    }

    /// Resolve the version from the configured artifact and run
    pub async fn run(&self) -> Result<RunReport> {
        let version = version::resolve(&self.settings.artifact_path)?;
        self.run_for_version(version).await
    }

    /// Run for an already resolved version
    pub async fn run_for_version(&self, version: VersionIdentifier) -> Result<RunReport> {
        log::info!(
            "Releasing {} (milestone {}) to {}",
            version.full_identifier(),
            version.milestone_key(),
            self.settings.repo
        );

        let synced = ReleaseSynchronizer::new(self.client, self.fs, self.settings)
            .synchronize(&version)
            .await?;

        if let UploadOutcome::Failed {
            failed_path, error, ..
        } = &synced.uploads
        {
            log::warn!(
                "Attachment upload stopped at {}: {}. Local files were kept.",
                failed_path.display(),
                error
            );
        }

        let release = ChangelogAggregator::new(self.client, self.settings)
            .attach(&version, &synced.release)
            .await?;
        let changelog = release.body.clone().unwrap_or_default();

        let changelog_document = if self.settings.create_changelog_file {
            Some(ChangelogFileAggregator::new(self.client).update().await?)
        } else {
            None
        };

        Ok(RunReport {
            version,
            release,
            uploads: synced.uploads,
            changelog,
            changelog_document,
        })
    }
}
