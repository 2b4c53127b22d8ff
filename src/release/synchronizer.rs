//! Brings the remote release for a version into its desired state

use super::attachments::{AttachmentUploader, UploadOutcome};
use crate::error::{ReleaseError, Result};
use crate::fs::FileSystem;
use crate::github::{NewRelease, ReleasePatch, ReleaseService, RemoteRelease};
use crate::settings::ReleaseSettings;
use crate::version::VersionIdentifier;

/// Release record after synchronization, with the attachment batch result
#[derive(Debug)]
pub struct SyncResult {
    /// Release as it stands after the base-state calls
    pub release: RemoteRelease,
    /// Attachment batch outcome
    pub uploads: UploadOutcome,
}

/// Creates, replaces or updates the release named after the full version identifier.
///
/// Remote calls are not retried; the first failure aborts synchronization.
pub struct ReleaseSynchronizer<'a, S, F> {
    service: &'a S,
    fs: &'a F,
    settings: &'a ReleaseSettings,
}

impl<'a, S: ReleaseService, F: FileSystem> ReleaseSynchronizer<'a, S, F> {
    /// Create a synchronizer
    pub fn new(service: &'a S, fs: &'a F, settings: &'a ReleaseSettings) -> Self {
        Self {
            service,
            fs,
            settings,
        }
    }

    /// Synchronize in the mode selected by `settings.is_update_only`, then upload
    /// the configured attachments.
    pub async fn synchronize(&self, version: &VersionIdentifier) -> Result<SyncResult> {
        let release = if self.settings.is_update_only {
            self.update(version).await?
        } else {
            self.replace(version).await?
        };

        let uploader = AttachmentUploader::new(
            self.service,
            self.fs,
            self.settings.delete_attachments_after_upload,
        );
        let uploads = uploader
            .upload(&release, &self.settings.attachment_paths)
            .await?;

        Ok(SyncResult { release, uploads })
    }

    /// Replace mode: delete every release carrying the name, then create it fresh.
    async fn replace(&self, version: &VersionIdentifier) -> Result<RemoteRelease> {
        let name = version.full_identifier();

        let existing: Vec<RemoteRelease> = self
            .service
            .list_releases()
            .await?
            .into_iter()
            .filter(|release| release.name == name)
            .collect();

        for release in &existing {
            log::info!("Removing existing release {} (id {})", name, release.id);
            self.service.delete_release(release.id).await?;
        }

        log::info!("Creating release {}", name);
        let new_release = NewRelease {
            tag_name: name.clone(),
            name,
            draft: self.settings.is_draft,
            prerelease: self.settings.is_pre_release,
            body: None,
        };
        self.service.create_release(&new_release).await
    }

    /// Update mode: edit the draft flag in place and clear every attached asset.
    async fn update(&self, version: &VersionIdentifier) -> Result<RemoteRelease> {
        let name = version.full_identifier();

        let release = self
            .service
            .get_release(&name)
            .await?
            .ok_or_else(|| ReleaseError::ReleaseNotFound { name: name.clone() })?;

        log::info!("Updating release {} (id {})", name, release.id);
        let mut release = self
            .service
            .edit_release(release.id, &ReleasePatch::draft(self.settings.is_draft))
            .await?;

        for asset in &release.assets {
            log::info!("Removing asset {}", asset.name);
            self.service.delete_asset(asset.id).await?;
        }
        release.assets.clear();

        Ok(release)
    }
}
