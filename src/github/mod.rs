//! GitHub integration for release operations.
//!
//! The release core never talks HTTP directly. It is written against the three
//! service traits below, each scoped to one repository; [`GitHubClient`] implements
//! all of them over the GitHub REST API.

mod client;
mod models;
mod repo;

pub use client::{DEFAULT_API_URL, DEFAULT_UPLOAD_URL, GitHubClient};
pub use models::{Issue, NewRelease, ReleaseAsset, ReleasePatch, RemoteFile, RemoteRelease};
pub use repo::RepoCoordinates;

use crate::error::Result;
use bytes::Bytes;

/// Release records and their assets
#[allow(async_fn_in_trait)]
pub trait ReleaseService {
    /// List every release, drafts included
    async fn list_releases(&self) -> Result<Vec<RemoteRelease>>;

    /// Find a release by name
    async fn get_release(&self, name: &str) -> Result<Option<RemoteRelease>> {
        Ok(self
            .list_releases()
            .await?
            .into_iter()
            .find(|release| release.name == name))
    }

    /// Create a release
    async fn create_release(&self, release: &NewRelease) -> Result<RemoteRelease>;

    /// Apply a partial update to a release
    async fn edit_release(&self, release_id: u64, patch: &ReleasePatch) -> Result<RemoteRelease>;

    /// Delete a release (its tag is left in place)
    async fn delete_release(&self, release_id: u64) -> Result<()>;

    /// Upload one binary asset to a release
    async fn upload_asset(
        &self,
        release: &RemoteRelease,
        name: &str,
        content_type: &str,
        content: Bytes,
    ) -> Result<ReleaseAsset>;

    /// Delete one asset
    async fn delete_asset(&self, asset_id: u64) -> Result<()>;
}

/// Issue tracker queries
#[allow(async_fn_in_trait)]
pub trait IssueTracker {
    /// List every closed issue (pull requests excluded)
    async fn list_closed_issues(&self) -> Result<Vec<Issue>>;
}

/// Repository file contents
#[allow(async_fn_in_trait)]
pub trait ContentService {
    /// Fetch a file, `None` when it does not exist
    async fn get_file(&self, path: &str) -> Result<Option<RemoteFile>>;

    /// Commit new content for an existing file.
    ///
    /// `expected_sha` must be the hash of the current blob; the service rejects stale
    /// commits.
    async fn commit_file(
        &self,
        path: &str,
        content: &str,
        message: &str,
        expected_sha: &str,
    ) -> Result<()>;
}
