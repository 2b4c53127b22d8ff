//! GitHub client implementing the release, issue and content services over octocrab

use super::models::{Issue, NewRelease, ReleaseAsset, ReleasePatch, RemoteFile, RemoteRelease};
use super::repo::RepoCoordinates;
use super::{ContentService, IssueTracker, ReleaseService};
use crate::error::{ReleaseError, RemoteServiceError, Result};
use bytes::Bytes;
use octocrab::repos::RepoHandler;
use octocrab::{Octocrab, models, params};
use std::sync::OnceLock;
use std::time::Duration;

/// Public GitHub API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Public GitHub asset upload endpoint
pub const DEFAULT_UPLOAD_URL: &str = "https://uploads.github.com";

/// Content type octocrab sends asset uploads with
const UPLOAD_CONTENT_TYPE: &str = "application/octet-stream";
const PER_PAGE: u8 = 100;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Guards the one-time rustls crypto provider installation
static CRYPTO_PROVIDER: OnceLock<()> = OnceLock::new();

/// Authenticated GitHub client bound to one repository.
///
/// Constructed once per run and passed by reference to every component.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    crab: Octocrab,
    repo: RepoCoordinates,
}

impl GitHubClient {
    /// Create a client for the public GitHub endpoints
    pub fn new(repo: RepoCoordinates, token: &str) -> Result<Self> {
        Self::with_base_urls(repo, token, DEFAULT_API_URL, DEFAULT_UPLOAD_URL)
    }

    /// Create a client against custom endpoints (GitHub Enterprise, test servers)
    pub fn with_base_urls(
        repo: RepoCoordinates,
        token: &str,
        api_url: &str,
        upload_url: &str,
    ) -> Result<Self> {
        CRYPTO_PROVIDER.get_or_init(|| {
            // Fails only when another provider is already installed
            if rustls::crypto::ring::default_provider()
                .install_default()
                .is_err()
            {
                log::debug!("rustls crypto provider already installed");
            }
        });

        let operation = "github_client_init";
        let crab = Octocrab::builder()
            .personal_token(token.to_string())
            .set_read_timeout(Some(REQUEST_TIMEOUT))
            .base_uri(api_url)
            .map_err(|e| remote_error(operation, e))?
            .upload_uri(upload_url)
            .map_err(|e| remote_error(operation, e))?
            .build()
            .map_err(|e| remote_error(operation, e))?;

        Ok(Self { crab, repo })
    }

    /// Repository this client is bound to
    pub fn repo(&self) -> &RepoCoordinates {
        &self.repo
    }

    fn repos(&self) -> RepoHandler<'_> {
        self.crab.repos(&self.repo.owner, &self.repo.name)
    }
}

/// Map an octocrab failure onto the service error taxonomy
fn remote_error(operation: &str, error: octocrab::Error) -> ReleaseError {
    let operation = operation.to_string();
    match error {
        octocrab::Error::GitHub { source, .. } => RemoteServiceError::Status {
            operation,
            status: source.status_code.as_u16(),
            message: source.message.clone(),
        },
        octocrab::Error::Serde { source, .. } => RemoteServiceError::InvalidResponse {
            operation,
            reason: source.to_string(),
        },
        octocrab::Error::Json { source, .. } => RemoteServiceError::InvalidResponse {
            operation,
            reason: source.to_string(),
        },
        other => RemoteServiceError::Transport {
            operation,
            source: other,
        },
    }
    .into()
}

fn is_not_found(error: &octocrab::Error) -> bool {
    matches!(error, octocrab::Error::GitHub { source, .. } if source.status_code.as_u16() == 404)
}

impl From<models::repos::Asset> for ReleaseAsset {
    fn from(asset: models::repos::Asset) -> Self {
        Self {
            id: asset.id.0,
            name: asset.name,
            content_type: asset.content_type,
            size: u64::try_from(asset.size).unwrap_or(0),
            browser_download_url: asset.browser_download_url.to_string(),
        }
    }
}

impl From<models::repos::Release> for RemoteRelease {
    fn from(release: models::repos::Release) -> Self {
        Self {
            id: release.id.0,
            name: release.name.unwrap_or_default(),
            tag_name: release.tag_name,
            html_url: release.html_url.to_string(),
            draft: release.draft,
            prerelease: release.prerelease,
            // Only drafts lack a creation time in practice
            created_at: release
                .created_at
                .or(release.published_at)
                .unwrap_or_default(),
            published_at: release.published_at,
            body: release.body,
            assets: release.assets.into_iter().map(ReleaseAsset::from).collect(),
        }
    }
}

impl From<models::issues::Issue> for Issue {
    fn from(issue: models::issues::Issue) -> Self {
        Self {
            title: issue.title,
            html_url: issue.html_url.to_string(),
            milestone_title: issue.milestone.map(|m| m.title),
            labels: issue.labels.into_iter().map(|l| l.name).collect(),
            closed_at: issue.closed_at,
        }
    }
}

impl ReleaseService for GitHubClient {
    async fn list_releases(&self) -> Result<Vec<RemoteRelease>> {
        let operation = "list_releases";
        let page = self
            .repos()
            .releases()
            .list()
            .per_page(PER_PAGE)
            .send()
            .await
            .map_err(|e| remote_error(operation, e))?;
        let releases = self
            .crab
            .all_pages(page)
            .await
            .map_err(|e| remote_error(operation, e))?;

        log::debug!("{}: fetched {} release(s)", operation, releases.len());
        Ok(releases.into_iter().map(RemoteRelease::from).collect())
    }

    async fn create_release(&self, release: &NewRelease) -> Result<RemoteRelease> {
        let repo = self.repos();
        let releases = repo.releases();
        let mut builder = releases
            .create(&release.tag_name)
            .name(&release.name)
            .draft(release.draft)
            .prerelease(release.prerelease);
        if let Some(body) = &release.body {
            builder = builder.body(body);
        }

        let created = builder
            .send()
            .await
            .map_err(|e| remote_error("create_release", e))?;
        Ok(created.into())
    }

    async fn edit_release(&self, release_id: u64, patch: &ReleasePatch) -> Result<RemoteRelease> {
        let repo = self.repos();
        let releases = repo.releases();
        let mut builder = releases.update(release_id);
        if let Some(body) = &patch.body {
            builder = builder.body(body);
        }
        if let Some(draft) = patch.draft {
            builder = builder.draft(draft);
        }

        let edited = builder
            .send()
            .await
            .map_err(|e| remote_error("edit_release", e))?;
        Ok(edited.into())
    }

    async fn delete_release(&self, release_id: u64) -> Result<()> {
        self.repos()
            .releases()
            .delete(release_id)
            .await
            .map_err(|e| remote_error("delete_release", e))
    }

    async fn upload_asset(
        &self,
        release: &RemoteRelease,
        name: &str,
        content_type: &str,
        content: Bytes,
    ) -> Result<ReleaseAsset> {
        let operation = "upload_asset";
        if content_type != UPLOAD_CONTENT_TYPE {
            return Err(RemoteServiceError::Unsupported {
                operation: operation.to_string(),
                reason: format!(
                    "assets are uploaded as {}, not {}",
                    UPLOAD_CONTENT_TYPE, content_type
                ),
            }
            .into());
        }

        let asset = self
            .repos()
            .releases()
            .upload_asset(release.id, name, content)
            .send()
            .await
            .map_err(|e| remote_error(operation, e))?;
        Ok(asset.into())
    }

    async fn delete_asset(&self, asset_id: u64) -> Result<()> {
        self.repos()
            .release_assets()
            .delete(asset_id)
            .await
            .map_err(|e| remote_error("delete_asset", e))
    }
}

impl IssueTracker for GitHubClient {
    async fn list_closed_issues(&self) -> Result<Vec<Issue>> {
        let operation = "list_closed_issues";
        let page = self
            .crab
            .issues(&self.repo.owner, &self.repo.name)
            .list()
            .state(params::State::Closed)
            .per_page(PER_PAGE)
            .send()
            .await
            .map_err(|e| remote_error(operation, e))?;
        let issues = self
            .crab
            .all_pages(page)
            .await
            .map_err(|e| remote_error(operation, e))?;

        Ok(issues
            .into_iter()
            .filter(|issue| issue.pull_request.is_none())
            .map(Issue::from)
            .collect())
    }
}

impl ContentService for GitHubClient {
    async fn get_file(&self, path: &str) -> Result<Option<RemoteFile>> {
        let items = match self.repos().get_content().path(path).send().await {
            Ok(items) => items,
            Err(e) if is_not_found(&e) => return Ok(None),
            Err(e) => return Err(remote_error("get_file", e)),
        };

        Ok(items.items.into_iter().next().map(|content| RemoteFile {
            path: content.path,
            sha: content.sha,
            size: u64::try_from(content.size).unwrap_or(0),
        }))
    }

    async fn commit_file(
        &self,
        path: &str,
        content: &str,
        message: &str,
        expected_sha: &str,
    ) -> Result<()> {
        self.repos()
            .update_file(path, message, content, expected_sha)
            .send()
            .await
            .map_err(|e| remote_error("commit_file", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use serde_json::json;

    fn octocrab_release(
        created_at: Option<&str>,
        published_at: Option<&str>,
    ) -> models::repos::Release {
        let author = json!({
            "login": "octocat",
            "id": 1,
            "node_id": "MDQ6VXNlcjE=",
            "avatar_url": "https://github.com/images/error/octocat_happy.gif",
            "gravatar_id": "",
            "url": "https://api.github.com/users/octocat",
            "html_url": "https://github.com/octocat",
            "followers_url": "https://api.github.com/users/octocat/followers",
            "following_url": "https://api.github.com/users/octocat/following{/other_user}",
            "gists_url": "https://api.github.com/users/octocat/gists{/gist_id}",
            "starred_url": "https://api.github.com/users/octocat/starred{/owner}{/repo}",
            "subscriptions_url": "https://api.github.com/users/octocat/subscriptions",
            "organizations_url": "https://api.github.com/users/octocat/orgs",
            "repos_url": "https://api.github.com/users/octocat/repos",
            "events_url": "https://api.github.com/users/octocat/events{/privacy}",
            "received_events_url": "https://api.github.com/users/octocat/received_events",
            "type": "User",
            "site_admin": false
        });
        serde_json::from_value(json!({
            "url": "https://api.github.com/repos/octo/tools/releases/1",
            "html_url": "https://github.com/octo/tools/releases/tag/1.0.0",
            "assets_url": "https://api.github.com/repos/octo/tools/releases/1/assets",
            "upload_url": "https://uploads.github.com/repos/octo/tools/releases/1/assets{?name,label}",
            "tarball_url": null,
            "zipball_url": null,
            "id": 1,
            "node_id": "MDc6UmVsZWFzZTE=",
            "tag_name": "1.0.0",
            "target_commitish": "main",
            "name": null,
            "body": null,
            "draft": true,
            "prerelease": false,
            "created_at": created_at,
            "published_at": published_at,
            "author": author,
            "assets": []
        }))
        .expect("release payload")
    }

    #[test]
    fn test_release_without_name_maps_to_empty_name() {
        let release = RemoteRelease::from(octocrab_release(Some("2024-05-01T10:00:00Z"), None));
        assert_eq!(release.name, "");
        assert_eq!(release.tag_name, "1.0.0");
        assert!(release.draft);
        assert_eq!(release.created_at.to_rfc3339(), "2024-05-01T10:00:00+00:00");
    }

    #[test]
    fn test_missing_creation_time_falls_back_to_publication() {
        let published = RemoteRelease::from(octocrab_release(None, Some("2024-05-02T08:00:00Z")));
        assert_eq!(published.created_at.to_rfc3339(), "2024-05-02T08:00:00+00:00");

        let neither = RemoteRelease::from(octocrab_release(None, None));
        assert_eq!(neither.created_at, DateTime::<Utc>::default());
    }
}
