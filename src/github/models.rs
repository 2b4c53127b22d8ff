//! Release, asset, issue and content records exchanged with the hosting service

use chrono::{DateTime, Utc};

/// Snapshot of a release as returned by the service
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteRelease {
    /// Release ID
    pub id: u64,
    /// Display name (also the lookup key for synchronization)
    pub name: String,
    /// Tag the release points at
    pub tag_name: String,
    /// Release page URL
    pub html_url: String,
    /// Whether the release is a draft
    pub draft: bool,
    /// Whether the release is a pre-release
    pub prerelease: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Publication timestamp (drafts have none)
    pub published_at: Option<DateTime<Utc>>,
    /// Markdown body
    pub body: Option<String>,
    /// Attached assets
    pub assets: Vec<ReleaseAsset>,
}

/// Binary asset attached to a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseAsset {
    /// Asset ID
    pub id: u64,
    /// Asset file name
    pub name: String,
    /// Content type the asset was uploaded with
    pub content_type: String,
    /// Size in bytes
    pub size: u64,
    /// Download URL
    pub browser_download_url: String,
}

/// Parameters for creating a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRelease {
    /// Tag name
    pub tag_name: String,
    /// Release name
    pub name: String,
    /// Create as draft
    pub draft: bool,
    /// Mark as pre-release
    pub prerelease: bool,
    /// Markdown body
    pub body: Option<String>,
}

/// Partial update of a release; unset fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleasePatch {
    /// New body
    pub body: Option<String>,
    /// New draft flag
    pub draft: Option<bool>,
}

impl ReleasePatch {
    /// Patch that only changes the draft flag
    pub fn draft(draft: bool) -> Self {
        Self {
            draft: Some(draft),
            ..Self::default()
        }
    }

    /// Patch that only replaces the body
    pub fn body(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            ..Self::default()
        }
    }
}

/// Closed issue as seen by changelog aggregation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Issue title
    pub title: String,
    /// Issue page URL
    pub html_url: String,
    /// Title of the milestone the issue belongs to
    pub milestone_title: Option<String>,
    /// Label names
    pub labels: Vec<String>,
    /// When the issue was closed
    pub closed_at: Option<DateTime<Utc>>,
}

/// Metadata of a file stored in the repository.
///
/// Only the blob hash is needed to replace the file; its content is never decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    /// Repository path
    pub path: String,
    /// Blob hash required to commit an update
    pub sha: String,
    /// Size in bytes
    pub size: u64,
}
