//! Validated, read-only settings for one run

use crate::github::RepoCoordinates;
use std::fmt;
use std::path::PathBuf;

/// Maps an issue label to the changelog heading it is grouped under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelHeader {
    /// Label name, matched exactly
    pub label: String,
    /// Heading rendered in the changelog
    pub header: String,
}

impl LabelHeader {
    /// Create a mapping entry
    pub fn new(label: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            header: header.into(),
        }
    }
}

/// Settings for one synchronization run.
///
/// `label_headers` is ordered: when an issue carries several mapped labels, the
/// entry declared first decides its heading.
#[derive(Clone, PartialEq, Eq)]
pub struct ReleaseSettings {
    /// Target repository
    pub repo: RepoCoordinates,
    /// API token
    pub auth_token: String,
    /// Artifact the version is read from
    pub artifact_path: PathBuf,
    /// Mark the release as pre-release
    pub is_pre_release: bool,
    /// Create or keep the release as draft
    pub is_draft: bool,
    /// Update an existing release instead of replacing it
    pub is_update_only: bool,
    /// Rebuild and commit CHANGELOG.md after the release
    pub create_changelog_file: bool,
    /// Issues carrying this label (any case) never appear in the changelog
    pub issue_filter_label: Option<String>,
    /// Ordered label → heading mapping; empty means no grouping
    pub label_headers: Vec<LabelHeader>,
    /// Files uploaded as assets, in this order
    pub attachment_paths: Vec<PathBuf>,
    /// Delete local attachment files after a fully successful upload
    pub delete_attachments_after_upload: bool,
}

impl fmt::Debug for ReleaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReleaseSettings")
            .field("repo", &self.repo)
            .field("auth_token", &"***")
            .field("artifact_path", &self.artifact_path)
            .field("is_pre_release", &self.is_pre_release)
            .field("is_draft", &self.is_draft)
            .field("is_update_only", &self.is_update_only)
            .field("create_changelog_file", &self.create_changelog_file)
            .field("issue_filter_label", &self.issue_filter_label)
            .field("label_headers", &self.label_headers)
            .field("attachment_paths", &self.attachment_paths)
            .field(
                "delete_attachments_after_upload",
                &self.delete_attachments_after_upload,
            )
            .finish()
    }
}

impl ReleaseSettings {
    /// Settings with every option off, for the given repository, token and artifact
    pub fn new(
        repo: RepoCoordinates,
        auth_token: impl Into<String>,
        artifact_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            repo,
            auth_token: auth_token.into(),
            artifact_path: artifact_path.into(),
            is_pre_release: false,
            is_draft: false,
            is_update_only: false,
            create_changelog_file: false,
            issue_filter_label: None,
            label_headers: Vec::new(),
            attachment_paths: Vec::new(),
            delete_attachments_after_upload: false,
        }
    }
}
