//! Settings resolution from CLI flags, an optional TOML config file and the environment.
//!
//! Precedence, highest first: CLI flags, config file, environment (token only).
//! Validation of local paths happens here so the release core can assume the
//! version source and every attachment existed when the run started.

use crate::error::{ConfigError, Result};
use crate::github::RepoCoordinates;
use crate::settings::{LabelHeader, ReleaseSettings};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variables consulted for the API token, in order
pub const TOKEN_ENV_VARS: [&str; 2] = ["GH_TOKEN", "GITHUB_TOKEN"];

/// Contents of a `release.toml` config file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Repository as `owner/repo` or URL
    pub repo: Option<String>,
    /// API token
    pub token: Option<String>,
    /// Version source artifact
    pub version_file: Option<PathBuf>,
    /// Mark as pre-release
    pub pre_release: Option<bool>,
    /// Create as draft
    pub draft: Option<bool>,
    /// Update instead of replace
    pub update_only: Option<bool>,
    /// Commit CHANGELOG.md
    pub create_changelog_file: Option<bool>,
    /// Label that hides issues from the changelog
    pub issue_filter_label: Option<String>,
    /// Delete attachments after upload
    pub delete_attachments: Option<bool>,
    /// Attachment files
    #[serde(default)]
    pub attachments: Vec<PathBuf>,
    /// Ordered label → heading mapping
    #[serde(default)]
    pub labels: Vec<FileLabel>,
}

/// One `[[labels]]` entry
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileLabel {
    /// Issue label
    pub label: String,
    /// Changelog heading
    pub header: String,
}

impl FileConfig {
    /// Load a config file. Relative paths inside it are resolved against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: FileConfig =
            toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            config.version_file = config.version_file.map(|p| base.join(p));
            config.attachments = config
                .attachments
                .into_iter()
                .map(|p| base.join(p))
                .collect();
        }

        Ok(config)
    }
}

/// Layered, not-yet-validated settings
#[derive(Debug, Clone, Default)]
pub struct SettingsBuilder {
    /// Repository as `owner/repo` or URL
    pub repo: Option<String>,
    /// API token
    pub token: Option<String>,
    /// Version source artifact
    pub artifact_path: Option<PathBuf>,
    /// Mark as pre-release
    pub pre_release: Option<bool>,
    /// Create as draft
    pub draft: Option<bool>,
    /// Update instead of replace
    pub update_only: Option<bool>,
    /// Commit CHANGELOG.md
    pub create_changelog_file: Option<bool>,
    /// Label that hides issues from the changelog
    pub issue_filter_label: Option<String>,
    /// Ordered label → heading mapping
    pub label_headers: Option<Vec<LabelHeader>>,
    /// Attachment files
    pub attachments: Option<Vec<PathBuf>>,
    /// Delete attachments after upload
    pub delete_attachments: Option<bool>,
}

impl From<FileConfig> for SettingsBuilder {
    fn from(config: FileConfig) -> Self {
        Self {
            repo: config.repo,
            token: config.token,
            artifact_path: config.version_file,
            pre_release: config.pre_release,
            draft: config.draft,
            update_only: config.update_only,
            create_changelog_file: config.create_changelog_file,
            issue_filter_label: config.issue_filter_label,
            label_headers: (!config.labels.is_empty()).then(|| {
                config
                    .labels
                    .into_iter()
                    .map(|l| LabelHeader::new(l.label, l.header))
                    .collect()
            }),
            attachments: (!config.attachments.is_empty()).then_some(config.attachments),
            delete_attachments: config.delete_attachments,
        }
    }
}

impl SettingsBuilder {
    /// Overlay `higher`: every value it sets wins over the value in `self`
    pub fn overlay(self, higher: SettingsBuilder) -> Self {
        Self {
            repo: higher.repo.or(self.repo),
            token: higher.token.or(self.token),
            artifact_path: higher.artifact_path.or(self.artifact_path),
            pre_release: higher.pre_release.or(self.pre_release),
            draft: higher.draft.or(self.draft),
            update_only: higher.update_only.or(self.update_only),
            create_changelog_file: higher.create_changelog_file.or(self.create_changelog_file),
            issue_filter_label: higher.issue_filter_label.or(self.issue_filter_label),
            label_headers: higher.label_headers.or(self.label_headers),
            attachments: higher.attachments.or(self.attachments),
            delete_attachments: higher.delete_attachments.or(self.delete_attachments),
        }
    }

    /// Fill the token from the environment when no other layer set it
    pub fn with_env_token<E>(mut self, lookup: E) -> Self
    where
        E: Fn(&str) -> Option<String>,
    {
        if self.token.is_none() {
            self.token = TOKEN_ENV_VARS
                .iter()
                .find_map(|var| lookup(var).filter(|v| !v.trim().is_empty()));
        }
        self
    }

    /// Validate and produce the run settings
    pub fn build(self) -> Result<ReleaseSettings> {
        let repo = self.repo.ok_or_else(|| ConfigError::Missing {
            setting: "repo (--github-repo)".to_string(),
        })?;
        let repo = RepoCoordinates::parse(&repo)?;

        let auth_token = self
            .token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ConfigError::Missing {
                setting: "token (--github-token, GH_TOKEN or GITHUB_TOKEN)".to_string(),
            })?;

        let artifact_path = self.artifact_path.ok_or_else(|| ConfigError::Missing {
            setting: "version file (--file-for-version)".to_string(),
        })?;
        require_file(&artifact_path)?;

        let attachment_paths = self.attachments.unwrap_or_default();
        for attachment in &attachment_paths {
            require_file(attachment)?;
        }

        let issue_filter_label = self
            .issue_filter_label
            .map(|label| label.trim().to_string())
            .filter(|label| !label.is_empty());

        Ok(ReleaseSettings {
            repo,
            auth_token,
            artifact_path,
            is_pre_release: self.pre_release.unwrap_or(false),
            is_draft: self.draft.unwrap_or(false),
            is_update_only: self.update_only.unwrap_or(false),
            create_changelog_file: self.create_changelog_file.unwrap_or(false),
            issue_filter_label,
            label_headers: self.label_headers.unwrap_or_default(),
            attachment_paths,
            delete_attachments_after_upload: self.delete_attachments.unwrap_or(false),
        })
    }
}

/// Parse a `label=Header` CLI mapping
pub fn parse_label_header(input: &str) -> std::result::Result<LabelHeader, String> {
    let (label, header) = input
        .split_once('=')
        .ok_or_else(|| format!("expected label=Header, got '{}'", input))?;

    let (label, header) = (label.trim(), header.trim());
    if label.is_empty() || header.is_empty() {
        return Err(format!("label and header must be non-empty in '{}'", input));
    }

    Ok(LabelHeader::new(label, header))
}

fn require_file(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ConfigError::FileNotFound {
            path: path.to_path_buf(),
        }
        .into())
    }
}
