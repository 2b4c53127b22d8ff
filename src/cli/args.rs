//! Command line argument parsing.
//!
//! Flags override values from `--config`; boolean flags can only switch an option
//! on, so a config file value of `true` stays in effect when the flag is absent.

use crate::config::{SettingsBuilder, parse_label_header};
use crate::error::CliError;
use crate::github::{DEFAULT_API_URL, DEFAULT_UPLOAD_URL};
use crate::settings::LabelHeader;
use clap::Parser;
use std::path::PathBuf;

/// Publish a GitHub release with attachments and a milestone changelog
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_release_sync",
    version,
    about = "Publish a GitHub release with attachments and a milestone changelog",
    long_about = "Create or update the GitHub release named after a version, upload its attachments,
attach a changelog built from the closed issues of the matching milestone, and
optionally rebuild CHANGELOG.md from the release history.

Usage:
  kodegen_release_sync --github-repo owner/repo --file-for-version Cargo.toml
  kodegen_release_sync --config release.toml --pre-release
  kodegen_release_sync --github-repo owner/repo --file-for-version VERSION \\
      --issue-label bug=Fixes --issue-label feature=Features \\
      --release-attachment dist/setup.exe --create-changelog-file"
)]
pub struct Args {
    /// Repository: owner/repo or GitHub URL
    #[arg(long, value_name = "OWNER/REPO")]
    pub github_repo: Option<String>,

    /// API token (defaults to GH_TOKEN or GITHUB_TOKEN)
    #[arg(long, value_name = "TOKEN")]
    pub github_token: Option<String>,

    /// File the release version is read from (Cargo.toml or a plain version file)
    #[arg(long, value_name = "FILE")]
    pub file_for_version: Option<PathBuf>,

    /// Mark the release as pre-release and only list issues closed since the last release
    #[arg(long)]
    pub pre_release: bool,

    /// Create the release as draft
    #[arg(long)]
    pub draft: bool,

    /// Update the existing release instead of replacing it
    #[arg(long)]
    pub update_only: bool,

    /// Rebuild and commit CHANGELOG.md from all releases
    #[arg(long)]
    pub create_changelog_file: bool,

    /// Issues carrying this label are left out of the changelog
    #[arg(long, value_name = "LABEL")]
    pub issue_filter_label: Option<String>,

    /// Group issues with LABEL under HEADER (repeatable, first match wins)
    #[arg(long = "issue-label", value_name = "LABEL=HEADER", value_parser = parse_label_header)]
    pub issue_labels: Vec<LabelHeader>,

    /// File uploaded as release asset (repeatable, uploaded in order)
    #[arg(long = "release-attachment", value_name = "FILE")]
    pub release_attachments: Vec<PathBuf>,

    /// Delete attachment files after all of them uploaded successfully
    #[arg(long)]
    pub delete_attachments: bool,

    /// TOML config file with defaults for the options above
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// GitHub API base URL
    #[arg(long, value_name = "URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// GitHub asset upload base URL
    #[arg(long, value_name = "URL", default_value = DEFAULT_UPLOAD_URL)]
    pub upload_url: String,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments that do not depend on other settings layers
    pub fn validate(&self) -> Result<(), CliError> {
        for (flag, url) in [("--api-url", &self.api_url), ("--upload-url", &self.upload_url)] {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(CliError::InvalidArguments {
                    reason: format!("{} must be an http(s) URL, got '{}'", flag, url),
                });
            }
        }
        Ok(())
    }

    /// Settings layer contributed by the command line
    pub fn settings_overrides(&self) -> SettingsBuilder {
        SettingsBuilder {
            repo: self.github_repo.clone(),
            token: self.github_token.clone(),
            artifact_path: self.file_for_version.clone(),
            pre_release: self.pre_release.then_some(true),
            draft: self.draft.then_some(true),
            update_only: self.update_only.then_some(true),
            create_changelog_file: self.create_changelog_file.then_some(true),
            issue_filter_label: self.issue_filter_label.clone(),
            label_headers: (!self.issue_labels.is_empty()).then(|| self.issue_labels.clone()),
            attachments: (!self.release_attachments.is_empty())
                .then(|| self.release_attachments.clone()),
            delete_attachments: self.delete_attachments.then_some(true),
        }
    }
}
