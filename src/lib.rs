//! # Kodegen Release Sync
//!
//! Publishes a GitHub release for a versioned build and keeps its changelog in sync.
//!
//! A run resolves the version from a local artifact, creates or updates the release
//! named after it, uploads the release attachments, attaches a changelog built from
//! the closed issues of the matching milestone, and can rebuild the repository's
//! `CHANGELOG.md` from the complete release history.
//!
//! ## Usage
//!
//! ```bash
//! kodegen_release_sync --github-repo owner/repo --file-for-version Cargo.toml
//! kodegen_release_sync --config release.toml --pre-release --create-changelog-file
//! ```
//!
//! The release logic is written against the traits in [`github`] and [`fs`], so it
//! can run against any implementation of them.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod changelog;
pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod github;
pub mod orchestrator;
pub mod release;
pub mod settings;
pub mod version;

// Re-export main types for public API
pub use changelog::{ChangelogAggregator, ChangelogFileAggregator};
pub use cli::Args;
pub use config::{FileConfig, SettingsBuilder};
pub use error::{CliError, ConfigError, ReleaseError, Result};
pub use fs::{FileSystem, LocalFileSystem};
pub use github::{ContentService, GitHubClient, IssueTracker, ReleaseService, RepoCoordinates};
pub use orchestrator::{ReleaseOrchestrator, RunReport};
pub use release::{AttachmentUploader, ReleaseSynchronizer, UploadOutcome};
pub use settings::{LabelHeader, ReleaseSettings};
pub use version::VersionIdentifier;
