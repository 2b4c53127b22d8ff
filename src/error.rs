//! Error types for release synchronization.
//!
//! Every variant is fatal for a run. Each category maps to its own process exit
//! status and carries actionable recovery suggestions.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for release synchronization operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all release synchronization operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// The versioned artifact could not be read or carries no usable version
    #[error("Invalid version source {path}: {reason}")]
    InvalidVersionSource {
        /// Artifact path
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },

    /// Update mode found no release to update
    #[error("Release '{name}' not found. Create it first or run without --update-only.")]
    ReleaseNotFound {
        /// Release name that was looked up
        name: String,
    },

    /// The changelog document does not exist in the repository
    #[error("Changelog file '{path}' not found in repository. It must exist before it can be updated.")]
    ChangelogTargetNotFound {
        /// Repository path of the document
        path: String,
    },

    /// Remote API failures
    #[error("GitHub error: {0}")]
    RemoteService(#[from] RemoteServiceError),

    /// Local attachment file failures
    #[error("Local file error: {0}")]
    LocalFile(#[from] LocalFileError),

    /// Settings could not be resolved
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),
}

/// Failures talking to the repository-hosting service
#[derive(Error, Debug)]
pub enum RemoteServiceError {
    /// Request never produced a response (connect, TLS, timeout)
    #[error("{operation} failed: {source}")]
    Transport {
        /// Operation that failed
        operation: String,
        /// Underlying client error
        #[source]
        source: octocrab::Error,
    },

    /// Service answered with a non-success status
    #[error("{operation} returned HTTP {status}: {message}")]
    Status {
        /// Operation that failed
        operation: String,
        /// HTTP status code
        status: u16,
        /// Message reported by the service
        message: String,
    },

    /// Request cannot be expressed through the client
    #[error("{operation} is not supported: {reason}")]
    Unsupported {
        /// Operation that was requested
        operation: String,
        /// Reason for the error
        reason: String,
    },

    /// Response body could not be interpreted
    #[error("{operation} returned an unreadable response: {reason}")]
    InvalidResponse {
        /// Operation that failed
        operation: String,
        /// Reason for the error
        reason: String,
    },
}

/// Local attachment file errors
#[derive(Error, Debug)]
pub enum LocalFileError {
    /// File disappeared after settings were validated
    #[error("Attachment not found: {path}")]
    Missing {
        /// File path
        path: PathBuf,
    },

    /// File could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        /// File path
        path: PathBuf,
        /// IO error
        #[source]
        source: std::io::Error,
    },

    /// File could not be deleted after upload
    #[error("Failed to delete {path}: {source}")]
    Delete {
        /// File path
        path: PathBuf,
        /// IO error
        #[source]
        source: std::io::Error,
    },

    /// Path has no usable file name to publish the asset under
    #[error("Attachment path has no file name: {path}")]
    InvalidName {
        /// File path
        path: PathBuf,
    },
}

/// Settings resolution errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required setting was not supplied by any layer
    #[error("Missing required setting: {setting}")]
    Missing {
        /// Setting name
        setting: String,
    },

    /// Setting has an unusable value
    #[error("Invalid value for {setting}: {reason}")]
    Invalid {
        /// Setting name
        setting: String,
        /// Reason for the error
        reason: String,
    },

    /// A referenced local file does not exist
    #[error("File not found: {path}")]
    FileNotFound {
        /// File path
        path: PathBuf,
    },

    /// Config file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Read {
        /// Config file path
        path: PathBuf,
        /// IO error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for the settings schema
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        /// Config file path
        path: PathBuf,
        /// TOML error
        #[source]
        source: toml::de::Error,
    },
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl ReleaseError {
    /// Process exit status for this error category
    pub fn exit_code(&self) -> i32 {
        match self {
            ReleaseError::Config(_) | ReleaseError::Cli(_) => 2,
            ReleaseError::InvalidVersionSource { .. } => 3,
            ReleaseError::ReleaseNotFound { .. } => 4,
            ReleaseError::ChangelogTargetNotFound { .. } => 5,
            ReleaseError::RemoteService(_) => 6,
            ReleaseError::LocalFile(_) => 7,
        }
    }

    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaseError::InvalidVersionSource { path, .. } => vec![
                format!("Check that {} is readable", path.display()),
                "Use a Cargo.toml with [package] version or a file containing major.minor.patch[.build]"
                    .to_string(),
            ],
            ReleaseError::ReleaseNotFound { name } => vec![
                format!("Create release '{}' by running without --update-only", name),
                "Verify the version source matches the release name on GitHub".to_string(),
            ],
            ReleaseError::ChangelogTargetNotFound { path } => vec![
                format!("Commit an initial {} to the default branch", path),
                "Or run without --create-changelog-file".to_string(),
            ],
            ReleaseError::RemoteService(RemoteServiceError::Status { status: 401, .. })
            | ReleaseError::RemoteService(RemoteServiceError::Status { status: 403, .. }) => vec![
                "Verify the token is valid: set GH_TOKEN or GITHUB_TOKEN, or pass --github-token"
                    .to_string(),
                "Ensure the token has 'repo' (contents: write) permissions".to_string(),
            ],
            ReleaseError::RemoteService(RemoteServiceError::Transport { .. }) => vec![
                "Check network connectivity to the GitHub API".to_string(),
                "The release may be partially updated; inspect it before re-running".to_string(),
            ],
            ReleaseError::LocalFile(_) => vec![
                "Verify attachment paths exist and are readable".to_string(),
            ],
            ReleaseError::Config(_) | ReleaseError::Cli(_) => vec![
                "Run with --help to see the accepted arguments".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
