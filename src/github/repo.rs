//! Repository coordinates (`owner/repo`) parsing

use crate::error::{ConfigError, Result};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Owner and name of a GitHub repository
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoCoordinates {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepoCoordinates {
    /// Create coordinates from owner and name
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse `owner/repo`, an HTTPS GitHub URL, or an SSH remote
    /// (`git@github.com:owner/repo.git`).
    pub fn parse(input: &str) -> Result<Self> {
        static GITHUB_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^(?:https?://|ssh://git@|git@)github\.com[:/](?P<owner>[^/]+)/(?P<repo>[^/]+?)(?:\.git)?/?$")
                .expect("GitHub URL regex is valid")
        });

        let input = input.trim();

        if let Some(caps) = GITHUB_URL_RE.captures(input) {
            return Ok(Self::new(&caps["owner"], &caps["repo"]));
        }

        let parts: Vec<&str> = input.split('/').collect();
        match parts.as_slice() {
            [owner, repo] if !owner.is_empty() && !repo.is_empty() => {
                Ok(Self::new(*owner, repo.trim_end_matches(".git")))
            }
            _ => Err(ConfigError::Invalid {
                setting: "repo".to_string(),
                reason: format!(
                    "Invalid GitHub repository format: '{}'. Expected: owner/repo",
                    input
                ),
            }
            .into()),
        }
    }
}

impl fmt::Display for RepoCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
