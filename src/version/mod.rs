//! Release version resolution.
//!
//! Reads a versioned artifact and derives the two identifiers a run works with:
//! the milestone key (`major.minor.patch`) used to correlate issues, and the full
//! identifier (`major.minor.patch.build`) used as release name and tag.

use crate::error::{ReleaseError, Result};
use std::fmt;
use std::path::Path;

/// Four-component release version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VersionIdentifier {
    /// Major component
    pub major: u64,
    /// Minor component
    pub minor: u64,
    /// Patch component
    pub patch: u64,
    /// Build (revision) component
    pub build: u64,
}

impl VersionIdentifier {
    /// Create a version from its components
    pub fn new(major: u64, minor: u64, patch: u64, build: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            build,
        }
    }

    /// Key matched against issue-tracker milestone titles
    pub fn milestone_key(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }

    /// Unique release name and tag
    pub fn full_identifier(&self) -> String {
        format!("{}.{}.{}.{}", self.major, self.minor, self.patch, self.build)
    }

    /// Parse a dotted `major.minor.patch[.build]` string, optionally prefixed with `v`.
    ///
    /// A missing build component is read as 0.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        let trimmed = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        let parts = trimmed
            .split('.')
            .map(|part| part.parse::<u64>().ok())
            .collect::<Option<Vec<_>>>()?;

        match parts.as_slice() {
            [major, minor, patch] => Some(Self::new(*major, *minor, *patch, 0)),
            [major, minor, patch, build] => Some(Self::new(*major, *minor, *patch, *build)),
            _ => None,
        }
    }
}

impl fmt::Display for VersionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_identifier())
    }
}

/// Resolve the release version from a versioned artifact.
///
/// `*.toml` files are read as Cargo manifests (`[package].version`, falling back to
/// `[workspace.package].version`); numeric semver build metadata becomes the build
/// component. Any other file is read as a plain version file whose first meaningful
/// line holds the dotted version.
pub fn resolve(artifact_path: &Path) -> Result<VersionIdentifier> {
    let content = std::fs::read_to_string(artifact_path).map_err(|e| {
        ReleaseError::InvalidVersionSource {
            path: artifact_path.to_path_buf(),
            reason: format!("Failed to read file: {}", e),
        }
    })?;

    let is_manifest = artifact_path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let version = if is_manifest {
        version_from_manifest(&content)
    } else {
        version_from_plain(&content)
    };

    let version = version.map_err(|reason| ReleaseError::InvalidVersionSource {
        path: artifact_path.to_path_buf(),
        reason,
    })?;

    log::debug!(
        "Resolved version {} (milestone {}) from {}",
        version.full_identifier(),
        version.milestone_key(),
        artifact_path.display()
    );
    Ok(version)
}

fn version_from_manifest(content: &str) -> std::result::Result<VersionIdentifier, String> {
    let manifest: toml::Value =
        toml::from_str(content).map_err(|e| format!("Failed to parse TOML: {}", e))?;

    let package_version = manifest
        .get("package")
        .and_then(|package| package.get("version"))
        .and_then(|v| v.as_str());

    let workspace_version = manifest
        .get("workspace")
        .and_then(|workspace| workspace.get("package"))
        .and_then(|package| package.get("version"))
        .and_then(|v| v.as_str());

    let raw = package_version
        .or(workspace_version)
        .ok_or_else(|| "Missing 'version' in [package] or [workspace.package]".to_string())?;

    let parsed = semver::Version::parse(raw)
        .map_err(|e| format!("Failed to parse version '{}': {}", raw, e))?;

    let build = parsed.build.as_str().parse::<u64>().unwrap_or(0);

    Ok(VersionIdentifier::new(
        parsed.major,
        parsed.minor,
        parsed.patch,
        build,
    ))
}

fn version_from_plain(content: &str) -> std::result::Result<VersionIdentifier, String> {
    let line = content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .ok_or_else(|| "File contains no version".to_string())?;

    VersionIdentifier::parse(line)
        .ok_or_else(|| format!("'{}' is not a major.minor.patch[.build] version", line))
}
