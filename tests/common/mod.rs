//! In-memory service and file system doubles shared by the integration tests
#![allow(dead_code)]

use bytes::Bytes;
use chrono::{DateTime, TimeZone, Utc};
use kodegen_release_sync::error::{RemoteServiceError, Result};
use kodegen_release_sync::github::{
    ContentService, Issue, IssueTracker, NewRelease, ReleaseAsset, ReleasePatch, ReleaseService,
    RemoteFile, RemoteRelease, RepoCoordinates,
};
use kodegen_release_sync::{FileSystem, ReleaseSettings};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Commit recorded by [`FakeGitHub::commit_file`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub path: String,
    pub content: String,
    pub message: String,
    pub sha: String,
}

#[derive(Default)]
struct State {
    releases: Vec<RemoteRelease>,
    issues: Vec<Issue>,
    files: HashMap<String, RemoteFile>,
    commits: Vec<Commit>,
    calls: Vec<String>,
    next_id: u64,
    uploads_attempted: usize,
    fail_upload_at: Option<usize>,
}

/// Repository double implementing every service trait over shared state
#[derive(Default)]
pub struct FakeGitHub {
    state: Mutex<State>,
}

impl FakeGitHub {
    pub fn new() -> Self {
        let fake = Self::default();
        fake.state.lock().unwrap().next_id = 1000;
        fake
    }

    pub fn with_release(self, release: RemoteRelease) -> Self {
        self.state.lock().unwrap().releases.push(release);
        self
    }

    pub fn with_issue(self, issue: Issue) -> Self {
        self.state.lock().unwrap().issues.push(issue);
        self
    }

    pub fn with_file(self, path: &str, content: &str, sha: &str) -> Self {
        self.state.lock().unwrap().files.insert(
            path.to_string(),
            RemoteFile {
                path: path.to_string(),
                sha: sha.to_string(),
                size: content.len() as u64,
            },
        );
        self
    }

    /// Make the upload with this zero-based index fail
    pub fn failing_upload_at(self, index: usize) -> Self {
        self.state.lock().unwrap().fail_upload_at = Some(index);
        self
    }

    pub fn releases(&self) -> Vec<RemoteRelease> {
        self.state.lock().unwrap().releases.clone()
    }

    pub fn releases_named(&self, name: &str) -> Vec<RemoteRelease> {
        self.releases().into_iter().filter(|r| r.name == name).collect()
    }

    pub fn commits(&self) -> Vec<Commit> {
        self.state.lock().unwrap().commits.clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    fn record(&self, call: String) {
        self.state.lock().unwrap().calls.push(call);
    }
}

fn not_found(operation: &str) -> RemoteServiceError {
    RemoteServiceError::Status {
        operation: operation.to_string(),
        status: 404,
        message: "Not Found".to_string(),
    }
}

impl ReleaseService for FakeGitHub {
    async fn list_releases(&self) -> Result<Vec<RemoteRelease>> {
        self.record("list_releases".to_string());
        Ok(self.releases())
    }

    async fn create_release(&self, release: &NewRelease) -> Result<RemoteRelease> {
        self.record(format!("create_release {}", release.name));
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let created = RemoteRelease {
            id: state.next_id,
            name: release.name.clone(),
            tag_name: release.tag_name.clone(),
            html_url: format!("https://github.com/octo/tools/releases/tag/{}", release.tag_name),
            draft: release.draft,
            prerelease: release.prerelease,
            created_at: Utc::now(),
            published_at: (!release.draft).then(Utc::now),
            body: release.body.clone(),
            assets: Vec::new(),
        };
        state.releases.push(created.clone());
        Ok(created)
    }

    async fn edit_release(&self, release_id: u64, patch: &ReleasePatch) -> Result<RemoteRelease> {
        self.record(format!("edit_release {}", release_id));
        let mut state = self.state.lock().unwrap();
        let release = state
            .releases
            .iter_mut()
            .find(|r| r.id == release_id)
            .ok_or_else(|| not_found("edit_release"))?;

        if let Some(body) = &patch.body {
            release.body = Some(body.clone());
        }
        if let Some(draft) = patch.draft {
            release.draft = draft;
        }
        Ok(release.clone())
    }

    async fn delete_release(&self, release_id: u64) -> Result<()> {
        self.record(format!("delete_release {}", release_id));
        let mut state = self.state.lock().unwrap();
        let before = state.releases.len();
        state.releases.retain(|r| r.id != release_id);
        if state.releases.len() == before {
            return Err(not_found("delete_release").into());
        }
        Ok(())
    }

    async fn upload_asset(
        &self,
        release: &RemoteRelease,
        name: &str,
        content_type: &str,
        content: Bytes,
    ) -> Result<ReleaseAsset> {
        self.record(format!("upload_asset {}", name));
        let mut state = self.state.lock().unwrap();
        let index = state.uploads_attempted;
        state.uploads_attempted += 1;
        if state.fail_upload_at == Some(index) {
            return Err(RemoteServiceError::Status {
                operation: "upload_asset".to_string(),
                status: 500,
                message: "upload rejected".to_string(),
            }
            .into());
        }

        state.next_id += 1;
        let asset = ReleaseAsset {
            id: state.next_id,
            name: name.to_string(),
            content_type: content_type.to_string(),
            size: content.len() as u64,
            browser_download_url: format!("https://example.invalid/{}", name),
        };
        let target = state
            .releases
            .iter_mut()
            .find(|r| r.id == release.id)
            .ok_or_else(|| not_found("upload_asset"))?;
        target.assets.push(asset.clone());
        Ok(asset)
    }

    async fn delete_asset(&self, asset_id: u64) -> Result<()> {
        self.record(format!("delete_asset {}", asset_id));
        let mut state = self.state.lock().unwrap();
        for release in &mut state.releases {
            release.assets.retain(|a| a.id != asset_id);
        }
        Ok(())
    }
}

impl IssueTracker for FakeGitHub {
    async fn list_closed_issues(&self) -> Result<Vec<Issue>> {
        self.record("list_closed_issues".to_string());
        Ok(self.state.lock().unwrap().issues.clone())
    }
}

impl ContentService for FakeGitHub {
    async fn get_file(&self, path: &str) -> Result<Option<RemoteFile>> {
        self.record(format!("get_file {}", path));
        Ok(self.state.lock().unwrap().files.get(path).cloned())
    }

    async fn commit_file(
        &self,
        path: &str,
        content: &str,
        message: &str,
        expected_sha: &str,
    ) -> Result<()> {
        self.record(format!("commit_file {}", path));
        let mut state = self.state.lock().unwrap();
        let file = state
            .files
            .get_mut(path)
            .ok_or_else(|| not_found("commit_file"))?;
        if file.sha != expected_sha {
            return Err(RemoteServiceError::Status {
                operation: "commit_file".to_string(),
                status: 409,
                message: "sha does not match".to_string(),
            }
            .into());
        }
        file.size = content.len() as u64;
        file.sha = format!("{}-next", expected_sha);
        state.commits.push(Commit {
            path: path.to_string(),
            content: content.to_string(),
            message: message.to_string(),
            sha: expected_sha.to_string(),
        });
        Ok(())
    }
}

/// In-memory file system; paths map to their content
#[derive(Default)]
pub struct FakeFileSystem {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
    removed: Mutex<Vec<PathBuf>>,
}

impl FakeFileSystem {
    pub fn with_file(self, path: &str, content: &[u8]) -> Self {
        self.files
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), content.to_vec());
        self
    }

    pub fn removed(&self) -> Vec<PathBuf> {
        self.removed.lock().unwrap().clone()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.lock().unwrap().contains_key(Path::new(path))
    }
}

impl FileSystem for FakeFileSystem {
    async fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }

    async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }

    async fn remove(&self, path: &Path) -> io::Result<()> {
        self.files
            .lock()
            .unwrap()
            .remove(path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))?;
        self.removed.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap()
}

pub fn release(id: u64, name: &str, created_at: DateTime<Utc>) -> RemoteRelease {
    RemoteRelease {
        id,
        name: name.to_string(),
        tag_name: name.to_string(),
        html_url: format!("https://github.com/octo/tools/releases/tag/{}", name),
        draft: false,
        prerelease: false,
        created_at,
        published_at: Some(created_at),
        body: None,
        assets: Vec::new(),
    }
}

pub fn asset(id: u64, name: &str) -> ReleaseAsset {
    ReleaseAsset {
        id,
        name: name.to_string(),
        content_type: "application/octet-stream".to_string(),
        size: 1,
        browser_download_url: format!("https://example.invalid/{}", name),
    }
}

pub fn issue(
    title: &str,
    number: u32,
    milestone: &str,
    labels: &[&str],
    closed_at: Option<DateTime<Utc>>,
) -> Issue {
    Issue {
        title: title.to_string(),
        html_url: format!("https://github.com/octo/tools/issues/{}", number),
        milestone_title: Some(milestone.to_string()),
        labels: labels.iter().map(|l| l.to_string()).collect(),
        closed_at,
    }
}

pub fn settings() -> ReleaseSettings {
    ReleaseSettings::new(
        RepoCoordinates::new("octo", "tools"),
        "test-token",
        "Cargo.toml",
    )
}
