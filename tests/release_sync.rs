mod common;

use common::{FakeFileSystem, FakeGitHub, asset, at, release, settings};
use kodegen_release_sync::error::{LocalFileError, ReleaseError};
use kodegen_release_sync::{ReleaseSynchronizer, UploadOutcome, VersionIdentifier};
use std::path::PathBuf;

fn version() -> VersionIdentifier {
    VersionIdentifier::new(2, 1, 0, 37)
}

#[tokio::test]
async fn test_replace_mode_is_idempotent() {
    let github = FakeGitHub::new();
    let fs = FakeFileSystem::default();
    let settings = settings();

    for _ in 0..2 {
        ReleaseSynchronizer::new(&github, &fs, &settings)
            .synchronize(&version())
            .await
            .expect("synchronize");
    }

    let releases = github.releases_named("2.1.0.37");
    assert_eq!(releases.len(), 1);
    assert_eq!(releases[0].tag_name, "2.1.0.37");
    assert!(!releases[0].draft);
    assert!(!releases[0].prerelease);
}

#[tokio::test]
async fn test_replace_mode_removes_every_same_named_release() {
    let mut old = release(1, "2.1.0.37", at(1, 8));
    old.assets.push(asset(11, "stale.zip"));
    let github = FakeGitHub::new()
        .with_release(old)
        .with_release(release(2, "2.1.0.37", at(2, 8)))
        .with_release(release(3, "2.0.0.12", at(1, 9)));
    let fs = FakeFileSystem::default();
    let mut settings = settings();
    settings.is_draft = true;
    settings.is_pre_release = true;

    let result = ReleaseSynchronizer::new(&github, &fs, &settings)
        .synchronize(&version())
        .await
        .expect("synchronize");

    assert!(result.release.draft);
    assert!(result.release.prerelease);
    assert!(result.release.assets.is_empty());
    assert!(matches!(result.uploads, UploadOutcome::Skipped));

    let calls = github.calls();
    assert!(calls.contains(&"delete_release 1".to_string()));
    assert!(calls.contains(&"delete_release 2".to_string()));
    assert!(!calls.contains(&"delete_release 3".to_string()));
    assert_eq!(github.releases().len(), 2);
}

#[tokio::test]
async fn test_update_mode_requires_existing_release() {
    let github = FakeGitHub::new().with_release(release(3, "2.0.0.12", at(1, 9)));
    let fs = FakeFileSystem::default();
    let mut settings = settings();
    settings.is_update_only = true;

    let err = ReleaseSynchronizer::new(&github, &fs, &settings)
        .synchronize(&version())
        .await
        .expect_err("must fail");

    assert!(matches!(err, ReleaseError::ReleaseNotFound { ref name } if name == "2.1.0.37"));
    assert!(!github.calls().iter().any(|c| c.starts_with("create_release")));
    assert_eq!(err.exit_code(), 4);
}

#[tokio::test]
async fn test_update_mode_replaces_assets_and_keeps_record() {
    let mut existing = release(7, "2.1.0.37", at(3, 10));
    existing.body = Some("previous notes".to_string());
    existing.draft = true;
    existing.assets = vec![asset(71, "a.zip"), asset(72, "b.zip")];
    let github = FakeGitHub::new().with_release(existing);
    let fs = FakeFileSystem::default().with_file("dist/x.zip", b"x");
    let mut settings = settings();
    settings.is_update_only = true;
    settings.attachment_paths = vec![PathBuf::from("dist/x.zip")];

    let result = ReleaseSynchronizer::new(&github, &fs, &settings)
        .synchronize(&version())
        .await
        .expect("synchronize");

    assert_eq!(result.release.id, 7);
    assert!(!result.release.draft);
    assert_eq!(result.uploads.uploaded(), ["x.zip".to_string()]);

    let stored = &github.releases_named("2.1.0.37")[0];
    let names: Vec<&str> = stored.assets.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["x.zip"]);
    assert_eq!(stored.body.as_deref(), Some("previous notes"));
    assert!(!github.calls().iter().any(|c| c.starts_with("delete_release")));
}

#[tokio::test]
async fn test_upload_failure_stops_batch_and_keeps_local_files() {
    let github = FakeGitHub::new().failing_upload_at(1);
    let fs = FakeFileSystem::default()
        .with_file("dist/a.zip", b"a")
        .with_file("dist/b.zip", b"b")
        .with_file("dist/c.zip", b"c");
    let mut settings = settings();
    settings.delete_attachments_after_upload = true;
    settings.attachment_paths = ["dist/a.zip", "dist/b.zip", "dist/c.zip"]
        .iter()
        .map(PathBuf::from)
        .collect();

    let result = ReleaseSynchronizer::new(&github, &fs, &settings)
        .synchronize(&version())
        .await
        .expect("upload failure is not fatal");

    match &result.uploads {
        UploadOutcome::Failed {
            uploaded,
            failed_path,
            error,
        } => {
            assert_eq!(uploaded, &["a.zip".to_string()]);
            assert_eq!(failed_path, &PathBuf::from("dist/b.zip"));
            assert!(matches!(error, ReleaseError::RemoteService(_)));
        }
        other => panic!("expected failure, got {:?}", other),
    }

    assert!(fs.removed().is_empty());
    assert!(fs.contains("dist/a.zip"));
    assert!(!github.calls().contains(&"upload_asset c.zip".to_string()));
}

#[tokio::test]
async fn test_successful_batch_deletes_local_files_in_order() {
    let github = FakeGitHub::new();
    let fs = FakeFileSystem::default()
        .with_file("dist/setup.exe", b"exe")
        .with_file("dist/notes.pdf", b"pdf");
    let mut settings = settings();
    settings.delete_attachments_after_upload = true;
    settings.attachment_paths = vec![
        PathBuf::from("dist/setup.exe"),
        PathBuf::from("dist/notes.pdf"),
    ];

    let result = ReleaseSynchronizer::new(&github, &fs, &settings)
        .synchronize(&version())
        .await
        .expect("synchronize");

    assert!(matches!(
        result.uploads,
        UploadOutcome::Completed {
            local_files_deleted: true,
            ..
        }
    ));
    assert_eq!(result.uploads.uploaded(), ["setup.exe", "notes.pdf"]);
    assert_eq!(
        fs.removed(),
        vec![
            PathBuf::from("dist/setup.exe"),
            PathBuf::from("dist/notes.pdf")
        ]
    );

    let uploads: Vec<String> = github
        .calls()
        .into_iter()
        .filter(|c| c.starts_with("upload_asset"))
        .collect();
    assert_eq!(uploads, ["upload_asset setup.exe", "upload_asset notes.pdf"]);
}

#[tokio::test]
async fn test_missing_attachment_reports_local_file_error() {
    let github = FakeGitHub::new();
    let fs = FakeFileSystem::default();
    let mut settings = settings();
    settings.attachment_paths = vec![PathBuf::from("dist/missing.zip")];

    let result = ReleaseSynchronizer::new(&github, &fs, &settings)
        .synchronize(&version())
        .await
        .expect("synchronize");

    match result.uploads {
        UploadOutcome::Failed { error, .. } => assert!(matches!(
            error,
            ReleaseError::LocalFile(LocalFileError::Missing { .. })
        )),
        other => panic!("expected failure, got {:?}", other),
    }
}
