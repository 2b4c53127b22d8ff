//! Sequential upload of release attachments

use crate::error::{LocalFileError, ReleaseError, Result};
use crate::fs::FileSystem;
use crate::github::{ReleaseService, RemoteRelease};
use bytes::Bytes;
use std::path::{Path, PathBuf};

/// Content type every attachment is uploaded with
pub const ATTACHMENT_CONTENT_TYPE: &str = "application/octet-stream";

/// Result of one attachment batch
#[derive(Debug)]
pub enum UploadOutcome {
    /// Nothing to upload
    Skipped,
    /// Every attachment was uploaded
    Completed {
        /// Uploaded asset names, in upload order
        uploaded: Vec<String>,
        /// Whether the local files were deleted afterwards
        local_files_deleted: bool,
    },
    /// The batch stopped at the first failing attachment
    Failed {
        /// Asset names uploaded before the failure
        uploaded: Vec<String>,
        /// Attachment that failed
        failed_path: PathBuf,
        /// Why it failed
        error: ReleaseError,
    },
}

impl UploadOutcome {
    /// Asset names that reached the release
    pub fn uploaded(&self) -> &[String] {
        match self {
            UploadOutcome::Skipped => &[],
            UploadOutcome::Completed { uploaded, .. } | UploadOutcome::Failed { uploaded, .. } => {
                uploaded
            }
        }
    }
}

/// Uploads local files as release assets
pub struct AttachmentUploader<'a, S, F> {
    service: &'a S,
    fs: &'a F,
    delete_after_upload: bool,
}

impl<'a, S: ReleaseService, F: FileSystem> AttachmentUploader<'a, S, F> {
    /// Create an uploader
    pub fn new(service: &'a S, fs: &'a F, delete_after_upload: bool) -> Self {
        Self {
            service,
            fs,
            delete_after_upload,
        }
    }

    /// Upload `paths` to `release` one at a time, in order.
    ///
    /// The first failure stops the batch and is reported in the outcome rather than
    /// returned; local files are then kept regardless of the delete setting. Only a
    /// failure to delete local files after a complete batch is returned as an error.
    pub async fn upload(
        &self,
        release: &RemoteRelease,
        paths: &[PathBuf],
    ) -> Result<UploadOutcome> {
        if paths.is_empty() {
            return Ok(UploadOutcome::Skipped);
        }

        log::info!("Uploading {} attachment(s) to {}", paths.len(), release.name);
        let mut uploaded = Vec::with_capacity(paths.len());

        for (index, path) in paths.iter().enumerate() {
            log::info!("{} / {}: {}", index + 1, paths.len(), path.display());

            match self.upload_one(release, path).await {
                Ok(name) => uploaded.push(name),
                Err(error) => {
                    log::error!("Upload of {} failed: {}", path.display(), error);
                    return Ok(UploadOutcome::Failed {
                        uploaded,
                        failed_path: path.clone(),
                        error,
                    });
                }
            }
        }

        if self.delete_after_upload {
            for path in paths {
                self.fs
                    .remove(path)
                    .await
                    .map_err(|source| LocalFileError::Delete {
                        path: path.clone(),
                        source,
                    })?;
                log::debug!("Deleted {}", path.display());
            }
        }

        Ok(UploadOutcome::Completed {
            uploaded,
            local_files_deleted: self.delete_after_upload,
        })
    }

    async fn upload_one(&self, release: &RemoteRelease, path: &Path) -> Result<String> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| LocalFileError::InvalidName {
                path: path.to_path_buf(),
            })?
            .to_string();

        if !self.fs.exists(path).await {
            return Err(LocalFileError::Missing {
                path: path.to_path_buf(),
            }
            .into());
        }

        let content = self
            .fs
            .read(path)
            .await
            .map_err(|source| LocalFileError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let size = content.len();

        self.service
            .upload_asset(release, &name, ATTACHMENT_CONTENT_TYPE, Bytes::from(content))
            .await?;

        log::info!("Uploaded {} ({} bytes)", name, size);
        Ok(name)
    }
}
