//! Local file access used for release attachments

use std::io;
use std::path::Path;

/// File operations needed by the attachment uploader
#[allow(async_fn_in_trait)]
pub trait FileSystem {
    /// Whether a regular file exists at `path`
    async fn exists(&self, path: &Path) -> bool;

    /// Read a whole file
    async fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Delete a file
    async fn remove(&self, path: &Path) -> io::Result<()>;
}

/// [`FileSystem`] backed by the local disk
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path)
            .await
            .is_ok_and(|metadata| metadata.is_file())
    }

    async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }

    async fn remove(&self, path: &Path) -> io::Result<()> {
        tokio::fs::remove_file(path).await
    }
}
