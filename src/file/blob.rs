//! Blob storage inside a storage directory.
//!
//! Blobs are stored under their original filename:
//! ```text
//! {storage.path}/
//! ├── report.pdf
//! └── notes.txt
//! ```
//! New blobs are written through a [`PendingBlob`], which deletes the file
//! again unless [`PendingBlob::commit`] is called.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::warn;

use crate::storage::Storage;
use crate::{FmngrError, Result};

/// Blob access rooted at one storage directory.
#[derive(Debug, Clone)]
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    /// Create a BlobStore for the given directory.
    ///
    /// The directory is not created; writing into a missing directory fails.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the full path of a blob.
    pub fn blob_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Start writing a new blob.
    ///
    /// Fails with `Conflict` if a blob with this name already exists.
    pub async fn create(&self, name: &str) -> Result<PendingBlob> {
        let path = self.blob_path(name);

        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => Ok(PendingBlob {
                path,
                file: Some(file),
                committed: false,
            }),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Err(FmngrError::Conflict(
                format!("{} already exists", path.display()),
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Read a blob.
    ///
    /// Returns `None` if the blob does not exist.
    pub async fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.blob_path(name)).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a blob.
    ///
    /// Returns `true` if the blob was deleted, `false` if it didn't exist.
    pub async fn remove(&self, name: &str) -> Result<bool> {
        match fs::remove_file(self.blob_path(name)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Check if a blob exists.
    pub async fn exists(&self, name: &str) -> bool {
        fs::try_exists(self.blob_path(name)).await.unwrap_or(false)
    }
}

impl From<&Storage> for BlobStore {
    fn from(storage: &Storage) -> Self {
        Self::new(&storage.path)
    }
}

/// A blob being written.
///
/// Dropping an uncommitted blob removes it from disk, which covers write
/// errors, catalog failures and cancelled requests alike.
#[derive(Debug)]
pub struct PendingBlob {
    path: PathBuf,
    file: Option<File>,
    committed: bool,
}

impl PendingBlob {
    /// Get the blob path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a chunk.
    pub async fn write(&mut self, chunk: &[u8]) -> Result<()> {
        match self.file.as_mut() {
            Some(file) => Ok(file.write_all(chunk).await?),
            None => Err(FmngrError::Upload(format!(
                "{} is already finished",
                self.path.display()
            ))),
        }
    }

    /// Flush and close the blob, returning its size on disk.
    pub async fn finish(&mut self) -> Result<u64> {
        if let Some(mut file) = self.file.take() {
            file.flush().await?;
            file.sync_all().await?;
        }

        let metadata = fs::metadata(&self.path).await?;
        Ok(metadata.len())
    }

    /// Keep the blob.
    pub fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for PendingBlob {
    fn drop(&mut self) {
        if self.committed {
            return;
        }

        // Close the handle before unlinking
        self.file.take();

        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                "Failed to remove uncommitted blob {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}
