//! File service for fmngr.
//!
//! This module provides the file lifecycle on top of the catalog and the
//! storage directories:
//! - Upload into the default storage
//! - Fetch with base64 content
//! - Listing of the default storage
//! - Deletion of blob and row

use std::fmt::Display;
use std::io;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use futures::{Stream, StreamExt};
use sqlx::SqlitePool;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::blob::{BlobStore, PendingBlob};
use super::lock::{PathGuard, PathLocks};
use super::repository::FileRepository;
use super::types::{sanitize_filename, FileMetadata, FileWithContent, NewFile};
use crate::db::Database;
use crate::storage::{DefaultStorageResolver, Storage, StorageRepository};
use crate::{FmngrError, Result};

/// File service tying blobs to catalog rows.
pub struct FileService<'a> {
    db: &'a Database,
    locks: &'a PathLocks,
}

impl<'a> FileService<'a> {
    /// Create a new FileService.
    pub fn new(db: &'a Database, locks: &'a PathLocks) -> Self {
        Self { db, locks }
    }

    /// Upload a file into the default storage.
    ///
    /// The body is written chunk by chunk to `storage.path/filename`, then
    /// the row is inserted with the size measured on disk. The blob is
    /// removed again if anything fails before the row is committed.
    ///
    /// # Errors
    /// - `Validation`: the filename is unusable
    /// - `NotFound`: no default storage
    /// - `Conflict`: the blob or row already exists, or the storage was
    ///   moved or removed while the body was being written
    /// - `Upload`: the body stream failed
    pub async fn create_file<S, B, E>(&self, filename: &str, body: S) -> Result<FileMetadata>
    where
        S: Stream<Item = std::result::Result<B, E>>,
        B: AsRef<[u8]>,
        E: Display,
    {
        let name = sanitize_filename(filename)?;
        let storage = DefaultStorageResolver::new(self.db)
            .get_default_storage()
            .await?;

        let guard = self.locks.lock(storage.id, name).await;

        let mut blob = BlobStore::from(&storage).create(name).await?;
        debug!("Writing blob {}", blob.path().display());

        let mut body = std::pin::pin!(body);
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|e| FmngrError::Upload(e.to_string()))?;
            blob.write(chunk.as_ref()).await?;
        }
        let size = blob.finish().await?;

        let new_file = NewFile::new(name, size as i64, storage.id);
        let file = Self::spawn_record(self.db.pool().clone(), storage, new_file, blob, guard)
            .await
            .map_err(|e| FmngrError::Io(io::Error::other(e)))??;

        info!(
            "Stored file {} ({}, {} bytes) in storage {}",
            file.id, name, file.size, file.storage_id
        );
        Ok(file)
    }

    /// Insert the row for a finished blob, keeping the blob only if the
    /// insert commits.
    ///
    /// Runs as its own task so the insert and the keep-or-remove decision
    /// complete together even if the caller is dropped mid-await. The path
    /// guard is held until then.
    fn spawn_record(
        pool: SqlitePool,
        storage: Storage,
        new_file: NewFile,
        blob: PendingBlob,
        guard: PathGuard,
    ) -> JoinHandle<Result<FileMetadata>> {
        tokio::spawn(async move {
            let _guard = guard;
            let blob = blob;
            let file = FileRepository::new(&pool)
                .create_in(&new_file, &storage.path)
                .await?
                .ok_or_else(|| {
                    FmngrError::Conflict(format!(
                        "storage {} was moved or removed during the upload",
                        storage.id
                    ))
                })?;
            blob.commit();
            Ok(file)
        })
    }

    /// Get a file with its content.
    ///
    /// # Errors
    /// - `NotFound`: no such file, or its storage row is gone
    /// - `MissingBlob`: the row exists but the blob does not
    pub async fn get_file(&self, id: i64) -> Result<FileWithContent> {
        let file = FileRepository::new(self.db.pool())
            .get_by_id(id)
            .await?
            .ok_or_else(|| FmngrError::NotFound(format!("file {id}")))?;

        let storage = StorageRepository::new(self.db.pool())
            .get_by_id(file.storage_id)
            .await?
            .ok_or_else(|| FmngrError::NotFound(format!("storage {}", file.storage_id)))?;

        let content = BlobStore::from(&storage)
            .read(&file.filename())
            .await?
            .ok_or_else(|| FmngrError::MissingBlob(format!("file {id}")))?;

        if content.len() as i64 != file.size {
            warn!(
                "File {} is {} bytes on disk but {} in the catalog",
                id,
                content.len(),
                file.size
            );
        }

        Ok(FileWithContent {
            base64_value: STANDARD.encode(&content),
            file,
        })
    }

    /// List the files of the default storage.
    ///
    /// Files of other storages are not included. Empty when no default
    /// storage is configured.
    pub async fn list_files(&self) -> Result<Vec<FileMetadata>> {
        let Some(storage) = DefaultStorageResolver::new(self.db)
            .find_default_storage()
            .await?
        else {
            debug!("No default storage; listing no files");
            return Ok(Vec::new());
        };

        FileRepository::new(self.db.pool())
            .list_by_storage(storage.id)
            .await
    }

    /// Delete a file and its blob.
    ///
    /// A blob that is already gone, or a storage row that no longer exists,
    /// degrades to deleting the row only. Any other removal failure aborts
    /// and keeps the row.
    pub async fn delete_file(&self, id: i64) -> Result<()> {
        let repo = FileRepository::new(self.db.pool());
        let file = repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| FmngrError::NotFound(format!("file {id}")))?;

        let storage = StorageRepository::new(self.db.pool())
            .get_by_id(file.storage_id)
            .await?;

        let Some(storage) = storage else {
            warn!(
                "Storage {} of file {} is gone; deleting the row only",
                file.storage_id, id
            );
            return Self::delete_row(&repo, id).await;
        };

        let name = file.filename();
        let _guard = self.locks.lock(storage.id, &name).await;

        // Another request may have deleted the row, and a new upload may
        // have reused the name, while this one waited for the lock.
        if repo.get_by_id(id).await?.is_none() {
            return Err(FmngrError::NotFound(format!("file {id}")));
        }

        if !BlobStore::from(&storage).remove(&name).await? {
            warn!(
                "Blob {} of file {} was already missing",
                storage.blob_path(&name).display(),
                id
            );
        }

        Self::delete_row(&repo, id).await?;
        info!("Deleted file {} ({}) from storage {}", id, name, storage.id);
        Ok(())
    }

    async fn delete_row(repo: &FileRepository<'_>, id: i64) -> Result<()> {
        if repo.delete(id).await? {
            Ok(())
        } else {
            Err(FmngrError::NotFound(format!("file {id}")))
        }
    }
}
