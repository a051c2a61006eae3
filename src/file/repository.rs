//! File metadata repository.

use sqlx::SqlitePool;

use super::types::{FileMetadata, NewFile};
use crate::Result;

/// Repository for file metadata rows.
pub struct FileRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> FileRepository<'a> {
    /// Create a new FileRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new file row.
    ///
    /// A row for the same storage and filename already present yields `Conflict`.
    pub async fn create(&self, new_file: &NewFile) -> Result<FileMetadata> {
        let file = sqlx::query_as::<_, FileMetadata>(
            "INSERT INTO file (title, size, ext, storage_id) VALUES (?, ?, ?, ?)
             RETURNING id, title, size, ext, storage_id",
        )
        .bind(&new_file.title)
        .bind(new_file.size)
        .bind(&new_file.ext)
        .bind(new_file.storage_id)
        .fetch_one(self.pool)
        .await?;

        Ok(file)
    }

    /// Insert a new file row, provided its storage still lives at `path`.
    ///
    /// The storage check and the insert are one statement, so a concurrent
    /// path change or storage deletion cannot slip in between. Returns
    /// `None` when the storage is gone or has moved.
    pub async fn create_in(&self, new_file: &NewFile, path: &str) -> Result<Option<FileMetadata>> {
        let file = sqlx::query_as::<_, FileMetadata>(
            "INSERT INTO file (title, size, ext, storage_id)
             SELECT ?, ?, ?, id FROM storage WHERE id = ? AND path = ?
             RETURNING id, title, size, ext, storage_id",
        )
        .bind(&new_file.title)
        .bind(new_file.size)
        .bind(&new_file.ext)
        .bind(new_file.storage_id)
        .bind(path)
        .fetch_optional(self.pool)
        .await?;

        Ok(file)
    }

    /// Get a file by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<FileMetadata>> {
        let file = sqlx::query_as::<_, FileMetadata>(
            "SELECT id, title, size, ext, storage_id FROM file WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(file)
    }

    /// List files in a storage ordered by ID.
    pub async fn list_by_storage(&self, storage_id: i64) -> Result<Vec<FileMetadata>> {
        let files = sqlx::query_as::<_, FileMetadata>(
            "SELECT id, title, size, ext, storage_id FROM file
             WHERE storage_id = ? ORDER BY id",
        )
        .bind(storage_id)
        .fetch_all(self.pool)
        .await?;

        Ok(files)
    }

    /// Delete a file row by ID.
    ///
    /// Returns true if a row was deleted, false if not found.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM file WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count the files in a storage.
    pub async fn count_by_storage(&self, storage_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM file WHERE storage_id = ?")
            .bind(storage_id)
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
